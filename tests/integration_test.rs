use openreview_stats::storage::read_jsonl;
use openreview_stats::{App, Config, InMemoryNotesApi, PaperRatingSummary, PaperRecord};
use serde_json::{json, Value};
use std::sync::Arc;

fn raw_paper(id: &str, title: &str, track: &str) -> Value {
    json!({
        "id": id,
        "forum": id,
        "content": {
            "title": { "value": title },
            "abstract": { "value": format!("Abstract of {}", title) },
            "track": { "value": track },
            "keywords": { "value": ["web", "graphs"] },
            "venue": { "value": "WWW 2025" }
        }
    })
}

fn review(novelty: i64, scope: i64, technical: i64, confidence: i64) -> Value {
    json!({
        "content": {
            "novelty": { "value": format!("{}: label", novelty) },
            "scope": { "value": format!("{}: label", scope) },
            "technical_quality": { "value": format!("{}: label", technical) },
            "reviewer_confidence": { "value": format!("{}: label", confidence) }
        }
    })
}

fn forum(paper: &Value, reviews: Vec<Value>) -> Value {
    let mut notes = vec![paper.clone()];
    notes.extend(reviews);
    json!({ "notes": notes })
}

fn build_api() -> InMemoryNotesApi {
    let p1 = raw_paper("p1", "Paper A", "DB");
    let p2 = raw_paper("p2", "Paper B", "DB");
    let p3 = raw_paper("p3", "Paper C", "Web");

    InMemoryNotesApi::new()
        .with_papers(vec![p1.clone(), p2.clone(), p3.clone()])
        .with_forum("p1", forum(&p1, vec![review(4, 3, 5, 2), review(4, 3, 3, 4)]))
        .with_forum("p2", forum(&p2, vec![review(2, 3, 3, 3)]))
        .with_forum("p3", forum(&p3, vec![]))
}

fn ids(ratings: &[PaperRatingSummary]) -> Vec<Option<String>> {
    ratings.iter().map(|r| r.id.clone()).collect()
}

fn test_config(data_dir: &std::path::Path) -> Config {
    Config {
        venue: "ACM.org/TheWebConf".to_string(),
        year: 2025,
        batch_limit: 2,
        data_dir: data_dir.to_string_lossy().to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(build_api());
    let app = App::with_api(test_config(dir.path()), api.clone());

    let summary = app.run().await.expect("流水线运行失败");

    assert_eq!(summary.papers.len(), 3);
    assert_eq!(summary.ratings.len(), 3);
    assert!(summary.failed_reviews.is_empty());

    // 评审按完成顺序返回，按线程内的 id 对齐
    let p1 = summary
        .ratings
        .iter()
        .find(|r| r.id.as_deref() == Some("p1"))
        .unwrap();
    assert_eq!(p1.avg_novelty, Some(4.0));
    assert_eq!(p1.std_novelty, Some(0.0));
    assert_eq!(p1.avg_technical, Some(4.0));
    assert_eq!(p1.avg_confidence, Some(3.0));

    let p3 = summary
        .ratings
        .iter()
        .find(|r| r.id.as_deref() == Some("p3"))
        .unwrap();
    assert!(!p3.is_rated());

    assert_eq!(summary.tracks.len(), 2);
    assert_eq!(summary.tracks["DB"].avg_novelty, Some(3.0));
    assert_eq!(summary.tracks["DB"].paper_count, 2);
    assert_eq!(summary.tracks["Web"].avg_novelty, None);

    let paths = app.paths();
    for path in [&paths.notes, &paths.papers, &paths.reviews, &paths.ratings, &paths.tracks] {
        assert!(path.exists(), "缺少文件 {}", path.display());
    }
    let papers: Vec<PaperRecord> = read_jsonl(&paths.papers).await.unwrap();
    assert_eq!(papers[0].id, "p1");
    let ratings: Vec<PaperRatingSummary> = read_jsonl(&paths.ratings).await.unwrap();
    assert_eq!(ids(&ratings), ids(&summary.ratings));

    // 1 次计数 + 2 页论文 + 3 次 forum
    assert_eq!(api.request_count(), 6);
}

#[tokio::test]
async fn test_existing_artifacts_skip_network() {
    let dir = tempfile::tempdir().unwrap();

    let first = App::with_api(test_config(dir.path()), Arc::new(build_api()));
    let expected = first.run().await.unwrap();

    let api = Arc::new(InMemoryNotesApi::new());
    let second = App::with_api(test_config(dir.path()), api.clone());
    let summary = second.run().await.unwrap();

    assert_eq!(api.request_count(), 0);
    assert_eq!(ids(&summary.ratings), ids(&expected.ratings));
    assert_eq!(
        summary.tracks.keys().collect::<Vec<_>>(),
        expected.tracks.keys().collect::<Vec<_>>()
    );
    assert_eq!(summary.tracks["DB"].avg_novelty, Some(3.0));
}

#[tokio::test]
async fn test_missing_forum_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let p1 = raw_paper("p1", "Paper A", "DB");
    let p2 = raw_paper("p2", "Paper B", "DB");
    let api = InMemoryNotesApi::new()
        .with_papers(vec![p1.clone(), p2])
        .with_forum("p1", forum(&p1, vec![review(5, 5, 5, 5)]));

    let app = App::with_api(test_config(dir.path()), Arc::new(api));
    let summary = app.run().await.unwrap();

    assert_eq!(summary.failed_reviews, vec!["p2".to_string()]);
    assert_eq!(summary.ratings.len(), 1);
    assert_eq!(summary.tracks["DB"].avg_novelty, Some(5.0));
}

#[tokio::test]
async fn test_missing_field_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut broken = raw_paper("p1", "Paper A", "DB");
    broken["content"].as_object_mut().unwrap().remove("venue");

    let app = App::with_api(
        test_config(dir.path()),
        Arc::new(InMemoryNotesApi::new().with_papers(vec![broken])),
    );

    // 整批都缺少 venue 字段
    let err = app.run().await.unwrap_err();
    assert!(err.to_string().contains("content.venue.value"));
}

#[tokio::test]
async fn test_field_missing_in_one_paper_keeps_run_going() {
    let dir = tempfile::tempdir().unwrap();
    let p1 = raw_paper("p1", "Paper A", "DB");
    let mut p2 = raw_paper("p2", "Paper B", "DB");
    p2["content"].as_object_mut().unwrap().remove("keywords");
    let api = InMemoryNotesApi::new()
        .with_papers(vec![p1.clone(), p2.clone()])
        .with_forum("p1", forum(&p1, vec![review(4, 4, 4, 4)]))
        .with_forum("p2", forum(&p2, vec![review(2, 2, 2, 2)]));

    let app = App::with_api(test_config(dir.path()), Arc::new(api));
    let summary = app.run().await.unwrap();

    assert_eq!(summary.papers.len(), 2);
    assert_eq!(summary.papers[1].keywords, None);
    assert_eq!(summary.ratings.len(), 2);
    assert_eq!(summary.tracks["DB"].avg_novelty, Some(3.0));

    let papers: Vec<PaperRecord> = read_jsonl(&app.paths().papers).await.unwrap();
    assert_eq!(papers, summary.papers);
}

/// 真实网络请求，需要手动运行：cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_live_pipeline() {
    openreview_stats::utils::logging::init();

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_string_lossy().to_string(),
        limit: Some(5),
        batch_limit: 5,
        ..Config::default()
    };

    let summary = App::initialize(config).await.unwrap().run().await.unwrap();
    assert!(!summary.papers.is_empty());
}
