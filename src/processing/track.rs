use crate::models::{PaperRatingSummary, TrackStats, TrackStatsRow};
use crate::processing::stats::mean_present;
use std::collections::BTreeMap;

/// 按 track 汇总论文评分
///
/// 每个 track 的均值只统计有评分的论文；全部无评分时为 None。
pub fn aggregate_by_track(summaries: &[PaperRatingSummary]) -> BTreeMap<String, TrackStats> {
    let mut groups: BTreeMap<&str, Vec<&PaperRatingSummary>> = BTreeMap::new();
    for summary in summaries {
        groups.entry(summary.track.as_str()).or_default().push(summary);
    }

    groups
        .into_iter()
        .map(|(track, members)| {
            let stats = TrackStats {
                paper_count: members.len(),
                rated_count: members.iter().filter(|s| s.is_rated()).count(),
                avg_novelty: mean_present(members.iter().map(|s| s.avg_novelty)),
                avg_technical: mean_present(members.iter().map(|s| s.avg_technical)),
                avg_confidence: mean_present(members.iter().map(|s| s.avg_confidence)),
            };
            (track.to_string(), stats)
        })
        .collect()
}

/// 转换为落盘用的行
pub fn track_rows(tracks: &BTreeMap<String, TrackStats>) -> Vec<TrackStatsRow> {
    tracks
        .iter()
        .map(|(track, stats)| TrackStatsRow {
            track: track.clone(),
            stats: stats.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn summary(track: &str, novelty: Option<f64>) -> PaperRatingSummary {
        PaperRatingSummary {
            track: track.to_string(),
            avg_novelty: novelty,
            avg_technical: novelty.map(|n| n + 1.0),
            avg_confidence: novelty.map(|_| 3.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_track_mean() {
        let tracks = aggregate_by_track(&[summary("DB", Some(4.0)), summary("DB", Some(2.0))]);
        let db = &tracks["DB"];
        assert_eq!(db.avg_novelty, Some(3.0));
        assert_eq!(db.avg_technical, Some(4.0));
        assert_eq!(db.avg_confidence, Some(3.0));
        assert_eq!(db.paper_count, 2);
        assert_eq!(db.rated_count, 2);
    }

    #[test]
    fn test_keys_are_distinct_tracks() {
        let input = vec![
            summary("DB", Some(4.0)),
            summary("Web", Some(3.0)),
            summary("N/A", None),
            summary("DB", Some(1.0)),
            summary("", None),
        ];
        let tracks = aggregate_by_track(&input);

        let keys: BTreeSet<&str> = tracks.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = input.iter().map(|s| s.track.as_str()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_null_members_excluded() {
        let tracks = aggregate_by_track(&[
            summary("DB", Some(4.0)),
            summary("DB", None),
            summary("Web", None),
        ]);

        assert_eq!(tracks["DB"].avg_novelty, Some(4.0));
        assert_eq!(tracks["DB"].paper_count, 2);
        assert_eq!(tracks["DB"].rated_count, 1);
        assert_eq!(tracks["Web"].avg_novelty, None);
        assert_eq!(tracks["Web"].avg_confidence, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_track(&[]).is_empty());
    }
}
