use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "openreview.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 会议 ID，例如 ACM.org/TheWebConf
    pub venue: String,
    /// 会议年份
    pub year: u32,
    /// 分页拉取时每页的论文数量
    pub batch_limit: usize,
    /// 论文总数上限（None 表示不限）
    pub limit: Option<usize>,
    /// 同时拉取评审的请求数量
    pub max_concurrent_reviews: usize,
    /// OpenReview API 地址
    pub api_base_url: String,
    /// 请求超时（秒），None 使用 reqwest 默认行为
    pub request_timeout_secs: Option<u64>,
    /// 数据文件存放目录
    pub data_dir: String,
    /// 每个请求附带的请求头
    pub headers: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            venue: "ACM.org/TheWebConf".to_string(),
            year: 2025,
            batch_limit: 1000,
            limit: None,
            max_concurrent_reviews: 4,
            api_base_url: "https://api2.openreview.net".to_string(),
            request_timeout_secs: None,
            data_dir: "data".to_string(),
            headers: default_headers(),
        }
    }
}

/// 浏览器风格的请求头（公开只读接口，不携带认证信息）
pub fn default_headers() -> BTreeMap<String, String> {
    [
        ("accept", "application/json"),
        ("accept-language", "en-US,en;q=0.9"),
        ("cache-control", "max-age=0"),
        (
            "sec-ch-ua",
            r#""Google Chrome";v="117", "Not;A=Brand";v="8", "Chromium";v="117""#,
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
        ("upgrade-insecure-requests", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（如存在）→ 环境变量，最后校验
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("OPENREVIEW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &str) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::File(FileError::TomlParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }

    fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Ok(venue) = std::env::var("VENUE") {
            self.venue = venue;
        }
        if let Some(year) = parse_env::<u32>("YEAR", "u32")? {
            self.year = year;
        }
        if let Some(batch_limit) = parse_env::<usize>("BATCH_LIMIT", "usize")? {
            self.batch_limit = batch_limit;
        }
        if let Some(limit) = parse_env::<usize>("LIMIT", "usize")? {
            self.limit = Some(limit);
        }
        if let Some(n) = parse_env::<usize>("MAX_CONCURRENT_REVIEWS", "usize")? {
            self.max_concurrent_reviews = n;
        }
        if let Ok(url) = std::env::var("OPENREVIEW_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = parse_env::<u64>("REQUEST_TIMEOUT_SECS", "u64")? {
            self.request_timeout_secs = Some(secs);
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            self.data_dir = dir;
        }
        Ok(self)
    }

    /// 校验配置
    pub fn validate(&self) -> AppResult<()> {
        if self.venue.trim().is_empty() {
            return Err(invalid("venue", "不能为空"));
        }
        if self.batch_limit == 0 {
            return Err(invalid("batch_limit", "必须大于 0"));
        }
        if self.max_concurrent_reviews == 0 {
            return Err(invalid("max_concurrent_reviews", "必须大于 0"));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(invalid("api_base_url", "不能为空"));
        }
        Ok(())
    }

    /// 会议域 ID，例如 ACM.org/TheWebConf/2025/Conference
    pub fn venue_domain(&self) -> String {
        venue_domain(&self.venue, self.year)
    }
}

/// 拼接 `{venue}/{year}/Conference`
pub fn venue_domain(venue: &str, year: u32) -> String {
    format!("{}/{}/Conference", venue, year)
}

fn invalid(name: &str, reason: &str) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.venue_domain(), "ACM.org/TheWebConf/2025/Conference");
        assert!(config.headers.contains_key("accept"));
        assert!(!config.headers.contains_key("authorization"));
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let config = Config {
            batch_limit: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let content = r#"
venue = "ICLR.cc"
year = 2024
max_concurrent_reviews = 8
"#;
        let config = Config::from_toml_str(content, "test.toml").unwrap();
        assert_eq!(config.venue, "ICLR.cc");
        assert_eq!(config.year, 2024);
        assert_eq!(config.max_concurrent_reviews, 8);
        assert_eq!(config.batch_limit, 1000);
        assert_eq!(config.limit, None);
        assert_eq!(config.headers, default_headers());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let err = Config::from_toml_str("year = \"abc\"", "bad.toml").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
