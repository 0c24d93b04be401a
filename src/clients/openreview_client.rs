/// OpenReview API 客户端
///
/// 封装所有与 OpenReview notes 接口相关的 HTTP 调用
use crate::clients::notes_api::{NotesApi, NotesQuery};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// OpenReview 客户端
///
/// 内部的 `reqwest::Client` 自带连接池，可在多个任务间共享。
pub struct OpenReviewClient {
    client: reqwest::Client,
    notes_url: String,
}

impl OpenReviewClient {
    /// 创建新的 OpenReview 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let headers = build_header_map(config)?;

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            client,
            notes_url: format!("{}/notes", config.api_base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl NotesApi for OpenReviewClient {
    async fn get_notes(&self, query: &NotesQuery) -> Result<Value, ApiError> {
        let endpoint = query.describe();
        debug!("GET {}", endpoint);

        let response = self
            .client
            .get(&self.notes_url)
            .query(query.params())
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::JsonParseFailed {
                endpoint,
                source: Box::new(e),
            })
    }
}

fn build_header_map(config: &Config) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let invalid = || {
            AppError::Config(ConfigError::InvalidHeader {
                name: name.clone(),
            })
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
