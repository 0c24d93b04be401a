use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 数据解析错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非 2xx 状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应体不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 响应缺少必需的顶层字段
    #[error("API响应缺少字段 '{key}' ({endpoint})")]
    MissingKey { endpoint: String, key: String },
    /// 后台任务异常退出
    #[error("请求任务失败 (论文 {paper_id}): {message}")]
    TaskFailed { paper_id: String, message: String },
}

impl ApiError {
    /// 是否属于传输层错误（网络、状态码、响应体解码）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::RequestFailed { .. }
                | ApiError::BadStatus { .. }
                | ApiError::JsonParseFailed { .. }
        )
    }
}

/// 数据解析错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 规范化时缺少必需字段
    #[error("记录 {record_id} 缺少字段 '{field}'")]
    MissingField { record_id: String, field: String },
    /// 字段类型不符合预期
    #[error("记录 {record_id} 的字段 '{field}' 类型错误，期望 {expected}")]
    InvalidField {
        record_id: String,
        field: String,
        expected: String,
    },
    /// 评分字段不是 "<整数>: <描述>" 格式
    #[error("论文 {paper_id} 的评分字段 '{field}' 无法解析: {raw:?}")]
    RatingParse {
        paper_id: String,
        field: String,
        raw: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 行解析失败
    #[error("JSON行解析失败 ({path} 第 {line} 行): {source}")]
    JsonLineParseFailed {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
    /// 请求头不合法
    #[error("请求头 {name} 不合法")]
    InvalidHeader { name: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<tokio::sync::AcquireError> for AppError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        AppError::Other(format!("并发许可获取失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建缺失字段错误
    pub fn missing_field(record_id: impl Into<String>, field: impl Into<String>) -> Self {
        AppError::Data(DataError::MissingField {
            record_id: record_id.into(),
            field: field.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
