use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地校验错误（不会触达网络）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 远程分析服务错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 剪贴板错误
    #[error("剪贴板错误: {0}")]
    Clipboard(#[from] ClipboardError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 本地校验错误
///
/// 文件类型/大小不合法，或者提交前缺少必要输入。
/// `Display` 输出即为展示给用户的提示语。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 不支持的文件类型
    #[error("Invalid file type. Please upload PDF, DOCX, or TXT files.")]
    UnsupportedType { content_type: String },
    /// 文件超过大小上限
    #[error("File too large. Maximum size is {}MB.", .limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },
    /// 尚未上传主文档
    #[error("Please upload a document first.")]
    MissingPrimaryDocument,
    /// 对比任务缺少第二份文档
    #[error("Please upload a second document for comparison.")]
    MissingSecondDocument,
    /// 任务需要查询内容
    #[error("Please enter a query for this task.")]
    MissingQuery,
}

impl ValidationError {
    /// 简短原因（"unsupported type" / "too large" ...）
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedType { .. } => "unsupported type",
            ValidationError::TooLarge { .. } => "too large",
            ValidationError::MissingPrimaryDocument => "document required",
            ValidationError::MissingSecondDocument => "second document required",
            ValidationError::MissingQuery => "query required",
        }
    }
}

/// API 调用错误
///
/// 传输错误与服务端报告的失败在用户侧属于同一类，只在文案上有区别。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络不可达或响应无法解析
    #[error("{endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    /// 服务端明确返回 `success: false`
    #[error("{endpoint}: {message}")]
    Service { endpoint: String, message: String },
}

impl ApiError {
    pub fn transport(endpoint: impl Into<String>, message: impl ToString) -> Self {
        ApiError::Transport {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    pub fn service(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Service {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// 展示给用户的错误文本（不含 endpoint）
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Transport { message, .. } | ApiError::Service { message, .. } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

/// 剪贴板错误
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// 没有可复制的结果
    #[error("没有可复制的结果")]
    NothingToCopy,
    /// 写入被拒绝
    #[error("剪贴板写入被拒绝: {0}")]
    Rejected(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 没有可下载的结果
    #[error("没有可下载的结果")]
    NothingToWrite,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("配置文件读取失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    HttpClient(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        let err = ValidationError::TooLarge {
            size: 20 * 1024 * 1024,
            limit: 16 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File too large. Maximum size is 16MB.");
        assert_eq!(err.reason(), "too large");
        assert_eq!(
            ValidationError::MissingSecondDocument.reason(),
            "second document required"
        );
    }

    #[test]
    fn test_api_error_user_message_drops_endpoint() {
        let err = ApiError::service("/api/process", "Query required for qa task");
        assert_eq!(err.user_message(), "Query required for qa task");
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "/api/process: Query required for qa task");
    }
}
