use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 单个文件大小上限（16 MiB）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分析服务地址
    pub api_base_url: String,
    /// 单个文件大小上限（字节）
    pub max_file_size: u64,
    /// 结果下载目录
    pub download_dir: PathBuf,
    /// 请求超时（秒），0 表示不在本地设置超时
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            download_dir: PathBuf::from("."),
            request_timeout_secs: 0,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载，未设置的字段使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 先读配置文件（如有），再叠加环境变量
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Ok(Self::from_toml_file(p)?.with_env_overrides()),
            None => Ok(Self::from_env()),
        }
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 按变量名覆盖字段；无法解析的值保留原值
    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse().ok());
        Self {
            api_base_url: lookup("DIA_API_BASE_URL").unwrap_or(self.api_base_url),
            max_file_size: parsed("DIA_MAX_FILE_SIZE").unwrap_or(self.max_file_size),
            download_dir: lookup("DIA_DOWNLOAD_DIR").map(PathBuf::from).unwrap_or(self.download_dir),
            request_timeout_secs: parsed("DIA_REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 去掉末尾 `/` 的服务地址
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
