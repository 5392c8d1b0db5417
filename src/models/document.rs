use crate::error::{AppError, AppResult};
use std::path::Path;
use std::sync::Arc;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_UNKNOWN: &str = "application/octet-stream";

/// 用户选择的文档
///
/// 内容以 `Arc<[u8]>` 持有，上传时克隆句柄而不是复制字节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub name: String,
    pub content_type: String,
    pub content: Arc<[u8]>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// 从磁盘读取文档，按扩展名推断类型
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, content_type_for(path), bytes))
    }

    /// 文件字节数
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// 可读的文件大小，如 "1.5 KB"
    pub fn display_size(&self) -> String {
        format_file_size(self.size())
    }
}

/// 根据扩展名推断 MIME 类型
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("pdf") => MIME_PDF,
        Some("docx") => MIME_DOCX,
        Some("txt") => MIME_TEXT,
        _ => MIME_UNKNOWN,
    }
}

/// 格式化文件大小（最多两位小数，单位最大到 MB）
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    let k = 1024f64;
    let value = bytes as f64;
    let i = ((value.ln() / k.ln()).floor() as usize).min(UNITS.len() - 1);
    let scaled = (value / k.powi(i as i32) * 100.0).round() / 100.0;
    format!("{} {}", scaled, UNITS[i])
}
