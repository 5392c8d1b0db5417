//! 文件校验服务 - 业务能力层
//!
//! 纯函数：只判断文件是否可接受，不修改任何状态

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::error::ValidationError;
use crate::models::document::{DocumentFile, MIME_DOCX, MIME_PDF, MIME_TEXT};

/// 允许上传的文件类型
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = [MIME_PDF, MIME_DOCX, MIME_TEXT];

/// 按默认上限（16 MiB）校验文件
pub fn validate_file(file: &DocumentFile) -> Result<(), ValidationError> {
    validate_file_with_limit(file, DEFAULT_MAX_FILE_SIZE)
}

/// 按指定上限校验文件；先检查类型再检查大小
pub fn validate_file_with_limit(file: &DocumentFile, max_size: u64) -> Result<(), ValidationError> {
    if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            content_type: file.content_type.clone(),
        });
    }

    let size = file.size();
    if size > max_size {
        return Err(ValidationError::TooLarge { size, limit: max_size });
    }

    Ok(())
}
