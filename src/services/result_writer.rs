//! 结果下载服务 - 业务能力层
//!
//! 只负责"把结果文本写成本地文件"能力，不关心流程

use crate::error::{AppError, AppResult};
use std::path::PathBuf;
use tracing::debug;

/// 结果文件写入服务
///
/// 文件名与任务无关，只带时间戳：`dia-results-<毫秒>.txt`
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// 使用指定目录创建
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 按当前时间生成文件名
    pub fn file_name_at(timestamp_millis: i64) -> String {
        format!("dia-results-{}.txt", timestamp_millis)
    }

    /// 写入结果文本，返回文件路径
    pub async fn write(&self, text: &str) -> AppResult<PathBuf> {
        let file_name = Self::file_name_at(chrono::Utc::now().timestamp_millis());
        let path = self.output_dir.join(file_name);

        debug!("写入结果文件: {} | 长度: {}", path.display(), text.len());

        tokio::fs::write(&path, text.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}
