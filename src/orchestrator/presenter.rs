//! 结果展示
//!
//! 把原始文本结果投影成段落结构，并提供复制、下载、重置操作

use crate::error::{AppError, AppResult, ClipboardError, FileError};
use crate::models::AnalysisResult;
use crate::services::clipboard::Clipboard;
use crate::services::result_writer::ResultWriter;
use crate::workflow::form_state::{FormState, ViewFocus};
use crate::workflow::upload_slot::SlotPosition;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 提示块前缀
pub const ADVISORY_PREFIX: &str = "⚠️ Note:";

/// 渲染后的结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedResult {
    /// 每段保留段内的换行
    pub paragraphs: Vec<Vec<String>>,
    /// 服务端无法完全满足请求时的补充说明
    pub advisory: Option<String>,
}

impl RenderedResult {
    /// 纯文本形式，用于复制和下载
    pub fn plain_text(&self) -> String {
        let mut blocks: Vec<String> = self.paragraphs.iter().map(|lines| lines.join("\n")).collect();
        if let Some(note) = &self.advisory {
            blocks.push(format!("{} {}", ADVISORY_PREFIX, note));
        }
        blocks.join("\n\n")
    }
}

impl std::fmt::Display for RenderedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.plain_text())
    }
}

/// 按空行切分段落；不修改原结果
pub fn render(result: &AnalysisResult) -> RenderedResult {
    let normalized = result.output.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let advisory = result
        .missing_info
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    RenderedResult { paragraphs, advisory }
}

/// 保存结果并把焦点移到结果区域
pub fn show_result(state: &mut FormState, result: AnalysisResult) {
    state.last_result = Some(result);
    state.focus = ViewFocus::Results;
}

/// 当前结果的渲染
pub fn current(state: &FormState) -> Option<RenderedResult> {
    state.last_result.as_ref().map(render)
}

/// 复制当前结果到剪贴板
pub fn copy(state: &mut FormState, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
    let Some(rendered) = current(state) else {
        return Err(ClipboardError::NothingToCopy);
    };

    match clipboard.write_text(&rendered.plain_text()) {
        Ok(()) => {
            info!("📋 结果已复制到剪贴板");
            state.report_notice("Results copied to clipboard!");
            Ok(())
        }
        Err(e) => {
            warn!("⚠️ 复制失败: {}", e);
            state.report_error("Failed to copy results");
            Err(e)
        }
    }
}

/// 把当前结果保存为本地文本文件
pub async fn download(state: &mut FormState, writer: &ResultWriter) -> AppResult<PathBuf> {
    let Some(rendered) = current(state) else {
        return Err(AppError::File(FileError::NothingToWrite));
    };

    match writer.write(&rendered.plain_text()).await {
        Ok(path) => {
            info!("💾 结果已保存至: {}", path.display());
            state.report_notice(format!("Results saved to {}", path.display()));
            Ok(path)
        }
        Err(e) => {
            warn!("⚠️ 保存结果失败: {}", e);
            state.report_error("Failed to download results");
            Err(e)
        }
    }
}

/// 清空文档、查询和结果；保留任务与语言选择
pub fn reset(state: &mut FormState) {
    debug!("重置表单");
    state.slot_mut(SlotPosition::Primary).remove();
    state.slot_mut(SlotPosition::Secondary).remove();
    state.query_text.clear();
    state.last_result = None;
    state.last_error = None;
    state.last_notice = None;
    state.focus = ViewFocus::Top;
}
