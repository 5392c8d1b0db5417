//! 剪贴板服务 - 业务能力层
//!
//! 只负责"把文本放进剪贴板"能力

use crate::error::ClipboardError;
use base64::Engine;
use std::io::Write;
use tracing::debug;

/// 剪贴板写入能力
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 通过 OSC 52 转义序列写入终端剪贴板
///
/// 支持 Ghostty、iTerm2、kitty、WezTerm 等大多数现代终端
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// 生成 OSC 52 序列
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        debug!("写入剪贴板: {} 字符", text.chars().count());
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// 内存剪贴板（无终端环境与测试使用）
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟被系统拒绝写入的剪贴板
    pub fn rejecting() -> Self {
        Self {
            contents: None,
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::Rejected("clipboard unavailable".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
