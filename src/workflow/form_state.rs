//! 表单状态
//!
//! 一次会话内唯一的可变状态，显式传给各组件操作

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::models::{AnalysisResult, Language, Task};
use crate::workflow::upload_slot::{SlotPosition, UploadSlot};

/// 服务健康指示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    /// 尚未检查
    #[default]
    Unknown,
    /// System Ready
    Ready,
    /// System Offline（只影响指示，不阻塞任何操作）
    Offline,
}

/// 视图焦点（替代页面滚动位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFocus {
    #[default]
    Top,
    Results,
}

/// 表单状态
#[derive(Debug, Clone)]
pub struct FormState {
    pub selected_task: Task,
    pub selected_language: Language,
    slots: [UploadSlot; 2],
    pub query_text: String,
    pub submission_in_flight: bool,
    pub last_result: Option<AnalysisResult>,
    pub last_error: Option<String>,
    /// 成功类提示，如 "Results copied to clipboard!"
    pub last_notice: Option<String>,
    pub service_status: ServiceStatus,
    pub focus: ViewFocus,
    /// 文件大小上限
    pub max_file_size: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::with_max_file_size(DEFAULT_MAX_FILE_SIZE)
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self {
            selected_task: Task::default(),
            selected_language: Language::default(),
            slots: [
                UploadSlot::new(SlotPosition::Primary),
                UploadSlot::new(SlotPosition::Secondary),
            ],
            query_text: String::new(),
            submission_in_flight: false,
            last_result: None,
            last_error: None,
            last_notice: None,
            service_status: ServiceStatus::Unknown,
            focus: ViewFocus::Top,
            max_file_size,
        }
    }

    pub fn slot(&self, position: SlotPosition) -> &UploadSlot {
        &self.slots[Self::index(position)]
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut UploadSlot {
        &mut self.slots[Self::index(position)]
    }

    /// 去除首尾空白后的查询内容，空则为 `None`
    pub fn trimmed_query(&self) -> Option<&str> {
        let q = self.query_text.trim();
        (!q.is_empty()).then_some(q)
    }

    /// 记录表单级错误
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.last_notice = None;
        self.last_error = Some(message.into());
    }

    /// 记录成功提示
    pub fn report_notice(&mut self, message: impl Into<String>) {
        self.last_notice = Some(message.into());
    }

    fn index(position: SlotPosition) -> usize {
        match position {
            SlotPosition::Primary => 0,
            SlotPosition::Secondary => 1,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
