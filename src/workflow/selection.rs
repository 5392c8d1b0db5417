//! 任务与语言选择
//!
//! 纯同步状态转换；查询框和第二槽位的可见性由任务推导，不单独存储

use crate::models::{Language, Task};
use crate::workflow::form_state::FormState;
use crate::workflow::upload_slot::SlotPosition;
use tracing::debug;

/// 切换任务；非对比任务会清空第二槽位
pub fn set_task(state: &mut FormState, task: Task) {
    debug!("切换任务: {} → {}", state.selected_task, task);
    state.selected_task = task;

    if !task.requires_second_document() {
        state.slot_mut(SlotPosition::Secondary).remove();
    }
}

/// 切换语言，无其他副作用
pub fn set_language(state: &mut FormState, language: Language) {
    debug!("切换语言: {} → {}", state.selected_language, language);
    state.selected_language = language;
}

/// 是否显示第二个上传区域
pub fn second_slot_visible(state: &FormState) -> bool {
    state.selected_task.requires_second_document()
}

/// 是否显示查询输入框
pub fn query_visible(state: &FormState) -> bool {
    state.selected_task.requires_query()
}
