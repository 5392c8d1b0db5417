//! 提交编排
//!
//! 检查就绪条件 → 构建请求 → 调用处理接口 → 写回结果或错误。
//! 同一时间最多一个提交在进行中。

use crate::clients::AnalysisApi;
use crate::error::{ApiError, ValidationError};
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::orchestrator::presenter;
use crate::workflow::form_state::FormState;
use crate::workflow::upload_slot::SlotPosition;
use tracing::{debug, error, info, warn};

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 处理成功，结果已写入 `last_result`
    Completed,
    /// 本地校验未通过，未发起网络请求
    Rejected(ValidationError),
    /// 远程处理失败，错误已写入 `last_error`
    Failed(String),
    /// 已有提交在进行中，本次调用被忽略
    AlreadyInFlight,
}

/// 第一个未满足的提交条件
pub fn check_ready(state: &FormState) -> Result<(), ValidationError> {
    if !state.slot(SlotPosition::Primary).is_ready() {
        return Err(ValidationError::MissingPrimaryDocument);
    }

    let task = state.selected_task;
    if task.requires_second_document() && !state.slot(SlotPosition::Secondary).is_ready() {
        return Err(ValidationError::MissingSecondDocument);
    }

    if task.requires_query() && state.trimmed_query().is_none() {
        return Err(ValidationError::MissingQuery);
    }

    Ok(())
}

/// 是否满足全部提交条件
pub fn can_submit(state: &FormState) -> bool {
    check_ready(state).is_ok()
}

/// 根据当前状态构建处理请求
pub fn build_request(state: &FormState) -> Result<AnalysisRequest, ValidationError> {
    check_ready(state)?;

    let document_1 = state
        .slot(SlotPosition::Primary)
        .remote_locator()
        .ok_or(ValidationError::MissingPrimaryDocument)?
        .to_string();

    // 只有需要的任务才携带第二份文档和查询
    let task = state.selected_task;
    let document_2 = task
        .requires_second_document()
        .then(|| state.slot(SlotPosition::Secondary).remote_locator().map(str::to_string))
        .flatten();
    let query = task
        .requires_query()
        .then(|| state.trimmed_query().map(str::to_string))
        .flatten();

    Ok(AnalysisRequest {
        task,
        language: state.selected_language,
        document_1,
        document_2,
        query,
    })
}

/// 提交第一阶段：校验并标记进行中
///
/// 返回 `Ok(None)` 表示已有提交在进行中
pub fn begin_submission(state: &mut FormState) -> Result<Option<AnalysisRequest>, ValidationError> {
    if state.submission_in_flight {
        debug!("已有提交在进行中，忽略本次提交");
        return Ok(None);
    }

    let request = match build_request(state) {
        Ok(request) => request,
        Err(e) => {
            warn!("⚠️ 提交被拒绝: {}", e.reason());
            state.report_error(e.to_string());
            return Err(e);
        }
    };

    state.submission_in_flight = true;
    info!(
        "📤 提交分析请求: 任务={} 语言={} 文档数={}",
        request.task.code(),
        request.language.code(),
        if request.document_2.is_some() { 2 } else { 1 }
    );
    Ok(Some(request))
}

/// 提交第二阶段：写回结果并解除进行中标记
///
/// 失败时保留上一次的结果
pub fn finish_submission(state: &mut FormState, outcome: Result<AnalysisResult, ApiError>) -> SubmitOutcome {
    state.submission_in_flight = false;

    match outcome {
        Ok(result) => {
            info!("✓ 收到分析结果，长度: {} 字符", result.output.chars().count());
            state.last_error = None;
            presenter::show_result(state, result);
            SubmitOutcome::Completed
        }
        Err(e) => {
            error!("❌ 处理失败: {}", e);
            let message = format!("Processing failed: {}", e.user_message());
            state.report_error(message.clone());
            SubmitOutcome::Failed(message)
        }
    }
}

/// 进行中标记守卫
///
/// 无论正常完成、出错还是 future 被丢弃，离开作用域时都会清除标记
struct InFlightGuard<'a> {
    state: &'a mut FormState,
}

impl<'a> InFlightGuard<'a> {
    fn finish(self, outcome: Result<AnalysisResult, ApiError>) -> SubmitOutcome {
        finish_submission(&mut *self.state, outcome)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.submission_in_flight = false;
    }
}

/// 提交当前表单
pub async fn submit<A: AnalysisApi + ?Sized>(state: &mut FormState, api: &A) -> SubmitOutcome {
    let request = match begin_submission(state) {
        Ok(Some(request)) => request,
        Ok(None) => return SubmitOutcome::AlreadyInFlight,
        Err(e) => return SubmitOutcome::Rejected(e),
    };

    let guard = InFlightGuard { state };
    let outcome = api.process(&request).await;
    guard.finish(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Task};
    use crate::test_support::{pdf, FakeApi};
    use crate::workflow::selection::{set_language, set_task};
    use crate::workflow::upload::upload_document;
    use serde_json::json;

    async fn ready_state(api: &FakeApi) -> FormState {
        let mut state = FormState::new();
        upload_document(&mut state, api, SlotPosition::Primary, pdf("doc1.pdf")).await.unwrap();
        state
    }

    #[test]
    fn test_cannot_submit_without_primary_document() {
        let mut state = FormState::new();
        for task in Task::ALL {
            set_task(&mut state, task);
            state.query_text = "q".to_string();
            assert!(!can_submit(&state));
            assert_eq!(check_ready(&state), Err(ValidationError::MissingPrimaryDocument));
        }
    }

    #[tokio::test]
    async fn test_switching_to_compare_blocks_submission() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        assert!(can_submit(&state));

        set_task(&mut state, Task::Compare);
        assert!(!can_submit(&state));
        assert_eq!(check_ready(&state), Err(ValidationError::MissingSecondDocument));
    }

    #[tokio::test]
    async fn test_query_tasks_need_non_blank_query() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        set_task(&mut state, Task::Qa);

        state.query_text = "  \t ".to_string();
        assert_eq!(check_ready(&state), Err(ValidationError::MissingQuery));

        state.query_text = " What is the deadline? ".to_string();
        assert!(can_submit(&state));
        assert_eq!(build_request(&state).unwrap().query.as_deref(), Some("What is the deadline?"));
    }

    #[tokio::test]
    async fn test_hidden_query_is_not_sent() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        set_task(&mut state, Task::Extract);
        state.query_text = "dates".to_string();
        set_task(&mut state, Task::Summarize);

        assert_eq!(build_request(&state).unwrap().query, None);
    }

    #[tokio::test]
    async fn test_summarize_request_payload() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        set_language(&mut state, Language::English);

        assert_eq!(submit(&mut state, &api).await, SubmitOutcome::Completed);

        let sent = serde_json::to_value(api.last_request().unwrap()).unwrap();
        assert_eq!(sent, json!({"task": "summarize", "language": "en", "document_1": "tmp/doc1.pdf"}));
        assert_eq!(state.last_result.as_ref().unwrap().output, "Summary text");
        assert!(!state.submission_in_flight);
    }

    #[tokio::test]
    async fn test_compare_without_second_document_makes_no_call() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        set_task(&mut state, Task::Compare);

        let outcome = submit(&mut state, &api).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingSecondDocument));
        assert_eq!(api.process_count(), 0);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Please upload a second document for comparison.")
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        submit(&mut state, &api).await;
        let previous = state.last_result.clone();

        let failing = FakeApi::new().processing_error("LLM unavailable");
        let outcome = submit(&mut state, &failing).await;

        assert_eq!(outcome, SubmitOutcome::Failed("Processing failed: LLM unavailable".to_string()));
        assert_eq!(state.last_result, previous);
        assert_eq!(state.last_error.as_deref(), Some("Processing failed: LLM unavailable"));
        assert!(!state.submission_in_flight);
    }

    #[tokio::test]
    async fn test_advisory_reaches_rendered_result() {
        let api = FakeApi::new()
            .processing_result(AnalysisResult::new("Clause 1\n\nClause 2").with_missing_info("Annex B missing"));
        let mut state = ready_state(&api).await;

        assert_eq!(submit(&mut state, &api).await, SubmitOutcome::Completed);

        let rendered = presenter::current(&state).unwrap();
        assert_eq!(rendered.paragraphs.len(), 2);
        assert_eq!(rendered.advisory.as_deref(), Some("Annex B missing"));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;
        state.report_error("Processing failed: timeout");

        submit(&mut state, &api).await;
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn test_repeated_submit_while_in_flight_is_noop() {
        let api = FakeApi::new();
        let mut state = ready_state(&api).await;

        let request = begin_submission(&mut state).unwrap().unwrap();
        assert!(state.submission_in_flight);

        assert_eq!(begin_submission(&mut state), Ok(None));
        assert_eq!(submit(&mut state, &api).await, SubmitOutcome::AlreadyInFlight);
        assert_eq!(submit(&mut state, &api).await, SubmitOutcome::AlreadyInFlight);
        assert_eq!(api.process_count(), 0);

        let outcome = api.process(&request).await;
        assert_eq!(finish_submission(&mut state, outcome), SubmitOutcome::Completed);
        assert_eq!(api.process_count(), 1);
        assert!(!state.submission_in_flight);
    }

    #[test]
    fn test_guard_clears_flag_when_dropped() {
        let mut state = FormState::new();
        state.submission_in_flight = true;
        {
            let _guard = InFlightGuard { state: &mut state };
        }
        assert!(!state.submission_in_flight);
    }
}
