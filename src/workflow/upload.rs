//! 文档上传流程
//!
//! 选择 → 开始上传 → 远程上传 → 写回槽位。
//! 网络调用期间不借用 `FormState`，响应回来后按凭据写回。

use crate::clients::AnalysisApi;
use crate::error::{ApiError, ValidationError};
use crate::models::DocumentFile;
use crate::workflow::form_state::FormState;
use crate::workflow::upload_slot::{SlotPosition, UploadCompletion, UploadTicket};
use tracing::{info, warn};

/// 选择文件；校验失败时作为表单错误展示，槽位不变
pub fn select_document(
    state: &mut FormState,
    position: SlotPosition,
    file: DocumentFile,
) -> Result<(), ValidationError> {
    let max_size = state.max_file_size;
    match state.slot_mut(position).select_file(file, max_size) {
        Ok(()) => Ok(()),
        Err(e) => {
            state.report_error(e.to_string());
            Err(e)
        }
    }
}

/// 将上传响应写回对应槽位
pub fn apply_upload(
    state: &mut FormState,
    ticket: &UploadTicket,
    outcome: Result<String, ApiError>,
) -> UploadCompletion {
    let completion = state.slot_mut(ticket.position).complete_upload(ticket.generation, outcome);
    if let UploadCompletion::Failed(message) = &completion {
        state.report_error(format!("Upload failed: {}", message));
    }
    completion
}

/// 选择并上传单个文档
pub async fn upload_document<A: AnalysisApi + ?Sized>(
    state: &mut FormState,
    api: &A,
    position: SlotPosition,
    file: DocumentFile,
) -> Result<UploadCompletion, ValidationError> {
    select_document(state, position, file)?;

    let Some(ticket) = state.slot_mut(position).begin_upload() else {
        return Ok(UploadCompletion::Stale);
    };

    let outcome = api.upload(&ticket.file).await;
    let completion = apply_upload(state, &ticket, outcome);
    log_completion(&ticket, &completion);
    Ok(completion)
}

/// 同时上传两个文档，两次网络调用并发进行、互不影响
///
/// 每个槽位各自校验：一个文件被拒绝时，另一个照常上传
pub async fn upload_pair<A: AnalysisApi + ?Sized>(
    state: &mut FormState,
    api: &A,
    primary: DocumentFile,
    secondary: DocumentFile,
) -> (
    Result<UploadCompletion, ValidationError>,
    Result<UploadCompletion, ValidationError>,
) {
    let first = select_and_begin(state, SlotPosition::Primary, primary);
    let second = select_and_begin(state, SlotPosition::Secondary, secondary);

    let (first_outcome, second_outcome) = tokio::join!(
        send_upload(api, accepted(&first)),
        send_upload(api, accepted(&second))
    );

    (
        finish_upload(state, first, first_outcome),
        finish_upload(state, second, second_outcome),
    )
}

fn select_and_begin(
    state: &mut FormState,
    position: SlotPosition,
    file: DocumentFile,
) -> Result<Option<UploadTicket>, ValidationError> {
    select_document(state, position, file)?;
    Ok(state.slot_mut(position).begin_upload())
}

fn accepted(selected: &Result<Option<UploadTicket>, ValidationError>) -> Option<&UploadTicket> {
    selected.as_ref().ok().and_then(Option::as_ref)
}

async fn send_upload<A: AnalysisApi + ?Sized>(
    api: &A,
    ticket: Option<&UploadTicket>,
) -> Option<Result<String, ApiError>> {
    match ticket {
        Some(ticket) => Some(api.upload(&ticket.file).await),
        None => None,
    }
}

fn finish_upload(
    state: &mut FormState,
    selected: Result<Option<UploadTicket>, ValidationError>,
    outcome: Option<Result<String, ApiError>>,
) -> Result<UploadCompletion, ValidationError> {
    let completion = match (selected?, outcome) {
        (Some(ticket), Some(outcome)) => {
            let completion = apply_upload(state, &ticket, outcome);
            log_completion(&ticket, &completion);
            completion
        }
        _ => UploadCompletion::Stale,
    };
    Ok(completion)
}

fn log_completion(ticket: &UploadTicket, completion: &UploadCompletion) {
    match completion {
        UploadCompletion::Ready => info!("[{}] ✓ {} 已就绪", ticket.position, ticket.file.name),
        UploadCompletion::Failed(msg) => warn!("[{}] ⚠️ {} 需要重新选择: {}", ticket.position, ticket.file.name, msg),
        UploadCompletion::Stale => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pdf, FakeApi};
    use crate::workflow::upload_slot::SlotStatus;

    #[tokio::test]
    async fn test_upload_document_success() {
        let api = FakeApi::new();
        let mut state = FormState::new();

        let done = upload_document(&mut state, &api, SlotPosition::Primary, pdf("doc1.pdf")).await.unwrap();

        assert_eq!(done, UploadCompletion::Ready);
        let slot = state.slot(SlotPosition::Primary);
        assert_eq!(slot.status(), SlotStatus::Ready);
        assert_eq!(slot.remote_locator(), Some("tmp/doc1.pdf"));
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_error_and_empties_slot() {
        let api = FakeApi::new().failing_upload("doc1.pdf");
        let mut state = FormState::new();

        let done = upload_document(&mut state, &api, SlotPosition::Primary, pdf("doc1.pdf")).await.unwrap();

        assert_eq!(done, UploadCompletion::Failed("disk full".to_string()));
        assert_eq!(state.slot(SlotPosition::Primary).status(), SlotStatus::Empty);
        assert_eq!(state.last_error.as_deref(), Some("Upload failed: disk full"));
    }

    #[tokio::test]
    async fn test_invalid_file_never_reaches_network() {
        let api = FakeApi::new();
        let mut state = FormState::new();
        let png = DocumentFile::new("scan.png", "image/png", vec![0u8; 4]);

        let err = upload_document(&mut state, &api, SlotPosition::Primary, png).await.unwrap_err();

        assert_eq!(err.reason(), "unsupported type");
        assert_eq!(api.upload_count(), 0);
        assert_eq!(state.slot(SlotPosition::Primary).status(), SlotStatus::Empty);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Invalid file type. Please upload PDF, DOCX, or TXT files.")
        );
    }

    #[tokio::test]
    async fn test_pair_uploads_are_independent() {
        let api = FakeApi::new().failing_upload("b.pdf");
        let mut state = FormState::new();

        let (a, b) = upload_pair(&mut state, &api, pdf("a.pdf"), pdf("b.pdf")).await;

        assert_eq!(a, Ok(UploadCompletion::Ready));
        assert_eq!(b, Ok(UploadCompletion::Failed("disk full".to_string())));
        assert_eq!(api.upload_count(), 2);
        assert_eq!(state.slot(SlotPosition::Primary).remote_locator(), Some("tmp/a.pdf"));
        assert_eq!(state.slot(SlotPosition::Secondary).status(), SlotStatus::Empty);
    }

    #[tokio::test]
    async fn test_rejected_second_file_does_not_block_first_upload() {
        let api = FakeApi::new();
        let mut state = FormState::new();
        let png = DocumentFile::new("b.png", "image/png", vec![0u8; 4]);

        let (a, b) = upload_pair(&mut state, &api, pdf("a.pdf"), png).await;

        assert_eq!(a, Ok(UploadCompletion::Ready));
        assert_eq!(b.unwrap_err().reason(), "unsupported type");
        assert_eq!(api.upload_count(), 1);
        assert_eq!(state.slot(SlotPosition::Primary).remote_locator(), Some("tmp/a.pdf"));
        assert_eq!(state.slot(SlotPosition::Secondary).status(), SlotStatus::Empty);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Invalid file type. Please upload PDF, DOCX, or TXT files.")
        );
    }

    #[tokio::test]
    async fn test_rejected_first_file_keeps_previous_upload() {
        let api = FakeApi::new();
        let mut state = FormState::new();
        upload_document(&mut state, &api, SlotPosition::Primary, pdf("old.pdf")).await.unwrap();
        let huge = DocumentFile::new("huge.pdf", "application/pdf", vec![0u8; 16 * 1024 * 1024 + 1]);

        let (a, b) = upload_pair(&mut state, &api, huge, pdf("b.pdf")).await;

        assert_eq!(a.unwrap_err().reason(), "too large");
        assert_eq!(b, Ok(UploadCompletion::Ready));
        assert_eq!(state.slot(SlotPosition::Primary).remote_locator(), Some("tmp/old.pdf"));
        assert_eq!(state.slot(SlotPosition::Secondary).remote_locator(), Some("tmp/b.pdf"));
    }

    #[tokio::test]
    async fn test_late_response_after_removal_is_ignored() {
        let mut state = FormState::new();
        select_document(&mut state, SlotPosition::Primary, pdf("doc1.pdf")).unwrap();
        let ticket = state.slot_mut(SlotPosition::Primary).begin_upload().unwrap();

        state.slot_mut(SlotPosition::Primary).remove();
        let done = apply_upload(&mut state, &ticket, Ok("tmp/doc1.pdf".to_string()));

        assert_eq!(done, UploadCompletion::Stale);
        assert_eq!(state.slot(SlotPosition::Primary).status(), SlotStatus::Empty);
    }
}
