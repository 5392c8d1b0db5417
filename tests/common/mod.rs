// 集成测试共用的内存版分析服务

#![allow(dead_code)]

use async_trait::async_trait;
use dia_client::error::ApiError;
use dia_client::models::document::MIME_PDF;
use dia_client::models::{AnalysisRequest, AnalysisResult, DocumentFile, HealthResponse};
use dia_client::AnalysisApi;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 上传返回 `tmp/<文件名>`，处理返回预设结果
pub struct ScriptedApi {
    pub process_outcome: Result<AnalysisResult, String>,
    pub failing_upload: Option<String>,
    process_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedApi {
    pub fn returning(output: &str) -> Self {
        Self {
            process_outcome: Ok(AnalysisResult::new(output)),
            failing_upload: None,
            process_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_with(message: &str) -> Self {
        Self {
            process_outcome: Err(message.to_string()),
            ..Self::returning("")
        }
    }

    pub fn process_calls(&self) -> usize {
        self.process_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
        })
    }

    async fn upload(&self, file: &DocumentFile) -> Result<String, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_upload.as_deref() == Some(file.name.as_str()) {
            return Err(ApiError::transport("/api/upload", "connection reset"));
        }
        Ok(format!("tmp/{}", file.name))
    }

    async fn process(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.process_outcome
            .clone()
            .map_err(|message| ApiError::service("/api/process", message))
    }
}

pub fn pdf(name: &str) -> DocumentFile {
    DocumentFile::new(name, MIME_PDF, b"%PDF-1.7".to_vec())
}
