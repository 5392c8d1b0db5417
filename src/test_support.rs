// 单元测试共用的内存版分析服务

#![cfg(test)]

use crate::clients::AnalysisApi;
use crate::error::ApiError;
use crate::models::document::{DocumentFile, MIME_PDF};
use crate::models::{AnalysisRequest, AnalysisResult, HealthResponse};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct FakeApi {
    pub healthy: bool,
    /// 这些文件名的上传会失败
    pub failing_uploads: HashSet<String>,
    pub process_outcome: Result<AnalysisResult, String>,
    pub upload_calls: AtomicUsize,
    pub process_calls: AtomicUsize,
    pub last_request: Mutex<Option<AnalysisRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            healthy: true,
            failing_uploads: HashSet::new(),
            process_outcome: Ok(AnalysisResult::new("Summary text")),
            upload_calls: AtomicUsize::new(0),
            process_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing_upload(mut self, name: &str) -> Self {
        self.failing_uploads.insert(name.to_string());
        self
    }

    pub fn processing_error(mut self, message: &str) -> Self {
        self.process_outcome = Err(message.to_string());
        self
    }

    pub fn processing_result(mut self, result: AnalysisResult) -> Self {
        self.process_outcome = Ok(result);
        self
    }

    pub fn process_count(&self) -> usize {
        self.process_calls.load(Ordering::SeqCst)
    }

    pub fn upload_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisApi for FakeApi {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        if self.healthy {
            Ok(HealthResponse { status: "healthy".to_string() })
        } else {
            Err(ApiError::transport("/api/health", "connection refused"))
        }
    }

    async fn upload(&self, file: &DocumentFile) -> Result<String, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_uploads.contains(&file.name) {
            return Err(ApiError::service("/api/upload", "disk full"));
        }
        Ok(format!("tmp/{}", file.name))
    }

    async fn process(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.process_outcome
            .clone()
            .map_err(|message| ApiError::service("/api/process", message))
    }
}

pub fn pdf(name: &str) -> DocumentFile {
    DocumentFile::new(name, MIME_PDF, b"%PDF-1.4 test".to_vec())
}
