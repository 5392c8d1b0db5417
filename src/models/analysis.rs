use crate::models::task::{Language, Task};
use serde::{Deserialize, Serialize};

/// 处理请求（每次提交时现场构建，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub task: Task,
    pub language: Language,
    pub document_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// 分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_info: Option<String>,
}

impl AnalysisResult {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            missing_info: None,
        }
    }

    pub fn with_missing_info(mut self, note: impl Into<String>) -> Self {
        self.missing_info = Some(note.into());
        self
    }
}

// ========== 接口响应结构 ==========

/// `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `POST /api/upload`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub filepath: Option<String>,
    pub error: Option<String>,
}

/// `POST /api/process`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}
