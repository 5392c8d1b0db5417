/// 分析服务 API 客户端
///
/// 封装 health / upload / process 三个远程接口
use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::models::{AnalysisRequest, AnalysisResult, DocumentFile, HealthResponse, ProcessResponse, UploadResponse};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const HEALTH_ENDPOINT: &str = "/api/health";
pub const UPLOAD_ENDPOINT: &str = "/api/upload";
pub const PROCESS_ENDPOINT: &str = "/api/process";

/// 远程分析服务契约
///
/// 状态机只依赖这个 trait，测试里可以换成内存实现
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// 健康检查，返回服务上报的状态
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// 上传单个文件，返回服务端的文件定位符
    async fn upload(&self, file: &DocumentFile) -> Result<String, ApiError>;

    /// 提交处理请求
    async fn process(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError>;
}

/// 基于 reqwest 的分析服务客户端
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// 创建新的分析服务客户端
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 发送请求并解析响应信封
    ///
    /// 非 2xx 状态但响应体仍是信封时交给调用方按 `success` 判断；
    /// 响应体无法解析时视为传输错误
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        debug!("{} 返回 {}，响应长度: {} 字节", endpoint, status, body.len());

        serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                ApiError::transport(endpoint, format!("invalid response body: {}", e))
            } else {
                ApiError::transport(endpoint, format!("HTTP {}", status))
            }
        })
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let request = self.http.get(self.url(HEALTH_ENDPOINT));
        self.send_envelope(HEALTH_ENDPOINT, request).await
    }

    async fn upload(&self, file: &DocumentFile) -> Result<String, ApiError> {
        debug!("上传文件: {} ({})", file.name, file.display_size());

        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::transport(UPLOAD_ENDPOINT, e))?;
        let form = Form::new().part("file", part);

        let request = self.http.post(self.url(UPLOAD_ENDPOINT)).multipart(form);
        let response: UploadResponse = self.send_envelope(UPLOAD_ENDPOINT, request).await?;

        upload_locator(response)
    }

    async fn process(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        debug!("处理请求 Payload: {:?}", request);

        let builder = self.http.post(self.url(PROCESS_ENDPOINT)).json(request);
        let response: ProcessResponse = self.send_envelope(PROCESS_ENDPOINT, builder).await?;

        process_result(response)
    }
}

/// 从上传响应中取出定位符
pub fn upload_locator(response: UploadResponse) -> Result<String, ApiError> {
    match response {
        UploadResponse {
            success: true,
            filepath: Some(path),
            ..
        } if !path.is_empty() => Ok(path),
        UploadResponse { success: true, .. } => {
            Err(ApiError::service(UPLOAD_ENDPOINT, "Upload failed: no file path returned"))
        }
        UploadResponse { error, .. } => Err(ApiError::service(
            UPLOAD_ENDPOINT,
            error.unwrap_or_else(|| "Upload failed".to_string()),
        )),
    }
}

/// 从处理响应中取出结果
pub fn process_result(response: ProcessResponse) -> Result<AnalysisResult, ApiError> {
    match response {
        ProcessResponse {
            success: true,
            result: Some(result),
            ..
        } => Ok(result),
        ProcessResponse { success: true, .. } => {
            Err(ApiError::service(PROCESS_ENDPOINT, "Processing failed: empty result"))
        }
        ProcessResponse { error, .. } => Err(ApiError::service(
            PROCESS_ENDPOINT,
            error.unwrap_or_else(|| "Processing failed".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_locator_success() {
        let resp = UploadResponse {
            success: true,
            filepath: Some("uploads/doc1.pdf".to_string()),
            error: None,
        };
        assert_eq!(upload_locator(resp).unwrap(), "uploads/doc1.pdf");
    }

    #[test]
    fn test_upload_success_without_path_is_service_error() {
        let resp = UploadResponse {
            success: true,
            filepath: Some(String::new()),
            error: None,
        };
        let err = upload_locator(resp).unwrap_err();
        assert!(!err.is_transport());
    }

    #[test]
    fn test_upload_failure_defaults_message() {
        let resp = UploadResponse {
            success: false,
            filepath: None,
            error: None,
        };
        assert_eq!(upload_locator(resp).unwrap_err().user_message(), "Upload failed");
    }

    #[test]
    fn test_process_failure_carries_service_error() {
        let resp = ProcessResponse {
            success: false,
            result: None,
            error: Some("LLM unavailable".to_string()),
        };
        let err = process_result(resp).unwrap_err();
        assert_eq!(err.user_message(), "LLM unavailable");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = Config {
            api_base_url: "http://127.0.0.1:5000/".to_string(),
            ..Config::default()
        };
        let client = AnalysisClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.url(PROCESS_ENDPOINT), "http://127.0.0.1:5000/api/process");
    }
}
