//! 会话编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建分析服务客户端，执行启动健康检查
//! 2. **任务配置**：设置任务与语言
//! 3. **文档上传**：读取并上传一到两个文档（两个时并发上传）
//! 4. **提交处理**：调用处理接口，渲染结果
//! 5. **结果导出**：按需复制到剪贴板或保存为文件
//!
//! 不含界面逻辑；所有状态转换都委托给 workflow 和 orchestrator 的纯函数

use crate::clients::{AnalysisApi, AnalysisClient};
use crate::config::Config;
use crate::models::{DocumentFile, Language, Task};
use crate::orchestrator::presenter::{self, RenderedResult};
use crate::orchestrator::submission::{self, SubmitOutcome};
use crate::services::clipboard::Clipboard;
use crate::services::result_writer::ResultWriter;
use crate::orchestrator::health;
use crate::utils::logging::{log_result_summary, log_startup};
use crate::workflow::form_state::FormState;
use crate::workflow::selection;
use crate::workflow::upload::{upload_document, upload_pair};
use crate::workflow::upload_slot::{SlotPosition, UploadCompletion};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// 一次分析任务的输入
#[derive(Debug, Clone, Default)]
pub struct SessionJob {
    pub task: Task,
    pub language: Language,
    pub documents: Vec<PathBuf>,
    pub query: Option<String>,
    pub copy: bool,
    pub download: bool,
}

/// 一次分析任务的输出
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub rendered: RenderedResult,
    pub saved_to: Option<PathBuf>,
    pub copied: bool,
}

/// 应用主结构
pub struct App<A: AnalysisApi = AnalysisClient> {
    api: A,
    state: FormState,
    writer: ResultWriter,
}

impl App<AnalysisClient> {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        let client = AnalysisClient::new(&config).context("无法创建分析服务客户端")?;
        Ok(Self::with_api(&config, client).await)
    }
}

impl<A: AnalysisApi> App<A> {
    /// 使用指定的服务实现创建应用，并执行健康检查
    pub async fn with_api(config: &Config, api: A) -> Self {
        let mut state = FormState::with_max_file_size(config.max_file_size);
        health::check_service(&mut state, &api).await;

        Self {
            api,
            state,
            writer: ResultWriter::new(config.download_dir.clone()),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 运行一次分析任务
    pub async fn run(&mut self, job: SessionJob, clipboard: &mut dyn Clipboard) -> Result<SessionReport> {
        if job.documents.is_empty() {
            bail!("{}", crate::error::ValidationError::MissingPrimaryDocument);
        }
        if job.documents.len() > 2 {
            bail!("最多支持 2 个文档，实际传入 {} 个", job.documents.len());
        }

        selection::set_task(&mut self.state, job.task);
        selection::set_language(&mut self.state, job.language);

        self.upload_documents(&job.documents).await?;

        self.state.query_text = job.query.clone().unwrap_or_default();

        match submission::submit(&mut self.state, &self.api).await {
            SubmitOutcome::Completed => {}
            SubmitOutcome::Rejected(e) => bail!("{}", e),
            SubmitOutcome::Failed(message) => bail!("{}", message),
            SubmitOutcome::AlreadyInFlight => bail!("已有提交在进行中"),
        }

        let rendered = presenter::current(&self.state).context("处理成功但没有结果")?;
        log_result_summary(&rendered);

        let copied = job.copy && self.copy_result(clipboard);

        let saved_to = if job.download {
            Some(presenter::download(&mut self.state, &self.writer).await?)
        } else {
            None
        };

        Ok(SessionReport {
            rendered,
            saved_to,
            copied,
        })
    }

    /// 清空文档与结果，准备下一次任务
    pub fn reset(&mut self) {
        presenter::reset(&mut self.state);
    }

    async fn upload_documents(&mut self, paths: &[PathBuf]) -> Result<()> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(DocumentFile::from_path(path).await?);
        }

        let mut files = files.into_iter();
        let primary = files.next().context("缺少主文档")?;
        let secondary = files.next();

        let completions = match secondary {
            Some(second) if selection::second_slot_visible(&self.state) => {
                info!("📁 并发上传 2 个文档: {} / {}", primary.name, second.name);
                let (a, b) = upload_pair(&mut self.state, &self.api, primary, second).await;
                vec![a?, b?]
            }
            other => {
                if let Some(ignored) = other {
                    warn!("⚠️ 任务 {} 只使用一个文档，忽略: {}", self.state.selected_task, ignored.name);
                }
                info!("📁 上传文档: {}", primary.name);
                vec![upload_document(&mut self.state, &self.api, SlotPosition::Primary, primary).await?]
            }
        };

        if completions.iter().any(|c| matches!(c, UploadCompletion::Failed(_))) {
            let message = self.state.last_error.clone().unwrap_or_else(|| "Upload failed".to_string());
            bail!("{}", message);
        }
        Ok(())
    }

    fn copy_result(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        match presenter::copy(&mut self.state, clipboard) {
            Ok(()) => true,
            Err(e) => {
                warn!("⚠️ 复制结果失败: {}", e);
                false
            }
        }
    }
}
