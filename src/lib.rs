//! # DIA Client
//!
//! 文档智能分析服务的客户端编排库
//!
//! ## 架构设计
//!
//! ### ① 接口层（Clients）
//! - `clients/` - 远程分析服务契约（health / upload / process）
//! - `AnalysisApi` - 状态机唯一依赖的服务抽象
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `validation` - 文件类型与大小校验
//! - `clipboard` / `result_writer` - 结果导出
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 表单状态与上传槽位状态机
//! - `FormState` - 一次会话的全部可变状态
//! - `UploadSlot` - 单个文档位置：Empty → Selected → Uploading → Ready
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/submission` - 提交条件检查与请求编排
//! - `orchestrator/presenter` - 结果渲染、复制、下载、重置
//! - `orchestrator/session` - 一次完整的分析任务
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

mod test_support;

// 重新导出常用类型
pub use clients::{AnalysisApi, AnalysisClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisRequest, AnalysisResult, DocumentFile, Language, Task};
pub use orchestrator::{App, SessionJob};
pub use workflow::{FormState, SlotPosition, SlotStatus};
