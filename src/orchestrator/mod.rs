//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `submission` - 提交编排
//! - 判断是否满足提交条件（主文档 / 对比文档 / 查询）
//! - 构建处理请求，调用处理接口
//! - 保证同一时间只有一个提交在进行中
//!
//! ### `presenter` - 结果展示
//! - 段落切分、补充说明
//! - 复制、下载、重置
//!
//! ### `health` - 启动健康检查
//!
//! ### `session` - 会话编排
//! - 把以上能力串成一次完整的分析任务
//!
//! ## 层次关系
//!
//! ```text
//! session (一次分析任务)
//!     ↓
//! submission / presenter / health
//!     ↓
//! workflow (FormState + UploadSlot 状态机)
//!     ↓
//! services (能力层：validation / clipboard / result_writer)
//!     ↓
//! clients (远程分析服务)
//! ```

pub mod health;
pub mod presenter;
pub mod session;
pub mod submission;

// 重新导出主要类型
pub use presenter::RenderedResult;
pub use session::{App, SessionJob, SessionReport};
pub use submission::{can_submit, submit, SubmitOutcome};
