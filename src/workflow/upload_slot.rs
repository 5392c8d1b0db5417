//! 上传槽位状态机
//!
//! 每个文档位置一个实例：Empty → Selected → Uploading → Ready / Failed。
//! 上传失败会自动回到 Empty，用户必须重新选择文件。

use crate::error::{ApiError, ValidationError};
use crate::models::DocumentFile;
use crate::services::validation::validate_file_with_limit;
use tracing::{debug, info, warn};

/// 文档位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    /// 主文档
    Primary,
    /// 对比文档
    Secondary,
}

impl SlotPosition {
    /// 位置编号（1 或 2）
    pub fn number(self) -> u8 {
        match self {
            SlotPosition::Primary => 1,
            SlotPosition::Secondary => 2,
        }
    }
}

impl std::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "文档{}", self.number())
    }
}

/// 槽位状态（不含数据）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Selected,
    Uploading,
    Ready,
    Failed,
}

/// 槽位内部状态；定位符只存在于 `Ready`
#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotState {
    Empty,
    Selected(DocumentFile),
    Uploading(DocumentFile),
    Ready { file: DocumentFile, locator: String },
    Failed,
}

impl SlotState {
    fn status(&self) -> SlotStatus {
        match self {
            SlotState::Empty => SlotStatus::Empty,
            SlotState::Selected(_) => SlotStatus::Selected,
            SlotState::Uploading(_) => SlotStatus::Uploading,
            SlotState::Ready { .. } => SlotStatus::Ready,
            SlotState::Failed => SlotStatus::Failed,
        }
    }
}

/// 一次上传的凭据
///
/// `generation` 与槽位当前代数不一致时，响应会被当作过期丢弃
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub position: SlotPosition,
    pub generation: u64,
    pub file: DocumentFile,
}

/// 上传响应落地结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCompletion {
    /// 上传成功，槽位进入 Ready
    Ready,
    /// 上传失败，槽位已回到 Empty
    Failed(String),
    /// 槽位已被移除或换了文件，响应被忽略
    Stale,
}

/// 上传槽位
#[derive(Debug, Clone)]
pub struct UploadSlot {
    position: SlotPosition,
    state: SlotState,
    generation: u64,
}

impl UploadSlot {
    /// 创建空槽位
    pub fn new(position: SlotPosition) -> Self {
        Self {
            position,
            state: SlotState::Empty,
            generation: 0,
        }
    }

    pub fn position(&self) -> SlotPosition {
        self.position
    }

    pub fn status(&self) -> SlotStatus {
        self.state.status()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == SlotStatus::Ready
    }

    /// 当前持有的文件
    pub fn file(&self) -> Option<&DocumentFile> {
        match &self.state {
            SlotState::Selected(file) | SlotState::Uploading(file) | SlotState::Ready { file, .. } => Some(file),
            SlotState::Empty | SlotState::Failed => None,
        }
    }

    /// 服务端定位符，仅 Ready 时存在
    pub fn remote_locator(&self) -> Option<&str> {
        match &self.state {
            SlotState::Ready { locator, .. } => Some(locator),
            _ => None,
        }
    }

    /// 文件名与大小，供预览展示
    pub fn preview(&self) -> Option<(String, String)> {
        self.file().map(|f| (f.name.clone(), f.display_size()))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 选择文件
    ///
    /// 校验失败时槽位保持原状；成功时先隐式移除旧文件，再进入 Selected
    pub fn select_file(&mut self, file: DocumentFile, max_size: u64) -> Result<(), ValidationError> {
        if let Err(e) = validate_file_with_limit(&file, max_size) {
            warn!("[{}] ⚠️ 文件被拒绝: {} ({})", self.position, file.name, e.reason());
            return Err(e);
        }

        if self.status() != SlotStatus::Empty {
            self.remove();
        }

        debug!("[{}] 已选择文件: {} ({})", self.position, file.name, file.display_size());
        self.state = SlotState::Selected(file);
        Ok(())
    }

    /// 开始上传：Selected → Uploading
    ///
    /// 其他状态返回 `None`，同一槽位同时最多一个上传
    pub fn begin_upload(&mut self) -> Option<UploadTicket> {
        let file = match std::mem::replace(&mut self.state, SlotState::Empty) {
            SlotState::Selected(file) => file,
            other => {
                debug!("[{}] 忽略上传请求，当前状态: {:?}", self.position, other.status());
                self.state = other;
                return None;
            }
        };

        debug!("[{}] 📤 开始上传: {}", self.position, file.name);
        self.state = SlotState::Uploading(file.clone());

        Some(UploadTicket {
            position: self.position,
            generation: self.generation,
            file,
        })
    }

    /// 写入上传响应
    pub fn complete_upload(&mut self, generation: u64, outcome: Result<String, ApiError>) -> UploadCompletion {
        if generation != self.generation {
            debug!(
                "[{}] 丢弃过期的上传响应 (凭据代数 {}，当前代数 {})",
                self.position, generation, self.generation
            );
            return UploadCompletion::Stale;
        }

        let file = match std::mem::replace(&mut self.state, SlotState::Empty) {
            SlotState::Uploading(file) => file,
            other => {
                self.state = other;
                return UploadCompletion::Stale;
            }
        };

        match outcome {
            Ok(locator) => {
                info!("[{}] ✓ 上传完成: {} → {}", self.position, file.name, locator);
                self.state = SlotState::Ready { file, locator };
                UploadCompletion::Ready
            }
            Err(e) => {
                warn!("[{}] ❌ 上传失败: {} ({})", self.position, file.name, e);
                self.state = SlotState::Failed;
                self.remove();
                UploadCompletion::Failed(e.user_message().to_string())
            }
        }
    }

    /// 移除文件，回到 Empty（幂等）
    ///
    /// 进行中的上传响应之后会被视为过期
    pub fn remove(&mut self) {
        if self.status() != SlotStatus::Empty {
            debug!("[{}] 移除文件", self.position);
        }
        self.state = SlotState::Empty;
        self.generation += 1;
    }
}
