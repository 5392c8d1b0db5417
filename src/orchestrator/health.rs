//! 启动时的服务健康检查
//!
//! 只更新指示状态，不阻塞其他操作

use crate::clients::AnalysisApi;
use crate::workflow::form_state::{FormState, ServiceStatus};
use tracing::{info, warn};

/// 检查服务状态并写入表单
pub async fn check_service<A: AnalysisApi + ?Sized>(state: &mut FormState, api: &A) -> ServiceStatus {
    let status = match api.health().await {
        Ok(resp) if resp.is_healthy() => {
            info!("✓ System Ready");
            ServiceStatus::Ready
        }
        Ok(resp) => {
            warn!("⚠️ System Offline: 服务状态为 '{}'", resp.status);
            ServiceStatus::Offline
        }
        Err(e) => {
            warn!("⚠️ System Offline: 健康检查失败: {}", e);
            ServiceStatus::Offline
        }
    };
    state.service_status = status;
    status
}
