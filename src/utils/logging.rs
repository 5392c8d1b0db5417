/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::orchestrator::presenter::RenderedResult;
use tracing::info;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 文档智能分析客户端启动");
    info!("🌐 服务地址: {}", config.base_url());
    info!("📦 文件大小上限: {} 字节", config.max_file_size);
    info!("{}", "=".repeat(60));
}

/// 记录结果摘要
pub fn log_result_summary(rendered: &RenderedResult) {
    info!("\n{}", "─".repeat(60));
    info!("📊 结果: {} 段", rendered.paragraphs.len());
    if let Some(first) = rendered.paragraphs.first().and_then(|p| p.first()) {
        info!("首行: {}", truncate_text(first, 80));
    }
    if rendered.advisory.is_some() {
        info!("⚠️ 结果包含补充说明");
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
