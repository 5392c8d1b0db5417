//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时默认 `info`，开启详细日志时为 `debug`

use tracing_subscriber::EnvFilter;

/// 初始化全局日志（重复调用无副作用）
pub fn init() {
    init_with_verbose(false);
}

/// 按是否详细输出初始化日志
pub fn init_with_verbose(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
