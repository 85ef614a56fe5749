//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 导出流程的每个阶段（查找、顶点收集、边收集、组装、写出）都会记录一条日志。
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_export::core::log;
//! use mesh_export::core::config::LogLevel;
//!
//! // 仅控制台输出
//! log::init_logger(LogLevel::Info, false, None);
//!
//! tracing::info!(object = "cube", "Exporting");
//! ```

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use std::path::Path;

use super::config::LogLevel;

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。`RUST_LOG` 环境变量存在时优先于 `level`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "mesh_export.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::from(level)).into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true);

    if file_output {
        let log_path = log_file_path.unwrap_or("mesh_export.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh_export.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
    }
}

/// 导出流程日志 - Info 级别
#[macro_export]
macro_rules! export_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "mesh_export::export", $($arg)*)
    };
}

/// 导出流程日志 - Warn 级别
#[macro_export]
macro_rules! export_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "mesh_export::export", $($arg)*)
    };
}

/// 导出流程日志 - Error 级别
#[macro_export]
macro_rules! export_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "mesh_export::export", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_level_filter_from_config_level() {
        let filter = LevelFilter::from_level(Level::from(LogLevel::Warn));

        assert_eq!(filter, LevelFilter::WARN);
        assert!(Level::DEBUG > filter);
    }
}
