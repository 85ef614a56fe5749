//! mesh_export - 网格几何导出命令行工具
//!
//! 从 OBJ 场景文件中取出一个对象，导出其顶点和边为 JSON。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件 mesh_export.toml（不存在时使用默认值）
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --scene assets/cube.obj --object cube --output firstcube.json
//!
//! # 列出场景中的对象
//! cargo run -- --scene assets/cube.obj --list
//!
//! # 把当前生效的配置写成文件
//! cargo run -- --object cube --save-config mesh_export.toml
//! ```

use anyhow::Context;
use mesh_export::core::{log, Config};
use mesh_export::export::Exporter;
use mesh_export::scene::{load_scene, SceneSource};
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "mesh_export.toml";

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（`--config <path>` 或 mesh_export.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 加载场景并导出
fn main() {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = Config::from_file_or_default(config_path);

    // 2. 应用命令行参数
    config.apply_args(&args);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "mesh_export starting");

    if let Some(path) = args
        .iter()
        .position(|a| a == "--save-config")
        .and_then(|idx| args.get(idx + 1))
    {
        match config.save_to_file(path) {
            Ok(()) => {
                info!(path = %path, "Configuration saved");
                return;
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    // 4. 加载场景并导出
    let list_only = args.iter().any(|a| a == "--list");
    match run(&config, list_only) {
        Ok(true) => {
            println!("FINISHED");
        }
        Ok(false) => {
            println!("FINISHED");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// 返回导出是否成功；场景或基准目录不可用时返回错误
fn run(config: &Config, list_only: bool) -> anyhow::Result<bool> {
    let scene = load_scene(Path::new(&config.scene.path))
        .with_context(|| format!("Failed to load scene '{}'", config.scene.path))?;
    if scene.is_empty() {
        tracing::warn!(path = %config.scene.path, "Scene contains no objects");
    }

    if list_only {
        for name in scene.object_names() {
            println!("{}", name);
        }
        return Ok(true);
    }

    let exporter = Exporter::from_config(&config.export)
        .context("Failed to resolve the export base directory")?;

    info!(
        object = %config.export.object,
        output = %config.export.output,
        base_dir = %exporter.base_dir().display(),
        "Export configuration"
    );

    Ok(exporter.export_or_report(&scene, &config.export.object, &config.export.output))
}
