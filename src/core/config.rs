//! 配置管理模块
//!
//! 提供导出工具配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (mesh_export.toml)
//!
//! ```toml
//! [export]
//! object = "myobject"
//! output = "firstcube.json"
//! # base_dir = "exports"   # 缺省为当前工作目录
//! indent = 4
//! atomic = true
//! validate_edges = false
//!
//! [scene]
//! path = "assets/cube.obj"
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

/// 缩进的最大空格数
pub const MAX_INDENT: usize = 16;

/// 工具配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 场景配置
    #[serde(default)]
    pub scene: SceneConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 导出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 要导出的对象名称
    #[serde(default = "default_object")]
    pub object: String,

    /// 输出文件路径，相对路径基于 `base_dir` 解析
    #[serde(default = "default_output")]
    pub output: String,

    /// 相对输出路径的基准目录，缺省时使用当前工作目录
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// JSON 缩进空格数
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// 是否先写临时文件再重命名
    #[serde(default = "default_atomic")]
    pub atomic: bool,

    /// 写出前是否检查边索引
    #[serde(default)]
    pub validate_edges: bool,
}

/// 场景配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 场景文件路径（OBJ）
    #[serde(default = "default_scene_path")]
    pub path: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_object() -> String { "myobject".to_string() }
fn default_output() -> String { "firstcube.json".to_string() }
fn default_indent() -> usize { 4 }
fn default_atomic() -> bool { true }
fn default_scene_path() -> String { "assets/cube.obj".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_export.log".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            object: default_object(),
            output: default_output(),
            base_dir: None,
            indent: default_indent(),
            atomic: default_atomic(),
            validate_edges: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: default_scene_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                // 日志系统此时尚未初始化
                eprintln!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)
            .map_err(|e| super::error::ExportError::io(path, e))?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--scene <path>`: 场景 OBJ 文件
    /// - `--object <name>`: 导出对象名称
    /// - `--output <path>`: 输出文件路径
    /// - `--base-dir <dir>`: 相对输出路径的基准目录
    /// - `--indent <n>`: JSON 缩进空格数
    /// - `--validate`: 写出前检查边索引
    ///
    /// 无法解析的值会被忽略，保留原配置。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(scene) = flag_value(&args, "--scene") {
            self.scene.path = scene.clone();
        }

        if let Some(object) = flag_value(&args, "--object") {
            self.export.object = object.clone();
        }

        if let Some(output) = flag_value(&args, "--output") {
            self.export.output = output.clone();
        }

        if let Some(base_dir) = flag_value(&args, "--base-dir") {
            self.export.base_dir = Some(PathBuf::from(base_dir));
        }

        if let Some(indent) = flag_value(&args, "--indent") {
            if let Ok(indent) = indent.parse() {
                self.export.indent = indent;
            }
        }

        if args.iter().any(|a| a == "--validate") {
            self.export.validate_edges = true;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.export.object.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.object".to_string(),
                reason: "Object name must not be empty".to_string(),
            }
            .into());
        }

        if self.export.output.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.output".to_string(),
                reason: "Output path must not be empty".to_string(),
            }
            .into());
        }

        if self.export.indent > MAX_INDENT {
            return Err(ConfigError::InvalidValue {
                field: "export.indent".to_string(),
                reason: format!("Indent must be at most {} spaces", MAX_INDENT),
            }
            .into());
        }

        Ok(())
    }
}

/// 取出紧跟在 `flag` 之后的参数值
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
}
