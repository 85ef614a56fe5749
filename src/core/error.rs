//! 错误处理模块
//!
//! 定义了导出流程中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 每一种失败原因都有独立的变体，可以单独匹配和测试
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）

use std::fmt;
use std::path::PathBuf;

/// 导出流程统一的 Result 类型
pub type Result<T> = std::result::Result<T, ExportError>;

/// 导出流程的错误类型
#[derive(Debug)]
pub enum ExportError {
    /// 场景中不存在指定名称的对象
    ObjectNotFound { name: String },

    /// 对象存在但不携带网格数据（相机、灯光、空对象等）
    NoMeshData { name: String },

    /// 边引用了越界的顶点索引
    InvalidEdge {
        edge: usize,
        v1: u32,
        v2: u32,
        vertex_count: usize,
    },

    /// 顶点坐标为 NaN 或无穷大，JSON 无法表示
    NonFiniteVertex { vertex: usize, position: [f64; 3] },

    /// 输出文件读写失败
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON 序列化或解析失败
    Serialization(String),

    /// 配置错误
    Config(ConfigError),

    /// 场景加载失败
    SceneLoad(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

impl ExportError {
    /// 用路径上下文包装 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::ObjectNotFound { name } => {
                write!(f, "Object '{}' not found in scene", name)
            }
            ExportError::NoMeshData { name } => {
                write!(f, "Object '{}' has no mesh data", name)
            }
            ExportError::InvalidEdge {
                edge,
                v1,
                v2,
                vertex_count,
            } => write!(
                f,
                "Edge {} ({}, {}) references a vertex outside 0..{}",
                edge, v1, v2, vertex_count
            ),
            ExportError::NonFiniteVertex { vertex, position } => write!(
                f,
                "Vertex {} has a non-finite coordinate ({}, {}, {})",
                vertex, position[0], position[1], position[2]
            ),
            ExportError::Io { path, source } => {
                write!(f, "IO error on '{}': {}", path.display(), source)
            }
            ExportError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ExportError::Config(e) => write!(f, "Configuration error: {}", e),
            ExportError::SceneLoad(msg) => write!(f, "Scene loading error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io { source, .. } => Some(source),
            ExportError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

// 实现 From trait 以便于错误转换
impl From<ConfigError> for ExportError {
    fn from(err: ConfigError) -> Self {
        ExportError::Config(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_object_not_found() {
        let err = ExportError::ObjectNotFound {
            name: "myobject".to_string(),
        };
        assert_eq!(err.to_string(), "Object 'myobject' not found in scene");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = ExportError::io(
            "out.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("out.json"));
    }

    #[test]
    fn test_display_non_finite_vertex() {
        let err = ExportError::NonFiniteVertex {
            vertex: 2,
            position: [0.0, f64::NAN, 1.0],
        };
        assert_eq!(err.to_string(), "Vertex 2 has a non-finite coordinate (0, NaN, 1)");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ExportError = ConfigError::ParseError("bad".to_string()).into();
        assert!(matches!(err, ExportError::Config(ConfigError::ParseError(_))));
    }
}
