//! 导出模块
//!
//! - `document`: 固定的 `{vertices, edges}` JSON 文档及读回
//! - `exporter`: 查找对象并写出文档

pub mod document;
pub mod exporter;

pub use document::{EdgeRecord, ExportDocument, VertexRecord};
pub use exporter::{
    resolve_output_path, ExportOptions, ExportSummary, Exporter, GENERIC_FAILURE_MESSAGE,
};
