//! 导出文档
//!
//! 输出文件的固定 JSON 结构：
//!
//! ```json
//! {
//!     "vertices": [ { "x": 1.0, "y": 1.0, "z": 1.0 } ],
//!     "edges": [ { "v1": 0, "v2": 1 } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

use crate::core::error::{ExportError, Result};
use crate::geometry::{Edge, MeshData, Vertex};

/// 顶点记录
///
/// 坐标从宿主的 `f32` 扩展为 `f64` 后写出，与宿主脚本层打印同一数值时的文本一致
/// （例如 `0.1f32` 写作 `0.10000000149011612`）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 边记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub v1: u32,
    pub v2: u32,
}

/// 完整的导出文档
///
/// 字段声明顺序即 JSON 中的键顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl From<&Vertex> for VertexRecord {
    fn from(vertex: &Vertex) -> Self {
        Self {
            x: f64::from(vertex.x()),
            y: f64::from(vertex.y()),
            z: f64::from(vertex.z()),
        }
    }
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            v1: edge.v1(),
            v2: edge.v2(),
        }
    }
}

impl ExportDocument {
    /// 收集顶点记录，保持宿主的枚举顺序
    pub fn collect_vertices(mesh: &MeshData) -> Vec<VertexRecord> {
        mesh.vertices.iter().map(VertexRecord::from).collect()
    }

    /// 收集边记录，保持宿主的枚举顺序
    pub fn collect_edges(mesh: &MeshData) -> Vec<EdgeRecord> {
        mesh.edges.iter().map(EdgeRecord::from).collect()
    }

    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            vertices: Self::collect_vertices(mesh),
            edges: Self::collect_edges(mesh),
        }
    }

    /// 检查所有坐标都是有限值
    ///
    /// serde_json 会把 NaN 和无穷大写成 `null`，这样的文件无法再读回。
    pub fn ensure_finite(&self) -> Result<()> {
        match self
            .vertices
            .iter()
            .position(|v| !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()))
        {
            Some(i) => {
                let v = &self.vertices[i];
                Err(ExportError::NonFiniteVertex {
                    vertex: i,
                    position: [v.x, v.y, v.z],
                })
            }
            None => Ok(()),
        }
    }

    /// 序列化为带缩进的 JSON，末尾不带换行
    ///
    /// # 错误
    ///
    /// 存在非有限坐标时返回 `NonFiniteVertex`。
    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>> {
        self.ensure_finite()?;
        let indent = vec![b' '; indent];
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 读取之前导出的文件
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::from_json_str(&contents)
    }

    /// 将每条边解析为它连接的两个顶点
    pub fn edge_endpoints(&self) -> Result<Vec<(&VertexRecord, &VertexRecord)>> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let a = self.vertices.get(edge.v1 as usize);
                let b = self.vertices.get(edge.v2 as usize);
                match (a, b) {
                    (Some(a), Some(b)) => Ok((a, b)),
                    _ => Err(ExportError::InvalidEdge {
                        edge: i,
                        v1: edge.v1,
                        v2: edge.v2,
                        vertex_count: self.vertices.len(),
                    }),
                }
            })
            .collect()
    }
}
