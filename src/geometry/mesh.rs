/// 网格数据结构模块
///
/// 定义宿主场景中网格的 CPU 侧数据：有序的顶点序列与边序列。
/// 两个序列的顺序即宿主的枚举顺序，导出时原样保留。

use std::collections::HashSet;

use super::edge::Edge;
use super::vertex::Vertex;
use crate::core::error::{ExportError, Result};

/// 网格数据
///
/// # 示例
///
/// ```rust
/// use mesh_export::geometry::{Edge, MeshData, Vertex};
///
/// let mesh = MeshData {
///     vertices: vec![
///         Vertex::new(0.0, 0.0, 0.0),
///         Vertex::new(1.0, 0.0, 0.0),
///     ],
///     edges: vec![Edge::new(0, 1)],
///     name: Some("Segment".to_string()),
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 边数组，每条边引用 `vertices` 中的两个序号
    pub edges: Vec<Edge>,

    /// 网格名称（可选）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 由多边形列表构建网格
    ///
    /// 每个多边形按顶点环依次连边（最后一个顶点连回第一个）。
    /// 共享的边只保留第一次出现的方向和位置，因此由 6 个四边形组成的立方体
    /// 得到 8 个顶点和 12 条边。少于 2 个顶点的多边形被忽略。
    pub fn from_polygons<P>(vertices: Vec<Vertex>, polygons: P) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<[u32]>,
    {
        let mut edges = Vec::new();
        let mut seen = HashSet::new();

        for polygon in polygons {
            let ring = polygon.as_ref();
            if ring.len() < 2 {
                continue;
            }
            // 两个顶点的“多边形”只有一条边
            let sides = if ring.len() == 2 { 1 } else { ring.len() };
            for i in 0..sides {
                let edge = Edge::new(ring[i], ring[(i + 1) % ring.len()]);
                if edge.v1() != edge.v2() && seen.insert(edge.undirected_key()) {
                    edges.push(edge);
                }
            }
        }

        Self {
            vertices,
            edges,
            name: None,
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取边数量
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 验证所有边的端点都是有效的顶点索引
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(ExportError::InvalidEdge)`: 第一条越界的边
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        match self
            .edges
            .iter()
            .enumerate()
            .find(|(_, edge)| !edge.is_within(vertex_count))
        {
            Some((i, edge)) => Err(ExportError::InvalidEdge {
                edge: i,
                v1: edge.v1(),
                v2: edge.v2(),
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}
