/// 几何数据模块
///
/// 定义宿主网格的顶点、边和网格数据结构。
///
/// # 模块结构
///
/// - `vertex`: 顶点（位置）
/// - `edge`: 边（两个顶点序号）
/// - `mesh`: 有序的顶点与边序列

pub mod vertex;
pub mod edge;
pub mod mesh;

// 重新导出常用类型
pub use vertex::Vertex;
pub use edge::Edge;
pub use mesh::MeshData;
