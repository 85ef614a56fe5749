/// 网格边定义模块
///
/// 一条边由两个顶点在顶点序列中的序号组成。

/// 网格边
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// 两个端点的顶点索引
    pub vertices: [u32; 2],
}

impl Edge {
    #[inline]
    pub fn new(v1: u32, v2: u32) -> Self {
        Self { vertices: [v1, v2] }
    }

    #[inline]
    pub fn v1(&self) -> u32 {
        self.vertices[0]
    }

    #[inline]
    pub fn v2(&self) -> u32 {
        self.vertices[1]
    }

    /// 与方向无关的键，用于去重 `(a, b)` 与 `(b, a)`
    #[inline]
    pub fn undirected_key(&self) -> (u32, u32) {
        let [a, b] = self.vertices;
        if a <= b { (a, b) } else { (b, a) }
    }

    /// 两个端点是否都落在 `0..vertex_count` 内
    #[inline]
    pub fn is_within(&self, vertex_count: usize) -> bool {
        self.vertices.iter().all(|&v| (v as usize) < vertex_count)
    }
}
