/// 网格顶点定义模块
///
/// 宿主场景中的顶点只携带位置信息，以宿主原生的 `f32` 精度存储。

/// 网格顶点
///
/// # 示例
///
/// ```rust
/// use mesh_export::geometry::vertex::Vertex;
///
/// let vertex = Vertex::new(1.0, -1.0, 0.5);
/// assert_eq!(vertex.y(), -1.0);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],
}

impl Vertex {
    /// 创建一个新顶点
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.position[2]
    }
}

impl From<[f32; 3]> for Vertex {
    fn from(position: [f32; 3]) -> Self {
        Self { position }
    }
}
