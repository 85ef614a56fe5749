//! 场景模块
//!
//! 宿主应用的对象注册表在这里被抽象为 [`SceneSource`]：一个“按名称解析对象
//! 并取得其网格数据”的能力。导出器只依赖这个 trait，测试中用内存中的
//! [`Scene`] 代替真实宿主。
//!
//! # 架构设计
//!
//! ```text
//! 宿主注册表 / OBJ 文件 / 测试夹具
//!     ↓
//! SceneSource (object by name)
//!     ↓
//! SceneObject { mesh: Option<MeshData> }
//!     ↓
//! Exporter
//! ```

use std::collections::HashMap;

use crate::geometry::MeshData;

pub mod loaders;

pub use loaders::{load_scene, ObjSceneLoader, SceneLoader};

/// 场景中的一个对象
///
/// 相机、灯光、空对象等不携带网格数据，`mesh` 为 `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// 对象名称，在场景内唯一
    pub name: String,

    /// 对象的网格数据
    pub mesh: Option<MeshData>,
}

impl SceneObject {
    /// 创建一个携带网格数据的对象
    pub fn with_mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
        }
    }

    /// 创建一个不携带网格数据的对象
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
        }
    }
}

/// 宿主对象注册表的抽象
pub trait SceneSource {
    /// 按名称查找对象，不存在时返回 `None`
    fn object(&self, name: &str) -> Option<&SceneObject>;

    /// 所有对象名称，按字典序排列
    fn object_names(&self) -> Vec<&str>;
}

/// 内存中的对象注册表
///
/// # 示例
///
/// ```rust
/// use mesh_export::geometry::MeshData;
/// use mesh_export::scene::{Scene, SceneObject, SceneSource};
///
/// let scene = Scene::new()
///     .with_object(SceneObject::with_mesh("cube", MeshData::new()))
///     .with_object(SceneObject::empty("Camera"));
///
/// assert!(scene.object("cube").is_some());
/// assert_eq!(scene.object_names(), vec!["Camera", "cube"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: HashMap<String, SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入对象，同名对象会被替换并返回旧值
    pub fn insert(&mut self, object: SceneObject) -> Option<SceneObject> {
        self.objects.insert(object.name.clone(), object)
    }

    /// 链式插入对象
    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.insert(object);
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneSource for Scene {
    fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    fn object_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_name() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.insert(SceneObject::empty("a")).is_none());

        let previous = scene.insert(SceneObject::with_mesh("a", MeshData::new()));
        assert_eq!(previous, Some(SceneObject::empty("a")));
        assert_eq!(scene.len(), 1);
        assert!(scene.object("a").and_then(|o| o.mesh.as_ref()).is_some());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let scene = Scene::new().with_object(SceneObject::empty("Cube"));

        assert!(scene.object("Cube").is_some());
        assert!(scene.object("cube").is_none());
    }
}
