/// 场景加载器模块
///
/// 从磁盘文件构建内存中的 [`Scene`]，作为真实宿主注册表的替身。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_export::scene::{load_scene, SceneSource};
/// use std::path::Path;
///
/// let scene = load_scene(Path::new("scene.obj"))?;
/// println!("对象: {:?}", scene.object_names());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{ExportError, Result};
use crate::scene::Scene;
use std::path::Path;

mod obj_layout;
pub mod obj_loader;

pub use obj_loader::ObjSceneLoader;

/// 场景加载器 trait
///
/// 所有格式的加载器都实现此 trait，加载器本身无状态。
pub trait SceneLoader {
    /// 从文件路径加载场景
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    fn load_from_file(path: &Path) -> Result<Scene>;

    /// 从内存数据加载场景
    fn load_from_memory(data: &[u8]) -> Result<Scene>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_scene(path: &Path) -> Result<Scene> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            ExportError::SceneLoad(format!(
                "Cannot determine file extension of '{}'",
                path.display()
            ))
        })?;

    if ObjSceneLoader::supported_extensions().contains(&extension.as_str()) {
        ObjSceneLoader::load_from_file(path)
    } else {
        Err(ExportError::SceneLoad(format!(
            "Unsupported scene format: .{}",
            extension
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let result = load_scene(Path::new("scene.fbx"));
        assert!(matches!(result, Err(ExportError::SceneLoad(_))));
    }

    #[test]
    fn test_missing_extension() {
        assert!(load_scene(Path::new("scene")).is_err());
    }
}
