/// OBJ 场景加载器
///
/// 使用 tobj crate 解析 Wavefront OBJ 文件，每个 `o` 块成为场景中的一个对象。
/// 面不做三角化，多边形的轮廓边即网格的边。顶点保持文件中 `v` 语句的顺序，
/// 没有被任何面引用的顶点也会保留。
use super::obj_layout::{ObjLayout, VertexRef};
use super::SceneLoader;
use crate::core::error::{ExportError, Result};
use crate::geometry::{MeshData, Vertex};
use crate::scene::{Scene, SceneObject, SceneSource};
use std::io::{BufReader, Cursor};
use std::path::Path;

/// OBJ 格式加载器
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_export::scene::{ObjSceneLoader, SceneLoader};
/// use std::path::Path;
///
/// let scene = ObjSceneLoader::load_from_file(Path::new("cube.obj"))?;
/// println!("加载了 {} 个对象", scene.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjSceneLoader;

impl ObjSceneLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: false,   // 保留原始多边形，边数与建模软件一致
            single_index: false,
            ignore_points: true,
            ignore_lines: true,   // `l` 语句由布局扫描处理
            ..Default::default()
        }
    }

    fn load_bytes(data: &[u8]) -> Result<Scene> {
        let text = std::str::from_utf8(data)
            .map_err(|e| ExportError::SceneLoad(format!("OBJ is not valid UTF-8: {}", e)))?;

        // 材质与导出无关
        let mut reader = BufReader::new(Cursor::new(data));
        let (models, _materials) = tobj::load_obj_buf(
            &mut reader,
            &Self::load_options(),
            |_: &Path| Err(tobj::LoadError::OpenFileFailed),
        )
        .map_err(|e| ExportError::SceneLoad(format!("tobj failed to parse: {}", e)))?;

        let layout = ObjLayout::scan(text)?;
        Self::build_scene(&layout, &models)
    }

    /// 把 tobj 的面分组映射回原始顶点序号，再按 `o` 块组装场景
    ///
    /// tobj 的面索引与布局中的 `f` 引用按出现顺序一一对应。
    fn build_scene(layout: &ObjLayout, models: &[tobj::Model]) -> Result<Scene> {
        let mut polygons: Vec<Vec<Vec<usize>>> = vec![Vec::new(); layout.objects.len()];
        let mut cursor = 0;

        for model in models {
            for arity in Self::face_arities(&model.mesh) {
                let refs = layout
                    .face_refs
                    .get(cursor..cursor + arity)
                    .filter(|refs| !refs.is_empty())
                    .ok_or_else(|| Self::face_mismatch(cursor, layout.face_refs.len()))?;
                polygons[refs[0].object].push(refs.iter().map(|r: &VertexRef| r.vertex).collect());
                cursor += arity;
            }
        }
        if cursor != layout.face_refs.len() {
            return Err(Self::face_mismatch(cursor, layout.face_refs.len()));
        }

        for (object, polyline) in &layout.polylines {
            polygons[*object].extend(polyline.windows(2).map(|segment| segment.to_vec()));
        }

        let mut scene = Scene::new();
        for (object, rings) in layout.objects.iter().zip(polygons) {
            let name = Self::unique_name(&scene, &object.name);

            if object.vertices.is_empty() && rings.is_empty() {
                scene.insert(SceneObject::empty(name));
                continue;
            }

            let start = object.vertices.start;
            let local_rings = rings
                .into_iter()
                .map(|ring| {
                    ring.into_iter()
                        .map(|v| {
                            if object.vertices.contains(&v) {
                                Ok((v - start) as u32)
                            } else {
                                Err(ExportError::SceneLoad(format!(
                                    "Object '{}' references vertex {} outside its own vertices",
                                    object.name,
                                    v + 1
                                )))
                            }
                        })
                        .collect::<Result<Vec<u32>>>()
                })
                .collect::<Result<Vec<Vec<u32>>>>()?;

            let vertices = layout.positions[object.vertices.clone()]
                .iter()
                .copied()
                .map(Vertex::from)
                .collect();
            let mut mesh = MeshData::from_polygons(vertices, local_rings);
            mesh.validate()?;
            mesh.name = Some(name.clone());

            tracing::debug!(
                object = %name,
                vertices = mesh.vertex_count(),
                edges = mesh.edge_count(),
                "Loaded OBJ object"
            );
            scene.insert(SceneObject::with_mesh(name, mesh));
        }

        Ok(scene)
    }

    /// 全部为三角形时 tobj 不填充 face_arities
    fn face_arities(mesh: &tobj::Mesh) -> Vec<usize> {
        if mesh.face_arities.is_empty() {
            vec![3; mesh.indices.len() / 3]
        } else {
            mesh.face_arities.iter().map(|&a| a as usize).collect()
        }
    }

    fn face_mismatch(parsed: usize, scanned: usize) -> ExportError {
        ExportError::SceneLoad(format!(
            "Face vertex count mismatch: tobj parsed {}, scan found {}",
            parsed, scanned
        ))
    }

    /// 名称冲突时追加 `.001`、`.002` 等后缀
    fn unique_name(scene: &Scene, base: &str) -> String {
        if scene.object(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{}.{:03}", base, i))
            .find(|candidate| scene.object(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

impl SceneLoader for ObjSceneLoader {
    fn load_from_file(path: &Path) -> Result<Scene> {
        if !path.exists() {
            return Err(ExportError::SceneLoad(format!(
                "Scene file not found: {}",
                path.display()
            )));
        }

        let data = std::fs::read(path).map_err(|e| ExportError::io(path, e))?;
        let scene = Self::load_bytes(&data)?;
        tracing::info!(
            path = %path.display(),
            objects = scene.len(),
            "Loaded OBJ scene"
        );
        Ok(scene)
    }

    fn load_from_memory(data: &[u8]) -> Result<Scene> {
        Self::load_bytes(data)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edge;

    const CUBE_OBJ: &str = "\
o cube
v -1.0 -1.0 -1.0
v  1.0 -1.0 -1.0
v  1.0  1.0 -1.0
v -1.0  1.0 -1.0
v -1.0 -1.0  1.0
v  1.0 -1.0  1.0
v  1.0  1.0  1.0
v -1.0  1.0  1.0
f 1 2 3 4
f 5 8 7 6
f 1 5 6 2
f 2 6 7 3
f 3 7 8 4
f 5 1 4 8
";

    const TRIANGLES_OBJ: &str = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
o tri
v 0.0 0.0 1.0
v 1.0 0.0 1.0
v 0.0 1.0 1.0
f 4 5 6
";

    fn mesh<'a>(scene: &'a Scene, name: &str) -> &'a MeshData {
        scene.object(name).and_then(|o| o.mesh.as_ref()).unwrap()
    }

    #[test]
    fn test_supported_extensions() {
        assert_eq!(ObjSceneLoader::supported_extensions(), &["obj"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjSceneLoader::load_from_file(Path::new("nonexistent.obj"));
        assert!(matches!(result, Err(ExportError::SceneLoad(_))));
    }

    #[test]
    fn test_quad_cube_has_twelve_edges() {
        let scene = ObjSceneLoader::load_from_memory(CUBE_OBJ.as_bytes()).unwrap();
        let cube = mesh(&scene, "cube");

        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.edge_count(), 12);
        assert_eq!(cube.vertices[1], Vertex::new(1.0, -1.0, -1.0));
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_file_vertex_order_and_loose_vertex_kept() {
        let obj = "o quad\nv 0 0 0\nv 1 0 0\nv 2 0 0\nv 3 0 0\nv 9 9 9\nf 4 3 2 1\n";
        let scene = ObjSceneLoader::load_from_memory(obj.as_bytes()).unwrap();
        let quad = mesh(&scene, "quad");

        let xs: Vec<f32> = quad.vertices.iter().map(Vertex::x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 9.0]);
        assert_eq!(quad.edges[0], Edge::new(3, 2));
        assert_eq!(quad.edge_count(), 4);
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let scene = ObjSceneLoader::load_from_memory(TRIANGLES_OBJ.as_bytes()).unwrap();

        assert_eq!(scene.object_names(), vec!["tri", "tri.001"]);
        let second = mesh(&scene, "tri.001");
        assert_eq!(second.vertex_count(), 3);
        assert_eq!(second.edges, vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)]);
    }

    #[test]
    fn test_polyline_and_empty_object() {
        let obj = "o Camera\no wire\nv 0 0 0\nv 1 0 0\nv 2 0 0\nl 1 2 3\n";
        let scene = ObjSceneLoader::load_from_memory(obj.as_bytes()).unwrap();

        assert_eq!(scene.object("Camera").map(|o| o.mesh.is_none()), Some(true));
        assert_eq!(mesh(&scene, "wire").edges, vec![Edge::new(0, 1), Edge::new(1, 2)]);
    }

    #[test]
    fn test_cross_object_reference_rejected() {
        let obj = "o a\nv 0 0 0\nv 1 0 0\no b\nv 0 1 0\nf 1 2 3\n";
        let result = ObjSceneLoader::load_from_memory(obj.as_bytes());

        assert!(matches!(result, Err(ExportError::SceneLoad(_))));
    }
}
