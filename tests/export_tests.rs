//! 导出流程集成测试
//!
//! 用内存中的 `Scene` 代替宿主对象注册表。

use std::fs;
use std::path::PathBuf;

use mesh_export::core::ExportError;
use mesh_export::export::{ExportDocument, ExportOptions, Exporter};
use mesh_export::geometry::{MeshData, Vertex};
use mesh_export::scene::{load_scene, Scene, SceneObject, SceneSource};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mesh_export_it_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// 边长为 2 的立方体，6 个四边形面
fn cube_mesh() -> MeshData {
    let vertices = vec![
        Vertex::new(1.0, 1.0, 1.0),
        Vertex::new(1.0, 1.0, -1.0),
        Vertex::new(1.0, -1.0, 1.0),
        Vertex::new(1.0, -1.0, -1.0),
        Vertex::new(-1.0, 1.0, 1.0),
        Vertex::new(-1.0, 1.0, -1.0),
        Vertex::new(-1.0, -1.0, 1.0),
        Vertex::new(-1.0, -1.0, -1.0),
    ];
    let faces = [
        [0u32, 4, 6, 2],
        [3, 2, 6, 7],
        [7, 6, 4, 5],
        [5, 1, 3, 7],
        [1, 0, 2, 3],
        [5, 4, 0, 1],
    ];
    MeshData::from_polygons(vertices, faces)
}

fn cube_scene() -> Scene {
    Scene::new()
        .with_object(SceneObject::with_mesh("cube", cube_mesh()))
        .with_object(SceneObject::empty("Light"))
}

#[test]
fn cube_exports_eight_vertices_and_twelve_edges() {
    let dir = scratch_dir("cube");
    let summary = Exporter::new(&dir)
        .export(&cube_scene(), "cube", "firstcube.json")
        .unwrap();

    assert_eq!(summary.vertex_count, 8);
    assert_eq!(summary.edge_count, 12);

    let text = fs::read_to_string(dir.join("firstcube.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["vertices"].as_array().unwrap().len(), 8);
    assert_eq!(object["edges"].as_array().unwrap().len(), 12);
    assert!(text.starts_with("{\n    \"vertices\": [\n        {\n            \"x\": 1.0,"));
}

#[test]
fn round_trip_preserves_order_and_values() {
    let dir = scratch_dir("round_trip");
    let mut mesh = cube_mesh();
    mesh.vertices[0] = Vertex::new(0.1, -0.333, 12345.678);
    let scene = Scene::new().with_object(SceneObject::with_mesh("cube", mesh.clone()));

    let summary = Exporter::new(&dir).export(&scene, "cube", "cube.json").unwrap();
    let document = ExportDocument::from_path(&summary.path).unwrap();

    for (record, vertex) in document.vertices.iter().zip(&mesh.vertices) {
        assert_eq!(record.x as f32, vertex.x());
        assert_eq!(record.y as f32, vertex.y());
        assert_eq!(record.z as f32, vertex.z());
    }
    for (record, edge) in document.edges.iter().zip(&mesh.edges) {
        assert_eq!((record.v1, record.v2), (edge.v1(), edge.v2()));
    }
}

#[test]
fn edges_reference_valid_vertices() {
    let dir = scratch_dir("valid_edges");
    let summary = Exporter::new(&dir).export(&cube_scene(), "cube", "cube.json").unwrap();
    let document = ExportDocument::from_path(&summary.path).unwrap();

    let n = document.vertices.len() as u32;
    assert!(document.edges.iter().all(|e| e.v1 < n && e.v2 < n));
    assert_eq!(document.edge_endpoints().unwrap().len(), 12);
}

#[test]
fn repeated_export_is_byte_identical() {
    let dir = scratch_dir("idempotent");
    let exporter = Exporter::new(&dir);
    let scene = cube_scene();

    exporter.export(&scene, "cube", "a.json").unwrap();
    let first = fs::read(dir.join("a.json")).unwrap();
    exporter.export(&scene, "cube", "a.json").unwrap();
    let second = fs::read(dir.join("a.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_object_creates_no_file() {
    let dir = scratch_dir("missing");
    let exporter = Exporter::new(&dir);

    let result = exporter.export(&cube_scene(), "myobject", "firstcube.json");
    assert!(matches!(result, Err(ExportError::ObjectNotFound { .. })));

    assert!(!exporter.export_or_report(&cube_scene(), "myobject", "firstcube.json"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn failed_export_keeps_existing_file() {
    let dir = scratch_dir("keep_existing");
    let exporter = Exporter::new(&dir);
    exporter.export(&cube_scene(), "cube", "out.json").unwrap();
    let before = fs::read(dir.join("out.json")).unwrap();

    assert!(exporter.export(&cube_scene(), "Light", "out.json").is_err());
    assert_eq!(fs::read(dir.join("out.json")).unwrap(), before);
}

#[test]
fn export_overwrites_in_place_when_not_atomic() {
    let dir = scratch_dir("non_atomic");
    fs::write(dir.join("out.json"), "stale contents that are longer than nothing").unwrap();

    let exporter = Exporter::new(&dir).with_options(ExportOptions {
        atomic: false,
        indent: 2,
        ..ExportOptions::default()
    });
    exporter.export(&cube_scene(), "cube", "out.json").unwrap();

    let text = fs::read_to_string(dir.join("out.json")).unwrap();
    assert!(text.starts_with("{\n  \"vertices\": [\n"));
    assert!(ExportDocument::from_json_str(&text).is_ok());
}

#[test]
fn obj_scene_exports_end_to_end() {
    let dir = scratch_dir("obj");
    let obj_path = dir.join("scene.obj");
    fs::write(
        &obj_path,
        "o myobject\n\
         v -1 -1 -1\nv 1 -1 -1\nv 1 1 -1\nv -1 1 -1\n\
         v -1 -1 1\nv 1 -1 1\nv 1 1 1\nv -1 1 1\n\
         f 1 2 3 4\nf 5 8 7 6\nf 1 5 6 2\nf 2 6 7 3\nf 3 7 8 4\nf 5 1 4 8\n",
    )
    .unwrap();

    let scene = load_scene(&obj_path).unwrap();
    assert_eq!(scene.object_names(), vec!["myobject"]);

    let summary = Exporter::new(&dir)
        .export(&scene, "myobject", "firstcube.json")
        .unwrap();
    assert_eq!((summary.vertex_count, summary.edge_count), (8, 12));
}
