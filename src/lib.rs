//! mesh_export - 网格几何导出工具
//!
//! 从宿主场景中按名称取出一个网格对象，把它的顶点坐标和边（顶点序号对）
//! 写成缩进的 JSON 文件。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 顶点、边和网格数据
//! - `scene`: 宿主对象注册表的抽象与 OBJ 场景加载
//! - `export`: 导出文档与导出器
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_export::export::Exporter;
//! use mesh_export::scene::load_scene;
//! use std::path::Path;
//!
//! let scene = load_scene(Path::new("scene.obj"))?;
//! let exporter = Exporter::from_current_dir()?;
//! let summary = exporter.export(&scene, "cube", "firstcube.json")?;
//! println!("{} vertices, {} edges", summary.vertex_count, summary.edge_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod geometry;
pub mod scene;
pub mod export;
