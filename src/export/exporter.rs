//! 网格导出器
//!
//! 按名称在 [`SceneSource`] 中查找对象，把它的顶点和边写成 JSON 文件。
//!
//! # 导出流程
//!
//! ```text
//! 查找对象 → 收集顶点 → 收集边 → 组装文档 → 写出文件
//! ```
//!
//! 每个阶段都会记录一条日志。对象查找失败时不会触碰任何文件；写出失败时
//! 临时文件会被删除，已有的目标文件保持不变（原子模式）。

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::document::ExportDocument;
use crate::core::config::ExportConfig;
use crate::core::error::{ExportError, Result};
use crate::scene::SceneSource;
use crate::{export_error, export_info, export_warn};

/// 导出失败时打印的通用提示
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Not sure what the error was but something went wrong...";

/// 同一进程内的临时文件序号
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// 导出选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// JSON 缩进空格数
    pub indent: usize,

    /// 先写临时文件再重命名到目标路径
    pub atomic: bool,

    /// 写出前检查每条边的顶点索引
    pub validate_edges: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            atomic: true,
            validate_edges: false,
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            indent: config.indent,
            atomic: config.atomic,
            validate_edges: config.validate_edges,
        }
    }
}

/// 一次成功导出的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// 实际写出的绝对（或基于基准目录的）路径
    pub path: PathBuf,
    pub vertex_count: usize,
    pub edge_count: usize,
    /// 写出的字节数
    pub bytes: usize,
}

/// 网格导出器
///
/// # 示例
///
/// ```rust,no_run
/// use mesh_export::export::Exporter;
/// use mesh_export::geometry::{MeshData, Vertex};
/// use mesh_export::scene::{Scene, SceneObject};
///
/// let mesh = MeshData::from_polygons(
///     vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 0.0)],
///     [[0u32, 1]],
/// );
/// let scene = Scene::new().with_object(SceneObject::with_mesh("line", mesh));
///
/// let exporter = Exporter::new("exports");
/// let summary = exporter.export(&scene, "line", "line.json")?;
/// assert_eq!(summary.edge_count, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    base_dir: PathBuf,
    options: ExportOptions,
}

impl Exporter {
    /// 创建导出器，相对输出路径基于 `base_dir` 解析
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            options: ExportOptions::default(),
        }
    }

    /// 以进程当前工作目录作为基准目录
    ///
    /// 工作目录只在构造时读取一次。
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| ExportError::io(".", e))?;
        Ok(Self::new(cwd))
    }

    /// 按配置创建导出器，`base_dir` 缺省时使用当前工作目录
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let exporter = match &config.base_dir {
            Some(dir) => Self::new(dir.clone()),
            None => Self::from_current_dir()?,
        };
        Ok(exporter.with_options(ExportOptions::from(config)))
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// 解析输出路径：绝对路径原样使用，相对路径拼接到基准目录
    pub fn resolve_output_path(&self, output: impl AsRef<Path>) -> PathBuf {
        resolve_output_path(&self.base_dir, output)
    }

    /// 导出指定对象的顶点和边
    ///
    /// # 错误
    ///
    /// - `ObjectNotFound`: 场景中没有该名称的对象
    /// - `NoMeshData`: 对象不携带网格
    /// - `InvalidEdge`: 开启 `validate_edges` 且存在越界的边
    /// - `Serialization` / `Io`: 序列化或写文件失败
    pub fn export<S>(
        &self,
        source: &S,
        object_name: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<ExportSummary>
    where
        S: SceneSource + ?Sized,
    {
        export_info!(object = object_name, "Looking up mesh object");
        let object = source
            .object(object_name)
            .ok_or_else(|| ExportError::ObjectNotFound {
                name: object_name.to_string(),
            })?;
        let mesh = object.mesh.as_ref().ok_or_else(|| ExportError::NoMeshData {
            name: object_name.to_string(),
        })?;

        if self.options.validate_edges {
            mesh.validate()?;
        }

        export_info!(count = mesh.vertex_count(), "Collecting vertices");
        let vertices = ExportDocument::collect_vertices(mesh);

        export_info!(count = mesh.edge_count(), "Collecting edges");
        let edges = ExportDocument::collect_edges(mesh);

        export_info!("Assembling export document");
        let document = ExportDocument { vertices, edges };
        let bytes = document.to_json_bytes(self.options.indent)?;

        let path = self.resolve_output_path(output_path);
        export_info!(
            base_dir = %self.base_dir.display(),
            path = %path.display(),
            bytes = bytes.len(),
            "Writing JSON data"
        );
        write_output(&path, &bytes, self.options.atomic)?;

        Ok(ExportSummary {
            path,
            vertex_count: document.vertices.len(),
            edge_count: document.edges.len(),
            bytes: bytes.len(),
        })
    }

    /// 导出，但从不向调用方返回错误
    ///
    /// 失败细节记录在 `error` 级别日志中，标准错误只打印
    /// [`GENERIC_FAILURE_MESSAGE`]。返回是否成功。
    pub fn export_or_report<S>(
        &self,
        source: &S,
        object_name: &str,
        output_path: impl AsRef<Path>,
    ) -> bool
    where
        S: SceneSource + ?Sized,
    {
        self.export_or_report_to(source, object_name, output_path, &mut io::stderr())
    }

    /// 同 [`export_or_report`](Self::export_or_report)，提示写到 `err_out`
    pub fn export_or_report_to<S, W>(
        &self,
        source: &S,
        object_name: &str,
        output_path: impl AsRef<Path>,
        err_out: &mut W,
    ) -> bool
    where
        S: SceneSource + ?Sized,
        W: Write,
    {
        match self.export(source, object_name, output_path) {
            Ok(summary) => {
                export_info!(
                    path = %summary.path.display(),
                    vertices = summary.vertex_count,
                    edges = summary.edge_count,
                    "Export complete"
                );
                true
            }
            Err(e) => {
                export_error!(error = %e, object = object_name, "Export failed");
                let _ = writeln!(err_out, "{}", GENERIC_FAILURE_MESSAGE);
                false
            }
        }
    }
}

/// 解析输出路径：绝对路径原样使用，相对路径拼接到 `base_dir`
pub fn resolve_output_path(base_dir: &Path, output: impl AsRef<Path>) -> PathBuf {
    let output = output.as_ref();
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        base_dir.join(output)
    }
}

/// 写出文件
///
/// 原子模式下先写到同目录的隐藏临时文件，成功后再重命名覆盖目标。
/// 目标已存在时，临时文件先继承它的权限。
fn write_output(path: &Path, bytes: &[u8], atomic: bool) -> Result<()> {
    if !atomic {
        let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        return file.write_all(bytes).map_err(|e| ExportError::io(path, e));
    }

    let tmp_path = temp_path_for(path)?;
    let written = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            if let Ok(existing) = fs::metadata(path) {
                file.set_permissions(existing.permissions())?;
            }
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, path));

    if let Err(e) = written {
        match fs::remove_file(&tmp_path) {
            Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                export_warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary file"
                );
            }
            _ => {}
        }
        return Err(ExportError::io(path, e));
    }
    Ok(())
}

/// 目标旁边的隐藏临时文件路径，进程号加序号保证同一进程内的多次写出互不冲突
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        ExportError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    Ok(path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id(),
        sequence
    )))
}
