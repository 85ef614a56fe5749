/// OBJ 原始顶点布局
///
/// tobj 按面的首次引用顺序重新编号顶点，并丢弃没有被任何面引用的顶点。
/// 这里只扫描 `o`、`v`、`f`、`l` 语句，保留文件中的顶点顺序、对象归属和
/// 每个面顶点引用的原始序号；面的分组和阶数仍以 tobj 的解析结果为准。
use crate::core::error::{ExportError, Result};
use std::ops::Range;

/// tobj 对未命名对象使用的名称
pub const UNNAMED_OBJECT: &str = "unnamed_object";

/// 一个 `o` 块
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutObject {
    pub name: String,

    /// 该块内声明的顶点在全局顶点序列中的范围
    pub vertices: Range<usize>,
}

/// 面中的一个顶点引用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    /// 引用出现时所在的对象
    pub object: usize,

    /// 全局顶点序号（0 起）
    pub vertex: usize,
}

/// 按文件顺序记录的 OBJ 布局
#[derive(Debug, Default)]
pub struct ObjLayout {
    pub objects: Vec<LayoutObject>,

    /// 所有 `v` 语句，文件顺序
    pub positions: Vec<[f32; 3]>,

    /// 所有 `f` 语句的顶点引用，按出现顺序展开
    pub face_refs: Vec<VertexRef>,

    /// `l` 语句：所在对象与顶点序列
    pub polylines: Vec<(usize, Vec<usize>)>,
}

impl ObjLayout {
    /// 扫描 OBJ 文本
    pub fn scan(text: &str) -> Result<Self> {
        let mut layout = Self::default();
        let mut current: Option<usize> = None;

        for (line_no, line) in text.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };

            match keyword {
                "o" => {
                    let name = tokens.collect::<Vec<_>>().join(" ");
                    current = Some(layout.push_object(name));
                }
                "v" => {
                    let object = layout.current_object(&mut current);
                    let mut coords = [0.0f32; 3];
                    for coord in coords.iter_mut() {
                        *coord = tokens
                            .next()
                            .and_then(|t| t.parse().ok())
                            .ok_or_else(|| malformed(line_no, "vertex needs three coordinates"))?;
                    }
                    layout.positions.push(coords);
                    layout.objects[object].vertices.end = layout.positions.len();
                }
                "f" | "l" => {
                    let object = layout.current_object(&mut current);
                    let refs = tokens
                        .map(|token| layout.resolve(token, line_no))
                        .collect::<Result<Vec<usize>>>()?;

                    if keyword == "f" {
                        layout
                            .face_refs
                            .extend(refs.into_iter().map(|vertex| VertexRef { object, vertex }));
                    } else {
                        layout.polylines.push((object, refs));
                    }
                }
                _ => {}
            }
        }

        Ok(layout)
    }

    fn push_object(&mut self, name: String) -> usize {
        let start = self.positions.len();
        self.objects.push(LayoutObject {
            name: if name.is_empty() { UNNAMED_OBJECT.to_string() } else { name },
            vertices: start..start,
        });
        self.objects.len() - 1
    }

    /// `o` 之前出现的几何数据归入一个隐式对象
    fn current_object(&mut self, current: &mut Option<usize>) -> usize {
        match *current {
            Some(object) => object,
            None => {
                let object = self.push_object(String::new());
                *current = Some(object);
                object
            }
        }
    }

    /// 解析 `v/vt/vn` 形式的引用，支持负数相对索引
    fn resolve(&self, token: &str, line_no: usize) -> Result<usize> {
        let index: isize = token
            .split('/')
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| malformed(line_no, "invalid vertex reference"))?;

        let count = self.positions.len() as isize;
        let resolved = if index > 0 { index - 1 } else { count + index };
        if index == 0 || resolved < 0 || resolved >= count {
            return Err(malformed(line_no, "vertex reference out of range"));
        }
        Ok(resolved as usize)
    }
}

fn malformed(line_no: usize, reason: &str) -> ExportError {
    ExportError::SceneLoad(format!("OBJ line {}: {}", line_no + 1, reason))
}
