//! Undigraph - 无向图容器
//!
//! 最小化的无向多重图实现，支持：
//! - 增量构建（添加顶点、批量添加边、插入单条边）
//! - 结构查询（顶点数、边数、度数、最大/平均度数、自环数）
//! - 删除顶点（清除其所有边，保留 ID）

pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod stats;

// 重导出常用类型
pub use error::{Error, Result};
pub use graph::{Graph, SharedGraph, Vertex, VertexId};
pub use import::{EdgeReader, ImportStats};
pub use stats::DegreeStats;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
