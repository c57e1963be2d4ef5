//! 图核心模块
//!
//! 定义顶点和无向图的核心数据结构

mod graph;
mod shared;
mod vertex;

pub use graph::Graph;
pub use shared::SharedGraph;
pub use vertex::{Neighbors, Vertex, VertexId};
