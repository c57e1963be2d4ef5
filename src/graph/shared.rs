//! 线程共享的图
//!
//! 对称邻接需要多步修改，所有写操作在同一把写锁内完成

use super::graph::Graph;
use super::vertex::VertexId;
use crate::error::Result;
use crate::stats::DegreeStats;
use parking_lot::RwLock;
use std::sync::Arc;

/// 读写锁保护的图，可在线程间克隆共享
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// 在读锁下执行
    pub fn read<T>(&self, f: impl FnOnce(&Graph) -> T) -> T {
        f(&*self.inner.read())
    }

    /// 在写锁下执行，闭包内的多步修改对读者是原子的
    pub fn write<T>(&self, f: impl FnOnce(&mut Graph) -> T) -> T {
        f(&mut *self.inner.write())
    }

    pub fn insert_edge(&self, first: VertexId, second: VertexId) -> Result<bool> {
        self.write(|g| g.insert_edge(first, second))
    }

    pub fn delete_vertex(&self, id: VertexId) -> Result<()> {
        self.write(|g| g.delete_vertex(id))
    }

    pub fn stats(&self) -> DegreeStats {
        self.read(Graph::stats)
    }

    /// 取出内部图的副本
    pub fn snapshot(&self) -> Graph {
        self.read(Graph::clone)
    }
}
