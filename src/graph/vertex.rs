//! 顶点定义
//!
//! 每个顶点持有自己的邻接多重集合（允许重复的邻居 ID）

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// 顶点 ID（按创建顺序稠密分配，删除后不回收）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 邻接列表，大多数顶点的度数很小
pub type Neighbors = SmallVec<[VertexId; 4]>;

/// 顶点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 邻居列表（按插入顺序，自环记录为自身 ID 一次）
    neighbors: Neighbors,
}

impl Vertex {
    /// 创建没有邻居的新顶点
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            neighbors: SmallVec::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取邻居列表
    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors
    }

    /// 线性查找 `id` 是否在邻居列表中
    pub fn contains(&self, id: VertexId) -> bool {
        self.neighbors.iter().any(|&n| n == id)
    }

    /// 自环数量
    pub fn loop_count(&self) -> usize {
        self.neighbors.iter().filter(|&&n| n == self.id).count()
    }

    /// 度数
    ///
    /// 自环的两个端点都落在本顶点上，每个自环计 2。
    pub fn degree(&self) -> usize {
        self.neighbors.len() + self.loop_count()
    }

    /// 移除所有等于 `id` 的邻居，返回移除的个数
    pub fn remove_neighbor(&mut self, id: VertexId) -> usize {
        let before = self.neighbors.len();
        self.neighbors.retain(|n| *n != id);
        before - self.neighbors.len()
    }

    /// 追加一个邻居（对端由 Graph 负责维护）
    pub(crate) fn push_neighbor(&mut self, id: VertexId) {
        self.neighbors.push(id);
    }

    /// 清空邻居列表，返回原列表
    pub(crate) fn take_neighbors(&mut self) -> Neighbors {
        std::mem::take(&mut self.neighbors)
    }
}
