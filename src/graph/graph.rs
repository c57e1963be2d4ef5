//! 图数据结构
//!
//! 基于邻接列表的无向图，顶点按 ID 0..n-1 顺序存放

use super::vertex::{Neighbors, Vertex, VertexId};
use crate::error::{Error, Result};
use crate::stats::DegreeStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// 无向图
///
/// 对每条非自环边 (u, v)，u 的邻居列表中有 v，v 的邻居列表中也有 u。
/// 自环 (u, u) 只在 u 的列表中记录一次。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    /// 顶点列表，下标即顶点 ID
    vertices: Vec<Vertex>,
    /// 下一个可分配的顶点 ID（等于已创建的顶点数）
    next: usize,
}

/// 未经校验的反序列化形式
#[derive(Deserialize)]
struct RawGraph {
    vertices: Vec<Vertex>,
    next: usize,
}

impl TryFrom<RawGraph> for Graph {
    type Error = Error;

    /// 反序列化时重新校验全部不变量
    fn try_from(raw: RawGraph) -> Result<Self> {
        if raw.next != raw.vertices.len() {
            return Err(Error::InvalidGraph(format!(
                "next 为 {}, 实际顶点数为 {}",
                raw.next,
                raw.vertices.len()
            )));
        }

        for (i, v) in raw.vertices.iter().enumerate() {
            if v.id().as_usize() != i {
                return Err(Error::InvalidGraph(format!(
                    "位置 {} 上的顶点 ID 为 {}",
                    i,
                    v.id()
                )));
            }
            for &n in v.neighbors() {
                let Some(other) = raw.vertices.get(n.as_usize()) else {
                    return Err(Error::InvalidGraph(format!(
                        "顶点 {} 的邻居 {} 不存在",
                        i, n
                    )));
                };
                if n == v.id() {
                    continue;
                }
                let forward = v.neighbors().iter().filter(|&&m| m == n).count();
                let back = other.neighbors().iter().filter(|&&m| m == v.id()).count();
                if forward != back {
                    return Err(Error::InvalidGraph(format!(
                        "边 {}-{} 两端记录不对称 ({} != {})",
                        i, n, forward, back
                    )));
                }
            }
        }

        Ok(Self {
            vertices: raw.vertices,
            next: raw.next,
        })
    }
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建包含 `k` 个孤立顶点的图
    pub fn with_vertices(k: usize) -> Self {
        Self {
            vertices: (0..k).map(|i| Vertex::new(VertexId::new(i))).collect(),
            next: k,
        }
    }

    /// 校验顶点 ID
    fn check(&self, id: VertexId) -> Result<()> {
        if id.as_usize() >= self.next {
            return Err(Error::VertexOutOfRange {
                id: id.as_usize(),
                count: self.next,
            });
        }
        Ok(())
    }

    fn check_all(&self, ids: &[VertexId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.check(id))
    }

    /// 记录一条边的两端（不做去重）
    fn link(&mut self, a: VertexId, b: VertexId) {
        self.vertices[a.as_usize()].push_neighbor(b);
        if a != b {
            self.vertices[b.as_usize()].push_neighbor(a);
        }
    }

    // ==================== 顶点操作 ====================

    /// 添加新顶点，并与 `edges` 中每个已有顶点连边
    ///
    /// `edges` 中的重复 ID 会产生平行边。
    pub fn add_vertex(&mut self, edges: &[VertexId]) -> Result<VertexId> {
        self.check_all(edges)?;

        let id = VertexId::new(self.next);
        self.vertices.push(Vertex::new(id));
        self.next += 1;

        for &e in edges {
            self.link(id, e);
        }

        debug!(vertex = %id, edges = edges.len(), "添加顶点");
        Ok(id)
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.check(id)?;
        Ok(&self.vertices[id.as_usize()])
    }

    /// 按 ID 顺序遍历所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// 删除顶点
    ///
    /// 只删除与它相连的所有边，顶点槽位保留，ID 不会被复用。
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<()> {
        self.check(id)?;

        let mut snapshot: Neighbors = self.vertices[id.as_usize()].take_neighbors();
        snapshot.sort_unstable();
        snapshot.dedup();

        for k in snapshot.into_iter().filter(|&k| k != id) {
            let removed = self.vertices[k.as_usize()].remove_neighbor(id);
            debug!(vertex = %id, neighbor = %k, removed, "移除镜像边");
        }

        debug!(vertex = %id, "删除顶点");
        Ok(())
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.next
    }

    // ==================== 边操作 ====================

    /// 为 `target` 批量添加边
    ///
    /// 不检查重复，重复的 ID 会产生平行边；`target` 自身记录为一个自环。
    pub fn add_edges(&mut self, target: VertexId, edges: &[VertexId]) -> Result<()> {
        self.check(target)?;
        self.check_all(edges)?;

        for &e in edges {
            self.link(target, e);
        }

        debug!(vertex = %target, edges = edges.len(), "批量添加边");
        Ok(())
    }

    /// 插入一条边
    ///
    /// 与 [`Graph::add_edges`] 不同，这里拒绝重复的简单边：若 `second` 已是
    /// `first` 的邻居则不做任何修改并返回 `false`。自环总是会被记录。
    pub fn insert_edge(&mut self, first: VertexId, second: VertexId) -> Result<bool> {
        for id in [first, second] {
            if let Err(e) = self.check(id) {
                warn!(%first, %second, "无效的边: {}", e);
                return Err(e);
            }
        }

        if first != second && self.vertices[first.as_usize()].contains(second) {
            return Ok(false);
        }

        self.link(first, second);
        debug!(%first, %second, "插入边");
        Ok(true)
    }

    /// 获取边数量（自环计为一条边）
    pub fn edge_count(&self) -> usize {
        self.degree_sum() / 2
    }

    fn degree_sum(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).sum()
    }

    // ==================== 度数统计 ====================

    /// 获取顶点度数
    pub fn degree_of(&self, id: VertexId) -> Result<usize> {
        Ok(self.vertex(id)?.degree())
    }

    /// 最大度数，空图为 0
    pub fn maximum_degree(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).max().unwrap_or(0)
    }

    /// 平均度数
    pub fn average_degree(&self) -> Result<f64> {
        if self.next == 0 {
            return Err(Error::EmptyGraph);
        }
        Ok(2.0 * self.edge_count() as f64 / self.next as f64)
    }

    /// 含自环的顶点数
    pub fn self_loop_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.contains(v.id())).count()
    }

    /// 统计快照
    pub fn stats(&self) -> DegreeStats {
        DegreeStats {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count(),
            maximum_degree: self.maximum_degree(),
            average_degree: self.average_degree().ok(),
            self_loops: self.self_loop_count(),
        }
    }
}

/// 邻接列表格式：每行 `id->n1,n2,`
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}->", v.id())?;
            for n in v.neighbors() {
                write!(f, "{},", n)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId::new).collect()
    }

    fn v(id: usize) -> VertexId {
        VertexId::new(id)
    }

    fn sample() -> Graph {
        let mut graph = Graph::with_vertices(4);
        graph.add_edges(v(0), &ids(&[3, 1])).unwrap();
        graph
    }

    #[test]
    fn test_graph_empty() {
        let graph = Graph::new();

        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.maximum_degree(), 0);
        assert_eq!(graph.self_loop_count(), 0);
        assert!(matches!(graph.average_degree(), Err(Error::EmptyGraph)));
        assert_eq!(graph.to_string(), "");
    }

    #[test]
    fn test_graph_add_edges_scenario() {
        let graph = sample();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.degree_of(v(0)).unwrap(), 2);
        assert_eq!(graph.degree_of(v(1)).unwrap(), 1);
        assert_eq!(graph.degree_of(v(2)).unwrap(), 0);
        assert_eq!(graph.degree_of(v(3)).unwrap(), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.maximum_degree(), 2);
        assert_eq!(graph.average_degree().unwrap(), 1.0);
        assert_eq!(graph.self_loop_count(), 0);
    }

    #[test]
    fn test_graph_display() {
        let graph = sample();

        assert_eq!(graph.to_string(), "0->3,1,\n1->0,\n2->\n3->0,");
    }

    #[test]
    fn test_graph_add_vertex() {
        let mut graph = Graph::new();

        assert_eq!(graph.add_vertex(&[]).unwrap(), v(0));
        assert_eq!(graph.add_vertex(&ids(&[0])).unwrap(), v(1));
        assert_eq!(graph.add_vertex(&ids(&[0, 1])).unwrap(), v(2));

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree_of(v(0)).unwrap(), 2);
        assert!(graph.vertex(v(2)).unwrap().contains(v(1)));
        assert!(graph.vertex(v(1)).unwrap().contains(v(2)));
    }

    #[test]
    fn test_graph_add_vertex_rejects_unknown_neighbor() {
        let mut graph = Graph::with_vertices(2);

        // 新顶点自身的 ID 也尚不存在
        let err = graph.add_vertex(&ids(&[0, 2])).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { id: 2, count: 2 }));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_graph_insert_edge_deduplicates() {
        let mut graph = Graph::with_vertices(3);

        assert!(graph.insert_edge(v(0), v(1)).unwrap());
        assert!(!graph.insert_edge(v(0), v(1)).unwrap());
        assert!(!graph.insert_edge(v(1), v(0)).unwrap());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_graph_add_edges_allows_parallel() {
        let mut graph = Graph::with_vertices(3);

        graph.add_edges(v(0), &ids(&[1])).unwrap();
        assert_eq!(graph.edge_count(), 1);
        graph.add_edges(v(0), &ids(&[1])).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree_of(v(1)).unwrap(), 2);
    }

    #[test]
    fn test_graph_self_loop() {
        let mut graph = sample();
        let loops = graph.self_loop_count();
        let degree = graph.degree_of(v(2)).unwrap();
        let edges = graph.edge_count();

        assert!(graph.insert_edge(v(2), v(2)).unwrap());

        assert_eq!(graph.self_loop_count(), loops + 1);
        assert_eq!(graph.degree_of(v(2)).unwrap(), degree + 2);
        assert_eq!(graph.edge_count(), edges + 1);
        assert_eq!(graph.vertex(v(2)).unwrap().neighbors(), &[v(2)]);
    }

    #[test]
    fn test_graph_add_edges_self_loop_recorded_once() {
        let mut graph = Graph::with_vertices(2);

        graph.add_edges(v(1), &ids(&[1])).unwrap();

        assert_eq!(graph.vertex(v(1)).unwrap().neighbors(), &[v(1)]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.self_loop_count(), 1);
    }

    #[test]
    fn test_graph_degree_sum_is_twice_edge_count() {
        let mut graph = sample();
        graph.insert_edge(v(2), v(2)).unwrap();
        graph.insert_edge(v(1), v(2)).unwrap();
        graph.add_edges(v(3), &ids(&[3, 0, 0])).unwrap();

        let sum: usize = (0..graph.vertex_count())
            .map(|i| graph.degree_of(v(i)).unwrap())
            .sum();
        assert_eq!(sum, graph.edge_count() * 2);
    }

    #[test]
    fn test_graph_out_of_range() {
        let mut graph = sample();
        let edges = graph.edge_count();

        let err = graph.insert_edge(v(0), v(4)).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(graph.insert_edge(v(7), v(0)).unwrap_err().is_out_of_range());
        assert_eq!(graph.edge_count(), edges);

        // 边界值 next 同样越界
        assert!(graph.degree_of(v(4)).unwrap_err().is_out_of_range());
        assert!(graph.delete_vertex(v(4)).unwrap_err().is_out_of_range());
        assert!(graph.vertex(v(4)).is_err());

        // 批量操作整体失败，不留下部分修改
        assert!(graph.add_edges(v(1), &ids(&[2, 9])).is_err());
        assert!(graph.add_edges(v(4), &ids(&[0])).is_err());
        assert_eq!(graph.edge_count(), edges);
        assert_eq!(graph.degree_of(v(2)).unwrap(), 0);
    }

    #[test]
    fn test_graph_delete_vertex() {
        let mut graph = sample();
        graph.insert_edge(v(0), v(0)).unwrap();
        graph.add_edges(v(1), &ids(&[0])).unwrap();

        graph.delete_vertex(v(0)).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.degree_of(v(0)).unwrap(), 0);
        for vertex in graph.vertices() {
            assert!(!vertex.contains(v(0)));
        }
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.self_loop_count(), 0);
        assert_eq!(graph.to_string(), "0->\n1->\n2->\n3->");
    }

    #[test]
    fn test_graph_delete_vertex_keeps_other_edges() {
        let mut graph = sample();
        graph.insert_edge(v(1), v(3)).unwrap();

        graph.delete_vertex(v(3)).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.vertex(v(0)).unwrap().contains(v(1)));

        // 删除后的 ID 仍可重新连边
        assert!(graph.insert_edge(v(3), v(2)).unwrap());
        assert_eq!(graph.degree_of(v(3)).unwrap(), 1);
    }

    #[test]
    fn test_graph_deserialize_roundtrip() {
        let mut graph = sample();
        graph.insert_edge(v(2), v(2)).unwrap();
        graph.add_edges(v(1), &ids(&[3, 3])).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let restored: Graph = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, graph);
        assert_eq!(restored.degree_of(v(1)).unwrap(), 3);
    }

    #[test]
    fn test_graph_deserialize_rejects_count_mismatch() {
        let result = serde_json::from_str::<Graph>(r#"{"vertices":[],"next":3}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<Graph>(
            r#"{"vertices":[{"id":0,"neighbors":[]}],"next":0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_graph_deserialize_rejects_bad_ids() {
        // 顶点 ID 与位置不符
        let result = serde_json::from_str::<Graph>(
            r#"{"vertices":[{"id":1,"neighbors":[]},{"id":0,"neighbors":[]}],"next":2}"#,
        );
        assert!(result.is_err());

        // 邻居越界
        let result = serde_json::from_str::<Graph>(
            r#"{"vertices":[{"id":0,"neighbors":[5]}],"next":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_graph_deserialize_rejects_asymmetric_edges() {
        let result = serde_json::from_str::<Graph>(
            r#"{"vertices":[{"id":0,"neighbors":[1]},{"id":1,"neighbors":[]}],"next":2}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<Graph>(
            r#"{"vertices":[{"id":0,"neighbors":[1,1]},{"id":1,"neighbors":[0]}],"next":2}"#,
        );
        assert!(result.is_err());

        // 自环只记录一次，无需镜像
        let graph: Graph = serde_json::from_str(
            r#"{"vertices":[{"id":0,"neighbors":[0,1]},{"id":1,"neighbors":[0]}],"next":2}"#,
        )
        .unwrap();
        assert_eq!(graph.degree_of(v(0)).unwrap(), 3);
        assert_eq!(graph.self_loop_count(), 1);
    }

    #[test]
    fn test_graph_stats() {
        let stats = sample().stats();

        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.maximum_degree, 2);
        assert_eq!(stats.average_degree, Some(1.0));
        assert_eq!(stats.self_loops, 0);

        assert_eq!(Graph::new().stats().average_degree, None);
    }
}
