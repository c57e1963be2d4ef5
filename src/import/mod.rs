//! 边数据导入模块
//!
//! 从文本流读取以空白分隔的 `顶点 顶点` 整数对并逐条插入图中

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportStats {
    pub edges_inserted: usize,
    /// 已存在的简单边
    pub duplicates: usize,
    /// 端点越界
    pub rejected: usize,
    /// 无法解析的记录
    pub errors: usize,
    pub duration_ms: u64,
}

impl ImportStats {
    /// 处理过的整数对数量
    pub fn pairs(&self) -> usize {
        self.edges_inserted + self.duplicates + self.rejected
    }
}

/// 边读取器
pub struct EdgeReader<'g> {
    graph: &'g mut Graph,
    limit: Option<usize>,
}

impl<'g> EdgeReader<'g> {
    /// 创建读取器
    pub fn new(graph: &'g mut Graph) -> Self {
        Self { graph, limit: None }
    }

    /// 最多读取 `pairs` 个整数对
    pub fn with_limit(mut self, pairs: usize) -> Self {
        self.limit = Some(pairs);
        self
    }

    /// 从文件读取
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.read_pairs(BufReader::new(file))
    }

    /// 从任意 `BufRead` 读取整数对
    ///
    /// 整数对可以跨行。只有 IO 错误会中断读取，其余问题计入统计。
    pub fn read_pairs<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let mut stats = ImportStats::default();
        let mut pending: Option<String> = None;

        'lines: for line in reader.lines() {
            let line = line?;
            for token in line.split_whitespace() {
                if self.limit.is_some_and(|limit| stats.pairs() + stats.errors >= limit) {
                    pending = None;
                    break 'lines;
                }
                match pending.take() {
                    None => pending = Some(token.to_string()),
                    Some(first) => self.apply(&first, token, &mut stats),
                }
            }
        }

        if let Some(token) = pending {
            debug!(token = %token, "末尾缺少配对的顶点");
            stats.errors += 1;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            inserted = stats.edges_inserted,
            duplicates = stats.duplicates,
            rejected = stats.rejected,
            errors = stats.errors,
            "边导入完成"
        );
        Ok(stats)
    }

    fn apply(&mut self, first: &str, second: &str, stats: &mut ImportStats) {
        let pair = parse_vertex(first).and_then(|a| Ok((a, parse_vertex(second)?)));
        let (a, b) = match pair {
            Ok(pair) => pair,
            Err(e) => {
                debug!("跳过记录: {}", e);
                stats.errors += 1;
                return;
            }
        };

        match self.graph.insert_edge(a, b) {
            Ok(true) => stats.edges_inserted += 1,
            Ok(false) => stats.duplicates += 1,
            Err(_) => stats.rejected += 1,
        }
    }
}

/// 解析一个顶点 ID
pub fn parse_vertex(token: &str) -> Result<VertexId> {
    token
        .trim()
        .parse::<usize>()
        .map(VertexId::new)
        .map_err(|e| Error::ParseError(format!("无效的顶点 '{}': {}", token, e)))
}

/// 从文件读取边
pub fn import_edges<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<ImportStats> {
    EdgeReader::new(graph).read_file(path)
}
