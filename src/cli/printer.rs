//! 结果打印器
//!
//! 提供邻接列表以及表格和 JSON 格式的统计输出

use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::import::ImportStats;
use crate::stats::DegreeStats;
use prettytable::{format, row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 邻接列表，每个顶点一行
    pub fn adjacency(&self, graph: &Graph) -> String {
        if graph.vertex_count() == 0 {
            return String::new();
        }
        format!("{}\n", graph)
    }

    /// 打印统计信息
    pub fn stats(&self, stats: &DegreeStats) -> Result<String> {
        match self.mode {
            PrintMode::Table => Ok(self.format_table(stats)),
            PrintMode::Json => stats.to_json(),
        }
    }

    /// 指定顶点的度数，每个顶点一行
    pub fn degrees(&self, graph: &Graph, ids: &[VertexId]) -> Result<String> {
        let mut output = String::new();
        for &id in ids {
            output.push_str(&format!("degree of {}: {}\n", id, graph.degree_of(id)?));
        }
        Ok(output)
    }

    /// 边导入摘要
    pub fn import_summary(&self, stats: &ImportStats) -> String {
        let mut output = format!(
            "读取 {} 个边对 (插入 {}, 重复 {}), 耗时 {} ms\n",
            stats.pairs(),
            stats.edges_inserted,
            stats.duplicates,
            stats.duration_ms
        );
        if stats.rejected + stats.errors > 0 {
            output.push_str(&format!(
                "已跳过 {} 个越界边对, {} 个无效记录\n",
                stats.rejected, stats.errors
            ));
        }
        output
    }

    fn format_table(&self, stats: &DegreeStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", stats.vertex_count.to_string()]);
        table.add_row(row!["Edge Count", stats.edge_count.to_string()]);
        table.add_row(row!["Maximum Degree", stats.maximum_degree.to_string()]);
        table.add_row(row!["Average Degree", stats.average_degree_display()]);
        table.add_row(row!["Self Loops", stats.self_loops.to_string()]);
        table.to_string()
    }
}
