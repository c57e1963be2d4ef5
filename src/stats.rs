//! 度数统计模块
//!
//! 汇总图的结构查询结果，支持导出为 JSON

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 可导出的统计快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub maximum_degree: usize,
    /// 空图没有平均度数
    pub average_degree: Option<f64>,
    pub self_loops: usize,
}

impl DegreeStats {
    /// 导出为 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// 平均度数的展示文本
    pub fn average_degree_display(&self) -> String {
        match self.average_degree {
            Some(avg) => format!("{:.2}", avg),
            None => "-".to_string(),
        }
    }
}
