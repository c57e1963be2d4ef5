//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点越界: {id}, 有效范围 0..{count}")]
    VertexOutOfRange { id: usize, count: usize },

    #[error("空图没有平均度数")]
    EmptyGraph,

    #[error("图数据无效: {0}")]
    InvalidGraph(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl Error {
    /// 是否为顶点越界错误
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::VertexOutOfRange { .. })
    }
}
