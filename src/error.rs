//! 读取工作簿和 JSON 转换共用的错误类型

use thiserror::Error;

use crate::cell::CellKind;

/// 本 crate 统一使用的 `Result`
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 读取输入流失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 内容不是指定格式的工作簿
    #[error("failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),

    /// 工作簿中没有工作表
    #[error("workbook has no sheets")]
    NoSheet,

    /// 单元格类型与读取方式不符
    #[error("cannot read {expected} value from {found:?} cell")]
    UnsupportedCell {
        expected: &'static str,
        found: CellKind,
    },

    /// 读取行时单元格取值失败，带行列号
    #[error("row {row}, column {column}: {source}")]
    Cell {
        row: usize,
        column: usize,
        #[source]
        source: Box<Error>,
    },

    /// 单元格的值无法转换为目标字段
    #[error("row {row}, field `{column}`: {message}")]
    FieldMapping {
        row: usize,
        column: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn at_cell(self, row: usize, column: usize) -> Self {
        Error::Cell {
            row,
            column,
            source: Box::new(self),
        }
    }
}
