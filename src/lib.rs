//! 读取 xls/xlsx 第一个工作表的数据，转换成记录或指定类型，
//! 以及 JSON 与对象之间的转换。
//!
//! ```no_run
//! use std::fs::File;
//! use sheet_rows::{read_excel, WorkbookFormat};
//!
//! let file = File::open("users.xlsx")?;
//! let records = read_excel(file, WorkbookFormat::Xlsx, &["name", "age"], 1)?;
//! for record in &records {
//!     println!("{:?}", record.get("name"));
//! }
//! # Ok::<(), sheet_rows::Error>(())
//! ```

pub mod cell;
pub mod error;
pub mod excel;
pub mod json;
pub mod models;
pub mod normalize;
pub mod number;
pub mod rows;
pub mod schema;

pub use cell::{Cached, Cell, CellKind, Row, Sheet};
pub use error::{Error, Result};
pub use excel::{
    load_sheet, read_excel, read_excel_as, read_excel_with, real_row_count,
    real_row_count_with,
};
pub use models::{ReadOptions, Record, Value, WorkbookFormat};
pub use normalize::normalize;
pub use number::plain_decimal;
pub use rows::{count_data_rows, is_blank_row, read_records, read_typed, DEFAULT_COLUMN_COUNT};
pub use schema::{Column, Decoder, RowSchema, Schema};
