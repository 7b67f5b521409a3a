use calamine::{CellErrorType, Data};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// 单元格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Text,
    Numeric,
    Boolean,
    Formula,
    Error,
}

/// 公式单元格缓存的计算结果
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Numeric { value: f64, date: bool },
    Text(String),
    Boolean(bool),
    Error(CellErrorType),
}

/// 解码后的单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    /// `date` 由单元格格式决定，与数值无关
    Numeric { value: f64, date: bool },
    Boolean(bool),
    Formula { formula: String, cached: Cached },
    Error(CellErrorType),
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Cell::Numeric { value, date: false }
    }

    pub fn date(serial: f64) -> Self {
        Cell::Numeric {
            value: serial,
            date: true,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Text(_) => CellKind::Text,
            Cell::Numeric { .. } => CellKind::Numeric,
            Cell::Boolean(_) => CellKind::Boolean,
            Cell::Formula { .. } => CellKind::Formula,
            Cell::Error(_) => CellKind::Error,
        }
    }

    fn unsupported(&self, expected: &'static str) -> Error {
        Error::UnsupportedCell {
            expected,
            found: self.kind(),
        }
    }

    /// 数值，公式单元格取缓存的数值结果
    pub fn numeric_value(&self) -> Result<f64> {
        match self {
            Cell::Numeric { value, .. }
            | Cell::Formula {
                cached: Cached::Numeric { value, .. },
                ..
            } => Ok(*value),
            Cell::Empty => Ok(0.0),
            _ => Err(self.unsupported("numeric")),
        }
    }

    /// 数值是否按日期格式显示
    pub fn is_date_formatted(&self) -> bool {
        matches!(
            self,
            Cell::Numeric { date: true, .. }
                | Cell::Formula {
                    cached: Cached::Numeric { date: true, .. },
                    ..
                }
        )
    }

    /// 文本，空单元格为空字符串
    pub fn text_value(&self) -> Result<&str> {
        match self {
            Cell::Text(s)
            | Cell::Formula {
                cached: Cached::Text(s),
                ..
            } => Ok(s),
            Cell::Empty => Ok(""),
            _ => Err(self.unsupported("text")),
        }
    }

    pub fn error_value(&self) -> Result<&CellErrorType> {
        match self {
            Cell::Error(e)
            | Cell::Formula {
                cached: Cached::Error(e),
                ..
            } => Ok(e),
            _ => Err(self.unsupported("error")),
        }
    }

    /// 给缓存值附上公式
    pub fn with_formula(self, formula: impl Into<String>) -> Self {
        let cached = match self {
            Cell::Numeric { value, date } => Cached::Numeric { value, date },
            Cell::Text(s) => Cached::Text(s),
            Cell::Empty => Cached::Text(String::new()),
            Cell::Boolean(b) => Cached::Boolean(b),
            Cell::Error(e) => Cached::Error(e),
            Cell::Formula { cached, .. } => cached,
        };
        Cell::Formula {
            formula: formula.into(),
            cached,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::number(*i as f64),
            Data::Float(f) => Cell::number(*f),
            // calamine 只对日期/时间格式的数值返回 DateTime
            Data::DateTime(dt) => Cell::date(dt.as_f64()),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Boolean(*b),
            Data::Error(e) => Cell::Error(e.clone()),
            Data::Empty => Cell::Empty,
        }
    }
}

/// 一行，按列号稀疏存放
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<usize, Cell>,
}

impl Row {
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub fn set_cell(&mut self, col: usize, cell: Cell) {
        self.cells.insert(col, cell);
    }
}

/// 工作表，按行号稀疏存放
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: BTreeMap<usize, Row>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按位置构建，`None` 表示该单元格不存在
    pub fn from_rows(rows: Vec<Vec<Option<Cell>>>) -> Self {
        let mut sheet = Sheet::new();
        for (row_idx, cells) in rows.into_iter().enumerate() {
            for (col_idx, cell) in cells.into_iter().enumerate() {
                if let Some(cell) = cell {
                    sheet.set_cell(row_idx, col_idx, cell);
                }
            }
        }
        sheet
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(&idx)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows.entry(row).or_default().set_cell(col, cell);
    }

    /// 最后一个存在的行号，空表为 `None`
    pub fn last_row_index(&self) -> Option<usize> {
        self.rows.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_cell_kind() {
        let text = Cell::text("abc");
        assert_eq!(text.text_value().unwrap(), "abc");
        assert!(matches!(
            text.numeric_value(),
            Err(Error::UnsupportedCell {
                expected: "numeric",
                found: CellKind::Text
            })
        ));

        let date = Cell::date(45306.0);
        assert!(date.is_date_formatted());
        assert_eq!(date.numeric_value().unwrap(), 45306.0);
        assert!(date.text_value().is_err());

        let err = Cell::Error(CellErrorType::Div0);
        assert_eq!(err.error_value().unwrap(), &CellErrorType::Div0);
        assert!(err.text_value().is_err());
    }

    #[test]
    fn formula_reads_cached_result() {
        let cell = Cell::date(45306.0).with_formula("TODAY()");
        assert_eq!(cell.kind(), CellKind::Formula);
        assert!(cell.is_date_formatted());
        assert_eq!(cell.numeric_value().unwrap(), 45306.0);

        let cell = Cell::text("ok").with_formula("A1");
        assert_eq!(cell.text_value().unwrap(), "ok");
        assert!(cell.numeric_value().is_err());
    }

    #[test]
    fn from_calamine_data() {
        assert_eq!(Cell::from(&Data::Int(3)), Cell::number(3.0));
        assert_eq!(Cell::from(&Data::Float(1.5)), Cell::number(1.5));
        assert_eq!(Cell::from(&Data::Bool(true)), Cell::Boolean(true));
        assert_eq!(
            Cell::from(&Data::String("x".to_string())),
            Cell::text("x")
        );
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn sparse_sheet() {
        let sheet = Sheet::from_rows(vec![
            vec![Some(Cell::text("name"))],
            vec![],
            vec![None, Some(Cell::number(1.0))],
        ]);
        assert_eq!(sheet.last_row_index(), Some(2));
        assert!(sheet.row(1).is_none());
        let row = sheet.row(2).unwrap();
        assert!(row.cell(0).is_none());
        assert_eq!(row.cell(1), Some(&Cell::number(1.0)));
        assert_eq!(Sheet::new().last_row_index(), None);
    }
}
