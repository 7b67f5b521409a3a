use crate::cell::Cell;
use crate::error::Result;
use crate::models::Value;
use crate::number::{plain_decimal, serial_to_date};

/// 获取单元格的值
///
/// 不存在的单元格为 `Null`。公式单元格依次尝试数值、文本、错误值，
/// 三者都不适用时（例如布尔结果）返回 `UnsupportedCell` 错误。
pub fn normalize(cell: Option<&Cell>) -> Result<Value> {
    let Some(cell) = cell else {
        return Ok(Value::Null);
    };
    match cell {
        Cell::Text(s) => Ok(Value::Str(s.clone())),
        Cell::Numeric { .. } => numeric(cell),
        Cell::Boolean(b) => Ok(Value::Bool(*b)),
        Cell::Formula { .. } => numeric(cell)
            .or_else(|_| cell.text_value().map(|s| Value::Str(s.to_string())))
            .or_else(|_| cell.error_value().map(|e| Value::Str(e.to_string()))),
        Cell::Error(e) => Ok(Value::Str(e.to_string())),
        Cell::Empty => Ok(Value::Str(String::new())),
    }
}

/// 获取数字型的单元格值，日期格式输出 `YYYY-MM-DD`
pub fn numeric(cell: &Cell) -> Result<Value> {
    let d = cell.numeric_value()?;
    if cell.is_date_formatted() {
        if let Some(date) = serial_to_date(d) {
            return Ok(Value::Str(date));
        }
        log::debug!("日期序列号 {} 超出范围，按数字处理", d);
    }
    Ok(Value::Number(plain_decimal(d)))
}
