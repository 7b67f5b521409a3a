use serde::de::DeserializeOwned;

use crate::cell::{Row, Sheet};
use crate::error::{Error, Result};
use crate::models::Record;
use crate::normalize::normalize;
use crate::schema::Schema;

/// 未指定列数时检查的列数 (A-Z)
pub const DEFAULT_COLUMN_COUNT: usize = 26;

/// 指定列数的单元格非空判断，避免空行
///
/// 行不存在，或前 `col_num` 列都不存在或只含空白字符时为空行。
pub fn is_blank_row(row: Option<&Row>, col_num: usize) -> Result<bool> {
    check_blank(row, col_num).map_err(|(_, e)| e)
}

fn check_blank(row: Option<&Row>, col_num: usize) -> std::result::Result<bool, (usize, Error)> {
    let Some(row) = row else {
        return Ok(true);
    };
    for col in 0..col_num {
        let Some(cell) = row.cell(col) else {
            continue;
        };
        let value = normalize(Some(cell)).map_err(|e| (col, e))?;
        if !value.is_blank() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 非空行返回该行
fn data_row(sheet: &Sheet, idx: usize, col_num: usize) -> Result<Option<&Row>> {
    let row = sheet.row(idx);
    match check_blank(row, col_num) {
        Ok(true) => Ok(None),
        Ok(false) => Ok(row),
        Err((col, e)) => Err(e.at_cell(idx, col)),
    }
}

/// 获取真实的行数，不包括第一行列名、空行和只含空格的行
pub fn count_data_rows(sheet: &Sheet, col_num: usize) -> Result<usize> {
    let Some(last) = sheet.last_row_index() else {
        return Ok(0);
    };
    let mut count = 0;
    for idx in 1..=last {
        if data_row(sheet, idx, col_num)?.is_some() {
            count += 1;
        }
    }
    log::debug!("有效数据行数: {}", count);
    Ok(count)
}

/// 读取记录，同时保留行号
fn indexed_records<S: AsRef<str>>(
    sheet: &Sheet,
    columns: &[S],
    start_row: usize,
) -> Result<Vec<(usize, Record)>> {
    let col_num = columns.len();
    let mut records = Vec::new();
    let Some(last) = sheet.last_row_index() else {
        return Ok(records);
    };

    for idx in start_row..=last {
        let Some(row) = data_row(sheet, idx, col_num)? else {
            continue;
        };
        let mut record = Record::with_capacity(col_num);
        for (col, name) in columns.iter().enumerate() {
            let value = normalize(row.cell(col)).map_err(|e| e.at_cell(idx, col))?;
            record.insert(name.as_ref(), value);
        }
        records.push((idx, record));
    }
    Ok(records)
}

/// 从 `start_row` 开始读取，列名按位置对应第 0..n 列
pub fn read_records<S: AsRef<str>>(
    sheet: &Sheet,
    columns: &[S],
    start_row: usize,
) -> Result<Vec<Record>> {
    let records = indexed_records(sheet, columns, start_row)?;
    Ok(records.into_iter().map(|(_, record)| record).collect())
}

/// 按 schema 的列读取并转换成 `T`，字段类型不匹配时报错
pub fn read_typed<T: DeserializeOwned>(
    sheet: &Sheet,
    schema: &Schema,
    start_row: usize,
) -> Result<Vec<T>> {
    indexed_records(sheet, &schema.names(), start_row)?
        .iter()
        .map(|(idx, record)| schema.decode(record, *idx))
        .collect()
}
