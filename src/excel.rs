use calamine::{Data, Range, Reader, Sheets, Xls, Xlsx};
use std::io::{Cursor, Read};

use crate::cell::{Cell, Sheet};
use crate::error::{Error, Result};
use crate::models::{ReadOptions, Record, WorkbookFormat};
use crate::rows::{count_data_rows, read_records, read_typed, DEFAULT_COLUMN_COUNT};
use crate::schema::RowSchema;

/// 按指定格式打开工作簿，不做格式嗅探
fn open_workbook(bytes: Vec<u8>, format: WorkbookFormat) -> Result<Sheets<Cursor<Vec<u8>>>> {
    let cursor = Cursor::new(bytes);
    let workbook = match format {
        WorkbookFormat::Xls => Sheets::Xls(Xls::new(cursor).map_err(calamine::Error::Xls)?),
        WorkbookFormat::Xlsx => Sheets::Xlsx(Xlsx::new(cursor).map_err(calamine::Error::Xlsx)?),
    };
    Ok(workbook)
}

/// 把值区域和公式区域合并成 `Sheet`，行列号使用工作表中的绝对位置
fn build_sheet(values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new();
    let (row_offset, col_offset) = match values.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return sheet,
    };

    for (r, c, data) in values.used_cells() {
        let (row, col) = (row_offset + r, col_offset + c);
        let cell = Cell::from(data);
        let formula = formulas
            .and_then(|f| f.get_value((row as u32, col as u32)))
            .filter(|f| !f.is_empty());
        let cell = match formula {
            Some(formula) => cell.with_formula(formula.as_str()),
            None => cell,
        };
        sheet.set_cell(row, col, cell);
    }
    sheet
}

/// 读取输入流中第一个工作表
///
/// 工作簿只在本函数内持有，任何返回路径上都会被释放。
pub fn load_sheet<R: Read>(mut input: R, format: WorkbookFormat) -> Result<Sheet> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    let mut workbook = open_workbook(bytes, format)?;
    let sheet_name = workbook.sheet_names().first().cloned().ok_or(Error::NoSheet)?;
    let values = workbook.worksheet_range(&sheet_name)?;

    // 公式只用于区分单元格类型，解析失败时退回缓存值
    let formulas = match workbook.worksheet_formula(&sheet_name) {
        Ok(formulas) => Some(formulas),
        Err(e) => {
            log::warn!("无法读取工作表 {} 的公式: {}", sheet_name, e);
            None
        }
    };

    let sheet = build_sheet(&values, formulas.as_ref());
    log::debug!(
        "读取 {} 工作表 {}，最后一行: {:?}",
        format.extension(),
        sheet_name,
        sheet.last_row_index()
    );
    Ok(sheet)
}

/// 获取真实的行数（不包括第一行），不包括空行和只含空格的行
///
/// `col_num` 为空时检查前 26 列。
pub fn real_row_count<R: Read>(
    input: R,
    format: WorkbookFormat,
    col_num: Option<usize>,
) -> Result<usize> {
    let sheet = load_sheet(input, format)?;
    count_data_rows(&sheet, col_num.unwrap_or(DEFAULT_COLUMN_COUNT))
}

/// 使用配置中的格式和检查列数统计真实行数
pub fn real_row_count_with<R: Read>(input: R, options: &ReadOptions) -> Result<usize> {
    let sheet = load_sheet(input, options.format)?;
    count_data_rows(&sheet, options.column_count)
}

/// 读取 excel 解析成记录列表，列名按位置对应
pub fn read_excel<R: Read, S: AsRef<str>>(
    input: R,
    format: WorkbookFormat,
    columns: &[S],
    start_row: usize,
) -> Result<Vec<Record>> {
    let sheet = load_sheet(input, format)?;
    read_records(&sheet, columns, start_row)
}

/// 使用配置中的格式和起始行读取
pub fn read_excel_with<R: Read, S: AsRef<str>>(
    input: R,
    options: &ReadOptions,
    columns: &[S],
) -> Result<Vec<Record>> {
    read_excel(input, options.format, columns, options.start_row)
}

/// 读取 excel 解析成 `T` 列表，字段类型必须匹配，例如日期格式
pub fn read_excel_as<T: RowSchema, R: Read>(
    input: R,
    format: WorkbookFormat,
    start_row: usize,
) -> Result<Vec<T>> {
    let sheet = load_sheet(input, format)?;
    read_typed(&sheet, &T::schema(), start_row)
}
