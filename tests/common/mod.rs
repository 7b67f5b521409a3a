//! 集成测试用的工作簿：xlsx 在内存中生成，xls 读取 `tests/fixtures` 下的文件

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Formula, Workbook, XlsxError};
use std::path::PathBuf;

pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// 生成用户表：列名、数据行、空行、只含空格的行
///
/// | row | A        | B           | C          | D     | E        |
/// |-----|----------|-------------|------------|-------|----------|
/// | 0   | 姓名     | 电话        | 入职日期   | VIP   | 积分     |
/// | 1   | Alice    | 13800138000 | 2024-01-15 | true  | =1+2     |
/// | 2   | (formatted blanks only)                              |
/// | 3   | "   "    |             |            |       |          |
/// | 4   | Bob      | 12.0        | 2023-12-31 | false | 0.00015  |
pub fn users_xlsx() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("用户")?;
    for (col, title) in ["姓名", "电话", "入职日期", "VIP", "积分"].iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }

    worksheet.write_string(1, 0, "Alice")?;
    worksheet.write_number(1, 1, 13800138000.0)?;
    worksheet.write_number_with_format(1, 2, 45306.0, &date_format)?;
    worksheet.write_boolean(1, 3, true)?;
    worksheet.write_formula(1, 4, Formula::new("=1+2").set_result("3"))?;

    worksheet.write_blank(2, 0, &bold)?;
    worksheet.write_blank(2, 1, &bold)?;

    worksheet.write_string(3, 0, "   ")?;

    worksheet.write_string(4, 0, "Bob")?;
    worksheet.write_number(4, 1, 12.0)?;
    worksheet.write_number_with_format(4, 2, 45291.0, &date_format)?;
    worksheet.write_boolean(4, 3, false)?;
    worksheet.write_number(4, 4, 0.00015)?;

    // 只读取第一个工作表
    let other = workbook.add_worksheet();
    other.write_string(0, 0, "ignored")?;
    other.write_string(1, 0, "ignored")?;

    workbook.save_to_buffer()
}

/// 数据不从 A1 开始的工作表
pub fn offset_xlsx() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(2, 0, "name")?;
    worksheet.write_string(3, 0, "x")?;
    worksheet.write_number(3, 1, 1.23e10)?;
    workbook.save_to_buffer()
}

/// 第二行只有 C 列有内容
///
/// | row | A    | B | C     |
/// |-----|------|---|-------|
/// | 0   | name |   |       |
/// | 1   | a    |   |       |
/// | 2   |      |   | wide  |
pub fn wide_xlsx() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "name")?;
    worksheet.write_string(1, 0, "a")?;
    worksheet.write_string(2, 2, "wide")?;
    workbook.save_to_buffer()
}
