use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value as Json};

use crate::error::{Error, Result};
use crate::models::{Record, Value};

/// 单列的值如何转换成 JSON 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoder {
    /// 原样传递，数字仍为字符串
    #[default]
    Raw,
    /// 转成字符串
    Text,
    /// 转成 JSON 数字
    Number,
    /// `true`/`false`
    Bool,
    /// 只接受 `YYYY-MM-DD`
    Date,
}

impl Decoder {
    pub fn decode(self, value: &Value) -> std::result::Result<Json, String> {
        match self {
            Decoder::Raw => return Ok(Json::from(value)),
            Decoder::Text => {
                return Ok(match value {
                    Value::Null => Json::Null,
                    v => Json::String(v.to_string()),
                })
            }
            _ if value.is_blank() => return Ok(Json::Null),
            _ => {}
        }

        match (self, value) {
            (Decoder::Number, Value::Number(s) | Value::Str(s)) => parse_number(s.trim())
                .map(Json::Number)
                .ok_or_else(|| format!("`{}` 不是数字", s)),
            (Decoder::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
            (Decoder::Bool, Value::Str(s)) => match s.trim().to_lowercase().as_str() {
                "true" => Ok(Json::Bool(true)),
                "false" => Ok(Json::Bool(false)),
                _ => Err(format!("`{}` 不是布尔值", s)),
            },
            (Decoder::Date, Value::Str(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|d| Json::String(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| format!("`{}` 不是 YYYY-MM-DD 日期", s)),
            (decoder, v) => Err(format!("{:?} 无法转换为 {:?}", v, decoder)),
        }
    }
}

/// 整数优先，避免整型字段收到浮点数
fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub decoder: Decoder,
}

/// 有序的列定义，第 i 列对应表格第 i 列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全部按原值传递的列
    pub fn raw<S: AsRef<str>>(names: &[S]) -> Self {
        names
            .iter()
            .fold(Self::new(), |schema, name| schema.column(name.as_ref(), Decoder::Raw))
    }

    pub fn column(mut self, name: impl Into<String>, decoder: Decoder) -> Self {
        self.columns.push(Column {
            name: name.into(),
            decoder,
        });
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// 把一行记录转换成 `T`，`row` 只用于错误信息
    pub fn decode<T: DeserializeOwned>(&self, record: &Record, row: usize) -> Result<T> {
        let mut object = Map::with_capacity(self.columns.len());
        for column in &self.columns {
            let value = record.get(&column.name).unwrap_or(&Value::Null);
            let json = column.decoder.decode(value).map_err(|message| Error::FieldMapping {
                row,
                column: column.name.clone(),
                message,
            })?;
            object.insert(column.name.clone(), json);
        }

        serde_json::from_value(Json::Object(object)).map_err(|e| Error::FieldMapping {
            row,
            column: self.names().join(","),
            message: e.to_string(),
        })
    }
}

/// 可以从表格行读取的类型
///
/// ```
/// use serde::Deserialize;
/// use sheet_rows::{Decoder, RowSchema, Schema};
///
/// #[derive(Deserialize)]
/// struct Item {
///     name: String,
///     quantity: f64,
/// }
///
/// impl RowSchema for Item {
///     fn schema() -> Schema {
///         Schema::new()
///             .column("name", Decoder::Text)
///             .column("quantity", Decoder::Number)
///     }
/// }
/// ```
pub trait RowSchema: DeserializeOwned {
    fn schema() -> Schema;
}
