use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 单元格规范化后的值
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Str(String),
    Bool(bool),
    /// 数字以字符串保存，避免科学计数法
    Number(String),
}

impl Value {
    /// 空值或只含空白字符
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) | Value::Number(s) => s.trim().is_empty(),
            Value::Bool(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Number(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Str(s) | Value::Number(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Str(s) | Value::Number(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Str(s) | Value::Number(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// 一行数据：列名 -> 值，保持列顺序
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// 同名列后者覆盖前者
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_json(self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|(k, v)| (k, v)))
    }
}

/// Excel 文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookFormat {
    /// 旧版二进制格式 (BIFF8)
    Xls,
    /// 基于 zip 的 XML 格式
    #[default]
    Xlsx,
}

impl WorkbookFormat {
    pub fn code(self) -> u8 {
        match self {
            WorkbookFormat::Xls => 1,
            WorkbookFormat::Xlsx => 2,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            WorkbookFormat::Xls => "xls",
            WorkbookFormat::Xlsx => "xlsx",
        }
    }

    /// 根据扩展名获取格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        [WorkbookFormat::Xls, WorkbookFormat::Xlsx]
            .into_iter()
            .find(|f| f.extension() == ext)
    }
}

impl FromStr for WorkbookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("不支持的文件格式: {}", s))
    }
}

/// 读取配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// 文件格式
    pub format: WorkbookFormat,
    /// 起始行，默认跳过第一行列名
    pub start_row: usize,
    /// 统计行数时检查的列数
    pub column_count: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: WorkbookFormat::Xlsx,
            start_row: 1,
            column_count: crate::rows::DEFAULT_COLUMN_COUNT,
        }
    }
}

impl ReadOptions {
    /// 加载配置，文件不存在或格式错误时使用默认值
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<ReadOptions>(&content) {
                Ok(options) => options,
                Err(e) => {
                    log::warn!("配置文件 {:?} 格式错误，使用默认配置: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("无法读取配置文件 {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
