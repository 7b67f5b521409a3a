//! JSON 转换工具
//!
//! 对象、JSON 字符串、`Map` 之间的互相转换，全部交给 `serde_json`。

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::Record;

pub type JsonMap = Map<String, Value>;

/// 对象转 JSON 字符串
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// JSON 字符串转对象
pub fn from_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    Ok(serde_json::from_str(s)?)
}

/// JSON 数组字符串转对象列表
pub fn json_to_list<T: DeserializeOwned>(s: &str) -> Result<Vec<T>> {
    from_json(s)
}

/// JSON 字符串转 `Map`
pub fn json_to_map(s: &str) -> Result<JsonMap> {
    from_json(s)
}

pub fn json_to_array(s: &str) -> Result<Vec<Value>> {
    from_json(s)
}

pub fn json_to_list_map(s: &str) -> Result<Vec<JsonMap>> {
    from_json(s)
}

/// 对象转 `Map`，对象必须序列化为 JSON 对象
pub fn to_map<T: Serialize + ?Sized>(value: &T) -> Result<JsonMap> {
    Ok(serde_json::from_value(serde_json::to_value(value)?)?)
}

/// `Map` 转对象
pub fn map_to<T: DeserializeOwned>(map: JsonMap) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(map))?)
}

/// 列表转 JSON 数组
pub fn list_to_array<T: Serialize>(list: &[T]) -> Result<Vec<Value>> {
    Ok(list
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<_>>()?)
}

/// 记录列表转 JSON 字符串，数字保持字符串形式
pub fn records_to_json(records: &[Record]) -> Result<String> {
    to_json(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::Value as CellValue;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Config {
        company_name: String,
        phone: String,
        #[serde(default)]
        pages: u32,
    }

    fn config() -> Config {
        Config {
            company_name: "百惠行".to_string(),
            phone: "(0769) 83631717".to_string(),
            pages: 2,
        }
    }

    #[test]
    fn object_round_trip() {
        let text = to_json(&config()).unwrap();
        assert_eq!(
            text,
            r#"{"company_name":"百惠行","phone":"(0769) 83631717","pages":2}"#
        );
        assert_eq!(from_json::<Config>(&text).unwrap(), config());
    }

    #[test]
    fn lists_and_maps() {
        let text = r#"[{"company_name":"a","phone":"1"},{"company_name":"b","phone":"2"}]"#;
        let list: Vec<Config> = json_to_list(text).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].company_name, "b");
        assert_eq!(list[0].pages, 0);

        let maps = json_to_list_map(text).unwrap();
        assert_eq!(maps[0]["phone"], "1");
        assert_eq!(json_to_array(text).unwrap().len(), 2);

        let array = list_to_array(&list).unwrap();
        assert_eq!(array[0]["company_name"], "a");
    }

    #[test]
    fn object_and_map() {
        let map = to_map(&config()).unwrap();
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["company_name", "phone", "pages"]);

        let back: Config = map_to(map).unwrap();
        assert_eq!(back, config());

        let parsed = json_to_map(r#"{"a":1,"b":[true]}"#).unwrap();
        assert_eq!(parsed["b"][0], true);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(to_map(&[1, 2]), Err(Error::Json(_))));
        assert!(matches!(json_to_map("[1]"), Err(Error::Json(_))));
        assert!(matches!(from_json::<Config>("{"), Err(Error::Json(_))));
    }

    #[test]
    fn records_keep_numbers_as_strings() {
        let mut record = Record::default();
        record.insert("name", CellValue::Str("Alice".to_string()));
        record.insert("age", CellValue::Number("30".to_string()));
        record.insert("vip", CellValue::Bool(false));
        record.insert("note", CellValue::Null);
        assert_eq!(
            records_to_json(&[record]).unwrap(),
            r#"[{"name":"Alice","age":"30","vip":false,"note":null}]"#
        );
    }
}
