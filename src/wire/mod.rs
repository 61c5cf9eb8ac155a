pub mod keys;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{MapError, MapResult};
use crate::model::IdentifiableName;

/// One JSON object as exchanged with the server.
pub type WireObject = Map<String, Value>;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed set of symbolic values rendered as lower-case names on the wire.
pub trait WireEnum: Sized + Copy + Default + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Case-insensitive lookup against the symbolic names.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(text))
    }
}

/// Typed construction from a nested wire object, used for collections.
pub trait FromWire: Sized {
    fn from_wire(object: &WireObject) -> MapResult<Self>;
}

/// Typed extraction with defaults over a wire object.
pub trait WireObjectExt {
    fn get_int(&self, key: &str) -> i64;
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_bool(&self, key: &str) -> bool;
    fn get_date_time(&self, key: &str) -> Option<DateTime<Utc>>;
    fn get_date(&self, key: &str) -> Option<DateTime<Utc>>;
    fn get_identifiable_name(&self, key: &str) -> Option<IdentifiableName>;
    fn get_enum<E: WireEnum>(&self, key: &str) -> MapResult<E>;
    fn get_collection<T: FromWire>(&self, key: &str) -> MapResult<Vec<T>>;
}

impl WireObjectExt for WireObject {
    fn get_int(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true") || s.trim() == "1",
            _ => false,
        }
    }

    fn get_date_time(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key)
            .and_then(Value::as_str)
            .and_then(parse_date_time)
    }

    /// Like `get_date_time`, truncated to midnight UTC of the same day.
    fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_date_time(key)
            .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    fn get_identifiable_name(&self, key: &str) -> Option<IdentifiableName> {
        self.get(key)
            .and_then(Value::as_object)
            .and_then(|o| IdentifiableName::from_wire(o).ok())
    }

    fn get_enum<E: WireEnum>(&self, key: &str) -> MapResult<E> {
        let value = match self.get(key) {
            None | Some(Value::Null) => return Ok(E::default()),
            Some(value) => value,
        };
        let text = scalar_text(value).unwrap_or_else(|| value.to_string());
        E::parse(&text).ok_or_else(|| MapError::format(key, text))
    }

    fn get_collection<T: FromWire>(&self, key: &str) -> MapResult<Vec<T>> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .map(T::from_wire)
                .collect(),
            _ => Ok(Vec::new()),
        }
    }
}

/// Writes `key` as `YYYY-MM-DD`, or as an empty string when there is no date.
/// The key is present either way.
pub fn write_date_or_empty(object: &mut WireObject, key: &str, date: Option<DateTime<Utc>>) {
    let text = date.map(format_date).unwrap_or_default();
    object.insert(key.to_string(), Value::String(text));
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses the date and date-time forms the server emits. Blank or malformed
/// text is treated as no date.
pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Text form of a scalar value. Objects, arrays and null have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
