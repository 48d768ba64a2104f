//! Driver-neutral result rows.
//!
//! Executors convert whatever their driver returns into [`Row`]s, and each
//! entity decodes itself from a row with the typed accessors below.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Any integer width.
    Int(i64),
    /// Any floating-point width.
    Float(f64),
    /// Text, including dates and UUIDs rendered as text by the backend.
    Text(String),
}

impl Value {
    /// Short name of the variant for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    /// Whether the value is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered set of named column values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(name, value)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Look up a column, exact name first, then ASCII case-insensitively.
    ///
    /// Some backends fold unquoted aliases to upper or lower case.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .or_else(|| self.columns.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)))
            .map(|(_, v)| v)
    }

    /// Required text column.
    pub fn text(&self, name: &str) -> AppResult<String> {
        required(name, self.opt_text(name)?)
    }

    /// Nullable text column.
    pub fn opt_text(&self, name: &str) -> AppResult<Option<String>> {
        self.decode(name, "text", |v| match v {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Required integer column.
    pub fn int(&self, name: &str) -> AppResult<i64> {
        required(name, self.opt_int(name)?)
    }

    /// Nullable integer column.
    pub fn opt_int(&self, name: &str) -> AppResult<Option<i64>> {
        self.decode(name, "int", |v| match v {
            Value::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Required float column. Integers widen.
    pub fn float(&self, name: &str) -> AppResult<f64> {
        required(name, self.opt_float(name)?)
    }

    /// Nullable float column. Integers widen.
    pub fn opt_float(&self, name: &str) -> AppResult<Option<f64>> {
        self.decode(name, "float", |v| match v {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        })
    }

    /// Required boolean column. Accepts integer `0`/`1`.
    pub fn bool(&self, name: &str) -> AppResult<bool> {
        required(name, self.opt_bool(name)?)
    }

    /// Nullable boolean column. Accepts integer `0`/`1`.
    pub fn opt_bool(&self, name: &str) -> AppResult<Option<bool>> {
        self.decode(name, "bool", |v| match v {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        })
    }

    /// Required UUID column, stored as text.
    pub fn uuid(&self, name: &str) -> AppResult<Uuid> {
        required(name, self.opt_uuid(name)?)
    }

    /// Nullable UUID column, stored as text.
    pub fn opt_uuid(&self, name: &str) -> AppResult<Option<Uuid>> {
        self.decode(name, "uuid", |v| match v {
            Value::Text(s) => Uuid::parse_str(s).ok(),
            _ => None,
        })
    }

    /// Required date column, stored as `YYYY-MM-DD` text.
    pub fn date(&self, name: &str) -> AppResult<NaiveDate> {
        required(name, self.opt_date(name)?)
    }

    /// Nullable date column. A trailing time component is ignored.
    pub fn opt_date(&self, name: &str) -> AppResult<Option<NaiveDate>> {
        self.decode(name, "date", |v| match v {
            Value::Text(s) => {
                let date_part = s.get(..10).unwrap_or(s.as_str());
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
            }
            _ => None,
        })
    }

    fn decode<T>(
        &self,
        name: &str,
        expected: &str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> AppResult<Option<T>> {
        let value = self
            .get(name)
            .ok_or_else(|| AppError::mapping(format!("Column '{name}' missing from result row")))?;

        if value.is_null() {
            return Ok(None);
        }

        convert(value).map(Some).ok_or_else(|| {
            AppError::mapping(format!(
                "Column '{name}' holds {} value '{value}', expected {expected}",
                value.type_name()
            ))
        })
    }
}

fn required<T>(name: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::mapping(format!("Column '{name}' is NULL but required")))
}
