use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One logical record: column name → scalar value.
///
/// Rows are deliberately untyped; the backend tolerates extra or missing
/// keys and the registry only constrains how empty results look.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.0.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text for a cell; missing and null both render empty.
    pub fn text(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Parse a JSON document that must be a single object.
    pub fn from_json(text: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::InvalidRowShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Whatever a caller hands to `append`. Only a single mapping is a valid row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPayload {
    Single(Row),
    Many(Vec<Row>),
    Invalid(Value),
}

impl RowPayload {
    pub fn describe(&self) -> String {
        match self {
            RowPayload::Single(_) => "object".to_string(),
            RowPayload::Many(rows) => format!("list of {} rows", rows.len()),
            RowPayload::Invalid(v) => json_kind(v).to_string(),
        }
    }
}

impl From<Row> for RowPayload {
    fn from(row: Row) -> Self {
        RowPayload::Single(row)
    }
}

impl From<Vec<Row>> for RowPayload {
    fn from(rows: Vec<Row>) -> Self {
        RowPayload::Many(rows)
    }
}

impl From<Value> for RowPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RowPayload::Single(Row(map)),
            Value::Array(items) if items.iter().all(Value::is_object) => RowPayload::Many(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::Object(map) => Some(Row(map)),
                        _ => None,
                    })
                    .collect(),
            ),
            other => RowPayload::Invalid(other),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
