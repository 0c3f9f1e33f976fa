//! Typed scalars that travel between the seed manifests, the store and the
//! screens. SQLite is dynamically typed, so the enum mirrors its storage
//! classes plus a boolean that is persisted as `"True"` / `"False"` text.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// One ordered tuple of scalars, projected in the column order of the query.
pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Blob(Vec<u8>),
}

const TRUE_TEXT: &str = "True";
const FALSE_TEXT: &str = "False";

impl Value {
    /// Convert one raw manifest field into a typed scalar. Rules are tried in
    /// order: single-quoted text, boolean literal, real (contains a dot),
    /// integer (all ASCII digits), plain text. A field that looks numeric but
    /// does not parse stays text.
    pub fn parse_scalar(raw: &str) -> Value {
        if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
            return Value::Text(raw[1..raw.len() - 1].to_string());
        }
        if raw == TRUE_TEXT {
            return Value::Bool(true);
        }
        if raw == FALSE_TEXT {
            return Value::Bool(false);
        }
        if raw.contains('.') {
            return raw
                .parse::<f64>()
                .map(Value::Real)
                .unwrap_or_else(|_| Value::Text(raw.to_string()));
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(raw.to_string()));
        }
        Value::Text(raw.to_string())
    }

    /// Split a manifest value list on `", "` and convert every field.
    pub fn parse_list(raw: &str) -> Vec<Value> {
        raw.split(", ").map(Value::parse_scalar).collect()
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Booleans come back from SQLite as text; accept both shapes.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Text(v) if v == TRUE_TEXT => Some(true),
            Value::Text(v) if v == FALSE_TEXT => Some(false),
            Value::Integer(v) => Some(*v != 0),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Bool(true) => f.write_str(TRUE_TEXT),
            Value::Bool(false) => f.write_str(FALSE_TEXT),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Real(v) => ToSqlOutput::from(*v),
            Value::Text(v) => ToSqlOutput::from(v.as_str()),
            Value::Bool(true) => ToSqlOutput::from(TRUE_TEXT),
            Value::Bool(false) => ToSqlOutput::from(FALSE_TEXT),
            Value::Blob(v) => ToSqlOutput::from(v.as_slice()),
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        })
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::approx_constant)]
    fn parses_manifest_fields_by_shape() {
        assert_eq!(Value::parse_scalar("3.14"), Value::Real(3.14));
        assert_eq!(Value::parse_scalar("42"), Value::Integer(42));
        assert_eq!(Value::parse_scalar("'42'"), Value::Text("42".into()));
        assert_eq!(Value::parse_scalar("True"), Value::Bool(true));
        assert_eq!(Value::parse_scalar("False"), Value::Bool(false));
        assert_eq!(Value::parse_scalar("hello"), Value::Text("hello".into()));
    }

    #[test]
    fn quoted_text_keeps_inner_quotes() {
        assert_eq!(
            Value::parse_scalar("'O'Neill'"),
            Value::Text("O'Neill".into())
        );
        assert_eq!(Value::parse_scalar("''"), Value::Text(String::new()));
        assert_eq!(Value::parse_scalar("'"), Value::Text("'".into()));
    }

    #[test]
    fn unparseable_numbers_stay_text() {
        assert_eq!(Value::parse_scalar("v1.2.3"), Value::Text("v1.2.3".into()));
        assert_eq!(
            Value::parse_scalar("99999999999999999999"),
            Value::Text("99999999999999999999".into())
        );
        assert_eq!(Value::parse_scalar(""), Value::Text(String::new()));
        assert_eq!(Value::parse_scalar("-3"), Value::Text("-3".into()));
    }

    #[test]
    fn splits_value_lists_on_comma_space() {
        assert_eq!(
            Value::parse_list("1, 'Rossi', 7.5, True"),
            vec![
                Value::Integer(1),
                Value::Text("Rossi".into()),
                Value::Real(7.5),
                Value::Bool(true),
            ]
        );
    }

    #[test]
    fn bool_reads_back_from_text() {
        assert_eq!(Value::Text("True".into()).as_bool(), Some(true));
        assert_eq!(Value::Text("False".into()).as_bool(), Some(false));
        assert_eq!(Value::Text("maybe".into()).as_bool(), None);
    }
}
