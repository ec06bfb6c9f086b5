//! Raw row model shared by the row store and the entity assemblers.
//!
//! A stored row is an ordered tuple: primary key first, then the remaining
//! columns in the entity's declared field order. Scalars are loosely typed;
//! the assemblers are responsible for interpreting them, and any
//! interpretation failure marks the whole row as malformed.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Primary-key value. Most entities use store-generated integer keys;
/// vehicles are keyed by their natural plate string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Map an optional scalar to its column value, `None` becoming SQL NULL.
    pub fn opt<T: Into<Value>>(value: Option<T>) -> Value {
        value.map(Into::into).unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// ISO calendar date stored as text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_text().and_then(|s| s.parse::<NaiveDate>().ok())
    }

    /// Monetary amount: canonical decimal text, or a numeric column.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Text(s) => s.parse::<Decimal>().ok(),
            Value::Real(f) => Decimal::from_f64(*f),
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Null => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Text(d.format("%Y-%m-%d").to_string())
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Text(d.to_string())
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Int(n) => Value::Int(n),
            Key::Text(s) => Value::Text(s),
        }
    }
}

/// A full stored row: primary key first, then declared columns.
pub type Row = Vec<Value>;

/// Nullable integer column: outer `None` means malformed, inner `None` means NULL.
pub fn nullable_int(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        other => other.as_int().map(Some),
    }
}

/// Nullable text column, same convention as [`nullable_int`].
pub fn nullable_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        other => other.as_text().map(|s| Some(s.to_string())),
    }
}

/// Static description of an entity table: name, key column, and the
/// remaining columns in declared order.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub key_column: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// Position of a column within a stored row (key column is 0).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        if name == self.key_column {
            return Some(0);
        }
        self.columns.iter().position(|c| *c == name).map(|i| i + 1)
    }

    /// Number of values a well-formed row carries (key included).
    pub fn width(&self) -> usize {
        self.columns.len() + 1
    }
}

#[derive(Debug, Clone)]
enum FilterOp {
    Eq(Value),
    Contains(String),
}

/// Single-column row predicate used by `list_where`.
#[derive(Debug, Clone)]
pub struct Filter {
    column: &'static str,
    op: FilterOp,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter {
            column,
            op: FilterOp::Eq(value.into()),
        }
    }

    /// Case-insensitive substring match on a text column.
    pub fn contains(column: &'static str, needle: impl Into<String>) -> Self {
        Filter {
            column,
            op: FilterOp::Contains(needle.into()),
        }
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Evaluate the predicate against a row laid out per `spec`.
    pub fn matches(&self, spec: &TableSpec, row: &Row) -> bool {
        let Some(index) = spec.column_index(self.column) else {
            return false;
        };
        let Some(value) = row.get(index) else {
            return false;
        };
        match &self.op {
            FilterOp::Eq(expected) => value == expected,
            FilterOp::Contains(needle) => value
                .as_text()
                .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────
