//! The runtime value model rendered by the engine.
//!
//! Every datum the engine can visit is a [`Value`]. Containers own their
//! children, so `Clone` produces an independent deep copy (used for history
//! snapshots and the list "Duplicate" action).

mod annotation;
mod array;
mod map;
mod record;
mod scalar;

pub use annotation::Annotation;
pub use array::{ArrayData, NdArray, ShapeError};
pub use map::Map;
pub use record::{Field, Fields, Record};
pub use scalar::{Int, IntKind, Real, RealKind};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Any runtime datum being rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(Int),
    Real(Real),
    Text(String),
    /// Fixed-arity sequence; elements can be edited but not added or removed.
    Tuple(Vec<Value>),
    /// Variable-length sequence.
    List(Vec<Value>),
    Map(Map),
    Array(NdArray),
    Record(Record),
}

/// Discriminant of a [`Value`], used for the parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Real,
    Text,
    Tuple,
    List,
    Map,
    Array,
    Record,
}

impl Value {
    pub fn int(value: i64) -> Self {
        Self::Int(Int::new(value, IntKind::I64))
    }

    pub fn real(value: f64) -> Self {
        Self::Real(Real::new(value, RealKind::F64))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Real(_) => ValueKind::Real,
            Self::Text(_) => ValueKind::Text,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Array(_) => ValueKind::Array,
            Self::Record(_) => ValueKind::Record,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i.value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(r.value),
            Self::Int(i) => Some(i.value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Human-readable hint used in element labels: the value of a `name`
    /// text field, if the value has one.
    pub fn name_hint(&self) -> Option<&str> {
        match self {
            Self::Record(r) => r.get("name").and_then(Value::as_str),
            Self::Map(m) => m.get("name").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Shape of an array value.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Array(a) => Some(a.shape()),
            _ => None,
        }
    }
}

/// Short single-line summary, used for combo box entries and placeholders.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{}", i.value),
            Self::Real(r) => write!(f, "{}", r.value),
            Self::Text(s) => f.write_str(s),
            Self::Tuple(items) => write!(f, "({} items)", items.len()),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(m) => write!(f, "{{{} keys}}", m.len()),
            Self::Array(a) => write!(f, "array{:?}", a.shape()),
            Self::Record(r) => f.write_str(r.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(Int::new(i64::from(value), IntKind::I32))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Int(Int::new(i64::from(value), IntKind::U8))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(Int::new(
            i64::try_from(value).unwrap_or(i64::MAX),
            IntKind::U64,
        ))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::real(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Real(Real::new(f64::from(value), RealKind::F32))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<NdArray> for Value {
    fn from(array: NdArray) -> Self {
        Self::Array(array)
    }
}
