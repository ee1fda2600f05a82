//! Declared type hints for container fields.

use super::{Int, IntKind, Map, Real, RealKind, Record, Value};
use serde::{Deserialize, Serialize};

/// Declared type of a field.
///
/// The engine only needs it to know what to instantiate when the user asks
/// for a new list item, so the record variant carries a prototype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum Annotation {
    Bool,
    Int(IntKind),
    Real(RealKind),
    Text,
    Tuple(Vec<Annotation>),
    List(Box<Annotation>),
    Map,
    Record(Box<Record>),
}

impl Annotation {
    /// `List` of the given element type.
    pub fn list_of(element: Annotation) -> Self {
        Self::List(Box::new(element))
    }

    /// Element type of a list annotation.
    pub fn element(&self) -> Option<&Annotation> {
        match self {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    /// Default instance of the declared type.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int(kind) => Value::Int(Int::new(0, *kind)),
            Self::Real(kind) => Value::Real(Real::new(0.0, *kind)),
            Self::Text => Value::Text(String::new()),
            Self::Tuple(items) => Value::Tuple(items.iter().map(Self::default_value).collect()),
            Self::List(_) => Value::List(Vec::new()),
            Self::Map => Value::Map(Map::new()),
            Self::Record(prototype) => Value::Record(prototype.as_ref().clone()),
        }
    }
}
