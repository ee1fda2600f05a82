//! User-defined records and the uniform field accessor.

use super::{Annotation, Value};
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Uniform get/set-by-key access shared by records and maps.
///
/// The engine renders a field by checking it out, rendering the detached
/// value, and writing it back. A rejected write-back is not an error for
/// the engine; it is how read-only (computed) fields stay untouched.
pub trait Fields {
    /// Field names in display order.
    fn keys(&self) -> Vec<String>;

    /// Declared type of a field, if any.
    fn annotation(&self, _key: &str) -> Option<&Annotation> {
        None
    }

    /// Detach a field for rendering. Writable fields are moved out,
    /// read-only fields are copied.
    fn checkout(&mut self, key: &str) -> Option<Value>;

    /// Store a rendered field value.
    fn write_back(&mut self, key: &str, value: Value) -> Result<(), FieldError>;
}

/// One named slot of a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

/// A user-defined object: a type name plus an ordered set of fields.
///
/// The type name is what custom render hooks are registered against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    type_name: String,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder: add a writable field.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Field {
            name: name.into(),
            value: value.into(),
            annotation: None,
            read_only: false,
        });
        self
    }

    /// Builder: add a writable field with a declared type.
    pub fn with_annotated(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        annotation: Annotation,
    ) -> Self {
        self.push(Field {
            name: name.into(),
            value: value.into(),
            annotation: Some(annotation),
            read_only: false,
        });
        self
    }

    /// Builder: add a read-only field.
    pub fn with_read_only(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Field {
            name: name.into(),
            value: value.into(),
            annotation: None,
            read_only: true,
        });
        self
    }

    /// Add or replace a field.
    pub fn push(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|f| &f.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set a field value, honoring the read-only flag.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FieldError::Missing(name.to_string()))?;
        if field.read_only {
            return Err(FieldError::ReadOnly(name.to_string()));
        }
        field.value = value;
        Ok(())
    }
}

impl Fields for Record {
    fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn annotation(&self, key: &str) -> Option<&Annotation> {
        self.field(key).and_then(|f| f.annotation.as_ref())
    }

    fn checkout(&mut self, key: &str) -> Option<Value> {
        let field = self.fields.iter_mut().find(|f| f.name == key)?;
        if field.read_only {
            Some(field.value.clone())
        } else {
            Some(std::mem::take(&mut field.value))
        }
    }

    fn write_back(&mut self, key: &str, value: Value) -> Result<(), FieldError> {
        self.set(key, value)
    }
}
