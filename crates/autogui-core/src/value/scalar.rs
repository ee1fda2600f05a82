//! Numeric scalars that remember their concrete subtype.

use serde::{Deserialize, Serialize};

/// Concrete integer subtype of an [`Int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntKind {
    I8,
    I16,
    I32,
    #[default]
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    /// Inclusive range representable by this subtype (clamped to `i64`).
    pub const fn range(self) -> (i64, i64) {
        match self {
            Self::I8 => (i8::MIN as i64, i8::MAX as i64),
            Self::I16 => (i16::MIN as i64, i16::MAX as i64),
            Self::I32 => (i32::MIN as i64, i32::MAX as i64),
            Self::I64 => (i64::MIN, i64::MAX),
            Self::U8 => (0, u8::MAX as i64),
            Self::U16 => (0, u16::MAX as i64),
            Self::U32 => (0, u32::MAX as i64),
            Self::U64 => (0, i64::MAX),
        }
    }

    /// Cast an edited value back into this subtype.
    pub fn cast(self, value: i64) -> i64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

/// Integral scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Int {
    pub value: i64,
    pub kind: IntKind,
}

impl Int {
    pub fn new(value: i64, kind: IntKind) -> Self {
        Self {
            value: kind.cast(value),
            kind,
        }
    }
}

/// Concrete floating point subtype of a [`Real`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealKind {
    F32,
    #[default]
    F64,
}

impl RealKind {
    /// Cast an edited value back into this subtype.
    pub fn cast(self, value: f64) -> f64 {
        match self {
            Self::F32 => f64::from(value as f32),
            Self::F64 => value,
        }
    }
}

/// Real scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Real {
    pub value: f64,
    pub kind: RealKind,
}

impl Real {
    pub fn new(value: f64, kind: RealKind) -> Self {
        Self {
            value: kind.cast(value),
            kind,
        }
    }
}
