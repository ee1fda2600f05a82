//! Dense multi-dimensional numeric arrays.

use super::{Int, IntKind, Real, RealKind, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backing storage of an [`NdArray`], row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", rename_all = "snake_case")]
pub enum ArrayData {
    Bool { values: Vec<bool> },
    Int { values: Vec<i64>, kind: IntKind },
    Real { values: Vec<f64>, kind: RealKind },
}

impl ArrayData {
    fn len(&self) -> usize {
        match self {
            Self::Bool { values } => values.len(),
            Self::Int { values, .. } => values.len(),
            Self::Real { values, .. } => values.len(),
        }
    }

    fn cell(&self, offset: usize) -> Option<Value> {
        match self {
            Self::Bool { values } => values.get(offset).copied().map(Value::Bool),
            Self::Int { values, kind } => values
                .get(offset)
                .map(|v| Value::Int(Int { value: *v, kind: *kind })),
            Self::Real { values, kind } => values
                .get(offset)
                .map(|v| Value::Real(Real { value: *v, kind: *kind })),
        }
    }
}

/// Shape and data length disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape {shape:?} needs {expected} elements, got {actual}")]
pub struct ShapeError {
    pub shape: Vec<usize>,
    pub expected: usize,
    pub actual: usize,
}

/// Multi-dimensional numeric array with multi-index read/write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl NdArray {
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Result<Self, ShapeError> {
        let expected = shape.iter().product::<usize>();
        let actual = data.len();
        if expected != actual {
            return Err(ShapeError {
                shape,
                expected,
                actual,
            });
        }
        Ok(Self { shape, data })
    }

    pub fn from_reals(shape: Vec<usize>, values: Vec<f64>) -> Result<Self, ShapeError> {
        Self::new(
            shape,
            ArrayData::Real {
                values,
                kind: RealKind::F64,
            },
        )
    }

    pub fn from_ints(shape: Vec<usize>, values: Vec<i64>) -> Result<Self, ShapeError> {
        Self::new(
            shape,
            ArrayData::Int {
                values,
                kind: IntKind::I64,
            },
        )
    }

    pub fn from_bools(shape: Vec<usize>, values: Vec<bool>) -> Result<Self, ShapeError> {
        Self::new(shape, ArrayData::Bool { values })
    }

    /// Zero-filled `f64` array.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: ArrayData::Real {
                values: vec![0.0; len],
                kind: RealKind::F64,
            },
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Shape left after removing the axes fixed by `fixed` leading indices.
    pub fn residual_shape(&self, fixed: &[usize]) -> &[usize] {
        &self.shape[fixed.len().min(self.shape.len())..]
    }

    fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (i, dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        Some(offset)
    }

    /// Read the cell at a full coordinate.
    pub fn get(&self, index: &[usize]) -> Option<Value> {
        self.offset(index).and_then(|o| self.data.cell(o))
    }

    /// Write a scalar at a full coordinate, casting it into the element
    /// type. Returns `false` for an invalid coordinate or a non-scalar.
    pub fn set(&mut self, index: &[usize], value: &Value) -> bool {
        let Some(offset) = self.offset(index) else {
            return false;
        };
        match (&mut self.data, value) {
            (ArrayData::Bool { values }, Value::Bool(b)) => values[offset] = *b,
            (ArrayData::Int { values, kind }, Value::Int(i)) => values[offset] = kind.cast(i.value),
            (ArrayData::Real { values, kind }, Value::Real(r)) => {
                values[offset] = kind.cast(r.value)
            }
            (ArrayData::Real { values, kind }, Value::Int(i)) => {
                values[offset] = kind.cast(i.value as f64)
            }
            _ => return false,
        }
        true
    }

    /// Read-through copy of the block below `fixed` leading indices, in
    /// row-major order. One bulk read instead of one lookup per cell.
    pub fn view(&self, fixed: &[usize]) -> Vec<Value> {
        if fixed.len() > self.shape.len() || fixed.iter().zip(&self.shape).any(|(i, d)| i >= d) {
            return Vec::new();
        }
        let block: usize = self.residual_shape(fixed).iter().product();
        let mut start = 0;
        for (i, dim) in fixed.iter().zip(&self.shape) {
            start = start * dim + i;
        }
        let start = start * block;
        (start..start + block)
            .filter_map(|o| self.data.cell(o))
            .collect()
    }
}
