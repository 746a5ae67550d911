//! Dynamically-shaped values produced and consumed by the layout engine.
//!
//! A [`Value`] mirrors the structural shape of a layout: integers, byte
//! blocks, named records, sequences, and the active case of a tagged union.
//! Accessors return `Result` rather than panicking so shape violations
//! surface as [`LayoutError::ShapeMismatch`] at the exact seam they occur.

use super::error::LayoutError;

/// A structurally-decoded (or to-be-encoded) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Fixed-width unsigned integer, up to 8 bytes.
    Uint(u64),
    /// Raw byte block.
    Bytes(Vec<u8>),
    /// Named fields in declaration order. Omit fields never appear here.
    Record(Vec<(&'static str, Value)>),
    /// Homogeneous count-prefixed sequence.
    Array(Vec<Value>),
    /// The active case of a switch, labeled with the case name.
    Tagged {
        name: &'static str,
        value: Box<Value>,
    },
}

impl Value {
    /// Shorthand for building a tagged value without the explicit `Box`.
    pub fn tagged(name: &'static str, value: Value) -> Self {
        Value::Tagged {
            name,
            value: Box::new(value),
        }
    }

    /// Shape name used in error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::Bytes(_) => "bytes",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
            Value::Tagged { .. } => "tagged",
        }
    }

    pub fn as_uint(&self) -> Result<u64, LayoutError> {
        match self {
            Value::Uint(v) => Ok(*v),
            other => Err(other.shape_mismatch("uint")),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], LayoutError> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.shape_mismatch("bytes")),
        }
    }

    pub fn as_record(&self) -> Result<&[(&'static str, Value)], LayoutError> {
        match self {
            Value::Record(fields) => Ok(fields),
            other => Err(other.shape_mismatch("record")),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], LayoutError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.shape_mismatch("array")),
        }
    }

    pub fn as_tagged(&self) -> Result<(&'static str, &Value), LayoutError> {
        match self {
            Value::Tagged { name, value } => Ok((*name, &**value)),
            other => Err(other.shape_mismatch("tagged")),
        }
    }

    pub fn into_array(self) -> Result<Vec<Value>, LayoutError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.shape_mismatch("array")),
        }
    }

    /// Look up a record field by name.
    pub fn field(&self, name: &'static str) -> Result<&Value, LayoutError> {
        self.as_record()?
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or(LayoutError::MissingField { name })
    }

    fn shape_mismatch(&self, expected: &'static str) -> LayoutError {
        LayoutError::ShapeMismatch {
            expected,
            got: self.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_reject_wrong_shapes() {
        let v = Value::Uint(7);
        assert_eq!(v.as_uint().unwrap(), 7);
        assert_eq!(
            v.as_bytes().unwrap_err(),
            LayoutError::ShapeMismatch {
                expected: "bytes",
                got: "uint"
            }
        );
    }

    #[test]
    fn field_lookup() {
        let v = Value::Record(vec![("a", Value::Uint(1)), ("b", Value::Uint(2))]);
        assert_eq!(v.field("b").unwrap(), &Value::Uint(2));
        assert_eq!(
            v.field("c").unwrap_err(),
            LayoutError::MissingField { name: "c" }
        );
    }
}
