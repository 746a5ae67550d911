//! Value → bytes: a single append pass over the layout.

use byteorder::{BigEndian, ByteOrder};

use super::error::{LayoutError, LayoutResult};
use super::value::Value;
use super::{Encoding, Layout};

/// Encode `value` against `layout` into a fresh buffer.
///
/// Fails with [`LayoutError::ValueOutOfRange`] when an integer does not
/// fit its declared width, [`LayoutError::SizeMismatch`] when a
/// fixed-size byte field is given wrong-length bytes, and a shape error
/// when the value does not match the layout's structure.
pub fn serialize_layout(layout: &Layout, value: &Value) -> LayoutResult<Vec<u8>> {
    let mut out = Vec::with_capacity(layout.static_size().unwrap_or(64));
    write_layout(layout, value, &mut out)?;
    Ok(out)
}

fn write_layout(layout: &Layout, value: &Value, out: &mut Vec<u8>) -> LayoutResult<()> {
    match layout {
        Layout::Item(encoding) => write_encoding(encoding, value, out),
        Layout::Record(fields) => {
            let entries = value.as_record()?;
            for field in fields {
                // Reserved fields encode their fixed pattern, never data.
                if let Some(pattern) = &field.reserved {
                    out.extend_from_slice(pattern);
                    continue;
                }
                let field_value = entries
                    .iter()
                    .find(|(name, _)| *name == field.name)
                    .map(|(_, v)| v)
                    .ok_or(LayoutError::MissingField { name: field.name })?;
                write_encoding(&field.encoding, field_value, out)?;
            }
            Ok(())
        }
    }
}

fn write_encoding(encoding: &Encoding, value: &Value, out: &mut Vec<u8>) -> LayoutResult<()> {
    match encoding {
        Encoding::Uint { width } => write_uint(value.as_uint()?, *width, out),
        Encoding::Bytes { size } => {
            let bytes = value.as_bytes()?;
            if let Some(expected) = size {
                if bytes.len() != *expected {
                    return Err(LayoutError::SizeMismatch {
                        expected: *expected,
                        got: bytes.len(),
                    });
                }
            }
            out.extend_from_slice(bytes);
            Ok(())
        }
        Encoding::Array {
            count_width,
            element,
        } => {
            let elements = value.as_array()?;
            write_uint(elements.len() as u64, *count_width, out)?;
            for element_value in elements {
                write_layout(element, element_value, out)?;
            }
            Ok(())
        }
        Encoding::LengthPrefixed { inner } => {
            let body = serialize_layout(inner, value)?;
            write_uint(body.len() as u64, 1, out)?;
            out.extend_from_slice(&body);
            Ok(())
        }
        Encoding::Switch { tag_width, cases } => {
            let (name, case_value) = value.as_tagged()?;
            let case = cases
                .iter()
                .find(|c| c.name == name)
                .ok_or(LayoutError::UnknownCase { name })?;
            write_uint(case.id, *tag_width, out)?;
            write_layout(&case.layout, case_value, out)
        }
    }
}

fn write_uint(value: u64, width: usize, out: &mut Vec<u8>) -> LayoutResult<()> {
    if width < 8 && value >> (width * 8) != 0 {
        return Err(LayoutError::ValueOutOfRange { value, width });
    }
    let mut buf = [0u8; 8];
    BigEndian::write_uint(&mut buf[..width], value, width);
    out.extend_from_slice(&buf[..width]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Field;

    #[test]
    fn uint_big_endian_and_range() {
        let layout = Layout::item(Encoding::Uint { width: 3 });
        assert_eq!(
            serialize_layout(&layout, &Value::Uint(0x01_02_03)).unwrap(),
            vec![0x01, 0x02, 0x03]
        );
        assert_eq!(
            serialize_layout(&layout, &Value::Uint(0x01_00_00_00)).unwrap_err(),
            LayoutError::ValueOutOfRange {
                value: 0x01_00_00_00,
                width: 3
            }
        );
    }

    #[test]
    fn full_width_uint_needs_no_range_check() {
        let layout = Layout::item(Encoding::Uint { width: 8 });
        assert_eq!(
            serialize_layout(&layout, &Value::Uint(u64::MAX)).unwrap(),
            vec![0xFF; 8]
        );
    }

    #[test]
    fn fixed_bytes_size_mismatch() {
        let layout = Layout::item(Encoding::Bytes { size: Some(4) });
        assert_eq!(
            serialize_layout(&layout, &Value::Bytes(vec![1, 2, 3])).unwrap_err(),
            LayoutError::SizeMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn reserved_fields_emit_pattern_without_value() {
        let layout = Layout::record(vec![
            Field::new("a", Encoding::Uint { width: 1 }),
            Field::padding(3),
            Field::new("b", Encoding::Uint { width: 1 }),
        ]);
        let value = Value::Record(vec![("a", Value::Uint(0xAA)), ("b", Value::Uint(0xBB))]);
        assert_eq!(
            serialize_layout(&layout, &value).unwrap(),
            vec![0xAA, 0, 0, 0, 0xBB]
        );
    }

    #[test]
    fn missing_record_field() {
        let layout = Layout::record(vec![Field::new("a", Encoding::Uint { width: 1 })]);
        assert_eq!(
            serialize_layout(&layout, &Value::Record(vec![])).unwrap_err(),
            LayoutError::MissingField { name: "a" }
        );
    }

    #[test]
    fn unknown_switch_case() {
        let layout = Layout::item(Encoding::Switch {
            tag_width: 1,
            cases: vec![crate::layout::SwitchCase {
                id: 0,
                name: "only",
                layout: Layout::item(Encoding::Uint { width: 1 }),
            }],
        });
        assert_eq!(
            serialize_layout(&layout, &Value::tagged("other", Value::Uint(1))).unwrap_err(),
            LayoutError::UnknownCase { name: "other" }
        );
    }

    #[test]
    fn length_prefix_rejects_oversized_body() {
        let layout = Layout::item(Encoding::LengthPrefixed {
            inner: Box::new(Layout::item(Encoding::Bytes { size: None })),
        });
        let body = vec![0u8; 256];
        assert_eq!(
            serialize_layout(&layout, &Value::Bytes(body)).unwrap_err(),
            LayoutError::ValueOutOfRange {
                value: 256,
                width: 1
            }
        );
    }
}
