//! Bytes → value: cursor-based decode with offset-carrying errors.
//!
//! The reader walks the buffer field by field, each prior field
//! determining the offset of the next. Truncation and unknown
//! discriminators report the offset at which they were detected, in the
//! style of a transport parser rejecting a malformed frame.

use byteorder::{BigEndian, ByteOrder};

use super::error::{LayoutError, LayoutResult};
use super::value::Value;
use super::{Encoding, Layout};

/// Decode `data` against `layout`, requiring the layout to consume the
/// buffer exactly. Trailing bytes fail with [`LayoutError::TrailingBytes`].
pub fn deserialize_layout(layout: &Layout, data: &[u8]) -> LayoutResult<Value> {
    let mut reader = Reader::new(data);
    let value = read_layout(layout, &mut reader)?;
    reader.finish()?;
    Ok(value)
}

struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    fn take(&mut self, need: usize) -> LayoutResult<&'a [u8]> {
        if self.remaining() < need {
            return Err(LayoutError::TruncatedInput {
                need,
                got: self.remaining(),
                offset: self.offset,
            });
        }
        let slice = &self.buf[self.offset..self.offset + need];
        self.offset += need;
        Ok(slice)
    }

    fn read_uint(&mut self, width: usize) -> LayoutResult<u64> {
        let bytes = self.take(width)?;
        Ok(BigEndian::read_uint(bytes, width))
    }

    fn finish(&self) -> LayoutResult<()> {
        if self.remaining() > 0 {
            return Err(LayoutError::TrailingBytes {
                offset: self.offset,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

fn read_layout(layout: &Layout, reader: &mut Reader<'_>) -> LayoutResult<Value> {
    match layout {
        Layout::Item(encoding) => read_encoding(encoding, reader),
        Layout::Record(fields) => {
            let mut entries = Vec::with_capacity(fields.len());
            for field in fields {
                // Reserved bytes are consumed but not surfaced.
                if let Some(pattern) = &field.reserved {
                    reader.take(pattern.len())?;
                    continue;
                }
                entries.push((field.name, read_encoding(&field.encoding, reader)?));
            }
            Ok(Value::Record(entries))
        }
    }
}

fn read_encoding(encoding: &Encoding, reader: &mut Reader<'_>) -> LayoutResult<Value> {
    match encoding {
        Encoding::Uint { width } => Ok(Value::Uint(reader.read_uint(*width)?)),
        Encoding::Bytes { size } => {
            let bytes = match size {
                Some(n) => reader.take(*n)?,
                None => reader.take(reader.remaining())?,
            };
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Encoding::Array {
            count_width,
            element,
        } => {
            let count = reader.read_uint(*count_width)?;
            let mut elements = Vec::new();
            for _ in 0..count {
                elements.push(read_layout(element, reader)?);
            }
            Ok(Value::Array(elements))
        }
        Encoding::LengthPrefixed { inner } => {
            let len = reader.read_uint(1)? as usize;
            let body = reader.take(len)?;
            // The inner layout decodes against exactly the prefixed
            // slice; bytes past it belong to the outer structure.
            deserialize_layout(inner, body)
        }
        Encoding::Switch { tag_width, cases } => {
            let tag_offset = reader.offset;
            let id = reader.read_uint(*tag_width)?;
            let case = cases
                .iter()
                .find(|c| c.id == id)
                .ok_or(LayoutError::UnknownDiscriminator {
                    id,
                    offset: tag_offset,
                })?;
            let payload = read_layout(&case.layout, reader)?;
            Ok(Value::tagged(case.name, payload))
        }
    }
}
