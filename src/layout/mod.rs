//! # Declarative Layout Engine
//!
//! ## Purpose
//!
//! Compiles an ordered, named field-list description of a byte structure
//! into a bidirectional codec: encode turns a [`Value`] into big-endian
//! wire bytes, decode walks the bytes back into a [`Value`] and fails on
//! any malformed or inconsistent input. Layouts compose recursively and
//! support fixed-width integers, raw byte blocks, count-prefixed arrays,
//! length-prefixed nested sub-layouts, and discriminator-keyed tagged
//! unions.
//!
//! ## Architecture Role
//!
//! ```text
//! Domain Types → [convert] → Value → [ser/de] → Wire Bytes
//!      ↑            ↓          ↓         ↓           ↓
//!  Typed Records  Reshape   Structural  Layout    Big-Endian
//!  Validation     to/from   Shape       Walk      Frames
//! ```
//!
//! Schemas are built once at process start and never mutated afterwards;
//! encode/decode are pure and safe for unsynchronized concurrent use.
//! Construction-time violations (bad integer widths, duplicate field
//! names, duplicate switch ids) are programming errors and panic.

mod de;
mod error;
mod ser;
mod value;

pub mod convert;

pub use convert::{deserialize_with, serialize_with, Convert};
pub use de::deserialize_layout;
pub use error::{LayoutError, LayoutResult};
pub use ser::serialize_layout;
pub use value::Value;

/// Wire encoding of a single layout item.
#[derive(Debug, Clone)]
pub enum Encoding {
    /// Unsigned big-endian integer occupying `width` bytes (1..=8).
    Uint { width: usize },
    /// Raw byte block. `size: None` means the wrapping context delimits
    /// the block (a length prefix or the end of the buffer).
    Bytes { size: Option<usize> },
    /// `count_width`-byte element count followed by that many elements.
    Array {
        count_width: usize,
        element: Box<Layout>,
    },
    /// 1-byte byte-count prefix wrapping a self-contained sub-layout
    /// encoding. The inner decode sees exactly the prefixed slice and
    /// must consume it fully; bytes beyond the slice are untouched.
    LengthPrefixed { inner: Box<Layout> },
    /// Discriminator-first tagged union: a `tag_width`-byte id selects
    /// the case whose payload layout follows.
    Switch {
        tag_width: usize,
        cases: Vec<SwitchCase>,
    },
}

/// One case of a [`Encoding::Switch`] table. Ids need not be contiguous
/// but must be unique, as must names.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub id: u64,
    pub name: &'static str,
    pub layout: Layout,
}

/// One named field of a record layout.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub encoding: Encoding,
    /// `Some(pattern)` marks a reserved field: `pattern` is emitted
    /// verbatim on encode, skipped on decode, and never surfaced in the
    /// decoded value.
    pub reserved: Option<Vec<u8>>,
}

impl Field {
    pub fn new(name: &'static str, encoding: Encoding) -> Self {
        Field {
            name,
            encoding,
            reserved: None,
        }
    }

    /// A reserved zero-filled padding field of `len` bytes.
    pub fn padding(len: usize) -> Self {
        Field {
            name: "reserved",
            encoding: Encoding::Bytes { size: Some(len) },
            reserved: Some(vec![0u8; len]),
        }
    }
}

/// A compiled byte-structure description: either an ordered record of
/// named fields or a single bare item.
#[derive(Debug, Clone)]
pub enum Layout {
    Record(Vec<Field>),
    Item(Encoding),
}

impl Layout {
    /// Build a record layout, panicking on duplicate field names or
    /// invalid encodings. Schemas are process-start constants; a bad
    /// schema is a programming error, not a runtime condition.
    pub fn record(fields: Vec<Field>) -> Self {
        for (i, field) in fields.iter().enumerate() {
            assert!(
                !fields[..i].iter().any(|f| f.name == field.name),
                "duplicate field name {:?} in record layout",
                field.name
            );
            validate_encoding(&field.encoding);
        }
        Layout::Record(fields)
    }

    /// Build a single-item layout.
    pub fn item(encoding: Encoding) -> Self {
        validate_encoding(&encoding);
        Layout::Item(encoding)
    }

    /// Size of the encoded layout when every contained field has a
    /// statically known size, else `None`. Computed once at schema
    /// construction (e.g. to size padding), never per encode/decode call.
    pub fn static_size(&self) -> Option<usize> {
        match self {
            Layout::Item(encoding) => encoding.static_size(),
            Layout::Record(fields) => {
                let mut total = 0;
                for field in fields {
                    total += match &field.reserved {
                        Some(pattern) => pattern.len(),
                        None => field.encoding.static_size()?,
                    };
                }
                Some(total)
            }
        }
    }
}

impl Encoding {
    fn static_size(&self) -> Option<usize> {
        match self {
            Encoding::Uint { width } => Some(*width),
            Encoding::Bytes { size } => *size,
            Encoding::Array { .. } | Encoding::LengthPrefixed { .. } => None,
            // A switch is static only when every case payload agrees.
            Encoding::Switch { tag_width, cases } => {
                let mut sizes = cases.iter().map(|c| c.layout.static_size());
                let first = sizes.next()??;
                sizes
                    .all(|s| s == Some(first))
                    .then_some(tag_width + first)
            }
        }
    }
}

fn validate_encoding(encoding: &Encoding) {
    match encoding {
        Encoding::Uint { width } => {
            assert!(
                (1..=8).contains(width),
                "uint width must be 1..=8 bytes, got {width}"
            );
        }
        Encoding::Bytes { .. } => {}
        Encoding::Array { count_width, .. } => {
            assert!(
                (1..=8).contains(count_width),
                "array count width must be 1..=8 bytes, got {count_width}"
            );
        }
        Encoding::LengthPrefixed { .. } => {}
        Encoding::Switch { tag_width, cases } => {
            assert!(
                (1..=8).contains(tag_width),
                "switch tag width must be 1..=8 bytes, got {tag_width}"
            );
            for (i, case) in cases.iter().enumerate() {
                assert!(
                    !cases[..i].iter().any(|c| c.id == case.id),
                    "duplicate switch id {} (case {:?})",
                    case.id,
                    case.name
                );
                assert!(
                    !cases[..i].iter().any(|c| c.name == case.name),
                    "duplicate switch case name {:?}",
                    case.name
                );
            }
        }
    }
}
