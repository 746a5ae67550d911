//! Custom-conversion seam between structural values and domain types.
//!
//! A [`Convert`] implementation pairs `to_domain` (raw → domain, applied
//! after structural decode) with `from_domain` (domain → raw, applied
//! before structural encode). The two must be mutual inverses over the
//! valid-domain subset; `to_domain` is where cross-field invariants are
//! enforced and context-dependent sub-layouts are resolved.

use super::error::LayoutError;
use super::value::Value;
use super::{deserialize_layout, serialize_layout, Layout};

/// A bidirectional reshaping/validation transform around a structural
/// codec.
pub trait Convert {
    /// The richer type exposed to callers.
    type Domain;
    /// Conversion failures; structural failures convert in via `From`.
    type Error: From<LayoutError>;

    fn to_domain(raw: Value) -> Result<Self::Domain, Self::Error>;
    fn from_domain(domain: &Self::Domain) -> Result<Value, Self::Error>;
}

/// Encode a domain value: `from_domain`, then the structural codec.
pub fn serialize_with<C: Convert>(
    layout: &Layout,
    domain: &C::Domain,
) -> Result<Vec<u8>, C::Error> {
    let raw = C::from_domain(domain)?;
    Ok(serialize_layout(layout, &raw)?)
}

/// Decode a domain value: the structural codec, then `to_domain`.
pub fn deserialize_with<C: Convert>(layout: &Layout, data: &[u8]) -> Result<C::Domain, C::Error> {
    C::to_domain(deserialize_layout(layout, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Encoding;

    struct Celsius;

    impl Convert for Celsius {
        type Domain = i16;
        type Error = LayoutError;

        // Wire carries the temperature shifted by 100 so it encodes as
        // an unsigned byte.
        fn to_domain(raw: Value) -> Result<i16, LayoutError> {
            Ok(raw.as_uint()? as i16 - 100)
        }

        fn from_domain(domain: &i16) -> Result<Value, LayoutError> {
            let shifted = domain + 100;
            if !(0..=255).contains(&shifted) {
                return Err(LayoutError::ValueOutOfRange {
                    value: *domain as u64,
                    width: 1,
                });
            }
            Ok(Value::Uint(shifted as u64))
        }
    }

    #[test]
    fn conversion_round_trip() {
        let layout = Layout::item(Encoding::Uint { width: 1 });
        let bytes = serialize_with::<Celsius>(&layout, &-40).unwrap();
        assert_eq!(bytes, vec![60]);
        assert_eq!(deserialize_with::<Celsius>(&layout, &bytes).unwrap(), -40);
    }

    #[test]
    fn conversion_failure_propagates() {
        let layout = Layout::item(Encoding::Uint { width: 1 });
        assert!(serialize_with::<Celsius>(&layout, &500).is_err());
    }
}
