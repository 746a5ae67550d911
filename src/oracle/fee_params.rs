//! Per-platform fee-parameter records and their 32-byte slot layouts.
//!
//! Both platforms pack 14 bytes of active fields (two u32s and a u48)
//! into a fixed 32-byte slot, padded with reserved zero bytes. The slot
//! size is part of the wire contract: consumers address the record as a
//! whole or field-by-field via the scalar commands, so the full-record
//! encoding keeps a stable footprint on both platforms.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::layout::{
    deserialize_layout, serialize_layout, Encoding, Field, Layout, LayoutError, Value,
};

use super::chain::Platform;

/// Fixed allocation for an encoded fee-params record, both platforms.
pub const SLOT_SIZE: usize = 32;

/// Fee parameters for an Evm-platform chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmFeeParams {
    pub gas_price: u32,
    pub blob_base_fee: u32,
    /// u48 on the wire.
    pub gas_token_price: u64,
}

/// Fee parameters for a Solana-platform chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolanaFeeParams {
    pub solana_account_overhead: u32,
    pub solana_size_cost: u32,
    /// u48 on the wire.
    pub gas_token_price: u64,
}

/// A fee-params record of either platform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeParams {
    Evm(EvmFeeParams),
    Solana(SolanaFeeParams),
}

impl FeeParams {
    pub fn platform(&self) -> Platform {
        match self {
            FeeParams::Evm(_) => Platform::Evm,
            FeeParams::Solana(_) => Platform::Solana,
        }
    }

    /// Decode a 32-byte slot through the platform's layout into the
    /// typed record. The platform is resolved by the caller from the
    /// chain id; byte content alone cannot distinguish the shapes.
    pub(crate) fn decode_slot(platform: Platform, slot: &[u8]) -> Result<FeeParams, LayoutError> {
        let raw = deserialize_layout(slot_layout_for(platform), slot)?;
        Ok(match platform {
            Platform::Evm => FeeParams::Evm(EvmFeeParams::from_value(&raw)?),
            Platform::Solana => FeeParams::Solana(SolanaFeeParams::from_value(&raw)?),
        })
    }

    /// Encode the typed record into its 32-byte slot.
    pub(crate) fn encode_slot(&self) -> Result<Vec<u8>, LayoutError> {
        match self {
            FeeParams::Evm(params) => {
                serialize_layout(&EVM_FEE_PARAMS_LAYOUT, &params.to_value())
            }
            FeeParams::Solana(params) => {
                serialize_layout(&SOLANA_FEE_PARAMS_LAYOUT, &params.to_value())
            }
        }
    }
}

impl EvmFeeParams {
    fn to_value(&self) -> Value {
        Value::Record(vec![
            ("gasPrice", Value::Uint(u64::from(self.gas_price))),
            ("blobBaseFee", Value::Uint(u64::from(self.blob_base_fee))),
            ("gasTokenPrice", Value::Uint(self.gas_token_price)),
        ])
    }

    fn from_value(raw: &Value) -> Result<Self, LayoutError> {
        Ok(EvmFeeParams {
            gas_price: raw.field("gasPrice")?.as_uint()? as u32,
            blob_base_fee: raw.field("blobBaseFee")?.as_uint()? as u32,
            gas_token_price: raw.field("gasTokenPrice")?.as_uint()?,
        })
    }
}

impl SolanaFeeParams {
    fn to_value(&self) -> Value {
        Value::Record(vec![
            (
                "solanaAccountOverhead",
                Value::Uint(u64::from(self.solana_account_overhead)),
            ),
            (
                "solanaSizeCost",
                Value::Uint(u64::from(self.solana_size_cost)),
            ),
            ("gasTokenPrice", Value::Uint(self.gas_token_price)),
        ])
    }

    fn from_value(raw: &Value) -> Result<Self, LayoutError> {
        Ok(SolanaFeeParams {
            solana_account_overhead: raw.field("solanaAccountOverhead")?.as_uint()? as u32,
            solana_size_cost: raw.field("solanaSizeCost")?.as_uint()? as u32,
            gas_token_price: raw.field("gasTokenPrice")?.as_uint()?,
        })
    }
}

static EVM_FEE_PARAMS_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    fee_slot_layout(vec![
        Field::new("gasPrice", Encoding::Uint { width: 4 }),
        Field::new("blobBaseFee", Encoding::Uint { width: 4 }),
        Field::new("gasTokenPrice", Encoding::Uint { width: 6 }),
    ])
});

static SOLANA_FEE_PARAMS_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    fee_slot_layout(vec![
        Field::new("solanaAccountOverhead", Encoding::Uint { width: 4 }),
        Field::new("solanaSizeCost", Encoding::Uint { width: 4 }),
        Field::new("gasTokenPrice", Encoding::Uint { width: 6 }),
    ])
});

pub(crate) fn slot_layout_for(platform: Platform) -> &'static Layout {
    match platform {
        Platform::Evm => &EVM_FEE_PARAMS_LAYOUT,
        Platform::Solana => &SOLANA_FEE_PARAMS_LAYOUT,
    }
}

/// Pad the active fields out to [`SLOT_SIZE`] with a reserved zero-byte
/// tail. Panics at schema construction if the fields outgrow the slot,
/// rather than letting the padding length underflow.
fn fee_slot_layout(fields: Vec<Field>) -> Layout {
    let base = Layout::record(fields);
    let active = base
        .static_size()
        .expect("fee-params fields must be statically sized");
    assert!(
        active <= SLOT_SIZE,
        "fee-params fields ({active} bytes) exceed the {SLOT_SIZE}-byte slot"
    );
    let Layout::Record(mut fields) = base else {
        unreachable!()
    };
    if active < SLOT_SIZE {
        fields.push(Field::padding(SLOT_SIZE - active));
    }
    Layout::record(fields)
}
