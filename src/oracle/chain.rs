//! Chain identifiers and their platform classification.
//!
//! The wire carries chains as big-endian `u16` registry ids. Every
//! supported chain maps to exactly one execution platform, which in turn
//! determines the shape of its fee-parameter record.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Supported chain identifiers with their wire registry ids.
#[repr(u16)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
pub enum ChainId {
    Solana = 1,
    Ethereum = 2,
}

/// Execution environment class a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Evm,
    Solana,
}

impl ChainId {
    /// Total over all supported chains.
    pub fn platform(self) -> Platform {
        match self {
            ChainId::Ethereum => Platform::Evm,
            ChainId::Solana => Platform::Solana,
        }
    }
}
