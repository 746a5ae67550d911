//! Per-chain command registry.
//!
//! One discriminator per command. Tag 0 carries a full fee-params record
//! in a fixed 32-byte slot; tags 1..=5 update a single scalar so a
//! publisher never has to re-send the whole record to move one number.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use super::chain::Platform;
use super::fee_params::FeeParams;

/// Wire discriminators for the command switch.
#[repr(u8)]
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
pub enum CommandTag {
    FeeParams = 0,
    GasPrice = 1,
    BlobBaseFee = 2,
    GasTokenPrice = 3,
    SolanaAccountOverhead = 4,
    SolanaSizeCost = 5,
}

impl CommandTag {
    /// Case name used in the switch table and in error reporting.
    pub const fn wire_name(self) -> &'static str {
        match self {
            CommandTag::FeeParams => "feeParams",
            CommandTag::GasPrice => "gasPrice",
            CommandTag::BlobBaseFee => "blobBaseFee",
            CommandTag::GasTokenPrice => "gasTokenPrice",
            CommandTag::SolanaAccountOverhead => "solanaAccountOverhead",
            CommandTag::SolanaSizeCost => "solanaSizeCost",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        [
            CommandTag::FeeParams,
            CommandTag::GasPrice,
            CommandTag::BlobBaseFee,
            CommandTag::GasTokenPrice,
            CommandTag::SolanaAccountOverhead,
            CommandTag::SolanaSizeCost,
        ]
        .into_iter()
        .find(|tag| tag.wire_name() == name)
    }

    /// Whether a chain of `platform` accepts this command. The scalar
    /// sets mirror each platform's fee-params fields; `gasTokenPrice`
    /// exists on both, `feeParams` is always legal.
    pub fn valid_for(self, platform: Platform) -> bool {
        match (platform, self) {
            (_, CommandTag::FeeParams | CommandTag::GasTokenPrice) => true,
            (Platform::Evm, CommandTag::GasPrice | CommandTag::BlobBaseFee) => true,
            (
                Platform::Solana,
                CommandTag::SolanaAccountOverhead | CommandTag::SolanaSizeCost,
            ) => true,
            _ => false,
        }
    }
}

/// One fee-parameter update command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Full per-platform record, 32-byte slot on the wire.
    FeeParams(FeeParams),
    GasPrice(u32),
    BlobBaseFee(u32),
    /// u48 on the wire.
    GasTokenPrice(u64),
    SolanaAccountOverhead(u32),
    SolanaSizeCost(u32),
}

impl Command {
    pub fn tag(&self) -> CommandTag {
        match self {
            Command::FeeParams(_) => CommandTag::FeeParams,
            Command::GasPrice(_) => CommandTag::GasPrice,
            Command::BlobBaseFee(_) => CommandTag::BlobBaseFee,
            Command::GasTokenPrice(_) => CommandTag::GasTokenPrice,
            Command::SolanaAccountOverhead(_) => CommandTag::SolanaAccountOverhead,
            Command::SolanaSizeCost(_) => CommandTag::SolanaSizeCost,
        }
    }
}
