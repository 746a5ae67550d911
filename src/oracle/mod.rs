//! Domain schema for oracle price-update messages: chains and platforms,
//! the command registry, per-platform fee-parameter records, and the
//! top-level [`PriceUpdate`] codec built on the layout engine.

mod chain;
mod command;
mod fee_params;
mod price_update;

pub use chain::{ChainId, Platform};
pub use command::{Command, CommandTag};
pub use fee_params::{EvmFeeParams, FeeParams, SolanaFeeParams, SLOT_SIZE};
pub use price_update::{ChainCommand, PriceUpdate};
