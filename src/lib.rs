//! # Oracle Price-Update Codec
//!
//! ## Purpose
//!
//! Byte-exact wire codec for oracle price-update messages: an ordered
//! batch of per-chain commands updating fee-related parameters consumed
//! on-chain (gas price, blob base fee, gas-token price, and Solana
//! account-rent overhead / allocation size cost).
//!
//! The core is a declarative layout engine ([`layout`]) that compiles a
//! field-list description into a bidirectional codec with exact
//! round-trip guarantees, and a domain schema ([`oracle`]) that wires it
//! into the concrete message format with platform-conditioned fee-params
//! shapes.
//!
//! ## Architecture Role
//!
//! ```text
//! PriceUpdate → convert → Value → layout codec → wire bytes
//!      ↑           ↓         ↓          ↓             ↓
//!  Typed Batch  Platform  Structural  Big-Endian  count/len
//!  Validation   Reshaping  Shape      Fields      Framing
//! ```
//!
//! Both sides of the wire share this crate as the contract: the
//! publisher serializes once, every consumer deserializes once, and any
//! structural or validation failure rejects the whole message. No
//! transport, signing, or on-chain validation lives here.
//!
//! ## Quick Start
//!
//! ```rust
//! use oracle_codec::{ChainCommand, ChainId, Command, PriceUpdate};
//!
//! let update = PriceUpdate(vec![ChainCommand {
//!     chain: ChainId::Ethereum,
//!     command: Command::GasPrice(30),
//! }]);
//!
//! let bytes = update.serialize()?;
//! assert_eq!(PriceUpdate::deserialize(&bytes)?, update);
//! # Ok::<(), oracle_codec::CodecError>(())
//! ```

use thiserror::Error;

pub mod layout;
pub mod oracle;

pub use layout::{
    deserialize_layout, deserialize_with, serialize_layout, serialize_with, Convert, Encoding,
    Field, Layout, LayoutError, LayoutResult, SwitchCase, Value,
};
pub use oracle::{
    ChainCommand, ChainId, Command, CommandTag, EvmFeeParams, FeeParams, Platform, PriceUpdate,
    SolanaFeeParams, SLOT_SIZE,
};

/// Errors surfaced by the price-update codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Structural encode/decode failure in the layout engine.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Chain id not in the supported registry.
    #[error("unknown chain id {id}")]
    UnknownChain { id: u16 },

    /// Command not in the allowed set for the chain's platform.
    #[error("command {command:?} is not valid for platform {platform:?}")]
    InvalidCommandForPlatform {
        command: &'static str,
        platform: Platform,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
