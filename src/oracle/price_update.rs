//! The price-update message schema and its domain conversion.
//!
//! ## Wire format (big-endian throughout)
//!
//! ```text
//! PriceUpdate       := u8 count N , N × ChainCommandEntry
//! ChainCommandEntry := u8 len L , L bytes of ChainCommandBody
//! ChainCommandBody  := u16 chain , u8 tag , payload
//! payload(0)        := 32-byte fee-params slot (shape depends on the
//!                      chain's platform, resolved during conversion)
//! payload(1..=5)    := u32 scalar, except tag 3 which is u48
//! ```
//!
//! The structural decode captures the fee-params slot as opaque bytes;
//! the [`Convert`] step then resolves the chain's platform and re-decodes
//! the slot through that platform's layout. Scalar commands are validated
//! against the platform's allowed set in both directions, so an invalid
//! pairing fails on encode as well as decode.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::layout::{
    deserialize_with, serialize_with, Convert, Encoding, Field, Layout, LayoutError, SwitchCase,
    Value,
};
use crate::CodecError;

use super::chain::ChainId;
use super::command::{Command, CommandTag};
use super::fee_params::{FeeParams, SLOT_SIZE};

/// Structural layout of one chain-command body: chain id, then the
/// tagged command payload.
static CHAIN_COMMAND_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    Layout::record(vec![
        Field::new("chain", Encoding::Uint { width: 2 }),
        Field::new(
            "command",
            Encoding::Switch {
                tag_width: 1,
                cases: vec![
                    // The full record is captured opaquely here and
                    // re-decoded per platform during conversion.
                    switch_case(CommandTag::FeeParams, Encoding::Bytes { size: Some(SLOT_SIZE) }),
                    switch_case(CommandTag::GasPrice, Encoding::Uint { width: 4 }),
                    switch_case(CommandTag::BlobBaseFee, Encoding::Uint { width: 4 }),
                    switch_case(CommandTag::GasTokenPrice, Encoding::Uint { width: 6 }),
                    switch_case(CommandTag::SolanaAccountOverhead, Encoding::Uint { width: 4 }),
                    switch_case(CommandTag::SolanaSizeCost, Encoding::Uint { width: 4 }),
                ],
            },
        ),
    ])
});

/// Outer message: count-prefixed array of length-prefixed entries. The
/// per-entry length byte keeps each body self-delimiting even though the
/// command payloads differ in size.
static PRICE_UPDATE_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    Layout::item(Encoding::Array {
        count_width: 1,
        element: Box::new(Layout::item(Encoding::LengthPrefixed {
            inner: Box::new(CHAIN_COMMAND_LAYOUT.clone()),
        })),
    })
});

fn switch_case(tag: CommandTag, payload: Encoding) -> SwitchCase {
    SwitchCase {
        id: u64::from(u8::from(tag)),
        name: tag.wire_name(),
        layout: Layout::item(payload),
    }
}

/// One per-chain update command. Immutable once constructed; serialized
/// once by the publisher and decoded once by each consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCommand {
    pub chain: ChainId,
    pub command: Command,
}

impl Convert for ChainCommand {
    type Domain = ChainCommand;
    type Error = CodecError;

    fn to_domain(raw: Value) -> Result<ChainCommand, CodecError> {
        let chain_id = raw.field("chain")?.as_uint()? as u16;
        let chain = ChainId::try_from(chain_id)
            .map_err(|_| CodecError::UnknownChain { id: chain_id })?;
        let platform = chain.platform();

        let (name, payload) = raw.field("command")?.as_tagged()?;
        let tag = CommandTag::from_wire_name(name)
            .ok_or(LayoutError::UnknownCase { name })?;

        let command = match tag {
            CommandTag::FeeParams => {
                let slot = payload.as_bytes()?;
                trace!(?chain, slot = %hex::encode(slot), "re-decoding feeParams slot");
                Command::FeeParams(FeeParams::decode_slot(platform, slot)?)
            }
            scalar => {
                if !scalar.valid_for(platform) {
                    debug!(?chain, command = scalar.wire_name(), "command not valid for platform");
                    return Err(CodecError::InvalidCommandForPlatform {
                        command: scalar.wire_name(),
                        platform,
                    });
                }
                let value = payload.as_uint()?;
                match scalar {
                    CommandTag::GasPrice => Command::GasPrice(value as u32),
                    CommandTag::BlobBaseFee => Command::BlobBaseFee(value as u32),
                    CommandTag::GasTokenPrice => Command::GasTokenPrice(value),
                    CommandTag::SolanaAccountOverhead => {
                        Command::SolanaAccountOverhead(value as u32)
                    }
                    CommandTag::SolanaSizeCost => Command::SolanaSizeCost(value as u32),
                    CommandTag::FeeParams => unreachable!("handled above"),
                }
            }
        };

        Ok(ChainCommand { chain, command })
    }

    fn from_domain(cmd: &ChainCommand) -> Result<Value, CodecError> {
        let platform = cmd.chain.platform();
        let tag = cmd.command.tag();

        let payload = match &cmd.command {
            Command::FeeParams(params) => {
                if params.platform() != platform {
                    return Err(CodecError::InvalidCommandForPlatform {
                        command: tag.wire_name(),
                        platform,
                    });
                }
                Value::Bytes(params.encode_slot()?)
            }
            scalar => {
                if !tag.valid_for(platform) {
                    debug!(chain = ?cmd.chain, command = tag.wire_name(), "command not valid for platform");
                    return Err(CodecError::InvalidCommandForPlatform {
                        command: tag.wire_name(),
                        platform,
                    });
                }
                match scalar {
                    Command::GasPrice(v)
                    | Command::BlobBaseFee(v)
                    | Command::SolanaAccountOverhead(v)
                    | Command::SolanaSizeCost(v) => Value::Uint(u64::from(*v)),
                    Command::GasTokenPrice(v) => Value::Uint(*v),
                    Command::FeeParams(_) => unreachable!("handled above"),
                }
            }
        };

        Ok(Value::Record(vec![
            ("chain", Value::Uint(u64::from(u16::from(cmd.chain)))),
            ("command", Value::tagged(tag.wire_name(), payload)),
        ]))
    }
}

/// An ordered batch of chain commands. Order is message-significant:
/// consumers apply entries in arrival order, and duplicate chains are
/// each applied independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceUpdate(pub Vec<ChainCommand>);

impl Convert for PriceUpdate {
    type Domain = PriceUpdate;
    type Error = CodecError;

    fn to_domain(raw: Value) -> Result<PriceUpdate, CodecError> {
        let entries = raw.into_array()?;
        let mut commands = Vec::with_capacity(entries.len());
        for entry in entries {
            commands.push(ChainCommand::to_domain(entry)?);
        }
        Ok(PriceUpdate(commands))
    }

    fn from_domain(update: &PriceUpdate) -> Result<Value, CodecError> {
        update
            .0
            .iter()
            .map(ChainCommand::from_domain)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl PriceUpdate {
    /// Encode the whole batch. Fails on any per-entry violation; no
    /// partial output is produced.
    pub fn serialize(&self) -> Result<Vec<u8>, CodecError> {
        let bytes = serialize_with::<PriceUpdate>(&PRICE_UPDATE_LAYOUT, self)?;
        trace!(entries = self.0.len(), bytes = bytes.len(), "serialized price update");
        Ok(bytes)
    }

    /// Decode a whole batch. Any structural or validation failure
    /// rejects the message; nothing is returned partially.
    pub fn deserialize(data: &[u8]) -> Result<PriceUpdate, CodecError> {
        let update = deserialize_with::<PriceUpdate>(&PRICE_UPDATE_LAYOUT, data)?;
        trace!(entries = update.0.len(), bytes = data.len(), "deserialized price update");
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::fee_params::EvmFeeParams;

    #[test]
    fn scalar_entry_bytes() {
        let update = PriceUpdate(vec![ChainCommand {
            chain: ChainId::Ethereum,
            command: Command::GasPrice(1),
        }]);
        let bytes = update.serialize().unwrap();
        // count, len=7, chain=0x0002, tag=1, u32 value.
        assert_eq!(bytes, vec![1, 7, 0, 2, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn empty_batch_is_a_single_zero_byte() {
        let update = PriceUpdate(Vec::new());
        let bytes = update.serialize().unwrap();
        assert_eq!(bytes, vec![0]);
        assert_eq!(PriceUpdate::deserialize(&bytes).unwrap(), update);
    }

    #[test]
    fn encode_rejects_fee_params_of_wrong_platform() {
        let update = PriceUpdate(vec![ChainCommand {
            chain: ChainId::Solana,
            command: Command::FeeParams(FeeParams::Evm(EvmFeeParams {
                gas_price: 1,
                blob_base_fee: 2,
                gas_token_price: 3,
            })),
        }]);
        assert_eq!(
            update.serialize().unwrap_err(),
            CodecError::InvalidCommandForPlatform {
                command: "feeParams",
                platform: crate::Platform::Solana,
            }
        );
    }

    #[test]
    fn encode_rejects_scalar_of_wrong_platform() {
        let update = PriceUpdate(vec![ChainCommand {
            chain: ChainId::Ethereum,
            command: Command::SolanaAccountOverhead(3),
        }]);
        assert_eq!(
            update.serialize().unwrap_err(),
            CodecError::InvalidCommandForPlatform {
                command: "solanaAccountOverhead",
                platform: crate::Platform::Evm,
            }
        );
    }

    #[test]
    fn decode_rejects_unknown_chain() {
        // count=1, len=7, chain=0x0063 (unregistered), tag=1, u32.
        let bytes = [1, 7, 0, 99, 1, 0, 0, 0, 1];
        assert_eq!(
            PriceUpdate::deserialize(&bytes).unwrap_err(),
            CodecError::UnknownChain { id: 99 }
        );
    }
}
