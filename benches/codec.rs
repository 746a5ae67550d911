//! Encode/decode throughput for a representative price-update batch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oracle_codec::{
    ChainCommand, ChainId, Command, EvmFeeParams, FeeParams, PriceUpdate, SolanaFeeParams,
};

fn sample_update() -> PriceUpdate {
    PriceUpdate(vec![
        ChainCommand {
            chain: ChainId::Ethereum,
            command: Command::FeeParams(FeeParams::Evm(EvmFeeParams {
                gas_price: 30_000_000,
                blob_base_fee: 1_200_000,
                gas_token_price: 4_500_000_000_000,
            })),
        },
        ChainCommand {
            chain: ChainId::Ethereum,
            command: Command::GasPrice(31_000_000),
        },
        ChainCommand {
            chain: ChainId::Solana,
            command: Command::FeeParams(FeeParams::Solana(SolanaFeeParams {
                solana_account_overhead: 890_880,
                solana_size_cost: 6_960,
                gas_token_price: 17_000_000_000,
            })),
        },
        ChainCommand {
            chain: ChainId::Solana,
            command: Command::SolanaSizeCost(7_000),
        },
    ])
}

fn bench_serialize(c: &mut Criterion) {
    let update = sample_update();
    c.bench_function("serialize_price_update", |b| {
        b.iter(|| black_box(&update).serialize().unwrap())
    });
}

fn bench_deserialize(c: &mut Criterion) {
    let bytes = sample_update().serialize().unwrap();
    c.bench_function("deserialize_price_update", |b| {
        b.iter(|| PriceUpdate::deserialize(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
