use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rpcjson::{
    from_str, from_str_buffered, rpc_record, to_string, Address, Bytes, Value, B256,
};

rpc_record! {
    #[derive(Clone)]
    struct Transaction {
        hash: B256,
        nonce: u64,
        from: Address,
        to: Option<Address>,
        value: u128,
        gas: u64,
        gas_price: Option<u128> => "gasPrice",
        input: Bytes,
    }
}

rpc_record! {
    #[derive(Clone)]
    struct Block {
        number: u64,
        hash: B256,
        parent_hash: B256 => "parentHash",
        miner: Address,
        timestamp: u64,
        gas_used: u64 => "gasUsed",
        extra_data: Bytes => "extraData",
        transactions: Vec<Transaction>,
    }
}

fn transaction(i: u64) -> Transaction {
    Transaction {
        hash: B256::from([i as u8; 32]),
        nonce: i,
        from: Address::from([0x5a; 20]),
        to: if i % 5 == 0 {
            None
        } else {
            Some(Address::from([i as u8; 20]))
        },
        value: u128::from(i) * 1_000_000_000_000_000_000,
        gas: 21_000,
        gas_price: Some(30_000_000_000),
        input: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb, i as u8]),
    }
}

fn block(size: u64) -> Block {
    Block {
        number: 19_000_000,
        hash: B256::from([0x88; 32]),
        parent_hash: B256::from([0x77; 32]),
        miner: Address::from([0x95; 20]),
        timestamp: 1_706_000_000,
        gas_used: 21_000 * size,
        extra_data: Bytes::from(b"builder".to_vec()),
        transactions: (0..size).map(transaction).collect(),
    }
}

fn benchmark_encode_transaction(c: &mut Criterion) {
    let tx = transaction(3);

    c.bench_function("encode_transaction", |b| {
        b.iter(|| to_string(black_box(&tx)))
    });
}

fn benchmark_decode_transaction(c: &mut Criterion) {
    let json = to_string(&transaction(3)).unwrap();

    c.bench_function("decode_transaction", |b| {
        b.iter(|| from_str::<Transaction>(black_box(&json)))
    });
}

fn benchmark_encode_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_block");

    for size in [10u64, 50, 100, 500].iter() {
        let block = block(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &block, |b, block| {
            b.iter(|| to_string(black_box(block)))
        });
    }
    group.finish();
}

fn benchmark_decode_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_block");

    for size in [10u64, 50, 100, 500].iter() {
        let json = to_string(&block(*size)).unwrap();

        group.bench_with_input(BenchmarkId::new("stream", size), &json, |b, json| {
            b.iter(|| from_str::<Block>(black_box(json)))
        });
        group.bench_with_input(BenchmarkId::new("tree", size), &json, |b, json| {
            b.iter(|| from_str_buffered::<Block>(black_box(json)))
        });
    }
    group.finish();
}

fn benchmark_checksum(c: &mut Criterion) {
    let address = Address::from([0x5a; 20]);

    c.bench_function("address_checksum", |b| {
        b.iter(|| black_box(&address).to_checksum())
    });
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<u64> = (0..100).map(|i| i * 0x1_0000).collect();
    let hashes: Vec<B256> = (0..100u8).map(|i| B256::from([i; 32])).collect();

    group.bench_function("encode_quantities", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });

    group.bench_function("encode_hashes", |b| {
        b.iter(|| to_string(black_box(&hashes)))
    });

    let numbers_json = to_string(&numbers).unwrap();
    let hashes_json = to_string(&hashes).unwrap();

    group.bench_function("decode_quantities", |b| {
        b.iter(|| from_str::<Vec<u64>>(black_box(&numbers_json)))
    });

    group.bench_function("decode_hashes", |b| {
        b.iter(|| from_str::<Vec<B256>>(black_box(&hashes_json)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let json = to_string(&block(100)).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("rpcjson_value", |b| {
        b.iter(|| from_str::<Value>(black_box(&json)))
    });

    group.bench_function("serde_json_value", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let block = block(10);

    c.bench_function("roundtrip_block", |b| {
        b.iter(|| {
            let encoded = to_string(black_box(&block)).unwrap();
            let _decoded: Block = from_str(black_box(&encoded)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_encode_transaction,
    benchmark_decode_transaction,
    benchmark_encode_block,
    benchmark_decode_block,
    benchmark_checksum,
    benchmark_primitive_array,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
