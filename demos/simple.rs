//! Encoding and decoding the basic JSON-RPC wire forms.
//!
//! Run with: cargo run --example simple

use rpcjson::{from_str, to_string, Address, Bytes, B256};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Quantities are quoted hex
    let balance: u128 = 1_500_000_000_000_000_000;
    let json = to_string(&balance)?;
    println!("balance: {}", json);
    assert_eq!(from_str::<u128>(&json)?, balance);

    // Decimal and native numbers are accepted on input
    let gas: u64 = from_str("21000")?;
    println!("gas from a plain number: {}", gas);

    // 20-byte buffers get an EIP-55 checksum
    let miner: Address = from_str(r#""0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed""#)?;
    println!("miner: {}", to_string(&miner)?);

    // Other fixed buffers and owned bytes are plain hex
    let hash = B256::from([0x11; 32]);
    println!("hash: {}", to_string(&hash)?);
    let input = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]);
    println!("input: {}", to_string(&input)?);

    // Text stays text even when it looks like hex
    let label = "0xdeadbeef".to_string();
    println!("label: {}", to_string(&label)?);

    let params = (miner, "latest");
    let json = to_string(&params)?;
    println!("eth_getBalance params: {}", json);

    let back: (Address, String) = from_str(&json)?;
    assert_eq!(back.0, miner);
    println!("✓ Round-trip successful");

    Ok(())
}
