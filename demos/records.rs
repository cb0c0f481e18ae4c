//! Declaring records and enumerations with the codec macros.
//!
//! Run with: cargo run --example records

use rpcjson::{from_str, rpc_enum, rpc_record, to_string, Address, Bytes, B256};
use std::error::Error;

rpc_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum TxType: u8 {
        Legacy = 0 => "legacy",
        AccessList = 1 => "accessList",
        DynamicFee = 2 => "dynamicFee",
        ..Other
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Log {
        pub address: Address,
        pub topics: Vec<B256>,
        pub data: Bytes,
        pub removed: bool = false,
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Receipt {
        pub transaction_hash: B256 => "transactionHash",
        pub status: u8,
        pub cumulative_gas_used: u64 => "cumulativeGasUsed",
        pub contract_address: Option<Address> => "contractAddress",
        pub tx_type: TxType => "type",
        pub logs: Vec<Log>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let receipt = Receipt {
        transaction_hash: B256::from([0x42; 32]),
        status: 1,
        cumulative_gas_used: 0x1f_4a52,
        contract_address: None,
        tx_type: TxType::DynamicFee,
        logs: vec![Log {
            address: "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse()?,
            topics: vec![B256::from([0xdd; 32])],
            data: Bytes::from(vec![0u8; 4]),
            removed: false,
        }],
    };

    // contractAddress is None, so it is left out
    let json = to_string(&receipt)?;
    println!("Receipt JSON:\n{}\n", json);

    let back: Receipt = from_str(&json)?;
    assert_eq!(receipt, back);
    println!("✓ Round-trip successful");

    // Nodes may report the type as a raw tag
    let raw = json.replace(r#""type":"dynamicFee""#, r#""type":"0x7e""#);
    let deposit: Receipt = from_str(&raw)?;
    println!("Raw tag decoded as {:?}", deposit.tx_type);

    Ok(())
}
