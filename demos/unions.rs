//! Untagged unions decoded by trying each variant in order.
//!
//! Run with: cargo run --example unions

use rpcjson::{from_str_buffered, rpc_record, rpc_union, to_string, B256};
use std::error::Error;

rpc_union! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum BlockId {
        Number(u64),
        Hash(B256),
        Tag(String),
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct TxSummary {
        pub hash: B256,
        pub nonce: u64,
    }
}

rpc_union! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum BlockTransactions {
        Full(Vec<TxSummary>),
        Hashes(Vec<B256>),
    }
}

rpc_record! {
    @tree
    #[derive(Debug, Clone, PartialEq)]
    pub struct Block {
        pub number: BlockId,
        pub transactions: BlockTransactions,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let hash = format!("\"0x{}\"", "ab".repeat(32));
    for input in [r#""0x1b4""#, hash.as_str(), r#""finalized""#] {
        let id: BlockId = from_str_buffered(input)?;
        println!("{:<70} -> {:?}", input, id);
    }

    // The same key holds either hashes or full objects
    let hashes = format!(r#"{{"number":"0x1","transactions":[{}]}}"#, hash);
    let full = format!(
        r#"{{"number":"0x1","transactions":[{{"hash":{},"nonce":"0x7"}}]}}"#,
        hash
    );
    for input in [hashes, full] {
        let block: Block = from_str_buffered(&input)?;
        match &block.transactions {
            BlockTransactions::Full(txs) => println!("full transactions: {}", txs.len()),
            BlockTransactions::Hashes(hashes) => println!("transaction hashes: {}", hashes.len()),
        }
        assert_eq!(to_string(&block)?, input);
    }

    match from_str_buffered::<BlockId>("true") {
        Ok(id) => println!("unexpected match: {:?}", id),
        Err(e) => println!("\nNo variant matched: {}", e),
    }

    Ok(())
}
