//! Tuning encoding and decoding with EncodeOptions and DecodeOptions.
//!
//! Run with: cargo run --example custom_options

use rpcjson::{
    from_str, from_str_with_options, rpc_record, to_string, to_string_with_options,
    DecodeOptions, DuplicateFieldPolicy, EncodeOptions,
};
use std::error::Error;

rpc_record! {
    #[derive(Debug)]
    struct FeeHistory {
        oldest_block: u64 => "oldestBlock",
        base_fee_per_gas: Vec<u128> => "baseFeePerGas",
        reward: Option<Vec<Vec<u128>>>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let history = FeeHistory {
        oldest_block: 0x12a05f2,
        base_fee_per_gas: vec![0x3b9aca00, 0x3d4cdb80],
        reward: None,
    };

    println!("Default (absent optionals omitted):");
    println!("{}\n", to_string(&history)?);

    println!("With explicit nulls:");
    let options = EncodeOptions::new().with_emit_null_optional_fields(true);
    println!("{}\n", to_string_with_options(&history, options)?);

    // Newer nodes add fields this record does not know about
    let input = r#"{"oldestBlock":"0x1","baseFeePerGas":[],"gasUsedRatio":[0.5]}"#;
    match from_str::<FeeHistory>(input) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Default options: {}", e),
    }
    let lenient: FeeHistory = from_str_with_options(input, DecodeOptions::permissive())?;
    println!("Permissive options: {:?}\n", lenient);

    let repeated = r#"{"oldestBlock":"0x1","oldestBlock":"0x2","baseFeePerGas":[]}"#;
    for policy in [
        DuplicateFieldPolicy::UseFirst,
        DuplicateFieldPolicy::UseLast,
        DuplicateFieldPolicy::Error,
    ] {
        let options = DecodeOptions::new().with_duplicate_field(policy);
        match from_str_with_options::<FeeHistory>(repeated, options) {
            Ok(history) => println!("{:?}: oldestBlock = {}", policy, history.oldest_block),
            Err(e) => println!("{:?}: {}", policy, e),
        }
    }

    let shallow = DecodeOptions::new().with_max_depth(2);
    let nested = r#"{"oldestBlock":"0x1","baseFeePerGas":[],"reward":[["0x1"]]}"#;
    if let Err(e) = from_str_with_options::<FeeHistory>(nested, shallow) {
        println!("\nDepth limit: {}", e);
    }

    Ok(())
}
