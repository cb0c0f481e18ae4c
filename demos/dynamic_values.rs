//! Working with Value for requests and responses of unknown shape.
//!
//! Run with: cargo run --example dynamic_values

use rpcjson::{from_value, parse_value, rpc_value, to_string, to_value, Address, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let from: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse()?;

    // Typed parts go through to_value so they keep their wire form
    let request = rpc_value!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_getTransactionCount",
        "params": [(to_value(&from)?), "pending"]
    });
    println!("Request:\n{}\n", request);

    let response = parse_value(r#"{"jsonrpc":"2.0","id":1,"result":"0x1a"}"#)?;

    if let Some(id) = response.get("id").and_then(Value::as_i64) {
        println!("Accessing field 'id': {}", id);
    }

    if let Some(result) = response.get("result") {
        let nonce: u64 = from_value(result)?;
        println!("Decoded result as u64: {}", nonce);
    }

    if let Value::Object(obj) = &response {
        let keys: Vec<_> = obj.keys().cloned().collect();
        println!("Keys in order: {:?}", keys);
    }

    // Value converts to and from serde types
    let as_json: serde_json::Value = serde_json::to_value(&response)?;
    println!("\nThrough serde_json: {}", as_json);
    println!("Re-encoded: {}", to_string(&response)?);

    Ok(())
}
