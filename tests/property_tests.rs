//! Property-based tests for the codec's round-trip guarantees
//!
//! These complement the integration tests by checking the wire conventions
//! over generated inputs: hex quantities, byte buffers, text and nesting.

use proptest::prelude::*;
use rpcjson::{
    from_str, from_str_buffered, to_string, Address, Bytes, Decode, Encode, FromValue, Value, B256,
};

fn roundtrip<T: Encode + Decode + FromValue + PartialEq + std::fmt::Debug>(value: &T) -> bool {
    match to_string(value) {
        Ok(serialized) => {
            let streamed = match from_str::<T>(&serialized) {
                Ok(decoded) => decoded,
                Err(e) => {
                    eprintln!("Decode failed: {}", e);
                    eprintln!("Encoded was: {}", serialized);
                    return false;
                }
            };
            let buffered = match from_str_buffered::<T>(&serialized) {
                Ok(decoded) => decoded,
                Err(e) => {
                    eprintln!("Tree decode failed: {}", e);
                    eprintln!("Encoded was: {}", serialized);
                    return false;
                }
            };
            *value == streamed && *value == buffered
        }
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            false
        }
    }
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        "[a-zA-Z0-9 _\\-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    // Integers
    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u128(n in any::<u128>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i128(n in any::<i128>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_integer_wire_form(n in any::<i64>()) {
        let json = to_string(&n).unwrap();
        let expected = if n < 0 {
            format!("\"-0x{:x}\"", n.unsigned_abs())
        } else {
            format!("\"0x{:x}\"", n)
        };
        prop_assert_eq!(json, expected);
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    // Text
    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_hex_looking_text_stays_text(s in "0x[0-9a-f]{0,16}") {
        prop_assert_eq!(to_string(&s).unwrap(), format!("\"{}\"", s));
        prop_assert!(roundtrip(&s));
    }

    // Byte buffers
    #[test]
    fn prop_bytes(v in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert!(roundtrip(&Bytes::from(v)));
    }

    #[test]
    fn prop_b256(raw in any::<[u8; 32]>()) {
        let hash = B256::from(raw);
        prop_assert!(roundtrip(&hash));
        prop_assert_eq!(to_string(&hash).unwrap().len(), 2 + 2 + 64);
    }

    #[test]
    fn prop_address_checksum(raw in any::<[u8; 20]>()) {
        let address = Address::from(raw);
        prop_assert!(roundtrip(&address));

        let checksummed = address.to_checksum();
        prop_assert_eq!(Address::parse_checksummed(&checksummed).unwrap(), address);
        let lower: Address = from_str(&format!("\"{}\"", checksummed.to_lowercase())).unwrap();
        prop_assert_eq!(lower, address);
    }

    // Collections
    #[test]
    fn prop_vec_u32(v in prop::collection::vec(any::<u32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_u64(opt in proptest::option::of(any::<u64>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_nested_vec(v in prop::collection::vec(prop::collection::vec(any::<i16>(), 0..5), 0..5)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_tuple(t in (any::<u8>(), any::<String>(), proptest::option::of(any::<i32>()))) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_fixed_array(a in any::<[u16; 4]>()) {
        prop_assert!(roundtrip(&a));
    }

    // Dynamic values
    #[test]
    fn prop_value(value in arb_value()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_value_matches_serde_json(value in arb_value()) {
        let ours = to_string(&value).unwrap();
        let theirs = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(ours, theirs);
    }
}
