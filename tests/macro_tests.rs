use indexmap::IndexMap;
use rpcjson::{
    from_str, from_str_buffered, from_str_with_options, rpc_enum, rpc_record, rpc_union,
    rpc_value, to_string, to_value, Address, Bytes, DecodeOptions, DuplicateFieldPolicy,
    Enumeration, ErrorKind, Shape, Shaped, Value,
};

rpc_enum! {
    /// Block tag accepted wherever a block number is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BlockTag: u8 {
        Latest = 0 => "latest",
        Pending = 1 => "pending",
        Earliest = 2 => "earliest",
        Safe = 3 => "safe",
        Finalized = 4 => "finalized",
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct AccessListItem {
        pub address: Address,
        /// Storage slots, kept as raw bytes.
        pub storage_keys: Vec<Bytes> => "storageKeys",
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct CallRequest {
        pub from: Option<Address>,
        pub to: Address,
        pub gas: Option<u64>,
        pub data: Bytes = Bytes::default(),
        pub access_list: Vec<AccessListItem> => "accessList" = Vec::new(),
        pub state_override: Option<IndexMap<String, Bytes>> => "stateOverride",
    }
}

rpc_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SyncProgress {
        pub starting_block: u64 => "startingBlock",
        pub current_block: u64 => "currentBlock",
        pub highest_block: u64 => "highestBlock",
        range: (u64, u64) = (0, 0),
    }
}

rpc_union! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum SyncStatus {
        Syncing(SyncProgress),
        Idle(bool),
    }
}

rpc_union! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum BlockRef {
        Tag(BlockTag),
        Number(u64),
    }
}

rpc_record! {
    @tree
    #[derive(Debug, Clone, PartialEq)]
    pub struct FeeHistoryRequest {
        pub block_count: u64 => "blockCount",
        pub newest_block: BlockRef => "newestBlock",
        pub percentiles: Option<Vec<f64>> => "rewardPercentiles",
    }
}

fn address() -> Address {
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap()
}

#[test]
fn test_rpc_value_with_variables() {
    let id = 7;
    let method = "eth_blockNumber";
    let value = rpc_value!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": [],
        "extra": [null, false, (-1), 2.5]
    });

    assert_eq!(value.get("id"), Some(&Value::Integer(7)));
    assert_eq!(value.get("method").and_then(Value::as_str), Some(method));
    assert_eq!(
        value.to_string(),
        r#"{"jsonrpc":"2.0","id":7,"method":"eth_blockNumber","params":[],"extra":[null,false,-1,2.5]}"#
    );
}

#[test]
fn test_enum_without_catch_all() {
    assert!(BlockTag::EXHAUSTIVE);
    assert_eq!(BlockTag::VARIANTS.len(), 5);
    assert_eq!(BlockTag::Safe.tag(), 3);
    assert_eq!(BlockTag::Finalized.name(), Some("finalized"));
    assert_eq!(from_str::<BlockTag>(r#""pending""#).unwrap(), BlockTag::Pending);
    assert_eq!(
        from_str::<BlockTag>(r#""0x9""#).unwrap_err().kind(),
        ErrorKind::InvalidEnumTag
    );
}

#[test]
fn test_nested_records_with_defaults() {
    let json = r#"{"to":"0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"}"#;
    let request: CallRequest = from_str(json).unwrap();
    assert_eq!(request.from, None);
    assert_eq!(request.to, address());
    assert!(request.data.is_empty());
    assert!(request.access_list.is_empty());
    assert_eq!(request.state_override, None);

    assert_eq!(
        to_string(&request).unwrap(),
        r#"{"to":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed","data":"0x","accessList":[]}"#
    );
}

#[test]
fn test_nested_records_round_trip() {
    let mut state_override = IndexMap::new();
    state_override.insert("balance".to_string(), Bytes::from(vec![0x01]));

    let request = CallRequest {
        from: Some(address()),
        to: address(),
        gas: Some(30_000),
        data: Bytes::from(vec![0x70, 0xa0, 0x82, 0x31]),
        access_list: vec![AccessListItem {
            address: address(),
            storage_keys: vec![Bytes::from(vec![0u8; 4])],
        }],
        state_override: Some(state_override),
    };

    let json = to_string(&request).unwrap();
    assert!(json.contains(r#""gas":"0x7530""#));
    assert!(json.contains(r#""storageKeys":["0x00000000"]"#));
    assert!(json.contains(r#""stateOverride":{"balance":"0x01"}"#));

    assert_eq!(from_str::<CallRequest>(&json).unwrap(), request);
    assert_eq!(from_str_buffered::<CallRequest>(&json).unwrap(), request);
}

#[test]
fn test_private_fields_and_tuples() {
    let json = r#"{"startingBlock":"0x0","currentBlock":"0x10","highestBlock":"0x20","range":["0x1","0x2"]}"#;
    let progress: SyncProgress = from_str(json).unwrap();
    assert_eq!(progress.range, (1, 2));
    assert_eq!(to_string(&progress).unwrap(), json);

    let err = from_str::<SyncProgress>(
        r#"{"startingBlock":"0x0","currentBlock":"0x10","highestBlock":"0x20","range":["0x1"]}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
}

#[test]
fn test_union_of_record_and_bool() {
    assert_eq!(
        from_str_buffered::<SyncStatus>("false").unwrap(),
        SyncStatus::Idle(false)
    );

    let status: SyncStatus = from_str_buffered(
        r#"{"startingBlock":"0x0","currentBlock":"0x1","highestBlock":"0x2"}"#,
    )
    .unwrap();
    match status {
        SyncStatus::Syncing(progress) => assert_eq!(progress.highest_block, 2),
        other => panic!("expected syncing, got {:?}", other),
    }

    assert_eq!(to_string(&SyncStatus::Idle(false)).unwrap(), "false");
}

#[test]
fn test_union_variant_order_decides() {
    let request: FeeHistoryRequest =
        from_str_buffered(r#"{"blockCount":"0x4","newestBlock":"0x1"}"#).unwrap();
    // a named tag wins over the number reading of the same string
    assert_eq!(request.newest_block, BlockRef::Tag(BlockTag::Pending));

    let request: FeeHistoryRequest = from_str_buffered(
        r#"{"blockCount":"0x4","newestBlock":"0x100","rewardPercentiles":[25.0,75.0]}"#,
    )
    .unwrap();
    assert_eq!(request.newest_block, BlockRef::Number(256));
    assert_eq!(request.percentiles, Some(vec![25.0, 75.0]));
}

#[test]
fn test_union_failure_lists_variants() {
    let err = from_str_buffered::<FeeHistoryRequest>(
        r#"{"blockCount":"0x4","newestBlock":{"hash":"0x0"}}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
    let message = err.to_string();
    assert!(message.contains("BlockRef"), "{}", message);
    assert!(message.contains("enum BlockTag"), "{}", message);
}

#[test]
fn test_duplicate_field_policies() {
    let input = r#"{"startingBlock":"0x1","startingBlock":"0x2","currentBlock":"0x0","highestBlock":"0x0"}"#;

    let last: SyncProgress = from_str(input).unwrap();
    assert_eq!(last.starting_block, 2);

    let options = DecodeOptions::new().with_duplicate_field(DuplicateFieldPolicy::UseFirst);
    let first: SyncProgress = from_str_with_options(input, options.clone()).unwrap();
    assert_eq!(first.starting_block, 1);
    let first: SyncProgress = rpcjson::from_str_buffered_with_options(input, options).unwrap();
    assert_eq!(first.starting_block, 1);

    let err = from_str_with_options::<SyncProgress>(input, DecodeOptions::strict()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateField);
}

#[test]
fn test_record_shapes() {
    match CallRequest::shape() {
        Shape::Record { name, fields } => {
            assert_eq!(name, "CallRequest");
            assert_eq!(fields[0].shape, Shape::Optional(Box::new(Shape::FixedBytes(20))));
            assert_eq!(fields[3].shape, Shape::Bytes);
            assert!(fields[3].has_default);
            assert!(!fields[1].has_default);
            assert_eq!(fields[4].name, "accessList");
        }
        other => panic!("unexpected shape {:?}", other),
    }
    assert_eq!(BlockRef::shape().to_string(), "union BlockRef");
}

#[test]
fn test_to_value_keeps_wire_forms() {
    let progress = SyncProgress {
        starting_block: 1,
        current_block: 2,
        highest_block: 3,
        range: (0, 0),
    };
    let expected = rpc_value!({
        "startingBlock": "0x1",
        "currentBlock": "0x2",
        "highestBlock": "0x3",
        "range": ["0x0", "0x0"]
    });
    assert_eq!(to_value(&progress).unwrap(), expected);
}
