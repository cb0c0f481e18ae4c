//! # rpcjson
//!
//! A type-directed JSON codec for Ethereum JSON-RPC.
//!
//! ## What does it do?
//!
//! JSON-RPC nodes speak JSON with a few conventions that generic JSON
//! libraries do not know about. This crate encodes and decodes Rust values
//! following those conventions, choosing the wire form from the Rust type
//! alone:
//!
//! - **Integers** are quoted lowercase hex: `1234u32` is `"0x4d2"`, `-1i64` is
//!   `"-0x1"`
//! - **Addresses** ([`Address`]) carry an EIP-55 mixed-case checksum
//! - **Byte buffers** ([`FixedBytes`], [`Bytes`]) are `0x`-prefixed hex
//! - **Text** (`String`, `&str`) is an ordinary JSON string, never reinterpreted
//! - **Records** are objects; absent optional fields are left out
//! - **Enumerations** are written by name
//! - **Unions** have no discriminator; decoding tries each variant in turn
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rpcjson = "0.1"
//! ```
//!
//! ### Records
//!
//! ```rust
//! use rpcjson::{from_str, rpc_record, to_string, Address, B256};
//!
//! rpc_record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Log {
//!         pub address: Address,
//!         pub block_hash: Option<B256> => "blockHash",
//!         pub log_index: u64 => "logIndex",
//!     }
//! }
//!
//! let json = r#"{"address":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed","logIndex":"0x1f"}"#;
//! let log: Log = from_str(json).unwrap();
//! assert_eq!(log.log_index, 31);
//! assert_eq!(log.block_hash, None);
//! assert_eq!(to_string(&log).unwrap(), json);
//! ```
//!
//! ### Unions
//!
//! Unions need lookahead, so they are decoded from a parsed tree with
//! [`from_str_buffered`]:
//!
//! ```rust
//! use rpcjson::{from_str_buffered, rpc_union, Bytes};
//!
//! rpc_union! {
//!     #[derive(Debug, PartialEq)]
//!     pub enum Input {
//!         Data(Bytes),
//!         Note(String),
//!     }
//! }
//!
//! let input: Input = from_str_buffered(r#""0x00ff""#).unwrap();
//! assert_eq!(input, Input::Data(Bytes::from(vec![0x00, 0xff])));
//! let input: Input = from_str_buffered(r#""hello""#).unwrap();
//! assert_eq!(input, Input::Note("hello".to_string()));
//! ```
//!
//! ## Decoding Paths
//!
//! - [`from_str`] streams tokens straight into the target type ([`Decode`])
//! - [`from_str_buffered`] first builds a [`Value`] tree and decodes from it
//!   ([`FromValue`]); required whenever a union is involved
//!
//! Both honor the same [`DecodeOptions`]: unknown fields are rejected unless
//! `ignore_unknown_fields` is set, and repeated keys follow the
//! [`DuplicateFieldPolicy`].
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Nesting depth and string length are bounded on input
//! - Every failure is reported as an [`Error`]; nothing panics on bad input
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Integers, bytes and addresses
//! - **`records.rs`** - Declaring and decoding records
//! - **`unions.rs`** - Untagged unions and block identifiers
//! - **`dynamic_values.rs`** - Working with [`Value`] trees
//! - **`custom_options.rs`** - Strict and permissive decoding
//!
//! Run any example with: `cargo run --example <name>`

pub mod bytes;
pub mod checksum;
pub mod de;
pub mod enumeration;
pub mod error;
mod impls;
pub mod macros;
pub mod map;
mod number;
pub mod options;
pub mod punctuation;
pub mod seen;
pub mod ser;
pub mod shape;
pub mod token;
pub mod value;
pub mod value_de;

pub use bytes::{Address, Bytes, FixedBytes, B256};
pub use de::{Decode, Deserializer};
pub use enumeration::Enumeration;
pub use error::{Error, ErrorKind, Result};
pub use map::ObjectMap;
pub use options::{DecodeOptions, DuplicateFieldPolicy, EncodeOptions};
pub use seen::Occurrence;
pub use ser::{Encode, Serializer};
pub use shape::{FieldSpec, Shape, Shaped};
pub use value::Value;
pub use value_de::FromValue;

use std::io;

/// Encode any `T: Encode` to a JSON string.
///
/// # Examples
///
/// ```rust
/// use rpcjson::to_string;
///
/// assert_eq!(to_string(&1234u32).unwrap(), r#""0x4d2""#);
/// assert_eq!(to_string(&Some(-1i64)).unwrap(), r#""-0x1""#);
/// assert_eq!(to_string("0x4d2").unwrap(), r#""0x4d2""#);
/// ```
///
/// # Errors
///
/// Returns an error if a value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Encode,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Encode any `T: Encode` to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use rpcjson::{rpc_record, to_string_with_options, EncodeOptions};
///
/// rpc_record! {
///     pub struct Call {
///         pub to: String,
///         pub gas: Option<u64>,
///     }
/// }
///
/// let call = Call { to: "0x0".to_string(), gas: None };
/// let options = EncodeOptions::new().with_emit_null_optional_fields(true);
/// let json = to_string_with_options(&call, options).unwrap();
/// assert_eq!(json, r#"{"to":"0x0","gas":null}"#);
/// ```
///
/// # Errors
///
/// Returns an error if a value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Encode,
{
    let bytes = to_vec_with_options(value, options)?;
    String::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))
}

/// Encode any `T: Encode` to a byte vector.
///
/// # Errors
///
/// Returns an error if a value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Encode,
{
    to_vec_with_options(value, EncodeOptions::default())
}

fn to_vec_with_options<T>(value: &T, options: EncodeOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Encode,
{
    let mut buffer = Vec::with_capacity(128);
    to_writer_with_options(&mut buffer, value, options)?;
    Ok(buffer)
}

/// Convert any `T: Encode` to a [`Value`] holding its JSON form.
///
/// # Examples
///
/// ```rust
/// use rpcjson::{to_value, Value};
///
/// let value = to_value(&vec![1u8, 2]).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::from("0x1"), Value::from("0x2")]));
/// ```
///
/// # Errors
///
/// Returns an error if the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Encode,
{
    let json = to_string(value)?;
    Value::parse(&json)
}

/// Encode any `T: Encode` to a writer.
///
/// Output is streamed as it is produced; on error the writer may hold a
/// partial document.
///
/// # Examples
///
/// ```rust
/// use rpcjson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &(true, 16u8)).unwrap();
/// assert_eq!(buffer, br#"[true,"0x10"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Encode,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Encode any `T: Encode` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Encode,
{
    let mut serializer = Serializer::with_options(writer, options);
    value.encode(&mut serializer)?;
    serializer.into_inner().flush()?;
    Ok(())
}

/// Decode an instance of type `T` from a string of JSON text, streaming.
///
/// # Examples
///
/// ```rust
/// use rpcjson::from_str;
///
/// let gas: u64 = from_str(r#""0x5208""#).unwrap();
/// assert_eq!(gas, 21000);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not fit type `T`.
/// Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: Decode,
{
    from_str_with_options(s, DecodeOptions::default())
}

/// Decode an instance of type `T` from JSON text with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not fit type `T`
/// under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: DecodeOptions) -> Result<T>
where
    T: Decode,
{
    let mut deserializer = Deserializer::with_options(s, options);
    let value = T::decode(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Decode an instance of type `T` from bytes of JSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid JSON, or do
/// not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Decode,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Decode an instance of type `T` from an I/O stream of JSON.
///
/// # Examples
///
/// ```rust
/// use rpcjson::from_reader;
/// use std::io::Cursor;
///
/// let numbers: Vec<u16> = from_reader(Cursor::new(br#"["0x1","0xff"]"#)).unwrap();
/// assert_eq!(numbers, vec![1, 255]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// JSON, or the data does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Decode,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Decode an instance of type `T` by first parsing the whole input into a
/// [`Value`] tree. This is the only way to decode unions.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_buffered<T>(s: &str) -> Result<T>
where
    T: FromValue,
{
    from_str_buffered_with_options(s, DecodeOptions::default())
}

/// Tree-based decoding with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not fit type `T`
/// under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_buffered_with_options<T>(s: &str, options: DecodeOptions) -> Result<T>
where
    T: FromValue,
{
    let tree = Value::parse_with_options(s, &options)?;
    T::from_value(&tree, &options)
}

/// Decode an instance of type `T` from an already parsed [`Value`].
///
/// # Errors
///
/// Returns an error if the tree does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: &Value) -> Result<T>
where
    T: FromValue,
{
    from_value_with_options(value, &DecodeOptions::default())
}

/// Decode from a [`Value`] with custom options.
///
/// # Errors
///
/// Returns an error if the tree does not fit type `T` under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value_with_options<T>(value: &Value, options: &DecodeOptions) -> Result<T>
where
    T: FromValue,
{
    T::from_value(value, options)
}

/// Parse JSON text into a [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_value(s: &str) -> Result<Value> {
    Value::parse(s)
}
