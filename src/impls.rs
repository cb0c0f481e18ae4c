//! Codec support for arbitrary-precision integers and timestamps.
//!
//! - `BigUint` and `BigInt` follow the integer convention at any width:
//!   `"0x1bc16d674ec80000"`, `"-0x1"`.
//! - `DateTime<Utc>` travels as its Unix timestamp in seconds, the way block
//!   headers carry `timestamp`.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use num_bigint::BigUint;
//! use rpcjson::{from_str, to_string};
//!
//! let wei = BigUint::from(10u8).pow(30);
//! let json = to_string(&wei).unwrap();
//! assert_eq!(json, r#""0xc9f2c9cd04674edea40000000""#);
//! assert_eq!(from_str::<BigUint>(&json).unwrap(), wei);
//!
//! let at = Utc.timestamp_opt(1_438_269_988, 0).unwrap();
//! assert_eq!(to_string(&at).unwrap(), r#""0x55ba4224""#);
//! ```

use crate::de::Deserializer;
use crate::number;
use crate::value_de::numeric_text;
use crate::{
    Decode, DecodeOptions, Encode, Error, FromValue, Result, Serializer, Shape, Shaped, Value,
};
use chrono::{DateTime, TimeZone, Utc};
use num_bigint::{BigInt, BigUint, Sign};
use std::io;

impl Shaped for BigUint {
    fn shape() -> Shape {
        Shape::Integer {
            signed: false,
            bits: None,
        }
    }
}

impl Encode for BigUint {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_hex_number(false, self)
    }
}

impl Decode for BigUint {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        number::parse_big_uint(&de.decode_numeric_text("big uint")?)
    }
}

impl FromValue for BigUint {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        number::parse_big_uint(&numeric_text(value, "big uint")?)
    }
}

impl Shaped for BigInt {
    fn shape() -> Shape {
        Shape::Integer {
            signed: true,
            bits: None,
        }
    }
}

impl Encode for BigInt {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_hex_number(self.sign() == Sign::Minus, self.magnitude())
    }
}

impl Decode for BigInt {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        number::parse_big_int(&de.decode_numeric_text("big int")?)
    }
}

impl FromValue for BigInt {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        number::parse_big_int(&numeric_text(value, "big int")?)
    }
}

fn timestamp_from_text(text: &str) -> Result<DateTime<Utc>> {
    let seconds: i64 = number::parse_int(text)?;
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| Error::overflow(text, "timestamp"))
}

impl Shaped for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Integer {
            signed: true,
            bits: Some(64),
        }
    }
}

impl Encode for DateTime<Utc> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_i128(i128::from(self.timestamp()))
    }
}

impl Decode for DateTime<Utc> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        timestamp_from_text(&de.decode_numeric_text("timestamp")?)
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        timestamp_from_text(&numeric_text(value, "timestamp")?)
    }
}
