//! Symbolic enumerations.
//!
//! An enumeration is written as the JSON string of its variant name. Input is
//! matched against the names first; failing that, a string or number holding
//! an integer is looked up by raw tag. Non-exhaustive enumerations keep tags
//! with no name in a catch-all variant and write them back as hex integers.
//!
//! Types implement [`Enumeration`] through [`rpc_enum!`](crate::rpc_enum),
//! which also wires up the codec traits via the functions of this module.
//!
//! ```rust
//! use rpcjson::{from_str, rpc_enum, to_string};
//!
//! rpc_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq)]
//!     pub enum TxType: u8 {
//!         Legacy = 0 => "legacy",
//!         Eip1559 = 2 => "eip1559",
//!         ..Other
//!     }
//! }
//!
//! assert_eq!(to_string(&TxType::Eip1559).unwrap(), r#""eip1559""#);
//! assert_eq!(from_str::<TxType>(r#""legacy""#).unwrap(), TxType::Legacy);
//! assert_eq!(from_str::<TxType>(r#""0x2""#).unwrap(), TxType::Eip1559);
//! assert_eq!(from_str::<TxType>("126").unwrap(), TxType::Other(126));
//! assert_eq!(to_string(&TxType::Other(126)).unwrap(), r#""0x7e""#);
//! ```

use crate::de::Deserializer;
use crate::number;
use crate::token::Token;
use crate::value_de::numeric_text;
use crate::{DecodeOptions, Error, Result, Serializer, Shape, Value};
use std::io;

/// A closed or open set of named integer tags.
pub trait Enumeration: Sized {
    const NAME: &'static str;
    /// Wire names of the named variants, in declaration order.
    const VARIANTS: &'static [&'static str];
    /// `false` when unnamed tags are kept instead of rejected.
    const EXHAUSTIVE: bool;

    fn from_name(name: &str) -> Option<Self>;
    fn from_tag(tag: i128) -> Option<Self>;
    /// Wire name of this variant; `None` for an unnamed tag.
    fn name(&self) -> Option<&'static str>;
    fn tag(&self) -> i128;
}

pub fn shape<E: Enumeration>() -> Shape {
    Shape::Enumeration {
        name: E::NAME,
        variants: E::VARIANTS,
        exhaustive: E::EXHAUSTIVE,
    }
}

pub fn encode<E: Enumeration, W: io::Write>(value: &E, ser: &mut Serializer<W>) -> Result<()> {
    match value.name() {
        Some(name) => ser.write_str(name),
        None => ser.write_i128(value.tag()),
    }
}

pub fn decode<E: Enumeration>(de: &mut Deserializer<'_>) -> Result<E> {
    match de.next_token()? {
        Token::String(text) => from_text(&text, false),
        Token::Number(text) => from_text(text, true),
        other => Err(Error::unexpected_token(
            &format!("enum {}", E::NAME),
            other.kind().describe(),
        )),
    }
}

pub fn from_value<E: Enumeration>(value: &Value, _options: &DecodeOptions) -> Result<E> {
    match value {
        Value::String(text) => from_text(text, false),
        Value::Integer(tag) => from_tag(i128::from(*tag), &tag.to_string()),
        Value::NumberString(text) => from_text(text, true),
        Value::Float(_) => from_text(&numeric_text(value, E::NAME)?, true),
        other => Err(Error::unexpected_token(
            &format!("enum {}", E::NAME),
            other.kind_name(),
        )),
    }
}

fn from_text<E: Enumeration>(text: &str, number_token: bool) -> Result<E> {
    if !number_token {
        if let Some(variant) = E::from_name(text) {
            return Ok(variant);
        }
    }
    if number_token || number::looks_numeric(text) {
        let tag: i128 =
            number::parse_int(text).map_err(|_| Error::invalid_enum_tag(E::NAME, text))?;
        return from_tag(tag, text);
    }
    Err(Error::invalid_enum_tag(E::NAME, text))
}

fn from_tag<E: Enumeration>(tag: i128, text: &str) -> Result<E> {
    E::from_tag(tag).ok_or_else(|| Error::invalid_enum_tag(E::NAME, text))
}

#[cfg(test)]
mod tests {
    use crate::{
        from_str, from_str_buffered, from_value, rpc_enum, to_string, ErrorKind, Shaped, Value,
    };

    rpc_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Status: u8 {
            Failure = 0 => "failure",
            Success = 1 => "success",
        }
    }

    rpc_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Chain: u64 {
            Mainnet = 1 => "mainnet",
            Sepolia = 11155111,
            ..Custom
        }
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(to_string(&Status::Success).unwrap(), r#""success""#);
        assert_eq!(from_str::<Status>(r#""failure""#).unwrap(), Status::Failure);
        assert_eq!(to_string(&Chain::Sepolia).unwrap(), r#""Sepolia""#);
    }

    #[test]
    fn test_tags() {
        assert_eq!(from_str::<Status>("1").unwrap(), Status::Success);
        assert_eq!(from_str::<Status>(r#""0x0""#).unwrap(), Status::Failure);
        assert_eq!(
            from_value::<Status>(&Value::Integer(1)).unwrap(),
            Status::Success
        );
    }

    #[test]
    fn test_float_form_tag_in_both_decoders() {
        assert_eq!(from_str::<Status>("1e0").unwrap(), Status::Success);
        assert_eq!(from_str_buffered::<Status>("1e0").unwrap(), Status::Success);
        assert_eq!(from_str_buffered::<Chain>("1.37e2").unwrap(), Chain::Custom(137));
        assert_eq!(
            from_str_buffered::<Status>("0.5").unwrap_err().kind(),
            ErrorKind::InvalidEnumTag
        );
    }

    #[test]
    fn test_exhaustive_rejects_unknown() {
        let err = from_str::<Status>("7").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumTag);
        let err = from_str::<Status>(r#""pending""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumTag);
        let err = from_str::<Status>("[]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_open_enumeration_keeps_raw_tag() {
        let chain: Chain = from_str(r#""0x89""#).unwrap();
        assert_eq!(chain, Chain::Custom(137));
        assert_eq!(to_string(&chain).unwrap(), r#""0x89""#);
        assert_eq!(from_str::<Chain>(r#""0x1""#).unwrap(), Chain::Mainnet);
        assert_eq!(
            from_str::<Chain>(r#""goerli""#).unwrap_err().kind(),
            ErrorKind::InvalidEnumTag
        );
    }

    rpc_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Offset: i128 {
            Zero = 0 => "zero",
            ..Raw
        }
    }

    #[test]
    fn test_widest_tags_round_trip() {
        let max = Chain::Custom(u64::MAX);
        assert_eq!(to_string(&max).unwrap(), r#""0xffffffffffffffff""#);
        assert_eq!(from_str::<Chain>(r#""0xffffffffffffffff""#).unwrap(), max);

        for raw in [i128::MIN, -5, i128::MAX] {
            let json = to_string(&Offset::Raw(raw)).unwrap();
            assert_eq!(from_str::<Offset>(&json).unwrap(), Offset::Raw(raw));
        }
        assert_eq!(to_string(&Offset::Raw(-5)).unwrap(), r#""-0x5""#);
    }

    #[test]
    fn test_shape() {
        match Chain::shape() {
            crate::Shape::Enumeration {
                name,
                variants,
                exhaustive,
            } => {
                assert_eq!(name, "Chain");
                assert_eq!(variants, &["mainnet", "Sepolia"]);
                assert!(!exhaustive);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
