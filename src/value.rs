//! Materialized JSON value trees.
//!
//! [`Value`] is a fully parsed, re-inspectable JSON document. The tree decoder
//! ([`FromValue`](crate::FromValue)) reads from it, which is what makes union
//! resolution possible: each candidate variant can look at the same node.
//!
//! ## Number Representation
//!
//! Number literals are kept as faithfully as possible:
//!
//! - integer literals that fit an `i64` become [`Value::Integer`],
//! - literals with a fraction or exponent become [`Value::Float`],
//! - everything else (huge integers, floats outside `f64` range, integral
//!   floats of 2^53 and beyond) is kept as its source text in
//!   [`Value::NumberString`].
//!
//! ## Usage
//!
//! ```rust
//! use rpcjson::{parse_value, Value};
//!
//! let value = parse_value(r#"{"number": "0x1b4", "size": 1024}"#).unwrap();
//! assert_eq!(value.get("number").and_then(Value::as_str), Some("0x1b4"));
//! assert_eq!(value.get("size").and_then(Value::as_i64), Some(1024));
//! assert_eq!(value.to_string(), r#"{"number":"0x1b4","size":1024}"#);
//! ```

use crate::de::Deserializer;
use crate::token::{Scanner, Token};
use crate::{
    Decode, DecodeOptions, DuplicateFieldPolicy, Encode, Error, FromValue, ObjectMap, Result,
    Serializer, Shape, Shaped,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// 2^53, above which not every integer has an exact `f64`.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// A dynamically-typed JSON value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// A number literal that does not fit [`Value::Integer`] or
    /// [`Value::Float`] exactly, kept as source text.
    NumberString(String),
    String(String),
    Array(Vec<Value>),
    Object(ObjectMap),
}

impl Value {
    /// Parses a complete JSON document with default options.
    pub fn parse(input: &str) -> Result<Value> {
        Self::parse_with_options(input, &DecodeOptions::default())
    }

    /// Parses a complete JSON document. Repeated object keys are resolved
    /// according to `options.duplicate_field`.
    pub fn parse_with_options(input: &str, options: &DecodeOptions) -> Result<Value> {
        let mut scanner = Scanner::with_options(input, options);
        let value = parse_tree(&mut scanner, options)?;
        scanner.finish()?;
        Ok(value)
    }

    pub(crate) fn from_number_text(text: &str) -> Value {
        if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            match text.parse::<f64>() {
                // integral values past 2^53 may have been rounded
                Ok(f) if f.is_finite() && (f.fract() != 0.0 || f.abs() < MAX_EXACT_FLOAT) => {
                    Value::Float(f)
                }
                _ => Value::NumberString(text.to_string()),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::NumberString(text.to_string()),
            }
        }
    }

    /// Name of the JSON kind, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) | Value::Float(_) | Value::NumberString(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Float(_) | Value::NumberString(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value of a number node, including integral floats.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::NumberString(s) => s.parse().ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a key of an object node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

/// Builds a tree from the next value of a token cursor.
pub(crate) fn parse_tree(scanner: &mut Scanner<'_>, options: &DecodeOptions) -> Result<Value> {
    let token = scanner.next_token()?;
    build_tree(scanner, token, options)
}

fn build_tree(scanner: &mut Scanner<'_>, token: Token<'_>, options: &DecodeOptions) -> Result<Value> {
    match token {
        Token::Null => Ok(Value::Null),
        Token::True => Ok(Value::Bool(true)),
        Token::False => Ok(Value::Bool(false)),
        Token::Number(text) => Ok(Value::from_number_text(text)),
        Token::String(s) => Ok(Value::String(s.into_owned())),
        Token::ArrayBegin => {
            let mut items = Vec::new();
            loop {
                let token = scanner.next_token()?;
                if token == Token::ArrayEnd {
                    return Ok(Value::Array(items));
                }
                items.push(build_tree(scanner, token, options)?);
            }
        }
        Token::ObjectBegin => {
            let mut map = ObjectMap::new();
            loop {
                let key = match scanner.next_token()? {
                    Token::ObjectEnd => return Ok(Value::Object(map)),
                    Token::String(key) => key.into_owned(),
                    other => {
                        return Err(Error::unexpected_token(
                            "object key",
                            other.kind().describe(),
                        ))
                    }
                };
                let value = parse_tree(scanner, options)?;
                if map.contains_key(&key) {
                    match options.duplicate_field {
                        DuplicateFieldPolicy::Error => return Err(Error::duplicate_field(&key)),
                        DuplicateFieldPolicy::UseFirst => {
                            log::debug!("keeping first occurrence of duplicate key `{}`", key);
                            continue;
                        }
                        DuplicateFieldPolicy::UseLast => {
                            log::debug!("keeping last occurrence of duplicate key `{}`", key);
                        }
                    }
                }
                map.insert(key, value);
            }
        }
        Token::End => {
            let (line, col) = scanner.location(scanner.position());
            Err(Error::unexpected_eof(line, col, "a value"))
        }
        Token::ObjectEnd | Token::ArrayEnd => {
            let (line, col) = scanner.location(scanner.position());
            Err(Error::syntax(line, col, "expected a value"))
        }
    }
}

impl Shaped for Value {
    fn shape() -> Shape {
        Shape::Any
    }
}

/// Values are written as plain JSON: numbers stay native, strings are never
/// reinterpreted.
impl Encode for Value {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        match self {
            Value::Null => ser.write_null(),
            Value::Bool(b) => ser.write_bool(*b),
            Value::Integer(i) => ser.write_number_text(&i.to_string()),
            Value::Float(f) => ser.write_f64(*f),
            Value::NumberString(s) => ser.write_number_text(s),
            Value::String(s) => ser.write_str(s),
            Value::Array(items) => {
                ser.begin_array()?;
                for item in items {
                    item.encode(ser)?;
                }
                ser.end_array()
            }
            Value::Object(map) => {
                ser.begin_object()?;
                for (key, value) in map {
                    ser.write_key(key)?;
                    value.encode(ser)?;
                }
                ser.end_object()
            }
        }
    }
}

impl Decode for Value {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        let options = de.options().clone();
        parse_tree(de.scanner_mut(), &options)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        Ok(value.clone())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::NumberString(s) => match s.parse::<u64>() {
                Ok(u) => serializer.serialize_u64(u),
                Err(_) => serializer.serialize_str(s),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Integer(i)),
                    Err(_) => Ok(Value::NumberString(value.to_string())),
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ObjectMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                match i64::try_from(value) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::NumberString(value.to_string()),
                }
            }
        }
    )*};
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::unexpected_token("string", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::unexpected_token("boolean", other.kind_name())),
        }
    }
}
