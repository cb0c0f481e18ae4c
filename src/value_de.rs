//! Decoding typed values from a materialized [`Value`] tree.
//!
//! The tree decoder mirrors [`Decode`](crate::Decode) but reads from a node
//! that can be inspected any number of times. That is what union resolution
//! needs: each candidate variant is tried against the same node and the first
//! one that decodes wins.
//!
//! ```rust
//! use rpcjson::{from_value, parse_value};
//!
//! let tree = parse_value(r#"["0x1", "0x2"]"#).unwrap();
//! let numbers: Vec<u16> = from_value(&tree).unwrap();
//! assert_eq!(numbers, vec![1, 2]);
//! ```

use crate::de::single_char;
use crate::number::{self, Integer};
use crate::seen::{Occurrence, SeenFields};
use crate::{DecodeOptions, Error, ObjectMap, Result, Shaped, Value};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Types that can be decoded from a [`Value`] tree.
pub trait FromValue: Shaped + Sized {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self>;

    /// Value used when a record field of this type is missing from the input.
    /// `None` makes the field required.
    #[inline]
    fn absent() -> Option<Self> {
        None
    }
}

fn mismatch(expected: &str, value: &Value) -> Error {
    Error::unexpected_token(expected, value.kind_name())
}

pub fn expect_str<'a>(value: &'a Value, expected: &str) -> Result<&'a str> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(expected, other)),
    }
}

pub fn expect_array<'a>(value: &'a Value, expected: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(expected, other)),
    }
}

pub fn expect_object<'a>(value: &'a Value, expected: &str) -> Result<&'a ObjectMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(mismatch(expected, other)),
    }
}

/// Text of a number node, or the contents of a string node holding one.
pub fn numeric_text<'a>(value: &'a Value, expected: &str) -> Result<Cow<'a, str>> {
    match value {
        Value::Integer(i) => Ok(Cow::Owned(i.to_string())),
        Value::Float(f) => Ok(Cow::Owned(format!("{:?}", f))),
        Value::NumberString(s) | Value::String(s) => Ok(Cow::Borrowed(s)),
        other => Err(mismatch(expected, other)),
    }
}

fn int_from_value<T: Integer>(value: &Value) -> Result<T> {
    if let Value::Integer(i) = value {
        let (negative, magnitude) = i.to_parts();
        return T::from_parts(negative, magnitude)
            .ok_or_else(|| Error::overflow(&i.to_string(), T::NAME));
    }
    number::parse_int(&numeric_text(value, T::NAME)?)
}

/// Drives decoding of a record from an object node.
///
/// `field` is called once per declared key with its wire name and value
/// node. Keys are unique in a tree, so the duplicate policy was already
/// applied when the tree was built.
pub fn decode_record_value<F>(
    value: &Value,
    options: &DecodeOptions,
    record: &str,
    names: &[&'static str],
    has_default: &[bool],
    mut field: F,
) -> Result<()>
where
    F: FnMut(&'static str, &Value) -> Result<()>,
{
    let map = expect_object(value, record)?;
    let mut seen = SeenFields::new(names.len());
    for (key, item) in map {
        match names.iter().position(|name| *name == key.as_str()) {
            Some(index) => {
                if seen.mark(index, names[index], options.duplicate_field)? == Occurrence::Store {
                    field(names[index], item)?;
                }
            }
            None if options.ignore_unknown_fields => {
                log::trace!("{}: skipping unknown field `{}`", record, key);
            }
            None => return Err(Error::unknown_field(key)),
        }
    }
    seen.finish(names, has_default)
}

/// Tries one union variant, logging why it was rejected.
pub fn try_variant<T: FromValue>(value: &Value, options: &DecodeOptions, union: &str) -> Option<T> {
    match T::from_value(value, options) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::trace!("{}: variant {} rejected: {}", union, T::shape(), err);
            None
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            #[inline]
            fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
                int_from_value(value)
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl FromValue for f64 {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            other => number::parse_float(&numeric_text(other, "float")?),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        let text = numeric_text(value, "float")?;
        text.parse::<f32>()
            .map_err(|_| Error::invalid_number(&text))
    }
}

impl FromValue for String {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        expect_str(value, "string").map(str::to_string)
    }
}

impl FromValue for char {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        single_char(expect_str(value, "character")?)
    }
}

impl FromValue for () {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch("null", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, options).map(Some),
        }
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        T::from_value(value, options).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        expect_array(value, "array")?
            .iter()
            .map(|item| T::from_value(item, options))
            .collect()
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        let items = expect_array(value, "array")?;
        if items.len() != N {
            return Err(Error::length_mismatch(N, items.len()));
        }
        let decoded = items
            .iter()
            .map(|item| T::from_value(item, options))
            .collect::<Result<Vec<T>>>()?;
        decoded
            .try_into()
            .map_err(|items: Vec<T>| Error::length_mismatch(N, items.len()))
    }
}

macro_rules! impl_tuple {
    ($($len:literal => ($($idx:tt $name:ident)+))+) => {$(
        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
                let items = expect_array(value, "tuple")?;
                if items.len() != $len {
                    return Err(Error::length_mismatch($len, items.len()));
                }
                Ok(($($name::from_value(&items[$idx], options)?,)+))
            }
        }
    )+};
}

impl_tuple! {
    1 => (0 A)
    2 => (0 A 1 B)
    3 => (0 A 1 B 2 C)
    4 => (0 A 1 B 2 C 3 D)
    5 => (0 A 1 B 2 C 3 D 4 E)
    6 => (0 A 1 B 2 C 3 D 4 E 5 F)
    7 => (0 A 1 B 2 C 3 D 4 E 5 F 6 G)
    8 => (0 A 1 B 2 C 3 D 4 E 5 F 6 G 7 H)
}

impl<T: FromValue> FromValue for IndexMap<String, T> {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        expect_object(value, "map")?
            .iter()
            .map(|(key, item)| Ok((key.clone(), T::from_value(item, options)?)))
            .collect()
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        expect_object(value, "map")?
            .iter()
            .map(|(key, item)| Ok((key.clone(), T::from_value(item, options)?)))
            .collect()
    }
}
