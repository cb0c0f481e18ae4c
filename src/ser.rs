//! JSON-RPC encoding.
//!
//! This module provides the [`Encode`] trait and the streaming [`Serializer`]
//! that writes values straight to an [`io::Write`] sink.
//!
//! ## Overview
//!
//! The serializer never builds an intermediate tree. Each token is written as
//! soon as it is known, with a [`Punctuation`] state deciding which separator
//! precedes it:
//!
//! - **Integers**: quoted lowercase hex, `"0x4d2"`, `"-0x1"`
//! - **Addresses**: 20-byte buffers as EIP-55 checksummed hex
//! - **Other byte buffers**: plain lowercase `0x` hex
//! - **Text**: an ordinary escaped JSON string
//! - **Records**: objects, with absent optional fields omitted unless
//!   [`EncodeOptions::emit_null_optional_fields`] is set
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! let json = rpcjson::to_string(&vec![1u32, 1234]).unwrap();
//! assert_eq!(json, r#"["0x1","0x4d2"]"#);
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use rpcjson::Serializer;
//!
//! let mut ser = Serializer::new(Vec::new());
//! ser.begin_object().unwrap();
//! ser.encode_field("gas", &21000u64).unwrap();
//! ser.encode_field("nonce", &None::<u64>).unwrap();
//! ser.end_object().unwrap();
//!
//! assert_eq!(ser.into_inner(), br#"{"gas":"0x5208"}"#);
//! ```

use crate::checksum;
use crate::number::Integer;
use crate::punctuation::Punctuation;
use crate::{EncodeOptions, Result, Shape, Shaped};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::io;

/// Types that can be written as JSON-RPC JSON.
pub trait Encode: Shaped {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()>;

    /// Whether this value is an absent optional, which record encoding omits.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

/// The streaming JSON-RPC serializer.
///
/// Created via [`Serializer::new`] or [`Serializer::with_options`]; the sink
/// is recovered with [`Serializer::into_inner`]. Completing a top-level value
/// returns the serializer to its initial state, so consecutive top-level
/// values are written back to back with no separator.
pub struct Serializer<W> {
    writer: W,
    options: EncodeOptions,
    punctuation: Punctuation,
    /// Number of open arrays and objects.
    depth: usize,
}

impl<W: io::Write> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncodeOptions::default())
    }

    pub fn with_options(writer: W, options: EncodeOptions) -> Self {
        Serializer {
            writer,
            options,
            punctuation: Punctuation::Beginning,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    fn begin_value(&mut self) -> Result<()> {
        if let Some(separator) = self.punctuation.separator() {
            self.writer.write_all(&[separator])?;
        }
        Ok(())
    }

    #[inline]
    fn end_value(&mut self) {
        self.punctuation = if self.depth == 0 {
            Punctuation::Beginning
        } else {
            Punctuation::Comma
        };
    }

    fn scalar<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        self.begin_value()?;
        write(&mut self.writer)?;
        self.end_value();
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.scalar(|w| w.write_all(b"null"))
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.scalar(|w| w.write_all(if value { b"true" } else { b"false" }))
    }

    /// Writes a quoted hex integer from its sign and magnitude.
    pub fn write_hex_number<H: fmt::LowerHex>(&mut self, negative: bool, magnitude: H) -> Result<()> {
        let sign = if negative { "-" } else { "" };
        self.scalar(|w| write!(w, "\"{}0x{:x}\"", sign, magnitude))
    }

    pub fn write_u128(&mut self, value: u128) -> Result<()> {
        self.write_hex_number(false, value)
    }

    pub fn write_i128(&mut self, value: i128) -> Result<()> {
        self.write_hex_number(value < 0, value.unsigned_abs())
    }

    /// Writes pre-validated JSON number text unquoted.
    pub fn write_number_text(&mut self, text: &str) -> Result<()> {
        self.scalar(|w| w.write_all(text.as_bytes()))
    }

    /// Writes the shortest text that reads back as the same `f64`.
    ///
    /// JSON has no literal for NaN or the infinities; they are written as the
    /// strings `"NaN"`, `"inf"` and `"-inf"`.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        if value.is_finite() {
            self.scalar(|w| write!(w, "{:?}", value))
        } else {
            self.write_str(non_finite_name(value))
        }
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        if value.is_finite() {
            self.scalar(|w| write!(w, "{:?}", value))
        } else {
            self.write_str(non_finite_name(f64::from(value)))
        }
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.scalar(|w| write_escaped(w, value))
    }

    /// Writes bytes as a quoted `0x`-prefixed lowercase hex string.
    pub fn write_hex_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.scalar(|w| {
            w.write_all(b"\"0x")?;
            w.write_all(hex::encode(bytes).as_bytes())?;
            w.write_all(b"\"")
        })
    }

    /// Writes an address in EIP-55 mixed-case form.
    pub fn write_address(&mut self, address: &[u8; 20]) -> Result<()> {
        let text = checksum::to_checksum(address);
        self.scalar(|w| write!(w, "\"{}\"", text))
    }

    /// Writes a fixed-size buffer: checksummed when it is 20 bytes long,
    /// plain hex otherwise.
    pub fn write_fixed_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match <&[u8; 20]>::try_from(bytes) {
            Ok(address) => self.write_address(address),
            Err(_) => self.write_hex_bytes(bytes),
        }
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.begin_value()?;
        self.writer.write_all(b"[")?;
        self.depth += 1;
        self.punctuation = Punctuation::None;
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<()> {
        debug_assert!(
            self.punctuation.can_close(),
            "array closed in state {:?}",
            self.punctuation
        );
        self.writer.write_all(b"]")?;
        self.depth = self.depth.saturating_sub(1);
        self.end_value();
        Ok(())
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.begin_value()?;
        self.writer.write_all(b"{")?;
        self.depth += 1;
        self.punctuation = Punctuation::None;
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<()> {
        debug_assert!(
            self.punctuation.can_close(),
            "object closed in state {:?}",
            self.punctuation
        );
        self.writer.write_all(b"}")?;
        self.depth = self.depth.saturating_sub(1);
        self.end_value();
        Ok(())
    }

    /// Writes an object key; the next value written becomes its value.
    pub fn write_key(&mut self, key: &str) -> Result<()> {
        debug_assert!(
            self.punctuation.can_write_key(),
            "key `{}` written in state {:?}",
            key,
            self.punctuation
        );
        self.begin_value()?;
        write_escaped(&mut self.writer, key)?;
        self.punctuation = Punctuation::Colon;
        Ok(())
    }

    /// Writes one record field, skipping absent optionals unless the options
    /// ask for explicit nulls.
    pub fn encode_field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        if value.is_absent() && !self.options.emit_null_optional_fields {
            return Ok(());
        }
        self.write_key(name)?;
        value.encode(self)
    }

    /// Writes every item of a sequence as a JSON array.
    pub fn encode_seq<'a, T, I>(&mut self, items: I) -> Result<()>
    where
        T: Encode + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.begin_array()?;
        for item in items {
            item.encode(self)?;
        }
        self.end_array()
    }

    /// Writes string-keyed entries as a JSON object. Null values are kept.
    pub fn encode_map<'a, K, T, I>(&mut self, entries: I) -> Result<()>
    where
        K: AsRef<str> + 'a,
        T: Encode + 'a,
        I: IntoIterator<Item = (&'a K, &'a T)>,
    {
        self.begin_object()?;
        for (key, value) in entries {
            self.write_key(key.as_ref())?;
            value.encode(self)?;
        }
        self.end_object()
    }
}

fn non_finite_name(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn write_escaped<W: io::Write + ?Sized>(w: &mut W, s: &str) -> io::Result<()> {
    w.write_all(b"\"")?;
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape: &[u8] = match byte {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            0x00..=0x1f => b"",
            _ => continue,
        };
        if start < i {
            w.write_all(&bytes[start..i])?;
        }
        if escape.is_empty() {
            write!(w, "\\u{:04x}", byte)?;
        } else {
            w.write_all(escape)?;
        }
        start = i + 1;
    }
    if start < bytes.len() {
        w.write_all(&bytes[start..])?;
    }
    w.write_all(b"\"")
}

impl Shaped for bool {
    fn shape() -> Shape {
        Shape::Bool
    }
}

impl Encode for bool {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_bool(*self)
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl Shaped for $ty {
            fn shape() -> Shape {
                Shape::Integer {
                    signed: <$ty as Integer>::SIGNED,
                    bits: Some(<$ty as Integer>::BITS),
                }
            }
        }

        impl Encode for $ty {
            #[inline]
            fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
                let (negative, magnitude) = Integer::to_parts(*self);
                ser.write_hex_number(negative, magnitude)
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Shaped for f64 {
    fn shape() -> Shape {
        Shape::Float
    }
}

impl Encode for f64 {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_f64(*self)
    }
}

impl Shaped for f32 {
    fn shape() -> Shape {
        Shape::Float
    }
}

impl Encode for f32 {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_f32(*self)
    }
}

impl Shaped for str {
    fn shape() -> Shape {
        Shape::Text
    }
}

impl Encode for str {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_str(self)
    }
}

impl Shaped for String {
    fn shape() -> Shape {
        Shape::Text
    }
}

impl Encode for String {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_str(self)
    }
}

impl Shaped for Cow<'_, str> {
    fn shape() -> Shape {
        Shape::Text
    }
}

impl Encode for Cow<'_, str> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_str(self)
    }
}

impl Shaped for char {
    fn shape() -> Shape {
        Shape::Text
    }
}

impl Encode for char {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        let mut buf = [0u8; 4];
        ser.write_str(self.encode_utf8(&mut buf))
    }
}

impl Shaped for () {
    fn shape() -> Shape {
        Shape::Null
    }
}

impl Encode for () {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_null()
    }
}

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        match self {
            Some(value) => value.encode(ser),
            None => ser.write_null(),
        }
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: Shaped + ?Sized> Shaped for &T {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        (**self).encode(ser)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Shaped + ?Sized> Shaped for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        (**self).encode(ser)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Shaped> Shaped for [T] {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.encode_seq(self)
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.encode_seq(self)
    }
}

/// Native arrays are fixed-length JSON arrays, not byte buffers; use
/// [`FixedBytes`](crate::FixedBytes) for hex.
impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape() -> Shape {
        Shape::Tuple((0..N).map(|_| T::shape()).collect())
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.encode_seq(self)
    }
}

macro_rules! impl_tuple {
    ($(($($idx:tt $name:ident)+))+) => {$(
        impl<$($name: Shaped),+> Shaped for ($($name,)+) {
            fn shape() -> Shape {
                Shape::Tuple(vec![$($name::shape()),+])
            }
        }

        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
                ser.begin_array()?;
                $(self.$idx.encode(ser)?;)+
                ser.end_array()
            }
        }
    )+};
}

impl_tuple! {
    (0 A)
    (0 A 1 B)
    (0 A 1 B 2 C)
    (0 A 1 B 2 C 3 D)
    (0 A 1 B 2 C 3 D 4 E)
    (0 A 1 B 2 C 3 D 4 E 5 F)
    (0 A 1 B 2 C 3 D 4 E 5 F 6 G)
    (0 A 1 B 2 C 3 D 4 E 5 F 6 G 7 H)
}

impl<T: Shaped> Shaped for IndexMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(T::shape()))
    }
}

impl<T: Encode> Encode for IndexMap<String, T> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.encode_map(self)
    }
}

impl<T: Shaped> Shaped for BTreeMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(T::shape()))
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.encode_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_string;

    fn encode<T: Encode + ?Sized>(value: &T) -> String {
        let mut ser = Serializer::new(Vec::new());
        value.encode(&mut ser).unwrap();
        String::from_utf8(ser.into_inner()).unwrap()
    }

    #[test]
    fn test_integers_are_quoted_hex() {
        assert_eq!(encode(&1234u32), r#""0x4d2""#);
        assert_eq!(encode(&0u8), r#""0x0""#);
        assert_eq!(encode(&-1i64), r#""-0x1""#);
        assert_eq!(encode(&i8::MIN), r#""-0x80""#);
        assert_eq!(encode(&u128::MAX), format!("\"0x{}\"", "f".repeat(32)));
    }

    #[test]
    fn test_floats() {
        assert_eq!(encode(&2.5f64), "2.5");
        assert_eq!(encode(&1.0f64), "1.0");
        assert_eq!(encode(&0.1f32), "0.1");
        assert_eq!(encode(&f64::NAN), r#""NaN""#);
        assert_eq!(encode(&f64::INFINITY), r#""inf""#);
        assert_eq!(encode(&f64::NEG_INFINITY), r#""-inf""#);
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(encode("plain"), r#""plain""#);
        assert_eq!(encode("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(encode("line\nbreak\t"), r#""line\nbreak\t""#);
        assert_eq!(encode("\u{1}"), r#""\u0001""#);
        assert_eq!(encode("caf\u{e9}"), "\"caf\u{e9}\"");
    }

    #[test]
    fn test_text_is_not_hex() {
        assert_eq!(encode("0xdead"), r#""0xdead""#);
        assert_eq!(encode(&'x'), r#""x""#);
    }

    #[test]
    fn test_nested_punctuation() {
        let value = vec![vec![1u8, 2], vec![], vec![3]];
        assert_eq!(encode(&value), r#"[["0x1","0x2"],[],["0x3"]]"#);
        assert_eq!(encode(&(true, "x", 5u8)), r#"[true,"x","0x5"]"#);
        assert_eq!(encode(&[1u8, 2, 3]), r#"["0x1","0x2","0x3"]"#);
        assert_eq!(encode(&()), "null");
    }

    #[test]
    fn test_serializer_reuse_starts_fresh() {
        let mut ser = Serializer::new(Vec::new());
        vec![1u8].encode(&mut ser).unwrap();
        assert_eq!(ser.punctuation, Punctuation::Beginning);
        true.encode(&mut ser).unwrap();
        7u8.encode(&mut ser).unwrap();
        let out = String::from_utf8(ser.into_inner()).unwrap();
        assert_eq!(out, r#"["0x1"]true"0x7""#);
    }

    #[test]
    fn test_fixed_bytes_dispatch() {
        let mut ser = Serializer::new(Vec::new());
        ser.begin_array().unwrap();
        ser.write_fixed_bytes(&[0xab; 4]).unwrap();
        ser.write_fixed_bytes(&[0u8; 20]).unwrap();
        ser.end_array().unwrap();
        let out = String::from_utf8(ser.into_inner()).unwrap();
        assert_eq!(
            out,
            r#"["0xabababab","0x0000000000000000000000000000000000000000"]"#
        );
    }

    #[test]
    fn test_fields_omit_absent_optionals() {
        let mut ser = Serializer::new(Vec::new());
        ser.begin_object().unwrap();
        ser.encode_field("a", &None::<u8>).unwrap();
        ser.encode_field("b", &Some(1u8)).unwrap();
        ser.encode_field("c", &None::<u8>).unwrap();
        ser.end_object().unwrap();
        assert_eq!(ser.into_inner(), br#"{"b":"0x1"}"#);

        let options = EncodeOptions::new().with_emit_null_optional_fields(true);
        let mut ser = Serializer::with_options(Vec::new(), options);
        ser.begin_object().unwrap();
        ser.encode_field("a", &None::<u8>).unwrap();
        ser.encode_field("b", &Some(1u8)).unwrap();
        ser.end_object().unwrap();
        assert_eq!(ser.into_inner(), br#"{"a":null,"b":"0x1"}"#);
    }

    #[test]
    fn test_maps_keep_order_and_nulls() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), None::<u8>);
        map.insert("a".to_string(), Some(10u8));
        assert_eq!(to_string(&map).unwrap(), r#"{"z":null,"a":"0xa"}"#);

        let mut sorted = BTreeMap::new();
        sorted.insert("z".to_string(), 1u8);
        sorted.insert("a".to_string(), 2u8);
        assert_eq!(to_string(&sorted).unwrap(), r#"{"a":"0x2","z":"0x1"}"#);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(
            u64::shape(),
            Shape::Integer {
                signed: false,
                bits: Some(64)
            }
        );
        assert_eq!(<(u8, bool)>::shape().to_string(), "(u8, boolean)");
        assert_eq!(Vec::<String>::shape().to_string(), "list of string");
    }
}
