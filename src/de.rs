//! Streaming JSON-RPC decoding.
//!
//! This module provides the [`Decode`] trait and the [`Deserializer`] that
//! reads typed values directly from the token stream, without building a
//! [`Value`](crate::Value) tree.
//!
//! ## Overview
//!
//! - **Single pass**: each token is inspected once, in document order
//! - **Lenient integers**: hex strings, decimal strings and JSON numbers are
//!   all accepted for integer targets
//! - **Records**: unknown keys, duplicate keys and missing fields are handled
//!   according to [`DecodeOptions`]
//!
//! Union types cannot be read this way because choosing a variant needs
//! lookahead; they implement [`FromValue`](crate::FromValue) only and are
//! decoded with [`from_str_buffered`](crate::from_str_buffered).
//!
//! ## Usage
//!
//! ```rust
//! use rpcjson::from_str;
//!
//! let numbers: Vec<u64> = from_str(r#"["0x1", "0x4d2", 7]"#).unwrap();
//! assert_eq!(numbers, vec![1, 1234, 7]);
//!
//! let pair: (bool, String) = from_str(r#"[true, "0xdead"]"#).unwrap();
//! assert_eq!(pair, (true, "0xdead".to_string()));
//! ```

use crate::number::{self, Integer};
use crate::seen::{Occurrence, SeenFields};
use crate::token::{Scanner, Token, TokenKind};
use crate::{DecodeOptions, DuplicateFieldPolicy, Error, Result, Shaped};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Types that can be read from the token stream.
pub trait Decode: Shaped + Sized {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self>;

    /// Value used when a record field of this type is missing from the input.
    /// `None` makes the field required.
    #[inline]
    fn absent() -> Option<Self> {
        None
    }
}

/// The streaming JSON-RPC deserializer.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
/// After the top-level value is decoded, [`Deserializer::end`] checks that
/// only whitespace remains.
pub struct Deserializer<'de> {
    scanner: Scanner<'de>,
    options: DecodeOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    pub fn with_options(input: &'de str, options: DecodeOptions) -> Self {
        Deserializer {
            scanner: Scanner::with_options(input, &options),
            options,
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner<'de> {
        &mut self.scanner
    }

    pub fn peek_kind(&mut self) -> Result<TokenKind> {
        self.scanner.peek_kind()
    }

    pub fn next_token(&mut self) -> Result<Token<'de>> {
        self.scanner.next_token()
    }

    /// Consumes the next value, whatever its shape.
    pub fn skip_value(&mut self) -> Result<()> {
        self.scanner.skip_value()
    }

    /// Fails unless only whitespace remains.
    pub fn end(&mut self) -> Result<()> {
        self.scanner.finish()
    }

    pub fn decode_null(&mut self) -> Result<()> {
        match self.next_token()? {
            Token::Null => Ok(()),
            other => Err(unexpected("null", &other)),
        }
    }

    pub fn decode_bool(&mut self) -> Result<bool> {
        match self.next_token()? {
            Token::True => Ok(true),
            Token::False => Ok(false),
            other => Err(unexpected("boolean", &other)),
        }
    }

    pub(crate) fn decode_int<T: Integer>(&mut self) -> Result<T> {
        let text = self.decode_numeric_text(T::NAME)?;
        number::parse_int(&text)
    }

    /// Reads the text of a JSON number, or the contents of a string holding
    /// one.
    pub fn decode_numeric_text(&mut self, expected: &str) -> Result<Cow<'de, str>> {
        match self.next_token()? {
            Token::Number(text) => Ok(Cow::Borrowed(text)),
            Token::String(text) => Ok(text),
            other => Err(unexpected(expected, &other)),
        }
    }

    pub fn decode_string(&mut self, expected: &str) -> Result<Cow<'de, str>> {
        match self.next_token()? {
            Token::String(text) => Ok(text),
            other => Err(unexpected(expected, &other)),
        }
    }

    /// Reads a string token of at most `max_len` bytes; a longer one fails
    /// with [`Error::StringTooLong`].
    pub fn decode_string_bounded(
        &mut self,
        expected: &str,
        max_len: usize,
    ) -> Result<Cow<'de, str>> {
        match self.scanner.next_token_bounded(max_len)? {
            Token::String(text) => Ok(text),
            other => Err(unexpected(expected, &other)),
        }
    }

    pub fn decode_option<T: Decode>(&mut self) -> Result<Option<T>> {
        if self.peek_kind()? == TokenKind::Null {
            self.next_token()?;
            return Ok(None);
        }
        T::decode(self).map(Some)
    }

    pub fn begin_array(&mut self, expected: &str) -> Result<()> {
        match self.next_token()? {
            Token::ArrayBegin => Ok(()),
            other => Err(unexpected(expected, &other)),
        }
    }

    /// Returns `true` if another array element follows. The closing bracket
    /// is consumed when it returns `false`.
    pub fn has_next_element(&mut self) -> Result<bool> {
        if self.peek_kind()? == TokenKind::ArrayEnd {
            self.next_token()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Requires element `index` of an array of exactly `len` elements.
    pub fn expect_element(&mut self, len: usize, index: usize) -> Result<()> {
        if self.has_next_element()? {
            Ok(())
        } else {
            Err(Error::length_mismatch(len, index))
        }
    }

    /// Closes an array of exactly `len` elements, counting any surplus for
    /// the error.
    pub fn end_fixed_array(&mut self, len: usize) -> Result<()> {
        let mut found = len;
        while self.has_next_element()? {
            self.skip_value()?;
            found += 1;
        }
        if found == len {
            Ok(())
        } else {
            Err(Error::length_mismatch(len, found))
        }
    }

    pub fn begin_object(&mut self, expected: &str) -> Result<()> {
        match self.next_token()? {
            Token::ObjectBegin => Ok(()),
            other => Err(unexpected(expected, &other)),
        }
    }

    /// Reads the next key of the current object, or `None` once the closing
    /// brace is consumed.
    pub fn next_key(&mut self) -> Result<Option<Cow<'de, str>>> {
        match self.next_token()? {
            Token::String(key) => Ok(Some(key)),
            Token::ObjectEnd => Ok(None),
            other => Err(unexpected("object key", &other)),
        }
    }

    /// Drives decoding of a record object.
    ///
    /// `names` lists the wire names of the declared fields and `has_default`
    /// whether each may be absent. For every declared key, `field` is called
    /// with the wire name and whether the value should be stored or dropped;
    /// it must consume exactly one value. Unknown keys are skipped or
    /// rejected according to the options.
    pub fn decode_record<F>(
        &mut self,
        record: &str,
        names: &[&'static str],
        has_default: &[bool],
        mut field: F,
    ) -> Result<()>
    where
        F: FnMut(&mut Self, &'static str, Occurrence) -> Result<()>,
    {
        self.begin_object(record)?;
        let mut seen = SeenFields::new(names.len());
        while let Some(key) = self.next_key()? {
            match names.iter().position(|name| *name == key) {
                Some(index) => {
                    let occurrence = seen.mark(index, names[index], self.options.duplicate_field)?;
                    field(self, names[index], occurrence)?;
                }
                None if self.options.ignore_unknown_fields => {
                    log::trace!("{}: skipping unknown field `{}`", record, key);
                    self.skip_value()?;
                }
                None => return Err(Error::unknown_field(&key)),
            }
        }
        seen.finish(names, has_default)
    }
}

fn unexpected(expected: &str, found: &Token<'_>) -> Error {
    Error::unexpected_token(expected, found.kind().describe())
}

impl Decode for bool {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.decode_bool()
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            #[inline]
            fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
                de.decode_int()
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Decode for f64 {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        let text = de.decode_numeric_text("float")?;
        number::parse_float(&text)
    }
}

impl Decode for f32 {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        let text = de.decode_numeric_text("float")?;
        text.parse::<f32>()
            .map_err(|_| Error::invalid_number(&text))
    }
}

impl Decode for String {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.decode_string("string").map(Cow::into_owned)
    }
}

impl Decode for char {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        let text = de.decode_string("character")?;
        single_char(&text)
    }
}

pub(crate) fn single_char(text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::length_mismatch(1, text.chars().count())),
    }
}

impl Decode for () {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.decode_null()
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.decode_option()
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        T::decode(de).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.begin_array("array")?;
        let mut items = Vec::new();
        while de.has_next_element()? {
            items.push(T::decode(de)?);
        }
        Ok(items)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.begin_array("array")?;
        let mut items = Vec::with_capacity(N);
        for index in 0..N {
            de.expect_element(N, index)?;
            items.push(T::decode(de)?);
        }
        de.end_fixed_array(N)?;
        items
            .try_into()
            .map_err(|items: Vec<T>| Error::length_mismatch(N, items.len()))
    }
}

macro_rules! impl_tuple {
    ($($len:literal => ($($idx:tt $name:ident)+))+) => {$(
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
                de.begin_array("tuple")?;
                let value = ($(
                    {
                        de.expect_element($len, $idx)?;
                        $name::decode(de)?
                    },
                )+);
                de.end_fixed_array($len)?;
                Ok(value)
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

/// Whether an entry read from a map should be stored, given whether its key
/// was already present.
fn keep_entry(policy: DuplicateFieldPolicy, exists: bool, key: &str) -> Result<bool> {
    if !exists {
        return Ok(true);
    }
    match policy {
        DuplicateFieldPolicy::Error => Err(Error::duplicate_field(key)),
        DuplicateFieldPolicy::UseFirst => Ok(false),
        DuplicateFieldPolicy::UseLast => Ok(true),
    }
}

impl<T: Decode> Decode for IndexMap<String, T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.begin_object("map")?;
        let mut map = IndexMap::new();
        while let Some(key) = de.next_key()? {
            let value = T::decode(de)?;
            if keep_entry(de.options.duplicate_field, map.contains_key(&*key), &key)? {
                map.insert(key.into_owned(), value);
            }
        }
        Ok(map)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.begin_object("map")?;
        let mut map = BTreeMap::new();
        while let Some(key) = de.next_key()? {
            let value = T::decode(de)?;
            if keep_entry(de.options.duplicate_field, map.contains_key(&*key), &key)? {
                map.insert(key.into_owned(), value);
            }
        }
        Ok(map)
    }
}
