//! Byte buffer types.
//!
//! JSON-RPC carries binary data as `0x`-prefixed hex strings. The wire form
//! depends on the Rust type, never on the contents:
//!
//! - [`FixedBytes<N>`]: exactly `N` bytes; plain hex, except that 20-byte
//!   buffers ([`Address`]) are written with an EIP-55 checksum
//! - [`Bytes`]: any number of bytes, plain hex
//!
//! Ordinary strings (`String`, `&str`) are text and are never hex-encoded.
//!
//! ```rust
//! use rpcjson::{from_str, to_string, Address, Bytes, B256};
//!
//! let address: Address = from_str(r#""0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed""#).unwrap();
//! assert_eq!(
//!     to_string(&address).unwrap(),
//!     r#""0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed""#
//! );
//!
//! let data = Bytes::from(vec![0xde, 0xad]);
//! assert_eq!(to_string(&data).unwrap(), r#""0xdead""#);
//!
//! assert_eq!(B256::ZERO.as_slice().len(), 32);
//! ```

use crate::checksum;
use crate::de::Deserializer;
use crate::value_de;
use crate::{
    Decode, DecodeOptions, Encode, Error, FromValue, Result, Serializer, Shape, Shaped, Value,
};
use std::fmt;
use std::io;
use std::ops::Deref;
use std::str::FromStr;

/// Decodes a fixed-size buffer from its string form.
///
/// An optional `0x` prefix is stripped. If the rest is well-formed hex it must
/// decode to exactly `N` bytes; otherwise the raw characters are taken as the
/// bytes themselves, which again must number exactly `N`.
pub(crate) fn fixed_from_str<const N: usize>(s: &str) -> Result<[u8; N]> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let mut out = [0u8; N];
    match hex::decode(digits) {
        Ok(decoded) => {
            if decoded.len() != N {
                return Err(Error::length_mismatch(N, decoded.len()));
            }
            out.copy_from_slice(&decoded);
        }
        Err(_) => {
            if digits.len() != N {
                return Err(Error::length_mismatch(N, digits.len()));
            }
            log::trace!("`{}` is not hex, taking its raw bytes", s);
            out.copy_from_slice(digits.as_bytes());
        }
    }
    Ok(out)
}

/// Longest string a `FixedBytes<N>` can be decoded from: `0x` plus two hex
/// digits per byte.
const fn max_fixed_text_len(n: usize) -> usize {
    2 + 2 * n
}

fn check_fixed_text_len<const N: usize>(text: &str) -> Result<()> {
    let max = max_fixed_text_len(N);
    if text.len() > max {
        return Err(Error::StringTooLong {
            len: text.len(),
            max,
        });
    }
    Ok(())
}

/// Decodes a variable-length buffer; the hex must have an even number of
/// digits.
pub(crate) fn bytes_from_str(s: &str) -> Result<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() % 2 != 0 {
        return Err(Error::invalid_character(s));
    }
    hex::decode(digits).map_err(|_| Error::invalid_character(s))
}

/// A buffer of exactly `N` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

/// A 20-byte account address.
pub type Address = FixedBytes<20>;

/// A 32-byte hash or storage word.
pub type B256 = FixedBytes<32>;

impl<const N: usize> FixedBytes<N> {
    pub const ZERO: Self = FixedBytes([0u8; N]);

    #[must_use]
    pub const fn new(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }

    /// Copies a slice of exactly `N` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        <[u8; N]>::try_from(bytes)
            .map(FixedBytes)
            .map_err(|_| Error::length_mismatch(N, bytes.len()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> [u8; N] {
        self.0
    }
}

impl Address {
    /// The EIP-55 checksummed form of this address.
    #[must_use]
    pub fn to_checksum(&self) -> String {
        checksum::to_checksum(&self.0)
    }

    /// Parses a `0x`-prefixed address, verifying the checksum when the input
    /// is mixed-case.
    pub fn parse_checksummed(s: &str) -> Result<Self> {
        checksum::parse_address(s).map(FixedBytes)
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }
}

impl<const N: usize> From<FixedBytes<N>> for [u8; N] {
    fn from(bytes: FixedBytes<N>) -> Self {
        bytes.0
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Deref for FixedBytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> FromStr for FixedBytes<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        fixed_from_str(s).map(FixedBytes)
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match <&[u8; 20]>::try_from(self.as_slice()) {
            Ok(address) => f.write_str(&checksum::to_checksum(address)),
            Err(_) => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const N: usize> Shaped for FixedBytes<N> {
    fn shape() -> Shape {
        Shape::FixedBytes(N)
    }
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_fixed_bytes(&self.0)
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        let text = de.decode_string_bounded(&Self::shape().to_string(), max_fixed_text_len(N))?;
        text.parse()
    }
}

impl<const N: usize> FromValue for FixedBytes<N> {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        let text = value_de::expect_str(value, &Self::shape().to_string())?;
        check_fixed_text_len::<N>(text)?;
        text.parse()
    }
}

/// An owned byte sequence of any length.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    #[must_use]
    pub const fn new() -> Self {
        Bytes(Vec::new())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(bytes: Bytes) -> Self {
        bytes.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Bytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        bytes_from_str(s).map(Bytes)
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Shaped for Bytes {
    fn shape() -> Shape {
        Shape::Bytes
    }
}

impl Encode for Bytes {
    fn encode<W: io::Write>(&self, ser: &mut Serializer<W>) -> Result<()> {
        ser.write_hex_bytes(&self.0)
    }
}

impl Decode for Bytes {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self> {
        de.decode_string("bytes")?.parse()
    }
}

impl FromValue for Bytes {
    fn from_value(value: &Value, _options: &DecodeOptions) -> Result<Self> {
        value_de::expect_str(value, "bytes")?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_str, from_str_buffered, to_string, ErrorKind};

    #[test]
    fn test_fixed_hex() {
        let word: FixedBytes<4> = "0xdeadbeef".parse().unwrap();
        assert_eq!(word.0, [0xde, 0xad, 0xbe, 0xef]);
        let word: FixedBytes<4> = "DEADBEEF".parse().unwrap();
        assert_eq!(word.0, [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(to_string(&word).unwrap(), r#""0xdeadbeef""#);
    }

    #[test]
    fn test_fixed_length_mismatch() {
        let err = "0xdead".parse::<FixedBytes<4>>().unwrap_err();
        assert_eq!(err, Error::length_mismatch(4, 2));
        let err = from_str::<B256>(r#""0x01""#).unwrap_err();
        assert_eq!(err, Error::length_mismatch(32, 1));
    }

    #[test]
    fn test_fixed_raw_fallback() {
        let raw: FixedBytes<4> = "wxyz".parse().unwrap();
        assert_eq!(&raw.0, b"wxyz");
        assert_eq!(
            "wxy".parse::<FixedBytes<4>>().unwrap_err().kind(),
            ErrorKind::LengthMismatch
        );
    }

    #[test]
    fn test_fixed_rejects_oversized_text() {
        let long = format!("\"0x{}\"", "ab".repeat(33));
        let expected = Error::StringTooLong { len: 68, max: 66 };
        assert_eq!(from_str::<B256>(&long).unwrap_err(), expected);
        assert_eq!(from_str_buffered::<B256>(&long).unwrap_err(), expected);

        let exact = format!("\"0x{}\"", "ab".repeat(32));
        assert_eq!(from_str::<B256>(&exact).unwrap(), FixedBytes([0xab; 32]));
    }

    #[test]
    fn test_address_checksum_on_output() {
        let address: Address = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".parse().unwrap();
        assert_eq!(
            to_string(&address).unwrap(),
            r#""0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359""#
        );
        assert_eq!(address.to_checksum(), address.to_string());
        assert!(Address::parse_checksummed("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359").is_ok());
        assert!(Address::parse_checksummed("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d35A").is_err());
    }

    #[test]
    fn test_bytes() {
        let bytes: Bytes = from_str(r#""0x00ff10""#).unwrap();
        assert_eq!(bytes.as_slice(), &[0x00, 0xff, 0x10]);
        assert_eq!(to_string(&bytes).unwrap(), r#""0x00ff10""#);
        assert_eq!(to_string(&Bytes::new()).unwrap(), r#""0x""#);
        assert!(from_str::<Bytes>(r#""0x""#).unwrap().is_empty());
    }

    #[test]
    fn test_bytes_errors() {
        assert_eq!(
            from_str::<Bytes>(r#""0x123""#).unwrap_err().kind(),
            ErrorKind::InvalidCharacter
        );
        assert_eq!(
            from_str::<Bytes>(r#""0xzz""#).unwrap_err().kind(),
            ErrorKind::InvalidCharacter
        );
        assert_eq!(
            from_str::<Bytes>("[1, 2]").unwrap_err().kind(),
            ErrorKind::UnexpectedToken
        );
    }

    #[test]
    fn test_from_value() {
        let options = DecodeOptions::default();
        let value = Value::from("0xabcd");
        assert_eq!(
            FixedBytes::<2>::from_value(&value, &options).unwrap(),
            FixedBytes([0xab, 0xcd])
        );
        assert_eq!(
            Bytes::from_value(&value, &options).unwrap(),
            Bytes(vec![0xab, 0xcd])
        );
        assert_eq!(
            Bytes::from_value(&Value::Integer(1), &options).unwrap_err().kind(),
            ErrorKind::UnexpectedToken
        );
    }
}
