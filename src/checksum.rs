//! EIP-55 mixed-case checksum encoding for 20-byte addresses.
//!
//! The address bytes are hex-encoded in lowercase, the 40 ASCII hex characters
//! are hashed with Keccak-256, and every letter `a`-`f` is uppercased when the
//! matching nibble of the hash is `>= 8`.
//!
//! ```rust
//! use rpcjson::checksum::to_checksum;
//!
//! let bytes = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
//! let mut address = [0u8; 20];
//! address.copy_from_slice(&bytes);
//! assert_eq!(to_checksum(&address), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! ```

use crate::{Error, Result};
use keccak_hash::keccak;

/// Renders 20 address bytes as a 42-character EIP-55 checksummed string.
#[must_use]
pub fn to_checksum(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let byte = hash.0[i / 2];
        let bit = if i % 2 == 0 { 0x80 } else { 0x08 };
        if ch.is_ascii_alphabetic() && byte & bit != 0 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Returns `true` if `s` is a `0x`-prefixed address whose letter casing is a
/// valid EIP-55 checksum.
///
/// ```rust
/// use rpcjson::checksum::is_checksum_valid;
///
/// assert!(is_checksum_valid("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
/// assert!(!is_checksum_valid("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
/// ```
#[must_use]
pub fn is_checksum_valid(s: &str) -> bool {
    match decode_address_hex(s) {
        Ok(bytes) => to_checksum(&bytes) == s,
        Err(_) => false,
    }
}

/// Parses a `0x`-prefixed hex address.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted
/// as-is; mixed-case input must carry a valid checksum.
pub fn parse_address(s: &str) -> Result<[u8; 20]> {
    let bytes = decode_address_hex(s)?;
    let digits = &s[2..];
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&bytes) != s {
        return Err(Error::invalid_character(s));
    }
    Ok(bytes)
}

fn decode_address_hex(s: &str) -> Result<[u8; 20]> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| Error::invalid_character(s))?;
    if digits.len() != 40 {
        return Err(Error::length_mismatch(20, digits.len() / 2));
    }
    let mut out = [0u8; 20];
    hex::decode_to_slice(digits, &mut out).map_err(|_| Error::invalid_character(s))?;
    Ok(out)
}
