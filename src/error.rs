//! Error types for encoding and decoding.
//!
//! Every failure in this crate surfaces as a single [`Error`] value describing
//! the first problem encountered. There is no partial recovery: the first error
//! anywhere in a recursive encode or decode aborts the whole call.
//!
//! ## Error Categories
//!
//! - **Source errors**: malformed JSON reported by the tokenizer, with line and
//!   column ([`Error::Syntax`], [`Error::UnexpectedEof`],
//!   [`Error::TrailingCharacters`])
//! - **Shape errors**: well-formed JSON that does not fit the target type
//!   ([`Error::UnexpectedToken`], [`Error::NoMatchingVariant`])
//! - **Record errors**: [`Error::UnknownField`], [`Error::MissingField`],
//!   [`Error::DuplicateField`]
//! - **Scalar errors**: [`Error::InvalidCharacter`], [`Error::InvalidNumber`],
//!   [`Error::Overflow`], [`Error::InvalidEnumTag`], [`Error::LengthMismatch`]
//! - **Resource limits**: [`Error::DepthLimitExceeded`], [`Error::StringTooLong`]
//! - **I/O**: failures of the output sink or input reader
//!
//! ## Examples
//!
//! ```rust
//! use rpcjson::{from_str, ErrorKind};
//!
//! let err = from_str::<u8>("\"0x1ff\"").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Overflow);
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed JSON source text
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Input ended in the middle of a value
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// Non-whitespace input after the top-level value
    #[error("Trailing characters at line {line}, column {col}")]
    TrailingCharacters { line: usize, col: usize },

    /// A well-formed token of the wrong kind for the target shape
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// An object key that the target record does not declare
    #[error("Unknown field `{0}`")]
    UnknownField(String),

    /// A required record field was absent and has no default
    #[error("Missing field `{0}`")]
    MissingField(String),

    /// A record field appeared more than once
    #[error("Duplicate field `{0}`")]
    DuplicateField(String),

    /// A byte buffer or fixed-size array decoded to the wrong length
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A digit or hex character outside the accepted alphabet
    #[error("Invalid character in `{0}`")]
    InvalidCharacter(String),

    /// A symbolic name or raw tag that maps to no enumeration variant
    #[error("Invalid enum tag `{tag}` for {name}")]
    InvalidEnumTag { name: String, tag: String },

    /// A numeric literal that cannot represent the target number
    #[error("Invalid number `{0}`")]
    InvalidNumber(String),

    /// A numeric literal outside the range of the target integer type
    #[error("Number `{value}` overflows {target}")]
    Overflow { value: String, target: String },

    /// No union variant accepted the input
    #[error("Unrecognized shape for {name}: none of [{variants}] matched")]
    NoMatchingVariant { name: String, variants: String },

    /// Nesting deeper than the configured maximum
    #[error("Recursion limit of {0} exceeded")]
    DepthLimitExceeded(usize),

    /// A string token longer than the configured maximum
    #[error("String of {len} bytes exceeds the limit of {max}")]
    StringTooLong { len: usize, max: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// Fieldless discriminant of [`Error`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Syntax,
    UnexpectedEof,
    TrailingCharacters,
    UnexpectedToken,
    UnknownField,
    MissingField,
    DuplicateField,
    LengthMismatch,
    InvalidCharacter,
    InvalidEnumTag,
    InvalidNumber,
    Overflow,
    NoMatchingVariant,
    DepthLimitExceeded,
    StringTooLong,
    Custom,
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcjson::Error;
    ///
    /// let err = Error::syntax(10, 5, "expected ':'");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates a shape mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcjson::Error;
    ///
    /// let err = Error::unexpected_token("hex quantity", "array");
    /// assert!(err.to_string().contains("expected hex quantity"));
    /// ```
    pub fn unexpected_token(expected: &str, found: &str) -> Self {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unknown_field(name: &str) -> Self {
        Error::UnknownField(name.to_string())
    }

    pub fn missing_field(name: &str) -> Self {
        Error::MissingField(name.to_string())
    }

    pub fn duplicate_field(name: &str) -> Self {
        Error::DuplicateField(name.to_string())
    }

    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Error::LengthMismatch { expected, found }
    }

    pub fn invalid_character(input: &str) -> Self {
        Error::InvalidCharacter(input.to_string())
    }

    pub fn invalid_enum_tag(name: &str, tag: &str) -> Self {
        Error::InvalidEnumTag {
            name: name.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn invalid_number(input: &str) -> Self {
        Error::InvalidNumber(input.to_string())
    }

    pub fn overflow(value: &str, target: &str) -> Self {
        Error::Overflow {
            value: value.to_string(),
            target: target.to_string(),
        }
    }

    /// Creates the error raised when every union variant rejected the input.
    pub fn no_matching_variant(name: &str, variants: &[String]) -> Self {
        Error::NoMatchingVariant {
            name: name.to_string(),
            variants: variants.join(", "),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcjson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for sink or reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            Error::TrailingCharacters { .. } => ErrorKind::TrailingCharacters,
            Error::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Error::UnknownField(_) => ErrorKind::UnknownField,
            Error::MissingField(_) => ErrorKind::MissingField,
            Error::DuplicateField(_) => ErrorKind::DuplicateField,
            Error::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Error::InvalidCharacter(_) => ErrorKind::InvalidCharacter,
            Error::InvalidEnumTag { .. } => ErrorKind::InvalidEnumTag,
            Error::InvalidNumber(_) => ErrorKind::InvalidNumber,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::NoMatchingVariant { .. } => ErrorKind::NoMatchingVariant,
            Error::DepthLimitExceeded(_) => ErrorKind::DepthLimitExceeded,
            Error::StringTooLong { .. } => ErrorKind::StringTooLong,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns `true` for errors produced by malformed JSON text rather than a
    /// shape mismatch.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Syntax | ErrorKind::UnexpectedEof | ErrorKind::TrailingCharacters
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Error::missing_field("hash").kind(), ErrorKind::MissingField);
        assert_eq!(
            Error::length_mismatch(20, 19).kind(),
            ErrorKind::LengthMismatch
        );
        assert_eq!(Error::overflow("0x100", "u8").kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::length_mismatch(20, 3).to_string(),
            "Length mismatch: expected 20, found 3"
        );
        assert_eq!(Error::unknown_field("foo").to_string(), "Unknown field `foo`");
        let err = Error::no_matching_variant("BlockId", &["u64".into(), "B256".into()]);
        assert!(err.to_string().contains("u64, B256"));
    }

    #[test]
    fn test_is_syntax() {
        assert!(Error::syntax(1, 1, "x").is_syntax());
        assert!(Error::unexpected_eof(1, 1, "value").is_syntax());
        assert!(!Error::invalid_number("1.5").is_syntax());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("pipe closed"));
    }
}
