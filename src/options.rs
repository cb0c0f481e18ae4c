//! Configuration options for encoding and decoding.
//!
//! - [`EncodeOptions`]: controls how absent optional record fields are written
//! - [`DecodeOptions`]: unknown-field and duplicate-field handling plus
//!   resource limits for untrusted input
//! - [`DuplicateFieldPolicy`]: what to do when an object repeats a key
//!
//! ## Examples
//!
//! ```rust
//! use rpcjson::{DecodeOptions, DuplicateFieldPolicy, EncodeOptions};
//!
//! let encode = EncodeOptions::new().with_emit_null_optional_fields(true);
//! assert!(encode.emit_null_optional_fields);
//!
//! let decode = DecodeOptions::new()
//!     .with_ignore_unknown_fields(true)
//!     .with_duplicate_field(DuplicateFieldPolicy::UseFirst);
//! assert!(decode.ignore_unknown_fields);
//! ```

/// Resolution of a JSON object key that appears more than once.
///
/// # Examples
///
/// ```rust
/// use rpcjson::DuplicateFieldPolicy;
///
/// assert_eq!(DuplicateFieldPolicy::default(), DuplicateFieldPolicy::UseLast);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateFieldPolicy {
    /// Fail with [`Error::DuplicateField`](crate::Error::DuplicateField).
    Error,
    /// Keep the first occurrence. Later values are still parsed, then dropped.
    UseFirst,
    /// Keep the last occurrence.
    #[default]
    UseLast,
}

/// Configuration options for encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write `"field": null` for record fields holding an absent optional
    /// instead of omitting the key.
    pub emit_null_optional_fields: bool,
}

impl EncodeOptions {
    /// Creates default options (absent optionals are omitted).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether absent optional record fields are written as `null`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcjson::EncodeOptions;
    ///
    /// let options = EncodeOptions::new().with_emit_null_optional_fields(true);
    /// assert!(options.emit_null_optional_fields);
    /// ```
    #[must_use]
    pub fn with_emit_null_optional_fields(mut self, emit: bool) -> Self {
        self.emit_null_optional_fields = emit;
        self
    }
}

/// Configuration options for decoding.
///
/// The defaults are strict about unknown fields, permissive about duplicates,
/// and bound nesting depth and string length so hostile input cannot exhaust
/// the stack or memory.
///
/// # Examples
///
/// ```rust
/// use rpcjson::{DecodeOptions, DuplicateFieldPolicy};
///
/// let options = DecodeOptions::new();
/// assert!(!options.ignore_unknown_fields);
/// assert_eq!(options.duplicate_field, DuplicateFieldPolicy::UseLast);
/// assert_eq!(options.max_depth, 128);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub ignore_unknown_fields: bool,
    pub duplicate_field: DuplicateFieldPolicy,
    pub max_depth: usize,
    pub max_string_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            ignore_unknown_fields: false,
            duplicate_field: DuplicateFieldPolicy::default(),
            max_depth: 128,
            max_string_len: 16 * 1024 * 1024,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject duplicate keys and unknown fields.
    #[must_use]
    pub fn strict() -> Self {
        DecodeOptions {
            duplicate_field: DuplicateFieldPolicy::Error,
            ..Default::default()
        }
    }

    /// Options that skip unknown fields, the usual choice for node responses
    /// that grow new fields over time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcjson::DecodeOptions;
    ///
    /// assert!(DecodeOptions::permissive().ignore_unknown_fields);
    /// ```
    #[must_use]
    pub fn permissive() -> Self {
        DecodeOptions {
            ignore_unknown_fields: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ignore_unknown_fields(mut self, ignore: bool) -> Self {
        self.ignore_unknown_fields = ignore;
        self
    }

    #[must_use]
    pub fn with_duplicate_field(mut self, policy: DuplicateFieldPolicy) -> Self {
        self.duplicate_field = policy;
        self
    }

    /// Sets the maximum nesting depth of arrays and objects.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the maximum decoded length of a single string token, in bytes.
    #[must_use]
    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }
}
