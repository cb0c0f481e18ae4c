//! Separator tracking for streaming JSON output.
//!
//! The [`Serializer`](crate::Serializer) never builds a tree; it writes each
//! token as soon as it is known. [`Punctuation`] records which separator, if
//! any, must precede the next token so the emitted text stays valid JSON.

/// What must be written before the next value or key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Punctuation {
    /// Nothing has been written yet.
    #[default]
    Beginning,
    /// Directly after an opening bracket: no separator.
    None,
    /// A value was completed: `,` precedes the next element or key.
    Comma,
    /// An object key was written: `:` precedes its value.
    Colon,
}

impl Punctuation {
    /// The separator owed before the next token.
    #[inline]
    #[must_use]
    pub const fn separator(self) -> Option<u8> {
        match self {
            Punctuation::Comma => Some(b','),
            Punctuation::Colon => Some(b':'),
            Punctuation::Beginning | Punctuation::None => None,
        }
    }

    /// Whether a container may be closed in this state.
    ///
    /// A close right after a key (`Colon`) or before anything was opened
    /// (`Beginning`) means the encoder lost track of its own output.
    #[inline]
    #[must_use]
    pub const fn can_close(self) -> bool {
        matches!(self, Punctuation::None | Punctuation::Comma)
    }

    /// Whether an object key may be written in this state.
    #[inline]
    #[must_use]
    pub const fn can_write_key(self) -> bool {
        matches!(self, Punctuation::None | Punctuation::Comma)
    }
}
