//! Static description of how a type is represented on the wire.
//!
//! Every codec type reports exactly one [`Shape`] through [`Shaped::shape`].
//! The codec itself dispatches through trait implementations; the shape is
//! the inspectable mirror of that dispatch, used in error messages and by
//! callers that want to reason about a type's wire form.
//!
//! ```rust
//! use rpcjson::{Address, Shape, Shaped};
//!
//! assert_eq!(Address::shape(), Shape::FixedBytes(20));
//! assert_eq!(Option::<u64>::shape(), Shape::Optional(Box::new(u64::shape())));
//! ```

use std::fmt;

/// The structural category of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Bool,
    /// `bits` is `None` for arbitrary-precision integers.
    Integer {
        signed: bool,
        bits: Option<u32>,
    },
    Float,
    Null,
    Optional(Box<Shape>),
    Enumeration {
        name: &'static str,
        variants: &'static [&'static str],
        exhaustive: bool,
    },
    /// A byte buffer of exactly this many bytes.
    FixedBytes(usize),
    /// A variable-length owned byte sequence, hex on the wire.
    Bytes,
    /// Text, written as an ordinary JSON string.
    Text,
    List(Box<Shape>),
    Tuple(Vec<Shape>),
    /// String-keyed object with uniform values.
    Map(Box<Shape>),
    Record {
        name: &'static str,
        fields: Vec<FieldSpec>,
    },
    Union {
        name: &'static str,
        variants: Vec<Shape>,
    },
    /// Raw JSON passed through untouched.
    Any,
}

/// One declared field of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    pub shape: Shape,
    /// Whether an absent field is filled in rather than rejected.
    pub has_default: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &'static str, shape: Shape, has_default: bool) -> Self {
        FieldSpec {
            name,
            shape,
            has_default,
        }
    }
}

impl Shape {
    /// Short lowercase name of the category, e.g. `"record"`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Shape::Bool => "boolean",
            Shape::Integer { .. } => "integer",
            Shape::Float => "float",
            Shape::Null => "null",
            Shape::Optional(_) => "optional",
            Shape::Enumeration { .. } => "enumeration",
            Shape::FixedBytes(_) => "fixed bytes",
            Shape::Bytes => "bytes",
            Shape::Text => "string",
            Shape::List(_) => "list",
            Shape::Tuple(_) => "tuple",
            Shape::Map(_) => "map",
            Shape::Record { .. } => "record",
            Shape::Union { .. } => "union",
            Shape::Any => "any",
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Shape::Optional(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Integer { signed, bits } => {
                let prefix = if *signed { 'i' } else { 'u' };
                match bits {
                    Some(bits) => write!(f, "{}{}", prefix, bits),
                    None => write!(f, "big {}", if *signed { "int" } else { "uint" }),
                }
            }
            Shape::Optional(inner) => write!(f, "optional {}", inner),
            Shape::Enumeration { name, .. } => write!(f, "enum {}", name),
            Shape::FixedBytes(20) => f.write_str("address"),
            Shape::FixedBytes(len) => write!(f, "bytes{}", len),
            Shape::List(inner) => write!(f, "list of {}", inner),
            Shape::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            Shape::Map(inner) => write!(f, "map of {}", inner),
            Shape::Record { name, .. } => write!(f, "record {}", name),
            Shape::Union { name, .. } => write!(f, "union {}", name),
            other => f.write_str(other.kind_name()),
        }
    }
}

/// Types with a static wire shape.
pub trait Shaped {
    fn shape() -> Shape;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Shape::Integer {
                signed: false,
                bits: Some(64)
            }
            .to_string(),
            "u64"
        );
        assert_eq!(Shape::FixedBytes(20).to_string(), "address");
        assert_eq!(Shape::FixedBytes(32).to_string(), "bytes32");
        assert_eq!(
            Shape::Tuple(vec![Shape::Bool, Shape::Text]).to_string(),
            "(boolean, string)"
        );
        assert_eq!(
            Shape::Optional(Box::new(Shape::Bytes)).to_string(),
            "optional bytes"
        );
    }

    #[test]
    fn test_kind_name() {
        let record = Shape::Record {
            name: "Log",
            fields: vec![FieldSpec::new("address", Shape::FixedBytes(20), false)],
        };
        assert_eq!(record.kind_name(), "record");
        assert!(!record.is_optional());
    }
}
