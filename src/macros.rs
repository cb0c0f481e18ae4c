/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Leaf expressions go through `Value::from`, so numbers stay native JSON
/// numbers here; use the typed encoders for hex quantities.
///
/// ```rust
/// use rpcjson::rpc_value;
///
/// let request = rpc_value!({
///     "jsonrpc": "2.0",
///     "method": "eth_getBalance",
///     "params": ["0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "latest"],
///     "id": 1
/// });
/// assert_eq!(request.get("id").and_then(|v| v.as_i64()), Some(1));
/// ```
#[macro_export]
macro_rules! rpc_value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::rpc_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ObjectMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ObjectMap::new();
        $(
            object.insert($key.to_string(), $crate::rpc_value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Declares a record: a struct encoded as a JSON object with one key per
/// field.
///
/// Each field may carry a wire name (`=> "blockHash"`) and a default
/// (`= expr`) used when the key is absent. `Option` fields default to `None`
/// and are omitted on output while `None`.
///
/// The generated type implements [`Encode`](crate::Encode),
/// [`Decode`](crate::Decode) and [`FromValue`](crate::FromValue). Records that
/// contain unions can only be decoded from a tree; declare them with a leading
/// `@tree` so no stream decoder is generated.
///
/// ```rust
/// use rpcjson::{from_str, rpc_record, to_string, Address};
///
/// rpc_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Transfer {
///         pub from: Address,
///         pub value: u64,
///         pub gas_price: Option<u64> => "gasPrice",
///         pub confirmations: u32 = 0,
///     }
/// }
///
/// let json = r#"{"from":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed","value":"0x3e8"}"#;
/// let transfer: Transfer = from_str(json).unwrap();
/// assert_eq!(transfer.gas_price, None);
/// assert_eq!(transfer.confirmations, 0);
/// assert_eq!(
///     to_string(&transfer).unwrap(),
///     r#"{"from":"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed","value":"0x3e8","confirmations":"0x0"}"#
/// );
/// ```
#[macro_export]
macro_rules! rpc_record {
    (
        @tree
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $wire:literal)? $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        $crate::__rpc_record_common! {
            $name { $($field : $ty $(=> $wire)? $(= $default)?),* }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $wire:literal)? $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        $crate::__rpc_record_common! {
            $name { $($field : $ty $(=> $wire)? $(= $default)?),* }
        }

        impl $crate::Decode for $name {
            fn decode(de: &mut $crate::Deserializer<'_>) -> $crate::Result<Self> {
                $(
                    let mut $field: ::std::option::Option<$ty> = ::std::option::Option::None;
                )*
                de.decode_record(
                    stringify!($name),
                    &[$($crate::__rpc_wire_name!($field $(, $wire)?)),*],
                    &[$($crate::__rpc_has_default!(Decode, $ty $(, $default)?)),*],
                    |de, name, occurrence| {
                        $(
                            if name == $crate::__rpc_wire_name!($field $(, $wire)?) {
                                let decoded = <$ty as $crate::Decode>::decode(de)?;
                                if occurrence == $crate::Occurrence::Store {
                                    $field = ::std::option::Option::Some(decoded);
                                }
                                return ::std::result::Result::Ok(());
                            }
                        )*
                        de.skip_value()
                    },
                )?;
                ::std::result::Result::Ok($name {
                    $(
                        $field: match $field {
                            ::std::option::Option::Some(decoded) => decoded,
                            ::std::option::Option::None => {
                                $crate::__rpc_field_default!(Decode, $ty $(, $default)?)
                                    .ok_or_else(|| {
                                        $crate::Error::missing_field(
                                            $crate::__rpc_wire_name!($field $(, $wire)?),
                                        )
                                    })?
                            }
                        },
                    )*
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rpc_record_common {
    ($name:ident { $($field:ident : $ty:ty $(=> $wire:literal)? $(= $default:expr)?),* }) => {
        impl $crate::Shaped for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::Record {
                    name: stringify!($name),
                    fields: vec![$(
                        $crate::FieldSpec::new(
                            $crate::__rpc_wire_name!($field $(, $wire)?),
                            <$ty as $crate::Shaped>::shape(),
                            $crate::__rpc_has_default!(Shaped, $ty $(, $default)?),
                        )
                    ),*],
                }
            }
        }

        impl $crate::Encode for $name {
            fn encode<W: ::std::io::Write>(
                &self,
                ser: &mut $crate::Serializer<W>,
            ) -> $crate::Result<()> {
                ser.begin_object()?;
                $(
                    ser.encode_field($crate::__rpc_wire_name!($field $(, $wire)?), &self.$field)?;
                )*
                ser.end_object()
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                value: &$crate::Value,
                options: &$crate::DecodeOptions,
            ) -> $crate::Result<Self> {
                $(
                    let mut $field: ::std::option::Option<$ty> = ::std::option::Option::None;
                )*
                $crate::value_de::decode_record_value(
                    value,
                    options,
                    stringify!($name),
                    &[$($crate::__rpc_wire_name!($field $(, $wire)?)),*],
                    &[$($crate::__rpc_has_default!(FromValue, $ty $(, $default)?)),*],
                    |name, item| {
                        $(
                            if name == $crate::__rpc_wire_name!($field $(, $wire)?) {
                                $field = ::std::option::Option::Some(
                                    <$ty as $crate::FromValue>::from_value(item, options)?,
                                );
                                return ::std::result::Result::Ok(());
                            }
                        )*
                        ::std::result::Result::Ok(())
                    },
                )?;
                ::std::result::Result::Ok($name {
                    $(
                        $field: match $field {
                            ::std::option::Option::Some(decoded) => decoded,
                            ::std::option::Option::None => {
                                $crate::__rpc_field_default!(FromValue, $ty $(, $default)?)
                                    .ok_or_else(|| {
                                        $crate::Error::missing_field(
                                            $crate::__rpc_wire_name!($field $(, $wire)?),
                                        )
                                    })?
                            }
                        },
                    )*
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rpc_wire_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $wire:literal) => {
        $wire
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rpc_has_default {
    (Shaped, $ty:ty) => {
        <$ty as $crate::Shaped>::shape().is_optional()
    };
    ($codec:ident, $ty:ty) => {
        <$ty as $crate::$codec>::absent().is_some()
    };
    ($codec:ident, $ty:ty, $default:expr) => {
        true
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rpc_field_default {
    ($codec:ident, $ty:ty) => {
        <$ty as $crate::$codec>::absent()
    };
    ($codec:ident, $ty:ty, $default:expr) => {
        ::std::option::Option::Some::<$ty>($default)
    };
}

/// Declares an enumeration written by variant name.
///
/// Every variant carries its integer tag and optionally a wire name
/// (`Legacy = 0 => "legacy"`); without one the Rust name is used. A trailing
/// `..Other` adds a catch-all variant holding unnamed tags, which makes the
/// enumeration non-exhaustive. See [`enumeration`](crate::enumeration).
///
/// Tags travel as `i128`, so `u128` is rejected as a repr:
///
/// ```compile_fail
/// rpcjson::rpc_enum! {
///     enum Wide: u128 {
///         Zero = 0,
///         ..Raw
///     }
/// }
/// ```
#[macro_export]
macro_rules! rpc_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $tag:literal $(=> $wire:literal)?
            ),+
            $(, .. $other:ident)?
            $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            $($other($repr),)?
        }

        const _: () = assert!(
            !(<$repr>::BITS == 128 && <$repr>::MIN == 0),
            "rpc_enum! tags must fit in i128"
        );

        impl $crate::Enumeration for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [&'static str] =
                &[$($crate::__rpc_wire_name!($variant $(, $wire)?)),+];
            const EXHAUSTIVE: bool = $crate::__rpc_exhaustive!($($other)?);

            fn from_name(name: &str) -> ::std::option::Option<Self> {
                $(
                    if name == $crate::__rpc_wire_name!($variant $(, $wire)?) {
                        return ::std::option::Option::Some($name::$variant);
                    }
                )+
                ::std::option::Option::None
            }

            #[allow(unreachable_patterns)]
            fn from_tag(tag: i128) -> ::std::option::Option<Self> {
                match tag {
                    $(t if t == $tag as i128 => ::std::option::Option::Some($name::$variant),)+
                    $(
                        raw => <$repr as ::std::convert::TryFrom<i128>>::try_from(raw)
                            .ok()
                            .map($name::$other),
                    )?
                    _ => ::std::option::Option::None,
                }
            }

            fn name(&self) -> ::std::option::Option<&'static str> {
                match self {
                    $($name::$variant => ::std::option::Option::Some(
                        $crate::__rpc_wire_name!($variant $(, $wire)?),
                    ),)+
                    $($name::$other(_) => ::std::option::Option::None,)?
                }
            }

            fn tag(&self) -> i128 {
                match self {
                    $($name::$variant => $tag as i128,)+
                    $($name::$other(raw) => *raw as i128,)?
                }
            }
        }

        impl $crate::Shaped for $name {
            fn shape() -> $crate::Shape {
                $crate::enumeration::shape::<Self>()
            }
        }

        impl $crate::Encode for $name {
            fn encode<W: ::std::io::Write>(
                &self,
                ser: &mut $crate::Serializer<W>,
            ) -> $crate::Result<()> {
                $crate::enumeration::encode(self, ser)
            }
        }

        impl $crate::Decode for $name {
            fn decode(de: &mut $crate::Deserializer<'_>) -> $crate::Result<Self> {
                $crate::enumeration::decode(de)
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                value: &$crate::Value,
                options: &$crate::DecodeOptions,
            ) -> $crate::Result<Self> {
                $crate::enumeration::from_value(value, options)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __rpc_exhaustive {
    () => {
        true
    };
    ($other:ident) => {
        false
    };
}

/// Declares an untagged union: an enum whose variants each wrap one type and
/// whose JSON form is the JSON form of the active variant.
///
/// Decoding tries the variants in declaration order against a parsed tree
/// and keeps the first that succeeds, so unions implement
/// [`FromValue`](crate::FromValue) but not [`Decode`](crate::Decode); read
/// them with [`from_str_buffered`](crate::from_str_buffered). List narrower
/// variants first.
///
/// ```rust
/// use rpcjson::{from_str_buffered, rpc_union, to_string, B256};
///
/// rpc_union! {
///     #[derive(Debug, PartialEq)]
///     pub enum BlockId {
///         Number(u64),
///         Hash(B256),
///         Tag(String),
///     }
/// }
///
/// assert_eq!(from_str_buffered::<BlockId>(r#""0x10""#).unwrap(), BlockId::Number(16));
/// assert_eq!(
///     from_str_buffered::<BlockId>(r#""latest""#).unwrap(),
///     BlockId::Tag("latest".to_string())
/// );
/// assert_eq!(to_string(&BlockId::Number(16)).unwrap(), r#""0x10""#);
/// ```
#[macro_export]
macro_rules! rpc_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $crate::Shaped for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::Union {
                    name: stringify!($name),
                    variants: vec![$(<$ty as $crate::Shaped>::shape()),+],
                }
            }
        }

        impl $crate::Encode for $name {
            fn encode<W: ::std::io::Write>(
                &self,
                ser: &mut $crate::Serializer<W>,
            ) -> $crate::Result<()> {
                match self {
                    $($name::$variant(inner) => $crate::Encode::encode(inner, ser),)+
                }
            }

            fn is_absent(&self) -> bool {
                match self {
                    $($name::$variant(inner) => $crate::Encode::is_absent(inner),)+
                }
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                value: &$crate::Value,
                options: &$crate::DecodeOptions,
            ) -> $crate::Result<Self> {
                $(
                    if let ::std::option::Option::Some(decoded) =
                        $crate::value_de::try_variant::<$ty>(value, options, stringify!($name))
                    {
                        return ::std::result::Result::Ok($name::$variant(decoded));
                    }
                )+
                ::std::result::Result::Err($crate::Error::no_matching_variant(
                    stringify!($name),
                    &[$(<$ty as $crate::Shaped>::shape().to_string()),+],
                ))
            }
        }
    };
}
