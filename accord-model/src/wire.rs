//! Numeric wire enums.
//!
//! The platform encodes most discriminants as small integers and adds new
//! codes without notice. Every such enum keeps an `Unknown(code)` arm so a
//! new code never fails a decode, and serializes back to the same number.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A code this client does not know yet.
            Unknown($repr),
        }

        impl $name {
            /// Decodes a wire code.
            #[must_use]
            pub const fn from_code(code: $repr) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::Unknown(other),
                }
            }

            /// The wire code.
            #[must_use]
            pub const fn code(&self) -> $repr {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Unknown(other) => *other,
                }
            }
        }

        impl From<$repr> for $name {
            fn from(code: $repr) -> Self {
                Self::from_code(code)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.code(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$repr as serde::Deserialize>::deserialize(deserializer).map(Self::from_code)
            }
        }
    };
}

pub(crate) use wire_enum;
