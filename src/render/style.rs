//! Style enumerations understood by a [`Renderer`](super::Renderer)
//!
//! Hosts describe styles with string tokens; each enumeration parses its
//! tokens through `FromStr` and (de)serialises as the same token.

use crate::PatternError;

/// Generate a token-backed style enum with `as_str`, `Display`, `FromStr` and
/// token serde.
macro_rules! style_tokens {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            #[inline]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = PatternError;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s {
                    $($token => Ok($name::$variant),)*
                    other => Err(PatternError::UnknownStyleToken {
                        kind: $kind,
                        token: other.to_string(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
                let token = String::deserialize(d)?;
                token.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

style_tokens! {
    /// Stroke of a leg line
    LineStyle("line style") {
        #[default]
        Solid => "solid",
        Dotted => "dotted",
        Dashed => "dashed",
        ArrowLeft => "arrow_left",
        ArrowRight => "arrow_right",
    }
}

style_tokens! {
    /// Shape of a point label
    LabelStyle("label style") {
        #[default]
        None => "none",
        XCross => "xcross",
        Cross => "cross",
        TriangleUp => "triangleup",
        TriangleDown => "triangledown",
        Flag => "flag",
        Circle => "circle",
        ArrowUp => "arrowup",
        ArrowDown => "arrowdown",
        LabelUp => "label_up",
        LabelDown => "label_down",
        LabelLeft => "label_left",
        LabelRight => "label_right",
        LabelLowerLeft => "label_lower_left",
        LabelLowerRight => "label_lower_right",
        LabelUpperLeft => "label_upper_left",
        LabelUpperRight => "label_upper_right",
        LabelCenter => "label_center",
        Square => "square",
        Diamond => "diamond",
    }
}

style_tokens! {
    /// Label text size
    Size("size") {
        Auto => "auto",
        Tiny => "tiny",
        Small => "small",
        #[default]
        Normal => "normal",
        Large => "large",
        Huge => "huge",
    }
}

style_tokens! {
    /// Horizontal alignment of label text
    TextAlign("text align") {
        Left => "left",
        #[default]
        Center => "center",
        Right => "right",
    }
}

impl LabelStyle {
    /// Pointer label placed on the outside of a pivot: below a low, above a high.
    #[inline]
    pub fn for_pivot(is_high: bool) -> Self {
        if is_high {
            LabelStyle::LabelDown
        } else {
            LabelStyle::LabelUp
        }
    }
}

// ============================================================
// TESTS
// ============================================================
