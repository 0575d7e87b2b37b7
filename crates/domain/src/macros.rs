//! Macro for implementing Display and FromStr for label enums
//!
//! The sales backend speaks in human labels ("Closed Won", "leadBySales").
//! This macro maps each variant to its wire label once and derives both
//! directions from that single table.
//!
//! # Example
//!
//! ```rust
//! use salesdesk_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Direct,
//!     Partner,
//! }
//!
//! impl_label_conversions!(Channel {
//!     Direct => "Direct",
//!     Partner => "Partner",
//! });
//! ```

/// Implements Display, FromStr and `label()` for label enums
///
/// - `label()` / Display return the exact wire label
/// - FromStr trims and matches case-insensitively
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire label for this variant.
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
