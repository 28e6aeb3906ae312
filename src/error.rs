//! Error types for MSON serialization and deserialization.
//!
//! This module provides a single [`Error`] enum covering every failure mode of
//! the crate, grouped by who caused it:
//!
//! - **Format errors**: malformed wire text — a missing `/` or `~` in a message
//!   header, non-numeric position/total, or missing `{}`/`[]` delimiters where
//!   an object/array was expected
//! - **Schema errors**: version mismatches, unresolvable type definitions,
//!   missing array-item definitions
//! - **Argument errors**: null/empty input handed to `deserialize`
//! - **Sizing errors**: a maximum message length too small to hold a fragment
//!   header
//! - **Value errors**: a host value that does not fit the shape the schema
//!   declares for it
//!
//! Errors are never retried or swallowed; they propagate to the caller with
//! enough context (field description and position) to locate the failing node.
//!
//! ## Examples
//!
//! ```rust
//! use mson::{MsonMessage, Error};
//!
//! let result = MsonMessage::parse("1MissingSeparator~{}");
//! assert!(matches!(result, Err(Error::Format(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during MSON
/// serialization/deserialization.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed MSON text or message header
    #[error("format error: {0}")]
    Format(String),

    /// Schema problem: version mismatch, unresolvable definition, invalid
    /// field tree
    #[error("schema error: {0}")]
    Schema(String),

    /// Invalid argument supplied by the caller
    #[error("argument error: {0}")]
    Argument(String),

    /// The configured maximum message length cannot fit a fragment header
    #[error("sizing error: {0}")]
    Sizing(String),

    /// A host value does not match the shape or scalar type the schema
    /// declares
    #[error("value error: {0}")]
    Value(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a format error for malformed wire text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::Error;
    ///
    /// let err = Error::format("missing '~'");
    /// assert!(err.to_string().contains("missing '~'"));
    /// ```
    pub fn format<T: fmt::Display>(msg: T) -> Self {
        Error::Format(msg.to_string())
    }

    /// Creates a schema error.
    pub fn schema<T: fmt::Display>(msg: T) -> Self {
        Error::Schema(msg.to_string())
    }

    /// Creates an argument error for invalid caller input.
    pub fn argument<T: fmt::Display>(msg: T) -> Self {
        Error::Argument(msg.to_string())
    }

    /// Creates a sizing error for an unusable maximum message length.
    pub fn sizing<T: fmt::Display>(msg: T) -> Self {
        Error::Sizing(msg.to_string())
    }

    /// Creates a value error for a host value that does not fit its declared
    /// shape.
    pub fn value<T: fmt::Display>(msg: T) -> Self {
        Error::Value(msg.to_string())
    }

    /// Creates a generic error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Attaches the failing field's description and position to this error.
    ///
    /// The codec calls this while unwinding so a deeply nested failure still
    /// names the schema node it happened at.
    #[must_use]
    pub fn at_field(self, description: &str, position: Option<u32>) -> Self {
        let context = match position {
            Some(p) => format!("field `{}` (position {})", description, p),
            None => format!("field `{}`", description),
        };

        match self {
            Error::Format(msg) => Error::Format(format!("{}: {}", context, msg)),
            Error::Schema(msg) => Error::Schema(format!("{}: {}", context, msg)),
            Error::Value(msg) => Error::Value(format!("{}: {}", context, msg)),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_field_adds_context() {
        let err = Error::format("invalid array format").at_field("Tags", Some(6));
        let text = err.to_string();
        assert!(text.contains("Tags"));
        assert!(text.contains("position 6"));
        assert!(text.contains("invalid array format"));
    }

    #[test]
    fn test_at_field_preserves_variant() {
        let err = Error::schema("no definition").at_field("Category", None);
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_sizing_and_argument_pass_through_unchanged() {
        let err = Error::sizing("max length 3 too small").at_field("root", None);
        assert_eq!(err.to_string(), "sizing error: max length 3 too small");
    }
}
