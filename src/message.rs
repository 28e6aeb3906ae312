//! The MSON message envelope: `{version}{position}/{total}~{content}`.
//!
//! Every MSON string on the wire — fragmented or not — starts with a header:
//! one version character, the fragment position, `/`, the total fragment
//! count, and `~`. A non-fragmented message is always `{version}1/1~`.
//!
//! ## Examples
//!
//! ```rust
//! use mson::MsonMessage;
//!
//! let msg = MsonMessage::parse("12/3~{123,abc}").unwrap();
//! assert_eq!(msg.version(), '1');
//! assert_eq!(msg.position(), 2);
//! assert_eq!(msg.total(), 3);
//! assert_eq!(msg.content(), "{123,abc}");
//! assert_eq!(msg.full_message(), "12/3~{123,abc}");
//! ```

use crate::{Error, Result};
use std::fmt;

/// One MSON message: a header plus its content.
///
/// For a non-fragmented message `position` and `total` are both 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsonMessage {
    version: char,
    position: usize,
    total: usize,
    content: String,
}

impl MsonMessage {
    /// Creates a message from its parts.
    #[must_use]
    pub fn new(version: char, position: usize, total: usize, content: String) -> Self {
        MsonMessage {
            version,
            position,
            total,
            content,
        }
    }

    /// The schema version character.
    #[must_use]
    pub fn version(&self) -> char {
        self.version
    }

    /// The 1-based fragment position. Always 1 for a non-fragmented message.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The total number of fragments. Always 1 for a non-fragmented message.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The message content, excluding the header.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The header: `{version}{position}/{total}~`.
    #[must_use]
    pub fn header(&self) -> String {
        format!("{}{}/{}~", self.version, self.position, self.total)
    }

    /// The complete message, header included.
    #[must_use]
    pub fn full_message(&self) -> String {
        format!("{}{}", self.header(), self.content)
    }

    /// Parses a raw message string.
    ///
    /// The first character is the version; the digits up to the first `/`
    /// are the position, the digits between the `/` and the first `~` are
    /// the total, and everything after the `~` is content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] for empty input, and [`Error::Format`]
    /// when either separator is missing or misplaced, or when position/total
    /// are not numeric.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::MsonMessage;
    ///
    /// assert!(MsonMessage::parse("11/1~{}").is_ok());
    /// assert!(MsonMessage::parse("1MissingSeparator~{}").is_err());
    /// assert!(MsonMessage::parse("11/1MissingTilde{}").is_err());
    /// ```
    pub fn parse(message: &str) -> Result<Self> {
        let version = message
            .chars()
            .next()
            .ok_or_else(|| Error::argument("message cannot be null or empty"))?;
        let header_start = version.len_utf8();

        let tilde = message
            .find('~')
            .ok_or_else(|| Error::format("invalid message format: missing '~'"))?;

        let slash = message
            .find('/')
            .ok_or_else(|| Error::format("invalid message format: missing '/'"))?;

        if slash < header_start || tilde < slash {
            return Err(Error::format("invalid message format: misplaced '/'"));
        }

        let position_str = &message[header_start..slash];
        let position = position_str
            .parse::<usize>()
            .map_err(|_| Error::format(format!("invalid fragment position `{}`", position_str)))?;

        let total_str = &message[slash + 1..tilde];
        let total = total_str
            .parse::<usize>()
            .map_err(|_| Error::format(format!("invalid fragment total `{}`", total_str)))?;

        let content = message[tilde + 1..].to_string();

        Ok(MsonMessage {
            version,
            position,
            total,
            content,
        })
    }
}

impl fmt::Display for MsonMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}~{}", self.version, self.position, self.total, self.content)
    }
}
