//! Configuration options for MSON serialization.
//!
//! This module provides [`MsonOptions`], the bundle handed to scalar
//! converters and the fragment manager so that formatting behavior is
//! deterministic regardless of the host environment:
//!
//! - `max_message_length` bounds the full message size before fragmentation
//!   kicks in
//! - `timezone` optionally normalizes timestamps to a fixed offset on encode,
//!   so two producers in different zones emit identical text
//!
//! ## Examples
//!
//! ```rust
//! use chrono::FixedOffset;
//! use mson::MsonOptions;
//!
//! // Fragment anything longer than 500 characters, emit timestamps in UTC
//! let options = MsonOptions::new()
//!     .with_max_message_length(500)
//!     .with_timezone(FixedOffset::east_opt(0).unwrap());
//! ```

use chrono::FixedOffset;

/// Configuration options for MSON serialization and deserialization.
///
/// # Examples
///
/// ```rust
/// use mson::MsonOptions;
///
/// let options = MsonOptions::new();
/// assert_eq!(options.max_message_length, 1024);
/// ```
#[derive(Clone, Debug)]
pub struct MsonOptions {
    /// Maximum full-message length before fragmentation
    pub max_message_length: usize,
    /// When set, timestamps are converted to this offset before encoding
    pub timezone: Option<FixedOffset>,
}

impl Default for MsonOptions {
    fn default() -> Self {
        MsonOptions {
            max_message_length: 1024,
            timezone: None,
        }
    }
}

impl MsonOptions {
    /// Creates default options (1024-character limit, timestamps keep their
    /// own offsets).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum full-message length before fragmentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::MsonOptions;
    ///
    /// let options = MsonOptions::new().with_max_message_length(500);
    /// assert_eq!(options.max_message_length, 500);
    /// ```
    #[must_use]
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }

    /// Normalizes all encoded timestamps to the given offset.
    #[must_use]
    pub fn with_timezone(mut self, offset: FixedOffset) -> Self {
        self.timezone = Some(offset);
        self
    }
}
