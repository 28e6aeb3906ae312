//! Message fragmentation and reassembly.
//!
//! Transports with a maximum message size need oversized MSON payloads split
//! into self-describing pieces. Each fragment carries the standard
//! `{version}{position}/{total}~` header, which creates a circular sizing
//! problem: the header's length depends on `total`, `total` depends on how
//! much content fits per fragment, and that depends on the header's length.
//!
//! [`FragmentManager::fragment`] resolves the circle with a fixed-point
//! iteration: estimate the fragment count, compute the header size that count
//! implies (sized for the longest possible position number — the total
//! itself), re-derive the count from the remaining capacity, and repeat until
//! the count stops changing. Header size is a non-decreasing step function of
//! the total, so iterating on the recomputed count always converges.
//!
//! Fragmentation is a raw substring operation: it knows nothing about the
//! MSON grammar and may cut through the middle of an escape sequence.
//! Reassembly restores the exact original content before any decoding
//! happens.
//!
//! ## Examples
//!
//! ```rust
//! use mson::FragmentManager;
//!
//! let manager = FragmentManager::new(500);
//! let content = "x".repeat(1475);
//!
//! let fragments = manager.fragment('1', &content).unwrap();
//! assert_eq!(fragments.len(), 3);
//!
//! let reassembled = FragmentManager::reassemble(&fragments).unwrap();
//! assert_eq!(reassembled, format!("11/1~{}", content));
//! ```

use crate::{Error, MsonMessage, Result};

/// Splits over-length content into headered fragments and reassembles them.
pub struct FragmentManager {
    max_fragment_size: usize,
}

/// Length of the header `{version}{position}/{total}~` in characters.
fn header_size(version: char, position: usize, total: usize) -> usize {
    format!("{}{}/{}~", version, position, total).chars().count()
}

fn div_ceil(len: usize, chunk: usize) -> usize {
    (len + chunk - 1) / chunk
}

/// Splits off the first `n` characters of `s`.
fn split_at_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

impl FragmentManager {
    /// Creates a fragment manager producing fragments whose full messages
    /// never exceed `max_fragment_size` characters.
    #[must_use]
    pub fn new(max_fragment_size: usize) -> Self {
        FragmentManager { max_fragment_size }
    }

    /// Splits `content` into an ordered list of headered fragments.
    ///
    /// Whitespace-only content yields no fragments. Content short enough for
    /// a single fragment yields one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sizing`] when the maximum size cannot fit a fragment
    /// header plus at least one character of content.
    pub fn fragment(&self, version: char, content: &str) -> Result<Vec<MsonMessage>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let content_len = content.chars().count();

        // Seed the iteration with the smallest possible header.
        let mut estimate = {
            let data_size = self.data_size(header_size(version, 1, 1))?;
            div_ceil(content_len, data_size)
        };

        loop {
            // Size the header for the longest position number the set can
            // contain: the total itself, since position <= total.
            let data_size = self.data_size(header_size(version, estimate, estimate))?;
            let actual = div_ceil(content_len, data_size);

            if actual == estimate {
                return Ok(Self::materialize(version, content, actual, data_size));
            }

            estimate = actual;
        }
    }

    fn data_size(&self, header_size: usize) -> Result<usize> {
        match self.max_fragment_size.checked_sub(header_size) {
            Some(size) if size > 0 => Ok(size),
            _ => Err(Error::sizing(format!(
                "max fragment size {} cannot fit a {}-character header plus content",
                self.max_fragment_size, header_size
            ))),
        }
    }

    fn materialize(
        version: char,
        content: &str,
        total: usize,
        data_size: usize,
    ) -> Vec<MsonMessage> {
        let mut fragments = Vec::with_capacity(total);
        let mut rest = content;
        let mut position = 1;

        while !rest.is_empty() {
            let (chunk, remaining) = split_at_chars(rest, data_size);
            fragments.push(MsonMessage::new(version, position, total, chunk.to_string()));
            rest = remaining;
            position += 1;
        }

        fragments
    }

    /// Reassembles a complete fragment set into a single non-fragmented
    /// message string (`{version}1/1~{content}`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] for an empty set and [`Error::Format`]
    /// when the set size does not match the declared total or the members
    /// disagree on version or total.
    pub fn reassemble(fragments: &[MsonMessage]) -> Result<String> {
        if fragments.is_empty() {
            return Err(Error::argument("no fragments to reassemble"));
        }

        let mut ordered: Vec<&MsonMessage> = fragments.iter().collect();
        ordered.sort_by_key(|f| f.position());

        let first = ordered[0];
        let expected = first.total();

        if ordered.len() != expected {
            return Err(Error::format(format!(
                "expected {} fragments, but got {}",
                expected,
                ordered.len()
            )));
        }

        if ordered
            .iter()
            .any(|f| f.version() != first.version() || f.total() != expected)
        {
            return Err(Error::format(
                "fragments have inconsistent version or total count",
            ));
        }

        let content: String = ordered.iter().map(|f| f.content()).collect();

        Ok(format!("{}1/1~{}", first.version(), content))
    }

    /// Parses raw fragment strings and reassembles them.
    ///
    /// # Errors
    ///
    /// Propagates parse failures plus everything [`reassemble`](Self::reassemble)
    /// can return.
    pub fn reassemble_strings<I, S>(fragments: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = fragments
            .into_iter()
            .map(|f| MsonMessage::parse(f.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::reassemble(&parsed)
    }
}
