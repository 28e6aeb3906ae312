//! Escape-aware splitting of MSON content at top-level separators.
//!
//! Object member lists and array element lists share one grammar: items
//! separated by `,`, nested structures delimited by `{}` or `[]`, and
//! reserved characters escaped with `\`. [`split_top_level`] walks a content
//! string once, tracking an escape flag and a single nesting depth counter
//! (braces and brackets both feed the same counter — either kind of nesting
//! means "not at top level"), and cuts only at unescaped commas at depth
//! zero.
//!
//! Malformed input (unbalanced delimiters) is not validated here; the scan
//! produces a garbage split and the codec surfaces the format error when it
//! tries to decode the pieces.
//!
//! ## Examples
//!
//! ```rust
//! use mson::split_top_level;
//!
//! let items = split_top_level("a,{b,c},[d,e],f");
//! assert_eq!(items, vec!["a", "{b,c}", "[d,e]", "f"]);
//! ```

/// Splits `content` at top-level unescaped commas.
///
/// A `\` makes exactly the next character literal: it is copied into the
/// current item and never interpreted as a delimiter or separator. A single
/// trailing separator yields no final empty item, so a trailing null field
/// decodes as absent.
///
/// # Examples
///
/// ```rust
/// use mson::split_top_level;
///
/// assert_eq!(split_top_level(r"a\,b,c"), vec![r"a\,b", "c"]);
/// assert_eq!(split_top_level(""), Vec::<&str>::new());
/// ```
#[must_use]
pub fn split_top_level(content: &str) -> Vec<&str> {
    let mut items = Vec::new();

    if content.is_empty() {
        return items;
    }

    let bytes = content.as_bytes();
    let mut start = 0;
    let mut depth: i32 = 0;
    let mut escaped = false;

    // Reserved characters are all ASCII, so a byte scan is safe: multi-byte
    // UTF-8 sequences never contain ASCII bytes.
    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }

        match b {
            b'\\' => escaped = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth -= 1,
            b',' if depth == 0 => {
                items.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < content.len() {
        items.push(&content[start..]);
    }

    items
}
