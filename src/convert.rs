//! Scalar converters: pluggable formatters for leaf values.
//!
//! Every leaf of a schema tree declares a [`ScalarType`]; the codec hands the
//! actual formatting and parsing to a [`ScalarConverter`] looked up in a
//! [`ConverterRegistry`]. Dispatch is first-match over an ordered list, so
//! registration order matters and custom converters take precedence over the
//! built-in set.
//!
//! Null handling is uniform and happens before dispatch: a null value
//! serializes to the empty string, and empty wire text deserializes to
//! [`MsonValue::Null`]. Converters therefore only ever see non-null values
//! and non-empty text.
//!
//! The built-in converters implement the wire formats of the MSON scalar
//! grammar:
//!
//! | type | wire format |
//! |---|---|
//! | boolean | `1` / `0` |
//! | integer | decimal digits, arbitrary precision beyond `i64` |
//! | float | decimal notation |
//! | text | trimmed, reserved characters `{ } [ ] ,` escaped with `\` |
//! | datetime | `yyyyMMddHHmmssfff±hhmm` |
//! | identifier | 32 lowercase hex digits, no hyphens |
//! | enumeration | bare variant name |
//!
//! ## Examples
//!
//! ```rust
//! use mson::{ConverterRegistry, MsonOptions, MsonValue, ScalarType};
//!
//! let registry = ConverterRegistry::default();
//! let options = MsonOptions::new();
//!
//! let text = registry
//!     .serialize(&MsonValue::from("a,b"), ScalarType::Text, &options)
//!     .unwrap();
//! assert_eq!(text, r"a\,b");
//! ```

use crate::{Error, MsonOptions, MsonValue, Number, Result, ScalarType};
use chrono::DateTime;
use num_bigint::BigInt;
use uuid::Uuid;

/// Characters with structural meaning in the MSON grammar.
pub const RESERVED_CHARS: [char; 5] = ['{', '}', '[', ']', ','];

const ESCAPE_CHAR: char = '\\';

const DATE_FORMAT: &str = "%Y%m%d%H%M%S%3f%z";

/// Escapes text for embedding in MSON content.
///
/// The value is trimmed, then every reserved character gets a single `\`
/// prepended. Backslash itself is never escaped; a pre-existing `\{` in
/// source text is indistinguishable from an escaped `{` on the wire.
///
/// # Examples
///
/// ```rust
/// use mson::escape_text;
///
/// assert_eq!(escape_text("a,b"), r"a\,b");
/// assert_eq!(escape_text(" {x} "), r"\{x\}");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let trimmed = text.trim();
    let mut escaped = String::with_capacity(trimmed.len());

    for c in trimmed.chars() {
        if RESERVED_CHARS.contains(&c) {
            escaped.push(ESCAPE_CHAR);
        }
        escaped.push(c);
    }

    escaped
}

/// Reverses [`escape_text`]: trims, then removes every `\` that immediately
/// precedes a reserved character.
///
/// A `\` followed by anything else is left intact, in a single pass.
///
/// # Examples
///
/// ```rust
/// use mson::unescape_text;
///
/// assert_eq!(unescape_text(r"a\,b"), "a,b");
/// assert_eq!(unescape_text(r"path\to"), r"path\to");
/// ```
#[must_use]
pub fn unescape_text(text: &str) -> String {
    let trimmed = text.trim();
    let mut unescaped = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE_CHAR {
            if let Some(&next) = chars.peek() {
                if RESERVED_CHARS.contains(&next) {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(c);
    }

    unescaped
}

/// A pluggable formatter/parser for one or more scalar types.
///
/// Converters never see null values or empty wire text — the registry maps
/// those to the empty string and [`MsonValue::Null`] before dispatch.
pub trait ScalarConverter: Send + Sync {
    /// Returns `true` if this converter handles the given scalar type.
    fn handles(&self, scalar: ScalarType) -> bool;

    /// Formats a non-null value as wire text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] when the value's shape does not match the
    /// scalar type this converter was selected for.
    fn serialize(&self, value: &MsonValue, options: &MsonOptions) -> Result<String>;

    /// Parses non-empty wire text into a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when the text is not valid for the scalar
    /// type.
    fn deserialize(
        &self,
        text: &str,
        scalar: ScalarType,
        options: &MsonOptions,
    ) -> Result<MsonValue>;
}

/// Boolean values on the wire as `1` / `0`.
pub struct BooleanConverter;

impl ScalarConverter for BooleanConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Boolean
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value {
            MsonValue::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            other => Err(Error::value(format!(
                "expected bool, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        Ok(MsonValue::Bool(text == "1"))
    }
}

/// Integer values; falls back to arbitrary precision outside `i64` range.
pub struct IntegerConverter;

impl ScalarConverter for IntegerConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Integer
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value {
            MsonValue::Number(Number::Integer(i)) => Ok(i.to_string()),
            MsonValue::Number(Number::BigInt(bi)) => Ok(bi.to_string()),
            other => Err(Error::value(format!(
                "expected integer, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(MsonValue::Number(Number::Integer(i)));
        }

        text.parse::<BigInt>()
            .map(|bi| MsonValue::Number(Number::BigInt(bi)))
            .map_err(|_| Error::format(format!("invalid integer `{}`", text)))
    }
}

/// Floating-point values in plain decimal notation.
pub struct FloatConverter;

impl ScalarConverter for FloatConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Float
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value.as_f64() {
            Some(f) => Ok(f.to_string()),
            None => Err(Error::value(format!(
                "expected number, found {}",
                value.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        text.parse::<f64>()
            .map(|f| MsonValue::Number(Number::Float(f)))
            .map_err(|_| Error::format(format!("invalid float `{}`", text)))
    }
}

/// Text values, trimmed and escaped per the MSON grammar.
pub struct TextConverter;

impl ScalarConverter for TextConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Text
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value {
            MsonValue::String(s) => Ok(escape_text(s)),
            other => Err(Error::value(format!(
                "expected string, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        Ok(MsonValue::String(unescape_text(text)))
    }
}

/// Timestamps in the compact `yyyyMMddHHmmssfff±hhmm` layout.
pub struct DateTimeConverter;

impl ScalarConverter for DateTimeConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::DateTime
    }

    fn serialize(&self, value: &MsonValue, options: &MsonOptions) -> Result<String> {
        match value {
            MsonValue::Date(dt) => {
                let dt = match options.timezone {
                    Some(tz) => dt.with_timezone(&tz),
                    None => *dt,
                };
                Ok(dt.format(DATE_FORMAT).to_string())
            }
            other => Err(Error::value(format!(
                "expected date, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        DateTime::parse_from_str(text, DATE_FORMAT)
            .map(MsonValue::Date)
            .map_err(|_| Error::format(format!("invalid datetime `{}`", text)))
    }
}

/// Identifiers as 32 hex digits without hyphens.
pub struct IdentifierConverter;

impl ScalarConverter for IdentifierConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Identifier
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value {
            // The nil identifier encodes as absent
            MsonValue::Uuid(id) if id.is_nil() => Ok(String::new()),
            MsonValue::Uuid(id) => Ok(id.simple().to_string()),
            other => Err(Error::value(format!(
                "expected identifier, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        Uuid::parse_str(text)
            .map(MsonValue::Uuid)
            .map_err(|_| Error::format(format!("invalid identifier `{}`", text)))
    }
}

/// Enumeration values as bare variant names.
///
/// Variant names carry no reserved characters, so the text passes through
/// unescaped in both directions.
pub struct EnumerationConverter;

impl ScalarConverter for EnumerationConverter {
    fn handles(&self, scalar: ScalarType) -> bool {
        scalar == ScalarType::Enumeration
    }

    fn serialize(&self, value: &MsonValue, _options: &MsonOptions) -> Result<String> {
        match value {
            MsonValue::String(s) => Ok(s.clone()),
            other => Err(Error::value(format!(
                "expected enumeration name, found {}",
                other.kind_name()
            ))),
        }
    }

    fn deserialize(
        &self,
        text: &str,
        _scalar: ScalarType,
        _options: &MsonOptions,
    ) -> Result<MsonValue> {
        Ok(MsonValue::String(text.to_string()))
    }
}

/// An ordered list of scalar converters; dispatch is first-match.
///
/// The default registry carries the seven built-in converters. Custom
/// converters registered with [`register`](Self::register) are consulted
/// before the built-ins, so they can override wire formats per scalar type.
///
/// # Examples
///
/// ```rust
/// use mson::{ConverterRegistry, ScalarType};
///
/// let registry = ConverterRegistry::default();
/// assert!(registry.find(ScalarType::Boolean).is_some());
/// ```
pub struct ConverterRegistry {
    converters: Vec<Box<dyn ScalarConverter>>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        ConverterRegistry {
            converters: vec![
                Box::new(BooleanConverter),
                Box::new(IntegerConverter),
                Box::new(FloatConverter),
                Box::new(TextConverter),
                Box::new(DateTimeConverter),
                Box::new(IdentifierConverter),
                Box::new(EnumerationConverter),
            ],
        }
    }
}

impl ConverterRegistry {
    /// Creates a registry with no converters at all.
    #[must_use]
    pub fn empty() -> Self {
        ConverterRegistry {
            converters: Vec::new(),
        }
    }

    /// Registers a converter ahead of the existing ones.
    pub fn register(&mut self, converter: Box<dyn ScalarConverter>) {
        self.converters.insert(0, converter);
    }

    /// Finds the first converter handling the given scalar type.
    #[must_use]
    pub fn find(&self, scalar: ScalarType) -> Option<&dyn ScalarConverter> {
        self.converters
            .iter()
            .find(|c| c.handles(scalar))
            .map(Box::as_ref)
    }

    /// Serializes a scalar value, mapping null to the empty string before
    /// dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when no converter handles the type, or the
    /// converter's own error.
    pub fn serialize(
        &self,
        value: &MsonValue,
        scalar: ScalarType,
        options: &MsonOptions,
    ) -> Result<String> {
        if value.is_null() {
            return Ok(String::new());
        }

        self.find(scalar)
            .ok_or_else(|| Error::schema(format!("no converter registered for {}", scalar)))?
            .serialize(value, options)
    }

    /// Deserializes scalar wire text, mapping the empty string to null before
    /// dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when no converter handles the type, or the
    /// converter's own error.
    pub fn deserialize(
        &self,
        text: &str,
        scalar: ScalarType,
        options: &MsonOptions,
    ) -> Result<MsonValue> {
        if text.is_empty() {
            return Ok(MsonValue::Null);
        }

        self.find(scalar)
            .ok_or_else(|| Error::schema(format!("no converter registered for {}", scalar)))?
            .deserialize(text, scalar, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn options() -> MsonOptions {
        MsonOptions::new()
    }

    #[test]
    fn test_escape_reserved_chars() {
        assert_eq!(escape_text("a{b}c[d]e,f"), r"a\{b\}c\[d\]e\,f");
    }

    #[test]
    fn test_escape_trims() {
        assert_eq!(escape_text("  hello  "), "hello");
    }

    #[test]
    fn test_unescape_leaves_plain_backslash() {
        assert_eq!(unescape_text(r"a\b"), r"a\b");
        assert_eq!(unescape_text(r"trailing\"), r"trailing\");
    }

    #[test]
    fn test_unescape_single_pass() {
        // Only the backslash directly before a reserved char is removed.
        assert_eq!(unescape_text(r"\\{"), r"\{");
    }

    #[test]
    fn test_escape_unescape_roundtrip() {
        let samples = [
            "Description with reserved chars: {} [] ,",
            "plain",
            "comma, separated, text",
            "[[nested]]",
        ];
        for s in samples {
            assert_eq!(unescape_text(&escape_text(s)), s.trim());
        }
    }

    #[test]
    fn test_boolean_wire_format() {
        let registry = ConverterRegistry::default();
        let opts = options();

        let on = registry
            .serialize(&MsonValue::Bool(true), ScalarType::Boolean, &opts)
            .unwrap();
        assert_eq!(on, "1");

        let off = registry
            .serialize(&MsonValue::Bool(false), ScalarType::Boolean, &opts)
            .unwrap();
        assert_eq!(off, "0");

        let back = registry
            .deserialize("1", ScalarType::Boolean, &opts)
            .unwrap();
        assert_eq!(back, MsonValue::Bool(true));
    }

    #[test]
    fn test_integer_bigint_fallback() {
        let registry = ConverterRegistry::default();
        let opts = options();

        let huge = "123456789012345678901234567890";
        let value = registry
            .deserialize(huge, ScalarType::Integer, &opts)
            .unwrap();
        assert!(matches!(value, MsonValue::Number(Number::BigInt(_))));

        let text = registry
            .serialize(&value, ScalarType::Integer, &opts)
            .unwrap();
        assert_eq!(text, huge);
    }

    #[test]
    fn test_datetime_roundtrip() {
        let registry = ConverterRegistry::default();
        let opts = options();

        let value = registry
            .deserialize("20180901000102000+0000", ScalarType::DateTime, &opts)
            .unwrap();
        let text = registry
            .serialize(&value, ScalarType::DateTime, &opts)
            .unwrap();
        assert_eq!(text, "20180901000102000+0000");
    }

    #[test]
    fn test_datetime_timezone_normalization() {
        let registry = ConverterRegistry::default();
        let opts = MsonOptions::new().with_timezone(FixedOffset::east_opt(0).unwrap());

        let value = registry
            .deserialize("20180830020000000+0200", ScalarType::DateTime, &opts)
            .unwrap();
        let text = registry
            .serialize(&value, ScalarType::DateTime, &opts)
            .unwrap();
        assert_eq!(text, "20180830000000000+0000");
    }

    #[test]
    fn test_identifier_simple_format() {
        let registry = ConverterRegistry::default();
        let opts = options();

        let id: Uuid = "9c4483b1-a523-e7c0-0293-052111033373".parse().unwrap();
        let text = registry
            .serialize(&MsonValue::Uuid(id), ScalarType::Identifier, &opts)
            .unwrap();
        assert_eq!(text, "9c4483b1a523e7c00293052111033373");

        let back = registry
            .deserialize(&text, ScalarType::Identifier, &opts)
            .unwrap();
        assert_eq!(back, MsonValue::Uuid(id));
    }

    #[test]
    fn test_nil_identifier_encodes_as_absent() {
        let registry = ConverterRegistry::default();
        let text = registry
            .serialize(&MsonValue::Uuid(Uuid::nil()), ScalarType::Identifier, &options())
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_null_maps_to_empty_and_back() {
        let registry = ConverterRegistry::default();
        let opts = options();

        for scalar in [
            ScalarType::Boolean,
            ScalarType::Integer,
            ScalarType::Float,
            ScalarType::Text,
            ScalarType::DateTime,
            ScalarType::Identifier,
            ScalarType::Enumeration,
        ] {
            let text = registry.serialize(&MsonValue::Null, scalar, &opts).unwrap();
            assert_eq!(text, "");
            let back = registry.deserialize("", scalar, &opts).unwrap();
            assert_eq!(back, MsonValue::Null);
        }
    }

    #[test]
    fn test_custom_converter_takes_precedence() {
        struct YesNoBoolean;

        impl ScalarConverter for YesNoBoolean {
            fn handles(&self, scalar: ScalarType) -> bool {
                scalar == ScalarType::Boolean
            }

            fn serialize(&self, value: &MsonValue, _: &MsonOptions) -> Result<String> {
                match value {
                    MsonValue::Bool(true) => Ok("Y".to_string()),
                    MsonValue::Bool(false) => Ok("N".to_string()),
                    other => Err(Error::value(other.kind_name())),
                }
            }

            fn deserialize(&self, text: &str, _: ScalarType, _: &MsonOptions) -> Result<MsonValue> {
                Ok(MsonValue::Bool(text == "Y"))
            }
        }

        let mut registry = ConverterRegistry::default();
        registry.register(Box::new(YesNoBoolean));

        let text = registry
            .serialize(&MsonValue::Bool(true), ScalarType::Boolean, &options())
            .unwrap();
        assert_eq!(text, "Y");
    }

    #[test]
    fn test_missing_converter_is_schema_error() {
        let registry = ConverterRegistry::empty();
        let result = registry.serialize(&MsonValue::Bool(true), ScalarType::Boolean, &options());
        assert!(matches!(result, Err(Error::Schema(_))));
    }
}
