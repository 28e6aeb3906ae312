//! Dynamic value representation for MSON data.
//!
//! This module provides the [`MsonValue`] enum which represents any value the
//! MSON grammar can carry. The structural codec operates entirely on this
//! type: typed host structs convert to and from it through the
//! [`MsonObject`](crate::MsonObject) capability.
//!
//! ## Core Types
//!
//! - [`MsonValue`]: any MSON value (null, bool, number, string, date,
//!   identifier, array, object)
//! - [`Number`]: a numeric value — `i64`, `f64`, or an arbitrary-precision
//!   integer for values outside `i64` range
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use mson::{MsonValue, Number};
//!
//! let null = MsonValue::Null;
//! let boolean = MsonValue::from(true);
//! let number = MsonValue::from(42);
//! let text = MsonValue::from("hello");
//!
//! // Using the mson! macro
//! use mson::mson;
//! let obj = mson!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use mson::MsonValue;
//!
//! let value = MsonValue::from(42);
//! assert!(value.is_number());
//! assert_eq!(i64::try_from(value).unwrap(), 42);
//! ```

use crate::MsonMap;
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use std::fmt;
use uuid::Uuid;

/// A dynamically-typed representation of any value MSON can carry.
///
/// Slot values enumerated from a host object, decoded wire content, and
/// hand-assembled test data all take this shape. It is particularly useful
/// when:
///
/// - The structure isn't known at compile time
/// - You need to manipulate MSON data generically
/// - Building MSON payloads programmatically
///
/// # Examples
///
/// ```rust
/// use mson::{MsonValue, Number};
///
/// let null = MsonValue::Null;
/// let num = MsonValue::Number(Number::Integer(42));
/// let text = MsonValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum MsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<FixedOffset>),
    Uuid(Uuid),
    Array(Vec<MsonValue>),
    Object(MsonMap),
}

/// A numeric value: integer, float, or arbitrary-precision integer.
///
/// The integer converter parses into `i64` first and only falls back to
/// [`BigInt`] when the wire text does not fit, so `BigInt` never appears for
/// values that `i64` can represent.
///
/// # Examples
///
/// ```rust
/// use mson::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), Some(3.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    BigInt(BigInt),
}

impl Number {
    /// Returns `true` if this is an `i64` integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is an arbitrary-precision integer.
    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Number::BigInt(_))
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Returns `Some` for integers, and for floats with no fractional part
    /// that fit in `i64` range. `BigInt` values are out of range by
    /// construction and return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Number::BigInt(_) => None,
        }
    }

    /// Converts this number to an `f64` if it can be represented.
    ///
    /// Integers convert losslessly within `f64`'s integer range; `BigInt`
    /// values return `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(i) => Some(*i as f64),
            Number::Float(f) => Some(*f),
            Number::BigInt(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::BigInt(bi) => write!(f, "{}", bi),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::Integer(value as i64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::BigInt(value)
    }
}

impl MsonValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, MsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, MsonValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, MsonValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, MsonValue::String(_))
    }

    /// Returns `true` if the value is a date.
    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, MsonValue::Date(_))
    }

    /// Returns `true` if the value is an identifier.
    #[inline]
    #[must_use]
    pub const fn is_uuid(&self) -> bool {
        matches!(self, MsonValue::Uuid(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, MsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, MsonValue::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::MsonValue;
    ///
    /// assert_eq!(MsonValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(MsonValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an `i64` integer or a whole-number float, returns it.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a representable number, returns it as `f64`.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// If the value is a date, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            MsonValue::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an identifier, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            MsonValue::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<MsonValue>> {
        match self {
            MsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to its slot map.
    /// Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&MsonMap> {
        match self {
            MsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// A short name for the value's shape, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            MsonValue::Null => "null",
            MsonValue::Bool(_) => "bool",
            MsonValue::Number(_) => "number",
            MsonValue::String(_) => "string",
            MsonValue::Date(_) => "date",
            MsonValue::Uuid(_) => "identifier",
            MsonValue::Array(_) => "array",
            MsonValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for MsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsonValue::Null => write!(f, "null"),
            MsonValue::Bool(b) => write!(f, "{}", b),
            MsonValue::Number(n) => write!(f, "{}", n),
            MsonValue::String(s) => write!(f, "{}", s),
            MsonValue::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
            MsonValue::Uuid(id) => write!(f, "{}", id.simple()),
            MsonValue::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            MsonValue::Object(_) => write!(f, "{{object}}"),
        }
    }
}

// TryFrom implementations for extracting values from MsonValue
impl TryFrom<MsonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::Number(Number::Integer(i)) => Ok(i),
            MsonValue::Number(Number::Float(f)) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(crate::Error::value(format!(
                        "cannot convert float {} to i64",
                        f
                    )))
                }
            }
            _ => Err(crate::Error::value(format!(
                "expected integer, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<MsonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::Number(Number::Integer(i)) => Ok(i as f64),
            MsonValue::Number(Number::Float(f)) => Ok(f),
            _ => Err(crate::Error::value(format!(
                "expected number, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<MsonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::value(format!(
                "expected bool, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<MsonValue> for String {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::String(s) => Ok(s),
            _ => Err(crate::Error::value(format!(
                "expected string, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<MsonValue> for DateTime<FixedOffset> {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::Date(dt) => Ok(dt),
            _ => Err(crate::Error::value(format!(
                "expected date, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<MsonValue> for Uuid {
    type Error = crate::Error;

    fn try_from(value: MsonValue) -> crate::Result<Self> {
        match value {
            MsonValue::Uuid(id) => Ok(id),
            _ => Err(crate::Error::value(format!(
                "expected identifier, found {}",
                value.kind_name()
            ))),
        }
    }
}

// From implementations for creating MsonValue from primitives
impl From<bool> for MsonValue {
    fn from(value: bool) -> Self {
        MsonValue::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MsonValue {
                fn from(value: $t) -> Self {
                    MsonValue::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<BigInt> for MsonValue {
    fn from(value: BigInt) -> Self {
        MsonValue::Number(Number::BigInt(value))
    }
}

impl From<String> for MsonValue {
    fn from(value: String) -> Self {
        MsonValue::String(value)
    }
}

impl From<&str> for MsonValue {
    fn from(value: &str) -> Self {
        MsonValue::String(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for MsonValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        MsonValue::Date(value)
    }
}

impl From<Uuid> for MsonValue {
    fn from(value: Uuid) -> Self {
        MsonValue::Uuid(value)
    }
}

impl From<Vec<MsonValue>> for MsonValue {
    fn from(value: Vec<MsonValue>) -> Self {
        MsonValue::Array(value)
    }
}

impl From<MsonMap> for MsonValue {
    fn from(value: MsonMap) -> Self {
        MsonValue::Object(value)
    }
}

impl<T> From<Option<T>> for MsonValue
where
    T: Into<MsonValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => MsonValue::Null,
        }
    }
}
