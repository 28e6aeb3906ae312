//! The host-object capability: slot access and schema discovery.
//!
//! The structural codec never touches host structs directly. It works on
//! [`MsonValue`] trees and relies on [`MsonObject`] to bridge the two worlds:
//!
//! - [`MsonObject::field_definition`] is the discovery capability — it
//!   returns the type's positional schema tree, children ordered 1..N in
//!   declaration order. A slot the type wants ignored is simply not listed; a
//!   slot with an explicit wire position passes it via
//!   [`with_position`](crate::FieldDefinition::with_position).
//! - [`MsonObject::to_value`] enumerates the instance's slots into an ordered
//!   map (the get-slot capability, applied to every slot at once).
//! - [`MsonObject::from_value`] default-constructs an instance and writes
//!   decoded slots into it (the set-slot capability). Slots that decoded to
//!   null stay at their default.
//!
//! Implementations are mechanical and usually generated; the test fixtures in
//! this crate write them by hand.
//!
//! ## Examples
//!
//! ```rust
//! use mson::{FieldDefinition, MsonMap, MsonObject, MsonValue, Result, ScalarType};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl MsonObject for Point {
//!     fn type_name() -> &'static str {
//!         "Point"
//!     }
//!
//!     fn field_definition() -> Result<FieldDefinition> {
//!         FieldDefinition::object("Point")
//!             .add_field(FieldDefinition::scalar("x", ScalarType::Integer))?
//!             .add_field(FieldDefinition::scalar("y", ScalarType::Integer))
//!     }
//!
//!     fn to_value(&self) -> MsonValue {
//!         let mut map = MsonMap::new();
//!         map.insert("x".to_string(), MsonValue::from(self.x));
//!         map.insert("y".to_string(), MsonValue::from(self.y));
//!         MsonValue::Object(map)
//!     }
//!
//!     fn from_value(value: MsonValue) -> Result<Self> {
//!         let mut map = value.into_object()?;
//!         Ok(Point {
//!             x: map.take("x").map(i64::try_from).transpose()?.unwrap_or_default(),
//!             y: map.take("y").map(i64::try_from).transpose()?.unwrap_or_default(),
//!         })
//!     }
//! }
//! ```

use crate::{Error, FieldDefinition, MsonMap, MsonValue, Result};

/// Bridges a host type to the dynamic value model the codec operates on.
pub trait MsonObject: Sized {
    /// The name this type registers and resolves under in a schema's type
    /// registry.
    fn type_name() -> &'static str;

    /// The type's discovered positional schema: children 1..N in declaration
    /// order, nested object types embedded via their own definitions and
    /// tagged with their type names so a schema registry can override them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the definition tree is inconsistent
    /// (duplicate positions).
    fn field_definition() -> Result<FieldDefinition>;

    /// Enumerates this instance's slots, in declaration order, into a value
    /// tree.
    fn to_value(&self) -> MsonValue;

    /// Builds an instance from a decoded value tree. Missing or null slots
    /// keep the default-constructed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] when a slot's decoded value does not fit the
    /// host field.
    fn from_value(value: MsonValue) -> Result<Self>;
}

/// Helpers for pulling slots out of a decoded object value.
///
/// `from_value` implementations consume the decoded map slot by slot; these
/// shortcuts keep them terse.
impl MsonValue {
    /// Consumes this value as an object map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] when the value is not an object.
    pub fn into_object(self) -> Result<MsonMap> {
        match self {
            MsonValue::Object(map) => Ok(map),
            other => Err(Error::value(format!(
                "expected object, found {}",
                other.kind_name()
            ))),
        }
    }

    /// Consumes this value as an array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] when the value is not an array.
    pub fn into_array(self) -> Result<Vec<MsonValue>> {
        match self {
            MsonValue::Array(items) => Ok(items),
            other => Err(Error::value(format!(
                "expected array, found {}",
                other.kind_name()
            ))),
        }
    }
}

impl MsonMap {
    /// Removes and returns the named slot, mapping null to `None`.
    pub fn take(&mut self, slot: &str) -> Option<MsonValue> {
        match self.remove(slot) {
            None | Some(MsonValue::Null) => None,
            Some(value) => Some(value),
        }
    }
}
