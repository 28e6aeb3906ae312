//! Structural encoding: value trees to MSON content.
//!
//! This module provides the [`Encoder`], the recursive half of the structural
//! codec that turns an [`MsonValue`] tree into MSON grammar text driven by a
//! [`FieldDefinition`] tree:
//!
//! - scalars delegate to the converter registry
//! - arrays emit `[` item (`,` item)* `]`
//! - objects resolve their definition (registry entry first, inline children
//!   otherwise) and emit each child slot's value in position order inside
//!   `{`...`}`
//! - null values emit `{}` for objects, `[]` for arrays, and the empty
//!   string for scalars
//!
//! Most users should use [`MsonSerializer`](crate::MsonSerializer) in the
//! crate root, which wraps the encoded content in a message header and
//! fragments it when needed.
//!
//! ## Example
//!
//! ```rust
//! use mson::{ConverterRegistry, Encoder, FieldDefinition, MsonOptions, MsonSchema, ScalarType};
//! use mson::mson;
//!
//! let def = FieldDefinition::object("Product")
//!     .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
//!     .add_field(FieldDefinition::scalar("name", ScalarType::Text))?;
//!
//! let schema = MsonSchema::new();
//! let converters = ConverterRegistry::default();
//! let options = MsonOptions::new();
//! let encoder = Encoder::new(&schema, &converters, &options);
//!
//! let value = mson!({ "id": 123456789, "name": "Licensed Wooden Bacon" });
//! let content = encoder.encode(&value, &def)?;
//! assert_eq!(content, "{123456789,Licensed Wooden Bacon}");
//! # Ok::<(), mson::Error>(())
//! ```

use crate::{
    ConverterRegistry, Error, FieldDefinition, FieldKind, MsonOptions, MsonSchema, MsonValue,
    Result,
};

/// The recursive MSON encoder.
///
/// Borrows the schema, converter registry, and options for the duration of
/// one encode pass; the encoder itself holds no mutable state, so it is safe
/// to drive concurrently against a shared schema.
pub struct Encoder<'a> {
    schema: &'a MsonSchema,
    converters: &'a ConverterRegistry,
    options: &'a MsonOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(
        schema: &'a MsonSchema,
        converters: &'a ConverterRegistry,
        options: &'a MsonOptions,
    ) -> Self {
        Encoder {
            schema,
            converters,
            options,
        }
    }

    /// Encodes a value against a field definition, producing MSON content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when an object definition cannot be
    /// resolved, and [`Error::Value`] when the value's shape does not match
    /// the definition. Errors name the failing field.
    pub fn encode(&self, value: &MsonValue, def: &FieldDefinition) -> Result<String> {
        match def.kind() {
            FieldKind::Scalar(scalar) => self
                .converters
                .serialize(value, *scalar, self.options)
                .map_err(|e| e.at_field(def.description(), def.position())),
            FieldKind::Array { item } => self.encode_array(value, def, item),
            FieldKind::Object { .. } => self.encode_object(value, def),
        }
    }

    fn encode_array(
        &self,
        value: &MsonValue,
        def: &FieldDefinition,
        item: &FieldDefinition,
    ) -> Result<String> {
        let items = match value {
            MsonValue::Null => return Ok("[]".to_string()),
            MsonValue::Array(items) => items,
            other => {
                return Err(Error::value(format!(
                    "expected array, found {}",
                    other.kind_name()
                ))
                .at_field(def.description(), def.position()))
            }
        };

        let mut out = String::from("[");
        let mut first = true;

        for element in items {
            if !first {
                out.push(',');
            }
            out.push_str(&self.encode(element, item)?);
            first = false;
        }

        out.push(']');
        Ok(out)
    }

    fn encode_object(&self, value: &MsonValue, def: &FieldDefinition) -> Result<String> {
        let map = match value {
            MsonValue::Null => return Ok("{}".to_string()),
            MsonValue::Object(map) => map,
            other => {
                return Err(Error::value(format!(
                    "expected object, found {}",
                    other.kind_name()
                ))
                .at_field(def.description(), def.position()))
            }
        };

        let resolved = self
            .schema
            .resolve_object(def)
            .map_err(|e| e.at_field(def.description(), def.position()))?;

        let mut out = String::from("{");
        let mut first = true;

        for child in resolved.get().fields() {
            if !first {
                out.push(',');
            }

            let slot = child.slot().ok_or_else(|| {
                Error::schema("object child has no slot")
                    .at_field(child.description(), child.position())
            })?;

            let slot_value = map.get(slot).unwrap_or(&MsonValue::Null);
            out.push_str(&self.encode(slot_value, child)?);
            first = false;
        }

        out.push('}');
        Ok(out)
    }
}
