//! Structural decoding: MSON content to value trees.
//!
//! This module provides the [`Decoder`], the mirror of the
//! [`Encoder`](crate::Encoder):
//!
//! - empty content and the empty-object literal `{}` decode to null
//! - scalars delegate to the converter registry by declared type
//! - arrays strip `[`...`]`, split the interior at top-level commas, and
//!   decode every raw item with the array's item definition
//! - objects strip `{`...`}`, split, resolve the object's definition, and
//!   pair raw items with children strictly by ordinal index — wire items
//!   beyond the defined children are ignored, children beyond the available
//!   items decode to null
//!
//! The positional pairing is deliberate: both sides of a producer/consumer
//! pair may add or drop trailing fields independently. Inserting or removing
//! a field in the middle silently shifts every later value; only trailing
//! evolution is safe.
//!
//! ## Example
//!
//! ```rust
//! use mson::{ConverterRegistry, Decoder, FieldDefinition, MsonOptions, MsonSchema, ScalarType};
//!
//! let def = FieldDefinition::object("Product")
//!     .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
//!     .add_field(FieldDefinition::scalar("name", ScalarType::Text))?;
//!
//! let schema = MsonSchema::new();
//! let converters = ConverterRegistry::default();
//! let options = MsonOptions::new();
//! let decoder = Decoder::new(&schema, &converters, &options);
//!
//! let value = decoder.decode("{123456789,Licensed Wooden Bacon}", &def)?;
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get("id").and_then(|v| v.as_i64()), Some(123456789));
//! # Ok::<(), mson::Error>(())
//! ```

use crate::split::split_top_level;
use crate::{
    ConverterRegistry, Error, FieldDefinition, FieldKind, MsonMap, MsonOptions, MsonSchema,
    MsonValue, Result,
};

/// The recursive MSON decoder.
///
/// Stateless per call, like the encoder; a shared schema can serve any number
/// of concurrent decode passes.
pub struct Decoder<'a> {
    schema: &'a MsonSchema,
    converters: &'a ConverterRegistry,
    options: &'a MsonOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(
        schema: &'a MsonSchema,
        converters: &'a ConverterRegistry,
        options: &'a MsonOptions,
    ) -> Self {
        Decoder {
            schema,
            converters,
            options,
        }
    }

    /// Decodes MSON content against a field definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when expected delimiters are missing,
    /// [`Error::Schema`] when an object definition cannot be resolved, and
    /// converter errors for malformed scalar text. Errors name the failing
    /// field.
    pub fn decode(&self, content: &str, def: &FieldDefinition) -> Result<MsonValue> {
        // Null and empty-object are indistinguishable on the wire; both are
        // absent values regardless of the declared shape.
        if content.is_empty() || content == "{}" {
            return Ok(MsonValue::Null);
        }

        match def.kind() {
            FieldKind::Scalar(scalar) => self
                .converters
                .deserialize(content, *scalar, self.options)
                .map_err(|e| e.at_field(def.description(), def.position())),
            FieldKind::Array { item } => self.decode_array(content, def, item),
            FieldKind::Object { .. } => self.decode_object(content, def),
        }
    }

    fn decode_array(
        &self,
        content: &str,
        def: &FieldDefinition,
        item: &FieldDefinition,
    ) -> Result<MsonValue> {
        if !content.starts_with('[') || !content.ends_with(']') {
            return Err(Error::format("invalid array format")
                .at_field(def.description(), def.position()));
        }

        let interior = &content[1..content.len() - 1];
        let raw_items = split_top_level(interior);

        let mut items = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            items.push(self.decode(raw, item)?);
        }

        Ok(MsonValue::Array(items))
    }

    fn decode_object(&self, content: &str, def: &FieldDefinition) -> Result<MsonValue> {
        if !content.starts_with('{') || !content.ends_with('}') {
            return Err(Error::format("invalid object format")
                .at_field(def.description(), def.position()));
        }

        let interior = &content[1..content.len() - 1];
        let raw_items = split_top_level(interior);

        let resolved = self
            .schema
            .resolve_object(def)
            .map_err(|e| e.at_field(def.description(), def.position()))?;
        let fields = resolved.get().fields();

        let mut map = MsonMap::with_capacity(fields.len());

        // Pair by index: extra wire items are ignored, missing ones are null.
        for (index, child) in fields.iter().enumerate() {
            let slot = child.slot().ok_or_else(|| {
                Error::schema("object child has no slot")
                    .at_field(child.description(), child.position())
            })?;

            let value = match raw_items.get(index) {
                Some(raw) => self.decode(raw, child)?,
                None => MsonValue::Null,
            };

            map.insert(slot.to_string(), value);
        }

        Ok(MsonValue::Object(map))
    }
}
