//! # mson
//!
//! A Rust implementation of MSON: a compact, schema-driven, positional text
//! serialization format with built-in message fragmentation for transports
//! with a maximum message size.
//!
//! ## What is MSON?
//!
//! MSON drops field names from the wire entirely. A schema of positioned
//! field definitions is shared between producer and consumer, and values are
//! paired to fields strictly by ordinal index:
//!
//! ```text
//! 11/1~{123456789,Licensed Wooden Bacon}
//! ```
//!
//! That message is a version character (`1`), a fragment header (`1/1~`), and
//! an object with two positional fields. Compared to name-carrying formats
//! the payload is dramatically smaller, at the cost of both sides agreeing on
//! a schema — which is why every message carries a schema version character.
//!
//! ## Key Features
//!
//! - **Positional encoding**: objects are `{v1,v2,...}`, arrays are
//!   `[v1,v2,...]`, no names or quotes on the wire
//! - **Built-in fragmentation**: payloads longer than a configured maximum
//!   split into self-describing `{version}{position}/{total}~` fragments,
//!   sized by a fixed-point computation that accounts for the header's own
//!   length
//! - **Pluggable scalar converters**: booleans, integers (with big-integer
//!   fallback), floats, text, timestamps, identifiers, and enumerations out
//!   of the box; custom converters override per type
//! - **Schema evolution**: trailing fields can be added or removed on either
//!   side without breaking the other
//!
//! ## Quick Start
//!
//! ```rust
//! use mson::{mson, FieldDefinition, MsonSchema, MsonSerializer, ScalarType};
//!
//! let schema = MsonSchema::new().with_root(
//!     FieldDefinition::object("Product")
//!         .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
//!         .add_field(FieldDefinition::scalar("name", ScalarType::Text))?,
//! );
//!
//! let serializer = MsonSerializer::new(schema);
//!
//! let value = mson!({ "id": 123456789, "name": "Licensed Wooden Bacon" });
//! let out = serializer.serialize_value(&value)?;
//! assert_eq!(out.message, "11/1~{123456789,Licensed Wooden Bacon}");
//! assert!(out.fragments.is_empty());
//!
//! let back = serializer.deserialize_value(&out.message)?;
//! assert_eq!(back, value);
//! # Ok::<(), mson::Error>(())
//! ```
//!
//! ## Typed Values
//!
//! Host structs implement [`MsonObject`] — the slot-access and schema
//! discovery capability — and then serialize directly:
//!
//! ```rust
//! use mson::{FieldDefinition, MsonMap, MsonObject, MsonSchema, MsonSerializer,
//!            MsonValue, Result, ScalarType};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Product {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl MsonObject for Product {
//!     fn type_name() -> &'static str {
//!         "Product"
//!     }
//!
//!     fn field_definition() -> Result<FieldDefinition> {
//!         FieldDefinition::object("Product")
//!             .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
//!             .add_field(FieldDefinition::scalar("name", ScalarType::Text))
//!     }
//!
//!     fn to_value(&self) -> MsonValue {
//!         let mut map = MsonMap::new();
//!         map.insert("id".to_string(), MsonValue::from(self.id));
//!         map.insert("name".to_string(), MsonValue::from(self.name.as_str()));
//!         MsonValue::Object(map)
//!     }
//!
//!     fn from_value(value: MsonValue) -> Result<Self> {
//!         let mut map = value.into_object()?;
//!         Ok(Product {
//!             id: map.take("id").map(i64::try_from).transpose()?.unwrap_or_default(),
//!             name: map.take("name").map(String::try_from).transpose()?.unwrap_or_default(),
//!         })
//!     }
//! }
//!
//! let serializer = MsonSerializer::new(MsonSchema::new());
//! let product = Product { id: 7, name: "Widget".to_string() };
//!
//! let out = serializer.serialize(Some(&product))?;
//! assert_eq!(out.message, "11/1~{7,Widget}");
//!
//! let back: Option<Product> = serializer.deserialize(&out.message)?;
//! assert_eq!(back, Some(product));
//! # Ok::<(), mson::Error>(())
//! ```
//!
//! ## Fragmentation
//!
//! A serialized payload longer than
//! [`MsonOptions::max_message_length`](crate::MsonOptions) also comes back as
//! fragments, each a complete message:
//!
//! ```rust
//! use mson::FragmentManager;
//!
//! let manager = FragmentManager::new(500);
//! let fragments = manager.fragment('1', &"x".repeat(1475))?;
//! assert_eq!(fragments.len(), 3);
//!
//! // The receiver collects all fragments and reassembles before decoding
//! let single = FragmentManager::reassemble(&fragments)?;
//! assert!(single.starts_with("11/1~"));
//! # Ok::<(), mson::Error>(())
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - No panics in the public API

pub mod convert;
pub mod de;
pub mod error;
pub mod fragment;
pub mod macros;
pub mod map;
pub mod message;
pub mod object;
pub mod options;
pub mod schema;
pub mod ser;
pub mod split;
pub mod value;

pub use convert::{
    escape_text, unescape_text, BooleanConverter, ConverterRegistry, DateTimeConverter,
    EnumerationConverter, FloatConverter, IdentifierConverter, IntegerConverter, ScalarConverter,
    TextConverter,
};
pub use de::Decoder;
pub use error::{Error, Result};
pub use fragment::FragmentManager;
pub use map::MsonMap;
pub use message::MsonMessage;
pub use object::MsonObject;
pub use options::MsonOptions;
pub use schema::{FieldDefinition, FieldKind, MsonSchema, ScalarType};
pub use ser::Encoder;
pub use split::split_top_level;
pub use value::{MsonValue, Number};

/// Alias kept for brevity in schema-less value manipulation.
pub type Value = MsonValue;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The result of one serialize call.
///
/// `message` is always the complete single-message string; `fragments` is
/// empty unless the content exceeded the configured maximum length, in which
/// case it holds the full fragment strings ready for transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Serialized {
    pub message: String,
    pub fragments: Vec<String>,
}

/// The top-level MSON serializer.
///
/// Owns a schema, an options bundle, and a converter registry; drives the
/// structural codec, wraps content in message headers, and fragments
/// over-length payloads. A serializer is safe to share across threads: the
/// schema is read-only after construction and the per-type definition cache
/// uses insert-if-absent semantics (a racing thread at worst recomputes an
/// identical tree).
///
/// # Examples
///
/// ```rust
/// use mson::{MsonSchema, MsonSerializer};
///
/// let serializer = MsonSerializer::new(MsonSchema::new());
/// let result = serializer.deserialize_value("11/1~{}");
/// assert!(result.unwrap().is_null());
/// ```
pub struct MsonSerializer {
    schema: MsonSchema,
    options: MsonOptions,
    converters: ConverterRegistry,
    fragment_manager: FragmentManager,
    root: Option<Arc<FieldDefinition>>,
    definitions: RwLock<HashMap<String, Arc<FieldDefinition>>>,
}

impl Default for MsonSerializer {
    fn default() -> Self {
        Self::new(MsonSchema::new())
    }
}

impl MsonSerializer {
    /// Creates a serializer for a schema with default options.
    #[must_use]
    pub fn new(schema: MsonSchema) -> Self {
        Self::with_options(schema, MsonOptions::default())
    }

    /// Creates a serializer with explicit options.
    #[must_use]
    pub fn with_options(schema: MsonSchema, options: MsonOptions) -> Self {
        let fragment_manager = FragmentManager::new(options.max_message_length);
        let root = schema.root().cloned().map(Arc::new);

        MsonSerializer {
            schema,
            options,
            converters: ConverterRegistry::default(),
            fragment_manager,
            root,
            definitions: RwLock::new(HashMap::new()),
        }
    }

    /// The schema this serializer encodes and decodes against.
    #[must_use]
    pub fn schema(&self) -> &MsonSchema {
        &self.schema
    }

    /// The options bundle handed to converters and the fragment manager.
    #[must_use]
    pub fn options(&self) -> &MsonOptions {
        &self.options
    }

    /// Registers a custom scalar converter ahead of the built-in set.
    pub fn register_converter(&mut self, converter: Box<dyn ScalarConverter>) {
        self.converters.register(converter);
    }

    /// Serializes a typed value to a headered MSON message, fragmenting when
    /// the content exceeds the configured maximum length.
    ///
    /// `None` serializes as the null object `{}`. The returned
    /// [`Serialized::message`] is always the complete single-message string,
    /// even when fragments were also produced.
    ///
    /// # Errors
    ///
    /// Propagates schema, value, and sizing errors from the codec and the
    /// fragment manager.
    pub fn serialize<T: MsonObject>(&self, value: Option<&T>) -> Result<Serialized> {
        let content = match value {
            None => "{}".to_string(),
            Some(v) => {
                let root = self.resolve_root::<T>()?;
                let encoder = Encoder::new(&self.schema, &self.converters, &self.options);
                encoder.encode(&v.to_value(), &root)?
            }
        };

        self.package(content)
    }

    /// Serializes a dynamic value against the schema's root definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the schema has no root definition, plus
    /// everything [`serialize`](Self::serialize) can return.
    pub fn serialize_value(&self, value: &MsonValue) -> Result<Serialized> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| Error::schema("schema has no root definition"))?;

        let encoder = Encoder::new(&self.schema, &self.converters, &self.options);
        let content = encoder.encode(value, root)?;

        self.package(content)
    }

    fn package(&self, content: String) -> Result<Serialized> {
        let version = self.schema.version();

        let fragments = if content.chars().count() > self.options.max_message_length {
            self.fragment_manager
                .fragment(version, &content)?
                .iter()
                .map(MsonMessage::full_message)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Serialized {
            message: format!("{}1/1~{}", version, content),
            fragments,
        })
    }

    /// Deserializes a headered MSON message into a typed value.
    ///
    /// Returns `None` when the message carries the null object.
    ///
    /// # Errors
    ///
    /// - [`Error::Argument`] for empty or whitespace-only input
    /// - [`Error::Schema`] when the message is a fragment (`total > 1` —
    ///   reassemble with [`FragmentManager`] first) or its version character
    ///   does not match the schema
    /// - format and converter errors from the codec
    pub fn deserialize<T: MsonObject>(&self, mson: &str) -> Result<Option<T>> {
        let message = self.checked_message(mson)?;
        let root = self.resolve_root::<T>()?;

        let decoder = Decoder::new(&self.schema, &self.converters, &self.options);
        let value = decoder.decode(message.content(), &root)?;

        match value {
            MsonValue::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }

    /// Deserializes a headered MSON message into a dynamic value against the
    /// schema's root definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the schema has no root definition, plus
    /// everything [`deserialize`](Self::deserialize) can return.
    pub fn deserialize_value(&self, mson: &str) -> Result<MsonValue> {
        let message = self.checked_message(mson)?;

        let root = self
            .root
            .as_ref()
            .ok_or_else(|| Error::schema("schema has no root definition"))?;

        let decoder = Decoder::new(&self.schema, &self.converters, &self.options);
        decoder.decode(message.content(), root)
    }

    fn checked_message(&self, mson: &str) -> Result<MsonMessage> {
        if mson.trim().is_empty() {
            return Err(Error::argument("message cannot be null or empty"));
        }

        let message = MsonMessage::parse(mson)?;

        if message.total() > 1 {
            return Err(Error::schema(
                "this message is a fragment and cannot be deserialized; \
                 reassemble the fragment set with FragmentManager first",
            ));
        }

        if message.version() != self.schema.version() {
            return Err(Error::schema(format!(
                "schema version mismatch: expected {}, got {}",
                self.schema.version(),
                message.version()
            )));
        }

        Ok(message)
    }

    /// Resolves the root definition for a typed call: the schema root when
    /// set, else the cached compiled tree for `T` (registry entry first,
    /// discovered definition otherwise).
    fn resolve_root<T: MsonObject>(&self) -> Result<Arc<FieldDefinition>> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }

        {
            let cache = self
                .definitions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(def) = cache.get(T::type_name()) {
                return Ok(def.clone());
            }
        }

        let built = match self.schema.definition_for(T::type_name()) {
            Some(registered) => registered,
            None => Arc::new(T::field_definition()?),
        };

        let mut cache = self
            .definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = cache
            .entry(T::type_name().to_string())
            .or_insert(built)
            .clone();

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl MsonObject for Point {
        fn type_name() -> &'static str {
            "Point"
        }

        fn field_definition() -> Result<FieldDefinition> {
            FieldDefinition::object("Point")
                .add_field(FieldDefinition::scalar("x", ScalarType::Integer))?
                .add_field(FieldDefinition::scalar("y", ScalarType::Integer))
        }

        fn to_value(&self) -> MsonValue {
            let mut map = MsonMap::new();
            map.insert("x".to_string(), MsonValue::from(self.x));
            map.insert("y".to_string(), MsonValue::from(self.y));
            MsonValue::Object(map)
        }

        fn from_value(value: MsonValue) -> Result<Self> {
            let mut map = value.into_object()?;
            Ok(Point {
                x: map
                    .take("x")
                    .map(i64::try_from)
                    .transpose()?
                    .unwrap_or_default(),
                y: map
                    .take("y")
                    .map(i64::try_from)
                    .transpose()?
                    .unwrap_or_default(),
            })
        }
    }

    #[test]
    fn test_typed_roundtrip() {
        let serializer = MsonSerializer::default();
        let point = Point { x: 1, y: 2 };

        let out = serializer.serialize(Some(&point)).unwrap();
        assert_eq!(out.message, "11/1~{1,2}");
        assert!(out.fragments.is_empty());

        let back: Option<Point> = serializer.deserialize(&out.message).unwrap();
        assert_eq!(back, Some(point));
    }

    #[test]
    fn test_serialize_none_is_null_object() {
        let serializer = MsonSerializer::default();
        let out = serializer.serialize::<Point>(None).unwrap();
        assert_eq!(out.message, "11/1~{}");

        let back: Option<Point> = serializer.deserialize(&out.message).unwrap();
        assert_eq!(back, None);
    }

    #[test]
    fn test_deserialize_rejects_empty_input() {
        let serializer = MsonSerializer::default();
        for input in ["", " ", "\t"] {
            let result = serializer.deserialize::<Point>(input);
            assert!(matches!(result, Err(Error::Argument(_))));
        }
    }

    #[test]
    fn test_deserialize_rejects_fragment() {
        let serializer = MsonSerializer::default();
        let result = serializer.deserialize::<Point>("11/2~{1,");
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_deserialize_rejects_version_mismatch() {
        let schema = MsonSchema::with_version('2').unwrap();
        let serializer = MsonSerializer::new(schema);

        let result = serializer.deserialize::<Point>("11/1~{1,2}");
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_registry_definition_overrides_discovery() {
        let mut schema = MsonSchema::new();
        schema.register_type(
            "Point",
            FieldDefinition::object("Point")
                .add_field(FieldDefinition::scalar("y", ScalarType::Integer))
                .unwrap()
                .add_field(FieldDefinition::scalar("x", ScalarType::Integer))
                .unwrap(),
        );

        let serializer = MsonSerializer::new(schema);
        let out = serializer.serialize(Some(&Point { x: 1, y: 2 })).unwrap();
        assert_eq!(out.message, "11/1~{2,1}");
    }

    #[test]
    fn test_oversized_content_produces_fragments() {
        let options = MsonOptions::new().with_max_message_length(8);
        let serializer = MsonSerializer::with_options(MsonSchema::new(), options);

        let out = serializer
            .serialize(Some(&Point {
                x: 123456789,
                y: 987654321,
            }))
            .unwrap();

        assert!(out.message.starts_with("11/1~"));
        assert!(out.fragments.len() > 1);

        let reassembled = FragmentManager::reassemble_strings(&out.fragments).unwrap();
        assert_eq!(reassembled, out.message);

        let back: Option<Point> = serializer.deserialize(&reassembled).unwrap();
        assert_eq!(
            back,
            Some(Point {
                x: 123456789,
                y: 987654321,
            })
        );
    }

    #[test]
    fn test_definition_cache_is_populated_once() {
        let serializer = MsonSerializer::default();
        serializer.serialize(Some(&Point { x: 1, y: 2 })).unwrap();
        serializer.serialize(Some(&Point { x: 3, y: 4 })).unwrap();

        let cache = serializer.definitions.read().unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("Point"));
    }
}
