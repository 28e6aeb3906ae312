//! Positional schema definitions.
//!
//! This module provides the static schema types that drive the structural
//! codec:
//!
//! - [`FieldDefinition`]: one node of the schema tree — a scalar, an object
//!   with positioned children, or an array with an item definition
//! - [`ScalarType`]: the declared type of a leaf value, used to pick a
//!   converter
//! - [`MsonSchema`]: a version character, an optional root definition, and a
//!   registry mapping type names to definitions
//!
//! Definitions are built once, validated at construction (duplicate sibling
//! positions are rejected immediately), and treated as immutable afterwards —
//! a built tree can be shared freely across concurrent encode/decode calls.
//!
//! Field definitions derive `Serialize`/`Deserialize` so a schema tree can be
//! exported as a JSON document and imported on the consumer side.
//!
//! ## Examples
//!
//! ```rust
//! use mson::{FieldDefinition, MsonSchema, ScalarType};
//!
//! let product = FieldDefinition::object("Product")
//!     .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
//!     .add_field(FieldDefinition::scalar("name", ScalarType::Text))?;
//!
//! let mut schema = MsonSchema::with_version('1')?;
//! schema.register_type("Product", product);
//! # Ok::<(), mson::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The declared type of a scalar field, used to select a converter from the
/// registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    Boolean,
    Integer,
    Float,
    Text,
    DateTime,
    Identifier,
    Enumeration,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::Float => "float",
            ScalarType::Text => "text",
            ScalarType::DateTime => "datetime",
            ScalarType::Identifier => "identifier",
            ScalarType::Enumeration => "enumeration",
        };
        write!(f, "{}", name)
    }
}

/// The shape of a field: exactly one of scalar, object, or array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// A leaf value handled by a scalar converter.
    Scalar(ScalarType),
    /// A nested object. `type_name` lets the schema registry supply or
    /// override the children; `fields` holds inline children sorted by
    /// position.
    Object {
        type_name: Option<String>,
        fields: Vec<FieldDefinition>,
    },
    /// A sequence of items all described by one definition.
    Array { item: Box<FieldDefinition> },
}

/// One node in a positional schema tree.
///
/// A definition describes how a single value — scalar, object, or array —
/// maps to and from MSON text. Children of an object are ordered by
/// `position`; that order, not slot names, pairs wire items with fields.
///
/// # Examples
///
/// ```rust
/// use mson::{FieldDefinition, ScalarType};
///
/// let def = FieldDefinition::object("Customer")
///     .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?
///     .add_field(FieldDefinition::scalar("email", ScalarType::Text))?
///     .add_field(FieldDefinition::array(
///         "tags",
///         FieldDefinition::scalar_item(ScalarType::Text),
///     ))?;
///
/// assert_eq!(def.fields().len(), 3);
/// # Ok::<(), mson::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    description: String,
    position: Option<u32>,
    slot: Option<String>,
    kind: FieldKind,
}

impl FieldDefinition {
    /// Creates a scalar field reading and writing the named slot.
    #[must_use]
    pub fn scalar(slot: &str, scalar: ScalarType) -> Self {
        FieldDefinition {
            description: slot.to_string(),
            position: None,
            slot: Some(slot.to_string()),
            kind: FieldKind::Scalar(scalar),
        }
    }

    /// Creates an object definition with no slot, for use as a root or a
    /// registry entry. Children are added with [`add_field`](Self::add_field).
    #[must_use]
    pub fn object(description: &str) -> Self {
        FieldDefinition {
            description: description.to_string(),
            position: None,
            slot: None,
            kind: FieldKind::Object {
                type_name: None,
                fields: Vec::new(),
            },
        }
    }

    /// Creates an object-valued field whose definition is resolved through
    /// the schema's type registry at codec time.
    #[must_use]
    pub fn nested(slot: &str, type_name: &str) -> Self {
        FieldDefinition {
            description: slot.to_string(),
            position: None,
            slot: Some(slot.to_string()),
            kind: FieldKind::Object {
                type_name: Some(type_name.to_string()),
                fields: Vec::new(),
            },
        }
    }

    /// Creates an array field whose elements are described by `item`.
    #[must_use]
    pub fn array(slot: &str, item: FieldDefinition) -> Self {
        FieldDefinition {
            description: slot.to_string(),
            position: None,
            slot: Some(slot.to_string()),
            kind: FieldKind::Array {
                item: Box::new(item),
            },
        }
    }

    /// Creates a scalar array-item definition (no slot).
    #[must_use]
    pub fn scalar_item(scalar: ScalarType) -> Self {
        FieldDefinition {
            description: "item".to_string(),
            position: None,
            slot: None,
            kind: FieldKind::Scalar(scalar),
        }
    }

    /// Creates an object array-item definition resolved through the type
    /// registry (no slot).
    #[must_use]
    pub fn object_item(type_name: &str) -> Self {
        FieldDefinition {
            description: "item".to_string(),
            position: None,
            slot: None,
            kind: FieldKind::Object {
                type_name: Some(type_name.to_string()),
                fields: Vec::new(),
            },
        }
    }

    /// Overrides this field's position among its siblings.
    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Replaces the diagnostic description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the slot this field reads and writes on the parent object.
    #[must_use]
    pub fn with_slot(mut self, slot: &str) -> Self {
        self.slot = Some(slot.to_string());
        self
    }

    /// Tags this object definition with a type name so the schema registry
    /// can override it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when called on a scalar or array definition.
    pub fn with_type_name(mut self, type_name: &str) -> Result<Self> {
        match &mut self.kind {
            FieldKind::Object {
                type_name: name, ..
            } => {
                *name = Some(type_name.to_string());
                Ok(self)
            }
            _ => Err(Error::schema(format!(
                "`{}` is not an object definition",
                self.description
            ))),
        }
    }

    /// Adds a child field to this object definition.
    ///
    /// Unpositioned children are assigned the next free position; siblings
    /// are kept sorted by position at all times.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when called on a non-object definition or
    /// when the child's position collides with an existing sibling.
    pub fn add_field(mut self, mut field: FieldDefinition) -> Result<Self> {
        let description = self.description.clone();

        let fields = match &mut self.kind {
            FieldKind::Object { fields, .. } => fields,
            _ => {
                return Err(Error::schema(format!(
                    "cannot add a field to non-object definition `{}`",
                    description
                )))
            }
        };

        let position = match field.position {
            Some(p) => p,
            None => fields
                .iter()
                .filter_map(|f| f.position)
                .max()
                .map_or(1, |max| max + 1),
        };

        if fields.iter().any(|f| f.position == Some(position)) {
            return Err(Error::schema(format!(
                "field with position {} already exists in `{}`",
                position, description
            )));
        }

        field.position = Some(position);

        let index = fields
            .iter()
            .position(|f| f.position > Some(position))
            .unwrap_or(fields.len());
        fields.insert(index, field);

        Ok(self)
    }

    /// The diagnostic description of this field.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The field's position among its siblings, once assigned.
    #[must_use]
    pub fn position(&self) -> Option<u32> {
        self.position
    }

    /// The slot on the parent object this field reads and writes; `None` for
    /// roots and array items.
    #[must_use]
    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// The field's shape.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The children of an object definition, sorted by position. Empty for
    /// scalars and arrays.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.kind {
            FieldKind::Object { fields, .. } => fields,
            _ => &[],
        }
    }

    /// The item definition of an array field, if this is one.
    #[must_use]
    pub fn item(&self) -> Option<&FieldDefinition> {
        match &self.kind {
            FieldKind::Array { item } => Some(item),
            _ => None,
        }
    }

    /// The registry type name of an object definition, if tagged.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Object { type_name, .. } => type_name.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` when this definition describes a scalar.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar(_))
    }

    /// Returns `true` when this definition describes an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.kind, FieldKind::Object { .. })
    }

    /// Returns `true` when this definition describes an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, FieldKind::Array { .. })
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(p) => write!(f, "{} (position {})", self.description, p),
            None => write!(f, "{}", self.description),
        }
    }
}

/// Validates a schema version character (`0-9`, `a-z`, `A-Z`).
pub(crate) fn validate_version(version: char) -> Result<()> {
    if version.is_ascii_alphanumeric() {
        Ok(())
    } else {
        Err(Error::schema(format!(
            "invalid schema version {:?}: must be one of 0-9, a-z, A-Z",
            version
        )))
    }
}

/// An MSON schema: a version character, an optional root definition, and a
/// type registry.
///
/// The registry maps type names to definitions; the codec consults it for any
/// object node tagged with a type name, letting one schema rearrange a type's
/// wire layout without touching the host structs.
///
/// # Examples
///
/// ```rust
/// use mson::{FieldDefinition, MsonSchema, ScalarType};
///
/// let mut schema = MsonSchema::with_version('2')?;
/// schema.register_type(
///     "Product",
///     FieldDefinition::object("Product")
///         .add_field(FieldDefinition::scalar("id", ScalarType::Integer))?,
/// );
///
/// assert!(schema.definition_for("Product").is_some());
/// # Ok::<(), mson::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MsonSchema {
    version: Option<char>,
    name: Option<String>,
    description: Option<String>,
    root: Option<FieldDefinition>,
    types: HashMap<String, Arc<FieldDefinition>>,
}

impl MsonSchema {
    /// Creates an empty schema with the default version `'1'`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty schema with the given version character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the character is not alphanumeric.
    pub fn with_version(version: char) -> Result<Self> {
        validate_version(version)?;
        Ok(MsonSchema {
            version: Some(version),
            ..Self::default()
        })
    }

    /// The schema's version character.
    #[must_use]
    pub fn version(&self) -> char {
        self.version.unwrap_or('1')
    }

    /// Sets the schema's display name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the schema's description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// The schema's display name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The schema's description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the root definition used for top-level values.
    ///
    /// Without a root, typed entry points fall back to the value type's own
    /// discovered definition.
    #[must_use]
    pub fn with_root(mut self, root: FieldDefinition) -> Self {
        self.root = Some(root);
        self
    }

    /// The root definition, if one was set.
    #[must_use]
    pub fn root(&self) -> Option<&FieldDefinition> {
        self.root.as_ref()
    }

    /// Registers a definition for a type name, replacing any previous entry.
    pub fn register_type(&mut self, type_name: &str, definition: FieldDefinition) {
        self.types
            .insert(type_name.to_string(), Arc::new(definition));
    }

    /// Looks up the registered definition for a type name.
    #[must_use]
    pub fn definition_for(&self, type_name: &str) -> Option<Arc<FieldDefinition>> {
        self.types.get(type_name).cloned()
    }

    /// Resolves the definition to use for an object node: the registry entry
    /// for the node's type name when one exists, else the node's own inline
    /// children.
    pub(crate) fn resolve_object<'a>(&self, def: &'a FieldDefinition) -> Result<ResolvedDef<'a>> {
        if let Some(type_name) = def.type_name() {
            if let Some(registered) = self.definition_for(type_name) {
                return Ok(ResolvedDef::Registered(registered));
            }
        }

        if !def.fields().is_empty() {
            return Ok(ResolvedDef::Inline(def));
        }

        Err(Error::schema(format!(
            "no object definition resolvable for `{}`",
            def.description()
        )))
    }
}

/// An object definition resolved for one codec pass: either shared from the
/// schema registry or borrowed from the field tree itself.
pub(crate) enum ResolvedDef<'a> {
    Registered(Arc<FieldDefinition>),
    Inline(&'a FieldDefinition),
}

impl ResolvedDef<'_> {
    pub(crate) fn get(&self) -> &FieldDefinition {
        match self {
            ResolvedDef::Registered(def) => def,
            ResolvedDef::Inline(def) => def,
        }
    }
}
