//! In-memory representation of a STEP physical file.
//!
//! The model does not interpret entity semantics. Each object has a type
//! name and an ordered list of property values; values may nest arrays and
//! inline objects to any depth. Documents are built elsewhere and only read
//! by the serializer.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// Identifier of an entity instance in the data section (`#123`).
pub type EntityId = u64;

/// Declared bit width of an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerWidth {
    /// 16-bit signed integer.
    W16,
    /// 32-bit signed integer.
    W32,
    /// 64-bit signed integer.
    W64,
}

impl IntegerWidth {
    /// Width in bits.
    pub fn bits(self) -> u8 {
        match self {
            IntegerWidth::W16 => 16,
            IntegerWidth::W32 => 32,
            IntegerWidth::W64 => 64,
        }
    }
}

impl TryFrom<u8> for IntegerWidth {
    type Error = StepError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(IntegerWidth::W16),
            32 => Ok(IntegerWidth::W32),
            64 => Ok(IntegerWidth::W64),
            _ => Err(StepError::UnsupportedIntegerWidth { bits }),
        }
    }
}

/// An integer payload together with its declared width tag.
///
/// The tag is kept as raw bits so that documents produced by other tools
/// can carry widths this crate does not support; [`TaggedInteger::width`]
/// reports those as errors instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedInteger {
    /// Declared width in bits.
    pub bits: u8,
    /// The value.
    pub value: i64,
}

impl TaggedInteger {
    /// A 16-bit integer.
    pub fn i16(value: i16) -> Self {
        Self {
            bits: 16,
            value: value.into(),
        }
    }

    /// A 32-bit integer.
    pub fn i32(value: i32) -> Self {
        Self {
            bits: 32,
            value: value.into(),
        }
    }

    /// A 64-bit integer.
    pub fn i64(value: i64) -> Self {
        Self { bits: 64, value }
    }

    /// Resolve the declared width.
    pub fn width(&self) -> Result<IntegerWidth, StepError> {
        IntegerWidth::try_from(self.bits)
    }
}

/// A single property value of a STEP object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepValue {
    /// Ordered list of values (nested in parentheses).
    Array(Vec<StepValue>),
    /// Value redefined by a subtype (`*`).
    Overridden,
    /// Enumeration token, without the surrounding dots.
    Enumeration(String),
    /// String literal, unescaped.
    String(String),
    /// Integer with a declared width.
    Integer(TaggedInteger),
    /// Real number.
    Float(f64),
    /// Boolean (`.T.` / `.F.`).
    Boolean(bool),
    /// Calendar timestamp. Written with second precision.
    Date(NaiveDateTime),
    /// Null/unset value (`$`).
    Null,
    /// Reference to another entity in the data section (`#123`).
    LineReference(EntityId),
    /// Inline object embedded as a property value: `TYPE_NAME(args)`.
    Entity(StepObject),
    /// Binary literal. The sink contract has no primitive for it, so the
    /// serializer rejects it.
    Binary(Vec<u8>),
}

impl StepValue {
    /// A 16-bit integer value.
    pub fn integer16(value: i16) -> Self {
        StepValue::Integer(TaggedInteger::i16(value))
    }

    /// A 32-bit integer value.
    pub fn integer32(value: i32) -> Self {
        StepValue::Integer(TaggedInteger::i32(value))
    }

    /// A 64-bit integer value.
    pub fn integer64(value: i64) -> Self {
        StepValue::Integer(TaggedInteger::i64(value))
    }

    /// A string value.
    pub fn string(s: impl Into<String>) -> Self {
        StepValue::String(s.into())
    }

    /// An enumeration value.
    pub fn enumeration(token: impl Into<String>) -> Self {
        StepValue::Enumeration(token.into())
    }

    /// Name of the active kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StepValue::Array(_) => "array",
            StepValue::Overridden => "overridden",
            StepValue::Enumeration(_) => "enumeration",
            StepValue::String(_) => "string",
            StepValue::Integer(_) => "integer",
            StepValue::Float(_) => "float",
            StepValue::Boolean(_) => "boolean",
            StepValue::Date(_) => "date",
            StepValue::Null => "null",
            StepValue::LineReference(_) => "line reference",
            StepValue::Entity(_) => "entity",
            StepValue::Binary(_) => "binary",
        }
    }
}

/// A named, ordered bag of property values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObject {
    /// Entity type name (e.g., `CARTESIAN_POINT`). Must not be empty.
    pub name: String,
    /// Property values in declaration order.
    pub properties: Vec<StepValue>,
}

impl StepObject {
    /// Create a new object.
    pub fn new(name: impl Into<String>, properties: Vec<StepValue>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// A complete STEP document: header objects plus the indexed data section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepDocument {
    /// Header section objects, in file order.
    pub header: Vec<StepObject>,
    /// Data section entities keyed by identifier. Iteration (insertion)
    /// order is the order entities are written in.
    pub data: IndexMap<EntityId, StepObject>,
}

impl StepDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object to the header section.
    pub fn push_header(&mut self, object: StepObject) {
        self.header.push(object);
    }

    /// Insert an entity into the data section.
    ///
    /// A new identifier is appended at the end; re-inserting an existing
    /// identifier replaces the object in place and returns the old one.
    pub fn insert_entity(&mut self, id: EntityId, object: StepObject) -> Option<StepObject> {
        self.data.insert(id, object)
    }

    /// Get an entity by identifier.
    pub fn get(&self, id: EntityId) -> Option<&StepObject> {
        self.data.get(&id)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, StepError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, StepError> {
        Ok(serde_json::from_str(json)?)
    }
}
