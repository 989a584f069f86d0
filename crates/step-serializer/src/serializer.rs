//! Document serializer: walks a [`StepDocument`] and drives a [`StepSink`].
//!
//! The walk is a single depth-first pass. Header objects are written in
//! order, then every data entity in the map's iteration order, each
//! preceded by its identifier. Property values dispatch on their kind;
//! arrays and inline entities recurse.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::StepError;
use crate::model::{EntityId, IntegerWidth, StepDocument, StepObject, StepValue, TaggedInteger};
use crate::sink::StepSink;

/// Text form of [`StepValue::Date`]: second precision, no zone.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Serializer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Maximum nesting of arrays and inline entities below a top-level
    /// object's parameter list. `None` means unbounded.
    pub max_depth: Option<usize>,
}

/// Writes STEP documents to a sink.
#[derive(Debug, Clone, Default)]
pub struct StepSerializer {
    options: SerializeOptions,
}

impl StepSerializer {
    /// Create a serializer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with the given options.
    pub fn with_options(options: SerializeOptions) -> Self {
        Self { options }
    }

    /// The serializer's options.
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize a whole document.
    ///
    /// Emits the stream start marker, the header section, the data section
    /// and the stream end marker. The first error (from the document or from
    /// the sink) aborts the walk; output already handed to the sink is not
    /// rolled back.
    pub fn serialize<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        document: &StepDocument,
    ) -> Result<(), StepError> {
        if document.data.contains_key(&0) {
            return Err(StepError::invalid_argument(
                "document",
                "data section contains entity identifier #0",
            ));
        }

        sink.start_step()?;
        self.serialize_header(sink, &document.header)?;
        self.serialize_data(sink, &document.data)?;
        sink.end_step()?;

        debug!(
            header_objects = document.header.len(),
            entities = document.data.len(),
            "serialized STEP document"
        );
        Ok(())
    }

    fn serialize_header<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        header: &[StepObject],
    ) -> Result<(), StepError> {
        sink.start_header()?;
        for object in header {
            self.serialize_object(sink, object, None, 0)?;
        }
        sink.end_section()
    }

    fn serialize_data<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        data: &IndexMap<EntityId, StepObject>,
    ) -> Result<(), StepError> {
        sink.start_data()?;
        for (&id, object) in data {
            self.serialize_entity(sink, id, object)?;
        }
        sink.end_section()
    }

    fn serialize_entity<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        id: EntityId,
        object: &StepObject,
    ) -> Result<(), StepError> {
        trace!(id, name = %object.name, "entity");
        sink.line_identifier(id)?;
        self.serialize_object(sink, object, Some(id), 0)
    }

    fn serialize_object<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        object: &StepObject,
        entity_id: Option<EntityId>,
        depth: usize,
    ) -> Result<(), StepError> {
        if object.name.is_empty() {
            return Err(StepError::MalformedObject { entity_id });
        }

        sink.object_name(&object.name)?;
        sink.start_object()?;
        for value in &object.properties {
            self.serialize_value(sink, value, entity_id, depth)?;
        }
        sink.end_object()
    }

    fn serialize_value<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        value: &StepValue,
        entity_id: Option<EntityId>,
        depth: usize,
    ) -> Result<(), StepError> {
        match value {
            StepValue::Array(items) => {
                let depth = self.descend(depth)?;
                sink.start_array()?;
                for item in items {
                    self.serialize_value(sink, item, entity_id, depth)?;
                }
                sink.end_array()
            }
            StepValue::Overridden => sink.write_overridden(),
            StepValue::Enumeration(token) => sink.write_enum(token),
            StepValue::String(s) => sink.write_string(s),
            StepValue::Integer(int) => serialize_integer(sink, int),
            StepValue::Float(v) => sink.write_f64(*v),
            StepValue::Boolean(b) => sink.write_bool(*b),
            StepValue::Date(date) => sink.write_string(&date.format(DATE_FORMAT).to_string()),
            StepValue::Null => sink.write_null(),
            StepValue::LineReference(id) => sink.write_line_reference(*id),
            StepValue::Entity(object) => {
                let depth = self.descend(depth)?;
                debug!(name = %object.name, parent = ?entity_id, "inline entity");
                self.serialize_object(sink, object, entity_id, depth)
            }
            other => Err(StepError::UnsupportedValueKind(other.kind_name())),
        }
    }

    /// Depth for the contents of an array or inline entity at `depth`.
    fn descend(&self, depth: usize) -> Result<usize, StepError> {
        let depth = depth + 1;
        match self.options.max_depth {
            Some(limit) if depth > limit => Err(StepError::DepthLimitExceeded { limit }),
            _ => Ok(depth),
        }
    }
}

fn serialize_integer<S: StepSink + ?Sized>(
    sink: &mut S,
    int: &TaggedInteger,
) -> Result<(), StepError> {
    let mismatch = |width: IntegerWidth| {
        StepError::payload_mismatch(
            format!("{}-bit integer", width.bits()),
            int.value.to_string(),
        )
    };

    match int.width()? {
        IntegerWidth::W16 => {
            let v = i16::try_from(int.value).map_err(|_| mismatch(IntegerWidth::W16))?;
            sink.write_i16(v)
        }
        IntegerWidth::W32 => {
            let v = i32::try_from(int.value).map_err(|_| mismatch(IntegerWidth::W32))?;
            sink.write_i32(v)
        }
        IntegerWidth::W64 => sink.write_i64(int.value),
    }
}
