#![warn(missing_docs)]

//! STEP physical file (ISO 10303-21) serialization.
//!
//! Converts an in-memory [`StepDocument`] into the token stream of a Part 21
//! exchange structure. The [`StepSerializer`] walks the header and data
//! sections depth-first and drives a [`StepSink`], which owns all lexical
//! formatting. [`Part21Writer`] is a sink producing STEP text;
//! [`RecordingSink`] captures the call sequence for inspection.
//!
//! Entities are opaque: the serializer never interprets entity names.
//!
//! # Example
//!
//! ```
//! use step_serializer::{write_step_to_string, StepDocument, StepObject, StepValue};
//!
//! let mut doc = StepDocument::new();
//! doc.insert_entity(
//!     1,
//!     StepObject::new("DIRECTION", vec![
//!         StepValue::string("z"),
//!         StepValue::Array(vec![
//!             StepValue::Float(0.0),
//!             StepValue::Float(0.0),
//!             StepValue::Float(1.0),
//!         ]),
//!     ]),
//! );
//!
//! let text = write_step_to_string(&doc).unwrap();
//! assert!(text.contains("#1=DIRECTION('z',(0.,0.,1.));"));
//! ```

mod error;
mod model;
mod record;
mod serializer;
mod sink;
mod text;
mod writer;

pub use error::StepError;
pub use model::{EntityId, IntegerWidth, StepDocument, StepObject, StepValue, TaggedInteger};
pub use record::{RecordingSink, SinkEvent};
pub use serializer::{SerializeOptions, StepSerializer, DATE_FORMAT};
pub use sink::StepSink;
pub use text::{encode_string, format_real, Part21Writer};
pub use writer::{write_step, write_step_to_buffer, write_step_to_string, write_step_with};
