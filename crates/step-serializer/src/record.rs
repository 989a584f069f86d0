//! Sink that records the call sequence instead of producing text.

use serde::Serialize;

use crate::error::StepError;
use crate::sink::StepSink;

/// One recorded sink call, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub enum SinkEvent {
    StartStep,
    EndStep,
    StartHeader,
    StartData,
    EndSection,
    LineIdentifier(u64),
    ObjectName(String),
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Overridden,
    Enum(String),
    String(String),
    I16(i16),
    I32(i32),
    I64(i64),
    F64(f64),
    Bool(bool),
    Null,
    LineReference(u64),
}

/// A [`StepSink`] that stores every call as a [`SinkEvent`].
///
/// Useful for checking the exact token sequence a document produces.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Calls received so far, in order.
    pub events: Vec<SinkEvent>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the sink accept `calls` calls and fail every call after that.
    pub fn fail_after(calls: usize) -> Self {
        Self {
            events: Vec::new(),
            fail_after: Some(calls),
        }
    }

    /// Consume the sink and return the recorded events.
    pub fn into_events(self) -> Vec<SinkEvent> {
        self.events
    }

    fn record(&mut self, event: SinkEvent) -> Result<(), StepError> {
        if let Some(limit) = self.fail_after {
            if self.events.len() >= limit {
                return Err(StepError::sink(format!(
                    "recording sink refused call {} ({event:?})",
                    self.events.len() + 1
                )));
            }
        }
        self.events.push(event);
        Ok(())
    }
}

impl StepSink for RecordingSink {
    fn start_step(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::StartStep)
    }

    fn end_step(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::EndStep)
    }

    fn start_header(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::StartHeader)
    }

    fn start_data(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::StartData)
    }

    fn end_section(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::EndSection)
    }

    fn line_identifier(&mut self, id: u64) -> Result<(), StepError> {
        self.record(SinkEvent::LineIdentifier(id))
    }

    fn object_name(&mut self, name: &str) -> Result<(), StepError> {
        self.record(SinkEvent::ObjectName(name.to_string()))
    }

    fn start_object(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::StartObject)
    }

    fn end_object(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::EndObject)
    }

    fn start_array(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::StartArray)
    }

    fn end_array(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::EndArray)
    }

    fn write_overridden(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::Overridden)
    }

    fn write_enum(&mut self, token: &str) -> Result<(), StepError> {
        self.record(SinkEvent::Enum(token.to_string()))
    }

    fn write_string(&mut self, value: &str) -> Result<(), StepError> {
        self.record(SinkEvent::String(value.to_string()))
    }

    fn write_i16(&mut self, value: i16) -> Result<(), StepError> {
        self.record(SinkEvent::I16(value))
    }

    fn write_i32(&mut self, value: i32) -> Result<(), StepError> {
        self.record(SinkEvent::I32(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<(), StepError> {
        self.record(SinkEvent::I64(value))
    }

    fn write_f64(&mut self, value: f64) -> Result<(), StepError> {
        self.record(SinkEvent::F64(value))
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StepError> {
        self.record(SinkEvent::Bool(value))
    }

    fn write_null(&mut self) -> Result<(), StepError> {
        self.record(SinkEvent::Null)
    }

    fn write_line_reference(&mut self, id: u64) -> Result<(), StepError> {
        self.record(SinkEvent::LineReference(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut sink = RecordingSink::new();
        sink.start_step().unwrap();
        sink.write_i32(4).unwrap();
        sink.object_name("POINT").unwrap();
        assert_eq!(
            sink.into_events(),
            vec![
                SinkEvent::StartStep,
                SinkEvent::I32(4),
                SinkEvent::ObjectName("POINT".into()),
            ]
        );
    }

    #[test]
    fn test_fail_after() {
        let mut sink = RecordingSink::fail_after(1);
        sink.start_step().unwrap();
        let err = sink.start_header().unwrap_err();
        assert!(matches!(err, StepError::Sink(_)));
        assert_eq!(sink.events, vec![SinkEvent::StartStep]);
    }
}
