//! Output sink contract driven by the serializer.
//!
//! A sink receives one call per structural marker or value token, in file
//! order, and owns all lexical concerns: quoting, escaping, number
//! formatting, separators and line breaks. Each call completes (or fails)
//! before the next one is issued.

use crate::error::StepError;

/// Receiver of the ordered token stream of a STEP document.
pub trait StepSink {
    /// Begin the exchange structure (`ISO-10303-21;`).
    fn start_step(&mut self) -> Result<(), StepError>;

    /// End the exchange structure (`END-ISO-10303-21;`).
    fn end_step(&mut self) -> Result<(), StepError>;

    /// Begin the header section.
    fn start_header(&mut self) -> Result<(), StepError>;

    /// Begin the data section.
    fn start_data(&mut self) -> Result<(), StepError>;

    /// End the current section.
    fn end_section(&mut self) -> Result<(), StepError>;

    /// Write the identifier of the entity that follows (`#id=`).
    fn line_identifier(&mut self, id: u64) -> Result<(), StepError>;

    /// Write an object's type name.
    fn object_name(&mut self, name: &str) -> Result<(), StepError>;

    /// Open an object's parameter list.
    fn start_object(&mut self) -> Result<(), StepError>;

    /// Close an object's parameter list.
    fn end_object(&mut self) -> Result<(), StepError>;

    /// Open a nested list.
    fn start_array(&mut self) -> Result<(), StepError>;

    /// Close a nested list.
    fn end_array(&mut self) -> Result<(), StepError>;

    /// Write the overridden marker (`*`).
    fn write_overridden(&mut self) -> Result<(), StepError>;

    /// Write an enumeration token.
    fn write_enum(&mut self, token: &str) -> Result<(), StepError>;

    /// Write a string literal.
    fn write_string(&mut self, value: &str) -> Result<(), StepError>;

    /// Write a 16-bit integer.
    fn write_i16(&mut self, value: i16) -> Result<(), StepError>;

    /// Write a 32-bit integer.
    fn write_i32(&mut self, value: i32) -> Result<(), StepError>;

    /// Write a 64-bit integer.
    fn write_i64(&mut self, value: i64) -> Result<(), StepError>;

    /// Write a real number.
    fn write_f64(&mut self, value: f64) -> Result<(), StepError>;

    /// Write a boolean.
    fn write_bool(&mut self, value: bool) -> Result<(), StepError>;

    /// Write the null marker (`$`).
    fn write_null(&mut self) -> Result<(), StepError>;

    /// Write a reference to another entity.
    fn write_line_reference(&mut self, id: u64) -> Result<(), StepError>;
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    fn start_step(&mut self) -> Result<(), StepError> {
        (**self).start_step()
    }

    fn end_step(&mut self) -> Result<(), StepError> {
        (**self).end_step()
    }

    fn start_header(&mut self) -> Result<(), StepError> {
        (**self).start_header()
    }

    fn start_data(&mut self) -> Result<(), StepError> {
        (**self).start_data()
    }

    fn end_section(&mut self) -> Result<(), StepError> {
        (**self).end_section()
    }

    fn line_identifier(&mut self, id: u64) -> Result<(), StepError> {
        (**self).line_identifier(id)
    }

    fn object_name(&mut self, name: &str) -> Result<(), StepError> {
        (**self).object_name(name)
    }

    fn start_object(&mut self) -> Result<(), StepError> {
        (**self).start_object()
    }

    fn end_object(&mut self) -> Result<(), StepError> {
        (**self).end_object()
    }

    fn start_array(&mut self) -> Result<(), StepError> {
        (**self).start_array()
    }

    fn end_array(&mut self) -> Result<(), StepError> {
        (**self).end_array()
    }

    fn write_overridden(&mut self) -> Result<(), StepError> {
        (**self).write_overridden()
    }

    fn write_enum(&mut self, token: &str) -> Result<(), StepError> {
        (**self).write_enum(token)
    }

    fn write_string(&mut self, value: &str) -> Result<(), StepError> {
        (**self).write_string(value)
    }

    fn write_i16(&mut self, value: i16) -> Result<(), StepError> {
        (**self).write_i16(value)
    }

    fn write_i32(&mut self, value: i32) -> Result<(), StepError> {
        (**self).write_i32(value)
    }

    fn write_i64(&mut self, value: i64) -> Result<(), StepError> {
        (**self).write_i64(value)
    }

    fn write_f64(&mut self, value: f64) -> Result<(), StepError> {
        (**self).write_f64(value)
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StepError> {
        (**self).write_bool(value)
    }

    fn write_null(&mut self) -> Result<(), StepError> {
        (**self).write_null()
    }

    fn write_line_reference(&mut self, id: u64) -> Result<(), StepError> {
        (**self).write_line_reference(id)
    }
}
