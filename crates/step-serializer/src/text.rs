//! Part 21 text sink: turns the sink token stream into STEP file text.
//!
//! Writes the exchange structure in the compact layout most CAD systems
//! emit: one instance per line, parameters separated by bare commas.
//! Handles:
//! - Strings, with `''` and `\\` escaping and `\X2\`/`\X4\` encoding for
//!   anything outside printable ASCII
//! - Reals, always with a decimal point (`0.`, `1.5`, `1.E-10`)
//! - Enumerations and booleans (`.TOKEN.`, `.T.`, `.F.`)
//! - Null (`$`), overridden (`*`) and entity references (`#12`)

use std::io::Write;

use crate::error::StepError;
use crate::sink::StepSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Object,
    Array,
}

/// An open parameter list.
#[derive(Debug, Clone, Copy)]
struct ListFrame {
    kind: ListKind,
    /// Whether a parameter has been written, so the next needs a comma.
    has_params: bool,
}

/// A [`StepSink`] writing ISO 10303-21 text to any [`Write`].
pub struct Part21Writer<W: Write> {
    inner: W,
    lists: Vec<ListFrame>,
    in_section: bool,
}

impl<W: Write> Part21Writer<W> {
    /// Create a writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            lists: Vec::new(),
            in_section: false,
        }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write a comma if the enclosing list already has a parameter.
    fn separate(&mut self) -> Result<(), StepError> {
        if let Some(frame) = self.lists.last_mut() {
            if frame.has_params {
                self.inner.write_all(b",")?;
            }
            frame.has_params = true;
        }
        Ok(())
    }

    fn parameter(&mut self, text: &str) -> Result<(), StepError> {
        self.separate()?;
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    fn open_list(&mut self, kind: ListKind) -> Result<(), StepError> {
        self.inner.write_all(b"(")?;
        self.lists.push(ListFrame {
            kind,
            has_params: false,
        });
        Ok(())
    }

    fn close_list(&mut self, kind: ListKind) -> Result<(), StepError> {
        match self.lists.pop() {
            Some(frame) if frame.kind == kind => {}
            Some(frame) => {
                return Err(StepError::sink(format!(
                    "cannot close {kind:?} while a {:?} is open",
                    frame.kind
                )));
            }
            None => {
                return Err(StepError::sink(format!(
                    "cannot close {kind:?}: no list is open"
                )));
            }
        }
        self.inner.write_all(b")")?;
        Ok(())
    }
}

impl<W: Write> StepSink for Part21Writer<W> {
    fn start_step(&mut self) -> Result<(), StepError> {
        self.inner.write_all(b"ISO-10303-21;\n")?;
        Ok(())
    }

    fn end_step(&mut self) -> Result<(), StepError> {
        self.inner.write_all(b"END-ISO-10303-21;\n")?;
        self.inner.flush()?;
        Ok(())
    }

    fn start_header(&mut self) -> Result<(), StepError> {
        self.inner.write_all(b"HEADER;\n")?;
        self.in_section = true;
        Ok(())
    }

    fn start_data(&mut self) -> Result<(), StepError> {
        self.inner.write_all(b"DATA;\n")?;
        self.in_section = true;
        Ok(())
    }

    fn end_section(&mut self) -> Result<(), StepError> {
        if !self.in_section {
            return Err(StepError::sink("ENDSEC without an open section"));
        }
        if !self.lists.is_empty() {
            return Err(StepError::sink("ENDSEC inside an open parameter list"));
        }
        self.inner.write_all(b"ENDSEC;\n")?;
        self.in_section = false;
        Ok(())
    }

    fn line_identifier(&mut self, id: u64) -> Result<(), StepError> {
        write!(self.inner, "#{id}=")?;
        Ok(())
    }

    fn object_name(&mut self, name: &str) -> Result<(), StepError> {
        self.parameter(name)
    }

    fn start_object(&mut self) -> Result<(), StepError> {
        self.open_list(ListKind::Object)
    }

    fn end_object(&mut self) -> Result<(), StepError> {
        self.close_list(ListKind::Object)?;
        if self.lists.is_empty() {
            self.inner.write_all(b";\n")?;
        }
        Ok(())
    }

    fn start_array(&mut self) -> Result<(), StepError> {
        self.separate()?;
        self.open_list(ListKind::Array)
    }

    fn end_array(&mut self) -> Result<(), StepError> {
        self.close_list(ListKind::Array)
    }

    fn write_overridden(&mut self) -> Result<(), StepError> {
        self.parameter("*")
    }

    fn write_enum(&mut self, token: &str) -> Result<(), StepError> {
        self.parameter(&format!(".{token}."))
    }

    fn write_string(&mut self, value: &str) -> Result<(), StepError> {
        self.parameter(&encode_string(value))
    }

    fn write_i16(&mut self, value: i16) -> Result<(), StepError> {
        self.parameter(&value.to_string())
    }

    fn write_i32(&mut self, value: i32) -> Result<(), StepError> {
        self.parameter(&value.to_string())
    }

    fn write_i64(&mut self, value: i64) -> Result<(), StepError> {
        self.parameter(&value.to_string())
    }

    fn write_f64(&mut self, value: f64) -> Result<(), StepError> {
        let text = format_real(value)?;
        self.parameter(&text)
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StepError> {
        self.parameter(if value { ".T." } else { ".F." })
    }

    fn write_null(&mut self) -> Result<(), StepError> {
        self.parameter("$")
    }

    fn write_line_reference(&mut self, id: u64) -> Result<(), StepError> {
        self.parameter(&format!("#{id}"))
    }
}

/// Format a real so that it always reads back as a real: a decimal point is
/// always present and the exponent marker is upper case.
pub fn format_real(value: f64) -> Result<String, StepError> {
    if !value.is_finite() {
        return Err(StepError::NonFiniteReal(value));
    }

    // `{:?}` is the shortest representation that round-trips.
    let repr = format!("{value:?}");
    let (mantissa, exponent) = match repr.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (repr.as_str(), None),
    };

    let mut out = String::with_capacity(repr.len() + 2);
    if mantissa.contains('.') {
        out.push_str(mantissa.trim_end_matches('0'));
    } else {
        out.push_str(mantissa);
        out.push('.');
    }
    if let Some(exp) = exponent {
        out.push('E');
        out.push_str(exp);
    }
    Ok(out)
}

/// Quote and escape a string literal.
pub fn encode_string(value: &str) -> String {
    const X2: &str = "\\X2\\";
    const X4: &str = "\\X4\\";
    const X0: &str = "\\X0\\";

    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');

    // Consecutive non-ASCII characters share one `\X2\...\X0\` run.
    let mut open: Option<&str> = None;
    for ch in value.chars() {
        let code = ch as u32;
        let run = match ch {
            ' '..='~' => None,
            _ if code <= 0xFFFF => Some(X2),
            _ => Some(X4),
        };

        if run != open {
            if open.is_some() {
                out.push_str(X0);
            }
            if let Some(directive) = run {
                out.push_str(directive);
            }
            open = run;
        }

        match run {
            None => match ch {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            },
            Some(X2) => out.push_str(&format!("{code:04X}")),
            Some(_) => out.push_str(&format!("{code:08X}")),
        }
    }
    if open.is_some() {
        out.push_str(X0);
    }

    out.push('\'');
    out
}
