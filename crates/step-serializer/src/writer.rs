//! STEP file writer: serializes a [`StepDocument`] to Part 21 text.

use std::path::Path;

use crate::error::StepError;
use crate::model::StepDocument;
use crate::serializer::StepSerializer;
use crate::text::Part21Writer;

/// Write a STEP document to a file.
///
/// The whole file is rendered in memory first, so a document that fails to
/// serialize never leaves a truncated file behind.
///
/// # Arguments
///
/// * `document` - The document to write
/// * `path` - Output file path
pub fn write_step(document: &StepDocument, path: impl AsRef<Path>) -> Result<(), StepError> {
    let data = write_step_to_buffer(document)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Write a STEP document to a byte buffer.
pub fn write_step_to_buffer(document: &StepDocument) -> Result<Vec<u8>, StepError> {
    write_step_with(&StepSerializer::new(), document)
}

/// Write a STEP document to a string.
pub fn write_step_to_string(document: &StepDocument) -> Result<String, StepError> {
    let data = write_step_to_buffer(document)?;
    String::from_utf8(data).map_err(|e| StepError::sink(format!("non UTF-8 output: {e}")))
}

/// Write a STEP document to a byte buffer using a configured serializer.
pub fn write_step_with(
    serializer: &StepSerializer,
    document: &StepDocument,
) -> Result<Vec<u8>, StepError> {
    let mut sink = Part21Writer::new(Vec::new());
    serializer.serialize(&mut sink, document)?;
    Ok(sink.into_inner())
}
