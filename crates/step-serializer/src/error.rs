//! Error types for STEP serialization.

use thiserror::Error;

/// Errors that can occur while serializing a STEP document.
#[derive(Error, Debug)]
pub enum StepError {
    /// I/O error writing to a file or stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error reading or writing the interchange form of a document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller passed an argument the serializer cannot accept.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Error message.
        message: String,
    },

    /// An object with an empty name was found.
    #[error("Malformed object{}: object name is empty", entity_id.map(|id| format!(" at entity #{}", id)).unwrap_or_default())]
    MalformedObject {
        /// Identifier of the enclosing data entity, if known.
        entity_id: Option<u64>,
    },

    /// An integer value declared a width other than 16, 32 or 64 bits.
    #[error("Unsupported integer width: {bits} bits")]
    UnsupportedIntegerWidth {
        /// The declared width in bits.
        bits: u8,
    },

    /// A value kind the sink contract has no emission primitive for.
    #[error("Serialization is not implemented for value kind `{0}`")]
    UnsupportedValueKind(&'static str),

    /// A value's payload does not agree with its declared kind.
    #[error("Payload mismatch: declared {declared}, got {actual}")]
    PayloadMismatch {
        /// Declared kind or width.
        declared: String,
        /// What the payload actually holds.
        actual: String,
    },

    /// Nesting exceeded the configured maximum depth.
    #[error("Nesting depth exceeds the configured limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A real number that Part 21 cannot represent (NaN or infinite).
    #[error("Real value {0} cannot be written to a STEP file")]
    NonFiniteReal(f64),

    /// Failure raised by a sink implementation.
    #[error("Sink error: {0}")]
    Sink(String),
}

impl StepError {
    /// Create an invalid argument error.
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Create a payload mismatch error.
    pub fn payload_mismatch(declared: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::PayloadMismatch {
            declared: declared.into(),
            actual: actual.into(),
        }
    }

    /// Create a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_object_message() {
        let err = StepError::MalformedObject { entity_id: Some(7) };
        assert_eq!(
            err.to_string(),
            "Malformed object at entity #7: object name is empty"
        );

        let err = StepError::MalformedObject { entity_id: None };
        assert_eq!(err.to_string(), "Malformed object: object name is empty");
    }

    #[test]
    fn test_helper_constructors() {
        let err = StepError::payload_mismatch("16-bit integer", "70000");
        assert_eq!(
            err.to_string(),
            "Payload mismatch: declared 16-bit integer, got 70000"
        );

        let err = StepError::invalid_argument("document", "identifier #0");
        assert!(matches!(
            err,
            StepError::InvalidArgument {
                argument: "document",
                ..
            }
        ));
    }
}
