//! Codec error types

use thiserror::Error;

/// Binary stream codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// Read or write past the end of the buffer
    #[error("buffer overrun at offset {offset}: need {needed} bytes, {available} available")]
    BufferOverrun {
        /// Cursor position when the access was attempted
        offset: usize,
        /// Bytes the access required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Wire key registered twice on the same schema
    #[error("serialize key has already been declared on {schema}: {key}")]
    DuplicateField {
        /// Schema being built
        schema: String,
        /// Offending wire key
        key: String,
    },

    /// Storage name bound to two wire keys on the same schema
    #[error("storage {storage} is already bound on {schema}")]
    DuplicateStorage {
        /// Schema being built
        schema: String,
        /// Offending storage name
        storage: String,
    },

    /// Field value does not match the declared kind
    #[error("invalid serialize member {field}: expected {expected}")]
    InvalidMember {
        /// Storage name of the field
        field: String,
        /// Declared kind, rendered for diagnostics
        expected: String,
    },

    /// Decoding a named field failed
    #[error("invalid deserialize member {field}: {source}")]
    Field {
        /// Storage name of the field
        field: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Storage name not declared by the schema
    #[error("unknown field: {field}")]
    UnknownField {
        /// Requested storage name
        field: String,
    },

    /// Container count above the configured limit
    #[error("container too large: {count} elements (max {max})")]
    ContainerTooLarge {
        /// Count read from the wire
        count: u32,
        /// Configured maximum
        max: u32,
    },

    /// Unread bytes after the last field (strict mode)
    #[error("{remaining} trailing bytes after last field")]
    TrailingBytes {
        /// Bytes left unread
        remaining: usize,
    },

    /// Size pass and write pass disagree
    #[error("size mismatch: computed {expected} bytes, wrote {written}")]
    SizeMismatch {
        /// Bytes predicted by the size pass
        expected: usize,
        /// Bytes actually written
        written: usize,
    },

    /// Invalid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Storage name of the field this error is attributed to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidMember { field, .. }
            | Self::Field { field, .. }
            | Self::UnknownField { field } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_member() {
        let err = Error::Field {
            field: "name".into(),
            source: Box::new(Error::BufferOverrun {
                offset: 8,
                needed: 4,
                available: 1,
            }),
        };
        assert_eq!(err.field(), Some("name"));
        let text = err.to_string();
        assert!(text.contains("name"));
        assert!(text.contains("offset 8"));
    }
}
