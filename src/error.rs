//! Error types for the OPEX library.

use thiserror::Error;

/// Errors that can occur when reading OPEX batch documents.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended while an element was still open
    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// A required element never appeared
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Missing required field (strict decoding only)
    #[error("Missing required field {field} on <{element}>")]
    MissingField {
        /// Element carrying the field
        element: &'static str,
        /// Attribute name
        field: &'static str,
    },

    /// A field value could not be decoded (strict decoding only)
    #[error("Invalid value {value:?} for {field} on <{element}>")]
    InvalidField {
        /// Element carrying the field
        element: &'static str,
        /// Attribute name
        field: &'static str,
        /// The raw attribute value
        value: String,
    },

    /// A token outside an enumeration's vocabulary
    #[error("Unknown {kind} token: {token:?}")]
    UnknownToken {
        /// Name of the enumeration
        kind: &'static str,
        /// The rejected token
        token: String,
    },

    /// A required construction argument was not supplied
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// A construction argument was supplied but is unusable
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The document path does not carry the OPEX extension
    #[error("Unsupported format: {0} (expected a .oxi file)")]
    UnsupportedFormat(String),
}

impl Error {
    /// Returns true for errors raised while configuring a reader, before any I/O.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Error::MissingArgument(_) | Error::InvalidArgument { .. } | Error::UnsupportedFormat(_)
        )
    }
}

/// Result type alias for OPEX operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_errors_are_classified() {
        assert!(Error::MissingArgument("path").is_construction_error());
        assert!(Error::UnsupportedFormat("a.xml".to_string()).is_construction_error());
        assert!(!Error::MissingElement("Batch".to_string()).is_construction_error());
    }

    #[test]
    fn test_invalid_field_message() {
        let err = Error::InvalidField {
            element: "Batch",
            field: "JobType",
            value: "BOGUS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value \"BOGUS\" for JobType on <Batch>"
        );
    }
}
