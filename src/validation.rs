//! Schema validation for OPEX documents.
//!
//! Validation never aborts a decode. Every violation a [`SchemaValidator`]
//! finds becomes a [`Diagnostic`], and a schema that cannot be compiled is
//! itself reported as a single diagnostic with validation skipped.
//!
//! # Requirements
//!
//! The XSD-backed [`XsdValidator`] requires the `validation` feature and
//! libxml2 installed on the system.
//!
//! ## Installing libxml2
//!
//! **Ubuntu/Debian:**
//! ```bash
//! sudo apt-get install libxml2-dev
//! ```
//!
//! **macOS:**
//! ```bash
//! brew install libxml2
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use opex_rs::validation::{SchemaValidator, XsdValidator};
//!
//! let validator = XsdValidator::from_file("schemas/opex.xsd");
//! for diagnostic in validator.validate(&std::fs::read("batch.oxi")?) {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Advisory; the document is still conformant
    Warning,
    /// The document (or schema) violates a rule
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A non-fatal validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Severity of the finding
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// 1-based line, when the validator knows it
    pub line: Option<u32>,
    /// 1-based column, when the validator knows it
    pub column: Option<u32>,
}

impl Diagnostic {
    /// Creates an error diagnostic without a position.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Creates a warning diagnostic without a position.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message)
        }
    }

    /// Attaches a position.
    pub fn at(mut self, line: Option<u32>, column: Option<u32>) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: ", line, column)?,
            (Some(line), None) => write!(f, "{}: ", line)?,
            _ => {}
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A black-box document validator.
///
/// Implementations report every violation in document order and must not
/// fail; problems with the schema itself are reported as a diagnostic.
pub trait SchemaValidator: Send + Sync {
    /// Validates a complete document.
    fn validate(&self, document: &[u8]) -> Vec<Diagnostic>;
}

/// Builds the validator for a schema file.
#[cfg(feature = "validation")]
pub(crate) fn validator_for_path(
    path: &Path,
) -> std::result::Result<Arc<dyn SchemaValidator>, Diagnostic> {
    Ok(Arc::new(XsdValidator::from_file(path)))
}

/// Without the `validation` feature there is no XSD engine; the returned
/// diagnostic explains why validation is unavailable.
#[cfg(not(feature = "validation"))]
pub(crate) fn validator_for_path(
    path: &Path,
) -> std::result::Result<Arc<dyn SchemaValidator>, Diagnostic> {
    tracing::warn!(schema = %path.display(), "schema validation unavailable");
    Err(Diagnostic::warning(format!(
        "schema validation unavailable for {}: built without the `validation` feature",
        path.display()
    )))
}

#[cfg(feature = "validation")]
pub use xsd::XsdValidator;

#[cfg(feature = "validation")]
mod xsd {
    use super::{Diagnostic, SchemaValidator, Severity};
    use libxml::error::{StructuredError, XmlErrorLevel};
    use libxml::parser::Parser;
    use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
    use std::path::{Path, PathBuf};
    use std::str;

    #[derive(Debug, Clone)]
    enum XsdSource {
        File(PathBuf),
        Buffer(Vec<u8>),
    }

    /// Validates documents against an XML Schema using libxml2.
    ///
    /// The schema is compiled on every call, so a broken or missing schema
    /// surfaces as one diagnostic instead of failing construction.
    #[derive(Debug, Clone)]
    pub struct XsdValidator {
        source: XsdSource,
    }

    impl XsdValidator {
        /// Uses the schema stored at `path`.
        pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
            Self {
                source: XsdSource::File(path.as_ref().to_path_buf()),
            }
        }

        /// Uses an in-memory schema document.
        pub fn from_bytes(schema: impl Into<Vec<u8>>) -> Self {
            Self {
                source: XsdSource::Buffer(schema.into()),
            }
        }

        fn compile(&self) -> Result<SchemaValidationContext, Diagnostic> {
            let mut schema_parser = match &self.source {
                XsdSource::File(path) => {
                    if !path.exists() {
                        return Err(Diagnostic::error(format!(
                            "schema could not be loaded: file not found: {}",
                            path.display()
                        )));
                    }
                    SchemaParserContext::from_file(&path.to_string_lossy())
                }
                XsdSource::Buffer(bytes) => SchemaParserContext::from_buffer(bytes),
            };

            SchemaValidationContext::from_parser(&mut schema_parser).map_err(|errors| {
                let msg = errors
                    .iter()
                    .filter_map(|e| e.message.as_deref())
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join("; ");
                Diagnostic::error(format!("schema could not be loaded: {}", msg))
            })
        }
    }

    fn to_diagnostic(error: &StructuredError) -> Diagnostic {
        let message = error
            .message
            .as_deref()
            .map(str::trim)
            .unwrap_or("schema violation")
            .to_string();
        let severity = match error.level {
            XmlErrorLevel::Warning => Severity::Warning,
            _ => Severity::Error,
        };
        Diagnostic {
            severity,
            message,
            line: error.line.and_then(|l| u32::try_from(l).ok()),
            column: error.col.and_then(|c| u32::try_from(c).ok()),
        }
    }

    impl SchemaValidator for XsdValidator {
        fn validate(&self, document: &[u8]) -> Vec<Diagnostic> {
            let mut context = match self.compile() {
                Ok(context) => context,
                Err(diagnostic) => {
                    tracing::warn!(%diagnostic, "skipping schema validation");
                    return vec![diagnostic];
                }
            };

            // Malformed documents are reported by the decoder itself.
            let Ok(doc) = Parser::default().parse_string(document) else {
                return Vec::new();
            };

            match context.validate_document(&doc) {
                Ok(()) => Vec::new(),
                Err(errors) => errors.iter().map(to_diagnostic).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::error("attribute 'Foo' is not allowed").at(Some(3), Some(14));
        assert_eq!(d.to_string(), "3:14: error: attribute 'Foo' is not allowed");
        assert_eq!(
            Diagnostic::warning("no schema").to_string(),
            "warning: no schema"
        );
    }

    #[cfg(not(feature = "validation"))]
    #[test]
    fn test_schema_path_without_engine_degrades_to_diagnostic() {
        let result = validator_for_path(Path::new("schemas/opex.xsd"));
        let diagnostic = result.err().unwrap();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.message.contains("unavailable"));
    }

    #[cfg(feature = "validation")]
    mod xsd_tests {
        use super::super::*;

        const SCHEMA: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="Batch">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="Transaction" minOccurs="0" maxOccurs="unbounded">
          <xs:complexType>
            <xs:attribute name="TransactionID" type="xs:int"/>
          </xs:complexType>
        </xs:element>
      </xs:sequence>
      <xs:attribute name="FormatVersion" type="xs:string"/>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;

        #[test]
        fn test_valid_document_has_no_diagnostics() {
            let validator = XsdValidator::from_bytes(SCHEMA);
            let doc = br#"<Batch FormatVersion="03.14"><Transaction TransactionID="1"/></Batch>"#;
            assert!(validator.validate(doc).is_empty());
        }

        #[test]
        fn test_violations_are_collected_in_order() {
            let validator = XsdValidator::from_bytes(SCHEMA);
            let doc = b"<Batch FormatVersion=\"03.14\" Bogus=\"1\">\n<Widget/>\n</Batch>";
            let diagnostics = validator.validate(doc);
            assert_eq!(diagnostics.len(), 2, "{:?}", diagnostics);
            assert!(diagnostics[0].message.contains("Bogus"));
            assert!(diagnostics[1].message.contains("Widget"));
        }

        #[test]
        fn test_declared_encoding_is_honoured() {
            let validator = XsdValidator::from_bytes(SCHEMA);
            let doc: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
<Batch FormatVersion=\"Caf\xE9\" Bogus=\"1\"/>";
            let diagnostics = validator.validate(doc);
            assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
            assert!(diagnostics[0].message.contains("Bogus"));
        }

        #[test]
        fn test_broken_schema_is_one_diagnostic() {
            let validator = XsdValidator::from_bytes("<xs:schema xmlns:xs=\"nope\"><oops/>");
            let diagnostics = validator.validate(b"<Batch/>");
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].message.starts_with("schema could not be loaded"));
        }

        #[test]
        fn test_missing_schema_file_is_one_diagnostic() {
            let validator = XsdValidator::from_file("/nonexistent/path/schema.xsd");
            let diagnostics = validator.validate(b"<Batch/>");
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].message.contains("file not found"));
        }
    }
}
