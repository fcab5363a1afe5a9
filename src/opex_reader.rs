//! File-backed OPEX reader.
//!
//! [`OpexReader`] checks its arguments when it is built, before touching the
//! file system, then decodes the file on demand. When a schema is configured
//! the document is validated during the same read and the findings are
//! available from [`OpexReader::diagnostics`] afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use opex_rs::{DecodeMode, OpexReader};
//!
//! let mut reader = OpexReader::builder()
//!     .path("incoming/batch.oxi")
//!     .schema_path("schemas/opex.xsd")
//!     .mode(DecodeMode::Lenient)
//!     .build()?;
//!
//! let batch = reader.decode()?;
//! println!("{} pages", batch.page_count());
//! for diagnostic in reader.diagnostics() {
//!     eprintln!("{}", diagnostic);
//! }
//! # Ok::<(), opex_rs::Error>(())
//! ```

use crate::decode::DecodeMode;
use crate::error::{Error, Result};
use crate::objects::{Batch, OPEX_EXTENSION};
use crate::reader::parse_with;
use crate::validation::{self, Diagnostic, SchemaValidator};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where validation rules come from.
#[derive(Clone)]
pub enum SchemaSource {
    /// An XML Schema document on disk
    Path(PathBuf),
    /// A ready-made validator
    Validator(Arc<dyn SchemaValidator>),
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            SchemaSource::Validator(_) => f.write_str("Validator(..)"),
        }
    }
}

/// Reader configuration.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Policy for batch-level fields
    pub mode: DecodeMode,
    /// Optional schema; `None` disables validation
    pub schema: Option<SchemaSource>,
}

/// Builder for [`OpexReader`].
#[derive(Debug, Clone, Default)]
pub struct OpexReaderBuilder {
    path: Option<PathBuf>,
    options: ReaderOptions,
}

impl OpexReaderBuilder {
    /// Sets the document path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Validates against the XML Schema at `path`.
    pub fn schema_path(mut self, path: impl AsRef<Path>) -> Self {
        self.options.schema = Some(SchemaSource::Path(path.as_ref().to_path_buf()));
        self
    }

    /// Validates with a pre-built validator.
    pub fn validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.options.schema = Some(SchemaSource::Validator(validator));
        self
    }

    /// Selects the decode policy for batch-level fields.
    pub fn mode(mut self, mode: DecodeMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Checks the arguments and builds the reader. Performs no I/O.
    pub fn build(self) -> Result<OpexReader> {
        let path = self.path.ok_or(Error::MissingArgument("path"))?;

        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(Error::InvalidArgument {
                name: "path",
                reason: "path is empty".to_string(),
            });
        }

        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(OPEX_EXTENSION));
        if !has_extension {
            return Err(Error::UnsupportedFormat(path.display().to_string()));
        }

        Ok(OpexReader {
            path,
            options: self.options,
            diagnostics: Vec::new(),
        })
    }
}

/// Decodes one OPEX file.
///
/// Each reader owns its diagnostics; decoding is not reentrant.
#[derive(Debug)]
pub struct OpexReader {
    path: PathBuf,
    options: ReaderOptions,
    diagnostics: Vec<Diagnostic>,
}

impl OpexReader {
    /// Starts configuring a reader.
    pub fn builder() -> OpexReaderBuilder {
        OpexReaderBuilder::default()
    }

    /// Creates a lenient, non-validating reader for `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).build()
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The reader's configuration.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Diagnostics from the most recent decode, in document order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Decodes the file, blocking the current thread.
    pub fn decode(&mut self) -> Result<Batch> {
        let validator = self.begin();
        let result = match validator {
            Some(validator) => {
                let bytes = std::fs::read(&self.path)?;
                self.decode_buffer(&bytes, validator.as_ref())
            }
            None => {
                let file = File::open(&self.path)?;
                parse_with(BufReader::new(file), self.options.mode)
            }
        };
        self.finish(result)
    }

    /// Decodes the file without blocking; the only suspension point is the
    /// file read. Dropping the future cancels the decode.
    #[cfg(feature = "async")]
    pub async fn decode_async(&mut self) -> Result<Batch> {
        let validator = self.begin();
        let bytes = tokio::fs::read(&self.path).await?;
        let result = match validator {
            Some(validator) => self.decode_buffer(&bytes, validator.as_ref()),
            None => parse_with(&bytes[..], self.options.mode),
        };
        self.finish(result)
    }

    /// Resets diagnostics and resolves the configured validator.
    fn begin(&mut self) -> Option<Arc<dyn SchemaValidator>> {
        self.diagnostics.clear();
        tracing::debug!(
            path = %self.path.display(),
            mode = ?self.options.mode,
            "decoding OPEX batch"
        );
        match &self.options.schema {
            None => None,
            Some(SchemaSource::Validator(validator)) => Some(Arc::clone(validator)),
            Some(SchemaSource::Path(path)) => match validation::validator_for_path(path) {
                Ok(validator) => Some(validator),
                Err(diagnostic) => {
                    self.diagnostics.push(diagnostic);
                    None
                }
            },
        }
    }

    fn decode_buffer(&mut self, bytes: &[u8], validator: &dyn SchemaValidator) -> Result<Batch> {
        self.diagnostics.extend(validator.validate(bytes));
        parse_with(bytes, self.options.mode)
    }

    fn finish(&self, result: Result<Batch>) -> Result<Batch> {
        match &result {
            Ok(batch) => tracing::debug!(
                pages = batch.page_count(),
                diagnostics = self.diagnostics.len(),
                "decoded OPEX batch"
            ),
            Err(e) => tracing::debug!(error = %e, "OPEX decode failed"),
        }
        result
    }
}
