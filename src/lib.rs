//! OPEX scanner batch (`.oxi`) decoding for Rust.
//!
//! OPEX document scanners describe each scanned batch in an XML document:
//! a `Batch` containing transactions, groups and pages, where every page
//! carries its images, MICR and OCR reads, barcodes, mark detection results
//! and audit trail entries. This crate decodes that document into a typed
//! object tree in a single forward pass.
//!
//! # Features
//!
//! - **Typed Model**: Every attribute is decoded into an `Option` of a
//!   concrete type (integers, floats, timestamps, enumerations).
//! - **Streaming Decoder**: One pass over the XML event stream; elements the
//!   decoder does not recognise are skipped.
//! - **Lenient or Strict**: Malformed batch-level values are either dropped
//!   or reported as errors.
//! - **Schema Validation**: Optional XSD validation whose findings are
//!   collected as diagnostics without aborting the decode.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use opex_rs::OpexReader;
//!
//! let mut reader = OpexReader::open("batch.oxi")?;
//! let batch = reader.decode()?;
//!
//! for page in batch.iter_pages() {
//!     println!("{:?} {:?}", page.batch_sequence, page.page_type);
//! }
//! # Ok::<(), opex_rs::Error>(())
//! ```
//!
//! Documents that are already in memory can be decoded directly:
//!
//! ```rust
//! use opex_rs::reader::parse;
//!
//! let batch = parse(&br#"<Batch FormatVersion="03.14"/>"#[..]).unwrap();
//! assert_eq!(batch.format_version.as_deref(), Some("03.14"));
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - The decoded object tree
//! - [`reader`] - Streaming decoder over any buffered reader
//! - [`opex_reader`] - File-backed reader with validation
//! - [`decode`] - Value decoders and decode policies
//! - [`validation`] - Schema validation diagnostics
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `validation` - XSD validation through libxml2
//! - `async` - `OpexReader::decode_async` on tokio
//! - `cli` - The `opex_dump` command-line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod builders;
mod cursor;
pub mod decode;
pub mod error;
pub mod objects;
pub mod opex_reader;
pub mod reader;
pub mod validation;

// Re-export commonly used types at the crate root
pub use decode::DecodeMode;
pub use error::{Error, Result};
pub use objects::{Batch, EndInfo, Group, Image, Page, Side, Transaction};
pub use opex_reader::{OpexReader, OpexReaderBuilder, ReaderOptions, SchemaSource};
pub use reader::{parse, parse_with, BatchDecoder};
pub use validation::{Diagnostic, SchemaValidator, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
