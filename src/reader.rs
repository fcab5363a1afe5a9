//! OPEX streaming decoder.
//!
//! This module walks an OPEX document once, front to back, building the
//! [`Batch`] tree as it goes. It uses `quick-xml` for XML parsing and never
//! holds more than the current element path in memory besides the tree
//! itself.
//!
//! Each container is read inside its own [`Scope`], so a nested read can
//! never run past its container's closing tag:
//!
//! ```text
//! Root -> Batch -> { Transaction | ReferenceID | EndInfo }
//!                    Transaction -> Group -> Page -> { Image | MICR | OCR | Barcode |
//!                                                      MarkDetect | AuditTrail |
//!                                                      ReferenceID | Tag | CustomData }
//! ```
//!
//! Element names are matched case-insensitively. Unknown elements are
//! skipped along with their content.
//!
//! # Example
//!
//! ```rust,no_run
//! use opex_rs::reader::parse;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("batch.oxi").unwrap();
//! let batch = parse(BufReader::new(file)).unwrap();
//!
//! for page in batch.iter_pages() {
//!     println!("Page {:?}: {} images", page.batch_sequence, page.images().len());
//! }
//! ```

use crate::builders;
use crate::cursor::{Element, Scope, XmlCursor};
use crate::decode::{DecodeMode, DecodePolicy, Lenient, Strict};
use crate::error::Result;
use crate::objects::{Batch, Group, Page, Transaction};
use std::io::BufRead;

/// Element types recognized by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Batch,
    Transaction,
    Group,
    Page,
    Image,
    Micr,
    Ocr,
    Barcode,
    MarkDetect,
    AuditTrail,
    ReferenceId,
    Tag,
    CustomData,
    EndInfo,
}

impl ElementKind {
    const NAMES: &'static [(&'static str, ElementKind)] = &[
        ("Batch", ElementKind::Batch),
        ("Transaction", ElementKind::Transaction),
        ("Group", ElementKind::Group),
        ("Page", ElementKind::Page),
        ("Image", ElementKind::Image),
        ("MICR", ElementKind::Micr),
        ("OCR", ElementKind::Ocr),
        ("Barcode", ElementKind::Barcode),
        ("MarkDetect", ElementKind::MarkDetect),
        ("AuditTrail", ElementKind::AuditTrail),
        ("ReferenceID", ElementKind::ReferenceId),
        ("Tag", ElementKind::Tag),
        ("CustomData", ElementKind::CustomData),
        ("EndInfo", ElementKind::EndInfo),
    ];

    fn of(element: &Element) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&element.name))
            .map(|(_, kind)| *kind)
    }
}

fn skip(parent: &str, element: &Element) {
    tracing::trace!(scope = parent, element = %element.name, "skipping unrecognized element");
}

/// Single-pass decoder from an XML element stream to a [`Batch`].
///
/// `P` is the policy for the batch-level surface (batch header,
/// transactions, groups, batch reference IDs and the end summary). Pages and
/// everything inside them always decode leniently.
pub struct BatchDecoder<R: BufRead, P: DecodePolicy> {
    cursor: XmlCursor<R>,
    policy: P,
}

impl<R: BufRead, P: DecodePolicy> BatchDecoder<R, P> {
    /// Creates a decoder over a buffered reader.
    pub fn new(reader: R, policy: P) -> Self {
        Self {
            cursor: XmlCursor::new(reader),
            policy,
        }
    }

    /// Decodes the document, consuming the decoder.
    ///
    /// A document without a `Batch` element yields an empty batch, or
    /// [`Error::MissingElement`](crate::Error::MissingElement) when the policy is strict.
    pub fn decode(mut self) -> Result<Batch> {
        let policy = &self.policy;
        let mut root = self.cursor.root();
        let mut batch = None;

        while let Some(element) = root.next_child()? {
            match ElementKind::of(&element) {
                Some(ElementKind::Batch) if batch.is_none() => {
                    batch = Some(read_batch(root.enter(&element), &element, policy)?);
                }
                _ => skip("document", &element),
            }
        }

        match batch {
            Some(batch) => Ok(batch),
            None => {
                policy.missing_element("Batch")?;
                tracing::debug!("document has no Batch element");
                Ok(Batch::new())
            }
        }
    }
}

fn read_batch<R: BufRead, P: DecodePolicy>(
    mut scope: Scope<'_, R>,
    element: &Element,
    policy: &P,
) -> Result<Batch> {
    let mut batch = builders::batch(&element.attrs, policy)?;

    while let Some(child) = scope.next_child()? {
        match ElementKind::of(&child) {
            Some(ElementKind::Transaction) => {
                let transaction = read_transaction(scope.enter(&child), &child, policy)?;
                batch.append_transaction(transaction);
            }
            Some(ElementKind::ReferenceId) => {
                batch.append_reference_id(builders::reference_id(&child.attrs, policy)?);
            }
            Some(ElementKind::EndInfo) => {
                batch.set_end_info(builders::end_info(&child.attrs, policy)?);
            }
            _ => skip("Batch", &child),
        }
    }

    tracing::debug!(
        transactions = batch.transactions().len(),
        reference_ids = batch.reference_ids().len(),
        end_info = batch.end_info().is_some(),
        "decoded batch"
    );
    Ok(batch)
}

fn read_transaction<R: BufRead, P: DecodePolicy>(
    mut scope: Scope<'_, R>,
    element: &Element,
    policy: &P,
) -> Result<Transaction> {
    let mut transaction = builders::transaction(&element.attrs, policy)?;

    while let Some(child) = scope.next_child()? {
        match ElementKind::of(&child) {
            Some(ElementKind::Group) => {
                let group = read_group(scope.enter(&child), &child, policy)?;
                transaction.append_group(group);
            }
            _ => skip("Transaction", &child),
        }
    }

    Ok(transaction)
}

fn read_group<R: BufRead, P: DecodePolicy>(
    mut scope: Scope<'_, R>,
    element: &Element,
    policy: &P,
) -> Result<Group> {
    let mut group = builders::group(&element.attrs, policy)?;

    while let Some(child) = scope.next_child()? {
        match ElementKind::of(&child) {
            Some(ElementKind::Page) => {
                let page = read_page(scope.enter(&child), &child)?;
                group.append_page(page);
            }
            _ => skip("Group", &child),
        }
    }

    Ok(group)
}

fn read_page<R: BufRead>(mut scope: Scope<'_, R>, element: &Element) -> Result<Page> {
    let policy = &Lenient;
    let mut page = builders::page(&element.attrs, policy)?;

    while let Some(child) = scope.next_child()? {
        let attrs = &child.attrs;
        match ElementKind::of(&child) {
            Some(ElementKind::Image) => page.append_image(builders::image(attrs, policy)?),
            Some(ElementKind::Micr) => page.append_micr(builders::micr(attrs, policy)?),
            Some(ElementKind::Ocr) => page.append_ocr(builders::ocr(attrs, policy)?),
            Some(ElementKind::Barcode) => page.append_barcode(builders::barcode(attrs, policy)?),
            Some(ElementKind::MarkDetect) => {
                page.append_mark_detect(builders::mark_detect(attrs, policy)?)
            }
            Some(ElementKind::AuditTrail) => {
                page.append_audit_trail(builders::audit_trail(attrs, policy)?)
            }
            Some(ElementKind::ReferenceId) => {
                page.append_reference_id(builders::reference_id(attrs, policy)?)
            }
            Some(ElementKind::Tag) => page.append_tag(builders::tag(attrs, policy)?),
            Some(ElementKind::CustomData) => {
                page.append_custom_data(builders::custom_data(attrs, policy)?)
            }
            _ => skip("Page", &child),
        }
    }

    Ok(page)
}

/// Decodes a complete OPEX document with the lenient policy.
pub fn parse<R: BufRead>(reader: R) -> Result<Batch> {
    parse_with(reader, DecodeMode::Lenient)
}

/// Decodes a complete OPEX document with the given policy for batch-level fields.
pub fn parse_with<R: BufRead>(reader: R, mode: DecodeMode) -> Result<Batch> {
    match mode {
        DecodeMode::Lenient => BatchDecoder::new(reader, Lenient).decode(),
        DecodeMode::Strict => BatchDecoder::new(reader, Strict).decode(),
    }
}
