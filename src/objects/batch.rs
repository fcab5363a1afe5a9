//! Batch - the root document container for OPEX.
//!
//! A batch holds the header written by the scanner when the run started,
//! batch-scoped reference IDs, the transaction tree, and the closing
//! [`EndInfo`] summary.

use crate::objects::common::{JobType, OperatingMode, Side};
use crate::objects::page::{Image, Page};
use chrono::NaiveDateTime;

/// An operator-keyed reference value, at batch or page scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceId {
    /// Position of the reference in its prompt list
    pub index: Option<i32>,
    /// Value entered by the operator
    pub response: Option<String>,
    /// Prompt name
    pub name: Option<String>,
}

/// Summary written when the batch closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndInfo {
    /// Time the batch was closed
    pub end_time: Option<NaiveDateTime>,
    /// Number of pages scanned
    pub num_pages: Option<i32>,
    /// Number of groups scanned
    pub num_groups: Option<i32>,
    /// Number of transactions scanned
    pub num_transactions: Option<i32>,
    /// Whether the batch was edited after scanning
    pub is_modified: Option<bool>,
}

/// A group of pages, typically one stapled set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Group number within the transaction
    pub group_id: Option<i32>,
    pages: Vec<Page>,
}

impl Group {
    /// Creates a new empty Group.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Returns the pages in document order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

/// A transaction, typically one envelope's contents.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    /// Transaction number within the batch
    pub transaction_id: Option<i32>,
    groups: Vec<Group>,
}

impl Transaction {
    /// Creates a new empty Transaction.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Returns the groups in document order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns an iterator over every page in this transaction.
    pub fn iter_pages(&self) -> impl Iterator<Item = &Page> {
        self.groups.iter().flat_map(|g| g.pages.iter())
    }
}

/// The root OPEX batch object.
///
/// Batch is the top-level container that holds:
/// - Scanner and job metadata from the batch header
/// - Batch-scoped reference IDs
/// - Child transactions, in document order
/// - The closing summary, once it has been seen
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    // === Format ===
    /// OPEX format version
    pub format_version: Option<String>,

    // === Scanner ===
    /// Scanner model family
    pub base_machine: Option<String>,
    /// Scanner device name
    pub scan_device: Option<String>,
    /// Scanner software version
    pub software_version: Option<String>,
    /// Transport identifier
    pub transport_id: Option<String>,

    // === Job ===
    /// Batch identifier assigned by the scanner
    pub batch_identifier: Option<String>,
    /// Job name
    pub job_name: Option<String>,
    /// Job classification
    pub job_type: Option<JobType>,
    /// Operating mode
    pub operating_mode: Option<OperatingMode>,
    /// Operator name
    pub operator_name: Option<String>,
    /// Whether any item in the batch was rescanned
    pub rescanned: Option<bool>,

    // === Timestamps ===
    /// Time scanning started
    pub start_time: Option<NaiveDateTime>,
    /// Date the work was received
    pub receive_date: Option<NaiveDateTime>,
    /// Date the work was processed
    pub process_date: Option<NaiveDateTime>,

    // === Free text ===
    /// Directory the images were written to
    pub image_file_path: Option<String>,
    /// Message written by a scanner plug-in
    pub plugin_message: Option<String>,
    /// Reserved for integrators
    pub developer_reserved: Option<String>,

    // === Child Objects ===
    reference_ids: Vec<ReferenceId>,
    transactions: Vec<Transaction>,
    end_info: Option<EndInfo>,
}

impl Batch {
    /// Creates a new empty Batch.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append_reference_id(&mut self, reference_id: ReferenceId) {
        self.reference_ids.push(reference_id);
    }

    pub(crate) fn append_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// A repeated closing summary replaces the earlier one.
    pub(crate) fn set_end_info(&mut self, end_info: EndInfo) {
        self.end_info = Some(end_info);
    }

    /// Returns the batch-scoped reference IDs in document order.
    pub fn reference_ids(&self) -> &[ReferenceId] {
        &self.reference_ids
    }

    /// Returns the transactions in document order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns the closing summary, if the document reached it.
    pub fn end_info(&self) -> Option<&EndInfo> {
        self.end_info.as_ref()
    }

    /// Returns an iterator over every page in the batch, in document order.
    pub fn iter_pages(&self) -> impl Iterator<Item = &Page> {
        self.transactions.iter().flat_map(|t| t.iter_pages())
    }

    /// Returns the number of pages in the batch.
    pub fn page_count(&self) -> usize {
        self.iter_pages().count()
    }

    /// Returns an iterator over every image in the batch.
    pub fn iter_images(&self) -> impl Iterator<Item = &Image> {
        self.iter_pages().flat_map(|p| p.images().iter())
    }

    /// Returns the file names of all images on the given side.
    pub fn image_filenames(&self, side: Side) -> Vec<&str> {
        self.iter_images()
            .filter(|i| i.side == Some(side))
            .filter_map(|i| i.filename.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_new_has_empty_collections() {
        let batch = Batch::new();
        assert!(batch.transactions().is_empty());
        assert!(batch.reference_ids().is_empty());
        assert!(batch.end_info().is_none());
        assert_eq!(batch.page_count(), 0);
    }

    #[test]
    fn test_iter_pages_spans_transactions_and_groups() {
        let mut batch = Batch::new();
        for t in 1..=2 {
            let mut txn = Transaction::new();
            txn.transaction_id = Some(t);
            for _ in 0..2 {
                let mut group = Group::new();
                group.append_page(Page::new());
                txn.append_group(group);
            }
            batch.append_transaction(txn);
        }
        assert_eq!(batch.page_count(), 4);
        assert_eq!(batch.transactions()[1].transaction_id, Some(2));
    }

    #[test]
    fn test_end_info_last_write_wins() {
        let mut batch = Batch::new();
        batch.set_end_info(EndInfo {
            num_pages: Some(1),
            ..Default::default()
        });
        batch.set_end_info(EndInfo {
            num_pages: Some(2),
            ..Default::default()
        });
        assert_eq!(batch.end_info().and_then(|e| e.num_pages), Some(2));
    }
}
