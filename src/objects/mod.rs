//! OPEX object types.
//!
//! This module contains the data structures decoded from an OPEX batch:
//!
//! - [`Batch`] - The root document container
//! - [`Transaction`] and [`Group`] - Intermediate containers
//! - [`Page`] - A scanned sheet
//! - [`Image`], [`Micr`], [`Ocr`], [`Barcode`], [`MarkDetect`],
//!   [`AuditTrail`], [`ReferenceId`], [`Tag`], [`CustomData`] - Page captures
//! - [`EndInfo`] - The closing batch summary
//!
//! Child collections are filled while decoding and exposed as read-only slices.

mod batch;
mod common;
mod page;

pub use batch::{Batch, EndInfo, Group, ReferenceId, Transaction};
pub use common::{
    AuditTrailType, BlankAreaDecision, CheckType, ImageDepth, ImageFormat, ImageResolution,
    ImageType, ItemStatus, JobType, MicrStatus, OperatingMode, PageType, RescanStatus, RtStatus,
    Side, TriState, OPEX_EXTENSION,
};
pub use page::{AuditTrail, Barcode, CustomData, Image, MarkDetect, Micr, Ocr, Page, Tag};
