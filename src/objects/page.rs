//! Page - a single scanned sheet and everything captured from it.

use crate::objects::batch::ReferenceId;
use crate::objects::common::{
    AuditTrailType, BlankAreaDecision, CheckType, ImageDepth, ImageFormat, ImageResolution,
    ImageType, ItemStatus, MicrStatus, PageType, RescanStatus, RtStatus, Side, TriState,
};
use chrono::NaiveDateTime;

/// An image file captured from one side of a page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    /// Position of the image among the page's images
    pub index: Option<i32>,
    /// Rescan history
    pub rescan_status: Option<RescanStatus>,
    /// Side the image was captured from
    pub side: Option<Side>,
    /// Full side or snippet
    pub image_type: Option<ImageType>,
    /// Bit depth
    pub depth: Option<ImageDepth>,
    /// File encoding
    pub format: Option<ImageFormat>,
    /// Image file name
    pub filename: Option<String>,
    /// Image file size (bytes)
    pub filesize: Option<i64>,
    /// Image length (inches)
    pub length: Option<f64>,
    /// Image height (inches)
    pub height: Option<f64>,
    /// Snippet offset along the length (inches)
    pub offset_length: Option<f64>,
    /// Snippet offset along the height (inches)
    pub offset_height: Option<f64>,
    /// Resolution along the length
    pub resolution_length: Option<ImageResolution>,
    /// Resolution along the height
    pub resolution_height: Option<ImageResolution>,
    /// Blank-area detection outcome
    pub blank_area_decision: Option<BlankAreaDecision>,
}

/// A MICR line read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Micr {
    /// Overall read result
    pub status: Option<MicrStatus>,
    /// Routing-transit validation result
    pub rt_status: Option<RtStatus>,
    /// Check layout
    pub check_type: Option<CheckType>,
    /// Side the line was read from
    pub side: Option<Side>,
    /// The MICR line as read
    pub value: Option<String>,
}

/// An OCR field read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ocr {
    /// Position among the page's OCR reads
    pub index: Option<i32>,
    /// Side read
    pub side: Option<Side>,
    /// Recognized text
    pub value: Option<String>,
    /// Field name
    pub name: Option<String>,
}

/// A barcode read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barcode {
    /// Position among the page's barcodes
    pub index: Option<i32>,
    /// Symbology name
    pub barcode_type: Option<String>,
    /// Side read
    pub side: Option<Side>,
    /// Decoded value
    pub value: Option<String>,
}

/// A mark-detection result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkDetect {
    /// Position among the page's mark zones
    pub index: Option<i32>,
    /// Side inspected
    pub side: Option<Side>,
    /// Detector output
    pub result: Option<String>,
    /// Zone name
    pub name: Option<String>,
}

/// An audit trail applied to the item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditTrail {
    /// Printed or electronic
    pub audit_type: Option<AuditTrailType>,
    /// Side printed on
    pub side: Option<Side>,
    /// Whether the trail was actually applied
    pub apply: Option<bool>,
    /// Audit text
    pub text: Option<String>,
}

/// A free-form tag attached by a plug-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Producer of the tag
    pub source: Option<String>,
    /// Tag value
    pub value: Option<String>,
}

/// Integrator-defined data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomData {
    /// Raw entry text
    pub entry: Option<String>,
}

/// Represents a single scanned sheet in OPEX.
///
/// Page holds:
/// - Sequence numbers and classification
/// - Physical measurements and detector results
/// - Child captures (images, MICR, OCR, barcodes, marks, audit trails,
///   reference IDs, tags and custom data), each in document order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    // === Sequencing ===
    /// Position of the page within the batch
    pub batch_sequence: Option<i32>,
    /// Position of the page within its transaction
    pub transaction_sequence: Option<i32>,
    /// Position of the page within its group
    pub group_sequence: Option<i32>,
    /// Output pocket the sheet was sorted into
    pub sort_pocket: Option<i32>,

    // === Classification ===
    /// Document name
    pub document_name: Option<String>,
    /// Page name
    pub page_name: Option<String>,
    /// Kept or voided
    pub item_status: Option<ItemStatus>,
    /// Sheet classification
    pub page_type: Option<PageType>,
    /// Rescan history
    pub rescan_status: Option<RescanStatus>,
    /// Time the sheet was scanned
    pub scan_time: Option<NaiveDateTime>,

    // === Measurements ===
    /// Sheet length (inches)
    pub length: Option<f64>,
    /// Sheet height (inches)
    pub height: Option<f64>,
    /// Measured skew (degrees)
    pub skew_degrees: Option<f64>,

    // === Detectors ===
    /// Envelope detection
    pub envelope_detect: Option<TriState>,
    /// Deskew status
    pub deskew_status: Option<TriState>,
    /// Streak detection on the front camera
    pub front_streak_detect_status: Option<TriState>,
    /// Streak detection on the back camera
    pub back_streak_detect_status: Option<TriState>,
    /// Whether a multifeed was detected
    pub multifeed: Option<bool>,

    /// Message written by a scanner plug-in
    pub plug_in_page_message: Option<String>,

    // === Child Objects ===
    images: Vec<Image>,
    micrs: Vec<Micr>,
    ocrs: Vec<Ocr>,
    barcodes: Vec<Barcode>,
    mark_detects: Vec<MarkDetect>,
    audit_trails: Vec<AuditTrail>,
    reference_ids: Vec<ReferenceId>,
    tags: Vec<Tag>,
    custom_data: Vec<CustomData>,
}

impl Page {
    /// Creates a new empty Page.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append_image(&mut self, image: Image) {
        self.images.push(image);
    }

    pub(crate) fn append_micr(&mut self, micr: Micr) {
        self.micrs.push(micr);
    }

    pub(crate) fn append_ocr(&mut self, ocr: Ocr) {
        self.ocrs.push(ocr);
    }

    pub(crate) fn append_barcode(&mut self, barcode: Barcode) {
        self.barcodes.push(barcode);
    }

    pub(crate) fn append_mark_detect(&mut self, mark_detect: MarkDetect) {
        self.mark_detects.push(mark_detect);
    }

    pub(crate) fn append_audit_trail(&mut self, audit_trail: AuditTrail) {
        self.audit_trails.push(audit_trail);
    }

    pub(crate) fn append_reference_id(&mut self, reference_id: ReferenceId) {
        self.reference_ids.push(reference_id);
    }

    pub(crate) fn append_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub(crate) fn append_custom_data(&mut self, custom_data: CustomData) {
        self.custom_data.push(custom_data);
    }

    /// Images, in document order.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// MICR reads, in document order.
    pub fn micrs(&self) -> &[Micr] {
        &self.micrs
    }

    /// OCR reads, in document order.
    pub fn ocrs(&self) -> &[Ocr] {
        &self.ocrs
    }

    /// Barcode reads, in document order.
    pub fn barcodes(&self) -> &[Barcode] {
        &self.barcodes
    }

    /// Mark-detection results, in document order.
    pub fn mark_detects(&self) -> &[MarkDetect] {
        &self.mark_detects
    }

    /// Audit trails, in document order.
    pub fn audit_trails(&self) -> &[AuditTrail] {
        &self.audit_trails
    }

    /// Page-scoped reference IDs, in document order.
    pub fn reference_ids(&self) -> &[ReferenceId] {
        &self.reference_ids
    }

    /// Tags, in document order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Custom data entries, in document order.
    pub fn custom_data(&self) -> &[CustomData] {
        &self.custom_data
    }

    /// Returns the first image captured from the given side.
    pub fn image(&self, side: Side) -> Option<&Image> {
        self.images.iter().find(|i| i.side == Some(side))
    }

    /// Returns true if the page was voided.
    pub fn is_void(&self) -> bool {
        self.item_status == Some(ItemStatus::Void)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new();
        assert!(page.images().is_empty());
        assert!(page.custom_data().is_empty());
        assert!(!page.is_void());
    }

    #[test]
    fn test_image_lookup_by_side() {
        let mut page = Page::new();
        page.append_image(Image {
            index: Some(1),
            side: Some(Side::Front),
            ..Default::default()
        });
        page.append_image(Image {
            index: Some(2),
            side: Some(Side::Back),
            ..Default::default()
        });
        assert_eq!(page.image(Side::Back).and_then(|i| i.index), Some(2));
        assert_eq!(page.images()[0].index, Some(1));
    }

    #[test]
    fn test_is_void() {
        let mut page = Page::new();
        page.item_status = Some(ItemStatus::Void);
        assert!(page.is_void());
    }
}
