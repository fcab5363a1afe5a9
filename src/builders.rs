//! Entity builders.
//!
//! Each builder turns the attributes of one element into its entity, with
//! every child collection empty. Builders see nothing but that element's own
//! attributes.

use crate::cursor::Attributes;
use crate::decode::{self, DecodePolicy, Decoder};
use crate::error::Result;
use crate::objects::{
    AuditTrail, Barcode, Batch, CustomData, EndInfo, Group, Image, MarkDetect, Micr, Ocr, Page,
    ReferenceId, Tag, Transaction,
};

/// Attribute accessor bound to one element and one decode policy.
struct Fields<'a, P> {
    element: &'static str,
    attrs: &'a Attributes,
    policy: &'a P,
}

impl<'a, P: DecodePolicy> Fields<'a, P> {
    fn new(element: &'static str, attrs: &'a Attributes, policy: &'a P) -> Self {
        Self {
            element,
            attrs,
            policy,
        }
    }

    fn get<T>(&self, field: &'static str, decoder: Decoder<T>) -> Result<Option<T>> {
        self.policy
            .decode(self.element, field, self.attrs.get(field), decoder)
    }

    fn require<T>(&self, field: &'static str, decoder: Decoder<T>) -> Result<Option<T>> {
        self.policy
            .require(self.element, field, self.attrs.get(field), decoder)
    }
}

pub(crate) fn batch<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Batch> {
    let f = Fields::new("Batch", attrs, policy);
    let mut batch = Batch::new();
    batch.format_version = f.get("FormatVersion", decode::text)?;
    batch.base_machine = f.get("BaseMachine", decode::text)?;
    batch.scan_device = f.get("ScanDevice", decode::text)?;
    batch.software_version = f.get("SoftwareVersion", decode::text)?;
    batch.transport_id = f.get("TransportId", decode::text)?;
    batch.batch_identifier = f.get("BatchIdentifier", decode::text)?;
    batch.job_name = f.get("JobName", decode::text)?;
    batch.job_type = f.get("JobType", decode::token)?;
    batch.operating_mode = f.get("OperatingMode", decode::token)?;
    batch.operator_name = f.get("OperatorName", decode::text)?;
    batch.rescanned = f.get("Rescanned", decode::yes_no)?;
    batch.start_time = f.get("StartTime", decode::date_time)?;
    batch.receive_date = f.get("ReceiveDate", decode::date_time)?;
    batch.process_date = f.get("ProcessDate", decode::date_time)?;
    batch.image_file_path = f.get("ImageFilePath", decode::text)?;
    batch.plugin_message = f.get("PluginMessage", decode::text)?;
    batch.developer_reserved = f.get("DeveloperReserved", decode::text)?;
    Ok(batch)
}

pub(crate) fn transaction<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Transaction> {
    let f = Fields::new("Transaction", attrs, policy);
    let mut transaction = Transaction::new();
    transaction.transaction_id = f.require("TransactionID", decode::integer)?;
    Ok(transaction)
}

pub(crate) fn group<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Group> {
    let f = Fields::new("Group", attrs, policy);
    let mut group = Group::new();
    group.group_id = f.require("GroupID", decode::integer)?;
    Ok(group)
}

pub(crate) fn end_info<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<EndInfo> {
    let f = Fields::new("EndInfo", attrs, policy);
    Ok(EndInfo {
        end_time: f.get("EndTime", decode::date_time)?,
        num_pages: f.get("NumPages", decode::integer)?,
        num_groups: f.get("NumGroups", decode::integer)?,
        num_transactions: f.get("NumTransactions", decode::integer)?,
        is_modified: f.get("IsModified", decode::true_false)?,
    })
}

pub(crate) fn reference_id<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<ReferenceId> {
    let f = Fields::new("ReferenceID", attrs, policy);
    Ok(ReferenceId {
        index: f.get("Index", decode::integer)?,
        response: f.get("Response", decode::text)?,
        name: f.get("Name", decode::text)?,
    })
}

pub(crate) fn page<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Page> {
    let f = Fields::new("Page", attrs, policy);
    let mut page = Page::new();
    page.batch_sequence = f.get("BatchSequence", decode::integer)?;
    page.transaction_sequence = f.get("TransactionSequence", decode::integer)?;
    page.group_sequence = f.get("GroupSequence", decode::integer)?;
    page.sort_pocket = f.get("SortPocket", decode::integer)?;
    page.document_name = f.get("DocumentName", decode::text)?;
    page.page_name = f.get("PageName", decode::text)?;
    page.item_status = f.get("ItemStatus", decode::token)?;
    page.page_type = f.get("Type", decode::token)?;
    page.rescan_status = f.get("RescanStatus", decode::token)?;
    page.scan_time = f.get("ScanTime", decode::date_time)?;
    page.length = f.get("Length", decode::float)?;
    page.height = f.get("Height", decode::float)?;
    page.skew_degrees = f.get("SkewDegrees", decode::float)?;
    page.envelope_detect = f.get("EnvelopeDetect", decode::token)?;
    page.deskew_status = f.get("DeskewStatus", decode::token)?;
    page.front_streak_detect_status = f.get("FrontStreakDetectStatus", decode::token)?;
    page.back_streak_detect_status = f.get("BackStreakDetectStatus", decode::token)?;
    page.multifeed = f.get("Multifeed", decode::yes_no)?;
    page.plug_in_page_message = f.get("PlugInPageMessage", decode::text)?;
    Ok(page)
}

pub(crate) fn image<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Image> {
    let f = Fields::new("Image", attrs, policy);
    Ok(Image {
        index: f.get("Index", decode::integer)?,
        rescan_status: f.get("RescanStatus", decode::token)?,
        side: f.get("Side", decode::token)?,
        image_type: f.get("Type", decode::token)?,
        depth: f.get("Depth", decode::token)?,
        format: f.get("Format", decode::token)?,
        filename: f.get("Filename", decode::text)?,
        filesize: f.get("Filesize", decode::long)?,
        length: f.get("Length", decode::float)?,
        height: f.get("Height", decode::float)?,
        offset_length: f.get("OffsetLength", decode::float)?,
        offset_height: f.get("OffsetHeight", decode::float)?,
        resolution_length: f.get("ResolutionLength", decode::token)?,
        resolution_height: f.get("ResolutionHeight", decode::token)?,
        blank_area_decision: f.get("BlankAreaDecision", decode::token)?,
    })
}

pub(crate) fn micr<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Micr> {
    let f = Fields::new("MICR", attrs, policy);
    Ok(Micr {
        status: f.get("Status", decode::token)?,
        rt_status: f.get("RtStatus", decode::token)?,
        check_type: f.get("CheckType", decode::token)?,
        side: f.get("Side", decode::token)?,
        value: f.get("Value", decode::text)?,
    })
}

pub(crate) fn ocr<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Ocr> {
    let f = Fields::new("OCR", attrs, policy);
    Ok(Ocr {
        index: f.get("Index", decode::integer)?,
        side: f.get("Side", decode::token)?,
        value: f.get("Value", decode::text)?,
        name: f.get("Name", decode::text)?,
    })
}

pub(crate) fn barcode<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Barcode> {
    let f = Fields::new("Barcode", attrs, policy);
    Ok(Barcode {
        index: f.get("Index", decode::integer)?,
        barcode_type: f.get("Type", decode::text)?,
        side: f.get("Side", decode::token)?,
        value: f.get("Value", decode::text)?,
    })
}

pub(crate) fn mark_detect<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<MarkDetect> {
    let f = Fields::new("MarkDetect", attrs, policy);
    Ok(MarkDetect {
        index: f.get("Index", decode::integer)?,
        side: f.get("Side", decode::token)?,
        result: f.get("Result", decode::text)?,
        name: f.get("Name", decode::text)?,
    })
}

pub(crate) fn audit_trail<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<AuditTrail> {
    let f = Fields::new("AuditTrail", attrs, policy);
    Ok(AuditTrail {
        audit_type: f.get("Type", decode::token)?,
        side: f.get("Side", decode::token)?,
        apply: f.get("Apply", decode::true_false)?,
        text: f.get("Text", decode::text)?,
    })
}

pub(crate) fn tag<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<Tag> {
    let f = Fields::new("Tag", attrs, policy);
    Ok(Tag {
        source: f.get("Source", decode::text)?,
        value: f.get("Value", decode::text)?,
    })
}

pub(crate) fn custom_data<P: DecodePolicy>(attrs: &Attributes, policy: &P) -> Result<CustomData> {
    let f = Fields::new("CustomData", attrs, policy);
    Ok(CustomData {
        entry: f.get("Entry", decode::text)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Lenient, Strict};
    use crate::error::Error;
    use crate::objects::{
        BlankAreaDecision, ImageDepth, ImageResolution, JobType, OperatingMode, Side, TriState,
    };

    #[test]
    fn test_batch_header() {
        let attrs = Attributes::from_pairs(&[
            ("FormatVersion", "03.14"),
            ("BaseMachine", "FALCON"),
            ("JobType", "Multiple"),
            ("OperatingMode", "MANUAL SCAN"),
            ("StartTime", "2019-03-22 23:24:07"),
            ("ReceiveDate", "2019-03-21"),
            ("ProcessDate", "2019-03-22"),
            ("Rescanned", "NO"),
            ("Unrelated", "ignored"),
        ]);
        let batch = batch(&attrs, &Lenient).unwrap();
        assert_eq!(batch.format_version.as_deref(), Some("03.14"));
        assert_eq!(batch.base_machine.as_deref(), Some("FALCON"));
        assert_eq!(batch.job_type, Some(JobType::Multiple));
        assert_eq!(batch.operating_mode, Some(OperatingMode::ManualScan));
        assert!(batch.start_time.is_some());
        assert_eq!(
            batch.process_date.map(|d| d.to_string()),
            Some("2019-03-22 00:00:00".to_string())
        );
        assert_eq!(
            batch.receive_date.map(|d| d.to_string()),
            Some("2019-03-21 00:00:00".to_string())
        );
        assert_eq!(batch.rescanned, Some(false));
        assert!(batch.transactions().is_empty());
    }

    #[test]
    fn test_batch_strict_rejects_unknown_job_type() {
        let attrs = Attributes::from_pairs(&[("JobType", "SOMETIMES")]);
        assert!(batch(&attrs, &Lenient).unwrap().job_type.is_none());
        assert!(matches!(
            batch(&attrs, &Strict),
            Err(Error::InvalidField { field: "JobType", .. })
        ));
    }

    #[test]
    fn test_required_ids_under_strict() {
        let empty = Attributes::default();
        assert!(transaction(&empty, &Lenient).unwrap().transaction_id.is_none());
        assert!(matches!(
            transaction(&empty, &Strict),
            Err(Error::MissingField { field: "TransactionID", .. })
        ));
        assert!(group(&empty, &Strict).is_err());

        let attrs = Attributes::from_pairs(&[("GroupID", "3")]);
        assert_eq!(group(&attrs, &Strict).unwrap().group_id, Some(3));
    }

    #[test]
    fn test_page_fields() {
        let attrs = Attributes::from_pairs(&[
            ("BatchSequence", "12"),
            ("ItemStatus", "VALID"),
            ("Type", "Check"),
            ("Length", "6.00"),
            ("Height", "2.75"),
            ("EnvelopeDetect", "INACTIVE"),
            ("DeskewStatus", "YES"),
            ("FrontStreakDetectStatus", "NO"),
            ("BackStreakDetectStatus", "BROKEN"),
            ("Multifeed", "YES"),
            ("ScanTime", "2019-03-22 23:24:09"),
        ]);
        let page = page(&attrs, &Lenient).unwrap();
        assert_eq!(page.batch_sequence, Some(12));
        assert_eq!(page.length, Some(6.0));
        assert_eq!(page.height, Some(2.75));
        assert_eq!(page.envelope_detect, Some(TriState::Inactive));
        assert_eq!(page.deskew_status, Some(TriState::Yes));
        assert_eq!(page.front_streak_detect_status, Some(TriState::No));
        assert_eq!(page.back_streak_detect_status, None);
        assert_eq!(page.multifeed, Some(true));
        assert_eq!(
            page.scan_time.map(|d| d.to_string()),
            Some("2019-03-22 23:24:09".to_string())
        );
        assert!(page.images().is_empty());

        let attrs = Attributes::from_pairs(&[("ScanTime", "2019-03-22")]);
        assert_eq!(
            super::page(&attrs, &Lenient).unwrap().scan_time.map(|d| d.to_string()),
            Some("2019-03-22 00:00:00".to_string())
        );
    }

    #[test]
    fn test_image_fields() {
        let attrs = Attributes::from_pairs(&[
            ("Index", "1"),
            ("Side", "FRONT"),
            ("Depth", "1"),
            ("Filename", "00000001.tif"),
            ("Filesize", "5000000000"),
            ("ResolutionLength", "100"),
            ("ResolutionHeight", "96"),
            ("BlankAreaDecision", "NOT BLANK"),
            ("OffsetLength", "1,5"),
        ]);
        let image = image(&attrs, &Lenient).unwrap();
        assert_eq!(image.index, Some(1));
        assert_eq!(image.side, Some(Side::Front));
        assert_eq!(image.depth, Some(ImageDepth::Bitonal));
        assert_eq!(image.filesize, Some(5_000_000_000));
        assert_eq!(image.resolution_length, Some(ImageResolution::Low));
        assert_eq!(image.resolution_height, None);
        assert_eq!(image.blank_area_decision, Some(BlankAreaDecision::NotBlank));
        assert_eq!(image.offset_length, None);
    }

    #[test]
    fn test_end_info_and_audit_trail_booleans() {
        let attrs = Attributes::from_pairs(&[("IsModified", "TRUE"), ("NumPages", "4")]);
        let end = end_info(&attrs, &Lenient).unwrap();
        assert_eq!(end.is_modified, Some(true));
        assert_eq!(end.num_pages, Some(4));

        let attrs = Attributes::from_pairs(&[("EndTime", "2019-03-23")]);
        assert_eq!(
            end_info(&attrs, &Lenient).unwrap().end_time.map(|d| d.to_string()),
            Some("2019-03-23 00:00:00".to_string())
        );

        let attrs = Attributes::from_pairs(&[("Apply", "YES"), ("Text", "AUDIT 0001")]);
        let trail = audit_trail(&attrs, &Lenient).unwrap();
        assert_eq!(trail.apply, None);
        assert_eq!(trail.text.as_deref(), Some("AUDIT 0001"));
    }
}
