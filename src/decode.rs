//! Attribute value decoders and decode policies.
//!
//! A [`Decoder`] turns a trimmed, non-empty attribute value into a typed
//! value, returning `None` when the text is not in its format. A
//! [`DecodePolicy`] decides what that `None` means: [`Lenient`] treats it as
//! an absent field, [`Strict`] turns it into [`Error::InvalidField`].
//!
//! Both policies treat a missing or blank attribute as absent.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// A decoder for one attribute format.
pub type Decoder<T> = fn(&str) -> Option<T>;

/// Full timestamp format used by OPEX date-time attributes.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format, normalized to midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which policy a reader applies to its batch-level fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeMode {
    /// Unparseable values become absent
    #[default]
    Lenient,
    /// Unparseable values and missing required fields are errors
    Strict,
}

/// Strategy for handling attribute values a decoder rejects.
pub trait DecodePolicy {
    /// Decodes `raw` for `field` on `element`.
    fn decode<T>(
        &self,
        element: &'static str,
        field: &'static str,
        raw: Option<&str>,
        decoder: Decoder<T>,
    ) -> Result<Option<T>>;

    /// Called when a required field is absent.
    fn missing(&self, element: &'static str, field: &'static str) -> Result<()>;

    /// Called when a required element never appears.
    fn missing_element(&self, element: &'static str) -> Result<()>;

    /// Decodes a field that the format requires.
    fn require<T>(
        &self,
        element: &'static str,
        field: &'static str,
        raw: Option<&str>,
        decoder: Decoder<T>,
    ) -> Result<Option<T>> {
        let value = self.decode(element, field, raw, decoder)?;
        if value.is_none() {
            self.missing(element, field)?;
        }
        Ok(value)
    }
}

/// Never fails; anything unreadable is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

/// Reports unreadable values and missing required fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl DecodePolicy for Lenient {
    fn decode<T>(
        &self,
        _element: &'static str,
        _field: &'static str,
        raw: Option<&str>,
        decoder: Decoder<T>,
    ) -> Result<Option<T>> {
        Ok(present(raw).and_then(decoder))
    }

    fn missing(&self, _element: &'static str, _field: &'static str) -> Result<()> {
        Ok(())
    }

    fn missing_element(&self, _element: &'static str) -> Result<()> {
        Ok(())
    }
}

impl DecodePolicy for Strict {
    fn decode<T>(
        &self,
        element: &'static str,
        field: &'static str,
        raw: Option<&str>,
        decoder: Decoder<T>,
    ) -> Result<Option<T>> {
        match present(raw) {
            None => Ok(None),
            Some(s) => decoder(s).map(Some).ok_or_else(|| Error::InvalidField {
                element,
                field,
                value: s.to_string(),
            }),
        }
    }

    fn missing(&self, element: &'static str, field: &'static str) -> Result<()> {
        Err(Error::MissingField { element, field })
    }

    fn missing_element(&self, element: &'static str) -> Result<()> {
        Err(Error::MissingElement(element.to_string()))
    }
}

/// Trims the raw value, treating blank as absent.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Decoders
// ============================================================================

/// Free text, passed through.
pub fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// 32-bit integer.
pub fn integer(s: &str) -> Option<i32> {
    s.parse().ok()
}

/// 64-bit integer.
pub fn long(s: &str) -> Option<i64> {
    s.parse().ok()
}

/// Plain decimal number: optional sign, digits around an optional point.
///
/// Exponents, thousands separators, `inf` and `NaN` are rejected.
pub fn float(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !all_digits(whole) || !all_digits(frac) {
        return None;
    }
    s.parse().ok()
}

/// `yyyy-MM-dd HH:mm:ss`, or `yyyy-MM-dd` at midnight.
pub fn date_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `TRUE` / `FALSE`.
pub fn true_false(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("TRUE") {
        Some(true)
    } else if s.eq_ignore_ascii_case("FALSE") {
        Some(false)
    } else {
        None
    }
}

/// `YES` / `NO`.
pub fn yes_no(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("YES") {
        Some(true)
    } else if s.eq_ignore_ascii_case("NO") {
        Some(false)
    } else {
        None
    }
}

/// Any closed-vocabulary enumeration.
pub fn token<T: FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{
        AuditTrailType, BlankAreaDecision, CheckType, ImageDepth, ImageFormat, ImageResolution,
        ImageType, ItemStatus, JobType, MicrStatus, OperatingMode, PageType, RescanStatus,
        RtStatus, Side, TriState,
    };
    use chrono::{NaiveDate, Timelike};

    fn lenient<T>(raw: Option<&str>, decoder: Decoder<T>) -> Option<T> {
        Lenient.decode("Page", "Field", raw, decoder).unwrap()
    }

    fn strict<T>(raw: Option<&str>, decoder: Decoder<T>) -> Result<Option<T>> {
        Strict.decode("Batch", "Field", raw, decoder)
    }

    /// Checks both policies against every token of one enumeration.
    fn check_vocabulary<T>(all: &[T])
    where
        T: FromStr + Copy + PartialEq + std::fmt::Debug + std::fmt::Display,
    {
        for v in all {
            let canonical = v.to_string();
            assert_eq!(lenient(Some(&canonical), token::<T>), Some(*v));
            assert_eq!(strict(Some(&canonical), token::<T>).unwrap(), Some(*v));
        }
        for junk in ["", "   ", "not-a-token", "0"] {
            assert_eq!(lenient(Some(junk), token::<T>), None);
        }
        assert_eq!(lenient(None, token::<T>), None);
        assert!(strict(Some("not-a-token"), token::<T>).is_err());
        assert_eq!(strict(Some(""), token::<T>).unwrap(), None);
        assert_eq!(strict(None, token::<T>).unwrap(), None);
    }

    #[test]
    fn test_every_enumeration_under_both_policies() {
        check_vocabulary(JobType::ALL);
        check_vocabulary(OperatingMode::ALL);
        check_vocabulary(ItemStatus::ALL);
        check_vocabulary(PageType::ALL);
        check_vocabulary(RescanStatus::ALL);
        check_vocabulary(AuditTrailType::ALL);
        check_vocabulary(Side::ALL);
        check_vocabulary(ImageType::ALL);
        check_vocabulary(ImageDepth::ALL);
        check_vocabulary(ImageFormat::ALL);
        check_vocabulary(ImageResolution::ALL);
        check_vocabulary(MicrStatus::ALL);
        check_vocabulary(RtStatus::ALL);
        check_vocabulary(CheckType::ALL);
        check_vocabulary(BlankAreaDecision::ALL);
        check_vocabulary(TriState::ALL);
    }

    #[test]
    fn test_strict_error_identifies_field() {
        let err = Strict
            .decode("Batch", "JobType", Some("BOGUS"), token::<JobType>)
            .unwrap_err();
        match err {
            Error::InvalidField {
                element,
                field,
                value,
            } => {
                assert_eq!(element, "Batch");
                assert_eq!(field, "JobType");
                assert_eq!(value, "BOGUS");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require() {
        assert!(Lenient.require("Group", "GroupID", None, integer).unwrap().is_none());
        assert!(matches!(
            Strict.require("Group", "GroupID", None, integer),
            Err(Error::MissingField { field: "GroupID", .. })
        ));
        assert_eq!(
            Strict.require("Group", "GroupID", Some("7"), integer).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn test_missing_element() {
        assert!(Lenient.missing_element("Batch").is_ok());
        assert!(matches!(
            Strict.missing_element("Batch"),
            Err(Error::MissingElement(ref name)) if name == "Batch"
        ));
    }

    #[test]
    fn test_date_time_formats() {
        let full = date_time("2019-03-22 23:24:07").unwrap();
        assert_eq!(
            full,
            NaiveDate::from_ymd_opt(2019, 3, 22)
                .unwrap()
                .and_hms_opt(23, 24, 7)
                .unwrap()
        );

        let date_only = date_time("2019-03-22").unwrap();
        assert_eq!(date_only.date(), NaiveDate::from_ymd_opt(2019, 3, 22).unwrap());
        assert_eq!(date_only.hour(), 0);
        assert_eq!(date_only.minute(), 0);

        assert!(date_time("2019-03-22T23:24:07").is_none());
        assert!(date_time("03/22/2019").is_none());
        assert!(strict(Some("yesterday"), date_time).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(float("8.50"), Some(8.5));
        assert_eq!(float("-0.25"), Some(-0.25));
        assert_eq!(float("+3"), Some(3.0));
        assert_eq!(float(".5"), Some(0.5));
        assert_eq!(float("11."), Some(11.0));
        assert_eq!(float("1,000.5"), None);
        assert_eq!(float("1e3"), None);
        assert_eq!(float("NaN"), None);
        assert_eq!(float("inf"), None);
        assert_eq!(float("."), None);
        assert_eq!(float("-"), None);
    }

    #[test]
    fn test_integers() {
        assert_eq!(integer("42"), Some(42));
        assert_eq!(integer("4.2"), None);
        assert_eq!(long("5000000000"), Some(5_000_000_000));
        assert_eq!(integer("5000000000"), None);
    }

    #[test]
    fn test_boolean_token_pairs() {
        assert_eq!(true_false("TRUE"), Some(true));
        assert_eq!(true_false("false"), Some(false));
        assert_eq!(true_false("YES"), None);
        assert_eq!(yes_no("YES"), Some(true));
        assert_eq!(yes_no("No"), Some(false));
        assert_eq!(yes_no("TRUE"), None);
    }

    #[test]
    fn test_tri_state_decoding() {
        assert_eq!(lenient(Some("YES"), token::<TriState>), Some(TriState::Yes));
        assert_eq!(lenient(Some("NO"), token::<TriState>), Some(TriState::No));
        assert_eq!(
            lenient(Some("INACTIVE"), token::<TriState>),
            Some(TriState::Inactive)
        );
        assert_eq!(lenient(Some("TRUE"), token::<TriState>), None);
    }

    #[test]
    fn test_blank_values_are_absent() {
        assert_eq!(lenient(Some("  "), text), None);
        assert_eq!(lenient(Some(" padded "), text), Some("padded".to_string()));
        assert_eq!(strict(Some(""), integer).unwrap(), None);
    }
}
