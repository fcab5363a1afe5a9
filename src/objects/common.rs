//! Enumerations shared across OPEX objects.
//!
//! Every enumeration here is a closed vocabulary of attribute tokens. Tokens
//! are matched case-insensitively; [`FromStr`] rejects anything outside the
//! vocabulary with [`Error::UnknownToken`], and `as_str` returns the
//! canonical spelling used by scanners.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// File extension carried by OPEX batch index files.
pub const OPEX_EXTENSION: &str = "oxi";

/// Generates a token enumeration with `as_str`, `Display` and `FromStr`.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the canonical attribute token for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($token) {
                        return Ok($name::$variant);
                    }
                )+
                Err(Error::UnknownToken {
                    kind: $kind,
                    token: s.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ============================================================================
// Batch-level vocabularies
// ============================================================================

token_enum! {
    /// Kind of job the batch was scanned under.
    JobType, "job type" {
        /// Mixed checks, stubs and pages
        Multiple => "MULTIPLE",
        /// One item per transaction
        Single => "SINGLE",
        /// Checks only
        CheckOnly => "CHECK ONLY",
        /// Remittance stubs only
        StubOnly => "STUB ONLY",
        /// Plain pages only
        PageOnly => "PAGE ONLY",
    }
}

token_enum! {
    /// How the operator drove the scanner.
    OperatingMode, "operating mode" {
        /// Operator feeds each item
        ManualScan => "MANUAL SCAN",
        /// Manual feed with automatic item classification
        ModifiedScan => "MODIFIED SCAN",
        /// Fully automatic feed
        AutoScan => "AUTO SCAN",
    }
}

// ============================================================================
// Page-level vocabularies
// ============================================================================

token_enum! {
    /// Whether a page is kept or voided.
    ItemStatus, "item status" {
        /// Item is part of the batch output
        Valid => "VALID",
        /// Item was voided by the operator
        Void => "VOID",
    }
}

token_enum! {
    /// Classification of a scanned sheet.
    PageType, "page type" {
        /// Ordinary document page
        Page => "PAGE",
        /// Page classified by a custom rule
        CustomPage => "CUSTOM PAGE",
        /// Envelope
        Envelope => "ENVELOPE",
        /// Check
        Check => "CHECK",
        /// Remittance stub
        Stub => "STUB",
        /// Separator sheet
        Separator => "SEPARATOR",
    }
}

token_enum! {
    /// Rescan history of a page or image.
    RescanStatus, "rescan status" {
        /// First scan of the item
        Original => "ORIGINAL",
        /// Item was rescanned
        Rescan => "RESCAN",
        /// Item replaced an earlier scan
        Replaced => "REPLACED",
    }
}

token_enum! {
    /// Kind of audit trail applied to an item.
    AuditTrailType, "audit trail type" {
        /// Ink-jet printed on the item
        Printed => "PRINTED",
        /// Recorded in the data only
        Electronic => "ELECTRONIC",
    }
}

token_enum! {
    /// Side of a sheet.
    Side, "side" {
        /// Front of the sheet
        Front => "FRONT",
        /// Back of the sheet
        Back => "BACK",
    }
}

// ============================================================================
// Image vocabularies
// ============================================================================

token_enum! {
    /// Extent of a captured image.
    ImageType, "image type" {
        /// The whole side
        Full => "FULL",
        /// A cropped region
        Snippet => "SNIPPET",
        /// Reduced-size preview
        Proxy => "PROXY",
    }
}

token_enum! {
    /// Bit depth code of an image.
    ImageDepth, "image depth" {
        /// 1 bit per pixel
        Bitonal => "1",
        /// 8 bit grayscale
        Gray => "8",
        /// 24 bit color
        Color => "24",
    }
}

token_enum! {
    /// Encoding of an image file.
    ImageFormat, "image format" {
        /// TIFF
        Tiff => "TIFF",
        /// JPEG
        Jpeg => "JPEG",
        /// Unencoded raster
        Raw => "RAW",
    }
}

token_enum! {
    /// Resolution code of an image, in dots per inch.
    ImageResolution, "image resolution" {
        /// 100 dpi
        Low => "100",
        /// 150 dpi
        Medium => "150",
        /// 200 dpi
        High => "200",
        /// 300 dpi
        VeryHigh => "300",
    }
}

impl ImageResolution {
    /// Returns the resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        match self {
            ImageResolution::Low => 100,
            ImageResolution::Medium => 150,
            ImageResolution::High => 200,
            ImageResolution::VeryHigh => 300,
        }
    }
}

impl ImageDepth {
    /// Returns the number of bits per pixel.
    pub fn bits(&self) -> u8 {
        match self {
            ImageDepth::Bitonal => 1,
            ImageDepth::Gray => 8,
            ImageDepth::Color => 24,
        }
    }
}

token_enum! {
    /// Outcome of blank-area detection on an image.
    BlankAreaDecision, "blank area decision" {
        /// Image is blank
        Blank => "BLANK",
        /// Image has content
        NotBlank => "NOT BLANK",
        /// Detector could not decide
        Undetermined => "UNDETERMINED",
    }
}

// ============================================================================
// MICR vocabularies
// ============================================================================

token_enum! {
    /// Overall MICR read result.
    MicrStatus, "MICR status" {
        /// Every character read
        Good => "GOOD",
        /// Some characters rejected
        Partial => "PARTIAL",
        /// Reader error
        Error => "ERROR",
        /// No MICR line present
        NoMicr => "NO MICR",
    }
}

token_enum! {
    /// Routing-transit field validation result.
    RtStatus, "routing transit status" {
        /// Routing number passed its check digit
        Good => "GOOD",
        /// Routing number failed validation
        Bad => "BAD",
        /// No routing field found
        NotFound => "NOT FOUND",
    }
}

token_enum! {
    /// Check layout detected from the MICR line.
    CheckType, "check type" {
        /// United States check
        Us => "US",
        /// Canadian check
        Canadian => "CANADIAN",
        /// Layout not recognized
        Unknown => "UNKNOWN",
    }
}

// ============================================================================
// Detector tri-state
// ============================================================================

token_enum! {
    /// Result of a detector that may be switched off.
    ///
    /// Shared by envelope detection, deskew, and front/back streak detection.
    TriState, "detector status" {
        /// Detector ran and fired
        Yes => "YES",
        /// Detector ran and did not fire
        No => "NO",
        /// Detector was disabled
        Inactive => "INACTIVE",
    }
}

impl TriState {
    /// Returns the detector result as a boolean, or `None` if inactive.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Inactive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match_case_insensitively() {
        assert_eq!("check only".parse::<JobType>().unwrap(), JobType::CheckOnly);
        assert_eq!("Front".parse::<Side>().unwrap(), Side::Front);
        assert_eq!(" VOID ".parse::<ItemStatus>().unwrap(), ItemStatus::Void);
    }

    #[test]
    fn test_every_canonical_token_round_trips() {
        for v in MicrStatus::ALL {
            assert_eq!(v.as_str().parse::<MicrStatus>().unwrap(), *v);
        }
        for v in PageType::ALL {
            assert_eq!(v.to_string().parse::<PageType>().unwrap(), *v);
        }
    }

    #[test]
    fn test_unknown_token_names_the_enumeration() {
        let err = "SIDEWAYS".parse::<Side>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown side token: \"SIDEWAYS\"");
    }

    #[test]
    fn test_numeric_codes() {
        assert_eq!("100".parse::<ImageResolution>().unwrap(), ImageResolution::Low);
        assert_eq!("1".parse::<ImageDepth>().unwrap(), ImageDepth::Bitonal);
        assert!("96".parse::<ImageResolution>().is_err());
        assert!("100.0".parse::<ImageResolution>().is_err());
        assert_eq!(ImageResolution::High.dpi(), 200);
        assert_eq!(ImageDepth::Color.bits(), 24);
    }

    #[test]
    fn test_tri_state() {
        assert_eq!("INACTIVE".parse::<TriState>().unwrap(), TriState::Inactive);
        assert_eq!(TriState::Yes.as_bool(), Some(true));
        assert_eq!(TriState::No.as_bool(), Some(false));
        assert_eq!(TriState::Inactive.as_bool(), None);
        assert!("MAYBE".parse::<TriState>().is_err());
    }
}
