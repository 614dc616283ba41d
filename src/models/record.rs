//! Normalized manifest records.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Disease-stage class derived from a BCLC staging label.
///
/// The integer codes are stable and are what the exported manifest
/// carries: 0 = early, 1 = intermediate, 2 = advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StageClass {
    Early = 0,
    Intermediate = 1,
    Advanced = 2,
}

impl StageClass {
    /// Integer code used in the exported manifest.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<StageClass> for u8 {
    fn from(class: StageClass) -> Self {
        class.code()
    }
}

impl TryFrom<u8> for StageClass {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StageClass::Early),
            1 => Ok(StageClass::Intermediate),
            2 => Ok(StageClass::Advanced),
            other => Err(format!("unknown stage class code: {other}")),
        }
    }
}

impl fmt::Display for StageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of the combined manifest: stage class plus the image and
/// mask locations for a single subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Stage class code
    pub class: StageClass,
    /// Path to the image volume
    pub img: PathBuf,
    /// Path to the segmentation mask; the file itself may be absent
    pub mask: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_class_codes_are_stable() {
        assert_eq!(StageClass::Early.code(), 0);
        assert_eq!(StageClass::Intermediate.code(), 1);
        assert_eq!(StageClass::Advanced.code(), 2);
    }

    #[test]
    fn stage_class_round_trips_through_codes() {
        for class in [
            StageClass::Early,
            StageClass::Intermediate,
            StageClass::Advanced,
        ] {
            assert_eq!(StageClass::try_from(class.code()), Ok(class));
        }
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert!(StageClass::try_from(3).is_err());
        assert!(StageClass::try_from(255).is_err());
    }

    #[test]
    fn records_serialize_with_integer_classes() {
        let record = ManifestRecord {
            class: StageClass::Intermediate,
            img: PathBuf::from("images/T1.nii.gz"),
            mask: PathBuf::from("masks/T1.nii.gz"),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"class\":1"));
    }

    #[test]
    fn deserializing_an_unknown_class_fails() {
        let json = r#"{"class":7,"img":"a.nii.gz","mask":"b.nii.gz"}"#;
        assert!(serde_json::from_str::<ManifestRecord>(json).is_err());
    }
}
