//! Closed category enumerations for the intake checklists.
//!
//! The scan and lab checklists are keyed by these enums rather than by
//! free-form display strings, so a checklist can never gain or lose a
//! category through a typo or an unexpected key. The serialized form uses
//! the human-readable display names, which are also the keys presented to
//! API consumers.

use serde::{Deserialize, Serialize};

/// Imaging studies collected during the pre-operative workup.
///
/// Exactly five categories; the declaration order is the fixed display
/// order of the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScanCategory {
    #[serde(rename = "Abdominal CT")]
    AbdominalCt,
    #[serde(rename = "Chest X-ray")]
    ChestXray,
    #[serde(rename = "Upper GI Series")]
    UpperGiSeries,
    #[serde(rename = "Abdominal Ultrasound")]
    AbdominalUltrasound,
    #[serde(rename = "Endoscopy")]
    Endoscopy,
}

impl ScanCategory {
    /// All scan categories in display order.
    pub const ALL: [ScanCategory; 5] = [
        ScanCategory::AbdominalCt,
        ScanCategory::ChestXray,
        ScanCategory::UpperGiSeries,
        ScanCategory::AbdominalUltrasound,
        ScanCategory::Endoscopy,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ScanCategory::AbdominalCt => "Abdominal CT",
            ScanCategory::ChestXray => "Chest X-ray",
            ScanCategory::UpperGiSeries => "Upper GI Series",
            ScanCategory::AbdominalUltrasound => "Abdominal Ultrasound",
            ScanCategory::Endoscopy => "Endoscopy",
        }
    }

    /// Look up a category by its display name.
    ///
    /// Returns `None` for unknown names; callers decide whether to skip or
    /// report the miss.
    pub fn from_display_name(name: &str) -> Option<Self> {
        ScanCategory::ALL
            .into_iter()
            .find(|c| c.display_name() == name)
    }
}

impl std::fmt::Display for ScanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Laboratory panels collected during the pre-operative workup.
///
/// Exactly six categories; the declaration order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LabCategory {
    #[serde(rename = "Complete Blood Count")]
    CompleteBloodCount,
    #[serde(rename = "Metabolic Panel")]
    MetabolicPanel,
    #[serde(rename = "Lipid Panel")]
    LipidPanel,
    #[serde(rename = "HbA1c")]
    HbA1c,
    #[serde(rename = "Thyroid Panel")]
    ThyroidPanel,
    #[serde(rename = "Vitamin Panel")]
    VitaminPanel,
}

impl LabCategory {
    /// All lab categories in display order.
    pub const ALL: [LabCategory; 6] = [
        LabCategory::CompleteBloodCount,
        LabCategory::MetabolicPanel,
        LabCategory::LipidPanel,
        LabCategory::HbA1c,
        LabCategory::ThyroidPanel,
        LabCategory::VitaminPanel,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LabCategory::CompleteBloodCount => "Complete Blood Count",
            LabCategory::MetabolicPanel => "Metabolic Panel",
            LabCategory::LipidPanel => "Lipid Panel",
            LabCategory::HbA1c => "HbA1c",
            LabCategory::ThyroidPanel => "Thyroid Panel",
            LabCategory::VitaminPanel => "Vitamin Panel",
        }
    }

    /// Look up a category by its display name.
    pub fn from_display_name(name: &str) -> Option<Self> {
        LabCategory::ALL
            .into_iter()
            .find(|c| c.display_name() == name)
    }
}

impl std::fmt::Display for LabCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_category_display_name_round_trip() {
        for category in ScanCategory::ALL {
            assert_eq!(
                ScanCategory::from_display_name(category.display_name()),
                Some(category)
            );
        }
    }

    #[test]
    fn test_lab_category_display_name_round_trip() {
        for category in LabCategory::ALL {
            assert_eq!(
                LabCategory::from_display_name(category.display_name()),
                Some(category)
            );
        }
    }

    #[test]
    fn test_unknown_display_name_is_none() {
        assert_eq!(ScanCategory::from_display_name("Brain MRI"), None);
        assert_eq!(LabCategory::from_display_name("Urinalysis"), None);
    }

    #[test]
    fn test_categories_serialise_as_display_names() {
        let json = serde_json::to_string(&ScanCategory::ChestXray).unwrap();
        assert_eq!(json, "\"Chest X-ray\"");

        let json = serde_json::to_string(&LabCategory::HbA1c).unwrap();
        assert_eq!(json, "\"HbA1c\"");
    }
}
