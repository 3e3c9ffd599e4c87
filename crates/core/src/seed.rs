//! Fixed seed patient records.
//!
//! Every listing always contains these example patients first, regardless of
//! what has been persisted. Their identifiers are fixed so detail views and
//! downstream workflows can reference them across runs; their ages are
//! derived from their fixed birth dates at call time, like any other record.

use crate::builder::derive_age;
use crate::categories::{LabCategory, ScanCategory};
use crate::intake::ScanUpload;
use crate::record::{Gender, MedicalHistory, PatientRecord, RecordStatus};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

/// The fixed seed records, in their fixed order.
pub fn seed_records() -> Vec<PatientRecord> {
    let today = Utc::now().date_naive();

    vec![
        seed_record(
            "00000000-0000-4000-8000-000000000001",
            "John Smith",
            "P-2024-001",
            NaiveDate::from_ymd_opt(1979, 5, 15),
            Gender::Male,
            NaiveDate::from_ymd_opt(2024, 3, 11),
            RecordStatus::Active,
            1,
            MedicalHistory {
                weight_history: "Progressive weight gain over 15 years, current BMI 34.3."
                    .to_string(),
                comorbidities: "Type 2 diabetes, hypertension.".to_string(),
                surgical_history: "Scheduled for sleeve gastrectomy.".to_string(),
                medications: "Metformin, lisinopril.".to_string(),
                psychosocial_history: String::new(),
            },
            &[
                (ScanCategory::AbdominalCt, "smith_abdominal_ct.dcm"),
                (ScanCategory::ChestXray, "smith_chest_xray.dcm"),
            ],
            &[
                (LabCategory::CompleteBloodCount, "Within normal limits"),
                (LabCategory::HbA1c, "7.2%"),
            ],
            today,
        ),
        seed_record(
            "00000000-0000-4000-8000-000000000002",
            "Sarah Johnson",
            "P-2024-002",
            NaiveDate::from_ymd_opt(1972, 8, 22),
            Gender::Female,
            NaiveDate::from_ymd_opt(2024, 4, 2),
            RecordStatus::Completed,
            2,
            MedicalHistory {
                weight_history: "BMI 35.1 at initial consultation.".to_string(),
                comorbidities: "Obstructive sleep apnoea.".to_string(),
                surgical_history: "Post-operative follow-up after sleeve gastrectomy.".to_string(),
                medications: "Multivitamin supplementation.".to_string(),
                psychosocial_history: "Good adherence to follow-up programme.".to_string(),
            },
            &[
                (ScanCategory::AbdominalCt, "johnson_abdominal_ct.dcm"),
                (ScanCategory::ChestXray, "johnson_chest_xray.dcm"),
                (ScanCategory::UpperGiSeries, "johnson_upper_gi.dcm"),
            ],
            &[
                (LabCategory::CompleteBloodCount, "Within normal limits"),
                (LabCategory::MetabolicPanel, "Within normal limits"),
                (LabCategory::HbA1c, "5.9%"),
            ],
            today,
        ),
        seed_record(
            "00000000-0000-4000-8000-000000000003",
            "Michael Brown",
            "P-2024-003",
            NaiveDate::from_ymd_opt(1985, 12, 3),
            Gender::Male,
            NaiveDate::from_ymd_opt(2024, 5, 20),
            RecordStatus::Pending,
            0,
            MedicalHistory {
                weight_history: "BMI 38.6, initial consultation.".to_string(),
                comorbidities: String::new(),
                surgical_history: String::new(),
                medications: String::new(),
                psychosocial_history: String::new(),
            },
            &[],
            &[],
            today,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_record(
    id: &str,
    name: &str,
    medical_record_number: &str,
    date_of_birth: Option<NaiveDate>,
    gender: Gender,
    last_activity: Option<NaiveDate>,
    status: RecordStatus,
    simulation_count: usize,
    history: MedicalHistory,
    uploaded_scans: &[(ScanCategory, &str)],
    lab_results: &[(LabCategory, &str)],
    today: NaiveDate,
) -> PatientRecord {
    let scan_checklist: BTreeMap<ScanCategory, ScanUpload> = ScanCategory::ALL
        .into_iter()
        .map(|category| {
            let entry = uploaded_scans
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, reference_name)| ScanUpload {
                    reference_name: reference_name.to_string(),
                    uploaded: true,
                })
                .unwrap_or_default();
            (category, entry)
        })
        .collect();

    let lab_checklist: BTreeMap<LabCategory, String> = LabCategory::ALL
        .into_iter()
        .map(|category| {
            let result = lab_results
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, text)| text.to_string())
                .unwrap_or_default();
            (category, result)
        })
        .collect();

    PatientRecord {
        id: id.to_string(),
        name: name.to_string(),
        medical_record_number: medical_record_number.to_string(),
        age: date_of_birth.map(|dob| derive_age(dob, today)).unwrap_or(0),
        gender,
        date_of_birth,
        last_activity: last_activity.unwrap_or(today),
        scan_count: uploaded_scans.len(),
        simulation_count,
        status,
        history,
        scan_checklist,
        lab_checklist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_records_are_three_in_fixed_order() {
        let seeds = seed_records();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].name, "John Smith");
        assert_eq!(seeds[1].name, "Sarah Johnson");
        assert_eq!(seeds[2].name, "Michael Brown");
    }

    #[test]
    fn test_seed_ids_are_stable() {
        let first = seed_records();
        let second = seed_records();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.medical_record_number, b.medical_record_number);
        }
    }

    #[test]
    fn test_seed_scan_counts_match_their_checklists() {
        for seed in seed_records() {
            let uploaded = seed
                .scan_checklist
                .values()
                .filter(|entry| entry.uploaded)
                .count();
            assert_eq!(seed.scan_count, uploaded, "seed {}", seed.name);
        }
    }

    #[test]
    fn test_seed_checklists_carry_full_category_sets() {
        for seed in seed_records() {
            assert_eq!(seed.scan_checklist.len(), ScanCategory::ALL.len());
            assert_eq!(seed.lab_checklist.len(), LabCategory::ALL.len());
        }
    }

    #[test]
    fn test_seed_ages_are_plausible() {
        let seeds = seed_records();
        // John Smith, born 1979; sanity bound rather than an exact value so
        // the test does not rot with the calendar.
        assert!(seeds[0].age >= 45);
        assert!(seeds[0].age < 120);
    }
}
