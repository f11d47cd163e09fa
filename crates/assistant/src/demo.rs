//! Built-in sample records for demos and tests.

use crate::types::{ClinicalStatus, DocumentCategory, MedicalDocument};
use chrono::NaiveDate;

/// Identity that owns the sample records.
pub const DEMO_PATIENT: &str = "demo";

fn record_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample record dates are valid")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three records of a patient under hypertension follow-up: a blood panel,
/// a cardiology visit and the resulting prescription list.
pub fn sample_documents() -> Vec<MedicalDocument> {
    vec![
        MedicalDocument {
            id: "1".to_string(),
            title: "Complete Blood Panel".to_string(),
            category: DocumentCategory::LabResult,
            date: record_date(2024, 1, 15),
            doctor: "Dr. Sarah Johnson".to_string(),
            department: "Laboratory".to_string(),
            status: ClinicalStatus::Normal,
            summary: "All blood work values within normal ranges except vitamin D deficiency"
                .to_string(),
            content: "Complete blood count, comprehensive metabolic panel, lipid panel, and \
                      vitamin D levels tested. Vitamin D level: 28 ng/mL (insufficient, normal \
                      range 30-100 ng/mL). All other values normal."
                .to_string(),
            key_findings: strings(&[
                "Vitamin D deficiency (28 ng/mL)",
                "Normal cholesterol levels",
                "Normal blood glucose",
            ]),
            recommendations: strings(&[
                "Vitamin D3 supplementation 2000 IU daily",
                "Increase sun exposure",
                "Follow-up in 3 months",
            ]),
        },
        MedicalDocument {
            id: "2".to_string(),
            title: "Cardiology Visit Summary".to_string(),
            category: DocumentCategory::VisitSummary,
            date: record_date(2024, 1, 10),
            doctor: "Dr. Michael Brown".to_string(),
            department: "Cardiology".to_string(),
            status: ClinicalStatus::Normal,
            summary: "Routine cardiology follow-up for hypertension management".to_string(),
            content: "Patient presents for routine follow-up of hypertension. Blood pressure \
                      today: 142/88 mmHg. Patient reports good medication compliance. Discussed \
                      lifestyle modifications."
                .to_string(),
            key_findings: strings(&[
                "Blood pressure 142/88 mmHg",
                "Good medication compliance",
                "No chest pain or shortness of breath",
            ]),
            recommendations: strings(&[
                "Continue current medications",
                "Reduce sodium intake",
                "Regular exercise 30 min/day",
                "Weight management",
                "Follow-up in 6 weeks",
            ]),
        },
        MedicalDocument {
            id: "3".to_string(),
            title: "Current Prescriptions".to_string(),
            category: DocumentCategory::Prescription,
            date: record_date(2024, 1, 10),
            doctor: "Dr. Michael Brown".to_string(),
            department: "Cardiology".to_string(),
            status: ClinicalStatus::Normal,
            summary: "Updated prescription list following cardiology visit".to_string(),
            content: "Lisinopril 10mg once daily for hypertension. Atorvastatin 20mg once daily \
                      for cholesterol management. Aspirin 81mg once daily for cardiovascular \
                      protection."
                .to_string(),
            key_findings: strings(&[
                "Lisinopril 10mg daily",
                "Atorvastatin 20mg daily",
                "Aspirin 81mg daily",
            ]),
            recommendations: strings(&[
                "Take medications as prescribed",
                "Monitor for side effects",
                "Do not stop without consulting doctor",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_documents_are_valid() {
        let docs = sample_documents();
        assert_eq!(docs.len(), 3);
        for doc in &docs {
            doc.validate().unwrap();
        }
        assert_eq!(docs[0].date.to_string(), "2024-01-15");
        assert_eq!(docs[1].date.to_string(), "2024-01-10");
        assert_eq!(docs[2].date.to_string(), "2024-01-10");
    }
}
