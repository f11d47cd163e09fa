//! Rule-table answer generator.
//!
//! Produces fixed narrative answers for a handful of question shapes. The
//! clinical figures in the vitamin D and blood pressure narratives are part
//! of the templates, not read from the documents.

use super::{AnswerGenerator, FALLBACK_ANSWER};
use crate::types::{DocumentCategory, MedicalDocument, Message};
use medassist_core::AppResult;

/// Deterministic generator driven by an ordered rule table.
#[derive(Debug, Default, Clone)]
pub struct TemplateAnswerGenerator;

impl TemplateAnswerGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Apply the rules in priority order; the first one that fires wins.
    pub fn render(&self, query: &str, relevant: &[&MedicalDocument]) -> String {
        if relevant.is_empty() {
            return FALLBACK_ANSWER.to_string();
        }

        let query_lower = query.to_lowercase();
        let first_of = |category: DocumentCategory| {
            relevant.iter().copied().find(|doc| doc.category == category)
        };

        if query_lower.contains("vitamin d") {
            if let Some(lab) = first_of(DocumentCategory::LabResult) {
                return vitamin_d_answer(lab);
            }
        }

        if query_lower.contains("last visit") || query_lower.contains("recommendation") {
            if let Some(visit) = first_of(DocumentCategory::VisitSummary) {
                return visit_answer(visit);
            }
        }

        if query_lower.contains("blood pressure") {
            return BLOOD_PRESSURE_ANSWER.to_string();
        }

        if query_lower.contains("prescription") || query_lower.contains("medication") {
            if let Some(prescription) = first_of(DocumentCategory::Prescription) {
                return prescription_answer(prescription);
            }
        }

        generic_answer(relevant)
    }
}

const BLOOD_PRESSURE_ANSWER: &str = "Your recent blood pressure readings show an average of \
142/88 mmHg, which is in the Stage 1 hypertension range. Your doctor recommended lifestyle \
modifications including reducing sodium intake to less than 2300mg daily, regular exercise \
(30 minutes, 5 days per week), and weight management. A follow-up appointment was scheduled \
to monitor your progress.";

fn vitamin_d_answer(lab: &MedicalDocument) -> String {
    format!(
        "Based on your recent lab results from {}, your vitamin D level was 28 ng/mL. Your \
         doctor noted that this is in the insufficient range (normal is 30-100 ng/mL) and \
         recommended vitamin D3 supplementation of 2000 IU daily. They also suggested increasing \
         sun exposure and consuming vitamin D-rich foods.",
        lab.date
    )
}

fn visit_answer(visit: &MedicalDocument) -> String {
    format!(
        "From your last visit on {} with {}, the main recommendations were: {}. The visit \
         summary noted: {}",
        visit.date,
        visit.doctor,
        visit.recommendations.join(", "),
        visit.summary
    )
}

fn prescription_answer(prescription: &MedicalDocument) -> String {
    format!(
        "Your current prescriptions include the medications listed in your {} prescription. \
         Please take all medications as directed and contact your pharmacy or doctor if you \
         have any questions about dosage or side effects.",
        prescription.date
    )
}

fn generic_answer(relevant: &[&MedicalDocument]) -> String {
    let doc_info = relevant
        .iter()
        .map(|doc| format!("{} ({})", doc.title, doc.date))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Based on your medical records including {}, I found relevant information. However, for \
         specific medical advice and interpretation, please consult directly with your \
         healthcare provider.",
        doc_info
    )
}

#[async_trait::async_trait]
impl AnswerGenerator for TemplateAnswerGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(
        &self,
        query: &str,
        relevant: &[&MedicalDocument],
        _transcript: &[Message],
    ) -> AppResult<String> {
        Ok(self.render(query, relevant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_documents;

    fn render(query: &str, docs: &[MedicalDocument]) -> String {
        let relevant: Vec<&MedicalDocument> = docs.iter().collect();
        TemplateAnswerGenerator::new().render(query, &relevant)
    }

    #[test]
    fn test_fallback_without_documents() {
        assert_eq!(
            TemplateAnswerGenerator::new().render("vitamin d", &[]),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn test_vitamin_d_uses_lab_date() {
        let docs = sample_documents();
        let answer = render("What about my Vitamin D?", &docs[..1]);
        assert!(answer.starts_with("Based on your recent lab results from 2024-01-15"));
        assert!(answer.contains("28 ng/mL"));
    }

    #[test]
    fn test_vitamin_d_without_lab_falls_through() {
        let docs = sample_documents();
        let answer = render("vitamin d", &docs[1..2]);
        assert!(answer.starts_with("Based on your medical records including Cardiology Visit Summary (2024-01-10)"));
    }

    #[test]
    fn test_last_visit_interpolates_fields() {
        let docs = sample_documents();
        let answer = render("What happened at my last visit?", &docs[1..2]);
        assert!(answer.contains("on 2024-01-10 with Dr. Michael Brown"));
        assert!(answer.contains("Continue current medications, Reduce sodium intake"));
        assert!(answer.ends_with("Routine cardiology follow-up for hypertension management"));
    }

    #[test]
    fn test_blood_pressure_needs_no_specific_category() {
        let docs = sample_documents();
        assert_eq!(render("blood pressure", &docs[2..]), BLOOD_PRESSURE_ANSWER);
    }

    #[test]
    fn test_medication_answer() {
        let docs = sample_documents();
        let answer = render("Which medications do I take?", &docs[2..]);
        assert!(answer.contains("listed in your 2024-01-10 prescription"));
    }

    #[test]
    fn test_recommendation_keyword_selects_visit_answer() {
        let docs = sample_documents();
        let answer = render("any recommendations?", &docs[1..2]);
        assert!(answer.starts_with("From your last visit on 2024-01-10 with Dr. Michael Brown"));
    }

    #[test]
    fn test_prescription_keyword_selects_prescription_answer() {
        let docs = sample_documents();
        let answer = render("my prescription", &docs[2..]);
        assert!(answer.contains("listed in your 2024-01-10 prescription"));
    }

    #[test]
    fn test_vitamin_d_rule_beats_blood_pressure() {
        let docs = sample_documents();
        let answer = render("vitamin d and blood pressure", &docs[..2]);
        assert!(answer.starts_with("Based on your recent lab results from 2024-01-15"));
        assert_ne!(answer, BLOOD_PRESSURE_ANSWER);
    }

    #[test]
    fn test_visit_rule_beats_blood_pressure() {
        let docs = sample_documents();
        let answer = render("blood pressure at my last visit", &docs[1..2]);
        assert!(answer.starts_with("From your last visit on 2024-01-10"));
    }

    #[test]
    fn test_blood_pressure_rule_beats_prescription() {
        let docs = sample_documents();
        let answer = render("blood pressure and my prescription", &docs[1..]);
        assert_eq!(answer, BLOOD_PRESSURE_ANSWER);
    }

    #[test]
    fn test_generic_lists_titles_and_dates() {
        let docs = sample_documents();
        let answer = render("cholesterol", &[docs[0].clone(), docs[2].clone()]);
        assert!(answer.contains(
            "Complete Blood Panel (2024-01-15), Current Prescriptions (2024-01-10)"
        ));
        assert!(answer.contains("consult directly with your healthcare provider"));
    }

    #[tokio::test]
    async fn test_generate_ignores_transcript() {
        let docs = sample_documents();
        let relevant: Vec<&MedicalDocument> = docs.iter().collect();
        let history = vec![Message::user("1", "hello")];

        let generator = TemplateAnswerGenerator::new();
        let with_history = generator.generate("lab", &relevant, &history).await.unwrap();
        let without = generator.generate("lab", &relevant, &[]).await.unwrap();
        assert_eq!(with_history, without);
    }
}
