//! Source citations for answers.

use crate::types::{MedicalDocument, SourceCitation};

/// Summary prefix length used when a document has no key findings.
const SUMMARY_EXCERPT_CHARS: usize = 100;

/// Build the citation for one relevant document.
///
/// The excerpt is the first key finding, or else the start of the summary
/// followed by `...`.
pub fn extract_citation(doc: &MedicalDocument) -> SourceCitation {
    let relevant_section = match doc.key_findings.first() {
        Some(finding) => finding.clone(),
        None => {
            let prefix: String = doc.summary.chars().take(SUMMARY_EXCERPT_CHARS).collect();
            format!("{}...", prefix)
        }
    };

    SourceCitation {
        document_id: doc.id.clone(),
        document_title: doc.title.clone(),
        relevant_section,
    }
}

/// Citations for every relevant document, in the same order.
pub fn extract_citations(docs: &[&MedicalDocument]) -> Vec<SourceCitation> {
    docs.iter().map(|doc| extract_citation(doc)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_documents;

    #[test]
    fn test_excerpt_is_first_key_finding() {
        let doc = &sample_documents()[0];
        let citation = extract_citation(doc);

        assert_eq!(citation.document_id, "1");
        assert_eq!(citation.document_title, "Complete Blood Panel");
        assert_eq!(citation.relevant_section, "Vitamin D deficiency (28 ng/mL)");
    }

    #[test]
    fn test_excerpt_falls_back_to_summary_prefix() {
        let mut doc = sample_documents()[1].clone();
        doc.key_findings.clear();
        doc.summary = "é".repeat(150);

        let citation = extract_citation(&doc);
        assert_eq!(citation.relevant_section.chars().count(), 103);
        assert!(citation.relevant_section.ends_with("..."));
    }

    #[test]
    fn test_short_summary_still_marked() {
        let mut doc = sample_documents()[2].clone();
        doc.key_findings.clear();
        doc.summary = "Short".to_string();

        assert_eq!(extract_citation(&doc).relevant_section, "Short...");
    }
}
