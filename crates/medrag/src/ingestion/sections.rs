//! Structural splitting of a document into titled sections

use crate::types::{RawDocument, Section};

/// Heading prefix that delimits sections in normalized document text
pub const SECTION_MARKER: &str = "##";

/// Splits cleaned document text on the structural marker
pub struct SectionSplitter;

impl SectionSplitter {
    /// Split a document into sections in reading order.
    ///
    /// Each non-empty segment contributes one section: its first line
    /// (trimmed) is the title, the remaining lines are the body. Segments
    /// whose title trims to nothing are dropped. A document without any
    /// marker yields a single section covering the whole text.
    pub fn split(doc: &RawDocument) -> Vec<Section> {
        let mut sections = Vec::new();

        for raw in doc.text.split(SECTION_MARKER) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let (title, body) = match raw.split_once('\n') {
                Some((first, rest)) => (first.trim(), rest.trim()),
                None => (raw, ""),
            };

            if title.is_empty() {
                continue;
            }

            sections.push(Section {
                title: title.to_string(),
                body: body.to_string(),
                meta: doc.meta.clone(),
            });
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocMeta;

    fn doc(text: &str) -> RawDocument {
        RawDocument::new(
            DocMeta {
                document_id: "nci_overview".to_string(),
                source: "nci_overview.pdf".to_string(),
                domain: "Oncology".to_string(),
                language: "en".to_string(),
            },
            text.to_string(),
            None,
        )
    }

    #[test]
    fn splits_on_marker_into_title_and_body() {
        let sections = SectionSplitter::split(&doc(
            "## RISK FACTORS\nAge and family history.\n## SCREENING\nMammography every two years.",
        ));

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "RISK FACTORS");
        assert_eq!(sections[0].body, "Age and family history.");
        assert_eq!(sections[1].title, "SCREENING");
        assert_eq!(sections[1].body, "Mammography every two years.");
    }

    #[test]
    fn section_order_follows_reading_order() {
        let sections =
            SectionSplitter::split(&doc("## A\nfirst\n## B\nsecond\n## C\nthird"));
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn drops_segments_with_empty_titles() {
        let sections = SectionSplitter::split(&doc("## \n\n## DIAGNOSIS\nBiopsy confirms."));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "DIAGNOSIS");
    }

    #[test]
    fn no_marker_yields_single_whole_document_section() {
        let sections = SectionSplitter::split(&doc(
            "Breast cancer overview.\nIncidence rises with age.",
        ));

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Breast cancer overview.");
        assert_eq!(sections[0].body, "Incidence rises with age.");
    }

    #[test]
    fn title_only_section_has_empty_body() {
        let sections = SectionSplitter::split(&doc("## GLOSSARY"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "GLOSSARY");
        assert_eq!(sections[0].body, "");
    }

    #[test]
    fn sections_inherit_document_metadata() {
        let sections = SectionSplitter::split(&doc("## STAGING\nTNM system."));
        assert_eq!(sections[0].meta.document_id, "nci_overview");
        assert_eq!(sections[0].meta.domain, "Oncology");
    }
}
