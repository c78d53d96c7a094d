use log::debug;

use super::PublicationIndex;
use crate::common::types::documents;
use crate::corpus::RawCorpus;
use crate::derive::extract_publication;

/// Build the publication index from a raw corpus.
///
/// Files are visited in name order and documents in file order; that order
/// is the order `/api/publications` returns. Documents without an identifier
/// are skipped. Related links are computed once every publication is known.
pub fn build_publication_index(raw: &RawCorpus) -> PublicationIndex {
    let mut index = PublicationIndex::new();
    let mut dropped = 0usize;

    for (file_name, file) in raw {
        for doc in documents(file) {
            match extract_publication(&doc, file_name) {
                Some(publication) => index.insert(publication),
                None => dropped += 1,
            }
        }
    }

    index.link_related();

    debug!(
        "Indexed {} publications ({} documents without an identifier)",
        index.len(),
        dropped
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_index_in_encounter_order() {
        let mut raw = RawCorpus::new();
        raw.insert(
            "b.json".to_string(),
            json!({"documents": [{"id": "B1", "passages": []}]}),
        );
        raw.insert(
            "a.json".to_string(),
            json!([
                {"documents": [{"id": "A1", "passages": []}, {"passages": []}]},
                {"documents": [{"infons": {"article-id_pmid": "7"}, "passages": []}]},
            ]),
        );

        let index = build_publication_index(&raw);

        let ids: Vec<_> = index.as_slice().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "7", "B1"]);
        assert_eq!(index.get("B1").unwrap().file, "b.json");
    }

    #[test]
    fn test_build_index_links_across_files() {
        let title = |id: &str| {
            json!({"id": id, "passages": [
                {"infons": {"section_type": "TITLE", "year": "2020", "journal-title": "J1"}, "text": id}
            ]})
        };
        let mut raw = RawCorpus::new();
        raw.insert("a.json".to_string(), json!({"documents": [title("A")]}));
        raw.insert("b.json".to_string(), json!({"documents": [title("B")]}));

        let index = build_publication_index(&raw);

        assert_eq!(index.get("A").unwrap().related, vec!["B"]);
        assert_eq!(index.get("B").unwrap().related, vec!["A"]);
    }
}
