use serde::Serialize;
use serde_json::Value;

use super::authors::authors_from_infons;
use crate::common::types::{DocumentView, JOURNAL_KEY, SECTION_ABSTRACT, SECTION_TITLE, YEAR_KEY};

/// Normalized publication record derived from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub year: String,
    pub journal: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub full_text: String,
    /// Source file name
    pub file: String,
    /// Always empty; kept for response-shape compatibility
    pub citations: Vec<Value>,
    pub related: Vec<String>,
}

/// Build a publication from one document, or `None` when the document has no
/// PMC id, `id`, or PMID.
///
/// The first TITLE passage supplies the title together with authors, year
/// and journal from its infons. The first ABSTRACT passage supplies the
/// abstract. Every other passage contributes its trimmed text to `full_text`.
pub fn extract_publication(doc: &DocumentView<'_>, file: &str) -> Option<Publication> {
    let id = doc.publication_id()?;

    let mut publication = Publication {
        id,
        file: file.to_string(),
        ..Default::default()
    };
    let mut has_title = false;
    let mut has_abstract = false;
    let mut body: Vec<&str> = Vec::new();

    for passage in doc.passages() {
        let section_type = passage.section_type();
        let text = passage.text().unwrap_or("");

        match section_type.as_deref() {
            Some(SECTION_TITLE) if !has_title => {
                has_title = true;
                let infons = passage.infons();
                publication.title = text.to_string();
                publication.authors = authors_from_infons(&infons);
                publication.year = infons.text(YEAR_KEY).unwrap_or_default();
                publication.journal = infons.text(JOURNAL_KEY).unwrap_or_default();
            }
            Some(SECTION_ABSTRACT) if !has_abstract => {
                has_abstract = true;
                publication.abstract_text = text.to_string();
            }
            _ => body.push(text.trim()),
        }
    }

    publication.full_text = body.join("\n\n");
    Some(publication)
}
