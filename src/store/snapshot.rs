use serde::Serialize;
use std::collections::BTreeMap;

use crate::corpus::RawCorpus;
use crate::derive::{derive_per_file, DashboardMetrics, DocEntry, InspectorFile, PassageSummary, Publication};
use crate::index::{build_publication_index, PublicationIndex};

/// One complete generation of corpus data: the raw files and every
/// structure derived from them. Built in full, then swapped in as a unit.
#[derive(Debug, Default)]
pub struct CorpusSnapshot {
    generation: u64,
    raw: RawCorpus,
    dashboards: BTreeMap<String, DashboardMetrics>,
    inspector: BTreeMap<String, InspectorFile>,
    publications: PublicationIndex,
}

/// Inspector record found by id, with the file that holds it
#[derive(Debug, Clone, Serialize)]
pub struct RecordMatch<'a> {
    pub file: &'a str,
    pub record: &'a DocEntry,
    pub passages: &'a [PassageSummary],
}

/// Single-key response wrapper, `{"publication": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct PublicationEnvelope<'a> {
    pub publication: &'a Publication,
}

impl CorpusSnapshot {
    /// Derive every view from `raw`
    pub fn build(raw: RawCorpus, generation: u64) -> Self {
        let per_file = derive_per_file(&raw);
        let publications = build_publication_index(&raw);

        Self {
            generation,
            raw,
            dashboards: per_file.dashboards,
            inspector: per_file.inspector,
            publications,
        }
    }

    /// Reload counter; 0 means nothing has been loaded yet
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn all_data(&self) -> &RawCorpus {
        &self.raw
    }

    pub fn dashboards(&self) -> &BTreeMap<String, DashboardMetrics> {
        &self.dashboards
    }

    pub fn inspector(&self) -> &BTreeMap<String, InspectorFile> {
        &self.inspector
    }

    pub fn publications(&self) -> &[Publication] {
        self.publications.as_slice()
    }

    /// Linear scan over every file's inspector records, in file order
    pub fn find_record(&self, id: &str) -> Option<RecordMatch<'_>> {
        self.inspector.iter().find_map(|(file, inspector)| {
            inspector.find(id).map(|(record, passages)| RecordMatch {
                file: file.as_str(),
                record,
                passages,
            })
        })
    }

    pub fn find_publication_by_id(&self, id: &str) -> Option<&Publication> {
        self.publications.get(id)
    }

    /// Wrap a found publication; a miss passes through as `None`
    pub fn publication_envelope(publication: Option<&Publication>) -> Option<PublicationEnvelope<'_>> {
        publication.map(|publication| PublicationEnvelope { publication })
    }
}
