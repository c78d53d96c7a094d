use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::common::types::documents;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectorMetadata {
    pub documents: usize,
    pub passages: usize,
}

/// One document as listed by the inspector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocEntry {
    pub id: Option<String>,
    /// Number of passages in the document
    pub passages: usize,
    pub infons: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageSummary {
    pub section_type: Option<String>,
    pub offset: i64,
    pub length: usize,
}

/// Passage summaries keyed by document id, in the order documents were
/// first seen. A repeated id keeps its first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    entries: Vec<(String, Vec<PassageSummary>)>,
    positions: HashMap<String, usize>,
}

impl Hierarchy {
    /// Add `id` unless it is already present; returns whether it was added
    pub fn insert_first(&mut self, id: String, summaries: Vec<PassageSummary>) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id.clone(), self.entries.len());
        self.entries.push((id, summaries));
        true
    }

    pub fn get(&self, id: &str) -> Option<&[PassageSummary]> {
        self.positions
            .get(id)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

impl Serialize for Hierarchy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, summaries) in &self.entries {
            map.serialize_entry(id, summaries)?;
        }
        map.end()
    }
}

/// Per-file document/passage hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InspectorFile {
    pub metadata: InspectorMetadata,
    pub records: Vec<DocEntry>,
    /// Documents without any id appear in `records` only
    pub hierarchy: Hierarchy,
}

pub fn extract_inspector(file: &Value) -> InspectorFile {
    let mut inspector = InspectorFile::default();

    for doc in documents(file) {
        let summaries: Vec<PassageSummary> = doc
            .passages()
            .map(|passage| PassageSummary {
                section_type: passage.section_type(),
                offset: passage.offset(),
                length: passage.text_len(),
            })
            .collect();

        let id = doc.record_id();
        inspector.metadata.documents += 1;
        inspector.metadata.passages += summaries.len();
        inspector.records.push(DocEntry {
            id: id.clone(),
            passages: summaries.len(),
            infons: doc.infons().raw().clone(),
        });

        if let Some(id) = id {
            inspector.hierarchy.insert_first(id, summaries);
        }
    }

    inspector
}

impl InspectorFile {
    /// First record whose id equals `id`, with its passage summaries
    pub fn find(&self, id: &str) -> Option<(&DocEntry, &[PassageSummary])> {
        let record = self.records.iter().find(|r| r.id.as_deref() == Some(id))?;
        let passages = self.hierarchy.get(id).unwrap_or(&[]);
        Some((record, passages))
    }
}
