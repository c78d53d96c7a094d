pub mod builder;

pub use builder::*;

use std::collections::HashMap;

use crate::derive::Publication;

/// Maximum number of related ids attached to one publication
pub const RELATED_LIMIT: usize = 10;

/// Publications in encounter order, plus an id lookup
#[derive(Debug, Clone, Default)]
pub struct PublicationIndex {
    /// All publications in file-then-document order
    publications: Vec<Publication>,
    /// Id -> position in `publications`; a repeated id points at its last occurrence
    by_id: HashMap<String, usize>,
}

impl PublicationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a publication and index it by id
    pub fn insert(&mut self, publication: Publication) {
        self.by_id
            .insert(publication.id.clone(), self.publications.len());
        self.publications.push(publication);
    }

    pub fn get(&self, id: &str) -> Option<&Publication> {
        self.by_id.get(id).map(|&pos| &self.publications[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn as_slice(&self) -> &[Publication] {
        &self.publications
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Number of distinct ids
    pub fn id_count(&self) -> usize {
        self.by_id.len()
    }

    /// Link publications that share an exact `(journal, year)` pair.
    ///
    /// Each publication gets up to `RELATED_LIMIT` other ids from its group,
    /// in encounter order. No normalization is applied, so publications with
    /// an empty journal or year share one group.
    pub fn link_related(&mut self) {
        let mut groups: HashMap<(&str, &str), Vec<&str>> = HashMap::new();
        for publication in &self.publications {
            groups
                .entry((publication.journal.as_str(), publication.year.as_str()))
                .or_default()
                .push(publication.id.as_str());
        }

        let related: Vec<Vec<String>> = self
            .publications
            .iter()
            .map(|publication| {
                groups[&(publication.journal.as_str(), publication.year.as_str())]
                    .iter()
                    .filter(|&&id| id != publication.id)
                    .take(RELATED_LIMIT)
                    .map(|id| id.to_string())
                    .collect()
            })
            .collect();

        for (publication, related) in self.publications.iter_mut().zip(related) {
            publication.related = related;
        }
    }
}
