//! Borrowed views over raw BioC JSON.
//!
//! Corpus files are kept as `serde_json::Value` so `/api/data` can return them
//! untouched. The derivation steps read them through these views, which turn
//! every missing or mistyped field into an empty default instead of an error.

use serde_json::{Map, Value};

/// Infon key holding a PubMed Central identifier
pub const PMC_ID_KEY: &str = "article-id_pmc";
/// Infon key holding a PubMed identifier
pub const PMID_KEY: &str = "article-id_pmid";
/// Infon key holding a passage's section type
pub const SECTION_TYPE_KEY: &str = "section_type";
/// Infon key holding the publication year
pub const YEAR_KEY: &str = "year";
/// Infon key holding the journal title
pub const JOURNAL_KEY: &str = "journal-title";
/// Prefix shared by every author infon key (`name_0`, `name_1`, ...)
pub const AUTHOR_KEY_PREFIX: &str = "name_";

pub const SECTION_TITLE: &str = "TITLE";
pub const SECTION_ABSTRACT: &str = "ABSTRACT";

static EMPTY_MAP: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

/// Render a scalar JSON value as text. Strings are returned as-is, numbers and
/// booleans are formatted, anything else counts as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn object_field<'a>(value: &'a Value, key: &str) -> &'a Map<String, Value> {
    value
        .get(key)
        .and_then(Value::as_object)
        .unwrap_or(&*EMPTY_MAP)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Iterate the root objects of one corpus file. A file holds either a single
/// root object or an array of them; any other shape has no roots.
pub fn roots(file: &Value) -> impl Iterator<Item = &Value> {
    let slice: &[Value] = match file {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(file),
        _ => &[],
    };
    slice.iter().filter(|root| root.is_object())
}

/// Iterate every document of one corpus file, across all of its roots
pub fn documents(file: &Value) -> impl Iterator<Item = DocumentView<'_>> {
    roots(file)
        .flat_map(|root| array_field(root, "documents").iter())
        .map(DocumentView)
}

/// A map of string-ish infons
#[derive(Debug, Clone, Copy)]
pub struct Infons<'a>(pub &'a Map<String, Value>);

impl<'a> Infons<'a> {
    /// Text value of one infon, if present and scalar
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    /// Text value of one infon, treating an empty string as absent
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.is_empty())
    }

    /// Author infon values in key order
    pub fn author_entries(&self) -> impl Iterator<Item = &'a str> {
        let map: &'a Map<String, Value> = self.0;
        map.iter()
            .filter(|(key, _)| key.starts_with(AUTHOR_KEY_PREFIX))
            .filter_map(|(_, value)| value.as_str())
    }

    pub fn raw(&self) -> &'a Map<String, Value> {
        self.0
    }
}

/// A BioC document: `{ id, infons, passages }`
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a>(pub &'a Value);

impl<'a> DocumentView<'a> {
    /// The document's own `id` field
    pub fn id(&self) -> Option<String> {
        self.0
            .get("id")
            .and_then(scalar_text)
            .filter(|s| !s.is_empty())
    }

    pub fn infons(&self) -> Infons<'a> {
        Infons(object_field(self.0, "infons"))
    }

    pub fn passages(&self) -> impl Iterator<Item = PassageView<'a>> {
        array_field(self.0, "passages").iter().map(PassageView)
    }

    pub fn passage_count(&self) -> usize {
        array_field(self.0, "passages").len()
    }

    /// Identifier used for publications: PMC id, then `id`, then PMID
    pub fn publication_id(&self) -> Option<String> {
        let infons = self.infons();
        infons
            .non_empty(PMC_ID_KEY)
            .or_else(|| self.id())
            .or_else(|| infons.non_empty(PMID_KEY))
    }

    /// Identifier used for inspector records: `id`, then PMC id
    pub fn record_id(&self) -> Option<String> {
        self.id().or_else(|| self.infons().non_empty(PMC_ID_KEY))
    }
}

/// A BioC passage: `{ offset, text, infons }`
#[derive(Debug, Clone, Copy)]
pub struct PassageView<'a>(pub &'a Value);

impl<'a> PassageView<'a> {
    pub fn infons(&self) -> Infons<'a> {
        Infons(object_field(self.0, "infons"))
    }

    pub fn section_type(&self) -> Option<String> {
        self.infons().non_empty(SECTION_TYPE_KEY)
    }

    pub fn text(&self) -> Option<&'a str> {
        self.0.get("text").and_then(Value::as_str)
    }

    pub fn offset(&self) -> i64 {
        self.0.get("offset").and_then(Value::as_i64).unwrap_or(0)
    }

    /// Length of the passage text in characters, 0 when absent
    pub fn text_len(&self) -> usize {
        self.text().map(|t| t.chars().count()).unwrap_or(0)
    }
}
