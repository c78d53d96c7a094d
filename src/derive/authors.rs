use crate::common::types::Infons;

/// Parsed `surname:X;given-names:Y` author infon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorName {
    pub surname: String,
    pub given_names: String,
}

impl AuthorName {
    /// Parse one author infon value.
    ///
    /// Segments are split on `;`, then on the first `:`. Unknown segments and
    /// segments without a `:` are ignored; a missing field stays empty.
    pub fn parse(value: &str) -> Self {
        let mut name = AuthorName::default();

        for segment in value.split(';') {
            let Some((key, field)) = segment.split_once(':') else {
                continue;
            };
            match key.trim() {
                "surname" => name.surname = field.trim().to_string(),
                "given-names" => name.given_names = field.trim().to_string(),
                _ => {}
            }
        }

        name
    }

    /// Display form, "given-names surname", trimmed
    pub fn display(&self) -> String {
        format!("{} {}", self.given_names, self.surname)
            .trim()
            .to_string()
    }
}

/// Author display names from a passage's `name_*` infons, in key order.
/// Names that render empty are dropped.
pub fn authors_from_infons(infons: &Infons<'_>) -> Vec<String> {
    infons
        .author_entries()
        .map(|entry| AuthorName::parse(entry).display())
        .filter(|name| !name.is_empty())
        .collect()
}
