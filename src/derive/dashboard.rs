use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::authors::authors_from_infons;
use super::frequency::FrequencyTable;
use crate::common::types::{documents, JOURNAL_KEY, YEAR_KEY};

/// Number of authors kept in the top-authors chart
pub const TOP_AUTHOR_LIMIT: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub section_type_distribution: Vec<NamedCount>,
    pub year_distribution: Vec<YearCount>,
    pub top_authors: Vec<NamedCount>,
}

/// Aggregate metrics for one corpus file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub document_count: usize,
    pub passage_count: usize,
    pub section_type_count: usize,
    pub journal_count: usize,
    pub year_count: usize,
    pub author_count: usize,
    pub section_types: FrequencyTable,
    pub journals: FrequencyTable,
    pub years: FrequencyTable,
    pub charts: DashboardCharts,
}

fn compare_years(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn named_counts(entries: Vec<(&str, usize)>) -> Vec<NamedCount> {
    entries
        .into_iter()
        .map(|(name, count)| NamedCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Walk every document and passage of one file once and aggregate its metrics
pub fn extract_dashboard(file: &Value) -> DashboardMetrics {
    let mut metrics = DashboardMetrics::default();
    let mut authors = FrequencyTable::new();

    for doc in documents(file) {
        metrics.document_count += 1;

        for passage in doc.passages() {
            metrics.passage_count += 1;

            let infons = passage.infons();
            if let Some(section_type) = passage.section_type() {
                metrics.section_types.increment(&section_type);
            }
            if let Some(journal) = infons.non_empty(JOURNAL_KEY) {
                metrics.journals.increment(&journal);
            }
            if let Some(year) = infons.non_empty(YEAR_KEY) {
                metrics.years.increment(&year);
            }
            for author in authors_from_infons(&infons) {
                authors.increment(&author);
            }
        }
    }

    metrics.section_type_count = metrics.section_types.len();
    metrics.journal_count = metrics.journals.len();
    metrics.year_count = metrics.years.len();
    metrics.author_count = authors.len();

    let mut years: Vec<YearCount> = metrics
        .years
        .iter()
        .map(|(year, count)| YearCount {
            year: year.to_string(),
            count,
        })
        .collect();
    years.sort_by(|a, b| compare_years(&a.year, &b.year));

    metrics.charts = DashboardCharts {
        section_type_distribution: named_counts(metrics.section_types.iter().collect()),
        year_distribution: years,
        top_authors: named_counts(authors.top(TOP_AUTHOR_LIMIT)),
    };

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passage(section: &str, year: &str, journal: &str) -> Value {
        json!({"infons": {"section_type": section, "year": year, "journal-title": journal}, "text": "t"})
    }

    #[test]
    fn test_counts_and_frequency_tables() {
        let file = json!([{"documents": [
            {"id": "1", "passages": [passage("TITLE", "2020", "J1"), passage("ABSTRACT", "2020", "J1")]},
            {"id": "2", "passages": [passage("TITLE", "2019", "J2"), {"text": "bare"}]},
        ]}]);

        let metrics = extract_dashboard(&file);

        assert_eq!(metrics.document_count, 2);
        assert_eq!(metrics.passage_count, 4);
        assert_eq!(metrics.section_type_count, 2);
        assert_eq!(metrics.journal_count, 2);
        assert_eq!(metrics.year_count, 2);
        assert_eq!(metrics.section_types.get("TITLE"), 2);
        assert_eq!(metrics.journals.get("J1"), 2);
        assert_eq!(
            metrics.charts.section_type_distribution,
            vec![
                NamedCount { name: "TITLE".into(), count: 2 },
                NamedCount { name: "ABSTRACT".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_year_distribution_sorted_ascending() {
        let file = json!({"documents": [{"passages": [
            passage("A", "2021", "J"),
            passage("A", "999", "J"),
            passage("A", "2019", "J"),
            passage("A", "2021", "J"),
        ]}]});

        let years: Vec<_> = extract_dashboard(&file)
            .charts
            .year_distribution
            .into_iter()
            .map(|y| (y.year, y.count))
            .collect();

        assert_eq!(
            years,
            vec![("999".to_string(), 1), ("2019".to_string(), 1), ("2021".to_string(), 2)]
        );
    }

    #[test]
    fn test_top_authors_ranked_with_stable_ties() {
        let file = json!({"documents": [{"passages": [
            {"infons": {"name_0": "surname:Zed;given-names:A", "name_1": "surname:Young;given-names:B"}},
            {"infons": {"name_0": "surname:Young;given-names:B", "name_1": "surname:Xu;given-names:C"}},
            {"infons": {"name_0": "given-names:;surname:"}},
        ]}]});

        let metrics = extract_dashboard(&file);

        assert_eq!(metrics.author_count, 3);
        let top: Vec<_> = metrics.charts.top_authors.iter().map(|a| (a.name.as_str(), a.count)).collect();
        assert_eq!(top, vec![("B Young", 2), ("A Zed", 1), ("C Xu", 1)]);
    }

    #[test]
    fn test_top_authors_capped() {
        let passages: Vec<Value> = (0..40)
            .map(|i| json!({"infons": {"name_0": format!("surname:S{};given-names:G", i)}}))
            .collect();
        let file = json!({"documents": [{"passages": passages}]});

        let metrics = extract_dashboard(&file);
        assert_eq!(metrics.author_count, 40);
        assert_eq!(metrics.charts.top_authors.len(), TOP_AUTHOR_LIMIT);
        assert_eq!(metrics.charts.top_authors[0].name, "G S0");
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(extract_dashboard(&json!({"documents": []}))).unwrap();
        assert_eq!(value["documentCount"], 0);
        assert_eq!(value["passageCount"], 0);
        assert!(value["charts"]["topAuthors"].is_array());
        assert!(value["sectionTypes"].is_object());
    }
}
