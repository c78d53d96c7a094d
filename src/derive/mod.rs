//! Derived views over a raw corpus: dashboard metrics, the inspector
//! hierarchy, and publication records.

pub mod authors;
pub mod dashboard;
pub mod frequency;
pub mod inspector;
pub mod publications;

pub use authors::{authors_from_infons, AuthorName};
pub use dashboard::{extract_dashboard, DashboardMetrics};
pub use frequency::FrequencyTable;
pub use inspector::{extract_inspector, DocEntry, Hierarchy, InspectorFile, PassageSummary};
pub use publications::{extract_publication, Publication};

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::corpus::RawCorpus;

/// Per-file derivations for one corpus
#[derive(Debug, Clone, Default)]
pub struct PerFileViews {
    pub dashboards: BTreeMap<String, DashboardMetrics>,
    pub inspector: BTreeMap<String, InspectorFile>,
}

/// Compute dashboard and inspector views for every file. Files are
/// independent, so they are processed in parallel.
pub fn derive_per_file(raw: &RawCorpus) -> PerFileViews {
    let derived: Vec<(String, DashboardMetrics, InspectorFile)> = raw
        .par_iter()
        .map(|(name, file)| (name.clone(), extract_dashboard(file), extract_inspector(file)))
        .collect();

    let mut views = PerFileViews::default();
    for (name, dashboard, inspector) in derived {
        views.dashboards.insert(name.clone(), dashboard);
        views.inspector.insert(name, inspector);
    }
    views
}
