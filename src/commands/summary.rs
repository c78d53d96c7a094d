use anyhow::Result;
use log::info;
use std::time::Instant;

use super::prepare_corpus;
use crate::cli::SummaryArgs;
use crate::common::{create_spinner, format_elapsed, setup_logging};
use crate::corpus::load_all;
use crate::store::CorpusSnapshot;

/// Corpus totals reported by the summary command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub documents: usize,
    pub passages: usize,
    pub publications: usize,
}

/// Run the summary command with the given arguments
pub fn run_summary(args: SummaryArgs) -> Result<SummaryStats> {
    let start_time = Instant::now();

    setup_logging(&args.corpus.log_level)?;
    let dir = prepare_corpus(&args.corpus);

    let spinner = create_spinner("Loading corpus...");
    let report = load_all(&dir)?;
    let files_skipped = report.skipped.len();

    spinner.set_message("Deriving views...");
    let snapshot = CorpusSnapshot::build(report.files, 1);
    spinner.finish_with_message("Corpus ready");

    let mut stats = SummaryStats {
        files_loaded: snapshot.all_data().len(),
        files_skipped,
        publications: snapshot.publications().len(),
        ..Default::default()
    };

    for (file, metrics) in snapshot.dashboards() {
        stats.documents += metrics.document_count;
        stats.passages += metrics.passage_count;

        info!("{}:", file);
        info!("  Documents: {}", metrics.document_count);
        info!("  Passages: {}", metrics.passage_count);
        info!(
            "  Section types: {} | Journals: {} | Years: {} | Authors: {}",
            metrics.section_type_count,
            metrics.journal_count,
            metrics.year_count,
            metrics.author_count
        );
        if let Some(top) = metrics.charts.top_authors.first() {
            info!("  Top author: {} ({})", top.name, top.count);
        }
    }

    info!("==================== CORPUS SUMMARY ====================");
    info!("Directory: {}", dir.display());
    info!("Files loaded: {}", stats.files_loaded);
    if stats.files_skipped > 0 {
        info!("Files skipped: {}", stats.files_skipped);
    }
    info!("Documents: {}", stats.documents);
    info!("Passages: {}", stats.passages);
    info!("Publications: {}", stats.publications);
    info!("Total time: {}", format_elapsed(start_time.elapsed()));
    info!("========================================================");

    Ok(stats)
}
