pub mod serve;
pub mod show;
pub mod summary;

pub use serve::run_serve;
pub use show::run_show;
pub use summary::run_summary;

use log::{error, info};
use std::path::PathBuf;

use crate::cli::CorpusArgs;
use crate::corpus::resolve_corpus_dir;

/// Size the global rayon pool used for per-file derivation
fn configure_threads(threads: usize) {
    let num_threads = if threads == 0 {
        let cores = num_cpus::get();
        info!("Auto-detected {} CPU cores. Using {} threads.", cores, cores);
        cores
    } else {
        info!("Using specified {} threads.", threads);
        threads
    };

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        error!("Failed to build thread pool: {}. Using default.", e);
    }
}

/// Shared startup for corpus commands: threads, then directory resolution
fn prepare_corpus(args: &CorpusArgs) -> PathBuf {
    configure_threads(args.threads);
    let dir = resolve_corpus_dir(args.data_dir.as_deref());
    info!("Corpus directory: {}", dir.display());
    dir
}
