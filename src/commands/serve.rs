use anyhow::{Context, Result};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use super::prepare_corpus;
use crate::cli::ServeArgs;
use crate::common::setup_logging;
use crate::corpus::DirectorySource;
use crate::server::run_server;
use crate::store::{spawn_corpus_watcher, CorpusStore, StoreConfig};

pub async fn run_serve_async(args: ServeArgs) -> Result<()> {
    let dir = prepare_corpus(&args.corpus);

    let config = StoreConfig {
        ttl: Duration::from_secs(args.ttl_secs),
        debounce: Duration::from_millis(args.debounce_ms),
    };
    info!("Reload TTL: {}s", config.ttl.as_secs());

    let store = Arc::new(CorpusStore::new(DirectorySource::new(&dir), config));

    // Eager first load so the first request is served warm
    let initial = store.clone();
    tokio::task::spawn_blocking(move || initial.ensure_loaded(false))
        .await
        .context("Initial corpus load panicked")?
        .context("Initial corpus load failed")?;

    let _watcher = if args.no_watch {
        info!("Directory watching disabled");
        None
    } else {
        match spawn_corpus_watcher(store.clone()) {
            Ok(watcher) => {
                info!(
                    "Watching {} (debounce {}ms)",
                    watcher.dir().display(),
                    config.debounce.as_millis()
                );
                Some(watcher)
            }
            Err(e) => {
                warn!("Corpus directory will not be watched: {:#}", e);
                None
            }
        }
    };

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    run_server(store, addr).await
}

/// Run the serve command with the given arguments
pub fn run_serve(args: ServeArgs) -> Result<()> {
    setup_logging(&args.corpus.log_level)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_serve_async(args))
}
