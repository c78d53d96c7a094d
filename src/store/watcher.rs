//! Filesystem watch on the corpus directory.
//!
//! A debouncer collects change events until the directory has been quiet for
//! the configured window and hands over one batch. Each batch drops a token
//! into a single-slot channel; a worker thread takes tokens and forces a
//! reload. Batches that arrive while a reload is already queued collapse
//! into it.

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, TrySendError};
use log::{debug, info, warn};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::CorpusStore;

/// Keeps the watch alive. Dropping it stops the debouncer, which closes the
/// channel and lets the worker thread exit.
pub struct CorpusWatcher {
    dir: PathBuf,
    _debouncer: Debouncer<RecommendedWatcher>,
    _worker: JoinHandle<()>,
}

impl CorpusWatcher {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Watch the store's corpus directory and force a reload after each settled
/// batch of changes.
pub fn spawn_corpus_watcher(store: Arc<CorpusStore>) -> Result<CorpusWatcher> {
    let dir = store
        .source()
        .watch_path()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Corpus source has no directory to watch"))?;
    let (tx, rx) = bounded::<()>(1);

    let mut debouncer = new_debouncer(
        store.config().debounce,
        move |res: DebounceEventResult| match res {
            Ok(events) => {
                debug!("Corpus change: {} paths settled", events.len());
                match tx.try_send(()) {
                    Ok(()) | Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Disconnected(())) => debug!("Reload worker gone"),
                }
            }
            Err(e) => warn!("Corpus watch error: {}", e),
        },
    )
    .context("Failed to create file watcher")?;

    debouncer
        .watcher()
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;

    let worker = thread::Builder::new()
        .name("corpus-watcher".to_string())
        .spawn(move || {
            for () in rx.iter() {
                info!("Corpus directory changed, reloading");
                if let Err(e) = store.ensure_loaded(true) {
                    warn!("Reload after corpus change failed: {:#}", e);
                }
            }
            debug!("Corpus watcher stopped");
        })
        .context("Failed to spawn watcher thread")?;

    Ok(CorpusWatcher {
        dir,
        _debouncer: debouncer,
        _worker: worker,
    })
}
