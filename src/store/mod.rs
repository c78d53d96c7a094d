//! In-memory corpus store with a time-to-live reload policy.
//!
//! The store holds one `Arc<CorpusSnapshot>` at a time. A reload builds a
//! whole new snapshot off to the side and then replaces the pointer, so
//! readers see either the old generation or the new one, never a mix.

pub mod snapshot;
pub mod watcher;

pub use snapshot::*;
pub use watcher::*;

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use time::OffsetDateTime;

use crate::common::format_elapsed;
use crate::corpus::CorpusSource;

/// Default time after which a loaded corpus is considered stale
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
/// Default quiet window before a filesystem change triggers a reload
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub ttl: Duration,
    pub debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

struct Current {
    snapshot: Arc<CorpusSnapshot>,
    loaded_at: Option<Instant>,
    loaded_at_utc: Option<OffsetDateTime>,
}

pub struct CorpusStore {
    source: Box<dyn CorpusSource>,
    config: StoreConfig,
    current: RwLock<Current>,
    /// Serializes reloads so concurrent triggers do not rebuild twice
    reload_lock: Mutex<()>,
}

impl CorpusStore {
    /// Create a store in the stale state; the first `ensure_loaded` reloads
    pub fn new<S: CorpusSource + 'static>(source: S, config: StoreConfig) -> Self {
        Self {
            source: Box::new(source),
            config,
            current: RwLock::new(Current {
                snapshot: Arc::new(CorpusSnapshot::default()),
                loaded_at: None,
                loaded_at_utc: None,
            }),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn source(&self) -> &dyn CorpusSource {
        self.source.as_ref()
    }

    /// The currently installed snapshot. Never triggers a reload.
    pub fn snapshot(&self) -> Arc<CorpusSnapshot> {
        match self.current.read() {
            Ok(current) => current.snapshot.clone(),
            Err(poisoned) => poisoned.into_inner().snapshot.clone(),
        }
    }

    /// When the installed snapshot finished loading, if ever
    pub fn loaded_at(&self) -> Option<Instant> {
        match self.current.read() {
            Ok(current) => current.loaded_at,
            Err(poisoned) => poisoned.into_inner().loaded_at,
        }
    }

    /// Wall-clock time of the last successful load, for reporting
    pub fn loaded_at_utc(&self) -> Option<OffsetDateTime> {
        match self.current.read() {
            Ok(current) => current.loaded_at_utc,
            Err(poisoned) => poisoned.into_inner().loaded_at_utc,
        }
    }

    /// True when nothing has loaded yet or the TTL has elapsed
    pub fn is_stale(&self) -> bool {
        match self.loaded_at() {
            None => true,
            Some(at) => at.elapsed() > self.config.ttl,
        }
    }

    /// Reload when forced or stale, then return the installed snapshot.
    ///
    /// On failure the previous snapshot stays installed and the load time is
    /// left untouched, so the next call tries again.
    pub fn ensure_loaded(&self, force: bool) -> Result<Arc<CorpusSnapshot>> {
        if !force && !self.is_stale() {
            return Ok(self.snapshot());
        }

        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another caller may have finished a reload while we waited
        if !force && !self.is_stale() {
            debug!("Corpus reloaded by a concurrent caller");
            return Ok(self.snapshot());
        }

        self.reload()
    }

    fn reload(&self) -> Result<Arc<CorpusSnapshot>> {
        let start = Instant::now();
        let generation = self.snapshot().generation() + 1;

        let raw = self.source.load().context("Failed to load corpus")?;
        let snapshot = Arc::new(CorpusSnapshot::build(raw, generation));

        {
            let mut current = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            current.snapshot = snapshot.clone();
            current.loaded_at = Some(Instant::now());
            current.loaded_at_utc = Some(OffsetDateTime::now_utc());
        }

        info!(
            "Corpus generation {} ready: {} files, {} publications in {}",
            generation,
            snapshot.all_data().len(),
            snapshot.publications().len(),
            format_elapsed(start.elapsed())
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawCorpus;
    use anyhow::bail;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        loads: Arc<AtomicUsize>,
        fail: Arc<AtomicBool>,
    }

    impl CorpusSource for CountingSource {
        fn load(&self) -> Result<RawCorpus> {
            if self.fail.load(Ordering::SeqCst) {
                bail!("corpus unavailable");
            }
            let n = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            let mut raw = RawCorpus::new();
            raw.insert(
                format!("load{}.json", n),
                json!({"documents": [{"id": format!("D{}", n), "passages": []}]}),
            );
            Ok(raw)
        }
    }

    fn store_with(ttl: Duration) -> (CorpusStore, Arc<AtomicUsize>, Arc<AtomicBool>) {
        let source = CountingSource::default();
        let loads = source.loads.clone();
        let fail = source.fail.clone();
        let config = StoreConfig { ttl, ..Default::default() };
        (CorpusStore::new(source, config), loads, fail)
    }

    #[test]
    fn test_starts_stale_and_empty() {
        let (store, loads, _) = store_with(DEFAULT_TTL);

        assert!(store.is_stale());
        assert_eq!(store.snapshot().generation(), 0);
        assert!(store.snapshot().publications().is_empty());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ttl_gate_skips_fresh_reload() {
        let (store, loads, _) = store_with(DEFAULT_TTL);

        store.ensure_loaded(false).unwrap();
        store.ensure_loaded(false).unwrap();
        store.ensure_loaded(false).unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(!store.is_stale());
        assert!(store.loaded_at_utc().is_some());
    }

    #[test]
    fn test_reload_after_ttl_elapses() {
        let (store, loads, _) = store_with(Duration::from_millis(30));

        store.ensure_loaded(false).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        let snapshot = store.ensure_loaded(false).unwrap();
        store.ensure_loaded(false).unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(snapshot.generation(), 2);
        assert!(snapshot.find_publication_by_id("D2").is_some());
    }

    #[test]
    fn test_force_always_reloads() {
        let (store, loads, _) = store_with(DEFAULT_TTL);

        store.ensure_loaded(false).unwrap();
        store.ensure_loaded(true).unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let (store, _, fail) = store_with(DEFAULT_TTL);
        store.ensure_loaded(false).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(store.ensure_loaded(true).is_err());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.generation(), 1);
        assert!(snapshot.find_publication_by_id("D1").is_some());
    }

    struct SlowSource {
        loads: Arc<AtomicUsize>,
    }

    impl CorpusSource for SlowSource {
        fn load(&self) -> Result<RawCorpus> {
            std::thread::sleep(Duration::from_millis(200));
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(RawCorpus::new())
        }
    }

    #[test]
    fn test_concurrent_stale_callers_share_one_reload() {
        let loads = Arc::new(AtomicUsize::new(0));
        let source = SlowSource { loads: loads.clone() };
        let store = Arc::new(CorpusStore::new(source, StoreConfig::default()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.ensure_loaded(false).unwrap().generation())
            })
            .collect();
        let generations: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(generations.iter().all(|&g| g == 1));
    }

    #[test]
    fn test_failed_first_load_stays_stale() {
        let (store, loads, fail) = store_with(DEFAULT_TTL);
        fail.store(true, Ordering::SeqCst);

        assert!(store.ensure_loaded(false).is_err());
        assert!(store.is_stale());

        fail.store(false, Ordering::SeqCst);
        store.ensure_loaded(false).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
