//! Catalog refresh scheduling.
//!
//! Owns catalog freshness: decides when to ask the deal source for a
//! re-scrape, coalesces concurrent triggers to a single in-flight scrape,
//! and keeps the last-known-good catalog through transient failures.

use crate::error::CatalogError;
use crate::sample::sample_catalog;
use crate::source::DealSource;
use airtime_commerce::deal::Deal;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// How long a recorded refresh stays fresh.
pub const STALENESS_THRESHOLD: Duration = Duration::from_secs(24 * 60 * 60);

/// Grace period between a successful scrape trigger and the catalog
/// re-fetch, giving the source time to persist the new scrape.
pub const RELOAD_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Refresh lifecycle state. `Refreshing` is the single-flight guard: a
/// trigger arriving in that state is dropped, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Idle,
    Refreshing,
    Completed,
}

/// Outcome of a trigger request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The scrape ran and the catalog was reloaded; carries the deal
    /// count after reload.
    Refreshed(usize),
    /// Another scrape was already in flight; this trigger was dropped.
    Coalesced,
}

struct Inner {
    source: Arc<dyn DealSource>,
    status: Mutex<RefreshStatus>,
    last_refresh_at: Mutex<Option<Instant>>,
    catalog: RwLock<Vec<Deal>>,
}

/// Scheduler owning the deal catalog and its freshness.
///
/// Cheap to clone; clones share the same catalog and single-flight state.
#[derive(Clone)]
pub struct CatalogScheduler {
    inner: Arc<Inner>,
}

impl CatalogScheduler {
    pub fn new(source: Arc<dyn DealSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                status: Mutex::new(RefreshStatus::Idle),
                last_refresh_at: Mutex::new(None),
                catalog: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Populate the catalog on startup.
    ///
    /// Falls back to the built-in sample catalog when the source fails or
    /// returns nothing, so the storefront is never empty. The fallback is
    /// not recorded as a refresh; the next trigger still replaces it.
    pub async fn load_initial(&self) {
        match self.inner.source.fetch_catalog().await {
            Ok(deals) if !deals.is_empty() => {
                info!(count = deals.len(), "loaded catalog from deal source");
                self.replace_catalog(deals);
                self.record_refresh();
            }
            Ok(_) => {
                warn!("deal source returned an empty catalog, using sample catalog");
                self.replace_catalog(sample_catalog());
            }
            Err(e) => {
                warn!(error = %e, "deal source unavailable, using sample catalog");
                self.replace_catalog(sample_catalog());
            }
        }
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Vec<Deal> {
        self.inner
            .catalog
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Current refresh status.
    pub fn status(&self) -> RefreshStatus {
        *self.inner.status.lock().expect("status lock poisoned")
    }

    /// Whether the catalog is due for a re-scrape: no refresh recorded
    /// yet, or the last one is older than the staleness threshold.
    /// Side-effect free.
    pub fn should_trigger_scrape(&self) -> bool {
        let last = *self
            .inner
            .last_refresh_at
            .lock()
            .expect("last_refresh_at lock poisoned");
        match last {
            Some(at) => at.elapsed() > STALENESS_THRESHOLD,
            None => true,
        }
    }

    /// Ask the source to re-scrape, then reload the catalog.
    ///
    /// At most one scrape is in flight at a time: a call arriving while
    /// another is refreshing returns [`ScrapeOutcome::Coalesced`] without
    /// touching the source. Failures reset the status to `Idle` and leave
    /// the previous catalog in place; they are logged here, so background
    /// callers may drop the returned error.
    pub async fn trigger_scrape(&self) -> Result<ScrapeOutcome, CatalogError> {
        if !self.begin_refresh() {
            debug!("scrape trigger dropped, refresh already in flight");
            return Ok(ScrapeOutcome::Coalesced);
        }

        if let Err(e) = self.inner.source.trigger_scrape().await {
            error!(error = %e, "scrape trigger failed");
            self.set_status(RefreshStatus::Idle);
            return Err(e);
        }

        self.set_status(RefreshStatus::Completed);
        self.record_refresh();

        sleep(RELOAD_SETTLE_DELAY).await;
        let count = self.reload_catalog().await;

        self.set_status(RefreshStatus::Idle);
        Ok(ScrapeOutcome::Refreshed(count))
    }

    /// User-initiated refresh: always triggers regardless of staleness
    /// and surfaces the outcome, unlike the silent background path.
    pub async fn manual_refresh(&self) -> Result<usize, CatalogError> {
        match self.trigger_scrape().await? {
            ScrapeOutcome::Refreshed(count) => Ok(count),
            ScrapeOutcome::Coalesced => Err(CatalogError::RefreshInFlight),
        }
    }

    /// Arm the recurring background refresh.
    ///
    /// Triggers immediately when the catalog is already stale, then every
    /// 24 hours. The returned handle stops the task; dropping it has the
    /// same effect, so the owner's shutdown cannot leak the timer.
    pub fn schedule_auto_refresh(&self) -> AutoRefreshHandle {
        let scheduler = self.clone();
        let handle = tokio::spawn(async move {
            if scheduler.should_trigger_scrape() {
                let _ = scheduler.trigger_scrape().await;
            }

            let mut ticker = interval(STALENESS_THRESHOLD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; the stale
            // check above already covered startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = scheduler.trigger_scrape().await;
            }
        });
        AutoRefreshHandle { handle }
    }

    /// Re-fetch the catalog, keeping the last-known-good set when the
    /// fetch fails or comes back empty. Returns the resulting deal count.
    async fn reload_catalog(&self) -> usize {
        match self.inner.source.fetch_catalog().await {
            Ok(deals) if !deals.is_empty() => {
                info!(count = deals.len(), "catalog reloaded");
                let count = deals.len();
                self.replace_catalog(deals);
                count
            }
            Ok(_) => {
                warn!("reload returned an empty catalog, keeping previous deals");
                self.catalog().len()
            }
            Err(e) => {
                warn!(error = %e, "catalog reload failed, keeping previous deals");
                self.catalog().len()
            }
        }
    }

    /// Atomic check-and-set into `Refreshing`. Returns false when another
    /// refresh holds the guard.
    fn begin_refresh(&self) -> bool {
        let mut status = self.inner.status.lock().expect("status lock poisoned");
        if *status == RefreshStatus::Refreshing {
            return false;
        }
        *status = RefreshStatus::Refreshing;
        true
    }

    fn set_status(&self, status: RefreshStatus) {
        *self.inner.status.lock().expect("status lock poisoned") = status;
    }

    fn record_refresh(&self) {
        *self
            .inner
            .last_refresh_at
            .lock()
            .expect("last_refresh_at lock poisoned") = Some(Instant::now());
    }

    fn replace_catalog(&self, deals: Vec<Deal>) {
        if let Ok(mut catalog) = self.inner.catalog.write() {
            *catalog = deals;
        }
    }
}

/// Cancellation handle for the background refresh task.
///
/// The in-flight scrape (if any) is fire-and-forget; aborting the timer
/// only stops future triggers.
pub struct AutoRefreshHandle {
    handle: JoinHandle<()>,
}

impl AutoRefreshHandle {
    /// Stop the recurring refresh.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
