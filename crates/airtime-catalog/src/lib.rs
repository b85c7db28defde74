//! Deal catalog freshness for the airtime resale platform.
//!
//! The catalog is scraped from an external source that may be slow,
//! erroring, or unavailable. This crate owns the policy around that:
//!
//! - initial load with a built-in sample fallback
//! - a 24-hour staleness threshold and recurring background refresh
//! - single-flight coalescing of concurrent refresh triggers
//! - last-known-good retention through transient failures
//!
//! # Example
//!
//! ```rust,ignore
//! use airtime_catalog::{CatalogScheduler, DealSource};
//!
//! let scheduler = CatalogScheduler::new(source);
//! scheduler.load_initial().await;
//! let handle = scheduler.schedule_auto_refresh();
//! // ... at shutdown:
//! handle.shutdown();
//! ```

pub mod error;
pub mod sample;
pub mod scheduler;
pub mod source;

pub use error::CatalogError;
pub use sample::sample_catalog;
pub use scheduler::{
    AutoRefreshHandle, CatalogScheduler, RefreshStatus, ScrapeOutcome, RELOAD_SETTLE_DELAY,
    STALENESS_THRESHOLD,
};
pub use source::DealSource;
