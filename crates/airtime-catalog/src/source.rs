//! External deal-source collaborator.

use crate::error::CatalogError;
use airtime_commerce::deal::Deal;
use async_trait::async_trait;

/// The external scraping source the catalog is refreshed from.
///
/// Both operations may be slow or fail; the scheduler owns retry and
/// fallback policy, implementations just report what happened.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch the current catalog.
    async fn fetch_catalog(&self) -> Result<Vec<Deal>, CatalogError>;

    /// Ask the source to re-scrape upstream. Best-effort; may take
    /// seconds to be reflected in `fetch_catalog`.
    async fn trigger_scrape(&self) -> Result<(), CatalogError>;
}
