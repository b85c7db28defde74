//! Compliance registry and fast-path collaborator traits.

use crate::error::{ComplianceError, RegistryError};
use crate::network;
use airtime_store::{KeyValueStore, KeyValueStoreExt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// A verified subscriber registration, as held by the external registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationRecord {
    /// Full international-format number (`+27...`).
    pub phone: String,
    /// Carrier of record. Authoritative over local classification.
    pub carrier: String,
    /// Whether the registration passed verification.
    pub verified: bool,
}

/// External store of verified subscriber registrations.
///
/// `Ok(None)` means the number is not registered; `Err` means the check
/// could not be performed. The gate treats both the same way (degrade to
/// consent), but the distinction is kept at this seam.
#[async_trait]
pub trait ComplianceRegistry: Send + Sync {
    /// Look up a registration by exact match on the full
    /// international-format number.
    async fn lookup_by_phone(
        &self,
        international: &str,
    ) -> Result<Option<RegistrationRecord>, RegistryError>;
}

/// Fast-path predicate: numbers the caller already knows are registered,
/// e.g. the purchaser's own verified number.
pub trait RegisteredNumbers: Send + Sync {
    /// Whether the normalized local number is known-registered.
    fn is_registered(&self, local_number: &str) -> bool;
}

/// Store key under which a session's verified number is kept.
pub const VERIFIED_NUMBER_KEY: &str = "session:verified_number";

/// Fast-path predicate backed by the session's key-value store.
///
/// Matches the buyer's own verified number, in any format the store
/// recorded it in.
pub struct SessionVerifiedNumber {
    store: Arc<dyn KeyValueStore>,
}

impl SessionVerifiedNumber {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Record the buyer's verified number for this session.
    pub fn record(&self, raw: &str) -> Result<(), ComplianceError> {
        self.store.set(VERIFIED_NUMBER_KEY, &raw.to_string())?;
        Ok(())
    }
}

impl RegisteredNumbers for SessionVerifiedNumber {
    fn is_registered(&self, local_number: &str) -> bool {
        match self.store.get::<String>(VERIFIED_NUMBER_KEY) {
            Ok(Some(stored)) => network::normalize(&stored) == local_number,
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "session store unreadable, skipping fast path");
                false
            }
        }
    }
}
