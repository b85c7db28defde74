//! Checkout compliance gate.
//!
//! Decides whether a delivery number may receive a purchase. Only a bad
//! format is a hard stop; an unreachable registry degrades to "accept
//! with explicit consent" so the transaction can still complete, with the
//! consent requirement as the compensating control.

use crate::network;
use crate::registry::{ComplianceRegistry, RegisteredNumbers};
use airtime_commerce::cart::CartLineItem;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Terminal outcome of one compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Caller-supplied fast path matched; no external call made.
    RegisteredFastPath,
    /// Registry lookup found a verified registration.
    VerifiedByLookup,
    /// Unknown to the registry (miss or registry failure); delivery
    /// allowed only after explicit consent.
    UnknownAcceptedByConsent,
    /// Not a plausible South African mobile number; checkout must stop.
    Rejected,
}

/// Result of a compliance check for one phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoneComplianceRecord {
    /// Normalized local number.
    pub local_number: String,
    /// Detected carrier.
    pub carrier: String,
    /// Terminal compliance outcome.
    pub status: ComplianceStatus,
    /// Human-readable error when rejected.
    pub validation_error: Option<String>,
}

/// Compliance gate for a single checkout attempt.
///
/// Construct one gate per attempt: the terms-accepted flag is attempt
/// scoped and must not leak across attempts for different numbers.
pub struct ComplianceGate {
    registry: Arc<dyn ComplianceRegistry>,
    fast_path: Arc<dyn RegisteredNumbers>,
    terms_accepted: bool,
    validation_error: Option<String>,
}

impl ComplianceGate {
    pub fn new(
        registry: Arc<dyn ComplianceRegistry>,
        fast_path: Arc<dyn RegisteredNumbers>,
    ) -> Self {
        Self {
            registry,
            fast_path,
            terms_accepted: false,
            validation_error: None,
        }
    }

    /// Validate a delivery number against the compliance rules.
    ///
    /// Each call starts a fresh attempt: outstanding consent and
    /// validation errors from a previous number are discarded.
    pub async fn validate(
        &mut self,
        phone_number: &str,
        cart_items: &[CartLineItem],
    ) -> PhoneComplianceRecord {
        self.terms_accepted = false;
        self.validation_error = None;

        let local = network::normalize(phone_number);
        if !network::is_valid_mobile(&local) {
            let message = "Enter a valid South African cellphone number".to_string();
            self.validation_error = Some(message.clone());
            return PhoneComplianceRecord {
                local_number: local,
                carrier: network::UNKNOWN_CARRIER.to_string(),
                status: ComplianceStatus::Rejected,
                validation_error: Some(message),
            };
        }

        if self.fast_path.is_registered(&local) {
            // The buyer's own verified number: no external call, and the
            // consent requirement is satisfied by registration itself.
            self.terms_accepted = true;
            let carrier = network::classify(&local).to_string();
            warn_on_carrier_mismatch(&carrier, cart_items);
            return PhoneComplianceRecord {
                local_number: local,
                carrier,
                status: ComplianceStatus::RegisteredFastPath,
                validation_error: None,
            };
        }

        let international = network::to_international(&local);
        let record = match self.registry.lookup_by_phone(&international).await {
            Ok(Some(registration)) => {
                info!(number = %international, "registry lookup verified");
                PhoneComplianceRecord {
                    local_number: local,
                    // The registry's carrier of record wins over the
                    // prefix table.
                    carrier: registration.carrier,
                    status: ComplianceStatus::VerifiedByLookup,
                    validation_error: None,
                }
            }
            Ok(None) => self.unknown_record(local),
            Err(e) => {
                warn!(error = %e, number = %international, "registry unavailable, degrading to consent");
                self.unknown_record(local)
            }
        };

        warn_on_carrier_mismatch(&record.carrier, cart_items);
        record
    }

    /// A lookup miss and a lookup failure resolve identically: classifier
    /// carrier, acceptance gated on explicit consent.
    fn unknown_record(&self, local: String) -> PhoneComplianceRecord {
        let carrier = network::classify(&local).to_string();
        PhoneComplianceRecord {
            local_number: local,
            carrier,
            status: ComplianceStatus::UnknownAcceptedByConsent,
            validation_error: None,
        }
    }

    /// The caller signals that a human accepted the unknown-number
    /// disclaimer. Clears any outstanding validation error.
    pub fn accept_unknown_number_terms(&mut self) {
        self.terms_accepted = true;
        self.validation_error = None;
    }

    /// Whether terms have been accepted for this attempt.
    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// The current validation error, if any.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Whether checkout may proceed for the given record.
    ///
    /// Consent-gated records require `accept_unknown_number_terms` first;
    /// rejected records never proceed.
    pub fn checkout_permitted(&self, record: &PhoneComplianceRecord) -> bool {
        match record.status {
            ComplianceStatus::RegisteredFastPath | ComplianceStatus::VerifiedByLookup => true,
            ComplianceStatus::UnknownAcceptedByConsent => self.terms_accepted,
            ComplianceStatus::Rejected => false,
        }
    }
}

/// Carted deals are carrier-specific; delivering Vodacom airtime to an MTN
/// number will fail at redemption, so flag the mismatch early.
fn warn_on_carrier_mismatch(carrier: &str, cart_items: &[CartLineItem]) {
    for item in cart_items {
        if item.carrier != carrier {
            warn!(
                deal = %item.deal_id,
                deal_carrier = %item.carrier,
                number_carrier = %carrier,
                "carted deal carrier does not match delivery number"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::registry::RegistrationRecord;
    use async_trait::async_trait;

    struct MissRegistry;

    #[async_trait]
    impl ComplianceRegistry for MissRegistry {
        async fn lookup_by_phone(
            &self,
            _international: &str,
        ) -> Result<Option<RegistrationRecord>, RegistryError> {
            Ok(None)
        }
    }

    struct FailingRegistry;

    #[async_trait]
    impl ComplianceRegistry for FailingRegistry {
        async fn lookup_by_phone(
            &self,
            _international: &str,
        ) -> Result<Option<RegistrationRecord>, RegistryError> {
            Err(RegistryError::Unavailable("connection refused".to_string()))
        }
    }

    struct HitRegistry {
        carrier: &'static str,
    }

    #[async_trait]
    impl ComplianceRegistry for HitRegistry {
        async fn lookup_by_phone(
            &self,
            international: &str,
        ) -> Result<Option<RegistrationRecord>, RegistryError> {
            Ok(Some(RegistrationRecord {
                phone: international.to_string(),
                carrier: self.carrier.to_string(),
                verified: true,
            }))
        }
    }

    struct NoFastPath;

    impl RegisteredNumbers for NoFastPath {
        fn is_registered(&self, _local_number: &str) -> bool {
            false
        }
    }

    struct OwnNumber(&'static str);

    impl RegisteredNumbers for OwnNumber {
        fn is_registered(&self, local_number: &str) -> bool {
            local_number == self.0
        }
    }

    fn gate(
        registry: impl ComplianceRegistry + 'static,
        fast_path: impl RegisteredNumbers + 'static,
    ) -> ComplianceGate {
        ComplianceGate::new(Arc::new(registry), Arc::new(fast_path))
    }

    #[tokio::test]
    async fn test_malformed_number_rejected() {
        let mut gate = gate(MissRegistry, NoFastPath);
        let record = gate.validate("123", &[]).await;

        assert_eq!(record.status, ComplianceStatus::Rejected);
        assert!(record.validation_error.is_some());
        assert!(!record.validation_error.as_deref().unwrap().is_empty());
        assert!(!gate.checkout_permitted(&record));
    }

    #[tokio::test]
    async fn test_fast_path_skips_lookup() {
        // A failing registry proves no external call is needed.
        let mut gate = gate(FailingRegistry, OwnNumber("821234567"));
        let record = gate.validate("0821234567", &[]).await;

        assert_eq!(record.status, ComplianceStatus::RegisteredFastPath);
        assert_eq!(record.carrier, "Vodacom");
        assert!(gate.terms_accepted());
        assert!(gate.checkout_permitted(&record));
    }

    #[tokio::test]
    async fn test_lookup_hit_uses_registry_carrier() {
        // Registry record wins even when the prefix table disagrees.
        let mut gate = gate(HitRegistry { carrier: "MTN" }, NoFastPath);
        let record = gate.validate("0821234567", &[]).await;

        assert_eq!(record.status, ComplianceStatus::VerifiedByLookup);
        assert_eq!(record.carrier, "MTN");
        assert!(gate.checkout_permitted(&record));
    }

    #[tokio::test]
    async fn test_lookup_miss_requires_consent() {
        let mut gate = gate(MissRegistry, NoFastPath);
        let record = gate.validate("0761234567", &[]).await;

        assert_eq!(record.status, ComplianceStatus::UnknownAcceptedByConsent);
        assert_eq!(record.carrier, "Cell C");
        assert!(!gate.checkout_permitted(&record));

        gate.accept_unknown_number_terms();
        assert!(gate.checkout_permitted(&record));
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_like_a_miss() {
        let mut gate = gate(FailingRegistry, NoFastPath);
        let record = gate.validate("0761234567", &[]).await;

        assert_eq!(record.status, ComplianceStatus::UnknownAcceptedByConsent);
        assert_eq!(record.carrier, "Cell C");
        assert!(!gate.checkout_permitted(&record));
    }

    #[tokio::test]
    async fn test_consent_does_not_leak_across_attempts() {
        let mut gate = gate(MissRegistry, NoFastPath);
        let first = gate.validate("0761234567", &[]).await;
        gate.accept_unknown_number_terms();
        assert!(gate.checkout_permitted(&first));

        // Validating a different number starts a fresh attempt.
        let second = gate.validate("0741234567", &[]).await;
        assert!(!gate.checkout_permitted(&second));
    }

    #[tokio::test]
    async fn test_accepting_terms_clears_validation_error() {
        let mut gate = gate(MissRegistry, NoFastPath);
        let _ = gate.validate("123", &[]).await;
        assert!(gate.validation_error().is_some());

        gate.accept_unknown_number_terms();
        assert!(gate.validation_error().is_none());
    }
}
