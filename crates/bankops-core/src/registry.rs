//! Endpoint registry — the static list of services to monitor.

use std::collections::HashSet;

use http::Uri;

use crate::config::ConsoleConfig;
use crate::error::RegistryError;
use crate::types::Endpoint;

/// Ordered, immutable set of endpoints. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    /// Validate and wrap a list of endpoints, preserving order.
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, RegistryError> {
        if endpoints.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(endpoints.len());
        for ep in &endpoints {
            if !seen.insert(ep.key.as_str()) {
                return Err(RegistryError::DuplicateKey(ep.key.clone()));
            }
            if !is_valid_base_url(&ep.base_url) {
                return Err(RegistryError::InvalidBaseUrl {
                    key: ep.key.clone(),
                    url: ep.base_url.clone(),
                });
            }
        }

        Ok(Self { endpoints })
    }

    /// Build the registry from a parsed config.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, RegistryError> {
        Self::new(config.endpoints())
    }

    /// The locked production registry: eight backend services plus the
    /// API gateway.
    pub fn locked() -> Self {
        Self {
            endpoints: ConsoleConfig::locked().endpoints(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|ep| ep.key == key)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Never true for a registry built through [`EndpointRegistry::new`].
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a EndpointRegistry {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

/// Absolute plain-`http` URL with an authority. The health probe does not
/// speak TLS, so `https` is rejected here rather than reported offline
/// forever.
fn is_valid_base_url(url: &str) -> bool {
    let Ok(uri) = url.parse::<Uri>() else {
        return false;
    };
    uri.scheme_str() == Some("http") && uri.authority().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(key: &str, port: u16) -> Endpoint {
        Endpoint::new(key, format!("http://127.0.0.1:{port}"))
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(EndpointRegistry::new(vec![]), Err(RegistryError::Empty));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = EndpointRegistry::new(vec![ep("CARD_SERVICE", 8004), ep("CARD_SERVICE", 9004)])
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("CARD_SERVICE".to_string()));
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = EndpointRegistry::new(vec![Endpoint::new("LOAN_SERVICE", "/loans")]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidBaseUrl { .. }));

        let err = EndpointRegistry::new(vec![Endpoint::new("LOAN_SERVICE", "ftp://host:21")])
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_https_base_url() {
        let err = EndpointRegistry::new(vec![
            ep("CARD_SERVICE", 8004),
            Endpoint::new("FRAUD_SERVICE", "https://127.0.0.1:8443"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidBaseUrl {
                key: "FRAUD_SERVICE".to_string(),
                url: "https://127.0.0.1:8443".to_string(),
            }
        );
    }

    #[test]
    fn preserves_order() {
        let registry = EndpointRegistry::new(vec![
            ep("LEDGER_SERVICE", 8003),
            ep("ACCOUNT_SERVICE", 8001),
            ep("FRAUD_SERVICE", 8007),
        ])
        .unwrap();
        let keys: Vec<&str> = registry.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["LEDGER_SERVICE", "ACCOUNT_SERVICE", "FRAUD_SERVICE"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn locked_registry_has_services_and_gateway() {
        let registry = EndpointRegistry::locked();
        assert_eq!(registry.len(), 9);
        assert_eq!(
            registry.get("API_GATEWAY").map(|e| e.base_url.as_str()),
            Some("http://127.0.0.1:8080")
        );
        assert_eq!(
            registry.get("COMPLAINT_SERVICE").map(|e| e.label.as_str()),
            Some("Complaint Service")
        );
        // The locked set must itself pass validation.
        assert!(EndpointRegistry::new(registry.iter().cloned().collect()).is_ok());
    }
}
