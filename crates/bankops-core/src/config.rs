//! Console config parser (`bankops.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::EndpointRegistry;
use crate::types::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub key: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Locked backend base URLs: (key, base url, label).
const LOCKED_SERVICES: &[(&str, &str, &str)] = &[
    ("CUSTOMER_SERVICE", "http://127.0.0.1:8000", "Customer Service"),
    ("ACCOUNT_SERVICE", "http://127.0.0.1:8001", "Account Service"),
    ("TRANSACTION_SERVICE", "http://127.0.0.1:8002", "Transaction Service"),
    ("LEDGER_SERVICE", "http://127.0.0.1:8003", "Ledger Service"),
    ("CARD_SERVICE", "http://127.0.0.1:8004", "Card Service"),
    ("COMPLAINT_SERVICE", "http://127.0.0.1:8005", "Complaint Service"),
    ("LOAN_SERVICE", "http://127.0.0.1:8006", "Loan Service"),
    ("FRAUD_SERVICE", "http://127.0.0.1:8007", "Fraud Service"),
    ("API_GATEWAY", "http://127.0.0.1:8080", "API Gateway"),
];

impl ConsoleConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read a config file and build a validated registry from it.
    pub fn load_registry(path: &Path) -> Result<EndpointRegistry, ConfigError> {
        let config = Self::from_file(path)?;
        Ok(EndpointRegistry::from_config(&config)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The locked production service set.
    pub fn locked() -> Self {
        ConsoleConfig {
            services: LOCKED_SERVICES
                .iter()
                .map(|(key, base_url, label)| ServiceConfig {
                    key: key.to_string(),
                    base_url: base_url.to_string(),
                    label: Some(label.to_string()),
                })
                .collect(),
        }
    }

    /// Endpoints in declaration order. Not validated; see [`EndpointRegistry::new`].
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.services
            .iter()
            .map(|s| {
                let ep = Endpoint::new(&s.key, &s.base_url);
                match &s.label {
                    Some(label) => ep.with_label(label),
                    None => ep,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;

    #[test]
    fn test_locked_round_trips_through_toml() {
        let config = ConsoleConfig::locked();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("LEDGER_SERVICE"));
        assert!(toml_str.contains("http://127.0.0.1:8003"));

        let parsed: ConsoleConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_minimal() {
        let toml_str = r#"
[[services]]
key = "LOAN_SERVICE"
base_url = "http://10.0.0.5:8006"
"#;
        let config: ConsoleConfig = toml::from_str(toml_str).unwrap();
        let endpoints = config.endpoints();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].display_name, "LOAN");
        assert_eq!(endpoints[0].label, "LOAN");
    }

    #[test]
    fn test_load_registry_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankops.toml");
        std::fs::write(
            &path,
            r#"
[[services]]
key = "CARD_SERVICE"
base_url = "http://127.0.0.1:8004"
label = "Card Service"

[[services]]
key = "FRAUD_SERVICE"
base_url = "http://127.0.0.1:8007"
"#,
        )
        .unwrap();

        let registry = ConsoleConfig::load_registry(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("CARD_SERVICE").unwrap().label, "Card Service");
    }

    #[test]
    fn test_load_registry_rejects_empty_services() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankops.toml");
        std::fs::write(&path, "services = []\n").unwrap();

        let err = ConsoleConfig::load_registry(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Registry(RegistryError::Empty)));
    }

    #[test]
    fn test_load_registry_rejects_https_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankops.toml");
        std::fs::write(
            &path,
            r#"
[[services]]
key = "LOAN_SERVICE"
base_url = "https://loans.internal:8443"
"#,
        )
        .unwrap();

        let err = ConsoleConfig::load_registry(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Registry(RegistryError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConsoleConfig::from_file(Path::new("/nonexistent/bankops.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
