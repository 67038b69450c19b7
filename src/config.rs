use crate::domain::catalog::Catalog;
use crate::error::{OrderError, Result};
use crate::infrastructure::simulated::DEFAULT_DELAY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Runtime settings: the catalog to sell from and the simulated service delay.
///
/// Loaded from JSON. Missing keys fall back to the builtin catalog and a
/// two second delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: Catalog,
    pub submission_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            submission_delay_ms: DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OrderError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(raw)?;
        if config.catalog.packages().is_empty() {
            return Err(OrderError::Config("catalog has no packages".to_string()));
        }
        if config.catalog.payment_methods().is_empty() {
            return Err(OrderError::Config(
                "catalog has no payment methods".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.submission_delay(), Duration::from_secs(2));
        assert_eq!(config.catalog, Catalog::builtin());
    }

    #[test]
    fn test_partial_json_keeps_builtin_catalog() {
        let config = AppConfig::from_json(r#"{"submission_delay_ms": 5}"#).unwrap();
        assert_eq!(config.submission_delay_ms, 5);
        assert_eq!(config.catalog.packages().len(), 3);
    }

    #[test]
    fn test_custom_catalog() {
        let json = r#"{
            "catalog": {
                "packages": [{"id": "xl", "name": "XL", "gb": 50, "price": "990", "popular": true}],
                "payment_methods": [{"id": "sbp", "name": "СБП", "icon": "Zap"}]
            }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        let package = config.catalog.package("xl").unwrap();
        assert_eq!(package.gb, 50);
        assert!(package.features.is_empty());
        assert_eq!(config.catalog.payment_method("sbp").unwrap().description, None);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let json = r#"{"catalog": {"packages": [], "payment_methods": []}}"#;
        assert!(matches!(
            AppConfig::from_json(json),
            Err(OrderError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"catalog": {
            "packages": [
                {"id": "a", "name": "A", "gb": 1, "price": "1"},
                {"id": "a", "name": "B", "gb": 2, "price": "2"}
            ],
            "payment_methods": [{"id": "card", "name": "Card", "icon": "CreditCard"}]
        }}"#;
        assert!(matches!(AppConfig::from_json(json), Err(OrderError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"submission_delay_ms": 0}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.submission_delay(), Duration::ZERO);

        assert!(matches!(
            AppConfig::load("does/not/exist.json"),
            Err(OrderError::Config(_))
        ));
    }
}
