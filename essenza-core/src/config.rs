//! Engine configuration

use std::path::PathBuf;

/// Configuration for the storefront engine
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the local cart database
    pub data_dir: String,
    /// VAT rate in percent used for the tax-included display figure
    pub tax_rate: u32,
    /// Maximum concurrent catalog lookups during checkout resolution
    pub resolve_concurrency: usize,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ESSENZA_DATA_DIR")
                .unwrap_or_else(|_| "/var/lib/essenza/store".into()),
            tax_rate: std::env::var("ESSENZA_TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(21),
            resolve_concurrency: std::env::var("ESSENZA_RESOLVE_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        }
    }

    /// Create a config with a custom data directory
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config
    }

    /// Path of the cart database file inside `data_dir`
    pub fn cart_db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("cart.redb")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir() {
        let config = StoreConfig::with_data_dir("/tmp/essenza-test");
        assert_eq!(config.data_dir, "/tmp/essenza-test");
        assert!(config.cart_db_path().ends_with("cart.redb"));
        assert!(config.resolve_concurrency >= 1);
    }
}
