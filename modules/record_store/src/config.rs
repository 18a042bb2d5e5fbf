//! Configuration for the record store module

use crate::contract::StockPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Record store module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HMAC secret for signing access tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Access token lifetime
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,

    /// What checkout does when a line exceeds the stock on hand
    #[serde(default)]
    pub stock_policy: StockPolicySetting,

    /// Bestsellers returned when the request has no `limit`
    #[serde(default = "default_bestsellers_limit")]
    pub bestsellers_default_limit: u64,

    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub cookie_secure: bool,

    /// Load the demo catalog when the database is empty
    #[serde(default)]
    pub seed_demo_data: bool,

    /// Administrator account created at startup if missing
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Serde-facing mirror of [`StockPolicy`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicySetting {
    #[default]
    Reject,
    Clamp,
}

impl From<StockPolicySetting> for StockPolicy {
    fn from(setting: StockPolicySetting) -> Self {
        match setting {
            StockPolicySetting::Reject => StockPolicy::Reject,
            StockPolicySetting::Clamp => StockPolicy::Clamp,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl: default_token_ttl(),
            stock_policy: StockPolicySetting::default(),
            bestsellers_default_limit: default_bestsellers_limit(),
            cookie_secure: false,
            seed_demo_data: false,
            bootstrap_admin: None,
        }
    }
}

fn default_jwt_secret() -> String {
    "change-me-record-store-secret".to_string()
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_bestsellers_limit() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.token_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.stock_policy, StockPolicySetting::Reject);
        assert_eq!(cfg.bestsellers_default_limit, 5);
        assert!(cfg.bootstrap_admin.is_none());
    }

    #[test]
    fn test_humantime_ttl_and_policy() {
        let cfg: Config =
            serde_json::from_str(r#"{"token_ttl": "90m", "stock_policy": "clamp"}"#).unwrap();
        assert_eq!(cfg.token_ttl, Duration::from_secs(90 * 60));
        assert_eq!(StockPolicy::from(cfg.stock_policy), StockPolicy::Clamp);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"jwt_secrte": "x"}"#);
        assert!(result.is_err());
    }
}
