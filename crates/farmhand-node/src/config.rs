//! Node configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use farmhand_catalog::CatalogConfig;
use farmhand_planner::PlannerConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the node, read from `FARMHAND_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address the API listens on.
    pub addr: SocketAddr,

    /// Catalog client settings.
    pub catalog: CatalogConfig,

    /// Planner settings.
    pub planner: PlannerConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            catalog: CatalogConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, "FARMHAND_ADDR")? {
            config.addr = addr;
        }
        if let Some(url) = lookup("FARMHAND_CATALOG_URL") {
            config.catalog.base_url = url;
        }
        if let Some(timeout) = parse_var(&lookup, "FARMHAND_CATALOG_TIMEOUT_MS")? {
            config.catalog.request_timeout_ms = timeout;
        }
        if let Some(depth) = parse_var(&lookup, "FARMHAND_MAX_CHAIN_DEPTH")? {
            config.planner.max_chain_depth = depth;
        }
        if let Some(limit) = parse_var(&lookup, "FARMHAND_MAX_CONCURRENT_LOOKUPS")? {
            config.planner.max_concurrent_lookups = limit;
        }

        if config.planner.max_chain_depth == 0 {
            anyhow::bail!("FARMHAND_MAX_CHAIN_DEPTH must be at least 1");
        }
        if config.planner.max_concurrent_lookups == 0 {
            anyhow::bail!("FARMHAND_MAX_CONCURRENT_LOOKUPS must be at least 1");
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: '{}'", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = NodeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.catalog.base_url, "https://mhw-db.com");
        assert_eq!(config.planner.max_chain_depth, 32);
    }

    #[test]
    fn test_overrides() {
        let config = NodeConfig::from_lookup(lookup_from(&[
            ("FARMHAND_ADDR", "127.0.0.1:8088"),
            ("FARMHAND_CATALOG_URL", "http://localhost:9000"),
            ("FARMHAND_CATALOG_TIMEOUT_MS", "2500"),
            ("FARMHAND_MAX_CHAIN_DEPTH", "12"),
            ("FARMHAND_MAX_CONCURRENT_LOOKUPS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:8088".parse::<SocketAddr>().unwrap());
        assert_eq!(config.catalog.base_url, "http://localhost:9000");
        assert_eq!(config.catalog.request_timeout_ms, 2500);
        assert_eq!(config.planner.max_chain_depth, 12);
        assert_eq!(config.planner.max_concurrent_lookups, 2);
    }

    #[test]
    fn test_invalid_value_is_error() {
        let result = NodeConfig::from_lookup(lookup_from(&[("FARMHAND_MAX_CHAIN_DEPTH", "deep")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let err = NodeConfig::from_lookup(lookup_from(&[("FARMHAND_MAX_CHAIN_DEPTH", "0")])).unwrap_err();
        assert!(err.to_string().contains("FARMHAND_MAX_CHAIN_DEPTH"));

        let err = NodeConfig::from_lookup(lookup_from(&[("FARMHAND_MAX_CONCURRENT_LOOKUPS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("FARMHAND_MAX_CONCURRENT_LOOKUPS"));
    }
}
