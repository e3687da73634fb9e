//! Shared CLI configuration for tokenops binaries.
//!
//! Every binary flattens [`NetworkArgs`] into its own `clap` config. Values can
//! be given as flags or through the environment (`POLYGON_AMOY_RPC`,
//! `PRIVATE_KEY`, `GAS_PRICE`, `OKLINK_AMOY_API`), matching the variables the
//! deployed networks were configured with.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokenops::alloy::primitives::Address;
use tokenops::{ExplorerConfig, GasPrice, KnownNetwork, NetworkConfig};
use url::Url;

/// Network selection and credentials.
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Network name (polygonAmoy, localhost)
    #[arg(long, env = "NETWORK", default_value = "polygonAmoy")]
    pub network: String,

    /// JSON-RPC endpoint URL
    #[arg(long, env = "POLYGON_AMOY_RPC")]
    pub rpc_url: Option<String>,

    /// Hex-encoded private key of the signing account
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Gas price policy: `auto` or a fixed price in wei
    #[arg(long, env = "GAS_PRICE", default_value = "auto")]
    pub gas_price: GasPrice,

    /// Expected chain id (defaults to the known network's id)
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// API key of the block explorer used for verification
    #[arg(long, env = "OKLINK_AMOY_API", hide_env_values = true)]
    pub explorer_api_key: Option<String>,

    /// Verification API URL (defaults to the known network's explorer)
    #[arg(long)]
    pub explorer_url: Option<String>,

    /// Explorer browser URL, used for links in logs
    #[arg(long)]
    pub explorer_browser_url: Option<String>,

    /// Hardhat artifacts directory holding the compiled contracts
    #[arg(long, default_value = "./artifacts")]
    pub artifacts: PathBuf,
}

impl NetworkArgs {
    /// Resolves flags, environment and known-network defaults into a config.
    pub fn resolve(&self) -> Result<NetworkConfig> {
        let known = KnownNetwork::from_name(&self.network);

        let rpc_url = self
            .rpc_url
            .as_deref()
            .or_else(|| known.and_then(KnownNetwork::default_rpc_url))
            .with_context(|| {
                format!(
                    "no RPC URL for network '{}' (set --rpc-url or POLYGON_AMOY_RPC)",
                    self.network
                )
            })?;
        let rpc_url = Url::parse(rpc_url).with_context(|| format!("invalid RPC URL '{rpc_url}'"))?;

        let private_key = self
            .private_key
            .clone()
            .context("no signing key configured (set --private-key or PRIVATE_KEY)")?;

        let chain_id = self.chain_id.or_else(|| known.map(KnownNetwork::chain_id));
        tracing::debug!(
            target: "tokenops_config_common",
            network = %self.network,
            rpc_url = %rpc_url,
            chain_id = ?chain_id,
            "Resolved network"
        );

        Ok(NetworkConfig {
            name: self.network.clone(),
            rpc_url,
            private_key,
            chain_id,
            gas_price: self.gas_price,
            explorer: self.explorer(known)?,
            artifacts_dir: self.artifacts.clone(),
        })
    }

    /// Explorer settings alone; needs no signing key.
    pub fn explorer_config(&self) -> Result<Option<ExplorerConfig>> {
        self.explorer(KnownNetwork::from_name(&self.network))
    }

    fn explorer(&self, known: Option<KnownNetwork>) -> Result<Option<ExplorerConfig>> {
        let defaults = known.and_then(KnownNetwork::explorer_urls);

        let api_url = match (&self.explorer_url, defaults) {
            (Some(url), _) => url.as_str(),
            (None, Some((api, _))) => api,
            (None, None) => return Ok(None),
        };
        let browser_url = match (&self.explorer_browser_url, defaults) {
            (Some(url), _) => url.as_str(),
            (None, Some((_, browser))) => browser,
            (None, None) => api_url,
        };

        Ok(Some(ExplorerConfig {
            api_url: Url::parse(api_url)
                .with_context(|| format!("invalid explorer URL '{api_url}'"))?,
            browser_url: Url::parse(browser_url)
                .with_context(|| format!("invalid explorer URL '{browser_url}'"))?,
            api_key: self.explorer_api_key.clone(),
        }))
    }
}

/// Parses a hex address for `clap` value parsers.
pub fn parse_address(s: &str) -> std::result::Result<Address, String> {
    s.trim()
        .parse::<Address>()
        .map_err(|e| format!("invalid address '{s}': {e}"))
}

/// Initializes the `tracing` subscriber for a binary.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(network: &str) -> NetworkArgs {
        NetworkArgs {
            network: network.to_string(),
            rpc_url: None,
            private_key: Some("0x01".to_string()),
            gas_price: GasPrice::Auto,
            chain_id: None,
            explorer_api_key: Some("key".to_string()),
            explorer_url: None,
            explorer_browser_url: None,
            artifacts: PathBuf::from("./artifacts"),
        }
    }

    #[test]
    fn test_localhost_defaults() {
        let config = args("localhost").resolve().unwrap();
        assert_eq!(config.rpc_url.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(config.chain_id, Some(31337));
        assert!(config.explorer.is_none());
    }

    #[test]
    fn test_amoy_requires_rpc_url() {
        assert!(args("polygonAmoy").resolve().is_err());

        let mut amoy = args("polygonAmoy");
        amoy.rpc_url = Some("https://rpc-amoy.polygon.technology".to_string());
        let config = amoy.resolve().unwrap();
        assert_eq!(config.chain_id, Some(80002));

        let explorer = config.explorer.unwrap();
        assert!(explorer.api_url.as_str().contains("oklink.com"));
        assert_eq!(explorer.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_missing_private_key() {
        let mut local = args("localhost");
        local.private_key = None;
        assert!(local.resolve().is_err());
    }

    #[test]
    fn test_explorer_config_without_key() {
        let mut amoy = args("polygonAmoy");
        amoy.private_key = None;
        amoy.explorer_url = Some("http://localhost:4000/api".to_string());

        let explorer = amoy.explorer_config().unwrap().unwrap();
        assert_eq!(explorer.api_url.as_str(), "http://localhost:4000/api");
        assert!(explorer.browser_url.as_str().contains("oklink.com"));

        assert!(args("localhost").explorer_config().unwrap().is_none());
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0xF9bD56EE66BdD4C3F4a82A1a45fF99b48A33A9c7").is_ok());
        assert!(parse_address("0x1234").is_err());
    }
}
