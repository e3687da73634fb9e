//! Network configuration: endpoint, signing credential, gas-price policy and the
//! block explorer used for contract verification.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

/// Chain id of Polygon Amoy, the default remote network.
pub const POLYGON_AMOY_CHAIN_ID: u64 = 80002;

/// Chain id of a local Hardhat/Anvil node.
pub const LOCALHOST_CHAIN_ID: u64 = 31337;

/// Gas-price policy for submitted transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasPrice {
    /// Let the provider estimate fees.
    #[default]
    Auto,
    /// Legacy gas price in wei.
    Fixed(u128),
}

impl FromStr for GasPrice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<u128>()
            .map(Self::Fixed)
            .map_err(|e| format!("invalid gas price '{s}': expected 'auto' or wei amount ({e})"))
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(wei) => write!(f, "{wei} wei"),
        }
    }
}

/// Etherscan-compatible verification service.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_url: Url,
    pub browser_url: Url,
    pub api_key: Option<String>,
}

/// A network the binaries know defaults for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownNetwork {
    PolygonAmoy,
    Localhost,
}

impl KnownNetwork {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "polygonAmoy" | "polygon-amoy" | "amoy" => Some(Self::PolygonAmoy),
            "localhost" | "hardhat" | "anvil" => Some(Self::Localhost),
            _ => None,
        }
    }

    pub fn chain_id(self) -> u64 {
        match self {
            Self::PolygonAmoy => POLYGON_AMOY_CHAIN_ID,
            Self::Localhost => LOCALHOST_CHAIN_ID,
        }
    }

    pub fn default_rpc_url(self) -> Option<&'static str> {
        match self {
            Self::PolygonAmoy => None,
            Self::Localhost => Some("http://127.0.0.1:8545"),
        }
    }

    /// OKLink endpoints registered for Amoy verification.
    pub fn explorer_urls(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::PolygonAmoy => Some((
                "https://www.oklink.com/api/explorer/v1/contract/verify/async/api/polygonAmoy",
                "https://www.oklink.com/polygonAmoy",
            )),
            Self::Localhost => None,
        }
    }
}

/// Fully resolved settings for connecting to a remote ledger.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: Url,
    /// Hex-encoded private key of the signing account.
    pub private_key: String,
    /// Expected chain id; the connection is refused on mismatch.
    pub chain_id: Option<u64>,
    pub gas_price: GasPrice,
    pub explorer: Option<ExplorerConfig>,
    /// Root of the Hardhat `artifacts/` tree holding creation bytecode.
    pub artifacts_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_price_parse() {
        assert_eq!("auto".parse::<GasPrice>().unwrap(), GasPrice::Auto);
        assert_eq!("AUTO".parse::<GasPrice>().unwrap(), GasPrice::Auto);
        assert_eq!(
            "30000000000".parse::<GasPrice>().unwrap(),
            GasPrice::Fixed(30_000_000_000)
        );
        assert!("fast".parse::<GasPrice>().is_err());
    }

    #[test]
    fn test_known_networks() {
        let amoy = KnownNetwork::from_name("polygonAmoy").unwrap();
        assert_eq!(amoy.chain_id(), 80002);
        assert!(amoy.default_rpc_url().is_none());
        assert!(amoy.explorer_urls().is_some());

        let local = KnownNetwork::from_name("hardhat").unwrap();
        assert_eq!(local.chain_id(), 31337);
        assert_eq!(local.default_rpc_url(), Some("http://127.0.0.1:8545"));

        assert!(KnownNetwork::from_name("mainnet").is_none());
    }
}
