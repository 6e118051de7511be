//! Service configuration loaded from the environment.

use std::time::Duration;

use crate::domain::error::ConfigError;

/// The XRPL network the relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }

    /// Default public JSON-RPC endpoint for this network.
    #[must_use]
    pub fn default_json_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://s1.ripple.com:51234/",
            Self::Testnet => "https://s.altnet.rippletest.net:51234/",
            Self::Devnet => "https://s.devnet.rippletest.net:51234/",
        }
    }

    /// Default faucet endpoint; mainnet has none.
    #[must_use]
    pub fn default_faucet_url(&self) -> Option<&'static str> {
        match self {
            Self::Mainnet => None,
            Self::Testnet => Some("https://faucet.altnet.rippletest.net/accounts"),
            Self::Devnet => Some("https://faucet.devnet.rippletest.net/accounts"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable ledger-facing settings, built once at startup.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub network: Network,
    pub json_rpc_url: String,
    /// Absent on mainnet, where no faucet exists.
    pub faucet_url: Option<String>,
    /// Flat fee attached to every submitted transaction, in drops.
    pub fee_drops: u64,
    /// Address used as the regular key when black-holing an account.
    pub black_hole_address: String,
    /// Attempts for transport-level submit/request retries.
    pub submit_retry_attempts: u32,
    /// Timeout applied to every outbound HTTP request.
    pub http_timeout: Duration,
}

/// ACCOUNT_ONE, the conventional black-hole regular key.
const DEFAULT_BLACK_HOLE_ADDRESS: &str = "rrrrrrrrrrrrrrrrrrrrBZbvji";
const DEFAULT_FEE_DROPS: u64 = 10;
const DEFAULT_SUBMIT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

impl LedgerConfig {
    /// Load from environment variables, falling back to per-network
    /// defaults for the endpoints.
    pub fn from_env() -> Result<Self, ConfigError> {
        let network: Network = std::env::var("XRPL_NETWORK")
            .unwrap_or_else(|_| "testnet".to_string())
            .parse()?;

        let json_rpc_url = std::env::var("XRPL_JSON_RPC_URL")
            .unwrap_or_else(|_| network.default_json_rpc_url().to_string());

        let faucet_url = std::env::var("XRPL_FAUCET_URL")
            .ok()
            .or_else(|| network.default_faucet_url().map(str::to_string));

        let fee_drops = parse_env("XRPL_FEE_DROPS", DEFAULT_FEE_DROPS)?;
        let submit_retry_attempts =
            parse_env("XRPL_SUBMIT_RETRY_ATTEMPTS", DEFAULT_SUBMIT_RETRY_ATTEMPTS)?;

        let black_hole_address = std::env::var("XRPL_BLACK_HOLE_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BLACK_HOLE_ADDRESS.to_string());

        Ok(Self {
            network,
            json_rpc_url,
            faucet_url,
            fee_drops,
            black_hole_address,
            submit_retry_attempts,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Testnet defaults, used by tests and local tooling.
    #[must_use]
    pub fn testnet_defaults() -> Self {
        let network = Network::Testnet;
        Self {
            network,
            json_rpc_url: network.default_json_rpc_url().to_string(),
            faucet_url: network.default_faucet_url().map(str::to_string),
            fee_drops: DEFAULT_FEE_DROPS,
            black_hole_address: DEFAULT_BLACK_HOLE_ADDRESS.to_string(),
            submit_retry_attempts: DEFAULT_SUBMIT_RETRY_ATTEMPTS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("could not parse '{}'", raw),
        }),
        Err(_) => Ok(default),
    }
}
