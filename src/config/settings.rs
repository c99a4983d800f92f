//! Configuration settings for PredictX.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted for the RPC endpoint.
pub const RPC_URL_ENV: &str = "PREDICTX_RPC_URL";
/// Environment variable consulted for a raw signing key.
pub const PRIVATE_KEY_ENV: &str = "PREDICTX_PRIVATE_KEY";
/// Environment variable consulted for the keystore passphrase.
pub const KEYSTORE_PASSWORD_ENV: &str = "PREDICTX_KEYSTORE_PASSWORD";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain and contract configuration.
    pub chain: ChainConfig,
    /// Wallet/signer configuration.
    pub wallet: WalletConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Chain and contract configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint. `PREDICTX_RPC_URL` takes precedence when set.
    pub rpc_url: String,
    /// Deployed PredictX contract address (hex).
    pub contract_address: String,
    /// Chain id. Sepolia by default.
    pub chain_id: u64,
}

impl ChainConfig {
    /// Resolve the RPC endpoint, preferring the environment override.
    pub fn resolved_rpc_url(&self) -> String {
        std::env::var(RPC_URL_ENV).unwrap_or_else(|_| self.rpc_url.clone())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            contract_address: String::new(),
            chain_id: 11_155_111,
        }
    }
}

/// Where the signing key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerSource {
    /// Raw private key from `PREDICTX_PRIVATE_KEY`.
    #[default]
    Env,
    /// Encrypted JSON keystore file.
    Keystore,
    /// Hardware wallet. Present in config but not wired up yet.
    Hardware,
}

/// Wallet/signer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Signer source to use.
    pub source: SignerSource,
    /// Path to the keystore file when `source = "keystore"`.
    pub keystore_path: Option<PathBuf>,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Auto-refresh interval in seconds (0 to disable).
    pub auto_refresh_secs: u64,
    /// Default bet amount shown in the card input, in ETH.
    pub default_bet_amount: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            auto_refresh_secs: 30,
            default_bet_amount: "0.1".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh markets.
    pub refresh: String,
    /// Open the create-market form.
    pub create_market: String,
    /// Bet on outcome A from a market card.
    pub bet_a: String,
    /// Bet on outcome B from a market card.
    pub bet_b: String,
    /// Edit the bet amount input.
    pub edit_amount: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            create_market: "n".to_string(),
            bet_a: "a".to_string(),
            bet_b: "b".to_string(),
            edit_amount: "i".to_string(),
        }
    }
}
