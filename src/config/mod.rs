//! Configuration management for PredictX.

mod settings;

pub use settings::{
    ChainConfig, Config, KEYSTORE_PASSWORD_ENV, KeyBindings, PRIVATE_KEY_ENV, RPC_URL_ENV,
    SignerSource, UiConfig, WalletConfig,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "predictx", "predictx")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "predictx", "predictx")
        .map(|dirs| dirs.data_dir().join("logs"))
        .ok_or_else(|| Error::config("Could not determine log directory"))
}
