//! Signer construction from configuration.

use crate::config::{KEYSTORE_PASSWORD_ENV, PRIVATE_KEY_ENV, SignerSource, WalletConfig};
use crate::error::{Error, Result};
use alloy::signers::local::PrivateKeySigner;

/// Build a local signer from the configured source.
///
/// Returns `Ok(None)` when no key material is available, leaving the
/// client in read-only mode. Writes then fail validation before any
/// network call.
pub fn build_signer(config: &WalletConfig) -> Result<Option<PrivateKeySigner>> {
    match config.source {
        SignerSource::Env => match std::env::var(PRIVATE_KEY_ENV) {
            Ok(key) => {
                let signer = key
                    .trim()
                    .parse::<PrivateKeySigner>()
                    .map_err(|e| Error::wallet(format!("invalid private key: {e}")))?;
                Ok(Some(signer))
            }
            Err(_) => Ok(None),
        },
        SignerSource::Keystore => {
            let path = config
                .keystore_path
                .as_ref()
                .ok_or_else(|| Error::config("keystore source selected but no keystore_path"))?;
            let password = std::env::var(KEYSTORE_PASSWORD_ENV)
                .map_err(|_| Error::wallet(format!("{KEYSTORE_PASSWORD_ENV} not set")))?;
            let signer = PrivateKeySigner::decrypt_keystore(path, password)
                .map_err(|e| Error::wallet(format!("failed to decrypt keystore: {e}")))?;
            Ok(Some(signer))
        }
        // Listed in the config schema, not wired up yet.
        SignerSource::Hardware => Err(Error::config("hardware wallet signing is not enabled")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystore_without_path_is_a_config_error() {
        let config = WalletConfig {
            source: SignerSource::Keystore,
            keystore_path: None,
        };
        assert!(matches!(build_signer(&config), Err(Error::Config(_))));
    }

    #[test]
    fn hardware_source_is_rejected() {
        let config = WalletConfig {
            source: SignerSource::Hardware,
            keystore_path: None,
        };
        assert!(matches!(build_signer(&config), Err(Error::Config(_))));
    }

    #[test]
    fn unreadable_keystore_is_a_wallet_error() {
        // Safety: no other test touches this variable
        unsafe { std::env::set_var(KEYSTORE_PASSWORD_ENV, "hunter2") };
        let config = WalletConfig {
            source: SignerSource::Keystore,
            keystore_path: Some(std::path::PathBuf::from("/nonexistent/keystore.json")),
        };
        assert!(matches!(build_signer(&config), Err(Error::Wallet(_))));
    }
}
