//! High-level gateway to the PredictX contract.
//!
//! Writes follow a simulate-then-send discipline: every transaction is
//! dry-run via `eth_call` first, and a revert surfaces as a simulation
//! error carrying the reason before anything is signed and sent. The
//! simulate and send halves are separate operations so callers can track
//! which half an in-flight write is in.

use super::PredictX;
use crate::config::ChainConfig;
use crate::error::{Error, Result};
use crate::state::{Market, MarketStatus, Outcome};
use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::{Address, TxHash, U256};

/// Gateway for reading market state and submitting transactions.
///
/// Holds no state across calls beyond the provider handle; a snapshot
/// returned by a read is already stale by the time it renders.
pub struct ContractGateway {
    /// Typed contract instance.
    instance: PredictX::PredictXInstance<DynProvider>,
    /// Shared provider, kept for connection checks.
    provider: DynProvider,
    /// Address of the configured signer, if any.
    signer: Option<Address>,
}

impl ContractGateway {
    /// Connect to the configured RPC endpoint.
    ///
    /// `signer` is optional; without one the gateway is read-only and
    /// every write fails validation before touching the network.
    pub fn connect(config: &ChainConfig, signer: Option<PrivateKeySigner>) -> Result<Self> {
        let url = config
            .resolved_rpc_url()
            .parse()
            .map_err(|e| Error::config(format!("invalid RPC URL: {e}")))?;

        let address = config
            .contract_address
            .parse::<Address>()
            .map_err(|e| Error::config(format!("invalid contract address: {e}")))?;

        let (provider, signer_address) = match signer {
            Some(signer) => {
                let signer_address = signer.address();
                let wallet = EthereumWallet::from(signer);
                let provider = ProviderBuilder::new()
                    .wallet(wallet)
                    .connect_http(url)
                    .erased();
                (provider, Some(signer_address))
            }
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        Ok(Self {
            instance: PredictX::new(address, provider.clone()),
            provider,
            signer: signer_address,
        })
    }

    /// Address of the configured signer, if any.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    /// Whether the gateway can sign transactions.
    pub fn can_write(&self) -> bool {
        self.signer.is_some()
    }

    /// Probe the RPC endpoint.
    pub async fn test_connection(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| Error::transport(e.to_string()))
    }

    /// Read the market counter. Markets occupy the dense index range
    /// `0..count`.
    pub async fn market_count(&self) -> Result<u64> {
        let count = self
            .instance
            .marketCounter()
            .call()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        u64::try_from(count).map_err(|_| Error::decode("market counter out of u64 range"))
    }

    /// Read a single market snapshot.
    pub async fn market(&self, id: u64) -> Result<Market> {
        let raw = self
            .instance
            .getMarketInfo(U256::from(id))
            .call()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        decode_market(id, raw)
    }

    /// Dry-run a `createMarket` call without committing state.
    pub async fn simulate_create_market(
        &self,
        description: &str,
        duration_seconds: u64,
    ) -> Result<()> {
        self.require_signer()?;
        if duration_seconds == 0 {
            return Err(Error::validation("market duration must be positive"));
        }

        self.instance
            .createMarket(description.to_string(), U256::from(duration_seconds))
            .call()
            .await
            .map_err(simulation_error)?;
        Ok(())
    }

    /// Submit a `createMarket` transaction.
    ///
    /// Returns the transaction hash without waiting for confirmation.
    pub async fn send_create_market(
        &self,
        description: &str,
        duration_seconds: u64,
    ) -> Result<TxHash> {
        self.require_signer()?;

        let pending = self
            .instance
            .createMarket(description.to_string(), U256::from(duration_seconds))
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let hash = *pending.tx_hash();
        tracing::info!(%hash, description, duration_seconds, "createMarket submitted");
        Ok(hash)
    }

    /// Dry-run a `placeBet` call. The amount rides as transaction value,
    /// not as a call argument.
    pub async fn simulate_place_bet(
        &self,
        market_id: u64,
        outcome: Outcome,
        amount_wei: U256,
    ) -> Result<()> {
        self.require_signer()?;
        let side = bet_side(outcome)?;
        if amount_wei.is_zero() {
            return Err(Error::validation("bet amount must be positive"));
        }

        self.instance
            .placeBet(U256::from(market_id), side)
            .value(amount_wei)
            .call()
            .await
            .map_err(simulation_error)?;
        Ok(())
    }

    /// Submit a `placeBet` transaction.
    pub async fn send_place_bet(
        &self,
        market_id: u64,
        outcome: Outcome,
        amount_wei: U256,
    ) -> Result<TxHash> {
        self.require_signer()?;
        let side = bet_side(outcome)?;

        let pending = self
            .instance
            .placeBet(U256::from(market_id), side)
            .value(amount_wei)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let hash = *pending.tx_hash();
        tracing::info!(%hash, market_id, ?outcome, %amount_wei, "placeBet submitted");
        Ok(hash)
    }

    fn require_signer(&self) -> Result<()> {
        if self.signer.is_none() {
            return Err(Error::validation("no wallet configured"));
        }
        Ok(())
    }
}

fn bet_side(outcome: Outcome) -> Result<u8> {
    outcome
        .wire()
        .ok_or_else(|| Error::validation("a bet must pick outcome A or B"))
}

/// Decode a `getMarketInfo` response into a [`Market`].
///
/// Out-of-range discriminants are an explicit decode error rather than a
/// silent zero substitution; callers that must render regardless fall
/// back to [`Market::unavailable`].
fn decode_market(id: u64, raw: PredictX::getMarketInfoReturn) -> Result<Market> {
    let outcome = Outcome::from_wire(raw._3)
        .ok_or_else(|| Error::decode(format!("market {id}: unknown outcome {}", raw._3)))?;
    let status = MarketStatus::from_wire(raw._4)
        .ok_or_else(|| Error::decode(format!("market {id}: unknown status {}", raw._4)))?;
    let end_time = u64::try_from(raw._5)
        .map_err(|_| Error::decode(format!("market {id}: end time out of range")))?;

    Ok(Market {
        id,
        description: raw._0,
        pool_a: raw._1,
        pool_b: raw._2,
        outcome,
        status,
        end_time,
    })
}

fn simulation_error(err: alloy::contract::Error) -> Error {
    Error::simulation(revert_reason(&err))
}

/// Extract a human-readable revert reason from a contract error.
fn revert_reason(err: &alloy::contract::Error) -> String {
    use alloy::sol_types::{Revert, SolError};

    if let Some(data) = err.as_revert_data()
        && let Ok(revert) = Revert::abi_decode(&data)
    {
        return revert.reason;
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_market(outcome: u8, status: u8) -> PredictX::getMarketInfoReturn {
        PredictX::getMarketInfoReturn {
            _0: "Will it rain tomorrow?".to_string(),
            _1: U256::from(3_000_000_000_000_000_000u128),
            _2: U256::from(1_000_000_000_000_000_000u128),
            _3: outcome,
            _4: status,
            _5: U256::from(1_900_000_000u64),
        }
    }

    fn test_config(address_byte: &str) -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: format!("0x{}", address_byte.repeat(20)),
            chain_id: 11_155_111,
        }
    }

    #[test]
    fn decodes_a_well_formed_market() {
        let market = decode_market(7, raw_market(1, 2)).expect("decode");
        assert_eq!(market.id, 7);
        assert_eq!(market.description, "Will it rain tomorrow?");
        assert_eq!(market.outcome, Outcome::A);
        assert_eq!(market.status, MarketStatus::Resolved);
        assert_eq!(market.end_time, 1_900_000_000);
    }

    #[test]
    fn unknown_outcome_discriminant_is_a_decode_error() {
        assert!(matches!(
            decode_market(0, raw_market(3, 0)),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn unknown_status_discriminant_is_a_decode_error() {
        assert!(matches!(
            decode_market(0, raw_market(0, 9)),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn writes_without_a_signer_fail_before_the_network() {
        let gateway = ContractGateway::connect(&test_config("11"), None).expect("gateway");
        assert!(!gateway.can_write());

        // Dummy endpoint: reaching the network would error as Transport,
        // so a Validation error proves the short-circuit.
        let err = tokio_test::block_on(gateway.simulate_create_market("test", 3600)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = tokio_test::block_on(gateway.simulate_place_bet(0, Outcome::A, U256::from(1)))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = tokio_test::block_on(gateway.send_create_market("test", 3600)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn bad_write_arguments_fail_validation_with_a_signer() {
        let signer = PrivateKeySigner::random();
        let gateway =
            ContractGateway::connect(&test_config("22"), Some(signer)).expect("gateway");
        assert!(gateway.can_write());

        let err = tokio_test::block_on(gateway.simulate_create_market("test", 0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = tokio_test::block_on(gateway.simulate_place_bet(0, Outcome::B, U256::ZERO))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = tokio_test::block_on(gateway.simulate_place_bet(
            0,
            Outcome::None,
            U256::from(1),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
