//! PredictX contract integration.
//!
//! This module provides a high-level gateway to the deployed contract,
//! handling signer setup, call simulation, and response decoding.

mod gateway;
mod wallet;

pub use gateway::ContractGateway;
pub use wallet::build_signer;

use alloy::sol;

sol! {
    /// ABI surface of the deployed PredictX contract.
    #[sol(rpc)]
    contract PredictX {
        function marketCounter() external view returns (uint256);
        function getMarketInfo(uint256 marketId) external view
            returns (string memory, uint256, uint256, uint8, uint8, uint256);
        function createMarket(string calldata description, uint256 durationSeconds) external;
        function placeBet(uint256 marketId, uint8 outcome) external payable;
    }
}
