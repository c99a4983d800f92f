//! # PredictX - Prediction Market TUI
//!
//! A terminal client for the PredictX binary prediction market contract.
//! Built with ratatui and alloy.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Core application state and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **Contract**: On-chain gateway (read/simulate/write)
//! - **State**: Centralized state management and the market view-model
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod app;
pub mod config;
pub mod contract;
pub mod error;
pub mod events;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use contract::ContractGateway;
pub use error::{Error, Result};
