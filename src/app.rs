//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::config::Config;
use crate::contract::{ContractGateway, build_signer};
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::state::{Action, Market, Outcome, Store, TxPhase};

use alloy_primitives::Address;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Contract gateway.
    gateway: Option<ContractGateway>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let mut store = Store::new(action_tx.clone(), config.ui.default_bet_amount.clone());

        // Create event handler
        let event_handler = EventHandler::new(
            action_tx,
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );

        // Missing key material leaves us read-only, not broken
        let signer = match build_signer(&config.wallet) {
            Ok(signer) => signer,
            Err(e) => {
                tracing::warn!("Failed to build signer: {}", e);
                None
            }
        };

        let gateway = match ContractGateway::connect(&config.chain, signer) {
            Ok(gateway) => {
                store.app.signer = gateway.signer_address().map(short_address);
                Some(gateway)
            }
            Err(e) => {
                tracing::warn!("Failed to connect contract gateway: {}", e);
                None
            }
        };

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            gateway,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Initial connection test
        if let Some(gateway) = &self.gateway {
            match gateway.test_connection().await {
                Ok(chain_id) => {
                    tracing::info!(chain_id, "connected");
                    self.store.reduce(Action::SetConnected(true));
                    self.store.dispatch(Action::RefreshMarkets)?;
                }
                Err(e) => {
                    tracing::warn!("connection test failed: {}", e);
                    self.store.reduce(Action::SetConnected(false));
                }
            }
        }

        let auto_refresh = self.config.ui.auto_refresh_secs;
        let mut refresh_interval =
            tokio::time::interval(Duration::from_secs(auto_refresh.max(1)));
        // The first tick fires immediately; the initial refresh above
        // already covers it
        refresh_interval.tick().await;

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                crate::ui::Ui::render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await?;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }

                // Periodic refresh
                _ = refresh_interval.tick(), if auto_refresh > 0 => {
                    self.refresh_markets().await?;
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::RefreshMarkets => {
                self.refresh_markets().await?;
            }
            Action::SubmitCreateMarket => {
                self.submit_create_market().await?;
            }
            Action::SubmitBet(outcome) => {
                self.submit_bet(outcome).await?;
            }
            other => {
                // Let the store handle the action
                self.store.reduce(other);
            }
        }

        Ok(())
    }

    /// Fetch the market count and every market in one batched pass.
    ///
    /// A failed count yields an empty list; a failed market read yields
    /// the zero-valued placeholder and a per-card error marker.
    async fn refresh_markets(&mut self) -> Result<()> {
        self.store.reduce(Action::MarketsLoading);

        let Some(gateway) = &self.gateway else {
            self.store.reduce(Action::MarketsLoaded {
                markets: Vec::new(),
                failed: Vec::new(),
            });
            self.store.reduce(Action::SetLoading(false));
            return Ok(());
        };

        let count = match gateway.market_count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("failed to read market counter: {}", e);
                self.store.reduce(Action::SetConnected(false));
                self.store.reduce(Action::MarketsLoaded {
                    markets: Vec::new(),
                    failed: Vec::new(),
                });
                self.store.reduce(Action::SetLoading(false));
                return Ok(());
            }
        };

        let reads = futures::future::join_all((0..count).map(|id| gateway.market(id))).await;

        let mut markets = Vec::with_capacity(reads.len());
        let mut failed = Vec::new();
        for (id, result) in (0..count).zip(reads) {
            match result {
                Ok(market) => markets.push(market),
                Err(e) => {
                    tracing::warn!(id, "failed to read market: {}", e);
                    markets.push(Market::unavailable(id));
                    failed.push(id);
                }
            }
        }

        self.store.reduce(Action::SetConnected(true));
        self.store.reduce(Action::MarketsLoaded { markets, failed });
        self.store.reduce(Action::SetLoading(false));
        Ok(())
    }

    /// Validate, simulate, and send a create-market transaction.
    async fn submit_create_market(&mut self) -> Result<()> {
        let Some(form) = &self.store.create_form else {
            return Ok(());
        };
        if form.phase.in_flight() {
            return Ok(());
        }

        // Client-side validation happens before any network call
        let intent = match form.intent(chrono::Utc::now()) {
            Ok(intent) => intent,
            Err(e) => {
                self.store.reduce(Action::CreateFailed(e.to_string()));
                return Ok(());
            }
        };

        let Some(gateway) = &self.gateway else {
            self.store
                .reduce(Action::CreateFailed(Error::validation("no wallet configured").to_string()));
            return Ok(());
        };

        self.store.reduce(Action::CreatePhase(TxPhase::Simulating));
        if let Err(e) = gateway
            .simulate_create_market(&intent.description, intent.duration_seconds)
            .await
        {
            tracing::warn!("createMarket simulation failed: {}", e);
            self.store.reduce(Action::CreateFailed(e.to_string()));
            return Ok(());
        }

        self.store.reduce(Action::CreatePhase(TxPhase::Submitting));
        match gateway
            .send_create_market(&intent.description, intent.duration_seconds)
            .await
        {
            Ok(hash) => {
                self.store.reduce(Action::MarketCreated(hash));
                self.store.dispatch(Action::RefreshMarkets)?;
            }
            Err(e) => {
                tracing::warn!("createMarket send failed: {}", e);
                self.store.reduce(Action::CreateFailed(e.to_string()));
            }
        }

        Ok(())
    }

    /// Validate, simulate, and send a bet on the selected market.
    async fn submit_bet(&mut self, outcome: Outcome) -> Result<()> {
        let Some(market) = self.store.markets.selected_market() else {
            return Ok(());
        };
        let market_id = market.id;

        if self.store.markets.bet_form.phase.in_flight() {
            return Ok(());
        }

        let amount_wei = match self.store.markets.bet_form.amount_wei() {
            Ok(amount) => amount,
            Err(e) => {
                self.store.reduce(Action::BetFailed(e.to_string()));
                return Ok(());
            }
        };

        let Some(gateway) = &self.gateway else {
            self.store
                .reduce(Action::BetFailed(Error::validation("no wallet configured").to_string()));
            return Ok(());
        };

        self.store.reduce(Action::BetPhase(TxPhase::Simulating));
        if let Err(e) = gateway.simulate_place_bet(market_id, outcome, amount_wei).await {
            tracing::warn!(market_id, "placeBet simulation failed: {}", e);
            self.store.reduce(Action::BetFailed(e.to_string()));
            return Ok(());
        }

        self.store.reduce(Action::BetPhase(TxPhase::Submitting));
        match gateway.send_place_bet(market_id, outcome, amount_wei).await {
            Ok(hash) => {
                self.store.reduce(Action::BetPlaced(hash));
                self.store.dispatch(Action::RefreshMarkets)?;
            }
            Err(e) => {
                tracing::warn!(market_id, "placeBet send failed: {}", e);
                self.store.reduce(Action::BetFailed(e.to_string()));
            }
        }

        Ok(())
    }
}

/// Shorten an address for the status bar.
fn short_address(address: Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn addresses_are_shortened_for_display() {
        let address = format!("0x{}", "ab".repeat(20)).parse::<Address>().unwrap();
        let short = short_address(address);
        assert_eq!(short.len(), "0xabab".len() + '…'.len_utf8() + 4);
        assert!(short.starts_with("0x"));
        assert!(short.contains('…'));
    }
}
