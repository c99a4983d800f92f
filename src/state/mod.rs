//! State management for PredictX.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod form_state;
mod market_state;

pub use app_state::{AppState, InputMode, View};
pub use form_state::{BetForm, CreateField, CreateMarketForm, CreateMarketIntent, TxPhase};
pub use market_state::{
    DisplayStatus, Market, MarketState, MarketStatus, MarketView, Outcome, format_eth,
    format_time_remaining,
};

use crate::error::Result;
use alloy_primitives::TxHash;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    SetInputMode(InputMode),
    SelectMarket(usize),
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,

    // Market data
    RefreshMarkets,
    MarketsLoading,
    MarketsLoaded {
        markets: Vec<Market>,
        failed: Vec<u64>,
    },

    // Create-market form
    OpenCreateMarket,
    CloseCreateMarket,
    SubmitCreateMarket,
    CreatePhase(TxPhase),
    MarketCreated(TxHash),
    CreateFailed(String),

    // Betting
    EditBetAmount,
    SubmitBet(Outcome),
    BetPhase(TxPhase),
    BetPlaced(TxHash),
    BetFailed(String),

    // Form input
    InputChar(char),
    InputBackspace,
    InputTab,
    StopEditing,

    // UI feedback
    ShowNotification(Notification),
    DismissNotification,
    SetError(String),
    ClearError,

    // Connection status
    SetConnected(bool),
    SetLoading(bool),

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Market state.
    pub markets: MarketState,
    /// Create-market form, present while the modal is open.
    pub create_form: Option<CreateMarketForm>,
    /// Default bet amount used when resetting the card input.
    default_bet_amount: String,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, default_bet_amount: String) -> Self {
        Self {
            app: AppState::default(),
            markets: MarketState::default(),
            create_form: None,
            default_bet_amount,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    ///
    /// Gateway-touching actions (`RefreshMarkets`, `SubmitCreateMarket`,
    /// `SubmitBet`) are handled by the app before they reach here.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.app.current_view = view,
            Action::SetInputMode(mode) => self.app.input_mode = mode,
            Action::SelectMarket(index) => self.select(index),
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.select(0),
            Action::GoToBottom => self.select(self.markets.markets.len().saturating_sub(1)),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,

            // Market data
            Action::MarketsLoading => self.markets.loading = true,
            Action::MarketsLoaded { markets, failed } => {
                self.markets.markets = markets;
                self.markets.failed = failed.into_iter().collect();
                self.markets.loading = false;
                self.markets.last_updated = Some(chrono::Utc::now());
                if let Some(i) = self.markets.selected_index {
                    let max = self.markets.markets.len().saturating_sub(1);
                    self.markets.selected_index =
                        (!self.markets.markets.is_empty()).then_some(i.min(max));
                }
            }

            // Create-market form
            Action::OpenCreateMarket => {
                self.create_form = Some(CreateMarketForm::new(chrono::Utc::now()));
                self.app.input_mode = InputMode::Insert;
            }
            Action::CloseCreateMarket => {
                self.create_form = None;
                self.app.input_mode = InputMode::Normal;
            }
            Action::CreatePhase(phase) => {
                if let Some(form) = &mut self.create_form {
                    form.phase = phase;
                }
            }
            Action::MarketCreated(hash) => {
                self.create_form = None;
                self.app.input_mode = InputMode::Normal;
                self.app.notification = Some(Notification::success(format!(
                    "Market creation submitted: {hash}"
                )));
            }
            Action::CreateFailed(reason) => {
                if let Some(form) = &mut self.create_form {
                    form.phase = TxPhase::Failed;
                    form.error = Some(reason);
                }
            }

            // Betting
            Action::EditBetAmount => self.app.input_mode = InputMode::Insert,
            Action::BetPhase(phase) => self.markets.bet_form.phase = phase,
            Action::BetPlaced(hash) => {
                self.markets.bet_form.phase = TxPhase::Settled;
                self.markets.bet_form.error = None;
                self.app.notification =
                    Some(Notification::success(format!("Bet submitted: {hash}")));
            }
            Action::BetFailed(reason) => {
                self.markets.bet_form.phase = TxPhase::Failed;
                self.markets.bet_form.error = Some(reason);
            }

            // Form input, routed to whichever form is active
            Action::InputChar(c) => {
                if let Some(form) = &mut self.create_form {
                    form.push_char(c);
                } else {
                    self.markets.bet_form.push_char(c);
                }
            }
            Action::InputBackspace => {
                if let Some(form) = &mut self.create_form {
                    form.pop_char();
                } else {
                    self.markets.bet_form.pop_char();
                }
            }
            Action::InputTab => {
                if let Some(form) = &mut self.create_form {
                    form.toggle_focus();
                }
            }
            Action::StopEditing => self.app.input_mode = InputMode::Normal,

            // UI feedback
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }
            Action::SetError(error) => {
                self.app.error = Some(error);
                self.app.loading = false;
            }
            Action::ClearError => {
                self.app.error = None;
            }

            // Connection status
            Action::SetConnected(connected) => {
                self.app.connected = connected;
            }
            Action::SetLoading(loading) => {
                self.app.loading = loading;
            }

            // Handled upstream by the app
            Action::RefreshMarkets | Action::SubmitCreateMarket | Action::SubmitBet(_) => {
                self.app.loading = true;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn select(&mut self, index: usize) {
        if self.markets.markets.is_empty() {
            self.markets.selected_index = None;
            return;
        }
        let max = self.markets.markets.len() - 1;
        let clamped = index.min(max);
        if self.markets.selected_index != Some(clamped) {
            self.markets.bet_form.reset(&self.default_bet_amount);
        }
        self.markets.selected_index = Some(clamped);
    }

    fn scroll(&mut self, delta: i32) {
        let Some(current) = self.markets.selected_index else {
            self.select(0);
            return;
        };
        self.select((current as i32 + delta).max(0) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, "0.1".to_string())
    }

    fn markets(n: u64) -> Vec<Market> {
        (0..n)
            .map(|id| Market {
                id,
                description: format!("market {id}"),
                ..Market::default()
            })
            .collect()
    }

    #[test]
    fn loaded_markets_keep_dense_ids() {
        let mut store = test_store();
        store.reduce(Action::MarketsLoaded {
            markets: markets(3),
            failed: vec![],
        });
        let ids: Vec<u64> = store.markets.markets.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(!store.markets.loading);
    }

    #[test]
    fn failed_reads_are_tracked_per_card() {
        let mut store = test_store();
        store.reduce(Action::MarketsLoaded {
            markets: markets(3),
            failed: vec![1],
        });
        assert!(!store.markets.is_failed(0));
        assert!(store.markets.is_failed(1));
    }

    #[test]
    fn selection_is_clamped_and_resets_the_bet_form() {
        let mut store = test_store();
        store.reduce(Action::MarketsLoaded {
            markets: markets(2),
            failed: vec![],
        });
        store.markets.bet_form.amount_input = "5".to_string();

        store.reduce(Action::SelectMarket(10));
        assert_eq!(store.markets.selected_index, Some(1));
        assert_eq!(store.markets.bet_form.amount_input, "0.1");
    }

    #[test]
    fn scrolling_an_empty_list_selects_nothing() {
        let mut store = test_store();
        store.reduce(Action::ScrollDown);
        assert_eq!(store.markets.selected_index, None);
    }

    #[test]
    fn create_form_lifecycle() {
        let mut store = test_store();
        store.reduce(Action::OpenCreateMarket);
        assert!(store.create_form.is_some());
        assert!(store.app.is_editing());

        store.reduce(Action::InputChar('W'));
        store.reduce(Action::InputChar('?'));
        store.reduce(Action::InputBackspace);
        assert_eq!(store.create_form.as_ref().unwrap().description, "W");

        store.reduce(Action::CreateFailed("insufficient funds".to_string()));
        let form = store.create_form.as_ref().unwrap();
        assert_eq!(form.phase, TxPhase::Failed);
        assert_eq!(form.error.as_deref(), Some("insufficient funds"));

        store.reduce(Action::MarketCreated(TxHash::ZERO));
        assert!(store.create_form.is_none());
        assert!(store.app.notification.is_some());
    }

    #[test]
    fn bet_input_is_routed_when_no_modal_is_open() {
        let mut store = test_store();
        store.reduce(Action::MarketsLoaded {
            markets: markets(1),
            failed: vec![],
        });
        store.reduce(Action::SelectMarket(0));
        store.markets.bet_form.amount_input.clear();

        store.reduce(Action::InputChar('2'));
        store.reduce(Action::InputChar('.'));
        store.reduce(Action::InputChar('5'));
        assert_eq!(store.markets.bet_form.amount_input, "2.5");
    }
}
