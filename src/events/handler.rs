//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Outcome, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Action sender (for future async dispatch).
    #[allow(dead_code)]
    action_tx: mpsc::UnboundedSender<Action>,
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long one poll for terminal input blocks.
    tick_rate: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Clone)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    create_form_open: bool,
    betting_allowed: bool,
    bet_in_flight: bool,
}

impl EventHandler {
    /// Create a new event handler with the given action sender and bindings.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        keybindings: KeyBindings,
        tick_rate: Duration,
    ) -> Self {
        Self {
            action_tx,
            keybindings,
            tick_rate,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        let betting_allowed = store
            .markets
            .selected_market()
            .map(|m| m.view_at(chrono::Utc::now()).betting_allowed)
            .unwrap_or(false);

        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            create_form_open: store.create_form.is_some(),
            betting_allowed,
            bet_in_flight: store.markets.bet_form.phase.in_flight(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.tick_rate)? {
            let event = event::read()?;
            match event {
                CrosstermEvent::Key(key) => {
                    if let Some(action) = self.handle_key(key) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse(mouse) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Resize(_, _) => {
                    // Terminal will automatically redraw
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Insert => self.handle_insert_mode(key, snapshot),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let input = super::InputEvent::from(key);

        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RefreshMarkets);
        }
        if input.matches(&self.keybindings.create_market) {
            return Some(Action::OpenCreateMarket);
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if key.code == KeyCode::Home {
            return Some(Action::GoToTop);
        }
        if key.code == KeyCode::End {
            return Some(Action::GoToBottom);
        }

        match snapshot.current_view {
            View::Markets => self.handle_markets_view(key),
            View::MarketDetail => self.handle_detail_view(key, snapshot),
        }
    }

    fn handle_markets_view(&self, key: KeyEvent) -> Option<Action> {
        let input = super::InputEvent::from(key);

        if input.matches(&self.keybindings.select) {
            return Some(Action::SetView(View::MarketDetail));
        }
        if input.matches(&self.keybindings.back) {
            return Some(Action::DismissNotification);
        }
        None
    }

    fn handle_detail_view(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let input = super::InputEvent::from(key);

        if input.matches(&self.keybindings.back) {
            return Some(Action::SetView(View::Markets));
        }

        // Bet actions only while the market accepts bets and nothing is
        // in flight
        if snapshot.betting_allowed && !snapshot.bet_in_flight {
            if input.matches(&self.keybindings.bet_a) {
                return Some(Action::SubmitBet(Outcome::A));
            }
            if input.matches(&self.keybindings.bet_b) {
                return Some(Action::SubmitBet(Outcome::B));
            }
            if input.matches(&self.keybindings.edit_amount) {
                return Some(Action::EditBetAmount);
            }
        }

        None
    }

    fn handle_insert_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                if snapshot.create_form_open {
                    Some(Action::CloseCreateMarket)
                } else {
                    Some(Action::StopEditing)
                }
            }
            KeyCode::Enter => {
                if snapshot.create_form_open {
                    Some(Action::SubmitCreateMarket)
                } else {
                    Some(Action::StopEditing)
                }
            }
            KeyCode::Tab => Some(Action::InputTab),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn poll_interval_comes_from_the_configured_tick_rate() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let handler = EventHandler::new(tx, KeyBindings::default(), Duration::from_millis(250));
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }
}
