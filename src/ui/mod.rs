//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{CreateMarketModal, HelpPanel, MarketCard, MarketList, StatusBar};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        StatusBar::render(frame, layout.status_area, store);

        match store.app.current_view {
            View::Markets => MarketList::render(frame, layout.main_area, store),
            View::MarketDetail => MarketCard::render(frame, layout.main_area, store),
        }

        // The create-market form overlays whichever view is behind it
        if store.create_form.is_some() {
            CreateMarketModal::render(frame, frame.area(), store);
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }

        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        }
    }
}
