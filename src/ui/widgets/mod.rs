//! TUI widgets.

mod create_market;
mod help;
mod market_card;
mod market_list;
mod notifications;
mod status_bar;

pub use create_market::CreateMarketModal;
pub use help::HelpPanel;
pub use market_card::MarketCard;
pub use market_list::MarketList;
pub use notifications::{render_error, render_notification};
pub use status_bar::StatusBar;
