//! Market detail card widget.
//!
//! Renders one market: pools, the dual-segment share bar, and the bet
//! form when the market still accepts bets.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::state::{DisplayStatus, Market, MarketView, Store, TxPhase, format_eth};

/// Market detail card.
pub struct MarketCard;

impl MarketCard {
    /// Render the card for the selected market.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(market) = store.markets.selected_market() else {
            let empty =
                Paragraph::new("No market selected").block(card_block(" Market ".to_string()));
            frame.render_widget(empty, area);
            return;
        };

        if store.markets.is_failed(market.id) {
            let error = Paragraph::new(Line::from(Span::styled(
                "Error loading market data",
                Style::default().fg(Color::Red),
            )))
            .block(card_block(format!(" Market #{} ", market.id)));
            frame.render_widget(error, area);
            return;
        }

        let view = market.view_at(chrono::Utc::now());
        let bar_width = area.width.saturating_sub(4).max(10) as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                market.description.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(status_badge(&view)),
            Line::from(""),
            Line::from(vec![
                Span::raw("Pool A: "),
                Span::styled(
                    format!("{} ETH", format_eth(market.pool_a)),
                    Style::default().fg(Color::Blue),
                ),
            ]),
            Line::from(vec![
                Span::raw("Pool B: "),
                Span::styled(
                    format!("{} ETH", format_eth(market.pool_b)),
                    Style::default().fg(Color::Red),
                ),
            ]),
            share_bar(market, &view, bar_width),
            Line::from(""),
        ];

        if let Some(winner) = view.winner {
            lines.push(Line::from(Span::styled(
                format!("Winner: {winner}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if view.betting_allowed {
            lines.extend(bet_form_lines(store));
        }

        if store.app.signer.is_none() {
            lines.push(Line::from(Span::styled(
                "Configure a wallet to place bets",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let card = Paragraph::new(lines).block(card_block(format!(" Market #{} ", market.id)));
        frame.render_widget(card, area);
    }
}

fn card_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn status_badge(view: &MarketView) -> Span<'static> {
    let style = match view.display_status {
        DisplayStatus::Resolved => Style::default().fg(Color::Green),
        DisplayStatus::Closed => Style::default().fg(Color::Red),
        DisplayStatus::AwaitingResolution => Style::default().fg(Color::Yellow),
        DisplayStatus::Countdown(_) => Style::default().fg(Color::Blue),
    };
    Span::styled(view.display_status.to_string(), style)
}

/// Dual-segment proportional bar: blue for A's share, red for B's.
fn share_bar(market: &Market, view: &MarketView, width: usize) -> Line<'static> {
    if market.pool_a.is_zero() && market.pool_b.is_zero() {
        return Line::from(Span::styled(
            "░".repeat(width),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let cells_a = (view.pool_share_a * Decimal::from(width as u64))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let cells_b = width - cells_a;

    Line::from(vec![
        Span::styled("█".repeat(cells_a), Style::default().fg(Color::Blue)),
        Span::styled("█".repeat(cells_b), Style::default().fg(Color::Red)),
    ])
}

fn bet_form_lines(store: &Store) -> Vec<Line<'static>> {
    let form = &store.markets.bet_form;
    let editing = store.app.is_editing() && store.create_form.is_none();

    let amount_style = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Amount: "),
            Span::styled(format!("{} ETH", form.amount_input), amount_style),
            Span::styled(
                if editing { "  (Enter to finish)" } else { "  [i] edit" },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("[a] Bet A", Style::default().fg(Color::Blue)),
            Span::raw("   "),
            Span::styled("[b] Bet B", Style::default().fg(Color::Red)),
        ]),
    ];

    match form.phase {
        TxPhase::Simulating => lines.push(pending_line("Simulating bet...")),
        TxPhase::Submitting => lines.push(pending_line("Placing bet...")),
        TxPhase::Settled => lines.push(Line::from(Span::styled(
            "Bet submitted",
            Style::default().fg(Color::Green),
        ))),
        TxPhase::Idle | TxPhase::Failed => {}
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

fn pending_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn empty_store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, "0.1".to_string())
    }

    fn store_with_market(failed: Vec<u64>) -> Store {
        let mut store = empty_store();
        store.reduce(Action::MarketsLoaded {
            markets: vec![Market {
                id: 0,
                description: "Will it rain tomorrow?".to_string(),
                ..Market::default()
            }],
            failed,
        });
        store.reduce(Action::SelectMarket(0));
        store
    }

    fn rendered(store: &Store) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| MarketCard::render(frame, frame.area(), store))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn card_shows_the_selected_market() {
        let out = rendered(&store_with_market(vec![]));
        assert!(out.contains("Market #0"));
        assert!(out.contains("Will it rain tomorrow?"));
    }

    #[test]
    fn card_without_a_selection_shows_a_fallback() {
        let out = rendered(&empty_store());
        assert!(out.contains("No market selected"));
    }

    #[test]
    fn failed_market_card_shows_a_generic_error() {
        let out = rendered(&store_with_market(vec![0]));
        assert!(out.contains("Market #0"));
        assert!(out.contains("Error loading market data"));
    }
}
