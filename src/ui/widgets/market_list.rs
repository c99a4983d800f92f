//! Market list widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;

use crate::state::{DisplayStatus, Store, format_eth};

/// Market list widget.
pub struct MarketList;

impl MarketList {
    /// Render the market list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let now = chrono::Utc::now();

        let header_cells = ["#", "Market", "Status", "Pool A", "Pool B", "A share"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.markets.markets.iter().enumerate().map(|(i, market)| {
            let selected = store.markets.selected_index == Some(i);
            let style = if selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            if store.markets.is_failed(market.id) {
                let cells = vec![
                    Cell::from(market.id.to_string()),
                    Cell::from("Error loading market data")
                        .style(Style::default().fg(Color::Red)),
                    Cell::from("-"),
                    Cell::from("-"),
                    Cell::from("-"),
                    Cell::from("-"),
                ];
                return Row::new(cells).style(style).height(1);
            }

            let view = market.view_at(now);
            let status_style = match view.display_status {
                DisplayStatus::Resolved => Style::default().fg(Color::Green),
                DisplayStatus::Closed => Style::default().fg(Color::Red),
                DisplayStatus::AwaitingResolution => Style::default().fg(Color::Yellow),
                DisplayStatus::Countdown(_) => Style::default().fg(Color::Blue),
            };

            let share_a = (view.pool_share_a * Decimal::ONE_HUNDRED).round();
            let cells = vec![
                Cell::from(market.id.to_string()),
                Cell::from(truncate_string(&market.description, 48)),
                Cell::from(view.display_status.to_string()).style(status_style),
                Cell::from(format!("{} ETH", format_eth(market.pool_a)))
                    .style(Style::default().fg(Color::Blue)),
                Cell::from(format!("{} ETH", format_eth(market.pool_b)))
                    .style(Style::default().fg(Color::Red)),
                Cell::from(format!("{share_a}%")),
            ];

            Row::new(cells).style(style).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(44),
                Constraint::Length(22),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Markets ({}) ", store.markets.markets.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.markets.selected_index);

        frame.render_stateful_widget(table, area, &mut state);

        if store.markets.loading {
            render_loading(frame, area);
        }
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Line::from(vec![Span::styled(
        "Loading...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )]);

    let block = Block::default();
    let inner = block.inner(area);

    // Render at bottom right
    let loading_area = Rect {
        x: inner.x + inner.width.saturating_sub(15),
        y: inner.y + inner.height.saturating_sub(1),
        width: 15.min(inner.width),
        height: 1,
    };

    frame.render_widget(Paragraph::new(loading), loading_area);
}
