//! Create-market form widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::state::{CreateField, Store, TxPhase};

/// Modal form for creating a new market.
pub struct CreateMarketModal;

impl CreateMarketModal {
    /// Render the form over the current view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(form) = &store.create_form else {
            return;
        };

        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            field_line("Description", &form.description, form.focus == CreateField::Description),
            Line::from(""),
            field_line(
                "End time (UTC)",
                &form.end_time_input,
                form.focus == CreateField::EndTime,
            ),
            Line::from(Span::styled(
                "        YYYY-MM-DD HH:MM",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        match form.phase {
            TxPhase::Simulating => lines.push(Line::from(Span::styled(
                "Simulating...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))),
            TxPhase::Submitting => lines.push(Line::from(Span::styled(
                "Creating...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))),
            TxPhase::Idle | TxPhase::Settled | TxPhase::Failed => {
                lines.push(Line::from(vec![
                    Span::styled("Enter", Style::default().fg(Color::Cyan)),
                    Span::raw(" create   "),
                    Span::styled("Tab", Style::default().fg(Color::Cyan)),
                    Span::raw(" switch field   "),
                    Span::styled("Esc", Style::default().fg(Color::Cyan)),
                    Span::raw(" cancel"),
                ]));
            }
        }

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let modal = Paragraph::new(lines).block(
            Block::default()
                .title(" Create New Market ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        frame.render_widget(modal, popup_area);
    }
}

fn field_line(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}
