//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 70, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            section("Navigation"),
            Line::from(""),
            binding("j/↓  ", "Move down"),
            binding("k/↑  ", "Move up"),
            binding("Enter", "Open market card"),
            binding("Esc  ", "Back to the list"),
            Line::from(""),
            section("Markets"),
            Line::from(""),
            binding("r    ", "Refresh markets"),
            binding("n    ", "Create a new market"),
            binding("a    ", "Bet on outcome A"),
            binding("b    ", "Bet on outcome B"),
            binding("i    ", "Edit bet amount"),
            Line::from(""),
            section("General"),
            Line::from(""),
            binding("?    ", "Toggle help"),
            binding("q    ", "Quit"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn binding(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys}  "), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
