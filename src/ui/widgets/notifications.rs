//! Notification and error popups.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::state::{Notification, NotificationLevel};

/// Border color and icon for a notification level.
fn level_decor(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Info => (Color::Cyan, "ℹ"),
        NotificationLevel::Success => (Color::Green, "✓"),
        NotificationLevel::Warning => (Color::Yellow, "⚠"),
        NotificationLevel::Error => (Color::Red, "✗"),
    }
}

/// Clear the area and draw a bordered one-line popup.
fn popup(frame: &mut Frame, area: Rect, border_color: Color, content: Line<'static>) {
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);
}

/// Render a notification popup.
pub fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let (color, icon) = level_decor(notification.level);
    let content = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::raw(notification.message.clone()),
    ]);
    popup(frame, area, color, content);
}

/// Render an error popup.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let content = Line::from(vec![
        Span::styled(
            "✗ Error: ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(error.to_string()),
    ]);
    popup(frame, area, Color::Red, content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn each_level_has_its_own_color_and_icon() {
        assert_eq!(level_decor(NotificationLevel::Info), (Color::Cyan, "ℹ"));
        assert_eq!(level_decor(NotificationLevel::Success), (Color::Green, "✓"));
        assert_eq!(level_decor(NotificationLevel::Warning), (Color::Yellow, "⚠"));
        assert_eq!(level_decor(NotificationLevel::Error), (Color::Red, "✗"));
    }
}
