//! Status bar and notification toast rendering.

use super::layout::{display_width, toast_rect};
use crate::tui::{App, ModalState, NotifyKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the status bar at the bottom of the screen.
pub fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let status = if app.search_mode {
        let text = if width >= 55 {
            " Type to filter | Enter: keep filter | Esc: clear "
        } else {
            " Enter:keep Esc:clear "
        };
        Span::styled(text, Style::default().fg(Color::Yellow))
    } else {
        match app.modal {
            ModalState::AddLink => Span::styled(
                " Tab: switch field | Enter: next/submit | Esc: cancel ",
                Style::default().fg(Color::Cyan),
            ),
            ModalState::ConfirmDelete => Span::styled(
                " y: delete | n/Esc: cancel ",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            ModalState::Help => {
                Span::styled(" Esc: close ", Style::default().fg(Color::DarkGray))
            }
            ModalState::None => {
                let text = if width >= 80 {
                    " j/k: nav | Enter: visit | a: add | d: delete | /: search | r: refresh | ?: help "
                        .to_string()
                } else if width >= 50 {
                    " j/k Enter:visit a:add d:del /:search ?:help ".to_string()
                } else {
                    " ? help ".to_string()
                };
                Span::styled(text, Style::default().fg(Color::DarkGray))
            }
        }
    };

    let paragraph = Paragraph::new(Line::from(status));
    f.render_widget(paragraph, area);
}

/// Draw the transient notification toast, if one is visible.
///
/// At most one toast exists; expiry is handled by the app tick.
pub fn draw_notification(f: &mut Frame, app: &App) {
    let Some(notification) = &app.notification else {
        return;
    };

    let (border_color, icon) = match notification.kind {
        NotifyKind::Success => (Color::Green, "✓"),
        NotifyKind::Error => (Color::Red, "✗"),
    };

    let text = format!("{} {}", icon, notification.message);
    let area = toast_rect(display_width(&text), f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::White),
    )))
    .block(block);

    f.render_widget(paragraph, area);
}
