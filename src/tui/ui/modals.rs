//! Modal popup rendering - add form, delete confirmation, help.

use super::layout::popup_rect;
use crate::tui::{AddField, App};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![
        Span::styled(format!("  {:<7}", label), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

pub fn draw_add_form(f: &mut Frame, app: &App) {
    let area = popup_rect(55, 30, 46, 8, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" 󰌷 Add Link ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        Line::from(""),
        input_line(
            "Title:",
            &app.add_form.title,
            app.add_form.focus == AddField::Title,
        ),
        input_line(
            "URL:",
            &app.add_form.url,
            app.add_form.focus == AddField::Url,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter: next/submit · Tab: switch · Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

pub fn draw_confirm_delete(f: &mut Frame, app: &App) {
    let area = popup_rect(45, 20, 40, 7, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete link ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let title = app
        .pending_delete
        .as_ref()
        .map(|p| p.title.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Delete \"{}\"?", title),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  y",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(": delete    ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "n",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

pub fn draw_help(f: &mut Frame) {
    let area = popup_rect(50, 60, 44, 16, f.area());

    f.render_widget(Clear, area);

    let key_style = Style::default().fg(Color::Cyan);
    let desc_style = Style::default().fg(Color::White);

    let bindings: &[(&str, &str)] = &[
        ("j/k, ↓/↑", "Move selection"),
        ("gg / G", "First / last link"),
        ("Ctrl-d/u", "Page down / up"),
        ("Enter, o", "Visit selected link"),
        ("a", "Add a link"),
        ("d, Del", "Delete selected link"),
        ("/", "Search title and URL"),
        ("r", "Reload from server"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, desc) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", key), key_style),
            Span::styled((*desc).to_string(), desc_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc: close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" 󰋗 Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}
