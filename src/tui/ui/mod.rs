mod layout;
mod modals;
mod status;

use super::{App, ModalState};
use crate::data::{truncate_url, Link};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header/search
            Constraint::Min(0),    // Link list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_links(f, app, chunks[1]);
    status::draw_status_bar(f, app, chunks[2]);

    // Overlays
    match app.modal {
        ModalState::AddLink => modals::draw_add_form(f, app),
        ModalState::ConfirmDelete => modals::draw_confirm_delete(f, app),
        ModalState::Help => modals::draw_help(f),
        ModalState::None => {}
    }

    status::draw_notification(f, app);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else if app.is_loading {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = if app.search_mode {
        Line::from(vec![
            Span::styled("󰍉 Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.search_input.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if app.is_loading {
        Line::from(vec![
            Span::styled("󰌷 ", Style::default().fg(Color::Cyan)),
            Span::styled(
                "linkdeck ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} Loading...", app.spinner_char()),
                Style::default().fg(Color::Cyan),
            ),
        ])
    } else {
        let mut spans = vec![
            Span::styled("󰌷 ", Style::default().fg(Color::Cyan)),
            Span::styled(
                "linkdeck ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "[{} links · {} domains]",
                    app.stats.total, app.stats.domains
                ),
                Style::default().fg(Color::Green),
            ),
        ];
        if !app.query.is_empty() {
            spans.push(Span::styled(
                format!(" filter: \"{}\"", app.query),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(loaded) = app.last_loaded {
            spans.push(Span::styled(
                format!(" · updated {}", loaded.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

/// Build the display row for one link.
///
/// Title and URL go into span *content*, never into markup: whatever
/// characters the user saved render literally. The URL is truncated for
/// display only; visiting always uses the stored URL.
pub fn link_row(link: &Link) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            link.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            truncate_url(&link.url),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ])
}

fn draw_links(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Links ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.load_failed {
        draw_empty_state(
            f,
            inner,
            "Couldn't load your links",
            "Check the link service and press r to retry.",
        );
        return;
    }

    if app.links.is_empty() {
        draw_empty_state(
            f,
            inner,
            "No links yet",
            "Press a to add your first link.",
        );
        return;
    }

    if app.filtered_indices.is_empty() {
        draw_empty_state(
            f,
            inner,
            "No results found",
            "Try different search terms.",
        );
        return;
    }

    let items: Vec<ListItem> = app
        .filtered_indices
        .iter()
        .filter_map(|&idx| app.links.get(idx))
        .map(|link| ListItem::new(link_row(link)))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, inner, &mut state);
}

fn draw_empty_state(f: &mut Frame, area: Rect, title: &str, hint: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
