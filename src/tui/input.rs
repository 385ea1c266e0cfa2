//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps key events to messages based on current app mode. Handles the gg
//! chord with a non-blocking state machine.

use super::app::AddField;
use super::{App, Message, ModalState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// State machine for handling key chords (gg).
///
/// Instead of blocking with `event::poll()` inline, we track pending keys
/// and check for timeout in the main event loop.
#[derive(Debug, Default)]
pub struct InputState {
    /// The first key of a potential chord sequence
    pub pending: Option<KeyCode>,
    /// When the pending key was pressed (for timeout detection)
    pub pending_since: Option<Instant>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there's a pending chord that has timed out (500ms).
    pub fn has_timed_out(&self) -> bool {
        if let Some(since) = self.pending_since {
            since.elapsed().as_millis() > 500
        } else {
            false
        }
    }

    /// Clear the pending chord state.
    pub fn clear(&mut self) {
        self.pending = None;
        self.pending_since = None;
    }

    /// Set a pending chord key.
    pub fn set_pending(&mut self, key: KeyCode) {
        self.pending = Some(key);
        self.pending_since = Some(Instant::now());
    }
}

/// Map key events to messages based on current app mode.
pub fn dispatch(app: &App, input: &mut InputState, key: KeyEvent) -> Message {
    // Handle pending chords first
    if let Some(pending) = input.pending.take() {
        input.pending_since = None;
        return handle_chord(pending, key.code);
    }

    if app.search_mode {
        return dispatch_search_mode(key);
    }

    match app.modal {
        ModalState::AddLink => dispatch_add_form(app, key),
        ModalState::ConfirmDelete => dispatch_confirm_delete(key),
        ModalState::Help => dispatch_help_modal(key),
        ModalState::None => dispatch_normal_mode(input, key),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys in normal mode (main link list).
fn dispatch_normal_mode(input: &mut InputState, key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('j') | KeyCode::Down => Message::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Message::MoveUp,
        KeyCode::Char('G') => Message::GotoBottom,
        KeyCode::Char('g') => {
            input.set_pending(KeyCode::Char('g'));
            Message::None
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Message::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Message::PageUp,
        KeyCode::Char('/') => Message::EnterSearch,
        KeyCode::Enter | KeyCode::Char('o') => Message::VisitSelected,
        KeyCode::Char('a') => Message::OpenAddForm,
        KeyCode::Char('d') | KeyCode::Delete => Message::RequestDelete,
        KeyCode::Char('r') => Message::Refresh,
        KeyCode::Char('?') => Message::ToggleHelp,
        _ => Message::None,
    }
}

/// Handle keys in search mode.
fn dispatch_search_mode(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::ExitSearch,
        KeyCode::Enter => Message::ConfirmSearch,
        KeyCode::Backspace => Message::SearchBackspace,
        KeyCode::Char(c) => Message::SearchInput(c),
        _ => Message::None,
    }
}

/// Handle keys in the add-link form.
fn dispatch_add_form(app: &App, key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::CancelAdd,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Message::AddSwitchField,
        // Enter advances from the title field, submits from the URL field
        KeyCode::Enter => match app.add_form.focus {
            AddField::Title => Message::AddSwitchField,
            AddField::Url => Message::SubmitAdd,
        },
        KeyCode::Backspace => Message::AddBackspace,
        KeyCode::Char(c) => Message::AddInput(c),
        _ => Message::None,
    }
}

/// Handle keys in the delete confirmation modal.
fn dispatch_confirm_delete(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Message::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Message::CancelDelete,
        _ => Message::None,
    }
}

/// Handle keys in the help modal.
fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Message::CloseModal,
        _ => Message::None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chord handling
// ─────────────────────────────────────────────────────────────────────────────

/// Handle the second key of a chord sequence.
fn handle_chord(first: KeyCode, second: KeyCode) -> Message {
    match (first, second) {
        // gg -> go to top
        (KeyCode::Char('g'), KeyCode::Char('g')) => Message::GotoTop,
        _ => Message::None,
    }
}
