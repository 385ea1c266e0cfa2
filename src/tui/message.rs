//! Message enum for Elm Architecture (TEA) pattern.
//!
//! All possible user actions in the application are represented as messages.
//! This enables unidirectional data flow and testable update logic.

/// All possible user actions in the application.
///
/// Messages are dispatched from key events and processed by `App::update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Reload the collection from the service
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Go to the first link
    GotoTop,
    /// Go to the last link
    GotoBottom,
    /// Page up
    PageUp,
    /// Page down
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Link actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the selected link in the system browser
    VisitSelected,
    /// Ask for confirmation before deleting the selected link
    RequestDelete,
    /// Confirm the pending delete and issue the request
    ConfirmDelete,
    /// Dismiss the delete confirmation without issuing a request
    CancelDelete,

    // ─────────────────────────────────────────────────────────────────────────
    // Add form
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the add-link form
    OpenAddForm,
    /// Add a character to the focused form field
    AddInput(char),
    /// Remove the last character from the focused form field
    AddBackspace,
    /// Move focus to the other form field
    AddSwitchField,
    /// Validate the form and issue the create request
    SubmitAdd,
    /// Close the add form without submitting
    CancelAdd,

    // ─────────────────────────────────────────────────────────────────────────
    // Search mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode, editing the current query
    EnterSearch,
    /// Exit search mode and clear the filter
    ExitSearch,
    /// Confirm the search, keeping the filter
    ConfirmSearch,
    /// Add a character to the search query
    SearchInput(char),
    /// Remove the last character from the search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Modal toggles
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the help modal
    ToggleHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // No-op
    // ─────────────────────────────────────────────────────────────────────────
    /// No operation (for unhandled keys or pending chords)
    None,
}
