use crate::api::{ApiError, LinkService};
use crate::config::Config;
use crate::data::{filter_links, validate_new_link, Link, LinkId, LinkStats};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Braille spinner frames for loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Active modal state - only one modal can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    AddLink,
    ConfirmDelete,
    Help,
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

/// Which add-form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Title,
    Url,
}

/// Input state of the add-link form.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub title: String,
    pub url: String,
    pub focus: AddField,
}

impl AddForm {
    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            AddField::Title => &mut self.title,
            AddField::Url => &mut self.url,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            AddField::Title => AddField::Url,
            AddField::Url => AddField::Title,
        };
    }

    fn clear(&mut self) {
        self.title.clear();
        self.url.clear();
        self.focus = AddField::Title;
    }
}

/// A delete waiting for user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: LinkId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

/// Transient toast notification. At most one is visible; a newer one replaces
/// the current immediately.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotifyKind,
    pub raised_at: Instant,
}

/// Completion of a background service call.
///
/// Each request is tagged with a per-operation-kind sequence number at issue
/// time; a completion is applied only while its number is still the newest
/// issued for that kind, so a stale response can never clobber fresher state.
#[derive(Debug)]
pub enum OpOutcome {
    Loaded {
        seq: u64,
        result: Result<Vec<Link>, ApiError>,
    },
    Added {
        seq: u64,
        result: Result<Link, ApiError>,
    },
    Deleted {
        seq: u64,
        id: LinkId,
        result: Result<(), ApiError>,
    },
}

pub struct App {
    pub config: Config,
    service: LinkService,

    // Collection state
    pub links: Vec<Link>,
    pub filtered_indices: Vec<usize>,
    pub selected: usize,
    pub stats: LinkStats,
    pub last_loaded: Option<DateTime<Local>>,
    /// The list view is currently replaced by the load-error placeholder.
    pub load_failed: bool,

    // UI state
    pub modal: ModalState,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub notification: Option<Notification>,

    // Search state
    pub search_mode: bool,
    pub search_input: String,
    /// The committed query the current filter was computed from.
    pub query: String,
    pending_search_since: Option<Instant>,
    search_debounce: Duration,

    // Add form / delete confirmation
    pub add_form: AddForm,
    pub pending_delete: Option<PendingDelete>,

    /// Newest issued request per operation kind; completions carrying older
    /// values are stale and discarded.
    pub load_seq: u64,
    pub add_seq: u64,
    pub delete_seq: u64,

    notification_ttl: Duration,
    outcome_tx: mpsc::Sender<OpOutcome>,
    outcome_rx: mpsc::Receiver<OpOutcome>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(32);
        let service = LinkService::new(&config);
        let search_debounce = Duration::from_millis(config.ui.search_debounce_ms);
        let notification_ttl = Duration::from_secs(config.ui.notification_secs);

        Self {
            config,
            service,
            links: vec![],
            filtered_indices: vec![],
            selected: 0,
            stats: LinkStats::default(),
            last_loaded: None,
            load_failed: false,
            modal: ModalState::None,
            is_loading: false,
            spinner_frame: 0,
            notification: None,
            search_mode: false,
            search_input: String::new(),
            query: String::new(),
            pending_search_since: None,
            search_debounce,
            add_form: AddForm::default(),
            pending_delete: None,
            load_seq: 0,
            add_seq: 0,
            delete_seq: 0,
            notification_ttl,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `true` if the app should quit.
    pub fn update(&mut self, msg: super::Message) -> bool {
        use super::Message;
        match msg {
            // ─────────────────────────────────────────────────────────────────
            // App lifecycle
            // ─────────────────────────────────────────────────────────────────
            Message::Quit => return true,
            Message::Refresh => self.start_load(),

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Message::MoveUp => self.move_selection(-1),
            Message::MoveDown => self.move_selection(1),
            Message::GotoTop => self.selected = 0,
            Message::GotoBottom => {
                self.selected = self.filtered_indices.len().saturating_sub(1);
            }
            Message::PageUp => self.move_selection(-10),
            Message::PageDown => self.move_selection(10),

            // ─────────────────────────────────────────────────────────────────
            // Link actions
            // ─────────────────────────────────────────────────────────────────
            Message::VisitSelected => self.visit_selected(),
            Message::RequestDelete => self.request_delete(),
            Message::ConfirmDelete => self.confirm_delete(),
            Message::CancelDelete => {
                self.pending_delete = None;
                self.modal = ModalState::None;
            }

            // ─────────────────────────────────────────────────────────────────
            // Add form
            // ─────────────────────────────────────────────────────────────────
            Message::OpenAddForm => self.modal = ModalState::AddLink,
            Message::AddInput(c) => self.add_form.focused_field_mut().push(c),
            Message::AddBackspace => {
                self.add_form.focused_field_mut().pop();
            }
            Message::AddSwitchField => self.add_form.switch_focus(),
            Message::SubmitAdd => self.submit_add(),
            Message::CancelAdd => self.modal = ModalState::None,

            // ─────────────────────────────────────────────────────────────────
            // Search mode
            // ─────────────────────────────────────────────────────────────────
            Message::EnterSearch => self.enter_search(),
            Message::ExitSearch => self.exit_search(),
            Message::ConfirmSearch => self.confirm_search(),
            Message::SearchInput(c) => {
                self.search_input.push(c);
                self.schedule_search();
            }
            Message::SearchBackspace => {
                self.search_input.pop();
                self.schedule_search();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modal toggles
            // ─────────────────────────────────────────────────────────────────
            Message::ToggleHelp => {
                self.modal = if self.modal == ModalState::Help {
                    ModalState::None
                } else {
                    ModalState::Help
                };
            }
            Message::CloseModal => self.modal = ModalState::None,

            // ─────────────────────────────────────────────────────────────────
            // No-op
            // ─────────────────────────────────────────────────────────────────
            Message::None => {}
        }
        false
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a list request. Overlapping calls are allowed; only the newest
    /// completion is applied.
    pub fn start_load(&mut self) {
        let seq = self.begin_load();
        let service = self.service.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = service.list().await;
            if tx.send(OpOutcome::Loaded { seq, result }).await.is_err() {
                tracing::warn!("load completion dropped: channel closed");
            }
        });
    }

    /// Register a new load request and return its sequence number.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.is_loading = true;
        self.load_seq
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Adding
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate the add form; on pass issue the create request, on failure
    /// surface a notification and issue nothing.
    pub fn submit_add(&mut self) {
        let new_link = match validate_new_link(&self.add_form.title, &self.add_form.url) {
            Ok(new_link) => new_link,
            Err(e) => {
                self.notify_error(e.to_string());
                return;
            }
        };

        self.add_seq += 1;
        let seq = self.add_seq;
        let service = self.service.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = service.create(&new_link).await;
            if tx.send(OpOutcome::Added { seq, result }).await.is_err() {
                tracing::warn!("create completion dropped: channel closed");
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Deleting
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the confirmation modal for the selected link.
    pub fn request_delete(&mut self) {
        if let Some(link) = self.selected_link() {
            self.pending_delete = Some(PendingDelete {
                id: link.id.clone(),
                title: link.title.clone(),
            });
            self.modal = ModalState::ConfirmDelete;
        }
    }

    /// Delete continuation, run only from the confirmation modal's accept key.
    pub fn confirm_delete(&mut self) {
        self.modal = ModalState::None;
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        self.delete_seq += 1;
        let seq = self.delete_seq;
        let service = self.service.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = service.delete(&pending.id).await;
            let outcome = OpOutcome::Deleted {
                seq,
                id: pending.id,
                result,
            };
            if tx.send(outcome).await.is_err() {
                tracing::warn!("delete completion dropped: channel closed");
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Drain completed service calls (non-blocking, call from event loop tick).
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Apply one completion, discarding it when superseded by a newer request
    /// of the same kind.
    pub fn apply_outcome(&mut self, outcome: OpOutcome) {
        match outcome {
            OpOutcome::Loaded { seq, result } => {
                if seq != self.load_seq {
                    tracing::debug!("discarding stale load completion (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                match result {
                    Ok(links) => {
                        self.links = links;
                        self.load_failed = false;
                        self.last_loaded = Some(Local::now());
                        self.refresh_derived();
                    }
                    Err(e) => {
                        self.load_failed = true;
                        tracing::error!("failed to load links: {}", e);
                        self.notify_error(format!("Couldn't load links: {}", e));
                    }
                }
            }
            OpOutcome::Added { seq, result } => {
                if seq != self.add_seq {
                    tracing::debug!("discarding stale create completion (seq {})", seq);
                    return;
                }
                match result {
                    Ok(link) => {
                        self.links.push(link);
                        self.load_failed = false;
                        self.add_form.clear();
                        if self.modal == ModalState::AddLink {
                            self.modal = ModalState::None;
                        }
                        self.refresh_derived();
                        self.notify_success("Link added");
                    }
                    Err(e) => self.notify_error(e.to_string()),
                }
            }
            OpOutcome::Deleted { seq, id, result } => {
                if seq != self.delete_seq {
                    tracing::debug!("discarding stale delete completion (seq {})", seq);
                    return;
                }
                match result {
                    Ok(()) => {
                        self.links.retain(|link| link.id != id);
                        self.load_failed = false;
                        self.refresh_derived();
                        self.notify_success("Link deleted");
                    }
                    Err(e) => self.notify_error(e.to_string()),
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_input = self.query.clone();
    }

    /// Exit search mode and restore the full unfiltered render.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
        self.pending_search_since = None;
        self.query.clear();
        self.refresh_derived();
    }

    /// Leave search mode keeping the filter; a pending pass runs immediately.
    pub fn confirm_search(&mut self) {
        self.search_mode = false;
        if self.pending_search_since.take().is_some() {
            self.apply_search();
        }
    }

    /// Debounce keystrokes: (re)arm the timer, cancelling any pending pass.
    pub fn schedule_search(&mut self) {
        self.pending_search_since = Some(Instant::now());
    }

    /// Deadline at which the pending filter pass is due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.pending_search_since
            .map(|since| since + self.search_debounce)
    }

    /// Run the pending filter pass once its debounce interval has elapsed.
    pub fn poll_search_debounce(&mut self) {
        if let Some(since) = self.pending_search_since {
            if since.elapsed() >= self.search_debounce {
                self.pending_search_since = None;
                self.apply_search();
            }
        }
    }

    /// One filter pass over the loaded collection with the final query value.
    /// Pure with respect to `links`.
    pub fn apply_search(&mut self) {
        self.query = self.search_input.clone();
        self.load_failed = false;
        self.refresh_derived();
    }

    /// True while a scheduled filter pass has not fired yet.
    pub fn search_pending(&self) -> bool {
        self.pending_search_since.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────────────────

    /// Recompute the filtered view and stats after any collection or query
    /// change, clamping the selection.
    fn refresh_derived(&mut self) {
        self.filtered_indices = filter_links(&self.links, &self.query);
        self.stats = LinkStats::compute(&self.links);
        if self.selected >= self.filtered_indices.len() {
            self.selected = self.filtered_indices.len().saturating_sub(1);
        }
    }

    /// The link under the cursor, resolved through the filtered view.
    pub fn selected_link(&self) -> Option<&Link> {
        self.filtered_indices
            .get(self.selected)
            .and_then(|&idx| self.links.get(idx))
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.filtered_indices.len();
        if len == 0 {
            return;
        }
        let steps = delta.unsigned_abs() as usize;
        if delta > 0 {
            self.selected = (self.selected + steps).min(len - 1);
        } else {
            self.selected = self.selected.saturating_sub(steps);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notify(NotifyKind::Success, message.into());
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(NotifyKind::Error, message.into());
    }

    fn notify(&mut self, kind: NotifyKind, message: String) {
        // Replaces any visible notification; the timer restarts
        self.notification = Some(Notification {
            message,
            kind,
            raised_at: Instant::now(),
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ticking
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_tick(&mut self) {
        self.tick_spinner();
        if let Some(n) = &self.notification {
            if n.raised_at.elapsed() >= self.notification_ttl {
                self.notification = None;
            }
        }
    }

    /// Advance spinner frame (call on tick while loading)
    pub fn tick_spinner(&mut self) {
        if self.is_loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visiting
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the selected link's full (untruncated) URL in the system browser.
    pub fn visit_selected(&mut self) {
        let Some(link) = self.selected_link() else {
            return;
        };
        let url = link.url.clone();
        if let Err(e) = open_url(&url) {
            self.notify_error(format!("Couldn't open browser: {}", e));
        }
    }
}

fn open_url(url: &str) -> std::io::Result<()> {
    // Use xdg-open on Linux, which works in WSL
    std::process::Command::new("xdg-open")
        .arg(url)
        .spawn()
        .or_else(|_| {
            // Fallback to wslview for WSL
            std::process::Command::new("wslview").arg(url).spawn()
        })?;
    Ok(())
}
