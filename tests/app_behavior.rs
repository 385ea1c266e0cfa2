//! Behavioral tests for the link controller.
//!
//! These tests verify:
//! 1. Add validation gates the create request entirely locally
//! 2. Delete requires confirmation; declining issues nothing
//! 3. Completions append/remove exactly the expected entry
//! 4. Stale completions (superseded sequence numbers) are discarded
//! 5. Load failure keeps local state and flips the error placeholder
//! 6. A newer notification replaces the visible one

use linkdeck::api::ApiError;
use linkdeck::config::Config;
use linkdeck::data::{Link, LinkId};
use linkdeck::tui::{App, Message, ModalState, NotifyKind, OpOutcome};
use pretty_assertions::assert_eq;

fn test_config() -> Config {
    Config::default()
}

fn link(id: &str, title: &str, url: &str) -> Link {
    Link {
        id: LinkId(id.to_string()),
        title: title.to_string(),
        url: url.to_string(),
    }
}

/// App pre-loaded with a fixed collection, as after a successful load.
fn loaded_app(links: Vec<Link>) -> App {
    let mut app = App::new(test_config());
    let seq = app.begin_load();
    app.apply_outcome(OpOutcome::Loaded {
        seq,
        result: Ok(links),
    });
    app
}

// ============================================================================
// Add validation
// ============================================================================

#[test]
fn add_with_empty_title_issues_no_request() {
    let mut app = App::new(test_config());
    app.update(Message::OpenAddForm);
    app.add_form.url = "http://x.com".to_string();

    app.update(Message::SubmitAdd);

    assert_eq!(app.add_seq, 0, "no create request may be issued");
    let n = app.notification.as_ref().expect("validation notification");
    assert_eq!(n.kind, NotifyKind::Error);
    assert!(app.links.is_empty());
}

#[test]
fn add_with_invalid_url_issues_no_request() {
    let mut app = App::new(test_config());
    app.add_form.title = "T".to_string();
    app.add_form.url = "not-a-url".to_string();

    app.update(Message::SubmitAdd);

    assert_eq!(app.add_seq, 0);
    assert_eq!(app.notification.as_ref().unwrap().kind, NotifyKind::Error);
}

// ============================================================================
// Add completion
// ============================================================================

#[test]
fn successful_add_appends_at_the_end() {
    let mut app = loaded_app(vec![
        link("1", "first", "http://a.com"),
        link("2", "second", "http://b.com"),
    ]);
    app.add_form.title = "third".to_string();
    app.add_form.url = "http://c.com".to_string();

    app.add_seq = 1;
    app.apply_outcome(OpOutcome::Added {
        seq: 1,
        result: Ok(link("3", "third", "http://c.com")),
    });

    assert_eq!(app.links.len(), 3);
    assert_eq!(app.links[2], link("3", "third", "http://c.com"));
    assert_eq!(app.links[0].id, LinkId("1".to_string()), "order preserved");
    assert_eq!(app.stats.total, 3);
    assert_eq!(app.notification.as_ref().unwrap().kind, NotifyKind::Success);
    assert!(app.add_form.title.is_empty(), "form cleared on success");
    assert!(app.add_form.url.is_empty());
}

#[test]
fn failed_add_keeps_state_and_surfaces_service_message() {
    let mut app = loaded_app(vec![link("1", "only", "http://a.com")]);

    app.add_seq = 1;
    app.apply_outcome(OpOutcome::Added {
        seq: 1,
        result: Err(ApiError::Service("Title and URL are required".into())),
    });

    assert_eq!(app.links.len(), 1);
    let n = app.notification.as_ref().unwrap();
    assert_eq!(n.kind, NotifyKind::Error);
    assert_eq!(n.message, "Title and URL are required");
}

// ============================================================================
// Delete confirmation
// ============================================================================

#[test]
fn delete_opens_confirmation_before_any_request() {
    let mut app = loaded_app(vec![link("1", "keep me", "http://a.com")]);

    app.update(Message::RequestDelete);

    assert_eq!(app.modal, ModalState::ConfirmDelete);
    let pending = app.pending_delete.as_ref().expect("pending delete");
    assert_eq!(pending.id, LinkId("1".to_string()));
    assert_eq!(pending.title, "keep me");
    assert_eq!(app.delete_seq, 0, "nothing issued before confirmation");
}

#[test]
fn declining_confirmation_changes_nothing() {
    let mut app = loaded_app(vec![link("1", "keep me", "http://a.com")]);
    let before = app.links.clone();

    app.update(Message::RequestDelete);
    app.update(Message::CancelDelete);

    assert_eq!(app.links, before);
    assert_eq!(app.delete_seq, 0, "no request was sent");
    assert_eq!(app.modal, ModalState::None);
    assert!(app.pending_delete.is_none());
}

#[test]
fn successful_delete_removes_exactly_the_matching_id() {
    let mut app = loaded_app(vec![
        link("1", "a", "http://a.com"),
        link("2", "b", "http://b.com"),
        link("3", "c", "http://c.com"),
    ]);

    app.delete_seq = 1;
    app.apply_outcome(OpOutcome::Deleted {
        seq: 1,
        id: LinkId("2".to_string()),
        result: Ok(()),
    });

    assert_eq!(app.links.len(), 2);
    assert_eq!(app.links[0], link("1", "a", "http://a.com"));
    assert_eq!(app.links[1], link("3", "c", "http://c.com"));
    assert_eq!(app.stats.total, 2);
    assert_eq!(app.notification.as_ref().unwrap().kind, NotifyKind::Success);
}

#[test]
fn failed_delete_keeps_state() {
    let mut app = loaded_app(vec![link("1", "a", "http://a.com")]);

    app.delete_seq = 1;
    app.apply_outcome(OpOutcome::Deleted {
        seq: 1,
        id: LinkId("1".to_string()),
        result: Err(ApiError::Service("Link not found".into())),
    });

    assert_eq!(app.links.len(), 1);
    assert_eq!(app.notification.as_ref().unwrap().message, "Link not found");
}

// ============================================================================
// Load outcomes and stale-completion discard
// ============================================================================

#[test]
fn load_replaces_the_collection_wholesale() {
    let mut app = loaded_app(vec![link("1", "old", "http://old.com")]);

    let seq = app.begin_load();
    assert!(app.is_loading);
    app.apply_outcome(OpOutcome::Loaded {
        seq,
        result: Ok(vec![
            link("2", "new", "http://new.com"),
            link("3", "newer", "http://newer.com"),
        ]),
    });

    assert!(!app.is_loading);
    assert_eq!(app.links.len(), 2);
    assert_eq!(app.links[0].id, LinkId("2".to_string()));
    assert!(app.last_loaded.is_some());
}

#[test]
fn stale_load_completion_is_discarded() {
    let mut app = App::new(test_config());

    let first = app.begin_load();
    let second = app.begin_load();

    // The slower, older response must not clobber the newer one
    app.apply_outcome(OpOutcome::Loaded {
        seq: second,
        result: Ok(vec![link("2", "fresh", "http://fresh.com")]),
    });
    app.apply_outcome(OpOutcome::Loaded {
        seq: first,
        result: Ok(vec![link("1", "stale", "http://stale.com")]),
    });

    assert_eq!(app.links.len(), 1);
    assert_eq!(app.links[0].title, "fresh");
}

#[test]
fn load_failure_keeps_links_and_flips_the_placeholder() {
    let mut app = loaded_app(vec![link("1", "kept", "http://a.com")]);

    let seq = app.begin_load();
    app.apply_outcome(failed_load_outcome(seq));

    assert!(!app.is_loading, "loading cleared on every outcome");
    assert!(app.load_failed);
    assert_eq!(app.links.len(), 1, "local state untouched");
    assert_eq!(app.notification.as_ref().unwrap().kind, NotifyKind::Error);

    // A later successful load clears the placeholder
    let seq = app.begin_load();
    app.apply_outcome(OpOutcome::Loaded {
        seq,
        result: Ok(vec![link("1", "kept", "http://a.com")]),
    });
    assert!(!app.load_failed);
}

// Transport errors can't be constructed outside reqwest; a service error
// exercises the same completion path.
fn failed_load_outcome(seq: u64) -> OpOutcome {
    OpOutcome::Loaded {
        seq,
        result: Err(ApiError::Service("link service returned 500".into())),
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn newer_notification_replaces_the_visible_one() {
    let mut app = App::new(test_config());

    app.notify_error("first");
    app.notify_success("second");

    let n = app.notification.as_ref().unwrap();
    assert_eq!(n.message, "second");
    assert_eq!(n.kind, NotifyKind::Success);
}

#[test]
fn notification_expires_on_tick_after_its_lifetime() {
    let mut config = Config::default();
    config.ui.notification_secs = 0;
    let mut app = App::new(config);

    app.notify_success("done");
    assert!(app.notification.is_some());

    app.on_tick();
    assert!(app.notification.is_none());
}
