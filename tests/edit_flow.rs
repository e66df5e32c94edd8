//! Save → next article view flow as a host would drive it

mod common;

use common::{WikiBuilder, STUB_MARKERS};
use editsimilar::{Config, EditHooks, ItemId, Notice, PageView, SaveEvent, SessionState, SqliteStore, UserContext};

fn hooks(config: Config) -> EditHooks<SqliteStore> {
    let store = WikiBuilder::new()
        .article(1, "Ferris", &["Rust"])
        .article(2, "Orphan", &[])
        .article(10, "Cargo", &["Rust", "Stub articles"])
        .build();
    EditHooks::new(store, config)
}

fn edit_and_view(hooks: &EditHooks<SqliteStore>, session: &mut SessionState, page: i64, user: &UserContext) -> Notice {
    hooks.on_save(
        session,
        &SaveEvent {
            page: ItemId(page),
            namespace: 0,
            user: user.clone(),
        },
    );
    hooks.on_page_view(
        session,
        &PageView {
            page: ItemId(page),
            is_article_view: true,
            user: user.clone(),
        },
        Some(STUB_MARKERS),
    )
}

#[test]
fn related_edit_gets_similar_notice() {
    let hooks = hooks(Config::default());
    let mut session = SessionState::new();
    let notice = edit_and_view(&hooks, &mut session, 1, &UserContext::registered("Alice"));

    match notice {
        Notice::Similar { titles } => assert_eq!(titles[0].title, "Cargo"),
        other => panic!("expected similar notice, got {:?}", other),
    }
}

#[test]
fn unrelated_edit_gets_needs_attention_notice() {
    let hooks = hooks(Config::default());
    let mut session = SessionState::new();
    let notice = edit_and_view(&hooks, &mut session, 2, &UserContext::registered("Alice"));
    assert!(matches!(notice, Notice::NeedsAttention { .. }));
}

#[test]
fn throttle_start_three_shows_every_third_edit() {
    let config = Config::from_yaml_str("counter_start: 3").unwrap();
    let hooks = hooks(config);
    let user = UserContext::registered("Alice");
    let mut session = SessionState::new();

    let shown: Vec<bool> = (0..4)
        .map(|_| !edit_and_view(&hooks, &mut session, 1, &user).is_none())
        .collect();
    assert_eq!(shown, vec![true, false, false, true]);
}

#[test]
fn session_state_survives_serialization_between_requests() {
    let config = Config::from_yaml_str("counter_start: 2").unwrap();
    let hooks = hooks(config);
    let user = UserContext::registered("Alice");

    let mut session = SessionState::new();
    assert!(!edit_and_view(&hooks, &mut session, 1, &user).is_none());

    // Host stores the session between requests
    let stored = serde_json::to_string(&session).unwrap();
    let mut session: SessionState = serde_json::from_str(&stored).unwrap();
    assert!(edit_and_view(&hooks, &mut session, 1, &user).is_none());
}

#[test]
fn notice_serializes_with_kind_tag() {
    let hooks = hooks(Config::default());
    let mut session = SessionState::new();
    let notice = edit_and_view(&hooks, &mut session, 1, &UserContext::registered("Alice"));

    let json = serde_json::to_value(&notice).unwrap();
    assert_eq!(json["kind"], "similar");
    assert_eq!(json["titles"][0]["id"], 10);
}
