use std::rc::Rc;

use serde_json::Map;

use super::*;
use crate::util::storage::MemorySlot;

fn user(id: &str) -> User {
    User {
        id: id.to_owned(),
        username: format!("user-{id}"),
        email: None,
        extra: Map::new(),
    }
}

fn session() -> (Session, MemorySlot) {
    let slot = MemorySlot::default();
    (Session::new(Rc::new(slot.clone())), slot)
}

// =============================================================
// SessionState defaults
// =============================================================

#[test]
fn session_starts_empty() {
    let (session, slot) = session();
    let state = session.snapshot();
    assert!(state.user().is_none());
    assert!(state.token().is_none());
    assert!(!state.is_authenticated());
    assert_eq!(slot.load(), None);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn set_user_flips_authenticated() {
    let (session, _) = session();
    session.set_user(Some(user("1")));
    assert!(session.is_authenticated());
    assert_eq!(session.snapshot().user().map(|u| u.id.as_str()), Some("1"));

    session.set_user(None);
    assert!(!session.is_authenticated());
}

#[test]
fn set_token_persists_to_slot() {
    let (session, slot) = session();
    session.set_token(Some("T".to_owned()));
    assert_eq!(session.token().as_deref(), Some("T"));
    assert_eq!(slot.load().as_deref(), Some("T"));
}

#[test]
fn set_token_none_or_empty_removes_slot() {
    let (session, slot) = session();
    session.set_token(Some("T".to_owned()));
    session.set_token(Some(String::new()));
    assert_eq!(session.token(), None);
    assert_eq!(slot.load(), None);

    session.set_token(Some("T".to_owned()));
    session.set_token(None);
    assert_eq!(slot.load(), None);
}

#[test]
fn set_token_does_not_authenticate() {
    let (session, _) = session();
    session.set_token(Some("T".to_owned()));
    assert!(!session.is_authenticated());
}

#[test]
fn clear_resets_everything() {
    let (session, slot) = session();
    session.set_token(Some("T".to_owned()));
    session.set_user(Some(user("1")));
    session.clear();
    assert_eq!(session.snapshot(), SessionState::default());
    assert_eq!(slot.load(), None);
}

#[test]
fn stored_token_ignores_empty_value() {
    let slot = MemorySlot::with_token("");
    let session = Session::new(Rc::new(slot));
    assert_eq!(session.stored_token(), None);
}

#[test]
fn read_only_signal_tracks_updates() {
    let (session, _) = session();
    let view = session.state();
    session.set_user(Some(user("9")));
    assert!(view.with_untracked(SessionState::is_authenticated));
}

// =============================================================
// Invariant: is_authenticated == user.is_some() after every step
// =============================================================

#[derive(Clone, Copy, Debug)]
enum Op {
    SetUser,
    UnsetUser,
    SetToken,
    UnsetToken,
    Clear,
}

const OPS: [Op; 5] = [Op::SetUser, Op::UnsetUser, Op::SetToken, Op::UnsetToken, Op::Clear];

fn apply(session: &Session, op: Op) {
    match op {
        Op::SetUser => session.set_user(Some(user("1"))),
        Op::UnsetUser => session.set_user(None),
        Op::SetToken => session.set_token(Some("T".to_owned())),
        Op::UnsetToken => session.set_token(None),
        Op::Clear => session.clear(),
    }
}

#[test]
fn authenticated_matches_user_for_all_short_sequences() {
    for a in OPS {
        for b in OPS {
            for c in OPS {
                let (session, slot) = session();
                for op in [a, b, c] {
                    apply(&session, op);
                    let state = session.snapshot();
                    assert_eq!(state.is_authenticated(), state.user().is_some(), "after {op:?}");
                    assert_eq!(slot.load().as_deref(), state.token(), "slot mirrors token after {op:?}");
                }
            }
        }
    }
}
