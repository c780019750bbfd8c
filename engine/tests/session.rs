//! Guest conversations driving real store mutations.

use aurum_engine::{GuestSession, OpsDb, OpsServer, SessionError, SimulatorTimings, Speaker};
use aurum_providers::scripted::ScriptedAgent;
use aurum_types::{ItemId, LanguageCode, Money, OrderStatus, PosProvider};

fn session(room: &str) -> (OpsServer, GuestSession<ScriptedAgent>) {
    let server = OpsServer::new(
        OpsDb::seeded(),
        PosProvider::Mock,
        None,
        SimulatorTimings::immediate(),
    );
    let session = GuestSession::open(
        server.clone(),
        ScriptedAgent::new(),
        room,
        Some("Priya Sharma".to_owned()),
        LanguageCode::En,
    );
    (server, session)
}

#[test]
fn opens_with_a_greeting() {
    let (_, session) = session("305");
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].speaker, Speaker::Agent);
    assert!(transcript[0].text.contains("room 305"));
}

#[test]
fn naming_a_dish_builds_the_draft() {
    let (_, mut session) = session("305");
    let line = session
        .say("I'd like the Truffled Cheese Toastie please")
        .unwrap();
    assert!(line.contains("added Truffled Cheese Toastie"));
    assert_eq!(session.draft().items.len(), 1);
    assert_eq!(session.draft().items[0].item_id, ItemId::from("LN01"));
    assert_eq!(session.draft().items[0].qty, 1);

    // Same dish again bumps the quantity instead of adding a line.
    session.say("one more truffled cheese toastie").unwrap();
    assert_eq!(session.draft().items.len(), 1);
    assert_eq!(session.draft().items[0].qty, 2);
}

#[test]
fn order_intent_quotes_the_running_total() {
    let (_, mut session) = session("305");
    session.say("truffled cheese toastie").unwrap();
    // £15 + 10% service = £16.50; +20% VAT = £19.80.
    assert_eq!(session.totals().total, Money::from_pence(1980));
    let line = session.say("what's my order looking like?").unwrap();
    assert!(line.contains("£19.80"), "line: {line}");
    assert!(line.contains("room 305"));
}

#[test]
fn confirming_posts_a_real_order() {
    let (server, mut session) = session("305");
    session.say("truffled cheese toastie").unwrap();
    let line = session.say("yes, confirm it").unwrap();
    assert!(line.starts_with("Order confirmed! Your order ID is "));

    let order = server.snapshot().orders[0].clone();
    assert!(line.contains(order.id.as_str()));
    assert_eq!(order.room_number, "305");
    assert_eq!(order.guest_name.as_deref(), Some("Priya Sharma"));
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.eta_mins, 35);
    assert_eq!(order.total, Money::from_pence(1980));
    // The draft is spent once the order exists.
    assert!(session.draft().is_empty());
}

#[test]
fn confirming_an_empty_draft_is_refused() {
    let (server, mut session) = session("305");
    let before = server.snapshot().orders.len();
    let line = session.say("confirm").unwrap();
    assert!(line.contains("nothing on your order yet"));
    assert_eq!(server.snapshot().orders.len(), before);
}

#[test]
fn cancel_clears_the_draft() {
    let (_, mut session) = session("305");
    session.say("truffled cheese toastie").unwrap();
    assert!(!session.draft().is_empty());
    let line = session.say("actually, cancel that").unwrap();
    assert!(line.contains("cancelled"));
    assert!(session.draft().is_empty());
}

#[test]
fn hang_up_disconnects_the_session() {
    let (_, mut session) = session("305");
    session.hang_up();
    assert!(!session.connected());
    assert!(matches!(
        session.say("hello?"),
        Err(SessionError::Disconnected)
    ));
}

#[test]
fn transcript_records_both_speakers_in_order() {
    let (_, mut session) = session("305");
    session.say("any halal options?").unwrap();
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].speaker, Speaker::Guest);
    assert_eq!(transcript[1].text, "any halal options?");
    assert_eq!(transcript[2].speaker, Speaker::Agent);
    assert!(transcript[2].text.contains("halal"));
}
