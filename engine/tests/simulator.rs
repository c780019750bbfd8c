//! The staged inbound call, run end to end with zero delays.

use aurum_engine::{OpsDb, OpsServer, SimulatorTimings, StoreEvent};
use aurum_types::{CallStatus, DietaryTag, Money, OrderStatus, PosProvider};

fn server() -> OpsServer {
    OpsServer::new(
        OpsDb::seeded(),
        PosProvider::Mock,
        None,
        SimulatorTimings::immediate(),
    )
}

#[tokio::test]
async fn simulated_call_walks_the_whole_lifecycle() {
    let server = server();
    let mut events = server.subscribe();

    let (call, handle) = server.simulate_inbound_call(Some("118".to_owned()));
    assert_eq!(call.status, CallStatus::Browsing);
    assert_eq!(call.room_number.as_deref(), Some("118"));
    assert_eq!(
        call.transcript_snippet,
        "Incoming call connected. AI greeting in progress…"
    );
    // The call record is visible before the staged task runs.
    assert_eq!(server.snapshot().calls[0].id, call.id);

    handle.await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::CallStarted(call.id.clone())
    );
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::CallUpdated(call.id.clone())
    );
    let order_id = match events.recv().await.unwrap() {
        StoreEvent::OrderCreated(id) => id,
        other => panic!("expected OrderCreated, got {other:?}"),
    };
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::CallUpdated(call.id.clone())
    );
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::CallUpdated(call.id.clone())
    );

    let ended = server.db().call(&call.id).unwrap();
    assert_eq!(ended.status, CallStatus::Ended);
    assert_eq!(ended.duration_secs, 190);
    assert_eq!(
        ended.transcript_snippet,
        "Call ended. Order confirmed and sent to POS."
    );

    // The posted order: first halal dish (£38) plus first vegetarian (£14).
    let order = server.db().order(&order_id).unwrap();
    assert_eq!(order.room_number, "118");
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.eta_mins, 35);
    assert_eq!(order.items.len(), 2);
    assert!(order.dietary_flags.contains(&DietaryTag::Halal));
    assert!(order.dietary_flags.contains(&DietaryTag::Vegetarian));
    assert_eq!(order.subtotal, Money::from_pounds(52));
    assert_eq!(order.total, Money::from_pence(6864));
}

#[tokio::test]
async fn simulated_call_without_room_posts_to_tbd() {
    let server = server();
    let (call, handle) = server.simulate_inbound_call(None);
    assert_eq!(call.room_number, None);
    handle.await.unwrap();
    let order = &server.snapshot().orders[0];
    assert_eq!(order.room_number, "TBD");
}

#[tokio::test]
async fn confirming_stage_mirrors_the_draft_onto_the_call() {
    let server = server();
    let (call, handle) = server.simulate_inbound_call(Some("204".to_owned()));
    handle.await.unwrap();

    // The ended patch leaves the confirming stage's draft in place.
    let ended = server.db().call(&call.id).unwrap();
    let order = &server.snapshot().orders[0];
    let draft = ended.current_order_draft.unwrap();
    assert_eq!(draft.items.len(), order.items.len());
    assert!(draft.items.iter().all(|l| l.qty == 1));
    assert!(
        draft
            .items
            .iter()
            .zip(&order.items)
            .all(|(d, o)| d.item_id == o.item_id)
    );
}

#[tokio::test(start_paused = true)]
async fn default_timings_complete_under_the_paused_clock() {
    let server = OpsServer::new(
        OpsDb::seeded(),
        PosProvider::Mock,
        None,
        SimulatorTimings::default(),
    );
    let (call, handle) = server.simulate_inbound_call(Some("101".to_owned()));
    // Auto-advancing time drives all three staged sleeps without waiting.
    handle.await.unwrap();
    let ended = server.db().call(&call.id).unwrap();
    assert_eq!(ended.status, CallStatus::Ended);
    assert_eq!(ended.duration_secs, 190);
}

#[tokio::test]
async fn agent_letter_rotates_with_call_volume() {
    let server = server();
    // Seeded store already holds 12 calls, so the next agent is C (12 % 10).
    let (call, handle) = server.simulate_inbound_call(None);
    assert_eq!(call.agent, "Agent C");
    handle.await.unwrap();
    let (next, handle) = server.simulate_inbound_call(None);
    assert_eq!(next.agent, "Agent D");
    handle.await.unwrap();
}
