//! Aurum CLI - a scripted walkthrough of the dining operations engine.
//!
//! # Flow
//!
//! ```text
//! main() -> AurumConfig::load() -> OpsServer::seeded()
//!               |
//!               +-> simulated inbound call (when [simulator] enabled)
//!               +-> scripted guest session for one room
//!               +-> order advance + KPI board
//! ```
//!
//! Everything the console would show lands on stdout; operational logging
//! goes through `tracing` and is filtered by `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use aurum_engine::{AurumConfig, GuestSession, KpiReport, OpsServer};
use aurum_providers::scripted::ScriptedAgent;
use aurum_types::LanguageCode;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match AurumConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "config unavailable; using defaults");
            AurumConfig::default()
        }
    };

    let server = OpsServer::seeded(&config)?;
    println!("{} — {}", config.brand.name, config.brand.hotel);
    println!();

    if config.simulator.enabled {
        run_simulated_call(&server).await?;
    }
    run_guest_session(&server, &config)?;
    advance_latest_order(&server)?;
    print_kpi_board(&server);

    Ok(())
}

/// Play one staged inbound call to completion and show its lifecycle.
async fn run_simulated_call(server: &OpsServer) -> Result<()> {
    println!("## Simulated inbound call");
    let mut events = server.subscribe();
    let (call, handle) = server.simulate_inbound_call(Some("118".to_owned()));
    println!("  {} connected ({})", call.id, call.agent);
    handle.await?;
    while let Ok(event) = events.try_recv() {
        println!("  event: {event:?}");
    }
    if let Some(ended) = server.db().call(&call.id) {
        println!("  {} {} after {}s", ended.id, ended.status, ended.duration_secs);
        println!("  {}", ended.transcript_snippet);
    }
    println!();
    Ok(())
}

/// A short scripted conversation: browse, build a draft, confirm.
fn run_guest_session(server: &OpsServer, config: &AurumConfig) -> Result<()> {
    println!("## Guest session, room 412");
    let agent: ScriptedAgent = config.agent_kind()?.agent();
    let mut session = GuestSession::open(
        server.clone(),
        agent,
        "412",
        Some("Amelia Carter".to_owned()),
        LanguageCode::En,
    );
    for utterance in [
        "Do you have anything halal tonight?",
        "I'll take the Truffled Cheese Toastie",
        "What does my order come to?",
        "Great, confirm it please",
    ] {
        println!("  Guest: {utterance}");
        let line = session.say(utterance)?;
        println!("  Agent: {line}");
    }
    session.hang_up();
    println!();
    Ok(())
}

/// Move the newest order one step along the fulfilment path.
fn advance_latest_order(server: &OpsServer) -> Result<()> {
    println!("## Order board");
    let order_id = server.snapshot().orders[0].id.clone();
    let order = server.advance_order(&order_id)?;
    println!(
        "  {} room {} now {} (total {})",
        order.id, order.room_number, order.status, order.total
    );
    println!();
    Ok(())
}

fn print_kpi_board(server: &OpsServer) {
    println!("## Tonight at a glance");
    let report = KpiReport::from_snapshot(&server.snapshot());
    for card in report.cards() {
        println!("  {:<22} {}", card.label, card.value);
    }
}
