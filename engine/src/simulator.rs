//! The staged inbound-call demo.
//!
//! Inserts a call, then walks it through the ordering lifecycle on timers:
//! browsing, ordering, an order posted from the first halal and first
//! vegetarian dishes on the menu, confirming, ended. Delays are injected
//! through [`SimulatorTimings`] so tests can run the whole call under tokio's
//! paused clock.

use std::time::Duration;

use aurum_types::{
    CallSession, CallStatus, DietaryTag, DraftLine, LanguageCode, OrderDraft,
};
use chrono::Utc;
use tokio::task::JoinHandle;

use crate::server::{NewOrder, OpsServer};
use crate::store::CallPatch;

const SIMULATED_ETA_MINS: u32 = 35;
const SIMULATED_DURATION_SECS: u32 = 190;

/// Offsets of each stage from call start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorTimings {
    pub to_ordering: Duration,
    pub to_confirming: Duration,
    pub to_ended: Duration,
}

impl Default for SimulatorTimings {
    fn default() -> Self {
        Self {
            to_ordering: Duration::from_millis(900),
            to_confirming: Duration::from_millis(1800),
            to_ended: Duration::from_millis(3200),
        }
    }
}

impl SimulatorTimings {
    /// All stages fire as soon as the runtime lets the task run.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            to_ordering: Duration::ZERO,
            to_confirming: Duration::ZERO,
            to_ended: Duration::ZERO,
        }
    }
}

/// Start a simulated inbound call from `room`. The call record is inserted
/// synchronously; the returned handle resolves once the call has ended.
pub fn simulate_inbound_call(
    server: OpsServer,
    room: Option<String>,
) -> (CallSession, JoinHandle<()>) {
    let timings = server.simulator_timings();
    let agent_index = server.db().call_count() % 10;
    let call = CallSession {
        id: aurum_types::CallId::generate(),
        started_at: Utc::now(),
        duration_secs: 0,
        room_number: room.clone(),
        guest_name: None,
        language: LanguageCode::En,
        status: CallStatus::Browsing,
        agent: format!("Agent {}", (b'A' + agent_index as u8) as char),
        transcript_snippet: "Incoming call connected. AI greeting in progress…".to_owned(),
        current_order_draft: Some(OrderDraft::empty()),
    };
    server.db().insert_call(call.clone());
    tracing::info!(call = %call.id, room = ?room, "simulated inbound call connected");

    let call_id = call.id.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(timings.to_ordering).await;
        let patch = CallPatch {
            status: Some(CallStatus::Ordering),
            transcript_snippet: Some(
                "Guest: ‘I’d like two mains, one halal and one vegetarian.’".to_owned(),
            ),
            ..CallPatch::default()
        };
        if let Err(err) = server.db().update_call(&call_id, patch) {
            tracing::warn!(call = %call_id, %err, "simulated call vanished mid-flight");
            return;
        }

        tokio::time::sleep(timings.to_confirming.saturating_sub(timings.to_ordering)).await;
        let menu = server.db().menu();
        let picks: Vec<_> = [
            menu.iter()
                .find(|m| m.dietary.contains(&DietaryTag::Halal)),
            menu.iter()
                .find(|m| m.dietary.contains(&DietaryTag::Vegetarian)),
        ]
        .into_iter()
        .flatten()
        .collect();
        let lines: Vec<DraftLine> = picks
            .iter()
            .map(|item| DraftLine {
                item_id: item.id.clone(),
                qty: 1,
                modifiers: Vec::new(),
            })
            .collect();

        let order = match server.create_order(NewOrder {
            room_number: room.unwrap_or_else(|| "TBD".to_owned()),
            guest_name: None,
            language: LanguageCode::En,
            lines: lines.clone(),
            eta_mins: SIMULATED_ETA_MINS,
        }) {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(call = %call_id, %err, "simulated order was not accepted");
                return;
            }
        };
        let patch = CallPatch {
            status: Some(CallStatus::Confirming),
            transcript_snippet: Some(format!(
                "AI summary: ‘Total {}. ETA ~35 minutes. May I confirm?’",
                order.total
            )),
            current_order_draft: Some(OrderDraft {
                items: lines,
                notes: None,
                schedule: aurum_types::Schedule::Asap,
            }),
            ..CallPatch::default()
        };
        if let Err(err) = server.db().update_call(&call_id, patch) {
            tracing::warn!(call = %call_id, %err, "simulated call vanished mid-flight");
            return;
        }

        tokio::time::sleep(timings.to_ended.saturating_sub(timings.to_confirming)).await;
        let patch = CallPatch {
            status: Some(CallStatus::Ended),
            duration_secs: Some(SIMULATED_DURATION_SECS),
            transcript_snippet: Some("Call ended. Order confirmed and sent to POS.".to_owned()),
            ..CallPatch::default()
        };
        if let Err(err) = server.db().update_call(&call_id, patch) {
            tracing::warn!(call = %call_id, %err, "simulated call vanished mid-flight");
        }
    });

    (call, handle)
}
