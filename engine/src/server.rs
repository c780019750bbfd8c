//! The operations API: one method per console operation.

use std::sync::Arc;

use aurum_providers::pos::{PosGateway, gateway_for};
use aurum_types::{
    CallId, CallSession, CallStatus, DraftLine, ItemId, LanguageCode, MenuItem, Order, OrderId,
    OrderStatus, OrderTotals, PosProvider, Ticket, TicketCategory, TicketId, TicketStatus,
    Urgency, allergen_union, dietary_union,
};
use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::{AurumConfig, ConfigError};
use crate::simulator::{self, SimulatorTimings};
use crate::store::{
    CallPatch, MenuItemPatch, OpsDb, OpsError, OrderPatch, Snapshot, StoreEvent, TicketPatch,
};

/// Default summary for a supervisor-raised escalation ticket.
const ESCALATION_SUMMARY: &str = "Supervisor escalation requested.";

/// Overridable fields when raising a ticket from a call. Anything left `None`
/// falls back to the escalation defaults or is inherited from the call.
#[derive(Debug, Clone, Default)]
pub struct TicketDraft {
    pub urgency: Option<Urgency>,
    pub category: Option<TicketCategory>,
    pub status: Option<TicketStatus>,
    pub summary: Option<String>,
    pub room_number: Option<String>,
    pub guest_name: Option<String>,
    pub language: Option<LanguageCode>,
    pub transcript_snippet: Option<String>,
}

/// What a new order is built from. Lines are resolved against the live menu;
/// totals, flag unions, and the POS provider stamp are derived here.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub room_number: String,
    pub guest_name: Option<String>,
    pub language: LanguageCode,
    pub lines: Vec<DraftLine>,
    pub eta_mins: u32,
}

/// The staff-facing operations surface over the shared store. Cheap to clone;
/// clones share the dataset, the event channel, and the POS gateway.
#[derive(Clone)]
pub struct OpsServer {
    db: Arc<OpsDb>,
    pos: Arc<dyn PosGateway>,
    pos_provider: PosProvider,
    timings: SimulatorTimings,
}

impl OpsServer {
    #[must_use]
    pub fn new(
        db: OpsDb,
        pos_provider: PosProvider,
        oracle_micros_base: Option<String>,
        timings: SimulatorTimings,
    ) -> Self {
        Self {
            db: Arc::new(db),
            pos: Arc::from(gateway_for(pos_provider, oracle_micros_base)),
            pos_provider,
            timings,
        }
    }

    /// A server over the seeded demo dataset, configured per `config`.
    pub fn seeded(config: &AurumConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            OpsDb::seeded(),
            config.pos_provider()?,
            config.pos.oracle_micros_base.clone(),
            config.simulator_timings(),
        ))
    }

    /// The underlying store. Sessions and the simulator reach through this
    /// for reads and raw patches.
    #[must_use]
    pub fn db(&self) -> &OpsDb {
        &self.db
    }

    #[must_use]
    pub fn simulator_timings(&self) -> SimulatorTimings {
        self.timings
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.db.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.db.snapshot()
    }

    pub fn update_call(&self, id: &CallId, patch: CallPatch) -> Result<CallSession, OpsError> {
        self.db.update_call(id, patch)
    }

    /// Deliver a supervisor whisper. The message goes to the agent context
    /// (logged here); the call records that delivery happened.
    pub fn whisper_to_agent(
        &self,
        call_id: &CallId,
        message: &str,
    ) -> Result<CallSession, OpsError> {
        tracing::info!(call = %call_id, message, "supervisor whisper routed to agent");
        self.db.update_call(
            call_id,
            CallPatch {
                transcript_snippet: Some("Supervisor whisper delivered to AI agent.".to_owned()),
                ..CallPatch::default()
            },
        )
    }

    /// Force-escalate a live call to a supervisor.
    pub fn escalate_call(&self, id: &CallId) -> Result<CallSession, OpsError> {
        self.db.update_call(
            id,
            CallPatch {
                status: Some(CallStatus::Escalated),
                ..CallPatch::default()
            },
        )
    }

    pub fn end_call(&self, id: &CallId) -> Result<CallSession, OpsError> {
        self.db.update_call(
            id,
            CallPatch {
                status: Some(CallStatus::Ended),
                ..CallPatch::default()
            },
        )
    }

    /// Raise a ticket from a call. Escalation defaults (urgency high,
    /// category handover, status open) apply unless overridden; room, guest,
    /// language, and transcript are inherited from the call. An unknown call
    /// id still produces a ticket from the defaults: the live-calls flow can
    /// race call removal and a lost escalation is worse than a thin one.
    pub fn create_ticket(&self, from_call: &CallId, draft: TicketDraft) -> Ticket {
        let call = self.db.call(from_call);
        if call.is_none() {
            tracing::warn!(call = %from_call, "ticket raised from unknown call; using defaults");
        }
        let call = call.as_ref();
        let ticket = Ticket {
            id: TicketId::generate(),
            created_at: Utc::now(),
            room_number: draft
                .room_number
                .or_else(|| call.and_then(|c| c.room_number.clone())),
            guest_name: draft
                .guest_name
                .or_else(|| call.and_then(|c| c.guest_name.clone())),
            language: draft
                .language
                .unwrap_or_else(|| call.map(|c| c.language).unwrap_or_default()),
            urgency: draft.urgency.unwrap_or(Urgency::High),
            category: draft.category.unwrap_or(TicketCategory::Handover),
            summary: draft.summary.unwrap_or_else(|| ESCALATION_SUMMARY.to_owned()),
            transcript_snippet: draft
                .transcript_snippet
                .or_else(|| call.map(|c| c.transcript_snippet.clone()))
                .unwrap_or_default(),
            status: draft.status.unwrap_or(TicketStatus::Open),
        };
        self.db.insert_ticket(ticket.clone());
        ticket
    }

    pub fn update_ticket(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket, OpsError> {
        self.db.update_ticket(id, patch)
    }

    pub fn acknowledge_ticket(&self, id: &TicketId) -> Result<Ticket, OpsError> {
        self.db.update_ticket(
            id,
            TicketPatch {
                status: Some(TicketStatus::Acknowledged),
                ..TicketPatch::default()
            },
        )
    }

    pub fn resolve_ticket(&self, id: &TicketId) -> Result<Ticket, OpsError> {
        self.db.update_ticket(
            id,
            TicketPatch {
                status: Some(TicketStatus::Resolved),
                ..TicketPatch::default()
            },
        )
    }

    pub fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, OpsError> {
        self.db.update_order(id, patch)
    }

    /// Move an order one step along the fulfilment path. Terminal orders
    /// stay where they are.
    pub fn advance_order(&self, id: &OrderId) -> Result<Order, OpsError> {
        let current = self
            .db
            .order(id)
            .ok_or_else(|| OpsError::OrderNotFound(id.clone()))?;
        self.db.update_order(
            id,
            OrderPatch {
                status: Some(current.status.advanced()),
                ..OrderPatch::default()
            },
        )
    }

    pub fn cancel_order(&self, id: &OrderId) -> Result<Order, OpsError> {
        self.db.update_order(
            id,
            OrderPatch {
                status: Some(OrderStatus::Cancelled),
                ..OrderPatch::default()
            },
        )
    }

    /// Build and post an order from draft lines. Lines are priced against the
    /// live menu, totals derived by the canonical rule, and the order is
    /// routed to the configured POS before it lands in the store.
    pub fn create_order(&self, new_order: NewOrder) -> Result<Order, OpsError> {
        let menu = self.db.menu();
        let mut items = Vec::with_capacity(new_order.lines.len());
        let mut resolved: Vec<&MenuItem> = Vec::with_capacity(new_order.lines.len());
        for line in &new_order.lines {
            let item = menu
                .iter()
                .find(|m| m.id == line.item_id)
                .ok_or_else(|| OpsError::MenuItemNotFound(line.item_id.clone()))?;
            resolved.push(item);
            items.push(aurum_types::OrderLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                qty: line.qty,
                modifiers: line.modifiers.clone(),
                unit_price: item.price,
            });
        }
        let totals = OrderTotals::from_lines(items.iter().map(|l| (l.unit_price, l.qty)));
        let order = Order {
            id: OrderId::generate(),
            created_at: Utc::now(),
            room_number: new_order.room_number,
            guest_name: new_order.guest_name,
            language: new_order.language,
            status: OrderStatus::New,
            eta_mins: new_order.eta_mins,
            items,
            dietary_flags: dietary_union(resolved.iter().copied()),
            allergen_flags: allergen_union(resolved.iter().copied()),
            subtotal: totals.subtotal,
            service_charge: totals.service_charge,
            tax: totals.tax,
            total: totals.total,
            pos_provider: self.pos_provider,
        };
        let receipt = self.pos.submit(&order)?;
        tracing::debug!(order = %order.id, provider = %receipt.provider, "order accepted by POS");
        self.db.insert_order(order.clone());
        Ok(order)
    }

    pub fn update_menu_item(
        &self,
        id: &ItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, OpsError> {
        self.db.update_menu_item(id, patch)
    }

    /// Flip an item's availability, stamping `updated_at`.
    pub fn toggle_menu_item(&self, id: &ItemId) -> Result<MenuItem, OpsError> {
        let current = self
            .db
            .menu_item(id)
            .ok_or_else(|| OpsError::MenuItemNotFound(id.clone()))?;
        self.db.update_menu_item(
            id,
            MenuItemPatch {
                available: Some(!current.available),
                ..MenuItemPatch::default()
            },
        )
    }

    /// The whole menu as pretty-printed JSON, the console's exchange format.
    pub fn export_menu(&self) -> Result<String, OpsError> {
        Ok(serde_json::to_string_pretty(&self.db.menu())?)
    }

    /// Replace the whole menu from exported JSON. Every imported item's
    /// `updated_at` is stamped with the import time.
    pub fn import_menu(&self, json: &str) -> Result<Vec<MenuItem>, OpsError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        self.db.replace_menu(items);
        Ok(self.db.menu())
    }

    /// Start a simulated inbound call. The call record is visible immediately;
    /// the returned handle resolves when the scripted call has ended.
    #[must_use]
    pub fn simulate_inbound_call(&self, room: Option<String>) -> (CallSession, JoinHandle<()>) {
        simulator::simulate_inbound_call(self.clone(), room)
    }
}
