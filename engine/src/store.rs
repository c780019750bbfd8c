//! The in-memory operations dataset and its change notifier.
//!
//! One mutable dataset holds everything the console shows: the menu, live and
//! finished calls, orders, and tickets. Calls, orders, and tickets insert
//! newest-first. Every mutation broadcasts a typed [`StoreEvent`]; a reader
//! that wants the data itself takes a [`Snapshot`]. Lagging subscribers miss
//! events rather than ever blocking a mutation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use aurum_providers::pos::PosError;
use aurum_types::{
    Allergen, CallId, CallSession, CallStatus, DietaryTag, ItemId, MenuCategory, MenuItem, Money,
    Order, OrderDraft, OrderId, OrderStatus, Ticket, TicketCategory, TicketId, TicketStatus,
    Urgency,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

/// Capacity of the event channel. Slow subscribers past this lag see
/// `RecvError::Lagged` and re-snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("no call with id {0}")]
    CallNotFound(CallId),
    #[error("no order with id {0}")]
    OrderNotFound(OrderId),
    #[error("no ticket with id {0}")]
    TicketNotFound(TicketId),
    #[error("no menu item with id {0}")]
    MenuItemNotFound(ItemId),
    #[error("menu import failed: {0}")]
    MenuImport(#[from] serde_json::Error),
    #[error("POS rejected order: {0}")]
    Pos(#[from] PosError),
}

/// What changed, carried on the broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    CallStarted(CallId),
    CallUpdated(CallId),
    OrderCreated(OrderId),
    OrderUpdated(OrderId),
    TicketCreated(TicketId),
    TicketUpdated(TicketId),
    MenuItemUpdated(ItemId),
    MenuReplaced,
}

/// A deep copy of the whole dataset at one instant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub menu: Vec<MenuItem>,
    pub calls: Vec<CallSession>,
    pub orders: Vec<Order>,
    pub tickets: Vec<Ticket>,
}

/// Patch for a call. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CallPatch {
    pub status: Option<CallStatus>,
    pub duration_secs: Option<u32>,
    pub transcript_snippet: Option<String>,
    pub current_order_draft: Option<OrderDraft>,
}

/// Patch for an order.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub eta_mins: Option<u32>,
}

/// Patch for a ticket.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub status: Option<TicketStatus>,
    pub urgency: Option<Urgency>,
    pub category: Option<TicketCategory>,
    pub summary: Option<String>,
}

/// Patch for a menu item. Any successful patch stamps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    pub category: Option<MenuCategory>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub prep_mins: Option<u32>,
    pub dietary: Option<Vec<DietaryTag>>,
    pub allergens: Option<Vec<Allergen>>,
    pub available: Option<bool>,
}

/// The store. Mutations are short critical sections under one lock; events go
/// out after the lock is released.
#[derive(Debug)]
pub struct OpsDb {
    data: Mutex<Snapshot>,
    events: broadcast::Sender<StoreEvent>,
}

impl OpsDb {
    #[must_use]
    pub fn new(data: Snapshot) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            data: Mutex::new(data),
            events,
        }
    }

    /// A store pre-loaded with the deterministic demo dataset.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(crate::seed::dataset())
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: StoreEvent) {
        // No receivers is fine; the store never depends on listeners.
        let _ = self.events.send(event);
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    #[must_use]
    pub fn menu(&self) -> Vec<MenuItem> {
        self.lock().menu.clone()
    }

    #[must_use]
    pub fn call(&self, id: &CallId) -> Option<CallSession> {
        self.lock().calls.iter().find(|c| &c.id == id).cloned()
    }

    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.lock().orders.iter().find(|o| &o.id == id).cloned()
    }

    #[must_use]
    pub fn menu_item(&self, id: &ItemId) -> Option<MenuItem> {
        self.lock().menu.iter().find(|m| &m.id == id).cloned()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn insert_call(&self, call: CallSession) {
        let id = call.id.clone();
        self.lock().calls.insert(0, call);
        self.emit(StoreEvent::CallStarted(id));
    }

    pub fn update_call(&self, id: &CallId, patch: CallPatch) -> Result<CallSession, OpsError> {
        let updated = {
            let mut data = self.lock();
            let call = data
                .calls
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| OpsError::CallNotFound(id.clone()))?;
            if let Some(status) = patch.status {
                call.status = status;
            }
            if let Some(duration_secs) = patch.duration_secs {
                call.duration_secs = duration_secs;
            }
            if let Some(snippet) = patch.transcript_snippet {
                call.transcript_snippet = snippet;
            }
            if let Some(draft) = patch.current_order_draft {
                call.current_order_draft = Some(draft);
            }
            call.clone()
        };
        self.emit(StoreEvent::CallUpdated(id.clone()));
        Ok(updated)
    }

    pub fn insert_order(&self, order: Order) {
        let id = order.id.clone();
        self.lock().orders.insert(0, order);
        self.emit(StoreEvent::OrderCreated(id));
    }

    pub fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, OpsError> {
        let updated = {
            let mut data = self.lock();
            let order = data
                .orders
                .iter_mut()
                .find(|o| &o.id == id)
                .ok_or_else(|| OpsError::OrderNotFound(id.clone()))?;
            if let Some(status) = patch.status {
                order.status = status;
            }
            if let Some(eta_mins) = patch.eta_mins {
                order.eta_mins = eta_mins;
            }
            order.clone()
        };
        self.emit(StoreEvent::OrderUpdated(id.clone()));
        Ok(updated)
    }

    pub fn insert_ticket(&self, ticket: Ticket) {
        let id = ticket.id.clone();
        self.lock().tickets.insert(0, ticket);
        self.emit(StoreEvent::TicketCreated(id));
    }

    pub fn update_ticket(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket, OpsError> {
        let updated = {
            let mut data = self.lock();
            let ticket = data
                .tickets
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| OpsError::TicketNotFound(id.clone()))?;
            if let Some(status) = patch.status {
                ticket.status = status;
            }
            if let Some(urgency) = patch.urgency {
                ticket.urgency = urgency;
            }
            if let Some(category) = patch.category {
                ticket.category = category;
            }
            if let Some(summary) = patch.summary {
                ticket.summary = summary;
            }
            ticket.clone()
        };
        self.emit(StoreEvent::TicketUpdated(id.clone()));
        Ok(updated)
    }

    pub fn update_menu_item(
        &self,
        id: &ItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, OpsError> {
        let updated = {
            let mut data = self.lock();
            let item = data
                .menu
                .iter_mut()
                .find(|m| &m.id == id)
                .ok_or_else(|| OpsError::MenuItemNotFound(id.clone()))?;
            if let Some(category) = patch.category {
                item.category = category;
            }
            if let Some(name) = patch.name {
                item.name = name;
            }
            if let Some(description) = patch.description {
                item.description = description;
            }
            if let Some(price) = patch.price {
                item.price = price;
            }
            if let Some(prep_mins) = patch.prep_mins {
                item.prep_mins = prep_mins;
            }
            if let Some(dietary) = patch.dietary {
                item.dietary = dietary;
            }
            if let Some(allergens) = patch.allergens {
                item.allergens = allergens;
            }
            if let Some(available) = patch.available {
                item.available = available;
            }
            item.updated_at = Utc::now();
            item.clone()
        };
        self.emit(StoreEvent::MenuItemUpdated(id.clone()));
        Ok(updated)
    }

    /// Replace the whole menu, stamping every item's `updated_at`.
    pub fn replace_menu(&self, mut items: Vec<MenuItem>) {
        let now = Utc::now();
        for item in &mut items {
            item.updated_at = now;
        }
        self.lock().menu = items;
        self.emit(StoreEvent::MenuReplaced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::LanguageCode;
    use tokio::sync::broadcast::error::TryRecvError;

    fn call(id: &str) -> CallSession {
        CallSession {
            id: CallId::from(id),
            started_at: Utc::now(),
            duration_secs: 0,
            room_number: Some("101".into()),
            guest_name: None,
            language: LanguageCode::En,
            status: CallStatus::Browsing,
            agent: "Agent A".into(),
            transcript_snippet: String::new(),
            current_order_draft: None,
        }
    }

    #[test]
    fn calls_insert_newest_first() {
        let db = OpsDb::new(Snapshot::default());
        db.insert_call(call("CALL-1"));
        db.insert_call(call("CALL-2"));
        let snapshot = db.snapshot();
        assert_eq!(snapshot.calls[0].id, CallId::from("CALL-2"));
        assert_eq!(snapshot.calls[1].id, CallId::from("CALL-1"));
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let db = OpsDb::new(Snapshot::default());
        db.insert_call(call("CALL-1"));
        let updated = db
            .update_call(
                &CallId::from("CALL-1"),
                CallPatch {
                    status: Some(CallStatus::Escalated),
                    ..CallPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, CallStatus::Escalated);
        assert_eq!(updated.agent, "Agent A");
        assert_eq!(updated.duration_secs, 0);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let db = OpsDb::new(Snapshot::default());
        assert!(matches!(
            db.update_call(&CallId::from("CALL-404"), CallPatch::default()),
            Err(OpsError::CallNotFound(_))
        ));
        assert!(matches!(
            db.update_order(&OrderId::from("ORD-404"), OrderPatch::default()),
            Err(OpsError::OrderNotFound(_))
        ));
        assert!(matches!(
            db.update_ticket(&TicketId::from("TCK-404"), TicketPatch::default()),
            Err(OpsError::TicketNotFound(_))
        ));
        assert!(matches!(
            db.update_menu_item(&ItemId::from("XX99"), MenuItemPatch::default()),
            Err(OpsError::MenuItemNotFound(_))
        ));
    }

    #[test]
    fn mutations_broadcast_typed_events() {
        let db = OpsDb::new(Snapshot::default());
        let mut events = db.subscribe();
        db.insert_call(call("CALL-1"));
        db.update_call(&CallId::from("CALL-1"), CallPatch::default())
            .unwrap();
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::CallStarted(CallId::from("CALL-1"))
        );
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::CallUpdated(CallId::from("CALL-1"))
        );
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn replace_menu_stamps_updated_at() {
        let db = OpsDb::seeded();
        let mut menu = db.menu();
        let old_stamp = menu[0].updated_at;
        menu.truncate(3);
        let mut events = db.subscribe();
        db.replace_menu(menu);
        let replaced = db.menu();
        assert_eq!(replaced.len(), 3);
        assert!(replaced.iter().all(|m| m.updated_at > old_stamp));
        assert_eq!(events.try_recv().unwrap(), StoreEvent::MenuReplaced);
    }

    #[test]
    fn failed_update_emits_nothing() {
        let db = OpsDb::new(Snapshot::default());
        let mut events = db.subscribe();
        let _ = db.update_order(&OrderId::from("ORD-404"), OrderPatch::default());
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
