//! Record types held by the operations store.
//!
//! Field names on the wire are camelCase to match the console's exchange
//! format, so a menu exported here re-imports byte-compatibly.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::enums::{
    Allergen, CallStatus, DietaryTag, LanguageCode, MenuCategory, OrderStatus, PosProvider,
    TicketCategory, TicketStatus, Urgency,
};
use crate::ids::{CallId, ItemId, OrderId, TicketId};
use crate::money::{Money, OrderTotals};

/// A dish or drink on the in-room dining menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: ItemId,
    pub category: MenuCategory,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub prep_mins: u32,
    pub dietary: Vec<DietaryTag>,
    pub allergens: Vec<Allergen>,
    pub available: bool,
    pub updated_at: DateTime<Utc>,
}

/// A room and its registered guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomGuest {
    pub room_number: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preferred_language: Option<LanguageCode>,
    #[serde(default)]
    pub vip: bool,
}

/// When a draft order should be delivered: immediately, or at a fixed time.
///
/// Wire shape is the string `"asap"` or the object `{"at": "<rfc3339>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    Asap,
    At(DateTime<Utc>),
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Schedule::Asap => serializer.serialize_str("asap"),
            Schedule::At(at) => {
                let mut s = serializer.serialize_struct("Schedule", 1)?;
                s.serialize_field("at", at)?;
                s.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Keyword(String),
            At { at: DateTime<Utc> },
        }

        match Wire::deserialize(deserializer)? {
            Wire::Keyword(word) if word == "asap" => Ok(Schedule::Asap),
            Wire::Keyword(word) => Err(serde::de::Error::custom(format!(
                "unknown schedule keyword '{word}'; expected \"asap\" or {{\"at\": ...}}"
            ))),
            Wire::At { at } => Ok(Schedule::At(at)),
        }
    }
}

/// One line of an in-progress order draft. Prices are not captured here; they
/// are resolved against the live menu when the draft is priced or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub item_id: ItemId,
    pub qty: u32,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl DraftLine {
    /// Line total given the item's current unit price.
    #[must_use]
    pub fn line_total(&self, unit_price: Money) -> Money {
        unit_price * self.qty
    }
}

/// The order a guest is building during a call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub items: Vec<DraftLine>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub schedule: Schedule,
}

impl OrderDraft {
    /// An empty ASAP draft, the state a freshly connected call starts in.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of an item. If the item is already on the draft its
    /// quantity goes up by one and the existing modifiers stand; otherwise a
    /// new line is pushed carrying `modifiers`.
    pub fn add_line(&mut self, item_id: ItemId, modifiers: Vec<String>) {
        if let Some(line) = self.items.iter_mut().find(|line| line.item_id == item_id) {
            line.qty += 1;
        } else {
            self.items.push(DraftLine {
                item_id,
                qty: 1,
                modifiers,
            });
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.notes = None;
        self.schedule = Schedule::Asap;
    }
}

/// A live or finished guest call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    pub id: CallId,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "durationSec")]
    pub duration_secs: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub guest_name: Option<String>,
    pub language: LanguageCode,
    pub status: CallStatus,
    pub agent: String,
    pub transcript_snippet: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_order_draft: Option<OrderDraft>,
}

/// One priced line of a submitted order. Unlike [`DraftLine`] this snapshots
/// the item name and unit price at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub qty: u32,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(rename = "price")]
    pub unit_price: Money,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.qty
    }
}

/// A submitted order with derived financials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub room_number: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub guest_name: Option<String>,
    pub language: LanguageCode,
    pub status: OrderStatus,
    pub eta_mins: u32,
    pub items: Vec<OrderLine>,
    pub dietary_flags: Vec<DietaryTag>,
    pub allergen_flags: Vec<Allergen>,
    pub subtotal: Money,
    pub service_charge: Money,
    pub tax: Money,
    pub total: Money,
    pub pos_provider: PosProvider,
}

impl Order {
    /// Re-derive the totals from the lines. Stored and derived figures agree
    /// for any order this system produced.
    #[must_use]
    pub fn price(&self) -> OrderTotals {
        OrderTotals::from_lines(self.items.iter().map(|line| (line.unit_price, line.qty)))
    }
}

/// Deduplicated union of the dietary tags of a set of items, preserving
/// first-seen order.
#[must_use]
pub fn dietary_union<'a, I>(items: I) -> Vec<DietaryTag>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    let mut seen = Vec::new();
    for item in items {
        for tag in &item.dietary {
            if !seen.contains(tag) {
                seen.push(*tag);
            }
        }
    }
    seen
}

/// Deduplicated union of the allergens of a set of items, preserving
/// first-seen order.
#[must_use]
pub fn allergen_union<'a, I>(items: I) -> Vec<Allergen>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    let mut seen = Vec::new();
    for item in items {
        for allergen in &item.allergens {
            if !seen.contains(allergen) {
                seen.push(*allergen);
            }
        }
    }
    seen
}

/// A staff-facing ticket raised from a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub guest_name: Option<String>,
    pub language: LanguageCode,
    pub urgency: Urgency,
    pub category: TicketCategory,
    pub summary: String,
    pub transcript_snippet: String,
    pub status: TicketStatus,
}

/// One KPI card on the analytics board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delta: Option<String>,
}
