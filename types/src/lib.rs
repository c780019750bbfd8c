//! Core domain types for the Aurum dining operations engine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the application:
//! typed string IDs, the closed vocabularies of the product (languages,
//! dietary tags, allergens, statuses), exact-pence money arithmetic, and the
//! record types the operations store holds.

mod enums;
mod ids;
mod money;
mod records;

pub use enums::{
    Allergen, CallStatus, DietaryTag, EnumKind, EnumParseError, LanguageCode, MenuCategory,
    OrderStatus, PosProvider, TicketCategory, TicketStatus, Urgency,
};
pub use ids::{CallId, ItemId, OrderId, TicketId};
pub use money::{Money, OrderTotals};
pub use records::{
    CallSession, DraftLine, Kpi, MenuItem, Order, OrderDraft, OrderLine, RoomGuest, Schedule,
    Ticket, allergen_union, dietary_union,
};
