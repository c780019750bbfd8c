//! The Aurum dining operations engine.
//!
//! # Architecture
//!
//! ```text
//! GuestSession ──┐
//! simulator ─────┼──> OpsServer ──> OpsDb (menu/calls/orders/tickets)
//! staff console ─┘        │              │
//!                         v              v
//!                    PosGateway     StoreEvent broadcast
//! ```
//!
//! [`store::OpsDb`] holds the single mutable dataset and broadcasts a typed
//! [`store::StoreEvent`] on every mutation. [`server::OpsServer`] is the
//! operations API the staff console calls, one method per operation.
//! [`session::GuestSession`] binds one room's conversation to the store
//! through a [`aurum_providers::DiningAgent`]; [`simulator`] plays a whole
//! inbound call by itself on timers. [`analytics`] aggregates KPIs from a
//! snapshot, [`seed`] builds the deterministic demo dataset, and [`config`]
//! loads the TOML configuration.

pub mod analytics;
pub mod config;
pub mod seed;
pub mod server;
pub mod session;
pub mod simulator;
pub mod store;

pub use analytics::KpiReport;
pub use config::{AurumConfig, ConfigError};
pub use server::{NewOrder, OpsServer, TicketDraft};
pub use session::{GuestSession, SessionError, Speaker, Utterance};
pub use simulator::SimulatorTimings;
pub use store::{
    CallPatch, MenuItemPatch, OpsDb, OpsError, OrderPatch, Snapshot, StoreEvent, TicketPatch,
};
