//! Provider seams for the Aurum dining engine.
//!
//! # Architecture
//!
//! Two pluggable concerns live behind traits here:
//!
//! - [`DiningAgent`] - the conversational order-builder a guest session talks
//!   to. [`scripted::ScriptedAgent`] is the only shipping implementation; it
//!   drives the whole ordering dialogue from keyword rules over the live menu.
//! - [`pos::PosGateway`] - where confirmed orders are routed.
//!   [`pos::MockPos`] accepts everything and remembers submissions;
//!   [`pos::OracleMicrosPos`] refuses to run without a configured endpoint.
//!
//! Both are selected by name in configuration and dispatched through a kind
//! enum ([`AgentKind`], [`aurum_types::PosProvider`]), so a misspelled
//! provider name fails at startup with the accepted set in the error.

pub mod pos;
pub mod scripted;

use std::str::FromStr;

use aurum_types::{EnumKind, EnumParseError, ItemId, MenuItem, OrderDraft, OrderId};

pub use aurum_types;

/// What a reply asks the session to do to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEffect {
    /// Conversation only; the draft stands.
    None,
    /// Add one unit of an item (modifiers apply on first add only).
    AddLine {
        item_id: ItemId,
        modifiers: Vec<String>,
    },
    /// Turn the draft into a real order.
    Confirm,
    /// Drop everything on the draft.
    ClearDraft,
}

/// One agent turn: the line to speak and the draft effect to apply.
///
/// For [`AgentEffect::Confirm`] the `line` is empty: the final wording needs
/// the order id, which only exists once the session has submitted the draft.
/// The session formats it with [`DiningAgent::confirm_line`] (or
/// [`DiningAgent::refuse_empty_confirm`] when there is nothing to submit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub line: String,
    pub effect: AgentEffect,
}

impl AgentReply {
    #[must_use]
    pub fn say(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            effect: AgentEffect::None,
        }
    }
}

/// The conversational dining coordinator.
pub trait DiningAgent {
    /// Opening line for a freshly connected call from `room`.
    fn greet(&self, room: &str) -> String;

    /// One reply turn over the guest utterance, the live menu, and the
    /// current draft.
    fn reply(&self, utterance: &str, room: &str, menu: &[MenuItem], draft: &OrderDraft)
    -> AgentReply;

    /// Wording once a confirmed draft has become order `order_id`.
    fn confirm_line(&self, order_id: &OrderId) -> String;

    /// Wording when the guest confirms an empty draft.
    fn refuse_empty_confirm(&self) -> String;
}

/// Which dining agent implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentKind {
    #[default]
    Mock,
}

impl AgentKind {
    const EXPECTED: &'static [&'static str] = &["mock"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AgentKind::Mock => "mock",
        }
    }

    /// Build the agent this kind names.
    #[must_use]
    pub fn agent(self) -> scripted::ScriptedAgent {
        match self {
            AgentKind::Mock => scripted::ScriptedAgent::new(),
        }
    }
}

impl FromStr for AgentKind {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "mock" => Ok(AgentKind::Mock),
            _ => Err(EnumParseError::new(
                EnumKind::AgentProvider,
                raw,
                Self::EXPECTED,
            )),
        }
    }
}
