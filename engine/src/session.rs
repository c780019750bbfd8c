//! A guest ordering session: one room's conversation bound to the store.

use aurum_providers::scripted::draft_totals;
use aurum_providers::{AgentEffect, DiningAgent};
use aurum_types::{LanguageCode, OrderDraft, OrderTotals};
use thiserror::Error;

use crate::server::{NewOrder, OpsServer};
use crate::store::OpsError;

const DEFAULT_ETA_MINS: u32 = 35;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the call has ended")]
    Disconnected,
    #[error(transparent)]
    Ops(#[from] OpsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Agent,
    Guest,
}

/// One line of the session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

/// A connected guest conversation. The agent decides what to say and what the
/// draft effect is; the session owns the draft and performs the store side
/// effects, so a confirmed draft becomes a real order with real totals.
pub struct GuestSession<A: DiningAgent> {
    server: OpsServer,
    agent: A,
    room: String,
    guest_name: Option<String>,
    language: LanguageCode,
    transcript: Vec<Utterance>,
    draft: OrderDraft,
    connected: bool,
}

impl<A: DiningAgent> GuestSession<A> {
    /// Open a session for `room`. The transcript starts with the agent's
    /// greeting.
    #[must_use]
    pub fn open(
        server: OpsServer,
        agent: A,
        room: impl Into<String>,
        guest_name: Option<String>,
        language: LanguageCode,
    ) -> Self {
        let room = room.into();
        let greeting = agent.greet(&room);
        tracing::debug!(room = %room, "guest session opened");
        Self {
            server,
            agent,
            room,
            guest_name,
            language,
            transcript: vec![Utterance {
                speaker: Speaker::Agent,
                text: greeting,
            }],
            draft: OrderDraft::empty(),
            connected: true,
        }
    }

    /// One guest turn: record the utterance, run the agent, apply the effect,
    /// and return the agent's line (also recorded).
    pub fn say(&mut self, text: &str) -> Result<String, SessionError> {
        if !self.connected {
            return Err(SessionError::Disconnected);
        }
        self.transcript.push(Utterance {
            speaker: Speaker::Guest,
            text: text.to_owned(),
        });

        let menu = self.server.db().menu();
        let reply = self.agent.reply(text, &self.room, &menu, &self.draft);
        let line = match reply.effect {
            AgentEffect::None => reply.line,
            AgentEffect::AddLine { item_id, modifiers } => {
                self.draft.add_line(item_id, modifiers);
                reply.line
            }
            AgentEffect::ClearDraft => {
                self.draft.clear();
                reply.line
            }
            AgentEffect::Confirm => {
                if self.draft.is_empty() {
                    // Nothing to post; a polite refusal instead of an empty order.
                    self.agent.refuse_empty_confirm()
                } else {
                    let order = self.server.create_order(NewOrder {
                        room_number: self.room.clone(),
                        guest_name: self.guest_name.clone(),
                        language: self.language,
                        lines: self.draft.items.clone(),
                        eta_mins: DEFAULT_ETA_MINS,
                    })?;
                    self.draft.clear();
                    self.agent.confirm_line(&order.id)
                }
            }
        };

        self.transcript.push(Utterance {
            speaker: Speaker::Agent,
            text: line.clone(),
        });
        Ok(line)
    }

    pub fn hang_up(&mut self) {
        self.connected = false;
        tracing::debug!(room = %self.room, "guest session closed");
    }

    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn transcript(&self) -> &[Utterance] {
        &self.transcript
    }

    #[must_use]
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Canonical totals of the current draft, priced against the live menu.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        draft_totals(&self.server.db().menu(), &self.draft)
    }
}
