//! The scripted dining agent.
//!
//! A pure reply engine: one guest utterance in, one line and one draft effect
//! out. Menu-item mentions win over everything; after that a single
//! Aho-Corasick pass picks the highest-priority intent keyword
//! (`halal` > `order` > `confirm` > `cancel`), and anything else falls back to
//! the help line. No state lives here; the draft belongs to the session.

use aho_corasick::AhoCorasick;
use aurum_types::{DietaryTag, MenuItem, OrderDraft, OrderId, OrderTotals};

use crate::{AgentEffect, AgentReply, DiningAgent};

/// Intent keywords in priority order. Pattern index doubles as priority.
const KEYWORDS: [&str; 4] = ["halal", "order", "confirm", "cancel"];

const INTENT_HALAL: usize = 0;
const INTENT_ORDER: usize = 1;
const INTENT_CONFIRM: usize = 2;
const INTENT_CANCEL: usize = 3;

const FALLBACK_LINE: &str = "I can help you browse our menu, place an order, or check the status \
                             of your order. What would you like to do?";

/// The shipping `DiningAgent`: deterministic keyword rules over the live menu.
#[derive(Debug)]
pub struct ScriptedAgent {
    keywords: AhoCorasick,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Fixed pattern set; construction cannot fail.
            keywords: AhoCorasick::new(KEYWORDS).expect("static keyword set builds"),
        }
    }

    /// Opening line before a room is known.
    #[must_use]
    pub fn opening_line() -> &'static str {
        "Good evening! This is the Aurum AI Dining Coordinator. How may I assist you today?"
    }

    /// Highest-priority intent keyword present in `utterance`, if any.
    fn intent(&self, utterance: &str) -> Option<usize> {
        self.keywords
            .find_iter(utterance)
            .map(|m| m.pattern().as_usize())
            .min()
    }

    fn halal_line(menu: &[MenuItem]) -> String {
        let names: Vec<&str> = menu
            .iter()
            .filter(|item| item.available && item.dietary.contains(&DietaryTag::Halal))
            .take(2)
            .map(|item| item.name.as_str())
            .collect();
        match names.as_slice() {
            [] => "I'm sorry, we don't have any halal options available at the moment.".to_owned(),
            [only] => format!(
                "We have a halal option available: {only}. Would you like me to add it?"
            ),
            [first, second, ..] => format!(
                "We have several halal options available, including {first} and {second}. \
                 Would you like me to add one of those?"
            ),
        }
    }
}

impl Default for ScriptedAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl DiningAgent for ScriptedAgent {
    fn greet(&self, room: &str) -> String {
        format!(
            "Good evening from room {room}! This is the Aurum AI Dining Coordinator. \
             How may I help you today?"
        )
    }

    fn reply(
        &self,
        utterance: &str,
        room: &str,
        menu: &[MenuItem],
        draft: &OrderDraft,
    ) -> AgentReply {
        let lower = utterance.to_lowercase();

        // A named menu item wins over any intent keyword; first in menu order.
        if let Some(item) = menu
            .iter()
            .find(|item| lower.contains(&normalize_name(&item.name)))
        {
            let modifiers = if lower.contains("no cheese") || lower.contains("without cheese") {
                vec!["No Cheese".to_owned()]
            } else {
                Vec::new()
            };
            return AgentReply {
                line: format!(
                    "Perfect! I've added {} to your order. Would you like anything else?",
                    item.name
                ),
                effect: AgentEffect::AddLine {
                    item_id: item.id.clone(),
                    modifiers,
                },
            };
        }

        match self.intent(&lower) {
            Some(INTENT_HALAL) => AgentReply::say(Self::halal_line(menu)),
            Some(INTENT_ORDER) => {
                let totals = draft_totals(menu, draft);
                AgentReply::say(format!(
                    "Your order totals {} with service charge. It will be ready in about \
                     35 minutes. Would you like me to confirm it for room {room}?",
                    totals.total
                ))
            }
            Some(INTENT_CONFIRM) => AgentReply {
                line: String::new(),
                effect: AgentEffect::Confirm,
            },
            Some(INTENT_CANCEL) => AgentReply {
                line: "Your order has been cancelled. Is there anything else I can help with?"
                    .to_owned(),
                effect: AgentEffect::ClearDraft,
            },
            _ => AgentReply::say(FALLBACK_LINE),
        }
    }

    fn confirm_line(&self, order_id: &OrderId) -> String {
        format!("Order confirmed! Your order ID is {order_id}. Thank you for choosing Aurum Dining.")
    }

    fn refuse_empty_confirm(&self) -> String {
        "There's nothing on your order yet. Would you like to add something from the menu first?"
            .to_owned()
    }
}

/// Lowercase and strip everything but ASCII alphanumerics and spaces, the
/// form guests actually type ("Chef's Cut" matches "chefs cut").
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Canonical totals of a draft priced against the live menu. Lines whose item
/// has left the menu contribute nothing.
#[must_use]
pub fn draft_totals(menu: &[MenuItem], draft: &OrderDraft) -> OrderTotals {
    OrderTotals::from_lines(draft.items.iter().filter_map(|line| {
        menu.iter()
            .find(|item| item.id == line.item_id)
            .map(|item| (item.price, line.qty))
    }))
}
