//! Typed string IDs for store entities.
//!
//! IDs are opaque strings on the wire. Generated IDs follow the
//! `PREFIX-xxxxxx-xxxxxxxxxxx` shape: six random hex digits plus the
//! creation time in hex milliseconds, so they sort roughly by age when
//! grouped by prefix. Seeded entities carry fixed IDs (`ORD-5000`,
//! `CALL-1000`, ...) that never collide with generated ones.

use std::fmt;

use chrono::Utc;

fn fresh(prefix: &str) -> String {
    let salt = rand::random::<u32>() & 0x00ff_ffff;
    let stamp = Utc::now().timestamp_millis();
    format!("{prefix}-{salt:06x}-{stamp:x}")
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifies a menu item. Curated items use catalogue codes (`MN02`);
    /// generated variants use a category prefix plus an ordinal (`MAX04`).
    ItemId
);
string_id!(
    /// Identifies a guest call session.
    CallId
);
string_id!(
    /// Identifies an order.
    OrderId
);
string_id!(
    /// Identifies a staff ticket.
    TicketId
);

impl CallId {
    #[must_use]
    pub fn generate() -> Self {
        Self(fresh("CALL"))
    }
}

impl OrderId {
    #[must_use]
    pub fn generate() -> Self {
        Self(fresh("ORD"))
    }
}

impl TicketId {
    #[must_use]
    pub fn generate() -> Self {
        Self(fresh("TCK"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_shape() {
        let id = OrderId::generate();
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!parts[2].is_empty());
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn prefixes_differ_per_entity() {
        assert!(CallId::generate().as_str().starts_with("CALL-"));
        assert!(TicketId::generate().as_str().starts_with("TCK-"));
    }

    #[test]
    fn serde_transparent() {
        let id = ItemId::from("MN02");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"MN02\"");
        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
