//! KPI aggregation over a store snapshot.

use aurum_types::{CallStatus, DietaryTag, Kpi, LanguageCode, TicketStatus};

use crate::store::Snapshot;

/// Calls ended faster than this count as abandoned.
const ABANDON_THRESHOLD_SECS: u32 = 45;

/// The structured numbers behind the analytics board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiReport {
    /// Mean call duration, rounded to whole seconds.
    pub avg_handle_secs: u32,
    /// Ended calls shorter than 45 seconds.
    pub abandoned_calls: usize,
    /// Tickets not yet resolved.
    pub open_escalations: usize,
    /// Order line name with the greatest summed quantity.
    pub top_item: Option<(String, u32)>,
    /// Call counts per language, first-seen order.
    pub calls_by_language: Vec<(LanguageCode, usize)>,
    /// Order counts per dietary flag, first-seen order.
    pub orders_by_dietary: Vec<(DietaryTag, usize)>,
}

impl KpiReport {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let calls = &snapshot.calls;
        let avg_handle_secs = if calls.is_empty() {
            0
        } else {
            let sum: u64 = calls.iter().map(|c| u64::from(c.duration_secs)).sum();
            // Half-up mean in whole seconds.
            ((sum + calls.len() as u64 / 2) / calls.len() as u64) as u32
        };

        let abandoned_calls = calls
            .iter()
            .filter(|c| c.status == CallStatus::Ended && c.duration_secs < ABANDON_THRESHOLD_SECS)
            .count();

        let open_escalations = snapshot
            .tickets
            .iter()
            .filter(|t| t.status != TicketStatus::Resolved)
            .count();

        let mut item_counts: Vec<(String, u32)> = Vec::new();
        for line in snapshot.orders.iter().flat_map(|o| &o.items) {
            if let Some(entry) = item_counts.iter_mut().find(|(name, _)| *name == line.name) {
                entry.1 += line.qty;
            } else {
                item_counts.push((line.name.clone(), line.qty));
            }
        }
        // Strictly-greater keeps the first-seen name on ties.
        let top_item = item_counts
            .into_iter()
            .fold(None::<(String, u32)>, |best, candidate| match best {
                Some(ref b) if b.1 >= candidate.1 => best,
                _ => Some(candidate),
            });

        let mut calls_by_language: Vec<(LanguageCode, usize)> = Vec::new();
        for call in calls {
            if let Some(entry) = calls_by_language
                .iter_mut()
                .find(|(lang, _)| *lang == call.language)
            {
                entry.1 += 1;
            } else {
                calls_by_language.push((call.language, 1));
            }
        }

        let mut orders_by_dietary: Vec<(DietaryTag, usize)> = Vec::new();
        for flag in snapshot.orders.iter().flat_map(|o| &o.dietary_flags) {
            if let Some(entry) = orders_by_dietary.iter_mut().find(|(tag, _)| tag == flag) {
                entry.1 += 1;
            } else {
                orders_by_dietary.push((*flag, 1));
            }
        }

        Self {
            avg_handle_secs,
            abandoned_calls,
            open_escalations,
            top_item,
            calls_by_language,
            orders_by_dietary,
        }
    }

    /// The KPI cards the console shows. Handle time renders in whole minutes.
    #[must_use]
    pub fn cards(&self) -> Vec<Kpi> {
        vec![
            Kpi {
                label: "Average handle time".to_owned(),
                value: format!("{}m", (self.avg_handle_secs + 30) / 60),
                delta: None,
            },
            Kpi {
                label: "Abandoned calls".to_owned(),
                value: self.abandoned_calls.to_string(),
                delta: None,
            },
            Kpi {
                label: "Open escalations".to_owned(),
                value: self.open_escalations.to_string(),
                delta: None,
            },
            Kpi {
                label: "Top item".to_owned(),
                value: self
                    .top_item
                    .as_ref()
                    .map(|(name, qty)| format!("{name} ({qty})"))
                    .unwrap_or_else(|| "—".to_owned()),
                delta: None,
            },
        ]
    }
}
