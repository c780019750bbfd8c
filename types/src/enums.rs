//! Closed vocabularies of the dining product.
//!
//! Every enum carries its wire spelling (the lowercase/kebab strings the
//! console exchanges) via serde renames, plus `as_str`/`FromStr` pairs that
//! report a typed [`EnumParseError`] naming the offending value and the
//! accepted set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which vocabulary a parse failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Language,
    DietaryTag,
    Allergen,
    MenuCategory,
    CallStatus,
    OrderStatus,
    Urgency,
    TicketCategory,
    TicketStatus,
    PosProvider,
    AgentProvider,
}

impl EnumKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EnumKind::Language => "language",
            EnumKind::DietaryTag => "dietary tag",
            EnumKind::Allergen => "allergen",
            EnumKind::MenuCategory => "menu category",
            EnumKind::CallStatus => "call status",
            EnumKind::OrderStatus => "order status",
            EnumKind::Urgency => "urgency",
            EnumKind::TicketCategory => "ticket category",
            EnumKind::TicketStatus => "ticket status",
            EnumKind::PosProvider => "POS provider",
            EnumKind::AgentProvider => "agent provider",
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{raw}'; expected one of: {expected:?}")]
pub struct EnumParseError {
    kind: EnumKind,
    raw: String,
    expected: &'static [&'static str],
}

impl EnumParseError {
    #[must_use]
    pub fn new(kind: EnumKind, raw: impl Into<String>, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            raw: raw.into(),
            expected,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EnumKind {
        self.kind
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

/// Guest languages the console can route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Ar,
    Hi,
    Zh,
    Es,
    Fr,
    Ru,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 7] = [
        LanguageCode::En,
        LanguageCode::Ar,
        LanguageCode::Hi,
        LanguageCode::Zh,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::Ru,
    ];

    const EXPECTED: &'static [&'static str] = &["en", "ar", "hi", "zh", "es", "fr", "ru"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Ar => "ar",
            LanguageCode::Hi => "hi",
            LanguageCode::Zh => "zh",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::Ru => "ru",
        }
    }
}

impl FromStr for LanguageCode {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::Language, raw, Self::EXPECTED))
    }
}

// The console renders language codes uppercase.
impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCode::En => f.write_str("EN"),
            LanguageCode::Ar => f.write_str("AR"),
            LanguageCode::Hi => f.write_str("HI"),
            LanguageCode::Zh => f.write_str("ZH"),
            LanguageCode::Es => f.write_str("ES"),
            LanguageCode::Fr => f.write_str("FR"),
            LanguageCode::Ru => f.write_str("RU"),
        }
    }
}

/// Dietary suitability tags a menu item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    Halal,
    Kosher,
    GlutenFree,
    DairyFree,
    NutFree,
    ShellfishFree,
}

impl DietaryTag {
    pub const ALL: [DietaryTag; 8] = [
        DietaryTag::Vegan,
        DietaryTag::Vegetarian,
        DietaryTag::Halal,
        DietaryTag::Kosher,
        DietaryTag::GlutenFree,
        DietaryTag::DairyFree,
        DietaryTag::NutFree,
        DietaryTag::ShellfishFree,
    ];

    const EXPECTED: &'static [&'static str] = &[
        "vegan",
        "vegetarian",
        "halal",
        "kosher",
        "gluten-free",
        "dairy-free",
        "nut-free",
        "shellfish-free",
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DietaryTag::Vegan => "vegan",
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Halal => "halal",
            DietaryTag::Kosher => "kosher",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::DairyFree => "dairy-free",
            DietaryTag::NutFree => "nut-free",
            DietaryTag::ShellfishFree => "shellfish-free",
        }
    }
}

impl FromStr for DietaryTag {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::DietaryTag, raw, Self::EXPECTED))
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 14 declarable allergens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Allergen {
    Gluten,
    Milk,
    Eggs,
    Fish,
    Crustaceans,
    Molluscs,
    Peanuts,
    TreeNuts,
    Soy,
    Sesame,
    Celery,
    Mustard,
    Sulphites,
    Lupin,
}

impl Allergen {
    pub const ALL: [Allergen; 14] = [
        Allergen::Gluten,
        Allergen::Milk,
        Allergen::Eggs,
        Allergen::Fish,
        Allergen::Crustaceans,
        Allergen::Molluscs,
        Allergen::Peanuts,
        Allergen::TreeNuts,
        Allergen::Soy,
        Allergen::Sesame,
        Allergen::Celery,
        Allergen::Mustard,
        Allergen::Sulphites,
        Allergen::Lupin,
    ];

    const EXPECTED: &'static [&'static str] = &[
        "gluten",
        "milk",
        "eggs",
        "fish",
        "crustaceans",
        "molluscs",
        "peanuts",
        "tree-nuts",
        "soy",
        "sesame",
        "celery",
        "mustard",
        "sulphites",
        "lupin",
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Milk => "milk",
            Allergen::Eggs => "eggs",
            Allergen::Fish => "fish",
            Allergen::Crustaceans => "crustaceans",
            Allergen::Molluscs => "molluscs",
            Allergen::Peanuts => "peanuts",
            Allergen::TreeNuts => "tree-nuts",
            Allergen::Soy => "soy",
            Allergen::Sesame => "sesame",
            Allergen::Celery => "celery",
            Allergen::Mustard => "mustard",
            Allergen::Sulphites => "sulphites",
            Allergen::Lupin => "lupin",
        }
    }
}

impl FromStr for Allergen {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::Allergen, raw, Self::EXPECTED))
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections of the in-room dining menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starters,
    Mains,
    Sides,
    Desserts,
    Kids,
    SoftDrinks,
    Alcohol,
    LateNight,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 8] = [
        MenuCategory::Starters,
        MenuCategory::Mains,
        MenuCategory::Sides,
        MenuCategory::Desserts,
        MenuCategory::Kids,
        MenuCategory::SoftDrinks,
        MenuCategory::Alcohol,
        MenuCategory::LateNight,
    ];

    const EXPECTED: &'static [&'static str] = &[
        "starters",
        "mains",
        "sides",
        "desserts",
        "kids",
        "soft_drinks",
        "alcohol",
        "late_night",
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MenuCategory::Starters => "starters",
            MenuCategory::Mains => "mains",
            MenuCategory::Sides => "sides",
            MenuCategory::Desserts => "desserts",
            MenuCategory::Kids => "kids",
            MenuCategory::SoftDrinks => "soft_drinks",
            MenuCategory::Alcohol => "alcohol",
            MenuCategory::LateNight => "late_night",
        }
    }
}

impl FromStr for MenuCategory {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::MenuCategory, raw, Self::EXPECTED))
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a live guest call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Browsing,
    Ordering,
    Confirming,
    Escalated,
    Ended,
}

impl CallStatus {
    pub const ALL: [CallStatus; 5] = [
        CallStatus::Browsing,
        CallStatus::Ordering,
        CallStatus::Confirming,
        CallStatus::Escalated,
        CallStatus::Ended,
    ];

    const EXPECTED: &'static [&'static str] =
        &["browsing", "ordering", "confirming", "escalated", "ended"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CallStatus::Browsing => "browsing",
            CallStatus::Ordering => "ordering",
            CallStatus::Confirming => "confirming",
            CallStatus::Escalated => "escalated",
            CallStatus::Ended => "ended",
        }
    }
}

impl FromStr for CallStatus {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::CallStatus, raw, Self::EXPECTED))
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfilment lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    InKitchen,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::InKitchen,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    const EXPECTED: &'static [&'static str] = &[
        "new",
        "in_kitchen",
        "out_for_delivery",
        "delivered",
        "cancelled",
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InKitchen => "in_kitchen",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// The next status on the fulfilment path. Terminal statuses advance to
    /// themselves.
    #[must_use]
    pub const fn advanced(self) -> OrderStatus {
        match self {
            OrderStatus::New => OrderStatus::InKitchen,
            OrderStatus::InKitchen => OrderStatus::OutForDelivery,
            OrderStatus::OutForDelivery | OrderStatus::Delivered => OrderStatus::Delivered,
            OrderStatus::Cancelled => OrderStatus::Cancelled,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::OrderStatus, raw, Self::EXPECTED))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Critical,
    ];

    const EXPECTED: &'static [&'static str] = &["low", "medium", "high", "critical"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

impl FromStr for Urgency {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::Urgency, raw, Self::EXPECTED))
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a ticket exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    AllergyRisk,
    Vip,
    Complaint,
    Handover,
    Anomaly,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 5] = [
        TicketCategory::AllergyRisk,
        TicketCategory::Vip,
        TicketCategory::Complaint,
        TicketCategory::Handover,
        TicketCategory::Anomaly,
    ];

    const EXPECTED: &'static [&'static str] =
        &["allergy_risk", "vip", "complaint", "handover", "anomaly"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TicketCategory::AllergyRisk => "allergy_risk",
            TicketCategory::Vip => "vip",
            TicketCategory::Complaint => "complaint",
            TicketCategory::Handover => "handover",
            TicketCategory::Anomaly => "anomaly",
        }
    }
}

impl FromStr for TicketCategory {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::TicketCategory, raw, Self::EXPECTED))
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Acknowledged,
    Resolved,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::Acknowledged,
        TicketStatus::Resolved,
    ];

    const EXPECTED: &'static [&'static str] = &["open", "acknowledged", "resolved"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Acknowledged => "acknowledged",
            TicketStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::TicketStatus, raw, Self::EXPECTED))
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which POS an order is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosProvider {
    OracleMicros,
    #[default]
    Mock,
}

impl PosProvider {
    pub const ALL: [PosProvider; 2] = [PosProvider::OracleMicros, PosProvider::Mock];

    const EXPECTED: &'static [&'static str] = &["oracle_micros", "mock"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PosProvider::OracleMicros => "oracle_micros",
            PosProvider::Mock => "mock",
        }
    }
}

impl FromStr for PosProvider {
    type Err = EnumParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == raw)
            .ok_or_else(|| EnumParseError::new(EnumKind::PosProvider, raw, Self::EXPECTED))
    }
}

impl fmt::Display for PosProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spellings_round_trip() {
        for tag in DietaryTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
            let back: DietaryTag = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tag);
        }
        for allergen in Allergen::ALL {
            let json = serde_json::to_string(&allergen).unwrap();
            assert_eq!(json, format!("\"{}\"", allergen.as_str()));
        }
    }

    #[test]
    fn snake_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InKitchen).unwrap(),
            "\"in_kitchen\""
        );
        assert_eq!(
            serde_json::to_string(&MenuCategory::SoftDrinks).unwrap(),
            "\"soft_drinks\""
        );
        assert_eq!(
            serde_json::to_string(&PosProvider::OracleMicros).unwrap(),
            "\"oracle_micros\""
        );
        assert_eq!(
            serde_json::to_string(&TicketCategory::AllergyRisk).unwrap(),
            "\"allergy_risk\""
        );
    }

    #[test]
    fn parse_matches_as_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        for lang in LanguageCode::ALL {
            assert_eq!(lang.as_str().parse::<LanguageCode>().unwrap(), lang);
        }
    }

    #[test]
    fn parse_failure_reports_kind_and_raw() {
        let err = "expedited".parse::<Urgency>().unwrap_err();
        assert_eq!(err.kind(), EnumKind::Urgency);
        assert_eq!(err.raw(), "expedited");
        assert!(err.to_string().contains("urgency"));
        assert!(err.to_string().contains("expedited"));
    }

    #[test]
    fn fulfilment_path() {
        assert_eq!(OrderStatus::New.advanced(), OrderStatus::InKitchen);
        assert_eq!(OrderStatus::InKitchen.advanced(), OrderStatus::OutForDelivery);
        assert_eq!(OrderStatus::OutForDelivery.advanced(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Delivered.advanced(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Cancelled.advanced(), OrderStatus::Cancelled);
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn language_displays_uppercase() {
        assert_eq!(LanguageCode::Zh.to_string(), "ZH");
        assert_eq!(LanguageCode::Zh.as_str(), "zh");
    }
}
