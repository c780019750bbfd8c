//! The deterministic demo dataset: 120 rooms, 42 menu items, 12 calls,
//! 22 orders, 12 tickets.
//!
//! Every rotation is a fixed modulus over the index, so two seeded stores
//! hold identical data apart from the relative timestamps. Curated dishes
//! carry catalogue ids (`ST01`..`LN01`); the rest of the menu is generated
//! variants of those dishes cycled across every category.

use aurum_types::{
    Allergen, CallId, CallSession, CallStatus, DietaryTag, DraftLine, ItemId, LanguageCode,
    MenuCategory, MenuItem, Money, Order, OrderDraft, OrderId, OrderLine, OrderStatus,
    OrderTotals, PosProvider, RoomGuest, Schedule, Ticket, TicketCategory, TicketId, TicketStatus,
    Urgency, allergen_union, dietary_union,
};
use chrono::{TimeDelta, Utc};

use crate::store::Snapshot;

const ROOM_COUNT: usize = 120;
const MENU_SIZE: usize = 42;
const VARIANT_COUNT: usize = 28;

const GUEST_NAMES: [&str; 10] = [
    "Amelia Carter",
    "Omar Al‑Farsi",
    "Priya Sharma",
    "Li Wei",
    "Sofía Martínez",
    "Camille Dubois",
    "Dmitri Ivanov",
    "Noah Hughes",
    "Aisha Khan",
    "Hiro Tanaka",
];

/// The full seeded dataset.
#[must_use]
pub fn dataset() -> Snapshot {
    let rooms = rooms();
    let menu = menu();
    let calls = calls(&rooms, &menu);
    let orders = orders(&rooms, &menu);
    let tickets = tickets(&rooms);
    Snapshot {
        menu,
        calls,
        orders,
        tickets,
    }
}

/// Rooms `100`..`219` with a cycling guest roster. Every 29th room is VIP;
/// every 7th-plus-3 room has no registered guest name.
#[must_use]
pub fn rooms() -> Vec<RoomGuest> {
    (0..ROOM_COUNT)
        .map(|i| RoomGuest {
            room_number: (100 + i).to_string(),
            guest_name: if i % 7 == 3 {
                None
            } else {
                Some(GUEST_NAMES[i % GUEST_NAMES.len()].to_owned())
            },
            preferred_language: Some(LanguageCode::ALL[i % LanguageCode::ALL.len()]),
            vip: i % 29 == 0,
        })
        .collect()
}

struct Dish {
    id: &'static str,
    category: MenuCategory,
    name: &'static str,
    description: &'static str,
    pounds: i64,
    prep_mins: u32,
    dietary: &'static [DietaryTag],
    allergens: &'static [Allergen],
    mins_ago: i64,
}

const CURATED: [Dish; 15] = [
    Dish {
        id: "ST01",
        category: MenuCategory::Starters,
        name: "Isle of Mull Scallops, Cauliflower & Brown Butter",
        description: "Hand-dived scallops with caramelised cauliflower purée, capers, and lemon brown butter.",
        pounds: 18,
        prep_mins: 14,
        dietary: &[],
        allergens: &[Allergen::Molluscs, Allergen::Milk],
        mins_ago: 55,
    },
    Dish {
        id: "ST02",
        category: MenuCategory::Starters,
        name: "Heritage Beetroot, Whipped Goat’s Curd & Pistachio",
        description: "Roasted heritage beetroot, citrus dressing, whipped goat’s curd, pistachio crumb.",
        pounds: 14,
        prep_mins: 10,
        dietary: &[DietaryTag::Vegetarian],
        allergens: &[Allergen::Milk, Allergen::TreeNuts],
        mins_ago: 42,
    },
    Dish {
        id: "ST03",
        category: MenuCategory::Starters,
        name: "Celeriac Velouté, Truffle & Chive Oil",
        description: "Silky celeriac soup with black truffle, chive oil and warm sourdough.",
        pounds: 13,
        prep_mins: 9,
        dietary: &[DietaryTag::Vegetarian],
        allergens: &[Allergen::Celery, Allergen::Gluten, Allergen::Milk],
        mins_ago: 33,
    },
    Dish {
        id: "MN01",
        category: MenuCategory::Mains,
        name: "Cornish Sea Bass, Fennel & Saffron Broth",
        description: "Crisp-skinned sea bass with shaved fennel, saffron broth and samphire.",
        pounds: 34,
        prep_mins: 22,
        dietary: &[DietaryTag::GlutenFree],
        allergens: &[Allergen::Fish],
        mins_ago: 20,
    },
    Dish {
        id: "MN02",
        category: MenuCategory::Mains,
        name: "Harissa Lamb Rump, Aubergine & Pomegranate",
        description: "Spiced lamb rump with smoked aubergine, pomegranate molasses and mint.",
        pounds: 38,
        prep_mins: 26,
        dietary: &[DietaryTag::Halal],
        allergens: &[],
        mins_ago: 18,
    },
    Dish {
        id: "MN03",
        category: MenuCategory::Mains,
        name: "Wild Mushroom & Barley Risotto",
        description: "Forest mushrooms, pearl barley, parmesan-style crisp, and herb butter.",
        pounds: 28,
        prep_mins: 20,
        dietary: &[DietaryTag::Vegetarian],
        allergens: &[Allergen::Gluten, Allergen::Milk],
        mins_ago: 12,
    },
    Dish {
        id: "MN04",
        category: MenuCategory::Mains,
        name: "Charred Hispi Cabbage, Romesco & Hazelnut Gremolata",
        description: "Charred hispi cabbage with roasted pepper romesco and hazelnut gremolata.",
        pounds: 24,
        prep_mins: 18,
        dietary: &[DietaryTag::Vegan],
        allergens: &[Allergen::TreeNuts],
        mins_ago: 9,
    },
    Dish {
        id: "SD01",
        category: MenuCategory::Sides,
        name: "Triple-Cooked Chips, Smoked Sea Salt",
        description: "Thick-cut triple-cooked chips with smoked sea salt.",
        pounds: 7,
        prep_mins: 12,
        dietary: &[DietaryTag::Vegan, DietaryTag::GlutenFree],
        allergens: &[],
        mins_ago: 6,
    },
    Dish {
        id: "SD02",
        category: MenuCategory::Sides,
        name: "Tenderstem Broccoli, Chili & Lemon",
        description: "Charred tenderstem broccoli with chili flakes and lemon oil.",
        pounds: 8,
        prep_mins: 8,
        dietary: &[DietaryTag::Vegan, DietaryTag::GlutenFree],
        allergens: &[],
        mins_ago: 6,
    },
    Dish {
        id: "DS01",
        category: MenuCategory::Desserts,
        name: "Dark Chocolate Delice, Olive Oil & Sea Salt",
        description: "Intense dark chocolate delice with Arbequina olive oil and Maldon sea salt.",
        pounds: 12,
        prep_mins: 8,
        dietary: &[DietaryTag::GlutenFree],
        allergens: &[Allergen::Milk, Allergen::Eggs],
        mins_ago: 3,
    },
    Dish {
        id: "DS02",
        category: MenuCategory::Desserts,
        name: "Vanilla Panna Cotta, Winter Berries",
        description: "Madagascan vanilla panna cotta with macerated winter berries.",
        pounds: 11,
        prep_mins: 7,
        dietary: &[DietaryTag::GlutenFree, DietaryTag::Vegetarian],
        allergens: &[Allergen::Milk],
        mins_ago: 3,
    },
    Dish {
        id: "KD01",
        category: MenuCategory::Kids,
        name: "Mini Roast Chicken, Buttered Peas",
        description: "Roast chicken with buttery peas and a small side of mash.",
        pounds: 14,
        prep_mins: 18,
        dietary: &[],
        allergens: &[Allergen::Milk],
        mins_ago: 15,
    },
    Dish {
        id: "SF01",
        category: MenuCategory::SoftDrinks,
        name: "Sparkling Water (750ml)",
        description: "Chilled sparkling mineral water.",
        pounds: 6,
        prep_mins: 1,
        dietary: &[DietaryTag::Vegan, DietaryTag::GlutenFree],
        allergens: &[],
        mins_ago: 120,
    },
    Dish {
        id: "AL01",
        category: MenuCategory::Alcohol,
        name: "English Sparkling Wine (Glass)",
        description: "Crisp English sparkling wine with fine bubbles.",
        pounds: 16,
        prep_mins: 1,
        dietary: &[DietaryTag::GlutenFree],
        allergens: &[Allergen::Sulphites],
        mins_ago: 120,
    },
    Dish {
        id: "LN01",
        category: MenuCategory::LateNight,
        name: "Truffled Cheese Toastie",
        description: "Sourdough toastie with aged cheddar, truffle, and onion jam.",
        pounds: 15,
        prep_mins: 10,
        dietary: &[DietaryTag::Vegetarian],
        allergens: &[Allergen::Gluten, Allergen::Milk],
        mins_ago: 2,
    },
];

fn category_id_prefix(category: MenuCategory) -> &'static str {
    match category {
        MenuCategory::Starters => "ST",
        MenuCategory::Mains => "MA",
        MenuCategory::Sides => "SI",
        MenuCategory::Desserts => "DE",
        MenuCategory::Kids => "KI",
        MenuCategory::SoftDrinks => "SO",
        MenuCategory::Alcohol => "AL",
        MenuCategory::LateNight => "LA",
    }
}

/// The 42-item menu: the curated card plus generated variants cycled across
/// every category with nudged prices and prep times.
#[must_use]
pub fn menu() -> Vec<MenuItem> {
    let now = Utc::now();
    let mut items: Vec<MenuItem> = CURATED
        .iter()
        .map(|dish| MenuItem {
            id: ItemId::from(dish.id),
            category: dish.category,
            name: dish.name.to_owned(),
            description: dish.description.to_owned(),
            price: Money::from_pounds(dish.pounds),
            prep_mins: dish.prep_mins,
            dietary: dish.dietary.to_vec(),
            allergens: dish.allergens.to_vec(),
            available: true,
            updated_at: now - TimeDelta::minutes(dish.mins_ago),
        })
        .collect();

    for i in 0..VARIANT_COUNT {
        let src = &CURATED[i % CURATED.len()];
        let category = MenuCategory::ALL[i % MenuCategory::ALL.len()];
        let suffix = match i % 3 {
            0 => " (Seasonal)",
            1 => " (Chef’s Cut)",
            _ => "",
        };
        let price = Money::from_pence(src.pounds * 100 + (i as i64 % 7) * 150)
            .round_to_ten_pence()
            .max(Money::from_pounds(6));
        items.push(MenuItem {
            id: ItemId::new(format!("{}X{:02}", category_id_prefix(category), i + 1)),
            category,
            name: format!("{}{suffix}", src.name),
            description: src.description.to_owned(),
            price,
            prep_mins: (src.prep_mins + i as u32 % 6).min(35),
            dietary: src.dietary.to_vec(),
            allergens: src.allergens.to_vec(),
            available: true,
            updated_at: now - TimeDelta::minutes(5 + i as i64 * 2),
        });
    }

    items.truncate(MENU_SIZE);
    items
}

fn calls(rooms: &[RoomGuest], menu: &[MenuItem]) -> Vec<CallSession> {
    let now = Utc::now();
    let statuses = [
        CallStatus::Browsing,
        CallStatus::Ordering,
        CallStatus::Confirming,
        CallStatus::Escalated,
    ];
    (0..12)
        .map(|i| {
            let room = &rooms[(i * 7) % rooms.len()];
            let snippet = match i % 3 {
                0 => "Guest asked: ‘What’s safe if I’m allergic to nuts and shellfish?’",
                1 => "Guest: ‘Could you recommend something halal and dairy-free?’",
                _ => "Guest: ‘Please deliver at 19:30, and sauce on the side.’",
            };
            CallSession {
                id: CallId::new(format!("CALL-{}", 1000 + i)),
                started_at: now - TimeDelta::minutes(20 - i as i64),
                duration_secs: 60 * (2 + i as u32),
                room_number: if i % 5 == 0 {
                    None
                } else {
                    Some(room.room_number.clone())
                },
                guest_name: if i % 4 == 0 {
                    None
                } else {
                    room.guest_name.clone()
                },
                language: room.preferred_language.unwrap_or_default(),
                status: statuses[i % statuses.len()],
                agent: format!("Agent {}", (b'A' + (i as u8 % 10)) as char),
                transcript_snippet: snippet.to_owned(),
                current_order_draft: Some(OrderDraft {
                    items: vec![DraftLine {
                        item_id: menu[i % menu.len()].id.clone(),
                        qty: 1 + (i as u32 % 2),
                        modifiers: vec!["sauce on side".to_owned()],
                    }],
                    notes: (i % 3 == 0).then(|| "Allergy check required".to_owned()),
                    schedule: if i % 2 == 0 {
                        Schedule::Asap
                    } else {
                        Schedule::At(now + TimeDelta::minutes(35))
                    },
                }),
            }
        })
        .collect()
}

fn orders(rooms: &[RoomGuest], menu: &[MenuItem]) -> Vec<Order> {
    let now = Utc::now();
    (0..22)
        .map(|i| {
            let room = &rooms[(i * 5) % rooms.len()];
            let item_a = &menu[(i * 3) % menu.len()];
            let item_b = &menu[(i * 3 + 4) % menu.len()];
            let items = vec![
                OrderLine {
                    item_id: item_a.id.clone(),
                    name: item_a.name.clone(),
                    qty: 1,
                    modifiers: vec!["no nuts".to_owned()],
                    unit_price: item_a.price,
                },
                OrderLine {
                    item_id: item_b.id.clone(),
                    name: item_b.name.clone(),
                    qty: 1 + (i as u32 % 2),
                    modifiers: Vec::new(),
                    unit_price: item_b.price,
                },
            ];
            let totals = OrderTotals::from_lines(items.iter().map(|l| (l.unit_price, l.qty)));
            Order {
                id: OrderId::new(format!("ORD-{}", 5000 + i)),
                created_at: now - TimeDelta::minutes(180 - i as i64 * 7),
                room_number: room.room_number.clone(),
                guest_name: room.guest_name.clone(),
                language: room.preferred_language.unwrap_or_default(),
                status: OrderStatus::ALL[i % OrderStatus::ALL.len()],
                eta_mins: 25 + (i as u32 % 20),
                dietary_flags: dietary_union([item_a, item_b]),
                allergen_flags: allergen_union([item_a, item_b]),
                subtotal: totals.subtotal,
                service_charge: totals.service_charge,
                tax: totals.tax,
                total: totals.total,
                items,
                pos_provider: if i % 4 == 0 {
                    PosProvider::OracleMicros
                } else {
                    PosProvider::Mock
                },
            }
        })
        .collect()
}

fn tickets(rooms: &[RoomGuest]) -> Vec<Ticket> {
    let now = Utc::now();
    (0..12)
        .map(|i| {
            let room = &rooms[(i * 9) % rooms.len()];
            let summary = match i % 3 {
                0 => {
                    "Potential allergy risk: guest requested ‘nut-free’ but selected pistachio \
                     item. Needs confirmation."
                }
                1 => "VIP guest requested expedited delivery and bespoke modifications.",
                _ => "Complaint detected: repeated delays mentioned; recommend manager follow-up.",
            };
            Ticket {
                id: TicketId::new(format!("TCK-{}", 8000 + i)),
                created_at: now - TimeDelta::minutes(240 - i as i64 * 13),
                room_number: if i % 5 == 0 {
                    None
                } else {
                    Some(room.room_number.clone())
                },
                guest_name: room.guest_name.clone(),
                language: room.preferred_language.unwrap_or_default(),
                urgency: Urgency::ALL[i % Urgency::ALL.len()],
                category: TicketCategory::ALL[i % TicketCategory::ALL.len()],
                summary: summary.to_owned(),
                transcript_snippet:
                    "…I’m severely allergic to peanuts and shellfish—can you guarantee it’s safe?…"
                        .to_owned(),
                status: if i % 4 == 0 {
                    TicketStatus::Acknowledged
                } else {
                    TicketStatus::Open
                },
            }
        })
        .collect()
}
