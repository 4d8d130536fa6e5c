//! Built-in master lists available before the user saves any of their own.

use crate::domain::template::{MasterList, TemplateId, TemplateItem};

#[derive(Debug, Clone, Copy)]
struct TemplateSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    items: &'static [ItemSeed],
}

#[derive(Debug, Clone, Copy)]
struct ItemSeed {
    name: &'static str,
    category: &'static str,
    quantity: u32,
    essential: bool,
}

const fn item(name: &'static str, category: &'static str, quantity: u32) -> ItemSeed {
    ItemSeed { name, category, quantity, essential: false }
}

const fn essential(name: &'static str, category: &'static str, quantity: u32) -> ItemSeed {
    ItemSeed { name, category, quantity, essential: true }
}

const TEMPLATE_SEEDS: &[TemplateSeed] = &[
    TemplateSeed {
        id: "weekend-getaway",
        name: "Weekend Getaway",
        description: "Two or three nights away with a single bag",
        items: &[
            essential("T-shirt", "tops", 2),
            item("Jeans", "bottoms", 1),
            essential("Underwear", "underwear", 3),
            item("Socks", "socks", 3),
            item("Pajamas", "sleepwear", 1),
            essential("Toothbrush", "toiletries", 1),
            item("Toothpaste", "toiletries", 1),
            essential("Phone Charger", "tech", 1),
            essential("ID Card", "documents", 1),
        ],
    },
    TemplateSeed {
        id: "business-trip",
        name: "Business Trip",
        description: "Meetings in town with evenings at the hotel",
        items: &[
            essential("Dress Shirt", "tops", 3),
            essential("Trousers", "bottoms", 2),
            essential("Underwear", "underwear", 4),
            item("Socks", "socks", 4),
            item("Pajamas", "sleepwear", 1),
            essential("Laptop", "tech", 1),
            essential("Laptop Charger", "tech", 1),
            essential("Passport", "documents", 1),
            item("Shampoo", "toiletries", 1),
            essential("Toothbrush", "toiletries", 1),
        ],
    },
    TemplateSeed {
        id: "beach-vacation",
        name: "Beach Vacation",
        description: "A week of sun, sand and water",
        items: &[
            item("T-shirt", "tops", 5),
            item("Shorts", "bottoms", 3),
            essential("Underwear", "underwear", 7),
            essential("Swimsuit", "swimwear", 2),
            essential("Sunscreen", "toiletries", 1),
            item("Sunglasses", "accessories", 1),
            item("Flip Flops", "shoes", 1),
            essential("Passport", "documents", 1),
            essential("Phone Charger", "tech", 1),
        ],
    },
    TemplateSeed {
        id: "mountain-trek",
        name: "Mountain Trek",
        description: "Multi-day hiking with changing weather",
        items: &[
            item("Hiking Shirt", "tops", 4),
            item("Hiking Pants", "bottoms", 2),
            essential("Underwear", "underwear", 5),
            essential("Hiking Socks", "socks", 5),
            essential("Hiking Boots", "shoes", 1),
            essential("Rain Jacket", "outerwear", 1),
            item("Fleece", "outerwear", 1),
            essential("First Aid Kit", "meds", 1),
            item("Water Bottle", "accessories", 2),
            essential("Headlamp", "tech", 1),
        ],
    },
];

impl TemplateSeed {
    fn to_master_list(self) -> MasterList {
        MasterList {
            id: TemplateId(self.id.to_owned()),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            items: self.items.iter().map(|seed| seed.to_template_item()).collect(),
        }
    }
}

impl ItemSeed {
    fn to_template_item(self) -> TemplateItem {
        let item = TemplateItem::new(self.name, self.category, self.quantity);
        if self.essential {
            item.essential()
        } else {
            item
        }
    }
}

/// Every built-in master list, in a stable order.
pub fn builtin_templates() -> Vec<MasterList> {
    TEMPLATE_SEEDS.iter().map(|seed| seed.to_master_list()).collect()
}

/// Looks up a built-in master list by id.
pub fn resolve_builtin(id: &str) -> Option<MasterList> {
    TEMPLATE_SEEDS.iter().find(|seed| seed.id == id.trim()).map(|seed| seed.to_master_list())
}
