//! Seed data used when the gateway has nothing stored yet.

use shared::{Category, QuickShortcut};

const DEFAULT_CATEGORY_NAMES: [&str; 9] = [
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Entertainment",
    "Education",
    "Shopping",
    "Travel",
    "Health",
];

/// Built-in categories with ids "1".."9"
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| Category {
            id: (index + 1).to_string(),
            name: name.to_string(),
            is_default: false,
        })
        .collect()
}

pub fn default_shortcuts() -> Vec<QuickShortcut> {
    [("Coffee", "Coffee 5"), ("Groceries", "Groceries"), ("Transport", "Transport")]
        .iter()
        .enumerate()
        .map(|(index, (label, prompt))| QuickShortcut {
            id: (index + 1).to_string(),
            label: label.to_string(),
            prompt: prompt.to_string(),
            icon: None,
        })
        .collect()
}
