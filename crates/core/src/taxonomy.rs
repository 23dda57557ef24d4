//! The fixed stock-photography category taxonomy.
//!
//! Ids are stable and never reassigned; declaration order is the match order.

use crate::models::Category;

pub const UNCATEGORIZED: Category = Category::new("Uncategorized", 0);

pub const CATEGORIES: [Category; 21] = [
    Category::new("Animals", 1),
    Category::new("Buildings and Architecture", 2),
    Category::new("Business", 3),
    Category::new("Drinks", 4),
    Category::new("The Environment", 5),
    Category::new("States of Mind", 6),
    Category::new("Food", 7),
    Category::new("Graphic Resources", 8),
    Category::new("Hobbies and Leisure", 9),
    Category::new("Industry", 10),
    Category::new("Landscapes", 11),
    Category::new("Lifestyle", 12),
    Category::new("People", 13),
    Category::new("Plants and Flowers", 14),
    Category::new("Culture and Religion", 15),
    Category::new("Science", 16),
    Category::new("Social Issues", 17),
    Category::new("Sports", 18),
    Category::new("Technology", 19),
    Category::new("Transport", 20),
    Category::new("Travel", 21),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|c| c.name)
}

/// First category (in taxonomy order) whose name occurs anywhere in `text`,
/// ignoring case. Earlier entries win when several names occur.
pub fn match_response(text: &str) -> Option<Category> {
    let haystack = text.to_lowercase();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| haystack.contains(&c.name.to_lowercase()))
}
