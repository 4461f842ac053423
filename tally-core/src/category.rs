//! Canonical budget categories and the alias table that maps free-text keys onto them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven budget buckets a statement is reduced to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "rent")]
    Rent,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "others")]
    Others,
}

impl Category {
    /// All categories, income first, in display order
    pub const ALL: [Category; 7] = [
        Category::Income,
        Category::Food,
        Category::Rent,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Others,
    ];

    /// The six categories that count towards expenses
    pub const EXPENSES: [Category; 6] = [
        Category::Food,
        Category::Rent,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Others,
    ];

    /// Lower-case key as typed by the user (`food`, `rent`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Food => "food",
            Category::Rent => "rent",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Others => "others",
        }
    }

    /// Capitalized label used for chart legends
    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What an input key resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    Category(Category),
    /// Known but deliberately dropped (savings is derived, never entered)
    Ignore,
}

/// Raw identifier (lower-case) -> alias target.
pub const ALIASES: &[(&str, Alias)] = &[
    ("income", Alias::Category(Category::Income)),
    ("salary", Alias::Category(Category::Income)),
    ("pay", Alias::Category(Category::Income)),
    ("wage", Alias::Category(Category::Income)),
    ("wages", Alias::Category(Category::Income)),
    ("food", Alias::Category(Category::Food)),
    ("dining", Alias::Category(Category::Food)),
    ("groceries", Alias::Category(Category::Food)),
    ("eatout", Alias::Category(Category::Food)),
    ("rent", Alias::Category(Category::Rent)),
    ("house", Alias::Category(Category::Rent)),
    ("housing", Alias::Category(Category::Rent)),
    ("home", Alias::Category(Category::Rent)),
    ("transport", Alias::Category(Category::Transport)),
    ("transportation", Alias::Category(Category::Transport)),
    ("travel", Alias::Category(Category::Transport)),
    ("commute", Alias::Category(Category::Transport)),
    ("fuel", Alias::Category(Category::Transport)),
    ("entertainment", Alias::Category(Category::Entertainment)),
    ("fun", Alias::Category(Category::Entertainment)),
    ("leisure", Alias::Category(Category::Entertainment)),
    ("movies", Alias::Category(Category::Entertainment)),
    ("shopping", Alias::Category(Category::Shopping)),
    ("clothes", Alias::Category(Category::Shopping)),
    ("apparel", Alias::Category(Category::Shopping)),
    ("others", Alias::Category(Category::Others)),
    ("other", Alias::Category(Category::Others)),
    ("misc", Alias::Category(Category::Others)),
    ("miscellaneous", Alias::Category(Category::Others)),
    ("saving", Alias::Ignore),
    ("savings", Alias::Ignore),
    ("save", Alias::Ignore),
];

/// Resolve a raw identifier to its canonical category.
/// Returns `None` for ignored and unknown keys alike.
pub fn resolve(identifier: &str) -> Option<Category> {
    let key = identifier.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .and_then(|(_, target)| match target {
            Alias::Category(c) => Some(*c),
            Alias::Ignore => None,
        })
}

/// Aliases that resolve to `category`, canonical key first
pub fn aliases_of(category: Category) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(_, target)| *target == Alias::Category(category))
        .map(|(alias, _)| *alias)
        .collect()
}
