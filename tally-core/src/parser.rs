//! Free-text budget statement parsing.
//!
//! Users type lines like `income=50,000, food=18k, rent = ₹15000`. Every
//! `key=value` fragment is located anywhere in the text; keys go through the
//! alias table and values through [`parse_amount`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::amount::parse_amount;
use crate::category::{resolve, Category};

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_]+)\s*=\s*([₹\s]*[\d,.]+[kK]?)").expect("pair pattern compiles")
});

/// One `key=value` fragment that mapped onto a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognized {
    /// Identifier exactly as typed
    pub original: String,
    pub category: Category,
    pub amount: i64,
}

/// Canonical amounts for all seven categories plus the fragments that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub amounts: BTreeMap<Category, i64>,
    pub recognized: Vec<Recognized>,
}

impl Default for ParsedStatement {
    fn default() -> Self {
        Self {
            amounts: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            recognized: Vec::new(),
        }
    }
}

impl ParsedStatement {
    pub fn get(&self, category: Category) -> i64 {
        self.amounts.get(&category).copied().unwrap_or(0)
    }

    pub fn income(&self) -> i64 {
        self.get(Category::Income)
    }

    /// Sum of the six expense categories, saturating at `i64::MAX`
    pub fn expenses(&self) -> i64 {
        Category::EXPENSES
            .iter()
            .fold(0i64, |acc, c| acc.saturating_add(self.get(*c)))
    }

    /// False when nothing in the input mapped onto a category
    pub fn has_usable_data(&self) -> bool {
        self.income() > 0 || !self.recognized.is_empty()
    }
}

/// Parse a free-text line into a [`ParsedStatement`].
///
/// Later fragments for the same category overwrite earlier ones, but every
/// recognized fragment is kept in `recognized`, in input order.
pub fn parse(text: &str) -> ParsedStatement {
    let mut out = ParsedStatement::default();

    for caps in PAIR_RE.captures_iter(text) {
        let raw_key = &caps[1];
        let Some(category) = resolve(raw_key) else {
            tracing::debug!(key = raw_key, "dropping unknown or ignored key");
            continue;
        };
        let amount = parse_amount(&caps[2]);
        out.amounts.insert(category, amount);
        out.recognized.push(Recognized {
            original: raw_key.trim().to_string(),
            category,
            amount,
        });
    }

    tracing::debug!(recognized = out.recognized.len(), "parsed statement");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(p: &ParsedStatement) -> Vec<Category> {
        p.recognized.iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_parse_reference_statement() {
        let p = parse("income=50,000, food=18,000, rent=15000, entertainment=15,000");
        assert_eq!(p.get(Category::Income), 50000);
        assert_eq!(p.get(Category::Food), 18000);
        assert_eq!(p.get(Category::Rent), 15000);
        assert_eq!(p.get(Category::Entertainment), 15000);
        assert_eq!(p.get(Category::Transport), 0);
        assert_eq!(p.get(Category::Shopping), 0);
        assert_eq!(p.get(Category::Others), 0);
        assert_eq!(
            categories(&p),
            vec![
                Category::Income,
                Category::Food,
                Category::Rent,
                Category::Entertainment
            ]
        );
        assert_eq!(p.expenses(), 48000);
    }

    #[test]
    fn test_alias_with_decimal_k() {
        let p = parse("salary=1.5k");
        assert_eq!(p.income(), 1500);
        assert_eq!(p.recognized[0].original, "salary");
        assert_eq!(p.recognized[0].category, Category::Income);
    }

    #[test]
    fn test_no_pairs_is_empty() {
        for text in ["", "hello there", "income 5000", "=500", "food=", "food=abc"] {
            let p = parse(text);
            assert!(p.recognized.is_empty(), "{text:?}");
            assert!(p.amounts.values().all(|v| *v == 0), "{text:?}");
            assert_eq!(p.amounts.len(), 7);
            assert!(!p.has_usable_data());
        }
    }

    #[test]
    fn test_ignored_and_unknown_keys_dropped() {
        let p = parse("savings=10000, bonus=5000, save=1");
        assert!(p.recognized.is_empty());
        assert!(!p.has_usable_data());

        let p = parse("savings=10000 food=200");
        assert_eq!(categories(&p), vec![Category::Food]);
    }

    #[test]
    fn test_last_occurrence_wins_but_all_are_echoed() {
        let p = parse("food=100 dining=250");
        assert_eq!(p.get(Category::Food), 250);
        assert_eq!(p.recognized.len(), 2);
        assert_eq!(p.recognized[0].amount, 100);
        assert_eq!(p.recognized[1].original, "dining");
    }

    #[test]
    fn test_spacing_glyph_and_case() {
        let p = parse("My INCOME =  ₹ 60,000 and Groceries= 9K; fuel =1,200.");
        assert_eq!(p.income(), 60000);
        assert_eq!(p.get(Category::Food), 9000);
        assert_eq!(p.get(Category::Transport), 1200);
        assert_eq!(p.recognized[0].original, "INCOME");
    }

    #[test]
    fn test_zero_amounts_still_usable() {
        let p = parse("food=0");
        assert_eq!(p.recognized.len(), 1);
        assert!(p.has_usable_data());
        assert_eq!(p.expenses(), 0);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let p = parse("food=99999999999999999999");
        assert_eq!(p.get(Category::Food), i64::MAX);

        let p = parse("food=9999999999999999999 rent=9999999999999999999 misc=1");
        assert_eq!(p.expenses(), i64::MAX);
    }

    #[test]
    fn test_underscore_identifier_is_single_key() {
        let p = parse("my_rent=5000");
        assert!(p.recognized.is_empty());
    }
}
