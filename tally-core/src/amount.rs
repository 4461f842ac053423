//! Amount tokens: parsing user shorthand (`50,000`, `₹15,000`, `1.5k`) and
//! rendering whole-unit amounts with a currency glyph.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default currency glyph
pub const RUPEE: &str = "₹";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(\.\d+)?)").expect("number pattern compiles"));

/// Parse an amount token into whole currency units.
///
/// Strips the rupee glyph, commas and `rs`/`rs.` noise, honours a trailing
/// `k` as thousands, then reads the first decimal number in what remains.
/// A token without any number is worth 0.
pub fn parse_amount(raw: &str) -> i64 {
    let s = raw
        .trim()
        .to_lowercase()
        .replace(RUPEE, "")
        .replace(',', "")
        .replace("rs.", "")
        .replace("rs", "");

    let (digits, multiplier) = match s.strip_suffix('k') {
        Some(rest) => (rest, 1000.0),
        None => (s.as_str(), 1.0),
    };

    let Some(m) = NUMBER_RE.find(digits) else {
        return 0;
    };
    let value: f64 = match m.as_str().parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    (value * multiplier).round_ties_even() as i64
}

/// Renders amounts as `<glyph><grouped digits>` with no decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: RUPEE.to_string(),
        }
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// `₹50,000`, `₹-1,500`, `₹0`
    pub fn format(&self, amount: i64) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        format!("{}{}{}", self.symbol, sign, group_thousands(amount.unsigned_abs()))
    }

    /// Absolute value of a signed difference, e.g. `-2000` -> `₹2,000`.
    /// `i64::MIN` has no positive `i64`, so the magnitude is taken unsigned.
    pub fn format_magnitude(&self, diff: i64) -> String {
        format!("{}{}", self.symbol, group_thousands(diff.unsigned_abs()))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
