//! Plain-text renderings for the line-mode chat and one-shot commands.

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use tally_core::{ChartData, Currency, HistoryStore};

const BAR_WIDTH: usize = 24;

/// Horizontal bar per expense category with its share of the total.
///
/// ```text
/// Food           ██████░░░░░░░░░░░░░░░░░░  27.3%
/// ```
pub fn text_chart(chart: &ChartData) -> String {
    let label_width = chart.labels.iter().map(|l| l.len()).max().unwrap_or(0);
    chart
        .iter()
        .zip(chart.percentages())
        .map(|((label, _), pct)| {
            let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "{:<w$}  {}{} {:>5.1}%",
                label,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                pct,
                w = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stored periods in insertion order
pub fn history_table(history: &HistoryStore, currency: &Currency) -> String {
    if history.is_empty() {
        return "No months recorded yet this session.".to_string();
    }
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Period", "Income", "Expenses", "Savings"].map(Cell::new));
    for (label, rec) in history.iter() {
        t.add_row([
            Cell::new(label),
            Cell::new(currency.format(rec.income)),
            Cell::new(currency.format(rec.expenses)),
            Cell::new(currency.format(rec.savings)),
        ]);
    }
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{parse, PeriodRecord};

    #[test]
    fn test_text_chart_shares() {
        let chart = ChartData::from_statement(&parse("food=250 rent=750")).unwrap();
        let out = text_chart(&chart);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Food "));
        assert!(lines[0].ends_with(" 25.0%"));
        assert!(lines[1].ends_with(" 75.0%"));
        assert!(lines[2].ends_with("  0.0%"));
        assert_eq!(lines[0].matches('█').count(), 6);
        assert_eq!(lines[1].matches('█').count(), 18);
    }

    #[test]
    fn test_history_table() {
        let mut h = HistoryStore::new();
        assert!(history_table(&h, &Currency::default()).starts_with("No months"));

        h.put("March 2024", PeriodRecord::new(50000, 48000));
        h.put("April 2024", PeriodRecord::new(40000, 45000));
        let out = history_table(&h, &Currency::default());
        for needle in ["Period", "Savings", "March 2024", "₹48,000", "₹-5,000"] {
            assert!(out.contains(needle), "{needle} missing from\n{out}");
        }
        let march = out.find("March 2024").unwrap();
        let april = out.find("April 2024").unwrap();
        assert!(march < april);
        assert!(out.starts_with('┌'));
    }
}
