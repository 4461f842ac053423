//! Budget evaluation: totals, insights, comparison with the previous
//! submission, and the expense breakdown chart.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::amount::Currency;
use crate::category::Category;
use crate::history::{HistoryStore, PeriodRecord};
use crate::insights::{evaluate_insights, Insight, InsightThresholds};
use crate::parser::{ParsedStatement, Recognized};

/// Shown instead of a chart when every expense is zero
pub const CHART_SKIPPED: &str = "📊 No non-zero expenses provided, so the chart was skipped.";

/// Direction of a month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
}

impl Trend {
    /// Strictly positive is up; zero counts as down.
    pub fn of(diff: i64) -> Self {
        if diff > 0 { Trend::Up } else { Trend::Down }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }
}

/// Difference against the previous submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub previous_label: String,
    pub previous: PeriodRecord,
    /// `current.expenses - previous.expenses`, saturating
    pub expense_diff: i64,
    /// `current.savings - previous.savings`, saturating
    pub savings_diff: i64,
}

impl Comparison {
    fn between(previous_label: &str, previous: &PeriodRecord, current: &PeriodRecord) -> Self {
        Self {
            previous_label: previous_label.to_string(),
            previous: *previous,
            expense_diff: current.expenses.saturating_sub(previous.expenses),
            savings_diff: current.savings.saturating_sub(previous.savings),
        }
    }

    pub fn expense_trend(&self) -> Trend {
        Trend::of(self.expense_diff)
    }

    pub fn savings_trend(&self) -> Trend {
        Trend::of(self.savings_diff)
    }
}

/// Labeled expense values for a proportions chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

impl ChartData {
    /// Build from the six expense categories; `None` when they sum to zero.
    pub fn from_statement(parsed: &ParsedStatement) -> Option<Self> {
        let values: Vec<i64> = Category::EXPENSES.iter().map(|c| parsed.get(*c)).collect();
        if values.iter().all(|v| *v <= 0) {
            return None;
        }
        Some(Self {
            labels: Category::EXPENSES
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            values,
        })
    }

    pub fn total(&self) -> i64 {
        self.values.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    /// Each value as a percentage of the total
    pub fn percentages(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().map(|v| *v as f64).sum();
        if total <= 0.0 {
            return vec![0.0; self.values.len()];
        }
        self.values
            .iter()
            .map(|v| *v as f64 * 100.0 / total)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Everything the front end needs to render one reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub period: String,
    pub record: PeriodRecord,
    pub insights: Vec<Insight>,
    pub comparison: Option<Comparison>,
    pub recognized: Vec<Recognized>,
    /// Rendered multi-section summary
    pub summary: String,
    pub chart: Option<ChartData>,
}

impl Evaluation {
    /// The notice to show in place of a chart, if any
    pub fn chart_notice(&self) -> Option<&'static str> {
        match self.chart {
            Some(_) => None,
            None => Some(CHART_SKIPPED),
        }
    }
}

/// Applies insight thresholds and currency formatting to parsed statements
#[derive(Debug, Clone, Default)]
pub struct BudgetEvaluator {
    pub thresholds: InsightThresholds,
    pub currency: Currency,
}

impl BudgetEvaluator {
    pub fn new(thresholds: InsightThresholds, currency: Currency) -> Self {
        Self {
            thresholds,
            currency,
        }
    }

    /// Record `parsed` under `period` and build the reply.
    ///
    /// Callers should only pass statements with usable data; see
    /// [`ParsedStatement::has_usable_data`].
    pub fn evaluate(
        &self,
        parsed: &ParsedStatement,
        period: &str,
        history: &mut HistoryStore,
    ) -> Evaluation {
        let record = PeriodRecord::new(parsed.income(), parsed.expenses());
        history.put(period, record);

        let insights = evaluate_insights(
            record.income,
            parsed.get(Category::Food),
            parsed.get(Category::Entertainment),
            record.savings,
            &self.thresholds,
        );

        let comparison = if history.len() > 1 {
            history
                .previous()
                .map(|(label, prev)| Comparison::between(label, prev, &record))
        } else {
            None
        };

        let mut eval = Evaluation {
            period: period.to_string(),
            record,
            insights,
            comparison,
            recognized: parsed.recognized.clone(),
            summary: String::new(),
            chart: ChartData::from_statement(parsed),
        };
        eval.summary = self.render(&eval);

        tracing::debug!(
            period,
            income = record.income,
            expenses = record.expenses,
            savings = record.savings,
            insights = eval.insights.len(),
            "evaluated budget"
        );
        eval
    }

    fn render(&self, e: &Evaluation) -> String {
        let fmt = |n: i64| self.currency.format(n);
        let mut s = String::new();

        let _ = writeln!(s, "📊 Budget Summary ({})", e.period);
        let _ = writeln!(s, "- Income: {}", fmt(e.record.income));
        let _ = writeln!(s, "- Expenses: {}", fmt(e.record.expenses));
        let _ = writeln!(s, "- Savings: {}", fmt(e.record.savings));
        s.push('\n');

        s.push_str("💡 Insights:\n");
        for insight in &e.insights {
            let _ = writeln!(s, "{}", insight.message(&self.thresholds));
        }

        if let Some(c) = &e.comparison {
            let _ = writeln!(s, "\n📈 Comparison with {}:", c.previous_label);
            let _ = writeln!(
                s,
                "- Expenses: {} {}",
                c.expense_trend().arrow(),
                self.currency.format_magnitude(c.expense_diff)
            );
            let _ = writeln!(
                s,
                "- Savings: {} {}",
                c.savings_trend().arrow(),
                self.currency.format_magnitude(c.savings_diff)
            );
        }

        if !e.recognized.is_empty() {
            let seen: Vec<String> = e
                .recognized
                .iter()
                .map(|r| format!("{}={}", r.category, fmt(r.amount)))
                .collect();
            let _ = write!(s, "\n📝 Parsed: {}", seen.join(", "));
        }

        s.trim_end().to_string()
    }
}
