//! tally-core: budget statement parsing, evaluation and session history

pub mod amount;
pub mod category;
pub mod evaluator;
pub mod history;
pub mod insights;
pub mod parser;
pub mod session;
pub mod time;

pub use amount::{parse_amount, Currency};
pub use category::{aliases_of, resolve, Alias, Category, ALIASES};
pub use evaluator::{BudgetEvaluator, ChartData, Comparison, Evaluation, Trend, CHART_SKIPPED};
pub use history::{HistoryStore, PeriodRecord};
pub use insights::{evaluate_insights, Insight, InsightThresholds};
pub use parser::{parse, ParsedStatement, Recognized};
pub use session::{guidance, Message, Reply, Session};
pub use time::{current_period_label, parse_period, period_label};
