//! A chat session: the history store and transcript for one running front end.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::evaluator::{BudgetEvaluator, ChartData, Evaluation};
use crate::history::HistoryStore;
use crate::parser::parse;

/// Format hint shown when a line contains no usable `key=value` data
pub fn guidance() -> String {
    let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
    format!(
        "⚠ Please use format like: `income=50000, food=9000, rent=15000`.\nAccepted keys: {}.",
        keys.join(", ")
    )
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Guidance { text: String },
    Summary { evaluation: Evaluation },
}

impl Reply {
    /// The assistant's text for this reply
    pub fn text(&self) -> &str {
        match self {
            Reply::Guidance { text } => text,
            Reply::Summary { evaluation } => &evaluation.summary,
        }
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Reply::Guidance { .. } => None,
            Reply::Summary { evaluation } => Some(evaluation),
        }
    }
}

/// One entry in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "snake_case")]
pub enum Message {
    User(String),
    Assistant(String),
    Chart(ChartData),
}

/// Session state owned by the front end.
#[derive(Debug, Clone, Default)]
pub struct Session {
    evaluator: BudgetEvaluator,
    history: HistoryStore,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(evaluator: BudgetEvaluator) -> Self {
        Self {
            evaluator,
            history: HistoryStore::new(),
            messages: Vec::new(),
        }
    }

    /// Parse and evaluate one line for `period`, appending to the transcript.
    pub fn submit(&mut self, text: &str, period: &str) -> Reply {
        self.messages.push(Message::User(text.to_string()));

        let parsed = parse(text);
        if !parsed.has_usable_data() {
            tracing::debug!("no usable data in submission");
            let text = guidance();
            self.messages.push(Message::Assistant(text.clone()));
            return Reply::Guidance { text };
        }

        let evaluation = self.evaluator.evaluate(&parsed, period, &mut self.history);
        self.messages
            .push(Message::Assistant(evaluation.summary.clone()));
        if let Some(chart) = &evaluation.chart {
            self.messages.push(Message::Chart(chart.clone()));
        }
        if let Some(notice) = evaluation.chart_notice() {
            self.messages.push(Message::Assistant(notice.to_string()));
        }

        Reply::Summary { evaluation }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn evaluator(&self) -> &BudgetEvaluator {
        &self.evaluator
    }
}
