//! Month-over-month history of submitted budgets, kept for the life of a session.

use serde::{Deserialize, Serialize};

/// Totals recorded for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub income: i64,
    pub expenses: i64,
    /// `income - expenses`; negative when overspent
    pub savings: i64,
}

impl PeriodRecord {
    pub fn new(income: i64, expenses: i64) -> Self {
        Self {
            income,
            expenses,
            savings: income.saturating_sub(expenses),
        }
    }
}

/// Insertion-ordered map of period label -> record.
///
/// Re-recording a label replaces its value in place; it does not move to
/// the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStore {
    entries: Vec<(String, PeriodRecord)>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `label`
    pub fn put(&mut self, label: impl Into<String>, record: PeriodRecord) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => {
                tracing::debug!(period = %label, "overwriting period record");
                *existing = record;
            }
            None => {
                tracing::debug!(period = %label, "recording new period");
                self.entries.push((label, record));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&PeriodRecord> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, r)| r)
    }

    /// The second-to-last entry by insertion order.
    ///
    /// This is the prior *submission*, not the prior calendar month.
    pub fn previous(&self) -> Option<(&str, &PeriodRecord)> {
        let n = self.entries.len();
        if n < 2 {
            return None;
        }
        let (label, record) = &self.entries[n - 2];
        Some((label.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PeriodRecord)> {
        self.entries.iter().map(|(l, r)| (l.as_str(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derives_savings() {
        let r = PeriodRecord::new(50000, 62000);
        assert_eq!(r.savings, -12000);

        let r = PeriodRecord::new(0, i64::MAX);
        assert_eq!(r.savings, -i64::MAX);
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut h = HistoryStore::new();
        h.put("March 2024", PeriodRecord::new(100, 10));
        h.put("April 2024", PeriodRecord::new(200, 20));
        h.put("March 2024", PeriodRecord::new(300, 30));

        assert_eq!(h.len(), 2);
        let labels: Vec<&str> = h.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["March 2024", "April 2024"]);
        assert_eq!(h.get("March 2024").unwrap().income, 300);
    }

    #[test]
    fn test_previous_is_second_to_last_submission() {
        let mut h = HistoryStore::new();
        assert!(h.previous().is_none());

        h.put("January 2024", PeriodRecord::new(1, 0));
        assert!(h.previous().is_none());

        h.put("June 2024", PeriodRecord::new(2, 0));
        let (label, rec) = h.previous().unwrap();
        assert_eq!(label, "January 2024");
        assert_eq!(rec.income, 1);

        h.put("March 2024", PeriodRecord::new(3, 0));
        assert_eq!(h.previous().unwrap().0, "June 2024");
    }

    #[test]
    fn test_previous_after_overwriting_older_label() {
        let mut h = HistoryStore::new();
        h.put("March 2024", PeriodRecord::new(1, 0));
        h.put("April 2024", PeriodRecord::new(2, 0));
        h.put("March 2024", PeriodRecord::new(5, 0));
        // order is unchanged, so "previous" is March itself
        assert_eq!(h.previous().unwrap().0, "March 2024");
    }
}
