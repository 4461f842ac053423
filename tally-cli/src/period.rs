use anyhow::Result;
use tally_core::{current_period_label, parse_period};

/// Where a submission's period label comes from: a fixed `--period` or the
/// wall clock in the configured timezone.
#[derive(Debug, Clone)]
pub enum PeriodSource {
    Fixed(String),
    Clock { timezone: String },
}

impl PeriodSource {
    pub fn new(fixed: Option<&str>, timezone: &str) -> Result<Self> {
        match fixed {
            Some(p) => Ok(Self::Fixed(parse_period(p)?)),
            None => {
                // validate the zone now
                current_period_label(timezone)?;
                Ok(Self::Clock {
                    timezone: timezone.to_string(),
                })
            }
        }
    }

    /// Label for a submission made now
    pub fn label(&self) -> Result<String> {
        match self {
            Self::Fixed(label) => Ok(label.clone()),
            Self::Clock { timezone } => current_period_label(timezone),
        }
    }
}
