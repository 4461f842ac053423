use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tally_core::{BudgetEvaluator, Currency, InsightThresholds};

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub insights: InsightThresholds,
    pub chat: ChatSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Glyph prefixed to every amount
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    /// IANA timezone used to derive the current period label
    pub timezone: String,
    /// Append chat turns to ~/.tally/chat/YYYY-MM-DD.md
    pub transcript: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_symbol: tally_core::amount::RUPEE.to_string(),
        }
    }
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            transcript: true,
        }
    }
}

impl Config {
    pub fn evaluator(&self) -> BudgetEvaluator {
        BudgetEvaluator::new(
            self.insights,
            Currency::new(self.display.currency_symbol.clone()),
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
