use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_studyplan_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub profile: ProfileSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub provider: String,
    pub model: String,
    /// OpenAI-compatible chat completions endpoint.
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Prefer the HF_TOKEN env var; this is a fallback for machines without it.
    pub token: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "huggingface".to_string(),
            model: "mistralai/Mistral-7B-Instruct-v0.3:fastest".to_string(),
            base_url: "https://router.huggingface.co/v1/chat/completions".to_string(),
            temperature: 0.2,
            max_tokens: 1100,
            timeout_secs: 60,
            token: None,
        }
    }
}

impl LlmSection {
    /// Model name, with HF_MODEL taking precedence.
    pub fn resolved_model(&self) -> String {
        std::env::var("HF_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.model.clone())
    }

    /// API token from HF_TOKEN, then the config file.
    pub fn resolved_token(&self) -> Option<String> {
        self.token_with(std::env::var("HF_TOKEN").ok())
    }

    fn token_with(&self, env_token: Option<String>) -> Option<String> {
        [env_token, self.token.clone()]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl ProfileSection {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone in config: {}", self.timezone))
    }

    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

/// Values used when `create` flags are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub goal_type: String,
    pub duration_days: i64,
    pub hours_per_week: f64,
    pub preferred_days: Vec<String>,
    pub intensity: String,
    pub learning_pref: String,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            goal_type: "Exam preparation".to_string(),
            duration_days: 30,
            hours_per_week: 10.0,
            preferred_days: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            intensity: "moderate".to_string(),
            learning_pref: "mixed".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_studyplan_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let mut shown = cfg.clone();
    if shown.llm.token.is_some() {
        shown.llm.token = Some("<redacted>".to_string());
    }
    println!("# {}", p.display());
    print!("{}", toml::to_string_pretty(&shown).context("serialize config")?);
    Ok(())
}
