use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use studyplan_core::PlanStore;
use tracing::info;

pub fn studyplan_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STUDYPLAN_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".studyplan"))
}

pub fn ensure_studyplan_home() -> Result<PathBuf> {
    let dir = studyplan_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_studyplan_home()?.join("store.json"))
}

/// Read the store, or an empty one when the file does not exist yet.
pub fn load_store(p: &Path) -> Result<PlanStore> {
    if !p.exists() {
        return Ok(PlanStore::new());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_store(p: &Path, store: &PlanStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(p, json).with_context(|| format!("write {}", p.display()))?;
    info!(
        path = %p.display(),
        plans = store.plans.len(),
        tasks = store.tasks.len(),
        "store saved"
    );
    Ok(())
}

/// The explicitly requested plan, or the most recent one.
pub fn resolve_plan_id(store: &PlanStore, explicit: Option<&str>) -> Result<String> {
    if let Some(id) = explicit {
        store.plan(id)?;
        return Ok(id.to_string());
    }
    match store.latest_plan_id() {
        Some(id) => Ok(id.to_string()),
        None => bail!("No plan yet. Create one first: studyplan create --goal <subject>"),
    }
}
