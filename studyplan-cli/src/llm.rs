use anyhow::{bail, Context, Result};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use studyplan_core::WeekEntry;
use studyplan_ingest::{build_plan_prompt, parse_week_plan, PlanPrompt};
use tracing::{debug, info};

use crate::config::LlmSection;

/// Ask the configured chat model for a week plan and parse it.
///
/// Any failure (missing token, HTTP error, unparseable text) is an error; the
/// caller decides how to fall back.
pub fn generate_plan(llm: &LlmSection, prompt: &PlanPrompt) -> Result<Vec<WeekEntry>> {
    request_plan(llm, llm.resolved_token().as_deref(), prompt)
}

fn request_plan(
    llm: &LlmSection,
    token: Option<&str>,
    prompt: &PlanPrompt,
) -> Result<Vec<WeekEntry>> {
    let token = token.ok_or_else(|| {
        anyhow::anyhow!("HF_TOKEN is missing. Export it or set [llm].token in config.toml.")
    })?;

    let (system, user) = build_plan_prompt(prompt);
    let text = chat_complete(llm, token, &system, &user)?;
    debug!(chars = text.len(), "model response received");

    let weeks = parse_week_plan(&text)?;
    if weeks.is_empty() {
        bail!("Could not parse week plan from model output.");
    }
    info!(weeks = weeks.len(), "parsed model plan");
    Ok(weeks)
}

pub fn chat_complete(llm: &LlmSection, token: &str, system: &str, user: &str) -> Result<String> {
    // `main` runs inside a tokio runtime; a nested runtime's block_on would panic.
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| {
            handle.block_on(chat_complete_async(llm, token, system, user))
        })
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(chat_complete_async(llm, token, system, user))
    }
}

async fn chat_complete_async(
    llm: &LlmSection,
    token: &str,
    system: &str,
    user: &str,
) -> Result<String> {
    #[derive(Serialize)]
    struct Msg<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct Req<'a> {
        model: String,
        messages: Vec<Msg<'a>>,
        temperature: f32,
        max_tokens: u32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: llm.resolved_model(),
        messages: vec![
            Msg {
                role: "system",
                content: system,
            },
            Msg {
                role: "user",
                content: user,
            },
        ],
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(llm.timeout_secs))
        .build()
        .context("build http client")?;

    let resp = client
        .post(&llm.base_url)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("{} request", llm.provider))?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("{} error {status}: {}", llm.provider, truncate(&txt, 250));
    }

    let out: Resp = resp
        .json()
        .await
        .with_context(|| format!("parse {} response", llm.provider))?;
    let content = out
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    Ok(content.trim().to_string())
}

/// At most `max` characters, never splitting a char.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    /// Regression: with no token the call fails before any network I/O.
    #[test]
    fn test_missing_token_errors() {
        let llm = LlmSection::default();
        let prompt = PlanPrompt {
            goal: "SQL".to_string(),
            duration_days: 14,
            hours_per_week: 5.0,
            intensity: "light".to_string(),
            learning_pref: "practice".to_string(),
        };
        let err = request_plan(&llm, None, &prompt).unwrap_err();
        assert!(err.to_string().contains("HF_TOKEN"));
    }
}
