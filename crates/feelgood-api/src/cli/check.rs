//! `check-config`: validate credentials and settings without connecting.

use anyhow::Result;
use console::style;
use serde::Serialize;

use feelgood_core::service::secret::SecretService;
use feelgood_types::secret::{DATABASE_URL, REQUIRED_SECRETS};

use crate::state::AppState;

/// One secret's resolution status.
#[derive(Debug, Serialize)]
pub struct SecretStatus {
    pub key: &'static str,
    pub required: bool,
    /// `environment` or `dotenv`; absent when unresolved.
    pub source: Option<String>,
    pub masked: Option<String>,
}

impl SecretStatus {
    /// A required secret must resolve to a non-blank value.
    pub fn is_ok(&self) -> bool {
        !self.required || self.masked.is_some()
    }
}

/// Resolve every known secret and report where each came from.
pub async fn collect_secret_status(secrets: &SecretService) -> Result<Vec<SecretStatus>> {
    let mut statuses = Vec::with_capacity(REQUIRED_SECRETS.len() + 1);

    let keys = REQUIRED_SECRETS
        .iter()
        .map(|key| (*key, true))
        .chain(std::iter::once((DATABASE_URL, false)));

    for (key, required) in keys {
        let resolved = secrets
            .get_secret(key)
            .await?
            .filter(|s| !s.value.trim().is_empty());

        statuses.push(SecretStatus {
            key,
            required,
            source: resolved.as_ref().map(|s| s.source.to_string()),
            masked: resolved.map(|s| SecretService::mask_secret(&s.value)),
        });
    }

    Ok(statuses)
}

/// Print the configuration summary. Fails when a required secret is missing.
pub async fn check_config(state: &AppState, json: bool) -> Result<()> {
    let statuses = collect_secret_status(&state.secret_service).await?;
    let missing: Vec<&str> = statuses
        .iter()
        .filter(|s| !s.is_ok())
        .map(|s| s.key)
        .collect();

    if json {
        let summary = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "dotenv": state.dotenv_path.as_ref().map(|p| p.display().to_string()),
            "config": state.config,
            "secrets": statuses,
            "ok": missing.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(state, &statuses);
    }

    if !missing.is_empty() {
        anyhow::bail!("missing required secrets: {}", missing.join(", "));
    }
    Ok(())
}

fn print_summary(state: &AppState, statuses: &[SecretStatus]) {
    println!();
    println!("  {}", style("FeelGood configuration").bold());
    println!();
    println!("  Data dir:     {}", style(state.data_dir.display()).cyan());
    match &state.dotenv_path {
        Some(path) => println!("  .env file:    {}", style(path.display()).cyan()),
        None => println!("  .env file:    {}", style("none").dim()),
    }
    println!(
        "  Timeout:      {}s per provider",
        state.config.provider_timeout_secs
    );
    println!(
        "  Results:      {} per category",
        state.config.results_per_category
    );
    println!(
        "  Message size: {} chars",
        state.config.max_message_chars
    );
    println!(
        "  Market:       {}",
        state.config.spotify_market.as_deref().unwrap_or("any")
    );
    println!();

    for status in statuses {
        let mark = if status.masked.is_some() {
            style("✓").green()
        } else if status.required {
            style("✗").red()
        } else {
            style("-").dim()
        };
        let detail = match (&status.masked, &status.source) {
            (Some(masked), Some(source)) => format!("{masked} ({source})"),
            _ if status.required => "missing".to_string(),
            _ => "not set".to_string(),
        };
        println!("  {mark} {:<22} {}", status.key, style(detail).dim());
    }
    println!();
}
