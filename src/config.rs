// src/config.rs
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

const ENV_SHEET_URL: &str = "OPSBOARD_SHEET_URL";
const ENV_PASSCODE: &str = "OPSBOARD_PASSCODE";
const ENV_REFRESH_SECS: &str = "OPSBOARD_REFRESH_SECS";

/// Published-to-web CSV export of the operations sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vS9kQmOqXbXkQhR2c/pub?gid=0&single=true&output=csv";
pub const DEFAULT_PASSCODE: &str = "anchor2195";
pub const DEFAULT_REFRESH_SECS: u64 = 20;

/// Runtime configuration, environment-driven with defaults. The passcode
/// lives here so the admission check can run before the refresh lifecycle
/// is allowed to start; how the gate is presented is the consumer's
/// business.
#[derive(Debug, Clone)]
pub struct Config {
    pub sheet_url: Url,
    passcode: String,
    pub refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw_url = env::var(ENV_SHEET_URL).unwrap_or_else(|_| DEFAULT_SHEET_URL.to_string());
        let raw_passcode = env::var(ENV_PASSCODE).unwrap_or_else(|_| DEFAULT_PASSCODE.to_string());
        let refresh_secs = match env::var(ENV_REFRESH_SECS) {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid {ENV_REFRESH_SECS}: {raw}"))?,
            Err(_) => DEFAULT_REFRESH_SECS,
        };
        Self::new(&raw_url, raw_passcode, refresh_secs)
    }

    pub fn new(sheet_url: &str, passcode: String, refresh_secs: u64) -> Result<Self> {
        let sheet_url =
            Url::parse(sheet_url).with_context(|| format!("invalid sheet URL: {sheet_url}"))?;
        Ok(Self {
            sheet_url,
            passcode,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }

    /// Boolean admission check: whether `entered` opens the dashboard.
    pub fn admit(&self, entered: &str) -> bool {
        entered.trim() == self.passcode
    }
}
