// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bot configuration file.
//!
//! The file is TOML. Messaging credentials may be left out of it and
//! supplied through `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` instead;
//! environment values win over the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use four_to_score_api::GameContext;
use four_to_score_domain::{
    DEFAULT_TIMEZONE, DomainError, Participant, PeriodDefinition, PlayerCorrections, Schedule,
};
use serde::Deserialize;
use tracing::info;

/// Environment variable holding the Twilio account SID.
pub const ACCOUNT_SID_VAR: &str = "TWILIO_ACCOUNT_SID";

/// Environment variable holding the Twilio auth token.
pub const AUTH_TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this layout.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parsed but do not describe a playable season.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<DomainError> for ConfigError {
    fn from(err: DomainError) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// A rostered participant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    /// Chat handle exactly as the provider sends it.
    pub handle: String,
    /// Name shown in summaries.
    pub name: String,
}

/// Twilio messaging credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TwilioConfig {
    /// Account SID.
    #[serde(default)]
    pub account_sid: Option<String>,
    /// Auth token.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Sender handle, e.g. `whatsapp:+14155238886`.
    #[serde(default)]
    pub from: Option<String>,
}

impl TwilioConfig {
    /// Returns `(account_sid, auth_token, from)` when all three are present
    /// and non-blank.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
        }
        Some((
            non_blank(&self.account_sid)?,
            non_blank(&self.auth_token)?,
            non_blank(&self.from)?,
        ))
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// The whole configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// IANA timezone the schedule is written in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// `SQLite` database path; in-memory when absent.
    #[serde(default)]
    pub database: Option<String>,
    /// Handles allowed to run admin commands.
    #[serde(default)]
    pub admins: Vec<String>,
    /// The season schedule.
    #[serde(default)]
    pub gameweeks: Vec<PeriodDefinition>,
    /// Known participants.
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    /// Extra spelling corrections, misspelling to canonical name.
    #[serde(default)]
    pub corrections: BTreeMap<String, String>,
    /// Messaging provider settings.
    #[serde(default)]
    pub twilio: TwilioConfig,
}

impl BotConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this layout.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a configuration file, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = Self::from_toml_str(&content)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        info!(
            path = %path.display(),
            gameweeks = config.gameweeks.len(),
            roster = config.roster.len(),
            admins = config.admins.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Replaces credentials with values from `lookup`, when it has them.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sid) = lookup(ACCOUNT_SID_VAR) {
            self.twilio.account_sid = Some(sid);
        }
        if let Some(token) = lookup(AUTH_TOKEN_VAR) {
            self.twilio.auth_token = Some(token);
        }
    }

    /// Builds the shared game context.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is empty or invalid, or a roster
    /// entry has no handle.
    pub fn to_context(&self) -> Result<GameContext, ConfigError> {
        if self.gameweeks.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "at least one gameweek must be configured",
            )));
        }

        let schedule: Schedule = Schedule::new(&self.timezone, &self.gameweeks)?;
        let roster: Vec<Participant> = self
            .roster
            .iter()
            .map(|entry| Participant::new(&entry.handle, &entry.name))
            .collect::<Result<_, _>>()?;

        let mut corrections: PlayerCorrections = PlayerCorrections::default();
        for (misspelling, canonical) in &self.corrections {
            corrections.insert(misspelling, canonical);
        }

        let admins: Vec<String> = self
            .admins
            .iter()
            .map(|admin| admin.trim().to_string())
            .filter(|admin| !admin.is_empty())
            .collect();

        Ok(GameContext::new(schedule, roster, admins, corrections))
    }
}
