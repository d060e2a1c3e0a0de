//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first, so either
//! source may set these variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PHYLOCURATE_LOG` | `warn` | `tracing` filter directive |
//! | `PHYLOCURATE_LABEL_SCOPE` | `all` | default scope for `labels` |

use std::env;

use tracing::warn;

use crate::phylogeny::NodeScope;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PHYLOCURATE_LOG";
/// Environment variable holding the default node scope.
pub const LABEL_SCOPE_ENV: &str = "PHYLOCURATE_LABEL_SCOPE";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Filter passed to the log subscriber.
    pub log_filter: String,
    /// Scope used by `labels` when none is given on the command line.
    pub label_scope: NodeScope,
    /// Values that were set but could not be used.
    pub rejected: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            label_scope: NodeScope::All,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads configuration from the
    /// environment.
    #[must_use]
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from a variable lookup. Unset variables use
    /// defaults; an unknown scope falls back to `all` and is noted in
    /// [`Config::rejected`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(scope) = lookup(LABEL_SCOPE_ENV) {
            match scope.trim().parse::<NodeScope>() {
                Ok(scope) => config.label_scope = scope,
                Err(err) => config.rejected.push(format!("{LABEL_SCOPE_ENV}: {err}")),
            }
        }

        config
    }

    /// Logs every rejected value. Call once the subscriber is installed.
    pub fn warn_rejected(&self) {
        for problem in &self.rejected {
            warn!(%problem, "ignoring configuration value");
        }
    }
}
