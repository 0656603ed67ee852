use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::args::{HttpMethod, SmashArgs};

/// One load target: what to request and how many requests to fire per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    pub url: String,
    pub method: HttpMethod,
    /// Configured parallelism; see [`Instruction::effective_parallelism`].
    pub parallelism: i64,
    pub headers: BTreeMap<String, String>,
    pub payload: String,
    /// Six-field cron expression (seconds first). Blank means run once.
    pub cron: Option<String>,
    /// Curl-style command that overrides url, method, headers and payload once translated.
    pub raw_command: Option<String>,
}

impl Instruction {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            parallelism: 1,
            ..Self::default()
        }
    }

    /// Builds the single instruction described by command-line flags.
    #[must_use]
    pub fn from_args(args: &SmashArgs) -> Self {
        Self {
            url: args.url.clone().unwrap_or_default(),
            method: args.method,
            parallelism: args.parallelism,
            headers: args.headers.iter().cloned().collect(),
            payload: args.data.clone(),
            cron: args.cron.clone(),
            raw_command: args.curl.clone(),
        }
    }

    /// Number of concurrent requests per invocation, never below one.
    #[must_use]
    pub fn effective_parallelism(&self) -> NonZeroUsize {
        usize::try_from(self.parallelism)
            .ok()
            .and_then(NonZeroUsize::new)
            .unwrap_or(NonZeroUsize::MIN)
    }

    #[must_use]
    pub fn cron_expression(&self) -> Option<&str> {
        self.cron
            .as_deref()
            .map(str::trim)
            .filter(|expression| !expression.is_empty())
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.cron_expression().is_some()
    }

    #[must_use]
    pub fn has_raw_command(&self) -> bool {
        self.raw_command
            .as_deref()
            .is_some_and(|command| !command.trim().is_empty())
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
