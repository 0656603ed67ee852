use std::time::Duration;

use reqwest::{Client, redirect};
use tracing::error;

use crate::args::{DEFAULT_MAX_IDLE_CONNS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, SmashArgs};
use crate::error::{AppError, AppResult, HttpError};

/// Idle pooled connections are dropped after this long.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Knobs for the single client shared by every request task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub max_idle_per_host: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_idle_per_host: DEFAULT_MAX_IDLE_CONNS,
        }
    }
}

impl From<&SmashArgs> for ClientSettings {
    fn from(args: &SmashArgs) -> Self {
        Self {
            request_timeout: args.request_timeout,
            max_idle_per_host: args.max_idle_conns.get(),
        }
    }
}

/// Builds a pooled client sized for thousands of concurrent requests.
///
/// Redirects are not followed so every request observes the first response.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.request_timeout)
        .redirect(redirect::Policy::none())
        .pool_max_idle_per_host(settings.max_idle_per_host)
        .pool_idle_timeout(Some(POOL_IDLE_TIMEOUT))
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::BuildClientFailed { source: err })
        })
}
