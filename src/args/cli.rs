use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_usize};
use super::types::{HttpMethod, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Configurable HTTP load generator - fire curl-style instructions with fixed parallelism, once or on a cron schedule, and report per-instruction timing."
)]
pub struct SmashArgs {
    /// Target URL (builds a single instruction from the flags below)
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Number of concurrent requests fired per invocation (values < 1 count as 1)
    #[arg(
        long = "conc",
        short = 'c',
        visible_alias = "parallelism",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    pub parallelism: i64,

    /// Cron expression with seconds, e.g. '*/5 * * * * *' (omit to run once)
    #[arg(long)]
    pub cron: Option<String>,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body data (sent for PUT/POST)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// Raw curl command; overrides url, method, headers and data
    #[arg(long)]
    pub curl: Option<String>,

    /// Instruction file (.toml or .json) used when no --url/--curl is given
    #[arg(long = "file", short = 'f', env = "SMASH_INSTRUCTION_FILE")]
    pub file: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Idle connections kept per host in the shared pool
    #[arg(long = "max-idle-conns", default_value = "2000", value_parser = parse_positive_usize)]
    pub max_idle_conns: PositiveUsize,

    /// Enable debug logging (status, body and headers per request)
    #[arg(long = "debug", short = 'v', visible_alias = "verbose")]
    pub debug: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl SmashArgs {
    /// Whether the flags describe an instruction on their own.
    #[must_use]
    pub fn has_cli_instruction(&self) -> bool {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };
        non_blank(&self.url) || non_blank(&self.curl)
    }
}
