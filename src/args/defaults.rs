use std::time::Duration;

/// Instruction files probed in the working directory when none is given.
pub(crate) const DEFAULT_INSTRUCTION_FILES: [&str; 4] =
    ["smash.toml", "smash.json", "smash.yaml", "smash.yml"];

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const DEFAULT_MAX_IDLE_CONNS: usize = 2000;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("smash/", env!("CARGO_PKG_VERSION"));

