//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::SmashArgs;
pub use types::{HttpMethod, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_INSTRUCTION_FILES, DEFAULT_MAX_IDLE_CONNS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::parse_header;
