use std::collections::BTreeMap;

use serde::Deserialize;

use crate::args::HttpMethod;
use crate::instruction::Instruction;

/// Top-level layout of a `.toml` / `.json` instruction file.
#[derive(Debug, Default, Deserialize)]
pub struct InstructionFile {
    #[serde(default)]
    pub instructions: Vec<InstructionConfig>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct InstructionConfig {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    #[serde(alias = "conc", alias = "concurrency")]
    pub parallelism: Option<i64>,
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(alias = "data")]
    pub payload: Option<String>,
    pub cron: Option<String>,
    pub curl: Option<String>,
}

impl From<InstructionConfig> for Instruction {
    fn from(config: InstructionConfig) -> Self {
        Self {
            url: config.url.unwrap_or_default(),
            method: config.method.unwrap_or_default(),
            parallelism: config.parallelism.unwrap_or(1),
            headers: config.headers.unwrap_or_default(),
            payload: config.payload.unwrap_or_default(),
            cron: config.cron,
            raw_command: config.curl,
        }
    }
}
