use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Please specify an instruction file using '--file /path/to/file' (or SMASH_INSTRUCTION_FILE) and include your smashing instructions in it."
    )]
    MissingInstructionFile,
    #[error("File '{path}' not found.")]
    InstructionFileNotFound { path: PathBuf },
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse YAML config '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml, .json, .yaml or .yml.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have a .toml, .json, .yaml or .yml extension.")]
    MissingExtension,
    #[error("Instruction file '{path}' does not contain any instructions.")]
    NoInstructions { path: PathBuf },
    #[error("Instruction {index} has an empty url (set 'url' or a 'curl' command containing one).")]
    InstructionMissingUrl { index: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
