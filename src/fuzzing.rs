use std::path::Path;
use std::time::Duration;

use clap::Parser;

use crate::args::{HttpMethod, SmashArgs, parse_header, parsers::parse_duration_arg};
use crate::config::instruction_set;
use crate::config::types::InstructionFile;
use crate::error::{AppError, AppResult, ConfigError};
use crate::instruction::{Instruction, InstructionSet, translate};

/// Parses a header string in `Key: Value` format.
///
/// # Errors
///
/// Returns an error when the header is malformed.
pub fn parse_header_input(input: &str) -> AppResult<(String, String)> {
    parse_header(input).map_err(AppError::from)
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses an HTTP method name, ignoring case.
///
/// # Errors
///
/// Returns an error for unsupported methods.
pub fn parse_method_input(input: &str) -> AppResult<HttpMethod> {
    input.parse::<HttpMethod>().map_err(AppError::from)
}

/// Translates a raw curl command into an instruction.
#[must_use]
pub fn translate_curl_input(input: &str) -> Instruction {
    translate(Instruction {
        raw_command: Some(input.to_owned()),
        ..Instruction::default()
    })
}

/// Parses CLI tokens the way the binary would.
///
/// # Errors
///
/// Returns an error when clap rejects the tokens.
pub fn parse_cli_input(tokens: &[&str]) -> AppResult<SmashArgs> {
    SmashArgs::try_parse_from(std::iter::once("smash").chain(tokens.iter().copied()))
        .map_err(AppError::from)
}

/// Parses and validates a TOML instruction file body.
///
/// # Errors
///
/// Returns an error when the document is malformed, empty, or misses a url.
pub fn parse_instruction_toml(input: &str) -> AppResult<InstructionSet> {
    let path = Path::new("fuzz.toml");
    let file: InstructionFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    instruction_set(file, path)
}

/// Parses and validates a JSON instruction file body.
///
/// # Errors
///
/// Returns an error when the document is malformed, empty, or misses a url.
pub fn parse_instruction_json(input: &str) -> AppResult<InstructionSet> {
    let path = Path::new("fuzz.json");
    let file: InstructionFile = serde_json::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    instruction_set(file, path)
}
