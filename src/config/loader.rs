use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::args::DEFAULT_INSTRUCTION_FILES;
use crate::error::{AppError, AppResult, ConfigError};
use crate::instruction::{Instruction, InstructionSet};

use super::types::InstructionFile;

/// Picks the instruction file from an explicit path or the default locations.
///
/// # Errors
///
/// Returns an error when no path is given and no default file exists.
pub fn resolve_instruction_path(path: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path.map(str::trim).filter(|path| !path.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    DEFAULT_INSTRUCTION_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
        .ok_or(ConfigError::MissingInstructionFile)
}

/// Loads, translates and validates the instructions stored in `path`.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, malformed, empty, or
/// contains an instruction without a url.
pub fn load_instruction_file(path: &Path) -> AppResult<InstructionSet> {
    if !path.exists() {
        return Err(AppError::config(ConfigError::InstructionFileNotFound {
            path: path.to_path_buf(),
        }));
    }

    let file = parse_instruction_file(path)?;
    let instructions = instruction_set(file, path)?;

    info!(
        "Loaded {} instructions from '{}'",
        instructions.len(),
        path.display()
    );
    for instruction in &instructions {
        debug!("{:?}", instruction);
    }
    Ok(instructions)
}

/// Translates parsed entries and rejects empty sets or entries without a url.
pub(crate) fn instruction_set(file: InstructionFile, path: &Path) -> AppResult<InstructionSet> {
    let instructions: InstructionSet = file
        .instructions
        .into_iter()
        .map(Instruction::from)
        .collect::<InstructionSet>()
        .translated();

    if instructions.is_empty() {
        return Err(AppError::config(ConfigError::NoInstructions {
            path: path.to_path_buf(),
        }));
    }
    instructions.ensure_targets()?;
    Ok(instructions)
}

pub(crate) fn parse_instruction_file(path: &Path) -> AppResult<InstructionFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
