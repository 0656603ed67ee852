//! Instruction file discovery and loading.
mod loader;
pub mod types;


pub use loader::{load_instruction_file, resolve_instruction_path};
#[cfg(feature = "fuzzing")]
pub(crate) use loader::instruction_set;
