//! Instruction model, curl translation, and run-once/recurring partitioning.
mod curl;
mod model;
mod set;


pub use curl::translate;
pub use model::Instruction;
pub use set::InstructionSet;
