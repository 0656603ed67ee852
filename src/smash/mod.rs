//! Concurrent execution of instruction batches.
mod executor;
mod report;

#[cfg(test)]
mod tests;

pub use executor::SmashExecutor;
pub use report::{BatchOutcome, Completion, InstructionReport};
