use tracing::debug;

use super::{Instruction, translate};
use crate::error::ConfigError;

/// Ordered instructions assembled once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSet {
    instructions: Vec<Instruction>,
}

impl InstructionSet {
    #[must_use]
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Runs the one-time curl translation pass over every instruction.
    #[must_use]
    pub fn translated(self) -> Self {
        let instructions = self
            .instructions
            .into_iter()
            .map(|instruction| {
                if instruction.has_raw_command() {
                    translate(instruction)
                } else {
                    instruction
                }
            })
            .collect();
        Self { instructions }
    }

    /// Checks that every instruction has somewhere to send requests.
    ///
    /// # Errors
    ///
    /// Returns the index of the first instruction with a blank url.
    pub fn ensure_targets(&self) -> Result<(), ConfigError> {
        match self
            .instructions
            .iter()
            .position(|instruction| instruction.url.trim().is_empty())
        {
            Some(index) => Err(ConfigError::InstructionMissingUrl { index }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Instructions without a cron expression, in set order.
    #[must_use]
    pub fn run_once(&self) -> Vec<Instruction> {
        self.filter(|instruction| !instruction.is_recurring())
    }

    /// Instructions with a cron expression, in set order.
    #[must_use]
    pub fn recurring(&self) -> Vec<Instruction> {
        self.filter(Instruction::is_recurring)
    }

    fn filter<F>(&self, predicate: F) -> Vec<Instruction>
    where
        F: Fn(&Instruction) -> bool,
    {
        let filtered: Vec<Instruction> = self
            .instructions
            .iter()
            .filter(|instruction| predicate(instruction))
            .cloned()
            .collect();
        debug!(
            "Selected {} of {} instructions",
            filtered.len(),
            self.instructions.len()
        );
        filtered
    }
}

impl FromIterator<Instruction> for InstructionSet {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'set> IntoIterator for &'set InstructionSet {
    type Item = &'set Instruction;
    type IntoIter = std::slice::Iter<'set, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
