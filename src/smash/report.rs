use std::time::Duration;

use crate::args::HttpMethod;
use crate::instruction::Instruction;

/// Whether the driver may stop once a batch is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Run-once work finished and nothing is scheduled.
    Terminate,
    /// More work may arrive from the scheduler.
    Continue,
}

/// Aggregate timing for one instruction invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionReport {
    pub method: HttpMethod,
    pub url: String,
    pub parallelism: usize,
    /// Sum of every request's elapsed time.
    pub total: Duration,
    pub average: Duration,
    /// Requests that ended in a transport or body error.
    pub failed: usize,
}

impl InstructionReport {
    pub(super) fn new(
        instruction: &Instruction,
        parallelism: usize,
        total: Duration,
        failed: usize,
    ) -> Self {
        Self {
            method: instruction.method,
            url: instruction.url.clone(),
            parallelism,
            total,
            average: average(total, parallelism),
            failed,
        }
    }
}

impl std::fmt::Display for InstructionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            ">>> Instruction finished, '{} {}', took {:?}, on average: {:?} each, total parallel requests: {}, failed: {} <<<",
            self.method, self.url, self.total, self.average, self.parallelism, self.failed
        )
    }
}

/// Outcome of one `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// One report per instruction, in batch order.
    pub reports: Vec<InstructionReport>,
    pub completion: Completion,
}

fn average(total: Duration, parallelism: usize) -> Duration {
    let divisor = u128::try_from(parallelism).unwrap_or(u128::MAX).max(1);
    let nanos = total.as_nanos().checked_div(divisor).unwrap_or_default();
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
