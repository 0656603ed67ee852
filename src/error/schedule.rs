use thiserror::Error;

use crate::schedule::Phase;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}' for job '{job}': {source}")]
    InvalidCron {
        job: String,
        expression: String,
        #[source]
        source: cron::error::Error,
    },
    #[error("Cron expression for job '{job}' never fires.")]
    NoUpcomingTick { job: String },
    #[error("Cannot {action} while {phase}.")]
    OutOfOrder { action: &'static str, phase: Phase },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}
