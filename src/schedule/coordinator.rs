use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ScheduleError};
use crate::http::HttpTransport;
use crate::instruction::{Instruction, InstructionSet};
use crate::smash::{BatchOutcome, Completion, SmashExecutor};

use super::jobs::{CronJob, CronScheduler, JobFn};
use super::phase::Phase;
use super::tokio_cron::parse_cron;

/// Registers recurring instructions, then runs the run-once batch.
pub struct ScheduleCoordinator<T, S> {
    executor: Arc<SmashExecutor<T>>,
    scheduler: S,
    phase: Phase,
    recurring_active: Arc<AtomicUsize>,
}

impl<T: HttpTransport, S: CronScheduler> ScheduleCoordinator<T, S> {
    #[must_use]
    pub fn new(executor: Arc<SmashExecutor<T>>, scheduler: S) -> Self {
        Self {
            executor,
            scheduler,
            phase: Phase::Assembling,
            recurring_active: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.phase {
            Phase::IdleAwaitingCron if self.recurring_active.load(Ordering::Acquire) > 0 => {
                Phase::RunningRecurring
            }
            phase => phase,
        }
    }

    /// Registers one cron job per recurring instruction, in set order.
    ///
    /// Every expression is validated before anything is registered. Returns the
    /// number of registered jobs.
    ///
    /// # Errors
    ///
    /// Returns an error when called twice or when any cron expression is invalid.
    pub fn schedule(&mut self, instructions: &InstructionSet) -> AppResult<usize> {
        self.expect_phase(Phase::Assembling, "schedule instructions")?;

        let recurring = instructions.recurring();
        let jobs = recurring
            .into_iter()
            .enumerate()
            .map(|(index, instruction)| {
                let name = format!("inst-{}", index);
                let expression = instruction.cron_expression().unwrap_or_default().to_owned();
                parse_cron(&name, &expression)?;
                Ok(CronJob {
                    run: self.job_fn(instruction),
                    name,
                    expression,
                })
            })
            .collect::<Result<Vec<CronJob>, ScheduleError>>()?;

        let count = jobs.len();
        for job in jobs {
            debug!("Registering {:?}", job);
            self.scheduler.register(job)?;
        }
        self.phase = Phase::Scheduled;
        info!("Registered {} cron jobs", count);
        Ok(count)
    }

    /// Executes the run-once instructions and decides whether the process may stop.
    ///
    /// # Errors
    ///
    /// Returns an error unless [`ScheduleCoordinator::schedule`] ran first.
    pub async fn run_once(&mut self, instructions: &InstructionSet) -> AppResult<BatchOutcome> {
        self.expect_phase(Phase::Scheduled, "run instructions once")?;
        self.phase = Phase::RunningOnce;

        let batch = instructions.run_once();
        info!("Smashing {} run-once instructions", batch.len());
        let outcome = self.executor.execute(&batch, true).await;

        self.phase = match outcome.completion {
            Completion::Terminate => Phase::Terminated,
            Completion::Continue => Phase::IdleAwaitingCron,
        };
        Ok(outcome)
    }

    /// Schedules recurring work, then runs the run-once batch.
    ///
    /// # Errors
    ///
    /// Returns an error when scheduling fails.
    pub async fn start(&mut self, instructions: &InstructionSet) -> AppResult<BatchOutcome> {
        self.schedule(instructions)?;
        self.run_once(instructions).await
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> AppResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(AppError::schedule(ScheduleError::OutOfOrder {
                action,
                phase: self.phase,
            }))
        }
    }

    fn job_fn(&self, instruction: Instruction) -> Arc<JobFn> {
        let executor = Arc::clone(&self.executor);
        let active = Arc::clone(&self.recurring_active);
        let instruction = Arc::new(instruction);
        Arc::new(move || {
            let executor = Arc::clone(&executor);
            let active = Arc::clone(&active);
            let instruction = Arc::clone(&instruction);
            let future: BoxFuture<'static, ()> = Box::pin(async move {
                active.fetch_add(1, Ordering::AcqRel);
                let outcome = executor
                    .execute(std::slice::from_ref(instruction.as_ref()), false)
                    .await;
                active.fetch_sub(1, Ordering::AcqRel);
                debug!(
                    "Recurring instruction {} finished ({} reports)",
                    instruction,
                    outcome.reports.len()
                );
            });
            future
        })
    }
}
