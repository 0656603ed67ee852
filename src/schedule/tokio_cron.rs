use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cron::Schedule;
use tracing::{debug, info, warn};

use crate::error::ScheduleError;
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::jobs::{CronJob, CronScheduler, JobCounter, JobFn};

/// Parses a six- or seven-field cron expression (seconds first).
///
/// # Errors
///
/// Returns an error when the expression is malformed or has no upcoming tick.
pub fn parse_cron(job: &str, expression: &str) -> Result<Schedule, ScheduleError> {
    let schedule =
        Schedule::from_str(expression.trim()).map_err(|err| ScheduleError::InvalidCron {
            job: job.to_owned(),
            expression: expression.to_owned(),
            source: err,
        })?;
    if schedule.upcoming(Utc).next().is_none() {
        return Err(ScheduleError::NoUpcomingTick {
            job: job.to_owned(),
        });
    }
    Ok(schedule)
}

/// Runs each registered job on its own tokio task until shutdown is broadcast.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioCronScheduler {
    jobs: JobCounter,
    shutdown_tx: ShutdownSender,
}

impl TokioCronScheduler {
    #[must_use]
    pub fn new(shutdown_tx: &ShutdownSender) -> Self {
        Self {
            jobs: JobCounter::default(),
            shutdown_tx: shutdown_tx.clone(),
        }
    }
}

impl CronScheduler for TokioCronScheduler {
    fn register(&self, job: CronJob) -> Result<(), ScheduleError> {
        let schedule = parse_cron(&job.name, &job.expression)?;
        info!("Scheduled cron job '{}' ({})", job.name, job.expression);
        let shutdown_rx = self.shutdown_tx.subscribe();
        tokio::spawn(run_job(job.name, schedule, job.run, shutdown_rx));
        self.jobs.increment();
        Ok(())
    }

    fn jobs(&self) -> JobCounter {
        self.jobs.clone()
    }
}

async fn run_job(
    name: String,
    schedule: Schedule,
    run: Arc<JobFn>,
    mut shutdown_rx: ShutdownReceiver,
) {
    let mut last_fired: Option<DateTime<Utc>> = None;
    loop {
        let now = Utc::now();
        let from = last_fired.map_or(now, |fired| fired.max(now));
        let Some(next) = schedule.after(&from).next() else {
            warn!("Cron job '{}' has no upcoming tick, stopping.", name);
            break;
        };
        let wait = next
            .signed_duration_since(Utc::now())
            .to_std()
            .unwrap_or_default();

        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                debug!("Stopping cron job '{}'", name);
                break;
            }
            () = tokio::time::sleep(wait) => {
                debug!("Cron job '{}' fired for {}", name, next);
                last_fired = Some(next);
                tokio::spawn((run)());
            }
        }
    }
}
