use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;

use crate::error::ScheduleError;

/// Callback fired on every matching cron tick.
pub type JobFn = dyn Fn() -> BoxFuture<'static, ()> + Send + Sync;

/// Number of jobs registered with a scheduler, shared with whoever needs to read it.
#[derive(Debug, Clone, Default)]
pub struct JobCounter(Arc<AtomicUsize>);

impl JobCounter {
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn increment(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }
}

pub struct CronJob {
    pub name: String,
    pub expression: String,
    pub run: Arc<JobFn>,
}

impl std::fmt::Debug for CronJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronJob")
            .field("name", &self.name)
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

/// Registers recurring callbacks keyed by a seconds-granularity cron expression.
pub trait CronScheduler: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the expression is invalid or never fires.
    fn register(&self, job: CronJob) -> Result<(), ScheduleError>;

    /// Live count of registered jobs.
    fn jobs(&self) -> JobCounter;
}
