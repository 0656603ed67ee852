//! Cron registration, lifecycle tracking, and the startup ordering of work.
mod coordinator;
mod jobs;
mod phase;
mod tokio_cron;


pub use coordinator::ScheduleCoordinator;
pub use jobs::{CronJob, CronScheduler, JobCounter, JobFn};
pub use phase::Phase;
pub use tokio_cron::{TokioCronScheduler, parse_cron};
