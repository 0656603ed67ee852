use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{Level, debug, enabled, error, info, warn};

use crate::error::HttpError;
use crate::http::{HttpResponse, HttpTransport, RequestSpec};
use crate::instruction::Instruction;
use crate::schedule::JobCounter;

use super::report::{BatchOutcome, Completion, InstructionReport};

/// Fans instructions out into concurrent requests through a shared transport.
pub struct SmashExecutor<T> {
    transport: Arc<T>,
    jobs: JobCounter,
    exit_evaluated: AtomicBool,
}

impl<T: HttpTransport> SmashExecutor<T> {
    /// `jobs` is the scheduler's registration count, read by the exit check.
    #[must_use]
    pub fn new(transport: Arc<T>, jobs: JobCounter) -> Self {
        Self {
            transport,
            jobs,
            exit_evaluated: AtomicBool::new(false),
        }
    }

    /// Runs every instruction concurrently and waits for all of their requests.
    ///
    /// Request failures are logged and counted, never propagated. With
    /// `exit_when_done` the result says whether the process may stop, which is
    /// only the case when no cron jobs are registered. That check happens once
    /// per executor; later calls always report [`Completion::Continue`].
    pub async fn execute(&self, instructions: &[Instruction], exit_when_done: bool) -> BatchOutcome {
        let handles: Vec<JoinHandle<InstructionReport>> = instructions
            .iter()
            .map(|instruction| {
                let transport = Arc::clone(&self.transport);
                let instruction = instruction.clone();
                tokio::spawn(smash_instruction(transport, instruction))
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(err) => error!("Instruction task failed: {}", err),
            }
        }

        BatchOutcome {
            reports,
            completion: self.completion(exit_when_done),
        }
    }

    fn completion(&self, exit_when_done: bool) -> Completion {
        if !exit_when_done {
            return Completion::Continue;
        }
        if self.exit_evaluated.swap(true, Ordering::AcqRel) {
            warn!("Exit was already decided for the run-once batch, ignoring.");
            return Completion::Continue;
        }
        let registered = self.jobs.get();
        if registered == 0 {
            info!("All run-once instructions finished and no cron jobs are registered.");
            Completion::Terminate
        } else {
            info!(
                "Run-once instructions finished, {} cron jobs keep running.",
                registered
            );
            Completion::Continue
        }
    }
}

async fn smash_instruction<T: HttpTransport>(
    transport: Arc<T>,
    instruction: Instruction,
) -> InstructionReport {
    let parallelism = instruction.effective_parallelism().get();
    let request = Arc::new(RequestSpec::from(&instruction));
    let total_nanos = Arc::new(AtomicU64::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    debug!(
        "Preparing {} parallel requests to {} {}",
        parallelism, request.method, request.url
    );

    let handles: Vec<JoinHandle<()>> = (0..parallelism)
        .map(|_| {
            let transport = Arc::clone(&transport);
            let request = Arc::clone(&request);
            let total_nanos = Arc::clone(&total_nanos);
            let failed = Arc::clone(&failed);
            tokio::spawn(async move {
                let started = Instant::now();
                let outcome = transport.call(&request).await;
                let elapsed = started.elapsed();
                total_nanos.fetch_add(duration_nanos(elapsed), Ordering::AcqRel);
                if outcome.is_err() {
                    failed.fetch_add(1, Ordering::AcqRel);
                }
                log_outcome(&request, &outcome, elapsed);
            })
        })
        .collect();

    for handle in handles {
        if let Err(err) = handle.await {
            error!("Request task for {} failed: {}", request.url, err);
        }
    }

    let report = InstructionReport::new(
        &instruction,
        parallelism,
        Duration::from_nanos(total_nanos.load(Ordering::Acquire)),
        failed.load(Ordering::Acquire),
    );
    info!("{}", report);
    report
}

fn duration_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

fn log_outcome(
    request: &RequestSpec,
    outcome: &Result<HttpResponse, HttpError>,
    elapsed: Duration,
) {
    match outcome {
        Ok(response) if enabled!(Level::DEBUG) => debug!(
            "Endpoint {} {} returns {} in {:?}, {}, {:?}",
            request.method, request.url, response.status, elapsed, response.body, response.headers
        ),
        Ok(response) => info!(
            "Endpoint {} {} returns {} in {:?}",
            request.method, request.url, response.status, elapsed
        ),
        Err(err) if err.is_timeout() => error!(
            "Endpoint {} {} timed out after {:?}, {}",
            request.method, request.url, elapsed, err
        ),
        Err(err) => error!(
            "Endpoint {} {} returns error, {}",
            request.method, request.url, err
        ),
    }
}
