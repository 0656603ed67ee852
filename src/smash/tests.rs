use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::args::HttpMethod;
use crate::http::test_support::RecordingTransport;
use crate::instruction::Instruction;
use crate::schedule::JobCounter;

/// Generous bound so a missing barrier party fails the test instead of hanging it.
const BATCH_TIMEOUT: Duration = Duration::from_secs(5);

fn instruction(url: &str, parallelism: i64) -> Instruction {
    Instruction {
        parallelism,
        ..Instruction::new(HttpMethod::Get, url)
    }
}

async fn execute_with_timeout(
    executor: &SmashExecutor<RecordingTransport>,
    instructions: &[Instruction],
    exit_when_done: bool,
) -> Result<BatchOutcome, String> {
    tokio::time::timeout(BATCH_TIMEOUT, executor.execute(instructions, exit_when_done))
        .await
        .map_err(|err| format!("Batch did not finish: {}", err))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_fires_every_task_before_returning() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::with_delay(Duration::from_millis(20)));
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    let outcome = execute_with_timeout(
        &executor,
        &[instruction("http://h/a", 3), instruction("http://h/b", 1)],
        false,
    )
    .await?;

    if transport.calls().len() != 4 || transport.completed() != 4 {
        return Err(format!(
            "Expected 4 completed calls, got {} calls / {} completed",
            transport.calls().len(),
            transport.completed()
        ));
    }
    if transport.calls_to("http://h/a") != 3 || transport.calls_to("http://h/b") != 1 {
        return Err(format!("Unexpected calls: {:?}", transport.calls()));
    }
    let parallelism: Vec<usize> = outcome.reports.iter().map(|r| r.parallelism).collect();
    if parallelism != [3, 1] {
        return Err(format!("Unexpected reports: {:?}", outcome.reports));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_tasks_run_concurrently() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::with_barrier(5));
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    execute_with_timeout(&executor, &[instruction("http://h/c", 5)], false).await?;

    if transport.max_in_flight() != 5 {
        return Err(format!(
            "Expected 5 requests in flight, saw {}",
            transport.max_in_flight()
        ));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn instructions_run_concurrently() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::with_barrier(4));
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    execute_with_timeout(
        &executor,
        &[instruction("http://h/x", 2), instruction("http://h/y", 2)],
        false,
    )
    .await?;

    if transport.completed() != 4 {
        return Err(format!("Unexpected completions: {}", transport.completed()));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn parallelism_below_one_fires_once() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::default());
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    let outcome = execute_with_timeout(
        &executor,
        &[instruction("http://h/zero", 0), instruction("http://h/neg", -7)],
        false,
    )
    .await?;

    if transport.calls_to("http://h/zero") != 1 || transport.calls_to("http://h/neg") != 1 {
        return Err(format!("Unexpected calls: {:?}", transport.calls()));
    }
    if outcome.reports.iter().any(|report| report.parallelism != 1) {
        return Err(format!("Unexpected reports: {:?}", outcome.reports));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failures_do_not_cancel_siblings() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::default().failing("http://h/bad"));
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    let outcome = execute_with_timeout(
        &executor,
        &[instruction("http://h/bad", 3), instruction("http://h/good", 2)],
        false,
    )
    .await?;

    if transport.completed() != 5 {
        return Err(format!("Unexpected completions: {}", transport.completed()));
    }
    let failed: Vec<usize> = outcome.reports.iter().map(|r| r.failed).collect();
    if failed != [3, 0] {
        return Err(format!("Unexpected failure counts: {:?}", failed));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn average_is_total_over_parallelism() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::with_delay(Duration::from_millis(5)));
    let executor = SmashExecutor::new(Arc::clone(&transport), JobCounter::default());

    let outcome = execute_with_timeout(&executor, &[instruction("http://h/avg", 3)], false).await?;
    let Some(report) = outcome.reports.first() else {
        return Err("Missing report".to_owned());
    };
    if report.total < Duration::from_millis(15) {
        return Err(format!("Total too small: {:?}", report.total));
    }
    if report.average.as_nanos() != report.total.as_nanos() / 3 {
        return Err(format!("Unexpected average: {:?}", report));
    }
    if report.method != HttpMethod::Get || report.url != "http://h/avg" {
        return Err(format!("Unexpected identity: {:?}", report));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn terminates_when_nothing_is_scheduled() -> Result<(), String> {
    let transport = Arc::new(RecordingTransport::default());
    let executor = SmashExecutor::new(transport, JobCounter::default());

    let first = execute_with_timeout(&executor, &[instruction("http://h/1", 1)], true).await?;
    if first.completion != Completion::Terminate {
        return Err(format!("Expected terminate, got {:?}", first.completion));
    }
    let again = execute_with_timeout(&executor, &[instruction("http://h/1", 1)], true).await?;
    if again.completion != Completion::Continue {
        return Err("Exit must only be decided once".to_owned());
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn continues_when_jobs_are_registered() -> Result<(), String> {
    let jobs = JobCounter::default();
    jobs.increment();
    let executor = SmashExecutor::new(Arc::new(RecordingTransport::default()), jobs);

    let outcome = execute_with_timeout(&executor, &[], true).await?;
    if outcome.completion != Completion::Continue || !outcome.reports.is_empty() {
        return Err(format!("Unexpected outcome: {:?}", outcome));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn scheduled_invocations_never_terminate() -> Result<(), String> {
    let executor = SmashExecutor::new(
        Arc::new(RecordingTransport::default()),
        JobCounter::default(),
    );
    let outcome = execute_with_timeout(&executor, &[instruction("http://h/r", 2)], false).await?;
    if outcome.completion != Completion::Continue {
        return Err(format!("Unexpected completion: {:?}", outcome.completion));
    }
    Ok(())
}
