use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::{debug, info};

use crate::args::SmashArgs;
use crate::config::{load_instruction_file, resolve_instruction_path};
use crate::error::AppResult;
use crate::http::{ClientSettings, ReqwestTransport};
use crate::instruction::{Instruction, InstructionSet};
use crate::schedule::{CronScheduler, ScheduleCoordinator, TokioCronScheduler};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};
use crate::smash::{Completion, SmashExecutor};


pub(crate) fn run() -> AppResult<()> {
    let matches = SmashArgs::command().get_matches();
    let args = SmashArgs::from_arg_matches(&matches)?;

    crate::logger::init_logging(args.debug, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

/// Builds the instruction set from the CLI flags or, failing that, an instruction file.
fn assemble_instructions(args: &SmashArgs) -> AppResult<InstructionSet> {
    if args.has_cli_instruction() {
        let instructions = InstructionSet::new(vec![Instruction::from_args(args)]).translated();
        instructions.ensure_targets()?;
        debug!("Using instruction from command line flags");
        return Ok(instructions);
    }

    let path = resolve_instruction_path(args.file.as_deref())?;
    load_instruction_file(&path)
}

async fn run_async(args: SmashArgs) -> AppResult<()> {
    let instructions = assemble_instructions(&args)?;

    let transport = Arc::new(ReqwestTransport::new(&ClientSettings::from(&args))?);
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let scheduler = TokioCronScheduler::new(&shutdown_tx);
    let executor = Arc::new(SmashExecutor::new(transport, scheduler.jobs()));
    let mut coordinator = ScheduleCoordinator::new(executor, scheduler);

    let outcome = coordinator.start(&instructions).await?;
    match outcome.completion {
        Completion::Terminate => {
            drop(shutdown_tx.send(()));
        }
        Completion::Continue => {
            info!("Waiting for cron jobs, press Ctrl+C to stop.");
            drop(shutdown_rx.recv().await);
            debug!("Shutdown received in phase '{}'", coordinator.phase());
        }
    }
    signal_handle.await?;
    Ok(())
}
