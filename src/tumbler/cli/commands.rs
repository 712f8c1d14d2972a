//! # CLI Layer
//!
//! Responsibilities, in order:
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Commands`]
//! 2. **Logging**: `env_logger` on stderr, debug with `--verbose`, `RUST_LOG` wins
//! 3. **Settings**: `tumbler.toml` + environment, then CLI overrides
//! 4. **Dispatch**: one `handle_*` per subcommand, each calling [`TumblerApi`]
//! 5. **Exit codes**: `run` returns the code for a finished command; errors are
//!    mapped by `main`

use super::render::{render_inventory, render_outcome, render_plan};
use super::setup::{Cli, Commands, OutputFormat};
use clap::Parser;
use log::{debug, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tumbler::api::{RunOutcome, TumblerApi};
use tumbler::config::TumblerConfig;
use tumbler::error::Result;

struct AppContext {
    api: TumblerApi,
}

pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            inventory,
            size,
            quiet,
            records_per_file,
            output_dir,
        } => {
            let ctx = init_context(records_per_file, output_dir)?;
            handle_run(&ctx, &inventory, usize::from(size), quiet)
        }
        Commands::Count {
            inventory,
            size,
            output,
        } => {
            let ctx = init_context(None, None)?;
            handle_count(&ctx, &inventory, usize::from(size), output)
        }
        Commands::Check { inventory, size } => {
            let ctx = init_context(None, None)?;
            handle_check(&ctx, &inventory, size.map(usize::from))
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn init_context(records_per_file: Option<u64>, output_dir: Option<PathBuf>) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = TumblerConfig::load(&cwd)?.with_overrides(records_per_file, output_dir)?;
    debug!("Settings: {:?}", config);
    Ok(AppContext {
        api: TumblerApi::new(config),
    })
}

/// Install the Ctrl-C handler. The returned flag is raised on interrupt.
fn stop_flag() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!("Ctrl-C will not stop cleanly: {}", e);
    }
    stop
}

fn handle_run(ctx: &AppContext, path: &Path, size: usize, quiet: bool) -> Result<i32> {
    let stop = stop_flag();
    let inventory = ctx.api.load(path, size)?;
    let Some(plan) = ctx.api.arrange(&inventory, size, &stop)? else {
        let outcome = RunOutcome::stopped_early();
        eprintln!("{}", render_outcome(&outcome));
        return Ok(outcome.exit_code());
    };
    eprint!("{}", render_plan(&plan.summary(&inventory)));

    let outcome = if quiet {
        ctx.api
            .run_plan(&inventory, &plan, true, io::stderr().lock(), &stop)?
    } else {
        ctx.api
            .run_plan(&inventory, &plan, false, io::stdout().lock(), &stop)?
    };

    eprintln!("{}", render_outcome(&outcome));
    Ok(outcome.exit_code())
}

fn handle_count(ctx: &AppContext, path: &Path, size: usize, output: OutputFormat) -> Result<i32> {
    let inventory = ctx.api.load(path, size)?;
    let summary = ctx.api.plan(&inventory, size)?;

    let mut stdout = io::stdout().lock();
    match output {
        OutputFormat::Text => write!(stdout, "{}", render_plan(&summary))?,
        OutputFormat::Json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
    }
    Ok(0)
}

fn handle_check(ctx: &AppContext, path: &Path, size: Option<usize>) -> Result<i32> {
    let inventory = ctx.api.check(path, size)?;
    print!("{}", render_inventory(&inventory));
    match size {
        Some(size) => println!("OK for {} chambers", size),
        None => println!("OK"),
    }
    Ok(0)
}
