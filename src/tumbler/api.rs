//! # API Facade
//!
//! The single entry point for enumerating locks, whatever the front end. The
//! API wires the stages together:
//!
//! ```text
//! Inventory → CategoryArrangements → Configurations → LockSink
//! ```
//!
//! It never writes to stdout or stderr itself. Interactive output and quiet
//! mode progress go to the `display` writer the caller hands in, and
//! interruption is observed through a shared [`AtomicBool`] the caller raises
//! (the CLI does so from its Ctrl-C handler).
//!
//! Interruption is checked between arrangements while the categories are
//! arranged, then between locks, so every lock reaching a sink is complete.
//! The sink is always finished (files flushed and closed) before [`run`]
//! returns, whether it completed, was stopped or failed.

use crate::combinator::{CategoryArrangements, PlanSummary};
use crate::config::TumblerConfig;
use crate::error::{Result, EXIT_INTERRUPTED};
use crate::inventory::Inventory;
use crate::loader;
use crate::model::LockConfiguration;
use crate::sink::display::DisplaySink;
use crate::sink::rotating::RotatingFileSink;
use crate::sink::LockSink;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every configuration was written.
    Completed { locks: u64, files: Vec<PathBuf> },
    /// The operator stopped the run; `locks` were fully written first.
    Interrupted { locks: u64, files: Vec<PathBuf> },
}

impl RunOutcome {
    pub fn locks(&self) -> u64 {
        match self {
            RunOutcome::Completed { locks, .. } | RunOutcome::Interrupted { locks, .. } => *locks,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        match self {
            RunOutcome::Completed { files, .. } | RunOutcome::Interrupted { files, .. } => files,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::Interrupted { .. } => EXIT_INTERRUPTED,
        }
    }

    /// Stopped before the first lock was enumerated.
    pub fn stopped_early() -> Self {
        RunOutcome::Interrupted {
            locks: 0,
            files: Vec::new(),
        }
    }
}

/// Enumerate every lock `inventory` can build with `lock_size` chambers.
///
/// Interactive runs write each lock to `display`. Quiet runs write locks to
/// rotating files under `config.output_dir` and report progress to `display`.
pub fn run<W: Write>(
    inventory: &Inventory,
    lock_size: usize,
    quiet: bool,
    config: &TumblerConfig,
    display: W,
    stop: &AtomicBool,
) -> Result<RunOutcome> {
    match CategoryArrangements::build_until(inventory, lock_size, stop)? {
        Some(plan) => run_plan(inventory, &plan, quiet, config, display, stop),
        None => Ok(RunOutcome::stopped_early()),
    }
}

/// [`run`] over arrangements that were already built, e.g. to show the
/// pre-flight counts first.
pub fn run_plan<W: Write>(
    inventory: &Inventory,
    plan: &CategoryArrangements,
    quiet: bool,
    config: &TumblerConfig,
    mut display: W,
    stop: &AtomicBool,
) -> Result<RunOutcome> {
    let outcome = if quiet {
        let mut sink = RotatingFileSink::new(
            &config.output_dir,
            inventory.source_name(),
            config.records_per_file,
        );
        let mut reported = false;
        let outcome = drive(
            plan.configurations(),
            &mut sink,
            stop,
            config.progress_interval,
            |written| {
                reported = true;
                write!(display, "\rLocks written: {}", written)?;
                display.flush()
            },
        );
        // End the progress line before anything else reaches the terminal.
        if reported {
            writeln!(display)?;
        }
        outcome?
    } else {
        let mut sink = DisplaySink::new(display);
        drive(plan.configurations(), &mut sink, stop, u64::MAX, |_| Ok(()))?
    };

    if let RunOutcome::Interrupted { locks, .. } = &outcome {
        warn!("Stopped by user after {} locks", locks);
    }
    Ok(outcome)
}

/// Feed `configs` to `sink`, numbering locks from 1, until the configurations
/// run out or `stop` is raised. `progress` sees the running count every
/// `every` locks and once more at the end.
pub fn drive<'a, I, S, P>(
    configs: I,
    sink: &mut S,
    stop: &AtomicBool,
    every: u64,
    mut progress: P,
) -> Result<RunOutcome>
where
    I: IntoIterator<Item = LockConfiguration<'a>>,
    S: LockSink,
    P: FnMut(u64) -> std::io::Result<()>,
{
    let every = every.max(1);
    let mut written: u64 = 0;

    for config in configs {
        if stop.load(Ordering::SeqCst) {
            sink.finish()?;
            return Ok(RunOutcome::Interrupted {
                locks: written,
                files: sink.files().to_vec(),
            });
        }

        let index = written + 1;
        if let Err(err) = sink.write_lock(index, &config) {
            // Keep whatever was already written readable.
            let _ = sink.finish();
            return Err(err);
        }
        written = index;

        if written % every == 0 {
            progress(written)?;
        }
    }

    sink.finish()?;
    if written % every != 0 {
        progress(written)?;
    }
    info!("Wrote {} locks", written);
    Ok(RunOutcome::Completed {
        locks: written,
        files: sink.files().to_vec(),
    })
}

/// Facade over loading, planning and running, holding the active settings.
pub struct TumblerApi {
    config: TumblerConfig,
}

impl TumblerApi {
    pub fn new(config: TumblerConfig) -> Self {
        Self { config }
    }

    /// Load an inventory and check it can fill `lock_size` chambers.
    pub fn load(&self, path: &Path, lock_size: usize) -> Result<Inventory> {
        loader::load_inventory(path, lock_size)
    }

    /// Validate an inventory, and its capacity when a lock size is given.
    pub fn check(&self, path: &Path, lock_size: Option<usize>) -> Result<Inventory> {
        let inventory = loader::load_unsized(path)?;
        if let Some(size) = lock_size {
            inventory.ensure_capacity(size)?;
        }
        Ok(inventory)
    }

    /// Arrange every category of `inventory` for `lock_size` chambers.
    /// `None` means `stop` was raised first.
    pub fn arrange(
        &self,
        inventory: &Inventory,
        lock_size: usize,
        stop: &AtomicBool,
    ) -> Result<Option<CategoryArrangements>> {
        CategoryArrangements::build_until(inventory, lock_size, stop)
    }

    /// Pre-flight counts without enumerating any lock.
    pub fn plan(&self, inventory: &Inventory, lock_size: usize) -> Result<PlanSummary> {
        Ok(CategoryArrangements::build(inventory, lock_size)?.summary(inventory))
    }

    pub fn run_plan<W: Write>(
        &self,
        inventory: &Inventory,
        plan: &CategoryArrangements,
        quiet: bool,
        display: W,
        stop: &AtomicBool,
    ) -> Result<RunOutcome> {
        run_plan(inventory, plan, quiet, &self.config, display, stop)
    }
}
