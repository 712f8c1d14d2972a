//! # Result Sinks
//!
//! A [`LockSink`] consumes lock configurations one at a time, in order, and
//! never looks back at earlier ones. Every sink writes the same text for a
//! lock (see [`render_lock`]):
//!
//! ```text
//! Lock: 1:
//! spring:      |DD5|DD5|DD5|
//! driver pins: |CC1|CC1|CC1|
//! key pins:    |AA1|AA1|BB2|
//!
//! ```
//!
//! ## Implementations
//!
//! - [`display::DisplaySink`]: writes each lock to a writer as soon as it
//!   arrives (interactive mode, usually stdout).
//! - [`rotating::RotatingFileSink`]: appends locks to numbered files,
//!   starting a new file every `records_per_file` locks (quiet mode).
//!
//! Concatenating the rotated files in order gives exactly the interactive
//! output.

use crate::error::Result;
use crate::model::{Category, LockConfiguration};
use std::io::{self, Write};
use std::path::PathBuf;

pub mod display;
pub mod rotating;

pub trait LockSink {
    /// Write lock number `index` (1-based).
    fn write_lock(&mut self, index: u64, config: &LockConfiguration<'_>) -> Result<()>;

    /// Flush and close whatever is open. Safe to call more than once.
    fn finish(&mut self) -> Result<()>;

    /// Files written so far, in sequence order.
    fn files(&self) -> &[PathBuf] {
        &[]
    }
}

const LABEL_WIDTH: usize = 13;

/// Render one lock in its canonical text form, blank line included.
pub fn render_lock<W: Write>(out: &mut W, index: u64, config: &LockConfiguration<'_>) -> io::Result<()> {
    writeln!(out, "Lock: {}:", index)?;
    for category in Category::ALL {
        writeln!(
            out,
            "{:<width$}{}",
            category.label(),
            config.arrangement(category),
            width = LABEL_WIDTH
        )?;
    }
    writeln!(out)
}
