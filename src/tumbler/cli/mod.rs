//! # CLI Behavior
//!
//! This is **one possible UI client** for tumbler. It is the only place that
//! knows about terminals, signals and exit codes.
//!
//! ## Commands
//!
//! - `tumbler run pins.yml --size 5` prints every lock to stdout.
//! - `tumbler run pins.yml --size 5 --quiet` writes `pins_locks_<n>.txt` files
//!   instead and shows progress on stderr.
//! - `tumbler count pins.yml --size 5` prints the pre-flight counts only.
//! - `tumbler check pins.yml` validates the inventory.
//!
//! Pre-flight counts and status messages always go to stderr, so stdout in
//! interactive mode carries nothing but locks.
//!
//! ## Stopping
//!
//! Ctrl-C raises a stop flag that the engine checks between arrangements
//! while arranging, then between locks. The open output file is flushed and
//! closed, "Stopped by user" is printed and the
//! process exits with 130.

mod commands;
mod render;
mod setup;

pub use commands::run;
