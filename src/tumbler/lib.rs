//! # Tumbler Architecture
//!
//! Tumbler enumerates every pin-tumbler lock that can be assembled from an
//! inventory of key pins, driver pins and springs. Like any good CLI tool it is
//! a library first, with a thin command line client on top.
//!
//! ## Pipeline
//!
//! ```text
//! Inventory ──▶ CategoryArrangements ──▶ Configurations ──▶ LockSink
//! (validated)   (one list per category)   (lazy cursor)      (display or files)
//! ```
//!
//! Data only flows forward. The inventory is read-only once built, the
//! per-category arrangement lists are materialized, and the lock
//! configurations never are: there can be billions of them, so they exist
//! only as the current item of a three-index cursor.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Library code:
//! - Takes regular Rust arguments and returns `Result` types
//! - **Never** writes to stdout/stderr (display output goes to a caller-provided writer)
//! - **Never** calls `std::process::exit`
//!
//! The CLI (`cli/`, wired by `main.rs`) owns terminals, signals and exit codes.
//!
//! ## Module Overview
//!
//! - [`model`]: Core types (`Category`, `PartSpec`, `Arrangement`, `LockConfiguration`)
//! - [`inventory`]: The validated inventory
//! - [`loader`]: YAML inventory documents
//! - [`arrange`]: Distinct arrangements of a bounded multiset
//! - [`combinator`]: Per-category arrangement lists and counts
//! - [`compose`]: The cartesian product cursor
//! - [`sink`]: Rendering and output (display, rotating files)
//! - [`api`]: The `run` entry point and facade
//! - [`config`]: Layered settings
//! - [`error`]: Error types and exit codes

pub mod api;
pub mod arrange;
pub mod combinator;
pub mod compose;
pub mod config;
pub mod error;
pub mod inventory;
pub mod loader;
pub mod model;
pub mod sink;
