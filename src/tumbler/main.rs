//! # Tumbler CLI
//!
//! The binary is intentionally thin: the command line client lives in `cli/`
//! and this file only invokes `cli::run()` and turns its result into a process
//! exit code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/tumbler/cli/)                               │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging, Ctrl-C, dispatch (commands.rs)                  │
//! │  - colored summaries and messages (render.rs)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (src/tumbler/lib.rs)                               │
//! │  - loading, validation, enumeration, sinks                  │
//! │  - No knowledge of terminals, signals or process exits      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit codes: 0 success, 2 inventory load/validation failure, 3 internal
//! combinator failure, 4 output failure, 5 configuration failure, 130 stopped
//! by user.

mod cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
