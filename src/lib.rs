//! A minimal interactive command shell.
//!
//! The shell reads a line, splits it on whitespace, and either runs one of the
//! built-ins (`cd`, `help`, `exit`) in-process or launches an external program
//! found through `PATH`, waiting for it before prompting again. There are no
//! pipes, redirections, quoting, expansions or job control.
//!
//! The main entry point is [`Interpreter`]. The public module [`command`]
//! exposes the traits used at the dispatch seam, so embedders can register
//! their own commands.

mod builtin;
pub mod command;
pub mod config;
mod external;
mod interpreter;
pub mod lexer;
pub mod logging;
pub mod reader;

pub use command::Status;
pub use config::Config;
/// Just a convenient re-export of the read-eval loop.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;

#[cfg(test)]
pub(crate) fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
