//! core::exec
//!
//! Executors and the invocation boundary.
//!
//! An executor is the behaviour attached to a command. It receives the
//! parsed [`Arguments`] and an [`OutputSink`] and reports failure through
//! `anyhow`. [`execute`] runs an executor and converts any failure, panics
//! included, into [`ShellError::Execution`] so the caller always gets a
//! uniform result.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::args::Arguments;
use super::error::{ShellError, ShellResult};
use super::tree::{CommandId, Entry, Namespace};

/// Destination for command output.
pub trait OutputSink {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

impl OutputSink for String {
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// Behaviour attached to a command.
pub trait Executor: Send + Sync {
    /// Run with parsed arguments.
    ///
    /// # Errors
    ///
    /// Any failure; it is reported to the caller as an execution error.
    fn execute(&self, args: &Arguments, out: &mut dyn OutputSink) -> anyhow::Result<()>;
}

impl<F> Executor for F
where
    F: Fn(&Arguments, &mut dyn OutputSink) -> anyhow::Result<()> + Send + Sync,
{
    fn execute(&self, args: &Arguments, out: &mut dyn OutputSink) -> anyhow::Result<()> {
        self(args, out)
    }
}

/// Invoke the executor of `command`.
///
/// # Errors
///
/// `Execution` with the executor's message if it fails or panics.
pub fn execute(
    ns: &Namespace,
    command: CommandId,
    args: &Arguments,
    out: &mut dyn OutputSink,
) -> ShellResult<()> {
    let path = ns.path_of(Entry::Command(command));
    log::debug!("executing {path}");

    let executor = ns.command(command).executor();
    let outcome = catch_unwind(AssertUnwindSafe(|| executor.execute(args, out)));

    let message = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => format!("{e:#}"),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    log::warn!("{path} failed: {message}");
    Err(ShellError::Execution(message))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown cause"
    }
}
