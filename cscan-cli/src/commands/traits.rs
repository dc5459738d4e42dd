//! Command trait and common types for the cscan CLI.
//!
//! Every subcommand is a value built from its parsed arguments and the
//! loaded configuration, then executed against an output sink. Writing to a
//! sink rather than straight to stdout keeps the commands testable.

use std::io::Write;
use std::time::Duration;

use crate::config::Config;
use crate::error::{CscanError, Result};

/// Standard command trait that all cscan commands implement.
///
/// # Type Parameters
/// * `Args` - The arguments type for this command
/// * `Output` - The output type returned by this command
pub trait Command {
    /// The arguments type for this command.
    type Args;

    /// The output type returned by this command.
    type Output;

    /// Create a new command instance.
    fn new(args: Self::Args, config: Config) -> Self;

    /// Execute the command, writing its data to `out`.
    ///
    /// Logging goes through `tracing` and never reaches `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<Self::Output>;

    /// Get the command name.
    fn name() -> &'static str;
}

/// Trait for providing command descriptions and help text.
pub trait CommandDescription {
    /// Get a short description of the command.
    fn description() -> &'static str;

    /// Get detailed help text for the command.
    fn help() -> &'static str;
}

/// Outcome of a multi-file command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary<T = ()> {
    /// Command-specific totals.
    pub data: T,

    /// Number of files handled successfully.
    pub files_processed: usize,

    /// Number of files that could not be handled.
    pub files_failed: usize,

    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl<T> RunSummary<T> {
    /// Create a summary carrying `data` and no file counts yet.
    pub fn new(data: T) -> Self {
        Self {
            data,
            files_processed: 0,
            files_failed: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Set the number of files processed.
    pub fn with_files_processed(mut self, count: usize) -> Self {
        self.files_processed = count;
        self
    }

    /// Set the number of files failed.
    pub fn with_files_failed(mut self, count: usize) -> Self {
        self.files_failed = count;
        self
    }

    /// Set the elapsed time.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Turn failed files into an error once everything has been reported.
    pub fn check_for_failures(&self) -> Result<()> {
        if self.files_failed > 0 {
            return Err(CscanError::CommandExecution(format!(
                "{} file(s) failed to process",
                self.files_failed
            )));
        }
        Ok(())
    }
}
