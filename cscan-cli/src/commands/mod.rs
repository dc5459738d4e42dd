//! Command implementations for the cscan CLI.
//!
//! Each subcommand follows the same structure:
//! - An `*Args` struct holding the parsed arguments
//! - A command struct implementing [`Command`](traits::Command)
//! - A [`CommandDescription`](traits::CommandDescription) impl that feeds `--help`

pub mod traits;
pub mod common;

pub mod check;
pub mod extract;
pub mod spans;
pub mod strip;

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use traits::{Command, CommandDescription};

pub use check::{CheckArgs, CheckCommand};
pub use extract::{ExtractArgs, ExtractCommand};
pub use spans::{SpansArgs, SpansCommand};
pub use strip::{StripArgs, StripCommand};

/// Build and execute a command, logging what is being run.
pub fn run<C>(args: C::Args, config: Config, out: &mut dyn Write) -> Result<C::Output>
where
    C: Command + CommandDescription,
{
    tracing::debug!("Running {}: {}", C::name(), C::description());
    C::new(args, config).execute(out)
}
