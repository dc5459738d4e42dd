//! Spans command implementation for the cscan CLI.
//!
//! Dumps the span partition of one file as JSON. Mostly useful when
//! writing custom language rules.

use std::io::Write;
use std::path::PathBuf;

use cscan_lex::{scan, LexSpan};
use serde::Serialize;
use tracing::debug;

use super::common::{read_source, LanguageRegistry};
use super::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the spans command.
#[derive(Debug, Clone, Default)]
pub struct SpansArgs {
    /// The file to scan.
    pub input: PathBuf,

    /// Language override.
    pub language: Option<String>,
}

#[derive(Serialize)]
struct SpanDump<'a> {
    file: String,
    language: &'a str,
    spans: &'a [LexSpan],
}

/// Spans command handler.
pub struct SpansCommand {
    args: SpansArgs,
    config: Config,
}

impl SpansCommand {
    /// Run the spans command, returning the number of spans written.
    pub fn run(&self, out: &mut dyn Write) -> Result<usize> {
        let registry = LanguageRegistry::new(&self.config, self.args.language.as_deref())?;
        let (language, rules) = registry.resolve(&self.args.input)?;
        let source = read_source(&self.args.input)?;
        let spans = scan(&source, rules);
        debug!(
            "{}: {} span(s) as {}",
            self.args.input.display(),
            spans.len(),
            language
        );

        let dump = SpanDump {
            file: self.args.input.display().to_string(),
            language,
            spans: &spans,
        };
        serde_json::to_writer_pretty(&mut *out, &dump)?;
        writeln!(out)?;
        out.flush()?;
        Ok(spans.len())
    }
}

impl Command for SpansCommand {
    type Args = SpansArgs;
    type Output = usize;

    fn new(args: Self::Args, config: Config) -> Self {
        Self { args, config }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<Self::Output> {
        self.run(out)
    }

    fn name() -> &'static str {
        "spans"
    }
}

impl CommandDescription for SpansCommand {
    fn description() -> &'static str {
        "Print the span partition of a file as JSON"
    }

    fn help() -> &'static str {
        "Prints every span (code, comment or literal) with its byte offsets."
    }
}
