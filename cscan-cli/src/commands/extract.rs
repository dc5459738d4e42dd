//! Extract command implementation for the cscan CLI.
//!
//! Prints every comment with its file and line, as text or JSON.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use cscan_lex::{extract_comments, scan, SpanKind};
use serde::Serialize;
use tracing::{info, warn};

use super::common::{
    collect_inputs, read_source, run_parallel, InputFile, LanguageRegistry, OutputFormat,
};
use super::traits::{Command, CommandDescription, RunSummary};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the extract command.
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Input files or directories.
    pub input: Vec<PathBuf>,

    /// Output format name (`text` or `json`).
    pub format: Option<String>,

    /// Language for every input, overriding file extensions.
    pub language: Option<String>,
}

/// One extracted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    /// File the comment was found in.
    pub file: String,
    /// 1-based line of the comment opener.
    pub line: usize,
    /// Line or block comment.
    pub kind: SpanKind,
    /// Byte offset of the opener.
    pub start: usize,
    /// Byte offset just past the comment.
    pub end: usize,
    /// Comment text with its delimiters.
    pub text: String,
    /// Comment text without its delimiters.
    pub body: String,
    /// False when a block comment runs off the end of the file.
    pub terminated: bool,
}

impl CommentRecord {
    /// Body squeezed onto one line, with leading `*` gutters removed.
    fn summary(&self) -> String {
        self.body
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Extract command handler.
pub struct ExtractCommand {
    args: ExtractArgs,
    config: Config,
}

impl ExtractCommand {
    fn format(&self) -> Result<OutputFormat> {
        self.args
            .format
            .as_deref()
            .map_or(Ok(OutputFormat::default()), str::parse)
    }

    fn extract_file(file: &InputFile, registry: &LanguageRegistry) -> Result<Vec<CommentRecord>> {
        let (_, rules) = registry.resolve(&file.path)?;
        let source = read_source(&file.path)?;
        let spans = scan(&source, rules);
        let name = file.path.display().to_string();

        Ok(extract_comments(&source, &spans, rules)
            .into_iter()
            .map(|comment| CommentRecord {
                file: name.clone(),
                line: comment.line,
                kind: comment.kind,
                start: comment.span.start,
                end: comment.span.end,
                text: comment.text.to_string(),
                body: comment.body(rules).to_string(),
                terminated: comment.terminated,
            })
            .collect())
    }

    /// Run the extract command.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunSummary<usize>> {
        let start = Instant::now();
        let format = self.format()?;
        let registry = LanguageRegistry::new(&self.config, self.args.language.as_deref())?;
        let files = collect_inputs(&self.args.input, &registry)?;

        let results = run_parallel(self.config.jobs, &files, |file| {
            Self::extract_file(file, &registry)
        })?;

        let mut records = Vec::new();
        let mut failed = 0;
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(found) => records.extend(found),
                Err(e) => {
                    warn!("{}: {}", file.path.display(), e);
                    failed += 1;
                },
            }
        }

        match format {
            OutputFormat::Text => {
                for record in &records {
                    writeln!(out, "{}:{}: {}", record.file, record.line, record.summary())?;
                }
            },
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            },
        }
        out.flush()?;

        let summary = RunSummary::new(records.len())
            .with_files_processed(files.len() - failed)
            .with_files_failed(failed)
            .with_elapsed(start.elapsed());
        info!(
            "Extracted {} comment(s) from {} file(s)",
            summary.data, summary.files_processed
        );
        summary.check_for_failures()?;
        Ok(summary)
    }
}

impl Command for ExtractCommand {
    type Args = ExtractArgs;
    type Output = RunSummary<usize>;

    fn new(args: Self::Args, config: Config) -> Self {
        Self { args, config }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<Self::Output> {
        self.run(out)
    }

    fn name() -> &'static str {
        "extract"
    }
}

impl CommandDescription for ExtractCommand {
    fn description() -> &'static str {
        "List the comments in source files"
    }

    fn help() -> &'static str {
        "Prints each comment as `file:line: text`, or the full records as JSON \
         with --format json."
    }
}
