//! Check command implementation for the cscan CLI.
//!
//! Reports comments and literals that are never closed. These are warnings
//! by default; `--deny-warnings` promotes them to errors and makes the run
//! fail.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use cscan_lex::{diagnose, scan};
use cscan_util::{Diagnostic, DiagnosticCode, Handler, Level, SourceFile, Span};
use tracing::{debug, info, warn};

use super::common::{collect_inputs, read_source, run_parallel, InputFile, LanguageRegistry};
use super::traits::{Command, CommandDescription, RunSummary};
use crate::config::Config;
use crate::error::{CscanError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Input files or directories.
    pub input: Vec<PathBuf>,

    /// Language for every input, overriding file extensions.
    pub language: Option<String>,

    /// Treat warnings as errors.
    pub deny_warnings: bool,

    /// Colorize rendered diagnostics.
    pub color: bool,
}

/// Diagnostics for one file, already rendered.
struct FileReport {
    rendered: Vec<String>,
    warnings: usize,
    unreadable: bool,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
    config: Config,
}

impl CheckCommand {
    fn check_file(&self, file: &InputFile, registry: &LanguageRegistry) -> Result<FileReport> {
        let (_, rules) = registry.resolve(&file.path)?;
        let name = file.path.display().to_string();

        let source = match read_source(&file.path) {
            Ok(source) => source,
            Err(e) => {
                let diagnostic = Diagnostic::error(e.to_string(), Span::DUMMY)
                    .with_code(DiagnosticCode::E_UNREADABLE_INPUT);
                let empty = SourceFile::new(name, "");
                return Ok(FileReport {
                    rendered: vec![diagnostic.render(&empty, self.args.color)],
                    warnings: 0,
                    unreadable: true,
                });
            },
        };

        let source_file = SourceFile::new(name, source);
        let handler = Handler::new();
        let spans = scan(source_file.content(), rules);
        let warnings = diagnose(&source_file, &spans, rules, &handler);
        debug!("{}: {} warning(s)", source_file.name(), warnings);

        let rendered = handler
            .into_diagnostics()
            .into_iter()
            .map(|diagnostic| {
                let diagnostic = if self.args.deny_warnings {
                    diagnostic.with_level(Level::Error)
                } else {
                    diagnostic
                };
                diagnostic.render(&source_file, self.args.color)
            })
            .collect();

        Ok(FileReport {
            rendered,
            warnings,
            unreadable: false,
        })
    }

    /// Run the check command, returning the number of unterminated constructs.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunSummary<usize>> {
        let start = Instant::now();
        let registry = LanguageRegistry::new(&self.config, self.args.language.as_deref())?;
        let files = collect_inputs(&self.args.input, &registry)?;

        let results = run_parallel(self.config.jobs, &files, |file| {
            self.check_file(file, &registry)
        })?;

        let mut warnings = 0;
        let mut failed = 0;
        for (file, result) in files.iter().zip(results) {
            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    warn!("{}: {}", file.path.display(), e);
                    failed += 1;
                    continue;
                },
            };
            for text in &report.rendered {
                writeln!(out, "{}", text)?;
            }
            warnings += report.warnings;
            if report.unreadable {
                failed += 1;
            }
        }
        out.flush()?;

        let summary = RunSummary::new(warnings)
            .with_files_processed(files.len() - failed)
            .with_files_failed(failed)
            .with_elapsed(start.elapsed());
        info!(
            "Checked {} file(s): {} unterminated construct(s)",
            summary.files_processed, summary.data
        );
        summary.check_for_failures()?;

        if self.args.deny_warnings && warnings > 0 {
            return Err(CscanError::Validation(format!(
                "{} unterminated construct(s) found",
                warnings
            )));
        }
        Ok(summary)
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = RunSummary<usize>;

    fn new(args: Self::Args, config: Config) -> Self {
        Self { args, config }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<Self::Output> {
        self.run(out)
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Report unterminated comments and literals"
    }

    fn help() -> &'static str {
        "Scans each input and prints a diagnostic for every block comment, \
         string or char literal that is never closed."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    fn run(args: CheckArgs) -> (Result<RunSummary<usize>>, String) {
        let mut out = Vec::new();
        let result = CheckCommand::new(args, Config::default()).run(&mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_check_command_name() {
        assert_eq!(<CheckCommand as Command>::name(), "check");
    }

    #[test]
    fn test_check_clean_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "a.c", "int a; /* ok */\n");
        let (result, text) = run(CheckArgs {
            input: vec![input],
            ..CheckArgs::default()
        });
        assert_eq!(result.unwrap().data, 0);
        assert!(text.is_empty());
    }

    #[test]
    fn test_check_reports_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "a.c", "char *s = \"open;\nint a; /* open");
        let (result, text) = run(CheckArgs {
            input: vec![input],
            ..CheckArgs::default()
        });

        assert_eq!(result.unwrap().data, 2);
        assert!(text.contains("warning[W0102]: unterminated string literal"));
        assert!(text.contains("warning[W0101]: unterminated block comment"));
        assert!(text.contains("a.c:2:8"));
    }

    #[test]
    fn test_check_deny_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "a.c", "int a; /* open");
        let (result, text) = run(CheckArgs {
            input: vec![input],
            deny_warnings: true,
            ..CheckArgs::default()
        });

        assert!(matches!(result, Err(CscanError::Validation(_))));
        assert!(text.contains("error[W0101]"));
    }

    #[test]
    fn test_check_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.c");
        std::fs::write(&input, [0xc3, 0x28]).unwrap();

        let (result, text) = run(CheckArgs {
            input: vec![input],
            ..CheckArgs::default()
        });
        assert!(matches!(result, Err(CscanError::CommandExecution(_))));
        assert!(text.contains("error[E0001]"));
    }

    #[test]
    fn test_check_directory() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a.py", "s = 'open\n");
        write(temp_dir.path(), "b.java", "class B {}\n");
        let (result, text) = run(CheckArgs {
            input: vec![temp_dir.path().to_path_buf()],
            ..CheckArgs::default()
        });

        let summary = result.unwrap();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.data, 1);
        assert!(text.contains("W0103"));
    }
}
