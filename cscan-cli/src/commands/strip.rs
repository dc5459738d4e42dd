//! Strip command implementation for the cscan CLI.
//!
//! Removes comments from source files while keeping every string and char
//! literal byte-for-byte intact.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use cscan_lex::{scan, strip_comments, ReassemblyPolicy};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::common::{
    collect_inputs, error_messages, read_source, run_parallel, InputFile, LanguageRegistry,
};
use super::traits::{Command, CommandDescription, RunSummary};
use crate::config::Config;
use crate::error::{CscanError, Result};

/// Arguments for the strip command.
#[derive(Debug, Clone, Default)]
pub struct StripArgs {
    /// Input files or directories.
    pub input: Vec<PathBuf>,

    /// Output file (single input) or directory.
    pub output: Option<PathBuf>,

    /// Reassembly policy name, overriding the configuration.
    pub policy: Option<String>,

    /// Language for every input, overriding file extensions.
    pub language: Option<String>,

    /// Overwrite existing files.
    pub force: bool,

    /// Number of parallel jobs, overriding the configuration.
    pub jobs: Option<u32>,
}

/// Where stripped text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Stdout,
    File(PathBuf),
    Directory(PathBuf),
    InPlace,
}

impl Target {
    fn destination(&self, file: &InputFile) -> PathBuf {
        match self {
            Target::Stdout | Target::InPlace => file.path.clone(),
            Target::File(path) => path.clone(),
            Target::Directory(root) => root.join(&file.relative),
        }
    }
}

/// Strip command handler.
pub struct StripCommand {
    args: StripArgs,
    config: Config,
}

impl StripCommand {
    /// Policy from `--policy`, else from the configuration.
    fn policy(&self) -> Result<ReassemblyPolicy> {
        match &self.args.policy {
            Some(name) => name
                .parse()
                .map_err(|e| CscanError::Validation(format!("{}", e))),
            None => Ok(self.config.strip.policy),
        }
    }

    fn target(&self, files: &[InputFile]) -> Result<Target> {
        let single_file = files.len() == 1
            && self.args.input.len() == 1
            && self.args.input[0].is_file();

        match &self.args.output {
            Some(output) if single_file && !output.is_dir() => Ok(Target::File(output.clone())),
            Some(output) => Ok(Target::Directory(output.clone())),
            None if single_file => Ok(Target::Stdout),
            None if self.args.force => Ok(Target::InPlace),
            None => Err(CscanError::Validation(
                error_messages::OUTPUT_REQUIRED.to_string(),
            )),
        }
    }

    /// Strip one file, returning the text and the number of comments removed.
    fn strip_file(
        file: &InputFile,
        registry: &LanguageRegistry,
        policy: ReassemblyPolicy,
    ) -> Result<(String, usize)> {
        let (language, rules) = registry.resolve(&file.path)?;
        let source = read_source(&file.path)?;
        let spans = scan(&source, rules);
        let removed = spans.iter().filter(|span| span.kind.is_comment()).count();
        debug!(
            "{}: {} span(s), {} comment(s) as {}",
            file.path.display(),
            spans.len(),
            removed,
            language
        );
        Ok((strip_comments(&source, &spans, policy), removed))
    }

    /// Refuse to run when two inputs share a destination.
    fn check_destinations(target: &Target, files: &[InputFile]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for file in files {
            let destination = target.destination(file);
            if !seen.insert(destination.clone()) {
                return Err(CscanError::Validation(format!(
                    "{}: {}",
                    error_messages::DUPLICATE_OUTPUT,
                    destination.display()
                )));
            }
        }
        Ok(())
    }

    fn write_file(&self, target: &Target, file: &InputFile, text: &str) -> Result<()> {
        let destination = target.destination(file);
        if *target != Target::InPlace && destination.exists() && !self.args.force {
            return Err(CscanError::Validation(format!(
                "{}: {}",
                error_messages::OUTPUT_FILE_EXISTS,
                destination.display()
            )));
        }
        Self::ensure_parent(&destination)?;
        std::fs::write(&destination, text).map_err(|e| {
            CscanError::FileOperation(format!("{}: {}", destination.display(), e))
        })?;
        debug!("Wrote {}", destination.display());
        Ok(())
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                Ok(())
            },
            _ => Ok(()),
        }
    }

    /// Run the strip command.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunSummary<usize>> {
        let start = Instant::now();
        let policy = self.policy()?;
        let registry = LanguageRegistry::new(&self.config, self.args.language.as_deref())?;
        let files = collect_inputs(&self.args.input, &registry)?;
        let target = self.target(&files)?;
        debug!("Stripping with policy {} into {:?}", policy, target);

        if target == Target::Stdout {
            let (text, removed) = Self::strip_file(&files[0], &registry, policy)?;
            out.write_all(text.as_bytes())?;
            out.flush()?;
            return Ok(RunSummary::new(removed)
                .with_files_processed(1)
                .with_elapsed(start.elapsed()));
        }

        Self::check_destinations(&target, &files)?;
        let jobs = self.args.jobs.unwrap_or(self.config.jobs);
        let results = run_parallel(jobs, &files, |file| {
            let (text, removed) = Self::strip_file(file, &registry, policy)?;
            self.write_file(&target, file, &text)?;
            Ok(removed)
        })?;

        let mut removed = 0;
        let mut failed = 0;
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(count) => removed += count,
                Err(e) => {
                    warn!("{}: {}", file.path.display(), e);
                    failed += 1;
                },
            }
        }

        let summary = RunSummary::new(removed)
            .with_files_processed(files.len() - failed)
            .with_files_failed(failed)
            .with_elapsed(start.elapsed());
        info!(
            "Stripped {} comment(s) from {} file(s) in {:.2}s",
            summary.data,
            summary.files_processed,
            summary.elapsed.as_secs_f64()
        );
        summary.check_for_failures()?;
        Ok(summary)
    }
}

impl Command for StripCommand {
    type Args = StripArgs;
    type Output = RunSummary<usize>;

    fn new(args: Self::Args, config: Config) -> Self {
        Self { args, config }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<Self::Output> {
        self.run(out)
    }

    fn name() -> &'static str {
        "strip"
    }
}

impl CommandDescription for StripCommand {
    fn description() -> &'static str {
        "Remove comments from source files"
    }

    fn help() -> &'static str {
        "Removes line and block comments, leaving code and literals untouched. \
         A single file is written to stdout unless --output is given; \
         directories are walked recursively and mirrored into --output."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = "int a = 1; // one\n/* two */\nString s = \"// kept\";\n";

    fn command(args: StripArgs) -> StripCommand {
        StripCommand::new(args, Config::default())
    }

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_strip_args_default() {
        let args = StripArgs::default();
        assert!(args.input.is_empty());
        assert!(args.output.is_none());
        assert!(args.policy.is_none());
        assert!(!args.force);
    }

    #[test]
    fn test_strip_command_name() {
        assert_eq!(<StripCommand as Command>::name(), "strip");
        assert_eq!(
            <StripCommand as CommandDescription>::description(),
            "Remove comments from source files"
        );
    }

    #[test]
    fn test_strip_single_file_to_sink() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "A.java", SOURCE);

        let mut out = Vec::new();
        let summary = command(StripArgs {
            input: vec![input],
            ..StripArgs::default()
        })
        .run(&mut out)
        .unwrap();

        assert_eq!(summary.data, 2);
        assert_eq!(summary.files_processed, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "int a = 1;\n\nString s = \"// kept\";\n"
        );
    }

    #[test]
    fn test_strip_single_file_collapse_policy() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "A.java", SOURCE);

        let mut out = Vec::new();
        command(StripArgs {
            input: vec![input],
            policy: Some("collapse".to_string()),
            ..StripArgs::default()
        })
        .run(&mut out)
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "int a = 1;\nString s = \"// kept\";\n"
        );
    }

    #[test]
    fn test_policy_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "A.java", SOURCE);
        let config = Config::from_toml("[strip]\npolicy = \"collapse\"\n").unwrap();

        let mut out = Vec::new();
        StripCommand::new(
            StripArgs {
                input: vec![input],
                ..StripArgs::default()
            },
            config,
        )
        .run(&mut out)
        .unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("\n\n"));
    }

    #[test]
    fn test_unknown_policy() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "A.java", SOURCE);
        let result = command(StripArgs {
            input: vec![input],
            policy: Some("squash".to_string()),
            ..StripArgs::default()
        })
        .run(&mut Vec::new());
        assert!(matches!(result, Err(CscanError::Validation(_))));
    }

    #[test]
    fn test_strip_single_file_to_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "a.py", "x = '#' # note\n");
        let output = temp_dir.path().join("out.py");

        let mut out = Vec::new();
        command(StripArgs {
            input: vec![input],
            output: Some(output.clone()),
            ..StripArgs::default()
        })
        .run(&mut out)
        .unwrap();

        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(output).unwrap(), "x = '#'\n");
    }

    #[test]
    fn test_strip_directory_mirrors_tree() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        write(&src, "A.java", SOURCE);
        write(&src, "util/b.c", "/* hdr */\nint b;\n");
        write(&src, "notes.txt", "// not code");
        let dest = temp_dir.path().join("dest");

        let summary = command(StripArgs {
            input: vec![src],
            output: Some(dest.clone()),
            jobs: Some(2),
            ..StripArgs::default()
        })
        .run(&mut Vec::new())
        .unwrap();

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.data, 3);
        assert_eq!(
            std::fs::read_to_string(dest.join("util/b.c")).unwrap(),
            "\nint b;\n"
        );
        assert!(dest.join("A.java").exists());
        assert!(!dest.join("notes.txt").exists());
    }

    #[test]
    fn test_existing_output_needs_force() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "a.c", "int a; // x\n");
        let output = write(temp_dir.path(), "b.c", "old");

        let args = StripArgs {
            input: vec![input],
            output: Some(output.clone()),
            ..StripArgs::default()
        };
        assert!(command(args.clone()).run(&mut Vec::new()).is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "old");

        command(StripArgs { force: true, ..args })
            .run(&mut Vec::new())
            .unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "int a;\n");
    }

    #[test]
    fn test_several_inputs_need_output_or_force() {
        let temp_dir = TempDir::new().unwrap();
        let a = write(temp_dir.path(), "a.c", "int a; // x\n");
        let b = write(temp_dir.path(), "b.c", "int b; /* y */\n");

        let args = StripArgs {
            input: vec![a.clone(), b.clone()],
            ..StripArgs::default()
        };
        let err = command(args.clone()).run(&mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("--output"));

        command(StripArgs { force: true, ..args })
            .run(&mut Vec::new())
            .unwrap();
        assert_eq!(std::fs::read_to_string(a).unwrap(), "int a;\n");
        assert_eq!(std::fs::read_to_string(b).unwrap(), "int b;\n");
    }

    #[test]
    fn test_shared_destination_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let a = write(temp_dir.path(), "a/Main.java", "class A {} // a\n");
        let b = write(temp_dir.path(), "b/Main.java", "class B {} // b\n");
        let dest = temp_dir.path().join("out");

        let err = command(StripArgs {
            input: vec![a, b],
            output: Some(dest.clone()),
            force: true,
            jobs: Some(2),
            ..StripArgs::default()
        })
        .run(&mut Vec::new())
        .unwrap_err();

        assert!(matches!(err, CscanError::Validation(_)));
        assert!(err.to_string().contains("same output"));
        assert!(!dest.join("Main.java").exists());
    }

    #[test]
    fn test_failed_file_is_counted() {
        let temp_dir = TempDir::new().unwrap();
        let good = write(temp_dir.path(), "a.c", "int a;\n");
        let bad = temp_dir.path().join("b.c");
        std::fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

        let result = command(StripArgs {
            input: vec![good, bad],
            output: Some(temp_dir.path().join("out")),
            ..StripArgs::default()
        })
        .run(&mut Vec::new());

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command execution failed: 1 file(s) failed to process"
        );
        assert!(temp_dir.path().join("out/a.c").exists());
    }

    #[test]
    fn test_forced_language() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "script", "echo hi # greet\n");

        let mut out = Vec::new();
        command(StripArgs {
            input: vec![input],
            language: Some("shell".to_string()),
            ..StripArgs::default()
        })
        .run(&mut out)
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "echo hi\n");
    }

    #[test]
    fn test_undetermined_language() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "script", "echo hi # greet\n");
        let result = command(StripArgs {
            input: vec![input],
            ..StripArgs::default()
        })
        .run(&mut Vec::new());
        assert!(matches!(result, Err(CscanError::Validation(_))));
    }
}
