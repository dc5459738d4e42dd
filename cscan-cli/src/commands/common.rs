//! Common types and utilities for cscan commands.
//!
//! Language resolution, input discovery and the worker pool are shared by
//! every subcommand so that they agree on which files they touch and how a
//! file's language is decided.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use cscan_lex::{Language, ScanRules};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::Config;
use crate::error::{CscanError, Result};

// ============================================================================
// Output Format
// ============================================================================

/// Output formats for commands that print records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per record
    #[default]
    Text,
    /// A single JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = CscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CscanError::Validation(format!(
                "{}: {}",
                error_messages::UNKNOWN_FORMAT,
                s
            ))),
        }
    }
}

// ============================================================================
// Language Resolution
// ============================================================================

/// Every language the current run knows about.
///
/// Built-in presets are registered first and custom languages from the
/// configuration second, so a custom language can take over a built-in
/// name or extension.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    entries: Vec<(String, ScanRules)>,
    by_name: FxHashMap<String, usize>,
    by_extension: FxHashMap<String, usize>,
    forced: Option<usize>,
    fallback: Option<usize>,
}

impl LanguageRegistry {
    /// Build the registry for one run.
    ///
    /// `forced` is the `--language` argument; when present it wins over
    /// file extensions for every input.
    pub fn new(config: &Config, forced: Option<&str>) -> Result<Self> {
        let mut registry = Self {
            entries: Vec::with_capacity(Language::ALL.len() + config.languages.len()),
            by_name: FxHashMap::default(),
            by_extension: FxHashMap::default(),
            forced: None,
            fallback: None,
        };

        let multiline = config.scan.allow_multiline_literals;
        for language in Language::ALL {
            let mut rules = language.rules();
            if let Some(allow) = multiline {
                rules = rules
                    .to_builder()
                    .allow_multiline_literals(allow)
                    .build()
                    .map_err(|e| CscanError::rules(language.name(), e))?;
            }
            registry.insert(
                language.name(),
                rules,
                language.extensions().iter().copied(),
            );
        }
        for (name, custom) in &config.languages {
            let rules = custom.to_rules(name, multiline)?;
            registry.insert(name, rules, custom.extensions.iter().map(String::as_str));
        }

        registry.forced = forced.map(|name| registry.require(name)).transpose()?;
        registry.fallback = config
            .default_language
            .as_deref()
            .map(|name| registry.require(name))
            .transpose()?;
        Ok(registry)
    }

    fn insert<'a>(
        &mut self,
        name: &str,
        rules: ScanRules,
        extensions: impl Iterator<Item = &'a str>,
    ) {
        let index = self.entries.len();
        let name = name.to_ascii_lowercase();
        self.by_name.insert(name.clone(), index);
        for ext in extensions {
            self.by_extension
                .insert(ext.trim_start_matches('.').to_ascii_lowercase(), index);
        }
        self.entries.push((name, rules));
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let lower = name.to_ascii_lowercase();
        self.by_name.get(&lower).copied().or_else(|| {
            Language::from_name(&lower)
                .and_then(|language| self.by_name.get(language.name()).copied())
        })
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name).ok_or_else(|| {
            CscanError::Validation(format!("{}: {}", error_messages::UNKNOWN_LANGUAGE, name))
        })
    }

    /// Whether walking a directory should pick up `path`.
    pub fn knows_extension(&self, path: &Path) -> bool {
        Self::extension_of(path).is_some_and(|ext| self.by_extension.contains_key(&ext))
    }

    /// Decide the language of `path`: `--language`, then the file
    /// extension, then the configured default.
    pub fn resolve(&self, path: &Path) -> Result<(&str, &ScanRules)> {
        let by_extension = || {
            Self::extension_of(path).and_then(|ext| self.by_extension.get(&ext).copied())
        };
        self.forced
            .or_else(by_extension)
            .or(self.fallback)
            .map(|index| self.entry(index))
            .ok_or_else(|| {
                CscanError::Validation(format!(
                    "{}: {}",
                    error_messages::UNDETERMINED_LANGUAGE,
                    path.display()
                ))
            })
    }

    fn entry(&self, index: usize) -> (&str, &ScanRules) {
        let (name, rules) = &self.entries[index];
        (name.as_str(), rules)
    }

    fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

// ============================================================================
// Input Discovery
// ============================================================================

/// A file to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path as it should be opened.
    pub path: PathBuf,
    /// Path below the input root, used to mirror directory trees.
    pub relative: PathBuf,
}

/// Expand the command-line inputs into a list of files.
///
/// Files named explicitly are always taken. Directories are walked
/// recursively in name order; symbolic links inside them are skipped and so
/// are files whose extension no language claims.
pub fn collect_inputs(inputs: &[PathBuf], registry: &LanguageRegistry) -> Result<Vec<InputFile>> {
    if inputs.is_empty() {
        return Err(CscanError::Validation(
            error_messages::NO_INPUT_FILES.to_string(),
        ));
    }

    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            let relative = input
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| {
                    CscanError::FileOperation(format!(
                        "{}: {}",
                        error_messages::INVALID_FILE_PATH,
                        input.display()
                    ))
                })?;
            files.push(InputFile {
                path: input.clone(),
                relative,
            });
        } else if input.is_dir() {
            walk_dir(input, input, registry, &mut files)?;
        } else {
            return Err(CscanError::Validation(format!(
                "{}: {}",
                error_messages::INPUT_PATH_NOT_EXIST,
                input.display()
            )));
        }
    }
    debug!("Collected {} input file(s)", files.len());
    Ok(files)
}

fn walk_dir(
    root: &Path,
    dir: &Path,
    registry: &LanguageRegistry,
    files: &mut Vec<InputFile>,
) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            debug!("Skipping symbolic link {}", path.display());
        } else if file_type.is_dir() {
            walk_dir(root, &path, registry, files)?;
        } else if file_type.is_file() && registry.knows_extension(&path) {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.push(InputFile { path, relative });
        }
    }
    Ok(())
}

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CscanError::FileOperation(format!("{}: {}", path.display(), e)))
}

// ============================================================================
// Worker Pool
// ============================================================================

/// Run `task` over `files` on a pool of `jobs` threads.
///
/// Results come back in input order, one per file, so callers can print
/// them deterministically.
pub fn run_parallel<T, F>(jobs: u32, files: &[InputFile], task: F) -> Result<Vec<Result<T>>>
where
    T: Send,
    F: Fn(&InputFile) -> Result<T> + Sync,
{
    let threads = usize::try_from(jobs.max(1)).unwrap_or(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            CscanError::CommandExecution(format!("Failed to start worker pool: {}", e))
        })?;
    debug!("Processing {} file(s) on {} thread(s)", files.len(), threads);
    Ok(pool.install(|| files.par_iter().map(&task).collect()))
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message prefixes.
///
/// These constants keep error messages consistent across all commands.
pub mod error_messages {
    /// No input files are specified.
    pub const NO_INPUT_FILES: &str = "No input files specified";

    /// An input path does not exist.
    pub const INPUT_PATH_NOT_EXIST: &str = "Input path does not exist";

    /// An output file already exists.
    pub const OUTPUT_FILE_EXISTS: &str = "Output file already exists (use --force)";

    /// Two inputs would be written to the same output path.
    pub const DUPLICATE_OUTPUT: &str = "Several inputs map to the same output";

    /// Several inputs without an output directory.
    pub const OUTPUT_REQUIRED: &str =
        "Several inputs need --output, or --force to rewrite them in place";

    /// A `--format` value is not recognised.
    pub const UNKNOWN_FORMAT: &str = "Unknown format";

    /// A language name is not recognised.
    pub const UNKNOWN_LANGUAGE: &str = "Unknown language";

    /// No rule decides the language of a file.
    pub const UNDETERMINED_LANGUAGE: &str =
        "Cannot determine language (use --language or set default_language)";

    /// A file path has no file name.
    pub const INVALID_FILE_PATH: &str = "Invalid file path";
}
