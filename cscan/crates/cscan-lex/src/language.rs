//! Built-in language presets.
//!
//! Each [`Language`] maps to a [`ScanRules`] value and a list of file
//! extensions. The presets only describe what the scanner can express
//! (one line comment, one non-nesting block comment, two quote characters
//! and one escape), so constructs such as raw strings, template literals or
//! triple-quoted strings are approximated by their single-quote forms.

use std::fmt;

use crate::rules::ScanRules;

/// A language with built-in scan rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// Java
    Java,
    /// C
    C,
    /// C++
    Cpp,
    /// C#
    CSharp,
    /// JavaScript
    JavaScript,
    /// TypeScript
    TypeScript,
    /// Go
    Go,
    /// Kotlin
    Kotlin,
    /// Swift
    Swift,
    /// Scala
    Scala,
    /// Python
    Python,
    /// POSIX shell and friends
    Shell,
    /// SQL
    Sql,
}

impl Language {
    /// Every preset, in display order
    pub const ALL: [Language; 13] = [
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::JavaScript,
        Language::TypeScript,
        Language::Go,
        Language::Kotlin,
        Language::Swift,
        Language::Scala,
        Language::Python,
        Language::Shell,
        Language::Sql,
    ];

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::Scala => "scala",
            Language::Python => "python",
            Language::Shell => "shell",
            Language::Sql => "sql",
        }
    }

    /// Look up a language by name or common alias, ignoring case
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::Language;
    ///
    /// assert_eq!(Language::from_name("Java"), Some(Language::Java));
    /// assert_eq!(Language::from_name("c++"), Some(Language::Cpp));
    /// assert_eq!(Language::from_name("cobol"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let lang = match name.to_ascii_lowercase().as_str() {
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "go" | "golang" => Language::Go,
            "kotlin" | "kt" => Language::Kotlin,
            "swift" => Language::Swift,
            "scala" => Language::Scala,
            "python" | "py" => Language::Python,
            "shell" | "sh" | "bash" | "zsh" => Language::Shell,
            "sql" => Language::Sql,
            _ => return None,
        };
        Some(lang)
    }

    /// Look up a language by file extension (without the dot), ignoring case
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::Language;
    ///
    /// assert_eq!(Language::from_extension("java"), Some(Language::Java));
    /// assert_eq!(Language::from_extension("H"), Some(Language::C));
    /// assert_eq!(Language::from_extension("txt"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// File extensions associated with this language
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
            Language::CSharp => &["cs"],
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::TypeScript => &["ts", "mts", "cts", "tsx"],
            Language::Go => &["go"],
            Language::Kotlin => &["kt", "kts"],
            Language::Swift => &["swift"],
            Language::Scala => &["scala", "sc"],
            Language::Python => &["py", "pyi"],
            Language::Shell => &["sh", "bash", "zsh"],
            Language::Sql => &["sql"],
        }
    }

    /// The scan rules for this language
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::Language;
    ///
    /// let rules = Language::Python.rules();
    /// assert_eq!(rules.line_comment(), Some("#"));
    /// assert_eq!(rules.block_comment(), None);
    /// ```
    pub fn rules(self) -> ScanRules {
        match self {
            Language::Java
            | Language::C
            | Language::Cpp
            | Language::CSharp
            | Language::JavaScript
            | Language::TypeScript
            | Language::Go
            | Language::Kotlin
            | Language::Swift
            | Language::Scala => ScanRules::default(),
            Language::Python | Language::Shell => {
                ScanRules::preset(Some("#"), None, Some('"'), Some('\''), Some('\\'))
            },
            // Quotes are doubled rather than escaped; `"` delimits identifiers.
            Language::Sql => {
                ScanRules::preset(Some("--"), Some(("/*", "*/")), Some('\''), Some('"'), None)
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
