//! Plan type definitions.
//!
//! This module defines the data model shared by the parser, the help
//! renderer and the batch executor: flag kinds and definitions, the
//! per-invocation [`ParseResult`], and the non-fatal [`Diagnostic`]s the
//! parser accumulates.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Semantic kind of a command-line flag.
///
/// The kind decides what the parser does when the flag is seen and whether
/// the flag waits for a following value token.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagKind, ValueArity};
///
/// assert_eq!(FlagKind::default(), FlagKind::None);
/// assert_eq!(FlagKind::SpecifyOutputPath.arity(), ValueArity::Required);
/// assert_eq!(FlagKind::Verbose.arity(), ValueArity::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// No flag (the idle parser state).
    #[default]
    None,
    /// Show the help screen, optionally for a topic.
    ShowHelp,
    /// Enable verbose progress output.
    Verbose,
    /// Override the output path of the most recent input file.
    SpecifyOutputPath,
    /// Set the directory all output paths are placed under.
    SpecifyOutputDirectory,
}

/// How many value tokens a flag consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueArity {
    /// Takes no value.
    None,
    /// May be followed by one value.
    Optional,
    /// Must be followed by one value.
    Required,
}

impl FlagKind {
    /// Returns the value arity of this kind.
    pub fn arity(self) -> ValueArity {
        match self {
            Self::None | Self::Verbose => ValueArity::None,
            Self::ShowHelp => ValueArity::Optional,
            Self::SpecifyOutputPath | Self::SpecifyOutputDirectory => ValueArity::Required,
        }
    }

    /// Returns `true` if the flag waits for a following value token.
    pub fn takes_value(self) -> bool {
        self.arity() != ValueArity::None
    }

    /// The required-value flag this kind is, if any.
    pub fn value_flag(self) -> Option<ValueFlag> {
        match self {
            Self::SpecifyOutputPath => Some(ValueFlag::OutputPath),
            Self::SpecifyOutputDirectory => Some(ValueFlag::OutputDirectory),
            Self::None | Self::ShowHelp | Self::Verbose => None,
        }
    }
}

/// A flag that must be followed by a value.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagKind, ValueFlag};
///
/// assert_eq!(FlagKind::SpecifyOutputPath.value_flag(), Some(ValueFlag::OutputPath));
/// assert_eq!(FlagKind::ShowHelp.value_flag(), None);
/// assert_eq!(ValueFlag::OutputDirectory.label(), "output directory");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFlag {
    /// `-output`.
    OutputPath,
    /// `-output-directory`.
    OutputDirectory,
}

impl ValueFlag {
    /// Name used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OutputPath => "output",
            Self::OutputDirectory => "output directory",
        }
    }

    /// The flag kind this value flag belongs to.
    pub fn kind(self) -> FlagKind {
        match self {
            Self::OutputPath => FlagKind::SpecifyOutputPath,
            Self::OutputDirectory => FlagKind::SpecifyOutputDirectory,
        }
    }
}

/// A known flag.
///
/// Definitions are static data: they are built once as part of a
/// [`FlagCatalog`](crate::FlagCatalog) and never mutated. Descriptions are
/// empty strings when a flag has nothing to say.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagDefinition, FlagKind};
///
/// const QUIET: FlagDefinition = FlagDefinition::new("quiet", FlagKind::None)
///     .with_short_description("Quiet");
/// assert_eq!(QUIET.canonical_key, "quiet");
/// assert_eq!(QUIET.long_description, "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagDefinition {
    /// Primary name of the flag, without the marker (e.g. "output").
    pub canonical_key: &'static str,
    /// One-line description shown in the option listing.
    pub short_description: &'static str,
    /// Detailed description shown for a help topic. May span lines.
    pub long_description: &'static str,
    /// What the flag does.
    pub kind: FlagKind,
}

impl FlagDefinition {
    /// Creates a definition with empty descriptions.
    pub const fn new(canonical_key: &'static str, kind: FlagKind) -> Self {
        Self {
            canonical_key,
            short_description: "",
            long_description: "",
            kind,
        }
    }

    /// Sets the one-line description.
    pub const fn with_short_description(mut self, description: &'static str) -> Self {
        self.short_description = description;
        self
    }

    /// Sets the detailed description.
    pub const fn with_long_description(mut self, description: &'static str) -> Self {
        self.long_description = description;
        self
    }
}

/// An alias entry mapping a short name to a canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagAlias {
    /// Alias name without the marker (e.g. "od").
    pub alias: &'static str,
    /// Canonical key the alias stands for.
    pub key: &'static str,
}

impl FlagAlias {
    /// Creates an alias entry.
    pub const fn new(alias: &'static str, key: &'static str) -> Self {
        Self { alias, key }
    }
}

/// An input file and the output path it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMapping {
    /// Input path as given on the command line.
    pub input: String,
    /// Output path, relative to the output directory unless absolute.
    pub output: String,
}

impl FileMapping {
    fn identity(path: &str) -> Self {
        Self {
            input: path.to_string(),
            output: path.to_string(),
        }
    }
}

/// A non-fatal parsing anomaly.
///
/// Diagnostics are collected on the [`ParseResult`] and never stop the
/// parser in lenient mode. The `Display` impl gives the message shown to
/// the user.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{Diagnostic, ValueFlag};
///
/// assert_eq!(
///     Diagnostic::MissingFlagValue(ValueFlag::OutputDirectory).to_string(),
///     "empty output directory flag"
/// );
/// assert_eq!(
///     Diagnostic::UnknownFlag("-bogus".into()).to_string(),
///     "invalid input flag \"-bogus\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A marker-prefixed token matched neither a key nor an alias.
    #[error("invalid input flag \"{0}\"")]
    UnknownFlag(String),
    /// A value-taking flag reached another flag or the end of input.
    #[error("empty {} flag", .0.label())]
    MissingFlagValue(ValueFlag),
    /// An output path was given before any input file.
    #[error("no input path is defined")]
    OrphanOutputOverride,
}

/// The structured plan produced by one parse.
///
/// `files` keeps first-seen order and holds each input once. Every input
/// has an output, which is the input itself until a later `-output`
/// overrides it.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::parse;
///
/// let plan = parse(["a.sav", "-o", "b.sav"]);
/// assert_eq!(plan.output_for("a.sav"), Some("b.sav"));
/// assert!(!plan.wants_help());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Input files in first-seen order.
    pub files: Vec<FileMapping>,
    /// Directory prefix for every output path (empty when unset).
    pub output_directory: String,
    /// Whether verbose progress output was requested.
    pub verbose: bool,
    /// Whether a help screen was requested.
    pub show_help: bool,
    /// Lower-cased help topic, if one followed the help flag.
    pub help_topic: Option<String>,
    /// Anomalies found while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Finds the mapping for an input path.
    pub fn file(&self, input: &str) -> Option<&FileMapping> {
        self.files.iter().find(|f| f.input == input)
    }

    /// Returns the output path recorded for an input path.
    pub fn output_for(&self, input: &str) -> Option<&str> {
        self.file(input).map(|f| f.output.as_str())
    }

    /// Returns `true` when the caller should show help instead of running
    /// the batch: help was asked for, or there is nothing to process.
    pub fn wants_help(&self) -> bool {
        self.show_help || self.files.is_empty()
    }

    /// Returns `true` if any diagnostic was recorded.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Joins the output directory with a mapping's output path.
    ///
    /// An empty directory leaves the output untouched; an absolute output
    /// replaces the directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use dgf_strip_core::parse;
    ///
    /// let plan = parse(["a.sav", "-od", "out"]);
    /// assert_eq!(plan.resolved_output(&plan.files[0]), PathBuf::from("out/a.sav"));
    /// ```
    pub fn resolved_output(&self, mapping: &FileMapping) -> PathBuf {
        Path::new(&self.output_directory).join(&mapping.output)
    }

    /// Records an input path unless it is already present.
    pub(crate) fn insert_input(&mut self, path: &str) {
        if self.file(path).is_none() {
            self.files.push(FileMapping::identity(path));
        }
    }

    /// Overrides the output of an existing input. Returns `false` if the
    /// input is unknown.
    pub(crate) fn set_output(&mut self, input: &str, output: &str) -> bool {
        match self.files.iter_mut().find(|f| f.input == input) {
            Some(mapping) => {
                mapping.output = output.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_kind_arity() {
        assert!(!FlagKind::None.takes_value());
        assert!(!FlagKind::Verbose.takes_value());
        assert!(FlagKind::ShowHelp.takes_value());
        assert_eq!(FlagKind::ShowHelp.arity(), ValueArity::Optional);
        assert_eq!(FlagKind::SpecifyOutputDirectory.arity(), ValueArity::Required);
    }

    #[test]
    fn test_definition_descriptions_default_to_empty() {
        let def = FlagDefinition::new("quiet", FlagKind::None);
        assert_eq!(def.short_description, "");
        assert_eq!(def.long_description, "");
    }

    #[test]
    fn test_insert_input_keeps_first_occurrence() {
        let mut result = ParseResult::default();
        result.insert_input("a.sav");
        result.insert_input("b.sav");
        assert!(result.set_output("a.sav", "renamed.sav"));
        result.insert_input("a.sav");

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[0].input, "a.sav");
        assert_eq!(result.output_for("a.sav"), Some("renamed.sav"));
    }

    #[test]
    fn test_set_output_unknown_input() {
        let mut result = ParseResult::default();
        assert!(!result.set_output("missing.sav", "x.sav"));
        assert!(result.files.is_empty());
    }

    #[test]
    fn test_wants_help_when_no_files() {
        let result = ParseResult::default();
        assert!(result.wants_help());
    }

    #[test]
    fn test_resolved_output_without_directory() {
        let mut result = ParseResult::default();
        result.insert_input("a.sav");
        assert_eq!(
            result.resolved_output(&result.files[0]),
            PathBuf::from("a.sav")
        );
    }

    #[test]
    fn test_resolved_output_absolute_replaces_directory() {
        let absolute = std::env::temp_dir().join("x.sav");
        let absolute = absolute.to_str().unwrap();
        let result = crate::parse(["a.sav", "-o", absolute, "-od", "out"]);

        assert_eq!(result.output_directory, "out");
        assert_eq!(
            result.resolved_output(&result.files[0]),
            PathBuf::from(absolute)
        );
    }

    #[test]
    fn test_value_flag_round_trips_kind() {
        for flag in [ValueFlag::OutputPath, ValueFlag::OutputDirectory] {
            assert_eq!(flag.kind().value_flag(), Some(flag));
        }
        assert_eq!(FlagKind::Verbose.value_flag(), None);
        assert_eq!(FlagKind::None.value_flag(), None);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let mut result = ParseResult::default();
        result.insert_input("a.sav");
        result.diagnostics.push(Diagnostic::OrphanOutputOverride);
        result
            .diagnostics
            .push(Diagnostic::MissingFlagValue(ValueFlag::OutputDirectory));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["files"][0]["output"], "a.sav");
        assert_eq!(json["help_topic"], serde_json::Value::Null);
        assert_eq!(json["diagnostics"][0]["kind"], "orphan_output_override");
        assert_eq!(
            json["diagnostics"][1]["detail"],
            "output_directory"
        );
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(
            Diagnostic::MissingFlagValue(ValueFlag::OutputPath).to_string(),
            "empty output flag"
        );
        assert_eq!(
            Diagnostic::OrphanOutputOverride.to_string(),
            "no input path is defined"
        );
    }
}
