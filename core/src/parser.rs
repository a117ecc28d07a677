//! The token-to-plan state machine.
//!
//! Tokens are folded left to right into a single [`ParseResult`]. A flag
//! that takes a value stays pending until the next bare token consumes it;
//! a pending flag that meets another flag, or the end of input, is reported
//! as empty and parsing carries on.
//!
//! # Examples
//!
//! ```
//! use dgf_strip_core::parse;
//!
//! let plan = parse(["-v", "a.sav", "-o", "clean/a.sav", "b.sav", "-od", "out"]);
//! assert!(plan.verbose);
//! assert_eq!(plan.output_for("a.sav"), Some("clean/a.sav"));
//! assert_eq!(plan.output_for("b.sav"), Some("b.sav"));
//! assert_eq!(plan.output_directory, "out");
//! assert!(plan.diagnostics.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::FlagCatalog;
use crate::resolve::{self, Resolution};
use crate::types::{Diagnostic, FlagKind, ParseResult, ValueFlag};

/// How the parser reacts to diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Record every diagnostic and keep going (the default).
    #[default]
    Lenient,
    /// Stop at the first diagnostic.
    Strict,
}

/// Parser state derived from the pending flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// Bare tokens are input paths.
    Idle,
    /// A bare token names a help topic.
    AwaitingHelpTopic,
    /// A bare token overrides the last input's output path.
    AwaitingOutputPath,
    /// A bare token sets the output directory.
    AwaitingOutputDirectory,
}

impl From<FlagKind> for ParseStage {
    fn from(kind: FlagKind) -> Self {
        match kind {
            FlagKind::None | FlagKind::Verbose => Self::Idle,
            FlagKind::ShowHelp => Self::AwaitingHelpTopic,
            FlagKind::SpecifyOutputPath => Self::AwaitingOutputPath,
            FlagKind::SpecifyOutputDirectory => Self::AwaitingOutputDirectory,
        }
    }
}

impl ParseStage {
    /// Diagnostic for a flag left pending without its value, if any.
    ///
    /// Help without a topic is a valid standalone use, so only the output
    /// flags report.
    pub fn missing_value(self) -> Option<Diagnostic> {
        match self {
            Self::AwaitingOutputPath => Some(Diagnostic::MissingFlagValue(ValueFlag::OutputPath)),
            Self::AwaitingOutputDirectory => {
                Some(Diagnostic::MissingFlagValue(ValueFlag::OutputDirectory))
            }
            Self::Idle | Self::AwaitingHelpTopic => None,
        }
    }
}

#[derive(Debug, Default)]
struct ParseState {
    pending: FlagKind,
    last_positional: Option<String>,
}

impl ParseState {
    fn stage(&self) -> ParseStage {
        self.pending.into()
    }
}

/// Parses tokens against a catalog.
///
/// A parser holds no per-parse state, so one instance can be reused for any
/// number of invocations.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{Diagnostic, FlagCatalog, ParseMode, Parser};
///
/// let parser = Parser::new(FlagCatalog::builtin()).with_mode(ParseMode::Strict);
/// let err = parser.try_parse(["-bogus", "a.sav"]).unwrap_err();
/// assert_eq!(err, Diagnostic::UnknownFlag("-bogus".into()));
///
/// let plan = parser.try_parse(["a.sav"]).unwrap();
/// assert_eq!(plan.files.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    catalog: &'a FlagCatalog,
    mode: ParseMode,
}

impl<'a> Parser<'a> {
    /// Creates a lenient parser over `catalog`.
    pub fn new(catalog: &'a FlagCatalog) -> Self {
        Self {
            catalog,
            mode: ParseMode::Lenient,
        }
    }

    /// Sets the diagnostic mode used by [`try_parse`](Self::try_parse).
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parses every token, collecting all diagnostics on the result.
    ///
    /// This never fails, whatever the mode.
    pub fn parse<I, S>(&self, tokens: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ParseResult::default();
        self.fold(tokens, &mut result, false);
        result
    }

    /// Parses tokens, honoring the configured mode.
    ///
    /// # Errors
    ///
    /// In [`ParseMode::Strict`], returns the first diagnostic encountered.
    /// Lenient parsers always return `Ok`.
    pub fn try_parse<I, S>(&self, tokens: I) -> Result<ParseResult, Diagnostic>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ParseResult::default();
        let strict = self.mode == ParseMode::Strict;
        self.fold(tokens, &mut result, strict);
        match (strict, result.diagnostics.first()) {
            (true, Some(first)) => Err(first.clone()),
            _ => Ok(result),
        }
    }

    fn fold<I, S>(&self, tokens: I, result: &mut ParseResult, stop_early: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParseState::default();

        for token in tokens {
            self.step(&mut state, result, token.as_ref());
            if stop_early && result.has_diagnostics() {
                return;
            }
        }

        flush_pending(&state, result);
    }

    fn step(&self, state: &mut ParseState, result: &mut ParseResult, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        if resolve::is_flag_candidate(trimmed) {
            self.apply_flag(state, result, trimmed);
        } else {
            apply_value(state, result, trimmed);
        }
    }

    fn apply_flag(&self, state: &mut ParseState, result: &mut ParseResult, token: &str) {
        let def = match resolve::resolve(self.catalog, token) {
            Resolution::Found(def) => def,
            Resolution::NotFound => {
                debug!(token, "Unknown flag");
                result.diagnostics.push(Diagnostic::UnknownFlag(token.to_string()));
                return;
            }
        };

        flush_pending(state, result);
        state.pending = def.kind;

        match def.kind {
            FlagKind::ShowHelp => result.show_help = true,
            FlagKind::Verbose => {
                result.verbose = true;
                state.pending = FlagKind::None;
            }
            FlagKind::None | FlagKind::SpecifyOutputPath | FlagKind::SpecifyOutputDirectory => {}
        }
        debug!(key = def.canonical_key, stage = ?state.stage(), "Flag accepted");
    }
}

fn apply_value(state: &mut ParseState, result: &mut ParseResult, token: &str) {
    match state.stage() {
        ParseStage::Idle => {
            result.insert_input(token);
            state.last_positional = Some(token.to_string());
        }
        ParseStage::AwaitingHelpTopic => {
            result.help_topic = Some(resolve::normalize(token));
        }
        ParseStage::AwaitingOutputPath => match &state.last_positional {
            Some(input) => {
                result.set_output(input, token);
            }
            None => {
                debug!(token, "Output path given before any input");
                result.diagnostics.push(Diagnostic::OrphanOutputOverride);
            }
        },
        ParseStage::AwaitingOutputDirectory => {
            result.output_directory = token.to_string();
        }
    }
    state.pending = FlagKind::None;
}

fn flush_pending(state: &ParseState, result: &mut ParseResult) {
    if let Some(diagnostic) = state.stage().missing_value() {
        result.diagnostics.push(diagnostic);
    }
}

/// Parses tokens with the builtin catalog in lenient mode.
pub fn parse<I, S>(tokens: I) -> ParseResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new(FlagCatalog::builtin()).parse(tokens)
}
