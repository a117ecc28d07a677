//! Help screen rendering.
//!
//! Two screens exist: the option listing, which groups every canonical flag
//! with its aliases, and the detail page for a single topic.

use std::fmt::Write;

use thiserror::Error;

use crate::catalog::FlagCatalog;
use crate::resolve::{self, FLAG_MARKER, Resolution};

/// Failure to render a help topic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelpTopicError {
    /// The topic matched neither a canonical key nor an alias.
    #[error("invalid help topic \"{0}\"")]
    UnknownTopic(String),
}

/// What to print for a help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOutput {
    /// Text for standard output.
    pub text: String,
    /// Set when a requested topic was unknown and the listing was used
    /// instead.
    pub error: Option<HelpTopicError>,
}

/// Renders the listing of every flag and its aliases.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagCatalog, render_topics};
///
/// let text = render_topics(FlagCatalog::builtin());
/// assert!(text.contains("-output-directory, -od\n\tOutput directory\n"));
/// ```
pub fn render_topics(catalog: &FlagCatalog) -> String {
    let mut out = String::new();
    out.push_str("\nAvailable options:\n\n");

    for (key, def) in catalog.definitions() {
        let names: Vec<String> = std::iter::once(key)
            .chain(catalog.aliases_for(key))
            .map(|name| format!("{FLAG_MARKER}{name}"))
            .collect();
        let _ = writeln!(out, "{}", names.join(", "));
        let _ = writeln!(out, "\t{}", def.short_description);
        out.push('\n');
    }

    out
}

/// Renders the detail page for one topic.
///
/// The topic may be a canonical key or an alias, with or without the flag
/// marker, in any case.
///
/// # Errors
///
/// Returns [`HelpTopicError::UnknownTopic`] if the topic does not name a
/// flag.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagCatalog, render_topic};
///
/// let text = render_topic(FlagCatalog::builtin(), "v").unwrap();
/// assert!(text.starts_with("\nHelp topic: Verbose\n"));
/// assert!(render_topic(FlagCatalog::builtin(), "colour").is_err());
/// ```
pub fn render_topic(catalog: &FlagCatalog, topic: &str) -> Result<String, HelpTopicError> {
    let normalized = resolve::normalize(topic);
    let name = normalized.strip_prefix(FLAG_MARKER).unwrap_or(&normalized);

    let def = match resolve::lookup(catalog, name) {
        Resolution::Found(def) => def,
        Resolution::NotFound => return Err(HelpTopicError::UnknownTopic(normalized)),
    };

    let mut out = String::new();
    let _ = writeln!(out, "\nHelp topic: {}\n", def.short_description);
    for line in def.long_description.lines() {
        let _ = writeln!(out, "\t{line}");
    }
    out.push('\n');

    Ok(out)
}

/// Renders help for an optional topic, falling back to the listing when the
/// topic is unknown.
pub fn render(catalog: &FlagCatalog, topic: Option<&str>) -> HelpOutput {
    let Some(topic) = topic else {
        return HelpOutput {
            text: render_topics(catalog),
            error: None,
        };
    };

    match render_topic(catalog, topic) {
        Ok(text) => HelpOutput { text, error: None },
        Err(err) => HelpOutput {
            text: render_topics(catalog),
            error: Some(err),
        },
    }
}
