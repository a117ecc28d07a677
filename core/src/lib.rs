//! Token-to-plan parsing for the `dgf-strip` batch tool.
//!
//! This crate turns raw command-line tokens into a structured plan of work:
//!
//! - [`FlagCatalog`] — the static registry of known flags and their aliases.
//! - [`resolve`] — maps a marker-prefixed token to a [`FlagDefinition`],
//!   returning a [`Resolution`].
//! - [`Parser`] / [`parse`] — the state machine folding tokens into a
//!   [`ParseResult`] with non-fatal [`Diagnostic`]s.
//! - [`render_topics`] / [`render_topic`] — help screen rendering.
//!
//! Validation ([`validate_catalog`]) catches structural errors in custom
//! catalogs such as dangling or shadowing aliases.
//!
//! # Example
//!
//! ```
//! use dgf_strip_core::*;
//!
//! let plan = parse(["garden.dgf", "-o", "garden-open.dgf", "-bogus"]);
//! assert_eq!(plan.output_for("garden.dgf"), Some("garden-open.dgf"));
//! assert_eq!(plan.diagnostics, vec![Diagnostic::UnknownFlag("-bogus".into())]);
//!
//! let help = parse(["-help", "od"]);
//! assert!(help.wants_help());
//! let page = render_topic(FlagCatalog::builtin(), help.help_topic.as_deref().unwrap()).unwrap();
//! assert!(page.contains("Output directory"));
//! ```

mod catalog;
mod help;
mod parser;
mod resolve;
mod types;
mod validate;

pub use catalog::FlagCatalog;
pub use help::{HelpOutput, HelpTopicError, render, render_topic, render_topics};
pub use parser::{ParseMode, ParseStage, Parser, parse};
pub use resolve::{FLAG_MARKER, Resolution, is_flag_candidate, lookup, normalize, resolve};
pub use types::*;
pub use validate::{CatalogError, validate_catalog};
