//! Catalog validation.
//!
//! Checks the structural invariants of a [`FlagCatalog`]: keys are
//! non-empty, lower-case and unique, every alias points at an existing key,
//! and no alias shadows a canonical key.
//!
//! # Examples
//!
//! ```
//! use dgf_strip_core::*;
//!
//! assert!(validate_catalog(FlagCatalog::builtin()).is_empty());
//!
//! // Invalid: alias refers to a key the catalog does not define
//! static DEFS: &[FlagDefinition] = &[FlagDefinition::new("verbose", FlagKind::Verbose)];
//! static ALIASES: &[FlagAlias] = &[FlagAlias::new("q", "quiet")];
//! let bad = FlagCatalog::new(DEFS, ALIASES);
//! assert!(!validate_catalog(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::catalog::FlagCatalog;
use crate::resolve::FLAG_MARKER;

/// Catalog validation errors.
///
/// Each variant describes one structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A key or alias is empty or whitespace-only.
    #[error("flag name cannot be empty")]
    EmptyName,
    /// A key or alias carries the marker, upper-case letters or whitespace.
    #[error("invalid flag name format: {0}")]
    InvalidName(String),
    /// Two definitions share a canonical key.
    #[error("duplicate flag key: {0}")]
    DuplicateKey(String),
    /// The same alias is listed twice.
    #[error("duplicate flag alias: {0}")]
    DuplicateAlias(String),
    /// An alias has the same name as a canonical key.
    #[error("alias shadows canonical key: {0}")]
    AliasShadowsKey(String),
    /// An alias points at a key that is not defined.
    #[error("alias {alias} refers to unknown key {key}")]
    DanglingAlias {
        /// The alias name.
        alias: String,
        /// The missing canonical key.
        key: String,
    },
}

/// Validates a catalog and its alias table.
///
/// Returns every problem found, in catalog order. An empty vector means
/// the catalog is usable by the parser and the help renderer.
pub fn validate_catalog(catalog: &FlagCatalog) -> Vec<CatalogError> {
    let mut errors = Vec::new();
    let mut keys: HashSet<&str> = HashSet::new();

    for (key, _) in catalog.definitions() {
        if let Some(err) = check_name(key) {
            errors.push(err);
            continue;
        }
        if !keys.insert(key) {
            errors.push(CatalogError::DuplicateKey(key.to_string()));
        }
    }

    let mut aliases: HashSet<&str> = HashSet::new();
    for entry in catalog.aliases() {
        if let Some(err) = check_name(entry.alias) {
            errors.push(err);
            continue;
        }
        if !aliases.insert(entry.alias) {
            errors.push(CatalogError::DuplicateAlias(entry.alias.to_string()));
            continue;
        }
        if keys.contains(entry.alias) {
            errors.push(CatalogError::AliasShadowsKey(entry.alias.to_string()));
            continue;
        }
        if !keys.contains(entry.key) {
            errors.push(CatalogError::DanglingAlias {
                alias: entry.alias.to_string(),
                key: entry.key.to_string(),
            });
        }
    }

    errors
}

fn check_name(name: &str) -> Option<CatalogError> {
    if name.trim().is_empty() {
        return Some(CatalogError::EmptyName);
    }
    let malformed = name.starts_with(FLAG_MARKER)
        || name.chars().any(|c| c.is_whitespace() || c.is_uppercase());
    if malformed {
        return Some(CatalogError::InvalidName(name.to_string()));
    }
    None
}
