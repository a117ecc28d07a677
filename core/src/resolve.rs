//! Token-to-flag resolution.
//!
//! Resolution is case-insensitive and goes through two levels: the name is
//! tried as a canonical key first, then as an alias whose canonical key is
//! looked up in turn.

use tracing::trace;

use crate::catalog::FlagCatalog;
use crate::types::FlagDefinition;

/// Leading character that marks a token as a flag.
pub const FLAG_MARKER: char = '-';

/// Outcome of resolving a token or name against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The token names a known flag.
    Found(&'a FlagDefinition),
    /// The token is not a flag the catalog knows.
    NotFound,
}

impl<'a> Resolution<'a> {
    /// Converts into an `Option`.
    pub fn found(self) -> Option<&'a FlagDefinition> {
        match self {
            Self::Found(def) => Some(def),
            Self::NotFound => None,
        }
    }
}

/// Trims and case-folds a raw token.
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Returns `true` if the normalized token starts with the flag marker.
pub fn is_flag_candidate(token: &str) -> bool {
    token.trim_start().starts_with(FLAG_MARKER)
}

/// Resolves a raw command-line token.
///
/// Only marker-prefixed tokens can resolve; the marker is stripped before
/// lookup.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagCatalog, FlagKind, Resolution, resolve};
///
/// let catalog = FlagCatalog::builtin();
/// let Resolution::Found(def) = resolve(catalog, " -OD ") else {
///     panic!("alias should resolve");
/// };
/// assert_eq!(def.kind, FlagKind::SpecifyOutputDirectory);
/// assert_eq!(resolve(catalog, "output"), Resolution::NotFound);
/// ```
pub fn resolve<'a>(catalog: &'a FlagCatalog, token: &str) -> Resolution<'a> {
    let normalized = normalize(token);
    match normalized.strip_prefix(FLAG_MARKER) {
        Some(name) => lookup_normalized(catalog, name),
        None => Resolution::NotFound,
    }
}

/// Resolves a bare flag name (no marker), as used for help topics.
pub fn lookup<'a>(catalog: &'a FlagCatalog, name: &str) -> Resolution<'a> {
    lookup_normalized(catalog, &normalize(name))
}

fn lookup_normalized<'a>(catalog: &'a FlagCatalog, name: &str) -> Resolution<'a> {
    if let Some(def) = catalog.lookup_by_key(name) {
        trace!(name, key = def.canonical_key, "Resolved canonical flag");
        return Resolution::Found(def);
    }

    let resolved = catalog
        .canonical_for_alias(name)
        .and_then(|key| catalog.lookup_by_key(key));
    match resolved {
        Some(def) => {
            trace!(name, key = def.canonical_key, "Resolved flag alias");
            Resolution::Found(def)
        }
        None => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlagAlias, FlagKind};

    fn kind_of(token: &str) -> Option<FlagKind> {
        resolve(FlagCatalog::builtin(), token)
            .found()
            .map(|def| def.kind)
    }

    #[test]
    fn test_resolve_canonical_and_alias() {
        assert_eq!(kind_of("-help"), Some(FlagKind::ShowHelp));
        assert_eq!(kind_of("-h"), Some(FlagKind::ShowHelp));
        assert_eq!(kind_of("-verbose"), Some(FlagKind::Verbose));
        assert_eq!(kind_of("-v"), Some(FlagKind::Verbose));
        assert_eq!(kind_of("-output"), Some(FlagKind::SpecifyOutputPath));
        assert_eq!(kind_of("-o"), Some(FlagKind::SpecifyOutputPath));
        assert_eq!(
            kind_of("-output-directory"),
            Some(FlagKind::SpecifyOutputDirectory)
        );
        assert_eq!(kind_of("-od"), Some(FlagKind::SpecifyOutputDirectory));
    }

    #[test]
    fn test_resolve_is_case_insensitive_and_trimmed() {
        assert_eq!(kind_of("  -Verbose "), Some(FlagKind::Verbose));
        assert_eq!(kind_of("-OUTPUT"), Some(FlagKind::SpecifyOutputPath));
    }

    #[test]
    fn test_resolve_requires_marker() {
        assert_eq!(kind_of("help"), None);
        assert_eq!(kind_of("h"), None);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert_eq!(kind_of("-bogus"), None);
        assert_eq!(kind_of("-"), None);
        assert_eq!(kind_of("--help"), None);
    }

    #[test]
    fn test_lookup_without_marker() {
        let catalog = FlagCatalog::builtin();
        assert!(lookup(catalog, "Output").found().is_some());
        assert!(lookup(catalog, "od").found().is_some());
        assert_eq!(lookup(catalog, "nothing"), Resolution::NotFound);
    }

    #[test]
    fn test_dangling_alias_does_not_resolve() {
        static DEFS: &[FlagDefinition] = &[FlagDefinition::new("verbose", FlagKind::Verbose)];
        static ALIASES: &[FlagAlias] = &[FlagAlias::new("q", "quiet")];
        let catalog = FlagCatalog::new(DEFS, ALIASES);
        assert_eq!(resolve(&catalog, "-q"), Resolution::NotFound);
    }

    #[test]
    fn test_is_flag_candidate() {
        assert!(is_flag_candidate("-x"));
        assert!(is_flag_candidate("  -x"));
        assert!(!is_flag_candidate("file.sav"));
    }
}
