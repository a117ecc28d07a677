//! The static flag registry and its alias table.

use crate::types::{FlagAlias, FlagDefinition, FlagKind};

const BUILTIN_DEFINITIONS: &[FlagDefinition] = &[
    FlagDefinition::new("help", FlagKind::ShowHelp)
        .with_short_description("Help")
        .with_long_description("This option shows help topics."),
    FlagDefinition::new("verbose", FlagKind::Verbose)
        .with_short_description("Verbose")
        .with_long_description("This option enables verbose printing."),
    FlagDefinition::new("output", FlagKind::SpecifyOutputPath)
        .with_short_description("Output path")
        .with_long_description(
            "This option sets the output path for the previously specified file.",
        ),
    FlagDefinition::new("output-directory", FlagKind::SpecifyOutputDirectory)
        .with_short_description("Output directory")
        .with_long_description("This option defines a directory where output is generated."),
];

const BUILTIN_ALIASES: &[FlagAlias] = &[
    FlagAlias::new("h", "help"),
    FlagAlias::new("v", "verbose"),
    FlagAlias::new("o", "output"),
    FlagAlias::new("od", "output-directory"),
];

static BUILTIN: FlagCatalog = FlagCatalog::new(BUILTIN_DEFINITIONS, BUILTIN_ALIASES);

/// Registry of known flags plus the aliases that abbreviate them.
///
/// Catalogs are plain static data and can be shared freely. The builtin
/// catalog knows `help`, `verbose`, `output` and `output-directory`.
///
/// # Examples
///
/// ```
/// use dgf_strip_core::{FlagCatalog, FlagKind};
///
/// let catalog = FlagCatalog::builtin();
/// let output = catalog.lookup_by_key("output").unwrap();
/// assert_eq!(output.kind, FlagKind::SpecifyOutputPath);
/// assert_eq!(catalog.canonical_for_alias("od"), Some("output-directory"));
/// assert_eq!(catalog.aliases_for("verbose"), vec!["v"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlagCatalog {
    definitions: &'static [FlagDefinition],
    aliases: &'static [FlagAlias],
}

impl FlagCatalog {
    /// Creates a catalog over static definitions and aliases.
    ///
    /// No checks are made here; run
    /// [`validate_catalog`](crate::validate_catalog) on custom catalogs.
    pub const fn new(definitions: &'static [FlagDefinition], aliases: &'static [FlagAlias]) -> Self {
        Self {
            definitions,
            aliases,
        }
    }

    /// Returns the process-wide builtin catalog.
    pub fn builtin() -> &'static FlagCatalog {
        &BUILTIN
    }

    /// Finds a definition by its canonical key.
    pub fn lookup_by_key(&self, key: &str) -> Option<&FlagDefinition> {
        self.definitions.iter().find(|d| d.canonical_key == key)
    }

    /// Maps an alias to the canonical key it stands for.
    pub fn canonical_for_alias(&self, alias: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|a| a.alias == alias)
            .map(|a| a.key)
    }

    /// All definitions in catalog order, keyed by canonical key.
    pub fn definitions(&self) -> impl Iterator<Item = (&'static str, &FlagDefinition)> + '_ {
        self.definitions.iter().map(|d| (d.canonical_key, d))
    }

    /// The raw alias table.
    pub fn aliases(&self) -> &'static [FlagAlias] {
        self.aliases
    }

    /// All aliases pointing at `key`, in table order.
    pub fn aliases_for(&self, key: &str) -> Vec<&'static str> {
        self.aliases
            .iter()
            .filter(|a| a.key == key)
            .map(|a| a.alias)
            .collect()
    }
}
