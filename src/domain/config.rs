use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::taxonomy::{Rule, RuleTable};

/// Configuration for document conversion.
///
/// Controls the classification taxonomy and the rendering thresholds. All
/// fields have defaults, so an empty config file behaves exactly like no
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Additional classification rules, matched before the builtin table so
    /// custom prefixes can override it.
    rules: Vec<RuleEntry>,

    /// The reference index is emitted only when the document declares more
    /// than this many identifiers.
    reference_index_threshold: usize,

    /// Maximum character width of a table cell before truncation. Body text
    /// is never truncated.
    max_cell_width: usize,

    /// How many non-priority columns a table may have, beyond the priority
    /// columns.
    extra_columns: usize,
}

/// A custom classification rule as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// The literal identifier prefix to match.
    pub prefix: String,
    /// The category name the prefix denotes.
    pub category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            reference_index_threshold: default_reference_index_threshold(),
            max_cell_width: default_max_cell_width(),
            extra_columns: default_extra_columns(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or if the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The effective rule table: custom rules first, then the builtin set.
    #[must_use]
    pub fn rule_table(&self) -> RuleTable {
        RuleTable::with_custom(
            self.rules
                .iter()
                .map(|entry| Rule::new(entry.prefix.clone(), entry.category.clone()))
                .collect(),
        )
    }

    /// The identifier count above which the reference index is emitted.
    #[must_use]
    pub const fn reference_index_threshold(&self) -> usize {
        self.reference_index_threshold
    }

    /// The table cell truncation width.
    #[must_use]
    pub const fn max_cell_width(&self) -> usize {
        self.max_cell_width
    }

    /// The cap on non-priority table columns.
    #[must_use]
    pub const fn extra_columns(&self) -> usize {
        self.extra_columns
    }
}

const fn default_reference_index_threshold() -> usize {
    5
}

const fn default_max_cell_width() -> usize {
    60
}

const fn default_extra_columns() -> usize {
    5
}

/// The serialized versions of the configuration. This allows the file format
/// and the domain type to evolve independently without breaking existing
/// config files.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        rules: Vec<RuleEntry>,

        #[serde(default = "default_reference_index_threshold")]
        reference_index_threshold: usize,

        #[serde(default = "default_max_cell_width")]
        max_cell_width: usize,

        #[serde(default = "default_extra_columns")]
        extra_columns: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                rules,
                reference_index_threshold,
                max_cell_width,
                extra_columns,
            } => Self {
                rules,
                reference_index_threshold,
                max_cell_width,
                extra_columns,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        let Config {
            rules,
            reference_index_threshold,
            max_cell_width,
            extra_columns,
        } = config;
        Self::V1 {
            rules,
            reference_index_threshold,
            max_cell_width,
            extra_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nreference_index_threshold = 10\nmax_cell_width = 40\n\n[[rules]]\nprefix = \"team-\"\ncategory = \"Team\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.reference_index_threshold(), 10);
        assert_eq!(config.max_cell_width(), 40);
        assert_eq!(config.extra_columns(), 5);
        assert_eq!(
            config.rule_table().classify("team-checkout").label,
            "Checkout Team"
        );
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nmax_cell_width = \"wide\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("docgen.toml");

        let mut config = Config::default();
        config.rules.push(RuleEntry {
            prefix: "team-".to_string(),
            category: "Team".to_string(),
        });
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn custom_rules_override_builtin_table() {
        let config = Config {
            rules: vec![RuleEntry {
                prefix: "sys_".to_string(),
                category: "Platform".to_string(),
            }],
            ..Config::default()
        };
        let table = config.rule_table();
        assert_eq!(
            table.classify("sys_core").category.as_deref(),
            Some("Platform")
        );
        // Builtin rules still apply for everything else.
        assert_eq!(
            table.classify("dom_billing").category.as_deref(),
            Some("Domain")
        );
    }
}
