//! Prefix-based identifier classification.
//!
//! Identifiers carry a schema-specific type prefix (`dom_billing`,
//! `pip-order-intake`, `EPIC-102`). An ordered rule table maps prefixes to
//! category names; the first rule whose prefix matches wins, so a longer
//! prefix such as `svc_dom_` must be listed before any shorter prefix it
//! extends. The table is plain data and can be swapped per schema family
//! without touching any branching logic.

use std::sync::LazyLock;

use regex::Regex;

/// A single classification rule: a literal identifier prefix and the
/// category it denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    prefix: String,
    category: String,
}

impl Rule {
    /// Creates a rule mapping `prefix` to `category`.
    pub fn new(prefix: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            category: category.into(),
        }
    }

    /// The literal identifier prefix this rule matches.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The category name this rule assigns.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// The result of classifying an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Human-readable display text: the humanized name remainder followed by
    /// the category name, or the humanized identifier alone when no rule
    /// matched.
    pub label: String,
    /// The matched category, or `None` for unclassified identifiers.
    pub category: Option<String>,
}

/// An ordered table of classification rules. Matching is first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// Creates a table from an explicit rule list, in matching order.
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The builtin table covering the domain-driven-design (underscore),
    /// data-engineering (kebab-case), and agile (uppercase) prefix families.
    ///
    /// Rule order doubles as the reference-index group display order, via
    /// [`Self::categories`].
    #[must_use]
    pub fn builtin() -> Self {
        let rules = [
            ("sys_", "System"),
            ("sys-", "System"),
            ("dom_", "Domain"),
            ("dom-", "Domain"),
            ("bc_", "Bounded Context"),
            ("pip-", "Pipeline"),
            ("agg_", "Aggregate"),
            ("stg-", "Stage"),
            ("ds-", "Dataset"),
            ("ctr-", "Contract"),
            ("dp-", "Data Product"),
            ("cm_", "Context Mapping"),
            // Longer prefixes before shorter ones they extend.
            ("svc_dom_", "Domain Service"),
            ("svc_app_", "Application Service"),
            ("ent_", "Entity"),
            ("vo_", "Value Object"),
            ("repo_", "Repository"),
            ("factory_", "Factory"),
            ("evt_", "Domain Event"),
            ("spec_", "Specification"),
            ("trx-", "Transform"),
            ("EPIC-", "Epic"),
            ("FEAT-", "Feature"),
            ("US-", "User Story"),
            ("REL-", "Release"),
            ("PI-", "Program Increment"),
            ("SPRINT-", "Sprint"),
        ];
        Self::new(
            rules
                .into_iter()
                .map(|(prefix, category)| Rule::new(prefix, category))
                .collect(),
        )
    }

    /// Builds a table with `custom` rules prepended to the builtin set, so
    /// custom prefixes take precedence.
    #[must_use]
    pub fn with_custom(custom: Vec<Rule>) -> Self {
        let mut rules = custom;
        rules.extend(Self::builtin().rules);
        Self { rules }
    }

    /// The number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules. Classification still works; every
    /// identifier falls through to the unclassified label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules in matching order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Category names in order of first appearance in the table. This is the
    /// display order for reference-index groups.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category.as_str()) {
                seen.push(rule.category.as_str());
            }
        }
        seen
    }

    /// Classifies an identifier against the table.
    ///
    /// The first rule whose prefix is a literal prefix of `id` wins; the
    /// prefix is stripped and the remainder humanized. Identifiers matching
    /// no rule are not an error: they keep a best-effort humanized label and
    /// no category.
    #[must_use]
    pub fn classify(&self, id: &str) -> Classification {
        for rule in &self.rules {
            if let Some(remainder) = id.strip_prefix(rule.prefix.as_str()) {
                let name = humanize(remainder);
                let label = if name.is_empty() {
                    rule.category.clone()
                } else {
                    format!("{} {}", name, rule.category)
                };
                return Classification {
                    label,
                    category: Some(rule.category.clone()),
                };
            }
        }
        Classification {
            label: humanize(id),
            category: None,
        }
    }
}

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid pattern"));
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid pattern"));

/// Converts an identifier fragment or mapping key to human-readable words.
///
/// Underscores and hyphens become word separators. A camelCase boundary is
/// split before an uppercase letter following a lowercase one, and before the
/// last uppercase letter of an uppercase run that is followed by lowercase,
/// which keeps acronym runs intact (`HTTPServer` becomes `HTTP Server`).
/// Each word is capitalized unless it is an acronym: entirely uppercase and
/// longer than one character.
#[must_use]
pub fn humanize(text: &str) -> String {
    let spaced = text.replace(['_', '-'], " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_BOUNDARY.replace_all(&spaced, "$1 $2");
    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    if word.len() > 1 && word.chars().all(char::is_uppercase) {
        return word.to_string();
    }
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
