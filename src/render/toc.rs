//! Table of contents and the hierarchical reference index.

use std::collections::HashMap;

use super::anchor;
use crate::domain::{IdentifierIndex, Node, RuleTable, taxonomy::humanize};

/// Top-level keys beginning with this sigil are meta/schema keys and are
/// skipped by the table of contents and the section loop.
pub(crate) const RESERVED_SIGIL: char = '$';

/// Renders the document table of contents: one link per visible top-level
/// key, in document order.
pub(crate) fn table_of_contents(keys: &[&str]) -> String {
    if keys.is_empty() {
        return String::new();
    }

    let mut out = String::from("# Table of Contents\n\n");
    for key in keys {
        out.push_str(&format!("- [{}](#{})\n", humanize(key), anchor(key)));
    }
    out.push_str("\n---\n\n");
    out
}

/// Renders the hierarchical reference index: every indexed entity, grouped
/// by classified category.
///
/// Groups appear in the rule table's category order, followed by an `Other`
/// bucket for unclassified identifiers. Within a group, entries are listed
/// in ascending lexicographic identifier order, each a link with its human
/// label; entities with a `name` field get the literal name appended.
pub(crate) fn reference_index(index: &IdentifierIndex, rules: &RuleTable) -> String {
    if index.is_empty() {
        return String::new();
    }

    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    let mut other: Vec<String> = Vec::new();

    // Index iteration is already sorted, so each group stays sorted too.
    for (id, entity) in index.iter() {
        let classification = rules.classify(id);
        let mut line = format!("- [{}](#{})", classification.label, anchor(id));
        if let Some(name) = entity.get("name").and_then(Node::as_str) {
            line.push_str(&format!(" — {name}"));
        }
        match classification.category {
            Some(category) => grouped.entry(category).or_default().push(line),
            None => other.push(line),
        }
    }

    let mut out = String::from("# Reference Index\n\nQuick navigation to all identified objects:\n\n");
    for category in rules.categories() {
        if let Some(lines) = grouped.get(category) {
            out.push_str(&format!("### {}\n\n", pluralize(category)));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    if !other.is_empty() {
        out.push_str("### Other\n\n");
        for line in &other {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
    out
}

/// Naive English pluralization, sufficient for category names: consonant +
/// `y` becomes `ies`, everything else appends `s`.
fn pluralize(category: &str) -> String {
    if let Some(stem) = category.strip_suffix('y') {
        let vowel_before = stem
            .chars()
            .next_back()
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
        if !stem.is_empty() && !vowel_before {
            return format!("{stem}ies");
        }
    }
    format!("{category}s")
}
