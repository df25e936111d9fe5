//! Recursive tree-to-Markdown rendering.
//!
//! The renderer is a pure function of the document tree plus two read-only
//! inputs built before any rendering starts: the identifier index and the
//! classification rule table. The only per-call state is the nesting depth,
//! which maps to a heading level capped at six.

mod document;
mod table;
mod toc;

pub use document::{ConvertError, Converter};

use crate::domain::{IdentifierIndex, Node, RuleTable, Scalar, node::ID_KEY, taxonomy::humanize};

/// Marker for explicit null values.
pub(crate) const NOT_SPECIFIED: &str = "*Not specified*";
/// Marker for empty sequences.
pub(crate) const EMPTY_LIST: &str = "*Empty list*";
/// Placeholder for a nested mapping where only inline text fits.
pub(crate) const MAPPING_MARKER: &str = "*mapping*";
/// Placeholder for a nested sequence where only inline text fits.
pub(crate) const SEQUENCE_MARKER: &str = "*list*";

/// Creates a Markdown anchor from arbitrary text: lowercased, with spaces
/// and underscores replaced by hyphens.
#[must_use]
pub fn anchor(text: &str) -> String {
    text.to_lowercase().replace([' ', '_'], "-")
}

/// Maps nesting depth to a heading level. Deeper content keeps using the
/// maximum level rather than overflowing Markdown's six levels.
pub(crate) fn heading_level(depth: usize) -> usize {
    (depth + 3).min(6)
}

/// The recursive rendering engine for a single conversion run.
pub(crate) struct Renderer<'a> {
    index: &'a IdentifierIndex<'a>,
    rules: &'a RuleTable,
    max_cell_width: usize,
    extra_columns: usize,
}

impl<'a> Renderer<'a> {
    pub(crate) const fn new(
        index: &'a IdentifierIndex<'a>,
        rules: &'a RuleTable,
        max_cell_width: usize,
        extra_columns: usize,
    ) -> Self {
        Self {
            index,
            rules,
            max_cell_width,
            extra_columns,
        }
    }

    /// Renders any node as a block of Markdown ending in a blank line.
    pub(crate) fn value(&self, node: &Node, depth: usize) -> String {
        match node {
            Node::Mapping(fields) => self.mapping(fields, depth),
            Node::Sequence(items) => self.sequence(items),
            Node::Scalar(scalar) => format!("{}\n\n", self.scalar_block(scalar)),
        }
    }

    /// Renders a mapping as a definition block.
    ///
    /// A mapping that declares an identifier gets an anchor and an `**ID**`
    /// line before any other field. Nested mappings and sequences get a
    /// heading titled by the humanized key; scalar fields render inline as
    /// `**Key**: value` labels.
    pub(crate) fn mapping(&self, fields: &[(String, Node)], depth: usize) -> String {
        let mut out = String::new();

        if let Some(id) = fields
            .iter()
            .find(|(key, _)| key == ID_KEY)
            .and_then(|(_, value)| value.as_str())
        {
            out.push_str(&format!("<a id=\"{}\"></a>\n", anchor(id)));
            out.push_str(&format!(
                "**ID**: `{id}` ({})\n\n",
                self.rules.classify(id).label
            ));
        }

        for (key, value) in fields {
            if key == ID_KEY {
                continue;
            }
            match value {
                Node::Mapping(_) | Node::Sequence(_) => {
                    let hashes = "#".repeat(heading_level(depth));
                    out.push_str(&format!("{hashes} {}\n\n", humanize(key)));
                    out.push_str(&self.value(value, depth + 1));
                }
                Node::Scalar(scalar) => {
                    out.push_str(&format!(
                        "**{}**: {}\n\n",
                        humanize(key),
                        self.scalar_block(scalar)
                    ));
                }
            }
        }

        out
    }

    /// Renders a scalar as inline or block text. Body text is never
    /// truncated; only table cells are.
    pub(crate) fn scalar_block(&self, scalar: &Scalar) -> String {
        match scalar {
            Scalar::Null => NOT_SPECIFIED.to_string(),
            Scalar::Bool(true) => "✓ Yes".to_string(),
            Scalar::Bool(false) => "✗ No".to_string(),
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::String(value) => {
                if self.index.contains(value) {
                    self.link(value)
                } else if value.contains('\n') {
                    // A literal multi-line block, original line breaks kept.
                    format!("\n{}", value.trim())
                } else {
                    value.clone()
                }
            }
        }
    }

    /// Renders a navigable link to an entity's anchor, using the classified
    /// human label as display text.
    pub(crate) fn link(&self, id: &str) -> String {
        format!("[{}](#{})", self.rules.classify(id).label, anchor(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Node {
        serde_yaml::from_str::<serde_yaml::Value>(yaml).unwrap().into()
    }

    fn render(root: &Node) -> String {
        let index = IdentifierIndex::build(root);
        let rules = RuleTable::builtin();
        Renderer::new(&index, &rules, 60, 5).value(root, 1)
    }

    #[test]
    fn anchors_are_lowercase_hyphenated() {
        assert_eq!(anchor("dom_billing"), "dom-billing");
        assert_eq!(anchor("Context Mappings"), "context-mappings");
        assert_eq!(anchor("pip-intake"), "pip-intake");
    }

    #[test]
    fn heading_level_is_capped_at_six() {
        assert_eq!(heading_level(1), 4);
        assert_eq!(heading_level(2), 5);
        assert_eq!(heading_level(3), 6);
        assert_eq!(heading_level(9), 6);
    }

    #[test]
    fn scalar_markers() {
        let output = render(&parse(
            "enabled: true\ndisabled: false\nnote: ~\ncount: 3\nratio: 2.5\n",
        ));
        assert!(output.contains("**Enabled**: ✓ Yes"));
        assert!(output.contains("**Disabled**: ✗ No"));
        assert!(output.contains("**Note**: *Not specified*"));
        assert!(output.contains("**Count**: 3"));
        assert!(output.contains("**Ratio**: 2.5"));
    }

    #[test]
    fn mapping_with_id_emits_anchor_and_id_line_first() {
        let output = render(&parse("name: Billing\nid: dom_billing\n"));
        assert!(
            output.starts_with(
                "<a id=\"dom-billing\"></a>\n**ID**: `dom_billing` (Billing Domain)\n\n"
            ),
            "got: {output}"
        );
        assert!(output.contains("**Name**: Billing"));
    }

    #[test]
    fn reference_strings_render_as_links() {
        let root = parse("catalog:\n  id: ds-orders\nowner: ds-orders\n");
        let output = render(&root);
        assert!(output.contains("**Owner**: [Orders Dataset](#ds-orders)"));
    }

    #[test]
    fn dangling_reference_renders_as_plain_text() {
        let output = render(&parse("owner: ds-missing\n"));
        assert!(output.contains("**Owner**: ds-missing"));
        assert!(!output.contains("](#"));
    }

    #[test]
    fn multiline_strings_keep_their_line_breaks() {
        let output = render(&parse("notes: |\n  line one\n  line two\n"));
        assert!(output.contains("**Notes**: \nline one\nline two\n\n"));
    }

    #[test]
    fn nested_mappings_get_headings_per_depth() {
        let root = parse("outer:\n  inner:\n    deeper:\n      deepest:\n        leaf: 1\n");
        let output = render(&root);
        assert!(output.contains("#### Outer"));
        assert!(output.contains("##### Inner"));
        assert!(output.contains("###### Deeper"));
        // Depth beyond the cap keeps using level six.
        assert!(output.contains("###### Deepest"));
        assert!(!output.contains("#######"));
    }

    #[test]
    fn keys_are_humanized_in_labels_and_headings() {
        let output = render(&parse("maxRetryCount: 5\nretryPolicies:\n  backoffMode: fixed\n"));
        assert!(output.contains("**Max Retry Count**: 5"));
        assert!(output.contains("#### Retry Policies"));
        assert!(output.contains("**Backoff Mode**: fixed"));
    }

    #[test]
    fn empty_mapping_renders_nothing() {
        assert_eq!(render(&Node::Mapping(Vec::new())), "");
    }
}
