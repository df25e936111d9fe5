//! Document assembly: the orchestration of indexing and rendering.

use std::path::Path;

use tracing::instrument;

use super::{
    Renderer, anchor,
    toc::{RESERVED_SIGIL, reference_index, table_of_contents},
};
use crate::domain::{
    Config, IdentifierIndex, Node, RuleTable, node::ID_KEY, taxonomy::humanize,
};

/// Errors that can occur when converting a document tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The document root was not a mapping. No partial rendering is
    /// attempted.
    #[error("document root must be a mapping")]
    MalformedRoot,
}

/// Converts decoded document trees into rendered Markdown.
///
/// Conversion is a pure, single-threaded computation in two passes: one full
/// index pass over the tree, then a render pass that only reads the index.
/// Rendering the same tree with the same rule table twice yields
/// byte-identical output.
#[derive(Debug, Clone)]
pub struct Converter {
    rules: RuleTable,
    reference_index_threshold: usize,
    max_cell_width: usize,
    extra_columns: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Converter {
    /// Creates a converter with the given rule table and default thresholds.
    #[must_use]
    pub fn new(rules: RuleTable) -> Self {
        let defaults = Config::default();
        Self {
            rules,
            reference_index_threshold: defaults.reference_index_threshold(),
            max_cell_width: defaults.max_cell_width(),
            extra_columns: defaults.extra_columns(),
        }
    }

    /// Creates a converter from a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config.rule_table(),
            reference_index_threshold: config.reference_index_threshold(),
            max_cell_width: config.max_cell_width(),
            extra_columns: config.extra_columns(),
        }
    }

    /// Converts a document tree into a single rendered Markdown string.
    ///
    /// `source_name` is the logical name of the input (usually the file
    /// name); its stem becomes the document title and the full name appears
    /// in the attribution line.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedRoot`] if `root` is not a mapping.
    #[instrument(level = "debug", skip(self, root))]
    pub fn convert(&self, root: &Node, source_name: &str) -> Result<String, ConvertError> {
        let Node::Mapping(sections) = root else {
            return Err(ConvertError::MalformedRoot);
        };

        let index = IdentifierIndex::build(root);
        tracing::debug!("indexed {} identifiers in {source_name}", index.len());
        let renderer = Renderer::new(&index, &self.rules, self.max_cell_width, self.extra_columns);

        let root_id = root.identifier();
        let visible: Vec<&str> = sections
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| {
                !key.starts_with(RESERVED_SIGIL) && !(root_id.is_some() && *key == ID_KEY)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", title_from(source_name)));
        out.push_str(&format!("*Generated from: {source_name}*\n\n---\n\n"));

        if index.len() > self.reference_index_threshold {
            out.push_str(&reference_index(&index, &self.rules));
        }
        out.push_str(&table_of_contents(&visible));

        // The root is a mapping like any other: when it declares an
        // identifier, the anchor and ID line come before the sections and
        // the id key is not repeated as a section of its own.
        if let Some(id) = root_id {
            out.push_str(&format!("<a id=\"{}\"></a>\n", anchor(id)));
            out.push_str(&format!(
                "**ID**: `{id}` ({})\n\n",
                self.rules.classify(id).label
            ));
        }

        for (key, value) in sections {
            if !visible.contains(&key.as_str()) {
                continue;
            }
            out.push_str(&format!(
                "<a id=\"{}\"></a>\n## {}\n\n",
                anchor(key),
                humanize(key)
            ));
            out.push_str(&match value {
                Node::Mapping(fields) => renderer.mapping(fields, 1),
                Node::Sequence(items) => renderer.sequence(items),
                Node::Scalar(scalar) => format!("{}\n\n", renderer.scalar_block(scalar)),
            });
            out.push_str("\n---\n\n");
        }

        Ok(out)
    }
}

/// Derives the document title from the source name's stem.
fn title_from(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(source_name);
    humanize(stem)
}
