//! Sequence layout: tables, bullet lists, and numbered fallbacks.

use std::collections::BTreeSet;

use super::{EMPTY_LIST, MAPPING_MARKER, Renderer, SEQUENCE_MARKER};
use crate::domain::{Node, Scalar, node::ID_KEY, taxonomy::humanize};

/// Columns emitted first, in this order, whenever any element carries them.
const PRIORITY_COLUMNS: [&str; 6] = ["id", "name", "title", "type", "status", "description"];

impl Renderer<'_> {
    /// Renders a sequence, choosing a layout from its content shape.
    ///
    /// Reference resolution happens first: a sequence whose elements are all
    /// strings naming indexed entities is replaced by the entities
    /// themselves. Resolution is all-or-nothing, so a partially matching
    /// list stays a list of raw strings. After resolution: an empty sequence
    /// renders a fixed marker, all-scalar content renders as bullets,
    /// all-mapping content renders as a table, and anything mixed falls back
    /// to a numbered list.
    pub(crate) fn sequence(&self, items: &[Node]) -> String {
        if items.is_empty() {
            return format!("{EMPTY_LIST}\n\n");
        }

        let elements: Vec<&Node> = self
            .index
            .resolve_sequence(items)
            .unwrap_or_else(|| items.iter().collect());

        let scalars: Option<Vec<&Scalar>> = elements
            .iter()
            .map(|node| match node {
                Node::Scalar(scalar) => Some(scalar),
                _ => None,
            })
            .collect();
        if let Some(scalars) = scalars {
            let bullets: Vec<String> = scalars
                .iter()
                .map(|scalar| format!("- {}", self.scalar_block(scalar)))
                .collect();
            return format!("{}\n\n", bullets.join("\n"));
        }

        let mappings: Option<Vec<&[(String, Node)]>> = elements
            .iter()
            .map(|node| match node {
                Node::Mapping(fields) => Some(fields.as_slice()),
                _ => None,
            })
            .collect();
        if let Some(rows) = mappings {
            return self.table(&rows);
        }

        let numbered: Vec<String> = elements
            .iter()
            .enumerate()
            .map(|(i, node)| format!("{}. {}", i + 1, self.item_summary(node)))
            .collect();
        format!("{}\n\n", numbered.join("\n"))
    }

    /// Renders a list of mappings as a Markdown table.
    fn table(&self, rows: &[&[(String, Node)]]) -> String {
        let columns = columns(rows, self.extra_columns);
        if columns.is_empty() {
            return format!("{EMPTY_LIST}\n\n");
        }

        let mut out = String::new();
        let header: Vec<String> = columns.iter().map(|column| humanize(column)).collect();
        out.push_str(&format!("| {} |\n", header.join(" | ")));
        out.push_str(&format!("| {} |\n", vec!["---"; columns.len()].join(" | ")));

        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| self.cell(field(row, column), column))
                .collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }

        out.push('\n');
        out
    }

    /// Formats one table cell. Missing and null values render empty, the
    /// `id` column renders as a link with the classified label, and string
    /// cells are flattened and truncated to the configured width.
    fn cell(&self, value: Option<&Node>, column: &str) -> String {
        let Some(node) = value else {
            return String::new();
        };
        if column == ID_KEY {
            if let Some(id) = node.as_str() {
                return self.link(id);
            }
        }
        match node {
            Node::Scalar(Scalar::Null) => String::new(),
            Node::Scalar(Scalar::Bool(true)) => "✓".to_string(),
            Node::Scalar(Scalar::Bool(false)) => "✗".to_string(),
            Node::Scalar(Scalar::Int(value)) => value.to_string(),
            Node::Scalar(Scalar::Float(value)) => value.to_string(),
            Node::Scalar(Scalar::String(value)) => {
                // Cells cannot hold line breaks.
                truncate(&value.replace('\n', " "), self.max_cell_width)
            }
            Node::Mapping(_) => MAPPING_MARKER.to_string(),
            Node::Sequence(_) => SEQUENCE_MARKER.to_string(),
        }
    }

    fn item_summary(&self, node: &Node) -> String {
        match node {
            Node::Scalar(scalar) => self.scalar_block(scalar),
            Node::Mapping(_) => MAPPING_MARKER.to_string(),
            Node::Sequence(_) => SEQUENCE_MARKER.to_string(),
        }
    }
}

fn field<'n>(row: &'n [(String, Node)], key: &str) -> Option<&'n Node> {
    row.iter().find(|(k, _)| k == key).map(|(_, value)| value)
}

/// Chooses table columns: priority columns present in at least one row, in
/// the fixed priority order, then up to `extra` more keys observed across
/// rows in ascending lexicographic order.
fn columns(rows: &[&[(String, Node)]], extra: usize) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for row in rows {
        for (key, _) in *row {
            keys.insert(key.as_str());
        }
    }

    let mut columns: Vec<String> = PRIORITY_COLUMNS
        .iter()
        .filter(|column| keys.contains(**column))
        .map(ToString::to_string)
        .collect();
    columns.extend(
        keys.iter()
            .filter(|key| !PRIORITY_COLUMNS.contains(*key))
            .take(extra)
            .map(ToString::to_string),
    );
    columns
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}…")
    }
}
