//! Schema-aware conversion of structured documents to Markdown.
//!
//! A source document (YAML or JSON) describes entities that reference each
//! other by string identifier. The converter builds a global identifier index
//! over the document tree, resolves reference strings into navigable links,
//! classifies identifiers against a prefix taxonomy, and renders the whole
//! tree as a cross-linked Markdown document with a table of contents and,
//! for reference-rich documents, a grouped reference index.

pub mod domain;
pub use domain::{Classification, Config, IdentifierIndex, Node, Rule, RuleTable, Scalar};

/// Markdown rendering and document assembly.
pub mod render;
pub use render::{ConvertError, Converter};

/// Source-document decoding and discovery.
pub mod storage;
pub use storage::{LoadError, discover, load};
