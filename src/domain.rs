//! Domain models for document conversion.
//!
//! This module contains the pure core: the decoded document tree, the
//! identifier index built over it, and the classification taxonomy used to
//! humanize and group identifiers.

/// The decoded document tree.
pub mod node;
pub use node::{ID_KEY, Node, Scalar};

/// The global identifier index and reference resolution.
pub mod index;
pub use index::IdentifierIndex;

/// Prefix-based identifier classification and humanization.
pub mod taxonomy;
pub use taxonomy::{Classification, Rule, RuleTable};

mod config;
pub use config::Config;
