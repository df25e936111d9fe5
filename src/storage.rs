//! Decoding source documents into the document tree.
//!
//! The conversion core is pure; everything that touches the filesystem lives
//! here. Sources are YAML or JSON files, decoded into [`crate::Node`] before
//! the converter ever sees them.

mod source;
pub use source::{LoadError, discover, load};
