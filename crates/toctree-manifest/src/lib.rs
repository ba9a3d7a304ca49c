//! Navigation manifest model for documentation sites.
//!
//! A manifest (`_toctree.yml`) is an ordered tree of chapters, sections and
//! pages for one locale. Two node shapes exist:
//!
//! - **Group**: `{title, sections: [node...], isExpanded?}`
//! - **Leaf**: `{title, local}` where `local` names a documentation page
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Toctree`] with [`Node`], [`Group`] and [`Leaf`] types
//! - YAML parsing with path-aware [`SchemaError`]s and canonical serialization
//! - [`validate`] for tree-wide checks (duplicate `local`s, empty groups,
//!   unresolved pages) against any [`PageIndex`]
//! - [`coverage`] for comparing a translated manifest with its reference
//! - [`tidy`] for deduplicating and sorting configured groups
//!
//! # Example
//!
//! ```
//! use toctree_manifest::Toctree;
//!
//! let yaml = "
//! - title: Get started
//!   sections:
//!   - local: index
//!     title: Home
//! ";
//! let tree = Toctree::from_yaml_str(yaml).unwrap();
//! assert_eq!(tree.locals(), vec!["index"]);
//! ```

mod coverage;
mod error;
mod manifest;
mod navigation;
mod node;
mod tidy;
mod validate;
mod walk;

pub use coverage::{Coverage, MissingEntry, coverage};
pub use error::{ManifestError, SchemaError, SchemaErrorKind};
pub use navigation::NavItem;
pub use node::{Group, Leaf, Node, NodePath, NodeRef, Toctree};
pub use tidy::{TidyError, TidySummary, tidy};
pub use validate::{
    Diagnostic, DiagnosticKind, PageIndex, Severity, ValidateOptions, ValidationReport, validate,
};
pub use walk::{Entry, TreeStats, Walk};
