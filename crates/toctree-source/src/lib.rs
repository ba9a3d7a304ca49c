//! Documentation source tree scanning.
//!
//! A source directory holds one subdirectory per locale, each with its own
//! manifest and page files:
//!
//! ```text
//! docs/source/
//! ├── en/
//! │   ├── _toctree.yml
//! │   ├── index.md
//! │   └── main_classes/model.md
//! └── es/
//!     ├── _toctree.yml
//!     └── index.md
//! ```
//!
//! [`discover_locales`] finds the locale directories and [`PageSet::scan`]
//! collects the page identifiers a manifest's `local` values refer to.

mod locale;
mod pages;

pub use locale::{Locale, discover_locales};
pub use pages::{PageSet, ScanOptions, SourceError};
