//! fileclean - delete files by name or pattern across a directory tree
//!
//! A run lists a root directory (optionally recursing into subdirectories),
//! deletes every file selected by the exact-name list, the regular-expression
//! list or all mode, and removes directories that are left empty afterwards.
//!
//! ## Matching
//!
//! - A file matches if its name equals one of the exact names, or if any
//!   pattern finds a match anywhere in the name (patterns are not anchored
//!   unless they anchor themselves).
//! - In all mode every file is deleted. With exclusion enabled, files that
//!   match the criteria are kept instead. Exclusion has no effect outside all mode.
//!
//! ## Pruning
//!
//! After a directory's children are handled, the directory is removed if it is
//! empty. This happens bottom-up and includes the root itself.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod matcher;

// Re-export commonly used items
pub use cleaner::{Cleaner, NoopReporter, Reporter, RunStats};
pub use config::{read_name_list, CleanConfig, ValidConfig};
pub use error::{CleanError, ErrorKind, Result};
pub use matcher::{decide, Decision, Matcher};
