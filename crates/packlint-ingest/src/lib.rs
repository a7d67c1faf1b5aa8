//! Content repository ingestion for packlint.
//!
//! This crate owns everything that touches the filesystem or git: reading and
//! parsing YAML/JSON content definitions, classifying files into content
//! types, discovering packs under a repository root, parsing `.pack-ignore`
//! suppression files, and resolving git change sets for diff-aware runs.
//! The rule engine consumes the resulting [`packlint_model`] objects and never
//! performs I/O itself.

pub mod classify;
pub mod discover;
pub mod error;
pub mod git;
pub mod ignore;
pub mod parse;

pub use classify::classify;
pub use discover::{
    Discovered, FileProblem, ProblemKind, find_pack_root, load_files, load_pack, load_repository,
};
pub use error::{IngestError, Result};
pub use git::{ChangeSet, diff_name_status, parse_name_status, show_at_revision};
pub use ignore::{PackIgnore, load_pack_ignore, parse_pack_ignore};
pub use parse::{is_structured_file, parse_structured, read_structured};

/// Message used when a file cannot be classified into a content type.
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "The file type is not supported in the validate command.";
