//! The packlint rule engine.
//!
//! Content items are classified upstream (see `packlint-ingest`); this crate
//! decides which rules run against them and aggregates what the rules find.
//! The pieces: a [`Validator`] capability trait implemented independently per
//! rule, an immutable [`ValidatorRegistry`] built at startup, the
//! [`ExecutionMode`]/[`CodeFilter`] dispatch filters, a read-only
//! [`DependencyGraph`] handle for the graph-aware rules, and the
//! [`ValidateManager`] orchestrator that drives one deterministic pass from
//! mode resolution to the aggregated [`RunOutcome`].

pub mod context;
pub mod error;
pub mod graph;
pub mod manager;
pub mod mode;
pub mod registry;
pub mod rules;
pub mod validator;

pub use context::ValidationContext;
pub use error::{Result, RuleContractError, ValidateError};
pub use graph::{DependencyGraph, InMemoryGraph};
pub use manager::{
    ContractFailure, PARSE_FAILURE_CODE, RunConfig, RunOutcome, SuppressionIndex,
    UNSUPPORTED_FILE_CODE, ValidateManager,
};
pub use mode::{CodeFilter, ExecutionMode};
pub use registry::ValidatorRegistry;
pub use validator::{RuleOutcome, Validator};
