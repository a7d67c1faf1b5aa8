//! SC family: automation script rules.

use packlint_model::{ContentType, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::rules::integration::matches_deprecation_format;
use crate::validator::{RuleOutcome, Validator};

const SCRIPT: &[ContentType] = &[ContentType::Script];

/// SC100: deprecated scripts describe their replacement in the comment.
pub struct DeprecatedScriptCommentValidator;

impl Validator for DeprecatedScriptCommentValidator {
    fn error_code(&self) -> &'static str {
        "SC100"
    }

    fn description(&self) -> &'static str {
        "deprecated script comment names a replacement"
    }

    fn content_types(&self) -> &'static [ContentType] {
        SCRIPT
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(SCRIPT) {
            if !item.deprecated {
                continue;
            }
            let comment = item.description().unwrap_or_default().trim();
            if !matches_deprecation_format(comment) {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    "All deprecated scripts should have a comment in the following format: \"Deprecated. Use <SCRIPT_NAME> instead.\" or \"Deprecated. <REASON> No available replacement.\"",
                ));
            }
        }
        Ok(results)
    }
}
