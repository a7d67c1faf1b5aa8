//! RP family: indicator type (reputation) rules.

use serde_json::Value;

use packlint_model::{ContentType, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::validator::{RuleOutcome, Validator};

const REPUTATION: &[ContentType] = &[ContentType::Reputation];

/// RP101: the `expiration` field is a non-negative integer.
pub struct ReputationExpirationValidator;

impl Validator for ReputationExpirationValidator {
    fn error_code(&self) -> &'static str {
        "RP101"
    }

    fn description(&self) -> &'static str {
        "reputation expiration is a non-negative integer"
    }

    fn content_types(&self) -> &'static [ContentType] {
        REPUTATION
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(REPUTATION) {
            let Some(expiration) = item.data.get("expiration") else {
                continue;
            };
            if !expiration.is_u64() {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "The 'expiration' field should have a non-negative integer value, current is: {expiration}."
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// RP102: `details` mirrors `id`.
pub struct ReputationDetailsMatchIdValidator;

impl Validator for ReputationDetailsMatchIdValidator {
    fn error_code(&self) -> &'static str {
        "RP102"
    }

    fn description(&self) -> &'static str {
        "reputation details field equals its id"
    }

    fn content_types(&self) -> &'static [ContentType] {
        REPUTATION
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(REPUTATION) {
            let details = item
                .data
                .get("details")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if details != item.object_id {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "The `id` and `details` fields must be equal, id is: {}, details is: {details}.",
                        item.object_id
                    ),
                ));
            }
        }
        Ok(results)
    }
}
