//! BA family: cross-type base rules every content item is held to.

use packlint_model::{ContentType, ContentVersion, MINIMUM_PLATFORM_VERSION, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::validator::{RuleOutcome, Validator};

/// BA100: `fromversion` must not exceed `toversion`.
pub struct FromToVersionOrderValidator;

impl Validator for FromToVersionOrderValidator {
    fn error_code(&self) -> &'static str {
        "BA100"
    }

    fn description(&self) -> &'static str {
        "fromversion must not be higher than toversion"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(self.content_types()) {
            if let (Some(from), Some(to)) = (item.from_version, item.to_version)
                && from > to
            {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!("The fromversion ({from}) cannot be higher than the toversion ({to})."),
                ));
            }
        }
        Ok(results)
    }
}

/// BA101: `id` and `name` must be identical.
pub struct IdEqualsNameValidator;

impl Validator for IdEqualsNameValidator {
    fn error_code(&self) -> &'static str {
        "BA101"
    }

    fn description(&self) -> &'static str {
        "the id attribute must equal the name attribute"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[
            ContentType::Integration,
            ContentType::Script,
            ContentType::Playbook,
        ]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(self.content_types()) {
            if item.object_id != item.name {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "The name attribute (currently {}) should be identical to its `id` attribute ({}).",
                        item.name, item.object_id
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// BA106: new content items must target at least the minimum platform
/// version. In git runs only added items count as new; in specific-files
/// runs every scoped item is held to the floor.
pub struct MinimumFromVersionValidator;

impl Validator for MinimumFromVersionValidator {
    fn error_code(&self) -> &'static str {
        "BA106"
    }

    fn description(&self) -> &'static str {
        "new content items must target at least version 6.0.0"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        &[ExecutionMode::UseGit, ExecutionMode::SpecificFiles]
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(self.content_types()) {
            let is_new = match ctx.mode() {
                ExecutionMode::UseGit => item.old.is_none(),
                _ => true,
            };
            if !is_new {
                continue;
            }
            let from = item.from_version.unwrap_or(ContentVersion::INITIAL);
            if from < MINIMUM_PLATFORM_VERSION {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "New content items must have a fromversion of at least {MINIMUM_PLATFORM_VERSION}, current fromversion is {from}."
                    ),
                ));
            }
        }
        Ok(results)
    }
}
