//! IN family: integration-specific rules.

use serde_json::Value;

use packlint_model::{ContentType, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::rules::CONTENT_CATEGORIES;
use crate::validator::{RuleOutcome, Validator};

const INTEGRATION: &[ContentType] = &[ContentType::Integration];

/// True when a deprecation text follows one of the accepted formats:
/// "Deprecated. Use X instead." or "Deprecated. <reason> No available
/// replacement."
pub(crate) fn matches_deprecation_format(text: &str) -> bool {
    regex::Regex::new(r"^Deprecated\.\s*(?:Use .+? instead\.?|.*No available replacement\.?)$")
        .map(|pattern| pattern.is_match(text))
        .unwrap_or(false)
}

/// IN104: the integration category is one of the approved values.
pub struct IntegrationCategoryValidator;

impl Validator for IntegrationCategoryValidator {
    fn error_code(&self) -> &'static str {
        "IN104"
    }

    fn description(&self) -> &'static str {
        "integration category is an approved value"
    }

    fn content_types(&self) -> &'static [ContentType] {
        INTEGRATION
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(INTEGRATION) {
            let category = item
                .data
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !CONTENT_CATEGORIES.contains(&category) {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "The category '{category}' is not valid. The valid options are: {}.",
                        CONTENT_CATEGORIES.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// IN127: deprecated integrations carry the `(Deprecated)` display suffix.
pub struct DeprecatedIntegrationDisplayValidator;

impl Validator for DeprecatedIntegrationDisplayValidator {
    fn error_code(&self) -> &'static str {
        "IN127"
    }

    fn description(&self) -> &'static str {
        "deprecated integration display name ends with (Deprecated)"
    }

    fn content_types(&self) -> &'static [ContentType] {
        INTEGRATION
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(INTEGRATION) {
            if !item.deprecated {
                continue;
            }
            let display = item.display_name();
            if !display.ends_with("(Deprecated)") {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "All deprecated integrations should have a display name that ends with (Deprecated), current display name is: {display}."
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// IN128: deprecated integrations describe their replacement.
pub struct DeprecatedIntegrationDescriptionValidator;

impl Validator for DeprecatedIntegrationDescriptionValidator {
    fn error_code(&self) -> &'static str {
        "IN128"
    }

    fn description(&self) -> &'static str {
        "deprecated integration description names a replacement"
    }

    fn content_types(&self) -> &'static [ContentType] {
        INTEGRATION
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(INTEGRATION) {
            if !item.deprecated {
                continue;
            }
            let description = item.description().unwrap_or_default().trim();
            if !matches_deprecation_format(description) {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    "All deprecated integrations should have a description in the following format: \"Deprecated. Use <INTEGRATION_DISPLAY_NAME> instead.\" or \"Deprecated. <REASON> No available replacement.\"",
                ));
            }
        }
        Ok(results)
    }
}
