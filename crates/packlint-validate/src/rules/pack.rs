//! PA family: pack metadata rules.

use std::path::PathBuf;

use packlint_model::{ContentType, Pack, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::rules::CONTENT_CATEGORIES;
use crate::validator::{RuleOutcome, Validator};

const SUPPORT_TIERS: &[&str] = &["xsoar", "partner", "developer", "community"];

/// Words that must not appear inside a pack name.
const EXCLUDED_NAME_WORDS: &[&str] = &[
    "pack",
    "playbook",
    "integration",
    "script",
    "automation",
    "xsoar",
];

fn metadata_path(pack: &Pack) -> PathBuf {
    pack.path.join("pack_metadata.json")
}

/// PA108: the pack name is well-formed.
pub struct PackNameValidator;

impl Validator for PackNameValidator {
    fn error_code(&self) -> &'static str {
        "PA108"
    }

    fn description(&self) -> &'static str {
        "pack name is well-formed"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[ContentType::Pack]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let name = pack.metadata.name.trim();
            if !is_valid_pack_name(name) {
                results.push(ValidationResult::new(
                    metadata_path(pack),
                    self.error_code(),
                    format!(
                        "Invalid pack name ({name}), pack names should be at least 3 characters long, start with a capital letter and must not contain the words: {}.",
                        EXCLUDED_NAME_WORDS.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

fn is_valid_pack_name(name: &str) -> bool {
    if name.chars().count() < 3 {
        return false;
    }
    if !name.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    let lowered = name.to_lowercase();
    !EXCLUDED_NAME_WORDS
        .iter()
        .any(|word| lowered.contains(word))
}

/// PA114: `currentVersion` follows the x.y.z format.
pub struct PackVersionFormatValidator;

impl Validator for PackVersionFormatValidator {
    fn error_code(&self) -> &'static str {
        "PA114"
    }

    fn description(&self) -> &'static str {
        "pack version follows the x.y.z format"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[ContentType::Pack]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            if pack
                .metadata
                .version_raw
                .parse::<packlint_model::ContentVersion>()
                .is_err()
            {
                results.push(ValidationResult::new(
                    metadata_path(pack),
                    self.error_code(),
                    "Pack metadata version format is not valid. Please fill in a valid format (example: 0.0.2).",
                ));
            }
        }
        Ok(results)
    }
}

/// PA117: the support tier is one of the known values.
pub struct PackSupportTierValidator;

impl Validator for PackSupportTierValidator {
    fn error_code(&self) -> &'static str {
        "PA117"
    }

    fn description(&self) -> &'static str {
        "pack support tier is a known value"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[ContentType::Pack]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let support = pack.metadata.support.as_str();
            if !SUPPORT_TIERS.contains(&support) {
                results.push(ValidationResult::new(
                    metadata_path(pack),
                    self.error_code(),
                    format!(
                        "The pack's support type ({support}) is invalid.\nThe pack support type can only be one of the following: {}.",
                        SUPPORT_TIERS.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// PA120: exactly one category, drawn from the approved list.
pub struct PackCategoriesValidator;

impl Validator for PackCategoriesValidator {
    fn error_code(&self) -> &'static str {
        "PA120"
    }

    fn description(&self) -> &'static str {
        "pack declares exactly one approved category"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[ContentType::Pack]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let categories = &pack.metadata.categories;
            let valid = categories.len() == 1
                && CONTENT_CATEGORIES.contains(&categories[0].as_str());
            if !valid {
                results.push(ValidationResult::new(
                    metadata_path(pack),
                    self.error_code(),
                    format!(
                        "The pack metadata categories field doesn't match the standard,\nplease make sure the field contains exactly one category from the following options: {}.",
                        CONTENT_CATEGORIES.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}
