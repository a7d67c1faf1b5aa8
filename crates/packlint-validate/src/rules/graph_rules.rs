//! GR family: graph-aware rules.
//!
//! These rules consult the run's dependency graph for facts no single item
//! carries: marketplace availability of dependencies, their minimum
//! versions, and deprecation state. The list-files variants check only the
//! scoped items; the all-files variants sweep the whole graph. Both share
//! one error code per concern and are selected by execution mode.

use packlint_model::{ContentItem, ContentType, ContentVersion, ValidationResult};

use crate::context::ValidationContext;
use crate::graph::DependencyGraph;
use crate::mode::ExecutionMode;
use crate::validator::{RuleOutcome, Validator};

const LIST_FILES: &[ExecutionMode] = &[ExecutionMode::SpecificFiles, ExecutionMode::UseGit];
const ALL_FILES: &[ExecutionMode] = &[ExecutionMode::AllFiles];

/// The items a graph rule sweeps: the whole store for all-files variants,
/// the scoped subset otherwise.
fn swept_items<'a>(
    ctx: &'a ValidationContext<'a>,
    validate_all_files: bool,
) -> Vec<&'a ContentItem> {
    if validate_all_files {
        ctx.store().items().map(|(_, item)| item).collect()
    } else {
        ctx.items().collect()
    }
}

fn marketplace_list(item: &ContentItem) -> String {
    item.marketplaces
        .iter()
        .map(|marketplace| marketplace.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_marketplaces(
    ctx: &ValidationContext<'_>,
    code: &'static str,
    validate_all_files: bool,
) -> RuleOutcome {
    let graph = ctx.graph(code)?;
    let mut results = Vec::new();
    for item in swept_items(ctx, validate_all_files) {
        let mut offending = Vec::new();
        for used in &item.uses {
            let Some(used_marketplaces) = graph.marketplaces_of(used) else {
                continue;
            };
            let unavailable_somewhere = item
                .marketplaces
                .iter()
                .any(|marketplace| !used_marketplaces.contains(marketplace));
            if unavailable_somewhere && !offending.contains(used) {
                offending.push(used.clone());
            }
        }
        if !offending.is_empty() {
            results.push(ValidationResult::new(
                &item.path,
                code,
                format!(
                    "Content item '{}' can be used in the '{}' marketplaces, however it uses content items: '{}' which are not available in all of those marketplaces.",
                    item.object_id,
                    marketplace_list(item),
                    offending.join("', '")
                ),
            ));
        }
    }
    Ok(results)
}

fn check_from_versions(
    ctx: &ValidationContext<'_>,
    code: &'static str,
    validate_all_files: bool,
) -> RuleOutcome {
    let graph = ctx.graph(code)?;
    let mut results = Vec::new();
    for item in swept_items(ctx, validate_all_files) {
        let item_from = item.from_version.unwrap_or(ContentVersion::INITIAL);
        let mut offending = Vec::new();
        for used in &item.uses {
            let Some(used_from) = graph.from_version_of(used) else {
                continue;
            };
            if used_from > item_from {
                let rendered = format!("{used} ({used_from})");
                if !offending.contains(&rendered) {
                    offending.push(rendered);
                }
            }
        }
        if !offending.is_empty() {
            results.push(ValidationResult::new(
                &item.path,
                code,
                format!(
                    "Content item '{}' whose from_version is '{item_from}' is using content items: '{}' whose from_version is higher.",
                    item.object_id,
                    offending.join("', '")
                ),
            ));
        }
    }
    Ok(results)
}

fn check_deprecated_usage(
    ctx: &ValidationContext<'_>,
    code: &'static str,
    validate_all_files: bool,
) -> RuleOutcome {
    let graph: &dyn DependencyGraph = ctx.graph(code)?;
    let mut results = Vec::new();
    for item in swept_items(ctx, validate_all_files) {
        let mut offending: Vec<String> = item
            .uses
            .iter()
            .filter(|used| graph.is_deprecated(used))
            .cloned()
            .collect();
        offending.dedup();
        if !offending.is_empty() {
            results.push(ValidationResult::new(
                &item.path,
                code,
                format!(
                    "Content item '{}' is using the following deprecated content items: '{}'.",
                    item.object_id,
                    offending.join("', '")
                ),
            ));
        }
    }
    Ok(results)
}

/// GR100 (list-files variant): items must not use content that is missing
/// from one of their own marketplaces.
pub struct UsesItemsNotInMarketplacesValidator;

impl Validator for UsesItemsNotInMarketplacesValidator {
    fn error_code(&self) -> &'static str {
        "GR100"
    }

    fn description(&self) -> &'static str {
        "used content is available in the item's marketplaces"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        LIST_FILES
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        check_marketplaces(ctx, self.error_code(), false)
    }
}

/// GR100 (all-files variant).
pub struct UsesItemsNotInMarketplacesAllFilesValidator;

impl Validator for UsesItemsNotInMarketplacesAllFilesValidator {
    fn error_code(&self) -> &'static str {
        "GR100"
    }

    fn description(&self) -> &'static str {
        "used content is available in the item's marketplaces (full graph)"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ALL_FILES
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        check_marketplaces(ctx, self.error_code(), true)
    }
}

/// GR101 (list-files variant): used content must not require a higher
/// minimum version than the item itself.
pub struct UsesInvalidFromVersionValidator;

impl Validator for UsesInvalidFromVersionValidator {
    fn error_code(&self) -> &'static str {
        "GR101"
    }

    fn description(&self) -> &'static str {
        "used content does not require a higher from_version"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        LIST_FILES
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        check_from_versions(ctx, self.error_code(), false)
    }
}

/// GR101 (all-files variant).
pub struct UsesInvalidFromVersionAllFilesValidator;

impl Validator for UsesInvalidFromVersionAllFilesValidator {
    fn error_code(&self) -> &'static str {
        "GR101"
    }

    fn description(&self) -> &'static str {
        "used content does not require a higher from_version (full graph)"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ALL_FILES
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        check_from_versions(ctx, self.error_code(), true)
    }
}

/// GR102: items must not use deprecated content.
pub struct UsesDeprecatedItemsValidator;

impl Validator for UsesDeprecatedItemsValidator {
    fn error_code(&self) -> &'static str {
        "GR102"
    }

    fn description(&self) -> &'static str {
        "used content is not deprecated"
    }

    fn content_types(&self) -> &'static [ContentType] {
        ContentType::ITEM_TYPES
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        ExecutionMode::ALL
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        check_deprecated_usage(ctx, self.error_code(), ctx.validate_all_files())
    }
}
