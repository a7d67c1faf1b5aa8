//! The built-in rule roster.
//!
//! One module per rule family. Every rule is an independent unit struct
//! implementing [`Validator`](crate::validator::Validator); shared logic
//! lives in free helper functions, not inheritance.

pub mod base;
pub mod graph_rules;
pub mod integration;
pub mod pack;
pub mod release_notes;
pub mod reputation;
pub mod script;

use crate::validator::Validator;

/// The content categories a pack or integration may declare.
pub const CONTENT_CATEGORIES: &[&str] = &[
    "Analytics & SIEM",
    "Authentication & Identity Management",
    "Case Management",
    "Cloud Services",
    "Data Enrichment & Threat Intelligence",
    "Database",
    "Email",
    "Endpoint",
    "File Integrity Management",
    "Forensics & Malware Analysis",
    "IT Services",
    "Messaging and Conferencing",
    "Network Security",
    "Utilities",
    "Vulnerability Management",
];

/// Every built-in rule, in registration (and therefore dispatch) order.
pub fn default_rules() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(base::FromToVersionOrderValidator),
        Box::new(base::IdEqualsNameValidator),
        Box::new(base::MinimumFromVersionValidator),
        Box::new(pack::PackNameValidator),
        Box::new(pack::PackVersionFormatValidator),
        Box::new(pack::PackSupportTierValidator),
        Box::new(pack::PackCategoriesValidator),
        Box::new(integration::IntegrationCategoryValidator),
        Box::new(integration::DeprecatedIntegrationDisplayValidator),
        Box::new(integration::DeprecatedIntegrationDescriptionValidator),
        Box::new(script::DeprecatedScriptCommentValidator),
        Box::new(reputation::ReputationExpirationValidator),
        Box::new(reputation::ReputationDetailsMatchIdValidator),
        Box::new(release_notes::IsReleaseNotesFilledOutValidator),
        Box::new(release_notes::MultipleRNsAddedValidator),
        Box::new(release_notes::IsRNAddedToNewPackValidator),
        Box::new(release_notes::IsDockerEntryMatchYmlValidator),
        Box::new(release_notes::IsBCRNExistValidator),
        Box::new(release_notes::IsValidContentTypeHeaderValidator),
        Box::new(release_notes::ReleaseNoteHeaderValidator),
        Box::new(release_notes::IsValidRnHeadersFormatValidator),
        Box::new(release_notes::FirstLevelHeaderMissingValidator),
        Box::new(graph_rules::UsesItemsNotInMarketplacesValidator),
        Box::new(graph_rules::UsesItemsNotInMarketplacesAllFilesValidator),
        Box::new(graph_rules::UsesInvalidFromVersionValidator),
        Box::new(graph_rules::UsesInvalidFromVersionAllFilesValidator),
        Box::new(graph_rules::UsesDeprecatedItemsValidator),
    ]
}
