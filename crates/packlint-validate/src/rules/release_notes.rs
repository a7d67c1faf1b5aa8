//! RN family: release-note rules.
//!
//! These rules work on the pack aggregate: the current release note's parsed
//! document, the pack's full release-note file list, and (in diff runs) the
//! base-revision snapshot attached by the orchestrator.

use packlint_model::{ContentItem, ContentType, Pack, ReleaseNote, ValidationResult};

use crate::context::ValidationContext;
use crate::mode::ExecutionMode;
use crate::validator::{RuleOutcome, Validator};

const PACK: &[ContentType] = &[ContentType::Pack];
const GIT_AND_SPECIFIC: &[ExecutionMode] =
    &[ExecutionMode::UseGit, ExecutionMode::SpecificFiles];
const GIT_ONLY: &[ExecutionMode] = &[ExecutionMode::UseGit];

/// Placeholder tokens the release-note template leaves behind.
const RN_PLACEHOLDERS: &[&str] = &["%%UPDATE_RN%%", "%%XSIAM_VERSION%%"];

const RN_DOCS_URL: &str = "https://xsoar.pan.dev/docs/documentation/release-notes";

fn release_note(pack: &Pack) -> Option<&ReleaseNote> {
    pack.release_note.as_ref()
}

/// RN103: the current release note is filled out — not empty and free of
/// template placeholders.
pub struct IsReleaseNotesFilledOutValidator;

impl Validator for IsReleaseNotesFilledOutValidator {
    fn error_code(&self) -> &'static str {
        "RN103"
    }

    fn description(&self) -> &'static str {
        "release notes are filled out"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            let has_placeholder = RN_PLACEHOLDERS
                .iter()
                .any(|placeholder| rn.content.contains(placeholder));
            if rn.is_blank() || has_placeholder {
                results.push(ValidationResult::new(
                    &rn.path,
                    self.error_code(),
                    "Please complete the release notes and ensure all placeholders are filled in.\
                     For common troubleshooting steps, please review the documentation found here: \
                     https://xsoar.pan.dev/docs/integrations/changelog#common-troubleshooting-tips",
                ));
            }
        }
        Ok(results)
    }
}

/// RN105: at most one release-note file is new relative to the base
/// revision. Both `.md` and `.json` files count.
pub struct MultipleRNsAddedValidator;

impl Validator for MultipleRNsAddedValidator {
    fn error_code(&self) -> &'static str {
        "RN105"
    }

    fn description(&self) -> &'static str {
        "at most one new release note per change set"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_ONLY
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            let old_rns: &[String] = pack
                .old
                .as_ref()
                .map(|snapshot| snapshot.all_rns.as_slice())
                .unwrap_or(&[]);
            let new_count = rn
                .all_rns
                .iter()
                .filter(|name| !old_rns.contains(name))
                .count();
            if new_count > 1 {
                results.push(ValidationResult::new(
                    &rn.path,
                    self.error_code(),
                    "The pack contains more than one new release note, please make sure the pack contains at most one release note.",
                ));
            }
        }
        Ok(results)
    }
}

/// RN108: a pack that was never released must not carry release notes.
pub struct IsRNAddedToNewPackValidator;

impl Validator for IsRNAddedToNewPackValidator {
    fn error_code(&self) -> &'static str {
        "RN108"
    }

    fn description(&self) -> &'static str {
        "new packs carry no release notes"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_ONLY
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let is_new = match &pack.old {
                None => true,
                Some(snapshot) => snapshot.current_version == pack.current_version,
            };
            if is_new && pack.has_release_notes() {
                let path = release_note(pack)
                    .map(|rn| rn.path.clone())
                    .unwrap_or_else(|| pack.path.join("pack_metadata.json"));
                results.push(ValidationResult::new(
                    path,
                    self.error_code(),
                    "The Pack is a new pack and contains release notes, please remove all release notes.",
                ));
            }
        }
        Ok(results)
    }
}

/// RN111: when an integration or script changed its docker image, the
/// release-note entry for it must state the new tag verbatim.
pub struct IsDockerEntryMatchYmlValidator;

impl Validator for IsDockerEntryMatchYmlValidator {
    fn error_code(&self) -> &'static str {
        "RN111"
    }

    fn description(&self) -> &'static str {
        "release-note docker entry matches the yml"
    }

    fn content_types(&self) -> &'static [ContentType] {
        &[ContentType::Integration, ContentType::Script]
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_ONLY
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for item in ctx.items_of(self.content_types()) {
            let Some(old) = &item.old else {
                continue;
            };
            let Some(current_image) = item.docker_image() else {
                continue;
            };
            if old.docker_image() == Some(current_image) {
                continue;
            }
            let Some(rn) = ctx.pack_of(item).and_then(release_note) else {
                continue;
            };
            let stated = rn_docker_entry(rn, item);
            if stated.as_deref() != Some(current_image) {
                results.push(ValidationResult::new(
                    &item.path,
                    self.error_code(),
                    format!(
                        "The docker entry in the release notes doesn't match what is in the yml.\n The docker image in rn: {}, docker image in yml {current_image} - please make sure the dockers match.",
                        stated.as_deref().unwrap_or("No docker entry found")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// The docker image named in the item's release-note entry, if any.
fn rn_docker_entry(rn: &ReleaseNote, item: &ContentItem) -> Option<String> {
    let doc = rn.parse();
    let entry = doc
        .find_entry(item.display_name())
        .or_else(|| doc.find_entry(&item.name))?;
    let text = entry.lines.join("\n");
    regex::Regex::new(r"demisto/[A-Za-z0-9_.-]+:[A-Za-z0-9_.-]+")
        .ok()
        .and_then(|pattern| pattern.find(&text).map(|found| found.as_str().to_string()))
}

/// RN112: a release note announcing breaking changes needs a `.json`
/// sibling carrying a `breakingChanges` entry.
pub struct IsBCRNExistValidator;

impl Validator for IsBCRNExistValidator {
    fn error_code(&self) -> &'static str {
        "RN112"
    }

    fn description(&self) -> &'static str {
        "breaking-change release notes have a json sibling"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            if !rn.content.to_lowercase().contains("breaking change") {
                continue;
            }
            let covered = rn
                .breaking_changes
                .as_ref()
                .is_some_and(|bc| bc.has_entry);
            if !covered {
                results.push(ValidationResult::new(
                    &rn.path,
                    self.error_code(),
                    format!(
                        "The release notes contain information about breaking changes but missing a breaking change file, make sure to add one as {} and that the file contains the 'breakingChanges' entry.",
                        rn.expected_bc_path().display()
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// RN113: every first-level header names a known content type.
pub struct IsValidContentTypeHeaderValidator;

impl Validator for IsValidContentTypeHeaderValidator {
    fn error_code(&self) -> &'static str {
        "RN113"
    }

    fn description(&self) -> &'static str {
        "first-level headers are known content-type names"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            if rn.is_blank() {
                continue;
            }
            let invalid = invalid_type_headers(rn);
            if !invalid.is_empty() {
                results.push(ValidationResult::new(
                    &rn.path,
                    self.error_code(),
                    format!(
                        "The following content type header(s) \"{}\" are invalid.\nFor more information, refer to the following documentation: {RN_DOCS_URL}",
                        invalid.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// Unknown first-level headers, first-seen order, deduplicated.
fn invalid_type_headers(rn: &ReleaseNote) -> Vec<String> {
    let mut invalid: Vec<String> = Vec::new();
    for section in &rn.parse().sections {
        if section.content_type.is_none() {
            let header = section.header.trim().to_string();
            if !invalid.contains(&header) {
                invalid.push(header);
            }
        }
    }
    invalid
}

/// RN114: release-note headers reference content that exists — both the
/// content-type headers and the item headers under them.
pub struct ReleaseNoteHeaderValidator;

impl Validator for ReleaseNoteHeaderValidator {
    fn error_code(&self) -> &'static str {
        "RN114"
    }

    fn description(&self) -> &'static str {
        "release-note headers reference existing content"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            if rn.is_blank() {
                continue;
            }
            let bad_types = invalid_type_headers(rn);
            let bad_items = unknown_item_headers(ctx, pack, rn);
            if bad_types.is_empty() && bad_items.is_empty() {
                continue;
            }
            let mut message = String::from("The following release note headers are invalid:\n");
            if !bad_types.is_empty() {
                message.push_str(&format!("Content types: {}\n\n", bad_types.join(", ")));
            }
            if !bad_items.is_empty() {
                let groups: Vec<String> = bad_items
                    .iter()
                    .map(|(header, items)| format!("{header}: {}", items.join(", ")))
                    .collect();
                message.push_str(&format!("Content items: {}\n\n", groups.join("\n")));
            }
            results.push(ValidationResult::new(&rn.path, self.error_code(), message));
        }
        Ok(results)
    }
}

/// Item headers under recognized type sections that match no content item
/// of the pack, grouped by section header.
fn unknown_item_headers(
    ctx: &ValidationContext<'_>,
    pack: &Pack,
    rn: &ReleaseNote,
) -> Vec<(String, Vec<String>)> {
    let mut groups = Vec::new();
    for section in &rn.parse().sections {
        if section.content_type.is_none() {
            continue;
        }
        let header = section.header.trim();
        let known: Vec<&ContentItem> = pack
            .items
            .iter()
            .map(|id| ctx.store().item(*id))
            .filter(|item| item.content_type.rn_header() == Some(header))
            .collect();
        let mut unknown = Vec::new();
        for entry in &section.entries {
            let title = entry.title();
            let exists = known
                .iter()
                .any(|item| item.display_name() == title || item.name == title);
            if !exists && !unknown.contains(&title.to_string()) {
                unknown.push(title.to_string());
            }
        }
        if !unknown.is_empty() {
            groups.push((header.to_string(), unknown));
        }
    }
    groups
}

/// RN115: every type section actually contains item headers.
pub struct IsValidRnHeadersFormatValidator;

impl Validator for IsValidRnHeadersFormatValidator {
    fn error_code(&self) -> &'static str {
        "RN115"
    }

    fn description(&self) -> &'static str {
        "item headers are present and well-formed under each type section"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            if rn.is_blank() {
                continue;
            }
            let missing: Vec<String> = rn
                .parse()
                .sections
                .iter()
                .filter(|section| section.entries.is_empty())
                .map(|section| section.header.trim().to_string())
                .collect();
            if !missing.is_empty() {
                results.push(ValidationResult::new(
                    &rn.path,
                    self.error_code(),
                    format!(
                        "Did not find content items headers under the following content types: {}. This might be due to invalid format.",
                        missing.join(", ")
                    ),
                ));
            }
        }
        Ok(results)
    }
}

/// RN116: the release note opens with a first-level header. A force/override
/// template header (`## `) exempts the file.
pub struct FirstLevelHeaderMissingValidator;

impl Validator for FirstLevelHeaderMissingValidator {
    fn error_code(&self) -> &'static str {
        "RN116"
    }

    fn description(&self) -> &'static str {
        "release note has a first-level header"
    }

    fn content_types(&self) -> &'static [ContentType] {
        PACK
    }

    fn modes(&self) -> &'static [ExecutionMode] {
        GIT_AND_SPECIFIC
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome {
        let mut results = Vec::new();
        for pack in ctx.packs() {
            let Some(rn) = release_note(pack) else {
                continue;
            };
            if rn.is_blank() {
                continue;
            }
            let doc = rn.parse();
            if doc.has_first_level_header() || doc.has_force_header() {
                continue;
            }
            results.push(ValidationResult::new(
                &rn.path,
                self.error_code(),
                format!(
                    "The release note is missing a first level header.\nFor more information, refer to the following documentation: {RN_DOCS_URL}"
                ),
            ));
        }
        Ok(results)
    }
}
