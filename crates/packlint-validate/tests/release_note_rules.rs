//! Release-note rule behavior on constructed packs.

mod common;

use packlint_model::ContentStore;
use packlint_validate::rules::release_notes::{
    FirstLevelHeaderMissingValidator, IsBCRNExistValidator, IsDockerEntryMatchYmlValidator,
    IsRNAddedToNewPackValidator, IsReleaseNotesFilledOutValidator,
    IsValidContentTypeHeaderValidator, IsValidRnHeadersFormatValidator, MultipleRNsAddedValidator,
    ReleaseNoteHeaderValidator,
};
use packlint_validate::{ExecutionMode, ValidationContext, Validator};

use common::{add_pack, integration_item, snapshot_pack};

const FILLED_OUT_MESSAGE: &str = "Please complete the release notes and ensure all placeholders are filled in.For common troubleshooting steps, please review the documentation found here: https://xsoar.pan.dev/docs/integrations/changelog#common-troubleshooting-tips";

fn git_ctx(store: &ContentStore) -> ValidationContext<'_> {
    ValidationContext::new(store, ExecutionMode::UseGit)
}

#[test]
fn empty_release_note_is_not_filled_out() {
    let mut store = ContentStore::new();
    add_pack(&mut store, "Empty", "2.0.5", Some(""));
    let results = IsReleaseNotesFilledOutValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].error_code, "RN103");
    assert_eq!(results[0].message, FILLED_OUT_MESSAGE);
}

#[test]
fn placeholder_release_note_is_not_filled_out() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "Placeholder",
        "2.0.5",
        Some("This is an invalid release note %%UPDATE_RN%%"),
    );
    add_pack(
        &mut store,
        "XsiamPlaceholder",
        "2.0.5",
        Some("This is an invalid release note %%XSIAM_VERSION%%"),
    );
    add_pack(&mut store, "Valid", "2.0.5", Some("This is a valid rn."));
    add_pack(&mut store, "NoRn", "1.0.0", None);
    let results = IsReleaseNotesFilledOutValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| result.message == FILLED_OUT_MESSAGE));
}

#[test]
fn two_new_release_notes_fail_regardless_of_extension() {
    let mut store = ContentStore::new();
    let pack = add_pack(&mut store, "Multi", "2.0.5", Some("The new RN"));
    snapshot_pack(&mut store, pack, "2.0.4", &[]);
    let validator = MultipleRNsAddedValidator;

    assert!(validator.check(&git_ctx(&store)).unwrap().is_empty());

    store
        .pack_mut(pack)
        .release_note
        .as_mut()
        .unwrap()
        .all_rns
        .push("2.0.5.json".to_string());
    assert!(validator.check(&git_ctx(&store)).unwrap().is_empty());

    store
        .pack_mut(pack)
        .release_note
        .as_mut()
        .unwrap()
        .all_rns
        .push("2.0.6.md".to_string());
    let results = validator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].message,
        "The pack contains more than one new release note, please make sure the pack contains at most one release note."
    );
}

#[test]
fn release_note_carried_over_from_base_is_not_new() {
    let mut store = ContentStore::new();
    let pack = add_pack(&mut store, "Carried", "2.0.6", Some("next"));
    store
        .pack_mut(pack)
        .release_note
        .as_mut()
        .unwrap()
        .all_rns
        .extend(["2_0_5.md".to_string(), "2_0_6.md".to_string(), "2_0_6.json".to_string()]);
    snapshot_pack(&mut store, pack, "2.0.5", &["2_0_5.md"]);
    // Two genuinely new files: 2_0_6.md and its json sibling.
    let results = MultipleRNsAddedValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn new_pack_with_release_notes_fails() {
    let mut store = ContentStore::new();
    let pack = add_pack(&mut store, "Fresh", "1.0.0", Some("should fail"));
    snapshot_pack(&mut store, pack, "1.0.0", &[]);
    let results = IsRNAddedToNewPackValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].message,
        "The Pack is a new pack and contains release notes, please remove all release notes."
    );
}

#[test]
fn new_pack_without_release_notes_passes() {
    let mut store = ContentStore::new();
    add_pack(&mut store, "Fresh", "1.0.0", None);
    assert!(
        IsRNAddedToNewPackValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn released_pack_with_release_notes_passes() {
    let mut store = ContentStore::new();
    let pack = add_pack(&mut store, "Released", "2.0.5", Some("#### Scripts\n##### s\n- x"));
    snapshot_pack(&mut store, pack, "2.0.4", &[]);
    assert!(
        IsRNAddedToNewPackValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn docker_entry_mismatch_embeds_both_images() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Docker",
        "2.0.5",
        Some("#### Integration\n##### MyIntegration\n- Updated the Docker image to: *demisto/python3:3.9.7.24076*."),
    );
    let mut item = integration_item("MyIntegration", "demisto/python3:3.9.7.24071");
    item.old = Some(Box::new(integration_item(
        "MyIntegration",
        "demisto/python3:3.9.7.24070",
    )));
    store.add_item(item, Some(pack));

    let results = IsDockerEntryMatchYmlValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].message,
        "The docker entry in the release notes doesn't match what is in the yml.\n The docker image in rn: demisto/python3:3.9.7.24076, docker image in yml demisto/python3:3.9.7.24071 - please make sure the dockers match."
    );
}

#[test]
fn docker_entry_missing_from_release_note_fails() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Docker",
        "2.0.5",
        Some("#### Integrations\n##### MyIntegration\n- Entry not related to docker image update."),
    );
    let mut item = integration_item("MyIntegration", "demisto/python3:3.9.7.24076");
    item.old = Some(Box::new(integration_item(
        "MyIntegration",
        "demisto/python3:3.9.7.24071",
    )));
    store.add_item(item, Some(pack));

    let results = IsDockerEntryMatchYmlValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].message.contains("The docker image in rn: No docker entry found"));
    assert!(results[0].message.contains("docker image in yml demisto/python3:3.9.7.24076"));
}

#[test]
fn unchanged_docker_image_is_not_checked() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Docker",
        "2.0.5",
        Some("#### Integrations\n##### MyIntegration\n- entry not related to docker update."),
    );
    let mut item = integration_item("MyIntegration", "demisto/python3:3.9.7.24071");
    item.old = Some(Box::new(integration_item(
        "MyIntegration",
        "demisto/python3:3.9.7.24071",
    )));
    store.add_item(item, Some(pack));
    assert!(
        IsDockerEntryMatchYmlValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn matching_docker_entry_passes() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Docker",
        "2.0.5",
        Some("#### Integrations\n##### MyIntegration\n- Updated the Docker image to: *demisto/python3:3.9.7.24076*."),
    );
    let mut item = integration_item("MyIntegration", "demisto/python3:3.9.7.24076");
    item.old = Some(Box::new(integration_item(
        "MyIntegration",
        "demisto/python3:3.9.7.24071",
    )));
    store.add_item(item, Some(pack));
    assert!(
        IsDockerEntryMatchYmlValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn breaking_change_release_note_requires_json_sibling() {
    let mut store = ContentStore::new();
    add_pack(&mut store, "NoBc", "2.0.5", Some("some change"));
    add_pack(&mut store, "MissingFile", "2.0.5", Some("breaking change"));
    let no_entry = add_pack(&mut store, "NoEntry", "2.0.5", Some("breaking change"));
    store
        .pack_mut(no_entry)
        .release_note
        .as_mut()
        .unwrap()
        .breaking_changes = Some(packlint_model::BreakingChanges {
        path: "Packs/NoEntry/ReleaseNotes/2_0_5.json".into(),
        has_entry: false,
    });
    let covered = add_pack(&mut store, "Covered", "2.0.5", Some("breaking change"));
    store
        .pack_mut(covered)
        .release_note
        .as_mut()
        .unwrap()
        .breaking_changes = Some(packlint_model::BreakingChanges {
        path: "Packs/Covered/ReleaseNotes/2_0_5.json".into(),
        has_entry: true,
    });

    let results = IsBCRNExistValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].message,
        "The release notes contain information about breaking changes but missing a breaking change file, make sure to add one as Packs/MissingFile/ReleaseNotes/2_0_5.json and that the file contains the 'breakingChanges' entry."
    );
}

#[test]
fn invalid_content_type_headers_are_listed_in_order() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "TwoBad",
        "2.0.5",
        Some("#### FakeContentType_1\n##### Item\nFake comment.\n#### FakeContentType_2\n##### Item\nFake comment."),
    );
    add_pack(
        &mut store,
        "OneBad",
        "2.0.5",
        Some("#### FakeContentType_1\n##### Item\nFake comment.\n#### Integrations\n##### Test integration\ntest."),
    );
    add_pack(
        &mut store,
        "AllGood",
        "2.0.5",
        Some("#### Scripts\n##### Test script\ntest.\n#### Integrations\n##### Test integration\ntest."),
    );
    let results = IsValidContentTypeHeaderValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(
        results[0]
            .message
            .contains("The following content type header(s) \"FakeContentType_1, FakeContentType_2\" are invalid.")
    );
    assert!(
        results[1]
            .message
            .contains("The following content type header(s) \"FakeContentType_1\" are invalid.")
    );
}

#[test]
fn release_note_header_validator_reports_types_and_items() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Headers",
        "2.0.5",
        Some("#### Integrations\n##### Not exist content item\nThis is an example\n#### InvalidHeader\n##### playbook A"),
    );
    store.add_item(integration_item("TestIntegration", "demisto/python3:3.9.7.24071"), Some(pack));

    let results = ReleaseNoteHeaderValidator.check(&git_ctx(&store)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].message,
        "The following release note headers are invalid:\nContent types: InvalidHeader\n\nContent items: Integrations: Not exist content item\n\n"
    );
}

#[test]
fn release_note_header_validator_accepts_known_headers() {
    let mut store = ContentStore::new();
    let pack = add_pack(
        &mut store,
        "Headers",
        "2.0.5",
        Some("#### Integrations\n##### TestIntegration\nThis is an example"),
    );
    store.add_item(integration_item("TestIntegration", "demisto/python3:3.9.7.24071"), Some(pack));
    assert!(
        ReleaseNoteHeaderValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn emphasis_wrapped_item_header_breaks_the_format() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "Emphasis",
        "2.0.5",
        Some("#### Integrations\n- **integration-test**\n- Added x y z"),
    );
    let results = IsValidRnHeadersFormatValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].message.contains(
        "Did not find content items headers under the following content types: Integrations."
    ));
}

#[test]
fn indented_item_header_breaks_the_format() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "Indented",
        "2.0.5",
        Some("#### Incident Fields\n    ##### Test\n    - Added x y z"),
    );
    let results = IsValidRnHeadersFormatValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].message.contains("Incident Fields"));
}

#[test]
fn well_formed_item_headers_pass_even_under_unknown_types() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "Ok",
        "2.0.5",
        Some("#### Integrations\n##### integration-test\n- Added x y z"),
    );
    add_pack(
        &mut store,
        "UnknownType",
        "2.0.5",
        Some("#### FakeContentType\n##### Test\n- Added x y z"),
    );
    assert!(
        IsValidRnHeadersFormatValidator
            .check(&git_ctx(&store))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn first_level_header_rules() {
    let mut store = ContentStore::new();
    add_pack(
        &mut store,
        "Full",
        "2.0.5",
        Some("#### Scripts\n##### script_name\n- Some description."),
    );
    add_pack(&mut store, "TypeOnly", "2.0.5", Some("#### Scripts\n- Some description."));
    add_pack(
        &mut store,
        "ItemOnly",
        "2.0.5",
        Some("##### script_name\n- Some description."),
    );
    add_pack(&mut store, "Bullets", "2.0.5", Some("- Some description."));
    add_pack(&mut store, "Forced", "2.0.5", Some("## script_name\n- Some description."));

    let results = FirstLevelHeaderMissingValidator
        .check(&git_ctx(&store))
        .unwrap();
    assert_eq!(results.len(), 2);
    let failing: Vec<&str> = results
        .iter()
        .filter_map(|result| result.path.to_str())
        .collect();
    assert!(failing[0].contains("ItemOnly"));
    assert!(failing[1].contains("Bullets"));
    assert!(
        results[0]
            .message
            .starts_with("The release note is missing a first level header.")
    );
}
