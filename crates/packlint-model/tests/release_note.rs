//! Integration tests for release-note parsing and version ordering.

use packlint_model::release_note::parse_release_note;
use packlint_model::{ContentType, ContentVersion};
use proptest::prelude::{any, proptest};

#[test]
fn parse_render_parse_is_stable() {
    let sources = [
        "#### Integrations\n##### Demisto\n- text.",
        "#### Triggers Recommendations\n##### NGFW Scanning Alerts\n- This trigger is responsible for handling alerts.\n#### Mappers\n##### GitHub Mapper\n- Added an incoming Mapper",
        "Some preamble\n#### Scripts\nsection preamble\n##### script_name\n- one\n- two",
        "##### orphan\n- line\n#### Widgets\n##### w",
    ];
    for source in sources {
        let first = parse_release_note(source);
        let second = parse_release_note(&first.render());
        assert_eq!(first, second, "round trip diverged for {source:?}");
    }
}

#[test]
fn sections_keep_first_seen_order() {
    let doc = parse_release_note(
        "#### FakeContentType_1\n##### A\n- x\n#### Integrations\n##### B\n- y\n#### FakeContentType_2\n##### C\n- z",
    );
    let headers: Vec<&str> = doc.sections.iter().map(|s| s.header.as_str()).collect();
    assert_eq!(
        headers,
        vec!["FakeContentType_1", "Integrations", "FakeContentType_2"]
    );
    assert_eq!(doc.sections[1].content_type, Some(ContentType::Integration));
}

#[test]
fn find_entry_searches_all_sections() {
    let doc = parse_release_note(
        "#### Integration\n##### My Integration\n- Updated the Docker image to: *demisto/python3:3.9.7.24076*.",
    );
    // "Integration" (singular) is not a recognized type header, but the item
    // entry below it is still addressable.
    let entry = doc.find_entry("My Integration").expect("entry exists");
    assert_eq!(entry.lines.len(), 1);
}

proptest! {
    #[test]
    fn version_ordering_matches_tuple_ordering(
        a in any::<(u16, u16, u16)>(),
        b in any::<(u16, u16, u16)>(),
    ) {
        let left = ContentVersion::new(a.0.into(), a.1.into(), a.2.into());
        let right = ContentVersion::new(b.0.into(), b.1.into(), b.2.into());
        assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    #[test]
    fn version_display_round_trips(v in any::<(u16, u16, u16)>()) {
        let version = ContentVersion::new(v.0.into(), v.1.into(), v.2.into());
        let parsed: ContentVersion = version.to_string().parse().unwrap();
        assert_eq!(parsed, version);
    }
}
