use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed tagged union of every content entity kind the validator knows.
///
/// Classification into one of these variants happens once, at construction
/// time; everything downstream (rule dispatch, release-note header matching)
/// works on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Integration,
    Script,
    Playbook,
    Trigger,
    Classifier,
    Mapper,
    Layout,
    LayoutsContainer,
    IncidentField,
    IncidentType,
    IndicatorField,
    Reputation,
    GenericField,
    GenericType,
    GenericModule,
    GenericDefinition,
    Dashboard,
    Widget,
    Report,
    Connection,
    Image,
    AuthorImage,
    ReleaseNote,
    Pack,
}

impl ContentType {
    /// Every variant, in declaration order.
    pub const ALL: &'static [ContentType] = &[
        ContentType::Integration,
        ContentType::Script,
        ContentType::Playbook,
        ContentType::Trigger,
        ContentType::Classifier,
        ContentType::Mapper,
        ContentType::Layout,
        ContentType::LayoutsContainer,
        ContentType::IncidentField,
        ContentType::IncidentType,
        ContentType::IndicatorField,
        ContentType::Reputation,
        ContentType::GenericField,
        ContentType::GenericType,
        ContentType::GenericModule,
        ContentType::GenericDefinition,
        ContentType::Dashboard,
        ContentType::Widget,
        ContentType::Report,
        ContentType::Connection,
        ContentType::Image,
        ContentType::AuthorImage,
        ContentType::ReleaseNote,
        ContentType::Pack,
    ];

    /// The variants that represent standalone content items (everything the
    /// per-item rules can apply to, i.e. excluding packaging artifacts).
    pub const ITEM_TYPES: &'static [ContentType] = &[
        ContentType::Integration,
        ContentType::Script,
        ContentType::Playbook,
        ContentType::Trigger,
        ContentType::Classifier,
        ContentType::Mapper,
        ContentType::Layout,
        ContentType::LayoutsContainer,
        ContentType::IncidentField,
        ContentType::IncidentType,
        ContentType::IndicatorField,
        ContentType::Reputation,
        ContentType::GenericField,
        ContentType::GenericType,
        ContentType::GenericModule,
        ContentType::GenericDefinition,
        ContentType::Dashboard,
        ContentType::Widget,
        ContentType::Report,
        ContentType::Connection,
    ];

    /// Lowercase tag used in logs and serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Integration => "integration",
            ContentType::Script => "script",
            ContentType::Playbook => "playbook",
            ContentType::Trigger => "trigger",
            ContentType::Classifier => "classifier",
            ContentType::Mapper => "mapper",
            ContentType::Layout => "layout",
            ContentType::LayoutsContainer => "layoutscontainer",
            ContentType::IncidentField => "incidentfield",
            ContentType::IncidentType => "incidenttype",
            ContentType::IndicatorField => "indicatorfield",
            ContentType::Reputation => "reputation",
            ContentType::GenericField => "genericfield",
            ContentType::GenericType => "generictype",
            ContentType::GenericModule => "genericmodule",
            ContentType::GenericDefinition => "genericdefinition",
            ContentType::Dashboard => "dashboard",
            ContentType::Widget => "widget",
            ContentType::Report => "report",
            ContentType::Connection => "connection",
            ContentType::Image => "image",
            ContentType::AuthorImage => "author_image",
            ContentType::ReleaseNote => "releasenote",
            ContentType::Pack => "pack",
        }
    }

    /// The first-level header this content type appears under in a release
    /// note, or `None` for kinds that never show up there.
    pub fn rn_header(&self) -> Option<&'static str> {
        match self {
            ContentType::Integration => Some("Integrations"),
            ContentType::Script => Some("Scripts"),
            ContentType::Playbook => Some("Playbooks"),
            ContentType::Trigger => Some("Triggers Recommendations"),
            ContentType::Classifier => Some("Classifiers"),
            ContentType::Mapper => Some("Mappers"),
            ContentType::Layout | ContentType::LayoutsContainer => Some("Layouts"),
            ContentType::IncidentField => Some("Incident Fields"),
            ContentType::IncidentType => Some("Incident Types"),
            ContentType::IndicatorField => Some("Indicator Fields"),
            ContentType::Reputation => Some("Indicator Types"),
            ContentType::GenericField => Some("Object Fields"),
            ContentType::GenericType => Some("Object Types"),
            ContentType::GenericModule => Some("Modules"),
            ContentType::GenericDefinition => Some("Objects"),
            ContentType::Dashboard => Some("Dashboards"),
            ContentType::Widget => Some("Widgets"),
            ContentType::Report => Some("Reports"),
            ContentType::Connection => Some("Connections"),
            ContentType::Image
            | ContentType::AuthorImage
            | ContentType::ReleaseNote
            | ContentType::Pack => None,
        }
    }

    /// Resolve a release-note first-level header back to a content type.
    ///
    /// Unrecognized headers resolve to `None`; callers keep the raw header
    /// around so the invalid-header rules can report it.
    pub fn from_rn_header(header: &str) -> Option<ContentType> {
        ContentType::ALL
            .iter()
            .copied()
            .find(|content_type| content_type.rn_header() == Some(header))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
