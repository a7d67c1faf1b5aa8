//! Release-note markdown parsing.
//!
//! Release notes are semi-structured markdown: `####` headers open a
//! content-type section, `#####` headers open a content-item entry inside the
//! current section, and everything else is bullet/body text. Header detection
//! is strict: a header line must be anchored at column zero. Indented or
//! emphasis-wrapped lookalikes are kept as plain lines so the format rules can
//! flag them instead of silently dropping them.

use crate::content_type::ContentType;

/// Parsed release-note document.
///
/// Unknown first-level headers are still collected (with
/// `content_type: None`) so the invalid-header rules can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RnDocument {
    /// Plain lines that appear before any header.
    pub preamble: Vec<String>,
    /// Second-level entries that appear before any first-level section.
    pub orphan_entries: Vec<RnEntry>,
    pub sections: Vec<RnSection>,
}

/// One `#### <content type>` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnSection {
    /// Header text exactly as written (without the marker).
    pub header: String,
    /// The recognized content type, if the header matches a known one.
    pub content_type: Option<ContentType>,
    /// Plain lines between the section header and its first entry.
    pub preamble: Vec<String>,
    pub entries: Vec<RnEntry>,
}

/// One `##### <content item>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnEntry {
    /// Header text exactly as written (without the marker).
    pub header: String,
    pub lines: Vec<String>,
}

impl RnSection {
    fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            content_type: ContentType::from_rn_header(header.trim()),
            preamble: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl RnEntry {
    fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            lines: Vec::new(),
        }
    }

    /// Header text with surrounding whitespace removed.
    pub fn title(&self) -> &str {
        self.header.trim()
    }
}

impl RnDocument {
    pub fn has_first_level_header(&self) -> bool {
        !self.sections.is_empty()
    }

    /// True when the document carries a force/override template header
    /// (`## <name>`), which exempts it from the first-level-header rule.
    pub fn has_force_header(&self) -> bool {
        self.preamble.iter().any(|line| is_force_header(line))
    }

    /// Find the entry for a content item by its header title, searching all
    /// sections (valid or not) and orphan entries.
    pub fn find_entry(&self, title: &str) -> Option<&RnEntry> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .chain(self.orphan_entries.iter())
            .find(|entry| entry.title() == title)
    }

    /// Render the document back to markdown. Parsing the rendered text
    /// yields a document equal to `self`.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self.preamble.clone();
        for entry in &self.orphan_entries {
            lines.push(format!("##### {}", entry.header));
            lines.extend(entry.lines.iter().cloned());
        }
        for section in &self.sections {
            lines.push(format!("#### {}", section.header));
            lines.extend(section.preamble.iter().cloned());
            for entry in &section.entries {
                lines.push(format!("##### {}", entry.header));
                lines.extend(entry.lines.iter().cloned());
            }
        }
        lines.join("\n")
    }
}

/// Parse raw release-note markdown into its header structure.
pub fn parse_release_note(content: &str) -> RnDocument {
    let mut doc = RnDocument::default();
    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = header_text(line, "##### ") {
            let entry = RnEntry::new(rest);
            match doc.sections.last_mut() {
                Some(section) => section.entries.push(entry),
                None => doc.orphan_entries.push(entry),
            }
        } else if let Some(rest) = header_text(line, "#### ") {
            doc.sections.push(RnSection::new(rest));
        } else if let Some(section) = doc.sections.last_mut() {
            match section.entries.last_mut() {
                Some(entry) => entry.lines.push(line.to_string()),
                None => section.preamble.push(line.to_string()),
            }
        } else if let Some(entry) = doc.orphan_entries.last_mut() {
            entry.lines.push(line.to_string());
        } else {
            doc.preamble.push(line.to_string());
        }
    }
    doc
}

/// A header line must start at column zero and carry exactly the marker's
/// hash count, so `######` never matches the `#####` marker.
fn header_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    Some(rest)
}

fn is_force_header(line: &str) -> bool {
    line.starts_with("## ") && !line.starts_with("###")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_entries_and_bullets() {
        let doc = parse_release_note("#### Integrations\n##### Demisto\n- text.");
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.header, "Integrations");
        assert_eq!(section.content_type, Some(ContentType::Integration));
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].title(), "Demisto");
        assert_eq!(section.entries[0].lines, vec!["- text.".to_string()]);
    }

    #[test]
    fn render_parse_round_trip() {
        let doc = parse_release_note("#### Integrations\n##### Demisto\n- text.");
        let rendered = doc.render();
        assert_eq!(parse_release_note(&rendered), doc);
    }

    #[test]
    fn unknown_type_header_is_collected() {
        let doc = parse_release_note("#### FakeContentType\n##### Item\n- line");
        assert_eq!(doc.sections[0].content_type, None);
        assert_eq!(doc.sections[0].header, "FakeContentType");
    }

    #[test]
    fn indented_item_header_is_plain_text() {
        let doc = parse_release_note("#### Incident Fields\n    ##### Test\n    - Added x y z");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].entries.is_empty());
        assert_eq!(doc.sections[0].preamble.len(), 2);
    }

    #[test]
    fn emphasis_wrapped_header_is_plain_text() {
        let doc = parse_release_note("#### Integrations\n- **integration-test**\n- Added x y z");
        assert!(doc.sections[0].entries.is_empty());
    }

    #[test]
    fn entry_without_section_is_orphan() {
        let doc = parse_release_note("##### script_name\n- Some description.");
        assert!(doc.sections.is_empty());
        assert_eq!(doc.orphan_entries.len(), 1);
        assert_eq!(doc.orphan_entries[0].title(), "script_name");
    }

    #[test]
    fn force_header_is_detected() {
        let doc = parse_release_note("## script_name\n- Some description.");
        assert!(doc.has_force_header());
        assert!(!doc.has_first_level_header());
    }

    #[test]
    fn six_hashes_is_not_an_entry_header() {
        let doc = parse_release_note("#### Scripts\n###### deep header");
        assert!(doc.sections[0].entries.is_empty());
    }
}
