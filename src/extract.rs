use crate::results::StaffRecord;
use regex::Regex;

/// A single named extraction pattern with one capture group
///
/// Rules are dot-all and non-greedy so a marker and its value may sit on
/// different lines. Only the first match in a document counts.
#[derive(Debug)]
pub struct FieldRule {
    label: &'static str,
    pattern: Regex,
}

impl FieldRule {
    fn new(label: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            label,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Capture this rule's group from the first match, trimmed
    pub fn capture(&self, content: &str) -> Option<String> {
        let value = self
            .pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        if value.is_none() {
            ::log::debug!("no match for field: {}", self.label);
        }

        value
    }
}

/// Extracts name, room and office-hours fields from a detail page
pub struct RecordExtractor {
    name: FieldRule,
    room: FieldRule,
    office_hours: FieldRule,
}

impl RecordExtractor {
    /// Build the extractor with its three field rules
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // The detail pages carry the name as
            //   <h1 class="value"><span class="text">NAME</span>
            name: FieldRule::new(
                "name",
                r#"(?s)<h1 class="value">\s*<span class="text">(.*?)</span>"#,
            )?,
            // Room and office hours each live in their own marked <div>:
            //   <div class="field Raum"> ... <span class="text">VALUE</span>
            room: FieldRule::new(
                "room",
                r#"(?s)field Raum".*?<span class="text">(.*?)</span>"#,
            )?,
            office_hours: FieldRule::new(
                "office_hours",
                r#"(?s)field SprStunde".*?<span class="text">(.*?)</span>"#,
            )?,
        })
    }

    /// Run all three field rules against a detail page
    ///
    /// The rules are independent; a miss leaves its field `None` and the
    /// others untouched. Total over arbitrary input, including empty pages.
    pub fn extract(&self, detail_page: &str) -> StaffRecord {
        StaffRecord {
            name: self.name.capture(detail_page),
            room: self.room.capture(detail_page),
            office_hours: self.office_hours.capture(detail_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RecordExtractor {
        RecordExtractor::new().expect("patterns should compile")
    }

    #[test]
    fn test_extracts_all_fields() {
        let page = r#"
            <h1 class="value">
                <span class="text">Anna Muster</span>
            </h1>
            <div class="field Raum">
                <span class="label">Raum</span>
                <span class="text">204</span>
            </div>
            <div class="field SprStunde">
                <span class="label">Sprechstunde</span>
                <span class="text">Mo 10:00-11:00</span>
            </div>
        "#;
        let record = extractor().extract(page);

        assert_eq!(record.name.as_deref(), Some("Anna Muster"));
        assert_eq!(record.room.as_deref(), Some("204"));
        assert_eq!(record.office_hours.as_deref(), Some("Mo 10:00-11:00"));
        assert!(!record.is_empty());
    }

    #[test]
    fn test_fields_are_independent() {
        // Name only: the other rules miss without affecting it
        let page = r#"<h1 class="value"><span class="text">Anna Muster</span></h1>"#;
        let record = extractor().extract(page);

        assert_eq!(record.name.as_deref(), Some("Anna Muster"));
        assert_eq!(record.room, None);
        assert_eq!(record.office_hours, None);
    }

    #[test]
    fn test_room_without_office_hours() {
        let page = concat!(
            r#"<h1 class="value"><span class="text">Anna Muster</span>"#,
            r#"<div class="field Raum"><span class="text">204</span>"#,
        );
        let record = extractor().extract(page);

        assert_eq!(record.name.as_deref(), Some("Anna Muster"));
        assert_eq!(record.room.as_deref(), Some("204"));
        assert_eq!(record.office_hours, None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let page = "<h1 class=\"value\"><span class=\"text\">\n  Anna Muster \t\n</span>";
        let record = extractor().extract(page);
        assert_eq!(record.name.as_deref(), Some("Anna Muster"));
    }

    #[test]
    fn test_matched_but_blank_stays_present() {
        let page = r#"<div class="field Raum"><span class="text">  </span>"#;
        let record = extractor().extract(page);
        // Found-but-blank is distinct from not found
        assert_eq!(record.room.as_deref(), Some(""));
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let page = r#"
            <h1 class="value"><span class="text">First</span></h1>
            <h1 class="value"><span class="text">Second</span></h1>
        "#;
        let record = extractor().extract(page);
        assert_eq!(record.name.as_deref(), Some("First"));
    }

    #[test]
    fn test_non_greedy_across_lines() {
        // The marker and the value span multiple lines with other markup
        // in between; the non-greedy dot-all match must stop at the first
        // closing span
        let page = "<div class=\"field Raum\">\n<span class=\"icon\"></span>\n<span class=\"text\">B12</span>\n<span class=\"text\">not this</span>";
        let record = extractor().extract(page);
        assert_eq!(record.room.as_deref(), Some("B12"));
    }

    #[test]
    fn test_empty_input_yields_absent_fields() {
        let record = extractor().extract("");
        assert!(record.is_empty());
    }

    #[test]
    fn test_garbage_input_never_fails() {
        let record = extractor().extract("<<<>>>\"\"\u{0}span class=");
        assert!(record.is_empty());
    }

    #[test]
    fn test_extract_is_pure() {
        let page = r#"<h1 class="value"><span class="text">Anna</span>"#;
        let extractor = extractor();
        assert_eq!(extractor.extract(page), extractor.extract(page));
    }
}
