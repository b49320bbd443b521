use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names read as the story title. Every non-empty alias contributes, in this order.
const TITLE_FIELDS: &[&str] = &["storyTitle", "story_title", "title"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "storyDescription", "story_description"];
const CASE_FOR_CHANGE_FIELDS: &[&str] = &["caseForChange", "case_for_change"];

/// A story submission: an open mapping of named text fields.
///
/// Absent and non-string fields read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(Map<String, Value>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for callers assembling a submission in code.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.0.insert(field.to_string(), Value::String(value.into()));
        self
    }

    /// The string value of `name`, or `""` when absent or not a string.
    pub fn field(&self, name: &str) -> &str {
        self.0.get(name).and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Non-empty string fields, in key order.
    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(k, v)| {
            v.as_str()
                .filter(|s| !s.trim().is_empty())
                .map(|s| (k.as_str(), s))
        })
    }

    pub fn is_blank(&self) -> bool {
        self.text_fields().next().is_none()
    }

    pub fn title(&self) -> String {
        self.joined(TITLE_FIELDS)
    }

    pub fn description(&self) -> String {
        self.joined(DESCRIPTION_FIELDS)
    }

    pub fn case_for_change(&self) -> String {
        self.joined(CASE_FOR_CHANGE_FIELDS)
    }

    /// Lower-cased title and description: the text theme triggers are checked against.
    pub fn theme_text(&self) -> String {
        join_lowercase(&[&self.title(), &self.description()])
    }

    /// Lower-cased title, description and case for change: the text keywords
    /// and key topics are matched against.
    pub fn relevant_text(&self) -> String {
        join_lowercase(&[&self.title(), &self.description(), &self.case_for_change()])
    }

    /// Non-empty values of `names`, trimmed and space-joined.
    fn joined(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|n| self.field(n).trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Map<String, Value>> for Submission {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn join_lowercase(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_field_is_empty() {
        let s = Submission::new().with("storyTitle", "Flare reduction");
        assert_eq!(s.field("description"), "");
        assert_eq!(s.case_for_change(), "");
    }

    #[test]
    fn test_non_string_field_is_empty() {
        let s: Submission = serde_json::from_value(json!({
            "storyTitle": 42,
            "description": null,
            "tags": ["a"]
        }))
        .unwrap();
        assert_eq!(s.title(), "");
        assert_eq!(s.description(), "");
        assert!(s.is_blank());
    }

    #[test]
    fn test_title_aliases() {
        let camel = Submission::new().with("storyTitle", "A");
        let snake = Submission::new().with("story_title", "B");
        let plain = Submission::new().with("title", "C");
        assert_eq!(camel.title(), "A");
        assert_eq!(snake.title(), "B");
        assert_eq!(plain.title(), "C");
    }

    #[test]
    fn test_all_title_aliases_are_joined() {
        let s = Submission::new()
            .with("storyTitle", "Platform upgrade")
            .with("title", " Flaring reduction ")
            .with("description", "Compressor retrofit")
            .with("story_description", "Phase two");
        assert_eq!(s.title(), "Platform upgrade Flaring reduction");
        assert_eq!(
            s.theme_text(),
            "platform upgrade flaring reduction compressor retrofit phase two"
        );
    }

    #[test]
    fn test_theme_text_excludes_case_for_change() {
        let s = Submission::new()
            .with("storyTitle", "Major Cost Savings")
            .with("caseForChange", "Flaring was high");
        assert_eq!(s.theme_text(), "major cost savings");
        assert_eq!(s.relevant_text(), "major cost savings flaring was high");
    }

    #[test]
    fn test_relevant_text_skips_empty_parts() {
        let s = Submission::new()
            .with("description", "  ")
            .with("caseForChange", "Budget overrun");
        assert_eq!(s.relevant_text(), "budget overrun");
    }

    #[test]
    fn test_text_fields_skip_blank_values() {
        let s = Submission::new()
            .with("impact", "RM2 Mil saved")
            .with("notes", "");
        let fields: Vec<_> = s.text_fields().collect();
        assert_eq!(fields, vec![("impact", "RM2 Mil saved")]);
    }
}
