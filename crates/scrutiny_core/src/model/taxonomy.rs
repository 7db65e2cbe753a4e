//! Editorial annotation code taxonomy.
//!
//! Codes are grouped into five categories. Every code inherits its group's
//! display color; the color is copied onto an annotation at creation time.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Display color in `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parses a `#RRGGBB` hex color. Stored uppercase.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        if !HEX_COLOR_RE.is_match(trimmed) {
            return Err(ColorError(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

/// Rejected color literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError(pub String);

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "color must be #RRGGBB hex, got `{}`", self.0)
    }
}

impl Error for ColorError {}

/// Category an annotation code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeGroup {
    Structure,
    Clarity,
    Style,
    Inclusion,
    Accuracy,
}

impl CodeGroup {
    /// All groups in toolbar order.
    pub const ALL: [CodeGroup; 5] = [
        Self::Structure,
        Self::Clarity,
        Self::Style,
        Self::Inclusion,
        Self::Accuracy,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Structure => "Structure & Flow",
            Self::Clarity => "Clarity & Precision",
            Self::Style => "Style & Tone",
            Self::Inclusion => "Inclusion & Impact",
            Self::Accuracy => "Accuracy & Evidence",
        }
    }

    /// Hex literal for this group's color.
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Structure => "#4A90E2",
            Self::Clarity => "#50E3C2",
            Self::Style => "#F5A623",
            Self::Inclusion => "#BD10E0",
            Self::Accuracy => "#D0021B",
        }
    }

    pub fn color(self) -> Color {
        // Group literals are uppercase #RRGGBB constants.
        Color(self.color_hex().to_string())
    }

    /// Codes in this group, in toolbar order.
    pub fn codes(self) -> impl Iterator<Item = &'static CodeEntry> {
        CODES.iter().filter(move |entry| entry.group == self)
    }
}

/// One selectable annotation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub code: &'static str,
    pub description: &'static str,
    pub group: CodeGroup,
}

impl CodeEntry {
    pub fn color(&self) -> Color {
        self.group.color()
    }
}

const fn entry(code: &'static str, description: &'static str, group: CodeGroup) -> CodeEntry {
    CodeEntry {
        code,
        description,
        group,
    }
}

const CODES: &[CodeEntry] = &[
    entry("LEDE", "Lead with the main point", CodeGroup::Structure),
    entry("FLOW", "Improve logical flow", CodeGroup::Structure),
    entry("SPFIC", "Make more specific", CodeGroup::Structure),
    entry("WALL", "Break up text wall", CodeGroup::Structure),
    entry("CLEAR", "Clarify meaning", CodeGroup::Clarity),
    entry("AMBIG", "Remove ambiguity", CodeGroup::Clarity),
    entry("TERM", "Define technical terms", CodeGroup::Clarity),
    entry("DIR", "Use direct language", CodeGroup::Clarity),
    entry("TONE", "Adjust tone", CodeGroup::Style),
    entry("BRAND", "Match brand voice", CodeGroup::Style),
    entry("COLOR", "Add energy", CodeGroup::Style),
    entry("FRESH", "Avoid clich\u{e9}s", CodeGroup::Style),
    entry("INCL", "Use inclusive language", CodeGroup::Inclusion),
    entry("EMPATH", "Consider audience", CodeGroup::Inclusion),
    entry("WIIFM", "Highlight benefits", CodeGroup::Inclusion),
    entry("A11Y", "Improve accessibility", CodeGroup::Inclusion),
    entry("FACT", "Support with evidence", CodeGroup::Accuracy),
    entry("EXMPL", "Add examples", CodeGroup::Accuracy),
    entry("QUOTE", "Include expert quotes", CodeGroup::Accuracy),
    entry("HYPER", "Avoid hyperbole", CodeGroup::Accuracy),
];

/// Returns the toolbar groups in display order.
pub fn groups() -> &'static [CodeGroup] {
    &CodeGroup::ALL
}

/// Returns every known code in toolbar order.
pub fn all_codes() -> &'static [CodeEntry] {
    CODES
}

/// Looks up one code by its exact tag (case-sensitive, surrounding
/// whitespace ignored).
pub fn find_code(code: &str) -> Option<&'static CodeEntry> {
    let normalized = code.trim();
    CODES.iter().find(|entry| entry.code == normalized)
}

#[cfg(test)]
mod tests {
    use super::{all_codes, find_code, groups, CodeGroup, Color};

    #[test]
    fn every_group_has_four_codes() {
        assert_eq!(groups().len(), 5);
        for group in groups().iter().copied() {
            assert_eq!(group.codes().count(), 4, "group {group:?}");
        }
        assert_eq!(all_codes().len(), 20);
    }

    #[test]
    fn find_code_inherits_group_color() {
        let flow = find_code("FLOW").expect("FLOW is a structure code");
        assert_eq!(flow.description, "Improve logical flow");
        assert_eq!(flow.color().as_str(), "#4A90E2");

        let fact = find_code(" FACT ").expect("surrounding whitespace is ignored");
        assert_eq!(fact.group, CodeGroup::Accuracy);
    }

    #[test]
    fn find_code_is_case_sensitive() {
        assert!(find_code("flow").is_none());
        assert!(find_code("").is_none());
    }

    #[test]
    fn color_parse_normalizes_and_rejects_garbage() {
        assert_eq!(
            Color::parse("#ff4444").expect("lowercase hex parses").as_str(),
            "#FF4444"
        );
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn group_color_literals_are_valid() {
        for group in CodeGroup::ALL {
            assert_eq!(
                Color::parse(group.color_hex()).expect("valid literal"),
                group.color()
            );
        }
    }
}
