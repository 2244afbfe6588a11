mod prompts;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use prompts::prompt_for;

/// Reply language for a single chat turn. Falls back to Japanese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageTag {
    #[default]
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Ja => "ja",
            LanguageTag::En => "en",
            LanguageTag::Zh => "zh",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageTag::Ja => "Japanese",
            LanguageTag::En => "English",
            LanguageTag::Zh => "Chinese",
        }
    }

    /// Parse a wire code such as `"en"`. Anything outside the closed set is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ja" => Some(LanguageTag::Ja),
            "en" => Some(LanguageTag::En),
            "zh" => Some(LanguageTag::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}')
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}')
}

fn is_latin_text_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | '\'' | '"' | '(' | ')' | '-')
}

/// Classify a message by script.
///
/// Kana wins over ideographs since Japanese and Chinese share the ideograph
/// block. The English rule is anchored to the whole string: one character
/// outside the Latin set drops the message to the default.
pub fn detect_language(text: &str) -> LanguageTag {
    if text.chars().any(is_kana) {
        return LanguageTag::Ja;
    }
    if text.chars().any(is_cjk_ideograph) {
        return LanguageTag::Zh;
    }
    if !text.is_empty() && text.chars().all(is_latin_text_char) {
        return LanguageTag::En;
    }
    LanguageTag::default()
}

/// Resolve the reply language: a recognised explicit code is used as-is,
/// anything else falls through to detection.
pub fn select_language(text: &str, explicit: Option<&str>) -> LanguageTag {
    explicit
        .and_then(LanguageTag::from_code)
        .unwrap_or_else(|| detect_language(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_sentence_is_en() {
        assert_eq!(detect_language("I need help with elderly care"), LanguageTag::En);
        assert_eq!(
            detect_language("Hello, is (this) the \"right\" place? Yes - it's fine!"),
            LanguageTag::En
        );
    }

    #[test]
    fn ideographs_without_kana_are_zh() {
        assert_eq!(detect_language("我需要养老院的帮助"), LanguageTag::Zh);
        assert_eq!(detect_language("help 介護"), LanguageTag::Zh);
    }

    #[test]
    fn kana_is_ja_regardless_of_ideographs() {
        assert_eq!(detect_language("母の介護で困っています"), LanguageTag::Ja);
        assert_eq!(detect_language("カタカナ"), LanguageTag::Ja);
        assert_eq!(detect_language("hello ありがとう"), LanguageTag::Ja);
    }

    #[test]
    fn unmatched_input_defaults_to_ja() {
        assert_eq!(detect_language(""), LanguageTag::Ja);
        assert_eq!(detect_language("12345"), LanguageTag::Ja);
        assert_eq!(detect_language("😀😀"), LanguageTag::Ja);
        assert_eq!(detect_language("hello; world"), LanguageTag::Ja);
        assert_eq!(detect_language("Привет"), LanguageTag::Ja);
        assert_eq!(detect_language("room 101"), LanguageTag::Ja);
    }

    #[test]
    fn explicit_language_skips_detection() {
        assert_eq!(select_language("母の介護", Some("en")), LanguageTag::En);
        assert_eq!(select_language("hello", Some("ZH")), LanguageTag::Zh);
        assert_eq!(select_language("hello", None), LanguageTag::En);
    }

    #[test]
    fn unrecognised_explicit_language_falls_back_to_detection() {
        assert_eq!(select_language("hello there", Some("fr")), LanguageTag::En);
        assert_eq!(select_language("我需要帮助", Some("")), LanguageTag::Zh);
    }

    #[test]
    fn tags_serialize_as_wire_codes() {
        assert_eq!(serde_json::to_string(&LanguageTag::Zh).unwrap(), "\"zh\"");
        let tag: LanguageTag = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(tag, LanguageTag::En);
        assert_eq!(LanguageTag::from_code(" ja "), Some(LanguageTag::Ja));
        assert_eq!(LanguageTag::from_code("auto"), None);
    }
}
