//! Locale resolution and talk date/time formatting
//!
//! Language tags coming from `Accept-Language` headers are matched against an
//! explicit lookup table; anything unrecognized falls back to English so a
//! malformed header can never fail a request.

use chrono::{Locale, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
}

/// Primary-subtag lookup table, checked in order
const LANGUAGE_TAGS: &[(&str, Language)] = &[("fr", Language::Fr), ("en", Language::En)];

impl Language {
    pub const DEFAULT: Language = Language::En;

    /// Resolve a language from an `Accept-Language` header value.
    ///
    /// Only the primary subtag of the first listed language is considered
    /// (`"fr-FR,fr;q=0.9"` resolves to `Fr`). Unknown or empty tags resolve
    /// to the default.
    pub fn from_tag(tag: &str) -> Language {
        let primary = tag
            .split(',')
            .next()
            .unwrap_or("")
            .split(|c| c == '-' || c == ';' || c == '_')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        LANGUAGE_TAGS
            .iter()
            .find(|(t, _)| *t == primary)
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::DEFAULT)
    }

    /// Lowercase IETF primary subtag for this language
    pub fn as_tag(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    fn chrono_locale(self) -> Locale {
        match self {
            Language::Fr => Locale::fr_FR,
            Language::En => Locale::en_US,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        LANGUAGE_TAGS
            .iter()
            .find(|(t, _)| *t == s)
            .map(|(_, lang)| *lang)
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown language: {}", s)))
    }
}

/// Format the calendar date of a talk timestamp, e.g.
/// "jeudi 1 juin 2017" (fr) / "Thursday June 1, 2017" (en)
pub fn format_talk_date(dt: NaiveDateTime, lang: Language) -> String {
    let date = dt.date();
    match lang {
        Language::Fr => date
            .format_localized("%A %-d %B %Y", lang.chrono_locale())
            .to_string(),
        Language::En => date
            .format_localized("%A %B %-d, %Y", lang.chrono_locale())
            .to_string(),
    }
}

/// Format the wall-clock time of a talk timestamp, e.g. "9h00" (fr) / "09:00" (en)
pub fn format_talk_time(dt: NaiveDateTime, lang: Language) -> String {
    match lang {
        Language::Fr => dt.format("%-Hh%M").to_string(),
        Language::En => dt.format("%H:%M").to_string(),
    }
}
