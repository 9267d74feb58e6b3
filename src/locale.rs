//! Supported locales and runtime language preference handling.

use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::error::I18nError;

/// A locale the bundled table provides strings for.
///
/// The set is closed: adding a language means adding a variant here and a
/// `messages/<code>/` folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    #[default]
    En,
    De,
}

impl LocaleCode {
    /// Every supported locale, in selector order.
    pub const ALL: [LocaleCode; 2] = [LocaleCode::En, LocaleCode::De];

    pub fn as_str(self) -> &'static str {
        match self {
            LocaleCode::En => "en",
            LocaleCode::De => "de",
        }
    }

    /// Native name, as shown in a language selector.
    pub fn display_name(self) -> &'static str {
        match self {
            LocaleCode::En => "English",
            LocaleCode::De => "Deutsch",
        }
    }

    /// Maps a runtime language preference (e.g. `"de-DE"`, `"de_AT.UTF-8"`)
    /// to a locale. Only a `de` prefix is recognised; everything else is `en`.
    pub fn from_preference(preference: &str) -> LocaleCode {
        if preference.starts_with("de") {
            LocaleCode::De
        } else {
            LocaleCode::En
        }
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocaleCode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleCode::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| I18nError::UnknownLocale(s.to_string()))
    }
}

/// Reads the language preference reported by the operating system.
pub fn system_preference() -> Option<String> {
    sys_locale::get_locale()
}
