use std::fmt;

/// Errors raised by the localization store.
///
/// Lookups and UI writes never fail; these only surface from locale
/// switching, storage and table loading.
#[derive(Debug)]
pub enum I18nError {
    /// A locale code outside the supported set was requested.
    UnknownLocale(String),
    /// The persisted locale could not be written.
    Storage(std::io::Error),
    /// Bundled or persisted data could not be parsed.
    Parse(String),
    /// Two locales do not share the same key set.
    KeySetMismatch {
        locale: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(code) => write!(f, "unknown locale: '{code}'"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::KeySetMismatch { locale, missing, extra } => {
                write!(
                    f,
                    "locale '{locale}' diverges from the reference key set (missing: [{}], extra: [{}])",
                    missing.join(", "),
                    extra.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for I18nError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err)
    }
}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
