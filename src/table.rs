//! The canonical translation table.
//!
//! Strings are bundled at build time from `messages/<locale>/*.json`; each
//! locale ends up as one flat key -> text map.

use std::collections::{ BTreeMap, BTreeSet, HashMap };

use bevy::log::{ error, warn };

use crate::error::I18nError;
use crate::locale::LocaleCode;

/// Flat key -> display text map of a single locale.
pub type LocaleStrings = HashMap<String, String>;

/// Immutable mapping from locale to its strings.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    locales: HashMap<LocaleCode, LocaleStrings>,
}

// Generated by build.rs
const BUNDLED_TRANSLATIONS: &str = include_str!(concat!(env!("OUT_DIR"), "/all_translations.json"));

impl TranslationTable {
    /// An empty table. Every lookup falls back to the key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table compiled into the binary.
    pub fn bundled() -> Result<Self, I18nError> {
        Self::from_json(BUNDLED_TRANSLATIONS)
    }

    /// The bundled table after a key-set consistency check.
    ///
    /// Divergent locales panic in debug builds and are logged in release
    /// builds. Bundled data that fails to parse yields an empty table.
    pub fn canonical() -> Self {
        Self::bundled()
            .unwrap_or_else(|e| {
                error!("Failed to load bundled translations: {}", e);
                Self::new()
            })
            .ensure_consistent()
    }

    /// Passes the table through if [`Self::validate`] succeeds. Otherwise
    /// panics in debug builds and logs the divergence in release builds.
    pub fn ensure_consistent(self) -> Self {
        if let Err(e) = self.validate() {
            if cfg!(debug_assertions) {
                panic!("Inconsistent translation table: {e}");
            }
            error!("Inconsistent translation table: {}", e);
        }
        self
    }

    /// Parses `{ "<locale>": { "<key>": "<text>", ... }, ... }`.
    ///
    /// Locales outside [`LocaleCode::ALL`] are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        let raw: BTreeMap<String, LocaleStrings> = serde_json::from_str(json)?;
        let mut table = Self::new();

        for (code, strings) in raw {
            match code.parse::<LocaleCode>() {
                Ok(locale) => table.add_locale(locale, strings),
                Err(_) => warn!("Skipping translations for unsupported locale '{}'", code),
            }
        }

        Ok(table)
    }

    /// Adds (or replaces) the strings of one locale.
    pub fn add_locale(&mut self, locale: LocaleCode, strings: LocaleStrings) {
        self.locales.insert(locale, strings);
    }

    /// Text for `key`. An empty entry counts as missing.
    pub fn get(&self, locale: LocaleCode, key: &str) -> Option<&str> {
        self.locales
            .get(&locale)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Whether any strings were loaded for `locale`.
    pub fn has_locale(&self, locale: LocaleCode) -> bool {
        self.locales.contains_key(&locale)
    }

    /// Sorted keys of one locale.
    pub fn keys(&self, locale: LocaleCode) -> Vec<&str> {
        let mut keys: Vec<&str> = self.locales
            .get(&locale)
            .map(|strings| strings.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Checks that every supported locale carries exactly the key set of
    /// the first one. A locale with no strings at all counts as empty.
    pub fn validate(&self) -> Result<(), I18nError> {
        let [reference, rest @ ..] = LocaleCode::ALL;
        let reference_keys = self.key_set(reference);

        for locale in rest {
            let keys = self.key_set(locale);
            if keys != reference_keys {
                return Err(I18nError::KeySetMismatch {
                    locale: locale.to_string(),
                    missing: reference_keys.difference(&keys).map(|k| k.to_string()).collect(),
                    extra: keys.difference(&reference_keys).map(|k| k.to_string()).collect(),
                });
            }
        }

        Ok(())
    }

    fn key_set(&self, locale: LocaleCode) -> BTreeSet<&str> {
        self.locales
            .get(&locale)
            .map(|strings| strings.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(pairs: &[(&str, &str)]) -> LocaleStrings {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn bundled_table_has_both_locales() {
        let table = TranslationTable::bundled().unwrap();
        assert!(table.has_locale(LocaleCode::En));
        assert!(table.has_locale(LocaleCode::De));
        assert_eq!(table.get(LocaleCode::En, "search"), Some("Search"));
        assert_eq!(table.get(LocaleCode::De, "search"), Some("Suchen"));
    }

    #[test]
    fn bundled_table_is_consistent() {
        let table = TranslationTable::bundled().unwrap();
        table.validate().unwrap();
        assert_eq!(table.keys(LocaleCode::En), table.keys(LocaleCode::De));
    }

    #[test]
    fn bundled_table_merges_all_message_files() {
        let table = TranslationTable::bundled().unwrap();
        assert_eq!(table.get(LocaleCode::De, "header_exchange"), Some("Börse"));
        assert_eq!(table.get(LocaleCode::En, "no_results"), Some("No results found"));
        assert_eq!(table.get(LocaleCode::De, "language"), Some("Sprache:"));
    }

    #[test]
    fn canonical_table_matches_bundled_data() {
        let table = TranslationTable::canonical();
        assert_eq!(table.keys(LocaleCode::En), TranslationTable::bundled().unwrap().keys(LocaleCode::En));
    }

    #[test]
    fn ensure_consistent_accepts_matching_locales() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("search", "Search")]));
        table.add_locale(LocaleCode::De, strings(&[("search", "Suchen")]));
        assert_eq!(table.ensure_consistent().get(LocaleCode::De, "search"), Some("Suchen"));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "Inconsistent translation table")]
    fn ensure_consistent_panics_on_divergent_locales() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("title", "Stock Filter"), ("search", "Search")]));
        table.add_locale(LocaleCode::De, strings(&[("title", "Aktienfilter")]));
        table.ensure_consistent();
    }

    #[test]
    fn empty_entries_count_as_missing() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("title", ""), ("search", "Search")]));
        assert_eq!(table.get(LocaleCode::En, "title"), None);
        assert_eq!(table.get(LocaleCode::En, "search"), Some("Search"));
    }

    #[test]
    fn from_json_skips_unsupported_locales() {
        let table = TranslationTable::from_json(
            r#"{ "en": { "title": "Stock Filter" }, "fr": { "title": "Filtre" } }"#
        ).unwrap();
        assert!(table.has_locale(LocaleCode::En));
        assert!(!table.has_locale(LocaleCode::De));
        assert_eq!(table.get(LocaleCode::En, "title"), Some("Stock Filter"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = TranslationTable::from_json("{ \"en\": [] }").unwrap_err();
        assert!(matches!(err, I18nError::Parse(_)));
    }

    #[test]
    fn validate_ignores_key_order() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("header_name", "Name"), ("header_isin", "ISIN")]));
        table.add_locale(LocaleCode::De, strings(&[("header_isin", "ISIN"), ("header_name", "Firmenname")]));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn validate_reports_divergent_keys() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("title", "Stock Filter"), ("search", "Search")]));
        table.add_locale(LocaleCode::De, strings(&[("title", "Aktienfilter"), ("export_csv", "CSV exportieren")]));

        match table.validate() {
            Err(I18nError::KeySetMismatch { locale, missing, extra }) => {
                assert_eq!(locale, "de");
                assert_eq!(missing, vec!["search".to_string()]);
                assert_eq!(extra, vec!["export_csv".to_string()]);
            }
            other => panic!("expected key set mismatch, got {:?}", other),
        }
    }

    #[test]
    fn validate_treats_missing_locale_as_empty() {
        let mut table = TranslationTable::new();
        table.add_locale(LocaleCode::En, strings(&[("title", "Stock Filter")]));
        assert!(table.validate().is_err());
        assert!(TranslationTable::new().validate().is_ok());
    }
}
