//! The localization store: active locale, lookups and applying bindings.

use bevy::log::{ debug, info, warn };

use crate::binding::{ DEFAULT_BINDINGS, UiBinding, UiTree };
use crate::error::I18nError;
use crate::locale::LocaleCode;
use crate::results::{ ResultSet, ResultViews };
use crate::storage::{ LANG_KEY, LocaleStorage };
use crate::table::TranslationTable;

/// Transient UI state some bindings depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    /// Whether the search criteria panel is collapsed.
    pub criteria_collapsed: bool,
    /// Results currently on screen, if any.
    pub results: Option<&'a ResultSet>,
}

/// Outcome of one [`LocalizationStore::apply_to_ui`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub written: usize,
    /// Bindings whose target was not present.
    pub skipped: usize,
    /// Whether result views were redrawn.
    pub results_refreshed: bool,
}

/// Lookups in one locale, handed to code that renders localized views.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    table: &'a TranslationTable,
    locale: LocaleCode,
}

impl<'a> Translator<'a> {
    pub fn new(table: &'a TranslationTable, locale: LocaleCode) -> Self {
        Self { table, locale }
    }

    pub fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Text for `key`, or `key` itself when the locale has no entry.
    pub fn t<'s>(&'s self, key: &'s str) -> &'s str {
        self.table.get(self.locale, key).unwrap_or(key)
    }

    /// Column caption for a result field, looked up as `header_<field>`.
    pub fn column_header(&self, field: &str) -> String {
        let key = format!("header_{field}");
        match self.table.get(self.locale, &key) {
            Some(text) => text.to_string(),
            None => key,
        }
    }
}

/// Holds the translation table and the active locale, and keeps the
/// persisted copy of the locale in sync.
///
/// A store is always initialized: construction reads the persisted locale
/// (or derives one from the language preference) and persists the result.
pub struct LocalizationStore {
    table: TranslationTable,
    active: LocaleCode,
    storage: Box<dyn LocaleStorage>,
    bindings: Vec<UiBinding>,
}

impl LocalizationStore {
    /// Resolves the initial locale: the persisted one if valid, otherwise
    /// the one matching `preference` (`en` when there is none).
    pub fn init(table: TranslationTable, storage: impl LocaleStorage, preference: Option<&str>) -> Self {
        let mut storage: Box<dyn LocaleStorage> = Box::new(storage);

        let persisted = storage.load(LANG_KEY).and_then(|code| match code.parse::<LocaleCode>() {
            Ok(locale) => Some(locale),
            Err(e) => {
                warn!("Ignoring persisted locale: {}", e);
                None
            }
        });

        let active = match persisted {
            Some(locale) => {
                debug!("Using persisted locale '{}'", locale);
                locale
            }
            None => {
                let locale = preference.map(LocaleCode::from_preference).unwrap_or_default();
                info!("No persisted locale, resolved '{}' from preference {:?}", locale, preference);
                if let Err(e) = storage.store(LANG_KEY, locale.as_str()) {
                    warn!("Failed to persist locale '{}': {}", locale, e);
                }
                locale
            }
        };

        Self {
            table,
            active,
            storage,
            bindings: DEFAULT_BINDINGS.to_vec(),
        }
    }

    /// Replaces the binding table applied by [`Self::apply_to_ui`].
    pub fn with_bindings(mut self, bindings: Vec<UiBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &[UiBinding] {
        &self.bindings
    }

    pub fn storage(&self) -> &dyn LocaleStorage {
        self.storage.as_ref()
    }

    /// Text for `key` in `locale`, or `key` verbatim when missing.
    pub fn resolve<'a>(&'a self, locale: LocaleCode, key: &'a str) -> &'a str {
        self.table.get(locale, key).unwrap_or(key)
    }

    /// [`Self::resolve`] in the active locale.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.resolve(self.active, key)
    }

    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.table, self.active)
    }

    pub fn current_locale(&self) -> LocaleCode {
        self.active
    }

    /// Makes `code` the active locale and persists it.
    ///
    /// Unknown codes are rejected and the current locale is kept. A failed
    /// write is logged; the in-memory locale still changes.
    pub fn set_locale(&mut self, code: &str) -> Result<LocaleCode, I18nError> {
        let locale = code.parse::<LocaleCode>().inspect_err(|e| {
            warn!("Locale switch rejected, keeping '{}': {}", self.active, e);
        })?;

        self.active = locale;
        if let Err(e) = self.storage.store(LANG_KEY, locale.as_str()) {
            warn!("Failed to persist locale '{}': {}", locale, e);
        }
        info!("Active locale is now '{}'", locale);
        Ok(locale)
    }

    /// [`Self::set_locale`] followed by [`Self::apply_to_ui`].
    pub fn switch_locale(
        &mut self,
        code: &str,
        ui: &mut impl UiTree,
        view: &ViewState<'_>,
        result_views: &mut ResultViews,
    ) -> Result<LocaleCode, I18nError> {
        let locale = self.set_locale(code)?;
        self.apply_to_ui(ui, view, result_views);
        Ok(locale)
    }

    /// Writes every binding's text into the UI, then redraws result views
    /// when results are on screen.
    pub fn apply_to_ui(
        &self,
        ui: &mut impl UiTree,
        view: &ViewState<'_>,
        result_views: &mut ResultViews,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for binding in &self.bindings {
            let key = binding.key.select(view.criteria_collapsed);
            if ui.write(binding.target, binding.property, self.t(key)) {
                report.written += 1;
            } else {
                report.skipped += 1;
            }
        }

        report.results_refreshed = result_views.refresh(view.results, &self.translator());

        debug!(
            "Applied '{}' to UI: {} written, {} skipped, results refreshed: {}",
            self.active,
            report.written,
            report.skipped,
            report.results_refreshed
        );
        report
    }
}
