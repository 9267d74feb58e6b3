#![doc = include_str!("../README.md")]

//! # stock-filter-i18n
//!
//! Localization store for the Stock Filter UI, packaged as a [Bevy](https://bevyengine.org/) plugin:
//!
//! - **Bundled strings**: `messages/<locale>/*.json` merged per locale at build time
//! - **Persisted locale**: the active locale is stored under `"lang"` and restored on start
//! - **Preference detection**: first start picks `de` for German-speaking systems, `en` otherwise
//! - **Declarative bindings**: a table of (target, key, property) drives every UI write
//! - **Key fallback**: a missing translation shows its key instead of failing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use stock_filter_i18n::{ I18nPlugin, SwitchLocale, UiTarget };
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(I18nPlugin::default())
//!         .add_systems(Startup, setup_ui)
//!         .run();
//! }
//!
//! fn setup_ui(mut commands: Commands) {
//!     // Filled in by the store once the UI is ready
//!     commands.spawn((Text::default(), UiTarget::new("searchButtonText")));
//! }
//!
//! fn on_language_selected(mut switch: MessageWriter<SwitchLocale>) {
//!     switch.write(SwitchLocale::new("de"));
//! }
//! ```

use std::path::PathBuf;

use bevy::prelude::*;

pub mod binding;
pub mod error;
pub mod locale;
pub mod markup;
pub mod results;
pub mod storage;
pub mod store;
pub mod systems;
pub mod table;

pub use binding::{ DEFAULT_BINDINGS, KeySelector, UiBinding, UiProperty, UiTree };
pub use error::I18nError;
pub use locale::LocaleCode;
pub use results::{ ResultCountView, ResultRow, ResultSet, ResultViews, TableView };
pub use storage::{ FileStorage, LANG_KEY, LocaleStorage, MemoryStorage };
pub use store::{ ApplyReport, LocalizationStore, Translator, ViewState };
pub use systems::{
    CriteriaPanel,
    DisplayedResults,
    I18nSystems,
    LocaleChanged,
    Placeholder,
    SwitchLocale,
    UiTarget,
};
pub use table::TranslationTable;

/// Where the active locale is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// A JSON settings file.
    File(PathBuf),
    /// Kept in memory only; every start resolves the locale afresh.
    Memory,
}

/// Configuration for the I18n plugin.
///
/// # Example
///
/// ```rust
/// use stock_filter_i18n::{ I18nConfig, StorageBackend };
///
/// let config = I18nConfig {
///     storage: StorageBackend::File("config/settings.json".into()),
///     preferred_language: Some("de-AT".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Resource)]
pub struct I18nConfig {
    /// Persistence of the `"lang"` pair.
    /// Default: `settings.json` in the working directory
    pub storage: StorageBackend,
    /// Language preference used when nothing is persisted.
    /// Default: `None`, meaning the operating system locale
    pub preferred_language: Option<String>,
    /// Bindings applied to [`UiTarget`] entities.
    /// Default: [`DEFAULT_BINDINGS`]
    pub bindings: Vec<UiBinding>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File(PathBuf::from("settings.json")),
            preferred_language: None,
            bindings: DEFAULT_BINDINGS.to_vec(),
        }
    }
}

// ---------- Bevy Plugin ----------

/// Main plugin for the localization store.
///
/// Loads the bundled table, restores the persisted locale, localizes
/// [`UiTarget`] entities after startup and handles [`SwitchLocale`] requests.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use stock_filter_i18n::{ I18nPlugin, I18nConfig, StorageBackend };
///
/// App::new().add_plugins(I18nPlugin::with_config(I18nConfig {
///     storage: StorageBackend::Memory,
///     ..Default::default()
/// }));
/// ```
#[derive(Default)]
pub struct I18nPlugin {
    /// Configuration for the plugin
    pub config: I18nConfig,
}

impl I18nPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: I18nConfig) -> Self {
        Self { config }
    }
}

impl Plugin for I18nPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<I18n>()
            .init_resource::<CriteriaPanel>()
            .init_resource::<DisplayedResults>()
            .init_resource::<ResultViews>()
            .add_message::<SwitchLocale>()
            .add_message::<LocaleChanged>()
            .add_systems(PostStartup, systems::apply_on_startup.in_set(I18nSystems))
            .add_systems(
                Update,
                (systems::handle_locale_switch, systems::reapply_on_ui_change)
                    .chain()
                    .in_set(I18nSystems)
            );
    }
}

/// Main resource for accessing translations in Bevy systems.
///
/// Dereferences to the [`LocalizationStore`].
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use stock_filter_i18n::I18n;
///
/// fn status_line(i18n: Res<I18n>) {
///     info!("{}", i18n.t("no_results"));
/// }
/// ```
#[derive(Resource, Deref, DerefMut)]
pub struct I18n(LocalizationStore);

impl FromWorld for I18n {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<I18nConfig>().cloned().unwrap_or_default();

        let preference = config.preferred_language.clone().or_else(locale::system_preference);
        let table = TranslationTable::canonical();

        let store = match &config.storage {
            StorageBackend::File(path) => {
                LocalizationStore::init(table, FileStorage::new(path), preference.as_deref())
            }
            StorageBackend::Memory => {
                LocalizationStore::init(table, MemoryStorage::new(), preference.as_deref())
            }
        };

        Self(store.with_bindings(config.bindings))
    }
}

// ---------- API ----------

/// Extension trait for `App` to request locale switches outside of systems.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use stock_filter_i18n::{ I18nPlugin, LocaleAppExt };
///
/// let mut app = App::new();
/// app.add_plugins(I18nPlugin::default());
/// app.request_locale("de");
/// ```
pub trait LocaleAppExt {
    /// Queues a [`SwitchLocale`] request, handled on the next update.
    fn request_locale(&mut self, code: &str) -> &mut Self;
}

impl LocaleAppExt for App {
    fn request_locale(&mut self, code: &str) -> &mut Self {
        self.world_mut().write_message(SwitchLocale::new(code));
        self
    }
}
