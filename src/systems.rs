//! Bevy side of the store: UI target components, locale messages and the
//! systems applying bindings to entities.

use bevy::prelude::*;

use crate::I18n;
use crate::binding::{ UiProperty, UiTree };
use crate::locale::LocaleCode;
use crate::markup::strip_markup;
use crate::results::{ ResultSet, ResultViews };
use crate::store::ViewState;

/// Marks an entity as a binding target with the given id.
///
/// Text and markup bindings write into the entity's [`Text`], placeholder
/// bindings into its [`Placeholder`]. An entity lacking the component a
/// binding needs is treated as absent.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct UiTarget(pub String);

impl UiTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Hint text of an input field, shown while it is empty.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholder(pub String);

/// State of the search criteria panel.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CriteriaPanel {
    pub collapsed: bool,
}

/// Results currently shown in the table, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct DisplayedResults(pub Option<ResultSet>);

/// Request from the language selector to switch locale.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SwitchLocale(pub String);

impl SwitchLocale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

/// Written once at startup and after every successful switch, so selectors
/// can show the active locale.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChanged(pub LocaleCode);

/// Systems of the localization store. Order locale selectors before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct I18nSystems;

type TargetQuery<'w, 's> = Query<
    'w,
    's,
    (&'static UiTarget, Option<&'static mut Text>, Option<&'static mut Placeholder>)
>;

/// [`UiTree`] over the entities carrying a [`UiTarget`].
pub(crate) struct EntityUiTree<'a, 'w, 's> {
    targets: &'a mut TargetQuery<'w, 's>,
}

impl<'a, 'w, 's> EntityUiTree<'a, 'w, 's> {
    fn new(targets: &'a mut TargetQuery<'w, 's>) -> Self {
        Self { targets }
    }
}

impl UiTree for EntityUiTree<'_, '_, '_> {
    fn write(&mut self, target: &str, property: UiProperty, text: &str) -> bool {
        let mut written = false;

        for (id, label, placeholder) in self.targets.iter_mut() {
            if id.0 != target {
                continue;
            }
            match property {
                UiProperty::Text | UiProperty::Markup => {
                    let Some(mut label) = label else { continue };
                    // Bevy text has no inline markup
                    let plain = match property {
                        UiProperty::Markup => strip_markup(text),
                        _ => text.into(),
                    };
                    if label.0 != plain {
                        label.0 = plain.into_owned();
                    }
                    written = true;
                }
                UiProperty::Placeholder => {
                    let Some(mut placeholder) = placeholder else { continue };
                    if placeholder.0 != text {
                        placeholder.0 = text.to_string();
                    }
                    written = true;
                }
            }
        }

        written
    }
}

/// Localizes the UI spawned during startup and announces the locale.
pub(crate) fn apply_on_startup(
    i18n: Res<I18n>,
    panel: Res<CriteriaPanel>,
    results: Res<DisplayedResults>,
    mut result_views: ResMut<ResultViews>,
    mut targets: TargetQuery,
    mut changed: MessageWriter<LocaleChanged>,
) {
    let view = ViewState { criteria_collapsed: panel.collapsed, results: results.0.as_ref() };
    i18n.apply_to_ui(&mut EntityUiTree::new(&mut targets), &view, &mut result_views);
    changed.write(LocaleChanged(i18n.current_locale()));
}

/// Handles locale switch requests in the frame they arrive.
pub(crate) fn handle_locale_switch(
    mut requests: MessageReader<SwitchLocale>,
    mut i18n: ResMut<I18n>,
    panel: Res<CriteriaPanel>,
    results: Res<DisplayedResults>,
    mut result_views: ResMut<ResultViews>,
    mut targets: TargetQuery,
    mut changed: MessageWriter<LocaleChanged>,
) {
    for SwitchLocale(code) in requests.read() {
        let view = ViewState { criteria_collapsed: panel.collapsed, results: results.0.as_ref() };
        let mut ui = EntityUiTree::new(&mut targets);
        if let Ok(locale) = i18n.switch_locale(code, &mut ui, &view, &mut result_views) {
            changed.write(LocaleChanged(locale));
        }
    }
}

/// Re-applies bindings when targets are spawned or the criteria panel is
/// toggled. Result views are left alone since their locale did not change.
pub(crate) fn reapply_on_ui_change(
    i18n: Res<I18n>,
    panel: Res<CriteriaPanel>,
    added: Query<(), Added<UiTarget>>,
    mut result_views: ResMut<ResultViews>,
    mut targets: TargetQuery,
) {
    if !panel.is_changed() && added.is_empty() {
        return;
    }

    let view = ViewState { criteria_collapsed: panel.collapsed, results: None };
    i18n.apply_to_ui(&mut EntityUiTree::new(&mut targets), &view, &mut result_views);
}
