//! Declarative UI bindings: which translation key goes into which property
//! of which UI target.

/// The property of a UI target a binding writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiProperty {
    /// Visible text content.
    Text,
    /// Hint shown by an empty input field.
    Placeholder,
    /// Text that may carry inline markup.
    Markup,
}

/// How a binding picks its translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelector {
    Static(&'static str),
    /// Depends on whether the search criteria panel is collapsed: the button
    /// offers the opposite action.
    CriteriaToggle {
        collapsed: &'static str,
        expanded: &'static str,
    },
}

impl KeySelector {
    pub fn select(&self, criteria_collapsed: bool) -> &'static str {
        match *self {
            KeySelector::Static(key) => key,
            KeySelector::CriteriaToggle { collapsed, expanded } => {
                if criteria_collapsed { collapsed } else { expanded }
            }
        }
    }
}

/// One (target, key, property) association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiBinding {
    pub target: &'static str,
    pub key: KeySelector,
    pub property: UiProperty,
}

impl UiBinding {
    pub const fn text(target: &'static str, key: &'static str) -> Self {
        Self { target, key: KeySelector::Static(key), property: UiProperty::Text }
    }

    pub const fn placeholder(target: &'static str, key: &'static str) -> Self {
        Self { target, key: KeySelector::Static(key), property: UiProperty::Placeholder }
    }

    pub const fn markup(target: &'static str, key: &'static str) -> Self {
        Self { target, key: KeySelector::Static(key), property: UiProperty::Markup }
    }
}

/// Bindings of the Stock Filter page.
pub const DEFAULT_BINDINGS: &[UiBinding] = &[
    UiBinding::text("title", "title"),
    UiBinding::text("langLabel", "language"),
    UiBinding {
        target: "collapseCriteriaBtnText",
        key: KeySelector::CriteriaToggle { collapsed: "expand", expanded: "collapse" },
        property: UiProperty::Text,
    },
    UiBinding::text("searchCriteriaTitle", "search_criteria"),
    UiBinding::text("revenueLabel", "revenue_required"),
    UiBinding::placeholder("revenueMin", "min_revenue"),
    UiBinding::placeholder("revenueMax", "max_revenue"),
    UiBinding::text("roeLabel", "return_on_equity"),
    UiBinding::placeholder("roeMin", "min_roe"),
    UiBinding::text("revenueGrowthLabel", "revenue_growth"),
    UiBinding::placeholder("revenueGrowthMin", "min_growth"),
    UiBinding::text("revenueGrowthYearsLabel", "period_years"),
    UiBinding::placeholder("revenueGrowthYears", "years"),
    UiBinding::text("earningsGrowthLabel", "earnings_growth"),
    UiBinding::placeholder("earningsGrowthMin", "min_growth"),
    UiBinding::text("earningsGrowthYearsLabel", "period_years"),
    UiBinding::placeholder("earningsGrowthYears", "years"),
    UiBinding::text("searchButtonText", "search"),
    UiBinding::text("exportBtn", "export_csv"),
    UiBinding::markup("multiSortTip", "tip_multi_sort"),
    UiBinding::text("resetSortBtn", "reset_sort"),
];

/// The UI the bindings are applied to.
///
/// Implementations never need to expose current values; the store only writes.
pub trait UiTree {
    /// Writes `text` into `property` of `target`.
    ///
    /// Returns `false` when the target is not present, which is not an error.
    fn write(&mut self, target: &str, property: UiProperty, text: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleCode;
    use crate::table::TranslationTable;
    use std::collections::HashSet;

    #[test]
    fn toggle_offers_the_opposite_action() {
        let selector = KeySelector::CriteriaToggle { collapsed: "expand", expanded: "collapse" };
        assert_eq!(selector.select(true), "expand");
        assert_eq!(selector.select(false), "collapse");
        assert_eq!(KeySelector::Static("title").select(true), "title");
    }

    #[test]
    fn default_targets_are_unique() {
        let targets: HashSet<&str> = DEFAULT_BINDINGS.iter().map(|b| b.target).collect();
        assert_eq!(targets.len(), DEFAULT_BINDINGS.len());
    }

    #[test]
    fn default_binding_keys_exist_in_every_locale() {
        let table = TranslationTable::bundled().unwrap();
        for binding in DEFAULT_BINDINGS {
            for collapsed in [true, false] {
                let key = binding.key.select(collapsed);
                for locale in LocaleCode::ALL {
                    assert!(
                        table.get(locale, key).is_some(),
                        "key '{}' of target '{}' missing in '{}'",
                        key,
                        binding.target,
                        locale
                    );
                }
            }
        }
    }

    #[test]
    fn only_the_tip_carries_markup() {
        let markup: Vec<&str> = DEFAULT_BINDINGS
            .iter()
            .filter(|b| b.property == UiProperty::Markup)
            .map(|b| b.target)
            .collect();
        assert_eq!(markup, vec!["multiSortTip"]);
    }
}
