//! Result views that depend on the active locale but are rendered elsewhere.

use bevy::prelude::Resource;
use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };

use crate::store::Translator;

/// One search result row, keyed by field name.
pub type ResultRow = Map<String, Value>;

/// The currently displayed search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub rows: Vec<ResultRow>,
    /// Column field names in display order (e.g. `"name"`, `"revenue"`).
    #[serde(rename = "fieldOrder")]
    pub headers: Vec<String>,
}

impl ResultSet {
    pub fn new(rows: Vec<ResultRow>, headers: Vec<String>) -> Self {
        Self { rows, headers }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Redraws the "N symbols found" counter.
pub trait ResultCountView: Send + Sync + 'static {
    fn update_result_count(&mut self, count: usize, tr: &Translator<'_>);
}

/// Redraws the results table.
pub trait TableView: Send + Sync + 'static {
    fn render_table(&mut self, rows: &[ResultRow], headers: &[String], tr: &Translator<'_>);
}

/// The collaborators re-invoked after a locale change. Either may be absent.
#[derive(Resource, Default)]
pub struct ResultViews {
    pub count: Option<Box<dyn ResultCountView>>,
    pub table: Option<Box<dyn TableView>>,
}

impl ResultViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, view: impl ResultCountView) -> Self {
        self.count = Some(Box::new(view));
        self
    }

    pub fn with_table(mut self, view: impl TableView) -> Self {
        self.table = Some(Box::new(view));
        self
    }

    /// Re-renders both views from `results` if there is anything to show.
    pub fn refresh(&mut self, results: Option<&ResultSet>, tr: &Translator<'_>) -> bool {
        let Some(results) = results.filter(|r| !r.is_empty()) else {
            return false;
        };

        if let Some(count) = self.count.as_mut() {
            count.update_result_count(results.len(), tr);
        }
        if let Some(table) = self.table.as_mut() {
            table.render_table(&results.rows, &results.headers, tr);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_response_shape() {
        let json = r#"{
            "rows": [{ "name": "ACME AG", "revenue": 1200000 }],
            "fieldOrder": ["name", "revenue"]
        }"#;
        let results: ResultSet = serde_json::from_str(json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.headers, vec!["name", "revenue"]);
        assert_eq!(results.rows[0]["name"], "ACME AG");
    }
}
