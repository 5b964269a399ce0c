// src/listview/filter.rs

use super::mode::ListFilter;
use super::record::Record;
use super::state::{CategoryChoice, ViewState};
use super::view::{CategoryAxis, ViewSpec};

/// Case-insensitive substring match against any of a fixed set of fields.
pub struct SearchFilter {
    needle: String,
    fields: Vec<String>,
}

impl SearchFilter {
    pub fn new(term: &str, fields: &[String]) -> Self {
        Self {
            needle: term.trim().to_lowercase(),
            fields: fields.to_vec(),
        }
    }
}

impl ListFilter<Record> for SearchFilter {
    fn filter(&self, item: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.fields
            .iter()
            .any(|field| item.text(field).to_lowercase().contains(&self.needle))
    }
}

/// Exact, case-sensitive equality on one categorical field.
pub struct CategoryFilter {
    field: String,
    default: Option<String>,
    value: String,
}

impl CategoryFilter {
    pub fn new(axis: &CategoryAxis, value: &str) -> Self {
        Self {
            field: axis.field.clone(),
            default: axis.default.clone(),
            value: value.to_string(),
        }
    }
}

impl ListFilter<Record> for CategoryFilter {
    fn filter(&self, item: &Record) -> bool {
        match item.get(&self.field) {
            Some(v) => v.as_text() == self.value,
            None => self.default.as_deref().unwrap_or("") == self.value,
        }
    }
}

/// The filter conjunction for a view in a given state. Axes set to `all`
/// contribute no filter at all.
pub fn filters_for(spec: &ViewSpec, state: &ViewState) -> Vec<Box<dyn ListFilter<Record>>> {
    let mut filters: Vec<Box<dyn ListFilter<Record>>> = Vec::new();
    if !state.search_term().trim().is_empty() {
        filters.push(Box::new(SearchFilter::new(state.search_term(), &spec.search_fields)));
    }
    for axis in &spec.axes {
        if let CategoryChoice::Only(value) = state.filter(&axis.name) {
            filters.push(Box::new(CategoryFilter::new(axis, value)));
        }
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: &str, name: &str, city: &str, status: Option<&str>) -> Record {
        let r = Record::new(id).with("name", name).with("city", city).with("phone", "98450 12345");
        match status {
            Some(s) => r.with("status", s),
            None => r,
        }
    }

    fn fields() -> Vec<String> {
        vec!["name".into(), "city".into(), "phone".into()]
    }

    #[test]
    fn empty_search_matches_everything() {
        let f = SearchFilter::new("   ", &fields());
        assert!(f.filter(&lead("1", "Asha", "Pune", None)));
    }

    #[test]
    fn search_is_case_insensitive_substring_on_any_field() {
        let f = SearchFilter::new("PUN", &fields());
        assert!(f.filter(&lead("1", "Asha", "Pune", None)));
        assert!(!f.filter(&lead("2", "Ravi", "Nagpur", None)));

        let f = SearchFilter::new("ravi", &fields());
        assert!(f.filter(&lead("2", "RAVI Kumar", "Nagpur", None)));

        let f = SearchFilter::new("12345", &fields());
        assert!(f.filter(&lead("3", "x", "y", None)));
    }

    #[test]
    fn search_is_not_tokenized() {
        let f = SearchFilter::new("asha pune", &fields());
        assert!(!f.filter(&lead("1", "Asha", "Pune", None)));
    }

    #[test]
    fn search_ignores_fields_outside_the_list() {
        let record = Record::new("1").with("name", "Asha").with("email", "asha@example.com");
        let f = SearchFilter::new("example", &["name".to_string()]);
        assert!(!f.filter(&record));
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let axis = CategoryAxis::new("status", "status");
        let f = CategoryFilter::new(&axis, "closed");
        assert!(f.filter(&lead("1", "a", "b", Some("closed"))));
        assert!(!f.filter(&lead("2", "a", "b", Some("Closed"))));
        assert!(!f.filter(&lead("3", "a", "b", Some("closed_won"))));
        assert!(!f.filter(&lead("4", "a", "b", None)));
    }

    #[test]
    fn category_uses_axis_default_for_missing_field() {
        let axis = CategoryAxis::new("status", "status").with_default("new");
        let f = CategoryFilter::new(&axis, "new");
        assert!(f.filter(&lead("1", "a", "b", None)));
        assert!(!f.filter(&lead("2", "a", "b", Some("closed"))));
    }
}
