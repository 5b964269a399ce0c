// src/listview/state.rs

use std::collections::BTreeMap;
use std::fmt;

use super::view::ViewSpec;

pub const ALL_SENTINEL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    #[default]
    All,
    Only(String),
}

impl CategoryChoice {
    /// `"all"` and the empty string both mean no restriction.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_SENTINEL {
            CategoryChoice::All
        } else {
            CategoryChoice::Only(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryChoice::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryChoice::All => ALL_SENTINEL,
            CategoryChoice::Only(v) => v,
        }
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page size input as typed or selected by a user. Zero or garbage falls
/// back to `fallback`.
pub fn parse_page_size(raw: &str, fallback: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => fallback,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) search_term: String,
    pub(crate) filters: BTreeMap<String, CategoryChoice>,
    pub(crate) sort_key: String,
    pub(crate) page_size: usize,
    pub(crate) current_page: usize,
}

impl ViewState {
    pub fn initial(spec: &ViewSpec) -> Self {
        Self {
            search_term: String::new(),
            filters: spec
                .axes
                .iter()
                .map(|a| (a.name.clone(), CategoryChoice::All))
                .collect(),
            sort_key: spec.default_sort.clone(),
            page_size: spec.page_size.max(1),
            current_page: 1,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self, axis: &str) -> &CategoryChoice {
        static ALL: CategoryChoice = CategoryChoice::All;
        self.filters.get(axis).unwrap_or(&ALL)
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listview::view::CategoryAxis;

    #[test]
    fn choice_parsing() {
        assert_eq!(CategoryChoice::parse("all"), CategoryChoice::All);
        assert_eq!(CategoryChoice::parse("  "), CategoryChoice::All);
        assert_eq!(CategoryChoice::parse("pending"), CategoryChoice::Only("pending".into()));
        // Case matters: only the lowercase sentinel means "all".
        assert_eq!(CategoryChoice::parse("All"), CategoryChoice::Only("All".into()));
    }

    #[test]
    fn page_size_parsing_falls_back() {
        assert_eq!(parse_page_size("25", 10), 25);
        assert_eq!(parse_page_size("0", 10), 10);
        assert_eq!(parse_page_size("ten", 10), 10);
        assert_eq!(parse_page_size("-5", 10), 10);
    }

    #[test]
    fn initial_state_follows_view() {
        let spec = ViewSpec::builder("projects")
            .standard_sorts()
            .axis(CategoryAxis::new("status", "status"))
            .axis(CategoryAxis::new("type", "type"))
            .page_size(25)
            .build()
            .unwrap();
        let state = ViewState::initial(&spec);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), 25);
        assert_eq!(state.sort_key(), "newest");
        assert!(state.filter("status").is_all());
        assert!(state.filter("type").is_all());
        assert!(state.filter("missing").is_all());
    }
}
