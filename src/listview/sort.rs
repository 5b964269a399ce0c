// src/listview/sort.rs

use std::cmp::Ordering;

use super::mode::ListSorter;
use super::record::Record;
use super::view::{SortDirection, SortKind, SortOption, UnknownSort, ViewSpec};

/// Collation close to what a browser's `localeCompare` gives for Latin
/// names: case-insensitive first, then lowercase before uppercase, then raw
/// code points so that distinct strings never compare equal.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            let case = |c: char| if c.is_uppercase() { 1u8 } else { 0u8 };
            a.chars().map(case).cmp(b.chars().map(case))
        })
        .then_with(|| a.cmp(b))
}

pub struct FieldSorter {
    field: String,
    kind: SortKind,
    direction: SortDirection,
}

impl FieldSorter {
    pub fn new(option: &SortOption) -> Self {
        Self {
            field: option.field.clone(),
            kind: option.kind,
            direction: option.direction,
        }
    }
}

impl ListSorter<Record> for FieldSorter {
    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = match self.kind {
            SortKind::Numeric => a
                .number(&self.field)
                .partial_cmp(&b.number(&self.field))
                .unwrap_or(Ordering::Equal),
            SortKind::Lexical => locale_compare(&a.text(&self.field), &b.text(&self.field)),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Comparator for `key`, resolved against the view. `None` keeps the
/// filtered set in source order.
pub fn sorter_for(spec: &ViewSpec, key: &str) -> Option<Box<dyn ListSorter<Record>>> {
    if let Some(option) = spec.sort_option(key) {
        return Some(Box::new(FieldSorter::new(option)));
    }
    match spec.unknown_sort {
        UnknownSort::Newest => {
            let newest = spec
                .sort_option("newest")
                .cloned()
                .unwrap_or_else(SortOption::newest);
            Some(Box::new(FieldSorter::new(&newest)))
        }
        UnknownSort::SourceOrder => None,
    }
}

/// Field the active sort reads, if any.
pub fn sort_field<'a>(spec: &'a ViewSpec, key: &str) -> Option<&'a str> {
    match spec.sort_option(key) {
        Some(option) => Some(option.field.as_str()),
        None => match spec.unknown_sort {
            UnknownSort::Newest => Some(spec.sort_option("newest").map_or("date", |o| o.field.as_str())),
            UnknownSort::SourceOrder => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listview::mode::ListViewMode;

    fn ids(records: &[Record], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| records[i].id().to_string()).collect()
    }

    fn sorted(records: &[Record], spec: &ViewSpec, key: &str) -> Vec<String> {
        let mut mode = ListViewMode::new();
        mode.set_sorter(sorter_for(spec, key));
        ids(records, &mode.apply(records))
    }

    fn projects() -> Vec<Record> {
        vec![
            Record::new("a").with("name", "Orchid Enclave").with("date", "300").with("plots", "40"),
            Record::new("b").with("name", "banyan Heights").with("date", "100"),
            Record::new("c").with("name", "Cedar Park").with("date", "not-a-date").with("plots", "120"),
            Record::new("d").with("name", "Aster Meadows").with("date", 200i64).with("plots", "40"),
        ]
    }

    fn spec(unknown: UnknownSort) -> ViewSpec {
        ViewSpec::builder("projects")
            .standard_sorts()
            .sorts(SortOption::measure("plots"))
            .unknown_sort(unknown)
            .build()
            .unwrap()
    }

    #[test]
    fn date_orders_with_unparseable_as_zero() {
        let records = projects();
        let spec = spec(UnknownSort::Newest);
        assert_eq!(sorted(&records, &spec, "newest"), vec!["a", "d", "b", "c"]);
        assert_eq!(sorted(&records, &spec, "oldest"), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn names_use_case_insensitive_collation() {
        let records = projects();
        let spec = spec(UnknownSort::Newest);
        assert_eq!(sorted(&records, &spec, "name_asc"), vec!["d", "b", "c", "a"]);
        assert_eq!(sorted(&records, &spec, "name_desc"), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn measure_ties_keep_source_order() {
        let records = projects();
        let spec = spec(UnknownSort::Newest);
        // a and d both have 40 plots; b has none and counts as 0.
        assert_eq!(sorted(&records, &spec, "plots_high"), vec!["c", "a", "d", "b"]);
        assert_eq!(sorted(&records, &spec, "plots_low"), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn unknown_key_follows_view_policy() {
        let records = projects();
        assert_eq!(
            sorted(&records, &spec(UnknownSort::Newest), "budget_high"),
            vec!["a", "d", "b", "c"]
        );
        assert_eq!(
            sorted(&records, &spec(UnknownSort::SourceOrder), "budget_high"),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn locale_compare_orders_case_variants_deterministically() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn sort_field_reports_the_field_read() {
        let source_order = spec(UnknownSort::SourceOrder);
        assert_eq!(sort_field(&source_order, "plots_low"), Some("plots"));
        assert_eq!(sort_field(&source_order, "whatever"), None);
        let newest = spec(UnknownSort::Newest);
        assert_eq!(sort_field(&newest, "whatever"), Some("date"));
    }
}
