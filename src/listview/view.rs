// src/listview/view.rs
// Per-view configuration object. One `ViewSpec` parameterises the controller
// for agents, leads, projects, withdrawals, or anything else shaped like them.

use serde::{Deserialize, Serialize};

use super::record::FieldValue;
use crate::errors::{Result, RowdeckError};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// A categorical filter axis (status, type, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAxis {
    pub name: String,
    pub field: String,
    /// Value assumed for records that do not carry `field`.
    pub default: Option<String>,
    /// Known values, in the order a user cycles through them.
    pub choices: Vec<String>,
}

impl CategoryAxis {
    pub fn new(name: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            field: field.to_string(),
            default: None,
            choices: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    Numeric,
    Lexical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOption {
    pub key: String,
    pub label: String,
    pub field: String,
    pub kind: SortKind,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(key: &str, label: &str, field: &str, kind: SortKind, direction: SortDirection) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field: field.to_string(),
            kind,
            direction,
        }
    }

    pub fn newest() -> Self {
        Self::new("newest", "Newest first", "date", SortKind::Numeric, SortDirection::Descending)
    }

    pub fn oldest() -> Self {
        Self::new("oldest", "Oldest first", "date", SortKind::Numeric, SortDirection::Ascending)
    }

    pub fn name_asc() -> Self {
        Self::new("name_asc", "Name A-Z", "name", SortKind::Lexical, SortDirection::Ascending)
    }

    pub fn name_desc() -> Self {
        Self::new("name_desc", "Name Z-A", "name", SortKind::Lexical, SortDirection::Descending)
    }

    /// `{field}_high` / `{field}_low` pair for a numeric measure.
    pub fn measure(field: &str) -> [Self; 2] {
        [
            Self::new(
                &format!("{}_high", field),
                &format!("{} (high to low)", field),
                field,
                SortKind::Numeric,
                SortDirection::Descending,
            ),
            Self::new(
                &format!("{}_low", field),
                &format!("{} (low to high)", field),
                field,
                SortKind::Numeric,
                SortDirection::Ascending,
            ),
        ]
    }
}

/// What to do with a sort key the view does not define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSort {
    Newest,
    SourceOrder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowingNumerator {
    /// Number of records on the current page.
    WindowLength,
    /// One-based index of the last record on the current page.
    WindowEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowingDenominator {
    Source,
    Filtered,
}

/// "Showing X of Y" convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowingCount {
    pub numerator: ShowingNumerator,
    pub denominator: ShowingDenominator,
}

impl Default for ShowingCount {
    fn default() -> Self {
        Self {
            numerator: ShowingNumerator::WindowLength,
            denominator: ShowingDenominator::Source,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CounterKind {
    /// Records whose `field` equals `value`. Records lacking the field
    /// count as `default`.
    Count {
        field: String,
        value: String,
        default: Option<String>,
    },
    /// Sum of a numeric field.
    Sum { field: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterSpec {
    pub name: String,
    pub kind: CounterKind,
}

impl CounterSpec {
    pub fn count(name: &str, field: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: CounterKind::Count {
                field: field.to_string(),
                value: value.to_string(),
                default: None,
            },
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        if let CounterKind::Count { default: d, .. } = &mut self.kind {
            *d = Some(default.to_string());
        }
        self
    }

    pub fn sum(name: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: CounterKind::Sum { field: field.to_string() },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub field: String,
    #[serde(default = "default_column_width")]
    pub width: u16,
}

fn default_column_width() -> u16 {
    16
}

impl Column {
    pub fn new(title: &str, field: &str, width: u16) -> Self {
        Self {
            title: title.to_string(),
            field: field.to_string(),
            width,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewSpec {
    pub name: String,
    pub search_fields: Vec<String>,
    pub axes: Vec<CategoryAxis>,
    pub sort_options: Vec<SortOption>,
    pub default_sort: String,
    pub unknown_sort: UnknownSort,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    /// Page numbers shown around the current page; 0 lists every page.
    pub max_visible_pages: usize,
    pub showing: ShowingCount,
    pub counters: Vec<CounterSpec>,
    /// Field updates applied to a record once the server confirms an approve.
    pub approve_updates: Vec<(String, FieldValue)>,
    pub columns: Vec<Column>,
}

impl ViewSpec {
    pub fn builder(name: &str) -> ViewSpecBuilder {
        ViewSpecBuilder::new(name)
    }

    pub fn axis(&self, name: &str) -> Option<&CategoryAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    pub fn sort_option(&self, key: &str) -> Option<&SortOption> {
        self.sort_options.iter().find(|o| o.key == key)
    }
}

pub struct ViewSpecBuilder {
    spec: ViewSpec,
}

impl ViewSpecBuilder {
    fn new(name: &str) -> Self {
        Self {
            spec: ViewSpec {
                name: name.to_string(),
                search_fields: Vec::new(),
                axes: Vec::new(),
                sort_options: Vec::new(),
                default_sort: "newest".to_string(),
                unknown_sort: UnknownSort::Newest,
                page_size: DEFAULT_PAGE_SIZE,
                page_sizes: Vec::new(),
                max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
                showing: ShowingCount::default(),
                counters: Vec::new(),
                approve_updates: Vec::new(),
                columns: Vec::new(),
            },
        }
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn axis(mut self, axis: CategoryAxis) -> Self {
        self.spec.axes.push(axis);
        self
    }

    pub fn sort(mut self, option: SortOption) -> Self {
        self.spec.sort_options.push(option);
        self
    }

    pub fn sorts<I: IntoIterator<Item = SortOption>>(mut self, options: I) -> Self {
        self.spec.sort_options.extend(options);
        self
    }

    /// newest, oldest, name_asc, name_desc.
    pub fn standard_sorts(self) -> Self {
        self.sorts([
            SortOption::newest(),
            SortOption::oldest(),
            SortOption::name_asc(),
            SortOption::name_desc(),
        ])
    }

    pub fn default_sort(mut self, key: &str) -> Self {
        self.spec.default_sort = key.to_string();
        self
    }

    pub fn unknown_sort(mut self, policy: UnknownSort) -> Self {
        self.spec.unknown_sort = policy;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.spec.page_size = size;
        self
    }

    pub fn page_sizes<I: IntoIterator<Item = usize>>(mut self, sizes: I) -> Self {
        self.spec.page_sizes = sizes.into_iter().collect();
        self
    }

    pub fn max_visible_pages(mut self, pages: usize) -> Self {
        self.spec.max_visible_pages = pages;
        self
    }

    pub fn showing(mut self, numerator: ShowingNumerator, denominator: ShowingDenominator) -> Self {
        self.spec.showing = ShowingCount { numerator, denominator };
        self
    }

    pub fn counter(mut self, counter: CounterSpec) -> Self {
        self.spec.counters.push(counter);
        self
    }

    pub fn on_approve(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.spec.approve_updates.push((field.to_string(), value.into()));
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.spec.columns.push(column);
        self
    }

    pub fn build(self) -> Result<ViewSpec> {
        let spec = self.spec;
        let invalid = |message: String| RowdeckError::InvalidView {
            view: spec.name.clone(),
            message,
        };
        if spec.page_size == 0 {
            return Err(invalid("page size must be positive".to_string()));
        }
        if spec.page_sizes.contains(&0) {
            return Err(invalid("selectable page sizes must be positive".to_string()));
        }
        if spec.sort_option(&spec.default_sort).is_none() && !spec.sort_options.is_empty() {
            return Err(invalid(format!("default sort '{}' is not defined", spec.default_sort)));
        }
        for (i, axis) in spec.axes.iter().enumerate() {
            if spec.axes[..i].iter().any(|a| a.name == axis.name) {
                return Err(invalid(format!("filter axis '{}' is defined twice", axis.name)));
            }
        }
        for (i, option) in spec.sort_options.iter().enumerate() {
            if spec.sort_options[..i].iter().any(|o| o.key == option.key) {
                return Err(invalid(format!("sort key '{}' is defined twice", option.key)));
            }
        }
        Ok(spec)
    }
}
