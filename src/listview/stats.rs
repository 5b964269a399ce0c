// src/listview/stats.rs

use super::record::RowSource;
use super::view::{CounterKind, CounterSpec};

#[derive(Clone, Debug, PartialEq)]
pub enum CounterValue {
    Count(usize),
    Sum(f64),
}

impl CounterValue {
    /// Text written to a counter region. Sums drop a zero fraction.
    pub fn display(&self) -> String {
        match self {
            CounterValue::Count(n) => n.to_string(),
            CounterValue::Sum(s) if s.fract() == 0.0 => format!("{:.0}", s),
            CounterValue::Sum(s) => format!("{:.2}", s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateStats {
    pub source_total: usize,
    pub filtered_total: usize,
    pub counters: Vec<(String, CounterValue)>,
}

impl AggregateStats {
    pub fn get(&self, name: &str) -> Option<&CounterValue> {
        self.counters.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn count(&self, name: &str) -> usize {
        match self.get(name) {
            Some(CounterValue::Count(n)) => *n,
            _ => 0,
        }
    }
}

/// Counters over the filtered set, so they follow the active filter.
pub fn compute(source: &RowSource, filtered: &[usize], counters: &[CounterSpec]) -> AggregateStats {
    let records = || filtered.iter().filter_map(|&i| source.get(i));
    let counters = counters
        .iter()
        .map(|spec| {
            let value = match &spec.kind {
                CounterKind::Count { field, value, default } => CounterValue::Count(
                    records()
                        .filter(|r| match r.get(field) {
                            Some(v) => v.as_text() == value.as_str(),
                            None => default.as_deref() == Some(value.as_str()),
                        })
                        .count(),
                ),
                CounterKind::Sum { field } => CounterValue::Sum(records().map(|r| r.number(field)).sum()),
            };
            (spec.name.clone(), value)
        })
        .collect();
    AggregateStats {
        source_total: source.len(),
        filtered_total: filtered.len(),
        counters,
    }
}
