use std::cmp::Ordering;

pub trait ListFilter<T> {
    fn filter(&self, item: &T) -> bool;
}

pub trait ListSorter<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// A filter conjunction plus at most one comparator, applied to a slice
/// without touching it. Results are indices into the slice so the caller
/// keeps a single owner for every item.
pub struct ListViewMode<T> {
    pub filters: Vec<Box<dyn ListFilter<T>>>,
    pub sorter: Option<Box<dyn ListSorter<T>>>,
}

impl<T> Default for ListViewMode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListViewMode<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sorter: None,
        }
    }

    pub fn add_filter(&mut self, filter: Box<dyn ListFilter<T>>) {
        self.filters.push(filter);
    }

    pub fn set_sorter(&mut self, sorter: Option<Box<dyn ListSorter<T>>>) {
        self.sorter = sorter;
    }

    pub fn filter_indices(&self, items: &[T]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filters.iter().all(|f| f.filter(item)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Stable: indices comparing equal keep their incoming order.
    pub fn sort_indices(&self, items: &[T], indices: &mut [usize]) {
        if let Some(sorter) = &self.sorter {
            indices.sort_by(|&a, &b| sorter.compare(&items[a], &items[b]));
        }
    }

    pub fn apply(&self, items: &[T]) -> Vec<usize> {
        let mut indices = self.filter_indices(items);
        self.sort_indices(items, &mut indices);
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;
    impl ListFilter<i32> for Even {
        fn filter(&self, item: &i32) -> bool {
            item % 2 == 0
        }
    }

    struct Positive;
    impl ListFilter<i32> for Positive {
        fn filter(&self, item: &i32) -> bool {
            *item > 0
        }
    }

    struct Descending;
    impl ListSorter<i32> for Descending {
        fn compare(&self, a: &i32, b: &i32) -> Ordering {
            b.cmp(a)
        }
    }

    struct ByTens;
    impl ListSorter<i32> for ByTens {
        fn compare(&self, a: &i32, b: &i32) -> Ordering {
            (a / 10).cmp(&(b / 10))
        }
    }

    #[test]
    fn filters_are_conjunctive() {
        let mut mode = ListViewMode::new();
        mode.add_filter(Box::new(Even));
        mode.add_filter(Box::new(Positive));
        let items = [-4, -1, 0, 2, 3, 8];
        assert_eq!(mode.apply(&items), vec![3, 5]);
    }

    #[test]
    fn no_sorter_keeps_source_order() {
        let mode: ListViewMode<i32> = ListViewMode::new();
        assert_eq!(mode.apply(&[5, 1, 3]), vec![0, 1, 2]);
    }

    #[test]
    fn sorting_is_stable_for_equal_keys() {
        let mut mode = ListViewMode::new();
        mode.set_sorter(Some(Box::new(ByTens)));
        let items = [15, 11, 3, 19, 1];
        // 15, 11, 19 share a key and must stay in that order.
        assert_eq!(mode.apply(&items), vec![2, 4, 0, 1, 3]);

        mode.set_sorter(Some(Box::new(Descending)));
        assert_eq!(mode.apply(&items), vec![3, 0, 1, 2, 4]);
    }
}
