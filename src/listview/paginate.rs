// src/listview/paginate.rs

use serde::Serialize;
use std::ops::Range;

pub fn page_count(filtered: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    filtered.div_ceil(page_size)
}

/// Resets an out-of-range cursor to the first page.
pub fn clamp_page(current: usize, page_count: usize) -> usize {
    if current == 0 || current > page_count {
        1
    } else {
        current
    }
}

/// Index range of the visible window. Empty when the page lies past the end.
pub fn window(current: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = current.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageControlKind {
    Previous,
    Page,
    Next,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub kind: PageControlKind,
    pub target: usize,
    pub disabled: bool,
    pub active: bool,
}

impl PageControl {
    pub fn label(&self) -> String {
        match self.kind {
            PageControlKind::Previous => "Previous".to_string(),
            PageControlKind::Next => "Next".to_string(),
            PageControlKind::Page => self.target.to_string(),
        }
    }

    /// Whether activating this control would move the cursor.
    pub fn is_actionable(&self, current: usize) -> bool {
        !self.disabled && self.target != current
    }
}

/// First and last page number to list for `current`. A window of 0 lists
/// every page; otherwise the window is centred on `current` and shifted
/// inward near either end so it stays full.
pub fn visible_page_range(current: usize, page_count: usize, max_visible: usize) -> (usize, usize) {
    if max_visible == 0 || page_count <= max_visible {
        return (1, page_count);
    }
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(page_count);
    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start, end)
}

pub fn build_controls(current: usize, page_count: usize, max_visible: usize) -> Vec<PageControl> {
    if page_count <= 1 {
        return Vec::new();
    }
    let (first, last) = visible_page_range(current, page_count, max_visible);
    let mut controls = Vec::with_capacity(last - first + 3);
    controls.push(PageControl {
        kind: PageControlKind::Previous,
        target: current.saturating_sub(1).max(1),
        disabled: current == 1,
        active: false,
    });
    for page in first..=last {
        controls.push(PageControl {
            kind: PageControlKind::Page,
            target: page,
            disabled: false,
            active: page == current,
        });
    }
    controls.push(PageControl {
        kind: PageControlKind::Next,
        target: (current + 1).min(page_count),
        disabled: current == page_count,
        active: false,
    });
    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(controls: &[PageControl]) -> Vec<usize> {
        controls
            .iter()
            .filter(|c| c.kind == PageControlKind::Page)
            .map(|c| c.target)
            .collect()
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(12, 5), 3);
    }

    #[test]
    fn clamp_resets_past_the_end() {
        assert_eq!(clamp_page(3, 1), 1);
        assert_eq!(clamp_page(2, 2), 2);
        assert_eq!(clamp_page(1, 0), 1);
        assert_eq!(clamp_page(0, 4), 1);
    }

    #[test]
    fn window_slices_and_saturates() {
        assert_eq!(window(1, 10, 12), 0..10);
        assert_eq!(window(2, 10, 12), 10..12);
        assert_eq!(window(3, 10, 12), 12..12);
        assert_eq!(window(1, 10, 0), 0..0);
    }

    #[test]
    fn no_controls_for_a_single_page() {
        assert!(build_controls(1, 0, 5).is_empty());
        assert!(build_controls(1, 1, 5).is_empty());
    }

    #[test]
    fn previous_and_next_bounds() {
        let controls = build_controls(1, 3, 0);
        let prev = controls.first().unwrap();
        let next = controls.last().unwrap();
        assert!(prev.disabled);
        assert_eq!(prev.target, 1);
        assert!(!next.disabled);
        assert_eq!(next.target, 2);
        assert_eq!(pages(&controls), vec![1, 2, 3]);
        assert!(controls[1].active);

        let controls = build_controls(3, 3, 0);
        assert!(!controls.first().unwrap().disabled);
        assert_eq!(controls.first().unwrap().target, 2);
        assert!(controls.last().unwrap().disabled);
        assert_eq!(controls.last().unwrap().target, 3);
    }

    #[test]
    fn page_numbers_window_around_current() {
        assert_eq!(pages(&build_controls(1, 10, 5)), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages(&build_controls(6, 10, 5)), vec![4, 5, 6, 7, 8]);
        assert_eq!(pages(&build_controls(10, 10, 5)), vec![6, 7, 8, 9, 10]);
        assert_eq!(pages(&build_controls(9, 10, 5)), vec![6, 7, 8, 9, 10]);
        assert_eq!(pages(&build_controls(2, 3, 5)), vec![1, 2, 3]);
    }

    #[test]
    fn current_and_disabled_controls_are_not_actionable() {
        let controls = build_controls(2, 3, 0);
        let current = controls.iter().find(|c| c.active).unwrap();
        assert!(!current.is_actionable(2));
        assert!(controls.last().unwrap().is_actionable(2));
        let first = build_controls(1, 3, 0);
        assert!(!first[0].is_actionable(1));
    }
}
