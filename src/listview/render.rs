// src/listview/render.rs
// Rendering seam. The controller never looks anything up by itself; it only
// talks to the regions a target says it has.

use std::collections::{HashMap, HashSet};

use super::paginate::PageControl;
use super::record::RecordId;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Row(RecordId),
    ShowingCount,
    TotalCount,
    FilteredCount,
    Counter(String),
    EmptyState,
    Pagination,
}

pub trait RenderTarget {
    /// Whether the region exists. Absent optional regions are skipped.
    fn has_region(&self, region: &Region) -> bool;
    fn set_visible(&mut self, region: &Region, visible: bool);
    fn set_text(&mut self, region: &Region, text: &str);
    fn set_children(&mut self, region: &Region, children: Vec<PageControl>);
    /// Drops a region whose record left the Row Source.
    fn remove(&mut self, _region: &Region) {}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionState {
    pub visible: bool,
    pub text: String,
    pub children: Vec<PageControl>,
}

/// In-memory target: keeps the last state written to every region. Backs the
/// TUI, headless output, and tests.
#[derive(Clone, Debug, Default)]
pub struct SnapshotTarget {
    regions: HashMap<Region, RegionState>,
    // Static regions that are deliberately missing. Row regions always exist.
    missing: HashSet<Region>,
}

impl SnapshotTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A target lacking the given static regions.
    pub fn without<I: IntoIterator<Item = Region>>(regions: I) -> Self {
        Self {
            regions: HashMap::new(),
            missing: regions.into_iter().collect(),
        }
    }

    pub fn region(&self, region: &Region) -> Option<&RegionState> {
        self.regions.get(region)
    }

    pub fn text(&self, region: &Region) -> Option<&str> {
        self.regions.get(region).map(|s| s.text.as_str())
    }

    pub fn is_visible(&self, region: &Region) -> bool {
        self.regions.get(region).is_some_and(|s| s.visible)
    }

    pub fn children(&self, region: &Region) -> &[PageControl] {
        self.regions
            .get(region)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn visible_rows(&self) -> HashSet<&RecordId> {
        self.regions
            .iter()
            .filter_map(|(region, state)| match region {
                Region::Row(id) if state.visible => Some(id),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for SnapshotTarget {
    fn has_region(&self, region: &Region) -> bool {
        !self.missing.contains(region)
    }

    fn set_visible(&mut self, region: &Region, visible: bool) {
        self.regions.entry(region.clone()).or_default().visible = visible;
    }

    fn set_text(&mut self, region: &Region, text: &str) {
        let state = self.regions.entry(region.clone()).or_default();
        state.text.clear();
        state.text.push_str(text);
    }

    fn set_children(&mut self, region: &Region, children: Vec<PageControl>) {
        self.regions.entry(region.clone()).or_default().children = children;
    }

    fn remove(&mut self, region: &Region) {
        self.regions.remove(region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_write_per_region() {
        let mut target = SnapshotTarget::new();
        target.set_text(&Region::ShowingCount, "10");
        target.set_text(&Region::ShowingCount, "2");
        target.set_visible(&Region::EmptyState, true);
        target.set_visible(&Region::EmptyState, false);
        assert_eq!(target.text(&Region::ShowingCount), Some("2"));
        assert!(!target.is_visible(&Region::EmptyState));
        assert!(target.children(&Region::Pagination).is_empty());
    }

    #[test]
    fn missing_regions_are_reported() {
        let target = SnapshotTarget::without([Region::Pagination]);
        assert!(!target.has_region(&Region::Pagination));
        assert!(target.has_region(&Region::EmptyState));
        assert!(target.has_region(&Region::Row(RecordId::from("1"))));
    }

    #[test]
    fn visible_rows_lists_only_shown_rows() {
        let mut target = SnapshotTarget::new();
        target.set_visible(&Region::Row("a".into()), true);
        target.set_visible(&Region::Row("b".into()), false);
        target.set_visible(&Region::Row("c".into()), true);
        let rows = target.visible_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.contains(&RecordId::from("a")));
        target.remove(&Region::Row(RecordId::from("a")));
        assert_eq!(target.visible_rows().len(), 1);
    }
}
