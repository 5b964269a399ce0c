// src/listview/controller.rs
// The list view controller: one Row Source, one View State, and the
// filter -> sort -> paginate -> render pipeline that ties them together.

use std::collections::HashSet;
use tracing::{debug, trace};

use super::filter::filters_for;
use super::mode::ListViewMode;
use super::paginate::{build_controls, clamp_page, page_count, window, PageControl};
use super::record::{Record, RecordId, RowSource};
use super::render::{Region, RenderTarget};
use super::sort::sorter_for;
use super::state::{parse_page_size, CategoryChoice, ViewState};
use super::stats::{compute, AggregateStats};
use super::view::{ShowingDenominator, ShowingNumerator, ViewSpec};
use crate::errors::{Result, RowdeckError};

pub struct ListViewController<R: RenderTarget> {
    pub(super) spec: ViewSpec,
    pub(super) source: RowSource,
    pub(super) state: ViewState,
    // Sorted indices into `source`.
    pub(super) filtered: Vec<usize>,
    pub(super) target: R,
    pub(super) pending: HashSet<RecordId>,
}

impl<R: RenderTarget> ListViewController<R> {
    /// Builds the controller and renders the first page. An absent or empty
    /// Row Source leaves the view disabled: the total count reads 0 and no
    /// controller is returned.
    pub fn mount(spec: ViewSpec, source: Option<RowSource>, mut target: R) -> Option<Self> {
        let source = match source {
            Some(source) if !source.is_empty() => source,
            _ => {
                debug!("View '{}' has no records; leaving it disabled", spec.name);
                if target.has_region(&Region::TotalCount) {
                    target.set_text(&Region::TotalCount, "0");
                }
                return None;
            }
        };
        let state = ViewState::initial(&spec);
        let mut controller = Self {
            spec,
            source,
            state,
            filtered: Vec::new(),
            target,
            pending: HashSet::new(),
        };
        controller.recompute();
        controller.render();
        debug!(
            "Mounted view '{}' with {} records",
            controller.spec.name,
            controller.source.len()
        );
        Some(controller)
    }

    // --- Inputs. Every one of these re-filters from page 1. ---

    pub fn set_search(&mut self, term: &str) {
        self.state.search_term = term.to_string();
        self.apply_input();
    }

    pub fn set_filter(&mut self, axis: &str, choice: CategoryChoice) -> Result<()> {
        if self.spec.axis(axis).is_none() {
            return Err(RowdeckError::InvalidView {
                view: self.spec.name.clone(),
                message: format!("no filter axis named '{}'", axis),
            });
        }
        self.state.filters.insert(axis.to_string(), choice);
        self.apply_input();
        Ok(())
    }

    /// Unknown keys are kept; the view's unknown-sort policy decides the order.
    pub fn set_sort(&mut self, key: &str) {
        self.state.sort_key = key.to_string();
        self.apply_input();
    }

    /// Zero falls back to the view's default page size.
    pub fn set_page_size(&mut self, size: usize) {
        self.state.page_size = if size == 0 { self.spec.page_size } else { size };
        self.apply_input();
    }

    pub fn set_page_size_raw(&mut self, raw: &str) {
        let size = parse_page_size(raw, self.spec.page_size);
        self.set_page_size(size);
    }

    fn apply_input(&mut self) {
        self.recompute();
        self.state.current_page = 1;
        self.render();
    }

    // --- Navigation. Render only; the filtered set is left alone. ---

    /// Moves to `page` when it exists and differs from the current page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.page_count() || page == self.state.current_page {
            return false;
        }
        self.state.current_page = page;
        self.render();
        true
    }

    pub fn activate(&mut self, control: &PageControl) -> bool {
        if !control.is_actionable(self.state.current_page) {
            return false;
        }
        self.go_to_page(control.target)
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    /// Re-runs filter and sort after the Row Source changed, keeping the
    /// current page unless it no longer exists.
    pub fn refresh_preserving_page(&mut self) {
        self.recompute();
        self.render();
    }

    pub(super) fn recompute(&mut self) {
        let mut mode = ListViewMode::new();
        for filter in filters_for(&self.spec, &self.state) {
            mode.add_filter(filter);
        }
        mode.set_sorter(sorter_for(&self.spec, &self.state.sort_key));
        self.filtered = mode.apply(self.source.records());
        trace!(
            "View '{}': {} of {} records match",
            self.spec.name,
            self.filtered.len(),
            self.source.len()
        );
    }

    /// Writes the current page and every derived figure to the target.
    pub fn render(&mut self) {
        let pages = self.page_count();
        self.state.current_page = clamp_page(self.state.current_page, pages);
        let range = window(self.state.current_page, self.state.page_size, self.filtered.len());
        let shown: HashSet<usize> = self.filtered[range.clone()].iter().copied().collect();

        for (index, record) in self.source.iter().enumerate() {
            let region = Region::Row(record.id().clone());
            if self.target.has_region(&region) {
                self.target.set_visible(&region, shown.contains(&index));
            }
        }

        let numerator = match self.spec.showing.numerator {
            ShowingNumerator::WindowLength => range.len(),
            ShowingNumerator::WindowEnd => range.end,
        };
        let denominator = match self.spec.showing.denominator {
            ShowingDenominator::Source => self.source.len(),
            ShowingDenominator::Filtered => self.filtered.len(),
        };
        self.write(&Region::ShowingCount, &numerator.to_string());
        self.write(&Region::TotalCount, &denominator.to_string());
        self.write(&Region::FilteredCount, &self.filtered.len().to_string());
        self.publish_counters();

        if self.target.has_region(&Region::EmptyState) {
            self.target.set_visible(&Region::EmptyState, self.filtered.is_empty());
        }
        if self.target.has_region(&Region::Pagination) {
            let controls = build_controls(self.state.current_page, pages, self.spec.max_visible_pages);
            self.target.set_children(&Region::Pagination, controls);
        }
    }

    /// Recomputes and writes aggregate counters only.
    pub(super) fn publish_counters(&mut self) {
        let stats = self.stats();
        for (name, value) in &stats.counters {
            let region = Region::Counter(name.clone());
            if self.target.has_region(&region) {
                self.target.set_text(&region, &value.display());
            }
        }
    }

    fn write(&mut self, region: &Region, text: &str) {
        if self.target.has_region(region) {
            self.target.set_text(region, text);
        }
    }

    // --- Accessors ---

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn source(&self) -> &RowSource {
        &self.source
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut R {
        &mut self.target
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.state.page_size)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered_ids(&self) -> Vec<&RecordId> {
        self.filtered
            .iter()
            .filter_map(|&i| self.source.get(i))
            .map(Record::id)
            .collect()
    }

    /// Records on the current page, in display order.
    ///
    /// This is the ordered form of the `Region::Row` visibility written by
    /// `render`: the same window of the same sorted filtered set. Table views
    /// draw from it because a target's row regions carry no order.
    pub fn visible_records(&self) -> Vec<&Record> {
        let range = window(self.state.current_page, self.state.page_size, self.filtered.len());
        self.filtered[range]
            .iter()
            .filter_map(|&i| self.source.get(i))
            .collect()
    }

    pub fn stats(&self) -> AggregateStats {
        compute(&self.source, &self.filtered, &self.spec.counters)
    }

    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.pending.contains(id)
    }
}
