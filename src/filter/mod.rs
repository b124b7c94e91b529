//! Product filter - the filter state holder and its apply/reset actions
//!
//! Control edits go through the `set_*` methods, which only store the new
//! value. Nothing is recomputed until [`ProductFilter::apply`] runs the
//! pipeline over the full catalog.

mod facets;
mod pipeline;
mod state;

pub use facets::Facets;
pub use pipeline::filter_products;
pub use state::{FilterState, SortOrder};

use crate::catalog::Catalog;
use tracing::debug;

pub struct ProductFilter {
    catalog: Catalog,
    facets: Facets,
    state: FilterState,
    /// Catalog positions of the current result, in display order
    results: Vec<usize>,
}

impl ProductFilter {
    pub fn new(catalog: Catalog) -> Self {
        let facets = Facets::from_products(catalog.products());
        let results = (0..catalog.len()).collect();
        Self {
            catalog,
            facets,
            state: FilterState::default(),
            results,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.state.search_term = search_term.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.state.category = category;
    }

    pub fn set_company(&mut self, company: Option<String>) {
        self.state.company = company;
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.state.sort_order = sort_order;
    }

    pub fn set_free_shipping_only(&mut self, free_shipping_only: bool) {
        self.state.free_shipping_only = free_shipping_only;
    }

    pub fn set_min_price(&mut self, min_price: f64) {
        self.state.min_price = min_price;
    }

    pub fn set_max_price(&mut self, max_price: f64) {
        self.state.max_price = max_price;
    }

    /// Recompute the result from the full catalog and mark the filter applied.
    /// Returns the number of matching products.
    pub fn apply(&mut self) -> usize {
        self.results = filter_products(self.catalog.products(), &self.state);
        self.state.has_applied_filter = true;
        debug!(
            matched = self.results.len(),
            total = self.catalog.len(),
            "Filter applied"
        );
        self.results.len()
    }

    /// Restore every control to its default and hide the result until the
    /// next apply. The catalog is left untouched.
    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.results = (0..self.catalog.len()).collect();
        debug!("Filter reset");
    }

    pub fn has_applied_filter(&self) -> bool {
        self.state.has_applied_filter
    }

    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    /// Size of the result, only once a filter has been applied
    pub fn filtered_count(&self) -> Option<usize> {
        self.state.has_applied_filter.then_some(self.results.len())
    }

    pub fn result_indices(&self) -> &[usize] {
        &self.results
    }
}
