//! Filter control values

use crate::constants::{PRICE_MAX, PRICE_MIN};

/// Title ordering selected in the sort dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep catalog order
    #[default]
    None,
    TitleAscending,
    TitleDescending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [
        SortOrder::None,
        SortOrder::TitleAscending,
        SortOrder::TitleDescending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "Sort By",
            SortOrder::TitleAscending => "A-Z",
            SortOrder::TitleDescending => "Z-A",
        }
    }
}

/// Current value of every filter control.
///
/// `None` for `category` or `company` means "any". Nothing here is validated:
/// a `max_price` below `min_price` is kept as entered and simply matches
/// no products.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub search_term: String,
    pub category: Option<String>,
    pub company: Option<String>,
    pub sort_order: SortOrder,
    pub free_shipping_only: bool,
    pub min_price: f64,
    pub max_price: f64,
    /// Set by apply, cleared by reset. Gates the filtered count and result grid.
    pub has_applied_filter: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            company: None,
            sort_order: SortOrder::None,
            free_shipping_only: false,
            min_price: PRICE_MIN,
            max_price: PRICE_MAX,
            has_applied_filter: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_full_price_range() {
        let state = FilterState::default();
        assert_eq!(state.min_price, 0.0);
        assert_eq!(state.max_price, 100_000.0);
        assert!(state.category.is_none());
        assert!(state.company.is_none());
        assert_eq!(state.sort_order, SortOrder::None);
        assert!(!state.has_applied_filter);
    }

    #[test]
    fn sort_labels_match_dropdown() {
        let labels: Vec<_> = SortOrder::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Sort By", "A-Z", "Z-A"]);
    }
}
