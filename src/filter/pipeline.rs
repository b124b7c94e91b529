//! Filtering and sorting logic

use super::state::{FilterState, SortOrder};
use crate::catalog::Product;
use feruca::Collator;
use std::cmp::Ordering;

/// Run the filter stages over the full catalog and return the positions of the
/// surviving products, in display order.
///
/// Stages narrow in a fixed order: search, category, company, price range,
/// free shipping. Sorting comes last; with [`SortOrder::None`] catalog order
/// is kept.
pub fn filter_products(products: &[Product], state: &FilterState) -> Vec<usize> {
    let search = state.search_term.as_str();
    let search_lower = search.to_lowercase();
    let has_search = !search.trim().is_empty();

    let mut indices: Vec<usize> = products
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            // Matched untrimmed; only the emptiness check ignores whitespace
            if has_search && !p.title.to_lowercase().contains(&search_lower) {
                return None;
            }

            if let Some(category) = &state.category {
                if p.category != *category {
                    return None;
                }
            }

            if let Some(company) = &state.company {
                if p.company != *company {
                    return None;
                }
            }

            // Always applied, even with untouched sliders
            if p.price < state.min_price || p.price > state.max_price {
                return None;
            }

            if state.free_shipping_only && !p.shipping {
                return None;
            }

            Some(i)
        })
        .collect();

    // sort_by is stable, so equal titles keep catalog order
    let mut collator = Collator::default();
    match state.sort_order {
        SortOrder::None => {}
        SortOrder::TitleAscending => {
            indices.sort_by(|&a, &b| {
                compare_titles(&mut collator, &products[a].title, &products[b].title)
            });
        }
        SortOrder::TitleDescending => {
            indices.sort_by(|&a, &b| {
                compare_titles(&mut collator, &products[b].title, &products[a].title)
            });
        }
    }

    indices
}

/// Collation used for title sorting (Unicode collation, CLDR root order).
///
/// Accented letters sort next to their base letter and case only breaks ties,
/// lowercase first.
pub(crate) fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    fn alpha_beta() -> Vec<Product> {
        vec![
            product("1", "Alpha", "A", "X", 10.0, true),
            product("2", "Beta", "B", "Y", 20.0, false),
        ]
    }

    fn titles(products: &[Product], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| products[i].title.clone()).collect()
    }

    #[test]
    fn defaults_return_catalog_order() {
        let products = alpha_beta();
        assert_eq!(filter_products(&products, &FilterState::default()), [0, 1]);
    }

    #[test]
    fn category_filter() {
        let products = alpha_beta();
        let state = FilterState {
            category: Some("A".into()),
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Alpha"]);
    }

    #[test]
    fn company_filter() {
        let products = alpha_beta();
        let state = FilterState {
            company: Some("Y".into()),
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Beta"]);
    }

    #[test]
    fn min_price_filter() {
        let products = alpha_beta();
        let state = FilterState {
            min_price: 15.0,
            max_price: 100_000.0,
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Beta"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = alpha_beta();
        let state = FilterState {
            min_price: 10.0,
            max_price: 20.0,
            ..Default::default()
        };
        assert_eq!(filter_products(&products, &state), [0, 1]);
    }

    #[test]
    fn inverted_price_range_is_empty() {
        let products = alpha_beta();
        let state = FilterState {
            min_price: 50.0,
            max_price: 5.0,
            ..Default::default()
        };
        assert!(filter_products(&products, &state).is_empty());
    }

    #[test]
    fn descending_sort() {
        let products = alpha_beta();
        let state = FilterState {
            sort_order: SortOrder::TitleDescending,
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Beta", "Alpha"]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let products = alpha_beta();
        let state = FilterState {
            search_term: "zzz".into(),
            ..Default::default()
        };
        assert!(filter_products(&products, &state).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products = alpha_beta();
        let state = FilterState {
            search_term: "LPH".into(),
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Alpha"]);
    }

    #[test]
    fn whitespace_only_search_is_ignored() {
        let products = alpha_beta();
        let state = FilterState {
            search_term: "   ".into(),
            ..Default::default()
        };
        assert_eq!(filter_products(&products, &state), [0, 1]);
    }

    #[test]
    fn search_term_is_matched_untrimmed() {
        let products = alpha_beta();
        let state = FilterState {
            search_term: " alpha".into(),
            ..Default::default()
        };
        assert!(filter_products(&products, &state).is_empty());
    }

    #[test]
    fn free_shipping_filter() {
        let products = alpha_beta();
        let state = FilterState {
            free_shipping_only: true,
            ..Default::default()
        };
        assert_eq!(titles(&products, &filter_products(&products, &state)), ["Alpha"]);
    }

    #[test]
    fn stages_combine() {
        let products = vec![
            product("1", "oak chair", "Chairs", "Artifex", 100.0, true),
            product("2", "oak table", "Tables", "Artifex", 300.0, true),
            product("3", "Oak Chair", "Chairs", "Luxora", 150.0, false),
            product("4", "pine chair", "Chairs", "Artifex", 90.0, true),
            product("5", "oak chair deluxe", "Chairs", "Artifex", 900.0, true),
        ];
        let state = FilterState {
            search_term: "oak".into(),
            category: Some("Chairs".into()),
            company: Some("Artifex".into()),
            max_price: 500.0,
            free_shipping_only: true,
            ..Default::default()
        };
        assert_eq!(filter_products(&products, &state), [0]);
    }

    #[test]
    fn ascending_sort_is_case_insensitive() {
        let products = vec![
            product("1", "banana", "A", "X", 1.0, false),
            product("2", "Cherry", "A", "X", 1.0, false),
            product("3", "apple", "A", "X", 1.0, false),
        ];
        let state = FilterState {
            sort_order: SortOrder::TitleAscending,
            ..Default::default()
        };
        assert_eq!(
            titles(&products, &filter_products(&products, &state)),
            ["apple", "banana", "Cherry"]
        );
    }

    #[test]
    fn equal_titles_keep_catalog_order() {
        let products = vec![
            product("1", "same", "A", "X", 1.0, false),
            product("2", "other", "A", "X", 1.0, false),
            product("3", "same", "A", "X", 1.0, false),
        ];
        for sort_order in [SortOrder::TitleAscending, SortOrder::TitleDescending] {
            let state = FilterState {
                sort_order,
                ..Default::default()
            };
            let result = filter_products(&products, &state);
            let first_same = result.iter().position(|&i| i == 0).unwrap();
            let second_same = result.iter().position(|&i| i == 2).unwrap();
            assert!(first_same < second_same, "{sort_order:?}");
        }
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_case_tie() {
        let mut collator = Collator::default();
        assert_eq!(compare_titles(&mut collator, "bed", "Bed"), Ordering::Less);
        assert_eq!(compare_titles(&mut collator, "Bed", "bed"), Ordering::Greater);
        assert_eq!(compare_titles(&mut collator, "Bed", "Bed"), Ordering::Equal);
        assert_eq!(compare_titles(&mut collator, "Bed", "apple"), Ordering::Greater);
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        let products = vec![
            product("1", "zebra rug", "A", "X", 1.0, false),
            product("2", "émile chair", "A", "X", 1.0, false),
            product("3", "frame", "A", "X", 1.0, false),
        ];
        let ascending = FilterState {
            sort_order: SortOrder::TitleAscending,
            ..Default::default()
        };
        assert_eq!(
            titles(&products, &filter_products(&products, &ascending)),
            ["émile chair", "frame", "zebra rug"]
        );

        let descending = FilterState {
            sort_order: SortOrder::TitleDescending,
            ..Default::default()
        };
        assert_eq!(
            titles(&products, &filter_products(&products, &descending)),
            ["zebra rug", "frame", "émile chair"]
        );
    }

    #[test]
    fn catalog_is_not_reordered() {
        let products = alpha_beta();
        let before = products.clone();
        let state = FilterState {
            sort_order: SortOrder::TitleDescending,
            ..Default::default()
        };
        filter_products(&products, &state);
        assert_eq!(products, before);
    }
}
