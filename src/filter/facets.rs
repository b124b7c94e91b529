//! Distinct category and company values for the dropdowns

use crate::catalog::Product;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub companies: Vec<String>,
}

impl Facets {
    /// Values are listed in order of first appearance in the catalog
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            categories: distinct(products.iter().map(|p| p.category.as_str())),
            companies: distinct(products.iter().map(|p| p.company.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    #[test]
    fn keeps_first_occurrence_order() {
        let products = vec![
            product("1", "a", "Sofas", "Luxora", 1.0, false),
            product("2", "b", "Beds", "Artifex", 1.0, false),
            product("3", "c", "Sofas", "Luxora", 1.0, false),
            product("4", "d", "Chairs", "Artifex", 1.0, false),
        ];
        let facets = Facets::from_products(&products);
        assert_eq!(facets.categories, ["Sofas", "Beds", "Chairs"]);
        assert_eq!(facets.companies, ["Luxora", "Artifex"]);
    }

    #[test]
    fn values_are_case_sensitive() {
        let products = vec![
            product("1", "a", "beds", "X", 1.0, false),
            product("2", "b", "Beds", "X", 1.0, false),
        ];
        assert_eq!(Facets::from_products(&products).categories, ["beds", "Beds"]);
    }

    #[test]
    fn empty_catalog_has_no_facets() {
        assert_eq!(Facets::from_products(&[]), Facets::default());
    }
}
