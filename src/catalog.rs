//! Catalog loading
//!
//! The catalog is the immutable product list the filter runs over. It is read
//! once through a [`CatalogSource`] when the app starts and never reloaded.

use crate::constants::BUNDLED_CATALOG;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: String,
    pub company: String,
    pub price: f64,
    /// True when the product ships for free
    #[serde(default)]
    pub shipping: bool,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate product id {0:?}")]
    DuplicateId(String),
    #[error("product {id:?} has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Where the catalog comes from. Injected into the app at construction.
pub trait CatalogSource {
    /// Description of the source for logs and error messages
    fn origin(&self) -> String;

    /// Directory that relative image paths resolve against
    fn base_dir(&self) -> Option<PathBuf> {
        None
    }

    fn load(&self) -> Result<Vec<Product>, CatalogError>;
}

/// The catalog compiled into the binary
pub struct BundledCatalog;

impl CatalogSource for BundledCatalog {
    fn origin(&self) -> String {
        "bundled catalog".to_string()
    }

    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        parse_catalog(BUNDLED_CATALOG, &self.origin())
    }
}

/// A JSON array of products on disk
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn base_dir(&self) -> Option<PathBuf> {
        self.path.parent().map(Path::to_path_buf)
    }

    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&json, &self.origin())
    }
}

/// In-memory products, mostly for tests and embedding
impl CatalogSource for Vec<Product> {
    fn origin(&self) -> String {
        "in-memory catalog".to_string()
    }

    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        validate(self)?;
        Ok(self.clone())
    }
}

/// Parse and validate a JSON product array
pub fn parse_catalog(json: &str, origin: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> =
        serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    validate(&products)?;
    debug!(origin, count = products.len(), "Catalog parsed");
    Ok(products)
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for p in products {
        if !seen.insert(p.id.as_str()) {
            return Err(CatalogError::DuplicateId(p.id.clone()));
        }
        if !p.price.is_finite() || p.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: p.id.clone(),
                price: p.price,
            });
        }
    }
    Ok(())
}

/// The loaded catalog. Read-only for the lifetime of the app.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    base_dir: Option<PathBuf>,
}

impl Catalog {
    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let products = source.load()?;
        debug!(origin = %source.origin(), count = products.len(), "Catalog loaded");
        Ok(Self {
            products,
            base_dir: source.base_dir(),
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn product(id: &str, title: &str, category: &str, company: &str, price: f64, shipping: bool) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            company: company.to_string(),
            price,
            shipping,
            image: String::new(),
        }
    }

    #[test]
    fn bundled_catalog_loads() {
        let catalog = Catalog::load(&BundledCatalog).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.base_dir().is_none());
        assert!(catalog.products().iter().all(|p| p.price >= 0.0));
    }

    #[test]
    fn shipping_defaults_to_false() {
        let json = r#"[{"id":"a","title":"Alpha","category":"A","company":"X","price":10,"image":"a.png"}]"#;
        let products = parse_catalog(json, "test").unwrap();
        assert_eq!(products.len(), 1);
        assert!(!products[0].shipping);
        assert_eq!(products[0].price, 10.0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"a","title":"Alpha","category":"A","company":"X","price":10},
            {"id":"a","title":"Beta","category":"B","company":"Y","price":20}
        ]"#;
        let err = parse_catalog(json, "test").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let products = vec![product("a", "Alpha", "A", "X", -1.0, false)];
        let err = Catalog::load(&products).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice { .. }));
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = parse_catalog("{not json", "broken.json").unwrap_err();
        match err {
            CatalogError::Parse { origin, .. } => assert_eq!(origin, "broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn file_catalog_resolves_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"id":"a","title":"Alpha","category":"A","company":"X","price":10,"shipping":true,"image":"img/a.png"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(&JsonFileCatalog::new(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.products()[0].shipping);
        assert_eq!(catalog.base_dir(), Some(dir.path()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&JsonFileCatalog::new(dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
