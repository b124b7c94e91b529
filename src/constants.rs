//! Application constants and configuration

pub const APP_NAME: &str = "Product Filter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Catalog compiled into the binary, used when no catalog file is given
pub const BUNDLED_CATALOG: &str = include_str!("../assets/products.json");

/// Bounds of the price sliders, also the default price filter range
pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 100_000.0;

/// Maximum number of card images fetched at once
pub const IMAGE_FETCH_CONCURRENCY: usize = 8;

/// Downloads bigger than this are abandoned and the card keeps its placeholder
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;
