//! Utility functions

use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};

/// Get the app data directory (settings, logs, cache)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the image cache directory inside a data directory
pub fn get_cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("cache").join("images")
}

/// Cache file name for a product image. Ids may contain any characters, so
/// anything outside a safe set is replaced in the readable prefix and the
/// id hash keeps names unique.
pub fn cache_file_name(product_id: &str) -> String {
    let safe: String = product_id
        .chars()
        .take(32)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let hash = blake3::hash(product_id.as_bytes());
    format!("{}-{}.img", safe, &hash.to_hex()[..32])
}

/// Format a price the way cards and the range label show it
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${}", price as u64)
    } else {
        format!("${:.2}", price)
    }
}
