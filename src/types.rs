//! Common types and data structures

use std::path::{Path, PathBuf};

/// Where a product card image is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// http(s) URL, fetched into the image cache
    Remote(String),
    /// File on disk, read directly
    Local(PathBuf),
    None,
}

impl ImageSource {
    /// Interpret a catalog image reference. Relative paths resolve against
    /// the catalog file's directory when there is one.
    pub fn resolve(image: &str, base_dir: Option<&Path>) -> Self {
        let image = image.trim();
        if image.is_empty() {
            return ImageSource::None;
        }
        if image.starts_with("http://") || image.starts_with("https://") {
            return ImageSource::Remote(image.to_string());
        }

        let path = PathBuf::from(image.strip_prefix("file://").unwrap_or(image));
        match base_dir {
            Some(base) if path.is_relative() => ImageSource::Local(base.join(path)),
            _ => ImageSource::Local(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_remote() {
        assert_eq!(
            ImageSource::resolve("https://example.com/a.jpg", None),
            ImageSource::Remote("https://example.com/a.jpg".into())
        );
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(ImageSource::resolve("  ", None), ImageSource::None);
    }

    #[test]
    fn relative_paths_use_base_dir() {
        let base = Path::new("/data/catalog");
        assert_eq!(
            ImageSource::resolve("img/a.png", Some(base)),
            ImageSource::Local(base.join("img/a.png"))
        );
        assert_eq!(
            ImageSource::resolve("img/a.png", None),
            ImageSource::Local(PathBuf::from("img/a.png"))
        );
    }

    #[test]
    fn file_uri_is_local() {
        let resolved = ImageSource::resolve("file:///tmp/a.png", Some(Path::new("/ignored")));
        assert_eq!(resolved, ImageSource::Local(PathBuf::from("/tmp/a.png")));
    }
}
