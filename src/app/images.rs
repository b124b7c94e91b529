//! Product card image loading

use super::App;
use crate::constants::{IMAGE_FETCH_CONCURRENCY, MAX_IMAGE_BYTES};
use crate::types::ImageSource;
use crate::utils::cache_file_name;
use eframe::egui;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl App {
    /// Download every remote product image that is not cached yet.
    /// Runs on the app runtime; the UI only notices through repaints.
    pub fn start_image_prefetch(&mut self, ctx: &egui::Context) {
        let base_dir = self.filter.catalog().base_dir();
        let jobs: Vec<(PathBuf, String)> = self
            .filter
            .catalog()
            .products()
            .iter()
            .filter_map(|p| match ImageSource::resolve(&p.image, base_dir) {
                ImageSource::Remote(url) => {
                    let path = self.cache_dir.join(cache_file_name(&p.id));
                    (!path.exists()).then_some((path, url))
                }
                _ => None,
            })
            .collect();

        if jobs.is_empty() {
            return;
        }

        debug!(count = jobs.len(), "Starting image prefetch");

        let cache_dir = self.cache_dir.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            if let Err(e) = tokio::fs::create_dir_all(&cache_dir).await {
                warn!(error = %e, dir = %cache_dir.display(), "Failed to create image cache");
                return;
            }

            let client = reqwest::Client::new();
            let semaphore = std::sync::Arc::new(tokio::sync::Semaphore::new(IMAGE_FETCH_CONCURRENCY));

            let mut handles = Vec::with_capacity(jobs.len());
            for (path, url) in jobs {
                let sem = semaphore.clone();
                let client = client.clone();
                let ctx = ctx.clone();
                handles.push(tokio::spawn(async move {
                    let _permit = sem.acquire().await.ok();
                    match fetch_image(&client, &url).await {
                        Ok(bytes) => {
                            if let Err(e) = tokio::fs::write(&path, &bytes).await {
                                warn!(error = %e, path = %path.display(), "Failed to cache image");
                            } else {
                                ctx.request_repaint();
                            }
                        }
                        Err(e) => debug!(error = %e, url = %url, "Image fetch failed"),
                    }
                }));
            }

            let total = handles.len();
            for handle in handles {
                handle.await.ok();
            }
            debug!(tasks = total, "Image prefetch finished");
        });
    }

    /// Texture for a product card, loaded once and cached by product id.
    /// Returns None while a remote image is still downloading.
    pub fn load_card_image(
        &mut self,
        ctx: &egui::Context,
        product_idx: usize,
    ) -> Option<egui::TextureHandle> {
        let product = self.filter.catalog().products().get(product_idx)?;
        if let Some(cached) = self.image_cache.get(&product.id) {
            return cached.clone();
        }

        let path = match ImageSource::resolve(&product.image, self.filter.catalog().base_dir()) {
            ImageSource::Remote(_) => {
                let path = self.cache_dir.join(cache_file_name(&product.id));
                if !path.exists() {
                    return None;
                }
                path
            }
            ImageSource::Local(path) => path,
            ImageSource::None => {
                self.image_cache.insert(product.id.clone(), None);
                return None;
            }
        };

        let id = product.id.clone();
        let texture = match decode_image(&path) {
            Ok(color_image) => Some(ctx.load_texture(
                format!("product-{}", id),
                color_image,
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                warn!(error = %e, path = %path.display(), product = %id, "Failed to load product image");
                None
            }
        };
        self.image_cache.insert(id, texture.clone());
        texture
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("image larger than {} bytes", MAX_IMAGE_BYTES)]
    TooLarge,
}

async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(FetchError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn decode_image(path: &Path) -> image::ImageResult<egui::ColorImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

