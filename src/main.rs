#![windows_subsystem = "windows"]
//! Product Filter - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod catalog;
mod constants;
mod filter;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use anyhow::Context as _;
use app::App;
use catalog::{BundledCatalog, Catalog, CatalogSource, JsonFileCatalog};
use clap::Parser;
use constants::*;
use eframe::egui;
use filter::ProductFilter;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "product-filter", version, about = "Browse and filter a product catalog")]
struct Cli {
    /// Catalog JSON file to load instead of the bundled one
    #[arg(long, env = "PRODUCT_FILTER_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory for settings, logs and the image cache
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "product-filter.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,product_filter=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// Command line path first, then the one remembered in settings, then the
/// catalog compiled into the binary. A remembered file that no longer loads
/// falls back to the bundled catalog; an explicit one is a hard error.
fn load_catalog(cli_path: Option<PathBuf>, saved_path: Option<&Path>) -> anyhow::Result<Catalog> {
    if let Some(path) = cli_path {
        let source = JsonFileCatalog::new(path);
        return Catalog::load(&source)
            .with_context(|| format!("failed to load catalog from {}", source.origin()));
    }

    if let Some(path) = saved_path {
        let source = JsonFileCatalog::new(path);
        match Catalog::load(&source) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => warn!(error = %e, "Saved catalog unavailable, using bundled catalog"),
        }
    }

    Catalog::load(&BundledCatalog).context("bundled catalog is invalid")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(utils::get_data_dir);
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, data_dir = %data_dir.display(), "Product Filter starting");

    let settings = settings::Settings::load(&data_dir);

    let catalog = match load_catalog(cli.catalog, settings.catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to load catalog");
            return Err(e);
        }
    };
    if catalog.is_empty() {
        warn!("Catalog has no products");
    }
    info!(products = catalog.len(), "Catalog ready");

    let filter = ProductFilter::new(catalog);
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    // Restore saved window position/size
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 800.0)))
        .with_min_inner_size([900.0, 600.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, filter, runtime, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

// ============================================================================
// EFRAME APP IMPLEMENTATION
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        self.handle_global_keys(ctx);

        // Start image prefetch on first frame
        if !self.prefetch_started {
            self.prefetch_started = true;
            self.start_image_prefetch(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Left sidebar - filters (must be added BEFORE CentralPanel)
        egui::SidePanel::left("filter_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 16, right: 8, top: 0, bottom: 16 }),
            )
            .show(ctx, |ui| {
                self.render_filter_panel(ui);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.render_results_panel(ui, ctx);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_catalog_and_data_dir() {
        let cli = Cli::try_parse_from([
            "product-filter",
            "--catalog",
            "shop.json",
            "--data-dir",
            "/tmp/pf",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("shop.json")));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pf")));
    }

    #[test]
    fn saved_catalog_that_fails_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.json");
        let catalog = load_catalog(None, Some(&missing)).unwrap();
        let bundled = Catalog::load(&BundledCatalog).unwrap();
        assert_eq!(catalog.len(), bundled.len());
    }

    #[test]
    fn explicit_catalog_that_fails_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.json");
        assert!(load_catalog(Some(missing), None).is_err());
    }

    #[test]
    fn explicit_catalog_wins_over_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","title":"Lamp","category":"Lights","company":"Acme","price":5}]"#,
        )
        .unwrap();
        let catalog = load_catalog(Some(path), None).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].title, "Lamp");
    }
}
