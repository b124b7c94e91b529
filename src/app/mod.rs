//! App module - contains the main application state and logic

mod controls;
mod images;
mod views;

use crate::filter::ProductFilter;
use crate::settings::Settings;
use crate::theme;
use crate::utils::get_cache_dir;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) filter: ProductFilter,
    pub(crate) focus_search: bool,
    // View mode
    pub(crate) compact_view: bool,
    pub(crate) large_cards: bool,
    pub(crate) scroll_to_top: bool,
    // Image loading
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) image_cache: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) prefetch_started: bool,
    pub(crate) cache_dir: PathBuf,
    // Settings
    pub(crate) catalog_path: Option<PathBuf>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        filter: ProductFilter,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            filter,
            focus_search: false,
            compact_view: settings.compact_view,
            large_cards: settings.large_cards,
            scroll_to_top: false,
            runtime,
            image_cache: HashMap::new(),
            prefetch_started: false,
            cache_dir: get_cache_dir(&data_dir),
            catalog_path: settings.catalog_path,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            compact_view: self.compact_view,
            large_cards: self.large_cards,
            catalog_path: self.catalog_path.clone(),
        };
        settings.save(&self.data_dir);
    }

    /// Apply action: recompute the result from the current controls
    pub fn apply_filters(&mut self) {
        self.filter.apply();
        self.scroll_to_top = true;
    }

    /// Reset action: every control back to its default, result hidden
    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.scroll_to_top = true;
    }

    /// Position of a category among the catalog's categories, for coloring
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.filter
            .facets()
            .categories
            .iter()
            .position(|c| c == category)
    }

    /// Keyboard shortcuts and type-anywhere search. Only runs while no text
    /// field has focus.
    pub(crate) fn handle_global_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let mut typed_text = String::new();
        let mut backspace = false;
        let mut enter = false;
        let mut escape = false;
        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Text(text) if text.chars().all(|c| !c.is_control()) => {
                        typed_text.push_str(text);
                    }
                    egui::Event::Key { key, pressed: true, .. } => match key {
                        egui::Key::Backspace => backspace = true,
                        egui::Key::Enter => enter = true,
                        egui::Key::Escape => escape = true,
                        _ => {}
                    },
                    _ => {}
                }
            }
        });

        let mut term = self.filter.state().search_term.clone();
        if !typed_text.is_empty() {
            term.push_str(&typed_text);
            self.focus_search = true;
        }
        if backspace && !term.is_empty() {
            term.pop();
            self.focus_search = true;
        }
        if term != self.filter.state().search_term {
            self.filter.set_search_term(term);
        }
        if enter {
            debug!("Apply via keyboard");
            self.apply_filters();
        }
        if escape {
            debug!("Reset via keyboard");
            self.reset_filters();
        }
    }
}
