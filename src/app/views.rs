//! Result rendering (header bar, card grid, compact list)

use super::App;
use crate::theme;
use crate::ui::components::{category_chip, cover_uv, image_placeholder, shipping_badge};
use crate::utils::format_price;
use eframe::egui;

impl App {
    pub(crate) fn render_results_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.render_view_header(ui);
        ui.add_space(theme::SPACING_MD);

        if !self.filter.has_applied_filter() {
            empty_state(
                ui,
                egui_phosphor::regular::FUNNEL,
                "Choose your filters and press Submit to see products",
            );
            return;
        }

        if self.filter.result_indices().is_empty() {
            empty_state(
                ui,
                egui_phosphor::regular::MAGNIFYING_GLASS,
                "No products match the current filters",
            );
            return;
        }

        if self.compact_view {
            self.render_list_view(ui);
        } else {
            self.render_grid_view(ui, ctx);
        }
    }

    fn render_view_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut grid_active = !self.compact_view;
                if theme::segmented_toggle(
                    ui,
                    egui_phosphor::regular::SQUARES_FOUR,
                    egui_phosphor::regular::LIST,
                    &mut grid_active,
                ) {
                    self.compact_view = !grid_active;
                    self.scroll_to_top = true;
                }

                if !self.compact_view {
                    let icon = if self.large_cards {
                        egui_phosphor::regular::ARROWS_IN
                    } else {
                        egui_phosphor::regular::ARROWS_OUT
                    };
                    let hint = if self.large_cards { "Smaller cards" } else { "Larger cards" };
                    if ui.add(theme::button(icon)).on_hover_text(hint).clicked() {
                        self.large_cards = !self.large_cards;
                    }
                }
            });
        });
    }

    fn render_grid_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let spacing = theme::SPACING_MD;
        let (base_w, base_h) = if self.large_cards {
            theme::CARD_LARGE
        } else {
            theme::CARD_SMALL
        };
        let available = ui.available_width();
        let num_cols = ((available + spacing) / (base_w + spacing)).floor().max(1.0);
        let card_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor();
        let card_h = (base_h * (card_w / base_w)).floor();

        let mut scroll_area = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("grid_scroll");
        if std::mem::take(&mut self.scroll_to_top) {
            scroll_area = scroll_area.vertical_scroll_offset(0.0);
        }

        scroll_area.show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                let indices = self.filter.result_indices().to_vec();
                for product_idx in indices {
                    self.render_card(ui, ctx, product_idx, egui::vec2(card_w, card_h));
                }
            });
        });
    }

    fn render_card(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        product_idx: usize,
        size: egui::Vec2,
    ) {
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }

        // Clone product data to avoid borrow issues with the image cache
        let product = self.filter.catalog().products()[product_idx].clone();
        let category_idx = self.category_index(&product.category);
        let texture = self.load_card_image(ctx, product_idx);

        let painter = ui.painter();
        painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

        let image_rect = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width(), (rect.height() * theme::CARD_IMAGE_RATIO).floor()),
        )
        .shrink(1.0);
        match &texture {
            Some(tex) => {
                let uv = cover_uv(tex.size_vec2(), image_rect.size());
                let brush = egui::epaint::Brush {
                    fill_texture_id: tex.id(),
                    uv,
                };
                let mut shape = egui::epaint::RectShape::filled(
                    image_rect,
                    egui::CornerRadius {
                        nw: theme::RADIUS_LARGE as u8,
                        ne: theme::RADIUS_LARGE as u8,
                        sw: 0,
                        se: 0,
                    },
                    egui::Color32::WHITE,
                );
                shape.brush = Some(std::sync::Arc::new(brush));
                painter.add(shape);
            }
            None => image_placeholder(painter, image_rect),
        }

        let border_color = if response.hovered() {
            theme::ACCENT_MUTED
        } else {
            theme::BORDER_SUBTLE
        };
        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_DEFAULT, border_color),
            egui::StrokeKind::Inside,
        );

        let info_rect = egui::Rect::from_min_max(
            egui::pos2(rect.min.x, image_rect.max.y),
            rect.max,
        )
        .shrink(theme::SPACING_MD);

        ui.scope_builder(egui::UiBuilder::new().max_rect(info_rect), |ui| {
            ui.spacing_mut().item_spacing.y = 2.0;
            ui.add(
                egui::Label::new(
                    egui::RichText::new(&product.title)
                        .size(theme::FONT_BODY)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .truncate(),
            );
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Category:")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                category_chip(ui, &product.category, category_idx);
            });
            ui.label(
                egui::RichText::new(format!("Company: {}", product.company))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
            );
            ui.label(
                egui::RichText::new(format!("Price: {}", format_price(product.price)))
                    .size(theme::FONT_LABEL)
                    .color(theme::ACCENT),
            );
            if product.shipping {
                shipping_badge(ui);
            }
        });

        response.on_hover_text(&product.title);
    }

    fn render_list_view(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let header_height = 32.0;
        let available_width = ui.available_width();
        let part = available_width / 10.0;

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .column(Column::exact(part * 3.5).clip(true)) // Title
            .column(Column::exact(part * 1.75).clip(true)) // Category
            .column(Column::exact(part * 1.75).clip(true)) // Company
            .column(Column::exact(part * 1.25)) // Price
            .column(Column::remainder()); // Shipping
        if std::mem::take(&mut self.scroll_to_top) {
            table = table.vertical_scroll_offset(0.0);
        }

        let indices = self.filter.result_indices();
        let products = self.filter.catalog().products();
        let categories = &self.filter.facets().categories;

        table
            .header(header_height, |mut header| {
                for name in ["TITLE", "CATEGORY", "COMPANY", "PRICE", "SHIPPING"] {
                    header.col(|ui| {
                        ui.label(
                            egui::RichText::new(name)
                                .size(theme::FONT_SMALL)
                                .strong()
                                .color(theme::TEXT_DIM),
                        );
                    });
                }
            })
            .body(|body| {
                body.rows(theme::ROW_HEIGHT, indices.len(), |mut row| {
                    let product = &products[indices[row.index()]];
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(&product.title)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_PRIMARY),
                        );
                    });
                    row.col(|ui| {
                        let idx = categories.iter().position(|c| *c == product.category);
                        category_chip(ui, &product.category, idx);
                    });
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(&product.company)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(format_price(product.price))
                                .size(theme::FONT_LABEL)
                                .color(theme::ACCENT),
                        );
                    });
                    row.col(|ui| {
                        if product.shipping {
                            shipping_badge(ui);
                        }
                    });
                });
            });
    }
}

fn empty_state(ui: &mut egui::Ui, icon: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(
            egui::RichText::new(icon)
                .size(48.0)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(message)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
    });
}
