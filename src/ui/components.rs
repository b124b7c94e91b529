//! Reusable UI components
//!
//! Small standalone widgets shared by the grid and list views.

use crate::theme;
use eframe::egui;

/// "Free Shipping" pill shown on products that ship for free
pub fn shipping_badge(ui: &mut egui::Ui) -> egui::Response {
    let text = format!("{} Free Shipping", egui_phosphor::regular::TRUCK);
    let galley = ui.painter().layout_no_wrap(
        text,
        egui::FontId::proportional(theme::FONT_CAPTION),
        theme::STATUS_SUCCESS,
    );
    let size = galley.size() + egui::vec2(theme::SPACING_MD * 2.0, theme::SPACING_SM * 2.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(
            rect,
            rect.height() / 2.0,
            egui::Color32::from_rgba_unmultiplied(0x34, 0xd3, 0x99, 20),
        );
        painter.galley(
            rect.center() - galley.size() / 2.0,
            galley,
            theme::STATUS_SUCCESS,
        );
    }

    response
}

/// Category label tinted by its position among the catalog's categories
pub fn category_chip(ui: &mut egui::Ui, category: &str, facet_index: Option<usize>) {
    let (bg, fg) = theme::category_colors(facet_index);
    egui::Frame::new()
        .fill(bg)
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(category)
                    .size(theme::FONT_SMALL)
                    .color(fg),
            );
        });
}

/// Dim caption followed by a bright value, e.g. "Total Products: 22"
pub fn count_label(ui: &mut egui::Ui, caption: &str, value: usize) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
        ui.label(
            egui::RichText::new(caption)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_DIM),
        );
        ui.label(
            egui::RichText::new(value.to_string())
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_PRIMARY),
        );
    });
}

/// Icon drawn in place of a product image that is missing or still loading
pub fn image_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_ELEVATED);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::IMAGE,
        egui::FontId::proportional((rect.height() * 0.3).clamp(12.0, 48.0)),
        theme::TEXT_DIM,
    );
}

/// UV rect that crops a texture to fill `target` without stretching,
/// keeping the center (CSS `object-fit: cover`)
pub fn cover_uv(texture: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if texture.x <= 0.0 || texture.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let texture_aspect = texture.x / texture.y;
    let target_aspect = target.x / target.y;
    if texture_aspect > target_aspect {
        // Wider than the slot: trim left and right
        let w = target_aspect / texture_aspect;
        egui::Rect::from_min_max(egui::pos2((1.0 - w) / 2.0, 0.0), egui::pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = texture_aspect / target_aspect;
        egui::Rect::from_min_max(egui::pos2(0.0, (1.0 - h) / 2.0), egui::pos2(1.0, (1.0 + h) / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: egui::Rect, b: egui::Rect) -> bool {
        (a.min - b.min).length() < 1e-5 && (a.max - b.max).length() < 1e-5
    }

    #[test]
    fn matching_aspect_uses_full_texture() {
        let uv = cover_uv(egui::vec2(400.0, 200.0), egui::vec2(200.0, 100.0));
        assert!(approx(uv, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))));
    }

    #[test]
    fn wide_texture_is_trimmed_horizontally() {
        let uv = cover_uv(egui::vec2(400.0, 100.0), egui::vec2(100.0, 100.0));
        assert!(approx(uv, egui::Rect::from_min_max(egui::pos2(0.375, 0.0), egui::pos2(0.625, 1.0))));
    }

    #[test]
    fn tall_texture_is_trimmed_vertically() {
        let uv = cover_uv(egui::vec2(100.0, 200.0), egui::vec2(100.0, 100.0));
        assert!(approx(uv, egui::Rect::from_min_max(egui::pos2(0.0, 0.25), egui::pos2(1.0, 0.75))));
    }

    #[test]
    fn degenerate_sizes_fall_back_to_full() {
        let uv = cover_uv(egui::vec2(0.0, 0.0), egui::vec2(100.0, 100.0));
        assert!(approx(uv, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))));
    }
}
