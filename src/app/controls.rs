//! Filter side panel: counts, controls bound to the filter state, apply/reset

use super::App;
use crate::constants::{PRICE_MAX, PRICE_MIN};
use crate::filter::SortOrder;
use crate::theme;
use crate::ui::components::count_label;
use crate::utils::format_price;
use eframe::egui;

impl App {
    pub(crate) fn render_filter_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(theme::SPACING_XL + theme::SPACING_SM);
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!(
                    "{}  PRODUCT FILTER",
                    egui_phosphor::regular::FUNNEL
                ))
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_SECONDARY),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_LG);

        count_label(ui, "Total Products:", self.filter.total_count());
        if let Some(filtered) = self.filter.filtered_count() {
            count_label(ui, "Filtered Products:", filtered);
        }
        ui.add_space(theme::SPACING_LG);

        self.render_search_box(ui);
        ui.add_space(theme::SPACING_LG);

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height(ui.available_height() - 2.0 * theme::BUTTON_HEIGHT_LARGE - theme::SPACING_XL * 2.0)
            .show(ui, |ui| {
                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    section_label(ui, "CATEGORY");
                    let change = facet_combo(
                        ui,
                        "category_combo",
                        "All Categories",
                        &self.filter.facets().categories,
                        &self.filter.state().category,
                    );
                    if let Some(category) = change {
                        self.filter.set_category(category);
                    }

                    ui.add_space(theme::SPACING_MD);
                    section_label(ui, "COMPANY");
                    let change = facet_combo(
                        ui,
                        "company_combo",
                        "All Companies",
                        &self.filter.facets().companies,
                        &self.filter.state().company,
                    );
                    if let Some(company) = change {
                        self.filter.set_company(company);
                    }

                    ui.add_space(theme::SPACING_MD);
                    section_label(ui, "SORT");
                    let mut sort_order = self.filter.state().sort_order;
                    egui::ComboBox::from_id_salt("sort_combo")
                        .width(ui.available_width())
                        .selected_text(sort_order.label())
                        .show_ui(ui, |ui| {
                            for option in SortOrder::ALL {
                                ui.selectable_value(&mut sort_order, option, option.label());
                            }
                        });
                    if sort_order != self.filter.state().sort_order {
                        self.filter.set_sort_order(sort_order);
                    }
                });

                ui.add_space(theme::SPACING_MD);

                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    self.render_price_controls(ui);
                    ui.add_space(theme::SPACING_MD);
                    let free_shipping = self.filter.state().free_shipping_only;
                    if theme::settings_checkbox(ui, free_shipping, "Free Shipping") {
                        self.filter.set_free_shipping_only(!free_shipping);
                    }
                });
            });

        ui.add_space(theme::SPACING_XL);
        let width = ui.available_width();
        if ui
            .add_sized(
                [width, theme::BUTTON_HEIGHT_LARGE],
                theme::button_accent(format!("{}  Submit", egui_phosphor::regular::CHECK)),
            )
            .clicked()
        {
            self.apply_filters();
        }
        ui.add_space(theme::SPACING_SM);
        if ui
            .add_sized(
                [width, theme::BUTTON_HEIGHT_LARGE],
                theme::button(format!("{}  Reset", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE)),
            )
            .clicked()
        {
            self.reset_filters();
        }
    }

    fn render_search_box(&mut self, ui: &mut egui::Ui) {
        let mut search_term = self.filter.state().search_term.clone();

        let search_frame_resp = egui::Frame::new()
            .fill(theme::BG_INPUT)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::symmetric(8, 8))
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    let search_id = ui.make_persistent_id("search_box");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut search_term)
                            .id(search_id)
                            .hint_text("Search products...")
                            .frame(false)
                            .desired_width(ui.available_width() - theme::SPACING_XL),
                    );
                    if self.focus_search {
                        self.focus_search = false;
                        response.request_focus();
                        if let Some(mut state) = egui::TextEdit::load_state(ui.ctx(), search_id) {
                            let ccursor = egui::text::CCursor::new(search_term.chars().count());
                            state
                                .cursor
                                .set_char_range(Some(egui::text::CCursorRange::one(ccursor)));
                            state.store(ui.ctx(), search_id);
                        }
                    }
                    response
                })
                .inner
            });

        let response = search_frame_resp.inner;
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.filter.set_search_term(search_term.clone());
            self.apply_filters();
        }

        // Clear button overlaid on right side of search frame
        if !search_term.is_empty() {
            let frame_rect = search_frame_resp.response.rect;
            let btn_rect = egui::Rect::from_center_size(
                egui::pos2(frame_rect.right() - 14.0, frame_rect.center().y),
                egui::vec2(16.0, 16.0),
            );
            let clear_resp = ui.interact(btn_rect, ui.id().with("search_clear"), egui::Sense::click());
            let color = if clear_resp.hovered() { theme::TEXT_MUTED } else { theme::TEXT_DIM };
            ui.painter().text(
                btn_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::X,
                egui::FontId::proportional(12.0),
                color,
            );
            if clear_resp.clicked() {
                search_term.clear();
            }
        }

        if search_term != self.filter.state().search_term {
            self.filter.set_search_term(search_term);
        }
    }

    fn render_price_controls(&mut self, ui: &mut egui::Ui) {
        let state = self.filter.state();
        let mut min_price = state.min_price;
        let mut max_price = state.max_price;

        section_label(ui, "PRICE");
        ui.label(
            egui::RichText::new(format!(
                "Price Range: {} - {}",
                format_price(min_price),
                format_price(max_price)
            ))
            .size(theme::FONT_LABEL)
            .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(theme::SPACING_SM);

        let min_changed = ui
            .add(
                egui::Slider::new(&mut min_price, PRICE_MIN..=PRICE_MAX)
                    .step_by(1.0)
                    .show_value(false),
            )
            .on_hover_text("Minimum price")
            .changed();
        let max_changed = ui
            .add(
                egui::Slider::new(&mut max_price, PRICE_MIN..=PRICE_MAX)
                    .step_by(1.0)
                    .show_value(false),
            )
            .on_hover_text("Maximum price")
            .changed();

        if min_changed {
            self.filter.set_min_price(min_price);
        }
        if max_changed {
            self.filter.set_max_price(max_price);
        }
    }
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .color(theme::TEXT_DIM)
                .size(theme::FONT_SMALL),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

/// Dropdown over one facet with a leading "any" entry.
/// Returns the new selection when the user picked a different one.
fn facet_combo(
    ui: &mut egui::Ui,
    id: &str,
    any_label: &str,
    options: &[String],
    current: &Option<String>,
) -> Option<Option<String>> {
    let mut selected = current.clone();
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(selected.as_deref().unwrap_or(any_label))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, any_label);
            for option in options {
                ui.selectable_value(&mut selected, Some(option.clone()), option.as_str());
            }
        });
    (selected != *current).then_some(selected)
}
