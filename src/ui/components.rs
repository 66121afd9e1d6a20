//! Reusable UI components
//!
//! Small widgets shared by the table header and the pagination bar.

use crate::theme;
use crate::types::SortDirection;
use eframe::egui;

/// Icon shown next to a header label for its sort state
pub fn sort_icon(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => egui_phosphor::regular::CARET_UP,
        Some(SortDirection::Descending) => egui_phosphor::regular::CARET_DOWN,
        None => egui_phosphor::regular::CARET_UP_DOWN,
    }
}

/// Clickable column header label with a sort caret
pub fn header_label(
    ui: &mut egui::Ui,
    label: &str,
    direction: Option<SortDirection>,
) -> egui::Response {
    let color = if direction.is_some() {
        theme::TEXT_PRIMARY
    } else {
        theme::TEXT_MUTED
    };
    let text = format!("{} {}", label.to_uppercase(), sort_icon(direction));
    let response = ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .strong()
                .color(color),
        )
        .selectable(false)
        .sense(egui::Sense::click()),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Square icon button that greys out when `enabled` is false
pub fn icon_button(ui: &mut egui::Ui, icon: &str, enabled: bool, tooltip: &str) -> egui::Response {
    ui.add_enabled(
        enabled,
        theme::button(egui::RichText::new(icon).size(theme::FONT_BODY))
            .min_size(egui::vec2(theme::BUTTON_HEIGHT, theme::BUTTON_HEIGHT)),
    )
    .on_hover_text(tooltip)
}
