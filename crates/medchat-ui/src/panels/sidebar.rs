//! Conversation sidebar: history list with new/select/delete.

use egui::{self, RichText, ScrollArea, Vec2};
use crate::format::format_timestamp;
use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    New,
    Select(String),
    Delete(String),
}

/// Render the sidebar. Starting or picking a conversation closes it.
pub fn sidebar_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<SidebarAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Consultations").color(TEXT_PRIMARY));
            ui.add_space(4.0);

            let new_btn = ui.add_enabled(
                state.ready,
                egui::Button::new(RichText::new("+ New Consultation").color(TEXT_ON_ACCENT))
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(ui.available_width(), 28.0)),
            );
            if new_btn.clicked() {
                action = Some(SidebarAction::New);
            }

            ui.separator();

            if state.conversations.is_empty() {
                ui.label(RichText::new("No consultations yet").color(TEXT_SECONDARY).small());
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for summary in &state.conversations {
                        let selected = state.active_id.as_deref() == Some(summary.id.as_str());
                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(
                                    selected,
                                    RichText::new(&summary.title).color(TEXT_PRIMARY),
                                )
                                .clicked()
                            {
                                action = Some(SidebarAction::Select(summary.id.clone()));
                            }
                            if ui.small_button("Delete").clicked() {
                                action = Some(SidebarAction::Delete(summary.id.clone()));
                            }
                        });
                        ui.label(
                            RichText::new(format!(
                                "{} · {} messages",
                                format_timestamp(&summary.timestamp),
                                summary.message_count
                            ))
                            .color(TEXT_SECONDARY)
                            .small(),
                        );
                        ui.add_space(6.0);
                    }
                });
        });

    if matches!(action, Some(SidebarAction::New | SidebarAction::Select(_))) {
        state.show_sidebar = false;
    }
    action
}
