//! Chat panel: displays conversation messages and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use medchat_types::message::{Message, Role};
use crate::format::format_timestamp;
use crate::state::{UiState, STATUS_FAILED};
use crate::theme::*;

const WELCOME_TEXT: &str = "Describe your symptoms or ask a health question. \
    This assistant does not replace a consultation with a doctor.";

/// Render the chat panel. Returns Some(message) when user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new(state.active_title())
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() {
                            WARNING
                        } else if state.status_text == STATUS_FAILED {
                            ERROR
                        } else {
                            SUCCESS
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.messages.is_empty() && !state.awaiting_reply {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("How can I help you today?")
                                        .color(TEXT_PRIMARY)
                                        .strong(),
                                );
                                ui.label(RichText::new(WELCOME_TEXT).color(TEXT_SECONDARY));
                            });
                        }

                        for message in &state.messages {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }

                        if state.awaiting_reply {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Thinking...").color(TEXT_SECONDARY));
                            });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let editable = state.ready && !state.awaiting_reply;
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type your health question...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(editable, input);

                    let send_enabled = state.can_submit();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(
                            RichText::new("Send").color(TEXT_ON_ACCENT),
                        )
                        .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            submitted = Some(text);
                            response.request_focus();
                        }
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (label_color, text_color, bg, layout) = match message.role {
        Role::User => (TEXT_ON_ACCENT, TEXT_ON_ACCENT, BG_USER, Layout::right_to_left(Align::Min)),
        Role::Assistant => (ACCENT, TEXT_PRIMARY, BG_SECONDARY, Layout::left_to_right(Align::Min)),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(message.role.label())
                                .color(label_color)
                                .strong()
                                .small(),
                        );
                        ui.label(
                            RichText::new(format_timestamp(&message.timestamp))
                                .color(label_color)
                                .small(),
                        );
                    });
                    ui.label(RichText::new(&message.content).color(text_color));
                });
            });
    });
}
