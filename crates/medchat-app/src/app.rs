//! Main egui application: composes the panels and drives the chat session.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use medchat_core::event_bus::EventBus;
use medchat_core::ports::{ReplyPort, StoragePort};
use medchat_core::session::ChatSession;
use medchat_core::store::ConversationStore;
use medchat_platform::reply::HttpReplyClient;
use medchat_platform::storage::{auto_detect_storage, open_storage};
use medchat_types::config::{ChatConfig, StorageBackendType};
use medchat_ui::panels::chat;
use medchat_ui::panels::sidebar::{self, SidebarAction};
use medchat_ui::state::UiState;
use medchat_ui::theme;

const CONFIG_STORAGE_KEY: &str = "medchat:config";

/// Everything that exists only once history has been loaded
struct Services {
    session: Rc<RefCell<ChatSession>>,
    reply: Rc<dyn ReplyPort>,
    backend: String,
}

/// The main application state
pub struct MedChatApp {
    ui_state: UiState,
    event_bus: EventBus,
    services: Rc<RefCell<Option<Services>>>,
    first_frame: bool,
}

impl MedChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let event_bus = EventBus::new();
        let services = Rc::new(RefCell::new(None));

        Self::bootstrap(event_bus.clone(), services.clone(), cc.egui_ctx.clone());

        Self {
            ui_state: UiState::new(),
            event_bus,
            services,
            first_frame: true,
        }
    }

    /// Load config and history, then attach the session (async)
    fn bootstrap(event_bus: EventBus, slot: Rc<RefCell<Option<Services>>>, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let detected = auto_detect_storage();
            let config = Self::restore_config(detected.as_ref()).await;

            let storage = match &config.storage.backend {
                StorageBackendType::Auto => detected,
                backend => open_storage(backend),
            };
            let backend = storage.backend_name().to_string();

            let store = ConversationStore::load(storage, config.storage.key.clone()).await;
            let session = ChatSession::new(store, event_bus)
                .with_fallback_reply(config.fallback_reply.clone());
            session.announce();

            let reply: Rc<dyn ReplyPort> = Rc::new(HttpReplyClient::from_config(&config));
            log::info!("Session ready, replies from {}", config.endpoint);

            *slot.borrow_mut() = Some(Services {
                session: Rc::new(RefCell::new(session)),
                reply,
                backend,
            });
            ctx.request_repaint();
        });
    }

    /// Read the saved config, falling back to defaults
    async fn restore_config(storage: &dyn StoragePort) -> ChatConfig {
        match storage.get(CONFIG_STORAGE_KEY).await {
            Ok(Some(data)) => match ChatConfig::from_json(&data) {
                Ok(config) => {
                    log::info!("Config restored from storage");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring saved config: {}", e);
                    ChatConfig::default()
                }
            },
            Ok(None) => ChatConfig::default(),
            Err(e) => {
                log::warn!("Config unavailable: {}", e);
                ChatConfig::default()
            }
        }
    }

    fn session(&self) -> Option<Rc<RefCell<ChatSession>>> {
        self.services.borrow().as_ref().map(|s| s.session.clone())
    }
}

impl eframe::App for MedChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        if !self.ui_state.ready && self.services.borrow().is_some() {
            self.ui_state.mark_ready();
        }

        // Drain events from the chat session
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        let backend = self
            .services
            .borrow()
            .as_ref()
            .map(|s| s.backend.clone());

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.ui_state.show_sidebar, "History")
                    .clicked()
                {
                    self.ui_state.show_sidebar = !self.ui_state.show_sidebar;
                }
                ui.separator();
                ui.label(
                    RichText::new("Medical Assistant")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                if let Some(backend) = &backend {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("History: {}", backend))
                                .color(theme::TEXT_SECONDARY)
                                .small(),
                        );
                    });
                }
            });
        });

        // ── Conversation sidebar ─────────────────────────────
        if self.ui_state.show_sidebar {
            let mut action = None;
            SidePanel::left("history_panel")
                .min_width(220.0)
                .max_width(300.0)
                .show(ctx, |ui| {
                    action = sidebar::sidebar_panel(ui, &mut self.ui_state);
                });
            if let Some(action) = action {
                self.dispatch_sidebar(action, ctx);
            }
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if let Some(user_msg) = chat::chat_panel(ui, &mut self.ui_state) {
                self.dispatch_message(user_msg, ctx);
            }
        });
    }
}

impl MedChatApp {
    /// Run one turn. The session is not borrowed while the reply is pending.
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let Some((session, reply)) = self
            .services
            .borrow()
            .as_ref()
            .map(|s| (s.session.clone(), s.reply.clone()))
        else {
            log::warn!("Message dropped, history is still loading");
            return;
        };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let begun = session.borrow_mut().begin_turn(&text).await;
            let pending = match begun {
                Ok(Some(pending)) => pending,
                Ok(None) => return,
                Err(e) => {
                    log::warn!("Message not sent: {}", e);
                    ctx.request_repaint();
                    return;
                }
            };
            ctx.request_repaint();

            let result = reply.ask(pending.text()).await;
            let outcome = session.borrow_mut().finish_turn(pending, result).await;
            log::debug!("Turn outcome: {:?}", outcome);
            ctx.request_repaint();
        });
    }

    fn dispatch_sidebar(&self, action: SidebarAction, ctx: &egui::Context) {
        let Some(session) = self.session() else {
            return;
        };
        let ctx = ctx.clone();

        match action {
            SidebarAction::Select(id) => {
                session.borrow_mut().select_conversation(&id);
            }
            SidebarAction::New => {
                wasm_bindgen_futures::spawn_local(async move {
                    session.borrow_mut().new_conversation().await;
                    ctx.request_repaint();
                });
            }
            SidebarAction::Delete(id) => {
                wasm_bindgen_futures::spawn_local(async move {
                    session.borrow_mut().delete_conversation(&id).await;
                    ctx.request_repaint();
                });
            }
        }
    }
}
