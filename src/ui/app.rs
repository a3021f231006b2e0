use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChannelCommand, ChannelEvent, ChatMessage};
use crate::config::SessionConfig;
use crate::media;
use crate::network::ChannelState;

use super::components::{chat_area, input_bar};
use super::state::{AppState, RenderedMessage};

pub struct ChatApp {
    config: SessionConfig,
    state: AppState,
    command_sender: mpsc::Sender<ChannelCommand>,
    event_receiver: mpsc::Receiver<ChannelEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: SessionConfig,
        command_sender: mpsc::Sender<ChannelCommand>,
        event_receiver: mpsc::Receiver<ChannelEvent>,
    ) -> Self {
        Self {
            config,
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_channel_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChannelEvent::Opened => self.state.connection = ChannelState::Open,
                ChannelEvent::Closed => self.state.connection = ChannelState::Closed,
                ChannelEvent::MessageReceived(msg) => self.ingest_message(msg, ctx),
                ChannelEvent::ImageSent => self.state.image_send_pending = false,
                ChannelEvent::SendRejected(reason) => {
                    self.state.image_send_pending = false;
                    self.state.status_line = Some(reason);
                }
            }
        }
    }

    fn ingest_message(&mut self, msg: ChatMessage, ctx: &egui::Context) {
        let mut entry = RenderedMessage::build(&msg, &self.config.username);

        if let Some(payload) = &msg.image {
            match media::decode_payload(payload) {
                Ok(pixels) => {
                    let size = [pixels.width() as usize, pixels.height() as usize];
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
                    entry.image = Some(ctx.load_texture(
                        format!("chat-image-{}", self.state.messages.len()),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                // The frame still renders; only the picture is lost.
                Err(err) => log::warn!("Dropping undecodable image payload: {err}"),
            }
        }

        self.state.push_message(entry);
    }

    fn send_text(&mut self, content: String) {
        if let Err(err) = self.command_sender.try_send(ChannelCommand::SendText(content)) {
            log::warn!("Failed to queue text send: {err}");
        }
    }

    fn pick_and_send_image(&mut self) {
        if self.state.image_send_pending {
            return;
        }
        let picked = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file();
        // A cancelled dialog is a no-op, not an error.
        let Some(path) = picked else {
            return;
        };

        self.state.status_line = None;
        self.state.image_send_pending = true;
        if let Err(err) = self.command_sender.try_send(ChannelCommand::SendImage(path)) {
            log::warn!("Failed to queue image send: {err}");
            self.state.image_send_pending = false;
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.config.peer);
            let (dot, color, label) = match self.state.connection {
                ChannelState::Connecting => ("○", egui::Color32::YELLOW, "connecting"),
                ChannelState::Open => ("●", egui::Color32::GREEN, "online"),
                ChannelState::Closed => ("○", egui::Color32::GRAY, "disconnected"),
            };
            ui.colored_label(color, dot);
            ui.label(egui::RichText::new(label).weak());
        });

        if let Some(status) = &self.state.status_line {
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_channel_events(ctx);

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            let actions = input_bar::render(ui, &mut self.state);
            if let Some(content) = actions.send_text {
                self.send_text(content);
            }
            if actions.pick_image {
                self.pick_and_send_image();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            ui.separator();
            chat_area::render(ui, &mut self.state);
        });

        ctx.request_repaint();
    }
}
