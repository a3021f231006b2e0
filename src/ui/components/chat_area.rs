use eframe::egui;

use crate::linkify::Span;
use crate::ui::state::{AppState, RenderedMessage, Side};

/// Inbound images are width-capped in the panel.
const IMAGE_MAX_WIDTH: f32 = 200.0;

const OWN_BUBBLE: egui::Color32 = egui::Color32::from_rgb(13, 110, 253);
const PEER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(108, 117, 125);
const MENTION_BUBBLE: egui::Color32 = egui::Color32::from_rgb(255, 193, 7);

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        // New arrivals jump the panel straight to its bottom.
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in &state.messages {
                render_entry(ui, entry);
            }

            // One animated scroll to the bottom on the first frame; after
            // that, stick-to-bottom takes over.
            if !state.initial_scroll_done {
                state.initial_scroll_done = true;
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn render_entry(ui: &mut egui::Ui, entry: &RenderedMessage) {
    let layout = match entry.side {
        Side::Own => egui::Layout::top_down(egui::Align::Max),
        Side::Peer => egui::Layout::top_down(egui::Align::Min),
    };

    ui.with_layout(layout, |ui| {
        ui.add_space(4.0);

        if !entry.spans.is_empty() {
            let fill = if entry.mention {
                MENTION_BUBBLE
            } else {
                match entry.side {
                    Side::Own => OWN_BUBBLE,
                    Side::Peer => PEER_BUBBLE,
                }
            };
            egui::Frame::new()
                .fill(fill)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.75);
                    render_spans(ui, &entry.spans);
                });
        }

        if let Some(texture) = &entry.image {
            let mut size = texture.size_vec2();
            if size.x > IMAGE_MAX_WIDTH {
                size *= IMAGE_MAX_WIDTH / size.x;
            }
            ui.add(egui::Image::new(texture).fit_to_exact_size(size));
        }

        ui.label(egui::RichText::new(&entry.timestamp).weak().small());
    });
}

/// Plain spans are labels, link spans are hyperlinks that open externally.
/// There is no markup path, so message content needs no escaping.
fn render_spans(ui: &mut egui::Ui, spans: &[Span]) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let rich = egui::RichText::new(span.as_str()).color(egui::Color32::WHITE);
            match span {
                Span::Text(_) => {
                    ui.label(rich);
                }
                Span::Link(url) => {
                    ui.hyperlink_to(rich.underline(), url);
                }
            }
        }
    });
}
