use eframe::egui;

use crate::ui::state::AppState;

/// What the user asked for this frame.
#[derive(Default)]
pub struct ComposerActions {
    /// Raw composer content to send; already known to be non-blank.
    pub send_text: Option<String>,
    pub pick_image: bool,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> ComposerActions {
    let mut actions = ComposerActions::default();
    let mut send = false;

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if ui.button("Send").clicked() {
            send = true;
        }

        let image_button =
            ui.add_enabled(!state.image_send_pending, egui::Button::new("Image"));
        if image_button.clicked() {
            actions.pick_image = true;
        }

        let response = ui.add_sized(
            ui.available_size(),
            egui::TextEdit::singleline(&mut state.input_text).hint_text("Type a message"),
        );
        if state.focus_composer {
            state.focus_composer = false;
            response.request_focus();
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            // Keep typing without re-clicking the field.
            response.request_focus();
        }
    });

    if send && !state.input_text.trim().is_empty() {
        actions.send_text = Some(state.input_text.clone());
        state.input_text.clear();
    }

    actions
}
