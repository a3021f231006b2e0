use chrono::Utc;

use crate::common::ChatMessage;
use crate::linkify::{self, Span};
use crate::network::ChannelState;

/// Which side of the panel an entry renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Authored by this session's user; right-aligned.
    Own,
    /// Anyone else; left-aligned.
    Peer,
}

/// One entry in the message panel. Built once when the frame arrives and
/// never mutated afterwards; the panel is strictly append-only.
pub struct RenderedMessage {
    pub side: Side,
    /// Pre-split text spans; empty when the frame carried no text.
    pub spans: Vec<Span>,
    /// Raw text contained an `@`, which flags a mention.
    pub mention: bool,
    pub image: Option<egui::TextureHandle>,
    /// Wall clock at render time, not message origination time; frames
    /// carry no timestamp.
    pub timestamp: String,
}

impl RenderedMessage {
    pub fn build(msg: &ChatMessage, own_username: &str) -> Self {
        let side = if msg.is_from(own_username) {
            Side::Own
        } else {
            Side::Peer
        };
        let text = msg.message.as_deref().unwrap_or("");
        Self {
            side,
            spans: linkify::split(text),
            mention: text.contains('@'),
            image: None,
            timestamp: Utc::now().format("%I:%M %p").to_string(),
        }
    }
}

/// Local state of the UI.
pub struct AppState {
    pub messages: Vec<RenderedMessage>,
    pub input_text: String,
    pub connection: ChannelState,
    /// One encode-and-send at a time; the picker is disabled while set.
    pub image_send_pending: bool,
    /// Last media rejection, shown under the header until the next send.
    pub status_line: Option<String>,
    pub focus_composer: bool,
    pub initial_scroll_done: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            connection: ChannelState::Connecting,
            image_send_pending: false,
            status_line: None,
            focus_composer: true,
            initial_scroll_done: false,
        }
    }

    pub fn push_message(&mut self, message: RenderedMessage) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(message: Option<&str>, username: &str) -> ChatMessage {
        ChatMessage {
            message: message.map(str::to_string),
            image: None,
            username: username.to_string(),
        }
    }

    #[test]
    fn own_frames_render_on_the_own_side() {
        let entry = RenderedMessage::build(&frame(Some("hello bob"), "alice"), "alice");
        assert_eq!(entry.side, Side::Own);
    }

    #[test]
    fn any_other_username_renders_on_the_peer_side() {
        let entry = RenderedMessage::build(&frame(Some("hi"), "bob"), "alice");
        assert_eq!(entry.side, Side::Peer);
        let entry = RenderedMessage::build(&frame(Some("hi"), "mallory"), "alice");
        assert_eq!(entry.side, Side::Peer);
    }

    #[test]
    fn mention_flag_follows_the_raw_text() {
        let entry = RenderedMessage::build(&frame(Some("hi @alice"), "alice"), "alice");
        assert!(entry.mention);
        let entry = RenderedMessage::build(&frame(Some("hi alice"), "alice"), "alice");
        assert!(!entry.mention);
    }

    #[test]
    fn mention_without_links_produces_plain_spans_only() {
        let entry = RenderedMessage::build(&frame(Some("hi @alice"), "bob"), "alice");
        assert_eq!(entry.spans, vec![Span::Text("hi @alice".to_string())]);
        assert!(entry.mention);
        assert_eq!(entry.side, Side::Peer);
    }

    #[test]
    fn url_in_own_message_becomes_a_link_span() {
        let entry =
            RenderedMessage::build(&frame(Some("see http://example.com"), "alice"), "alice");
        assert_eq!(entry.side, Side::Own);
        assert_eq!(
            entry.spans,
            vec![
                Span::Text("see ".to_string()),
                Span::Link("http://example.com".to_string()),
            ]
        );
    }

    #[test]
    fn frames_without_text_render_no_spans() {
        let entry = RenderedMessage::build(&frame(None, "bob"), "alice");
        assert!(entry.spans.is_empty());
        assert!(!entry.mention);
    }

    #[test]
    fn timestamp_is_twelve_hour_wall_clock() {
        let entry = RenderedMessage::build(&frame(Some("hi"), "bob"), "alice");
        let (clock, half) = entry.timestamp.split_once(' ').expect("HH:MM AM/PM");
        let (hours, minutes) = clock.split_once(':').expect("HH:MM");
        assert!((1..=12).contains(&hours.parse::<u32>().unwrap()));
        assert!(minutes.parse::<u32>().unwrap() < 60);
        assert!(half == "AM" || half == "PM");
    }

    #[test]
    fn panel_is_append_only() {
        let mut state = AppState::new();
        for i in 0..3 {
            let entry =
                RenderedMessage::build(&frame(Some(&format!("m{i}")), "bob"), "alice");
            state.push_message(entry);
        }
        let texts: Vec<_> = state
            .messages
            .iter()
            .map(|entry| entry.spans[0].as_str().to_string())
            .collect();
        assert_eq!(texts, vec!["m0", "m1", "m2"]);
    }
}
