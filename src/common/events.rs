use super::types::ChatMessage;

/// Events the channel task sends up to the UI.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// The channel reached its open state; sends are now possible.
    Opened,
    MessageReceived(ChatMessage),
    /// An image send finished; the picker may accept the next file.
    ImageSent,
    /// An image send was rejected before transmission, with a reason the
    /// UI can show.
    SendRejected(String),
    /// Terminal: the channel is gone and will not reconnect.
    Closed,
}
