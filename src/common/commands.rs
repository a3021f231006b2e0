use std::path::PathBuf;

/// Commands the UI sends down to the channel task.
#[derive(Debug, Clone)]
pub enum ChannelCommand {
    /// Raw composer content; the channel task trims it and drops it if
    /// nothing remains.
    SendText(String),
    /// Encode the picked file and transmit it as an image frame.
    SendImage(PathBuf),
}
