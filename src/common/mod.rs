pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChannelCommand;
pub use events::ChannelEvent;
pub use types::ChatMessage;
