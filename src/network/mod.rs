pub mod client;

pub use client::{ChannelClient, ChannelState};
