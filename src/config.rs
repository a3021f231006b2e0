use clap::Parser;
use thiserror::Error;

/// Immutable per-run session configuration: the identity pair and the
/// server authority the channel address is built from. Resolved once at
/// startup and passed to the controller; never re-read afterwards.
#[derive(Debug, Clone, Parser)]
#[command(name = "chatterbox", about = "Two-party WebSocket chat client")]
pub struct SessionConfig {
    /// Identity stamped on outbound frames and used to classify inbound
    /// ones as self-authored.
    #[arg(long, env = "CHATTERBOX_USERNAME")]
    pub username: String,

    /// Identity of the conversation partner.
    #[arg(long, env = "CHATTERBOX_PEER")]
    pub peer: String,

    /// Chat server authority (host:port).
    #[arg(long, env = "CHATTERBOX_SERVER", default_value = "127.0.0.1:8000")]
    pub server: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("identity `{0}` is empty or contains characters outside [A-Za-z0-9_.@+-]")]
    InvalidIdentity(String),
}

impl SessionConfig {
    /// Both identities are interpolated into the channel address, so they
    /// are restricted to the server's username alphabet up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for identity in [&self.username, &self.peer] {
            if !valid_identity(identity) {
                return Err(ConfigError::InvalidIdentity(identity.clone()));
            }
        }
        Ok(())
    }

    /// Address of the two-party chat channel on the server.
    pub fn channel_url(&self) -> String {
        format!(
            "ws://{}/ws/chat/{}/{}/",
            self.server, self.username, self.peer
        )
    }
}

fn valid_identity(identity: &str) -> bool {
    !identity.is_empty()
        && identity
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: &str, peer: &str) -> SessionConfig {
        SessionConfig {
            username: username.to_string(),
            peer: peer.to_string(),
            server: "127.0.0.1:8000".to_string(),
        }
    }

    #[test]
    fn channel_url_interpolates_both_identities() {
        assert_eq!(
            config("alice", "bob").channel_url(),
            "ws://127.0.0.1:8000/ws/chat/alice/bob/"
        );
    }

    #[test]
    fn identities_outside_the_username_alphabet_are_rejected() {
        assert!(config("alice", "bob").validate().is_ok());
        assert!(config("al.ice-2", "b_ob+x@y").validate().is_ok());
        assert!(config("", "bob").validate().is_err());
        assert!(config("alice", "bob/../eve").validate().is_err());
        assert!(config("al ice", "bob").validate().is_err());
    }
}
