use std::error::Error;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::{ChannelCommand, ChannelEvent, ChatMessage};
use crate::config::SessionConfig;
use crate::media;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Lifecycle of the one channel a session holds. Only `Open` permits
/// sends; `Closed` is terminal, there is no reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// Owns the socket for the whole session. The UI reaches it only through
/// the command sender; everything inbound leaves through the event sender.
pub struct ChannelClient {
    config: SessionConfig,
    event_sender: mpsc::Sender<ChannelEvent>,
    command_receiver: mpsc::Receiver<ChannelCommand>,
    state: ChannelState,
    sink: Option<WsSink>,
}

impl ChannelClient {
    pub fn new(
        config: SessionConfig,
        event_sender: mpsc::Sender<ChannelEvent>,
        command_receiver: mpsc::Receiver<ChannelCommand>,
    ) -> Self {
        Self {
            config,
            event_sender,
            command_receiver,
            state: ChannelState::Connecting,
            sink: None,
        }
    }

    pub async fn run(mut self) -> Result<(), Box<dyn Error>> {
        let url = self.config.channel_url();
        log::info!("Opening channel {url}");

        match connect_async(url.as_str()).await {
            Ok((socket, _)) => {
                let (sink, stream) = socket.split();
                self.sink = Some(sink);
                self.state = ChannelState::Open;
                log::info!("Channel established");
                self.emit(ChannelEvent::Opened).await;
                self.drive(stream).await;

                self.state = ChannelState::Closed;
                self.sink = None;
                self.emit(ChannelEvent::Closed).await;
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to open channel {url}: {err}");
                self.state = ChannelState::Closed;
                self.emit(ChannelEvent::Closed).await;
                Err(Box::new(err))
            }
        }
    }

    /// Event loop for the open channel: UI commands down, server frames up.
    /// Returns when the socket is done; the channel never reopens.
    async fn drive(&mut self, mut stream: WsStream) {
        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        // UI side is gone; nothing left to serve.
                        None => break,
                    }
                }
                frame = stream.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => self.handle_frame(text.as_str()).await,
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Channel closed by server");
                            break;
                        }
                        // Ping/pong and binary frames are not part of the
                        // wire contract.
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            log::error!("Channel error: {err}");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, command: ChannelCommand) {
        if self.state != ChannelState::Open {
            log::warn!("Channel is not open; dropping {command:?}");
            return;
        }

        match command {
            ChannelCommand::SendText(content) => {
                let Some(msg) = ChatMessage::from_text_input(&content, &self.config.username)
                else {
                    return;
                };
                self.transmit(&msg).await;
            }
            ChannelCommand::SendImage(path) => match media::encode_file(&path).await {
                Ok(payload) => {
                    let msg = ChatMessage::from_image_payload(payload, &self.config.username);
                    self.transmit(&msg).await;
                    self.emit(ChannelEvent::ImageSent).await;
                }
                Err(err) => {
                    log::warn!("Rejected image {}: {err}", path.display());
                    self.emit(ChannelEvent::SendRejected(err.to_string())).await;
                }
            },
        }
    }

    async fn transmit(&mut self, msg: &ChatMessage) {
        let json = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to serialize frame: {err}");
                return;
            }
        };
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.send(Message::Text(json.into())).await {
            log::error!("Failed to transmit frame: {err}");
        }
    }

    /// Inbound frames that fail to parse are dropped with a diagnostic;
    /// one bad frame must not take the session down.
    async fn handle_frame(&mut self, text: &str) {
        match serde_json::from_str::<ChatMessage>(text) {
            Ok(msg) => self.emit(ChannelEvent::MessageReceived(msg)).await,
            Err(err) => log::warn!("Dropping malformed frame: {err}"),
        }
    }

    async fn emit(&self, event: ChannelEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to emit channel event: {err}");
        }
    }
}
