mod common;
mod config;
mod linkify;
mod media;
mod network;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use config::SessionConfig;
use network::ChannelClient;
use ui::ChatApp;

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let config = SessionConfig::parse();
    if let Err(err) = config.validate() {
        log::error!("Invalid session configuration: {err}");
        std::process::exit(2);
    }

    run_session(config).await
}

async fn run_session(config: SessionConfig) -> Result<(), eframe::Error> {
    // UI -> channel
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Channel -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let client = ChannelClient::new(config.clone(), event_tx, cmd_rx);
    tokio::spawn(async move {
        if let Err(err) = client.run().await {
            log::error!("Channel task terminated: {err}");
        }
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Chatterbox",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!(
                "Session started as {} talking to {}",
                config.username,
                config.peer
            );

            Ok(Box::new(ChatApp::new(
                cc,
                config.clone(),
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}
