use sackson_client::bin_support::commands::{self, Command, HELP};
use sackson_client::bin_support::console_renderer::ConsoleRenderer;
use sackson_client::ws::run_session;
use sackson_client::ClientConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // SACKSON_SERVER_URL, SACKSON_JOIN_PATH, SACKSON_MAX_BUY, SACKSON_PLAYER_TIMEOUT
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    println!("🎲 Joining {}", config.join_url());
    println!("{HELP}");

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();

    // Stdin reader: one command per line. Dropping the sender ends the session.
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match commands::parse_line(&line) {
                    Ok(Some(Command::Intent(intent))) => {
                        if intent_tx.send(intent).is_err() {
                            break;
                        }
                    }
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Quit)) => break,
                    Ok(None) => {}
                    Err(err) => println!("{err}"),
                },
                Ok(None) => break,
                Err(err) => {
                    error!(error = %err, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    let renderer = ConsoleRenderer::new(std::io::stdout());
    match run_session(&config, renderer, intent_rx).await {
        Ok(session) => {
            info!(
                session_id = %session.session_id(),
                phase = %session.controller().phase(),
                "Session ended"
            );
            // The stdin reader may still be blocked on a read.
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}
