use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::config::client::ClientConfig;
use crate::domain::action::PlayerIntent;
use crate::error::ClientError;
use crate::session::{Connection, Renderer, SessionClient};

/// `Connection` that queues outbound text for the socket writer.
#[derive(Debug, Clone)]
pub struct ChannelConnection {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelConnection {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl Connection for ChannelConnection {
    fn send(&mut self, text: String) -> Result<(), ClientError> {
        self.tx
            .send(text)
            .map_err(|_| ClientError::transport("outbound channel closed"))
    }
}

/// Connect to the join endpoint and run one session until the socket closes
/// or the intent stream ends.
///
/// Inbound frames, queued outbound text and user intents are handled by a
/// single task, one event at a time.
pub async fn run_session<R: Renderer>(
    config: &ClientConfig,
    renderer: R,
    mut intents: mpsc::UnboundedReceiver<PlayerIntent>,
) -> Result<SessionClient<ChannelConnection, R>, ClientError> {
    let url = config.join_url();
    let (stream, _) = connect_async(url.as_str()).await?;
    let (mut sink, mut source) = stream.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let mut session = SessionClient::new(ChannelConnection::new(out_tx), renderer, config.rules());
    info!(session_id = %session.session_id(), url = %url, "Connected");
    session.render_current();

    loop {
        tokio::select! {
            biased;

            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    session.on_message(text.as_str());
                    if session.controller().is_frozen() {
                        info!(session_id = %session.session_id(), "Session ended by the server");
                        if let Err(err) = sink.close().await {
                            debug!(error = %err, "Close handshake failed");
                        }
                        break;
                    }
                }
                Some(Ok(Message::Close(reason))) => {
                    debug!(session_id = %session.session_id(), ?reason, "Close frame received");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(session_id = %session.session_id(), error = %err, "[WS] Read failed");
                    break;
                }
                None => break,
            },
            Some(text) = out_rx.recv() => {
                if let Err(err) = sink.send(Message::Text(text.into())).await {
                    warn!(session_id = %session.session_id(), error = %err, "[WS] Write failed");
                    break;
                }
            }
            intent = intents.recv() => match intent {
                Some(intent) => {
                    if let Err(err) = session.submit(intent) {
                        debug!(session_id = %session.session_id(), code = %err.code(), "Intent not sent");
                    }
                }
                None => {
                    info!(session_id = %session.session_id(), "Input closed; leaving");
                    if let Err(err) = sink.close().await {
                        debug!(error = %err, "Close handshake failed");
                    }
                    break;
                }
            },
        }
    }

    session.on_close();
    Ok(session)
}
