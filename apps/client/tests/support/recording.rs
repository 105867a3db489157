// Recording doubles for the Connection and Renderer capabilities.

use sackson_client::errors::domain::ActionError;
use sackson_client::protocol::OutReason;
use sackson_client::{ClientError, Connection, Phase, PhaseData, RenderFrame, Renderer};

#[derive(Debug, Default)]
pub struct RecordingConnection {
    pub sent: Vec<String>,
    /// When set, every send fails with a transport error.
    pub fail_sends: bool,
}

impl RecordingConnection {
    pub fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent
            .iter()
            .map(|text| serde_json::from_str(text).expect("sent text is JSON"))
            .collect()
    }
}

impl Connection for RecordingConnection {
    fn send(&mut self, text: String) -> Result<(), ClientError> {
        if self.fail_sends {
            return Err(ClientError::transport("socket gone"));
        }
        self.sent.push(text);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub phase: Phase,
    pub data: PhaseData,
    pub enabled: bool,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderedFrame>,
    pub rejections: Vec<ActionError>,
    pub server_errors: Vec<(Option<String>, String)>,
    pub endings: Vec<OutReason>,
}

impl RecordingRenderer {
    pub fn last_frame(&self) -> &RenderedFrame {
        self.frames.last().expect("at least one frame rendered")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.frames.push(RenderedFrame {
            phase: frame.phase,
            data: frame.data.clone(),
            enabled: frame.enabled,
        });
    }

    fn action_rejected(&mut self, error: &ActionError) {
        self.rejections.push(error.clone());
    }

    fn server_error(&mut self, code: Option<&str>, text: &str) {
        self.server_errors
            .push((code.map(str::to_string), text.to_string()));
    }

    fn session_ended(&mut self, reason: &OutReason) {
        self.endings.push(reason.clone());
    }
}

/// Recording renderer that also reports every frame over a channel, so a test
/// can wait for the session to catch up before sending the next event.
#[derive(Debug)]
pub struct NotifyingRenderer {
    pub inner: RecordingRenderer,
    frames_tx: tokio::sync::mpsc::UnboundedSender<RenderedFrame>,
}

impl NotifyingRenderer {
    pub fn new(frames_tx: tokio::sync::mpsc::UnboundedSender<RenderedFrame>) -> Self {
        Self {
            inner: RecordingRenderer::default(),
            frames_tx,
        }
    }
}

impl Renderer for NotifyingRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.inner.render(frame);
        let _ = self.frames_tx.send(self.inner.last_frame().clone());
    }

    fn action_rejected(&mut self, error: &ActionError) {
        self.inner.action_rejected(error);
    }

    fn server_error(&mut self, code: Option<&str>, text: &str) {
        self.inner.server_error(code, text);
    }

    fn session_ended(&mut self, reason: &OutReason) {
        self.inner.session_ended(reason);
    }
}
