//! Notifications a session sends to its host.

use image::RgbaImage;
use tokio::sync::mpsc;

/// Encoded output of [`EditingSession::export_image`](super::EditingSession::export_image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// PNG bytes
    pub blob: Vec<u8>,
    /// The same bytes as a `data:image/png;base64,` URI
    pub encoded_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An image was loaded and the surface resized to it.
    Opened { width: u32, height: u32 },
    /// An export finished.
    OutputProduced(ExportResult),
    /// The session was closed and its surface dropped.
    Closed,
}

/// Image handed to [`EditingSession::load_image`](super::EditingSession::load_image).
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Encoded file contents (PNG)
    Encoded(Vec<u8>),
    /// A `data:<mime>;base64,<payload>` URI
    DataUri(String),
    /// Already decoded pixels
    Raster(RgbaImage),
}

/// Fan-out of session events. Closed receivers are pruned on the next send.
#[derive(Debug, Default)]
pub(crate) struct EventHub {
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl EventHub {
    pub(crate) fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
