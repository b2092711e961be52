use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use eframe::egui;

use super::{MapDocument, MapError};

/// Where the background map load stands.
#[derive(Debug, Clone)]
pub enum MapStatus {
    Loading,
    Ready(Arc<MapDocument>),
    /// The load failed; the message was already logged.
    Failed(String),
}

/// One-shot background load of the map document.
///
/// The load starts on construction and is never cancelled. The UI thread
/// calls [`MapLoader::poll`] every frame to pick the result up.
pub struct MapLoader {
    status: MapStatus,
    receiver: Option<Receiver<Result<MapDocument, MapError>>>,
}

impl MapLoader {
    pub fn spawn(path: PathBuf, ctx: Option<egui::Context>) -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::Builder::new()
            .name("map-loader".to_string())
            .spawn(move || {
                tracing::debug!(path = %path.display(), "loading map");
                let result = MapDocument::open(&path);
                // The receiver is gone if the app already shut down.
                let _ = sender.send(result);
                if let Some(ctx) = ctx {
                    ctx.request_repaint();
                }
            })
            .map(|_| Self {
                status: MapStatus::Loading,
                receiver: Some(receiver),
            })
            .unwrap_or_else(|e| {
                tracing::error!("cannot start map loader: {e}");
                Self::failed(e.to_string())
            })
    }

    /// Load on the calling thread. Used where there is no frame loop to poll
    /// from, such as export.
    pub fn blocking(path: PathBuf) -> Self {
        let status = match MapDocument::open(&path) {
            Ok(doc) => MapStatus::Ready(Arc::new(doc)),
            Err(e) => {
                tracing::error!("error loading map: {e}");
                MapStatus::Failed(e.to_string())
            }
        };
        Self {
            status,
            receiver: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: MapStatus::Failed(message),
            receiver: None,
        }
    }

    /// Pick up a finished load. Returns true on the frame the status changes.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        let status = match receiver.try_recv() {
            Ok(Ok(doc)) => {
                tracing::info!(?doc, "map loaded");
                MapStatus::Ready(Arc::new(doc))
            }
            Ok(Err(e)) => {
                tracing::error!("error loading map: {e}");
                MapStatus::Failed(e.to_string())
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("map loader exited without a result");
                MapStatus::Failed("map loader exited".to_string())
            }
        };
        self.status = status;
        self.receiver = None;
        true
    }

    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    pub fn document(&self) -> Option<&Arc<MapDocument>> {
        match &self.status {
            MapStatus::Ready(doc) => Some(doc),
            _ => None,
        }
    }
}
