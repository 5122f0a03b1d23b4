use std::sync::mpsc;

use crate::registry::ShapeKey;
use crate::shape::DrawCommand;

/// An `add_shape` call made away from the ticking thread.
pub(crate) struct ShapeRequest {
    pub key: ShapeKey,
    pub command: DrawCommand,
}

/// Handle for adding shapes from other threads.
///
/// The registry itself is single-threaded. Requests sent through this handle
/// wait in a queue until the owning thread's next
/// [`tick`](crate::DebugShapeRegistry::tick), which applies them in send order
/// before drawing. Obtain via [`DebugShapeRegistry::sender`](crate::DebugShapeRegistry::sender).
#[derive(Clone)]
pub struct ShapeSender {
    sender: mpsc::Sender<ShapeRequest>,
}

impl ShapeSender {
    pub(crate) fn new(sender: mpsc::Sender<ShapeRequest>) -> Self {
        Self { sender }
    }

    /// Queue a command under `key`. An empty key gets a fresh unique one.
    ///
    /// Returns the key the command will be stored under. If the registry has
    /// already been dropped the command is discarded.
    pub fn add_shape(&self, command: DrawCommand, key: impl Into<ShapeKey>) -> ShapeKey {
        let key = key.into().or_generate();
        let request = ShapeRequest {
            key: key.clone(),
            command,
        };
        if self.sender.send(request).is_err() {
            log::debug!("Debug shape registry gone; dropping shape '{key}'");
        }
        key
    }
}
