use bytes::Bytes;
use std::sync::Mutex;

/// Latest encoded frame, handed from the capture loop to any number of
/// readers.
///
/// Holds at most one frame. `publish` replaces it, `get` returns a cheap
/// clone of whatever is there without waiting for the next one. Readers
/// never see a partial frame since the slot only ever swaps whole `Bytes`.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    slot: Mutex<Option<Bytes>>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, frame: Bytes) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(frame);
    }

    pub fn get(&self) -> Option<Bytes> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    pub fn has_frame(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
