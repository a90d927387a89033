use std::{
    path::PathBuf,
    sync::{
        Arc,
        mpsc::{self, Receiver, TryRecvError},
    },
};

use crate::assets::decode::{Bitmap, decode_background, load_background};

/// Observable state of an in-flight background decode.
#[derive(Clone, Debug)]
pub enum LoadState {
    /// Decode has not finished yet.
    Pending,
    /// Decode finished with a usable bitmap.
    Ready(Arc<Bitmap>),
    /// The file was missing or not an image.
    Failed,
}

impl LoadState {
    /// The bitmap, if the decode succeeded.
    pub fn bitmap(&self) -> Option<Arc<Bitmap>> {
        match self {
            LoadState::Ready(b) => Some(b.clone()),
            LoadState::Pending | LoadState::Failed => None,
        }
    }
}

/// Handle to a background image decoding on the rayon pool.
///
/// Rendering never waits on this: a caller that renders before the decode lands simply has
/// no image to put in its params.
pub struct BackgroundLoader {
    rx: Option<Receiver<Option<Bitmap>>>,
    state: LoadState,
}

impl BackgroundLoader {
    /// Start decoding the file at `path`.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn_with(move || load_background(&path))
    }

    /// Start decoding encoded bytes already in memory.
    pub fn spawn_bytes(bytes: Vec<u8>) -> Self {
        Self::spawn_with(move || decode_background(&bytes))
    }

    fn spawn_with<F>(job: F) -> Self
    where
        F: FnOnce() -> Option<Bitmap> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        rayon::spawn(move || {
            // Receiver may already be gone if the handle was dropped.
            let _ = tx.send(job());
        });
        Self {
            rx: Some(rx),
            state: LoadState::Pending,
        }
    }

    /// Non-blocking check.
    pub fn poll(&mut self) -> LoadState {
        let received = self.rx.as_ref().map(Receiver::try_recv);
        match received {
            Some(Ok(result)) => self.finish(result),
            Some(Err(TryRecvError::Disconnected)) => self.finish(None),
            Some(Err(TryRecvError::Empty)) | None => {}
        }
        self.state.clone()
    }

    /// Block until the decode finishes.
    pub fn wait(mut self) -> Option<Arc<Bitmap>> {
        if let Some(rx) = self.rx.take() {
            let result = rx.recv().ok().flatten();
            self.finish(result);
        }
        self.state.bitmap()
    }

    fn finish(&mut self, result: Option<Bitmap>) {
        self.rx = None;
        self.state = match result {
            Some(bmp) => LoadState::Ready(Arc::new(bmp)),
            None => LoadState::Failed,
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
