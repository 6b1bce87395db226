use crate::controllers::interactive::{OutputSink, RenderingEngine};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use crate::core::fractals::escape_time::EscapeTime;
use log::info;
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    Timeout { waited: Duration },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { waited } => {
                write!(f, "render did not reach full resolution within {:?}", waited)
            }
        }
    }
}

impl Error for SnapshotError {}

/// Blocking [`OutputSink`]: the engine raises a flag, the waiting consumer
/// thread drains it.
#[derive(Default)]
struct WakeupSink {
    woken: Mutex<bool>,
    wakeup: Condvar,
}

impl WakeupSink {
    /// Waits until the engine notifies or `timeout` elapses; returns whether
    /// a notification arrived.
    fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut woken = self.woken.lock().unwrap();
        while !*woken {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            let (guard, _) = self.wakeup.wait_timeout(woken, remaining).unwrap();
            woken = guard;
        }
        *woken = false;

        true
    }
}

impl OutputSink for WakeupSink {
    fn notify(&self) {
        *self.woken.lock().unwrap() = true;
        self.wakeup.notify_one();
    }
}

/// Drives the engine through a full refinement chain for one viewport and
/// hands the final full-resolution frame to a file presenter.
///
/// This is the batch consumer of the engine: it demonstrates the intended
/// drain loop (wake, re-read `get_output`, repaint) without any windowing.
pub struct SnapshotController<P: FilePresenterPort> {
    presenter: P,
    workers: NonZeroUsize,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> SnapshotController<P> {
    const PASS_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(presenter: P, workers: NonZeroUsize) -> Self {
        Self {
            presenter,
            workers,
            buffer: None,
        }
    }

    pub fn render(&mut self, request: RenderRequest) -> Result<(), SnapshotError> {
        let sink = Arc::new(WakeupSink::default());
        let engine = RenderingEngine::new(
            Arc::new(EscapeTime::default()),
            Arc::clone(&sink) as Arc<dyn OutputSink>,
            self.workers,
        );

        let generation = engine.set_input(request);
        info!(
            "rendering {}x{} from tile size {}",
            request.width, request.height, request.tile_size
        );

        loop {
            if !sink.wait(Self::PASS_TIMEOUT) {
                return Err(SnapshotError::Timeout {
                    waited: Self::PASS_TIMEOUT,
                });
            }

            // Coalesced notifications are expected: only the freshest frame
            // matters, intermediate passes may come and go unseen.
            let Some(frame) = engine.get_output() else {
                continue;
            };

            info!(
                "pass complete: tile size {} in {:?}",
                frame.tile_size, frame.render_duration
            );

            if frame.tile_size == 1 && frame.generation >= generation {
                self.buffer = Some(frame.pixel_buffer);
                return Ok(());
            }
        }
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath)?;
        }

        Ok(())
    }
}
