use crate::controllers::interactive::data::rendered_frame::RenderedFrame;
use crate::controllers::interactive::ports::output_sink::OutputSink;
use crate::core::actions::render::fill_tiles::fill_tile_bands;
use crate::core::actions::render::ports::pixel_function::PixelFunction;
use crate::core::actions::staleness::StalenessProbe;
use crate::core::data::render_request::RenderRequest;
use crate::core::data::render_result::RenderResult;
use crate::core::util::tile_bands::{band_rows, tile_band_count, worker_band_range};
use log::{debug, trace};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Generation value reserved for "shut down"; the live counter starts above
/// it and only ever grows, so no real pass can collide with it.
const SHUTDOWN_GENERATION: u64 = 0;

/// Everything one pass needs, snapshotted together under the lock so a
/// worker can never pair a request with another generation's buffer.
#[derive(Clone)]
struct PassInput {
    request: RenderRequest,
    result: Arc<RenderResult>,
    started: Instant,
}

struct Slots {
    input: Option<PassInput>,
    output: Option<RenderedFrame>,
    notify_pending: bool,
}

struct SharedState {
    /// Read lock-free at staleness checkpoints; bumped only while `slots` is
    /// held, which is what makes the locked re-check at publication
    /// authoritative.
    generation: AtomicU64,
    slots: Mutex<Slots>,
    input_changed: Condvar,
    function: Arc<dyn PixelFunction>,
    sink: Arc<dyn OutputSink>,
    worker_count: usize,
}

/// The progressive rendering engine: a fixed pool of workers, a
/// generation-versioned input slot, and a debounced output slot.
///
/// `set_input` supersedes whatever is in flight; workers notice at their next
/// checkpoint and abandon the stale pass. A pass that completes publishes its
/// frame and chains the next, finer pass until tile size 1.
pub struct RenderingEngine {
    shared: Arc<SharedState>,
    workers: Vec<JoinHandle<()>>,
}

impl RenderingEngine {
    /// Coarsest pass granularity; must be a power of two so the refinement
    /// chain halves cleanly down to 1.
    pub const INITIAL_TILE_SIZE: u32 = 64;
    pub const DEFAULT_WORKER_COUNT: usize = 7;

    pub fn new(
        function: Arc<dyn PixelFunction>,
        sink: Arc<dyn OutputSink>,
        worker_count: NonZeroUsize,
    ) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(SHUTDOWN_GENERATION + 1),
            slots: Mutex::new(Slots {
                input: None,
                output: None,
                notify_pending: false,
            }),
            input_changed: Condvar::new(),
            function,
            sink,
            worker_count: worker_count.get(),
        });

        let workers = (0..worker_count.get())
            .map(|worker_index| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || Self::worker_loop(&shared, worker_index))
            })
            .collect();

        Self { shared, workers }
    }

    /// Installs a new request as the current generation and wakes the pool.
    /// Returns the generation assigned to it. Never blocks on computation;
    /// any in-flight pass for an earlier generation becomes stale.
    pub fn set_input(&self, request: RenderRequest) -> u64 {
        let generation = {
            let mut slots = self.shared.slots.lock().unwrap();
            self.shared.install_input(&mut slots, request)
        };
        self.shared.input_changed.notify_all();

        generation
    }

    /// The most recently published complete frame, or `None` before the
    /// first publication. Draining clears the pending notification, so the
    /// next publication will notify again.
    #[must_use]
    pub fn get_output(&self) -> Option<RenderedFrame> {
        let mut slots = self.shared.slots.lock().unwrap();
        slots.notify_pending = false;

        slots.output.clone()
    }

    /// Signals the shutdown generation and joins the pool. Workers abandon
    /// any in-flight pass at their next checkpoint. Terminal: the engine
    /// cannot be restarted, and `&mut self` keeps callers from racing
    /// `set_input` against teardown.
    pub fn shutdown(&mut self) {
        {
            let _slots = self.shared.slots.lock().unwrap();
            self.shared
                .generation
                .store(SHUTDOWN_GENERATION, Ordering::SeqCst);
        }
        self.shared.input_changed.notify_all();

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }

    fn worker_loop(shared: &SharedState, worker_index: usize) {
        let mut last_generation = SHUTDOWN_GENERATION;

        loop {
            let (generation, pass) = {
                let mut slots = shared.slots.lock().unwrap();
                loop {
                    let current = shared.generation.load(Ordering::Acquire);
                    if current != last_generation {
                        last_generation = current;
                        if current == SHUTDOWN_GENERATION {
                            return;
                        }
                        if let Some(pass) = slots.input.clone() {
                            break (current, pass);
                        }
                        // Construction-time generation with nothing installed
                        // yet: fall through and wait for real input.
                    }
                    slots = shared.input_changed.wait(slots).unwrap();
                }
            };

            Self::render_pass(shared, generation, &pass, worker_index);
        }
    }

    fn render_pass(
        shared: &SharedState,
        generation: u64,
        pass: &PassInput,
        worker_index: usize,
    ) {
        let probe = || shared.generation.load(Ordering::Acquire) != generation;

        let request = &pass.request;
        let band_count = tile_band_count(request.height, request.tile_size);
        let bands = worker_band_range(band_count, worker_index, shared.worker_count);
        let rows = band_rows(bands.clone(), request.tile_size, request.height);

        let mut writer = pass.result.image().band(rows);
        if fill_tile_bands(&mut writer, request, bands, shared.function.as_ref(), &probe).is_err() {
            // Superseded: the buffer belongs to a dead generation and will
            // never be read, so there is nothing to undo.
            return;
        }

        if probe.is_stale() {
            return;
        }

        if pass.result.finish_worker() == shared.worker_count {
            Self::finish_pass(shared, generation, pass);
        }
    }

    /// Last-worker-out duty: publish the frame and chain the refined pass.
    fn finish_pass(shared: &SharedState, generation: u64, pass: &PassInput) {
        // Every worker of this generation has finished writing, so the
        // snapshot races nothing and can stay outside the lock.
        let frame = RenderedFrame {
            generation,
            tile_size: pass.request.tile_size,
            render_duration: pass.started.elapsed(),
            pixel_buffer: pass.result.image().snapshot(),
        };

        let fire = {
            let mut slots = shared.slots.lock().unwrap();

            // Authoritative staleness check: the generation can only move
            // under this lock, so a pass that is still current here is
            // guaranteed not to have been superseded between its last
            // checkpoint and publication.
            if shared.generation.load(Ordering::Acquire) != generation {
                return;
            }

            debug!(
                "pass complete: generation {} tile {} in {:?}",
                generation, pass.request.tile_size, frame.render_duration
            );

            slots.output = Some(frame);
            let fire = !slots.notify_pending;
            slots.notify_pending = true;

            if let Some(next) = pass.request.refined() {
                let next_generation = shared.install_input(&mut slots, next);
                trace!(
                    "refining: generation {} tile {}",
                    next_generation, next.tile_size
                );
            }

            fire
        };

        shared.input_changed.notify_all();
        if fire {
            shared.sink.notify();
        }
    }
}

impl SharedState {
    /// Single install path for external requests and finisher refinement,
    /// so chained passes cannot bypass or reorder around a caller's input.
    /// The caller must hold (and pass) the slots lock.
    fn install_input(&self, slots: &mut MutexGuard<'_, Slots>, request: RenderRequest) -> u64 {
        let result = Arc::new(RenderResult::new(request.width, request.height));
        slots.input = Some(PassInput {
            request,
            result,
            started: Instant::now(),
        });

        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Drop for RenderingEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
