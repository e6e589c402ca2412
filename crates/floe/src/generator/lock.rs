use core::cmp::Ordering;
use core::hint;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{instrument, trace, warn};

use crate::Result;
use crate::identity::{FlakeId, WorkerId};
use crate::time::{SystemClock, TimeSource};

/// Sentinel timestamp for a generator that has not issued yet.
const NEVER_ISSUED: i64 = i64::MIN;

/// The issuance watermark: timestamp and sequence of the most recently
/// issued identifier.
#[derive(Debug)]
struct GeneratorState {
    last_timestamp: i64,
    last_sequence: u16,
}

/// A lock-based flake identifier generator.
///
/// The generator owns the only mutable state of the subsystem — the
/// `(last_timestamp, last_sequence)` watermark — behind a single mutex,
/// making it the one coordination point for all concurrent callers.
/// Clones share that state; independent generator instances own
/// independent state and never contend with each other.
///
/// For a single instance, issued identifiers are strictly increasing by
/// `(timestamp, sequence)` in issuance order and never repeat, even under
/// concurrent callers and even if the clock occasionally runs backward:
/// both the sequence-exhaustion and the backward-clock condition are
/// waited out internally and surface to callers only as latency.
///
/// # Example
///
/// ```
/// use floe::{FlakeGenerator, FlakeId, WorkerId};
///
/// struct Invoice;
///
/// let generator = FlakeGenerator::new();
/// let worker = WorkerId::from_bytes([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]);
///
/// let first: FlakeId<Invoice> = generator.issue(worker)?;
/// let second: FlakeId<Invoice> = generator.issue(worker)?;
/// assert!(first < second);
/// # Ok::<(), floe::Error>(())
/// ```
#[derive(Clone)]
pub struct FlakeGenerator<T = SystemClock> {
    state: Arc<Mutex<GeneratorState>>,
    time: T,
}

impl FlakeGenerator<SystemClock> {
    /// Creates a generator driven by the system wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_time_source(SystemClock)
    }
}

impl Default for FlakeGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FlakeGenerator<T> {
    /// Creates a generator driven by `time`.
    ///
    /// The clock may be non-monotonic; backward readings are waited out at
    /// issuance. This is also the hook for deterministic clocks in tests.
    pub fn with_time_source(time: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(GeneratorState {
                last_timestamp: NEVER_ISSUED,
                last_sequence: 0,
            })),
            time,
        }
    }

    /// Issues a new identifier for entity type `E` at the current clock
    /// reading.
    ///
    /// When the 16-bit sequence space of the current millisecond is
    /// exhausted, or the clock reads earlier than the watermark, the call
    /// busy-polls the clock — with the state lock released, so other
    /// callers keep issuing the moment the condition clears — and then
    /// retries. Neither condition is an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimestamp`] if the clock reads at or before the
    /// unix epoch; the watermark is left untouched.
    ///
    /// [`Error::InvalidTimestamp`]: crate::Error::InvalidTimestamp
    #[instrument(level = "trace", skip(self))]
    pub fn issue<E: ?Sized + 'static>(&self, worker_id: WorkerId) -> Result<FlakeId<E>> {
        loop {
            let (watermark, exhausted) = {
                let mut state = self.state.lock();
                let now = self.time.now_millis();
                match now.cmp(&state.last_timestamp) {
                    // Clock moved forward: the sequence resets.
                    Ordering::Greater => {
                        let id = FlakeId::from_parts(now, worker_id, 0)?;
                        state.last_timestamp = now;
                        state.last_sequence = 0;
                        return Ok(id);
                    }
                    Ordering::Equal if state.last_sequence < u16::MAX => {
                        let sequence = state.last_sequence + 1;
                        let id = FlakeId::from_parts(now, worker_id, sequence)?;
                        state.last_sequence = sequence;
                        return Ok(id);
                    }
                    // Sequence space exhausted for this millisecond.
                    Ordering::Equal => (state.last_timestamp, true),
                    // Clock ran backward.
                    Ordering::Less => (state.last_timestamp, false),
                }
            };
            if exhausted {
                trace!(watermark, "sequence exhausted, waiting for the next tick");
                self.spin_until(watermark, true);
            } else {
                warn!(watermark, "clock ran backward, waiting for it to catch up");
                self.spin_until(watermark, false);
            }
        }
    }

    /// Busy-polls the clock until it passes (`strictly_after`) or reaches
    /// the watermark. Runs with the state lock released, so a waiting
    /// caller never blocks the others.
    fn spin_until(&self, watermark: i64, strictly_after: bool) {
        loop {
            let now = self.time.now_millis();
            let caught_up = if strictly_after {
                now > watermark
            } else {
                now >= watermark
            };
            if caught_up {
                return;
            }
            hint::spin_loop();
        }
    }
}
