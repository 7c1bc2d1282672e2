//! Signal collection for the environment-integrity scorer.
//!
//! A [`ProbeSource`] reads raw runtime properties; [`SignalCollector`]
//! turns them into a [`ProbeBundle`], isolating every probe so one failure
//! only degrades that probe to its "unknown" sentinel.
//!
//! Two sources ship with the crate:
//! - [`HostProbeSource`] reads the native host (sysfs, procfs, Android
//!   build properties, `os_info`).
//! - [`SnapshotProbeSource`] replays probes reported by a remote client
//!   (for example a browser) as JSON.

pub mod error;
pub mod host;
pub mod snapshot;
pub mod source;

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use envguard_scorer::probe::UNKNOWN_PIXEL_RATIO;
use envguard_scorer::{Locale, ProbeBundle, Verdict, classify_with_locale};

pub use error::{ProbeError, SnapshotError};
pub use host::HostProbeSource;
pub use snapshot::{ProbeSnapshot, SnapshotProbeSource};
pub use source::{GpuInfo, Probe, ProbeSource, TouchCapability};

/// Collects a fresh [`ProbeBundle`] from a [`ProbeSource`] on every call.
#[derive(Debug, Clone)]
pub struct SignalCollector<S> {
    source: S,
}

impl<S: ProbeSource> SignalCollector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read every probe. Never fails: unreadable probes become sentinels.
    pub fn collect(&self) -> ProbeBundle {
        let source = &self.source;

        let user_agent = read(Probe::UserAgent, || source.user_agent()).unwrap_or_default();
        let platform = read(Probe::Platform, || source.platform()).unwrap_or_default();
        let (screen_width, screen_height) =
            read(Probe::Screen, || source.screen_size()).unwrap_or_default();
        let device_pixel_ratio = read(Probe::PixelRatio, || source.device_pixel_ratio())
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .unwrap_or(UNKNOWN_PIXEL_RATIO);
        let hardware_concurrency =
            read(Probe::HardwareConcurrency, || source.hardware_concurrency()).unwrap_or_default();
        let device_memory_gib = read(Probe::DeviceMemory, || source.device_memory_gib())
            .filter(|gib| gib.is_finite() && *gib >= 0.0)
            .unwrap_or_default();
        let touch = read(Probe::Touch, || source.touch()).unwrap_or_default();
        let gpu = read(Probe::Gpu, || source.gpu()).unwrap_or_default();

        ProbeBundle {
            user_agent,
            platform,
            screen_width,
            screen_height,
            device_pixel_ratio,
            hardware_concurrency,
            device_memory_gib,
            touch_supported: touch.supported,
            max_touch_points: touch.max_points,
            gpu_renderer: gpu.renderer,
            gpu_vendor: gpu.vendor,
        }
    }

    /// Collect fresh probes and classify them.
    pub fn classify(&self, locale: Locale) -> Verdict {
        classify_with_locale(&self.collect(), locale)
    }
}

thread_local! {
    static READING_PROBE: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Wrap the process panic hook once so panics raised while this thread reads
/// a probe are not printed. They are logged by [`read`] instead. Panics
/// anywhere else still reach the previous hook.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !READING_PROBE.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Read one probe, treating both errors and panics as "unavailable".
fn read<T>(probe: Probe, read_probe: impl FnOnce() -> Result<T, ProbeError>) -> Option<T> {
    install_quiet_panic_hook();
    READING_PROBE.with(|reading| reading.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(read_probe));
    READING_PROBE.with(|reading| reading.set(false));

    match outcome {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            tracing::debug!(%probe, error = %err, "probe unavailable, using sentinel");
            None
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%probe, panic = message, "probe panicked, using sentinel");
            None
        }
    }
}
