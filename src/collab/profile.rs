//! Profiling seam.
//!
//! The engine announces the start of a named operation and receives a
//! guard; the measurement stops when the guard drops, which covers early
//! returns without any bookkeeping in the engine.

use std::time::Instant;

/// Hook for timing named operations.
pub trait Profiler: Send + Sync {
    /// Starts measuring `name`; the measurement ends when the returned
    /// guard is dropped.
    fn start(&self, name: &str) -> ProfileGuard;
}

/// Stops its measurement on drop.
pub struct ProfileGuard {
    finish: Option<Box<dyn FnOnce() + Send>>,
}

impl ProfileGuard {
    /// Builds a guard that runs `finish` when dropped.
    pub fn new(finish: impl FnOnce() + Send + 'static) -> Self {
        Self {
            finish: Some(Box::new(finish)),
        }
    }

    /// A guard that does nothing on drop.
    #[must_use]
    pub fn noop() -> Self {
        Self { finish: None }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        if let Some(finish) = self.finish.take() {
            finish();
        }
    }
}

impl std::fmt::Debug for ProfileGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileGuard")
            .field("armed", &self.finish.is_some())
            .finish()
    }
}

/// Profiler that emits `tracing` events with elapsed wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceProfiler;

impl Profiler for TraceProfiler {
    fn start(&self, name: &str) -> ProfileGuard {
        let name = name.to_owned();
        let started = Instant::now();
        tracing::debug!(operation = %name, "profile start");
        ProfileGuard::new(move || {
            tracing::debug!(
                operation = %name,
                elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                "profile stop"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn guard_runs_finish_on_drop() {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);
        let guard = ProfileGuard::new(move || flag.store(true, Ordering::SeqCst));
        assert!(!stopped.load(Ordering::SeqCst));
        drop(guard);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[test]
    fn noop_guard_is_inert() {
        drop(ProfileGuard::noop());
    }
}
