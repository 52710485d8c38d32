//! # Background Probe
//!
//! Runs a slow build-id resolution off the session thread.
//!
//! The probe body executes on a short-lived worker thread and hands its
//! result back over a channel. The session thread waits on that channel with
//! a short timeout so it regains control every poll interval; once the probe
//! has been running for longer than the notice threshold it prints a single
//! "searching" line so the user knows why the session paused.
//!
//! ## Ownership
//!
//! The worker only sees what it was moved: the resolver and the build-id.
//! Suggestion state stays with the session thread and is updated from the
//! returned result, so nothing is shared and nothing needs a lock.
//!
//! Probes are not cancellable. [`ProbeController::run`] returns only when the
//! worker has finished (the external query carries its own timeout).

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{SuggestError, SuggestResult};

/// Printed once per prompt cycle when a probe is slow.
pub const SEARCHING_NOTICE: &str = "Searching for packages to install that could improve debugging...";

/// Wait loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTiming
{
    /// Longest the session thread blocks before checking the clock again.
    pub poll_interval: Duration,
    /// Running time after which the searching notice is printed.
    pub notice_after: Duration,
}

impl Default for ProbeTiming
{
    fn default() -> Self
    {
        Self {
            poll_interval: Duration::from_millis(50),
            notice_after: Duration::from_secs(1),
        }
    }
}

/// Runs probes and owns the one-shot notice flag
#[derive(Debug, Default)]
pub struct ProbeController
{
    timing: ProbeTiming,
    notice_shown: bool,
}

impl ProbeController
{
    /// Create a controller with custom timing.
    #[must_use]
    pub fn new(timing: ProbeTiming) -> Self
    {
        Self {
            timing,
            notice_shown: false,
        }
    }

    /// Run `job` on a worker thread and wait for its result
    ///
    /// Writes [`SEARCHING_NOTICE`] to `out` if the job outlives the notice
    /// threshold and the notice has not been shown since the last
    /// [`reset_notice`](Self::reset_notice).
    ///
    /// ## Errors
    ///
    /// - `Io` if the worker thread cannot be spawned
    /// - `ProbeDisconnected` if the worker died without producing a result
    pub fn run<T, F>(&mut self, job: F, out: &mut dyn Write) -> SuggestResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("debugpkg-probe".to_string())
            .spawn(move || {
                // The receiver outlives the worker; a failed send means the
                // session thread is already gone.
                let _ = sender.send(job());
            })?;

        let started = Instant::now();
        let result = loop {
            match receiver.recv_timeout(self.timing.poll_interval) {
                Ok(value) => break Ok(value),
                Err(RecvTimeoutError::Timeout) => {
                    if !self.notice_shown && started.elapsed() >= self.timing.notice_after {
                        self.notice_shown = true;
                        if let Err(err) = writeln!(out, "{SEARCHING_NOTICE}").and_then(|()| out.flush()) {
                            warn!("failed to print searching notice: {err}");
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break Err(SuggestError::ProbeDisconnected),
            }
        };

        let _ = handle.join();
        debug!(elapsed_ms = started.elapsed().as_millis(), "probe finished");
        result
    }

    /// Allow the notice to be printed again. Called before each prompt.
    pub fn reset_notice(&mut self)
    {
        self.notice_shown = false;
    }

    /// Whether the notice has been printed since the last reset.
    #[must_use]
    pub fn notice_shown(&self) -> bool
    {
        self.notice_shown
    }
}
