//! The scan loop: generate everything, then probe serially with jitter.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::Rng;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};

use crate::candidates::{self, Candidate};
use crate::probe::{ProbeOutcome, Prober};
use crate::target::Target;

/// Upper bound of the pause after each probe.
pub const MAX_DELAY: Duration = Duration::from_millis(500);

/// Shared stop request. Cloning yields a handle to the same signal.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called, immediately
    /// if it already was.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|stop| *stop).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub max_delay: Duration,
    pub max_runtime: Option<Duration>,
    /// Aborts an in-flight probe or pause and ends the scan.
    pub stop: StopSignal,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_delay: MAX_DELAY,
            max_runtime: None,
            stop: StopSignal::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub candidates: usize,
    pub probed: usize,
    pub found: usize,
    pub failed: usize,
    pub interrupted: bool,
}

pub struct Scanner<P, R> {
    prober: P,
    rng: R,
    settings: ScanSettings,
}

impl<P: Prober, R: Rng> Scanner<P, R> {
    pub fn new(prober: P, rng: R, settings: ScanSettings) -> Self {
        Self {
            prober,
            rng,
            settings,
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Probes every candidate once, writing each hit to `out` as it is found.
    pub async fn run<W: Write>(
        &mut self,
        target: &Target,
        webshells: &[String],
        directories: &[String],
        agent: &str,
        out: &mut W,
    ) -> Result<ScanSummary> {
        let list = candidates::generate(target, webshells, directories, &mut self.rng);
        info!("Generated {} candidates for {}", list.len(), target);
        self.probe_all(&list, agent, out).await
    }

    /// Probes an already materialized candidate list in order.
    pub async fn probe_all<W: Write>(
        &mut self,
        list: &[Candidate],
        agent: &str,
        out: &mut W,
    ) -> Result<ScanSummary> {
        let started = Instant::now();
        let stop = self.settings.stop.clone();
        let mut summary = ScanSummary {
            candidates: list.len(),
            ..Default::default()
        };

        for candidate in list {
            if self.should_stop(started) {
                summary.interrupted = true;
                break;
            }

            let outcome = tokio::select! {
                outcome = self.prober.probe(&candidate.url, agent) => outcome,
                _ = stop.triggered() => {
                    warn!("Scan interrupted while probing {}", candidate.url);
                    summary.interrupted = true;
                    break;
                }
            };
            summary.probed += 1;

            match &outcome {
                ProbeOutcome::Status(code) => debug!("{} -> {}", candidate.url, code),
                ProbeOutcome::Unreachable(e) => {
                    summary.failed += 1;
                    debug!("{} -> {}", candidate.url, e);
                }
            }

            if outcome.is_found() {
                summary.found += 1;
                writeln!(out, "{}", candidate.url).context("Failed to write finding")?;
                out.flush().context("Failed to write finding")?;
            }

            let pause = self.jitter();
            tokio::select! {
                _ = sleep(pause) => {}
                _ = stop.triggered() => {}
            }
        }

        Ok(summary)
    }

    fn should_stop(&self, started: Instant) -> bool {
        if self.settings.stop.is_triggered() {
            warn!("Scan interrupted");
            return true;
        }
        if let Some(limit) = self.settings.max_runtime {
            if started.elapsed() >= limit {
                warn!("Maximum runtime of {:?} reached, stopping", limit);
                return true;
            }
        }
        false
    }

    fn jitter(&mut self) -> Duration {
        if self.settings.max_delay.is_zero() {
            return Duration::ZERO;
        }
        let secs = self.rng.gen_range(0.0..=self.settings.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}
