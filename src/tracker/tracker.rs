use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::control::ControlState;
use crate::display::DisplaySink;
use crate::ephemeris::{self, Body};
use crate::mount::Dispatcher;
use crate::telemetry::Fix;

use super::observer::Observer;
use super::rates;
use super::sample::Readout;

#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// How long one receive may block before cancellation is re-checked.
    pub recv_timeout: Duration,
    /// Full width of the central-differencing window.
    pub rate_window: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            recv_timeout: Duration::from_secs(2),
            rate_window: Duration::from_secs(20),
        }
    }
}

/// Tracking state: nothing exists until the first valid fix anchors the
/// observer, and there is no way back.
enum TrackState {
    Uninitialized,
    Tracking { observer: Observer },
}

impl TrackState {
    /// Anchors on the first fix; afterwards advances only the epoch.
    /// Returns the current observer and whether this fix did the anchoring.
    fn advance(&mut self, fix: &Fix) -> (Observer, bool) {
        match self {
            TrackState::Uninitialized => {
                let observer = Observer::from_fix(fix);
                *self = TrackState::Tracking { observer };
                (observer, true)
            }
            TrackState::Tracking { observer } => {
                observer.epoch = fix.timestamp;
                (*observer, false)
            }
        }
    }
}

/// Handle to the spawned tracking worker.
pub struct Tracker {
    join: JoinHandle<()>,
}

impl Tracker {
    pub fn spawn(
        config: TrackerConfig,
        rx: watch::Receiver<Option<Fix>>,
        control: Arc<ControlState>,
        dispatcher: Dispatcher,
        sink: Box<dyn DisplaySink>,
        token: CancellationToken,
    ) -> Self {
        let join = tokio::spawn(run_tracker_loop(
            config, rx, control, dispatcher, sink, token,
        ));
        Self { join }
    }

    pub async fn join(self) {
        let _ = self.join.await;
    }
}

async fn run_tracker_loop(
    config: TrackerConfig,
    mut rx: watch::Receiver<Option<Fix>>,
    control: Arc<ControlState>,
    dispatcher: Dispatcher,
    mut sink: Box<dyn DisplaySink>,
    token: CancellationToken,
) {
    let mut state = TrackState::Uninitialized;

    loop {
        let changed = tokio::select! {
            _ = token.cancelled() => break,
            changed = tokio::time::timeout(config.recv_timeout, rx.changed()) => changed,
        };
        match changed {
            // Expected during a GPS dropout; keep waiting.
            Err(_) => {
                log::debug!("no telemetry within {:?}", config.recv_timeout);
                continue;
            }
            Ok(Err(_)) => {
                log::info!("telemetry channel closed");
                break;
            }
            Ok(Ok(())) => {}
        }
        let Some(fix) = rx.borrow_and_update().clone() else {
            continue;
        };

        let readout = run_cycle(&config, &mut state, &fix, &control);
        sink.present(&readout);
        dispatcher.dispatch(&readout.sample);
    }

    log::info!("tracker stopped");
}

/// One tracking cycle: fold the fix into the observer frame, compute the
/// apparent position, and estimate rates once the window exists.
fn run_cycle(
    config: &TrackerConfig,
    state: &mut TrackState,
    fix: &Fix,
    control: &ControlState,
) -> Readout {
    let (observer, anchored) = state.advance(fix);
    if anchored {
        log::info!(
            "observer anchored at {:.4}, {:.4}, {:.1} m",
            observer.latitude_deg,
            observer.longitude_deg,
            observer.elevation_m
        );
    }

    let body = control.target().unwrap_or(Body::Moon);
    let sample = ephemeris::topocentric(
        body,
        observer.latitude_deg,
        observer.longitude_deg,
        observer.epoch,
    );

    // The very first fix has no established window; rates wait for the next.
    let rates = if anchored {
        None
    } else {
        let half = chrono::Duration::milliseconds((config.rate_window.as_millis() / 2) as i64);
        let minus = ephemeris::topocentric(
            body,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.epoch - half,
        );
        let plus = ephemeris::topocentric(
            body,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.epoch + half,
        );
        Some(rates::estimate(
            &minus,
            &plus,
            config.rate_window.as_secs_f64(),
        ))
    };

    Readout {
        observer,
        body,
        sample,
        rates,
    }
}
