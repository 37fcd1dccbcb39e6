use std::io;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::decoder::Decoder;
use super::types::{Decoded, Fix};

/// One line-oriented telemetry transport. `Ok(None)` is a read timeout; the
/// timeout bounds how long cancellation can go unobserved.
pub trait LineSource: Send {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

const BACKOFF_INITIAL: Duration = Duration::from_millis(250);
const BACKOFF_MAX: Duration = Duration::from_secs(5);
const BACKOFF_SLICE: Duration = Duration::from_millis(100);

/// Reads raw lines until cancelled, publishing every complete fix into the
/// single-slot hand-off. A newer fix replaces an unconsumed one, so the
/// consumer only ever sees the most recent telemetry.
pub fn run_reader(
    mut source: impl LineSource,
    tx: watch::Sender<Option<Fix>>,
    token: CancellationToken,
) {
    let mut decoder = Decoder::new();
    let mut backoff = BACKOFF_INITIAL;

    while !token.is_cancelled() {
        match source.read_line() {
            Ok(Some(line)) => {
                backoff = BACKOFF_INITIAL;
                match decoder.decode(&line) {
                    Decoded::Fix(fix) => {
                        tx.send_replace(Some(fix));
                    }
                    Decoded::NoFix => log::debug!("telemetry reports no satellite lock"),
                    Decoded::Partial => {}
                    Decoded::Unrecognized => log::trace!("dropped unrecognized line"),
                }
            }
            Ok(None) => {
                // Quiet interval; loop around to re-check cancellation.
                backoff = BACKOFF_INITIAL;
            }
            Err(e) => {
                log::warn!("telemetry read failed: {e}; retrying in {backoff:?}");
                sleep_cancellable(backoff, &token);
                backoff = (backoff * 2).min(BACKOFF_MAX);
            }
        }
    }

    log::info!("telemetry reader stopped");
}

fn sleep_cancellable(total: Duration, token: &CancellationToken) {
    let mut remaining = total;
    while !remaining.is_zero() && !token.is_cancelled() {
        let slice = remaining.min(BACKOFF_SLICE);
        std::thread::sleep(slice);
        remaining -= slice;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Serves a fixed script of read results, then cancels the token so
    /// `run_reader` returns.
    struct ScriptedSource {
        steps: VecDeque<io::Result<Option<String>>>,
        token: CancellationToken,
    }

    impl ScriptedSource {
        fn new(
            steps: Vec<io::Result<Option<String>>>,
            token: CancellationToken,
        ) -> Self {
            Self {
                steps: steps.into(),
                token,
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn read_line(&mut self) -> io::Result<Option<String>> {
            match self.steps.pop_front() {
                Some(step) => step,
                None => {
                    self.token.cancel();
                    Ok(None)
                }
            }
        }
    }

    fn rmc() -> io::Result<Option<String>> {
        Ok(Some(
            "$GPRMC,132419.00,A,5406.22609,N,00054.12943,W,0.104,,110423,,,A*6E".into(),
        ))
    }

    fn gga(time: &str) -> io::Result<Option<String>> {
        Ok(Some(format!(
            "$GPGGA,{time},5406.22609,N,00054.12943,W,1,05,6.28,59.2,M,47.2,M,,*7A"
        )))
    }

    #[test]
    fn newest_fix_replaces_unconsumed_one() {
        let (tx, rx) = watch::channel(None);
        let token = CancellationToken::new();
        let source = ScriptedSource::new(
            vec![rmc(), gga("120000.00"), gga("120010.00")],
            token.clone(),
        );

        run_reader(source, tx, token);

        let fix = rx.borrow().clone().expect("a fix should be published");
        assert_eq!(fix.timestamp.to_rfc3339(), "2023-04-11T12:00:10+00:00");
    }

    #[test]
    fn io_errors_are_retried_not_fatal() {
        let (tx, rx) = watch::channel(None);
        let token = CancellationToken::new();
        let source = ScriptedSource::new(
            vec![
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "dropout")),
                rmc(),
                gga("120000.00"),
            ],
            token.clone(),
        );

        run_reader(source, tx, token);

        assert!(rx.borrow().is_some(), "fix after a transient fault");
    }

    #[test]
    fn invalid_telemetry_publishes_nothing() {
        let (tx, rx) = watch::channel(None);
        let token = CancellationToken::new();
        let source = ScriptedSource::new(
            vec![
                Ok(Some("$GPRMC,132421.00,V,,,,,,,120423,,,N*7C".into())),
                Ok(Some(
                    "$GPGGA,132420.00,5406.22609,N,00054.12943,W,0,00,,,M,,M,,*49".into(),
                )),
                Ok(Some("not telemetry at all".into())),
                Ok(None),
            ],
            token.clone(),
        );

        run_reader(source, tx, token);

        assert!(rx.borrow().is_none());
    }

    #[test]
    fn cancellation_is_observed_before_reading() {
        struct Unreadable;
        impl LineSource for Unreadable {
            fn read_line(&mut self) -> io::Result<Option<String>> {
                panic!("must not be read after cancellation");
            }
        }

        let (tx, _rx) = watch::channel(None);
        let token = CancellationToken::new();
        token.cancel();

        run_reader(Unreadable, tx, token);
    }
}
