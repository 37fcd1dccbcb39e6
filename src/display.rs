use crate::tracker::Readout;

/// Presentation-only consumer of per-cycle readouts.
pub trait DisplaySink: Send {
    fn present(&mut self, readout: &Readout);
}

/// Human-oriented sink writing one log line per cycle.
pub struct LogSink;

impl DisplaySink for LogSink {
    fn present(&mut self, readout: &Readout) {
        let observer = &readout.observer;
        let sample = &readout.sample;
        let rates = match &readout.rates {
            Some(r) => format!(
                "alt {:.7}°/s az {:.7}°/s",
                r.alt_rate_deg_s, r.az_rate_deg_s
            ),
            None => "pending".to_string(),
        };
        log::info!(
            "{} | obs {:.4}° {:.4}° {:.1} m | {} alt {:.2}° az {:.2}° phase {:.2}% | rates {}",
            observer.epoch,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.elevation_m,
            readout.body,
            sample.altitude_deg,
            sample.azimuth_deg,
            sample.phase_pct,
            rates
        );
    }
}

/// Machine-oriented sink emitting one JSON object per cycle on stdout.
pub struct JsonSink;

impl DisplaySink for JsonSink {
    fn present(&mut self, readout: &Readout) {
        match serde_json::to_string(readout) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("failed to serialize readout: {e}"),
        }
    }
}
