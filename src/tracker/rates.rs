use crate::ephemeris::BodyPosition;

use super::sample::RateEstimate;

/// Central-difference rates over a window centered on the epoch.
pub fn estimate(minus: &BodyPosition, plus: &BodyPosition, window_s: f64) -> RateEstimate {
    RateEstimate {
        alt_rate_deg_s: (plus.altitude_deg - minus.altitude_deg) / window_s,
        az_rate_deg_s: azimuth_rate(minus.azimuth_deg, plus.azimuth_deg, window_s),
    }
}

/// Rate across the 0/360 azimuth seam. A crossing shows up as one endpoint
/// near 360 and the other near 0, and the naive difference is off by a full
/// turn.
pub fn azimuth_rate(az_minus_deg: f64, az_plus_deg: f64, window_s: f64) -> f64 {
    if az_minus_deg > 270.0 && az_plus_deg < 90.0 {
        (360.0 + az_plus_deg - az_minus_deg) / window_s
    } else if az_minus_deg < 90.0 && az_plus_deg > 270.0 {
        (az_plus_deg - 360.0 - az_minus_deg) / window_s
    } else {
        (az_plus_deg - az_minus_deg) / window_s
    }
}
