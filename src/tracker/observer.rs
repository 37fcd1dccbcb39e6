use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::telemetry::Fix;

/// Observer frame anchored at the first satellite lock. The geographic
/// position stays fixed for the process lifetime; only the epoch advances
/// with telemetry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
    pub epoch: DateTime<Utc>,
}

impl Observer {
    pub fn from_fix(fix: &Fix) -> Self {
        Self {
            latitude_deg: fix.latitude_deg,
            longitude_deg: fix.longitude_deg,
            elevation_m: fix.altitude_m,
            epoch: fix.timestamp,
        }
    }
}
