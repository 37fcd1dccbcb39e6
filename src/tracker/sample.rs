use serde::Serialize;

use crate::ephemeris::{Body, BodyPosition};

use super::observer::Observer;

/// Angular velocity estimated by central differencing. Absent until a second
/// fix has established the differencing window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateEstimate {
    pub alt_rate_deg_s: f64,
    pub az_rate_deg_s: f64,
}

/// Per-cycle record handed to the display sink.
#[derive(Debug, Clone, Serialize)]
pub struct Readout {
    pub observer: Observer,
    pub body: Body,
    pub sample: BodyPosition,
    pub rates: Option<RateEstimate>,
}
