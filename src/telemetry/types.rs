use chrono::{DateTime, Utc};
use serde::Serialize;

/// A validated GPS reading assembled from both sentence kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

/// Outcome of decoding a single raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Complete reading with satellite lock.
    Fix(Fix),
    /// Recognized sentence reporting no satellite lock.
    NoFix,
    /// Recognized sentence consumed, but a complete reading still needs the
    /// complementary sentence kind.
    Partial,
    /// Not a sentence we handle, or one with malformed fields. Dropped.
    Unrecognized,
}
