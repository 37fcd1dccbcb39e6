use super::frames::{julian_centuries, normalize_deg, obliquity_deg};

/// Geocentric solar position from the low-accuracy series (good to well
/// under 0.01 degrees, far below the mount's pointing resolution).
#[derive(Debug, Clone, Copy)]
pub struct SunGeo {
    /// Apparent ecliptic longitude, degrees.
    pub apparent_longitude_deg: f64,
    /// Earth-Sun distance, astronomical units.
    pub distance_au: f64,
}

pub fn geocentric(jd: f64) -> SunGeo {
    let t = julian_centuries(jd);

    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    let true_longitude = mean_longitude + center;
    let true_anomaly = mean_anomaly + center.to_radians();
    let distance_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    let omega = (125.04 - 1_934.136 * t).to_radians();
    let apparent_longitude_deg =
        normalize_deg(true_longitude - 0.005_69 - 0.004_78 * omega.sin());

    SunGeo {
        apparent_longitude_deg,
        distance_au,
    }
}

/// Obliquity corrected by the same nutation term used for the apparent
/// longitude.
pub fn apparent_obliquity_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let omega = (125.04 - 1_934.136 * t).to_radians();
    obliquity_deg(jd) + 0.002_56 * omega.cos()
}
