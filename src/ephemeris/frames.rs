use chrono::{DateTime, Utc};

pub fn julian_day(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 86_400_000.0 + 2_440_587.5
}

pub fn julian_centuries(jd: f64) -> f64 {
    (jd - 2_451_545.0) / 36_525.0
}

/// Mean obliquity of the ecliptic (IAU 1980 series), degrees.
pub fn obliquity_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    23.439_291_11 - 0.013_004_167 * t - 1.638_9e-7 * t * t + 5.036_1e-7 * t * t * t
}

/// Right ascension and declination from ecliptic longitude/latitude, degrees.
pub fn equatorial_from_ecliptic(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();
    (normalize_deg(ra.to_degrees()), dec.to_degrees())
}

/// Greenwich mean sidereal time, degrees.
pub fn gmst_deg(at: DateTime<Utc>) -> f64 {
    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));
    normalize_deg(sidereal.to_degrees())
}

/// Horizontal coordinates from the local hour angle. Azimuth is measured
/// from north through east, in [0, 360).
pub fn horizontal_from_hour_angle(
    hour_angle_deg: f64,
    dec_deg: f64,
    lat_deg: f64,
) -> (f64, f64) {
    let h = hour_angle_deg.to_radians();
    let dec = dec_deg.to_radians();
    let lat = lat_deg.to_radians();

    let alt = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos()).asin();
    // atan2 form gives azimuth from south, westward positive.
    let az_south = h.sin().atan2(h.cos() * lat.sin() - dec.tan() * lat.cos());
    (
        alt.to_degrees(),
        normalize_deg(az_south.to_degrees() + 180.0),
    )
}

pub fn normalize_deg(value: f64) -> f64 {
    value.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_day_of_j2000_epoch() {
        let at = "2000-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert!((julian_day(at) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn meridian_crossing_south_of_zenith_points_south() {
        let (alt, az) = horizontal_from_hour_angle(0.0, 0.0, 45.0);
        assert!((alt - 45.0).abs() < 1e-9);
        assert!((az - 180.0).abs() < 1e-9);
    }

    #[test]
    fn meridian_crossing_north_of_zenith_points_north() {
        let (alt, az) = horizontal_from_hour_angle(0.0, 60.0, 45.0);
        assert!((alt - 75.0).abs() < 1e-9);
        assert!(az.abs() < 1e-9 || (az - 360.0).abs() < 1e-9);
    }

    #[test]
    fn azimuth_stays_in_range() {
        for h in [-170.0, -90.0, -10.0, 0.0, 10.0, 90.0, 170.0] {
            for dec in [-60.0, 0.0, 60.0] {
                let (_, az) = horizontal_from_hour_angle(h, dec, 54.0);
                assert!((0.0..360.0).contains(&az), "h {h} dec {dec} az {az}");
            }
        }
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(720.5), 0.5);
    }
}
