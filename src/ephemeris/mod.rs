mod frames;
mod moon;
mod sun;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumString};

pub const AU_KM: f64 = 149_597_870.7;
const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Bodies the mount can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
}

/// Apparent position of a body as seen from a specific place and time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BodyPosition {
    pub altitude_deg: f64,
    /// Degrees from north through east, in [0, 360).
    pub azimuth_deg: f64,
    /// Illuminated fraction of the disk, percent.
    pub phase_pct: f64,
}

/// Topocentric altitude/azimuth and phase of a body for an observer at the
/// given geographic position and instant.
pub fn topocentric(
    body: Body,
    latitude_deg: f64,
    longitude_deg: f64,
    at: DateTime<Utc>,
) -> BodyPosition {
    let jd = frames::julian_day(at);
    let gmst = frames::gmst_deg(at);
    let sun = sun::geocentric(jd);

    let horizontal = |ra_deg: f64, dec_deg: f64| {
        let hour_angle = gmst + longitude_deg - ra_deg;
        frames::horizontal_from_hour_angle(hour_angle, dec_deg, latitude_deg)
    };

    match body {
        Body::Sun => {
            let (ra, dec) = frames::equatorial_from_ecliptic(
                sun.apparent_longitude_deg,
                0.0,
                sun::apparent_obliquity_deg(jd),
            );
            let (altitude_deg, azimuth_deg) = horizontal(ra, dec);
            BodyPosition {
                altitude_deg,
                azimuth_deg,
                phase_pct: 100.0,
            }
        }
        Body::Moon => {
            let moon = moon::geocentric(jd);
            let (ra, dec) = frames::equatorial_from_ecliptic(
                moon.longitude_deg,
                moon.latitude_deg,
                frames::obliquity_deg(jd),
            );
            let (mut altitude_deg, azimuth_deg) = horizontal(ra, dec);

            // The Moon is close enough that parallax pulls it visibly toward
            // the horizon.
            let parallax_deg = (EARTH_RADIUS_KM / moon.distance_km).asin().to_degrees();
            altitude_deg -= parallax_deg * altitude_deg.to_radians().cos();

            BodyPosition {
                altitude_deg,
                azimuth_deg,
                phase_pct: illuminated_pct(&sun, &moon),
            }
        }
    }
}

/// Illuminated fraction of the lunar disk, percent, from the phase angle.
fn illuminated_pct(sun: &sun::SunGeo, moon: &moon::MoonGeo) -> f64 {
    let cos_elongation = moon.latitude_deg.to_radians().cos()
        * (moon.longitude_deg - sun.apparent_longitude_deg)
            .to_radians()
            .cos();
    let elongation = cos_elongation.clamp(-1.0, 1.0).acos();

    let sun_km = sun.distance_au * AU_KM;
    let phase_angle =
        (sun_km * elongation.sin()).atan2(moon.distance_km - sun_km * elongation.cos());
    (1.0 + phase_angle.cos()) / 2.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn moon_phase_matches_worked_example() {
        // 1992 April 12.0: illuminated fraction 0.6786.
        let pct = illuminated_pct(&sun::geocentric(2_448_724.5), &moon::geocentric(2_448_724.5));
        assert!((pct - 67.86).abs() < 2.0, "got {pct}");
    }

    #[test]
    fn sun_phase_is_always_full() {
        let pos = topocentric(Body::Sun, 54.1, -0.9, utc("2023-04-11T13:24:20Z"));
        assert_eq!(pos.phase_pct, 100.0);
    }

    #[test]
    fn sun_is_near_zenith_at_equatorial_noon_on_equinox() {
        let pos = topocentric(Body::Sun, 0.0, 0.0, utc("2023-03-20T12:00:00Z"));
        assert!(pos.altitude_deg > 80.0, "altitude {}", pos.altitude_deg);
    }

    #[test]
    fn sun_is_below_horizon_at_equatorial_midnight() {
        let pos = topocentric(Body::Sun, 0.0, 0.0, utc("2023-03-20T00:00:00Z"));
        assert!(pos.altitude_deg < -60.0, "altitude {}", pos.altitude_deg);
    }

    #[test]
    fn positions_stay_in_range_over_a_month() {
        let start = utc("2023-04-01T00:00:00Z");
        for hours in (0..24 * 30).step_by(7) {
            let at = start + chrono::Duration::hours(hours);
            for body in [Body::Sun, Body::Moon] {
                let pos = topocentric(body, 54.1, -0.9, at);
                assert!((0.0..360.0).contains(&pos.azimuth_deg));
                assert!((-90.0..=90.0).contains(&pos.altitude_deg));
                assert!((0.0..=100.0).contains(&pos.phase_pct));
            }
        }
    }

    #[test]
    fn body_names_parse_for_operator_commands() {
        assert_eq!("sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("moon".parse::<Body>().unwrap(), Body::Moon);
        assert!("mars".parse::<Body>().is_err());
        assert_eq!(Body::Moon.to_string(), "moon");
        // JSON readouts use the same casing as the log lines.
        assert_eq!(serde_json::to_string(&Body::Sun).unwrap(), "\"sun\"");
    }
}
