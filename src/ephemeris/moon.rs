use super::frames::{julian_centuries, normalize_deg};

/// Geocentric lunar position from the abridged ELP-2000/82 periodic series.
/// Truncated to the terms that matter at mount-pointing resolution
/// (≈0.01 degrees).
#[derive(Debug, Clone, Copy)]
pub struct MoonGeo {
    /// Ecliptic longitude, degrees.
    pub longitude_deg: f64,
    /// Ecliptic latitude, degrees.
    pub latitude_deg: f64,
    /// Earth-Moon distance, kilometers.
    pub distance_km: f64,
}

// Multiples of (D, M, M', F) with longitude coefficients in 1e-6 degrees and
// distance coefficients in 1e-3 km.
const LON_DIST_TERMS: [(i32, i32, i32, i32, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

// Multiples of (D, M, M', F) with latitude coefficients in 1e-6 degrees.
const LAT_TERMS: [(i32, i32, i32, i32, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

pub fn geocentric(jd: f64) -> MoonGeo {
    let t = julian_centuries(jd);

    let mean_longitude = normalize_deg(
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t * t
            + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0,
    );
    let elongation = normalize_deg(
        297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t * t
            + t * t * t / 545_868.0
            - t * t * t * t / 113_065_000.0,
    );
    let sun_anomaly = normalize_deg(
        357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t + t * t * t / 24_490_000.0,
    );
    let moon_anomaly = normalize_deg(
        134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t * t
            + t * t * t / 69_699.0
            - t * t * t * t / 14_712_000.0,
    );
    let latitude_argument = normalize_deg(
        93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t * t
            - t * t * t / 3_526_000.0
            + t * t * t * t / 863_310_000.0,
    );

    // Planetary perturbation arguments.
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();

    // Terms involving the Sun's anomaly shrink with Earth's eccentricity.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let argument = |d: i32, m: i32, mp: i32, f: i32| {
        (f64::from(d) * elongation
            + f64::from(m) * sun_anomaly
            + f64::from(mp) * moon_anomaly
            + f64::from(f) * latitude_argument)
            .to_radians()
    };
    let damping = |m: i32| match m.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let mut sum_lon = 0.0;
    let mut sum_dist = 0.0;
    for (d, m, mp, f, lon_coeff, dist_coeff) in LON_DIST_TERMS {
        let arg = argument(d, m, mp, f);
        sum_lon += damping(m) * lon_coeff * arg.sin();
        sum_dist += damping(m) * dist_coeff * arg.cos();
    }
    sum_lon += 3_958.0 * a1.sin()
        + 1_962.0 * (mean_longitude - latitude_argument).to_radians().sin()
        + 318.0 * a2.sin();

    let mut sum_lat = 0.0;
    for (d, m, mp, f, lat_coeff) in LAT_TERMS {
        sum_lat += damping(m) * lat_coeff * argument(d, m, mp, f).sin();
    }
    sum_lat += -2_235.0 * mean_longitude.to_radians().sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - latitude_argument.to_radians()).sin()
        + 175.0 * (a1 + latitude_argument.to_radians()).sin()
        + 127.0 * (mean_longitude - moon_anomaly).to_radians().sin()
        - 115.0 * (mean_longitude + moon_anomaly).to_radians().sin();

    MoonGeo {
        longitude_deg: normalize_deg(mean_longitude + sum_lon / 1_000_000.0),
        latitude_deg: sum_lat / 1_000_000.0,
        distance_km: 385_000.56 + sum_dist / 1_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published worked example for 1992 April 12.0 TD.
    const JD: f64 = 2_448_724.5;

    #[test]
    fn position_matches_worked_example() {
        let moon = geocentric(JD);
        assert!(
            (moon.longitude_deg - 133.162_655).abs() < 0.05,
            "longitude {}",
            moon.longitude_deg
        );
        assert!(
            (moon.latitude_deg - -3.229_126).abs() < 0.05,
            "latitude {}",
            moon.latitude_deg
        );
        assert!(
            (moon.distance_km - 368_409.7).abs() < 200.0,
            "distance {}",
            moon.distance_km
        );
    }

    #[test]
    fn distance_stays_within_orbital_bounds() {
        for offset in 0..28 {
            let moon = geocentric(JD + f64::from(offset));
            assert!(
                (356_000.0..407_000.0).contains(&moon.distance_km),
                "day {offset}: {}",
                moon.distance_km
            );
            assert!(moon.latitude_deg.abs() < 5.4);
        }
    }
}
