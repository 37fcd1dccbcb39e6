use chrono::{NaiveDate, NaiveTime};

use super::types::{Decoded, Fix};

/// Assembles complete fixes from interleaved $GPRMC/$GPGGA sentences.
///
/// The calendar date arrives in RMC while time-of-day, position and altitude
/// arrive in GGA; the decoder keeps the last locked date so each GGA can be
/// stamped with a full timestamp. Both validity indicators must confirm a
/// satellite lock before anything is produced.
#[derive(Debug, Default)]
pub struct Decoder {
    date: Option<NaiveDate>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, line: &str) -> Decoded {
        let line = line.trim();
        let Some(start) = line.find('$') else {
            return Decoded::Unrecognized;
        };
        let line = &line[start..];

        if line.starts_with("$GPRMC") {
            self.decode_rmc(line)
        } else if line.starts_with("$GPGGA") {
            self.decode_gga(line)
        } else {
            Decoded::Unrecognized
        }
    }

    fn decode_rmc(&mut self, line: &str) -> Decoded {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 10 {
            return Decoded::Unrecognized;
        }

        // Status letter: A = lock, V = void. A void sentence must leave the
        // stored date untouched.
        match fields[2] {
            "A" => {}
            "V" => return Decoded::NoFix,
            _ => return Decoded::Unrecognized,
        }

        let Some(date) = parse_date(fields[9]) else {
            return Decoded::Unrecognized;
        };
        self.date = Some(date);
        Decoded::Partial
    }

    fn decode_gga(&mut self, line: &str) -> Decoded {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 10 {
            return Decoded::Unrecognized;
        }

        match fields[6].parse::<u8>() {
            Ok(0) => return Decoded::NoFix,
            Ok(_) => {}
            Err(_) => return Decoded::Unrecognized,
        }

        let Some(time) = parse_time(fields[1]) else {
            return Decoded::Unrecognized;
        };
        // The latitude hemisphere letter is validated but not applied as a
        // sign; only western longitudes negate.
        let Some(latitude_deg) = parse_coordinate(fields[2]) else {
            return Decoded::Unrecognized;
        };
        if !matches!(fields[3], "N" | "S") || latitude_deg > 90.0 {
            return Decoded::Unrecognized;
        }
        let Some(longitude) = parse_coordinate(fields[4]) else {
            return Decoded::Unrecognized;
        };
        if longitude > 180.0 {
            return Decoded::Unrecognized;
        }
        let longitude_deg = match fields[5] {
            "W" => -longitude,
            "E" => longitude,
            _ => return Decoded::Unrecognized,
        };
        let Ok(altitude_m) = fields[9].parse::<f64>() else {
            return Decoded::Unrecognized;
        };

        let Some(date) = self.date else {
            return Decoded::Partial;
        };

        Decoded::Fix(Fix {
            timestamp: date.and_time(time).and_utc(),
            latitude_deg,
            longitude_deg,
            altitude_m,
        })
    }
}

/// RMC date field, `ddmmyy` with a two-digit year mapped into 2000-2099.
fn parse_date(field: &str) -> Option<NaiveDate> {
    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = field[0..2].parse().ok()?;
    let month: u32 = field[2..4].parse().ok()?;
    let year: i32 = field[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// GGA time-of-day field, `hhmmss` with an optional fractional part that is
/// dropped.
fn parse_time(field: &str) -> Option<NaiveTime> {
    if field.len() < 6 || !field[0..6].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = field[0..2].parse().ok()?;
    let minute: u32 = field[2..4].parse().ok()?;
    let second: u32 = field[4..6].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Converts packed `DDDMM.MMMMM` notation into decimal degrees: the last two
/// integer digits before the point are whole minutes, everything before them
/// whole degrees. Rounded to four decimal places.
fn parse_coordinate(field: &str) -> Option<f64> {
    let (head, tail) = field.split_once('.')?;
    if head.len() < 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let degrees: f64 = head[..head.len() - 2].parse().ok()?;
    let minutes: f64 = format!("{}.{}", &head[head.len() - 2..], tail).parse().ok()?;
    Some(round4(degrees + minutes / 60.0))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,132420.00,5406.22609,N,00054.12943,W,1,05,6.28,59.2,M,47.2,M,,*7A";
    const RMC: &str = "$GPRMC,132419.00,A,5406.22609,N,00054.12943,W,0.104,,110423,,,A*6E";

    #[test]
    fn converts_packed_minutes_to_decimal_degrees() {
        assert_eq!(parse_coordinate("5406.22609"), Some(54.1038));
        assert_eq!(parse_coordinate("00054.12943"), Some(0.9022));
        assert_eq!(parse_coordinate("0000.00000"), Some(0.0));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert_eq!(parse_coordinate("54"), None);
        assert_eq!(parse_coordinate("4.5"), None);
        assert_eq!(parse_coordinate("54a6.226"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn assembles_fix_from_both_sentences() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(RMC), Decoded::Partial);

        let Decoded::Fix(fix) = decoder.decode(GGA) else {
            panic!("expected a complete fix");
        };
        assert_eq!(fix.timestamp.to_rfc3339(), "2023-04-11T13:24:20+00:00");
        assert_eq!(fix.latitude_deg, 54.1038);
        assert_eq!(fix.longitude_deg, -0.9022);
        assert_eq!(fix.altitude_m, 59.2);
    }

    #[test]
    fn position_without_a_date_is_partial() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(GGA), Decoded::Partial);
    }

    #[test]
    fn void_status_yields_no_fix_and_keeps_stored_date() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(RMC), Decoded::Partial);
        assert_eq!(
            decoder.decode("$GPRMC,132421.00,V,,,,,,,120423,,,N*7C"),
            Decoded::NoFix
        );
        // The void sentence carried a newer date; the fix must still be
        // stamped with the last locked one.
        let Decoded::Fix(fix) = decoder.decode(GGA) else {
            panic!("expected a complete fix");
        };
        assert_eq!(fix.timestamp.date_naive().to_string(), "2023-04-11");
    }

    #[test]
    fn zero_quality_yields_no_fix() {
        let mut decoder = Decoder::new();
        decoder.decode(RMC);
        assert_eq!(
            decoder.decode("$GPGGA,132420.00,5406.22609,N,00054.12943,W,0,00,,,M,,M,,*49"),
            Decoded::NoFix
        );
    }

    #[test]
    fn eastern_longitude_keeps_sign_western_negates() {
        let mut decoder = Decoder::new();
        decoder.decode(RMC);
        let east = "$GPGGA,090000.00,4812.00000,N,01130.00000,E,1,08,1.0,520.0,M,47.2,M,,*5B";
        let Decoded::Fix(fix) = decoder.decode(east) else {
            panic!("expected a complete fix");
        };
        assert_eq!(fix.longitude_deg, 11.5);
        assert_eq!(fix.latitude_deg, 48.2);
    }

    #[test]
    fn hostile_lines_are_dropped_without_panicking() {
        let mut decoder = Decoder::new();
        for line in [
            "",
            "garbage",
            "$GPGSV,3,1,11,03,03,111,00*74",
            "$GPGGA,132420.00,5406.22609",
            "$GPGGA,not,a,number,W,1,05,6.28,xx,M,,M,,*00",
            "$GPRMC,132419.00,A,5406.22609,N,00054.12943,W,0.104,,99999x,,,A*6E",
            "$GPRMC,132419.00,?,5406.22609,N,00054.12943,W,0.104,,110423,,,A*6E",
            "\u{fffd}\u{fffd}$GP\u{fffd}",
        ] {
            assert_eq!(decoder.decode(line), Decoded::Unrecognized, "line: {line:?}");
        }
    }

    #[test]
    fn leading_noise_before_the_sentence_is_ignored() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(&format!("\u{fffd}x{RMC}")), Decoded::Partial);
    }

    #[test]
    fn out_of_range_coordinates_are_dropped() {
        let mut decoder = Decoder::new();
        decoder.decode(RMC);
        let bad_lat = "$GPGGA,132420.00,9906.22609,N,00054.12943,W,1,05,6.28,59.2,M,47.2,M,,*7A";
        assert_eq!(decoder.decode(bad_lat), Decoded::Unrecognized);
    }
}
