//! Linear maps from raw sensor words to engineering units.

use crate::TemperatureUnit;

// 2**16 - 1
const CONVERSION_DENOM: f64 = 65535f64;

// Constants used to convert values
const CELSIUS_PAIR: (f64, f64) = (45f64, 175f64);
const FAHRENHEIT_PAIR: (f64, f64) = (49f64, 315f64);

/// Raw temperature word to degrees in `unit`, -45 to 130 for Celsius
pub fn temperature_from_raw(raw: u16, unit: TemperatureUnit) -> f64 {
    let (sub, mul) = match unit {
        TemperatureUnit::Celsius => CELSIUS_PAIR,
        TemperatureUnit::Fahrenheit => FAHRENHEIT_PAIR,
    };

    mul * raw as f64 / CONVERSION_DENOM - sub
}

/// Raw humidity word to relative humidity, 0 to 100 percent
pub fn humidity_from_raw(raw: u16) -> f64 {
    100f64 * raw as f64 / CONVERSION_DENOM
}

/// Integer-only temperature in hundredths of a degree Celsius, rounded to nearest
pub fn temperature_centi_celsius(raw: u16) -> i32 {
    // 17500 * 65535 still fits in an i32
    (17500 * raw as i32 + 32767) / 65535 - 4500
}

/// Integer-only relative humidity in hundredths of a percent, rounded to nearest
pub fn humidity_centi_percent(raw: u16) -> u16 {
    ((10000 * raw as u32 + 32767) / 65535) as u16
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    #[rstest]
    #[case(0, -45.0)]
    #[case(0xFFFF, 130.0)]
    #[case(0x6299, 175.0 * 25241.0 / 65535.0 - 45.0)]
    #[case(0x8000, 175.0 * 32768.0 / 65535.0 - 45.0)]
    fn celsius(#[case] raw: u16, #[case] expected: f64) {
        assert!((temperature_from_raw(raw, TemperatureUnit::Celsius) - expected).abs() < EPSILON);
    }

    #[rstest]
    #[case(0, -49.0)]
    #[case(0xFFFF, 266.0)]
    fn fahrenheit(#[case] raw: u16, #[case] expected: f64) {
        assert!((temperature_from_raw(raw, TemperatureUnit::Fahrenheit) - expected).abs() < EPSILON);
    }

    #[test]
    fn thirty_degrees() {
        // 75 * 65535 / 175
        let raw = 28086;
        assert!((temperature_from_raw(raw, TemperatureUnit::Celsius) - 30.0).abs() < 0.01);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(0xFFFF, 100.0)]
    #[case(0x6220, 100.0 * 25120.0 / 65535.0)]
    fn humidity(#[case] raw: u16, #[case] expected: f64) {
        assert!((humidity_from_raw(raw) - expected).abs() < EPSILON);
    }

    #[test]
    fn conversions_are_monotonic() {
        let mut last_humidity = humidity_from_raw(0);
        let mut last_temperature = temperature_from_raw(0, TemperatureUnit::Celsius);

        for raw in 1..=u16::MAX {
            let humidity = humidity_from_raw(raw);
            let temperature = temperature_from_raw(raw, TemperatureUnit::Celsius);
            assert!(humidity >= last_humidity);
            assert!(temperature >= last_temperature);
            assert!((0.0..=100.0).contains(&humidity));
            assert!((-45.0..=130.0).contains(&temperature));
            last_humidity = humidity;
            last_temperature = temperature;
        }
    }

    #[rstest]
    #[case(0, -4500)]
    #[case(0xFFFF, 13000)]
    #[case(0x6299, 2240)]
    fn centi_celsius(#[case] raw: u16, #[case] expected: i32) {
        assert_eq!(temperature_centi_celsius(raw), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0xFFFF, 10000)]
    #[case(0x6220, 3833)]
    fn centi_percent(#[case] raw: u16, #[case] expected: u16) {
        assert_eq!(humidity_centi_percent(raw), expected);
    }
}
