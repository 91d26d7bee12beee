//! Last weather tier: a plausible reading built without the network.
//!
//! Known cities get a temperature derived from latitude, season and a few
//! regional quirks; anything else gets a generic mild reading. Randomness
//! only moves values inside fixed bounds.

use chrono::Datelike;

use super::{capitalize_first, celsius_to_fahrenheit, WeatherSnapshot};
use crate::plugins::DataSource;

pub const MIN_TEMPERATURE_C: f64 = -40.0;
pub const MAX_TEMPERATURE_C: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownCity {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub country: &'static str,
    pub timezone: &'static str,
}

pub const KNOWN_CITIES: &[KnownCity] = &[
    KnownCity { name: "new york", latitude: 40.7128, longitude: -74.006, country: "USA", timezone: "EST" },
    KnownCity { name: "london", latitude: 51.5074, longitude: -0.1278, country: "UK", timezone: "GMT" },
    KnownCity { name: "tokyo", latitude: 35.6762, longitude: 139.6503, country: "Japan", timezone: "JST" },
    KnownCity { name: "paris", latitude: 48.8566, longitude: 2.3522, country: "France", timezone: "CET" },
    KnownCity { name: "sydney", latitude: -33.8688, longitude: 151.2093, country: "Australia", timezone: "AEST" },
    KnownCity { name: "mumbai", latitude: 19.076, longitude: 72.8777, country: "India", timezone: "IST" },
    KnownCity { name: "dubai", latitude: 25.2048, longitude: 55.2708, country: "UAE", timezone: "GST" },
    KnownCity { name: "moscow", latitude: 55.7558, longitude: 37.6176, country: "Russia", timezone: "MSK" },
    KnownCity { name: "beijing", latitude: 39.9042, longitude: 116.4074, country: "China", timezone: "CST" },
    KnownCity { name: "cairo", latitude: 30.0444, longitude: 31.2357, country: "Egypt", timezone: "EET" },
];

const WINTER_CONDITIONS: &[&str] = &["Cloudy", "Light Rain", "Overcast", "Clear"];
const SUMMER_CONDITIONS: &[&str] = &["Sunny", "Partly Cloudy", "Clear", "Hot"];
const MILD_CONDITIONS: &[&str] = &["Partly Cloudy", "Clear", "Cloudy", "Mild"];
const ARID_CONDITIONS: &[&str] = &["Sunny", "Hot", "Clear", "Dry"];
const MONSOON_CONDITIONS: &[&str] = &["Monsoon", "Heavy Rain", "Humid", "Thunderstorm"];
const MARITIME_CONDITIONS: &[&str] = &["Drizzle", "Cloudy", "Overcast", "Light Rain"];
const GENERIC_CONDITIONS: &[&str] = &["Sunny", "Cloudy", "Partly Cloudy", "Clear", "Overcast"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    Winter,
    Summer,
    Transitional,
}

impl Season {
    /// `month0` is zero-based (January = 0). Winter spans December to March,
    /// summer June to September, both from the northern point of view.
    fn from_month0(month0: u32) -> Self {
        match month0 {
            11 | 0..=2 => Season::Winter,
            5..=8 => Season::Summer,
            _ => Season::Transitional,
        }
    }
}

pub fn known_city(city: &str) -> Option<&'static KnownCity> {
    let key = city.trim().to_lowercase();
    KNOWN_CITIES.iter().find(|known| known.name == key)
}

/// Synthetic reading for the current month, using the thread RNG.
pub fn snapshot_now(city: &str) -> WeatherSnapshot {
    let month0 = chrono::Local::now().month0();
    synthesize(city, month0, &mut || rand::random::<f64>())
}

/// Builds a reading for `city` in zero-based `month0`. `unit` must yield
/// values in `[0, 1]`.
pub fn synthesize(city: &str, month0: u32, unit: &mut dyn FnMut() -> f64) -> WeatherSnapshot {
    let city = city.trim();
    match known_city(city) {
        Some(known) => known_city_reading(city, known, month0, unit),
        None => generic_reading(city, unit),
    }
}

fn known_city_reading(
    city: &str,
    known: &KnownCity,
    month0: u32,
    unit: &mut dyn FnMut() -> f64,
) -> WeatherSnapshot {
    let lat_factor = known.latitude.abs() / 90.0;
    let northern = known.latitude > 0.0;

    let (mut base_temp, mut conditions) = match Season::from_month0(month0) {
        Season::Winter if northern => (5.0 - lat_factor * 15.0, WINTER_CONDITIONS),
        Season::Winter => (25.0 + lat_factor * 10.0, WINTER_CONDITIONS),
        Season::Summer if northern => (25.0 + lat_factor * 10.0, SUMMER_CONDITIONS),
        Season::Summer => (15.0 - lat_factor * 10.0, SUMMER_CONDITIONS),
        Season::Transitional => (15.0 + unit() * 15.0, MILD_CONDITIONS),
    };

    let humidity = match known.name {
        "dubai" | "cairo" => {
            base_temp += 10.0;
            conditions = ARID_CONDITIONS;
            30.0 + unit() * 20.0
        }
        "mumbai" => {
            base_temp += 5.0;
            if (5..=9).contains(&month0) {
                conditions = MONSOON_CONDITIONS;
            }
            70.0 + unit() * 20.0
        }
        "london" => {
            conditions = MARITIME_CONDITIONS;
            60.0 + unit() * 25.0
        }
        _ => 40.0 + unit() * 40.0,
    };

    let display = format!("{}, {}", capitalize_first(city), known.country);
    assemble(display, base_temp, conditions, humidity, unit)
}

fn generic_reading(city: &str, unit: &mut dyn FnMut() -> f64) -> WeatherSnapshot {
    let temp = 10.0 + unit() * 25.0;
    let humidity = 40.0 + unit() * 40.0;
    assemble(capitalize_first(city), temp, GENERIC_CONDITIONS, humidity, unit)
}

fn assemble(
    city: String,
    temp_c: f64,
    conditions: &[&str],
    humidity: f64,
    unit: &mut dyn FnMut() -> f64,
) -> WeatherSnapshot {
    let temp_c = temp_c.clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C);
    let condition = pick(conditions, unit());
    let wind = 5.0 + unit() * 20.0;
    let feels_like = (temp_c + (unit() * 6.0 - 3.0)).clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C);
    let pressure = 1013.0 + (unit() * 40.0 - 20.0);
    let visibility = 8.0 + unit() * 7.0;

    WeatherSnapshot {
        city,
        temperature_c: temp_c.round() as i32,
        temperature_f: celsius_to_fahrenheit(temp_c),
        condition: condition.to_string(),
        humidity_pct: humidity.round().clamp(0.0, 100.0) as u8,
        wind_kph: wind.round() as u32,
        feels_like_c: feels_like.round() as i32,
        pressure_hpa: pressure.round() as u32,
        visibility_km: (visibility * 10.0).round() / 10.0,
        source: DataSource::Synthetic,
    }
}

fn pick<'a>(options: &[&'a str], unit: f64) -> &'a str {
    let last = options.len().saturating_sub(1);
    let index = ((unit * options.len() as f64).floor() as usize).min(last);
    options[index]
}
