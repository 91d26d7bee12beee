use serde::Deserialize;

use super::{capitalize_first, celsius_to_fahrenheit, WeatherSettings, WeatherSnapshot};
use crate::plugins::{fetch_tier, DataSource, PluginContext, ProviderError};
use crate::transport::url_with_segment;

pub(super) const OPENWEATHER: &str = "openweathermap";
pub(super) const WTTR: &str = "wttr.in";

/// OpenWeatherMap caps reported visibility at 10 km and omits the field for
/// some stations.
const OPENWEATHER_DEFAULT_VISIBILITY_M: f64 = 10_000.0;

#[derive(Deserialize)]
struct OwmResponse {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmCondition>,
    visibility: Option<f64>,
}

#[derive(Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: String,
}

/// `cod` arrives as a number on success and as a string on errors.
fn owm_not_found(cod: Option<&serde_json::Value>) -> bool {
    match cod {
        Some(serde_json::Value::String(code)) => code == "404",
        Some(serde_json::Value::Number(code)) => code.as_u64() == Some(404),
        _ => false,
    }
}

pub(super) async fn openweather(
    ctx: &PluginContext,
    settings: &WeatherSettings,
    city: &str,
) -> Result<WeatherSnapshot, ProviderError> {
    let Some(api_key) = settings.openweather_api_key.as_deref() else {
        return Err(ProviderError::NotConfigured);
    };

    let url = format!(
        "{}/weather?q={}&appid={}&units=metric",
        settings.openweather_base_url.trim_end_matches('/'),
        urlencoding::encode(city),
        urlencoding::encode(api_key)
    );
    let body = fetch_tier(ctx, OPENWEATHER, &url).await?;

    let raw: serde_json::Value = serde_json::from_str(&body)?;
    if owm_not_found(raw.get("cod")) {
        return Err(ProviderError::NotFound);
    }
    let data: OwmResponse = serde_json::from_value(raw)?;

    let condition = data
        .weather
        .first()
        .map(|w| capitalize_first(&w.description))
        .ok_or_else(|| ProviderError::Malformed("missing weather conditions".into()))?;
    let visibility_m = data.visibility.unwrap_or(OPENWEATHER_DEFAULT_VISIBILITY_M);

    Ok(WeatherSnapshot {
        city: format!("{}, {}", data.name, data.sys.country),
        temperature_c: data.main.temp.round() as i32,
        temperature_f: celsius_to_fahrenheit(data.main.temp),
        condition,
        humidity_pct: data.main.humidity.round().clamp(0.0, 100.0) as u8,
        wind_kph: (data.wind.speed * 3.6).round().max(0.0) as u32,
        feels_like_c: data.main.feels_like.round() as i32,
        pressure_hpa: data.main.pressure.round().max(0.0) as u32,
        visibility_km: round_tenth(visibility_m / 1000.0),
        source: DataSource::live(OPENWEATHER),
    })
}

#[derive(Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCurrent>,
    nearest_area: Vec<WttrArea>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    windspeed_kmph: String,
    pressure: String,
    visibility: String,
    weather_desc: Vec<WttrValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WttrArea {
    area_name: Vec<WttrValue>,
    country: Vec<WttrValue>,
}

#[derive(Deserialize)]
struct WttrValue {
    value: String,
}

fn first_value<'a>(values: &'a [WttrValue], field: &str) -> Result<&'a str, ProviderError> {
    values
        .first()
        .map(|v| v.value.as_str())
        .ok_or_else(|| ProviderError::Malformed(format!("missing {field}")))
}

/// wttr.in encodes every number as a string.
fn number<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, ProviderError> {
    raw.trim()
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("{field} is not a number: {raw:?}")))
}

pub(super) async fn wttr(
    ctx: &PluginContext,
    settings: &WeatherSettings,
    city: &str,
) -> Result<WeatherSnapshot, ProviderError> {
    let url = format!("{}?format=j1", url_with_segment(&settings.wttr_base_url, city));
    let body = fetch_tier(ctx, WTTR, &url).await?;
    let data: WttrResponse = serde_json::from_str(&body)?;

    let current = data
        .current_condition
        .first()
        .ok_or_else(|| ProviderError::Malformed("missing current_condition".into()))?;
    let area = data
        .nearest_area
        .first()
        .ok_or_else(|| ProviderError::Malformed("missing nearest_area".into()))?;

    Ok(WeatherSnapshot {
        city: format!(
            "{}, {}",
            first_value(&area.area_name, "areaName")?,
            first_value(&area.country, "country")?
        ),
        temperature_c: number(&current.temp_c, "temp_C")?,
        temperature_f: number(&current.temp_f, "temp_F")?,
        condition: first_value(&current.weather_desc, "weatherDesc")?.trim().to_string(),
        humidity_pct: number(&current.humidity, "humidity")?,
        wind_kph: number(&current.windspeed_kmph, "windspeedKmph")?,
        feels_like_c: number(&current.feels_like_c, "FeelsLikeC")?,
        pressure_hpa: number(&current.pressure, "pressure")?,
        visibility_km: number(&current.visibility, "visibility")?,
        source: DataSource::live(WTTR),
    })
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
