//! Current-weather skill.
//!
//! Cascade: OpenWeatherMap (needs an API key), then wttr.in, then a
//! synthetic reading. A well-formed city name always yields a snapshot.

mod providers;
pub mod synthetic;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    literal_regex, DataSource, Plugin, PluginContext, PluginData, PluginError, RenderableView,
};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_WTTR_BASE_URL: &str = "https://wttr.in";

static SLASH: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"(?i)^/weather\s+(.+)"));

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        literal_regex(r"(?i)what'?s the weather in ([^?]+)"),
        literal_regex(r"(?i)weather in ([^?]+)"),
        literal_regex(r"(?i)how'?s the weather in ([^?]+)"),
    ]
});

/// Normalized weather reading. Every tier fills every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kph: u32,
    pub feels_like_c: i32,
    pub pressure_hpa: u32,
    pub visibility_km: f64,
    pub source: DataSource,
}

#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub wttr_base_url: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            wttr_base_url: DEFAULT_WTTR_BASE_URL.to_string(),
        }
    }
}

pub struct WeatherPlugin {
    ctx: PluginContext,
    settings: WeatherSettings,
}

impl WeatherPlugin {
    pub fn new(ctx: PluginContext, settings: WeatherSettings) -> Self {
        Self { ctx, settings }
    }

    async fn live_snapshot(&self, city: &str) -> Option<WeatherSnapshot> {
        match providers::openweather(&self.ctx, &self.settings, city).await {
            Ok(snapshot) => return Some(snapshot),
            Err(err) => debug!(city, provider = providers::OPENWEATHER, error = %err, "weather tier failed"),
        }

        match providers::wttr(&self.ctx, &self.settings, city).await {
            Ok(snapshot) => return Some(snapshot),
            Err(err) => debug!(city, provider = providers::WTTR, error = %err, "weather tier failed"),
        }

        None
    }
}

#[async_trait]
impl Plugin for WeatherPlugin {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn display_name(&self) -> &'static str {
        "Weather"
    }

    fn triggers(&self) -> &[&'static str] {
        &["/weather"]
    }

    fn patterns(&self) -> &[Regex] {
        &PATTERNS
    }

    fn slash_pattern(&self) -> &Regex {
        &SLASH
    }

    fn missing_argument_hint(&self) -> &'static str {
        "Please specify a city name"
    }

    fn usage(&self) -> &'static str {
        "/weather <city>"
    }

    async fn execute(&self, argument: &str) -> Result<PluginData, PluginError> {
        let city = argument.trim();
        if city.is_empty() {
            return Err(PluginError::InvalidArgument(
                "Please specify a city name".to_string(),
            ));
        }

        if let Some(snapshot) = self.live_snapshot(city).await {
            return Ok(PluginData::Weather(snapshot));
        }

        info!(city, "live weather providers exhausted, using synthetic reading");
        Ok(PluginData::Weather(synthetic::snapshot_now(city)))
    }

    fn describe(&self, data: &PluginData) -> RenderableView {
        let PluginData::Weather(w) = data else {
            return RenderableView::unsupported(self.name());
        };

        let view = RenderableView::new(format!("Weather in {}", w.city))
            .row(
                "Temperature",
                format!("{}°C ({}°F)", w.temperature_c, w.temperature_f),
            )
            .row("Condition", w.condition.as_str())
            .row("Feels like", format!("{}°C", w.feels_like_c))
            .row("Humidity", format!("{}%", w.humidity_pct))
            .row("Wind", format!("{} km/h", w.wind_kph))
            .row("Pressure", format!("{} hPa", w.pressure_hpa))
            .row("Visibility", format!("{:.1} km", w.visibility_km));

        if w.source.is_synthetic() {
            view.note("Estimated reading; live weather services were unavailable.")
        } else {
            view
        }
    }
}

pub(crate) fn celsius_to_fahrenheit(celsius: f64) -> i32 {
    (celsius * 9.0 / 5.0 + 32.0).round() as i32
}

/// Upper-cases the first character, leaving the rest untouched.
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
