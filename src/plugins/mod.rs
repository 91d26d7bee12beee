//! Skill plugins and the pipeline that routes chat input to them.
//!
//! A plugin owns everything about one skill: the literal triggers and
//! natural-language patterns that select it, the extraction rules for its
//! argument, the cascade of data sources it tries, and how its result is
//! described for display. [`registry::Registry`] picks a plugin for a line of
//! input and [`engine::run`] executes it, folding every outcome into an
//! [`engine::ExecutionResult`].

pub mod calculator;
pub mod dictionary;
pub mod engine;
pub mod registry;
pub mod weather;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::{HttpFetch, TransportError};

pub use calculator::{Calculation, CalculatorPlugin};
pub use dictionary::{DictionaryEntry, DictionaryPlugin};
pub use weather::{WeatherPlugin, WeatherSnapshot};

#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique registry key, also stored on plugin messages.
    fn name(&self) -> &'static str;

    /// Human-facing label used by listings and rendered cards.
    fn display_name(&self) -> &'static str;

    /// Literal prefixes, matched case-insensitively against the whole input.
    fn triggers(&self) -> &[&'static str];

    /// Natural-language patterns, each with exactly one capture group.
    fn patterns(&self) -> &[Regex];

    /// Start-anchored regex for the slash-command form.
    fn slash_pattern(&self) -> &Regex;

    /// Guidance shown when no argument could be extracted.
    fn missing_argument_hint(&self) -> &'static str;

    fn usage(&self) -> &'static str;

    /// Re-derives the argument from the full input. The slash form is tried
    /// first, then each pattern in order; empty captures count as no match.
    fn extract_argument(&self, text: &str) -> Option<String> {
        std::iter::once(self.slash_pattern())
            .chain(self.patterns().iter())
            .find_map(|pattern| {
                pattern
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim())
                    .filter(|arg| !arg.is_empty())
                    .map(str::to_string)
            })
    }

    async fn execute(&self, argument: &str) -> Result<PluginData, PluginError>;

    fn describe(&self, data: &PluginData) -> RenderableView;
}

/// Shared capabilities handed to plugins at startup.
#[derive(Clone)]
pub struct PluginContext {
    pub fetcher: Arc<dyn HttpFetch>,
    pub tier_timeout: Duration,
}

impl PluginContext {
    pub fn new(fetcher: Arc<dyn HttpFetch>, tier_timeout: Duration) -> Self {
        Self {
            fetcher,
            tier_timeout,
        }
    }
}

/// Result payload of a successful execution. Serialized without a tag so the
/// persisted `pluginData` is exactly the plugin's own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginData {
    Weather(WeatherSnapshot),
    Calculation(Calculation),
    Definition(DictionaryEntry),
}

impl PluginData {
    /// Provenance of the data; calculations have none.
    pub fn source(&self) -> Option<&DataSource> {
        match self {
            PluginData::Weather(snapshot) => Some(&snapshot.source),
            PluginData::Definition(entry) => Some(&entry.source),
            PluginData::Calculation(_) => None,
        }
    }
}

/// Where a piece of plugin data came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataSource {
    Live(String),
    Synthetic,
}

impl DataSource {
    pub fn live(provider: &str) -> Self {
        DataSource::Live(provider.to_string())
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live(provider) => write!(f, "live:{}", provider),
            DataSource::Synthetic => write!(f, "synthetic"),
        }
    }
}

impl TryFrom<String> for DataSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "synthetic" {
            return Ok(DataSource::Synthetic);
        }
        match value.strip_prefix("live:") {
            Some(provider) if !provider.is_empty() => Ok(DataSource::Live(provider.to_string())),
            _ => Err(format!("invalid data source: {value}")),
        }
    }
}

impl From<DataSource> for String {
    fn from(value: DataSource) -> Self {
        value.to_string()
    }
}

/// Display-ready description of plugin data; the render layer decides how
/// it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableView {
    pub title: String,
    pub rows: Vec<ViewRow>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub label: String,
    pub value: String,
}

impl RenderableView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            note: None,
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(ViewRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn row_if(self, label: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => self.row(label, value),
            None => self,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// View for data that does not belong to the plugin asked to describe it.
    pub fn unsupported(plugin: &str) -> Self {
        Self::new(plugin.to_string()).note("No renderable data for this skill.")
    }
}

/// Terminal failures surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// No argument could be extracted from the input.
    MissingArgument {
        /// Plugin-specific guidance, e.g. "Please specify a city name".
        hint: &'static str,
    },

    /// An argument was extracted but cannot be used.
    InvalidArgument(String),

    /// The calculator could not parse or evaluate the expression.
    InvalidExpression,

    /// Every tier of the cascade failed.
    Unavailable {
        plugin: &'static str,
        key: String,
    },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::MissingArgument { hint } => write!(f, "Missing argument. {}", hint),
            PluginError::InvalidArgument(msg) => write!(f, "{}", msg),
            PluginError::InvalidExpression => write!(f, "Invalid mathematical expression"),
            PluginError::Unavailable { plugin, key } => write!(
                f,
                "Unable to fetch {} data for \"{}\". Please try again.",
                plugin, key
            ),
        }
    }
}

impl StdError for PluginError {}

/// Why a single live tier did not produce data. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProviderError {
    NotConfigured,
    Transport(TransportError),
    Timeout(Duration),
    Status(u16),
    NotFound,
    Malformed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NotConfigured => write!(f, "provider not configured"),
            ProviderError::Transport(err) => write!(f, "{}", err),
            ProviderError::Timeout(deadline) => {
                write!(f, "no response within {}ms", deadline.as_millis())
            }
            ProviderError::Status(status) => write!(f, "HTTP status {}", status),
            ProviderError::NotFound => write!(f, "not found"),
            ProviderError::Malformed(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

impl From<TransportError> for ProviderError {
    fn from(value: TransportError) -> Self {
        ProviderError::Transport(value)
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(value: serde_json::Error) -> Self {
        ProviderError::Malformed(value.to_string())
    }
}

/// Issues one live-tier request under the tier deadline and returns the body
/// of a 2xx response. 404 maps to [`ProviderError::NotFound`].
pub(crate) async fn fetch_tier(
    ctx: &PluginContext,
    provider: &str,
    url: &str,
) -> Result<String, ProviderError> {
    let response = tokio::time::timeout(ctx.tier_timeout, ctx.fetcher.get(url))
        .await
        .map_err(|_| ProviderError::Timeout(ctx.tier_timeout))??;

    if response.status == 404 {
        return Err(ProviderError::NotFound);
    }
    if !response.is_success() {
        return Err(ProviderError::Status(response.status));
    }

    debug!(provider, status = response.status, "provider responded");
    Ok(response.body)
}

/// Compiles a pattern that is part of the source; panics only on a typo in a
/// literal.
pub(crate) fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedFetcher;
    use crate::transport::HttpResponse;

    fn ctx(fetcher: ScriptedFetcher, timeout: Duration) -> PluginContext {
        PluginContext::new(Arc::new(fetcher), timeout)
    }

    #[test]
    fn data_source_round_trips_as_string() {
        let live = serde_json::to_string(&DataSource::live("wttr.in")).unwrap();
        assert_eq!(live, "\"live:wttr.in\"");
        let parsed: DataSource = serde_json::from_str(&live).unwrap();
        assert_eq!(parsed, DataSource::live("wttr.in"));

        let synthetic: DataSource = serde_json::from_str("\"synthetic\"").unwrap();
        assert!(synthetic.is_synthetic());
        assert!(serde_json::from_str::<DataSource>("\"live:\"").is_err());
    }

    #[test]
    fn missing_argument_message_carries_hint() {
        let err = PluginError::MissingArgument {
            hint: "Please specify a city name",
        };
        assert_eq!(err.to_string(), "Missing argument. Please specify a city name");
    }

    #[test]
    fn row_if_skips_empty_values() {
        let view = RenderableView::new("t")
            .row_if("a", Some(""))
            .row_if("b", None)
            .row_if("c", Some("x"));
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].label, "c");
    }

    #[tokio::test]
    async fn fetch_tier_classifies_status_codes() {
        let fetcher = ScriptedFetcher::new()
            .respond("/missing", HttpResponse::new(404, "{}"))
            .respond("/broken", HttpResponse::new(503, "down"))
            .respond("/fine", HttpResponse::ok("{\"ok\":true}"));
        let ctx = ctx(fetcher, Duration::from_secs(1));

        assert_eq!(
            fetch_tier(&ctx, "test", "https://x/missing").await,
            Err(ProviderError::NotFound)
        );
        assert_eq!(
            fetch_tier(&ctx, "test", "https://x/broken").await,
            Err(ProviderError::Status(503))
        );
        assert_eq!(
            fetch_tier(&ctx, "test", "https://x/fine").await.as_deref(),
            Ok("{\"ok\":true}")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_tier_times_out() {
        let fetcher = ScriptedFetcher::new()
            .respond("/slow", HttpResponse::ok("{}"))
            .with_delay(Duration::from_secs(30));
        let ctx = ctx(fetcher, Duration::from_secs(2));

        assert_eq!(
            fetch_tier(&ctx, "test", "https://x/slow").await,
            Err(ProviderError::Timeout(Duration::from_secs(2)))
        );
    }
}
