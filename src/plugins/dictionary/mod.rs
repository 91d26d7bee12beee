//! Dictionary skill.
//!
//! Cascade: Free Dictionary API, then Merriam-Webster (needs an API key), then
//! the curated table and suffix heuristics in [`curated`].

pub mod curated;
mod providers;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    literal_regex, DataSource, Plugin, PluginContext, PluginData, PluginError, RenderableView,
};

pub const DEFAULT_FREE_DICTIONARY_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_MERRIAM_WEBSTER_BASE_URL: &str =
    "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

static SLASH: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"(?i)^/defin(?:e|ition)\s+(.+)"));

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        literal_regex(r"(?i)define (.+)"),
        literal_regex(r"(?i)what does (.+) mean"),
        literal_regex(r"(?i)meaning of (.+)"),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub etymology: Option<String>,
    pub source: DataSource,
}

#[derive(Debug, Clone)]
pub struct DictionarySettings {
    pub free_dictionary_base_url: String,
    pub merriam_webster_api_key: Option<String>,
    pub merriam_webster_base_url: String,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            free_dictionary_base_url: DEFAULT_FREE_DICTIONARY_BASE_URL.to_string(),
            merriam_webster_api_key: None,
            merriam_webster_base_url: DEFAULT_MERRIAM_WEBSTER_BASE_URL.to_string(),
        }
    }
}

pub struct DictionaryPlugin {
    ctx: PluginContext,
    settings: DictionarySettings,
}

impl DictionaryPlugin {
    pub fn new(ctx: PluginContext, settings: DictionarySettings) -> Self {
        Self { ctx, settings }
    }

    async fn live_entry(&self, word: &str) -> Option<DictionaryEntry> {
        match providers::free_dictionary(&self.ctx, &self.settings, word).await {
            Ok(entry) => return Some(entry),
            Err(err) => {
                debug!(word, provider = providers::FREE_DICTIONARY, error = %err, "dictionary tier failed")
            }
        }

        match providers::merriam_webster(&self.ctx, &self.settings, word).await {
            Ok(entry) => return Some(entry),
            Err(err) => {
                debug!(word, provider = providers::MERRIAM_WEBSTER, error = %err, "dictionary tier failed")
            }
        }

        None
    }
}

/// Lower-cases the word and drops trailing punctuation ("serendipity?").
fn normalize_word(argument: &str) -> String {
    argument
        .trim()
        .trim_end_matches(['?', '!', '.', ','])
        .trim()
        .to_lowercase()
}

#[async_trait]
impl Plugin for DictionaryPlugin {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn display_name(&self) -> &'static str {
        "Dictionary"
    }

    fn triggers(&self) -> &[&'static str] {
        &["/define", "/definition"]
    }

    fn patterns(&self) -> &[Regex] {
        &PATTERNS
    }

    fn slash_pattern(&self) -> &Regex {
        &SLASH
    }

    fn missing_argument_hint(&self) -> &'static str {
        "Please specify a word to define"
    }

    fn usage(&self) -> &'static str {
        "/define <word>"
    }

    async fn execute(&self, argument: &str) -> Result<PluginData, PluginError> {
        let word = normalize_word(argument);
        if word.is_empty() {
            return Err(PluginError::InvalidArgument(
                "Please specify a word to define".to_string(),
            ));
        }

        if let Some(entry) = self.live_entry(&word).await {
            return Ok(PluginData::Definition(entry));
        }

        info!(word = word.as_str(), "live dictionaries exhausted, using offline definition");
        Ok(PluginData::Definition(curated::lookup_or_synthesize(&word)))
    }

    fn describe(&self, data: &PluginData) -> RenderableView {
        let PluginData::Definition(entry) = data else {
            return RenderableView::unsupported(self.name());
        };

        let synonyms = entry.synonyms.join(", ");
        let view = RenderableView::new(entry.word.as_str())
            .row_if("Pronunciation", Some(entry.phonetic.as_str()))
            .row("Part of speech", entry.part_of_speech.as_str())
            .row("Definition", entry.definition.as_str())
            .row_if("Example", entry.example.as_deref())
            .row_if("Synonyms", Some(synonyms.as_str()))
            .row_if("Etymology", entry.etymology.as_deref());

        if entry.source.is_synthetic() {
            view.note("Offline definition; online dictionaries were unavailable.")
        } else {
            view
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedFetcher;
    use crate::transport::{HttpResponse, OfflineFetcher};
    use std::sync::Arc;
    use std::time::Duration;

    const FREE_HELLO: &str = r#"[{
        "word": "hello",
        "phonetic": "həˈləʊ",
        "meanings": [{
            "partOfSpeech": "exclamation",
            "definitions": [{
                "definition": "used as a greeting or to begin a phone conversation.",
                "example": "hello there, Katie!",
                "synonyms": []
            }],
            "synonyms": ["hi"]
        }]
    }]"#;

    fn plugin_with(fetcher: Arc<ScriptedFetcher>, mw_key: Option<&str>) -> DictionaryPlugin {
        DictionaryPlugin::new(
            PluginContext::new(fetcher, Duration::from_secs(5)),
            DictionarySettings {
                merriam_webster_api_key: mw_key.map(str::to_string),
                ..DictionarySettings::default()
            },
        )
    }

    async fn entry(plugin: &DictionaryPlugin, argument: &str) -> DictionaryEntry {
        match plugin.execute(argument).await.unwrap() {
            PluginData::Definition(entry) => entry,
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn extracts_word_from_every_form() {
        let plugin = plugin_with(Arc::new(ScriptedFetcher::new()), None);
        assert_eq!(plugin.extract_argument("/define hello").as_deref(), Some("hello"));
        assert_eq!(
            plugin.extract_argument("/definition Wisdom").as_deref(),
            Some("Wisdom")
        );
        assert_eq!(
            plugin.extract_argument("what does serendipity mean?").as_deref(),
            Some("serendipity")
        );
        assert_eq!(
            plugin.extract_argument("the meaning of life").as_deref(),
            Some("life")
        );
        assert_eq!(plugin.extract_argument("/define"), None);
    }

    #[tokio::test]
    async fn offline_hello_uses_curated_entry() {
        let plugin = DictionaryPlugin::new(
            PluginContext::new(Arc::new(OfflineFetcher), Duration::from_secs(5)),
            DictionarySettings::default(),
        );
        let argument = plugin.extract_argument("/define hello").unwrap();

        let entry = entry(&plugin, &argument).await;
        assert_eq!(entry.word, "hello");
        assert!(!entry.definition.is_empty());
        assert!(entry.source.is_synthetic());
    }

    #[tokio::test]
    async fn live_entry_wins_and_word_is_normalized() {
        let fetcher = Arc::new(
            ScriptedFetcher::new().respond("dictionaryapi.dev", HttpResponse::ok(FREE_HELLO)),
        );
        let plugin = plugin_with(fetcher.clone(), Some("k"));

        let entry = entry(&plugin, "  HeLLo? ").await;
        assert_eq!(entry.source, DataSource::live(providers::FREE_DICTIONARY));
        assert_eq!(entry.example.as_deref(), Some("hello there, Katie!"));
        assert_eq!(entry.synonyms, vec!["hi"]);
        assert_eq!(fetcher.request_count(), 1);
        assert!(fetcher.requests.lock().unwrap()[0].ends_with("/entries/en/hello"));
    }

    #[tokio::test]
    async fn not_found_falls_through_to_merriam_webster() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .respond("dictionaryapi.dev", HttpResponse::new(404, "{}"))
                .respond(
                    "dictionaryapi.com",
                    HttpResponse::ok(r#"[{"fl": "noun", "shortdef": ["a word"]}]"#),
                ),
        );
        let plugin = plugin_with(fetcher, Some("k"));

        let entry = entry(&plugin, "zeugma").await;
        assert_eq!(entry.source, DataSource::live(providers::MERRIAM_WEBSTER));
        assert_eq!(entry.definition, "a word");
        assert_eq!(entry.phonetic, "");
    }

    #[tokio::test]
    async fn unknown_word_gets_heuristic_definition() {
        let fetcher = Arc::new(
            ScriptedFetcher::new().respond("dictionaryapi.dev", HttpResponse::new(404, "{}")),
        );
        let plugin = plugin_with(fetcher.clone(), None);

        let entry = entry(&plugin, "blorping").await;
        assert!(entry.source.is_synthetic());
        assert_eq!(entry.part_of_speech, "verb (present participle)");
        assert_eq!(fetcher.request_count(), 1, "merriam-webster skipped without key");
    }

    #[tokio::test]
    async fn punctuation_only_is_an_input_error() {
        let plugin = plugin_with(Arc::new(ScriptedFetcher::new()), None);
        let err = plugin.execute(" ?! ").await.unwrap_err();
        assert!(matches!(err, PluginError::InvalidArgument(_)));
    }

    #[test]
    fn describe_skips_empty_fields() {
        let plugin = plugin_with(Arc::new(ScriptedFetcher::new()), None);
        let view = plugin.describe(&PluginData::Definition(DictionaryEntry {
            word: "zeugma".into(),
            phonetic: String::new(),
            part_of_speech: "noun".into(),
            definition: "a figure of speech".into(),
            example: None,
            synonyms: Vec::new(),
            etymology: None,
            source: DataSource::live("merriam-webster"),
        }));
        let labels: Vec<_> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Part of speech", "Definition"]);
        assert!(view.note.is_none());
    }
}
