use serde::Deserialize;
use serde_json::Value;

use super::{DictionaryEntry, DictionarySettings};
use crate::plugins::{fetch_tier, DataSource, PluginContext, ProviderError};
use crate::transport::url_with_segment;

pub(super) const FREE_DICTIONARY: &str = "dictionaryapi.dev";
pub(super) const MERRIAM_WEBSTER: &str = "merriam-webster";

const MAX_SYNONYMS: usize = 3;

#[derive(Deserialize)]
struct FreeEntry {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<FreePhonetic>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<FreeMeaning>,
}

#[derive(Deserialize)]
struct FreePhonetic {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FreeMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<FreeDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
}

#[derive(Deserialize)]
struct FreeDefinition {
    definition: String,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(super) async fn free_dictionary(
    ctx: &PluginContext,
    settings: &DictionarySettings,
    word: &str,
) -> Result<DictionaryEntry, ProviderError> {
    let url = url_with_segment(&settings.free_dictionary_base_url, word);
    let body = fetch_tier(ctx, FREE_DICTIONARY, &url).await?;
    let entries: Vec<FreeEntry> = serde_json::from_str(&body)?;

    let entry = entries.into_iter().next().ok_or(ProviderError::NotFound)?;
    let phonetic = non_empty(entry.phonetic)
        .or_else(|| entry.phonetics.into_iter().find_map(|p| non_empty(p.text)))
        .unwrap_or_default();

    let meaning = entry
        .meanings
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("entry has no meanings".into()))?;
    let FreeMeaning {
        part_of_speech,
        definitions,
        synonyms: meaning_synonyms,
    } = meaning;
    let first = definitions
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("meaning has no definitions".into()))?;

    // Synonyms usually live on the meaning, occasionally on the definition.
    let synonyms = if first.synonyms.is_empty() {
        meaning_synonyms
    } else {
        first.synonyms
    };

    Ok(DictionaryEntry {
        word: entry.word,
        phonetic,
        part_of_speech,
        definition: first.definition,
        example: non_empty(first.example),
        synonyms: synonyms.into_iter().take(MAX_SYNONYMS).collect(),
        etymology: non_empty(entry.origin),
        source: DataSource::live(FREE_DICTIONARY),
    })
}

fn pointer_str(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Merriam-Webster answers an unknown word with 200 and a list of spelling
/// suggestions instead of entries.
fn is_suggestion_list(entries: &[Value]) -> bool {
    entries.first().is_some_and(Value::is_string)
}

pub(super) async fn merriam_webster(
    ctx: &PluginContext,
    settings: &DictionarySettings,
    word: &str,
) -> Result<DictionaryEntry, ProviderError> {
    let Some(api_key) = settings.merriam_webster_api_key.as_deref() else {
        return Err(ProviderError::NotConfigured);
    };

    let url = format!(
        "{}?key={}",
        url_with_segment(&settings.merriam_webster_base_url, word),
        urlencoding::encode(api_key)
    );
    let body = fetch_tier(ctx, MERRIAM_WEBSTER, &url).await?;
    let entries: Vec<Value> = serde_json::from_str(&body)?;

    if entries.is_empty() || is_suggestion_list(&entries) {
        return Err(ProviderError::NotFound);
    }
    let entry = &entries[0];

    let definition = pointer_str(entry, "/shortdef/0")
        .ok_or_else(|| ProviderError::Malformed("entry has no short definition".into()))?;

    Ok(DictionaryEntry {
        word: word.to_string(),
        phonetic: pointer_str(entry, "/hwi/prs/0/mw").unwrap_or_default(),
        part_of_speech: pointer_str(entry, "/fl").unwrap_or_else(|| "unknown".to_string()),
        definition,
        example: None,
        synonyms: Vec::new(),
        etymology: pointer_str(entry, "/et/0/1"),
        source: DataSource::live(MERRIAM_WEBSTER),
    })
}
