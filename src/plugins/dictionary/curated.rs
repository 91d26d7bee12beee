//! Offline dictionary tier: a handful of curated entries, then a definition
//! guessed from the word's suffix. Always produces an entry.

use super::DictionaryEntry;
use crate::plugins::DataSource;

struct Curated {
    word: &'static str,
    phonetic: &'static str,
    part_of_speech: &'static str,
    definition: &'static str,
    example: &'static str,
    synonyms: &'static [&'static str],
    etymology: &'static str,
}

const CURATED: &[Curated] = &[
    Curated {
        word: "hello",
        phonetic: "/həˈloʊ/",
        part_of_speech: "exclamation",
        definition: "Used as a greeting or to begin a phone conversation.",
        example: "Hello there! How are you today?",
        synonyms: &["hi", "hey", "greetings"],
        etymology: "Early 19th century: variant of earlier hollo; related to holla.",
    },
    Curated {
        word: "computer",
        phonetic: "/kəmˈpjuːtər/",
        part_of_speech: "noun",
        definition: "An electronic device for storing and processing data, typically in binary form, according to instructions given to it in a variable program.",
        example: "I need to buy a new computer for work.",
        synonyms: &["PC", "machine", "processor"],
        etymology: "Mid 17th century: from French computer or Latin computare, from com- \"together\" + putare \"to reckon\".",
    },
    Curated {
        word: "beautiful",
        phonetic: "/ˈbjuːtɪf(ə)l/",
        part_of_speech: "adjective",
        definition: "Pleasing the senses or mind aesthetically; having beauty.",
        example: "The sunset was absolutely beautiful tonight.",
        synonyms: &["lovely", "attractive", "gorgeous"],
        etymology: "Middle English: from Old French bel, belle, from Latin bellus.",
    },
    Curated {
        word: "wisdom",
        phonetic: "/ˈwɪzdəm/",
        part_of_speech: "noun",
        definition: "The quality of having experience, knowledge, and good judgment; the quality of being wise.",
        example: "With age comes wisdom and understanding.",
        synonyms: &["knowledge", "insight", "understanding"],
        etymology: "Old English wīsdōm, from wīs \"wise\".",
    },
    Curated {
        word: "love",
        phonetic: "/lʌv/",
        part_of_speech: "noun",
        definition: "An intense feeling of deep affection or a great interest and pleasure in something.",
        example: "She fell in love with the beautiful landscape.",
        synonyms: &["affection", "adoration", "devotion"],
        etymology: "Old English lufu, of Germanic origin; related to Sanskrit lubhyati \"desires\".",
    },
    Curated {
        word: "technology",
        phonetic: "/tɛkˈnɒlədʒi/",
        part_of_speech: "noun",
        definition: "The application of scientific knowledge for practical purposes, especially in industry.",
        example: "Modern technology has revolutionized communication.",
        synonyms: &["innovation", "engineering", "science"],
        etymology: "Early 17th century: from Greek tekhnologia \"systematic treatment\", from tekhnē \"art, craft\".",
    },
    Curated {
        word: "serendipity",
        phonetic: "/ˌsɛrənˈdɪpɪti/",
        part_of_speech: "noun",
        definition: "The occurrence and development of events by chance in a happy or beneficial way.",
        example: "Meeting her old friend at the airport was pure serendipity.",
        synonyms: &["chance", "fortune", "luck"],
        etymology: "Coined by Horace Walpole in 1754, from the Persian fairy tale \"The Three Princes of Serendip\".",
    },
    Curated {
        word: "artificial",
        phonetic: "/ɑːtɪˈfɪʃ(ə)l/",
        part_of_speech: "adjective",
        definition: "Made or produced by human beings rather than occurring naturally, typically as a copy of something natural.",
        example: "The flowers in the lobby are artificial but look very realistic.",
        synonyms: &["synthetic", "man-made", "manufactured"],
        etymology: "Late Middle English: from Old French artificiel or Latin artificialis, from artificium \"handicraft\".",
    },
    Curated {
        word: "intelligence",
        phonetic: "/ɪnˈtɛlɪdʒ(ə)ns/",
        part_of_speech: "noun",
        definition: "The ability to acquire and apply knowledge and skills; the collection of information of military or political value.",
        example: "Artificial intelligence is advancing rapidly in many fields.",
        synonyms: &["intellect", "wisdom", "understanding"],
        etymology: "Late Middle English: via Old French from Latin intelligentia, from intelligere \"understand\".",
    },
    Curated {
        word: "philosophy",
        phonetic: "/fɪˈlɒsəfi/",
        part_of_speech: "noun",
        definition: "The study of the fundamental nature of knowledge, reality, and existence, especially when considered as an academic discipline.",
        example: "She studied philosophy at university and found it fascinating.",
        synonyms: &["thinking", "ideology", "doctrine"],
        etymology: "Middle English: from Old French filosofie, via Latin from Greek philosophia \"love of wisdom\".",
    },
];

/// Suffix → part of speech, checked in order.
const SUFFIX_PARTS_OF_SPEECH: &[(&str, &str)] = &[
    ("ing", "verb (present participle)"),
    ("ed", "verb (past tense)"),
    ("ly", "adverb"),
    ("tion", "noun"),
    ("sion", "noun"),
    ("ness", "noun"),
    ("ful", "adjective"),
    ("less", "adjective"),
    ("able", "adjective"),
    ("ible", "adjective"),
];

pub fn lookup(word: &str) -> Option<DictionaryEntry> {
    CURATED
        .iter()
        .find(|entry| entry.word == word)
        .map(|entry| DictionaryEntry {
            word: entry.word.to_string(),
            phonetic: entry.phonetic.to_string(),
            part_of_speech: entry.part_of_speech.to_string(),
            definition: entry.definition.to_string(),
            example: Some(entry.example.to_string()),
            synonyms: entry.synonyms.iter().map(|s| s.to_string()).collect(),
            etymology: Some(entry.etymology.to_string()),
            source: DataSource::Synthetic,
        })
}

/// Strips `suffix` and returns the stem, provided something is left.
fn stem<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    word.strip_suffix(suffix).filter(|stem| !stem.is_empty())
}

fn guessed_definition(word: &str) -> String {
    if let Some(stem) = stem(word, "ing") {
        format!("The act or process of {stem}.")
    } else if let Some(stem) = stem(word, "ly") {
        format!("In a manner that is {stem}.")
    } else if let Some(stem) = stem(word, "ness") {
        format!("The quality or state of being {stem}.")
    } else if let Some(stem) = stem(word, "ful") {
        format!("Full of or characterized by {stem}.")
    } else {
        format!("A term meaning \"{word}\".")
    }
}

/// Structurally complete entry for a word nobody could define.
pub fn synthesize(word: &str) -> DictionaryEntry {
    let part_of_speech = SUFFIX_PARTS_OF_SPEECH
        .iter()
        .find(|(suffix, _)| stem(word, suffix).is_some())
        .map(|(_, pos)| *pos)
        .unwrap_or("noun");

    DictionaryEntry {
        word: word.to_string(),
        phonetic: format!("/{word}/"),
        part_of_speech: part_of_speech.to_string(),
        definition: guessed_definition(word),
        example: Some(format!(
            "This is an example sentence using the word \"{word}\"."
        )),
        synonyms: Vec::new(),
        etymology: Some("Etymology not available for this term.".to_string()),
        source: DataSource::Synthetic,
    }
}

pub fn lookup_or_synthesize(word: &str) -> DictionaryEntry {
    lookup(word).unwrap_or_else(|| synthesize(word))
}
