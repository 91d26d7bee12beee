//! Fixed strings shared by the dispatcher and the CLI.

/// Replies for input that no skill recognizes.
pub const CONVERSATIONAL_REPLIES: [&str; 4] = [
    "I understand you're trying to communicate with me. Try using one of my available commands like /weather, /calc, or /define!",
    "I'm a plugin-based AI assistant. I can help you with weather information, calculations, and word definitions using specific commands.",
    "For weather info, try '/weather [city]'. For calculations, use '/calc [expression]'. For definitions, use '/define [word]'.",
    "I'm designed to work with specific plugins. Type /weather, /calc, or /define followed by your query!",
];

/// Picks a reply from a value in `[0, 1]`.
pub fn conversational_reply(unit: f64) -> &'static str {
    let last = CONVERSATIONAL_REPLIES.len() - 1;
    let index = ((unit * CONVERSATIONAL_REPLIES.len() as f64).floor() as usize).min(last);
    CONVERSATIONAL_REPLIES[index]
}

pub fn random_conversational_reply() -> &'static str {
    conversational_reply(rand::random::<f64>())
}
