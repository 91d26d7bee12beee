use crate::core::config::data::{path_display, Config};

/// Shows enough of a secret to tell keys apart.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("****{visible}")
}

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.history_file {
            Some(path) => println!("  history-file: {}", path_display(path)),
            None => match Config::default_history_path() {
                Some(path) => println!("  history-file: (unset, default: {})", path_display(path)),
                None => println!("  history-file: (unset)"),
            },
        }
        match self.tier_timeout_secs {
            Some(secs) => println!("  tier-timeout: {secs}s"),
            None => println!("  tier-timeout: (unset, default: {}s)", self.tier_timeout().as_secs()),
        }
        print_secret("openweather-api-key", self.weather.openweather_api_key.as_deref());
        print_optional("openweather-base-url", self.weather.openweather_base_url.as_deref());
        print_optional("wttr-base-url", self.weather.wttr_base_url.as_deref());
        print_secret(
            "merriam-webster-api-key",
            self.dictionary.merriam_webster_api_key.as_deref(),
        );
        print_optional(
            "free-dictionary-base-url",
            self.dictionary.free_dictionary_base_url.as_deref(),
        );
        print_optional(
            "merriam-webster-base-url",
            self.dictionary.merriam_webster_base_url.as_deref(),
        );
    }
}

fn print_optional(key: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {key}: {value}"),
        None => println!("  {key}: (unset)"),
    }
}

fn print_secret(key: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {key}: {}", mask_secret(value)),
        None => println!("  {key}: (unset)"),
    }
}
