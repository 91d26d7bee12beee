//! Plain-text rendering of transcript entries and plugin views.

use crate::core::message::{Message, MessageKind, MessageStatus, Sender};
use crate::plugins::registry::Registry;
use crate::plugins::RenderableView;

const USER_PREFIX: &str = "You: ";
const ASSISTANT_PREFIX: &str = "Assistant: ";
const INDENT: &str = "  ";

/// Title, then rows with labels padded to a common width, then the note.
pub fn render_view(view: &RenderableView) -> Vec<String> {
    let width = view
        .rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(view.rows.len() + 2);
    lines.push(view.title.clone());
    for row in &view.rows {
        let label = format!("{}:", row.label);
        lines.push(format!("{INDENT}{label:<pad$} {}", row.value, pad = width + 1));
    }
    if let Some(note) = &view.note {
        lines.push(format!("{INDENT}({note})"));
    }
    lines
}

fn plugin_label(message: &Message, registry: &Registry) -> String {
    let name = message.plugin_name.as_deref().unwrap_or("plugin");
    registry
        .get(name)
        .map(|plugin| plugin.display_name().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Lines for one transcript entry. Plugin results are described by the
/// plugin that produced them, found by name in `registry`.
pub fn render_message(message: &Message, registry: &Registry) -> Vec<String> {
    match (message.sender, message.kind) {
        (Sender::User, _) => prefixed(USER_PREFIX, &message.content),
        (Sender::Assistant, MessageKind::Text) => prefixed(ASSISTANT_PREFIX, &message.content),
        (Sender::Assistant, MessageKind::Plugin) => render_plugin_message(message, registry),
    }
}

fn render_plugin_message(message: &Message, registry: &Registry) -> Vec<String> {
    let label = plugin_label(message, registry);
    match message.status {
        Some(MessageStatus::Pending) | None => vec![format!("[{label}] {}", message.content)],
        Some(MessageStatus::Error) => vec![format!("[{label}] Error: {}", message.content)],
        Some(MessageStatus::Success) => {
            let plugin = message
                .plugin_name
                .as_deref()
                .and_then(|name| registry.get(name));
            let (Some(plugin), Some(data)) = (plugin, message.plugin_data.as_ref()) else {
                return vec![format!("[{label}] {}", message.content)];
            };

            let mut lines = render_view(&plugin.describe(data));
            if let Some(source) = data.source() {
                lines.push(format!("{INDENT}source: {source}"));
            }
            lines
        }
    }
}

fn prefixed(prefix: &str, content: &str) -> Vec<String> {
    let mut lines = content.lines();
    let first = lines.next().unwrap_or_default();
    let pad = " ".repeat(prefix.chars().count());
    std::iter::once(format!("{prefix}{first}"))
        .chain(lines.map(|line| format!("{pad}{line}")))
        .collect()
}

/// One line per registered skill: name, usage and triggers.
pub fn render_skills(registry: &Registry) -> Vec<String> {
    let plugins = registry.plugins();
    let name_width = plugins
        .iter()
        .map(|plugin| plugin.display_name().chars().count())
        .max()
        .unwrap_or(0);
    let usage_width = plugins
        .iter()
        .map(|plugin| plugin.usage().chars().count())
        .max()
        .unwrap_or(0);

    plugins
        .iter()
        .map(|plugin| {
            format!(
                "{INDENT}{:<name_width$}  {:<usage_width$}  triggers: {}",
                plugin.display_name(),
                plugin.usage(),
                plugin.triggers().join(", "),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Completion;
    use crate::plugins::dictionary::DictionarySettings;
    use crate::plugins::weather::{synthetic, WeatherSettings};
    use crate::plugins::{Calculation, PluginContext, PluginData};
    use crate::transport::OfflineFetcher;
    use std::sync::Arc;
    use std::time::Duration;

    fn registry() -> Registry {
        let ctx = PluginContext::new(Arc::new(OfflineFetcher), Duration::from_secs(1));
        Registry::builtin(ctx, WeatherSettings::default(), DictionarySettings::default())
    }

    #[test]
    fn view_rows_are_aligned() {
        let view = RenderableView::new("Calculator")
            .row("Expression", "2+2")
            .row("Result", "4")
            .note("exact");
        assert_eq!(
            render_view(&view),
            vec![
                "Calculator",
                "  Expression: 2+2",
                "  Result:     4",
                "  (exact)",
            ]
        );
    }

    #[test]
    fn user_and_text_messages_are_prefixed() {
        let registry = registry();
        assert_eq!(
            render_message(&Message::user("hi\nthere"), &registry),
            vec!["You: hi", "     there"]
        );
        assert_eq!(
            render_message(&Message::assistant("hello"), &registry),
            vec!["Assistant: hello"]
        );
    }

    #[test]
    fn plugin_states_render_differently() {
        let registry = registry();

        let pending = Message::pending_plugin("calculator");
        assert_eq!(
            render_message(&pending, &registry),
            vec!["[Calculator] Processing..."]
        );

        let mut failed = Message::pending_plugin("calculator");
        failed.complete(Completion::Error("Invalid mathematical expression".into()));
        assert_eq!(
            render_message(&failed, &registry),
            vec!["[Calculator] Error: Invalid mathematical expression"]
        );

        let mut done = Message::pending_plugin("calculator");
        done.complete(Completion::Success(PluginData::Calculation(Calculation {
            expression: "6*7".into(),
            result: "42".into(),
            value_type: "number".into(),
        })));
        let lines = render_message(&done, &registry);
        assert_eq!(lines[0], "Calculator");
        assert_eq!(lines.last().map(String::as_str), Some("  Result:     42"));
    }

    #[test]
    fn synthetic_weather_shows_note_and_source() {
        let registry = registry();
        let mut message = Message::pending_plugin("weather");
        message.complete(Completion::Success(PluginData::Weather(
            synthetic::snapshot_now("Paris"),
        )));

        let lines = render_message(&message, &registry);
        assert_eq!(lines[0], "Weather in Paris, France");
        assert!(lines.iter().any(|line| line.starts_with("  (Estimated reading")));
        assert_eq!(lines.last().map(String::as_str), Some("  source: synthetic"));
    }

    #[test]
    fn unknown_plugin_falls_back_to_content() {
        let registry = registry();
        let mut message = Message::pending_plugin("translator");
        message.complete(Completion::Success(PluginData::Calculation(Calculation {
            expression: "x".into(),
            result: "y".into(),
            value_type: "number".into(),
        })));
        assert_eq!(
            render_message(&message, &registry),
            vec!["[translator] Plugin executed successfully"]
        );
    }

    #[test]
    fn skills_list_every_plugin() {
        let lines = render_skills(&registry());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("/weather <city>"));
        assert!(lines[1].ends_with("triggers: /calc, /calculate"));
        assert!(lines[2].trim_start().starts_with("Dictionary"));
    }
}
