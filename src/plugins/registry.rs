use std::collections::HashSet;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use super::dictionary::DictionarySettings;
use super::weather::WeatherSettings;
use super::{CalculatorPlugin, DictionaryPlugin, Plugin, PluginContext, WeatherPlugin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateName(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => {
                write!(f, "plugin name registered twice: {}", name)
            }
        }
    }
}

impl StdError for RegistryError {}

/// Input matched to a plugin. The argument is extracted later by the engine.
#[derive(Clone)]
pub struct ParsedCommand {
    pub plugin: Arc<dyn Plugin>,
    pub raw_input: String,
}

impl fmt::Debug for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedCommand")
            .field("plugin", &self.plugin.name())
            .field("raw_input", &self.raw_input)
            .finish()
    }
}

/// Ordered, immutable set of plugins. Order is priority.
pub struct Registry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Registry {
    pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for plugin in &plugins {
            if !seen.insert(plugin.name()) {
                return Err(RegistryError::DuplicateName(plugin.name()));
            }
        }
        Ok(Self { plugins })
    }

    /// Weather, calculator and dictionary, in that priority order.
    pub fn builtin(
        ctx: PluginContext,
        weather: WeatherSettings,
        dictionary: DictionarySettings,
    ) -> Self {
        Self {
            plugins: vec![
                Arc::new(WeatherPlugin::new(ctx.clone(), weather)),
                Arc::new(CalculatorPlugin::new()),
                Arc::new(DictionaryPlugin::new(ctx, dictionary)),
            ],
        }
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// Every trigger of every plugin is checked before any pattern, so a
    /// slash command can never lose to another plugin's natural phrasing.
    pub fn resolve(&self, text: &str) -> Option<ParsedCommand> {
        let lowered = text.to_lowercase();

        let by_trigger = self.plugins.iter().find(|plugin| {
            plugin
                .triggers()
                .iter()
                .any(|trigger| lowered.starts_with(&trigger.to_lowercase()))
        });

        let matched = by_trigger.or_else(|| {
            self.plugins.iter().find(|plugin| {
                plugin
                    .patterns()
                    .iter()
                    .any(|pattern| pattern.is_match(text))
            })
        })?;

        Some(ParsedCommand {
            plugin: Arc::clone(matched),
            raw_input: text.to_string(),
        })
    }
}
