//! Calculator skill. Single tier: an arithmetic error is final.

pub mod eval;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{literal_regex, Plugin, PluginData, PluginError, RenderableView};

static SLASH: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"(?i)^/calc(?:ulate)?\s+(.+)"));

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        literal_regex(r"(?i)calculate (.+)"),
        literal_regex(r"(?i)what'?s (.+)"),
        literal_regex(r"(?i)solve (.+)"),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub expression: String,
    pub result: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

#[derive(Debug, Default)]
pub struct CalculatorPlugin;

impl CalculatorPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// Natural phrasing often ends with a question mark ("what's 6*7?").
fn strip_question(expression: &str) -> &str {
    expression.trim().trim_end_matches('?').trim_end()
}

#[async_trait]
impl Plugin for CalculatorPlugin {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn display_name(&self) -> &'static str {
        "Calculator"
    }

    fn triggers(&self) -> &[&'static str] {
        &["/calc", "/calculate"]
    }

    fn patterns(&self) -> &[Regex] {
        &PATTERNS
    }

    fn slash_pattern(&self) -> &Regex {
        &SLASH
    }

    fn missing_argument_hint(&self) -> &'static str {
        "Please provide a mathematical expression"
    }

    fn usage(&self) -> &'static str {
        "/calc <expression>"
    }

    async fn execute(&self, argument: &str) -> Result<PluginData, PluginError> {
        let expression = strip_question(argument);
        if expression.is_empty() {
            return Err(PluginError::InvalidArgument(
                "Please provide a mathematical expression".to_string(),
            ));
        }

        let value = eval::evaluate(expression).map_err(|err| {
            debug!(expression, error = %err, "expression rejected");
            PluginError::InvalidExpression
        })?;

        Ok(PluginData::Calculation(Calculation {
            expression: expression.to_string(),
            result: eval::format_number(value),
            value_type: "number".to_string(),
        }))
    }

    fn describe(&self, data: &PluginData) -> RenderableView {
        match data {
            PluginData::Calculation(calc) => RenderableView::new(self.display_name())
                .row("Expression", calc.expression.as_str())
                .row("Result", calc.result.as_str()),
            _ => RenderableView::unsupported(self.name()),
        }
    }
}
