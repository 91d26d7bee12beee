use tracing::debug;

use super::{Plugin, PluginData, PluginError};

/// Normalized outcome of one plugin execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Success { data: PluginData },
    Failure { reason: String },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }
}

/// Extracts the argument from `raw_input` and executes `plugin`. Errors never
/// escape; each one is folded into [`ExecutionResult::Failure`].
pub async fn run(plugin: &dyn Plugin, raw_input: &str) -> ExecutionResult {
    let Some(argument) = plugin.extract_argument(raw_input) else {
        let err = PluginError::MissingArgument {
            hint: plugin.missing_argument_hint(),
        };
        debug!(plugin = plugin.name(), "no argument extracted");
        return ExecutionResult::Failure {
            reason: err.to_string(),
        };
    };

    match plugin.execute(&argument).await {
        Ok(data) => {
            debug!(plugin = plugin.name(), argument = argument.as_str(), "plugin succeeded");
            ExecutionResult::Success { data }
        }
        Err(err) => {
            debug!(plugin = plugin.name(), argument = argument.as_str(), error = %err, "plugin failed");
            ExecutionResult::Failure {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{CalculatorPlugin, RenderableView};
    use async_trait::async_trait;
    use regex::Regex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::LazyLock;

    static SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/probe\s+(.+)").unwrap());

    /// Counts executions so tests can prove the body was skipped.
    #[derive(Default)]
    struct ProbePlugin {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Plugin for ProbePlugin {
        fn name(&self) -> &'static str {
            "probe"
        }
        fn display_name(&self) -> &'static str {
            "Probe"
        }
        fn triggers(&self) -> &[&'static str] {
            &["/probe"]
        }
        fn patterns(&self) -> &[Regex] {
            &[]
        }
        fn slash_pattern(&self) -> &Regex {
            &SLASH
        }
        fn missing_argument_hint(&self) -> &'static str {
            "Please say what to probe"
        }
        fn usage(&self) -> &'static str {
            "/probe <thing>"
        }
        async fn execute(&self, argument: &str) -> Result<PluginData, PluginError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PluginError::Unavailable {
                plugin: "probe",
                key: argument.to_string(),
            })
        }
        fn describe(&self, _data: &PluginData) -> RenderableView {
            RenderableView::unsupported(self.name())
        }
    }

    #[tokio::test]
    async fn missing_argument_skips_execution() {
        let plugin = ProbePlugin::default();
        let result = run(&plugin, "/probe").await;

        assert_eq!(
            result,
            ExecutionResult::Failure {
                reason: "Missing argument. Please say what to probe".to_string()
            }
        );
        assert_eq!(plugin.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn plugin_errors_become_failures() {
        let plugin = ProbePlugin::default();
        let result = run(&plugin, "/probe deep space").await;

        assert_eq!(
            result,
            ExecutionResult::Failure {
                reason: "Unable to fetch probe data for \"deep space\". Please try again."
                    .to_string()
            }
        );
        assert_eq!(plugin.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn calculator_results_round_through_engine() {
        let plugin = CalculatorPlugin::new();

        match run(&plugin, "/calc 2+2").await {
            ExecutionResult::Success {
                data: PluginData::Calculation(calc),
            } => assert_eq!(calc.result, "4"),
            other => panic!("unexpected result: {other:?}"),
        }

        let failure = run(&plugin, "/calc )(").await;
        assert!(!failure.is_success());
        assert_eq!(
            failure,
            ExecutionResult::Failure {
                reason: "Invalid mathematical expression".to_string()
            }
        );
    }
}
