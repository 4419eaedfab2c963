use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ExplainError;
use crate::explain::Explanation;
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use crate::render::Render;
use crate::types::Node;

/// Tunables for an [`Explainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainOptions {
    /// How deeply tagged objects and lists may nest before parsing fails.
    pub max_depth: usize,
}

impl Default for ExplainOptions {
    fn default() -> Self {
        ExplainOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Turns serialized match expressions into explanation text.
///
/// Holds no state besides its options; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Explainer {
    options: ExplainOptions,
}

impl Explainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExplainOptions) -> Self {
        Explainer { options }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &ExplainOptions {
        &self.options
    }

    pub fn parse_value(&self, value: &Value) -> Result<Node, ExplainError> {
        Parser::new(self.options.max_depth).parse(value)
    }

    pub fn parse_json(&self, json_text: &str) -> Result<Node, ExplainError> {
        let value: Value = serde_json::from_str(json_text)?;
        self.parse_value(&value)
    }

    pub fn explain(&self, json_text: &str) -> Result<Vec<Explanation>, ExplainError> {
        let node = self.parse_json(json_text)?;
        debug!(event = "Format", phase = "Parsed", kind = %node.kind());
        node.to_explanations()
    }

    /// Render every explanation, separated by a blank line.
    ///
    /// Any failure aborts the whole call; no partial output is produced.
    pub fn format(&self, json_text: &str) -> Result<String, ExplainError> {
        let result = self.explain(json_text).and_then(|explanations| {
            debug!(
                event = "Format",
                phase = "Explained",
                explanations = explanations.len()
            );
            explanations
                .iter()
                .map(Render::render)
                .collect::<Result<Vec<_>, _>>()
        });

        match result {
            Ok(blocks) => Ok(blocks.join("\n\n")),
            Err(err) => {
                warn!(event = "Format", phase = "Failed", error = %err);
                Err(err)
            }
        }
    }
}

/// Format a serialized match expression with default options.
///
/// Example:
/// ```rust
/// use headerspace_explain::format_headerspace_explanation;
/// let json = r#"{
///     "class": "org.batfish.datamodel.acl.MatchHeaderSpace",
///     "headerSpace": {"srcIps": "1.1.1.1"}
/// }"#;
/// assert_eq!(
///     format_headerspace_explanation(json).unwrap(),
///     "Including srcIps: 1.1.1.1"
/// );
/// ```
pub fn format_headerspace_explanation(json_text: &str) -> Result<String, ExplainError> {
    Explainer::new().format(json_text)
}
