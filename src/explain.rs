//! Folding match expressions into printable explanations.

use serde::Serialize;
use tracing::debug;

use crate::error::ExplainError;
use crate::types::{HeaderSpace, MatchExpr, Node};

/// Where matched traffic must come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Origination {
    /// Traffic originated by the device itself.
    Device,
    /// Traffic entering on one of these interfaces. Never empty.
    Interfaces(Vec<String>),
}

/// Normalized summary of one conjunction of match conditions.
///
/// At most one positive header space and at most one origination; any number
/// of excluded header spaces, kept in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub positive_header_space: Option<HeaderSpace>,
    pub negative_header_spaces: Vec<HeaderSpace>,
    pub origination: Option<Origination>,
}

impl Explanation {
    /// Fold a conjunction into an explanation.
    ///
    /// # Errors
    ///
    /// - `MalformedExplanation` on a second positive header space, a second
    ///   origination, or a negation of anything but a header space match.
    /// - `UnsupportedConjunct` on nested `And`/`Or`.
    pub fn from_conjuncts(conjuncts: &[MatchExpr]) -> Result<Self, ExplainError> {
        let mut explanation = Explanation::default();

        for conjunct in conjuncts {
            match conjunct {
                MatchExpr::MatchHeaderSpace(header_space) => {
                    if explanation.positive_header_space.is_some() {
                        return Err(ExplainError::MalformedExplanation(
                            "more than one positive header space".to_string(),
                        ));
                    }
                    explanation.positive_header_space = Some(header_space.clone());
                }
                MatchExpr::MatchSrcInterface(interfaces) => {
                    explanation.set_origination(Origination::Interfaces(interfaces.clone()))?
                }
                MatchExpr::OriginatingFromDevice => {
                    explanation.set_origination(Origination::Device)?
                }
                MatchExpr::Not(operand) => match operand.as_ref() {
                    MatchExpr::MatchHeaderSpace(header_space) => {
                        explanation.negative_header_spaces.push(header_space.clone())
                    }
                    other => {
                        return Err(ExplainError::MalformedExplanation(format!(
                            "negation is only supported over header space matches, found {}",
                            other.kind()
                        )));
                    }
                },
                MatchExpr::True => {}
                MatchExpr::And(_) | MatchExpr::Or(_) => {
                    return Err(ExplainError::UnsupportedConjunct(conjunct.kind().to_string()));
                }
            }
        }

        Ok(explanation)
    }

    fn set_origination(&mut self, origination: Origination) -> Result<(), ExplainError> {
        if self.origination.is_some() {
            return Err(ExplainError::MalformedExplanation(
                "more than one origination constraint".to_string(),
            ));
        }
        self.origination = Some(origination);
        Ok(())
    }
}

impl MatchExpr {
    /// Expand into one explanation per disjunct.
    ///
    /// `Or` is expanded one disjunct at a time and never distributed over
    /// `And`; every other expression is a single conjunction.
    pub fn to_explanations(&self) -> Result<Vec<Explanation>, ExplainError> {
        match self {
            MatchExpr::And(conjuncts) => Ok(vec![Explanation::from_conjuncts(conjuncts)?]),
            MatchExpr::Or(disjuncts) => {
                let mut explanations = Vec::with_capacity(disjuncts.len());
                for disjunct in disjuncts {
                    explanations.extend(disjunct.to_explanations()?);
                }
                debug!(
                    event = "Explain",
                    phase = "Disjunction",
                    disjuncts = disjuncts.len(),
                    explanations = explanations.len()
                );
                Ok(explanations)
            }
            single => Ok(vec![Explanation::from_conjuncts(std::slice::from_ref(
                single,
            ))?]),
        }
    }
}

impl Node {
    /// Explanations for a parsed top-level value, which must be a match
    /// expression.
    pub fn to_explanations(&self) -> Result<Vec<Explanation>, ExplainError> {
        match self {
            Node::Match(expr) => expr.to_explanations(),
            other => Err(ExplainError::UnsupportedConjunct(format!(
                "top-level {} is not a match expression",
                other.kind()
            ))),
        }
    }
}
