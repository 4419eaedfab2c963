//! Match expressions: boolean predicates over packet headers and origin.

use serde::Serialize;
use strum_macros::{Display, EnumDiscriminants};

use super::node::Node;

/// Constraints over packet header fields, in wire order.
///
/// Values are parsed nodes: IP spaces, sub-ranges, lists, or raw JSON the
/// parser did not need to type (e.g. TCP flag conditions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderSpace {
    fields: Vec<(String, Node)>,
}

impl HeaderSpace {
    pub fn new(fields: Vec<(String, Node)>) -> Self {
        HeaderSpace { fields }
    }

    pub fn fields(&self) -> &[(String, Node)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Node)> for HeaderSpace {
    fn from_iter<I: IntoIterator<Item = (S, Node)>>(iter: I) -> Self {
        HeaderSpace::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, EnumDiscriminants)]
#[strum_discriminants(name(MatchKind), derive(Display))]
#[serde(tag = "type", content = "value")]
pub enum MatchExpr {
    And(Vec<MatchExpr>),
    Or(Vec<MatchExpr>),
    Not(Box<MatchExpr>),
    MatchHeaderSpace(HeaderSpace),
    /// Non-empty list of interface names.
    MatchSrcInterface(Vec<String>),
    OriginatingFromDevice,
    True,
}

impl MatchExpr {
    pub fn not(operand: MatchExpr) -> Self {
        MatchExpr::Not(Box::new(operand))
    }

    pub fn kind(&self) -> MatchKind {
        MatchKind::from(self)
    }
}
