use serde::Serialize;
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants};

use super::{IpSpace, MatchExpr, SubRange};

/// Result of parsing any JSON value.
///
/// Tagged objects become typed nodes; everything the parser does not
/// recognize is kept as-is in `Raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, EnumDiscriminants)]
#[strum_discriminants(name(NodeKind), derive(Display))]
#[serde(tag = "type", content = "value")]
pub enum Node {
    IpSpace(IpSpace),
    Match(MatchExpr),
    SubRange(SubRange),
    List(Vec<Node>),
    Raw(Value),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::from(self)
    }
}

impl From<IpSpace> for Node {
    fn from(space: IpSpace) -> Self {
        Node::IpSpace(space)
    }
}

impl From<MatchExpr> for Node {
    fn from(expr: MatchExpr) -> Self {
        Node::Match(expr)
    }
}

impl From<SubRange> for Node {
    fn from(range: SubRange) -> Self {
        Node::SubRange(range)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Raw(Value::String(s.to_string()))
    }
}
