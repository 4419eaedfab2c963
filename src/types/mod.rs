//! Typed syntax tree for serialized match expressions and IP spaces.
//!
//! Parsed values fall into one of:
//! - `IpSpace`: sets of addresses (`1.1.1.1`, `union(..)`, `not ..`)
//! - `MatchExpr`: boolean predicates over header space and origination
//! - `SubRange`: inclusive numeric ranges written `<start>-<end>` on the wire
//! - untyped passthrough values kept as raw JSON

mod ip_space;
mod match_expr;
mod node;
mod sub_range;

pub use ip_space::{AclLine, IpSpace, LineAction};
pub use match_expr::{HeaderSpace, MatchExpr, MatchKind};
pub use node::{Node, NodeKind};
pub use sub_range::SubRange;
