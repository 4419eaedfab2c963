// src/lib.rs
pub use error::ExplainError;
pub use explain::{Explanation, Origination};
pub use explainer::{ExplainOptions, Explainer, format_headerspace_explanation};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse};
pub use render::Render;
pub use tags::{TAG_FIELD, Tag};
pub use types::{
    AclLine, HeaderSpace, IpSpace, LineAction, MatchExpr, MatchKind, Node, NodeKind, SubRange,
};

mod error;
mod explain;
mod explainer;
mod parser;
mod render;
mod simplify;
mod tags;
mod types;

#[cfg(test)]
mod tests;
