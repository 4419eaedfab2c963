//! Recovers set-algebra forms from compiled ACL line sequences.
//!
//! Compiled ACLs spell `not X` as `[DENY X, PERMIT any]` and `X and Y` as
//! `[DENY not X, DENY not Y, PERMIT any]`. Only these two shapes are
//! recognized; anything else stays a sequence of lines.

use tracing::debug;

use crate::types::{AclLine, IpSpace, LineAction};

impl IpSpace {
    /// Rewrite an ACL-derived space into set-algebra form where possible.
    ///
    /// All other variants are returned unchanged. Idempotent: simplifying a
    /// simplified space yields the same space.
    pub fn simplify(&self) -> IpSpace {
        match self {
            IpSpace::AclDerived(lines) => simplify_lines(lines),
            other => other.clone(),
        }
    }
}

fn simplify_lines(lines: &[AclLine]) -> IpSpace {
    // Nested ACL spaces are simplified first so the rules below see their
    // rewritten shape.
    let lines: Vec<AclLine> = lines
        .iter()
        .map(|line| AclLine::new(line.action, line.space.simplify()))
        .collect();

    match lines.as_slice() {
        [
            AclLine {
                action: LineAction::Deny,
                space,
            },
            last,
        ] if last.is_catch_all_permit() => {
            debug!(event = "Simplify", phase = "Rule", rule = "complement");
            IpSpace::complement(space.clone())
        }
        [
            AclLine {
                action: LineAction::Deny,
                space: IpSpace::Complement(first),
            },
            AclLine {
                action: LineAction::Deny,
                space: IpSpace::Complement(second),
            },
            last,
        ] if last.is_catch_all_permit() => {
            debug!(event = "Simplify", phase = "Rule", rule = "intersection");
            IpSpace::Intersection(vec![(**first).clone(), (**second).clone()])
        }
        _ => IpSpace::AclDerived(lines),
    }
}
