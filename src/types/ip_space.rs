//! IP spaces and the ACL lines they may be derived from.

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Action of a single ACL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LineAction {
    Permit,
    Deny,
}

/// One line of an ACL-derived IP space. Lines are evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AclLine {
    pub action: LineAction,
    pub space: IpSpace,
}

impl AclLine {
    pub fn new(action: LineAction, space: IpSpace) -> Self {
        AclLine { action, space }
    }

    pub fn permit(space: IpSpace) -> Self {
        Self::new(LineAction::Permit, space)
    }

    pub fn deny(space: IpSpace) -> Self {
        Self::new(LineAction::Deny, space)
    }

    /// `PERMIT any`, the catch-all that closes compiled ACL sequences.
    pub fn is_catch_all_permit(&self) -> bool {
        self.action == LineAction::Permit && self.space == IpSpace::Universe
    }
}

/// A set of IP addresses.
///
/// Every variant except `AclDerived` is already in set-algebra form;
/// `AclDerived` must go through [`IpSpace::simplify`] before it can be read
/// as a complement, intersection or union.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum IpSpace {
    Universe,
    Complement(Box<IpSpace>),
    Union(Vec<IpSpace>),
    Intersection(Vec<IpSpace>),
    IpWildcardSet(Vec<String>),
    IpWildcard(String),
    SingleIp(String),
    AclDerived(Vec<AclLine>),
}

impl IpSpace {
    pub fn complement(space: IpSpace) -> Self {
        IpSpace::Complement(Box::new(space))
    }

    pub fn single_ip(ip: impl Into<String>) -> Self {
        IpSpace::SingleIp(ip.into())
    }
}
