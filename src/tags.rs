//! Wire tags recognized by the parser.
//!
//! The upstream engine tags every serialized object with its fully qualified
//! class name in the `class` field. These strings are a wire contract and must
//! match byte-for-byte.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Name of the field carrying an object's tag.
pub const TAG_FIELD: &str = "class";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
pub enum Tag {
    #[strum(serialize = "org.batfish.datamodel.AclIpSpace")]
    AclIpSpace,
    #[strum(serialize = "org.batfish.datamodel.acl.AndMatchExpr")]
    AndMatchExpr,
    #[strum(serialize = "org.batfish.datamodel.IpIpSpace")]
    IpIpSpace,
    #[strum(serialize = "org.batfish.datamodel.IpWildcard")]
    IpWildcard,
    #[strum(serialize = "org.batfish.datamodel.IpWildcardIpSpace")]
    IpWildcardIpSpace,
    #[strum(serialize = "org.batfish.datamodel.IpWildcardSetIpSpace")]
    IpWildcardSetIpSpace,
    #[strum(serialize = "org.batfish.datamodel.acl.OrMatchExpr")]
    OrMatchExpr,
    #[strum(serialize = "org.batfish.datamodel.acl.NotMatchExpr")]
    NotMatchExpr,
    #[strum(serialize = "org.batfish.datamodel.acl.OriginatingFromDevice")]
    OriginatingFromDevice,
    #[strum(serialize = "org.batfish.datamodel.acl.MatchHeaderSpace")]
    MatchHeaderSpace,
    #[strum(serialize = "org.batfish.datamodel.acl.MatchSrcInterface")]
    MatchSrcInterface,
    #[strum(serialize = "org.batfish.datamodel.acl.TrueExpr")]
    TrueExpr,
    #[strum(serialize = "org.batfish.datamodel.UniverseIpSpace")]
    UniverseIpSpace,
}

/// Wire string to tag, built once on first use and never modified.
static REGISTRY: Lazy<HashMap<&'static str, Tag>> =
    Lazy::new(|| Tag::iter().map(|tag| (tag.wire_name(), tag)).collect());

impl Tag {
    /// The exact string the upstream engine writes for this tag.
    pub fn wire_name(self) -> &'static str {
        self.into()
    }

    /// Look up a wire string. Unknown strings are not an error; the caller
    /// passes such objects through untyped.
    pub fn lookup(wire_name: &str) -> Option<Tag> {
        REGISTRY.get(wire_name).copied()
    }
}
