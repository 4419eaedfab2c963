//! End-to-end cases: JSON in, explanation text out.

use serde_json::{Value, json};


pub(crate) fn ip(addr: &str) -> Value {
    json!({"class": "org.batfish.datamodel.IpIpSpace", "ip": addr})
}

pub(crate) fn universe() -> Value {
    json!({"class": "org.batfish.datamodel.UniverseIpSpace"})
}

pub(crate) fn acl(lines: &[(&str, Value)]) -> Value {
    let lines: Vec<Value> = lines
        .iter()
        .map(|(action, space)| json!({"action": action, "ipSpace": space}))
        .collect();
    json!({"class": "org.batfish.datamodel.AclIpSpace", "lines": lines})
}

pub(crate) fn header_space(fields: Value) -> Value {
    json!({"class": "org.batfish.datamodel.acl.MatchHeaderSpace", "headerSpace": fields})
}

pub(crate) fn not(operand: Value) -> Value {
    json!({"class": "org.batfish.datamodel.acl.NotMatchExpr", "operand": operand})
}

pub(crate) fn and(conjuncts: Vec<Value>) -> Value {
    json!({"class": "org.batfish.datamodel.acl.AndMatchExpr", "conjuncts": conjuncts})
}

pub(crate) fn or(disjuncts: Vec<Value>) -> Value {
    json!({"class": "org.batfish.datamodel.acl.OrMatchExpr", "disjuncts": disjuncts})
}

pub(crate) fn src_interface(interfaces: &[&str]) -> Value {
    json!({"class": "org.batfish.datamodel.acl.MatchSrcInterface", "srcInterfaces": interfaces})
}

pub(crate) fn from_device() -> Value {
    json!({"class": "org.batfish.datamodel.acl.OriginatingFromDevice"})
}

pub(crate) fn true_expr() -> Value {
    json!({"class": "org.batfish.datamodel.acl.TrueExpr"})
}
