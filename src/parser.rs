//! JSON to syntax tree.
//!
//! Objects carrying a registered tag become typed nodes; strings of the form
//! `<digits>-<digits>` become sub-ranges; lists are parsed element-wise; all
//! other values pass through untouched.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ExplainError;
use crate::tags::{TAG_FIELD, Tag};
use crate::types::{AclLine, HeaderSpace, IpSpace, LineAction, MatchExpr, Node, SubRange};

/// Default bound on how deeply tagged objects and lists may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

type JsonObject = Map<String, Value>;

/// Parse a JSON value with the default depth bound.
pub fn parse(value: &Value) -> Result<Node, ExplainError> {
    Parser::default().parse(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(DEFAULT_MAX_DEPTH)
    }
}

impl Parser {
    pub fn new(max_depth: usize) -> Self {
        Parser { max_depth }
    }

    pub fn parse(&self, value: &Value) -> Result<Node, ExplainError> {
        self.parse_at(value, 0)
    }

    fn parse_at(&self, value: &Value, depth: usize) -> Result<Node, ExplainError> {
        if depth > self.max_depth {
            return Err(ExplainError::NestingTooDeep {
                max: self.max_depth,
            });
        }

        match value {
            Value::Object(obj) => self.parse_object(obj, depth),
            Value::String(s) => Ok(SubRange::from_wire(s)
                .map(Node::SubRange)
                .unwrap_or_else(|| Node::Raw(value.clone()))),
            Value::Array(items) => items
                .iter()
                .map(|item| self.parse_at(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::List),
            _ => Ok(Node::Raw(value.clone())),
        }
    }

    fn parse_object(&self, obj: &JsonObject, depth: usize) -> Result<Node, ExplainError> {
        let tag = obj.get(TAG_FIELD).and_then(Value::as_str);
        let Some(tag) = tag.and_then(Tag::lookup) else {
            debug!(event = "Parse", phase = "Passthrough", tag = ?tag);
            return Ok(Node::Raw(Value::Object(obj.clone())));
        };

        let depth = depth + 1;
        let node = match tag {
            Tag::AclIpSpace => Node::IpSpace(self.acl_ip_space(obj, depth)?),
            Tag::AndMatchExpr => Node::Match(MatchExpr::And(self.match_exprs(
                obj,
                "conjuncts",
                tag,
                depth,
            )?)),
            Tag::OrMatchExpr => Node::Match(MatchExpr::Or(self.match_exprs(
                obj,
                "disjuncts",
                tag,
                depth,
            )?)),
            Tag::NotMatchExpr => {
                let operand = self.parse_at(field(obj, "operand", tag)?, depth)?;
                Node::Match(MatchExpr::not(expect_match_expr(operand, tag)?))
            }
            Tag::IpIpSpace => Node::IpSpace(IpSpace::SingleIp(string_field(obj, "ip", tag)?)),
            Tag::IpWildcard => {
                Node::IpSpace(IpSpace::IpWildcard(string_field(obj, "ipWildcard", tag)?))
            }
            Tag::IpWildcardIpSpace => {
                Node::IpSpace(IpSpace::IpWildcard(self.wildcard_text(obj, tag, depth)?))
            }
            Tag::IpWildcardSetIpSpace => {
                Node::IpSpace(IpSpace::IpWildcardSet(string_list(obj, "whitelist", tag)?))
            }
            Tag::UniverseIpSpace => Node::IpSpace(IpSpace::Universe),
            Tag::MatchHeaderSpace => {
                Node::Match(MatchExpr::MatchHeaderSpace(self.header_space(obj, depth)?))
            }
            Tag::MatchSrcInterface => {
                let interfaces = string_list(obj, "srcInterfaces", tag)?;
                if interfaces.is_empty() {
                    return Err(ExplainError::InvalidFormat(format!(
                        "{tag}: srcInterfaces must not be empty"
                    )));
                }
                Node::Match(MatchExpr::MatchSrcInterface(interfaces))
            }
            Tag::OriginatingFromDevice => Node::Match(MatchExpr::OriginatingFromDevice),
            Tag::TrueExpr => Node::Match(MatchExpr::True),
        };
        Ok(node)
    }

    /// ACL lines, collapsed to a union when every line permits.
    fn acl_ip_space(&self, obj: &JsonObject, depth: usize) -> Result<IpSpace, ExplainError> {
        let tag = Tag::AclIpSpace;
        let lines = array_field(obj, "lines", tag)?
            .iter()
            .map(|line| self.acl_line(line, depth))
            .collect::<Result<Vec<_>, _>>()?;

        if lines.iter().all(|line| line.action == LineAction::Permit) {
            debug!(
                event = "Parse",
                phase = "AclCollapse",
                lines = lines.len()
            );
            return Ok(IpSpace::Union(
                lines.into_iter().map(|line| line.space).collect(),
            ));
        }
        Ok(IpSpace::AclDerived(lines))
    }

    fn acl_line(&self, line: &Value, depth: usize) -> Result<AclLine, ExplainError> {
        let tag = Tag::AclIpSpace;
        let Value::Object(line) = line else {
            return Err(ExplainError::InvalidFormat(format!(
                "{tag}: each line must be an object"
            )));
        };
        let action = string_field(line, "action", tag)?;
        let action = action.parse::<LineAction>().map_err(|_| {
            ExplainError::InvalidFormat(format!("{tag}: unknown line action '{action}'"))
        })?;
        let space = self.parse_at(field(line, "ipSpace", tag)?, depth + 1)?;
        let Node::IpSpace(space) = space else {
            return Err(ExplainError::InvalidFormat(format!(
                "{tag}: ipSpace must be an IP space, found {}",
                space.kind()
            )));
        };
        Ok(AclLine::new(action, space))
    }

    fn match_exprs(
        &self,
        obj: &JsonObject,
        name: &str,
        tag: Tag,
        depth: usize,
    ) -> Result<Vec<MatchExpr>, ExplainError> {
        array_field(obj, name, tag)?
            .iter()
            .map(|item| expect_match_expr(self.parse_at(item, depth)?, tag))
            .collect()
    }

    /// The wildcard is written either inline as a string or as a nested
    /// wildcard object.
    fn wildcard_text(&self, obj: &JsonObject, tag: Tag, depth: usize) -> Result<String, ExplainError> {
        match field(obj, "ipWildcard", tag)? {
            Value::String(s) => Ok(s.clone()),
            nested => match self.parse_at(nested, depth)? {
                Node::IpSpace(IpSpace::IpWildcard(text)) => Ok(text),
                other => Err(ExplainError::InvalidFormat(format!(
                    "{tag}: ipWildcard must be a wildcard, found {}",
                    other.kind()
                ))),
            },
        }
    }

    /// Header space constraints. Field values are parsed individually; an
    /// absent or null header space is the full header space.
    fn header_space(&self, obj: &JsonObject, depth: usize) -> Result<HeaderSpace, ExplainError> {
        match obj.get("headerSpace") {
            None | Some(Value::Null) => Ok(HeaderSpace::default()),
            Some(Value::Object(fields)) => fields
                .iter()
                .map(|(name, value)| Ok((name.clone(), self.parse_at(value, depth)?)))
                .collect::<Result<Vec<_>, ExplainError>>()
                .map(HeaderSpace::new),
            Some(_) => Err(ExplainError::InvalidFormat(format!(
                "{}: headerSpace must be an object",
                Tag::MatchHeaderSpace
            ))),
        }
    }
}

fn expect_match_expr(node: Node, tag: Tag) -> Result<MatchExpr, ExplainError> {
    match node {
        Node::Match(expr) => Ok(expr),
        other => Err(ExplainError::InvalidFormat(format!(
            "{tag}: expected a match expression, found {}",
            other.kind()
        ))),
    }
}

fn field<'a>(obj: &'a JsonObject, name: &str, tag: Tag) -> Result<&'a Value, ExplainError> {
    obj.get(name)
        .ok_or_else(|| ExplainError::InvalidFormat(format!("{tag}: missing field '{name}'")))
}

fn array_field<'a>(obj: &'a JsonObject, name: &str, tag: Tag) -> Result<&'a [Value], ExplainError> {
    field(obj, name, tag)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ExplainError::InvalidFormat(format!("{tag}: field '{name}' must be a list")))
}

fn string_field(obj: &JsonObject, name: &str, tag: Tag) -> Result<String, ExplainError> {
    field(obj, name, tag)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ExplainError::InvalidFormat(format!("{tag}: field '{name}' must be a string")))
}

fn string_list(obj: &JsonObject, name: &str, tag: Tag) -> Result<Vec<String>, ExplainError> {
    array_field(obj, name, tag)?
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ExplainError::InvalidFormat(format!("{tag}: '{name}' must only contain strings"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ip(addr: &str) -> Value {
        json!({"class": "org.batfish.datamodel.IpIpSpace", "ip": addr})
    }

    fn line(action: &str, space: Value) -> Value {
        json!({"action": action, "ipSpace": space})
    }

    fn acl(lines: Vec<Value>) -> Value {
        json!({"class": "org.batfish.datamodel.AclIpSpace", "lines": lines})
    }

    #[test]
    fn test_scalars_pass_through() {
        for value in [json!(true), json!(7), json!(null), json!("eth0")] {
            assert_eq!(parse(&value).unwrap(), Node::Raw(value.clone()));
        }
    }

    #[test]
    fn test_range_string() {
        assert_eq!(
            parse(&json!("22-25")).unwrap(),
            Node::SubRange(SubRange::new(22, 25))
        );
        assert_eq!(parse(&json!("22-")).unwrap(), Node::from("22-"));
    }

    #[test]
    fn test_list_parsed_element_wise() {
        let parsed = parse(&json!(["80-80", "tcp", ip("1.1.1.1")])).unwrap();
        assert_eq!(
            parsed,
            Node::List(vec![
                Node::SubRange(SubRange::new(80, 80)),
                Node::from("tcp"),
                Node::IpSpace(IpSpace::single_ip("1.1.1.1")),
            ])
        );
    }

    #[test]
    fn test_unknown_and_missing_tags_pass_through() {
        let unknown = json!({"class": "org.batfish.datamodel.Prefix", "prefix": "10.0.0.0/8"});
        assert_eq!(parse(&unknown).unwrap(), Node::Raw(unknown.clone()));

        let untagged = json!({"useSyn": true, "tcpFlags": {"syn": true}});
        assert_eq!(parse(&untagged).unwrap(), Node::Raw(untagged.clone()));

        let non_string_tag = json!({"class": 3});
        assert_eq!(parse(&non_string_tag).unwrap(), Node::Raw(non_string_tag.clone()));
    }

    #[test]
    fn test_all_permit_acl_collapses_to_union() {
        let value = acl(vec![line("PERMIT", ip("1.1.1.1")), line("PERMIT", ip("2.2.2.2"))]);
        assert_eq!(
            parse(&value).unwrap(),
            Node::IpSpace(IpSpace::Union(vec![
                IpSpace::single_ip("1.1.1.1"),
                IpSpace::single_ip("2.2.2.2"),
            ]))
        );
    }

    #[test]
    fn test_mixed_acl_keeps_lines() {
        let universe = json!({"class": "org.batfish.datamodel.UniverseIpSpace"});
        let value = acl(vec![line("DENY", ip("1.1.1.1")), line("PERMIT", universe)]);
        assert_eq!(
            parse(&value).unwrap(),
            Node::IpSpace(IpSpace::AclDerived(vec![
                AclLine::deny(IpSpace::single_ip("1.1.1.1")),
                AclLine::permit(IpSpace::Universe),
            ]))
        );
    }

    #[test]
    fn test_wildcards() {
        let inline = json!({
            "class": "org.batfish.datamodel.IpWildcardIpSpace",
            "ipWildcard": "10.0.0.0/8"
        });
        let nested = json!({
            "class": "org.batfish.datamodel.IpWildcardIpSpace",
            "ipWildcard": {"class": "org.batfish.datamodel.IpWildcard", "ipWildcard": "10.0.0.0/8"}
        });
        let expected = Node::IpSpace(IpSpace::IpWildcard("10.0.0.0/8".to_string()));
        assert_eq!(parse(&inline).unwrap(), expected);
        assert_eq!(parse(&nested).unwrap(), expected);

        let set = json!({
            "class": "org.batfish.datamodel.IpWildcardSetIpSpace",
            "whitelist": ["1.1.1.0/24", "2.2.2.0/24"]
        });
        assert_eq!(
            parse(&set).unwrap(),
            Node::IpSpace(IpSpace::IpWildcardSet(vec![
                "1.1.1.0/24".to_string(),
                "2.2.2.0/24".to_string()
            ]))
        );
    }

    #[test]
    fn test_match_expressions() {
        let value = json!({
            "class": "org.batfish.datamodel.acl.AndMatchExpr",
            "conjuncts": [
                {"class": "org.batfish.datamodel.acl.MatchSrcInterface", "srcInterfaces": ["Eth0"]},
                {"class": "org.batfish.datamodel.acl.MatchHeaderSpace", "headerSpace": {"dstPorts": "80-80"}},
                {
                    "class": "org.batfish.datamodel.acl.NotMatchExpr",
                    "operand": {"class": "org.batfish.datamodel.acl.OriginatingFromDevice"}
                },
                {"class": "org.batfish.datamodel.acl.TrueExpr"}
            ]
        });
        let expected = MatchExpr::And(vec![
            MatchExpr::MatchSrcInterface(vec!["Eth0".to_string()]),
            MatchExpr::MatchHeaderSpace(
                [("dstPorts", Node::SubRange(SubRange::new(80, 80)))]
                    .into_iter()
                    .collect(),
            ),
            MatchExpr::not(MatchExpr::OriginatingFromDevice),
            MatchExpr::True,
        ]);
        assert_eq!(parse(&value).unwrap(), Node::Match(expected));
    }

    #[test]
    fn test_header_space_absent_or_null() {
        for value in [
            json!({"class": "org.batfish.datamodel.acl.MatchHeaderSpace"}),
            json!({"class": "org.batfish.datamodel.acl.MatchHeaderSpace", "headerSpace": null}),
        ] {
            assert_eq!(
                parse(&value).unwrap(),
                Node::Match(MatchExpr::MatchHeaderSpace(HeaderSpace::default()))
            );
        }
    }

    #[test]
    fn test_malformed_tagged_objects() {
        let cases = [
            json!({"class": "org.batfish.datamodel.IpIpSpace"}),
            json!({"class": "org.batfish.datamodel.IpIpSpace", "ip": 1}),
            json!({"class": "org.batfish.datamodel.acl.AndMatchExpr", "conjuncts": "x"}),
            json!({"class": "org.batfish.datamodel.acl.AndMatchExpr", "conjuncts": ["x"]}),
            json!({"class": "org.batfish.datamodel.acl.MatchSrcInterface", "srcInterfaces": []}),
            json!({"class": "org.batfish.datamodel.acl.MatchHeaderSpace", "headerSpace": []}),
            acl(vec![line("ALLOW", ip("1.1.1.1"))]),
            acl(vec![line("DENY", json!("1.1.1.1"))]),
        ];
        for value in cases {
            assert!(
                matches!(parse(&value), Err(ExplainError::InvalidFormat(_))),
                "expected InvalidFormat for {value}"
            );
        }
    }

    #[test]
    fn test_nesting_bound() {
        let mut value = json!({"class": "org.batfish.datamodel.acl.TrueExpr"});
        for _ in 0..10 {
            value = json!({"class": "org.batfish.datamodel.acl.NotMatchExpr", "operand": value});
        }
        assert!(Parser::new(10).parse(&value).is_ok());
        assert_eq!(
            Parser::new(9).parse(&value),
            Err(ExplainError::NestingTooDeep { max: 9 })
        );
    }
}
