//! Turning syntax trees and explanations into text.

use itertools::Itertools;
use serde_json::{Map, Value};

use crate::error::ExplainError;
use crate::explain::{Explanation, Origination};
use crate::types::{AclLine, HeaderSpace, IpSpace, Node, SubRange};

/// TCP flag selector fields and the short names they print as.
const TCP_FLAGS: [(&str, &str); 8] = [
    ("useAck", "ack"),
    ("useCwr", "cwr"),
    ("useEce", "ece"),
    ("useFin", "fin"),
    ("usePsh", "psh"),
    ("useRst", "rst"),
    ("useSyn", "syn"),
    ("useUrg", "urg"),
];

/// Header space fields printed under a shorter name.
const RENAMED_FIELDS: [(&str, &str); 1] = [("tcpFlagsMatchConditions", "tcpFlags")];

/// Human-readable text for a parsed value.
pub trait Render {
    fn render(&self) -> Result<String, ExplainError>;
}

impl Render for String {
    fn render(&self) -> Result<String, ExplainError> {
        Ok(self.clone())
    }
}

impl<T: Render> Render for [T] {
    /// A single element prints alone; anything else as `[a,b]`.
    fn render(&self) -> Result<String, ExplainError> {
        if let [only] = self {
            return only.render();
        }
        let items = self
            .iter()
            .map(Render::render)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", items.join(",")))
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> Result<String, ExplainError> {
        self.as_slice().render()
    }
}

impl Render for Value {
    fn render(&self) -> Result<String, ExplainError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Err(ExplainError::NullValue(
                "a present value must not be null".to_string(),
            )),
            Value::Array(items) => items.render(),
            Value::Object(obj) if is_tcp_flags(obj) => Ok(render_tcp_flags(obj)),
            Value::Object(obj) => Ok(obj
                .iter()
                .map(|(key, value)| Ok(format!("{key}={}", value.render()?)))
                .collect::<Result<Vec<_>, ExplainError>>()?
                .join(", ")),
        }
    }
}

fn is_tcp_flags(obj: &Map<String, Value>) -> bool {
    obj.contains_key("tcpFlags") || TCP_FLAGS.iter().any(|(key, _)| obj.contains_key(*key))
}

/// Only flags whose selector is `true` are printed; the paired value of an
/// unselected flag is ignored.
fn render_tcp_flags(obj: &Map<String, Value>) -> String {
    let values = obj.get("tcpFlags");
    let used = TCP_FLAGS
        .iter()
        .filter(|(key, _)| obj.get(*key).and_then(Value::as_bool) == Some(true))
        .map(|(_, flag)| {
            match values.and_then(|v| v.get(*flag)).and_then(Value::as_bool) {
                Some(value) => format!("{flag}={value}"),
                None => flag.to_string(),
            }
        })
        .collect::<Vec<_>>();

    if used.is_empty() {
        "any".to_string()
    } else {
        used.join(", ")
    }
}

impl Render for SubRange {
    fn render(&self) -> Result<String, ExplainError> {
        if self.start == self.end {
            Ok(self.start.to_string())
        } else {
            Ok(format!("{} to {}", self.start, self.end))
        }
    }
}

impl Render for AclLine {
    fn render(&self) -> Result<String, ExplainError> {
        Ok(format!("{} {}", self.action, self.space.render()?))
    }
}

impl Render for IpSpace {
    fn render(&self) -> Result<String, ExplainError> {
        match self {
            IpSpace::Universe => Ok("any".to_string()),
            IpSpace::Complement(space) => Ok(format!("not {}", space.render()?)),
            IpSpace::Union(spaces) => render_set_operation("union", spaces),
            IpSpace::Intersection(spaces) => render_set_operation("intersect", spaces),
            IpSpace::IpWildcardSet(whitelist) => whitelist.render(),
            IpSpace::IpWildcard(text) | IpSpace::SingleIp(text) => Ok(text.clone()),
            IpSpace::AclDerived(_) => match self.simplify() {
                IpSpace::AclDerived(lines) => Ok(lines
                    .iter()
                    .map(Render::render)
                    .collect::<Result<Vec<_>, _>>()?
                    .join("\n")),
                simplified => simplified.render(),
            },
        }
    }
}

/// Operands that all print the same collapse to that single text.
fn render_set_operation(name: &str, spaces: &[IpSpace]) -> Result<String, ExplainError> {
    let rendered = spaces
        .iter()
        .map(Render::render)
        .collect::<Result<Vec<_>, _>>()?;
    if rendered.iter().all_equal() {
        if let Some(first) = rendered.first() {
            return Ok(first.clone());
        }
    }
    Ok(format!("{name}({})", rendered.join(", ")))
}

impl Render for HeaderSpace {
    fn render(&self) -> Result<String, ExplainError> {
        let fields = self
            .fields()
            .iter()
            .filter(|(name, value)| !(name == "negate" && *value == Node::Raw(Value::Bool(false))))
            .collect::<Vec<_>>();

        if fields.is_empty() {
            return Ok("full headerspace".to_string());
        }

        fields
            .into_iter()
            .map(|(name, value)| {
                if *value == Node::Raw(Value::Null) {
                    return Err(ExplainError::NullValue(format!(
                        "header space field '{name}' is null"
                    )));
                }
                Ok(format!("{}: {}", display_field_name(name), value.render()?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|fields| fields.join(", "))
    }
}

fn display_field_name(name: &str) -> &str {
    RENAMED_FIELDS
        .iter()
        .find(|(wire, _)| *wire == name)
        .map_or(name, |(_, shown)| *shown)
}

impl Render for Node {
    fn render(&self) -> Result<String, ExplainError> {
        match self {
            Node::IpSpace(space) => space.render(),
            // Match expressions are only explained at top level, never printed as values.
            Node::Match(expr) => Err(ExplainError::UnsupportedConjunct(format!(
                "{} match expression cannot be rendered as a value",
                expr.kind()
            ))),
            Node::SubRange(range) => range.render(),
            Node::List(items) => items.render(),
            Node::Raw(value) => value.render(),
        }
    }
}

impl Render for Explanation {
    fn render(&self) -> Result<String, ExplainError> {
        let mut lines = Vec::new();

        match &self.origination {
            Some(Origination::Device) => lines.push("Originating from device".to_string()),
            Some(Origination::Interfaces(interfaces)) => match interfaces.as_slice() {
                [only] => lines.push(format!("Originating from interface {only}")),
                many => lines.push(format!(
                    "Originating from one interface of: {}",
                    many.join(", ")
                )),
            },
            None => {}
        }

        match &self.positive_header_space {
            Some(header_space) => lines.push(format!("Including {}", header_space.render()?)),
            None => lines.push("Full HeaderSpace".to_string()),
        }

        for header_space in &self.negative_header_spaces {
            lines.push(format!("Excluding {}", header_space.render()?));
        }

        Ok(lines.join("\n"))
    }
}
