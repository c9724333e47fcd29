// ! RFC 6570 (level 2-3 subset) URI template expansion and matching.
// !
// ! Module implements the operators MCP resource templates actually use:
// ! `{var}`, `{+reserved}`, `{#fragment}`, `{/path}`, `{.label}`, `{?query,list}`,
// ! `{&continuation}`. Expansion and matching are independent passes over the
// ! same parsed token list, so a template is compiled once and reused for both.

use crate::core::error::{McpError, McpResult};
use serde_json::Value;
use std::collections::HashMap;

/// Hard numeric bounds from the spec: a template or variable value exceeding
/// these is a local programming error, not a protocol-level rejection.
const MAX_TEMPLATE_LEN: usize = 1_000_000;
const MAX_EXPRESSIONS: usize = 10_000;
const MAX_VALUE_LEN: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    PathSegment,
    Label,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: Option<char>) -> Self {
        match c {
            Some('+') => Operator::Reserved,
            Some('#') => Operator::Fragment,
            Some('/') => Operator::PathSegment,
            Some('.') => Operator::Label,
            Some('?') => Operator::Query,
            Some('&') => Operator::QueryContinuation,
            _ => Operator::Simple,
        }
    }

    fn first_separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::PathSegment => "/",
            Operator::Label => ".",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn joiner(self) -> &'static str {
        match self {
            Operator::PathSegment => "/",
            Operator::Label => ".",
            Operator::Query | Operator::QueryContinuation => "&",
            _ => ",",
        }
    }

    fn is_named(self) -> bool {
        matches!(self, Operator::Query | Operator::QueryContinuation)
    }

    fn is_reserved_encoding(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

#[derive(Debug, Clone)]
struct VarSpec {
    name: String,
    explode: bool,
}

#[derive(Debug, Clone)]
enum Token {
    Literal(String),
    Expression { operator: Operator, vars: Vec<VarSpec> },
}

/// A compiled RFC 6570 URI template, ready for repeated expansion or matching.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl PartialEq for UriTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl UriTemplate {
    /// Parse a template string. Rejects templates over the numeric bounds
    /// with a fatal error rather than a protocol error.
    pub fn new(template: impl Into<String>) -> McpResult<Self> {
        let source = template.into();
        if source.len() > MAX_TEMPLATE_LEN {
            return Err(McpError::InvalidUri(format!(
                "URI template exceeds {MAX_TEMPLATE_LEN} bytes"
            )));
        }

        let mut tokens = Vec::new();
        let mut expression_count = 0usize;
        let mut chars = source.char_indices().peekable();
        let mut literal = String::new();

        while let Some((_, c)) = chars.next() {
            if c == '{' {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let mut expr = String::new();
                let mut closed = false;
                for (_, c2) in chars.by_ref() {
                    if c2 == '}' {
                        closed = true;
                        break;
                    }
                    expr.push(c2);
                }
                if !closed {
                    return Err(McpError::InvalidUri(format!(
                        "Unterminated expression in URI template '{source}'"
                    )));
                }
                expression_count += 1;
                if expression_count > MAX_EXPRESSIONS {
                    return Err(McpError::InvalidUri(format!(
                        "URI template exceeds {MAX_EXPRESSIONS} expressions"
                    )));
                }
                tokens.push(parse_expression(&expr)?);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self { source, tokens })
    }

    /// The original template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of every variable referenced by the template, in appearance order.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for token in &self.tokens {
            if let Token::Expression { vars, .. } = token {
                for v in vars {
                    if !names.contains(&v.name) {
                        names.push(v.name.clone());
                    }
                }
            }
        }
        names
    }

    /// Expand the template against a variable map. Missing variables are
    /// omitted rather than treated as an error.
    pub fn expand(&self, variables: &HashMap<String, Value>) -> McpResult<String> {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(lit) => out.push_str(lit),
                Token::Expression { operator, vars } => {
                    out.push_str(&expand_expression(*operator, vars, variables)?);
                }
            }
        }
        Ok(out)
    }

    /// Attempt to match a concrete URI against this template, returning the
    /// captured variable values (as strings) if it matches.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        let mut captures = HashMap::new();
        let mut cursor = 0usize;
        let bytes_len = uri.len();

        for (idx, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(lit) => {
                    if uri[cursor..].starts_with(lit.as_str()) {
                        cursor += lit.len();
                    } else {
                        return None;
                    }
                }
                Token::Expression { operator, vars } => {
                    let is_last = idx == self.tokens.len() - 1;
                    let next_literal = self.tokens[idx + 1..].iter().find_map(|t| match t {
                        Token::Literal(l) => Some(l.as_str()),
                        _ => None,
                    });

                    if operator.is_named() {
                        // Query-style expressions only make sense as the final
                        // segment; parse the remainder as `name=value&...`.
                        let rest = &uri[cursor..];
                        let rest = rest.strip_prefix(operator.first_separator())?;
                        for pair in rest.split('&') {
                            if pair.is_empty() {
                                continue;
                            }
                            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                            let k = percent_decode(k);
                            let v = percent_decode(v);
                            if vars.iter().any(|vs| vs.name == k) {
                                captures.insert(k, v);
                            }
                        }
                        cursor = bytes_len;
                        continue;
                    }

                    if vars.len() != 1 {
                        // Multi-variable simple/reserved expressions have no
                        // unambiguous separator to split on; unsupported.
                        return None;
                    }
                    let var = &vars[0];

                    let sep = operator.first_separator();
                    let remaining = uri.get(cursor..)?;
                    let remaining = if sep.is_empty() {
                        remaining
                    } else {
                        remaining.strip_prefix(sep)?
                    };

                    let captured_end = if is_last {
                        remaining.len()
                    } else if let Some(lit) = next_literal {
                        remaining.find(lit)?
                    } else {
                        // Expression followed by another expression: greedily
                        // take one path/label segment.
                        let stop_char = match operator {
                            Operator::PathSegment => '/',
                            Operator::Label => '.',
                            _ => return None,
                        };
                        remaining.find(stop_char).unwrap_or(remaining.len())
                    };

                    let value = &remaining[..captured_end];
                    if value.is_empty() && !is_last && next_literal.is_none() {
                        return None;
                    }
                    captures.insert(var.name.clone(), percent_decode(value));
                    cursor += sep.len() + captured_end;
                }
            }
        }

        if cursor == bytes_len { Some(captures) } else { None }
    }
}

fn parse_expression(expr: &str) -> McpResult<Token> {
    let mut chars = expr.chars();
    let first = chars.clone().next();
    let operator = Operator::from_char(first);
    let body = if matches!(first, Some('+') | Some('#') | Some('/') | Some('.') | Some('?') | Some('&')) {
        chars.next();
        chars.as_str()
    } else {
        expr
    };

    let mut vars = Vec::new();
    for part in body.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, explode) = if let Some(stripped) = part.strip_suffix('*') {
            (stripped.to_string(), true)
        } else if let Some(colon_idx) = part.find(':') {
            (part[..colon_idx].to_string(), false)
        } else {
            (part.to_string(), false)
        };
        vars.push(VarSpec { name, explode });
    }

    if vars.is_empty() {
        return Err(McpError::InvalidUri(format!(
            "Empty variable list in URI template expression '{{{expr}}}'"
        )));
    }

    Ok(Token::Expression { operator, vars })
}

fn expand_expression(
    operator: Operator,
    vars: &[VarSpec],
    variables: &HashMap<String, Value>,
) -> McpResult<String> {
    let mut rendered = Vec::new();

    for var in vars {
        let Some(value) = variables.get(&var.name) else {
            continue;
        };
        match value {
            Value::Null => continue,
            Value::Array(items) => {
                let strs: Vec<String> = items
                    .iter()
                    .map(|v| value_to_string(v))
                    .collect::<McpResult<_>>()?;
                if strs.is_empty() {
                    continue;
                }
                if operator.is_named() {
                    if var.explode {
                        for s in &strs {
                            rendered.push(format!(
                                "{}={}",
                                var.name,
                                encode(s, operator.is_reserved_encoding())
                            ));
                        }
                    } else {
                        let joined = strs
                            .iter()
                            .map(|s| encode(s, operator.is_reserved_encoding()))
                            .collect::<Vec<_>>()
                            .join(",");
                        rendered.push(format!("{}={}", var.name, joined));
                    }
                } else if var.explode {
                    for s in &strs {
                        rendered.push(encode(s, operator.is_reserved_encoding()));
                    }
                } else {
                    let joined = strs
                        .iter()
                        .map(|s| encode(s, operator.is_reserved_encoding()))
                        .collect::<Vec<_>>()
                        .join(",");
                    rendered.push(joined);
                }
            }
            scalar => {
                let s = value_to_string(scalar)?;
                if s.len() > MAX_VALUE_LEN {
                    return Err(McpError::InvalidUri(format!(
                        "Variable '{}' exceeds {MAX_VALUE_LEN} bytes",
                        var.name
                    )));
                }
                let encoded = encode(&s, operator.is_reserved_encoding());
                if operator.is_named() {
                    rendered.push(format!("{}={}", var.name, encoded));
                } else {
                    rendered.push(encoded);
                }
            }
        }
    }

    if rendered.is_empty() {
        return Ok(String::new());
    }

    Ok(format!(
        "{}{}",
        operator.first_separator(),
        rendered.join(operator.joiner())
    ))
}

fn value_to_string(value: &Value) -> McpResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Ok(other.to_string()),
    }
}

fn encode(s: &str, reserved: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        let c = b as char;
        let is_unreserved = c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
        let is_reserved_char = matches!(
            c,
            ':' | '/' | '?' | '#' | '[' | ']' | '@' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
        );
        if is_unreserved || (reserved && is_reserved_char) {
            out.push(c);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(hex) = std::str::from_utf8(&bytes[i + 1..i + 3]) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
