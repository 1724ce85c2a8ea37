use pest::Parser;
use pest::iterators::Pair;

use crate::class_parse::{ModuleParser, Rule};

/// A decorator argument read as a literal. Anything that is not a literal
/// (identifiers, calls, arrow functions) is kept as raw source text.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
    Number(String),
    Null,
    Array(Vec<OptionValue>),
    Object(Vec<(String, OptionValue)>),
    Raw(String),
}

impl OptionValue {
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        match self {
            OptionValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }
}

/// Parse the text between a decorator's parentheses into its arguments.
pub fn parse_options(text: &str) -> Result<Vec<OptionValue>, String> {
    let mut pairs = ModuleParser::parse(Rule::options, text).map_err(|e| e.to_string())?;
    let root = pairs.next().ok_or_else(|| "empty options".to_string())?;
    Ok(root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::opt_value)
        .map(value)
        .collect())
}

fn value(node: Pair<Rule>) -> OptionValue {
    let Some(inner) = node.into_inner().next() else {
        return OptionValue::Null;
    };
    match inner.as_rule() {
        Rule::opt_object => OptionValue::Object(inner.into_inner().filter_map(pair).collect()),
        Rule::opt_array => OptionValue::Array(inner.into_inner().map(value).collect()),
        Rule::string_lit => OptionValue::Str(unquote(inner.as_str())),
        Rule::template_lit => {
            let raw = inner.as_str();
            // only substitution-free templates are literals
            if raw.contains("${") {
                OptionValue::Raw(raw.to_string())
            } else {
                OptionValue::Str(raw[1..raw.len() - 1].to_string())
            }
        }
        Rule::opt_bool => OptionValue::Bool(inner.as_str() == "true"),
        Rule::opt_null => OptionValue::Null,
        Rule::opt_number => OptionValue::Number(inner.as_str().to_string()),
        _ => OptionValue::Raw(inner.as_str().trim().to_string()),
    }
}

fn pair(node: Pair<Rule>) -> Option<(String, OptionValue)> {
    let mut parts = node.into_inner();
    let key_node = parts.next()?;
    let key = match key_node.into_inner().next() {
        Some(k) if k.as_rule() == Rule::string_lit => unquote(k.as_str()),
        Some(k) => k.as_str().to_string(),
        None => return None,
    };
    // `{ island }` shorthand refers to a variable of the same name
    let val = parts.next().map(value).unwrap_or_else(|| OptionValue::Raw(key.clone()));
    Some((key, val))
}

/// Strip the quotes from a string literal and resolve simple escapes.
pub fn unquote(lit: &str) -> String {
    let b = lit.as_bytes();
    if b.len() < 2 || !((b[0] == b'"' || b[0] == b'\'') && b[b.len() - 1] == b[0]) {
        return lit.to_string();
    }
    let mut out = String::with_capacity(lit.len());
    let mut chars = lit[1..lit.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}
