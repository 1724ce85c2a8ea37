use pest::Parser;
use pest::iterators::Pair;

use crate::options::{self, OptionValue};

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
pub(crate) struct ModuleParser;

#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub name: String,
    /// Raw text between the parentheses; `None` for a bare `@Name`.
    pub args: Option<String>,
}

impl Decorator {
    /// Parsed arguments. Unparseable options yield an empty list.
    pub fn arguments(&self) -> Vec<OptionValue> {
        match &self.args {
            Some(text) => options::parse_options(text).unwrap_or_else(|e| {
                tracing::warn!(decorator = %self.name, "ignoring malformed decorator options: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// The first argument when it is an object literal.
    pub fn options(&self) -> Option<OptionValue> {
        self.arguments()
            .into_iter()
            .next()
            .filter(|v| matches!(v, OptionValue::Object(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Property {
        optional: bool,
        type_text: Option<String>,
        initializer: Option<String>,
    },
    Getter {
        return_type: Option<String>,
        body: String,
    },
    Setter {
        params: String,
        body: String,
    },
    Method {
        params: String,
        return_type: Option<String>,
        body: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub decorators: Vec<Decorator>,
    pub modifiers: Vec<String>,
    pub kind: MemberKind,
}

impl Member {
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }

    pub fn has_modifier(&self, m: &str) -> bool {
        self.modifiers.iter().any(|x| x == m)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub exported: bool,
    pub decorators: Vec<Decorator>,
    pub heritage: Option<String>,
    pub members: Vec<Member>,
}

impl ClassDecl {
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }
}

/// Read every class declaration out of a module's source text.
///
/// Nothing is executed; text that is not a class declaration is skipped.
/// A module the grammar cannot read at all yields no classes.
pub fn parse_module(source: &str) -> Vec<ClassDecl> {
    let mut pairs = match ModuleParser::parse(Rule::file, source) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("could not read module source: {e}");
            return Vec::new();
        }
    };
    let Some(file) = pairs.next() else {
        return Vec::new();
    };

    file.into_inner()
        .filter(|p| p.as_rule() == Rule::class_decl)
        .map(parse_class)
        .collect()
}

/// The first class carrying the given decorator.
pub fn find_decorated<'a>(classes: &'a [ClassDecl], decorator: &str) -> Option<&'a ClassDecl> {
    classes.iter().find(|c| c.decorator(decorator).is_some())
}

fn parse_class(node: Pair<Rule>) -> ClassDecl {
    let mut class = ClassDecl {
        name: String::new(),
        exported: false,
        decorators: Vec::new(),
        heritage: None,
        members: Vec::new(),
    };
    for p in node.into_inner() {
        match p.as_rule() {
            Rule::decorator => class.decorators.push(parse_decorator(p)),
            Rule::kw_export => class.exported = true,
            Rule::ident => class.name = p.as_str().to_string(),
            Rule::heritage => class.heritage = Some(p.as_str().trim().to_string()),
            Rule::class_body => {
                class.members = p
                    .into_inner()
                    .filter_map(parse_member)
                    .collect();
            }
            _ => {}
        }
    }
    class
}

fn parse_decorator(node: Pair<Rule>) -> Decorator {
    let mut name = String::new();
    let mut args = None;
    for p in node.into_inner() {
        match p.as_rule() {
            Rule::ident => name = p.as_str().to_string(),
            Rule::decorator_args => {
                let raw = p.as_str();
                args = Some(raw[1..raw.len() - 1].to_string());
            }
            _ => {}
        }
    }
    Decorator { name, args }
}

fn parse_member(node: Pair<Rule>) -> Option<Member> {
    let mut decorators = Vec::new();
    let mut modifiers = Vec::new();
    for p in node.into_inner() {
        match p.as_rule() {
            Rule::decorator => decorators.push(parse_decorator(p)),
            Rule::modifier => modifiers.push(p.as_str().to_string()),
            Rule::getter | Rule::setter | Rule::method | Rule::property => {
                let (name, kind) = parse_member_kind(p);
                return Some(Member {
                    name,
                    decorators,
                    modifiers,
                    kind,
                });
            }
            // skip_member
            _ => return None,
        }
    }
    None
}

fn parse_member_kind(node: Pair<Rule>) -> (String, MemberKind) {
    let rule = node.as_rule();
    let mut name = String::new();
    let mut optional = false;
    let mut type_text = None;
    let mut initializer = None;
    let mut params = String::new();
    let mut body = None;

    for p in node.into_inner() {
        match p.as_rule() {
            Rule::ident => name = p.as_str().to_string(),
            Rule::optional_mark => optional = true,
            Rule::type_ann => {
                type_text = p
                    .into_inner()
                    .find(|t| t.as_rule() == Rule::type_text)
                    .map(|t| t.as_str().trim().to_string());
            }
            Rule::initializer => {
                initializer = p
                    .into_inner()
                    .find(|t| t.as_rule() == Rule::init_text)
                    .map(|t| t.as_str().trim().to_string());
            }
            Rule::params => {
                let raw = p.as_str();
                params = raw[1..raw.len() - 1].trim().to_string();
            }
            Rule::block => {
                let raw = p.as_str();
                body = Some(raw[1..raw.len() - 1].to_string());
            }
            _ => {}
        }
    }

    let kind = match rule {
        Rule::getter => MemberKind::Getter {
            return_type: type_text,
            body: body.unwrap_or_default(),
        },
        Rule::setter => MemberKind::Setter {
            params,
            body: body.unwrap_or_default(),
        },
        Rule::method => MemberKind::Method {
            params,
            return_type: type_text,
            body,
        },
        _ => MemberKind::Property {
            optional,
            type_text,
            initializer,
        },
    };
    (name, kind)
}
