use crate::binding::{self, BindingType};
use crate::template_ast::{
    AttributeNode, BindingKind, BindingNode, Comment, DirectiveNode, Document, Element, EventNode,
    Interpolation, Node, Text, TwoWayBindingNode,
};
use crate::tokenizer::{Location, Token, TokenType, tokenize};

pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Non-fatal syntax problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: Location,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.location.line, self.location.column, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub document: Document,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokenize and parse a template. Always yields a document; problems are
/// collected in `errors` instead of aborting.
pub fn parse_template(input: &str) -> ParseResult {
    Parser::new(tokenize(input)).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
    last_end: Location,
    // lower-cased names of the elements currently being parsed
    open: Vec<String>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenType::Eof) {
            let end = tokens.last().map(|t| t.location.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenType::Eof,
                value: String::new(),
                location: Location { line: 0, column: 0, start: end, end },
            });
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            last_end: Location::default(),
            open: Vec::new(),
        }
    }

    pub fn parse(mut self) -> ParseResult {
        let start = self.peek().location;
        let mut children = Vec::new();
        while !self.check(TokenType::Eof) {
            if let Some(node) = self.parse_node() {
                children.push(node);
            }
        }
        let location = if children.is_empty() { start } else { start.to(self.last_end) };
        ParseResult {
            document: Document { children, location },
            errors: self.errors,
        }
    }

    fn parse_node(&mut self) -> Option<Node> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenType::Text => {
                self.advance();
                Some(Node::Text(Text {
                    value: tok.value,
                    location: tok.location,
                }))
            }
            TokenType::Interpolation => {
                self.advance();
                Some(Node::Interpolation(Interpolation {
                    expression: tok.value.trim().to_string(),
                    location: tok.location,
                }))
            }
            TokenType::Comment => {
                self.advance();
                Some(Node::Comment(Comment {
                    value: tok.value,
                    location: tok.location,
                }))
            }
            TokenType::TagOpen => self.parse_element().map(Node::Element),
            TokenType::TagEndOpen => {
                // closer without a matching open element
                let name = self.peek_n(1).filter(|t| t.kind == TokenType::TagName).map(|t| t.value.clone());
                self.skip_end_tag();
                self.error(
                    format!("Unexpected closing tag </{}>", name.unwrap_or_default()),
                    tok.location,
                );
                None
            }
            _ => {
                self.advance();
                None
            }
        }
    }

    fn parse_element(&mut self) -> Option<Element> {
        let open = self.advance();
        let start = open.location;

        if !self.check(TokenType::TagName) {
            self.error("Expected tag name after '<'", start);
            self.skip_to_tag_end();
            return None;
        }
        let tag = self.advance().value;

        let mut el = Element {
            tag: tag.clone(),
            attributes: Vec::new(),
            directives: Vec::new(),
            bindings: Vec::new(),
            events: Vec::new(),
            two_way_bindings: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            location: start,
        };

        while self.check(TokenType::AttrName) {
            self.parse_attribute(&mut el);
        }

        if self.check(TokenType::TagSelfClose) {
            self.advance();
            el.self_closing = true;
            el.location = start.to(self.last_end);
            return Some(el);
        }
        if self.check(TokenType::TagClose) {
            self.advance();
        } else {
            // keep going as if the tag had been closed
            self.error(format!("Expected '>' to close <{tag}>"), self.last_end);
        }

        if is_void_element(&tag) {
            el.location = start.to(self.last_end);
            return Some(el);
        }

        self.open.push(tag.to_ascii_lowercase());
        self.parse_children(&mut el);
        self.open.pop();
        el.location = start.to(self.last_end);
        Some(el)
    }

    fn parse_children(&mut self, el: &mut Element) {
        loop {
            match self.peek().kind {
                TokenType::Eof => {
                    self.error(format!("Unclosed element <{}>", el.tag), el.location);
                    return;
                }
                TokenType::TagEndOpen => {
                    let closer = self.peek_n(1).filter(|t| t.kind == TokenType::TagName).map(|t| t.value.clone());
                    let loc = self.peek().location;
                    match closer {
                        Some(name) if name.eq_ignore_ascii_case(&el.tag) => {
                            self.skip_end_tag();
                            return;
                        }
                        Some(name) if self.closes_ancestor(&name) => {
                            // leave the closer for the ancestor it belongs to
                            self.error(
                                format!("Missing closing tag for <{}> before </{}>", el.tag, name),
                                loc,
                            );
                            return;
                        }
                        other => {
                            // implicit close; the document level drops the closer if nothing claims it
                            self.error(
                                format!("Unexpected closing tag </{}> inside <{}>", other.unwrap_or_default(), el.tag),
                                loc,
                            );
                            return;
                        }
                    }
                }
                _ => {
                    if let Some(child) = self.parse_node() {
                        el.children.push(child);
                    }
                }
            }
        }
    }

    fn parse_attribute(&mut self, el: &mut Element) {
        let name_tok = self.advance();
        let mut value: Option<String> = None;
        let mut end = name_tok.location;

        if self.check(TokenType::AttrEquals) {
            let eq = self.advance();
            end = eq.location;
            if self.check(TokenType::AttrValue) {
                let v = self.advance();
                end = v.location;
                value = Some(v.value);
            } else {
                self.error(format!("Missing value for attribute '{}'", name_tok.value), eq.location);
                value = Some(String::new());
            }
        }
        let location = name_tok.location.to(end);
        let raw = name_tok.value.as_str();
        let (kind, name) = binding::classify_attribute(raw);
        let name = name.to_string();
        let expression = value.clone().unwrap_or_default().trim().to_string();

        match kind {
            BindingType::Attribute => el.attributes.push(AttributeNode { name, value, location }),
            BindingType::Structural => el.directives.push(DirectiveNode {
                is_built_in: binding::is_built_in_directive(&name),
                name,
                expression,
                location,
            }),
            BindingType::Event => el.events.push(EventNode {
                name,
                handler: expression,
                location,
            }),
            BindingType::TwoWay => el.two_way_bindings.push(TwoWayBindingNode { name, expression, location }),
            BindingType::Property => el.bindings.push(binding_node(BindingKind::Property, name, expression, location)),
            BindingType::Class => el.bindings.push(binding_node(BindingKind::Class, name, expression, location)),
            BindingType::Style => el.bindings.push(binding_node(BindingKind::Style, name, expression, location)),
            BindingType::Attr => el.bindings.push(binding_node(BindingKind::Attribute, name, expression, location)),
        }
    }

    fn closes_ancestor(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        // the innermost entry is the element asking
        self.open.iter().rev().skip(1).any(|t| *t == lower)
    }

    // Consumes `</`, an optional name and an optional `>`.
    fn skip_end_tag(&mut self) {
        self.advance();
        if self.check(TokenType::TagName) {
            self.advance();
        }
        if self.check(TokenType::TagClose) {
            self.advance();
        }
    }

    fn skip_to_tag_end(&mut self) {
        while !self.check(TokenType::Eof) {
            let kind = self.advance().kind;
            if matches!(kind, TokenType::TagClose | TokenType::TagSelfClose) {
                return;
            }
        }
    }

    fn error(&mut self, message: impl Into<String>, location: Location) {
        let message = message.into();
        tracing::debug!(line = location.line, column = location.column, "{message}");
        self.errors.push(ParseError { message, location });
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_n(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn check(&self, kind: TokenType) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenType::Eof {
            self.pos += 1;
            self.last_end = tok.location;
        }
        tok
    }
}

fn binding_node(kind: BindingKind, name: String, expression: String, location: Location) -> BindingNode {
    BindingNode {
        kind,
        name,
        expression,
        location,
    }
}
