//! Template front end: tokenizer, attribute binding classifier and a
//! recovering recursive-descent parser producing the template AST.

pub mod binding;
pub mod serialize;
pub mod template_ast;
pub mod template_parse;
pub mod tokenizer;

pub use binding::{BindingType, classify, classify_attribute, extract_name};
pub use serialize::serialize;
pub use template_ast::{
    AttributeNode, BindingKind, BindingNode, Comment, DirectiveNode, Document, Element, EventNode,
    Interpolation, Node, Text, TwoWayBindingNode, walk_elements,
};
pub use template_parse::{ParseError, ParseResult, Parser, is_void_element, parse_template};
pub use tokenizer::{Location, Token, TokenType, tokenize};
