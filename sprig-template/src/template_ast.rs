use crate::tokenizer::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Interpolation(Interpolation), // {{ expr }}
    Comment(Comment),
}

impl Node {
    pub fn location(&self) -> Location {
        match self {
            Node::Element(e) => e.location,
            Node::Text(t) => t.location,
            Node::Interpolation(i) => i.location,
            Node::Comment(c) => c.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<AttributeNode>,
    pub directives: Vec<DirectiveNode>,
    pub bindings: Vec<BindingNode>,
    pub events: Vec<EventNode>,
    pub two_way_bindings: Vec<TwoWayBindingNode>,
    pub children: Vec<Node>,
    pub self_closing: bool,
    pub location: Location,
}

impl Element {
    pub fn directive(&self, name: &str) -> Option<&DirectiveNode> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeNode> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn is_interactive(&self) -> bool {
        !self.events.is_empty() || !self.two_way_bindings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub expression: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub location: Location,
}

/// Plain HTML attribute; `value` is `None` for boolean attributes like `disabled`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    pub name: String,
    pub value: Option<String>,
    pub location: Location,
}

/// `*name="expression"`
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    pub name: String,
    pub expression: String,
    pub is_built_in: bool,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Property,
    Class,
    Style,
    Attribute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingNode {
    pub kind: BindingKind,
    pub name: String,
    pub expression: String,
    pub location: Location,
}

/// `(name)="handler"`
#[derive(Debug, Clone, PartialEq)]
pub struct EventNode {
    pub name: String,
    pub handler: String,
    pub location: Location,
}

/// `[(name)]="expression"`
#[derive(Debug, Clone, PartialEq)]
pub struct TwoWayBindingNode {
    pub name: String,
    pub expression: String,
    pub location: Location,
}

/// Depth-first walk over every element in the document.
pub fn walk_elements<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            f(el);
            walk_elements(&el.children, f);
        }
    }
}
