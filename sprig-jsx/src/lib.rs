//! A small ordered JSX tree and its source printer.

pub mod printer;

pub use printer::{render, render_at};

#[derive(Debug, Clone, PartialEq)]
pub enum JsxNode {
    Element {
        tag: String,
        props: Props,
        children: Vec<JsxNode>,
    },
    Fragment(Vec<JsxNode>),
    Text(String),
    Expr(String),    // {expr}
    Comment(String), // {/* ... */}
    Conditional {
        test: String,
        node: Box<JsxNode>,
    },
    Loop {
        items: String,
        params: Vec<String>,
        node: Box<JsxNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Str { name: String, value: String },  // name="value"
    Expr { name: String, expr: String },  // name={expr}
    Flag(String),                         // disabled
    Spread(String),                       // {...expr}
}

impl Prop {
    pub fn name(&self) -> Option<&str> {
        match self {
            Prop::Str { name, .. } | Prop::Expr { name, .. } => Some(name),
            Prop::Flag(name) => Some(name),
            Prop::Spread(_) => None,
        }
    }
}

/// Props keep insertion order so printed output is stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    pub entries: Vec<Prop>,
}

impl Props {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.entries.push(Prop::Str { name: k.into(), value: v.into() });
        self
    }
    pub fn bind(mut self, k: impl Into<String>, expr: impl Into<String>) -> Self {
        self.entries.push(Prop::Expr { name: k.into(), expr: expr.into() });
        self
    }
    pub fn flag(mut self, k: impl Into<String>) -> Self {
        self.entries.push(Prop::Flag(k.into()));
        self
    }
    pub fn spread(mut self, expr: impl Into<String>) -> Self {
        self.entries.push(Prop::Spread(expr.into()));
        self
    }
    pub fn push(&mut self, prop: Prop) {
        self.entries.push(prop);
    }
    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.entries.iter().find(|p| p.name() == Some(name))
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Allow concise props creation
impl From<()> for Props {
    fn from(_: ()) -> Self {
        Props::default()
    }
}
impl From<Vec<(&str, &str)>> for Props {
    fn from(v: Vec<(&str, &str)>) -> Self {
        let mut p = Props::new();
        for (k, v) in v {
            p = p.set(k, v);
        }
        p
    }
}

pub fn h(tag: impl Into<String>, props: impl Into<Props>, children: Vec<JsxNode>) -> JsxNode {
    JsxNode::Element {
        tag: tag.into(),
        props: props.into(),
        children,
    }
}
pub fn text(t: impl Into<String>) -> JsxNode {
    JsxNode::Text(t.into())
}
pub fn expr(e: impl Into<String>) -> JsxNode {
    JsxNode::Expr(e.into())
}
pub fn fragment(children: Vec<JsxNode>) -> JsxNode {
    JsxNode::Fragment(children)
}
