use crate::{JsxNode, Prop, Props};

const INDENT: &str = "  ";
const INLINE_WIDTH: usize = 80;

/// Render `node` as a JSX expression starting at indentation level 0.
pub fn render(node: &JsxNode) -> String {
    render_at(node, 0)
}

/// Render `node` as a JSX expression. The first line is not indented (the
/// caller places it); continuation lines are indented `level` steps.
pub fn render_at(node: &JsxNode, level: usize) -> String {
    match node {
        JsxNode::Text(_) | JsxNode::Expr(_) | JsxNode::Comment(_) => {
            render_node(&JsxNode::Fragment(vec![node.clone()]), level, false)
        }
        _ => render_node(node, level, false),
    }
}

fn render_node(node: &JsxNode, level: usize, as_child: bool) -> String {
    match node {
        JsxNode::Element { tag, props, children } => render_element(tag, props, children, level),
        JsxNode::Fragment(children) => render_element("", &Props::new(), children, level),
        JsxNode::Text(t) => escape_text(&collapse_ws(t)),
        JsxNode::Expr(e) => format!("{{{}}}", e.trim()),
        JsxNode::Comment(c) => format!("{{/* {} */}}", c.trim().replace("*/", "* /")),
        JsxNode::Conditional { test, node } => {
            let body = format!(
                "{} ? (\n{}{}\n{}) : null",
                paren(test),
                pad(level + 1),
                render_node(node, level + 1, false),
                pad(level)
            );
            wrap_child(body, as_child)
        }
        JsxNode::Loop { items, params, node } => {
            let body = format!(
                "{}.map(({}) => (\n{}{}\n{}))",
                paren(items),
                params.join(", "),
                pad(level + 1),
                render_node(node, level + 1, false),
                pad(level)
            );
            wrap_child(body, as_child)
        }
    }
}

fn render_element(tag: &str, props: &Props, children: &[JsxNode], level: usize) -> String {
    let open = format!("<{}{}", tag, render_props(props));
    if children.is_empty() {
        if tag.is_empty() {
            return "<></>".to_string();
        }
        return format!("{open} />");
    }
    if let Some(inline) = inline_children(children) {
        if open.len() + inline.len() + tag.len() + 3 <= INLINE_WIDTH {
            return format!("{open}>{inline}</{tag}>");
        }
    }

    let mut out = format!("{open}>\n");
    for child in children {
        for line in child_lines(child, level + 1) {
            out.push_str(&pad(level + 1));
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push_str(&pad(level));
    out.push_str(&format!("</{tag}>"));
    out
}

// Children that are only text and expressions print on the opening line.
fn inline_children(children: &[JsxNode]) -> Option<String> {
    let mut out = String::new();
    for child in children {
        match child {
            JsxNode::Text(t) if !t.contains('\n') => out.push_str(&escape_text(&collapse_ws(t))),
            JsxNode::Expr(e) if !e.contains('\n') => out.push_str(&format!("{{{}}}", e.trim())),
            _ => return None,
        }
    }
    if out.len() > INLINE_WIDTH {
        return None;
    }
    Some(out)
}

// One child in block layout. Text loses its outer whitespace when it sits on
// its own line, so significant edge spaces are written out explicitly.
fn child_lines(child: &JsxNode, level: usize) -> Vec<String> {
    match child {
        JsxNode::Text(t) => {
            let collapsed = collapse_ws(t);
            let trimmed = collapsed.trim();
            if trimmed.is_empty() {
                return vec!["{\" \"}".to_string()];
            }
            let mut line = String::new();
            if collapsed.starts_with(' ') {
                line.push_str("{\" \"}");
            }
            line.push_str(&escape_text(trimmed));
            if collapsed.ends_with(' ') {
                line.push_str("{\" \"}");
            }
            vec![line]
        }
        other => vec![render_node(other, level, true)],
    }
}

fn render_props(props: &Props) -> String {
    let mut out = String::new();
    for p in &props.entries {
        out.push(' ');
        match p {
            Prop::Str { name, value } => {
                if value.contains('"') || value.contains('\\') || value.contains('\n') {
                    out.push_str(&format!("{}={{{}}}", name, js_string(value)));
                } else {
                    out.push_str(&format!("{name}=\"{value}\""));
                }
            }
            Prop::Expr { name, expr } => out.push_str(&format!("{}={{{}}}", name, expr.trim())),
            Prop::Flag(name) => out.push_str(name),
            Prop::Spread(expr) => out.push_str(&format!("{{...{}}}", expr.trim())),
        }
    }
    out
}

fn wrap_child(body: String, as_child: bool) -> String {
    if as_child { format!("{{{body}}}") } else { body }
}

fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

/// Parenthesize anything more complex than an identifier or member chain.
pub fn paren(expr: &str) -> String {
    let e = expr.trim();
    let simple = !e.is_empty()
        && e.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && e.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
    if simple { e.to_string() } else { format!("({e})") }
}

/// Quote `s` as a double-quoted JavaScript string literal.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

// `{`, `}`, `<` and `>` cannot appear raw in JSX text.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '{' => out.push_str("{\"{\"}"),
            '}' => out.push_str("{\"}\"}"),
            '<' => out.push_str("{\"<\"}"),
            '>' => out.push_str("{\">\"}"),
            _ => out.push(ch),
        }
    }
    out
}
