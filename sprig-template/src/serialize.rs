use crate::template_ast::{BindingKind, Document, Element, Node};
use crate::template_parse::is_void_element;

/// Re-serialize a parsed document back to template markup.
///
/// Attributes are written bucket by bucket (plain, structural, bindings,
/// events, two-way), so the output shows how the parser partitioned them
/// rather than their original order.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for node in &doc.children {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&t.value),
        Node::Interpolation(i) => {
            out.push_str("{{ ");
            out.push_str(&i.expression);
            out.push_str(" }}");
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(&c.value);
            out.push_str("-->");
        }
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for a in &el.attributes {
        match &a.value {
            Some(v) => out.push_str(&format!(" {}=\"{}\"", a.name, v)),
            None => out.push_str(&format!(" {}", a.name)),
        }
    }
    for d in &el.directives {
        out.push_str(&format!(" *{}=\"{}\"", d.name, d.expression));
    }
    for b in &el.bindings {
        let name = match b.kind {
            BindingKind::Property => b.name.clone(),
            BindingKind::Class => format!("class.{}", b.name),
            BindingKind::Style => format!("style.{}", b.name),
            BindingKind::Attribute => format!("attr.{}", b.name),
        };
        out.push_str(&format!(" [{}]=\"{}\"", name, b.expression));
    }
    for e in &el.events {
        out.push_str(&format!(" ({})=\"{}\"", e.name, e.handler));
    }
    for t in &el.two_way_bindings {
        out.push_str(&format!(" [({})]=\"{}\"", t.name, t.expression));
    }
    if el.self_closing {
        out.push_str(" />");
        return;
    }
    out.push('>');
    if is_void_element(&el.tag) {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}
