use sprig_template::{Node, parse_template};

#[test]
fn missing_close_is_recorded_and_parsing_continues() {
    let res = parse_template("<div><span>text</div><p>after</p>");
    assert!(res.has_errors());
    assert!(res.errors[0].message.contains("<span>"));
    let doc = res.document;
    assert_eq!(doc.children.len(), 2);
    let Node::Element(div) = &doc.children[0] else { panic!() };
    let Node::Element(span) = &div.children[0] else { panic!() };
    assert_eq!(span.tag, "span");
    assert!(matches!(&doc.children[1], Node::Element(p) if p.tag == "p"));
}

#[test]
fn mismatched_closer_closes_the_current_element() {
    let res = parse_template("<div><span>a</p>b</span></div>");
    assert!(res.has_errors());
    assert!(res.errors[0].message.contains("</p> inside <span>"));
    let doc = res.document;
    let Node::Element(div) = &doc.children[0] else { panic!() };
    assert_eq!(div.children.len(), 1);
    let Node::Element(span) = &div.children[0] else { panic!() };
    assert_eq!(span.children.len(), 1);
    assert!(matches!(&doc.children[1], Node::Text(t) if t.value == "b"));
}

#[test]
fn mismatched_closer_inside_a_matching_parent() {
    let res = parse_template("<ul><li>a</ul><p>b</p>");
    assert_eq!(res.errors.len(), 1);
    let Node::Element(ul) = &res.document.children[0] else { panic!() };
    assert_eq!(ul.children.len(), 1);
    assert!(matches!(&res.document.children[1], Node::Element(p) if p.tag == "p"));
}

#[test]
fn top_level_stray_closer() {
    let res = parse_template("</p>hello");
    assert_eq!(res.errors.len(), 1);
    assert_eq!(res.document.children.len(), 1);
}

#[test]
fn unclosed_element_at_eof() {
    let res = parse_template("<section><h1>Title</h1>");
    assert!(res.errors.iter().any(|e| e.message.contains("Unclosed element <section>")));
    let Node::Element(section) = &res.document.children[0] else { panic!() };
    assert_eq!(section.children.len(), 1);
}

#[test]
fn unterminated_open_tag() {
    let res = parse_template("<div class=\"a\"");
    assert!(res.has_errors());
    assert!(matches!(&res.document.children[0], Node::Element(d) if d.tag == "div"));
}

#[test]
fn missing_attribute_value() {
    let res = parse_template("<a href=>x</a>");
    assert!(res.errors.iter().any(|e| e.message.contains("href")));
    let Node::Element(a) = &res.document.children[0] else { panic!() };
    assert_eq!(a.attributes[0].value.as_deref(), Some(""));
}

#[test]
fn garbage_never_panics() {
    for src in ["<", "<<>>", "{{", "}}", "<!--", "<a =\"x\">", "</>", "<div/ >", "<p \"q\">"] {
        let _ = parse_template(src);
    }
}
