use pretty_assertions::assert_eq;
use sprig_jsx::{JsxNode, Props, expr, fragment, h, render, render_at, text};

#[test]
fn self_closing_and_inline() {
    assert_eq!(render(&h("br", (), vec![])), "<br />");
    let p = h("p", vec![("class", "lead")], vec![text("Hello "), expr("name")]);
    assert_eq!(render(&p), r#"<p class="lead">Hello {name}</p>"#);
}

#[test]
fn props_in_order() {
    let props = Props::new()
        .set("class", "btn")
        .bind("disabled", "busy")
        .flag("hidden")
        .spread("applyHighlightDirective({}, 'yellow')");
    assert_eq!(
        render(&h("button", props, vec![])),
        r#"<button class="btn" disabled={busy} hidden {...applyHighlightDirective({}, 'yellow')} />"#
    );
}

#[test]
fn quotes_in_static_values_become_js_strings() {
    let node = h("div", vec![("title", "say \"hi\"")], vec![]);
    assert_eq!(render(&node), r#"<div title={"say \"hi\""} />"#);
}

#[test]
fn block_layout_with_conditional_and_loop() {
    let li = h("li", Props::new().bind("key", "item.id"), vec![expr("item.name")]);
    let list = JsxNode::Loop {
        items: "items".into(),
        params: vec!["item".into(), "i".into()],
        node: Box::new(li),
    };
    let warn = JsxNode::Conditional {
        test: "items.length === 0".into(),
        node: Box::new(h("p", (), vec![text("Empty")])),
    };
    let root = h("div", (), vec![h("ul", (), vec![list]), warn]);
    let expected = r#"<div>
  <ul>
    {items.map((item, i) => (
      <li key={item.id}>{item.name}</li>
    ))}
  </ul>
  {(items.length === 0) ? (
    <p>Empty</p>
  ) : null}
</div>"#;
    assert_eq!(render(&root), expected);
}

#[test]
fn root_conditional_has_no_braces() {
    let node = JsxNode::Conditional {
        test: "ok".into(),
        node: Box::new(h("span", (), vec![])),
    };
    assert_eq!(render(&node), "ok ? (\n  <span />\n) : null");
}

#[test]
fn text_escapes_and_edge_spaces() {
    let node = h("p", (), vec![text("a { b } "), h("b", (), vec![text("x")])]);
    assert_eq!(
        render(&node),
        "<p>\n  a {\"{\"} b {\"}\"}{\" \"}\n  <b>x</b>\n</p>"
    );
}

#[test]
fn bare_text_root_is_wrapped_in_fragment() {
    assert_eq!(render(&expr("count")), "<>{count}</>");
    assert_eq!(render(&fragment(vec![])), "<></>");
}

#[test]
fn continuation_lines_follow_level() {
    let node = h("div", (), vec![h("span", (), vec![]), h("span", (), vec![])]);
    assert_eq!(render_at(&node, 2), "<div>\n      <span />\n      <span />\n    </div>");
}
