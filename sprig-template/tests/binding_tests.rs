use sprig_template::{BindingType, classify, extract_name};

#[test]
fn classify_and_extract_every_syntax() {
    let cases = [
        ("*if", BindingType::Structural, "if"),
        ("*highlight", BindingType::Structural, "highlight"),
        ("(click)", BindingType::Event, "click"),
        ("(keyup.enter)", BindingType::Event, "keyup.enter"),
        ("[(value)]", BindingType::TwoWay, "value"),
        ("[class.active]", BindingType::Class, "active"),
        ("[style.background-color]", BindingType::Style, "background-color"),
        ("[attr.data-id]", BindingType::Attr, "data-id"),
        ("[disabled]", BindingType::Property, "disabled"),
        ("id", BindingType::Attribute, "id"),
        ("data-x", BindingType::Attribute, "data-x"),
    ];
    for (raw, kind, name) in cases {
        assert_eq!(classify(raw), kind, "classify({raw})");
        assert_eq!(extract_name(raw, kind), name, "extract_name({raw})");
    }
}

#[test]
fn extract_name_is_total() {
    // asking for the wrong kind hands back the raw name
    assert_eq!(extract_name("plain", BindingType::Event), "plain");
    assert_eq!(extract_name("[x]", BindingType::Class), "[x]");
}
