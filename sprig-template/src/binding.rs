/// What a raw attribute name means once its sigils are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    Attribute,  // class="app"
    Structural, // *if="show"
    Event,      // (click)="save()"
    TwoWay,     // [(value)]="name"
    Property,   // [disabled]="busy"
    Class,      // [class.active]="on"
    Style,      // [style.color]="c"
    Attr,       // [attr.aria-label]="label"
}

/// Structural directives handled by the transformer itself.
pub const BUILT_IN_DIRECTIVES: &[&str] = &["if", "for"];

pub fn is_built_in_directive(name: &str) -> bool {
    BUILT_IN_DIRECTIVES.contains(&name)
}

/// Classify an attribute name. Total: every string maps to exactly one type.
///
/// Order matters: `[(x)]` is checked before `[x]`, and the dotted
/// `[class.x]`/`[style.x]`/`[attr.x]` forms before plain property bindings.
pub fn classify(name: &str) -> BindingType {
    if let Some(rest) = name.strip_prefix('*') {
        if !rest.is_empty() {
            return BindingType::Structural;
        }
        return BindingType::Attribute;
    }
    if let Some(inner) = wrapped(name, "(", ")") {
        if !inner.is_empty() && !inner.starts_with('[') {
            return BindingType::Event;
        }
    }
    if let Some(inner) = wrapped(name, "[(", ")]") {
        if !inner.is_empty() {
            return BindingType::TwoWay;
        }
    }
    if let Some(inner) = wrapped(name, "[", "]") {
        if let Some(n) = inner.strip_prefix("class.") {
            return if n.is_empty() { BindingType::Attribute } else { BindingType::Class };
        }
        if let Some(n) = inner.strip_prefix("style.") {
            return if n.is_empty() { BindingType::Attribute } else { BindingType::Style };
        }
        if let Some(n) = inner.strip_prefix("attr.") {
            return if n.is_empty() { BindingType::Attribute } else { BindingType::Attr };
        }
        if !inner.is_empty() && !inner.starts_with('(') {
            return BindingType::Property;
        }
    }
    BindingType::Attribute
}

/// Semantic name carried by `name` when read as `kind`.
///
/// For a name that does not actually have the given syntax the raw name is
/// returned unchanged, so the function is total as well.
pub fn extract_name(name: &str, kind: BindingType) -> &str {
    let inner = match kind {
        BindingType::Attribute => Some(name),
        BindingType::Structural => name.strip_prefix('*'),
        BindingType::Event => wrapped(name, "(", ")"),
        BindingType::TwoWay => wrapped(name, "[(", ")]"),
        BindingType::Property => wrapped(name, "[", "]"),
        BindingType::Class => wrapped(name, "[", "]").and_then(|n| n.strip_prefix("class.")),
        BindingType::Style => wrapped(name, "[", "]").and_then(|n| n.strip_prefix("style.")),
        BindingType::Attr => wrapped(name, "[", "]").and_then(|n| n.strip_prefix("attr.")),
    };
    inner.unwrap_or(name)
}

/// Classify and extract in one step.
pub fn classify_attribute(name: &str) -> (BindingType, &str) {
    let kind = classify(name);
    (kind, extract_name(name, kind))
}

fn wrapped<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    if s.len() < open.len() + close.len() {
        return None;
    }
    s.strip_prefix(open)?.strip_suffix(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        assert_eq!(classify("*if"), BindingType::Structural);
        assert_eq!(classify("(click)"), BindingType::Event);
        assert_eq!(classify("[(value)]"), BindingType::TwoWay);
        assert_eq!(classify("[class.active]"), BindingType::Class);
        assert_eq!(classify("[style.font-size]"), BindingType::Style);
        assert_eq!(classify("[attr.aria-label]"), BindingType::Attr);
        assert_eq!(classify("[disabled]"), BindingType::Property);
        assert_eq!(classify("class"), BindingType::Attribute);
    }

    #[test]
    fn degenerate_syntaxes_are_plain_attributes() {
        for raw in ["*", "()", "[]", "[()]", "[class.]", "[", "(", "]"] {
            assert_eq!(classify(raw), BindingType::Attribute, "{raw}");
        }
    }
}
