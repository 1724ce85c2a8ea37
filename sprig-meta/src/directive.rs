use crate::class_parse::ClassDecl;

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveMetadata {
    /// Selector as written, sigil included (`*highlight`).
    pub selector: String,
    pub class_name: String,
}

impl DirectiveMetadata {
    /// The selector without its `*` or `[...]` sigil.
    pub fn bare_selector(&self) -> &str {
        bare_selector(&self.selector)
    }
}

pub fn bare_selector(selector: &str) -> &str {
    let s = selector.trim();
    let s = s.strip_prefix('*').unwrap_or(s);
    match s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) => inner.trim(),
        None => s,
    }
}

pub fn parse_directive(class: &ClassDecl) -> Option<DirectiveMetadata> {
    let deco = class.decorator("Directive")?;
    let Some(selector) = deco
        .options()
        .and_then(|o| o.get_str("selector").map(str::to_string))
        .filter(|s| !bare_selector(s).is_empty())
    else {
        tracing::warn!(class = %class.name, "@Directive without a selector");
        return None;
    };
    Some(DirectiveMetadata {
        selector,
        class_name: class.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sigils() {
        assert_eq!(bare_selector("*highlight"), "highlight");
        assert_eq!(bare_selector("[tooltip]"), "tooltip");
        assert_eq!(bare_selector("focus"), "focus");
    }
}
