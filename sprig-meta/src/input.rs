use crate::class_parse::{ClassDecl, MemberKind};
use crate::options::OptionValue;

/// One `@Input` property of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMetadata {
    /// Template-facing name (the alias when one is given).
    pub name: String,
    /// Identifier of the property in the class source.
    pub property_name: String,
    pub type_text: String,
    /// Default value as raw source text.
    pub default_value: Option<String>,
    pub required: bool,
}

/// Collect the `@Input` properties of `class` in declaration order.
pub fn parse_inputs(class: &ClassDecl) -> Vec<InputMetadata> {
    class
        .members
        .iter()
        .filter_map(|m| {
            let deco = m.decorator("Input")?;
            let MemberKind::Property { optional, type_text, initializer } = &m.kind else {
                tracing::warn!(class = %class.name, member = %m.name, "@Input on a non-property member ignored");
                return None;
            };

            let mut alias = None;
            let mut explicit_required = None;
            match deco.arguments().first() {
                Some(OptionValue::Str(s)) => alias = Some(s.clone()),
                Some(opts @ OptionValue::Object(_)) => {
                    alias = opts.get_str("alias").map(str::to_string);
                    explicit_required = opts.get_bool("required");
                }
                _ => {}
            }

            let (type_text, optional_type) = match type_text {
                Some(t) => match t.strip_suffix('?') {
                    Some(stripped) => (stripped.trim().to_string(), true),
                    None => (t.clone(), false),
                },
                None => (infer_type(initializer.as_deref()).to_string(), false),
            };
            let optional = *optional || optional_type;
            let required =
                explicit_required.unwrap_or(initializer.is_none() && !optional);

            Some(InputMetadata {
                name: alias.unwrap_or_else(|| m.name.clone()),
                property_name: m.name.clone(),
                type_text,
                default_value: initializer.clone(),
                required,
            })
        })
        .collect()
}

fn infer_type(init: Option<&str>) -> &'static str {
    let Some(v) = init.map(str::trim) else {
        return "unknown";
    };
    if v == "true" || v == "false" {
        "boolean"
    } else if v.starts_with(['"', '\'', '`']) {
        "string"
    } else if v.parse::<f64>().is_ok() {
        "number"
    } else {
        "unknown"
    }
}
