use crate::class_parse::ClassDecl;

#[derive(Debug, Clone, PartialEq)]
pub struct PipeMetadata {
    pub name: String,
    pub class_name: String,
    pub pure: bool,
}

/// `None` means the class is not a pipe: no `@Pipe` decorator, or one
/// without a `name`.
pub fn parse_pipe(class: &ClassDecl) -> Option<PipeMetadata> {
    let deco = class.decorator("Pipe")?;
    let Some(name) = deco.options().and_then(|o| o.get_str("name").map(str::to_string)) else {
        tracing::warn!(class = %class.name, "@Pipe without a name");
        return None;
    };
    let pure = deco.options().and_then(|o| o.get_bool("pure")).unwrap_or(true);
    Some(PipeMetadata {
        name,
        class_name: class.name.clone(),
        pure,
    })
}
