//! Output modules for components, layouts and routes.

use sprig_jsx::JsxNode;
use sprig_meta::{BodyShape, ClassDecl, InputMetadata, MemberKind, body_shape, strip_this};

use crate::config::CompilerConfig;
use crate::expr::{is_identifier, object_key};
use crate::imports::{Import, render_imports};
use crate::transform::TransformResult;

pub const BANNER: &str = "// Generated by sprig. Do not edit.";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub contents: String,
}

/// Where the inputs of a unit come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// `props.<name>` in a component.
    Props,
    /// `data.<name>` handed to a route by its loader.
    Data,
}

/// Function name for a class: `UserCardComponent` -> `UserCard`.
pub fn component_fn_name(class_name: &str) -> String {
    strip_class_suffix(class_name, &["Component"]).to_string()
}

/// `UserRoute` -> `UserPage`.
pub fn route_fn_name(class_name: &str) -> String {
    format!("{}Page", strip_class_suffix(class_name, &["Route", "Page"]))
}

fn strip_class_suffix<'a>(name: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|s| name.strip_suffix(s).filter(|rest| !rest.is_empty()))
        .unwrap_or(name)
}

pub struct ComponentOutput<'a> {
    pub fn_name: &'a str,
    pub class: &'a ClassDecl,
    pub inputs: &'a [InputMetadata],
    pub result: &'a TransformResult,
    pub config: &'a CompilerConfig,
}

pub fn generate_component(out: &ComponentOutput) -> String {
    let mut imports = out.result.imports.clone();
    if out.result.uses_outlet {
        imports.push(Import::types("preact", ["ComponentChildren".to_string()]));
    }

    let props_type = format!("{}Props", out.fn_name);
    let mut code = header(&imports);

    let has_props = !out.inputs.is_empty() || out.result.uses_outlet;
    if has_props {
        code.push_str(&format!("export interface {props_type} {{\n"));
        for input in out.inputs {
            let optional = if input.required { "" } else { "?" };
            code.push_str(&format!("  {}{optional}: {};\n", object_key(&input.name), input.type_text));
        }
        if out.result.uses_outlet {
            code.push_str("  children?: ComponentChildren;\n");
        }
        code.push_str("}\n\n");
        code.push_str(&format!("export default function {}(props: {props_type}) {{\n", out.fn_name));
    } else {
        code.push_str(&format!("export default function {}() {{\n", out.fn_name));
    }

    code.push_str(&class_locals(out.class, out.inputs, InputSource::Props));
    code.push_str(&return_statement(out.result.tree.as_ref()));
    code.push_str("}\n");
    code
}

pub struct RouteOutput<'a> {
    pub fn_name: &'a str,
    pub class: &'a ClassDecl,
    pub inputs: &'a [InputMetadata],
    pub result: &'a TransformResult,
    pub config: &'a CompilerConfig,
    /// Layout function name and import path wrapping the page.
    pub layout: Option<(&'a str, &'a str)>,
}

pub fn generate_route(out: &RouteOutput) -> String {
    let mut imports = Vec::new();
    let mut destructure = Vec::new();
    if !out.inputs.is_empty() {
        destructure.push("data");
    }
    if out.result.uses_outlet {
        destructure.push("Component");
    }
    if !destructure.is_empty() {
        imports.push(Import::types(&out.config.page_props_module, ["PageProps".to_string()]));
    }
    imports.extend(out.result.imports.iter().cloned());

    let mut tree = out.result.tree.clone();
    if let Some((layout_fn, layout_path)) = out.layout {
        imports.push(Import::default_import(layout_path, layout_fn));
        let children = match tree {
            Some(JsxNode::Fragment(children)) => children,
            Some(node) => vec![node],
            None => Vec::new(),
        };
        tree = Some(sprig_jsx::h(layout_fn, (), children));
    }

    let mut code = header(&imports);
    if destructure.is_empty() {
        code.push_str(&format!("export default function {}() {{\n", out.fn_name));
    } else {
        code.push_str(&format!(
            "export default function {}({{ {} }}: PageProps) {{\n",
            out.fn_name,
            destructure.join(", ")
        ));
    }
    code.push_str(&class_locals(out.class, out.inputs, InputSource::Data));
    code.push_str(&return_statement(tree.as_ref()));
    code.push_str("}\n");
    code
}

pub struct LayoutOutput<'a> {
    pub fn_name: &'a str,
    pub class: &'a ClassDecl,
    pub result: &'a TransformResult,
    pub config: &'a CompilerConfig,
}

/// Layouts render the page as `<Component />` when used by the framework
/// and their children when a route wraps itself in them.
pub fn generate_layout(out: &LayoutOutput) -> String {
    let mut imports = Vec::new();
    if out.result.uses_outlet {
        imports.push(Import::types(&out.config.page_props_module, ["PageProps".to_string()]));
        imports.push(Import::types("preact", ["ComponentChildren".to_string()]));
    }
    imports.extend(out.result.imports.iter().cloned());

    let mut code = header(&imports);
    if out.result.uses_outlet {
        code.push_str(&format!(
            "export default function {}({{ Component, children }}: Partial<PageProps> & {{ children?: ComponentChildren }}) {{\n",
            out.fn_name
        ));
    } else {
        code.push_str(&format!("export default function {}() {{\n", out.fn_name));
    }
    code.push_str(&class_locals(out.class, &[], InputSource::Props));
    code.push_str(&return_statement(out.result.tree.as_ref()));
    code.push_str("}\n");
    code
}

fn header(imports: &[Import]) -> String {
    let mut code = format!("{BANNER}\n");
    let block = render_imports(imports);
    if !block.is_empty() {
        code.push_str(&block);
    }
    code.push('\n');
    code
}

/// Function-body prelude: inputs, then plain fields, getters and methods,
/// all with `this.` removed.
pub fn class_locals(class: &ClassDecl, inputs: &[InputMetadata], source: InputSource) -> String {
    let mut out = String::new();

    let holder = match source {
        InputSource::Props => "props",
        InputSource::Data => "data",
    };
    for input in inputs {
        let access = if is_identifier(&input.name) {
            format!("{holder}.{}", input.name)
        } else {
            format!("{holder}[{}]", sprig_jsx::printer::js_string(&input.name))
        };
        match &input.default_value {
            Some(default) => out.push_str(&format!(
                "  const {} = {access} ?? {};\n",
                input.property_name,
                strip_this(default)
            )),
            None => out.push_str(&format!("  const {} = {access};\n", input.property_name)),
        }
    }

    let mut getters = String::new();
    let mut methods = String::new();
    for member in &class.members {
        if member.decorator("Input").is_some() {
            continue;
        }
        match &member.kind {
            MemberKind::Property { initializer: Some(init), .. } => {
                out.push_str(&format!("  const {} = {};\n", member.name, strip_this(init)));
            }
            MemberKind::Property { .. } => {}
            MemberKind::Getter { body, .. } => match body_shape(&strip_this(body)) {
                BodyShape::Expression(e) => getters.push_str(&format!("  const {} = {e};\n", member.name)),
                BodyShape::Block(b) => getters.push_str(&format!(
                    "  const {} = (() => {{\n{}  }})();\n",
                    member.name,
                    reindent(&b, 4)
                )),
            },
            MemberKind::Method { params, body: Some(body), .. } => {
                if member.name == "constructor" {
                    continue;
                }
                let asyncness = if member.has_modifier("async") { "async " } else { "" };
                let params = strip_this(params);
                match body_shape(&strip_this(body)) {
                    BodyShape::Expression(e) => {
                        let e = if e.starts_with('{') { format!("({e})") } else { e };
                        methods.push_str(&format!("  const {} = {asyncness}({params}) => {e};\n", member.name));
                    }
                    BodyShape::Block(b) => methods.push_str(&format!(
                        "  {asyncness}function {}({params}) {{\n{}  }}\n",
                        member.name,
                        reindent(&b, 4)
                    )),
                }
            }
            MemberKind::Method { body: None, .. } => {}
            MemberKind::Setter { .. } => {
                tracing::debug!(class = %class.name, setter = %member.name, "setter has no function counterpart; skipped");
            }
        }
    }
    out.push_str(&getters);
    out.push_str(&methods);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn return_statement(tree: Option<&JsxNode>) -> String {
    let Some(node) = tree else {
        return "  return null;\n".to_string();
    };
    let jsx = sprig_jsx::render_at(node, 2);
    if jsx.contains('\n') {
        format!("  return (\n    {jsx}\n  );\n")
    } else {
        format!("  return {jsx};\n")
    }
}

/// Strip the common indentation of `text` and indent every line by `width`.
pub fn reindent(text: &str, width: usize) -> String {
    let lines: Vec<&str> = text.trim_end().trim_start_matches(['\n', '\r']).lines().collect();
    let common = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let pad = " ".repeat(width);
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            out.push('\n');
            continue;
        }
        // the first line starts right after the opening brace
        let body = if i == 0 { line.trim_start() } else { &line[common.min(line.len() - line.trim_start().len())..] };
        out.push_str(&pad);
        out.push_str(body.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_names() {
        assert_eq!(component_fn_name("UserCardComponent"), "UserCard");
        assert_eq!(component_fn_name("Component"), "Component");
        assert_eq!(route_fn_name("UserRoute"), "UserPage");
        assert_eq!(route_fn_name("About"), "AboutPage");
    }

    #[test]
    fn reindent_dedents_block_bodies() {
        let body = "\n    const x = 1;\n    if (x) {\n      go();\n    }\n    return x;\n  ";
        assert_eq!(
            reindent(body, 4),
            "    const x = 1;\n    if (x) {\n      go();\n    }\n    return x;\n"
        );
    }
}
