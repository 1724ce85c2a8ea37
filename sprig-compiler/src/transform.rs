//! Template AST to JSX.
//!
//! `transform` parses a template and walks it depth first, building a
//! `sprig_jsx::JsxNode` tree while recording every import the emitted code
//! needs. Registries are only read; the same input always produces the same
//! result.

use sprig_jsx::{JsxNode, Prop, Props, h};
use sprig_template::{BindingKind, Document, Element, Node, ParseError, parse_template, walk_elements};

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::expr::{camel_case, capitalize, compile_pipes, is_identifier, object_key, split_top_level};
use crate::imports::Import;
use crate::registry::{DirectiveRegistry, PipeRegistry, pipe_import_path};

/// A component a template may render as a child.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownComponent {
    /// Function name, e.g. `UserCard`.
    pub name: String,
    /// Kebab-case tag, e.g. `user-card`.
    pub selector: String,
    pub import_path: String,
}

/// What `<outlet />` becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outlet {
    /// `{props.children}` in a component.
    #[default]
    Children,
    /// `<Component />` from `PageProps` in a route.
    Component,
    /// `{children ?? <Component />}` in a layout.
    Layout,
}

pub struct TransformContext<'a> {
    pub components: &'a [KnownComponent],
    pub directives: &'a DirectiveRegistry,
    pub pipes: &'a PipeRegistry,
    pub config: &'a CompilerConfig,
    pub outlet: Outlet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeUsage {
    pub name: String,
    pub import_path: String,
    /// False when no `@Pipe` with this name was found.
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUsage {
    pub selector: String,
    pub transform_fn: String,
    pub import_path: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformResult {
    pub jsx: String,
    /// The tree `jsx` was printed from; `None` for an empty template.
    pub tree: Option<JsxNode>,
    pub imports: Vec<Import>,
    pub used_pipes: Vec<PipeUsage>,
    pub used_directives: Vec<DirectiveUsage>,
    /// Function names of child components rendered by the template.
    pub used_components: Vec<String>,
    /// `classNames` / `styleMap`.
    pub runtime_helpers: Vec<String>,
    pub uses_outlet: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<ParseError>,
}

pub fn transform(template: &str, ctx: &TransformContext) -> TransformResult {
    let parsed = parse_template(template);
    let mut result = transform_document(&parsed.document, ctx);
    result.errors = parsed.errors;
    result
}

pub fn transform_document(doc: &Document, ctx: &TransformContext) -> TransformResult {
    let mut t = Transformer {
        ctx,
        out: TransformResult::default(),
    };
    let mut roots = t.children(&doc.children);
    let tree = match roots.len() {
        0 => None,
        1 => roots.pop(),
        _ => Some(JsxNode::Fragment(roots)),
    };
    let mut out = t.out;
    out.jsx = match &tree {
        Some(node) => sprig_jsx::render(node),
        None => "null".to_string(),
    };
    out.tree = tree;
    out.imports = collect_imports(&out, ctx);
    out
}

/// Fail when a route template carries event or two-way bindings.
pub fn check_route_interactivity(route: &str, doc: &Document) -> Result<(), CompileError> {
    let mut offending = None;
    walk_elements(&doc.children, &mut |el| {
        if offending.is_some() || !el.is_interactive() {
            return;
        }
        if let Some(e) = el.events.first() {
            offending = Some(format!("({})", e.name));
        } else if let Some(b) = el.two_way_bindings.first() {
            offending = Some(format!("[({})]", b.name));
        }
    });
    match offending {
        Some(binding) => Err(CompileError::InteractiveRoute {
            route: route.to_string(),
            binding,
        }),
        None => Ok(()),
    }
}

/// Custom structural directives used anywhere in the document, in first-use
/// order. `*if` and `*for` are not included.
pub fn collect_directive_usages(doc: &Document) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    walk_elements(&doc.children, &mut |el| {
        for d in el.directives.iter().filter(|d| !d.is_built_in) {
            if !names.contains(&d.name) {
                names.push(d.name.clone());
            }
        }
    });
    names
}

/// The props spread for one custom directive usage, or `None` when the
/// selector is not registered.
pub fn transform_directive(selector: &str, expression: &str, registry: &DirectiveRegistry) -> Option<String> {
    let entry = registry.get(selector)?;
    let value = match expression.trim() {
        "" => "undefined",
        e => e,
    };
    Some(format!("{{...{}({{}}, {value})}}", entry.transform_fn))
}

struct Transformer<'a> {
    ctx: &'a TransformContext<'a>,
    out: TransformResult,
}

struct ForLoop {
    item: String,
    items: String,
    index: Option<String>,
    track_by: Option<String>,
}

impl Transformer<'_> {
    fn children(&mut self, nodes: &[Node]) -> Vec<JsxNode> {
        nodes.iter().filter_map(|n| self.node(n)).collect()
    }

    fn node(&mut self, node: &Node) -> Option<JsxNode> {
        match node {
            Node::Text(t) => {
                if t.value.trim().is_empty() && t.value.contains('\n') {
                    None
                } else {
                    Some(JsxNode::Text(t.value.clone()))
                }
            }
            Node::Interpolation(i) => Some(JsxNode::Expr(self.expr(&i.expression))),
            Node::Comment(c) => Some(JsxNode::Comment(c.value.clone())),
            Node::Element(el) => Some(self.element(el)),
        }
    }

    fn element(&mut self, el: &Element) -> JsxNode {
        let for_loop = el.directive("for").and_then(|d| {
            let parsed = parse_for(&d.expression);
            if parsed.is_none() {
                self.warn(format!("<{}>: cannot read *for=\"{}\"; rendering once", el.tag, d.expression));
            }
            parsed
        });

        let mut key = None;
        let mut params = Vec::new();
        if let Some(l) = &for_loop {
            params.push(l.item.clone());
            let mut index = l.index.clone();
            if let Some(track) = &l.track_by {
                let track = track.trim();
                let is_fn = is_identifier(track) && track != l.item && Some(track) != l.index.as_deref();
                if is_fn {
                    let idx = index.get_or_insert_with(|| "index".to_string()).clone();
                    key = Some(format!("{track}({idx}, {})", l.item));
                } else {
                    key = Some(self.expr(track));
                }
            }
            if let Some(i) = index {
                params.push(i);
            }
        }

        let mut node = if el.tag.eq_ignore_ascii_case("outlet") {
            self.out.uses_outlet = true;
            match self.ctx.outlet {
                Outlet::Children => JsxNode::Expr("props.children".to_string()),
                Outlet::Component => h("Component", (), vec![]),
                Outlet::Layout => JsxNode::Expr("children ?? <Component />".to_string()),
            }
        } else {
            self.plain_element(el, key)
        };

        if let Some(d) = el.directive("if") {
            if d.expression.trim().is_empty() {
                self.warn(format!("<{}>: *if without a condition; rendering unconditionally", el.tag));
            } else {
                node = JsxNode::Conditional {
                    test: self.expr(&d.expression),
                    node: Box::new(node),
                };
            }
        }
        if let Some(l) = for_loop {
            node = JsxNode::Loop {
                items: self.expr(&l.items),
                params,
                node: Box::new(node),
            };
        }
        node
    }

    fn plain_element(&mut self, el: &Element, key: Option<String>) -> JsxNode {
        let component = self
            .ctx
            .components
            .iter()
            .find(|c| c.selector == el.tag || c.name == el.tag);
        let tag = match component {
            Some(c) => {
                push_unique(&mut self.out.used_components, &c.name);
                c.name.clone()
            }
            None => el.tag.clone(),
        };
        let is_component = component.is_some();

        let mut props = Props::new();
        if let Some(k) = key {
            props = props.bind("key", k);
        }

        let class_bindings: Vec<_> = el.bindings.iter().filter(|b| b.kind == BindingKind::Class).collect();
        let style_bindings: Vec<_> = el.bindings.iter().filter(|b| b.kind == BindingKind::Style).collect();
        let static_class = el.attribute("class").and_then(|a| a.value.clone());
        let static_style = el.attribute("style").and_then(|a| a.value.clone());

        for attr in &el.attributes {
            if attr.name == "class" && !class_bindings.is_empty() {
                let merged = self.class_map(static_class.as_deref(), &class_bindings);
                props = props.bind("class", merged);
                continue;
            }
            if attr.name == "style" && !style_bindings.is_empty() {
                let merged = self.style_map(static_style.as_deref(), &style_bindings);
                props = props.bind("style", merged);
                continue;
            }
            props = match &attr.value {
                None => props.flag(attr.name.clone()),
                Some(v) if v.contains("{{") => {
                    let literal = self.interpolated_literal(v);
                    props.bind(attr.name.clone(), literal)
                }
                Some(v) => props.set(attr.name.clone(), v.clone()),
            };
        }

        let mut class_done = static_class.is_some();
        let mut style_done = static_style.is_some();
        for b in &el.bindings {
            match b.kind {
                BindingKind::Property if b.name == "innerHTML" => {
                    let value = self.expr(&b.expression);
                    props = props.bind("dangerouslySetInnerHTML", format!("{{ __html: {value} }}"));
                }
                BindingKind::Property | BindingKind::Attribute => {
                    let value = self.expr(&b.expression);
                    props = props.bind(b.name.clone(), value);
                }
                BindingKind::Class if !class_done => {
                    class_done = true;
                    let merged = self.class_map(None, &class_bindings);
                    props = props.bind("class", merged);
                }
                BindingKind::Style if !style_done => {
                    style_done = true;
                    let merged = self.style_map(None, &style_bindings);
                    props = props.bind("style", merged);
                }
                BindingKind::Class | BindingKind::Style => {}
            }
        }

        for e in &el.events {
            let (name, key_filter) = match e.name.split_once('.') {
                Some((n, k)) => (n, Some(k)),
                None => (e.name.as_str(), None),
            };
            props = props.bind(event_prop(name), event_handler(&e.handler, key_filter));
        }

        for tw in &el.two_way_bindings {
            let target = tw.expression.trim();
            props = props.bind(tw.name.clone(), target.to_string());
            if is_component {
                props = props.bind(
                    format!("on{}Change", capitalize(&tw.name)),
                    format!("($event) => ({target} = $event)"),
                );
            } else {
                props = props.bind(
                    "onChange",
                    format!("($event) => ({target} = $event.currentTarget.{})", tw.name),
                );
            }
        }

        for d in el.directives.iter().filter(|d| !d.is_built_in) {
            match self.ctx.directives.get(&d.name) {
                Some(entry) => {
                    let value = if d.expression.trim().is_empty() {
                        "undefined".to_string()
                    } else {
                        self.expr(&d.expression)
                    };
                    props.push(Prop::Spread(format!("{}({{}}, {value})", entry.transform_fn)));
                    if !self.out.used_directives.iter().any(|u| u.selector == entry.selector) {
                        self.out.used_directives.push(DirectiveUsage {
                            selector: entry.selector.clone(),
                            transform_fn: entry.transform_fn.clone(),
                            import_path: entry.import_path.clone(),
                        });
                    }
                }
                None => tracing::debug!(directive = %d.name, tag = %el.tag, "unknown directive ignored"),
            }
        }

        let children = if sprig_template::is_void_element(&el.tag) {
            Vec::new()
        } else {
            self.children(&el.children)
        };
        h(tag, props, children)
    }

    // `classNames("static", { active: isActive })`
    fn class_map(&mut self, static_value: Option<&str>, bindings: &[&sprig_template::BindingNode]) -> String {
        push_unique(&mut self.out.runtime_helpers, "classNames");
        let entries: Vec<String> = bindings
            .iter()
            .map(|b| format!("{}: {}", object_key(&b.name), self.expr(&b.expression)))
            .collect();
        helper_call("classNames", static_value, &entries)
    }

    // `styleMap("color: red", { "font-size": size })`; `width.px` appends the unit.
    fn style_map(&mut self, static_value: Option<&str>, bindings: &[&sprig_template::BindingNode]) -> String {
        push_unique(&mut self.out.runtime_helpers, "styleMap");
        let entries: Vec<String> = bindings
            .iter()
            .map(|b| {
                let value = self.expr(&b.expression);
                match b.name.split_once('.') {
                    Some((prop, unit)) => format!("{}: `${{{value}}}{unit}`", object_key(prop)),
                    None => format!("{}: {value}", object_key(&b.name)),
                }
            })
            .collect();
        helper_call("styleMap", static_value, &entries)
    }

    // `btn {{ kind }}` -> `` `btn ${kind}` ``
    fn interpolated_literal(&mut self, value: &str) -> String {
        let mut out = String::from("`");
        let mut rest = value;
        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };
            out.push_str(&escape_template(&rest[..open]));
            let inner = &rest[open + 2..open + 2 + close];
            out.push_str(&format!("${{{}}}", self.expr(inner)));
            rest = &rest[open + 2 + close + 2..];
        }
        out.push_str(&escape_template(rest));
        out.push('`');
        out
    }

    fn expr(&mut self, source: &str) -> String {
        let (compiled, pipes) = compile_pipes(source);
        for name in pipes {
            if self.out.used_pipes.iter().any(|p| p.name == name) {
                continue;
            }
            let usage = match self.ctx.pipes.get(&name) {
                Some(entry) => PipeUsage {
                    name: name.clone(),
                    import_path: entry.import_path.clone(),
                    resolved: true,
                },
                None => {
                    let import_path = pipe_import_path(&name, self.ctx.config);
                    self.warn(format!("pipe `{name}` is not registered; expecting it at {import_path}"));
                    PipeUsage {
                        name: name.clone(),
                        import_path,
                        resolved: false,
                    }
                }
            };
            self.out.used_pipes.push(usage);
        }
        compiled
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.out.warnings.push(message);
    }
}

fn parse_for(expression: &str) -> Option<ForLoop> {
    let mut clauses = split_top_level(expression, ';')
        .into_iter()
        .flat_map(|c| split_top_level(c, ','))
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let head = clauses.next()?;
    let head = head
        .strip_prefix("let ")
        .or_else(|| head.strip_prefix("const "))
        .unwrap_or(head);
    let (item, items) = head.split_once(" of ")?;
    let (item, items) = (item.trim(), items.trim());
    if item.is_empty() || items.is_empty() {
        return None;
    }

    let mut l = ForLoop {
        item: item.to_string(),
        items: items.to_string(),
        index: None,
        track_by: None,
    };
    for clause in clauses {
        if let Some(t) = clause.strip_prefix("trackBy") {
            let t = t.trim_start().trim_start_matches(':').trim();
            if !t.is_empty() {
                l.track_by = Some(t.to_string());
            }
        } else if let Some(i) = clause.strip_prefix("index as ") {
            l.index = Some(i.trim().to_string());
        } else if let Some((var, value)) = clause.strip_prefix("let ").and_then(|c| c.split_once('=')) {
            if value.trim() == "index" {
                l.index = Some(var.trim().to_string());
            }
        } else {
            tracing::debug!(clause, "unsupported *for clause ignored");
        }
    }
    Some(l)
}

/// `click` -> `onClick`, `keyup` -> `onKeyUp`, `my-event` -> `onMyEvent`.
pub fn event_prop(name: &str) -> String {
    const COMPOUND: &[(&str, &str)] = &[
        ("dblclick", "DblClick"),
        ("keyup", "KeyUp"),
        ("keydown", "KeyDown"),
        ("keypress", "KeyPress"),
        ("mouseenter", "MouseEnter"),
        ("mouseleave", "MouseLeave"),
        ("mouseover", "MouseOver"),
        ("mouseout", "MouseOut"),
        ("mousedown", "MouseDown"),
        ("mouseup", "MouseUp"),
        ("mousemove", "MouseMove"),
        ("focusin", "FocusIn"),
        ("focusout", "FocusOut"),
        ("touchstart", "TouchStart"),
        ("touchend", "TouchEnd"),
        ("touchmove", "TouchMove"),
        ("pointerdown", "PointerDown"),
        ("pointerup", "PointerUp"),
        ("pointermove", "PointerMove"),
        ("contextmenu", "ContextMenu"),
        ("dragstart", "DragStart"),
        ("dragend", "DragEnd"),
        ("dragover", "DragOver"),
    ];
    let lower = name.to_ascii_lowercase();
    match COMPOUND.iter().find(|(dom, _)| *dom == lower) {
        Some((_, jsx)) => format!("on{jsx}"),
        None => format!("on{}", capitalize(&camel_case(name))),
    }
}

fn event_handler(handler: &str, key_filter: Option<&str>) -> String {
    let statements: Vec<&str> = split_top_level(handler, ';')
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let param = if key_filter.is_some() || handler.contains("$event") { "$event" } else { "" };
    match (key_filter, statements.as_slice()) {
        (None, [single]) => format!("({param}) => {single}"),
        (None, many) => {
            let body: Vec<String> = many.iter().map(|s| format!("{s};")).collect();
            format!("({param}) => {{ {} }}", body.join(" "))
        }
        (Some(key), many) => {
            let body: Vec<String> = many.iter().map(|s| format!("{s};")).collect();
            format!(
                "($event) => {{ if ($event.key === {}) {{ {} }} }}",
                sprig_jsx::printer::js_string(&key_name(key)),
                body.join(" ")
            )
        }
    }
}

// `enter` -> `Enter`, `arrowup` -> `ArrowUp`, `space` -> ` `
fn key_name(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "space" => " ".to_string(),
        "esc" | "escape" => "Escape".to_string(),
        "arrowup" => "ArrowUp".to_string(),
        "arrowdown" => "ArrowDown".to_string(),
        "arrowleft" => "ArrowLeft".to_string(),
        "arrowright" => "ArrowRight".to_string(),
        "pageup" => "PageUp".to_string(),
        "pagedown" => "PageDown".to_string(),
        _ => capitalize(key),
    }
}

fn helper_call(helper: &str, static_value: Option<&str>, entries: &[String]) -> String {
    let object = format!("{{ {} }}", entries.join(", "));
    match static_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => format!("{helper}({}, {object})", sprig_jsx::printer::js_string(s)),
        None => format!("{helper}({object})"),
    }
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn collect_imports(out: &TransformResult, ctx: &TransformContext) -> Vec<Import> {
    let mut imports = Vec::new();
    if !out.runtime_helpers.is_empty() {
        imports.push(Import::named(&ctx.config.runtime_module, out.runtime_helpers.iter().cloned()));
    }
    for p in &out.used_pipes {
        imports.push(Import::named(&p.import_path, [p.name.clone()]));
    }
    for d in &out.used_directives {
        imports.push(Import::named(&d.import_path, [d.transform_fn.clone()]));
    }
    for name in &out.used_components {
        if let Some(c) = ctx.components.iter().find(|c| &c.name == name) {
            imports.push(Import::default_import(&c.import_path, &c.name));
        }
    }
    imports
}
