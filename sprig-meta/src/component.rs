use crate::class_parse::ClassDecl;
use crate::options::OptionValue;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentMetadata {
    pub template: String,
    pub island: bool,
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteMetadata {
    pub template: String,
    /// Explicit URL path, e.g. `/users/:id`.
    pub path: Option<String>,
    /// Name of the layout class wrapping the page.
    pub layout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutMetadata {
    pub template: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceScope {
    #[default]
    Singleton,
    Request,
    Transient,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceMetadata {
    pub scope: ServiceScope,
    pub on_startup: bool,
}

/// The template-bearing decorators. A class carries at most one; when
/// several are present `@Route` wins over `@Layout` over `@Component`.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitMetadata {
    Component(ComponentMetadata),
    Route(RouteMetadata),
    Layout(LayoutMetadata),
}

impl UnitMetadata {
    pub fn template(&self) -> &str {
        match self {
            UnitMetadata::Component(c) => &c.template,
            UnitMetadata::Route(r) => &r.template,
            UnitMetadata::Layout(l) => &l.template,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UnitMetadata::Component(_) => "component",
            UnitMetadata::Route(_) => "route",
            UnitMetadata::Layout(_) => "layout",
        }
    }
}

pub fn parse_component(class: &ClassDecl) -> Option<ComponentMetadata> {
    let opts = class.decorator("Component")?.options().unwrap_or(OptionValue::Object(Vec::new()));
    let styles = match opts.get("styles") {
        Some(OptionValue::Str(s)) => vec![s.clone()],
        Some(OptionValue::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    Some(ComponentMetadata {
        template: template_of(class, &opts),
        island: opts.get_bool("island").unwrap_or(false),
        styles,
    })
}

pub fn parse_route(class: &ClassDecl) -> Option<RouteMetadata> {
    let opts = class.decorator("Route")?.options().unwrap_or(OptionValue::Object(Vec::new()));
    let layout = match opts.get("layout") {
        Some(OptionValue::Str(s)) => Some(s.clone()),
        // a class reference: `layout: MainLayout`
        Some(OptionValue::Raw(r)) => Some(r.clone()),
        _ => None,
    };
    Some(RouteMetadata {
        template: template_of(class, &opts),
        path: opts.get_str("path").map(str::to_string),
        layout,
    })
}

pub fn parse_layout(class: &ClassDecl) -> Option<LayoutMetadata> {
    let opts = class.decorator("Layout")?.options().unwrap_or(OptionValue::Object(Vec::new()));
    Some(LayoutMetadata {
        template: template_of(class, &opts),
    })
}

pub fn parse_service(class: &ClassDecl) -> Option<ServiceMetadata> {
    let opts = class.decorator("Service")?.options().unwrap_or(OptionValue::Object(Vec::new()));
    let scope = match opts.get_str("scope") {
        None | Some("singleton") => ServiceScope::Singleton,
        Some("request") => ServiceScope::Request,
        Some("transient") => ServiceScope::Transient,
        Some(other) => {
            tracing::warn!(class = %class.name, scope = other, "unknown service scope, using singleton");
            ServiceScope::Singleton
        }
    };
    Some(ServiceMetadata {
        scope,
        on_startup: opts.get_bool("onStartup").unwrap_or(false),
    })
}

pub fn parse_unit(class: &ClassDecl) -> Option<UnitMetadata> {
    if let Some(r) = parse_route(class) {
        return Some(UnitMetadata::Route(r));
    }
    if let Some(l) = parse_layout(class) {
        return Some(UnitMetadata::Layout(l));
    }
    parse_component(class).map(UnitMetadata::Component)
}

fn template_of(class: &ClassDecl, opts: &OptionValue) -> String {
    match opts.get_str("template") {
        Some(t) => t.to_string(),
        None => {
            tracing::warn!(class = %class.name, "decorator has no template");
            String::new()
        }
    }
}
