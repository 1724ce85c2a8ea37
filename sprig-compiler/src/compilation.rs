//! One compilation run: discover decorated classes, freeze the registries,
//! then compile every unit against them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sprig_meta::{
    ClassDecl, InputMetadata, ServiceMetadata, UnitMetadata, parse_directive, parse_inputs, parse_module,
    parse_pipe, parse_service, parse_unit,
};
use sprig_template::parse_template;

use crate::codegen::{
    ComponentOutput, GeneratedFile, LayoutOutput, RouteOutput, component_fn_name, generate_component,
    generate_layout, generate_route, route_fn_name,
};
use crate::config::CompilerConfig;
use crate::dev_props::{DevProps, load_dev_props_file, resolve_dev_props};
use crate::error::CompileError;
use crate::expr::kebab_case;
use crate::registry::{DirectiveRegistry, PipeRegistry};
use crate::route_path::{route_output_path, route_url};
use crate::transform::{KnownComponent, Outlet, TransformContext, check_route_interactivity, transform_document};
use crate::wrappers::{
    generate_directive_index, generate_directive_wrapper, generate_pipe_index, generate_pipe_wrapper,
};

/// Reads files next to a source module: templates and dev-props sidecars.
pub trait SourceReader {
    fn read(&self, path: &Path) -> Option<String>;
}

impl SourceReader for HashMap<PathBuf, String> {
    fn read(&self, path: &Path) -> Option<String> {
        self.get(path).cloned()
    }
}

/// A TypeScript source file handed to the compiler.
#[derive(Debug, Clone)]
pub struct SourceModule {
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated.
    pub rel_path: String,
    pub source: String,
}

/// A class carrying `@Component`, `@Route` or `@Layout`.
#[derive(Debug, Clone)]
pub struct SprigComponent {
    pub path: PathBuf,
    pub rel_path: String,
    pub class: ClassDecl,
    pub metadata: UnitMetadata,
    pub source: String,
    pub template: String,
    pub inputs: Vec<InputMetadata>,
    pub dev_props: Option<DevProps>,
}

impl SprigComponent {
    pub fn label(&self) -> String {
        format!("{} ({})", self.class.name, self.rel_path)
    }
}

#[derive(Debug, Clone)]
pub struct SprigService {
    pub class_name: String,
    pub rel_path: String,
    pub metadata: ServiceMetadata,
}

#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub unit: String,
    pub error: CompileError,
}

#[derive(Debug, Default)]
pub struct CompileOutput {
    pub files: Vec<GeneratedFile>,
    pub failures: Vec<UnitFailure>,
}

pub struct CompilationBuilder {
    config: CompilerConfig,
    units: Vec<SprigComponent>,
    services: Vec<SprigService>,
    directives: DirectiveRegistry,
    pipes: PipeRegistry,
    failures: Vec<UnitFailure>,
}

impl CompilationBuilder {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            units: Vec::new(),
            services: Vec::new(),
            directives: DirectiveRegistry::new(),
            pipes: PipeRegistry::new(),
            failures: Vec::new(),
        }
    }

    /// Read every decorated class of `module`. Returns how many were found.
    pub fn add_module(&mut self, module: &SourceModule, reader: &dyn SourceReader) -> usize {
        let classes = parse_module(&module.source);
        let mut found = 0;
        for class in classes {
            if let Some(d) = parse_directive(&class) {
                if !class.exported {
                    tracing::warn!(class = %class.name, "directive class is not exported; its wrapper cannot import it");
                }
                self.directives.register(&d, &module.rel_path, &self.config);
                found += 1;
            }
            if let Some(p) = parse_pipe(&class) {
                if !class.exported {
                    tracing::warn!(class = %class.name, "pipe class is not exported; its wrapper cannot import it");
                }
                self.pipes.register(&p, &module.rel_path, &self.config);
                found += 1;
            }
            if let Some(s) = parse_service(&class) {
                self.services.push(SprigService {
                    class_name: class.name.clone(),
                    rel_path: module.rel_path.clone(),
                    metadata: s,
                });
                found += 1;
            }
            if let Some(metadata) = parse_unit(&class) {
                found += 1;
                self.add_unit(module, class, metadata, reader);
            }
        }
        tracing::debug!(module = %module.rel_path, found, "module scanned");
        found
    }

    fn add_unit(&mut self, module: &SourceModule, class: ClassDecl, metadata: UnitMetadata, reader: &dyn SourceReader) {
        let template_ref = metadata.template().to_string();
        let unit_label = format!("{} ({})", class.name, module.rel_path);
        let relative = template_ref.trim_start_matches("./");
        let template_path = module
            .path
            .parent()
            .map(|dir| dir.join(relative))
            .unwrap_or_else(|| PathBuf::from(relative));
        let template = match reader.read(&template_path).filter(|_| !template_ref.is_empty()) {
            Some(t) => t,
            None => {
                self.failures.push(UnitFailure {
                    unit: unit_label.clone(),
                    error: CompileError::MissingTemplate {
                        unit: unit_label,
                        template: template_ref,
                    },
                });
                return;
            }
        };

        let stem = module.path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let sidecar = module.path.with_file_name(format!("{stem}.props.json"));
        let dev_props = reader.read(&sidecar).and_then(|json| match load_dev_props_file(&json) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(file = %sidecar.display(), "ignoring unreadable dev props: {e}");
                None
            }
        });

        let inputs = parse_inputs(&class);
        self.units.push(SprigComponent {
            path: module.path.clone(),
            rel_path: module.rel_path.clone(),
            class,
            metadata,
            source: module.source.clone(),
            template,
            inputs,
            dev_props,
        });
    }

    /// Freeze the registries. Nothing registered after this point exists.
    pub fn build(self) -> Compilation {
        let mut components = Vec::new();
        let mut layouts = Vec::new();
        for unit in &self.units {
            match &unit.metadata {
                UnitMetadata::Component(c) => {
                    let name = component_fn_name(&unit.class.name);
                    let dir = if c.island { "islands" } else { "components" };
                    components.push(KnownComponent {
                        selector: kebab_case(&name),
                        import_path: self.config.output_import(&format!("{dir}/{name}.tsx")),
                        name,
                    });
                }
                UnitMetadata::Layout(_) => {
                    let name = unit.class.name.clone();
                    layouts.push(KnownComponent {
                        selector: kebab_case(&name),
                        import_path: self.config.output_import(&format!("layouts/{name}.tsx")),
                        name,
                    });
                }
                UnitMetadata::Route(_) => {}
            }
        }
        tracing::info!(
            units = self.units.len(),
            directives = self.directives.len(),
            pipes = self.pipes.get_all().count(),
            "compilation ready"
        );
        Compilation {
            config: self.config,
            units: self.units,
            services: self.services,
            components,
            layouts,
            directives: self.directives,
            pipes: self.pipes,
            discovery_failures: self.failures,
        }
    }
}

/// Frozen registries plus the units to compile. Compiling never mutates it.
pub struct Compilation {
    config: CompilerConfig,
    units: Vec<SprigComponent>,
    services: Vec<SprigService>,
    components: Vec<KnownComponent>,
    layouts: Vec<KnownComponent>,
    directives: DirectiveRegistry,
    pipes: PipeRegistry,
    discovery_failures: Vec<UnitFailure>,
}

impl Compilation {
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn units(&self) -> &[SprigComponent] {
        &self.units
    }

    pub fn services(&self) -> &[SprigService] {
        &self.services
    }

    pub fn components(&self) -> &[KnownComponent] {
        &self.components
    }

    pub fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    pub fn pipes(&self) -> &PipeRegistry {
        &self.pipes
    }

    /// Compile one component, route or layout.
    pub fn compile_unit(&self, unit: &SprigComponent) -> Result<Vec<GeneratedFile>, CompileError> {
        let parsed = parse_template(&unit.template);
        if parsed.has_errors() {
            if self.config.strict_templates {
                return Err(CompileError::TemplateSyntax {
                    unit: unit.label(),
                    errors: parsed.errors,
                });
            }
            for e in &parsed.errors {
                tracing::warn!(unit = %unit.label(), "{e}");
            }
        }

        let outlet = match unit.metadata {
            UnitMetadata::Component(_) => Outlet::Children,
            UnitMetadata::Route(_) => Outlet::Component,
            UnitMetadata::Layout(_) => Outlet::Layout,
        };
        let own_name = component_fn_name(&unit.class.name);
        let others: Vec<KnownComponent> = self.components.iter().filter(|c| c.name != own_name).cloned().collect();
        let ctx = TransformContext {
            components: &others,
            directives: &self.directives,
            pipes: &self.pipes,
            config: &self.config,
            outlet,
        };

        let mut files = Vec::new();
        match &unit.metadata {
            UnitMetadata::Route(route) => {
                let path = route_output_path(&unit.rel_path, route.path.as_deref());
                check_route_interactivity(&route_url(&path), &parsed.document)?;
                let result = transform_document(&parsed.document, &ctx);
                let layout = route.layout.as_deref().and_then(|name| {
                    let found = self.layouts.iter().find(|l| l.name == name);
                    if found.is_none() {
                        tracing::warn!(unit = %unit.label(), layout = name, "route layout not found; rendering without it");
                    }
                    found
                });
                let contents = generate_route(&RouteOutput {
                    fn_name: &route_fn_name(&unit.class.name),
                    class: &unit.class,
                    inputs: &unit.inputs,
                    result: &result,
                    config: &self.config,
                    layout: layout.map(|l| (l.name.as_str(), l.import_path.as_str())),
                });
                files.push(GeneratedFile { path, contents });
            }
            UnitMetadata::Layout(_) => {
                if !unit.inputs.is_empty() {
                    tracing::warn!(unit = %unit.label(), "layouts take no inputs; @Input ignored");
                }
                let result = transform_document(&parsed.document, &ctx);
                let contents = generate_layout(&LayoutOutput {
                    fn_name: &unit.class.name,
                    class: &unit.class,
                    result: &result,
                    config: &self.config,
                });
                files.push(GeneratedFile {
                    path: format!("layouts/{}.tsx", unit.class.name),
                    contents,
                });
            }
            UnitMetadata::Component(c) => {
                let result = transform_document(&parsed.document, &ctx);
                let contents = generate_component(&ComponentOutput {
                    fn_name: &own_name,
                    class: &unit.class,
                    inputs: &unit.inputs,
                    result: &result,
                    config: &self.config,
                });
                let dir = if c.island { "islands" } else { "components" };
                files.push(GeneratedFile {
                    path: format!("{dir}/{own_name}.tsx"),
                    contents,
                });

                let dev = resolve_dev_props(&unit.inputs, unit.dev_props.as_ref());
                match serde_json::to_string_pretty(&dev) {
                    Ok(json) => files.push(GeneratedFile {
                        path: format!("dev-props/{own_name}.json"),
                        contents: format!("{json}\n"),
                    }),
                    Err(e) => tracing::warn!(unit = %unit.label(), "could not serialize dev props: {e}"),
                }
            }
        }
        Ok(files)
    }

    /// Compile every unit plus the directive and pipe wrappers. A failing
    /// unit is recorded and the rest still compile.
    pub fn compile_all(&self) -> CompileOutput {
        let mut out = CompileOutput::default();
        out.failures.extend(self.discovery_failures.iter().cloned());

        for unit in &self.units {
            match self.compile_unit(unit) {
                Ok(files) => {
                    tracing::debug!(unit = %unit.label(), kind = unit.metadata.kind(), files = files.len(), "compiled");
                    out.files.extend(files);
                }
                Err(error) => {
                    tracing::error!(unit = %unit.label(), "{error}");
                    out.failures.push(UnitFailure {
                        unit: unit.label(),
                        error,
                    });
                }
            }
        }

        for entry in self.directives.get_all() {
            out.files.push(generate_directive_wrapper(entry, &self.config));
        }
        out.files.push(generate_directive_index(&self.directives, &self.config));
        for entry in self.pipes.get_all() {
            out.files.push(generate_pipe_wrapper(entry, &self.config));
        }
        out.files.push(generate_pipe_index(&self.pipes, &self.config));
        out
    }
}
