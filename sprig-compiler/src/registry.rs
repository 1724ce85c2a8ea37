//! Per-compilation lookups from directive selectors and pipe names to the
//! wrapper functions generated for them.
//!
//! Both registries are filled by `CompilationBuilder` before any template is
//! transformed and are only read afterwards.

use std::collections::BTreeMap;

use sprig_meta::{DirectiveMetadata, PipeMetadata, bare_selector};

use crate::config::CompilerConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveEntry {
    /// Bare selector, sigil stripped.
    pub selector: String,
    pub class_name: String,
    /// `apply<ClassName>`.
    pub transform_fn: String,
    /// Where the generated wrapper is imported from.
    pub import_path: String,
    /// Where the wrapper imports the original class from.
    pub source_import: String,
}

#[derive(Debug, Clone, Default)]
pub struct DirectiveRegistry {
    entries: BTreeMap<String, DirectiveEntry>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directive declared in the source file at `source_rel`.
    /// Registering the same selector again replaces the entry.
    pub fn register(
        &mut self,
        directive: &DirectiveMetadata,
        source_rel: &str,
        config: &CompilerConfig,
    ) -> &DirectiveEntry {
        let selector = bare_selector(&directive.selector).to_string();
        let entry = DirectiveEntry {
            selector: selector.clone(),
            class_name: directive.class_name.clone(),
            transform_fn: format!("apply{}", directive.class_name),
            import_path: config.output_import(&format!("{}/{}.ts", config.directives_dir, selector)),
            source_import: config.source_import(source_rel),
        };
        if let Some(previous) = self.entries.get(&selector) {
            if previous.class_name != entry.class_name {
                tracing::warn!(
                    selector = %selector,
                    "directive selector registered by both {} and {}",
                    previous.class_name,
                    entry.class_name
                );
            }
        }
        self.entries.insert(selector.clone(), entry);
        &self.entries[&selector]
    }

    pub fn get(&self, selector: &str) -> Option<&DirectiveEntry> {
        self.entries.get(bare_selector(selector))
    }

    pub fn has(&self, selector: &str) -> bool {
        self.get(selector).is_some()
    }

    /// All entries, ordered by selector.
    pub fn get_all(&self) -> impl Iterator<Item = &DirectiveEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeEntry {
    pub name: String,
    pub class_name: String,
    pub pure: bool,
    pub import_path: String,
    pub source_import: String,
}

#[derive(Debug, Clone, Default)]
pub struct PipeRegistry {
    entries: BTreeMap<String, PipeEntry>,
}

impl PipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pipe: &PipeMetadata, source_rel: &str, config: &CompilerConfig) -> &PipeEntry {
        let entry = PipeEntry {
            name: pipe.name.clone(),
            class_name: pipe.class_name.clone(),
            pure: pipe.pure,
            import_path: pipe_import_path(&pipe.name, config),
            source_import: config.source_import(source_rel),
        };
        self.entries.insert(pipe.name.clone(), entry);
        &self.entries[&pipe.name]
    }

    pub fn get(&self, name: &str) -> Option<&PipeEntry> {
        self.entries.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &PipeEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Conventional wrapper location of a pipe, registered or not.
pub fn pipe_import_path(name: &str, config: &CompilerConfig) -> String {
    config.output_import(&format!("{}/{}.ts", config.pipes_dir, name))
}
