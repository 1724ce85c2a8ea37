use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Compiler settings, read from `sprig.toml`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Prefix of import specifiers pointing into the generated output.
    pub import_alias: String,
    /// Prefix of import specifiers pointing at the original source classes.
    pub source_alias: String,
    /// Module providing the `classNames` and `styleMap` helpers.
    pub runtime_module: String,
    /// Module providing `PageProps`.
    pub page_props_module: String,
    pub directives_dir: String,
    pub pipes_dir: String,
    /// Accumulated template parse errors fail the unit.
    pub strict_templates: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            import_alias: "@/".to_string(),
            source_alias: "@/src/".to_string(),
            runtime_module: "@sprig/runtime".to_string(),
            page_props_module: "$fresh/server.ts".to_string(),
            directives_dir: "directives".to_string(),
            pipes_dir: "pipes".to_string(),
            strict_templates: false,
        }
    }
}

impl CompilerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: PathBuf::from(path.as_ref()),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("import_alias", &self.import_alias), ("source_alias", &self.source_alias)] {
            if !value.is_empty() && !value.ends_with('/') {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("`{value}` must end with `/`"),
                });
            }
        }
        for (field, value) in [("directives_dir", &self.directives_dir), ("pipes_dir", &self.pipes_dir)] {
            if value.is_empty() || value.starts_with('/') {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a relative directory name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Import specifier of a generated output file, e.g. `@/pipes/upper.ts`.
    pub fn output_import(&self, rel: &str) -> String {
        format!("{}{}", self.import_alias, rel.trim_start_matches('/'))
    }

    /// Import specifier of an original source file.
    pub fn source_import(&self, rel: &str) -> String {
        format!("{}{}", self.source_alias, rel.trim_start_matches('/'))
    }
}
