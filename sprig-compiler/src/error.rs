use std::path::PathBuf;

use sprig_template::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error(
        "route `{route}` uses the interactive binding `{binding}`; routes are server-rendered, \
         move this logic into an island component"
    )]
    InteractiveRoute { route: String, binding: String },

    #[error("{unit}: template has {} syntax error(s): {}", errors.len(), join_errors(errors))]
    TemplateSyntax { unit: String, errors: Vec<ParseError> },

    #[error("{unit}: template `{template}` could not be read")]
    MissingTemplate { unit: String, template: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    Parse { message: String },

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn join_errors(errors: &[ParseError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
