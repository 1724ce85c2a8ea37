use anyhow::{Context, Result, bail};
use sprig_compiler::{CompilationBuilder, CompilerConfig, SourceModule, SourceReader, UnitFailure};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Looked up in the source directory when no `--config` is given.
pub const CONFIG_FILE: &str = "sprig.toml";

#[derive(Debug, Clone, Default)]
pub struct TranspileOptions {
    pub src_dir: PathBuf,
    /// Defaults to the parent of `src_dir`, i.e. the project root.
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

#[derive(Debug, Default)]
pub struct TranspileReport {
    pub out_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

/// Compile every decorated class under `src_dir` and write the outputs.
/// Failed units are returned in the report, not as an error.
pub fn transpile_cmd(opts: &TranspileOptions) -> Result<TranspileReport> {
    let mut config = load_config(&opts.src_dir, opts.config.as_deref())?;
    if opts.strict {
        config.strict_templates = true;
    }

    let sources = collect_sources(&opts.src_dir)?;
    let mut builder = CompilationBuilder::new(config);
    for module in &sources {
        builder.add_module(module, &FsReader);
    }
    let compilation = builder.build();
    for service in compilation.services() {
        tracing::info!(
            class = %service.class_name,
            scope = ?service.metadata.scope,
            on_startup = service.metadata.on_startup,
            "service {}",
            service.rel_path
        );
    }

    let output = compilation.compile_all();
    let out_dir = opts
        .out_dir
        .clone()
        .unwrap_or_else(|| default_out_dir(&opts.src_dir));

    let mut written = Vec::new();
    for file in &output.files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, &file.contents).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(file = %path.display(), "written");
        written.push(path);
    }

    Ok(TranspileReport {
        out_dir,
        written,
        failures: output.failures,
    })
}

/// `--config` when given, else `<src_dir>/sprig.toml` when present, else defaults.
pub fn load_config(src_dir: &Path, explicit: Option<&Path>) -> Result<CompilerConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = src_dir.join(CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(CompilerConfig::default());
            }
            candidate
        }
    };
    CompilerConfig::from_file(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// All `.ts` sources under `src_dir`, sorted, skipping declaration files and
/// `node_modules`.
pub fn collect_sources(src_dir: &Path) -> Result<Vec<SourceModule>> {
    if !src_dir.is_dir() {
        bail!("{} is not a directory", src_dir.display());
    }
    let mut modules = Vec::new();
    let walker = WalkDir::new(src_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules");
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", src_dir.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_file() || !name.ends_with(".ts") || name.ends_with(".d.ts") {
            continue;
        }
        let source = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let rel_path = path
            .strip_prefix(src_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        modules.push(SourceModule {
            path: path.to_path_buf(),
            rel_path,
            source,
        });
    }
    tracing::debug!(count = modules.len(), dir = %src_dir.display(), "sources collected");
    Ok(modules)
}

fn default_out_dir(src_dir: &Path) -> PathBuf {
    match src_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
