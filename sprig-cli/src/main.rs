use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use sprig_cli::{TranspileOptions, transpile_cmd};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprig", version, about = "Sprig template compiler")]
struct Cli {
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile decorated classes and templates into TSX modules.
    Transpile {
        /// Source directory, e.g. `src`
        src_dir: PathBuf,
        /// Output root (default: parent of the source directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Config file (default: <src_dir>/sprig.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Fail units whose templates have syntax errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Transpile {
            src_dir,
            out,
            config,
            strict,
        } => {
            let report = transpile_cmd(&TranspileOptions {
                src_dir,
                out_dir: out,
                config,
                strict,
            })?;
            for failure in &report.failures {
                eprintln!("error: {}", failure.error);
            }
            println!("Generated {} file(s) in {}", report.written.len(), report.out_dir.display());
            if !report.failures.is_empty() {
                bail!("{} unit(s) failed to compile", report.failures.len());
            }
        }
    }
    Ok(())
}
