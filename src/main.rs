use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use codeception_export::parser::ProjectFormat;
use codeception_export::{CommandRegistry, ExportConfig, Exporter};

#[derive(Parser)]
#[command(name = "codeception-export")]
#[command(version = "0.1.0")]
#[command(about = "Export recorded browser tests as Codeception Cest classes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a project file, or every project file in a directory
    Export {
        /// Path to project file or directory
        path: PathBuf,

        /// Base URL for relative `open` targets (overrides config and project)
        #[arg(short, long)]
        base_url: Option<String>,

        /// YAML export configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every supported step name
    Commands,
}

/// Project files under `path`, or `path` itself
fn collect_projects(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && ProjectFormat::from_path(e.path()).is_some())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

async fn export(
    path: PathBuf,
    base_url: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut export_config = match config {
        Some(ref file) => ExportConfig::from_file(file)?,
        None => ExportConfig::default(),
    };
    if let Some(url) = base_url {
        export_config = export_config.with_base_url(url);
    }

    let files = collect_projects(&path);
    if files.is_empty() {
        anyhow::bail!("No project files found in {}", path.display());
    }

    eprintln!(
        "{} Exporting {} project(s) from: {}",
        "▶".green().bold(),
        files.len(),
        path.display()
    );

    if let Some(ref dir) = output {
        std::fs::create_dir_all(dir)?;
    }

    let exporter = Exporter::new(export_config);
    let mut failed = 0;
    for file in &files {
        let exported = match exporter.export_file(file).await {
            Ok(exported) => exported,
            Err(e) => {
                failed += 1;
                eprintln!("  {} {}: {:#}", "✗".red(), file.display(), e);
                continue;
            }
        };

        match output {
            Some(ref dir) => {
                let target = dir.join(exported.file_name());
                std::fs::write(&target, &exported.source)?;
                eprintln!(
                    "  {} {} -> {}",
                    "✓".green(),
                    file.display(),
                    target.display().to_string().cyan()
                );
            }
            None => print!("{}", exported.source),
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} project(s) failed to export", failed, files.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            path,
            base_url,
            config,
            output,
        } => {
            export(path, base_url, config, output).await?;
        }

        Commands::Commands => {
            let registry = CommandRegistry::new();
            println!("{} Supported steps:", "📋".to_string().blue());
            for name in registry.names() {
                println!("  {}", name.cyan());
            }
        }
    }

    Ok(())
}
