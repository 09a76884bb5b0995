mod commands;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dockhand",
    about = "Format, package, publish, and version a Node service as a docker image"
)]
#[command(version)]
struct Cli {
    /// Project directory: build context root and location of dockhand.toml
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Manifest path relative to the project directory [default: package.json]
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Print commands instead of running them; the manifest is not rewritten
    #[arg(long)]
    dry_run: bool,
    /// Tasks to run in order: help, format, package, publish[:tag]..., bump[:major|minor]
    tasks: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    commands::run_tasks(&cli.dir, cli.manifest.as_deref(), cli.dry_run, &cli.tasks).await?;

    Ok(())
}
