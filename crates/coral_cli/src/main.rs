use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coral_cli::config_loader::load_config_for_build;
use coral_cli::exec::{build_site, gallery_path};
use coral_cli::inspect::render_inspection;
use coral_cli::preview::{PreviewOpts, run_preview};
use coral_core::data::load_gallery;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "coral_cli", about = "Static album gallery builder.")]
struct Cli {
    #[arg(long = "source-dir", short = 's', global = true)]
    source_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render the gallery pages from coral.yaml.")]
    Build {
        #[arg(long, value_name = "PATH", default_value = "out")]
        out: PathBuf,
    },
    #[command(about = "Print the normalized albums as JSON.")]
    Inspect {
        #[arg(long, value_name = "N")]
        album: Option<usize>,
    },
    #[command(about = "Serve a built gallery over HTTP.")]
    Preview {
        #[arg(long, value_name = "PATH", default_value = "out")]
        out: PathBuf,
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long)]
        no_open: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coral_cli=info,coral_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Build { out } => run_build(&cli, out),
        Command::Inspect { album } => run_inspect(&cli, *album),
        Command::Preview {
            out,
            host,
            port,
            no_open,
        } => {
            let root = root_dir(&cli)?;
            run_preview(PreviewOpts {
                out_dir: resolve_against(&root, out),
                host: host.clone(),
                port: *port,
                no_open: *no_open,
            })
        }
    }
}

fn run_build(cli: &Cli, out: &Path) -> Result<()> {
    let root = root_dir(cli)?;
    let config = load_config_for_build(&root).context("failed to load coral.yaml")?;
    let out_dir = resolve_against(&root, out);
    let report = build_site(&root, &config, &out_dir)?;
    println!(
        "wrote {} pages for {} albums to {}",
        report.pages,
        report.albums,
        out_dir.display()
    );
    Ok(())
}

fn run_inspect(cli: &Cli, album: Option<usize>) -> Result<()> {
    let root = root_dir(cli)?;
    let config = load_config_for_build(&root).context("failed to load coral.yaml")?;
    let albums = load_gallery(&gallery_path(&root, &config));
    println!("{}", render_inspection(&albums, album)?);
    Ok(())
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn root_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.source_dir {
        Some(path) => {
            if path.is_absolute() {
                Ok(path.clone())
            } else {
                let cwd = std::env::current_dir().context("failed to read current directory")?;
                Ok(cwd.join(path))
            }
        }
        None => std::env::current_dir().context("failed to read current directory"),
    }
}
