// File: crates/yaml-plot/src/main.rs
// Summary: `plot_yaml` CLI: argument parsing, tracing setup, exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chart_core::{theme, RenderOptions};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yaml_plot::output::{self, OutputTarget};
use yaml_plot::PlotError;

#[derive(Parser, Debug)]
#[command(name = "plot_yaml", version, about = "Line charts from a CSV file, declared in a YAML config")]
struct Cli {
    /// Path to the YAML config, relative to the current directory
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for `<title>.html` files; `.`, `current` or an empty value mean the
    /// config's directory. Without it the charts open in a window.
    #[arg(short, long)]
    output: Option<String>,

    /// Color theme
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Image width in pixels
    #[arg(long, default_value_t = chart_core::types::WIDTH)]
    width: i32,

    /// Image height in pixels
    #[arg(long, default_value_t = chart_core::types::HEIGHT)]
    height: i32,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing() {
        eprintln!("    WARN| {e:#}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("    ERROR| {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = cli.input.ok_or(PlotError::MissingInput)?;

    let theme = theme::find(&cli.theme)
        .with_context(|| format!("unknown theme \"{}\" (available: {})", cli.theme, theme::names().join(", ")))?;
    anyhow::ensure!(cli.width > 0 && cli.height > 0, "width and height must be positive");
    let opts = RenderOptions { width: cli.width, height: cli.height, theme, ..RenderOptions::default() };

    let (config, specs) = yaml_plot::prepare(&input)?;

    match OutputTarget::from_arg(cli.output.as_deref(), &config.config_dir) {
        OutputTarget::Directory(dir) => {
            let written = output::write_html_files(&specs, &dir, &opts)
                .with_context(|| format!("rendering charts into {}", dir.display()))?;
            info!(count = written.len(), dir = %dir.display(), "done");
        }
        OutputTarget::Interactive => output::show(&specs, &opts)?,
    }
    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr, `RUST_LOG` overrides the default level.
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yaml_plot=info,plot_yaml=info,chart_window=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    Ok(())
}
