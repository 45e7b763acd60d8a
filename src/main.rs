//! topdeck - Markdown slide decks in the terminal.
//!
//! # Usage
//!
//! ```bash
//! topdeck talk.md
//! topdeck --theme light talk.md
//! topdeck --code-theme InspiredGitHub --log-file topdeck.log talk.md
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use topdeck::app::App;
use topdeck::config::{
    ConfigFlags, ThemeMode, global_config_path, load_config_flags, local_override_path,
};
use topdeck::highlight::Background;
use topdeck::render::{MarkdownRenderer, SlideRenderer};
use topdeck::ui::style::Theme;

/// Present a markdown file as slides in the terminal
#[derive(Parser, Debug)]
#[command(name = "topdeck", version, about, long_about = None)]
struct Cli {
    /// Markdown presentation to show
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Terminal background to style for
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Syntax highlighting theme for code blocks
    #[arg(long, value_name = "NAME")]
    code_theme: Option<String>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("topdeck=debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn build_renderer(
    background: Background,
    code_theme: Option<&str>,
) -> Option<Box<dyn SlideRenderer>> {
    match MarkdownRenderer::new(background, code_theme) {
        Ok(renderer) => Some(Box::new(renderer)),
        Err(err) => {
            tracing::warn!(%err, "markdown rendering unavailable, showing raw slides");
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_flags =
        load_config_flags(&global_config_path())?.union(&load_config_flags(&local_override_path())?);
    let cli_flags = ConfigFlags {
        theme: cli.theme,
        code_theme: cli.code_theme.clone(),
        log_file: cli.log_file.clone(),
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, file = %cli.file.display(), "starting");

    let document = topdeck::document::load(&cli.file)?;

    let background = effective.theme.unwrap_or_default().background();
    let renderer = build_renderer(background, effective.code_theme.as_deref());

    let mut app = App::new(document)
        .with_theme(Theme::for_background(background))
        .with_renderer(renderer);

    app.run().context("Application error")
}
