//! Tinct CLI - resolve declarative color themes
//!
//! ```text
//! tinct resolve --variant light --theme my-theme.json --token editor.background
//! tinct presets
//! tinct tokens --prefix button.
//! ```

mod source;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tinct_theme::{ResolvedTheme, ThemePreset, ThemeVariant};
use tracing_subscriber::EnvFilter;

use crate::source::Selection;

/// Resolve declarative color themes
#[derive(Parser, Debug)]
#[command(name = "tinct")]
#[command(about = "Resolve declarative color themes")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Seed table to use instead of the built-in VS Code palette
    #[arg(long, value_name = "FILE", global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve tokens and print the color map
    Resolve {
        /// light, dark, hcDark or hcLight
        #[arg(long)]
        variant: Option<ThemeVariant>,

        /// Theme file (VS Code JSON, or TOML with a .toml extension)
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        theme: Option<PathBuf>,

        /// Built-in preset applied when no theme is given
        #[arg(long, value_name = "ID")]
        preset: Option<ThemePreset>,

        /// Only print these tokens (repeatable)
        #[arg(long = "token", value_name = "ID")]
        tokens: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// List built-in presets
    Presets,

    /// List registered token ids
    Tokens {
        /// Only ids starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Resolve {
            variant,
            theme,
            preset,
            tokens,
            format,
        } => {
            let registry = source::load_registry(cli.seed.as_deref())?;
            let config = theme.as_deref().map(source::load_theme).transpose()?;
            let selection = Selection::new(config.as_ref(), preset, variant)?;

            let resolved = registry.resolve(&selection.overrides, selection.variant);
            let resolved = if tokens.is_empty() {
                resolved
            } else {
                for id in tokens.iter().filter(|id| !resolved.contains(id)) {
                    tracing::warn!(token = %id, "unknown token");
                }
                resolved.select(tokens.iter().map(String::as_str))
            };
            println!("{}", render(&resolved, format)?);
        }
        Command::Presets => {
            for preset in ThemePreset::all() {
                println!(
                    "{:<16} {:<16} {}",
                    preset.id(),
                    preset.display_name(),
                    preset.variant()
                );
            }
        }
        Command::Tokens { prefix } => {
            let registry = source::load_registry(cli.seed.as_deref())?;
            let prefix = prefix.as_deref().unwrap_or_default();
            for id in registry.ids().filter(|id| id.starts_with(prefix)) {
                println!("{id}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(theme: &ResolvedTheme, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            serde_json::to_string_pretty(theme).context("Failed to serialize theme as JSON")
        }
        Format::Toml => toml::to_string(theme).context("Failed to serialize theme as TOML"),
    }
}
