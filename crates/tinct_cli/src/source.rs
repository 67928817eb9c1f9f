//! Where the registry, overrides and variant come from

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tinct_theme::{Overrides, Registry, ThemeConfig, ThemePreset, ThemeVariant};

/// Load a seed file, or the built-in palette when none is given
pub fn load_registry(seed: Option<&Path>) -> Result<Registry> {
    let Some(path) = seed else {
        return Registry::builtin().context("Failed to load built-in seed");
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    Registry::from_seed_json(&json)
        .with_context(|| format!("Invalid seed file {}", path.display()))
}

/// Load a theme file; `.toml` is read as TOML, anything else as VS Code JSON
pub fn load_theme(path: &Path) -> Result<ThemeConfig> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let config = if is_toml(path) {
        ThemeConfig::from_toml_str(&src)
    } else {
        ThemeConfig::from_json_str(&src)
    };
    config.with_context(|| format!("Invalid theme file {}", path.display()))
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Overrides and variant for one resolution
#[derive(Debug)]
pub struct Selection {
    pub overrides: Overrides,
    pub variant: ThemeVariant,
}

impl Selection {
    /// A theme replaces the preset entirely; without either the default
    /// dark preset applies. An explicit variant wins over both.
    pub fn new(
        theme: Option<&ThemeConfig>,
        preset: Option<ThemePreset>,
        variant: Option<ThemeVariant>,
    ) -> Result<Self> {
        let (overrides, default_variant) = match theme {
            Some(config) => (
                config.overrides().context("Invalid theme colors")?,
                config.variant,
            ),
            None => {
                let preset = preset.unwrap_or_default();
                tracing::debug!(preset = preset.id(), "using preset overrides");
                (preset.overrides(), preset.variant())
            }
        };
        Ok(Self {
            overrides,
            variant: variant.unwrap_or(default_variant),
        })
    }
}
