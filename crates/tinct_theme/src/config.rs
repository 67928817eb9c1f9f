//! Theme configuration files
//!
//! A theme file picks a variant and overrides token colors. Two formats are
//! read:
//!
//! ```toml
//! type = "dark"
//!
//! [colors]
//! "editor.background" = "#1E1E1E"
//! "button.background" = "focusBorder"
//! ```
//!
//! and VS Code color theme JSON (`{"type": "dark", "colors": {...}}`), where
//! any other top-level keys such as `tokenColors` are ignored. A `null` color
//! in JSON clears the token.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{Overrides, Registry};
use crate::resolver::ResolvedTheme;
use crate::tokens::ColorValue;
use crate::variant::ThemeVariant;

/// A user theme: variant plus color overrides
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Display name, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variant to resolve for; defaults to dark
    #[serde(default, rename = "type", alias = "variant")]
    pub variant: ThemeVariant,
    /// Token id to `#hex` literal or token reference
    #[serde(default)]
    pub colors: IndexMap<String, Option<String>>,
}

impl ThemeConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        tracing::debug!(
            variant = %config.variant,
            colors = config.colors.len(),
            "loaded TOML theme"
        );
        Ok(config)
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(src)?;
        tracing::debug!(
            variant = %config.variant,
            colors = config.colors.len(),
            "loaded JSON theme"
        );
        Ok(config)
    }

    /// Parse the color table into overrides
    pub fn overrides(&self) -> Result<Overrides> {
        let mut overrides = Overrides::new();
        for (id, raw) in &self.colors {
            let value = match raw {
                Some(raw) => ColorValue::parse(id, raw)?,
                None => ColorValue::Unset,
            };
            overrides.insert(id.as_str(), value)?;
        }
        Ok(overrides)
    }

    /// Resolve `registry` with this theme applied
    pub fn resolve(&self, registry: &Registry) -> Result<ResolvedTheme> {
        Ok(registry.resolve(&self.overrides()?, self.variant))
    }
}
