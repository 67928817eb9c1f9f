//! Theme variants

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The four theme modes a token can resolve for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeVariant {
    #[serde(rename = "light")]
    Light,
    #[default]
    #[serde(rename = "dark")]
    Dark,
    #[serde(
        rename = "hcDark",
        alias = "hc-dark",
        alias = "hc-black",
        alias = "high-contrast-dark"
    )]
    HighContrastDark,
    #[serde(
        rename = "hcLight",
        alias = "hc-light",
        alias = "high-contrast-light"
    )]
    HighContrastLight,
}

impl ThemeVariant {
    /// Stable id, matching the keys of a per-variant seed record
    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrastDark => "hcDark",
            Self::HighContrastLight => "hcLight",
        }
    }

    pub fn all() -> &'static [ThemeVariant] {
        const VARIANTS: [ThemeVariant; 4] = [
            ThemeVariant::Light,
            ThemeVariant::Dark,
            ThemeVariant::HighContrastDark,
            ThemeVariant::HighContrastLight,
        ];
        &VARIANTS
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark | Self::HighContrastDark)
    }

    pub fn is_high_contrast(self) -> bool {
        matches!(self, Self::HighContrastDark | Self::HighContrastLight)
    }
}

impl Display for ThemeVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ThemeVariant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "hcDark" | "hc-dark" | "hc-black" | "high-contrast-dark" => Ok(Self::HighContrastDark),
            "hcLight" | "hc-light" | "high-contrast-light" => Ok(Self::HighContrastLight),
            other => Err(ThemeError::UnknownVariant(other.to_string())),
        }
    }
}
