//! Per-token defaults as stored in the registry

use tinct_core::Color;

use super::value::ColorValue;
use crate::variant::ThemeVariant;

/// One value per theme variant
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantRecord {
    pub light: ColorValue,
    pub dark: ColorValue,
    pub hc_dark: ColorValue,
    pub hc_light: ColorValue,
}

impl VariantRecord {
    pub fn new(
        light: impl Into<ColorValue>,
        dark: impl Into<ColorValue>,
        hc_dark: impl Into<ColorValue>,
        hc_light: impl Into<ColorValue>,
    ) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
            hc_dark: hc_dark.into(),
            hc_light: hc_light.into(),
        }
    }

    /// Get the value for a variant
    pub fn get(&self, variant: ThemeVariant) -> &ColorValue {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
            ThemeVariant::HighContrastDark => &self.hc_dark,
            ThemeVariant::HighContrastLight => &self.hc_light,
        }
    }
}

/// What the registry stores for a token
#[derive(Clone, Debug, PartialEq)]
pub enum TokenDefault {
    /// Same value for every variant (may be [`ColorValue::Unset`])
    Uniform(ColorValue),
    /// A separate value for each variant
    PerVariant(VariantRecord),
}

impl TokenDefault {
    pub fn select(&self, variant: ThemeVariant) -> &ColorValue {
        match self {
            Self::Uniform(value) => value,
            Self::PerVariant(record) => record.get(variant),
        }
    }

    /// Registered with something other than a bare null.
    ///
    /// A per-variant record counts as defined even when every entry is unset.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Uniform(ColorValue::Unset))
    }
}

impl Default for TokenDefault {
    fn default() -> Self {
        Self::Uniform(ColorValue::Unset)
    }
}

impl From<ColorValue> for TokenDefault {
    fn from(value: ColorValue) -> Self {
        Self::Uniform(value)
    }
}

impl From<Color> for TokenDefault {
    fn from(color: Color) -> Self {
        Self::Uniform(ColorValue::Literal(color))
    }
}

impl From<VariantRecord> for TokenDefault {
    fn from(record: VariantRecord) -> Self {
        Self::PerVariant(record)
    }
}
