//! Color values: literals, references and derived transforms

use tinct_core::Color;

use crate::error::{Result, ThemeError};

/// A token's stored or computed value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColorValue {
    /// Explicitly no color
    #[default]
    Unset,
    /// A concrete color
    Literal(Color),
    /// Whatever the named token resolves to, for the same variant
    Reference(String),
    /// A color derived from other values
    Transform(Box<ColorTransform>),
}

/// Derived color expressions.
///
/// Operands are arbitrary [`ColorValue`]s and are resolved before the
/// operator applies.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorTransform {
    /// Reduce HSL lightness by `factor`
    Darken { value: ColorValue, factor: f32 },
    /// Increase HSL lightness by `factor`
    Lighten { value: ColorValue, factor: f32 },
    /// Multiply alpha by `factor`
    Transparent { value: ColorValue, factor: f32 },
    /// Composite over `background`; unchanged when the background is unset
    Opaque {
        value: ColorValue,
        background: ColorValue,
    },
    /// First operand that resolves to a color
    OneOf(Vec<ColorValue>),
    /// Pull `value` toward `background` by `factor`, then scale alpha by
    /// `transparency`
    LessProminent {
        value: ColorValue,
        background: ColorValue,
        factor: f32,
        transparency: f32,
    },
    /// `then` when token `id` is registered with a non-null default,
    /// `otherwise` when it is not
    IfDefinedThenElse {
        id: String,
        then: ColorValue,
        otherwise: ColorValue,
    },
}

impl ColorValue {
    /// Classify a raw string: `#hex` becomes a literal, anything else a
    /// reference to another token. `id` is the token being defined and is
    /// only used for error reporting.
    pub fn parse(id: &str, raw: &str) -> Result<Self> {
        if raw.starts_with('#') {
            return Color::parse_hex(raw)
                .map(Self::Literal)
                .map_err(|source| ThemeError::InvalidColor {
                    id: id.to_string(),
                    value: raw.to_string(),
                    source,
                });
        }
        if raw.is_empty() {
            return Err(ThemeError::InvalidSeed {
                id: id.to_string(),
                reason: "empty token reference".to_string(),
            });
        }
        Ok(Self::Reference(raw.to_string()))
    }

    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }

    pub fn darken(value: impl Into<ColorValue>, factor: f32) -> Self {
        ColorTransform::Darken {
            value: value.into(),
            factor,
        }
        .into()
    }

    pub fn lighten(value: impl Into<ColorValue>, factor: f32) -> Self {
        ColorTransform::Lighten {
            value: value.into(),
            factor,
        }
        .into()
    }

    pub fn transparent(value: impl Into<ColorValue>, factor: f32) -> Self {
        ColorTransform::Transparent {
            value: value.into(),
            factor,
        }
        .into()
    }

    pub fn opaque(value: impl Into<ColorValue>, background: impl Into<ColorValue>) -> Self {
        ColorTransform::Opaque {
            value: value.into(),
            background: background.into(),
        }
        .into()
    }

    pub fn one_of(values: impl IntoIterator<Item = ColorValue>) -> Self {
        ColorTransform::OneOf(values.into_iter().collect()).into()
    }

    pub fn less_prominent(
        value: impl Into<ColorValue>,
        background: impl Into<ColorValue>,
        factor: f32,
        transparency: f32,
    ) -> Self {
        ColorTransform::LessProminent {
            value: value.into(),
            background: background.into(),
            factor,
            transparency,
        }
        .into()
    }

    pub fn if_defined_then_else(
        id: impl Into<String>,
        then: impl Into<ColorValue>,
        otherwise: impl Into<ColorValue>,
    ) -> Self {
        ColorTransform::IfDefinedThenElse {
            id: id.into(),
            then: then.into(),
            otherwise: otherwise.into(),
        }
        .into()
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        Self::Literal(color)
    }
}

impl From<ColorTransform> for ColorValue {
    fn from(transform: ColorTransform) -> Self {
        Self::Transform(Box::new(transform))
    }
}

impl From<Option<Color>> for ColorValue {
    fn from(color: Option<Color>) -> Self {
        color.map_or(Self::Unset, Self::Literal)
    }
}
