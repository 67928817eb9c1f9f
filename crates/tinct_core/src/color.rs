//! RGBA color value and arithmetic

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::hsl::Hsla;

/// Error returned when a `#hex` color literal cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),

    #[error("color `{input}` has {len} hex digits (expected 3, 4, 6 or 8)")]
    InvalidLength { input: String, len: usize },

    #[error("color `{input}` contains invalid hex digit `{digit}`")]
    InvalidDigit { input: String, digit: char },
}

/// Immutable RGBA color
///
/// Channels are 8-bit integers, alpha is a real number in `[0, 1]` kept at
/// three decimal places so that equality is stable across arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: round_alpha(a),
        }
    }

    /// Create from u8 components, alpha included (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r, g, b, a as f32 / 255.0)
    }

    /// Create from an opaque hex value (0xRRGGBB)
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse a `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` literal
    pub fn parse_hex(input: &str) -> Result<Self, ParseColorError> {
        let Some(digits) = input.strip_prefix('#') else {
            return Err(ParseColorError::MissingHash(input.to_string()));
        };

        let mut nibbles = Vec::with_capacity(8);
        for ch in digits.chars() {
            match ch.to_digit(16) {
                Some(n) => nibbles.push(n as u8),
                None => {
                    return Err(ParseColorError::InvalidDigit {
                        input: input.to_string(),
                        digit: ch,
                    });
                }
            }
        }

        let byte = |hi: u8, lo: u8| (hi << 4) | lo;
        match nibbles.as_slice() {
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Ok(Self::from_rgba8(r * 17, g * 17, b * 17, a * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::rgb(
                byte(*r1, *r0),
                byte(*g1, *g0),
                byte(*b1, *b0),
            )),
            [r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Self::from_rgba8(
                byte(*r1, *r0),
                byte(*g1, *g0),
                byte(*b1, *b0),
                byte(*a1, *a0),
            )),
            other => Err(ParseColorError::InvalidLength {
                input: input.to_string(),
                len: other.len(),
            }),
        }
    }

    pub const fn r(&self) -> u8 {
        self.r
    }

    pub const fn g(&self) -> u8 {
        self.g
    }

    pub const fn b(&self) -> u8 {
        self.b
    }

    pub const fn a(&self) -> f32 {
        self.a
    }

    /// Alpha as a byte, rounded half up (`0.5 -> 0x80`, `0.7 -> 0xB3`)
    pub fn alpha_u8(&self) -> u8 {
        // Thousandths keep the rounding exact for every stored alpha.
        let milli = (self.a * 1000.0).round() as u32;
        ((milli * 255 + 500) / 1000) as u8
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: round_alpha(alpha),
            ..self
        }
    }

    /// Multiply alpha by `factor`
    pub fn transparent(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Reduce HSL lightness by `lightness * factor`
    pub fn darken(self, factor: f32) -> Self {
        if factor == 0.0 {
            return self;
        }
        let hsla = Hsla::from_color(self);
        Hsla {
            l: hsla.l - hsla.l * factor,
            ..hsla
        }
        .to_color()
    }

    /// Increase HSL lightness by `lightness * factor`
    pub fn lighten(self, factor: f32) -> Self {
        if factor == 0.0 {
            return self;
        }
        let hsla = Hsla::from_color(self);
        Hsla {
            l: hsla.l + hsla.l * factor,
            ..hsla
        }
        .to_color()
    }

    /// Composite this translucent color over an opaque background.
    ///
    /// Returns `self` unchanged when it is already opaque or when the
    /// background is itself translucent.
    pub fn make_opaque(self, background: Color) -> Self {
        if self.is_opaque() || !background.is_opaque() {
            return self;
        }
        let a = self.a;
        let over = |fg: u8, bg: u8| {
            let bg = bg as f32;
            channel(bg - a * (bg - fg as f32))
        };
        Self::rgb(
            over(self.r, background.r),
            over(self.g, background.g),
            over(self.b, background.b),
        )
    }

    /// WCAG relative luminance, rounded to four decimals
    pub fn relative_luminance(&self) -> f64 {
        fn linear(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let lum = 0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b);
        (lum * 10_000.0).round() / 10_000.0
    }

    /// WCAG contrast ratio in `[1, 21]`
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let l1 = self.relative_luminance();
        let l2 = other.relative_luminance();
        let ratio = if l1 > l2 {
            (l1 + 0.05) / (l2 + 0.05)
        } else {
            (l2 + 0.05) / (l1 + 0.05)
        };
        (ratio * 100.0).round() / 100.0
    }

    pub fn is_darker_than(&self, other: &Color) -> bool {
        self.relative_luminance() < other.relative_luminance()
    }

    pub fn is_lighter_than(&self, other: &Color) -> bool {
        self.relative_luminance() > other.relative_luminance()
    }

    /// Linear interpolation between two colors, alpha included
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            mix(from.r, to.r, t),
            mix(from.g, to.g, t),
            mix(from.b, to.b, t),
            from.a + (to.a - from.a) * t,
        )
    }

    /// Move `from` toward a lighter `to` by `factor`.
    ///
    /// `from` is returned as is when it is already lighter than `to`.
    pub fn lighter_toward(from: &Self, to: &Self, factor: f32) -> Self {
        if from.is_lighter_than(to) {
            return *from;
        }
        from.mix_rgb(to, factor)
    }

    /// Move `from` toward a darker `to` by `factor`.
    ///
    /// `from` is returned as is when it is already darker than `to`.
    pub fn darker_toward(from: &Self, to: &Self, factor: f32) -> Self {
        if from.is_darker_than(to) {
            return *from;
        }
        from.mix_rgb(to, factor)
    }

    fn mix_rgb(&self, to: &Self, factor: f32) -> Self {
        let t = factor.clamp(0.0, 1.0);
        Self {
            r: mix(self.r, to.r, t),
            g: mix(self.g, to.g, t),
            b: mix(self.b, to.b, t),
            a: self.a,
        }
    }

    /// Canonical lowercase hex: `#rrggbb` when opaque, `#rrggbbaa` otherwise
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.alpha_u8())?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

pub(crate) fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn mix(from: u8, to: u8, t: f32) -> u8 {
    channel(from as f32 + (to as f32 - from as f32) * t)
}

fn round_alpha(a: f32) -> f32 {
    if a.is_nan() {
        return 0.0;
    }
    (a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}
