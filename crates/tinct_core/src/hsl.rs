//! HSL conversion used by lightness arithmetic

use crate::color::{channel, Color};

/// Hue in degrees `[0, 360)`, saturation/lightness/alpha in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub fn from_color(color: Color) -> Self {
        let r = color.r() as f32 / 255.0;
        let g = color.g() as f32 / 255.0;
        let b = color.b() as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let chroma = max - min;

        let (mut h, mut s) = (0.0, 0.0);
        if chroma > 0.0 {
            s = if l <= 0.5 {
                chroma / (2.0 * l)
            } else {
                chroma / (2.0 - 2.0 * l)
            }
            .min(1.0);

            h = if max == r {
                (g - b) / chroma + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / chroma + 2.0
            } else {
                (r - g) / chroma + 4.0
            };
            h *= 60.0;
        }

        Self {
            h,
            s,
            l,
            a: color.a(),
        }
    }

    pub fn to_color(self) -> Color {
        let h = self.h / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Color::rgba(
            channel(r * 255.0),
            channel(g * 255.0),
            channel(b * 255.0),
            self.a,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
