//! Tinct Core
//!
//! The color primitive underneath the Tinct theme engine:
//!
//! - **Color**: immutable RGBA value with `#hex` parsing and canonical
//!   serialization
//! - **Arithmetic**: darken/lighten in HSL lightness, alpha scaling,
//!   compositing over an opaque background, luminance comparison and
//!   interpolation toward another color
//!
//! # Example
//!
//! ```rust
//! use tinct_core::Color;
//!
//! let fg: Color = "#CCCCCC".parse().unwrap();
//! let muted = fg.transparent(0.7);
//! assert_eq!(muted.to_hex(), "#ccccccb3");
//!
//! let hover = Color::from_hex(0x0E639C).lighten(0.2);
//! assert!(hover.is_lighter_than(&Color::from_hex(0x0E639C)));
//! ```

pub mod color;
pub mod hsl;

pub use color::{Color, ParseColorError};
pub use hsl::Hsla;
