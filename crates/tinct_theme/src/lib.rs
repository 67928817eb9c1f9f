//! Tinct Theme Engine
//!
//! Declarative color-theme resolution in the style of the VS Code color
//! registry.
//!
//! # Overview
//!
//! - **Tokens**: namespaced color slots (`editor.background`,
//!   `button.hoverBackground`) whose defaults are literals, references to
//!   other tokens, or derived transforms
//! - **Registry**: the base token table, built once from seed data
//! - **Overrides**: a partial theme layered over the registry per call
//! - **Resolver**: turns registry + overrides + variant into a flat map of
//!   colors
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_theme::{Overrides, Registry, ThemeVariant};
//!
//! let registry = Registry::builtin()?;
//! let overrides = Overrides::from_strings([("foreground", "#CCCCCC")])?;
//!
//! let theme = registry.resolve(&overrides, ThemeVariant::Dark);
//! assert_eq!(theme.hex("descriptionForeground").as_deref(), Some("#ccccccb3"));
//! # Ok::<(), tinct_theme::ThemeError>(())
//! ```
//!
//! # Variants
//!
//! A token may carry one value per [`ThemeVariant`]. References and transform
//! operands always resolve for the same variant as the token that uses them.
//!
//! # Failure
//!
//! Loading seed data or theme files reports [`ThemeError`]. Resolution never
//! fails: unknown references, undefined operands and reference cycles all
//! resolve to `None`.

pub mod config;
pub mod error;
pub mod presets;
pub mod registry;
pub mod resolver;
pub mod seed;
pub mod tokens;
pub mod variant;

// Re-export commonly used types
pub use config::ThemeConfig;
pub use error::{Result, ThemeError};
pub use presets::ThemePreset;
pub use registry::{MergedEntry, MergedView, Overrides, Registry, RegistryBuilder};
pub use resolver::{ResolvedTheme, Resolver};
pub use tokens::{ColorTransform, ColorValue, TokenDefault, VariantRecord};
pub use variant::ThemeVariant;

pub use tinct_core::Color;
