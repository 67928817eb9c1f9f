//! Color token model
//!
//! A token is a named, themeable color slot such as `editor.background`.
//! Its registered default is either one value for every variant or one value
//! per variant, and each value is a literal, a reference to another token, a
//! derived transform, or explicitly unset.

mod default;
mod value;

pub use default::*;
pub use value::*;
