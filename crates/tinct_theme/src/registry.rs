//! Token registry and override merging
//!
//! The [`Registry`] owns the base token table and is immutable once built.
//! Per-resolution overrides are layered on top through a borrowed
//! [`MergedView`] instead of copying the base table.

use indexmap::IndexMap;
use tinct_core::Color;

use crate::error::{Result, ThemeError};
use crate::resolver::{ResolvedTheme, Resolver};
use crate::seed;
use crate::tokens::{ColorValue, TokenDefault};
use crate::variant::ThemeVariant;

/// Collects token registrations before freezing them into a [`Registry`]
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    tokens: IndexMap<String, TokenDefault>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a token.
    ///
    /// Re-registering an id replaces its default but keeps its original
    /// position in iteration order.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        default: impl Into<TokenDefault>,
    ) -> Result<&mut Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ThemeError::EmptyIdentifier);
        }
        self.tokens.insert(id, default.into());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn build(self) -> Registry {
        tracing::debug!(tokens = self.tokens.len(), "built color registry");
        Registry {
            tokens: self.tokens,
        }
    }
}

/// The base token table
#[derive(Clone, Debug, Default)]
pub struct Registry {
    tokens: IndexMap<String, TokenDefault>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Load the embedded VS Code base palette
    pub fn builtin() -> Result<Self> {
        seed::builtin()
    }

    /// Build a registry from a JSON seed table
    pub fn from_seed_json(json: &str) -> Result<Self> {
        seed::parse_seed(json)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tokens.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TokenDefault> {
        self.tokens.get(id)
    }

    /// Registered identifiers in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenDefault)> + '_ {
        self.tokens.iter().map(|(id, default)| (id.as_str(), default))
    }

    /// Layer `overrides` on top of the base table
    pub fn merge<'a>(&'a self, overrides: &'a Overrides) -> MergedView<'a> {
        MergedView::new(self, overrides)
    }

    /// Resolve every token for `variant` with `overrides` applied
    pub fn resolve(&self, overrides: &Overrides, variant: ThemeVariant) -> ResolvedTheme {
        Resolver::new(self.merge(overrides)).resolve_all(variant)
    }
}

/// Caller-supplied replacements for token defaults.
///
/// An override replaces the targeted default wholesale and applies to every
/// variant. Ids that the registry does not know are allowed and become
/// additional tokens in the merged view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    colors: IndexMap<String, ColorValue>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        value: impl Into<ColorValue>,
    ) -> Result<&mut Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ThemeError::EmptyIdentifier);
        }
        self.colors.insert(id, value.into());
        Ok(self)
    }

    /// Parse raw theme strings (`#hex` or a token id) into overrides
    pub fn from_strings<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::new();
        for (id, raw) in entries {
            let id = id.as_ref();
            let value = ColorValue::parse(id, raw.as_ref())?;
            overrides.insert(id, value)?;
        }
        Ok(overrides)
    }

    /// Built-in tables with known non-empty ids
    pub(crate) fn from_colors(entries: impl IntoIterator<Item = (&'static str, Color)>) -> Self {
        let colors = entries
            .into_iter()
            .map(|(id, color)| (id.to_string(), ColorValue::Literal(color)))
            .collect();
        Self { colors }
    }

    pub fn get(&self, id: &str) -> Option<&ColorValue> {
        self.colors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.colors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorValue)> + '_ {
        self.colors.iter().map(|(id, value)| (id.as_str(), value))
    }
}

/// A token's effective stored default inside a [`MergedView`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MergedEntry<'a> {
    /// Supplied by the caller, same for every variant
    Override(&'a ColorValue),
    /// Registered default
    Base(&'a TokenDefault),
}

impl<'a> MergedEntry<'a> {
    pub fn select(self, variant: ThemeVariant) -> &'a ColorValue {
        match self {
            Self::Override(value) => value,
            Self::Base(default) => default.select(variant),
        }
    }

    /// Stored with something other than a variant-independent unset
    pub fn is_defined(self) -> bool {
        match self {
            Self::Override(value) => !value.is_unset(),
            Self::Base(default) => default.is_defined(),
        }
    }
}

/// Overrides layered over a registry, looked up override-first.
///
/// Iteration yields the registry's ids in registration order followed by
/// override-only ids in insertion order.
#[derive(Clone, Copy, Debug)]
pub struct MergedView<'a> {
    base: &'a IndexMap<String, TokenDefault>,
    overrides: &'a IndexMap<String, ColorValue>,
}

impl<'a> MergedView<'a> {
    fn new(registry: &'a Registry, overrides: &'a Overrides) -> Self {
        for id in overrides.colors.keys() {
            if registry.tokens.contains_key(id) {
                tracing::trace!(token = %id, "override shadows registered default");
            }
        }
        Self {
            base: &registry.tokens,
            overrides: &overrides.colors,
        }
    }

    pub fn get(&self, id: &str) -> Option<MergedEntry<'a>> {
        self.lookup(id).map(|(_, entry)| entry)
    }

    /// Like [`get`](Self::get) but also hands back the stored key, which
    /// lives as long as the view itself.
    pub fn lookup(&self, id: &str) -> Option<(&'a str, MergedEntry<'a>)> {
        if let Some((key, value)) = self.overrides.get_key_value(id) {
            return Some((key.as_str(), MergedEntry::Override(value)));
        }
        self.base
            .get_key_value(id)
            .map(|(key, default)| (key.as_str(), MergedEntry::Base(default)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.overrides.contains_key(id) || self.base.contains_key(id)
    }

    /// Present with a stored default other than a uniform unset
    pub fn is_defined(&self, id: &str) -> bool {
        self.get(id).is_some_and(MergedEntry::is_defined)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (base, overrides) = (self.base, self.overrides);
        base.keys().map(String::as_str).chain(
            overrides
                .keys()
                .filter(move |id| !base.contains_key(id.as_str()))
                .map(String::as_str),
        )
    }

    pub fn len(&self) -> usize {
        let extra = self
            .overrides
            .keys()
            .filter(|id| !self.base.contains_key(id.as_str()))
            .count();
        self.base.len() + extra
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.overrides.is_empty()
    }
}
