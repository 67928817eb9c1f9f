//! Per-variant token resolution
//!
//! Resolution follows references and evaluates transforms recursively. It
//! never fails: an unknown reference, an undefined operand or a reference
//! cycle degrades to `None` for the affected token.
//!
//! Each call runs a fresh [`Pass`] holding the visiting stack and a memo of
//! finished tokens. A memoized result is reused only on stacks where it would
//! come out the same, so a token's output never depends on resolution order.
//! Nothing is cached across calls or variants.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Serialize, Serializer};
use tinct_core::Color;

use crate::registry::MergedView;
use crate::tokens::{ColorTransform, ColorValue};
use crate::variant::ThemeVariant;

/// Resolves tokens of a [`MergedView`]
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    view: MergedView<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(view: MergedView<'a>) -> Self {
        Self { view }
    }

    /// Resolve a single token
    pub fn resolve_token(&self, id: &str, variant: ThemeVariant) -> Option<Color> {
        Pass::new(self.view, variant).resolve_id(id).color
    }

    /// Resolve every token of the view, in view order
    pub fn resolve_all(&self, variant: ThemeVariant) -> ResolvedTheme {
        let mut pass = Pass::new(self.view, variant);
        let mut colors = IndexMap::with_capacity(self.view.len());
        for id in self.view.ids() {
            let color = pass.resolve_id(id).color;
            colors.insert(id.to_string(), color);
        }

        let unset = colors.values().filter(|color| color.is_none()).count();
        tracing::debug!(
            variant = %variant,
            tokens = colors.len(),
            unset,
            cycles = pass.cycles,
            "resolved color theme"
        );

        ResolvedTheme { variant, colors }
    }
}

/// Result of resolving one value.
///
/// A cycle cut makes a result depend on the visiting stack. `cuts` holds the
/// stack tokens below the current one that a cut hit, and `open` the tokens
/// reached whose own results carried such cuts. A stored outcome replays
/// unchanged on any stack that still holds every cut token and none of the
/// open ones.
#[derive(Clone, Debug, Default)]
struct Outcome<'a> {
    color: Option<Color>,
    cuts: FxHashSet<&'a str>,
    open: FxHashSet<&'a str>,
}

impl<'a> Outcome<'a> {
    fn done(color: Option<Color>) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    fn cut(id: &'a str) -> Self {
        let mut outcome = Self::default();
        outcome.cuts.insert(id);
        outcome
    }

    fn map(mut self, f: impl FnOnce(Color) -> Color) -> Self {
        self.color = self.color.map(f);
        self
    }

    /// Take over the stack dependencies of another operand, keeping our color
    fn absorb(&mut self, other: Outcome<'a>) {
        self.cuts.extend(other.cuts);
        self.open.extend(other.open);
    }
}

/// State of one resolution call
struct Pass<'a> {
    view: MergedView<'a>,
    variant: ThemeVariant,
    visiting: IndexSet<&'a str>,
    memo: FxHashMap<&'a str, Vec<Outcome<'a>>>,
    cycles: usize,
}

impl<'a> Pass<'a> {
    fn new(view: MergedView<'a>, variant: ThemeVariant) -> Self {
        Self {
            view,
            variant,
            visiting: IndexSet::new(),
            memo: FxHashMap::default(),
            cycles: 0,
        }
    }

    fn resolve_id(&mut self, id: &str) -> Outcome<'a> {
        let Some((key, entry)) = self.view.lookup(id) else {
            return Outcome::done(None);
        };
        if let Some(depth) = self.visiting.get_index_of(key) {
            self.cycles += 1;
            tracing::trace!(token = key, depth, "reference cycle cut");
            return Outcome::cut(key);
        }
        if let Some(seen) = self
            .memo
            .get(key)
            .and_then(|seen| seen.iter().find(|outcome| self.replays(outcome)))
        {
            return seen.clone();
        }

        self.visiting.insert(key);
        let mut outcome = self.resolve_value(entry.select(self.variant));
        self.visiting.pop();

        // Cuts against tokens pushed while resolving this one are settled.
        outcome.cuts.retain(|cut| self.visiting.contains(cut));
        if !outcome.cuts.is_empty() {
            outcome.open.insert(key);
        }
        self.memo.entry(key).or_default().push(outcome.clone());
        outcome
    }

    fn replays(&self, outcome: &Outcome<'a>) -> bool {
        outcome.cuts.iter().all(|id| self.visiting.contains(id))
            && !outcome.open.iter().any(|id| self.visiting.contains(id))
    }

    fn resolve_value(&mut self, value: &'a ColorValue) -> Outcome<'a> {
        match value {
            ColorValue::Unset => Outcome::done(None),
            ColorValue::Literal(color) => Outcome::done(Some(*color)),
            ColorValue::Reference(id) => self.resolve_id(id),
            ColorValue::Transform(transform) => self.resolve_transform(transform),
        }
    }

    fn resolve_transform(&mut self, transform: &'a ColorTransform) -> Outcome<'a> {
        match transform {
            ColorTransform::Darken { value, factor } => {
                self.resolve_value(value).map(|c| c.darken(*factor))
            }
            ColorTransform::Lighten { value, factor } => {
                self.resolve_value(value).map(|c| c.lighten(*factor))
            }
            ColorTransform::Transparent { value, factor } => {
                self.resolve_value(value).map(|c| c.transparent(*factor))
            }
            ColorTransform::Opaque { value, background } => {
                let mut fg = self.resolve_value(value);
                let Some(color) = fg.color else {
                    return fg;
                };
                let bg = self.resolve_value(background);
                fg.color = Some(match bg.color {
                    Some(bg) => color.make_opaque(bg),
                    None => color,
                });
                fg.absorb(bg);
                fg
            }
            ColorTransform::OneOf(candidates) => {
                let mut first = Outcome::default();
                for candidate in candidates {
                    let outcome = self.resolve_value(candidate);
                    let color = outcome.color;
                    first.absorb(outcome);
                    if color.is_some() {
                        first.color = color;
                        break;
                    }
                }
                first
            }
            ColorTransform::LessProminent {
                value,
                background,
                factor,
                transparency,
            } => {
                let mut fg = self.resolve_value(value);
                let Some(from) = fg.color else {
                    return fg;
                };
                let bg = self.resolve_value(background);
                fg.color = Some(match bg.color {
                    None => from.transparent(factor * transparency),
                    Some(bg) if from.is_darker_than(&bg) => {
                        Color::lighter_toward(&from, &bg, *factor).transparent(*transparency)
                    }
                    Some(bg) => {
                        Color::darker_toward(&from, &bg, *factor).transparent(*transparency)
                    }
                });
                fg.absorb(bg);
                fg
            }
            ColorTransform::IfDefinedThenElse {
                id,
                then,
                otherwise,
            } => {
                if self.view.is_defined(id) {
                    self.resolve_value(then)
                } else {
                    self.resolve_value(otherwise)
                }
            }
        }
    }
}

/// Flat output of a resolution call: every token of the merged view mapped
/// to its color, or `None` when it resolved to nothing
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTheme {
    variant: ThemeVariant,
    colors: IndexMap<String, Option<Color>>,
}

impl ResolvedTheme {
    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    /// `None` both for unknown ids and for tokens that resolved to nothing;
    /// use [`contains`](Self::contains) to tell them apart.
    pub fn get(&self, id: &str) -> Option<Color> {
        self.colors.get(id).copied().flatten()
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

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<Color>)> + '_ {
        self.colors.iter().map(|(id, color)| (id.as_str(), *color))
    }

    /// The token's color, or transparent black when it has none
    pub fn color_or_transparent(&self, id: &str) -> Color {
        self.get(id).unwrap_or(Color::TRANSPARENT)
    }

    pub fn hex(&self, id: &str) -> Option<String> {
        self.get(id).map(|color| color.to_hex())
    }

    /// Hex of [`color_or_transparent`](Self::color_or_transparent)
    pub fn hex_or_transparent(&self, id: &str) -> String {
        self.color_or_transparent(id).to_hex()
    }

    /// Hex strings of the tokens that resolved to a color
    pub fn to_hex_map(&self) -> IndexMap<String, String> {
        self.colors
            .iter()
            .filter_map(|(id, color)| color.map(|c| (id.clone(), c.to_hex())))
            .collect()
    }

    /// Keep only the given ids, in the given order. Unknown ids are dropped.
    pub fn select<'s>(&self, ids: impl IntoIterator<Item = &'s str>) -> Self {
        let colors = ids
            .into_iter()
            .filter_map(|id| {
                self.colors
                    .get_key_value(id)
                    .map(|(id, color)| (id.clone(), *color))
            })
            .collect();
        Self {
            variant: self.variant,
            colors,
        }
    }
}

/// Serialized as a map of token id to hex string, `null` when unset
impl Serialize for ResolvedTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.colors
                .iter()
                .map(|(id, color)| (id, color.map(|c| c.to_hex()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Overrides, Registry, RegistryBuilder};
    use crate::tokens::VariantRecord;

    fn build(f: impl FnOnce(&mut RegistryBuilder)) -> Registry {
        let mut builder = Registry::builder();
        f(&mut builder);
        builder.build()
    }

    fn resolve_one(registry: &Registry, id: &str, variant: ThemeVariant) -> Option<Color> {
        let overrides = Overrides::new();
        Resolver::new(registry.merge(&overrides)).resolve_token(id, variant)
    }

    #[test]
    fn cycles_resolve_to_none() {
        let registry = build(|b| {
            b.register("a", ColorValue::reference("b")).unwrap();
            b.register("b", ColorValue::reference("a")).unwrap();
            b.register("self", ColorValue::darken(ColorValue::reference("self"), 0.1))
                .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.get("a"), None);
        assert_eq!(theme.get("b"), None);
        assert_eq!(theme.get("self"), None);
        assert!(theme.contains("a"));
    }

    #[test]
    fn cycle_cut_does_not_leak_into_memo() {
        // Each token falls back to its own literal only when the other one
        // cuts back to it; neither may depend on which is resolved first.
        let registry = build(|b| {
            b.register("a", ColorValue::one_of([ColorValue::reference("b"), Color::RED.into()]))
                .unwrap();
            b.register(
                "b",
                ColorValue::one_of([ColorValue::reference("a"), Color::BLUE.into()]),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);

        // a: b -> (a is cut) -> BLUE. b: a -> (b is cut) -> RED.
        assert_eq!(theme.get("a"), Some(Color::BLUE));
        assert_eq!(theme.get("b"), Some(Color::RED));
        assert_eq!(
            resolve_one(&registry, "b", ThemeVariant::Dark),
            Some(Color::RED)
        );
        assert_eq!(
            resolve_one(&registry, "a", ThemeVariant::Dark),
            Some(Color::BLUE)
        );
    }

    #[test]
    fn diamond_shares_work() {
        let registry = build(|b| {
            b.register("root", Color::from_hex(0x808080)).unwrap();
            b.register("left", ColorValue::darken(ColorValue::reference("root"), 0.5))
                .unwrap();
            b.register("right", ColorValue::reference("root")).unwrap();
            b.register(
                "top",
                ColorValue::opaque(
                    ColorValue::transparent(ColorValue::reference("right"), 0.5),
                    ColorValue::reference("left"),
                ),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Light);
        let left = Color::from_hex(0x808080).darken(0.5);
        let expected = Color::from_hex(0x808080).transparent(0.5).make_opaque(left);
        assert_eq!(theme.get("top"), Some(expected));
    }

    const LAYERS: usize = 40;

    /// `a{i}` and `b{i}` both combine `a{i+1}` with `b{i+1}`, so the number of
    /// paths doubles with every layer. Only a working memo finishes.
    fn layered_diamond(
        b: &mut RegistryBuilder,
        link: impl Fn(ColorValue, ColorValue) -> ColorValue,
        a_last: ColorValue,
        b_last: ColorValue,
    ) {
        for i in 0..LAYERS {
            let next = link(
                ColorValue::reference(format!("a{}", i + 1)),
                ColorValue::reference(format!("b{}", i + 1)),
            );
            b.register(format!("a{i}"), next.clone()).unwrap();
            b.register(format!("b{i}"), next).unwrap();
        }
        b.register(format!("a{LAYERS}"), a_last).unwrap();
        b.register(format!("b{LAYERS}"), b_last).unwrap();
    }

    #[test]
    fn deep_diamond_resolves_each_token_once() {
        let registry = build(|b| {
            layered_diamond(
                b,
                |x, y| ColorValue::opaque(x, y),
                Color::RED.into(),
                Color::BLUE.into(),
            )
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.len(), 2 * LAYERS + 2);
        assert_eq!(theme.get("a0"), Some(Color::RED));
        assert_eq!(theme.get("b0"), Some(Color::RED));
        assert_eq!(theme.get(&format!("b{LAYERS}")), Some(Color::BLUE));
    }

    #[test]
    fn deep_diamond_over_self_reference() {
        let registry = build(|b| {
            layered_diamond(
                b,
                |x, y| ColorValue::one_of([x, y]),
                ColorValue::reference(format!("a{LAYERS}")),
                ColorValue::darken(ColorValue::reference(format!("b{LAYERS}")), 0.1),
            )
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert!(theme.iter().all(|(_, color)| color.is_none()));
        assert_eq!(resolve_one(&registry, "a0", ThemeVariant::Dark), None);
    }

    #[test]
    fn deep_diamond_cycling_back_to_the_top() {
        let registry = build(|b| {
            layered_diamond(
                b,
                |x, y| ColorValue::one_of([x, y]),
                ColorValue::reference("a0"),
                ColorValue::reference("a0"),
            )
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.len(), 2 * LAYERS + 2);
        assert!(theme.iter().all(|(_, color)| color.is_none()));
        assert_eq!(resolve_one(&registry, "b7", ThemeVariant::Dark), None);
    }

    #[test]
    fn deep_diamond_over_mutual_fallbacks() {
        // Resolved from outside, t ends on BLUE (u cuts back to t) and u on RED. The
        // memo entry for t must not be reused when u is the root.
        let registry = build(|b| {
            b.register("t", ColorValue::one_of([ColorValue::reference("u"), Color::RED.into()]))
                .unwrap();
            b.register(
                "u",
                ColorValue::one_of([ColorValue::reference("t"), Color::BLUE.into()]),
            )
            .unwrap();
            layered_diamond(
                b,
                |x, y| ColorValue::opaque(x, y),
                ColorValue::reference("t"),
                ColorValue::reference("u"),
            );
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.get("t"), Some(Color::BLUE));
        assert_eq!(theme.get("u"), Some(Color::RED));
        assert_eq!(theme.get("a0"), Some(Color::BLUE));
        assert_eq!(theme.get("b0"), Some(Color::BLUE));
        assert_eq!(
            resolve_one(&registry, "u", ThemeVariant::Dark),
            Some(Color::RED)
        );
    }

    #[test]
    fn transform_literals() {
        let registry = build(|b| {
            b.register("half", ColorValue::transparent(Color::RED, 0.5))
                .unwrap();
            b.register(
                "first",
                ColorValue::one_of([ColorValue::reference("missing"), Color::GREEN.into()]),
            )
            .unwrap();
            b.register("black", ColorValue::darken(Color::WHITE, 1.0))
                .unwrap();
            b.register("same", ColorValue::darken(Color::from_hex(0x0E639C), 0.0))
                .unwrap();
            b.register(
                "cond",
                ColorValue::if_defined_then_else(
                    "unregistered",
                    Color::from_hex(0x111111),
                    Color::from_hex(0x222222),
                ),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.hex("half").as_deref(), Some("#ff000080"));
        assert_eq!(theme.hex("first").as_deref(), Some("#00ff00"));
        assert_eq!(theme.hex("black").as_deref(), Some("#000000"));
        assert_eq!(theme.get("same"), Some(Color::from_hex(0x0E639C)));
        assert_eq!(theme.hex("cond").as_deref(), Some("#222222"));
    }

    #[test]
    fn undefined_operands() {
        let registry = build(|b| {
            b.register("none", ColorValue::Unset).unwrap();
            b.register("dark", ColorValue::darken(ColorValue::reference("none"), 0.2))
                .unwrap();
            b.register(
                "opaque",
                ColorValue::opaque(Color::RED.transparent(0.5), ColorValue::reference("none")),
            )
            .unwrap();
            b.register(
                "prominent",
                ColorValue::less_prominent(Color::RED, ColorValue::reference("none"), 0.5, 0.5),
            )
            .unwrap();
            b.register("all_missing", ColorValue::one_of([ColorValue::Unset]))
                .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.get("dark"), None);
        assert_eq!(theme.get("opaque"), Some(Color::RED.transparent(0.5)));
        assert_eq!(theme.get("prominent"), Some(Color::RED.transparent(0.25)));
        assert_eq!(theme.get("all_missing"), None);
    }

    #[test]
    fn less_prominent_moves_toward_background() {
        let registry = build(|b| {
            b.register("bg", Color::from_hex(0x1E1E1E)).unwrap();
            b.register(
                "on_dark",
                ColorValue::less_prominent(
                    Color::from_hex(0x264F78),
                    ColorValue::reference("bg"),
                    0.3,
                    0.6,
                ),
            )
            .unwrap();
            b.register(
                "on_light",
                ColorValue::less_prominent(Color::from_hex(0x264F78), Color::WHITE, 0.3, 0.6),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);

        let sel = Color::from_hex(0x264F78);
        let bg = Color::from_hex(0x1E1E1E);
        assert_eq!(
            theme.get("on_dark"),
            Some(Color::darker_toward(&sel, &bg, 0.3).transparent(0.6))
        );
        assert_eq!(
            theme.get("on_light"),
            Some(Color::lighter_toward(&sel, &Color::WHITE, 0.3).transparent(0.6))
        );
    }

    #[test]
    fn if_defined_checks_registration_not_resolution() {
        let registry = build(|b| {
            b.register("broken", ColorValue::reference("nowhere")).unwrap();
            b.register("null", ColorValue::Unset).unwrap();
            b.register(
                "on_broken",
                ColorValue::if_defined_then_else("broken", Color::RED, Color::BLUE),
            )
            .unwrap();
            b.register(
                "on_null",
                ColorValue::if_defined_then_else("null", Color::RED, Color::BLUE),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.get("on_broken"), Some(Color::RED));
        assert_eq!(theme.get("on_null"), Some(Color::BLUE));
    }

    #[test]
    fn description_foreground_scenario() {
        let registry = build(|b| {
            b.register(
                "foreground",
                VariantRecord::new(
                    Color::from_hex(0x616161),
                    Color::from_hex(0xCCCCCC),
                    ColorValue::Unset,
                    ColorValue::Unset,
                ),
            )
            .unwrap();
            b.register(
                "description",
                ColorValue::transparent(ColorValue::reference("foreground"), 0.7),
            )
            .unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        assert_eq!(theme.hex("description").as_deref(), Some("#ccccccb3"));

        let theme = registry.resolve(&Overrides::new(), ThemeVariant::HighContrastDark);
        assert_eq!(theme.get("description"), None);
        assert_eq!(theme.hex_or_transparent("description"), "#00000000");
    }

    #[test]
    fn serializes_to_hex_or_null() {
        let registry = build(|b| {
            b.register("a", Color::RED.transparent(0.5)).unwrap();
            b.register("b", ColorValue::Unset).unwrap();
        });
        let theme = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
        let json = serde_json::to_string(&theme).unwrap();
        assert_eq!(json, r##"{"a":"#ff000080","b":null}"##);
        assert_eq!(theme.to_hex_map().len(), 1);
    }
}
