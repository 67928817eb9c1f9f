use pretty_assertions::assert_eq;
use tinct_theme::{
    Color, ColorValue, Overrides, Registry, Resolver, ThemeError, ThemeVariant, VariantRecord,
};

const SEED: &str = r##"{
    "foreground": { "light": "#616161", "dark": "#CCCCCC", "hcDark": "#FFFFFF", "hcLight": "#292929" },
    "descriptionForeground": { "transparent": { "value": "foreground", "factor": 0.7 } },
    "focusBorder": "#007FD4",
    "sash.hoverBorder": "focusBorder",
    "button.background": { "light": "#007ACC", "dark": "#0E639C", "hcDark": null, "hcLight": "#0F4A85" },
    "button.hoverBackground": {
        "light": { "darken": { "value": "button.background", "factor": 0.2 } },
        "dark": { "lighten": { "value": "button.background", "factor": 0.2 } },
        "hcDark": "button.background",
        "hcLight": "button.background"
    },
    "loop.a": "loop.b",
    "loop.b": "loop.a",
    "dangling": "does.not.exist",
    "empty": null
}"##;

fn registry() -> Registry {
    Registry::from_seed_json(SEED).unwrap()
}

#[test]
fn resolve_all_is_idempotent() {
    let registry = registry();
    let overrides = Overrides::from_strings([("focusBorder", "#F38518")]).unwrap();
    for variant in ThemeVariant::all() {
        let first = registry.resolve(&overrides, *variant);
        let second = registry.resolve(&overrides, *variant);
        assert_eq!(first, second);
    }
}

#[test]
fn overrides_win_for_every_variant() {
    let registry = registry();
    let overrides = Overrides::from_strings([
        ("button.background", "#123456"),
        ("focusBorder", "foreground"),
    ])
    .unwrap();

    for variant in ThemeVariant::all() {
        let theme = registry.resolve(&overrides, *variant);
        assert_eq!(theme.hex("button.background").as_deref(), Some("#123456"));
        assert_eq!(theme.get("focusBorder"), theme.get("foreground"));
        // dependents follow the overridden value
        assert_eq!(theme.get("sash.hoverBorder"), theme.get("foreground"));
    }
}

#[test]
fn uniform_defaults_ignore_variant() {
    let registry = registry();
    let overrides = Overrides::new();
    let resolved: Vec<_> = ThemeVariant::all()
        .iter()
        .map(|variant| registry.resolve(&overrides, *variant).get("focusBorder"))
        .collect();
    assert_eq!(resolved, vec![Some(Color::from_hex(0x007FD4)); 4]);
}

#[test]
fn failures_degrade_to_none() {
    let theme = registry().resolve(&Overrides::new(), ThemeVariant::Dark);
    for id in ["loop.a", "loop.b", "dangling", "empty"] {
        assert!(theme.contains(id), "{id} should be listed");
        assert_eq!(theme.get(id), None, "{id} should be unset");
        assert_eq!(theme.hex_or_transparent(id), "#00000000");
    }
    // hcDark button.background is null, so the hover state is too
    let theme = registry().resolve(&Overrides::new(), ThemeVariant::HighContrastDark);
    assert_eq!(theme.get("button.hoverBackground"), None);
}

#[test]
fn description_foreground_is_translucent_foreground() {
    let theme = registry().resolve(&Overrides::new(), ThemeVariant::Dark);
    assert_eq!(theme.hex("descriptionForeground").as_deref(), Some("#ccccccb3"));

    let theme = registry().resolve(&Overrides::new(), ThemeVariant::Light);
    assert_eq!(theme.hex("descriptionForeground").as_deref(), Some("#616161b3"));
}

#[test]
fn hover_background_derives_per_variant() {
    let registry = registry();
    let dark = registry.resolve(&Overrides::new(), ThemeVariant::Dark);
    let light = registry.resolve(&Overrides::new(), ThemeVariant::Light);

    let dark_base = Color::from_hex(0x0E639C);
    let light_base = Color::from_hex(0x007ACC);
    assert_eq!(dark.get("button.hoverBackground"), Some(dark_base.lighten(0.2)));
    assert_eq!(light.get("button.hoverBackground"), Some(light_base.darken(0.2)));
    assert!(dark_base.lighten(0.2).is_lighter_than(&dark_base));
    assert!(light_base.darken(0.2).is_darker_than(&light_base));
}

#[test]
fn output_does_not_depend_on_registration_order() {
    let forward = registry();
    let mut builder = Registry::builder();
    let entries: Vec<_> = forward.iter().collect();
    for (id, default) in entries.into_iter().rev() {
        builder.register(id, default.clone()).unwrap();
    }
    let backward = builder.build();

    let overrides = Overrides::new();
    for variant in ThemeVariant::all() {
        let a = forward.resolve(&overrides, *variant);
        let b = backward.resolve(&overrides, *variant);
        for (id, color) in a.iter() {
            assert_eq!(b.get(id), color, "{id} differs for {variant}");
        }
    }
}

#[test]
fn single_token_matches_full_resolution() {
    let registry = registry();
    let overrides = Overrides::from_strings([("foreground", "#EEEEEE")]).unwrap();
    let view = registry.merge(&overrides);
    let resolver = Resolver::new(view);

    for variant in ThemeVariant::all() {
        let all = resolver.resolve_all(*variant);
        for id in view.ids() {
            assert_eq!(resolver.resolve_token(id, *variant), all.get(id));
        }
    }
    assert_eq!(resolver.resolve_token("unknown", ThemeVariant::Dark), None);
}

#[test]
fn override_only_tokens_are_appended() {
    let registry = registry();
    let overrides =
        Overrides::from_strings([("menu.background", "#252526"), ("focusBorder", "#000")])
            .unwrap();
    let theme = registry.resolve(&overrides, ThemeVariant::Dark);

    let ids: Vec<_> = theme.iter().map(|(id, _)| id).collect();
    assert_eq!(ids.len(), registry.len() + 1);
    assert_eq!(ids.last(), Some(&"menu.background"));
    assert_eq!(
        &ids[..registry.len()],
        registry.ids().collect::<Vec<_>>().as_slice()
    );
}

#[test]
fn builder_registrations_resolve() {
    let mut builder = Registry::builder();
    builder
        .register(
            "fg",
            VariantRecord::new(
                Color::from_hex(0x616161),
                Color::from_hex(0xCCCCCC),
                Color::WHITE,
                Color::from_hex(0x292929),
            ),
        )
        .unwrap()
        .register("muted", ColorValue::transparent(ColorValue::reference("fg"), 0.5))
        .unwrap();
    let registry = builder.build();

    let theme = registry.resolve(&Overrides::new(), ThemeVariant::HighContrastDark);
    assert_eq!(theme.hex("muted").as_deref(), Some("#ffffff80"));
    assert!(matches!(
        Registry::builder().register("", Color::BLACK),
        Err(ThemeError::EmptyIdentifier)
    ));
}

#[test]
fn variants_resolve_independently_across_threads() {
    let registry = registry();
    let overrides = Overrides::from_strings([("focusBorder", "#F38518")]).unwrap();

    let (light, dark) = std::thread::scope(|s| {
        let light = s.spawn(|| registry.resolve(&overrides, ThemeVariant::Light));
        let dark = s.spawn(|| registry.resolve(&overrides, ThemeVariant::Dark));
        (light.join().unwrap(), dark.join().unwrap())
    });

    assert_eq!(light, registry.resolve(&overrides, ThemeVariant::Light));
    assert_eq!(dark, registry.resolve(&overrides, ThemeVariant::Dark));
    assert_eq!(light.variant(), ThemeVariant::Light);
}

#[test]
fn serializes_as_flat_hex_map() {
    let theme = registry().resolve(&Overrides::new(), ThemeVariant::Dark);
    let json: serde_json::Value = serde_json::to_value(&theme).unwrap();
    assert_eq!(json["descriptionForeground"], "#ccccccb3");
    assert_eq!(json["focusBorder"], "#007fd4");
    assert!(json["loop.a"].is_null());
}
