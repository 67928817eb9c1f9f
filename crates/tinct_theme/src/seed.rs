//! JSON seed tables
//!
//! A seed maps token ids to defaults:
//!
//! ```json
//! {
//!   "foreground": { "light": "#616161", "dark": "#CCCCCC", "hcDark": "#FFFFFF", "hcLight": "#292929" },
//!   "descriptionForeground": { "transparent": { "value": "foreground", "factor": 0.7 } },
//!   "selection.background": null,
//!   "sash.hoverBorder": "focusBorder"
//! }
//! ```
//!
//! A string is a `#hex` literal or a token reference, `null` is unset, and an
//! object is either a per-variant record (all four variant keys) or a
//! transform with a single operator key.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Result, ThemeError};
use crate::registry::Registry;
use crate::tokens::{ColorTransform, ColorValue, TokenDefault, VariantRecord};
use crate::variant::ThemeVariant;

/// The VS Code base palette shipped with the crate
pub const BUILTIN_SEED: &str = include_str!("../seed/colors.json");

pub(crate) fn builtin() -> Result<Registry> {
    parse_seed(BUILTIN_SEED)
}

pub(crate) fn parse_seed(json: &str) -> Result<Registry> {
    let entries: IndexMap<String, Value> = serde_json::from_str(json)?;
    let mut builder = Registry::builder();
    for (id, raw) in &entries {
        builder.register(id.as_str(), parse_default(id, raw)?)?;
    }
    Ok(builder.build())
}

/// Parse a top-level seed entry
pub fn parse_default(id: &str, raw: &Value) -> Result<TokenDefault> {
    if let Value::Object(map) = raw {
        if map
            .keys()
            .any(|key| ThemeVariant::all().iter().any(|v| v.id() == key.as_str()))
        {
            return parse_record(id, map).map(TokenDefault::PerVariant);
        }
    }
    parse_value(id, raw).map(TokenDefault::Uniform)
}

fn parse_record(id: &str, map: &Map<String, Value>) -> Result<VariantRecord> {
    if let Some(extra) = map
        .keys()
        .find(|key| !ThemeVariant::all().iter().any(|v| v.id() == key.as_str()))
    {
        return Err(invalid(id, format!("unexpected key `{extra}` in variant record")));
    }

    let entry = |variant: ThemeVariant| -> Result<ColorValue> {
        let Some(raw) = map.get(variant.id()) else {
            return Err(invalid(
                id,
                format!("variant record is missing `{}`", variant.id()),
            ));
        };
        parse_value(id, raw)
    };

    Ok(VariantRecord {
        light: entry(ThemeVariant::Light)?,
        dark: entry(ThemeVariant::Dark)?,
        hc_dark: entry(ThemeVariant::HighContrastDark)?,
        hc_light: entry(ThemeVariant::HighContrastLight)?,
    })
}

/// Parse a single value: `null`, a string, or a transform object
pub fn parse_value(id: &str, raw: &Value) -> Result<ColorValue> {
    match raw {
        Value::Null => Ok(ColorValue::Unset),
        Value::String(s) => ColorValue::parse(id, s),
        Value::Object(map) => parse_transform(id, map).map(ColorValue::from),
        other => Err(invalid(
            id,
            format!("expected null, a string or an object, found {}", kind(other)),
        )),
    }
}

fn parse_transform(id: &str, map: &Map<String, Value>) -> Result<ColorTransform> {
    let mut ops = map.iter();
    let (Some((op, args)), None) = (ops.next(), ops.next()) else {
        return Err(invalid(id, "transform must have exactly one operator key"));
    };

    let transform = match op.as_str() {
        "darken" | "lighten" | "transparent" => {
            let args = Args::new(id, op, args, &["value", "factor"])?;
            let value = args.value("value")?;
            let factor = args.number("factor")?;
            match op.as_str() {
                "darken" => ColorTransform::Darken { value, factor },
                "lighten" => ColorTransform::Lighten { value, factor },
                _ => ColorTransform::Transparent { value, factor },
            }
        }
        "opaque" => {
            let args = Args::new(id, op, args, &["value", "background"])?;
            ColorTransform::Opaque {
                value: args.value("value")?,
                background: args.value("background")?,
            }
        }
        "oneOf" => {
            let Value::Array(candidates) = args else {
                return Err(invalid(id, "`oneOf` expects an array"));
            };
            let candidates = candidates
                .iter()
                .map(|raw| parse_value(id, raw))
                .collect::<Result<Vec<_>>>()?;
            ColorTransform::OneOf(candidates)
        }
        "lessProminent" => {
            let args = Args::new(
                id,
                op,
                args,
                &["value", "background", "factor", "transparency"],
            )?;
            ColorTransform::LessProminent {
                value: args.value("value")?,
                background: args.value("background")?,
                factor: args.number("factor")?,
                transparency: args.number("transparency")?,
            }
        }
        "ifDefinedThenElse" => {
            let args = Args::new(id, op, args, &["if", "then", "else"])?;
            ColorTransform::IfDefinedThenElse {
                id: args.string("if")?,
                then: args.value("then")?,
                otherwise: args.value("else")?,
            }
        }
        other => return Err(invalid(id, format!("unknown transform `{other}`"))),
    };
    Ok(transform)
}

/// Argument object of a transform, checked against its expected keys
struct Args<'v> {
    id: &'v str,
    op: &'v str,
    map: &'v Map<String, Value>,
}

impl<'v> Args<'v> {
    fn new(id: &'v str, op: &'v str, raw: &'v Value, keys: &[&str]) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(invalid(id, format!("`{op}` expects an object")));
        };
        if let Some(extra) = map.keys().find(|key| !keys.contains(&key.as_str())) {
            return Err(invalid(id, format!("unexpected `{extra}` in `{op}`")));
        }
        if let Some(missing) = keys.iter().find(|key| !map.contains_key(**key)) {
            return Err(invalid(id, format!("`{op}` is missing `{missing}`")));
        }
        Ok(Self { id, op, map })
    }

    fn get(&self, key: &str) -> &'v Value {
        static NULL: Value = Value::Null;
        // presence checked in `new`
        self.map.get(key).unwrap_or(&NULL)
    }

    fn value(&self, key: &str) -> Result<ColorValue> {
        parse_value(self.id, self.get(key))
    }

    fn number(&self, key: &str) -> Result<f32> {
        match self.get(key).as_f64() {
            Some(n) if n.is_finite() => Ok(n as f32),
            _ => Err(invalid(
                self.id,
                format!("`{}` of `{}` must be a number", key, self.op),
            )),
        }
    }

    fn string(&self, key: &str) -> Result<String> {
        match self.get(key).as_str() {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => Err(invalid(
                self.id,
                format!("`{}` of `{}` must be a token id", key, self.op),
            )),
        }
    }
}

fn invalid(id: &str, reason: impl Into<String>) -> ThemeError {
    ThemeError::InvalidSeed {
        id: id.to_string(),
        reason: reason.into(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
