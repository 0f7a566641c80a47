//! Flat option bags: `option_name -> value` maps applied through a static
//! setter table, typically parsed from JSON configuration.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::core::{OptionStore, OptionValue, format_number};
use crate::error::{ChartError, ChartResult};

use super::ChartBuilder;

/// Untyped chart configuration, applied in insertion order.
pub type OptionBag = IndexMap<String, Value>;

type OptionSetter = fn(&mut ChartBuilder, &str, &Value) -> ChartResult<()>;

const OPTION_SETTERS: &[(&str, OptionSetter)] = &[
    ("type", apply_type),
    ("width", apply_width),
    ("height", apply_height),
    ("datas", apply_datas),
    ("labels", apply_labels),
    ("labels_options", apply_labels_options),
    ("colors", apply_colors),
    ("title", apply_title),
    ("title_options", apply_title_options),
    ("transparency", apply_transparency),
    ("margins", apply_margins),
    ("fill", apply_fill),
    ("line_fill", apply_line_fill),
    ("line_style", apply_line_style),
    ("axis_tick_mark_style", apply_axis_tick_mark_style),
    ("custom_scaling", apply_custom_scaling),
    ("visible_axis", apply_visible_axis),
    ("axis_label_styles", apply_axis_label_styles),
    ("chart_legend_position", apply_chart_legend_position),
];

/// Setter identifier an option name resolves to (`font_size` -> `set_font_size`).
#[must_use]
pub fn setter_name(option: &str) -> String {
    format!("set_{}", option.to_ascii_lowercase())
}

/// Option names accepted by [`ChartBuilder::apply_options`], in table order.
pub fn supported_options() -> impl Iterator<Item = &'static str> {
    OPTION_SETTERS.iter().map(|(name, _)| *name)
}

fn lookup_setter(option: &str) -> ChartResult<OptionSetter> {
    OPTION_SETTERS
        .iter()
        .find(|(name, _)| *name == option)
        .map(|(_, setter)| *setter)
        .ok_or_else(|| ChartError::UnknownOption {
            option: option.to_owned(),
            setter: setter_name(option),
        })
}

/// Parses a JSON object into an [`OptionBag`], keeping key order.
pub fn parse_option_bag(json: &str) -> ChartResult<OptionBag> {
    serde_json::from_str(json).map_err(|e| {
        ChartError::InvalidOptionBag(format!("expected a JSON object of chart options: {e}"))
    })
}

impl ChartBuilder {
    /// Creates a builder and applies `options` to it.
    pub fn with_options<I, K>(options: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut builder = Self::new();
        builder.apply_options(options)?;
        Ok(builder)
    }

    /// Creates a builder from a JSON object of options.
    pub fn from_json_options(json: &str) -> ChartResult<Self> {
        Self::with_options(parse_option_bag(json)?)
    }

    /// Applies each option through its setter, in order.
    ///
    /// All-or-nothing: the options are applied to a copy, and the builder is
    /// only updated when every option succeeds.
    pub fn apply_options<I, K>(&mut self, options: I) -> ChartResult<&mut Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut working = self.clone();
        let mut applied = 0_usize;
        for (option, value) in options {
            let option = option.as_ref();
            let setter = lookup_setter(option).inspect_err(|err| {
                warn!(error = %err, "rejecting chart option bag");
            })?;
            setter(&mut working, option, &value)?;
            applied += 1;
        }
        debug!(applied, "applied chart options");
        *self = working;
        Ok(self)
    }

    /// Exports the current state as an option bag that [`Self::with_options`]
    /// turns back into an equal builder.
    #[must_use]
    pub fn to_option_bag(&self) -> OptionBag {
        let mut bag = OptionBag::new();
        if !self.chart_type.is_empty() {
            bag.insert("type".to_owned(), Value::from(self.chart_type.as_str()));
        }
        if self.width > 0 {
            bag.insert("width".to_owned(), Value::from(self.width));
        }
        if self.height > 0 {
            bag.insert("height".to_owned(), Value::from(self.height));
        }
        if !self.datas.is_empty() {
            bag.insert("datas".to_owned(), groups_to_json(&self.datas));
        }
        for (name, store) in [
            ("labels", &self.labels),
            ("labels_options", &self.labels_options),
            ("colors", &self.colors),
            ("title_options", &self.title_options),
            ("fill", &self.fill),
        ] {
            if !store.is_empty() {
                bag.insert(name.to_owned(), store_to_json(store));
            }
        }
        if !self.title.is_empty() {
            bag.insert("title".to_owned(), Value::from(self.title.as_str()));
        }
        if self.transparency {
            bag.insert("transparency".to_owned(), Value::Bool(true));
        }
        bag.insert("margins".to_owned(), store_to_json(&self.margins));
        for (name, groups) in [
            ("line_fill", &self.line_fill),
            ("line_style", &self.line_style),
            ("axis_tick_mark_style", &self.axis_tick_mark_style),
        ] {
            if !groups.is_empty() {
                bag.insert(name.to_owned(), groups_to_json(groups));
            }
        }
        for (name, value) in [
            ("custom_scaling", &self.custom_scaling),
            ("visible_axis", &self.visible_axis),
            ("axis_label_styles", &self.axis_label_styles),
            ("chart_legend_position", &self.chart_legend_position),
        ] {
            if let Some(value) = value {
                bag.insert(name.to_owned(), Value::from(value.as_str()));
            }
        }
        bag
    }

    /// Pretty JSON form of [`Self::to_option_bag`].
    pub fn to_json_options_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.to_option_bag()).map_err(|e| {
            ChartError::InvalidOptionBag(format!("failed to serialize chart options: {e}"))
        })
    }
}

fn apply_type(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_type(scalar_text(option, value)?);
    Ok(())
}

fn apply_width(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_width(dimension(option, value)?);
    Ok(())
}

fn apply_height(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_height(dimension(option, value)?);
    Ok(())
}

/// A flat array is one series; an array whose elements are all arrays or
/// objects is a list of series.
fn apply_datas(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    let is_series_list = match value {
        Value::Array(items) => {
            !items.is_empty() && items.iter().all(|item| item.is_array() || item.is_object())
        }
        _ => false,
    };
    if is_series_list {
        builder.set_datas(store_list_from_json(option, value)?)?;
    } else {
        builder.set_datas([store_from_json(option, value)?])?;
    }
    Ok(())
}

fn apply_labels(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_labels(store_from_json(option, value)?)?;
    Ok(())
}

fn apply_labels_options(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_labels_options(store_from_json(option, value)?)?;
    Ok(())
}

fn apply_colors(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_colors(store_from_json(option, value)?)?;
    Ok(())
}

fn apply_title(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_title(scalar_text(option, value)?);
    Ok(())
}

fn apply_title_options(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_title_options(store_from_json(option, value)?)?;
    Ok(())
}

fn apply_transparency(builder: &mut ChartBuilder, _option: &str, value: &Value) -> ChartResult<()> {
    builder.set_transparency(json_truthy(value));
    Ok(())
}

fn apply_margins(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_margins(store_from_json(option, value)?);
    Ok(())
}

fn apply_fill(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_fill(store_from_json(option, value)?);
    Ok(())
}

fn apply_line_fill(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_line_fill(store_list_from_json(option, value)?);
    Ok(())
}

fn apply_line_style(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_line_style(store_list_from_json(option, value)?);
    Ok(())
}

fn apply_axis_tick_mark_style(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_axis_tick_mark_style(store_list_from_json(option, value)?);
    Ok(())
}

fn apply_custom_scaling(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_custom_scaling(scalar_text(option, value)?);
    Ok(())
}

fn apply_visible_axis(builder: &mut ChartBuilder, option: &str, value: &Value) -> ChartResult<()> {
    builder.set_visible_axis(scalar_text(option, value)?);
    Ok(())
}

fn apply_axis_label_styles(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_axis_label_styles(scalar_text(option, value)?);
    Ok(())
}

fn apply_chart_legend_position(
    builder: &mut ChartBuilder,
    option: &str,
    value: &Value,
) -> ChartResult<()> {
    builder.set_chart_legend_position(scalar_text(option, value)?);
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_text(option: &str, value: &Value) -> ChartResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number
            .as_f64()
            .map_or_else(|| number.to_string(), format_number)),
        other => Err(ChartError::Validation(format!(
            "option \"{option}\" must be a string or a number ({} given)",
            json_kind(other)
        ))),
    }
}

fn dimension(option: &str, value: &Value) -> ChartResult<u32> {
    let parsed = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.is_finite() && *value >= 0.0)
                    .map(|value| value.trunc() as u64)
            })
            .and_then(|value| u32::try_from(value).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ChartError::Validation(format!(
            "option \"{option}\" must be a non-negative integer ({value} given)"
        ))
    })
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn option_value_from_json(option: &str, value: &Value) -> ChartResult<OptionValue> {
    match value {
        Value::Null => Ok(OptionValue::Null),
        Value::Number(number) => number.as_f64().map(OptionValue::Number).ok_or_else(|| {
            ChartError::Validation(format!(
                "option \"{option}\" holds a number outside the f64 range ({number})"
            ))
        }),
        Value::String(text) => Ok(OptionValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => store_from_json(option, value).map(OptionValue::Group),
        Value::Bool(_) => Err(ChartError::Validation(format!(
            "option \"{option}\" cannot hold boolean values"
        ))),
    }
}

/// Arrays become positional stores; objects keep their keys and order.
fn store_from_json(option: &str, value: &Value) -> ChartResult<OptionStore> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| option_value_from_json(option, item))
            .collect::<ChartResult<Vec<_>>>()
            .map(OptionStore::from_values),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), option_value_from_json(option, item)?)))
            .collect::<ChartResult<Vec<_>>>()
            .map(OptionStore::from_entries),
        other => Err(ChartError::Validation(format!(
            "option \"{option}\" must be an array or an object ({} given)",
            json_kind(other)
        ))),
    }
}

fn store_list_from_json(option: &str, value: &Value) -> ChartResult<Vec<OptionStore>> {
    let Value::Array(groups) = value else {
        return Err(ChartError::Validation(format!(
            "option \"{option}\" must be an array of groups ({} given)",
            json_kind(value)
        )));
    };
    groups
        .iter()
        .map(|group| store_from_json(option, group))
        .collect()
}

fn option_value_to_json(value: &OptionValue) -> Value {
    match value {
        OptionValue::Null => Value::Null,
        OptionValue::Number(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
        OptionValue::Text(text) => Value::String(text.clone()),
        OptionValue::Group(group) => store_to_json(group),
    }
}

fn store_to_json(store: &OptionStore) -> Value {
    Value::Object(
        store
            .entries()
            .map(|(key, value)| (key.to_owned(), option_value_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

fn groups_to_json(groups: &[OptionStore]) -> Value {
    Value::Array(groups.iter().map(store_to_json).collect())
}
