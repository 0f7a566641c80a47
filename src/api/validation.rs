use std::sync::LazyLock;

use regex::Regex;

use crate::core::{LabelPosition, OptionStore, OptionValue, TitleAlign};
use crate::error::{ChartError, ChartResult};

static SERIES_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]{6}$").expect("series color pattern is valid"));

static TEXT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]{6,8}$").expect("text color pattern is valid"));

pub const LABEL_OPTION_KEYS: [&str; 3] = ["position", "color", "font-size"];
pub const TITLE_OPTION_KEYS: [&str; 3] = ["text-align", "color", "font-size"];

/// `true` for `RRGGBB` series colors.
#[must_use]
pub fn is_series_color(color: &str) -> bool {
    SERIES_COLOR.is_match(color)
}

/// `true` for `RRGGBB` or `RRGGBBAA` text colors (labels and title).
#[must_use]
pub fn is_text_color(color: &str) -> bool {
    TEXT_COLOR.is_match(color)
}

/// Checks that every element of one data series is numeric. Numeric text is
/// kept as written so it renders verbatim.
pub(super) fn validate_series(series: OptionStore) -> ChartResult<OptionStore> {
    if let Some(value) = series.values().find(|value| !value.is_numeric()) {
        return Err(ChartError::Validation(format!(
            "datas must be numbers ({} \"{value}\" given)",
            value.kind_name()
        )));
    }
    Ok(series)
}

pub(super) fn validate_labels(labels: OptionStore) -> ChartResult<OptionStore> {
    for label in labels.values() {
        let accepted = match label {
            OptionValue::Number(value) => value.is_finite(),
            OptionValue::Text(_) => true,
            OptionValue::Null | OptionValue::Group(_) => false,
        };
        if !accepted {
            return Err(ChartError::Validation(format!(
                "labels must be numbers or strings ({} given)",
                label.kind_name()
            )));
        }
    }
    Ok(labels)
}

pub(super) fn validate_colors(colors: OptionStore) -> ChartResult<OptionStore> {
    for color in colors.values() {
        let Some(text) = color.as_text() else {
            return Err(ChartError::Validation(format!(
                "a color must be a string ({} given)",
                color.kind_name()
            )));
        };
        if !is_series_color(text) {
            return Err(ChartError::Validation(format!(
                "a color must be a 6-digit hexadecimal string (\"{text}\" given)"
            )));
        }
    }
    Ok(colors)
}

pub(super) fn validate_labels_options(options: OptionStore) -> ChartResult<OptionStore> {
    for (key, value) in options.entries() {
        match key {
            "position" => {
                let position = expect_text("label position", value)?;
                position.parse::<LabelPosition>()?;
            }
            "color" => validate_text_color("label", value)?,
            "font-size" => validate_font_size("label", value)?,
            other => {
                return Err(ChartError::Validation(format!(
                    "unknown label option \"{other}\"; valid options are: {}",
                    LABEL_OPTION_KEYS.join(", ")
                )));
            }
        }
    }
    Ok(options)
}

pub(super) fn validate_title_options(options: OptionStore) -> ChartResult<OptionStore> {
    for (key, value) in options.entries() {
        match key {
            "text-align" => {
                let align = expect_text("title alignment", value)?;
                align.parse::<TitleAlign>()?;
            }
            "color" => validate_text_color("title", value)?,
            "font-size" => validate_font_size("title", value)?,
            other => {
                return Err(ChartError::Validation(format!(
                    "unknown title option \"{other}\"; valid options are: {}",
                    TITLE_OPTION_KEYS.join(", ")
                )));
            }
        }
    }
    Ok(options)
}

fn expect_text<'a>(what: &str, value: &'a OptionValue) -> ChartResult<&'a str> {
    value.as_text().ok_or_else(|| {
        ChartError::Validation(format!(
            "the {what} must be a string ({} given)",
            value.kind_name()
        ))
    })
}

fn validate_text_color(scope: &str, value: &OptionValue) -> ChartResult<()> {
    let color = expect_text(&format!("{scope} color"), value)?;
    if !is_text_color(color) {
        return Err(ChartError::Validation(format!(
            "the {scope} color must be a 6 to 8 digit hexadecimal value (\"{color}\" given)"
        )));
    }
    Ok(())
}

fn validate_font_size(scope: &str, value: &OptionValue) -> ChartResult<()> {
    if !value.is_numeric() {
        return Err(ChartError::Validation(format!(
            "the {scope} font size must be numeric ({} given)",
            value.kind_name()
        )));
    }
    Ok(())
}
