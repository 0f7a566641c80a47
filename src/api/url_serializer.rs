use tracing::{debug, warn};
use url::form_urlencoded;

use crate::core::{FillType, MarginKey, OptionStore, OptionValue, format_number};
use crate::error::{ChartError, ChartResult};

use super::ChartBuilder;

/// Endpoint every built URL targets.
pub const BASE_URL: &str = "http://chart.googleapis.com/chart";

/// Fixed `chf` fragment emitted for transparent charts.
pub const TRANSPARENT_FILL: &str = "bg,s,65432100";

/// Renders styling groups as comma-joined values within a group and `|` between groups.
#[must_use]
pub fn render_multi_dimensional(groups: &[OptionStore]) -> String {
    groups
        .iter()
        .map(|group| group.join_values(","))
        .collect::<Vec<_>>()
        .join("|")
}

/// Form-encodes a title, escaping `*` as well so the output matches classic `urlencode`.
fn encode_title(title: &str) -> String {
    form_urlencoded::byte_serialize(title.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Query string under construction: `?` before the first parameter, `&` after.
struct QueryString {
    url: String,
    param_count: usize,
}

impl QueryString {
    fn new(base: &str) -> Self {
        Self {
            url: base.to_owned(),
            param_count: 0,
        }
    }

    fn push(&mut self, key: &str, value: &str) {
        self.url.push(if self.param_count == 0 { '?' } else { '&' });
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(value);
        self.param_count += 1;
    }
}

/// Comma-separated parameter whose components are individually optional.
///
/// The first component present opens the parameter, padded with one empty
/// slot per positional component skipped before it. Later components are
/// appended after a single comma, whatever their position.
struct SlottedParam {
    key: &'static str,
    opened: bool,
    value: String,
}

impl SlottedParam {
    fn new(key: &'static str) -> Self {
        Self {
            key,
            opened: false,
            value: String::new(),
        }
    }

    fn component(&mut self, slot: usize, component: &OptionValue) {
        if self.opened {
            self.value.push(',');
        } else {
            self.value.push_str(&",".repeat(slot));
            self.opened = true;
        }
        self.value.push_str(&component.to_string());
    }

    fn finish(self, query: &mut QueryString) {
        if self.opened {
            query.push(self.key, &self.value);
        }
    }
}

impl ChartBuilder {
    /// Assembles the chart URL from the current state.
    ///
    /// Fails with [`ChartError::IncompleteChart`] when the type, datas, width
    /// or height is missing. Never mutates the builder.
    pub fn build(&self) -> ChartResult<String> {
        self.ensure_complete()?;

        let mut query = QueryString::new(BASE_URL);
        query.push("cht", &self.chart_type);
        query.push("chs", &format!("{}x{}", self.width, self.height));

        if !self.line_style.is_empty() {
            query.push("chls", &render_multi_dimensional(&self.line_style));
        }

        let series = self
            .datas
            .iter()
            .map(|series| series.join_values(","))
            .collect::<Vec<_>>()
            .join("|");
        query.push("chd", &format!("t:{series}"));

        if !self.colors.is_empty() {
            let separator = if self.chart_type == "lc" { "," } else { "|" };
            query.push("chco", &self.colors.join_values(separator));
        }

        self.push_fill(&mut query);

        if !self.line_fill.is_empty() {
            query.push("chm", &render_multi_dimensional(&self.line_fill));
        }

        self.push_labels(&mut query);
        self.push_title(&mut query);
        self.push_margins(&mut query);
        self.push_pass_through(&mut query);

        if !self.axis_tick_mark_style.is_empty() {
            query.push(
                "chxtc",
                &render_multi_dimensional(&self.axis_tick_mark_style),
            );
        }

        debug!(
            url_len = query.url.len(),
            param_count = query.param_count,
            "built chart url"
        );
        Ok(query.url)
    }

    fn ensure_complete(&self) -> ChartResult<()> {
        let missing = if self.chart_type.is_empty() {
            Some("a type")
        } else if self.datas.is_empty() {
            Some("datas")
        } else if self.width == 0 {
            Some("a width")
        } else if self.height == 0 {
            Some("a height")
        } else {
            None
        };
        match missing {
            Some(field) => Err(ChartError::IncompleteChart(format!(
                "a chart must have {field}"
            ))),
            None => Ok(()),
        }
    }

    fn push_fill(&self, query: &mut QueryString) {
        if self.transparency {
            query.push("chf", TRANSPARENT_FILL);
            return;
        }
        if self.fill.is_empty() {
            return;
        }
        let fill_type = self
            .fill
            .get("type")
            .and_then(OptionValue::as_text)
            .and_then(|text| text.parse::<FillType>().ok())
            .unwrap_or_default();
        let color = self
            .fill
            .get("color")
            .map(ToString::to_string)
            .unwrap_or_default();
        query.push("chf", &format!("{},s,{color}", fill_type.fill_code()));
    }

    fn push_labels(&self, query: &mut QueryString) {
        if self.labels.is_empty() {
            return;
        }
        query.push("chl", &self.labels.join_values("|"));

        if let Some(position) = self.labels_options.get_truthy("position") {
            query.push("chdlp", &position.to_string());
        }

        let mut style = SlottedParam::new("chdls");
        if let Some(color) = self.labels_options.get_truthy("color") {
            style.component(0, color);
        }
        if let Some(font_size) = self.labels_options.get_truthy("font-size") {
            style.component(1, font_size);
        }
        style.finish(query);
    }

    fn push_title(&self, query: &mut QueryString) {
        if self.title.is_empty() {
            return;
        }
        let encoded = encode_title(&self.title);
        query.push("chtt", &encoded);

        let mut style = SlottedParam::new("chts");
        if let Some(color) = self.title_options.get_truthy("color") {
            style.component(0, color);
        }
        if let Some(font_size) = self.title_options.get_truthy("font-size") {
            style.component(1, font_size);
        }
        if let Some(align) = self.title_options.get_truthy("text-align") {
            style.component(2, align);
        }
        style.finish(query);
    }

    fn push_margins(&self, query: &mut QueryString) {
        let margins: Vec<Option<&OptionValue>> = MarginKey::ALL
            .iter()
            .map(|key| self.margins.get(key.as_key()))
            .collect();
        if !margins.iter().flatten().any(|value| value.is_truthy()) {
            return;
        }
        let rendered = margins
            .iter()
            .map(|value| format_number(value.map_or(0.0, OptionValue::to_f64_lossy)))
            .collect::<Vec<_>>()
            .join(",");
        query.push("chma", &rendered);
    }

    fn push_pass_through(&self, query: &mut QueryString) {
        let pass_through = [
            ("chds", &self.custom_scaling),
            ("chxt", &self.visible_axis),
            ("chxs", &self.axis_label_styles),
            ("chdlp", &self.chart_legend_position),
        ];
        for (key, value) in pass_through {
            let Some(value) = value
                .as_deref()
                .filter(|value| !value.is_empty() && *value != "0")
            else {
                continue;
            };
            if key == "chdlp" {
                if let Some(label_position) = self.emitted_label_position() {
                    warn!(
                        %label_position,
                        chart_legend_position = value,
                        "emitting chdlp twice; the chart API decides which one applies"
                    );
                }
            }
            query.push(key, value);
        }
    }

    fn emitted_label_position(&self) -> Option<&OptionValue> {
        if self.labels.is_empty() {
            return None;
        }
        self.labels_options.get_truthy("position")
    }
}
