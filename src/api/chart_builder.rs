use tracing::{debug, trace, warn};

use crate::core::{ChartKind, FillType, LabelPosition, MarginKey, OptionStore, TitleAlign};
use crate::error::ChartResult;

use super::validation::{
    validate_colors, validate_labels, validate_labels_options, validate_series,
    validate_title_options,
};

/// Accumulates chart configuration and renders it as a chart API URL.
///
/// Every setter replaces its whole field; nothing is merged with the previous
/// value. Setters with format constraints validate before mutating, so a
/// rejected call leaves the builder untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBuilder {
    pub(super) chart_type: String,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) datas: Vec<OptionStore>,
    pub(super) labels: OptionStore,
    pub(super) labels_options: OptionStore,
    pub(super) colors: OptionStore,
    pub(super) title: String,
    pub(super) title_options: OptionStore,
    pub(super) transparency: bool,
    pub(super) margins: OptionStore,
    pub(super) fill: OptionStore,
    pub(super) line_fill: Vec<OptionStore>,
    pub(super) line_style: Vec<OptionStore>,
    pub(super) axis_tick_mark_style: Vec<OptionStore>,
    pub(super) custom_scaling: Option<String>,
    pub(super) visible_axis: Option<String>,
    pub(super) axis_label_styles: Option<String>,
    pub(super) chart_legend_position: Option<String>,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self {
            chart_type: String::new(),
            width: 0,
            height: 0,
            datas: Vec::new(),
            labels: OptionStore::new(),
            labels_options: OptionStore::new(),
            colors: OptionStore::new(),
            title: String::new(),
            title_options: OptionStore::new(),
            transparency: false,
            margins: default_margins(),
            fill: OptionStore::new(),
            line_fill: Vec::new(),
            line_style: Vec::new(),
            axis_tick_mark_style: Vec::new(),
            custom_scaling: None,
            visible_axis: None,
            axis_label_styles: None,
            chart_legend_position: None,
        }
    }
}

/// Margin store with the six known keys declared and unset.
#[must_use]
pub fn default_margins() -> OptionStore {
    OptionStore::seeded(MarginKey::ALL.iter().map(|key| key.as_key()))
}

impl ChartBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder preset to one of the common chart kinds.
    #[must_use]
    pub fn of_kind(kind: ChartKind) -> Self {
        let mut builder = Self::new();
        builder.set_kind(kind);
        builder
    }

    #[must_use]
    pub fn chart_type(&self) -> &str {
        &self.chart_type
    }

    /// Known chart kind for the current type code, if any.
    #[must_use]
    pub fn kind(&self) -> Option<ChartKind> {
        self.chart_type.parse().ok()
    }

    pub fn set_type(&mut self, chart_type: impl Into<String>) -> &mut Self {
        self.chart_type = chart_type.into();
        trace!(chart_type = %self.chart_type, "set chart type");
        self
    }

    pub fn set_kind(&mut self, kind: ChartKind) -> &mut Self {
        self.set_type(kind.as_code())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = width;
        trace!(width, "set chart width");
        self
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = height;
        trace!(height, "set chart height");
        self
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> &mut Self {
        self.set_width(width).set_height(height)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        trace!(title = %self.title, "set chart title");
        self
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparency
    }

    pub fn set_transparency(&mut self, transparency: bool) -> &mut Self {
        self.transparency = transparency;
        trace!(transparency, "set chart transparency");
        self
    }

    #[must_use]
    pub fn datas(&self) -> &[OptionStore] {
        &self.datas
    }

    /// Replaces all data series. Every element must be numeric; numeric text
    /// is normalized to a number.
    pub fn set_datas<I, S>(&mut self, series: I) -> ChartResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OptionStore>,
    {
        let datas = collect_series(series).inspect_err(|err| {
            warn!(error = %err, "rejecting chart datas");
        })?;
        debug!(series_count = datas.len(), "set chart datas");
        self.datas = datas;
        Ok(self)
    }

    /// Appends one data series after the existing ones.
    pub fn add_datas(&mut self, series: impl Into<OptionStore>) -> ChartResult<&mut Self> {
        let series = validate_series(series.into()).inspect_err(|err| {
            warn!(error = %err, "rejecting appended chart series");
        })?;
        self.datas.push(series);
        debug!(series_count = self.datas.len(), "append chart series");
        Ok(self)
    }

    #[must_use]
    pub fn labels(&self) -> &OptionStore {
        &self.labels
    }

    pub fn set_labels(&mut self, labels: impl Into<OptionStore>) -> ChartResult<&mut Self> {
        let labels = validate_labels(labels.into()).inspect_err(|err| {
            warn!(error = %err, "rejecting chart labels");
        })?;
        debug!(label_count = labels.len(), "set chart labels");
        self.labels = labels;
        Ok(self)
    }

    #[must_use]
    pub fn labels_options(&self) -> &OptionStore {
        &self.labels_options
    }

    /// Replaces the legend style. Accepted keys: `position`, `color`, `font-size`.
    pub fn set_labels_options(&mut self, options: OptionStore) -> ChartResult<&mut Self> {
        let options = validate_labels_options(options).inspect_err(|err| {
            warn!(error = %err, "rejecting chart labels options");
        })?;
        debug!(option_count = options.len(), "set chart labels options");
        self.labels_options = options;
        Ok(self)
    }

    /// Typed form of [`Self::set_labels_options`].
    pub fn set_labels_style(
        &mut self,
        position: Option<LabelPosition>,
        color: Option<&str>,
        font_size: Option<f64>,
    ) -> ChartResult<&mut Self> {
        let mut options = OptionStore::new();
        if let Some(position) = position {
            options.insert("position", position.as_code());
        }
        if let Some(color) = color {
            options.insert("color", color);
        }
        if let Some(font_size) = font_size {
            options.insert("font-size", font_size);
        }
        self.set_labels_options(options)
    }

    #[must_use]
    pub fn colors(&self) -> &OptionStore {
        &self.colors
    }

    /// Replaces the series colors. Each color must be six hexadecimal digits.
    pub fn set_colors(&mut self, colors: impl Into<OptionStore>) -> ChartResult<&mut Self> {
        let colors = validate_colors(colors.into()).inspect_err(|err| {
            warn!(error = %err, "rejecting chart colors");
        })?;
        debug!(color_count = colors.len(), "set chart colors");
        self.colors = colors;
        Ok(self)
    }

    #[must_use]
    pub fn title_options(&self) -> &OptionStore {
        &self.title_options
    }

    /// Replaces the title style. Accepted keys: `text-align`, `color`, `font-size`.
    pub fn set_title_options(&mut self, options: OptionStore) -> ChartResult<&mut Self> {
        let options = validate_title_options(options).inspect_err(|err| {
            warn!(error = %err, "rejecting chart title options");
        })?;
        debug!(option_count = options.len(), "set chart title options");
        self.title_options = options;
        Ok(self)
    }

    /// Typed form of [`Self::set_title_options`].
    pub fn set_title_style(
        &mut self,
        color: Option<&str>,
        font_size: Option<f64>,
        align: Option<TitleAlign>,
    ) -> ChartResult<&mut Self> {
        let mut options = OptionStore::new();
        if let Some(color) = color {
            options.insert("color", color);
        }
        if let Some(font_size) = font_size {
            options.insert("font-size", font_size);
        }
        if let Some(align) = align {
            options.insert("text-align", align.as_code());
        }
        self.set_title_options(options)
    }

    #[must_use]
    pub fn margins(&self) -> &OptionStore {
        &self.margins
    }

    /// Replaces the margin store. Keys missing from `margins` render as `0`.
    pub fn set_margins(&mut self, margins: OptionStore) -> &mut Self {
        debug!(key_count = margins.len(), "set chart margins");
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn fill(&self) -> &OptionStore {
        &self.fill
    }

    /// Replaces the fill store (`type` is `chart` or `background`, plus `color`).
    pub fn set_fill(&mut self, fill: OptionStore) -> &mut Self {
        debug!(key_count = fill.len(), "set chart fill");
        self.fill = fill;
        self
    }

    pub fn set_solid_fill(&mut self, fill_type: FillType, color: &str) -> &mut Self {
        self.set_fill(OptionStore::from_entries([
            ("type", fill_type.as_code()),
            ("color", color),
        ]))
    }

    #[must_use]
    pub fn line_fill(&self) -> &[OptionStore] {
        &self.line_fill
    }

    pub fn set_line_fill<I, G>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = G>,
        G: Into<OptionStore>,
    {
        self.line_fill = collect_groups(groups);
        debug!(group_count = self.line_fill.len(), "set chart line fill");
        self
    }

    #[must_use]
    pub fn line_style(&self) -> &[OptionStore] {
        &self.line_style
    }

    pub fn set_line_style<I, G>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = G>,
        G: Into<OptionStore>,
    {
        self.line_style = collect_groups(groups);
        debug!(group_count = self.line_style.len(), "set chart line style");
        self
    }

    #[must_use]
    pub fn axis_tick_mark_style(&self) -> &[OptionStore] {
        &self.axis_tick_mark_style
    }

    pub fn set_axis_tick_mark_style<I, G>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = G>,
        G: Into<OptionStore>,
    {
        self.axis_tick_mark_style = collect_groups(groups);
        debug!(
            group_count = self.axis_tick_mark_style.len(),
            "set chart axis tick mark style"
        );
        self
    }

    #[must_use]
    pub fn custom_scaling(&self) -> Option<&str> {
        self.custom_scaling.as_deref()
    }

    pub fn set_custom_scaling(&mut self, custom_scaling: impl Into<String>) -> &mut Self {
        self.custom_scaling = Some(custom_scaling.into());
        self
    }

    #[must_use]
    pub fn visible_axis(&self) -> Option<&str> {
        self.visible_axis.as_deref()
    }

    pub fn set_visible_axis(&mut self, visible_axis: impl Into<String>) -> &mut Self {
        self.visible_axis = Some(visible_axis.into());
        self
    }

    #[must_use]
    pub fn axis_label_styles(&self) -> Option<&str> {
        self.axis_label_styles.as_deref()
    }

    pub fn set_axis_label_styles(&mut self, axis_label_styles: impl Into<String>) -> &mut Self {
        self.axis_label_styles = Some(axis_label_styles.into());
        self
    }

    #[must_use]
    pub fn chart_legend_position(&self) -> Option<&str> {
        self.chart_legend_position.as_deref()
    }

    pub fn set_chart_legend_position(
        &mut self,
        chart_legend_position: impl Into<String>,
    ) -> &mut Self {
        self.chart_legend_position = Some(chart_legend_position.into());
        self
    }
}

fn collect_series<I, S>(series: I) -> ChartResult<Vec<OptionStore>>
where
    I: IntoIterator<Item = S>,
    S: Into<OptionStore>,
{
    series
        .into_iter()
        .map(|values| validate_series(values.into()))
        .collect()
}

fn collect_groups<I, G>(groups: I) -> Vec<OptionStore>
where
    I: IntoIterator<Item = G>,
    G: Into<OptionStore>,
{
    groups.into_iter().map(Into::into).collect()
}
