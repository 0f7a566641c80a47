mod chart_builder;
mod option_application;
mod url_serializer;
mod validation;

pub use chart_builder::{ChartBuilder, default_margins};
pub use option_application::{OptionBag, parse_option_bag, setter_name, supported_options};
pub use url_serializer::{BASE_URL, TRANSPARENT_FILL, render_multi_dimensional};
pub use validation::{LABEL_OPTION_KEYS, TITLE_OPTION_KEYS, is_series_color, is_text_color};
