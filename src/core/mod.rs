pub mod option_store;
pub mod primitives;
pub mod types;

pub use option_store::{OptionStore, OptionValue};
pub use primitives::{decimal_to_f64, format_number, parse_leading_number};
pub use types::{ChartKind, FillType, LabelPosition, MarginKey, TitleAlign};
