//! gchart-rs: typed builder for image-chart API URLs.
//!
//! A [`ChartBuilder`] collects chart settings through validating setters (or a
//! flat option bag) and renders them as one query string against the
//! `chart.googleapis.com` endpoint. Fetching the image is left to the caller.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartBuilder, OptionBag};
pub use crate::core::{OptionStore, OptionValue};
pub use error::{ChartError, ChartResult};
