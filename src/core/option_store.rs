use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::primitives::{
    decimal_to_f64, format_number, parse_leading_number, parse_numeric,
};
use crate::error::{ChartError, ChartResult};

/// One value held by an [`OptionStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum OptionValue {
    /// Declared key without a value (margins are seeded this way).
    #[default]
    Null,
    Number(f64),
    Text(String),
    Group(OptionStore),
}

impl OptionValue {
    /// Loose truthiness used when deciding whether an optional parameter is emitted.
    ///
    /// `Null`, `0`, `""`, `"0"` and empty groups are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Number(value) => *value != 0.0,
            Self::Text(text) => !text.is_empty() && text != "0",
            Self::Group(group) => !group.is_empty(),
        }
    }

    /// `true` for finite numbers and for text that parses as a finite number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => parse_numeric(text),
            Self::Null | Self::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&OptionStore> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Numeric coercion used for margins. Text contributes its numeric prefix
    /// (`"12px"` is `12`); anything without one counts as `0`.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        match self {
            Self::Number(value) if value.is_finite() => *value,
            Self::Text(text) => parse_leading_number(text).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Short type name used in validation messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Group(_) => "group",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Group(group) => f.write_str(&group.join_values(",")),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

macro_rules! option_value_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

option_value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<OptionStore> for OptionValue {
    fn from(value: OptionStore) -> Self {
        Self::Group(value)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<Decimal> for OptionValue {
    type Error = ChartError;

    fn try_from(value: Decimal) -> ChartResult<Self> {
        decimal_to_f64(value, "decimal option value").map(Self::Number)
    }
}

/// Insertion-ordered key/value container holding one option group.
///
/// Sequences (labels, colors, one data series) are stored under positional
/// keys `"0"`, `"1"`, ... so every group shares one representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct OptionStore {
    entries: IndexMap<String, OptionValue>,
}

impl OptionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from ordered entries. A repeated key keeps its first
    /// position and takes the last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
    {
        entries.into_iter().collect()
    }

    /// Builds a store from a plain sequence, keyed by position.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value.into()))
                .collect(),
        }
    }

    /// Store whose keys are declared up front with `Null` values.
    pub fn seeded<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_entries(keys.into_iter().map(|key| (key, OptionValue::Null)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Value under `key` when it is truthy; absent, null and empty values read as `None`.
    #[must_use]
    pub fn get_truthy(&self, key: &str) -> Option<&OptionValue> {
        self.get(key).filter(|value| value.is_truthy())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Replaces the entire contents; nothing from the previous store survives.
    pub fn replace(&mut self, other: OptionStore) {
        *self = other;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &OptionValue> {
        self.entries.values()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn to_ordered_values(&self) -> Vec<OptionValue> {
        self.entries.values().cloned().collect()
    }

    #[must_use]
    pub fn to_ordered_entries(&self) -> Vec<(String, OptionValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Renders every value in insertion order, joined by `separator`.
    #[must_use]
    pub fn join_values(&self, separator: &str) -> String {
        self.entries
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl<K, V> FromIterator<(K, V)> for OptionStore
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, OptionValue>> for OptionStore {
    fn from(entries: IndexMap<String, OptionValue>) -> Self {
        Self { entries }
    }
}

impl<V: Into<OptionValue>> From<Vec<V>> for OptionStore {
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl<V: Into<OptionValue>, const N: usize> From<[V; N]> for OptionStore {
    fn from(values: [V; N]) -> Self {
        Self::from_values(values)
    }
}

impl<V: Clone + Into<OptionValue>> From<&[V]> for OptionStore {
    fn from(values: &[V]) -> Self {
        Self::from_values(values.iter().cloned())
    }
}

impl<'a> IntoIterator for &'a OptionStore {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
