//! Typed option values.

use serde::Serialize;

use crate::option::vocabulary::{
    FilterPlaceholder, FilterType, PaginationType, SortDirection, Theme, ThemeOption,
};

// =============================================================================
// OptionValue
// =============================================================================

/// A resolved option value.
///
/// `Text` holds plain strings. `Buffer` holds accumulators, which can be
/// appended to after resolution (see
/// [`ConfigurationStore::append`](crate::store::ConfigurationStore::append)).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Buffer(String),
    Names(Vec<String>),
    FilterPlaceholder(FilterPlaceholder),
    FilterType(FilterType),
    PaginationType(PaginationType),
    Theme(Theme),
    ThemeOption(ThemeOption),
    SortDirections(Vec<SortDirection>),
}

impl OptionValue {
    /// Returns the textual content of `Text` and `Buffer` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Buffer(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the content of `Bool` values.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// =============================================================================
// Typed extraction
// =============================================================================

/// Conversion from a stored [`OptionValue`] into a concrete Rust type.
///
/// Used by [`Opt`](crate::option::key::Opt) handles to read typed values.
pub trait FromOptionValue: Sized {
    /// Returns `None` when the stored value has a different shape.
    fn from_option_value(value: &OptionValue) -> Option<Self>;
}

impl FromOptionValue for bool {
    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromOptionValue for i64 {
    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromOptionValue for String {
    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

impl FromOptionValue for Vec<String> {
    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Names(names) => Some(names.clone()),
            _ => None,
        }
    }
}

impl FromOptionValue for Vec<SortDirection> {
    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::SortDirections(directions) => Some(directions.clone()),
            _ => None,
        }
    }
}

macro_rules! from_vocabulary {
    ($($variant:ident),+) => {
        $(
            impl FromOptionValue for $variant {
                fn from_option_value(value: &OptionValue) -> Option<Self> {
                    match value {
                        OptionValue::$variant(value) => Some(*value),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for OptionValue {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

from_vocabulary!(
    FilterPlaceholder,
    FilterType,
    PaginationType,
    Theme,
    ThemeOption
);

// =============================================================================
// Export configuration
// =============================================================================

/// Settings of one export format, assembled from the `export.*` options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportConf {
    pub format: String,
    pub file_name: String,
    pub label: String,
    pub mime_type: Option<String>,
    pub export_class: Option<String>,
    pub url: Option<String>,
    pub include_header: bool,
    pub area: String,
    pub auto_size: bool,
}

impl ExportConf {
    /// Creates the default configuration of `format`.
    pub fn new(format: impl Into<String>) -> Self {
        let format = format.into();
        Self {
            label: format.to_uppercase(),
            format,
            file_name: "export".to_string(),
            mime_type: None,
            export_class: None,
            url: None,
            include_header: true,
            area: "ALL".to_string(),
            auto_size: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_extraction() {
        assert_eq!(bool::from_option_value(&OptionValue::Bool(true)), Some(true));
        assert_eq!(bool::from_option_value(&OptionValue::Int(1)), None);
        assert_eq!(
            String::from_option_value(&OptionValue::Buffer("a b".into())),
            Some("a b".to_string())
        );
        assert_eq!(
            Theme::from_option_value(&OptionValue::Theme(Theme::Bootstrap3)),
            Some(Theme::Bootstrap3)
        );
    }

    #[test]
    fn test_export_conf_defaults() {
        let conf = ExportConf::new("csv");
        assert_eq!(conf.file_name, "export");
        assert_eq!(conf.label, "CSV");
        assert!(conf.include_header);
        assert_eq!(conf.area, "ALL");
        assert!(!conf.auto_size);
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_value(OptionValue::Names(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(json, serde_json::json!(["a", "b"]));
    }
}
