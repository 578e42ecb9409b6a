//! The widget configuration map and its merge rules.
//!
//! A [`ConfigMap`] is rendered as a JavaScript object literal. Besides JSON
//! values it holds two wrappers that are emitted verbatim: functions
//! ([`JsFunction`]) and raw snippets ([`ConfigValue::Snippet`]).

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::warn;

// =============================================================================
// Values
// =============================================================================

/// A JavaScript function literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFunction {
    pub code: String,
    pub args: Vec<String>,
    /// Emits the code as the function's return expression.
    pub has_return: bool,
}

impl JsFunction {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            args: Vec::new(),
            has_return: false,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn returning(mut self) -> Self {
        self.has_return = true;
        self
    }

    fn render(&self) -> String {
        let ret = if self.has_return { "return " } else { "" };
        format!("function({}){{{ret}{}}}", self.args.join(","), self.code)
    }
}

/// A value of the configuration map.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Function(JsFunction),
    /// Raw JavaScript, emitted without quoting.
    Snippet(String),
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
}

impl ConfigValue {
    pub fn snippet(raw: impl Into<String>) -> Self {
        Self::Snippet(raw.into())
    }

    pub fn function(function: JsFunction) -> Self {
        Self::Function(function)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The text this value contributes when merged into a wrapper or string.
    fn fragment(&self) -> String {
        match self {
            Self::Text(text) | Self::Snippet(text) => text.clone(),
            Self::Function(function) => function.code.clone(),
            other => other.to_js(),
        }
    }

    /// Renders the value as a compact JavaScript literal.
    pub fn to_js(&self) -> String {
        let mut out = String::new();
        self.write_js(&mut out, None, 0);
        out
    }

    fn write_js(&self, out: &mut String, indent: Option<usize>, level: usize) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(value) => {
                let _ = write!(out, "{value}");
            }
            Self::Int(value) => {
                let _ = write!(out, "{value}");
            }
            Self::Text(text) => out.push_str(&quote(text)),
            Self::Function(function) => out.push_str(&function.render()),
            Self::Snippet(raw) => out.push_str(raw),
            Self::Array(values) => {
                if values.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push('[');
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    newline(out, indent, level + 1);
                    value.write_js(out, indent, level + 1);
                }
                newline(out, indent, level);
                out.push(']');
            }
            Self::Object(map) => map.write_js(out, indent, level),
        }
    }
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

fn newline(out: &mut String, indent: Option<usize>, level: usize) {
    if let Some(width) = indent {
        out.push('\n');
        out.push_str(&" ".repeat(width * level));
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<JsFunction> for ConfigValue {
    fn from(value: JsFunction) -> Self {
        Self::Function(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        Self::Array(value)
    }
}

// =============================================================================
// MergeMode
// =============================================================================

/// How a contributed value combines with a value already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Replace the existing value.
    #[default]
    Override,
    Append,
    Prepend,
    AppendWithSeparator,
    PrependWithSeparator,
}

impl MergeMode {
    /// Combines the code of a function or snippet: appended code runs first.
    fn combine_wrapped(self, existing: &str, new: &str) -> String {
        match self {
            Self::Override => new.to_string(),
            Self::Append => format!("{new}{existing}"),
            Self::Prepend => format!("{existing}{new}"),
            Self::AppendWithSeparator => format!("{new} {existing}"),
            Self::PrependWithSeparator => format!("{existing} {new}"),
        }
    }

    /// Combines plain strings: appended text goes last.
    fn combine_plain(self, existing: &str, new: &str) -> String {
        match self {
            Self::Override => new.to_string(),
            Self::Append => format!("{existing}{new}"),
            Self::Prepend => format!("{new}{existing}"),
            Self::AppendWithSeparator => format!("{existing} {new}"),
            Self::PrependWithSeparator => format!("{new} {existing}"),
        }
    }
}

// =============================================================================
// ConfigMap
// =============================================================================

/// String keys to [`ConfigValue`]s, kept in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMap {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.entries.iter()
    }

    /// Merges `value` into `key`.
    ///
    /// An absent key is inserted as is. Otherwise [`MergeMode::Override`]
    /// replaces the value, and the other modes combine with it according to
    /// the existing value's kind; function arguments are kept.
    pub fn merge(&mut self, key: &str, value: ConfigValue, mode: MergeMode) {
        let Some(existing) = self.entries.get_mut(key) else {
            self.entries.insert(key.to_string(), value);
            return;
        };
        if mode == MergeMode::Override {
            *existing = value;
            return;
        }
        let fragment = value.fragment();
        match existing {
            ConfigValue::Function(function) => {
                function.code = mode.combine_wrapped(&function.code, &fragment);
            }
            ConfigValue::Snippet(raw) => {
                *raw = mode.combine_wrapped(raw, &fragment);
            }
            ConfigValue::Text(text) => {
                *text = mode.combine_plain(text, &fragment);
            }
            other => {
                warn!(key, mode = ?mode, "Existing value cannot be combined, replacing it");
                *other = value;
            }
        }
    }

    /// Renders the map as a compact JavaScript object literal.
    pub fn to_js(&self) -> String {
        let mut out = String::new();
        self.write_js(&mut out, None, 0);
        out
    }

    /// Renders the map as an indented JavaScript object literal.
    pub fn to_js_pretty(&self) -> String {
        let mut out = String::new();
        self.write_js(&mut out, Some(2), 0);
        out
    }

    fn write_js(&self, out: &mut String, indent: Option<usize>, level: usize) {
        if self.entries.is_empty() {
            out.push_str("{}");
            return;
        }
        let separator = if indent.is_some() { ": " } else { ":" };
        out.push('{');
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            newline(out, indent, level + 1);
            out.push_str(&quote(key));
            out.push_str(separator);
            value.write_js(out, indent, level + 1);
        }
        newline(out, indent, level);
        out.push('}');
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
