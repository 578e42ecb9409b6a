//! Configuration schema definitions.
//!
//! Option files are plain trees: nested tables become dotted option names, so
//! the two snippets below are equivalent.
//!
//! ```toml
//! [groups.global]
//! feature.pageable = true
//!
//! [groups.global.feature]
//! pageable = true
//! ```
//!
//! Names where one option is a prefix of another (`i18n.msg.info` and
//! `i18n.msg.info.empty`) need a quoted key for the longer one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tessera_core::option::normalize_name;

/// The group every other group inherits from.
pub const GLOBAL_GROUP: &str = "global";

/// Options applied to every group before any user configuration.
pub const DEFAULT_OPTIONS: &[(&str, &str)] = &[
    ("feature.autowidth", "true"),
    ("feature.filterable", "true"),
    ("feature.info", "true"),
    ("feature.lengthchange", "true"),
    ("feature.pageable", "true"),
    ("feature.processing", "false"),
    ("feature.sortable", "true"),
    ("feature.statesave", "false"),
    ("feature.jqueryui", "false"),
];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Rebuild templates on every resolution.
    #[serde(default)]
    pub dev_mode: bool,

    /// Module path prefix custom extensions must live under.
    #[serde(default)]
    pub base_package: String,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Lowest layer of every group.
    #[serde(default = "default_options")]
    pub defaults: Value,

    /// User option groups, keyed by group name.
    #[serde(default)]
    pub groups: BTreeMap<String, Value>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            base_package: String::new(),
            logging: LoggingConfig::default(),
            defaults: default_options(),
            groups: BTreeMap::new(),
        }
    }
}

fn default_options() -> Value {
    nest_options(DEFAULT_OPTIONS.iter().copied())
}

impl RuntimeConfig {
    /// Every group name, `global` included.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.groups.keys().cloned().collect();
        names.insert(GLOBAL_GROUP.to_string());
        names.into_iter().collect()
    }

    /// Returns `true` if `group` can be resolved.
    pub fn has_group(&self, group: &str) -> bool {
        group == GLOBAL_GROUP || self.groups.contains_key(group)
    }

    /// The raw options of `group` after inheritance:
    /// defaults, then `global`, then the group itself.
    pub fn options_for(&self, group: &str) -> BTreeMap<String, String> {
        let mut options = flatten_options(&self.defaults);
        if let Some(global) = self.groups.get(GLOBAL_GROUP) {
            options.extend(flatten_options(global));
        }
        if group != GLOBAL_GROUP {
            if let Some(own) = self.groups.get(group) {
                options.extend(flatten_options(own));
            }
        }
        options
    }
}

// =============================================================================
// Option Trees
// =============================================================================

/// Flattens an option tree into normalized dotted names and raw strings.
///
/// Names differing only by case collapse into one entry, so a later layer
/// always replaces an earlier one. Booleans and numbers are written the way
/// a user would type them, arrays become comma-separated lists and `null`
/// becomes a blank value.
pub fn flatten_options(value: &Value) -> BTreeMap<String, String> {
    let mut options = BTreeMap::new();
    if let Value::Object(map) = value {
        flatten_into(&mut options, "", map);
    }
    options
}

fn flatten_into(options: &mut BTreeMap<String, String>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(options, &name, nested),
            other => {
                options.insert(normalize_name(&name), raw_string(other));
            }
        }
    }
}

fn raw_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(raw_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Builds an option tree from dotted names.
///
/// A name whose path runs into an existing leaf is kept as a literal dotted
/// key at that level.
pub fn nest_options<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Value {
    let mut root = Map::new();
    for (name, value) in entries {
        insert_dotted(&mut root, name, Value::String(value.to_string()));
    }
    Value::Object(root)
}

fn insert_dotted(map: &mut Map<String, Value>, name: &str, value: Value) {
    let Some((head, rest)) = name.split_once('.') else {
        map.insert(name.to_string(), value);
        return;
    };
    if map.get(head).is_some_and(|existing| !existing.is_object()) {
        map.insert(name.to_string(), value);
        return;
    }
    if let Value::Object(nested) = map
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        insert_dotted(nested, rest, value);
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Span lifecycle events to log.
    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,

    /// Log file, required when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module levels, e.g. `tessera_core = "debug"`.
    #[serde(default)]
    pub filters: BTreeMap<String, LogLevel>,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to the `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Span lifecycle events to log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}
