//! The extension model.
//!
//! An [`Extension`] is a stateless factory: every call to
//! [`Extension::setup`] inspects a table and returns a fresh
//! [`ExtensionContribution`], which the
//! [`ExtensionComposer`](crate::composer::ExtensionComposer) merges into the
//! table's script and configuration.
//!
//! # Basic usage
//!
//! ```rust,ignore
//! use tessera::prelude::*;
//!
//! #[derive(Default)]
//! #[register_extension(custom)]
//! pub struct Greeter;
//!
//! impl Extension for Greeter {
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
//!         let mut contribution = ExtensionContribution::new();
//!         contribution.append(Slot::AfterAll, &format!("console.log('{}');", table.id()));
//!         Ok(contribution)
//!     }
//! }
//! ```

use std::fmt;

use tessera_core::TableConfiguration;

use crate::config::{ConfigMap, ConfigValue, JsFunction, MergeMode};
use crate::error::ExtensionResult;
use crate::script::Slot;

// ─── Extension trait ──────────────────────────────────────────────────────────

/// A pluggable contributor of script fragments and configuration values.
///
/// Implementations must not keep state between calls.
pub trait Extension: Send + Sync {
    /// Identity of the extension, matched case-insensitively.
    fn name(&self) -> &str;

    /// Builds this extension's contribution for `table`.
    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution>;
}

/// Produces a separate configuration object, passed to the post-init call.
pub trait ConfigGenerator: Send + Sync {
    fn generate(&self, table: &TableConfiguration) -> ExtensionResult<ConfigMap>;
}

// ─── Contribution ─────────────────────────────────────────────────────────────

/// A configuration value an extension wants merged into the main map.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: ConfigValue,
    pub mode: MergeMode,
}

/// Widget callbacks, each merged into a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Init,
    PreDraw,
    Draw,
    Row,
}

impl Callback {
    /// The configuration key of the callback.
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "fnInitComplete",
            Self::PreDraw => "fnPreDrawCallback",
            Self::Draw => "fnDrawCallback",
            Self::Row => "fnRowCallback",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Init => &["oSettings", "json"],
            Self::PreDraw | Self::Draw => &["oSettings"],
            Self::Row => &["nRow", "aData", "iDisplayIndex", "iDisplayIndexFull"],
        }
    }
}

/// Everything one extension contributes to one table.
#[derive(Default)]
pub struct ExtensionContribution {
    before_all: String,
    before_document_ready_start: String,
    after_document_ready_start: String,
    before_document_ready_end: String,
    after_all: String,
    parameters: Vec<Parameter>,
    function: Option<String>,
    generator: Option<Box<dyn ConfigGenerator>>,
    option_appends: Vec<(String, String)>,
}

impl ExtensionContribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `code` to one of the five script slots.
    pub fn append(&mut self, slot: Slot, code: &str) {
        let section = match slot {
            Slot::BeforeAll => &mut self.before_all,
            Slot::BeforeDocumentReadyStart => &mut self.before_document_ready_start,
            Slot::AfterDocumentReadyStart => &mut self.after_document_ready_start,
            Slot::BeforeDocumentReadyEnd => &mut self.before_document_ready_end,
            Slot::AfterAll => &mut self.after_all,
        };
        section.push_str(code);
    }

    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::BeforeAll => &self.before_all,
            Slot::BeforeDocumentReadyStart => &self.before_document_ready_start,
            Slot::AfterDocumentReadyStart => &self.after_document_ready_start,
            Slot::BeforeDocumentReadyEnd => &self.before_document_ready_end,
            Slot::AfterAll => &self.after_all,
        }
    }

    /// Adds a parameter that replaces any existing value.
    pub fn add_parameter(&mut self, name: &str, value: impl Into<ConfigValue>) {
        self.add_parameter_with(name, value, MergeMode::Override);
    }

    pub fn add_parameter_with(
        &mut self,
        name: &str,
        value: impl Into<ConfigValue>,
        mode: MergeMode,
    ) {
        self.parameters.push(Parameter {
            name: name.to_string(),
            value: value.into(),
            mode,
        });
    }

    /// Adds `code` to the body of a widget callback.
    pub fn add_callback(&mut self, callback: Callback, code: &str) {
        let function = JsFunction::new(code).with_args(callback.args().iter().copied());
        self.add_parameter_with(callback.name(), function, MergeMode::Append);
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Declares the function chained after the widget initialization.
    pub fn set_function(&mut self, function: &str) {
        self.function = Some(function.to_string());
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn set_generator(&mut self, generator: impl ConfigGenerator + 'static) {
        self.generator = Some(Box::new(generator));
    }

    pub fn generator(&self) -> Option<&dyn ConfigGenerator> {
        self.generator.as_deref()
    }

    /// Appends `text` to the table option `option` once merged.
    pub fn append_option(&mut self, option: &str, text: &str) {
        self.option_appends
            .push((option.to_string(), text.to_string()));
    }

    pub fn option_appends(&self) -> &[(String, String)] {
        &self.option_appends
    }
}

impl fmt::Debug for ExtensionContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionContribution")
            .field("before_all", &self.before_all)
            .field("before_document_ready_start", &self.before_document_ready_start)
            .field("after_document_ready_start", &self.after_document_ready_start)
            .field("before_document_ready_end", &self.before_document_ready_end)
            .field("after_all", &self.after_all)
            .field("parameters", &self.parameters)
            .field("function", &self.function)
            .field("generator", &self.generator.is_some())
            .field("option_appends", &self.option_appends)
            .finish()
    }
}
