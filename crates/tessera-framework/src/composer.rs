//! Merging extension contributions into one script and configuration.

use std::sync::Arc;

use tracing::{debug, warn};

use tessera_core::TableConfiguration;

use crate::config::ConfigMap;
use crate::error::{CompositionError, CompositionResult, ExtensionError};
use crate::extension::{Extension, ExtensionContribution};
use crate::script::{ScriptBuffer, Slot};

/// Outcome of one composition.
#[derive(Debug, Default)]
pub struct CompositionReport {
    /// Names of the extensions that were merged, in order.
    pub merged: Vec<String>,
    /// Extensions that failed; none of their contribution was kept.
    pub errors: Vec<CompositionError>,
}

impl CompositionReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the first failure, if any.
    pub fn into_result(self) -> CompositionResult<Vec<String>> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.merged),
        }
    }
}

/// A contribution whose generator already ran.
struct Prepared {
    contribution: ExtensionContribution,
    extra_configuration: Option<String>,
}

/// Runs extensions against a table and merges what they contribute.
pub struct ExtensionComposer;

impl ExtensionComposer {
    /// Sets up and merges every extension, in order.
    ///
    /// Each extension sees the table as left by the extensions merged before
    /// it. A failing extension is skipped entirely and reported; the others
    /// are still merged.
    pub fn process(
        table: &mut TableConfiguration,
        extensions: &[Arc<dyn Extension>],
        script: &mut ScriptBuffer,
        config: &mut ConfigMap,
    ) -> CompositionReport {
        let mut report = CompositionReport::default();
        for extension in extensions {
            let name = extension.name().to_string();
            match Self::prepare(table, extension.as_ref()) {
                Ok(prepared) => match Self::commit(table, prepared, script, config) {
                    Ok(()) => {
                        debug!(table = %table.id(), extension = %name, "Extension merged");
                        report.merged.push(name);
                    }
                    Err(source) => Self::reject(&mut report, table, name, source),
                },
                Err(source) => Self::reject(&mut report, table, name, source),
            }
        }
        report
    }

    fn reject(
        report: &mut CompositionReport,
        table: &TableConfiguration,
        name: String,
        source: ExtensionError,
    ) {
        let err = CompositionError::new(name, source);
        warn!(table = %table.id(), error = %err, "Extension skipped");
        report.errors.push(err);
    }

    fn prepare(
        table: &TableConfiguration,
        extension: &dyn Extension,
    ) -> Result<Prepared, ExtensionError> {
        let contribution = extension.setup(table)?;
        let extra_configuration = match contribution.generator() {
            Some(generator) => {
                debug!(extension = extension.name(), "Running configuration generator");
                Some(generator.generate(table)?.to_js_pretty())
            }
            None => None,
        };
        Ok(Prepared {
            contribution,
            extra_configuration,
        })
    }

    /// Applies a prepared contribution. Option appends are checked first so
    /// that a failure leaves everything untouched.
    fn commit(
        table: &mut TableConfiguration,
        prepared: Prepared,
        script: &mut ScriptBuffer,
        config: &mut ConfigMap,
    ) -> Result<(), ExtensionError> {
        let contribution = prepared.contribution;

        if !contribution.option_appends().is_empty() {
            let mut updated = table.clone();
            for (option, text) in contribution.option_appends() {
                updated.append_option(option, text)?;
            }
            *table = updated;
        }

        for slot in Slot::ALL {
            let code = contribution.slot(slot);
            if !code.is_empty() {
                script.append(slot, code);
            }
        }
        if let Some(function) = contribution.function() {
            script.append_trailer_call(function);
        }
        if let Some(extra) = &prepared.extra_configuration {
            script.append_extra_configuration(extra);
        }

        for parameter in contribution.parameters() {
            config.merge(&parameter.name, parameter.value.clone(), parameter.mode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigValue, JsFunction, MergeMode};
    use crate::error::ExtensionResult;
    use crate::extension::ConfigGenerator;
    use tessera_core::{ConfigurationStore, OptionCatalog};

    fn table() -> TableConfiguration {
        let catalog = Arc::new(OptionCatalog::standard().unwrap());
        TableConfiguration::new("t", "en", "global", catalog, ConfigurationStore::new())
    }

    struct Appender {
        name: &'static str,
        code: &'static str,
        mode: MergeMode,
    }

    impl Extension for Appender {
        fn name(&self) -> &str {
            self.name
        }

        fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
            let mut contribution = ExtensionContribution::new();
            contribution.add_parameter_with("fnServerData", self.code, self.mode);
            contribution.append(Slot::BeforeAll, self.name);
            Ok(contribution)
        }
    }

    struct Failing;

    impl Extension for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
            Err(ExtensionError::configuration("missing selector"))
        }
    }

    struct FailingGenerator;

    impl ConfigGenerator for FailingGenerator {
        fn generate(&self, _table: &TableConfiguration) -> ExtensionResult<ConfigMap> {
            Err(ExtensionError::generator("boom"))
        }
    }

    struct WithGenerator;

    impl Extension for WithGenerator {
        fn name(&self) -> &str {
            "withGenerator"
        }

        fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
            let mut contribution = ExtensionContribution::new();
            contribution.append(Slot::AfterAll, "never();");
            contribution.set_generator(FailingGenerator);
            Ok(contribution)
        }
    }

    struct StyleAppender;

    impl Extension for StyleAppender {
        fn name(&self) -> &str {
            "style"
        }

        fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
            let mut contribution = ExtensionContribution::new();
            let seen = table.store().get("css.style").and_then(|v| v.as_text().map(str::to_string));
            contribution.append(Slot::AfterAll, &seen.unwrap_or_default());
            contribution.append_option("css.style", "display:none;");
            Ok(contribution)
        }
    }

    #[test]
    fn test_successive_appends() {
        let mut table = table();
        let mut script = ScriptBuffer::new();
        let mut config = ConfigMap::new();
        config.insert("fnServerData", JsFunction::new("base"));

        let extensions: Vec<Arc<dyn Extension>> = vec![
            Arc::new(Appender { name: "a", code: "foo", mode: MergeMode::Append }),
            Arc::new(Appender { name: "b", code: "bar", mode: MergeMode::Append }),
        ];
        let report = ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
        assert!(report.is_ok());
        assert_eq!(report.merged, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(script.before_all, "ab");
        let Some(ConfigValue::Function(function)) = config.get("fnServerData") else {
            panic!("expected a function");
        };
        assert_eq!(function.code, "barfoobase");
    }

    #[test]
    fn test_override_yields_new_value() {
        let mut table = table();
        let mut script = ScriptBuffer::new();
        let mut config = ConfigMap::new();
        config.insert("fnServerData", JsFunction::new("base"));

        let extensions: Vec<Arc<dyn Extension>> = vec![Arc::new(Appender {
            name: "a",
            code: "replaced",
            mode: MergeMode::Override,
        })];
        ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
        assert_eq!(config.get("fnServerData"), Some(&ConfigValue::from("replaced")));
    }

    #[test]
    fn test_failure_is_partial() {
        let mut table = table();
        let mut script = ScriptBuffer::new();
        let mut config = ConfigMap::new();

        let extensions: Vec<Arc<dyn Extension>> = vec![
            Arc::new(Appender { name: "a", code: "x", mode: MergeMode::Append }),
            Arc::new(Failing),
            Arc::new(WithGenerator),
            Arc::new(Appender { name: "b", code: "y", mode: MergeMode::Append }),
        ];
        let report = ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
        assert_eq!(report.merged, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].extension, "failing");
        assert_eq!(report.errors[1].extension, "withGenerator");
        assert!(script.after_all.is_empty());
        assert_eq!(config.get("fnServerData"), Some(&ConfigValue::from("xy")));

        let err = report.into_result().unwrap_err();
        assert_eq!(err.extension, "failing");
    }

    #[test]
    fn test_option_appends_visible_to_later_extensions() {
        let mut table = table();
        let mut script = ScriptBuffer::new();
        let mut config = ConfigMap::new();

        let extensions: Vec<Arc<dyn Extension>> =
            vec![Arc::new(StyleAppender), Arc::new(StyleAppender)];
        ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
        // The first call saw nothing, the second saw the first append.
        assert_eq!(script.after_all, "display:none;");
        assert_eq!(
            table.store().get("css.style").and_then(|v| v.as_text()),
            Some("display:none;display:none;")
        );
    }

    #[test]
    fn test_generator_output_and_function() {
        struct Filtering;
        struct Generator;

        impl ConfigGenerator for Generator {
            fn generate(&self, _table: &TableConfiguration) -> ExtensionResult<ConfigMap> {
                let mut map = ConfigMap::new();
                map.insert("sPlaceHolder", "foot");
                Ok(map)
            }
        }

        impl Extension for Filtering {
            fn name(&self) -> &str {
                "filtering"
            }

            fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
                let mut contribution = ExtensionContribution::new();
                contribution.set_function("columnFilter");
                contribution.set_generator(Generator);
                Ok(contribution)
            }
        }

        let mut table = table();
        let mut script = ScriptBuffer::new();
        let mut config = ConfigMap::new();
        let extensions: Vec<Arc<dyn Extension>> = vec![Arc::new(Filtering)];
        ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
        assert_eq!(script.trailer_calls, "columnFilter");
        assert_eq!(script.extra_configuration, "{\n  \"sPlaceHolder\": \"foot\"\n}");
    }
}
