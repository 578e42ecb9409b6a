//! Per-request table and column configurations.
//!
//! A [`TableConfiguration`] starts from a clone of a resolved template and
//! layers entity specific overrides on top of it. Columns are resolved against
//! their own store; extensions they request are forwarded to the table.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreResult;
use crate::option::catalog::OptionCatalog;
use crate::option::key::{Opt, OptionKey, OptionScope};
use crate::option::standard;
use crate::store::{ConfigurationStore, PassReport};
use crate::value::{ExportConf, FromOptionValue};

/// Looks up every raw name, failing on the first unknown one.
fn lookup<N, V>(
    catalog: &OptionCatalog,
    raw: impl IntoIterator<Item = (N, V)>,
) -> CoreResult<Vec<(OptionKey, String)>>
where
    N: AsRef<str>,
    V: Into<String>,
{
    raw.into_iter()
        .map(|(name, value)| Ok((catalog.find(name.as_ref())?, value.into())))
        .collect()
}

// =============================================================================
// ColumnConfiguration
// =============================================================================

/// The resolved options of one column.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfiguration {
    store: ConfigurationStore,
}

impl ColumnConfiguration {
    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn value<T: FromOptionValue>(&self, opt: Opt<T>) -> Option<T> {
        self.store.value(opt)
    }

    /// The data property of the column, falling back to its name.
    pub fn property(&self) -> Option<String> {
        self.value(standard::COLUMN_PROPERTY)
            .or_else(|| self.value(standard::COLUMN_NAME))
    }
}

// =============================================================================
// TableConfiguration
// =============================================================================

/// The configuration of one table being rendered.
#[derive(Debug, Clone)]
pub struct TableConfiguration {
    id: String,
    locale: String,
    group: String,
    catalog: Arc<OptionCatalog>,
    store: ConfigurationStore,
    columns: Vec<ColumnConfiguration>,
}

impl TableConfiguration {
    /// Creates a table from a resolved template.
    pub fn new(
        id: impl Into<String>,
        locale: impl Into<String>,
        group: impl Into<String>,
        catalog: Arc<OptionCatalog>,
        template: ConfigurationStore,
    ) -> Self {
        Self {
            id: id.into(),
            locale: locale.into(),
            group: group.into(),
            catalog,
            store: template,
            columns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn columns(&self) -> &[ColumnConfiguration] {
        &self.columns
    }

    pub fn value<T: FromOptionValue>(&self, opt: Opt<T>) -> Option<T> {
        self.store.value(opt)
    }

    pub fn value_or<T: FromOptionValue>(&self, opt: Opt<T>, default: T) -> T {
        self.store.value_or(opt, default)
    }

    pub fn exports(&self) -> &BTreeMap<String, ExportConf> {
        self.store.exports()
    }

    /// Resolves table options over the template values.
    ///
    /// Unknown option names fail the whole call; rejected values are reported.
    pub fn configure<N, V>(&mut self, raw: impl IntoIterator<Item = (N, V)>) -> CoreResult<PassReport>
    where
        N: AsRef<str>,
        V: Into<String>,
    {
        let raw = lookup(&self.catalog, raw)?;
        Ok(self.store.resolve(&self.catalog, raw, OptionScope::Table))
    }

    /// Adds a column resolved from `raw`.
    pub fn configure_column<N, V>(
        &mut self,
        raw: impl IntoIterator<Item = (N, V)>,
    ) -> CoreResult<PassReport>
    where
        N: AsRef<str>,
        V: Into<String>,
    {
        let raw = lookup(&self.catalog, raw)?;
        let mut column = ColumnConfiguration::default();
        let report = column.store.resolve(&self.catalog, raw, OptionScope::Column);
        for name in &report.extensions {
            self.store.request_extension(name);
        }
        debug!(
            table = %self.id,
            index = self.columns.len(),
            "Column configured"
        );
        self.columns.push(column);
        Ok(report)
    }

    /// Appends `text` to the accumulator named `name`.
    pub fn append_option(&mut self, name: &str, text: &str) -> CoreResult<()> {
        let key = self.catalog.find(name)?;
        self.store.append(key, text)?;
        Ok(())
    }

    /// Extensions to activate: `main.extension.names` first, then the ones
    /// requested by option processors, without case-insensitive duplicates.
    pub fn enabled_extension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let configured = self
            .value(standard::MAIN_EXTENSION_NAMES)
            .unwrap_or_default();
        for name in configured
            .iter()
            .chain(self.store.requested_extensions())
        {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.clone());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, CoreError};
    use crate::option::vocabulary::FilterType;
    use crate::value::OptionValue;

    fn table() -> TableConfiguration {
        let catalog = Arc::new(OptionCatalog::standard().unwrap());
        TableConfiguration::new("myTable", "en", "global", catalog, ConfigurationStore::new())
    }

    #[test]
    fn test_column_filter_types() {
        let mut table = table();
        table
            .configure_column([("property", "id"), ("filterable", "true"), ("filtertype", "select")])
            .unwrap();
        table.configure_column([("property", "name")]).unwrap();

        let columns = table.columns();
        assert_eq!(columns[0].value(standard::COLUMN_FILTER_TYPE), Some(FilterType::Select));
        assert_eq!(columns[1].value(standard::COLUMN_FILTER_TYPE), None);
        assert_eq!(table.store().requested_extensions(), ["filtering".to_string()]);
    }

    #[test]
    fn test_filterable_defaults_to_input() {
        let mut table = table();
        table.configure_column([("filterable", "true")]).unwrap();
        assert_eq!(
            table.columns()[0].value(standard::COLUMN_FILTER_TYPE),
            Some(FilterType::Input)
        );
    }

    #[test]
    fn test_unknown_option_is_fatal() {
        let mut table = table();
        let err = table.configure([("feature.nope", "1")]).unwrap_err();
        assert_eq!(err, CoreError::Catalog(CatalogError::unknown("feature.nope")));
    }

    #[test]
    fn test_enabled_extension_names() {
        let mut table = table();
        table
            .configure([
                ("main.extension.names", "myExt, scroller"),
                ("plugin.scroller", "true"),
                ("ajax.serverside", "true"),
            ])
            .unwrap();
        assert_eq!(
            table.enabled_extension_names(),
            vec!["myext".to_string(), "scroller".to_string(), "serverSide".to_string()]
        );
    }

    #[test]
    fn test_append_option() {
        let mut table = table();
        table.append_option("css.style", "width:100%;").unwrap();
        table.append_option("css.style", "display:none;").unwrap();
        assert_eq!(
            table.store().get("css.style"),
            Some(&OptionValue::Buffer("width:100%;display:none;".into()))
        );
    }

    #[test]
    fn test_property_falls_back_to_name() {
        let mut table = table();
        table.configure_column([("name", "firstName")]).unwrap();
        assert_eq!(table.columns()[0].property().as_deref(), Some("firstName"));
    }
}
