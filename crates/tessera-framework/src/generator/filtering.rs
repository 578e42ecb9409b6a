use tracing::debug;

use tessera_core::standard;
use tessera_core::{ColumnConfiguration, TableConfiguration};

use super::keys;
use crate::config::{ConfigMap, ConfigValue};
use crate::error::ExtensionResult;
use crate::extension::ConfigGenerator;

/// Configuration of the column filtering add-on.
///
/// Columns without a filter get a `null` entry so that entries stay aligned
/// with the table columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnFilteringGenerator;

fn column_filter(column: &ColumnConfiguration) -> ConfigValue {
    let filterable = column.value(standard::COLUMN_FILTERABLE).unwrap_or(false);
    let Some(kind) = column
        .value(standard::COLUMN_FILTER_TYPE)
        .filter(|_| filterable)
    else {
        return ConfigValue::Null;
    };

    let mut filter = ConfigMap::new();
    filter.insert(keys::FILTER_TYPE, kind.widget());
    if let Some(selector) = column.value(standard::COLUMN_SELECTOR) {
        filter.insert(keys::S_SELECTOR, selector);
    }
    if let Some(values) = column.value(standard::COLUMN_FILTER_VALUES) {
        filter.insert(keys::FILTER_VALUES, ConfigValue::snippet(values));
    }
    if let Some(length) = column.value(standard::COLUMN_FILTER_LENGTH) {
        filter.insert(keys::FILTER_LENGTH, length);
    }
    filter.into()
}

impl ConfigGenerator for ColumnFilteringGenerator {
    fn generate(&self, table: &TableConfiguration) -> ExtensionResult<ConfigMap> {
        debug!(table = %table.id(), "Generating the column filtering configuration");
        let mut conf = ConfigMap::new();
        if let Some(placeholder) = table.value(standard::FEATURE_FILTER_PLACEHOLDER) {
            conf.insert(keys::S_PLACEHOLDER, placeholder.as_str());
        }
        let columns: Vec<ConfigValue> = table.columns().iter().map(column_filter).collect();
        conf.insert(keys::AO_COLUMNS, columns);
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tessera_core::{ConfigurationStore, OptionCatalog};

    #[test]
    fn test_filter_per_column() {
        let catalog = Arc::new(OptionCatalog::standard().unwrap());
        let mut table =
            TableConfiguration::new("t", "en", "global", catalog, ConfigurationStore::new());
        table
            .configure([("feature.filterplaceholder", "head_after")])
            .unwrap();
        table
            .configure_column([
                ("property", "city"),
                ("filterable", "true"),
                ("filtertype", "select"),
                ("filtervalues", "['Paris','Lyon']"),
            ])
            .unwrap();
        table.configure_column([("property", "id")]).unwrap();
        table
            .configure_column([("filterable", "true"), ("filterlength", "3")])
            .unwrap();

        let conf = ColumnFilteringGenerator.generate(&table).unwrap();
        assert_eq!(
            conf.to_js(),
            r#"{"aoColumns":[{"type":"select","values":['Paris','Lyon']},null,{"iFilterLength":3,"type":"text"}],"sPlaceHolder":"head_after"}"#
        );
    }
}
