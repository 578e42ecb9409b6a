use std::collections::BTreeMap;

use tracing::debug;

use tessera_core::standard::{self, I18N_MESSAGES};
use tessera_core::{ColumnConfiguration, TableConfiguration};

use super::keys;
use crate::config::{ConfigMap, ConfigValue};

/// Builds the main widget configuration from the table options.
///
/// Only options that are set produce a key. Extensions are merged on top of
/// the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainConfigGenerator;

impl MainConfigGenerator {
    pub fn generate(&self, table: &TableConfiguration) -> ConfigMap {
        debug!(table = %table.id(), "Generating the main configuration");
        let mut conf = ConfigMap::new();
        columns(&mut conf, table);
        i18n(&mut conf, table);
        features(&mut conf, table);
        scrolling(&mut conf, table);
        misc(&mut conf, table);
        ajax(&mut conf, table);
        conf
    }
}

fn insert_opt(conf: &mut ConfigMap, key: &str, value: Option<impl Into<ConfigValue>>) {
    if let Some(value) = value {
        conf.insert(key, value);
    }
}

fn column_entry(column: &ColumnConfiguration, ajax: bool) -> ConfigMap {
    let mut entry = ConfigMap::new();
    insert_opt(&mut entry, keys::S_NAME, column.value(standard::COLUMN_NAME));
    insert_opt(&mut entry, keys::B_SORTABLE, column.value(standard::COLUMN_SORTABLE));
    insert_opt(&mut entry, keys::B_SEARCHABLE, column.value(standard::COLUMN_SEARCHABLE));
    insert_opt(&mut entry, keys::B_VISIBLE, column.value(standard::COLUMN_VISIBLE));
    insert_opt(&mut entry, keys::M_DATA, column.value(standard::COLUMN_PROPERTY));
    if let Some(render) = column.value(standard::COLUMN_RENDER_FUNCTION) {
        entry.insert(keys::M_RENDER, ConfigValue::snippet(render));
    }
    entry.insert(
        keys::S_DEFAULT_CONTENT,
        column
            .value(standard::COLUMN_DEFAULT_VALUE)
            .unwrap_or_default(),
    );
    if ajax {
        let class = column
            .value(standard::COLUMN_CSS_CELL_CLASS)
            .filter(|class| !class.trim().is_empty());
        insert_opt(&mut entry, keys::S_CLASS, class);
    }
    if let Some(directions) = column.value(standard::COLUMN_SORT_DIRECTION) {
        let directions: Vec<ConfigValue> = directions
            .iter()
            .map(|direction| ConfigValue::from(direction.as_str()))
            .collect();
        entry.insert(keys::AS_SORTING, directions);
    }
    insert_opt(&mut entry, keys::S_TYPE, column.value(standard::COLUMN_SORT_TYPE));
    entry
}

fn columns(conf: &mut ConfigMap, table: &TableConfiguration) {
    let ajax = table.value(standard::AJAX_SOURCE).is_some();
    let entries: Vec<ConfigValue> = table
        .columns()
        .iter()
        .map(|column| column_entry(column, ajax).into())
        .collect();
    conf.insert(keys::AO_COLUMNS, entries);

    // Initial sorting: explicit orders first, the others in column order.
    let mut ordered: Vec<(i64, usize, String)> = Vec::new();
    let mut unordered: Vec<(usize, String)> = Vec::new();
    for (index, column) in table.columns().iter().enumerate() {
        let Some(direction) = column.value(standard::COLUMN_SORT_INIT_DIRECTION) else {
            continue;
        };
        match column.value(standard::COLUMN_SORT_INIT_ORDER) {
            Some(order) => ordered.push((order, index, direction)),
            None => unordered.push((index, direction)),
        }
    }
    ordered.sort_by_key(|(order, index, _)| (*order, *index));
    if !ordered.is_empty() || !unordered.is_empty() {
        let sorting: Vec<ConfigValue> = ordered
            .into_iter()
            .map(|(_, index, direction)| (index, direction))
            .chain(unordered)
            .map(|(index, direction)| {
                ConfigValue::Array(vec![
                    ConfigValue::Int(index as i64),
                    ConfigValue::from(direction),
                ])
            })
            .collect();
        conf.insert(keys::AA_SORTING, sorting);
    }
}

fn i18n(conf: &mut ConfigMap, table: &TableConfiguration) {
    let mut language = ConfigMap::new();
    let mut nested: BTreeMap<&str, ConfigMap> = BTreeMap::new();
    for (option, key) in I18N_MESSAGES {
        let Some(message) = table.store().get(option).and_then(|v| v.as_text()) else {
            continue;
        };
        match key.split_once('.') {
            Some((group, key)) => nested.entry(group).or_default().insert(key, message),
            None => language.insert(*key, message),
        }
    }
    for (group, map) in nested {
        language.insert(group, map);
    }
    if !language.is_empty() {
        conf.insert(keys::O_LANGUAGE, language);
    }
}

fn features(conf: &mut ConfigMap, table: &TableConfiguration) {
    insert_opt(conf, keys::B_FILTER, table.value(standard::FEATURE_FILTERABLE));
    insert_opt(conf, keys::B_INFO, table.value(standard::FEATURE_INFO));
    insert_opt(conf, keys::B_PAGINATE, table.value(standard::FEATURE_PAGEABLE));
    insert_opt(conf, keys::B_SORT, table.value(standard::FEATURE_SORTABLE));
}

fn scrolling(conf: &mut ConfigMap, table: &TableConfiguration) {
    insert_opt(conf, keys::S_SCROLL_Y, table.value(standard::FEATURE_SCROLL_Y));
    insert_opt(
        conf,
        keys::B_SCROLL_COLLAPSE,
        table.value(standard::FEATURE_SCROLL_COLLAPSE),
    );
    insert_opt(conf, keys::S_SCROLL_X, table.value(standard::FEATURE_SCROLL_X));
    insert_opt(
        conf,
        keys::S_SCROLL_X_INNER,
        table.value(standard::FEATURE_SCROLL_X_INNER),
    );
}

fn misc(conf: &mut ConfigMap, table: &TableConfiguration) {
    insert_opt(conf, keys::S_DOM, table.value(standard::FEATURE_DOM));
    insert_opt(conf, keys::B_AUTO_WIDTH, table.value(standard::FEATURE_AUTO_WIDTH));
    insert_opt(
        conf,
        keys::I_DISPLAY_LENGTH,
        table.value(standard::FEATURE_DISPLAY_LENGTH),
    );
    insert_opt(
        conf,
        keys::B_LENGTH_CHANGE,
        table.value(standard::FEATURE_LENGTH_CHANGE),
    );
    insert_opt(
        conf,
        keys::S_PAGINATION_TYPE,
        table
            .value(standard::FEATURE_PAGINATION_TYPE)
            .map(|kind| kind.as_str()),
    );
    insert_opt(conf, keys::B_STATE_SAVE, table.value(standard::FEATURE_STATE_SAVE));
    insert_opt(conf, keys::B_JQUERY_UI, table.value(standard::FEATURE_JQUERY_UI));
    if let Some(menu) = table.value(standard::FEATURE_LENGTH_MENU) {
        conf.insert(keys::A_LENGTH_MENU, ConfigValue::snippet(menu));
    }
    if let Some(classes) = table.value(standard::CSS_STRIPE_CLASSES) {
        conf.insert(keys::AS_STRIPE_CLASSES, ConfigValue::snippet(classes));
    }
}

fn ajax(conf: &mut ConfigMap, table: &TableConfiguration) {
    insert_opt(conf, keys::B_PROCESSING, table.value(standard::FEATURE_PROCESSING));
    insert_opt(conf, keys::B_DEFER_RENDER, table.value(standard::AJAX_DEFER_RENDER));
    insert_opt(conf, keys::S_AJAX_SOURCE, table.value(standard::AJAX_SOURCE));
    if let Some(server_side) = table.value(standard::AJAX_SERVER_SIDE) {
        conf.insert(keys::B_SERVER_SIDE, server_side);
        if let Some(params) = table.value(standard::AJAX_PARAMS) {
            conf.insert(keys::FN_SERVER_PARAMS, ConfigValue::snippet(params));
        }
    }
}
