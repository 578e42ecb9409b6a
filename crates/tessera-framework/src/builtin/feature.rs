//! Feature extensions.

use tessera_core::option::vocabulary::{FilterPlaceholder, PaginationType};
use tessera_core::{ExportConf, TableConfiguration, standard};

use super::{escape_single_quotes, js_array};
use crate::config::{ConfigValue, MergeMode};
use crate::error::{ExtensionError, ExtensionResult};
use crate::extension::{Callback, Extension, ExtensionContribution};
use crate::generator::{ColumnFilteringGenerator, keys};
use crate::register_extension;
use crate::script::Slot;

// ─── Column filtering ─────────────────────────────────────────────────────────

/// Per-column filtering widgets, configured by [`ColumnFilteringGenerator`].
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Filtering;

impl Extension for Filtering {
    fn name(&self) -> &str {
        "filtering"
    }

    fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        contribution.set_function("columnFilter");
        contribution.set_generator(ColumnFilteringGenerator);
        Ok(contribution)
    }
}

/// Filters every column at once when the filter button is clicked.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct MultiFilter;

impl MultiFilter {
    fn check(table: &TableConfiguration) -> ExtensionResult<String> {
        let selector = table
            .value(standard::FEATURE_FILTER_SELECTOR)
            .filter(|selector| !selector.trim().is_empty())
            .ok_or_else(|| {
                ExtensionError::configuration(
                    "a filter selector must be set in order to make the multi-filter work",
                )
            })?;
        let unnamed = table.columns().iter().any(|column| {
            column
                .value(standard::COLUMN_NAME)
                .is_none_or(|name| name.trim().is_empty())
        });
        if unnamed {
            return Err(ExtensionError::configuration(
                "all columns must have a name in order to make the multi-filter work",
            ));
        }
        Ok(selector)
    }
}

impl Extension for MultiFilter {
    fn name(&self) -> &str {
        "multiFilter"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let filter_selector = Self::check(table)?;
        let id = table.id();
        let external = table.value(standard::FEATURE_FILTER_PLACEHOLDER)
            == Some(FilterPlaceholder::None);

        // Widgets rendered outside the table are looked up through the
        // column selectors.
        let mut selectors: Vec<String> = Vec::new();
        for column in table.columns() {
            if let Some(selector) = column
                .value(standard::COLUMN_SELECTOR)
                .filter(|selector| !selector.trim().is_empty())
            {
                if !selectors.contains(&selector) {
                    selectors.push(selector);
                }
            }
        }
        let selectors = js_array(selectors.iter().map(String::as_str));

        let mut contribution = ExtensionContribution::new();
        let js = if external {
            format!(
                "\n$('{filter_selector}').click(function() {{\n\
                 \x20  var filterParams = {{}};\n\
                 \x20  $.each({selectors}, function(i, selector){{\n\
                 \x20     $(selector + ' .tessera_column_filter').each(function (index) {{\n\
                 \x20        if(!$(this).hasClass('search_init') && $(this).val() != ''){{\n\
                 \x20           filterParams[$(this).attr('data-column-name')] = $(this).val();\n\
                 \x20        }}\n\
                 \x20     }});\n\
                 \x20  }});\n\
                 \x20  oTable_{id}.fnMultiFilter( filterParams );\n\
                 }});\n"
            )
        } else {
            format!(
                "\n$('{filter_selector}').click(function() {{\n\
                 \x20  var filterParams = {{}};\n\
                 \x20  $('#{id} .tessera_column_filter').each(function (index) {{\n\
                 \x20     if(!$(this).hasClass('search_init') && $(this).val() != ''){{\n\
                 \x20        filterParams[$(this).attr('data-column-name')] = $(this).val();\n\
                 \x20     }}\n\
                 \x20  }});\n\
                 \x20  oTable_{id}.fnMultiFilter( filterParams );\n\
                 }});"
            )
        };
        contribution.append(Slot::BeforeDocumentReadyEnd, &js);

        if let Some(clear_selector) = table
            .value(standard::FEATURE_FILTER_CLEAR_SELECTOR)
            .filter(|selector| !selector.trim().is_empty())
        {
            let js = if external {
                format!(
                    "\n$('{clear_selector}').click(function() {{\n\
                     \x20  oTable_{id}.fnFilterClear();\n\
                     \x20  $.each({selectors}, function(i, selector){{\n\
                     \x20     $(selector + ' .tessera_column_filter').each(function (index) {{\n\
                     \x20        $(this).val('');\n\
                     \x20        $(this).trigger('blur');\n\
                     \x20     }});\n\
                     \x20  }});\n\
                     }});\n"
                )
            } else {
                format!(
                    "\n$('{clear_selector}').click(function() {{\n\
                     \x20  $('#{id} .tessera_column_filter').each(function (index) {{\n\
                     \x20     $(this).val('');\n\
                     \x20     $(this).trigger('blur');\n\
                     \x20  }});\n\
                     \x20  oTable_{id}.fnFilterClear();\n\
                     }});\n"
                )
            };
            contribution.append(Slot::BeforeDocumentReadyEnd, &js);
        }
        Ok(contribution)
    }
}

// ─── Ajax ─────────────────────────────────────────────────────────────────────

/// Caches server-side pages on the client.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Pipelining;

impl Extension for Pipelining {
    fn name(&self) -> &str {
        "pipelining"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        if let Some(size) = table
            .value(standard::AJAX_PIPE_SIZE)
            .filter(|size| *size != 5)
        {
            contribution.append(Slot::BeforeAll, &format!("var iPipe = {size};\n"));
        }
        contribution.add_parameter(
            keys::FN_SERVER_DATA,
            ConfigValue::snippet("fnDataTablesPipeline"),
        );
        Ok(contribution)
    }
}

/// Fixes column widths after each server-side draw.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct ServerSide;

impl Extension for ServerSide {
    fn name(&self) -> &str {
        "serverSide"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        contribution.add_callback(
            Callback::Init,
            &format!("oTable_{}.fnAdjustColumnSizing(true);", table.id()),
        );
        Ok(contribution)
    }
}

/// Reloads the Ajax source when an element is clicked.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct AjaxReload;

impl Extension for AjaxReload {
    fn name(&self) -> &str {
        "ajaxReload"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let selector = table
            .value(standard::AJAX_RELOAD_SELECTOR)
            .ok_or_else(|| ExtensionError::configuration("a reload selector must be set"))?;
        let body = match table.value(standard::AJAX_RELOAD_FUNCTION) {
            Some(function) => format!("{function}();"),
            None => format!("oTable_{}.fnReloadAjax();", table.id()),
        };

        let mut contribution = ExtensionContribution::new();
        contribution.append(
            Slot::BeforeDocumentReadyEnd,
            &format!("$('{selector}').bind('click', function() {{{body}}});"),
        );
        Ok(contribution)
    }
}

// ─── Display ──────────────────────────────────────────────────────────────────

/// Shows the table once initialized, optionally fading it in.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Appear;

impl Extension for Appear {
    fn name(&self) -> &str {
        "appear"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let id = table.id();
        let mut contribution = ExtensionContribution::new();
        match table.value(standard::FEATURE_APPEAR).as_deref() {
            Some("fadein") => {
                contribution.append_option(standard::CSS_STYLE.name(), "display:none;");
                let duration = table
                    .value(standard::FEATURE_APPEAR_DURATION)
                    .map(|duration| duration.to_string())
                    .unwrap_or_default();
                contribution.append(
                    Slot::BeforeDocumentReadyEnd,
                    &format!("$('#{id}').fadeIn({duration});"),
                );
            }
            _ => contribution.append(Slot::BeforeDocumentReadyEnd, &format!("$('#{id}').show();")),
        }
        Ok(contribution)
    }
}

/// Adds one link per enabled export format above the table.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Export;

impl Export {
    fn link(conf: &ExportConf) -> String {
        let href = conf.url.as_deref().unwrap_or("#");
        let class = conf
            .export_class
            .as_deref()
            .map(|class| format!(" class=\"{class}\""))
            .unwrap_or_default();
        format!(
            "<a href=\"{href}\"{class} style=\"margin-left:2px;\">{}</a>",
            conf.label
        )
    }

    fn container(table: &TableConfiguration) -> String {
        let mut class = "tessera_export".to_string();
        if let Some(extra) = table
            .value(standard::EXPORT_CONTAINER_CLASS)
            .filter(|extra| !extra.trim().is_empty())
        {
            class.push(' ');
            class.push_str(extra.trim());
        }
        let mut style = "float:right;".to_string();
        if let Some(extra) = table.value(standard::EXPORT_CONTAINER_STYLE) {
            style.push_str(&extra);
        }
        let links: String = table.exports().values().map(Self::link).collect();
        format!("<div class=\"{class}\" style=\"{style}\">{links}</div>")
    }
}

impl Extension for Export {
    fn name(&self) -> &str {
        "export"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        if table.exports().is_empty() {
            return Err(ExtensionError::configuration("no export format is enabled"));
        }
        let container = escape_single_quotes(&Self::container(table));
        let mut contribution = ExtensionContribution::new();
        contribution.add_callback(
            Callback::Init,
            &format!("$('#{}_wrapper').prepend('{container}');", table.id()),
        );
        Ok(contribution)
    }
}

// ─── Pagination types ─────────────────────────────────────────────────────────

macro_rules! pagination_type {
    ($($(#[$meta:meta])* $name:ident => $kind:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default)]
            #[register_extension(builtin)]
            pub struct $name;

            impl $name {
                const KIND: PaginationType = PaginationType::$kind;
            }

            impl Extension for $name {
                fn name(&self) -> &str {
                    Self::KIND.extension_name().unwrap_or(stringify!($name))
                }

                fn setup(
                    &self,
                    _table: &TableConfiguration,
                ) -> ExtensionResult<ExtensionContribution> {
                    let mut contribution = ExtensionContribution::new();
                    contribution.add_parameter_with(
                        keys::S_PAGINATION_TYPE,
                        Self::KIND.as_str(),
                        MergeMode::Override,
                    );
                    Ok(contribution)
                }
            }
        )+
    };
}

pagination_type! {
    /// Pagination with a page number input.
    PaginationTypeInput => Input,
    /// Pagination with a page list box.
    PaginationTypeListbox => Listbox,
    /// Pagination scrolling through pages while the mouse is held.
    PaginationTypeScrolling => Scrolling,
    /// First, previous, next and last buttons.
    PaginationTypeFourButton => FourButton,
    /// Pagination styled after ExtJS.
    PaginationTypeExtJs => ExtJs,
    PaginationTypeBootstrap => Bootstrap,
    PaginationTypeBootstrapFourButton => BootstrapFourButton,
    PaginationTypeBootstrapFullNumbers => BootstrapFullNumbers,
}
