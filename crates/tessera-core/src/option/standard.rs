//! The built-in option set.
//!
//! Typed handles for every built-in option live here as constants, so that
//! processors, generators and extensions never spell option names twice.

use super::catalog::{OptionCatalog, OptionFamily};
use super::key::{Opt, OptionKey};
use super::processor::{
    AppearProcessor, BooleanProcessor, BufferProcessor, EmptyStringProcessor,
    ExportEnabledFormatsProcessor, ExportFormatProcessor, ExtensionToggleProcessor,
    FilterSelectorProcessor, FilterableProcessor, IntegerProcessor, LengthMenuProcessor,
    NameListProcessor, PaginationTypeProcessor, SortDirectionProcessor, StringProcessor,
    ExportField, StripeClassesProcessor, ThemeProcessor, TriggerProcessor, VocabularyProcessor,
};
use super::vocabulary::{
    FilterPlaceholder, FilterType, PaginationType, SortDirection, Theme, ThemeOption,
};
use crate::error::CatalogResult;

// ─── Table options ────────────────────────────────────────────────────────────

pub const MAIN_EXTENSION_NAMES: Opt<Vec<String>> = Opt::new("main.extension.names");

pub const CSS_CLASS: Opt<String> = Opt::new("css.class");
pub const CSS_STYLE: Opt<String> = Opt::new("css.style");
pub const CSS_STRIPE_CLASSES: Opt<String> = Opt::new("css.stripeclasses");
pub const CSS_THEME: Opt<Theme> = Opt::new("css.theme");
pub const CSS_THEME_OPTION: Opt<ThemeOption> = Opt::new("css.themeoption");

pub const FEATURE_INFO: Opt<bool> = Opt::new("feature.info");
pub const FEATURE_AUTO_WIDTH: Opt<bool> = Opt::new("feature.autowidth");
pub const FEATURE_FILTERABLE: Opt<bool> = Opt::new("feature.filterable");
pub const FEATURE_FILTER_PLACEHOLDER: Opt<FilterPlaceholder> =
    Opt::new("feature.filterplaceholder");
pub const FEATURE_FILTER_DELAY: Opt<i64> = Opt::new("feature.filterdelay");
pub const FEATURE_FILTER_SELECTOR: Opt<String> = Opt::new("feature.filterselector");
pub const FEATURE_FILTER_CLEAR_SELECTOR: Opt<String> = Opt::new("feature.filterclearselector");
pub const FEATURE_FILTER_TRIGGER: Opt<String> = Opt::new("feature.filtertrigger");
pub const FEATURE_PAGEABLE: Opt<bool> = Opt::new("feature.pageable");
pub const FEATURE_PAGINATION_TYPE: Opt<PaginationType> = Opt::new("feature.paginationtype");
pub const FEATURE_LENGTH_CHANGE: Opt<bool> = Opt::new("feature.lengthchange");
pub const FEATURE_SORTABLE: Opt<bool> = Opt::new("feature.sortable");
pub const FEATURE_STATE_SAVE: Opt<bool> = Opt::new("feature.statesave");
pub const FEATURE_JQUERY_UI: Opt<bool> = Opt::new("feature.jqueryui");
pub const FEATURE_LENGTH_MENU: Opt<String> = Opt::new("feature.lengthmenu");
pub const FEATURE_DISPLAY_LENGTH: Opt<i64> = Opt::new("feature.displaylength");
pub const FEATURE_DOM: Opt<String> = Opt::new("feature.dom");
pub const FEATURE_SCROLL_Y: Opt<String> = Opt::new("feature.scrolly");
pub const FEATURE_SCROLL_COLLAPSE: Opt<bool> = Opt::new("feature.scrollcollapse");
pub const FEATURE_SCROLL_X: Opt<String> = Opt::new("feature.scrollx");
pub const FEATURE_SCROLL_X_INNER: Opt<String> = Opt::new("feature.scrollxinner");
pub const FEATURE_APPEAR: Opt<String> = Opt::new("feature.appear");
pub const FEATURE_APPEAR_DURATION: Opt<i64> = Opt::new("feature.appearduration");
pub const FEATURE_PROCESSING: Opt<bool> = Opt::new("feature.processing");

pub const AJAX_DEFER_RENDER: Opt<bool> = Opt::new("ajax.deferrender");
pub const AJAX_SOURCE: Opt<String> = Opt::new("ajax.source");
pub const AJAX_PARAMS: Opt<String> = Opt::new("ajax.params");
pub const AJAX_SERVER_SIDE: Opt<bool> = Opt::new("ajax.serverside");
pub const AJAX_PIPELINING: Opt<bool> = Opt::new("ajax.pipelining");
pub const AJAX_PIPE_SIZE: Opt<i64> = Opt::new("ajax.pipesize");
pub const AJAX_RELOAD_SELECTOR: Opt<String> = Opt::new("ajax.reloadselector");
pub const AJAX_RELOAD_FUNCTION: Opt<String> = Opt::new("ajax.reloadfunction");

pub const PLUGIN_FIXED_POSITION: Opt<String> = Opt::new("plugin.fixedposition");
pub const PLUGIN_FIXED_OFFSET_TOP: Opt<i64> = Opt::new("plugin.fixedoffsettop");
pub const PLUGIN_SCROLLER: Opt<bool> = Opt::new("plugin.scroller");
pub const PLUGIN_COL_REORDER: Opt<bool> = Opt::new("plugin.colreorder");

pub const EXPORT_ENABLED_FORMATS: Opt<Vec<String>> = Opt::new("export.enabled.formats");
pub const EXPORT_CONTAINER_STYLE: Opt<String> = Opt::new("export.container.style");
pub const EXPORT_CONTAINER_CLASS: Opt<String> = Opt::new("export.container.class");
pub const EXPORT_CLASS: Opt<String> = Opt::new("export.class");
pub const EXPORT_FILE_NAME: Opt<String> = Opt::new("export.filename");
pub const EXPORT_LABEL: Opt<String> = Opt::new("export.label");
pub const EXPORT_MIME_TYPE: Opt<String> = Opt::new("export.mimetype");

// ─── Column options ───────────────────────────────────────────────────────────

pub const COLUMN_ID: Opt<String> = Opt::new("id");
pub const COLUMN_TITLE: Opt<String> = Opt::new("title");
pub const COLUMN_TITLE_KEY: Opt<String> = Opt::new("titlekey");
pub const COLUMN_NAME: Opt<String> = Opt::new("name");
pub const COLUMN_PROPERTY: Opt<String> = Opt::new("property");
pub const COLUMN_DEFAULT_VALUE: Opt<String> = Opt::new("defaultvalue");
pub const COLUMN_CSS_STYLE: Opt<String> = Opt::new("cssstyle");
pub const COLUMN_CSS_CELL_STYLE: Opt<String> = Opt::new("csscellstyle");
pub const COLUMN_CSS_CLASS: Opt<String> = Opt::new("cssclass");
pub const COLUMN_CSS_CELL_CLASS: Opt<String> = Opt::new("csscellclass");
pub const COLUMN_SORTABLE: Opt<bool> = Opt::new("sortable");
pub const COLUMN_SORT_DIRECTION: Opt<Vec<SortDirection>> = Opt::new("sortdirection");
pub const COLUMN_SORT_INIT_DIRECTION: Opt<String> = Opt::new("sortinitdirection");
pub const COLUMN_SORT_INIT_ORDER: Opt<i64> = Opt::new("sortinitorder");
pub const COLUMN_SORT_TYPE: Opt<String> = Opt::new("sorttype");
pub const COLUMN_FILTERABLE: Opt<bool> = Opt::new("filterable");
pub const COLUMN_SEARCHABLE: Opt<bool> = Opt::new("searchable");
pub const COLUMN_VISIBLE: Opt<bool> = Opt::new("visible");
pub const COLUMN_FILTER_TYPE: Opt<FilterType> = Opt::new("filtertype");
pub const COLUMN_FILTER_VALUES: Opt<String> = Opt::new("filtervalues");
pub const COLUMN_FILTER_PLACEHOLDER: Opt<String> = Opt::new("filterplaceholder");
pub const COLUMN_FILTER_LENGTH: Opt<i64> = Opt::new("filterlength");
pub const COLUMN_RENDER_FUNCTION: Opt<String> = Opt::new("renderfunction");
pub const COLUMN_SELECTOR: Opt<String> = Opt::new("selector");

/// Translatable messages: option name and the widget's language key.
///
/// Keys under `oPaginate.` and `oAria.` are nested objects of the language
/// object.
pub const I18N_MESSAGES: &[(&str, &str)] = &[
    ("i18n.msg.processing", "sProcessing"),
    ("i18n.msg.search", "sSearch"),
    ("i18n.msg.lengthmenu", "sLengthMenu"),
    ("i18n.msg.info", "sInfo"),
    ("i18n.msg.info.empty", "sInfoEmpty"),
    ("i18n.msg.info.filtered", "sInfoFiltered"),
    ("i18n.msg.info.postfix", "sInfoPostFix"),
    ("i18n.msg.loadingrecords", "sLoadingRecords"),
    ("i18n.msg.zerorecords", "sZeroRecords"),
    ("i18n.msg.emptytable", "sEmptyTable"),
    ("i18n.msg.paginate.first", "oPaginate.sFirst"),
    ("i18n.msg.paginate.previous", "oPaginate.sPrevious"),
    ("i18n.msg.paginate.next", "oPaginate.sNext"),
    ("i18n.msg.paginate.last", "oPaginate.sLast"),
    ("i18n.msg.aria.sortasc", "oAria.sSortAscending"),
    ("i18n.msg.aria.sortdesc", "oAria.sSortDescending"),
];

impl OptionCatalog {
    /// Builds the catalog of every built-in table and column option.
    pub fn standard() -> CatalogResult<Self> {
        let mut catalog = Self::new();

        catalog.register(OptionKey::new(MAIN_EXTENSION_NAMES.name(), NameListProcessor))?;

        catalog.register(OptionKey::new(CSS_CLASS.name(), BufferProcessor))?;
        catalog.register(OptionKey::new(CSS_STYLE.name(), BufferProcessor))?;
        catalog.register(OptionKey::new(CSS_STRIPE_CLASSES.name(), StripeClassesProcessor))?;
        catalog.register(OptionKey::new(CSS_THEME.name(), ThemeProcessor))?;
        catalog.register(OptionKey::new(
            CSS_THEME_OPTION.name(),
            VocabularyProcessor::<ThemeOption>::new(),
        ))?;

        for opt in [
            FEATURE_INFO,
            FEATURE_AUTO_WIDTH,
            FEATURE_FILTERABLE,
            FEATURE_PAGEABLE,
            FEATURE_LENGTH_CHANGE,
            FEATURE_SORTABLE,
            FEATURE_STATE_SAVE,
            FEATURE_JQUERY_UI,
            FEATURE_SCROLL_COLLAPSE,
            FEATURE_PROCESSING,
            AJAX_DEFER_RENDER,
        ] {
            catalog.register(OptionKey::new(opt.name(), BooleanProcessor))?;
        }
        for opt in [
            FEATURE_FILTER_DELAY,
            FEATURE_DISPLAY_LENGTH,
            FEATURE_APPEAR_DURATION,
            AJAX_PIPE_SIZE,
            PLUGIN_FIXED_OFFSET_TOP,
        ] {
            catalog.register(OptionKey::new(opt.name(), IntegerProcessor))?;
        }
        for opt in [
            FEATURE_FILTER_CLEAR_SELECTOR,
            FEATURE_FILTER_TRIGGER,
            FEATURE_DOM,
            FEATURE_SCROLL_Y,
            FEATURE_SCROLL_X,
            FEATURE_SCROLL_X_INNER,
            AJAX_SOURCE,
        ] {
            catalog.register(OptionKey::new(opt.name(), StringProcessor))?;
        }

        catalog.register(OptionKey::new(
            FEATURE_FILTER_PLACEHOLDER.name(),
            VocabularyProcessor::<FilterPlaceholder>::new(),
        ))?;
        catalog.register(OptionKey::new(
            FEATURE_FILTER_SELECTOR.name(),
            FilterSelectorProcessor,
        ))?;
        catalog.register(OptionKey::new(
            FEATURE_PAGINATION_TYPE.name(),
            PaginationTypeProcessor,
        ))?;
        catalog.register(OptionKey::new(FEATURE_LENGTH_MENU.name(), LengthMenuProcessor))?;
        catalog.register(OptionKey::new(FEATURE_APPEAR.name(), AppearProcessor))?;

        // Server-side parameters must be known before the server-side switch,
        // which must be known before pipelining.
        catalog.register(OptionKey::with_precedence(
            AJAX_PARAMS.name(),
            StringProcessor,
            98,
        ))?;
        catalog.register(OptionKey::with_precedence(
            AJAX_SERVER_SIDE.name(),
            ExtensionToggleProcessor::new("serverSide"),
            99,
        ))?;
        catalog.register(OptionKey::with_precedence(
            AJAX_PIPELINING.name(),
            ExtensionToggleProcessor::new("pipelining"),
            101,
        ))?;
        catalog.register(OptionKey::new(
            AJAX_RELOAD_SELECTOR.name(),
            TriggerProcessor::new("ajaxReload"),
        ))?;
        catalog.register(OptionKey::new(
            AJAX_RELOAD_FUNCTION.name(),
            TriggerProcessor::new("ajaxReload"),
        ))?;

        catalog.register(OptionKey::new(
            PLUGIN_FIXED_POSITION.name(),
            TriggerProcessor::new("fixedHeader"),
        ))?;
        catalog.register(OptionKey::new(
            PLUGIN_SCROLLER.name(),
            ExtensionToggleProcessor::new("scroller"),
        ))?;
        catalog.register(OptionKey::new(
            PLUGIN_COL_REORDER.name(),
            ExtensionToggleProcessor::new("colReorder"),
        ))?;

        catalog.register(OptionKey::new(
            EXPORT_ENABLED_FORMATS.name(),
            ExportEnabledFormatsProcessor,
        ))?;
        catalog.register(OptionKey::new(EXPORT_CONTAINER_STYLE.name(), BufferProcessor))?;
        catalog.register(OptionKey::new(EXPORT_CONTAINER_CLASS.name(), BufferProcessor))?;
        for (opt, field, pattern) in [
            (EXPORT_CLASS, ExportField::Class, r"export\.(.*?)\.class"),
            (EXPORT_FILE_NAME, ExportField::FileName, r"export\.(.*?)\.filename"),
            (EXPORT_LABEL, ExportField::Label, r"export\.(.*?)\.label"),
            (EXPORT_MIME_TYPE, ExportField::MimeType, r"export\.(.*?)\.mimetype"),
        ] {
            catalog.register(OptionKey::new(opt.name(), ExportFormatProcessor::new(field)))?;
            catalog.register_family("export", OptionFamily::new(pattern, opt.name())?);
        }

        for (name, _) in I18N_MESSAGES {
            catalog.register(OptionKey::new(name, StringProcessor))?;
        }

        register_column_options(&mut catalog)?;
        Ok(catalog)
    }
}

fn register_column_options(catalog: &mut OptionCatalog) -> CatalogResult<()> {
    for opt in [
        COLUMN_ID,
        COLUMN_TITLE,
        COLUMN_TITLE_KEY,
        COLUMN_NAME,
        COLUMN_PROPERTY,
        COLUMN_SORT_INIT_DIRECTION,
        COLUMN_SORT_TYPE,
        COLUMN_FILTER_VALUES,
        COLUMN_FILTER_PLACEHOLDER,
        COLUMN_RENDER_FUNCTION,
        COLUMN_SELECTOR,
    ] {
        catalog.register(OptionKey::column(opt.name(), StringProcessor))?;
    }
    for opt in [
        COLUMN_CSS_STYLE,
        COLUMN_CSS_CELL_STYLE,
        COLUMN_CSS_CLASS,
        COLUMN_CSS_CELL_CLASS,
    ] {
        catalog.register(OptionKey::column(opt.name(), BufferProcessor))?;
    }
    for opt in [COLUMN_SORTABLE, COLUMN_SEARCHABLE, COLUMN_VISIBLE] {
        catalog.register(OptionKey::column(opt.name(), BooleanProcessor))?;
    }
    for opt in [COLUMN_SORT_INIT_ORDER, COLUMN_FILTER_LENGTH] {
        catalog.register(OptionKey::column(opt.name(), IntegerProcessor))?;
    }
    catalog.register(OptionKey::column(
        COLUMN_DEFAULT_VALUE.name(),
        EmptyStringProcessor,
    ))?;
    catalog.register(OptionKey::column(
        COLUMN_SORT_DIRECTION.name(),
        SortDirectionProcessor,
    ))?;
    catalog.register(OptionKey::column(
        COLUMN_FILTERABLE.name(),
        FilterableProcessor,
    ))?;
    catalog.register(OptionKey::column(
        COLUMN_FILTER_TYPE.name(),
        VocabularyProcessor::<FilterType>::new(),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::key::OptionScope;

    #[test]
    fn test_every_key_round_trips() {
        let catalog = OptionCatalog::standard().unwrap();
        assert!(!catalog.is_empty());
        for key in catalog.iter() {
            let found = catalog.find_by_name(key.name()).unwrap();
            assert_eq!(&found, key);
            assert_eq!(found.user_name(), key.name());
        }
    }

    #[test]
    fn test_ajax_precedences() {
        let catalog = OptionCatalog::standard().unwrap();
        let order: Vec<&str> = catalog
            .iter()
            .map(OptionKey::name)
            .filter(|name| {
                ["ajax.params", "ajax.serverside", "ajax.pipelining"].contains(name)
            })
            .collect();
        assert_eq!(order, vec!["ajax.params", "ajax.serverside", "ajax.pipelining"]);
    }

    #[test]
    fn test_scopes() {
        let catalog = OptionCatalog::standard().unwrap();
        assert_eq!(
            catalog.find_by_name("feature.info").unwrap().scope(),
            OptionScope::Table
        );
        assert_eq!(
            catalog.find_by_name("filterable").unwrap().scope(),
            OptionScope::Column
        );
    }

    #[test]
    fn test_export_family_lookup() {
        let catalog = OptionCatalog::standard().unwrap();
        let key = catalog.find_by_name("export.pdf.label").unwrap();
        assert_eq!(key.name(), EXPORT_LABEL.name());
        assert_eq!(key.user_name(), "export.pdf.label");
    }
}
