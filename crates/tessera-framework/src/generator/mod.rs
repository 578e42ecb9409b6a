//! Configuration generators.

mod filtering;
mod main_config;

pub use filtering::ColumnFilteringGenerator;
pub use main_config::MainConfigGenerator;

/// Keys of the widget configuration.
pub mod keys {
    pub const AO_COLUMNS: &str = "aoColumns";
    pub const AA_SORTING: &str = "aaSorting";
    pub const A_LENGTH_MENU: &str = "aLengthMenu";
    pub const AS_STRIPE_CLASSES: &str = "asStripeClasses";
    pub const AS_SORTING: &str = "asSorting";
    pub const B_AUTO_WIDTH: &str = "bAutoWidth";
    pub const B_DEFER_RENDER: &str = "bDeferRender";
    pub const B_FILTER: &str = "bFilter";
    pub const B_INFO: &str = "bInfo";
    pub const B_JQUERY_UI: &str = "bJQueryUI";
    pub const B_LENGTH_CHANGE: &str = "bLengthChange";
    pub const B_PAGINATE: &str = "bPaginate";
    pub const B_PROCESSING: &str = "bProcessing";
    pub const B_SCROLL_COLLAPSE: &str = "bScrollCollapse";
    pub const B_SEARCHABLE: &str = "bSearchable";
    pub const B_SERVER_SIDE: &str = "bServerSide";
    pub const B_SORT: &str = "bSort";
    pub const B_SORTABLE: &str = "bSortable";
    pub const B_STATE_SAVE: &str = "bStateSave";
    pub const B_VISIBLE: &str = "bVisible";
    pub const FN_SERVER_DATA: &str = "fnServerData";
    pub const FN_SERVER_PARAMS: &str = "fnServerParams";
    pub const I_DISPLAY_LENGTH: &str = "iDisplayLength";
    pub const M_DATA: &str = "mData";
    pub const M_RENDER: &str = "mRender";
    pub const O_LANGUAGE: &str = "oLanguage";
    pub const S_AJAX_SOURCE: &str = "sAjaxSource";
    pub const S_CLASS: &str = "sClass";
    pub const S_DEFAULT_CONTENT: &str = "sDefaultContent";
    pub const S_DOM: &str = "sDom";
    pub const S_NAME: &str = "sName";
    pub const S_PAGINATION_TYPE: &str = "sPaginationType";
    pub const S_SCROLL_X: &str = "sScrollX";
    pub const S_SCROLL_X_INNER: &str = "sScrollXInner";
    pub const S_SCROLL_Y: &str = "sScrollY";
    pub const S_TYPE: &str = "sType";

    // Column filtering
    pub const S_PLACEHOLDER: &str = "sPlaceHolder";
    pub const S_SELECTOR: &str = "sSelector";
    pub const FILTER_TYPE: &str = "type";
    pub const FILTER_VALUES: &str = "values";
    pub const FILTER_LENGTH: &str = "iFilterLength";
}
