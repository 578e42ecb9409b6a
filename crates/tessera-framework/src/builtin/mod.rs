//! Extensions shipped with Tessera.
//!
//! Every extension here registers itself in
//! [`BUILTIN_EXTENSIONS`](crate::registry::BUILTIN_EXTENSIONS) and is enabled
//! by name, either explicitly through `main.extension.names` or by the option
//! processors that need it.

mod feature;
mod plugin;
mod theme;

pub use feature::{
    AjaxReload, Appear, Export, Filtering, MultiFilter, PaginationTypeBootstrap,
    PaginationTypeBootstrapFourButton, PaginationTypeBootstrapFullNumbers, PaginationTypeExtJs,
    PaginationTypeFourButton, PaginationTypeInput, PaginationTypeListbox,
    PaginationTypeScrolling, Pipelining, ServerSide,
};
pub use plugin::{ColReorder, FixedHeader, Scroller};
pub use theme::{Bootstrap2, Bootstrap2Responsive, Bootstrap3, JQueryUi};

/// Renders `values` as a JavaScript array of single-quoted strings.
fn js_array<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let items: Vec<String> = values
        .into_iter()
        .map(|value| format!("'{}'", escape_single_quotes(value)))
        .collect();
    format!("[{}]", items.join(","))
}

fn escape_single_quotes(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_array() {
        assert_eq!(js_array(["#a", "#b"]), "['#a','#b']");
        assert_eq!(js_array([]), "[]");
        assert_eq!(js_array(["it's"]), r"['it\'s']");
    }
}
