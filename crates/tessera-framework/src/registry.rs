//! Extension discovery.
//!
//! Extensions register themselves at link time in one of two distributed
//! slices, usually through `#[register_extension]`:
//!
//! - [`BUILTIN_EXTENSIONS`]: the extensions shipped with Tessera,
//! - [`CUSTOM_EXTENSIONS`]: application extensions, filtered by module path.
//!
//! An [`ExtensionRegistry`] snapshots both slices and accepts further
//! extensions registered at runtime.

use std::sync::Arc;

use linkme::distributed_slice;
use tracing::{debug, warn};

use crate::extension::Extension;

/// Link time registration of one extension.
pub struct ExtensionDescriptor {
    /// `module_path!()` of the registering item.
    pub module_path: &'static str,
    pub create: fn() -> Box<dyn Extension>,
}

#[distributed_slice]
pub static BUILTIN_EXTENSIONS: [ExtensionDescriptor];

#[distributed_slice]
pub static CUSTOM_EXTENSIONS: [ExtensionDescriptor];

/// Returns `true` if `module_path` lies under `base`.
///
/// Both `::` and `.` are accepted as separators in `base`.
fn is_under(module_path: &str, base: &str) -> bool {
    let base = base.trim().replace('.', "::");
    let base = base.trim_end_matches(':');
    module_path == base
        || module_path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with("::"))
}

struct CustomExtension {
    module_path: String,
    extension: Arc<dyn Extension>,
}

/// Every extension known to the application.
#[derive(Default)]
pub struct ExtensionRegistry {
    builtins: Vec<Arc<dyn Extension>>,
    custom: Vec<CustomExtension>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every extension registered at link time.
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for descriptor in BUILTIN_EXTENSIONS.iter() {
            registry.register_builtin(Arc::from((descriptor.create)()));
        }
        for descriptor in CUSTOM_EXTENSIONS.iter() {
            registry.register_custom(descriptor.module_path, Arc::from((descriptor.create)()));
        }
        debug!(
            builtins = registry.builtins.len(),
            custom = registry.custom.len(),
            "Extensions discovered"
        );
        registry
    }

    pub fn register_builtin(&mut self, extension: Arc<dyn Extension>) {
        self.builtins.push(extension);
    }

    /// Registers an application extension living in `module_path`.
    pub fn register_custom(&mut self, module_path: &str, extension: Arc<dyn Extension>) {
        self.custom.push(CustomExtension {
            module_path: module_path.to_string(),
            extension,
        });
    }

    /// Every built-in extension.
    pub fn discover_builtins(&self) -> Vec<Arc<dyn Extension>> {
        self.builtins.clone()
    }

    /// Custom extensions registered under `base_package`.
    ///
    /// Nothing is returned for a blank base package.
    pub fn discover_custom(&self, base_package: &str) -> Vec<Arc<dyn Extension>> {
        if base_package.trim().is_empty() {
            return Vec::new();
        }
        self.custom
            .iter()
            .filter(|custom| is_under(&custom.module_path, base_package))
            .map(|custom| Arc::clone(&custom.extension))
            .collect()
    }

    /// Finds the extensions named in `names`, in the requested order.
    ///
    /// Names match case-insensitively and custom extensions shadow built-in
    /// ones. Duplicates are dropped and unknown names are logged.
    pub fn resolve_enabled(
        &self,
        names: &[String],
        base_package: &str,
    ) -> Vec<Arc<dyn Extension>> {
        let custom = self.discover_custom(base_package);
        let mut enabled: Vec<Arc<dyn Extension>> = Vec::new();
        for name in names {
            if enabled
                .iter()
                .any(|ext| ext.name().eq_ignore_ascii_case(name))
            {
                continue;
            }
            let found = custom
                .iter()
                .chain(self.builtins.iter())
                .find(|ext| ext.name().eq_ignore_ascii_case(name));
            match found {
                Some(ext) => enabled.push(Arc::clone(ext)),
                None => warn!(extension = %name, "No extension found with this name"),
            }
        }
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtensionResult;
    use crate::extension::ExtensionContribution;
    use tessera_core::TableConfiguration;

    struct Named(&'static str);

    impl Extension for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
            Ok(ExtensionContribution::new())
        }
    }

    fn names(extensions: &[Arc<dyn Extension>]) -> Vec<&str> {
        extensions.iter().map(|ext| ext.name()).collect()
    }

    #[test]
    fn test_is_under() {
        assert!(is_under("app::ext", "app"));
        assert!(is_under("app::ext::inner", "app.ext"));
        assert!(is_under("app", "app"));
        assert!(!is_under("application::ext", "app"));
    }

    #[test]
    fn test_discover_custom_filters_by_package() {
        let mut registry = ExtensionRegistry::new();
        registry.register_custom("app::ext", Arc::new(Named("mine")));
        registry.register_custom("other::ext", Arc::new(Named("theirs")));
        assert_eq!(names(&registry.discover_custom("app")), vec!["mine"]);
        assert!(registry.discover_custom("  ").is_empty());
    }

    #[test]
    fn test_resolve_enabled() {
        let mut registry = ExtensionRegistry::new();
        registry.register_builtin(Arc::new(Named("scroller")));
        registry.register_builtin(Arc::new(Named("serverSide")));
        registry.register_custom("app::ext", Arc::new(Named("Scroller")));

        let enabled = registry.resolve_enabled(
            &[
                "serverside".to_string(),
                "SCROLLER".to_string(),
                "unknown".to_string(),
                "serverSide".to_string(),
            ],
            "app",
        );
        assert_eq!(names(&enabled), vec!["serverSide", "Scroller"]);

        let enabled = registry.resolve_enabled(&["scroller".to_string()], "");
        assert_eq!(names(&enabled), vec!["scroller"]);
    }

    #[test]
    fn test_discover_includes_builtins() {
        let registry = ExtensionRegistry::discover();
        let builtins = registry.discover_builtins();
        assert!(builtins.iter().any(|ext| ext.name() == "scroller"));
        assert!(builtins.iter().any(|ext| ext.name() == "filtering"));
    }
}
