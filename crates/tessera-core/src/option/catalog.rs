//! The registry of every known option.
//!
//! A catalog is assembled once, usually through [`OptionCatalog::standard`],
//! and is immutable afterwards. It is shared by reference (or `Arc`) with the
//! template cache and with every entity built from it.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::trace;

use super::key::{OptionKey, normalize_name};
use crate::error::{CatalogError, CatalogResult};

/// A family of dynamically named options, such as `export.<format>.label`.
///
/// Names matching `pattern` resolve to the canonical key registered under
/// `canonical`.
#[derive(Debug, Clone)]
pub struct OptionFamily {
    pattern: Regex,
    canonical: String,
}

impl OptionFamily {
    /// Creates a family from a case-insensitive pattern.
    ///
    /// The first capture group is the variable part of the name.
    pub fn new(pattern: &str, canonical: &str) -> CatalogResult<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CatalogError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            pattern,
            canonical: normalize_name(canonical),
        })
    }

    /// Returns the variable part of `name` if it belongs to this family.
    pub fn capture<'n>(&self, name: &'n str) -> Option<&'n str> {
        self.pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// The registry of every known [`OptionKey`].
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    keys: HashMap<String, OptionKey>,
    /// Families with their marker, tried in insertion order.
    families: Vec<(String, OptionFamily)>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key.
    ///
    /// Fails with [`CatalogError::DuplicateKey`] when a key with the same
    /// normalized name is already present.
    pub fn register(&mut self, key: OptionKey) -> CatalogResult<()> {
        if self.keys.contains_key(key.name()) {
            return Err(CatalogError::duplicate(key.name()));
        }
        let key = key.with_ordinal(self.keys.len());
        trace!(option = %key.name(), precedence = key.precedence(), "Option registered");
        self.keys.insert(key.name().to_string(), key);
        Ok(())
    }

    /// Registers a family of dynamic names.
    ///
    /// Families are tried in registration order. A family is only tried for
    /// names that contain its `marker`.
    pub fn register_family(&mut self, marker: &str, family: OptionFamily) {
        self.families.push((normalize_name(marker), family));
    }

    /// Looks up a key by name.
    ///
    /// The exact normalized name is tried first. Otherwise the families whose
    /// marker the name carries are tried in order, and the first match returns
    /// the family's canonical key tagged with the concrete name.
    pub fn find_by_name(&self, name: &str) -> Option<OptionKey> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }
        if let Some(key) = self.keys.get(&normalized) {
            return Some(key.clone());
        }

        self.families
            .iter()
            .filter(|(marker, _)| normalized.contains(marker.as_str()))
            .find_map(|(_, family)| {
                family.capture(&normalized)?;
                self.keys
                    .get(family.canonical())
                    .map(|key| key.tagged(&normalized))
            })
    }

    /// Like [`find_by_name`](Self::find_by_name), but reports why a name
    /// could not be resolved.
    pub fn find(&self, name: &str) -> CatalogResult<OptionKey> {
        if name.trim().is_empty() {
            return Err(CatalogError::BlankName);
        }
        self.find_by_name(name)
            .ok_or_else(|| CatalogError::unknown(name.trim()))
    }

    /// Returns the family a tagged key was matched through, with the captured
    /// variable part of its name.
    pub fn family_capture<'n>(&self, key: &'n OptionKey) -> Option<&'n str> {
        self.families
            .iter()
            .map(|(_, family)| family)
            .filter(|family| family.canonical() == key.name())
            .find_map(|family| family.capture(key.user_name()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Every registered key, in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionKey> {
        let mut keys: Vec<&OptionKey> = self.keys.values().collect();
        keys.sort_by_key(|key| key.resolution_order());
        keys.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::processor::{BooleanProcessor, StringProcessor};

    fn export_catalog() -> OptionCatalog {
        let mut catalog = OptionCatalog::new();
        for name in ["export.class", "export.filename", "export.label", "export.mimetype"] {
            catalog.register(OptionKey::new(name, StringProcessor)).unwrap();
        }
        for (pattern, canonical) in [
            (r"export\.(.*?)\.class", "export.class"),
            (r"export\.(.*?)\.filename", "export.filename"),
            (r"export\.(.*?)\.label", "export.label"),
            (r"export\.(.*?)\.mimetype", "export.mimetype"),
        ] {
            catalog.register_family("export", OptionFamily::new(pattern, canonical).unwrap());
        }
        catalog
    }

    #[test]
    fn test_register_duplicate() {
        let mut catalog = OptionCatalog::new();
        catalog.register(OptionKey::new("feature.info", BooleanProcessor)).unwrap();
        let err = catalog
            .register(OptionKey::new(" FEATURE.INFO", BooleanProcessor))
            .unwrap_err();
        assert_eq!(err, CatalogError::duplicate("feature.info"));
    }

    #[test]
    fn test_find_by_name_normalizes() {
        let mut catalog = OptionCatalog::new();
        catalog.register(OptionKey::new("feature.info", BooleanProcessor)).unwrap();
        let key = catalog.find_by_name("  Feature.INFO ").unwrap();
        assert_eq!(key.name(), "feature.info");
        assert!(catalog.find_by_name("feature.nope").is_none());
        assert!(catalog.find_by_name("   ").is_none());
    }

    #[test]
    fn test_find_reports_validation_errors() {
        let catalog = OptionCatalog::new();
        assert_eq!(catalog.find(" ").unwrap_err(), CatalogError::BlankName);
        assert_eq!(
            catalog.find("nope").unwrap_err(),
            CatalogError::unknown("nope")
        );
    }

    #[test]
    fn test_family_lookup() {
        let catalog = export_catalog();
        let key = catalog.find_by_name("export.CSV.fileName").unwrap();
        assert_eq!(key.name(), "export.filename");
        assert_eq!(key.user_name(), "export.csv.filename");
        assert_eq!(catalog.family_capture(&key), Some("csv"));

        let key = catalog.find_by_name("export.xls.mimeType").unwrap();
        assert_eq!(key.name(), "export.mimetype");
        assert_eq!(catalog.family_capture(&key), Some("xls"));
    }

    #[test]
    fn test_family_priority_order() {
        // Matches both the class and the label pattern; class is tried first.
        let catalog = export_catalog();
        let key = catalog.find_by_name("export.pdf.class.label").unwrap();
        assert_eq!(key.name(), "export.class");
    }

    #[test]
    fn test_family_requires_marker() {
        let catalog = export_catalog();
        assert!(catalog.find_by_name("csv.label").is_none());
    }

    #[test]
    fn test_families_keep_their_own_marker() {
        let mut catalog = export_catalog();
        catalog
            .register(OptionKey::new("i18n.msg.custom", StringProcessor))
            .unwrap();
        catalog.register_family(
            "i18n",
            OptionFamily::new(r"i18n\.msg\.custom\.(.*)", "i18n.msg.custom").unwrap(),
        );

        let key = catalog.find_by_name("i18n.msg.custom.greeting").unwrap();
        assert_eq!(key.name(), "i18n.msg.custom");
        assert_eq!(catalog.family_capture(&key), Some("greeting"));

        let key = catalog.find_by_name("export.csv.label").unwrap();
        assert_eq!(key.name(), "export.label");
        assert_eq!(catalog.family_capture(&key), Some("csv"));
    }

    #[test]
    fn test_iter_in_resolution_order() {
        let mut catalog = OptionCatalog::new();
        catalog
            .register(OptionKey::with_precedence("b", StringProcessor, 100))
            .unwrap();
        catalog
            .register(OptionKey::with_precedence("a", StringProcessor, 100))
            .unwrap();
        catalog
            .register(OptionKey::with_precedence("c", StringProcessor, 99))
            .unwrap();
        let names: Vec<&str> = catalog.iter().map(OptionKey::name).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }
}
