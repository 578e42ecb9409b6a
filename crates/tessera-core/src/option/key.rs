//! Option keys and typed option handles.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use super::processor::ValueProcessor;

/// Precedence given to options that do not need a specific resolution slot.
pub const DEFAULT_PRECEDENCE: i32 = 100;

/// Normalizes a user supplied option name: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// OptionScope
// =============================================================================

/// The kind of entity an option applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionScope {
    /// Options of the whole table, readable from configuration files.
    Table,
    /// Options of a single column, only settable per entity.
    Column,
}

// =============================================================================
// OptionKey
// =============================================================================

#[derive(Clone)]
struct KeyDef {
    name: String,
    processor: Arc<dyn ValueProcessor>,
    precedence: i32,
    scope: OptionScope,
    ordinal: usize,
}

/// A named configuration aspect with its value processor and precedence.
///
/// Keys compare and hash by name only, so a `HashMap<OptionKey, _>` can be
/// queried with a plain `&str`. Cloning is cheap.
///
/// Keys returned for a dynamic family (e.g. `export.csv.label`) carry the
/// concrete name the caller used, see [`OptionKey::user_name`].
#[derive(Clone)]
pub struct OptionKey {
    def: Arc<KeyDef>,
    user_name: Option<Arc<str>>,
}

impl OptionKey {
    /// Creates a table option with the default precedence.
    pub fn new(name: &str, processor: impl ValueProcessor + 'static) -> Self {
        Self::with_precedence(name, processor, DEFAULT_PRECEDENCE)
    }

    /// Creates a table option resolved at `precedence`.
    pub fn with_precedence(
        name: &str,
        processor: impl ValueProcessor + 'static,
        precedence: i32,
    ) -> Self {
        Self {
            def: Arc::new(KeyDef {
                name: normalize_name(name),
                processor: Arc::new(processor),
                precedence,
                scope: OptionScope::Table,
                ordinal: 0,
            }),
            user_name: None,
        }
    }

    /// Creates a column option with the default precedence.
    pub fn column(name: &str, processor: impl ValueProcessor + 'static) -> Self {
        let mut key = Self::new(name, processor);
        Arc::make_mut(&mut key.def).scope = OptionScope::Column;
        key
    }

    /// Normalized canonical name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// The concrete name this key was looked up with, or the canonical name.
    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.def.name)
    }

    #[inline]
    pub fn precedence(&self) -> i32 {
        self.def.precedence
    }

    #[inline]
    pub fn scope(&self) -> OptionScope {
        self.def.scope
    }

    /// Registration order within the owning catalog.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.def.ordinal
    }

    pub fn processor(&self) -> &dyn ValueProcessor {
        self.def.processor.as_ref()
    }

    /// Resolution order: precedence first, registration order on ties.
    pub fn resolution_order(&self) -> (i32, usize) {
        (self.def.precedence, self.def.ordinal)
    }

    pub(crate) fn with_ordinal(mut self, ordinal: usize) -> Self {
        Arc::make_mut(&mut self.def).ordinal = ordinal;
        self
    }

    pub(crate) fn tagged(&self, user_name: &str) -> Self {
        Self {
            def: Arc::clone(&self.def),
            user_name: Some(Arc::from(user_name)),
        }
    }
}

impl PartialEq for OptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.def.name == other.def.name
    }
}

impl Eq for OptionKey {}

impl Hash for OptionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def.name.hash(state);
    }
}

impl Borrow<str> for OptionKey {
    fn borrow(&self) -> &str {
        &self.def.name
    }
}

impl fmt::Debug for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionKey")
            .field("name", &self.def.name)
            .field("user_name", &self.user_name)
            .field("precedence", &self.def.precedence)
            .field("scope", &self.def.scope)
            .finish()
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_name())
    }
}

// =============================================================================
// Opt<T>
// =============================================================================

/// A typed, `const`-constructible handle used to read an option out of a
/// [`ConfigurationStore`](crate::store::ConfigurationStore).
///
/// ```rust,ignore
/// const FEATURE_INFO: Opt<bool> = Opt::new("feature.info");
/// let info = store.value(FEATURE_INFO);
/// ```
pub struct Opt<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Opt<T> {
    /// `name` must already be normalized.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Opt<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Opt<T> {}

impl<T> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opt({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::option::processor::StringProcessor;

    #[test]
    fn test_names_are_normalized() {
        let key = OptionKey::new("  Feature.Info ", StringProcessor);
        assert_eq!(key.name(), "feature.info");
        assert_eq!(key.user_name(), "feature.info");
    }

    #[test]
    fn test_equality_ignores_precedence() {
        let a = OptionKey::with_precedence("ajax.source", StringProcessor, 1);
        let b = OptionKey::with_precedence("ajax.source", StringProcessor, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(OptionKey::new("css.class", StringProcessor), 1);
        assert_eq!(map.get("css.class"), Some(&1));
    }

    #[test]
    fn test_tagged_key_keeps_identity() {
        let key = OptionKey::new("export.label", StringProcessor);
        let tagged = key.tagged("export.csv.label");
        assert_eq!(tagged, key);
        assert_eq!(tagged.user_name(), "export.csv.label");
        assert_eq!(tagged.to_string(), "export.csv.label");
    }
}
