use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::ItemKey;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

#[cfg(feature = "std")]
pub type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub type KeySet<K> = BTreeSet<K>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}

/// A caller-supplied identity lookup. Returning `None` falls back to the item's index.
pub type KeyFn<T, K> = Arc<dyn Fn(&T, usize) -> Option<K> + Send + Sync>;

/// Derives stable identities for rendered items.
///
/// Hosts use these keys to keep visual elements alive across recomputations instead of
/// recreating every element on each scroll.
pub struct KeyResolver<T: ?Sized, K> {
    key_fn: Option<KeyFn<T, K>>,
}

impl<T: ?Sized, K> KeyResolver<T, K> {
    /// Keys every item by its index.
    pub fn by_index() -> Self {
        Self { key_fn: None }
    }

    pub fn new(key_fn: impl Fn(&T, usize) -> Option<K> + Send + Sync + 'static) -> Self {
        Self {
            key_fn: Some(Arc::new(key_fn)),
        }
    }

    pub fn has_identity(&self) -> bool {
        self.key_fn.is_some()
    }

    pub fn key_of(&self, item: &T, index: usize) -> ItemKey<K> {
        match &self.key_fn {
            Some(f) => f(item, index).map_or(ItemKey::Index(index), ItemKey::Id),
            None => ItemKey::Index(index),
        }
    }
}

impl<T: ?Sized, K: KeyCacheKey + Clone> KeyResolver<T, K> {
    /// Resolves keys for one visible item set, guaranteeing they are unique.
    ///
    /// `items` must yield each index at most once. A caller identity already used earlier in the
    /// same set is replaced by the index fallback for the later item. Clears `out` first.
    pub fn resolve_unique<'a>(
        &self,
        items: impl IntoIterator<Item = (usize, &'a T)>,
        out: &mut Vec<ItemKey<K>>,
    ) where
        T: 'a,
    {
        out.clear();
        let mut seen = KeySet::<ItemKey<K>>::new();
        for (index, item) in items {
            let mut key = self.key_of(item, index);
            if seen.contains(&key) {
                wdebug!(index, "KeyResolver: duplicate item identity, falling back to index");
                key = ItemKey::Index(index);
            }
            seen.insert(key.clone());
            out.push(key);
        }
    }
}

impl<T: ?Sized, K> Clone for KeyResolver<T, K> {
    fn clone(&self) -> Self {
        Self {
            key_fn: self.key_fn.clone(),
        }
    }
}

impl<T: ?Sized, K> Default for KeyResolver<T, K> {
    fn default() -> Self {
        Self::by_index()
    }
}

impl<T: ?Sized, K> core::fmt::Debug for KeyResolver<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyResolver")
            .field("has_identity", &self.key_fn.is_some())
            .finish()
    }
}
