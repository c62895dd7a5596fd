use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::ItemSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Filter and sort parameters chosen by the user.
///
/// An empty `filter` keeps every item; `sort: None` keeps source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Query {
    pub filter: String,
    pub sort: Option<SortSpec>,
}

impl Query {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    /// Flips the sort direction, if a sort is set.
    pub fn toggle_direction(&mut self) {
        if let Some(sort) = &mut self.sort {
            sort.direction = sort.direction.reversed();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("unknown sort field `{0}`")]
    UnknownSortField(String),
}

pub type TextField<T> = Arc<dyn Fn(&T) -> &str + Send + Sync>;
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Filters and sorts a source collection before it reaches the list surface.
///
/// The pipeline never mutates the source. It produces an [`Ordered`] view (indexes into the
/// source), which is handed to the surface whole on every change of the query.
pub struct OrderingPipeline<T> {
    text_fields: Vec<(&'static str, TextField<T>)>,
    sort_keys: Vec<(&'static str, Comparator<T>)>,
}

impl<T> OrderingPipeline<T> {
    pub fn new() -> Self {
        Self {
            text_fields: Vec::new(),
            sort_keys: Vec::new(),
        }
    }

    /// Registers a textual field searched by the filter.
    pub fn with_text_field(
        mut self,
        name: &'static str,
        field: impl Fn(&T) -> &str + Send + Sync + 'static,
    ) -> Self {
        self.text_fields.push((name, Arc::new(field)));
        self
    }

    /// Registers a sortable field with an explicit comparator.
    pub fn with_sort_by(
        mut self,
        name: &'static str,
        compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_keys.push((name, Arc::new(compare)));
        self
    }

    /// Registers a sortable field ordered by a derived key.
    pub fn with_sort_key<K: Ord>(
        self,
        name: &'static str,
        key: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        self.with_sort_by(name, move |a, b| key(a).cmp(&key(b)))
    }

    pub fn text_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.text_fields.iter().map(|(name, _)| *name)
    }

    pub fn sort_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sort_keys.iter().map(|(name, _)| *name)
    }

    /// Whether `item` matches `filter` (case-insensitive substring over any text field).
    pub fn matches(&self, item: &T, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let needle = filter.to_lowercase();
        self.matches_lowercase(item, &needle)
    }

    fn matches_lowercase(&self, item: &T, needle: &str) -> bool {
        self.text_fields
            .iter()
            .any(|(_, field)| field(item).to_lowercase().contains(needle))
    }

    /// Applies `query` to `items`.
    ///
    /// Sorting is stable: items that compare equal keep their source order in both directions.
    pub fn apply<'a>(
        &self,
        items: &'a [T],
        query: &Query,
    ) -> Result<Ordered<'a, T>, OrderingError> {
        let compare = match &query.sort {
            Some(spec) => Some((self.comparator(&spec.field)?, spec.direction)),
            None => None,
        };

        let mut indices: Vec<usize> = if query.filter.is_empty() {
            (0..items.len()).collect()
        } else {
            let needle = query.filter.to_lowercase();
            (0..items.len())
                .filter(|&i| self.matches_lowercase(&items[i], &needle))
                .collect()
        };

        if let Some((compare, direction)) = compare {
            match direction {
                SortDirection::Ascending => {
                    indices.sort_by(|&a, &b| compare(&items[a], &items[b]));
                }
                SortDirection::Descending => {
                    indices.sort_by(|&a, &b| compare(&items[b], &items[a]));
                }
            }
        }

        sdebug!(
            source = items.len(),
            kept = indices.len(),
            sorted = query.sort.is_some(),
            "OrderingPipeline::apply"
        );
        Ok(Ordered { items, indices })
    }

    fn comparator(&self, field: &str) -> Result<&Comparator<T>, OrderingError> {
        self.sort_keys
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, compare)| compare)
            .ok_or_else(|| OrderingError::UnknownSortField(field.into()))
    }
}

impl<T> Default for OrderingPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OrderingPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            text_fields: self.text_fields.clone(),
            sort_keys: self.sort_keys.clone(),
        }
    }
}

impl<T> core::fmt::Debug for OrderingPipeline<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderingPipeline")
            .field("text_fields", &self.text_fields().collect::<Vec<_>>())
            .field("sort_fields", &self.sort_fields().collect::<Vec<_>>())
            .finish()
    }
}

/// A filtered/sorted view over a borrowed source collection.
#[derive(Clone, Debug)]
pub struct Ordered<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
}

impl<'a, T> Ordered<'a, T> {
    /// Position of the `index`-th ordered item in the source collection.
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.indices.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let items = self.items;
        self.indices.iter().map(move |&i| &items[i])
    }
}

impl<T> ItemSource<T> for Ordered<'_, T> {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        let source = *self.indices.get(index)?;
        self.items.get(source)
    }
}
