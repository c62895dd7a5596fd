use alloc::sync::Arc;
use alloc::vec::Vec;
use core::convert::Infallible;

use windowed_list::{
    ConfigError, ItemKey, KeyCacheKey, KeyResolver, KeySet, ListWindow, ScrollSource, ScrollState,
    VisibleRange, WindowOptions,
};

use crate::ItemSource;

/// Produces the visual for one item. Must not touch the surface.
pub type RenderFn<T, V> = Arc<dyn Fn(&T, usize) -> V + Send + Sync>;

/// Notified with the new offset whenever a scroll change is delivered.
pub type OnScrollCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// One materialized item, placed at its absolute offset inside the spacer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<K, V> {
    pub key: ItemKey<K>,
    pub index: usize,
    pub offset: u64,
    pub extent: u32,
    pub visual: V,
}

/// The output of one render pass.
///
/// `entered`/`exited` describe how the keyed set changed since the previous frame: hosts create
/// elements for `entered` keys, drop elements for `exited` keys and reuse everything else.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<K, V> {
    pub range: Option<VisibleRange>,
    /// Full extent of the list (`count * item_extent`), used to size the scroll spacer.
    pub spacer_extent: u64,
    pub items: Vec<RenderedItem<K, V>>,
    pub entered: Vec<ItemKey<K>>,
    pub exited: Vec<ItemKey<K>>,
}

impl<K, V> Frame<K, V> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items whose elements carried over from the previous frame.
    pub fn retained(&self) -> usize {
        self.items.len() - self.entered.len()
    }
}

/// Coordinates a [`ListWindow`] with a per-item renderer and a key resolver.
///
/// The surface holds no copy of the data: every [`Self::render`] receives the full, already
/// ordered collection and renders only the items in the current window.
pub struct ListSurface<T, V, K = u64> {
    window: ListWindow,
    render_item: RenderFn<T, V>,
    keys: KeyResolver<T, K>,
    on_scroll: Option<OnScrollCallback>,
    last_reported_offset: u64,
    mounted: Vec<ItemKey<K>>,
}

impl<T, V, K: KeyCacheKey + Clone> ListSurface<T, V, K> {
    /// Creates a surface keyed by item index.
    ///
    /// Fails if `options` carries a zero item extent or viewport extent.
    pub fn new(
        options: WindowOptions,
        render_item: impl Fn(&T, usize) -> V + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        let window = ListWindow::new(options, 0)?;
        Ok(Self {
            last_reported_offset: window.scroll_offset(),
            window,
            render_item: Arc::new(render_item),
            keys: KeyResolver::by_index(),
            on_scroll: None,
            mounted: Vec::new(),
        })
    }

    /// Sets the identity lookup. Items for which it returns `None` are keyed by index.
    pub fn with_item_key(
        mut self,
        item_key: impl Fn(&T, usize) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        self.keys = KeyResolver::new(item_key);
        self
    }

    pub fn with_on_scroll(mut self, on_scroll: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(on_scroll));
        self
    }

    pub fn window(&self) -> &ListWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ListWindow {
        &mut self.window
    }

    /// Keys currently mounted (the keys of the last rendered frame, in order).
    pub fn mounted(&self) -> &[ItemKey<K>] {
        &self.mounted
    }

    /// Reports a scroll offset. Returns `true` when the host should render again.
    pub fn on_scroll(&mut self, offset: u64) -> bool {
        let delivered = self.window.on_scroll(offset);
        self.handle_delivery(delivered)
    }

    /// Reports a viewport resize. Returns `true` when the host should render again.
    pub fn on_resize(&mut self, viewport_extent: u32) -> bool {
        let delivered = self.window.on_resize(viewport_extent);
        self.handle_delivery(delivered)
    }

    /// Pulls geometry from `source`. Returns `true` when the host should render again.
    pub fn poll(&mut self, source: &(impl ScrollSource + ?Sized)) -> bool {
        let delivered = self.window.poll(source);
        self.handle_delivery(delivered)
    }

    /// Runs once per display refresh. Returns `true` when a held change was delivered.
    pub fn flush_frame(&mut self) -> bool {
        let delivered = self.window.flush_frame();
        self.handle_delivery(delivered)
    }

    /// Renders the current window of `data`.
    pub fn render<S>(&mut self, data: &S) -> Frame<K, V>
    where
        S: ItemSource<T> + ?Sized,
    {
        let render_item = Arc::clone(&self.render_item);
        let frame = self.render_with(data, |item, index| {
            Ok::<_, Infallible>(render_item(item, index))
        });
        match frame {
            Ok(frame) => frame,
            Err(never) => match never {},
        }
    }

    /// Renders the current window of `data` with a fallible renderer.
    ///
    /// The first renderer error is returned unchanged and the mounted set is left as it was.
    pub fn try_render<S, E>(
        &mut self,
        data: &S,
        render_item: impl FnMut(&T, usize) -> Result<V, E>,
    ) -> Result<Frame<K, V>, E>
    where
        S: ItemSource<T> + ?Sized,
    {
        self.render_with(data, render_item)
    }

    /// Drops every mounted key and returns them, e.g. when the list is torn down.
    pub fn unmount(&mut self) -> Vec<ItemKey<K>> {
        core::mem::take(&mut self.mounted)
    }

    fn handle_delivery(&mut self, delivered: Option<ScrollState>) -> bool {
        let Some(state) = delivered else {
            return false;
        };
        if state.offset != self.last_reported_offset {
            self.last_reported_offset = state.offset;
            if let Some(cb) = &self.on_scroll {
                cb(state.offset);
            }
        }
        true
    }

    fn render_with<S, E>(
        &mut self,
        data: &S,
        mut render_item: impl FnMut(&T, usize) -> Result<V, E>,
    ) -> Result<Frame<K, V>, E>
    where
        S: ItemSource<T> + ?Sized,
    {
        self.window.set_count(data.len());
        let range = self.window.visible_range();
        let spacer_extent = self.window.total_extent();

        let mut items = Vec::with_capacity(range.map_or(0, |r| r.len()));
        if let Some(range) = range {
            let visible: Vec<(usize, &T)> = range
                .indices()
                .filter_map(|index| data.get(index).map(|item| (index, item)))
                .collect();
            let mut keys = Vec::with_capacity(visible.len());
            self.keys.resolve_unique(visible.iter().copied(), &mut keys);

            let extent = self.window.item_extent().get();
            for (key, (index, item)) in keys.into_iter().zip(visible) {
                let Some(offset) = self.window.position_of(index) else {
                    continue;
                };
                let visual = render_item(item, index)?;
                items.push(RenderedItem {
                    key,
                    index,
                    offset,
                    extent,
                    visual,
                });
            }
        }

        let current: KeySet<ItemKey<K>> = items.iter().map(|it| it.key.clone()).collect();
        let previous: KeySet<ItemKey<K>> = self.mounted.iter().cloned().collect();
        let entered: Vec<ItemKey<K>> = items
            .iter()
            .filter(|it| !previous.contains(&it.key))
            .map(|it| it.key.clone())
            .collect();
        let exited: Vec<ItemKey<K>> = self
            .mounted
            .iter()
            .filter(|k| !current.contains(*k))
            .cloned()
            .collect();

        strace!(
            count = data.len(),
            rendered = items.len(),
            entered = entered.len(),
            exited = exited.len(),
            "ListSurface::render"
        );

        self.mounted = items.iter().map(|it| it.key.clone()).collect();
        Ok(Frame {
            range,
            spacer_extent,
            items,
            entered,
            exited,
        })
    }
}

impl<T, V, K> core::fmt::Debug for ListSurface<T, V, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListSurface")
            .field("window", &self.window)
            .field("keys", &self.keys)
            .field("has_on_scroll", &self.on_scroll.is_some())
            .field("mounted", &self.mounted.len())
            .finish_non_exhaustive()
    }
}
