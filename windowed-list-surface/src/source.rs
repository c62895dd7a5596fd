/// An indexable, ordered collection the surface can render from.
///
/// Implemented for slices, `Vec`s and [`crate::Ordered`] views, so a filtered/sorted result can
/// be rendered without copying the items.
pub trait ItemSource<T> {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> ItemSource<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T> ItemSource<T> for alloc::vec::Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}
