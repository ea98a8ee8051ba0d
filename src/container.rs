//! Container Views
//!
//! Thin, uncached views over remote collections. Each call goes back to the remote side,
//! so a view never holds a snapshot: iteration over a collection that changes while it is
//! walked can observe a torn sequence, and an upsert can race another writer between its
//! existence check and its insert or replace.

use crate::error::{ExchangeError, RemoteError};
use crate::remote::{IndexAccess, NameAccess, NameContainer};
use std::ops::Deref;

/// Read-only, order-preserving view over a remote indexed collection.
pub struct SequenceView<A: ?Sized> {
    inner: Box<A>,
}

impl<A> SequenceView<A>
where
    A: IndexAccess + ?Sized,
{
    pub fn new(inner: Box<A>) -> Self {
        Self { inner }
    }

    pub fn len(&self) -> Result<usize, ExchangeError> {
        Ok(self.inner.count()?)
    }

    /// Element at `index`; fails with `IndexOutOfRange` past the current length.
    pub fn at(&self, index: usize) -> Result<A::Element, ExchangeError> {
        let len = self.len()?;
        if index >= len {
            return Err(ExchangeError::IndexOutOfRange { index, len });
        }
        self.inner.by_index(index).map_err(|e| match e {
            RemoteError::IndexOutOfBounds(_) => ExchangeError::IndexOutOfRange { index, len },
            other => other.into(),
        })
    }

    /// Lazy walk from position 0. Calling `iter` again restarts from the beginning.
    pub fn iter(&self) -> SequenceIter<'_, A> {
        SequenceIter {
            view: self,
            next: 0,
            end: None,
            done: false,
        }
    }
}

/// Iterator produced by [`SequenceView::iter`]. Stops after the first error.
pub struct SequenceIter<'a, A: ?Sized> {
    view: &'a SequenceView<A>,
    next: usize,
    end: Option<usize>,
    done: bool,
}

impl<'a, A> Iterator for SequenceIter<'a, A>
where
    A: IndexAccess + ?Sized,
{
    type Item = Result<A::Element, ExchangeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let end = match self.end {
            Some(end) => end,
            None => match self.view.len() {
                Ok(len) => {
                    self.end = Some(len);
                    len
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            },
        };
        if self.next >= end {
            self.done = true;
            return None;
        }

        let index = self.next;
        self.next += 1;
        match self.view.inner.by_index(index) {
            Ok(element) => Some(Ok(element)),
            Err(e) => {
                self.done = true;
                Some(Err(match e {
                    RemoteError::IndexOutOfBounds(_) => {
                        ExchangeError::IndexOutOfRange { index, len: end }
                    }
                    other => other.into(),
                }))
            }
        }
    }
}

/// Read-only, key-based view over a remote named collection.
pub struct MapView<A: ?Sized> {
    inner: Box<A>,
}

impl<A> MapView<A>
where
    A: NameAccess + ?Sized,
{
    pub fn new(inner: Box<A>) -> Self {
        Self { inner }
    }

    pub fn contains(&self, key: &str) -> Result<bool, ExchangeError> {
        Ok(self.inner.has_by_name(key)?)
    }

    /// Value stored under `key`; a missing key surfaces as `KeyNotFound`.
    pub fn get(&self, key: &str) -> Result<A::Element, ExchangeError> {
        Ok(self.inner.by_name(key)?)
    }

    /// Names in the remote's enumeration order, which is not guaranteed stable.
    pub fn keys(&self) -> Result<Vec<String>, ExchangeError> {
        Ok(self.inner.element_names()?)
    }

    pub fn len(&self) -> Result<usize, ExchangeError> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ExchangeError> {
        Ok(self.len()? == 0)
    }

    pub fn remote(&self) -> &A {
        &self.inner
    }
}

/// Outcome of [`MutableMapView::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// A [`MapView`] that can also insert, replace and remove entries.
pub struct MutableMapView<C: ?Sized> {
    map: MapView<C>,
}

impl<C> MutableMapView<C>
where
    C: NameContainer + ?Sized,
{
    pub fn new(inner: Box<C>) -> Self {
        Self {
            map: MapView::new(inner),
        }
    }

    /// Replace the entry when present, insert it otherwise. Not atomic.
    pub fn upsert(&self, key: &str, value: C::Element) -> Result<Upsert, ExchangeError> {
        if self.map.contains(key)? {
            self.map.inner.replace_by_name(key, value)?;
            Ok(Upsert::Replaced)
        } else {
            self.map.inner.insert_by_name(key, value)?;
            Ok(Upsert::Inserted)
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), ExchangeError> {
        Ok(self.map.inner.remove_by_name(key)?)
    }

    /// Drop the mutating half, keeping a read-only view of the same collection.
    pub fn into_read_only(self) -> MapView<C> {
        self.map
    }
}

impl<C: ?Sized> Deref for MutableMapView<C> {
    type Target = MapView<C>;

    fn deref(&self) -> &MapView<C> {
        &self.map
    }
}
