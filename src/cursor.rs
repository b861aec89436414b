//! Read-only positions inside a [`Tree`] and iteration in key order.
//!
//! A [`Cursor`] points either at an entry or at the end position, one past the largest entry.
//! Stepping follows parent pointers, so a cursor needs no stack and is `Copy`.
//!
//! A cursor (and an [`Iter`]) borrows its tree. Inserting, removing or clearing needs `&mut Tree`,
//! so the borrow checker rules out any mutation while a cursor is alive and a cursor can never
//! observe a node that has been unlinked.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let tree: Tree<_, _> = [(1, ()), (3, ()), (2, ())].into_iter().collect();
//!
//! let mut cursor = tree.find(&2);
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.key(), Some(&3));
//!
//! // Past the largest entry is the end position.
//! cursor.move_next().unwrap();
//! assert_eq!(cursor, tree.end());
//! assert_eq!(cursor.get(), Err(Error::InvalidPosition));
//!
//! // Stepping back from the end lands on the largest entry.
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor.key(), Some(&3));
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::compare::Natural;
use crate::error::{Error, Result};
use crate::tree::{Link, Tree};

/// A position in a [`Tree`]: one of its entries, or the end position.
pub struct Cursor<'a, K, V, C = Natural> {
    tree: &'a Tree<K, V, C>,
    current: Link<K, V>,
}

// SAFETY: A cursor only reads through its shared borrow of the tree, so it is as thread-safe as
// `&Tree`, which is `Send` and `Sync` when `K`, `V` and `C` are `Sync`.
unsafe impl<K: Sync, V: Sync, C: Sync> Send for Cursor<'_, K, V, C> {}
// SAFETY: See above.
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for Cursor<'_, K, V, C> {}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

/// Two cursors are equal when they belong to the same tree (by address) and sit at the same
/// position.
impl<K, V, C> PartialEq for Cursor<'_, K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}
impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K, V, C> fmt::Debug for Cursor<'_, K, V, C>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("tree", &ptr::addr_of!(*self.tree))
            .field("key", &self.key())
            .finish()
    }
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a Tree<K, V, C>, current: Link<K, V>) -> Self {
        Self { tree, current }
    }

    /// The entry under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPosition`] at the end position.
    pub fn get(&self) -> Result<(&'a K, &'a V)> {
        self.tree
            .node(self.current)
            .map(|node| (&node.key, &node.value))
            .ok_or(Error::InvalidPosition)
    }

    /// The key under the cursor, if any.
    pub fn key(&self) -> Option<&'a K> {
        self.get().ok().map(|(key, _)| key)
    }

    /// The value under the cursor, if any.
    pub fn value(&self) -> Option<&'a V> {
        self.get().ok().map(|(_, value)| value)
    }

    /// Whether the cursor sits at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Steps to the next entry in key order. Stepping from the largest entry reaches the end
    /// position.
    ///
    /// # Errors
    ///
    /// Stepping from the end position fails with [`Error::EmptyTree`] on an empty tree and with
    /// [`Error::InvalidPosition`] otherwise. The cursor doesn't move.
    pub fn move_next(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(if self.tree.is_empty() {
                Error::EmptyTree
            } else {
                Error::InvalidPosition
            });
        }
        self.current = self.tree.successor(self.current);
        Ok(())
    }

    /// Steps to the previous entry in key order. Stepping from the end position reaches the
    /// largest entry.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] when stepping from the end position of an empty tree, and
    /// [`Error::InvalidPosition`] when stepping from the smallest entry. The cursor doesn't move.
    pub fn move_prev(&mut self) -> Result<()> {
        let previous = if self.current.is_none() {
            self.tree.last()
        } else {
            self.tree.predecessor(self.current)
        };

        if previous.is_none() {
            return Err(if self.tree.is_empty() {
                Error::EmptyTree
            } else {
                Error::InvalidPosition
            });
        }
        self.current = previous;
        Ok(())
    }
}

/// An iterator over the entries of a [`Tree`] in key order. Created by [`Tree::iter`].
pub struct Iter<'a, K, V, C = Natural> {
    front: Cursor<'a, K, V, C>,
    back: Cursor<'a, K, V, C>,
    remaining: usize,
}

// SAFETY: An `Iter` is two cursors and a count. See the impls on `Cursor`.
unsafe impl<K: Sync, V: Sync, C: Sync> Send for Iter<'_, K, V, C> {}
// SAFETY: See above.
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V, C> fmt::Debug for Iter<'_, K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    /// `front` and `back` must be the first and last entries of a tree holding `len` entries.
    pub(crate) fn new(front: Cursor<'a, K, V, C>, back: Cursor<'a, K, V, C>, len: usize) -> Self {
        Self {
            front,
            back,
            remaining: len,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.front.get().ok()?;
        self.front.current = self.front.tree.successor(self.front.current);
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.back.get().ok()?;
        self.back.current = self.back.tree.predecessor(self.back.current);
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}
