//! An unbalanced BST whose nodes keep a pointer back to their parent. The parent pointers let
//! cursors and iterators walk the tree in order, in both directions, without recursion or an
//! auxiliary stack.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//! assert_eq!(tree.find_min(), Err(Error::EmptyTree));
//!
//! let (_, inserted) = tree.insert(1, 2);
//! assert!(inserted);
//! assert_eq!(tree.get(&1), Some(&2));
//!
//! // Inserting an existing key keeps the original value.
//! let (_, inserted) = tree.insert(1, 3);
//! assert!(!inserted);
//! assert_eq!(tree.get(&1), Some(&2));
//!
//! // Removing a key returns its value.
//! assert_eq!(tree.remove(&1), Some(2));
//! assert_eq!(tree.get(&1), None);
//! assert_eq!(tree.remove(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::trace;

use crate::compare::{Compare, Natural};
use crate::cursor::{Cursor, Iter};
use crate::error::{Error, Result};

/// An ordered map backed by a plain (never rebalanced) Binary Search Tree.
///
/// Operations take `O(height)`. Inserting keys in sorted order degenerates the tree into a list,
/// so every walk over the structure is a loop rather than a recursion.
pub struct Tree<K, V, C = Natural> {
    root: Link<K, V>,
    len: usize,
    compare: C,
    marker: PhantomData<Box<Node<K, V>>>,
}

// SAFETY: A `Tree` uniquely owns every node reachable from its root, exactly like a
// `Box`-linked tree would. Shared access only ever hands out shared references to keys and values.
unsafe impl<K: Send, V: Send, C: Send> Send for Tree<K, V, C> {}
// SAFETY: See above. `&Tree` allows no mutation.
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for Tree<K, V, C> {}

impl<K, V, C: Default> Default for Tree<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Drop for Tree<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, C> Clone for Tree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::with_comparator(self.compare.clone());

        // Each pending source node is paired with the copied node it should hang from.
        type Slot<K, V> = Option<(NonNull<Node<K, V>>, Side)>;
        let mut pending: Vec<(&Node<K, V>, Slot<K, V>)> = Vec::new();
        pending.extend(self.node(self.root).map(|root| (root, None)));

        while let Some((source, slot)) = pending.pop() {
            let copy = Node::new_leaked(
                source.key.clone(),
                source.value.clone(),
                Link(slot.map(|(parent, _)| parent)),
            );
            match slot {
                None => tree.root = Link(Some(copy)),
                Some((mut parent, side)) => {
                    // SAFETY: `parent` was allocated by an earlier iteration and belongs to
                    // `tree`, which nothing else can reference yet.
                    let parent = unsafe { parent.as_mut() };
                    match side {
                        Side::Left => parent.left = Link(Some(copy)),
                        Side::Right => parent.right = Link(Some(copy)),
                    }
                }
            }
            tree.len += 1;

            pending.extend(self.node(source.left).map(|left| (left, Some((copy, Side::Left)))));
            pending.extend(self.node(source.right).map(|right| (right, Some((copy, Side::Right)))));
        }

        tree
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes one `key, value` line per entry in key order. Meant for diagnostics only.
impl<K, V, C> fmt::Display for Tree<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Null Tree!");
        }
        for (key, value) in self {
            writeln!(f, "{}, {}", key, value)?;
        }
        Ok(())
    }
}

impl<K, V, C> PartialEq for Tree<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for Tree<K, V, C> {}

impl<K, V, C> FromIterator<(K, V)> for Tree<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(C::default());
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for Tree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree` ordered by the keys' [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Generates a new, empty `Tree` ordered by `compare`.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            root: Link(None),
            len: 0,
            compare,
            marker: PhantomData,
        }
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Releases every node. Calling this on an empty tree does nothing.
    pub fn clear(&mut self) {
        let mut pending: Vec<NonNull<Node<K, V>>> = self.root.0.take().into_iter().collect();
        while let Some(ptr) = pending.pop() {
            // SAFETY: Every node hangs from exactly one owning link and the root link was detached
            // above, so each node is reclaimed once. Nodes are allocated with `Box::new` in
            // `Node::new_leaked`.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.left.0);
            pending.extend(node.right.0);
        }

        if self.len > 0 {
            trace!(released = self.len, "cleared tree");
        }
        self.len = 0;
    }

    /// Moves every entry into a new tree, leaving this one empty. The new tree gets a copy of the
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// let moved = tree.take();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(moved.len(), 2);
    /// ```
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        Self {
            root: mem::replace(&mut self.root, Link(None)),
            len: mem::take(&mut self.len),
            compare: self.compare.clone(),
            marker: PhantomData,
        }
    }

    /// The entry with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] when the tree has no entries.
    pub fn find_min(&self) -> Result<(&K, &V)> {
        self.node(self.first())
            .map(|node| (&node.key, &node.value))
            .ok_or(Error::EmptyTree)
    }

    /// The entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] when the tree has no entries.
    pub fn find_max(&self) -> Result<(&K, &V)> {
        self.node(self.last())
            .map(|node| (&node.key, &node.value))
            .ok_or(Error::EmptyTree)
    }

    /// A cursor at the smallest entry, or at the end position if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.first())
    }

    /// A cursor at the end position, one past the largest entry.
    pub fn end(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, Link(None))
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self.begin(), Cursor::new(self, self.last()), self.len)
    }

    pub(crate) fn first(&self) -> Link<K, V> {
        self.leftmost(self.root)
    }

    pub(crate) fn last(&self) -> Link<K, V> {
        self.rightmost(self.root)
    }

    /// Resolves a link taken from this tree.
    pub(crate) fn node(&self, link: Link<K, V>) -> Option<&Node<K, V>> {
        // SAFETY: Every non-null link handed around inside the crate was read out of this tree, and
        // all nodes reachable from the root stay allocated until they are unlinked through
        // `&mut self`. The returned reference borrows `self`, so no such mutation can overlap it.
        link.0.map(|ptr| unsafe { ptr.as_ref() })
    }

    fn leftmost(&self, mut link: Link<K, V>) -> Link<K, V> {
        while let Some(left) = self.node(link).map(|node| node.left).filter(Link::is_some) {
            link = left;
        }
        link
    }

    fn rightmost(&self, mut link: Link<K, V>) -> Link<K, V> {
        while let Some(right) = self.node(link).map(|node| node.right).filter(Link::is_some) {
            link = right;
        }
        link
    }

    /// The next node in key order, or a null link past the largest one.
    pub(crate) fn successor(&self, link: Link<K, V>) -> Link<K, V> {
        let Some(node) = self.node(link) else {
            return Link(None);
        };
        if node.right.is_some() {
            return self.leftmost(node.right);
        }

        // Climb until we come up out of a left subtree.
        let mut child = link;
        let mut parent = node.parent;
        while let Some(above) = self.node(parent) {
            if above.right != child {
                break;
            }
            child = parent;
            parent = above.parent;
        }
        parent
    }

    /// The previous node in key order, or a null link before the smallest one.
    pub(crate) fn predecessor(&self, link: Link<K, V>) -> Link<K, V> {
        let Some(node) = self.node(link) else {
            return Link(None);
        };
        if node.left.is_some() {
            return self.rightmost(node.left);
        }

        let mut child = link;
        let mut parent = node.parent;
        while let Some(above) = self.node(parent) {
            if above.left != child {
                break;
            }
            child = parent;
            parent = above.parent;
        }
        parent
    }
}

impl<K, V, C: Compare<K>> Tree<K, V, C> {
    /// Inserts `value` under `key`. Returns a cursor at the entry stored under `key` and whether
    /// the insert happened. If the key is already present, the tree is left unchanged and the
    /// given key and value are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// let (cursor, inserted) = tree.insert(1, "first");
    /// assert!(inserted);
    /// assert_eq!(cursor.get(), Ok((&1, &"first")));
    ///
    /// let (cursor, inserted) = tree.insert(1, "second");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&"first"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V, C>, bool) {
        let mut parent = Link(None);
        let mut current = self.root;
        let mut ordering = Ordering::Equal;
        while let Some(node) = self.node(current) {
            ordering = self.compare.compare(&key, &node.key);
            let next = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => break,
            };
            parent = current;
            current = next;
        }

        if current.is_some() {
            trace!(len = self.len, "key already present, insert skipped");
            return (Cursor::new(self, current), false);
        }

        let inserted = Link(Some(Node::new_leaked(key, value, parent)));
        match parent.0 {
            None => self.root = inserted,
            Some(mut ptr) => {
                // SAFETY: `parent` was reached from the root of this tree and `&mut self` means no
                // other reference into the tree is alive.
                let parent = unsafe { ptr.as_mut() };
                if ordering == Ordering::Less {
                    parent.left = inserted;
                } else {
                    parent.right = inserted;
                }
            }
        }
        self.len += 1;
        trace!(len = self.len, "inserted entry");

        (Cursor::new(self, inserted), true)
    }

    /// A cursor at the entry stored under `key`, or at the end position if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&2).key(), Some(&2));
    /// assert_eq!(tree.find(&3), tree.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.find_link(key))
    }

    /// Whether an entry is stored under `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find_link(key).is_some()
    }

    /// Potentially finds the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.node(self.find_link(key)).map(|node| &node.value)
    }

    /// Potentially finds the value stored under `key` for modification. Keys can't be modified
    /// in place since that could break the ordering.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut ptr = self.find_link(key).0?;
        // SAFETY: The node belongs to this tree and the returned borrow is tied to `&mut self`.
        Some(unsafe { &mut ptr.as_mut().value })
    }

    /// Removes the entry stored under `key` and returns its value. Removing an absent key does
    /// nothing and returns `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry stored under `key` and returns it.
    ///
    /// When the doomed node has two children, the entry of its successor (the leftmost node of its
    /// right subtree) moves into it and the successor's node is the one that gets unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_, _> = [(5, ()), (3, ()), (8, ())].into_iter().collect();
    ///
    /// assert_eq!(tree.remove_entry(&5), Some((5, ())));
    /// // 8 took the root's place.
    /// assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [3, 8]);
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let target = self.find_link(key).0?;
        // SAFETY: `target` was just found in this tree and `&mut self` is exclusive.
        let node = unsafe { self.unlink(target) };
        self.len -= 1;
        trace!(len = self.len, "removed entry");

        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn find_link(&self, key: &K) -> Link<K, V> {
        let mut current = self.root;
        while let Some(node) = self.node(current) {
            current = match self.compare.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => break,
            };
        }
        current
    }

    /// Unlinks the node holding `target`'s entry and hands back ownership of it. The returned node
    /// always carries `target`'s original key and value, although for a node with two children it
    /// is the successor's allocation that comes back.
    ///
    /// # Safety
    ///
    /// `target` must be a node of this tree.
    unsafe fn unlink(&mut self, target: NonNull<Node<K, V>>) -> Box<Node<K, V>> {
        let target = target.as_ptr();
        let mut doomed = target;

        if let (Some(_), Some(right)) = ((*target).left.0, (*target).right.0) {
            let mut successor = right.as_ptr();
            while let Some(left) = (*successor).left.0 {
                successor = left.as_ptr();
            }
            // The successor lives in the right subtree so these never alias.
            mem::swap(&mut (*target).key, &mut (*successor).key);
            mem::swap(&mut (*target).value, &mut (*successor).value);
            doomed = successor;
        }

        // `doomed` has at most one child now. Splice it out.
        let child = if (*doomed).left.is_some() {
            (*doomed).left
        } else {
            (*doomed).right
        };
        let parent = (*doomed).parent;
        if let Some(child) = child.0 {
            (*child.as_ptr()).parent = parent;
        }
        match parent.0 {
            None => self.root = child,
            Some(parent) => {
                let parent = parent.as_ptr();
                if (*parent).left.0 == NonNull::new(doomed) {
                    (*parent).left = child;
                } else {
                    (*parent).right = child;
                }
            }
        }

        Box::from_raw(doomed)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// A non-owning pointer to a node. Whether a link owns its target depends on where it is stored:
/// `left`, `right` and the tree's root own, `parent` and cursors don't.
pub(crate) struct Link<K, V>(pub(crate) Option<NonNull<Node<K, V>>>);

impl<K, V> Clone for Link<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V> Copy for Link<K, V> {}

impl<K, V> PartialEq for Link<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K, V> Eq for Link<K, V> {}

impl<K, V> Link<K, V> {
    pub(crate) fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) parent: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Allocates a childless node. The caller is responsible for linking it into a tree, which
    /// then owns it.
    fn new_leaked(key: K, value: V, parent: Link<K, V>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            key,
            value,
            left: Link(None),
            right: Link(None),
            parent,
        })))
    }
}
