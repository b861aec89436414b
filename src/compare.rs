//! Orderings a [`Tree`](crate::Tree) can be built with.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! // Largest key first.
//! let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! tree.insert(1, "one");
//! tree.insert(3, "three");
//! tree.insert(2, "two");
//!
//! let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [3, 2, 1]);
//! ```

use std::cmp::Ordering;

/// A total order over keys. Two keys comparing `Equal` are the same key as far as the tree is
/// concerned.
pub trait Compare<K: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`] implementation. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Compare<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
