//! This crate exposes an ordered map built on a plain Binary Search Tree (BST) whose nodes link
//! back to their parents.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest path from the
//! root `Node` to a leaf `Node`). The [`Tree`] here never rebalances, so the height depends on
//! insertion order: random keys give `O(lg N)` on average, sorted keys give `O(N)`.
//!
//! Each `Node` also keeps a pointer to its parent. That lets a [`Cursor`] step to the next or
//! previous key without recursion or an auxiliary stack, which is how sorted iteration (left
//! subtree, then the subtree root, then the right subtree) is implemented.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.find_max().unwrap(), (&9, &"9".to_string()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
pub mod cursor;
mod error;
mod tree;

pub use compare::{Compare, Natural};
pub use cursor::{Cursor, Iter};
pub use error::{Error, Result};
pub use tree::Tree;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
