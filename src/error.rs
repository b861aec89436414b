use thiserror::Error;

/// Failures reported by [`Tree`](crate::Tree) queries and [`Cursor`](crate::Cursor) movement.
///
/// Inserting a duplicate key and removing an absent key are not errors. They are reported through
/// the `bool` returned by [`Tree::insert`](crate::Tree::insert) and the `Option` returned by
/// [`Tree::remove`](crate::Tree::remove).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tree has no entries.
    #[error("tree is empty")]
    EmptyTree,
    /// The cursor is at the end position, or the step would move past either end of the tree.
    #[error("cursor is not at a valid position")]
    InvalidPosition,
}

/// Result type for tree and cursor operations.
pub type Result<T> = std::result::Result<T, Error>;
