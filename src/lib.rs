//! An ordered set backed by an unbalanced, parent-linked Binary Search Tree
//! (BST) with order-statistic queries.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert,
//! find, and delete stored values. BSTs are typically defined recursively
//! using the notion of a `Node`. A `Node` stores a value and sometimes has
//! child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! Every `Node` here additionally carries a non-owning pointer back to its
//! parent, which lets the tree walk upward to compute in-order successors
//! without a stack and lets deletion splice a node's child into its
//! grandparent's slot in O(1).
//!
//! On top of the usual [`add`](Tree::add)/[`remove`](Tree::remove)/
//! [`contains`](Tree::contains) operations, a [`Tree`] answers order-statistic
//! queries over its in-order sequence: [`find_index`](Tree::find_index)
//! returns the value at a given rank and [`index_of`](Tree::index_of) returns
//! a value's rank (or the rank at which it would be inserted). The tree does
//! not rebalance itself and does not cache per-node subtree sizes, so
//! [`height`](Tree::height) and the rank queries recompute from the live
//! structure on every call.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! tree.add(5);
//! tree.add(3);
//! tree.add(8);
//!
//! // Duplicates are silently ignored.
//! tree.add(5);
//! assert_eq!(tree.len(), 3);
//!
//! assert!(tree.contains(&3));
//! assert_eq!(tree.height(), 1);
//!
//! // In-order rank queries. 6 isn't stored, so `index_of` reports where it
//! // would land in the sorted sequence [3, 5, 8].
//! assert_eq!(tree.index_of(&6), 2);
//! assert_eq!(tree.find_index(0), Ok(&3));
//!
//! assert_eq!(tree.remove(&5), Some(5));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 8]);
//! ```

#![deny(missing_docs)]

mod error;
mod locate;
mod tree;


pub use crate::error::TreeError;
pub use crate::locate::{DefaultLocate, Locate};
pub use crate::tree::{Iter, Node, Tree};
