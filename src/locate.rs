//! Pluggable node-lookup strategies.
//!
//! A [`Tree`](crate::Tree) resolves [`get`](crate::Tree::get) and
//! [`contains`](crate::Tree::contains) through a [`Locate`] strategy chosen at
//! construction time. The default, [`DefaultLocate`], is the standard
//! top-down binary search; callers with a specialized index can swap in their
//! own strategy via [`Tree::with_locate`](crate::Tree::with_locate) without
//! touching the tree itself.

use std::cmp::Ordering;

use crate::tree::Node;

/// A strategy for finding the node holding a value.
///
/// Implementations only get shared access to nodes, so a strategy can read
/// the structure but never mutate it. The strategy must be pure: the same
/// `(value, root)` pair always yields the same answer.
///
/// # Examples
///
/// ```
/// use ordered_tree::{Locate, Node, Tree};
///
/// /// A strategy that only ever matches the root node.
/// struct RootOnly;
///
/// impl Locate<i32> for RootOnly {
///     fn locate<'a>(&self, value: &i32, root: Option<&'a Node<i32>>) -> Option<&'a Node<i32>> {
///         root.filter(|node| node.value() == value)
///     }
/// }
///
/// let mut tree = Tree::with_locate(RootOnly);
/// tree.add(5);
/// tree.add(3);
///
/// assert!(tree.contains(&5));
/// assert!(!tree.contains(&3));
/// ```
pub trait Locate<T> {
    /// Finds the node holding `value` in the subtree rooted at `root`, or
    /// `None` if no node holds it.
    fn locate<'a>(&self, value: &T, root: Option<&'a Node<T>>) -> Option<&'a Node<T>>;
}

/// The standard top-down binary search installed by [`Tree::new`](crate::Tree::new).
///
/// Walks from the root, descending left on "less" and right on "greater",
/// stopping only at an exact three-way match. Because [`add`](crate::Tree::add)
/// routes ties to the right, any equal value can only live on the right-hand
/// path this search takes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLocate;

impl<T: Ord> Locate<T> for DefaultLocate {
    fn locate<'a>(&self, value: &T, root: Option<&'a Node<T>>) -> Option<&'a Node<T>> {
        let mut current = root;
        while let Some(node) = current {
            current = match value.cmp(node.value()) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    #[test]
    fn default_locate_finds_present_values() {
        let tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9].iter().copied().collect();

        for value in [1, 3, 4, 5, 7, 8, 9] {
            let node = DefaultLocate.locate(&value, tree.root());
            assert_eq!(node.map(Node::value), Some(&value));
        }
    }

    #[test]
    fn default_locate_misses_absent_values() {
        let tree: Tree<i32> = [5, 3, 8].iter().copied().collect();

        for value in [0, 2, 4, 6, 9] {
            assert!(DefaultLocate.locate(&value, tree.root()).is_none());
        }
    }

    #[test]
    fn default_locate_on_empty_tree() {
        let tree: Tree<i32> = Tree::new();
        assert!(DefaultLocate.locate(&1, tree.root()).is_none());
    }

    /// A strategy that refuses to descend past a fixed depth.
    struct Shallow(usize);

    impl Locate<i32> for Shallow {
        fn locate<'a>(&self, value: &i32, root: Option<&'a Node<i32>>) -> Option<&'a Node<i32>> {
            let mut current = root;
            for _ in 0..=self.0 {
                let node = current?;
                current = match value.cmp(node.value()) {
                    std::cmp::Ordering::Less => node.left(),
                    std::cmp::Ordering::Equal => return Some(node),
                    std::cmp::Ordering::Greater => node.right(),
                };
            }
            None
        }
    }

    #[test]
    fn injected_strategy_replaces_lookup() {
        let mut tree = Tree::with_locate(Shallow(1));
        for value in [5, 3, 8, 1, 9] {
            tree.add(value);
        }

        // Depth 0 and 1 are reachable, depth 2 is not.
        assert!(tree.contains(&5));
        assert!(tree.contains(&3));
        assert!(tree.contains(&8));
        assert!(!tree.contains(&1));
        assert!(!tree.contains(&9));

        // The strategy only affects lookups; removal still finds the value.
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.len(), 4);
    }
}
