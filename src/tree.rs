//! The parent-linked ordered tree itself.
//!
//! Child links own their nodes; parent links are non-owning raw pointers that
//! exist purely for upward traversal (successor walks) and for splicing
//! during deletion. The tree never rebalances: its shape is exactly the shape
//! the insertion order produced.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::mem;
use std::ptr::NonNull;

use crate::error::TreeError;
use crate::locate::{DefaultLocate, Locate};

/// An ordered set of values backed by an unbalanced BST with parent links.
///
/// Values are unique under [`Ord`]; adding a value that compares equal to a
/// stored one is a silent no-op. Lookups run in O(height), which is O(log n)
/// for friendly insertion orders and O(n) in the worst case — the tree is
/// deliberately not self-balancing.
///
/// # Examples
///
/// ```
/// use ordered_tree::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert!(!tree.contains(&1));
///
/// tree.add(1);
/// assert!(tree.contains(&1));
///
/// // Removing a value returns it.
/// assert_eq!(tree.remove(&1), Some(1));
/// assert!(!tree.contains(&1));
/// ```
pub struct Tree<T> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that nodes can be
    // relinked during deletion without the children's parent pointers
    // breaking.
    root: Link<T>,
    len: usize,
    locate: Box<dyn Locate<T>>,
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        fn drop_subtree<T>(link: Link<T>) {
            if let Some(ptr) = link.0 {
                // SAFETY: child links are uniquely owned, so each node is
                // reached (and freed) exactly once. Every node was allocated
                // with `Box::new` in `Node::new_boxed`.
                let mut node = unsafe { Box::from_raw(ptr.as_ptr()) };
                drop_subtree(node.left.take());
                drop_subtree(node.right.take());
            }
        }
        drop_subtree(self.root.take());
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.get())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` using the standard top-down binary
    /// search for lookups.
    pub fn new() -> Self
    where
        T: Ord,
    {
        Self::with_locate(DefaultLocate)
    }

    /// Generates a new, empty `Tree` that resolves [`get`](Tree::get) and
    /// [`contains`](Tree::contains) through the given [`Locate`] strategy
    /// instead of the default binary search.
    ///
    /// Structural operations ([`add`](Tree::add), [`remove`](Tree::remove))
    /// always use the default search so the BST shape stays consistent no
    /// matter what the strategy answers.
    pub fn with_locate<L>(locate: L) -> Self
    where
        L: Locate<T> + 'static,
    {
        Self {
            root: Link(None),
            len: 0,
            locate: Box::new(locate),
        }
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no values at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.get()
    }

    /// Adds the given value to the tree.
    ///
    /// Adding a value that is already stored is a silent no-op: no new node
    /// is created and [`len`](Tree::len) does not change. Callers that need
    /// to know whether an insert happened can check [`contains`](Tree::contains)
    /// first or compare [`len`](Tree::len) before and after.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.add(5);
    /// tree.add(5);
    ///
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn add(&mut self, value: T)
    where
        T: Ord,
    {
        let mut parent = Link(None);
        let mut went_left = false;
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: every pointer reachable from the root references a live
            // node exclusively owned by this tree, and `&mut self` means no
            // other references into the node graph exist.
            let node = unsafe { ptr.as_ref() };
            parent = Link(Some(ptr));
            // One consistent three-way comparison per visited node; ties
            // never descend, they end the walk.
            match value.cmp(&node.value) {
                Ordering::Less => {
                    went_left = true;
                    current = node.left.0;
                }
                Ordering::Equal => return,
                Ordering::Greater => {
                    went_left = false;
                    current = node.right.0;
                }
            }
        }

        let mut new = NonNull::from(Box::leak(Node::new_boxed(value)));
        // SAFETY: the node was just allocated and nothing else references it.
        unsafe { new.as_mut().parent = parent };
        match parent.0 {
            None => self.root = Link(Some(new)),
            Some(ptr) => {
                // SAFETY: `ptr` is the last node visited and the chosen side
                // was observed to be empty.
                let node = unsafe { &mut *ptr.as_ptr() };
                if went_left {
                    node.left = Link(Some(new));
                } else {
                    node.right = Link(Some(new));
                }
            }
        }
        self.len += 1;
        self.check_invariants();
    }

    /// Removes the given value from the tree and returns it. Returns `None`
    /// (and changes nothing) when the value isn't stored.
    ///
    /// A node with two children is not unlinked itself: its value is swapped
    /// with its in-order successor's and the successor's node is unlinked
    /// instead, so node identity does not survive a removal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree: Tree<i32> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Some(5));
    /// assert_eq!(tree.remove(&5), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let target = self.find_ptr(value)?;

        // SAFETY (for the whole block): every pointer dereferenced below
        // comes from a link owned by this tree, and `&mut self` guarantees no
        // outstanding references into the node graph. Each raw borrow below
        // is short-lived and no two live `&mut`s alias.
        unsafe {
            // The node to unlink: the target itself when it has at most one
            // child, otherwise its in-order successor. The successor is the
            // minimum of the right subtree and so never has a left child.
            let spliced = if (*target.as_ptr()).left.0.is_none()
                || (*target.as_ptr()).right.0.is_none()
            {
                target
            } else {
                let mut successor = (*target.as_ptr())
                    .right
                    .0
                    .expect("a node with two children has a right child");
                while let Some(left) = (*successor.as_ptr()).left.0 {
                    successor = left;
                }
                // The successor's value moves into the target's slot and the
                // value being removed rides along into the successor's node.
                mem::swap(
                    &mut (*target.as_ptr()).value,
                    &mut (*successor.as_ptr()).value,
                );
                successor
            };

            // Splice the unlinked node's only child (if any) into its slot.
            let child = (*spliced.as_ptr()).left.0.or((*spliced.as_ptr()).right.0);
            if let Some(child) = child {
                (*child.as_ptr()).parent = (*spliced.as_ptr()).parent;
            }
            match (*spliced.as_ptr()).parent.0 {
                None => self.root = Link(child),
                Some(parent) => {
                    let parent = parent.as_ptr();
                    if (*parent).left.0 == Some(spliced) {
                        (*parent).left = Link(child);
                    } else {
                        (*parent).right = Link(child);
                    }
                }
            }

            // SAFETY: `spliced` is fully unlinked now, so this is the only
            // remaining way to reach it. Its child links are cleared before
            // the box drops; the child (if any) lives on in the tree.
            let mut node = Box::from_raw(spliced.as_ptr());
            node.left = Link(None);
            node.right = Link(None);
            self.len -= 1;
            self.check_invariants();
            Some(node.value)
        }
    }

    /// Potentially finds the node holding the given value, resolved through
    /// the configured [`Locate`] strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Node, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.add(3);
    ///
    /// assert_eq!(tree.get(&3).map(Node::value), Some(&3));
    /// assert!(tree.get(&42).is_none());
    /// ```
    pub fn get(&self, value: &T) -> Option<&Node<T>> {
        self.locate.locate(value, self.root.get())
    }

    /// Whether the given value is stored in the tree, resolved through the
    /// configured [`Locate`] strategy.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// The height of the tree: `-1` when empty, `0` for a single node, and
    /// in general one more than the taller child subtree.
    ///
    /// Heights are not cached, so this recomputes in O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.add(5);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.add(3);
    /// tree.add(8);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        fn height_of<T>(node: Option<&Node<T>>) -> isize {
            match node {
                None => -1,
                Some(node) => 1 + height_of(node.left()).max(height_of(node.right())),
            }
        }
        height_of(self.root.get())
    }

    /// The node holding the smallest value, or `None` for an empty tree.
    pub fn minimum(&self) -> Option<&Node<T>> {
        self.root.get().map(Node::minimum)
    }

    /// Visits every value in ascending order.
    ///
    /// The traversal is driven by parent links ([`Node::successor`]), so it
    /// allocates nothing and costs O(n) overall.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<i32> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 5, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.root.get().map(Node::minimum),
            remaining: self.len,
        }
    }

    /// The value at position `index` (0-based) of the in-order sequence.
    ///
    /// # Errors
    ///
    /// [`TreeError::IndexOutOfBounds`] when `index` is not in `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<i32> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.find_index(2), Ok(&8));
    /// assert!(tree.find_index(3).is_err());
    /// ```
    pub fn find_index(&self, index: usize) -> Result<&T, TreeError> {
        self.iter().nth(index).ok_or(TreeError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// The in-order rank of the given value: its position in the sorted
    /// sequence when stored, otherwise the position at which it would be
    /// inserted to keep the sequence sorted.
    ///
    /// The sequence is materialized fresh and binary searched on every call,
    /// so this is O(n). There are no per-node subtree-size counters to make
    /// it cheaper.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<i32> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.index_of(&5), 1);
    /// // 6 is absent; it would slot in between 5 and 8.
    /// assert_eq!(tree.index_of(&6), 2);
    /// ```
    pub fn index_of(&self, value: &T) -> usize
    where
        T: Ord,
    {
        let values: Vec<&T> = self.iter().collect();
        match values.binary_search(&value) {
            Ok(index) | Err(index) => index,
        }
    }

    /// The default top-down search, used by structural operations regardless
    /// of the injected lookup strategy.
    fn find_ptr(&self, value: &T) -> Option<NonNull<Node<T>>>
    where
        T: Ord,
    {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // See the safety note in `add`.
            let node = unsafe { ptr.as_ref() };
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left.0,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => current = node.right.0,
            }
        }
        None
    }

    /// Re-verifies the BST order, parent-consistency, and length invariants
    /// after every mutation in debug builds. A failure here is a bug in this
    /// module, never a caller error.
    fn check_invariants(&self)
    where
        T: Ord,
    {
        if cfg!(debug_assertions) {
            fn check<T: Ord>(node: &Node<T>, parent: Option<NonNull<Node<T>>>) -> usize {
                assert_eq!(node.parent.0, parent);
                let this = Some(NonNull::from(node));
                let mut count = 1;
                if let Some(left) = node.left() {
                    assert!(left.value < node.value);
                    count += check(left, this);
                }
                if let Some(right) = node.right() {
                    assert!(node.value < right.value);
                    count += check(right, this);
                }
                count
            }
            let count = self.root.get().map_or(0, |root| check(root, None));
            assert_eq!(count, self.len);
        }
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

struct Link<T>(Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    fn get(&self) -> Option<&Node<T>> {
        // SAFETY: if the link is not `None` then it points at a live node.
        // The returned borrow is tied to `&self`, which is itself derived
        // from a borrow of the tree, so the node cannot be freed underneath
        // it.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

/// One stored value and its links into the tree.
///
/// Shared references to nodes are handed out by [`Tree::get`],
/// [`Tree::root`], and [`Tree::minimum`]; they borrow the tree, so they
/// cannot outlive it or coexist with a mutation.
pub struct Node<T> {
    value: T,
    parent: Link<T>,
    left: Link<T>,
    right: Link<T>,
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The parent is deliberately left out: printing it would loop.
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left.get())
            .field("right", &self.right.get())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            parent: Link(None),
            left: Link(None),
            right: Link(None),
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left child, holding values smaller than this node's.
    pub fn left(&self) -> Option<&Self> {
        self.left.get()
    }

    /// The right child, holding values larger than this node's.
    pub fn right(&self) -> Option<&Self> {
        self.right.get()
    }

    /// The parent node; `None` for the root.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.get()
    }

    /// The node holding the smallest value in this node's subtree, found by
    /// walking left links until none remain.
    pub fn minimum(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The node holding the next value in in-order sequence, or `None` when
    /// this node holds the maximum.
    ///
    /// When there is a right subtree, the successor is its minimum.
    /// Otherwise it is the first ancestor reached via a left-child step.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Node, Tree};
    ///
    /// let tree: Tree<i32> = vec![5, 3, 8].into_iter().collect();
    ///
    /// let smallest = tree.minimum().unwrap();
    /// assert_eq!(smallest.value(), &3);
    /// assert_eq!(smallest.successor().map(Node::value), Some(&5));
    /// ```
    pub fn successor(&self) -> Option<&Self> {
        if let Some(right) = self.right() {
            return Some(right.minimum());
        }
        let mut child = NonNull::from(self);
        let mut current = self.parent.0;
        while let Some(ptr) = current {
            // SAFETY: parent links of a live tree always reference live
            // nodes, and the tree is frozen for as long as `&self` exists.
            let ancestor = unsafe { ptr.as_ref() };
            if ancestor.right.0 != Some(child) {
                return Some(ancestor);
            }
            child = ptr;
            current = ancestor.parent.0;
        }
        None
    }
}

/// An in-order (ascending) iterator over a [`Tree`]'s values.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.successor();
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}
