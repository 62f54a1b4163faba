use std::collections::BTreeSet;

use ordered_tree::Tree;

use crate::Op;

/// Applies a set of operations to a tree and an ordered set.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same values in the set.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
    for op in ops {
        match op {
            Op::Add(value) => {
                tree.add(*value);
                set.insert(*value);
            }
            Op::Remove(value) => {
                assert_eq!(tree.remove(value), set.take(value));
            }
        }
    }
}

quickcheck::quickcheck! {
    fn traversal_is_sorted(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();
        do_ops(&ops, &mut tree, &mut set);

        let values: Vec<i8> = tree.iter().copied().collect();
        values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

quickcheck::quickcheck! {
    fn length_tracks_distinct_values(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();
        do_ops(&ops, &mut tree, &mut set);

        tree.len() == set.len() && tree.is_empty() == set.is_empty()
    }
}

quickcheck::quickcheck! {
    fn removal_preserves_order_and_excludes_value(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree: Tree<i8> = xs.iter().copied().collect();
        let mut set: BTreeSet<i8> = xs.iter().copied().collect();

        for value in &removes {
            assert_eq!(tree.remove(value), set.take(value));
            let values: Vec<i8> = tree.iter().copied().collect();
            if values.windows(2).any(|pair| pair[0] >= pair[1]) {
                return false;
            }
        }

        removes.iter().all(|value| !tree.contains(value))
            && tree.iter().eq(set.iter())
    }
}

quickcheck::quickcheck! {
    fn rank_and_select_round_trip(xs: Vec<i8>) -> bool {
        let tree: Tree<i8> = xs.iter().copied().collect();

        tree.iter()
            .all(|value| tree.find_index(tree.index_of(value)) == Ok(value))
    }
}

quickcheck::quickcheck! {
    fn height_stays_within_bounds(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();
        do_ops(&ops, &mut tree, &mut set);

        let n = tree.len();
        if n == 0 {
            return tree.height() == -1;
        }
        // A tree with n nodes is at best perfectly packed (height
        // floor(log2 n)) and at worst a chain (height n - 1).
        let floor_log = (usize::BITS - 1 - n.leading_zeros()) as isize;
        let height = tree.height();
        floor_log <= height && height <= n as isize - 1
    }
}
