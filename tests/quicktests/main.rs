use std::collections::{BTreeMap, HashSet};

use linked_bst::{Error, Tree};

fn tree_from(xs: &[i8]) -> Tree<i8, i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x, *x);
    }
    tree
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = tree_from(&xs);

        xs.iter().all(|x| tree.contains(x) && tree.get(x) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = tree_from(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x) && tree.find(x) == tree.end())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = tree_from(&xs);
        let mut successful_inserts = xs.iter().collect::<HashSet<_>>().len();
        let mut successful_removes = 0;
        for delete in &deletes {
            if tree.remove(delete).is_some() {
                successful_removes += 1;
            }
        }

        let mut still_present = xs;
        // We may have inserted the same value multiple times - delete each one.
        still_present.retain(|x| !deletes.contains(x));
        successful_inserts -= successful_removes;

        tree.len() == successful_inserts
            && deletes.iter().all(|x| tree.get(x).is_none())
            && still_present.iter().all(|x| tree.get(x).is_some())
    }

    fn first_insert_wins(pairs: Vec<(i8, u16)>) -> bool {
        let mut tree = Tree::new();
        let mut model = BTreeMap::new();
        for (k, v) in &pairs {
            let inserted = tree.insert(*k, *v).1;
            if inserted == model.contains_key(k) {
                return false;
            }
            model.entry(*k).or_insert(*v);
        }

        tree.iter().eq(model.iter())
    }

    fn in_order_is_strictly_increasing(xs: Vec<i8>) -> bool {
        let tree = tree_from(&xs);
        let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();

        keys.windows(2).all(|w| w[0] < w[1]) && keys.len() == tree.len()
    }

    fn cursor_walk_matches_iter(xs: Vec<i8>) -> bool {
        let tree = tree_from(&xs);

        let mut forward = Vec::new();
        let mut cursor = tree.begin();
        while let Ok((k, _)) = cursor.get() {
            forward.push(*k);
            cursor.move_next().unwrap();
        }

        let mut backward = Vec::new();
        let mut cursor = tree.end();
        while cursor.move_prev().is_ok() {
            backward.push(*cursor.key().unwrap());
        }
        backward.reverse();

        let expected: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
        forward == expected && backward == expected
    }

    fn min_and_max(xs: Vec<i8>) -> bool {
        let tree = tree_from(&xs);
        match (xs.iter().min(), xs.iter().max()) {
            (Some(min), Some(max)) => {
                tree.find_min() == Ok((min, min)) && tree.find_max() == Ok((max, max))
            }
            _ => tree.find_min() == Err(Error::EmptyTree) && tree.find_max() == Err(Error::EmptyTree),
        }
    }

    fn clone_is_deep(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let original = tree_from(&xs);
        let snapshot: Vec<_> = original.iter().map(|(k, v)| (*k, *v)).collect();

        let mut copy = original.clone();
        for delete in &deletes {
            copy.remove(delete);
        }
        copy.insert(i8::MIN, 0);

        original.iter().map(|(k, v)| (*k, *v)).eq(snapshot)
    }
}
