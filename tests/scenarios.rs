use linked_bst::{Error, Tree};
use pretty_assertions::assert_eq;

fn keys<V>(tree: &Tree<i32, V>) -> Vec<i32> {
    tree.iter().map(|(k, _)| *k).collect()
}

#[test]
fn in_order_traversal_is_sorted() {
    let mut tree = Tree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key, ());
    }

    assert_eq!(keys(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 7);
}

#[test]
fn cursor_steps_through_the_tail() {
    let mut tree = Tree::new();
    for (key, name) in [(1, "AB"), (3, "GR"), (2, "DM"), (6, "RE"), (12, "SR"), (4, "QP")] {
        tree.insert(key, name);
    }

    let mut cursor = tree.find(&4);
    assert_eq!(cursor.get(), Ok((&4, &"QP")));

    cursor.move_next().unwrap();
    assert_eq!(cursor.key(), Some(&6));
    cursor.move_next().unwrap();
    assert_eq!(cursor.key(), Some(&12));
    cursor.move_next().unwrap();
    assert_eq!(cursor, tree.end());

    cursor.move_prev().unwrap();
    assert_eq!(cursor.get(), Ok((&12, &"SR")));
}

#[test]
fn removing_a_node_with_two_children_promotes_its_successor() {
    let mut tree = Tree::new();
    for key in [5, 3, 8] {
        tree.insert(key, key * 100);
    }

    assert_eq!(tree.remove(&5), Some(500));
    assert_eq!(keys(&tree), vec![3, 8]);

    // The in-order successor took the root's place, carrying its own value.
    let mut root_walk = tree.begin();
    root_walk.move_next().unwrap();
    assert_eq!(root_walk.get(), Ok((&8, &800)));
    assert_eq!(format!("{}", tree), "3, 300\n8, 800\n");
}

#[test]
fn duplicate_insert_is_reported_and_ignored() {
    let mut tree = Tree::new();

    let (_, inserted) = tree.insert(7, "original");
    assert!(inserted);
    let (cursor, inserted) = tree.insert(7, "replacement");
    assert!(!inserted);
    assert_eq!(cursor.value(), Some(&"original"));

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&7), Some(&"original"));
}

#[test]
fn min_and_max_on_empty_and_single_node_trees() {
    let mut tree: Tree<i32, char> = Tree::new();
    assert_eq!(tree.find_min(), Err(Error::EmptyTree));
    assert_eq!(tree.find_max(), Err(Error::EmptyTree));

    tree.insert(42, 'x');
    assert_eq!(tree.find_min(), Ok((&42, &'x')));
    assert_eq!(tree.find_max(), Ok((&42, &'x')));
}

#[test]
fn clear_and_remove_are_idempotent() {
    let mut tree: Tree<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();

    for _ in 0..3 {
        assert_eq!(tree.remove(&10), None);
        assert_eq!(tree.len(), 3);
    }

    assert_eq!(tree.to_string(), "1, a\n2, b\n3, c\n");

    tree.clear();
    assert!(tree.is_empty());
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.to_string(), "Null Tree!\n");
}

#[test]
fn copies_are_isolated_and_moves_empty_the_source() {
    let mut original: Tree<_, _> = [(5, 'e'), (6, 'f'), (4, 'd'), (30, 'z'), (26, 'y'), (3, 'c')]
        .into_iter()
        .collect();
    original.remove(&26);

    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.remove(&5);
    copy.insert(40, 'w');
    assert_eq!(keys(&original), vec![3, 4, 5, 6, 30]);
    assert_eq!(keys(&copy), vec![3, 4, 6, 30, 40]);

    let moved = copy.take();
    assert!(copy.is_empty());
    assert_eq!(keys(&moved), vec![3, 4, 6, 30, 40]);
}

#[test]
fn iteration_runs_both_ways() {
    let tree: Tree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();

    let forward: Vec<_> = (&tree).into_iter().map(|(_, v)| *v).collect();
    let backward: Vec<_> = tree.iter().rev().map(|(_, v)| *v).collect();

    assert_eq!(forward, vec!['a', 'b', 'c']);
    assert_eq!(backward, vec!['c', 'b', 'a']);
}
