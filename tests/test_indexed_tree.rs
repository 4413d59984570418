use pogtree::error::{FormatError, PogTreeError};
use pogtree::model::{BranchpointLabel, Children, IndexedTree};
use pogtree::newick::parse_str;
use pogtree::record::TreeRecord;
use pogtree::tree_from_json;

fn record(parents: &[i64], labels: &[&str], distances: &[f64]) -> TreeRecord {
    TreeRecord {
        parents: parents.to_vec(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        distances: distances.to_vec(),
        branchpoints: parents.len(),
    }
}

fn format_error(result: Result<IndexedTree, PogTreeError>) -> FormatError {
    match result {
        Err(PogTreeError::Format(e)) => e,
        other => panic!("expected format error, got {other:?}"),
    }
}

// --- TESTS RECORDS ---
#[test]
fn test_from_record() {
    let json = r#"{
        "Parents": [-1, 0, 0, 2, 2],
        "Labels": ["0", "A", "1", "B", "C"],
        "Distances": [0.0, 1.0, 3.0, 2.0, 2.0],
        "Branchpoints": 5
    }"#;
    let tree = tree_from_json(json).unwrap();

    assert_eq!(tree.num_branchpoints(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.root().id(), "N0");
    assert_eq!(*tree.label(2), BranchpointLabel::auto(1));
    assert_eq!(tree.branchpoint("B").unwrap().parent(), Some("N1"));
    assert_eq!(tree.index_of("N1"), Some(2));
    assert_eq!(tree.children_of(2), &Children::Internal(vec![3, 4]));
    assert_eq!(tree.children_of(1), &Children::Leaf);
    assert!(tree.is_valid());
}

#[test]
fn test_record_round_trip() {
    let original = record(
        &[-1, 0, 0, 2, 2],
        &["0", "A", "Anc", "B", "C"],
        &[0.0, 1.0, 3.0, 2.0, 2.0],
    );
    let tree = IndexedTree::from_record(&original).unwrap();
    assert_eq!(
        *tree.label(2),
        BranchpointLabel::NamedAncestor("Anc".to_string())
    );
    assert_eq!(tree.to_record(), original);

    let json = original.to_json().unwrap();
    assert_eq!(TreeRecord::from_json(&json).unwrap(), original);
}

#[test]
fn test_numeric_labels_keep_their_digits() {
    let original = record(&[-1, 0, 0], &["7", "07", "A"], &[0.0, 1.0, 1.0]);
    let tree = IndexedTree::from_record(&original).unwrap();
    assert_eq!(tree.root().id(), "N7");
    assert_eq!(tree.index_of("N07"), Some(1));
    assert_eq!(tree.to_record(), original);

    let original = record(&[-1, 0, 0], &["007", "A", "B"], &[0.0, 1.0, 1.0]);
    let tree = IndexedTree::from_record(&original).unwrap();
    assert_eq!(tree.root().id(), "N007");
    assert_eq!(tree.to_record().labels[0], "007");
}

#[test]
fn test_root_need_not_be_first() {
    let tree = IndexedTree::from_record(&record(&[2, 2, -1], &["A", "B", "R"], &[1.0, 2.0, 0.0]))
        .unwrap();
    assert_eq!(tree.root_index(), 2);
    assert_eq!(tree.root().children(), &["A".to_string(), "B".to_string()]);
    let pre_order: Vec<usize> = tree.pre_order_iter().collect();
    assert_eq!(pre_order, vec![2, 0, 1]);
}

#[test]
fn test_record_errors() {
    let mut short = record(&[-1, 0, 0], &["0", "A", "B"], &[0.0, 1.0, 1.0]);
    short.labels.pop();
    assert_eq!(
        format_error(IndexedTree::from_record(&short)),
        FormatError::LengthMismatch {
            field: "Labels",
            expected: 3,
            actual: 2
        }
    );

    assert_eq!(
        format_error(IndexedTree::from_record(&record(
            &[-1, 0, 7],
            &["0", "A", "B"],
            &[0.0; 3]
        ))),
        FormatError::InvalidParent {
            child: 2,
            parent: 7
        }
    );

    assert_eq!(
        format_error(IndexedTree::from_record(&record(
            &[-1, -1, 0],
            &["0", "1", "B"],
            &[0.0; 3]
        ))),
        FormatError::MultipleRoots {
            first: 0,
            second: 1
        }
    );

    assert_eq!(
        format_error(IndexedTree::from_record(&record(&[1, 0], &["A", "B"], &[0.0; 2]))),
        FormatError::MissingRoot
    );

    // 1 and 2 are each other's parent
    assert_eq!(
        format_error(IndexedTree::from_record(&record(
            &[-1, 2, 1],
            &["0", "1", "2"],
            &[0.0; 3]
        ))),
        FormatError::Disconnected { unreachable: 2 }
    );

    assert_eq!(
        format_error(IndexedTree::from_record(&record(
            &[-1, 0, 0],
            &["0", "A", "A"],
            &[0.0; 3]
        ))),
        FormatError::DuplicateName("A".to_string())
    );
}

#[test]
fn test_undecodable_record() {
    let err = tree_from_json(r#"{"Parents": [-1]}"#).unwrap_err();
    assert!(matches!(err, PogTreeError::Json(_)));
    assert!(err.is_format());
}

// --- TESTS STRUCTURE ---
#[test]
fn test_children_partition_non_root_indices() {
    let tree = parse_str("((A:1,B:1):1,(C:1,(D:1,E:1,F:1):1):1,G:1);").unwrap();
    let n = tree.num_branchpoints();

    let mut seen = vec![0usize; n];
    for index in 0..n {
        for &child in tree.children_of(index).as_slice() {
            assert_eq!(tree.parent_of(child), Some(index));
            seen[child] += 1;
        }
    }
    for (index, count) in seen.iter().enumerate() {
        let expected = if index == tree.root_index() { 0 } else { 1 };
        assert_eq!(*count, expected, "index {index}");
    }
    assert_eq!(tree.parents().iter().filter(|p| p.is_none()).count(), 1);
}

#[test]
fn test_traversals() {
    let tree = parse_str("(A:1,(B:2,C:2)D:3)E:4;").unwrap();

    let pre: Vec<&str> = tree.pre_order_iter().map(|i| tree.name(i)).collect();
    assert_eq!(pre, vec!["E", "A", "D", "B", "C"]);

    let post: Vec<&str> = tree.post_order_iter().map(|i| tree.name(i)).collect();
    assert_eq!(post, vec!["A", "B", "C", "D", "E"]);

    let d = tree.index_of("D").unwrap();
    let subtree: Vec<&str> = tree.subtree_indices(d).iter().map(|&i| tree.name(i)).collect();
    assert_eq!(subtree, vec!["D", "B", "C"]);
}

#[test]
fn test_lookup() {
    let tree = parse_str("(A:1,B:2)R:0;").unwrap();
    assert_eq!(tree[1].id(), "A");
    assert!(tree.branchpoint("Z").is_none());
    let err = tree.require_index("Z").unwrap_err();
    assert!(err.as_lookup().is_some());
    assert_eq!(tree.name_indices().len(), 3);
}
