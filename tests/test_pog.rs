use pogtree::error::{FormatError, LookupError, PogTreeError};
use pogtree::pog::{EdgeEnd, EdgeStart, PartialOrderGraph, assemble};
use pogtree::pog_from_json;
use pogtree::record::PogRecord;
use serde_json::{Value, json};

fn chain_record(name: &str) -> Value {
    json!({
        "Name": name,
        "Indices": [0, 1, 2],
        "Adjacent": [[1], [2], []],
        "Nodes": [{"Value": "M"}, {"Value": "K"}, {"Value": "V"}]
    })
}

fn ancestor_record(edge_indices: Value, edges: Value) -> Value {
    let mut record = chain_record("0");
    record["Edgeindices"] = edge_indices;
    record["Edges"] = edges;
    record["Edgetype"] = json!("Bidirectional");
    record
}

fn build(record: &Value, is_ancestor: bool) -> Result<PartialOrderGraph, PogTreeError> {
    pog_from_json(&record.to_string(), is_ancestor)
}

// --- TESTS EXTANTS ---
#[test]
fn test_extant_chain() {
    let graph = build(&chain_record("XP_1"), false).unwrap();

    assert_eq!(graph.name(), "XP_1");
    assert!(!graph.is_ancestor());
    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.sequence(), "MKV");

    // One successor edge per position, a single terminator at the end
    for position in [0, 1] {
        let edges = graph.edges_from(position);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].start(), EdgeStart::Position(position));
        assert_eq!(edges[0].end(), EdgeEnd::Position(position + 1));
        assert!(!edges[0].is_annotated());
    }
    let last = graph.edges_from(2);
    assert_eq!(last.len(), 1);
    assert!(last[0].is_terminator());
    assert_eq!(graph.num_edges(), 3);
}

#[test]
fn test_extant_must_not_branch() {
    let mut record = chain_record("A");
    record["Adjacent"] = json!([[1, 2], [2], []]);
    let err = build(&record, false).unwrap_err();
    assert_eq!(
        err.as_format(),
        Some(&FormatError::BranchingExtant {
            name: "A".to_string(),
            position: 0,
            successors: 2
        })
    );
}

#[test]
fn test_metadata_and_names() {
    let mut record = chain_record("12");
    record["GRASP_version"] = json!("2024.05.30");
    record["Starts"] = json!(0);
    record["Ends"] = json!(2);
    record["Size"] = json!(5);
    record["Terminated"] = json!(true);
    record["Directed"] = json!(true);
    record["Edgetype"] = json!("Bidirectional");

    let graph = build(&record, false).unwrap();
    assert_eq!(graph.name(), "N12");
    assert_eq!(graph.version(), Some("2024.05.30"));
    assert_eq!(graph.start(), Some(0));
    assert_eq!(graph.end(), Some(2));
    assert_eq!(graph.size(), 5);
    assert_eq!(graph.is_terminated(), Some(true));
    assert_eq!(graph.is_directed(), Some(true));

    let bare = build(&chain_record("A"), false).unwrap();
    assert_eq!(bare.version(), None);
    assert_eq!(bare.size(), 3);
}

#[test]
fn test_positions_keep_record_order() {
    let record = json!({
        "Name": "A",
        "Indices": [4, 9, 11],
        "Adjacent": [[9], [11], []],
        "Nodes": [{"Value": "A"}, {"Value": "C"}, {"Value": "G"}]
    });
    let graph = build(&record, false).unwrap();
    assert_eq!(graph.positions().collect::<Vec<_>>(), vec![4, 9, 11]);
    assert_eq!(graph.node_at(9).unwrap().symbol(), "C");
    assert!(graph.node_at(5).is_none());
    assert!(graph.edges_from(5).is_empty());
}

// --- TESTS ANCESTORS ---
#[test]
fn test_annotated_edge_replaces_plain_edge() {
    let record = ancestor_record(json!([[0, 1]]), json!([{"Recip": true}]));
    let graph = build(&record, true).unwrap();
    assert_eq!(graph.name(), "N0");

    let edges = graph.edges_from(0);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].end(), EdgeEnd::Position(1));
    let annotation = edges[0].annotation().unwrap();
    assert_eq!(annotation.reciprocated, Some(true));
    assert_eq!(annotation.edge_type.as_deref(), Some("Bidirectional"));

    assert_eq!(graph.edges_from(1).len(), 1);
    assert!(graph.edges_from(2)[0].is_terminator());
}

#[test]
fn test_ancestor_alternative_paths() {
    let mut record = ancestor_record(
        json!([[0, 1], [0, 2], [1, 2]]),
        json!([
            {"Recip": true, "Weight": 0.8},
            {"Recip": false, "Forward": true, "Weight": 0.2},
            {"Recip": true, "Backward": true}
        ]),
    );
    record["Adjacent"] = json!([[1, 2], [2], []]);
    let graph = build(&record, true).unwrap();

    let edges = graph.edges_from(0);
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|edge| edge.is_annotated()));
    assert_eq!(edges[1].annotation().unwrap().weight, Some(0.2));
    assert_eq!(edges[1].annotation().unwrap().forward, Some(true));
    assert_eq!(graph.num_edges(), 4);
}

#[test]
fn test_virtual_start_attaches_to_first_node() {
    let first = ancestor_record(
        json!([[-1, 0], [0, 1]]),
        json!([{"Recip": true}, {"Recip": true}]),
    );
    let last = ancestor_record(
        json!([[0, 1], [-1, 0]]),
        json!([{"Recip": true}, {"Recip": true}]),
    );

    for record in [first, last] {
        let graph = build(&record, true).unwrap();
        let node = &graph.nodes()[0];
        assert_eq!(node.position(), 0);
        assert_eq!(node.edges().len(), 2);
        let virtual_edges: Vec<_> = node
            .edges()
            .iter()
            .filter(|edge| edge.start() == EdgeStart::VirtualStart)
            .collect();
        assert_eq!(virtual_edges.len(), 1);
        assert_eq!(virtual_edges[0].end(), EdgeEnd::Position(0));
        assert_eq!(graph.edges_from(1).len(), 1);
    }
}

#[test]
fn test_annotated_terminator() {
    let record = ancestor_record(json!([[2, -999]]), json!([{"Weight": 1.0}]));
    let graph = build(&record, true).unwrap();
    let edges = graph.edges_from(2);
    assert_eq!(edges.len(), 1);
    assert!(edges[0].is_terminator());
    assert!(edges[0].is_annotated());
}

#[test]
fn test_extant_ignores_annotated_edges() {
    let record = ancestor_record(json!([[0, 2]]), json!([{"Recip": true}]));
    let graph = build(&record, false).unwrap();
    assert_eq!(graph.num_edges(), 3);
    assert!(!graph.edges_from(0)[0].is_annotated());
}

// --- TESTS MALFORMED RECORDS ---
#[test]
fn test_ancestor_requires_edge_data() {
    let mut record = chain_record("N1");
    record["Edgeindices"] = json!([]);
    record["Edges"] = json!([]);
    let err = build(&record, true).unwrap_err();
    assert_eq!(
        err.as_format(),
        Some(&FormatError::MissingField {
            record: "N1".to_string(),
            field: "Edgetype"
        })
    );
}

#[test]
fn test_format_errors() {
    let mut record = chain_record("A");
    record["Adjacent"] = json!([[1], [2]]);
    assert_eq!(
        build(&record, false).unwrap_err().as_format(),
        Some(&FormatError::LengthMismatch {
            field: "Adjacent",
            expected: 3,
            actual: 2
        })
    );

    let mut record = chain_record("A");
    record["Indices"] = json!([0, 1, 1]);
    assert_eq!(
        build(&record, false).unwrap_err().as_format(),
        Some(&FormatError::DuplicatePosition(1))
    );

    let record = ancestor_record(json!([[0, 1], [1, 2]]), json!([{"Recip": true}]));
    assert!(matches!(
        build(&record, true).unwrap_err().as_format(),
        Some(FormatError::LengthMismatch { field: "Edges", .. })
    ));

    let record = ancestor_record(json!([[-2, 1]]), json!([{}]));
    assert_eq!(
        build(&record, true).unwrap_err().as_format(),
        Some(&FormatError::InvalidEdge { start: -2, end: 1 })
    );

    let record = ancestor_record(json!([[0, -5]]), json!([{}]));
    assert_eq!(
        build(&record, true).unwrap_err().as_format(),
        Some(&FormatError::InvalidEdge { start: 0, end: -5 })
    );

    let err = pog_from_json(r#"{"Name": "A"}"#, false).unwrap_err();
    assert!(matches!(err, PogTreeError::Json(_)));
}

#[test]
fn test_missing_required_field_is_json_error() {
    let mut record = chain_record("A");
    if let Value::Object(fields) = &mut record {
        fields.remove("Indices");
    }
    let err = build(&record, false).unwrap_err();
    assert!(matches!(err, PogTreeError::Json(_)));
    assert!(err.is_format());
    assert!(err.as_format().is_none());
    assert!(err.to_string().contains("Indices"));
}

#[test]
fn test_lookup_errors() {
    let record = ancestor_record(json!([[7, 1]]), json!([{}]));
    assert_eq!(
        build(&record, true).unwrap_err().as_lookup(),
        Some(&LookupError::UnknownPosition {
            graph: "N0".to_string(),
            position: 7
        })
    );

    let empty = json!({
        "Name": "3",
        "Indices": [],
        "Adjacent": [],
        "Nodes": [],
        "Edgeindices": [[-1, -999]],
        "Edges": [{}],
        "Edgetype": "Bidirectional"
    });
    let record = PogRecord::from_json(&empty.to_string()).unwrap();
    assert_eq!(
        assemble(&record, true).unwrap_err().as_lookup(),
        Some(&LookupError::EmptyGraph("N3".to_string()))
    );
}
