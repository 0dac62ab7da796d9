use super::*;
use crate::graph::model::{Face, Link};

fn graph(names: &[&str], links: Vec<Link>) -> FaceGraph {
    FaceGraph::new(names.iter().map(|n| Face::new(*n)).collect(), links).unwrap()
}

fn row(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn reference_example_compiles() {
    let g = graph(
        &["A", "B", "C"],
        vec![Link::bidirectional(0, 1), Link::one_way(0, 2)],
    );
    let table = compile_mapping(&g);

    assert_eq!(table.max_links(), 2);
    assert_eq!(
        table.rows(),
        &[
            row(&["B", "C"]),
            row(&["A", INVALID_FACE]),
            row(&[INVALID_FACE, INVALID_FACE]),
        ]
    );
}

#[test]
fn zero_faces_give_empty_table() {
    let table = compile_mapping(&FaceGraph::empty());
    assert_eq!(table.face_count(), 0);
    assert_eq!(table.max_links(), 0);
}

#[test]
fn faces_without_links_have_zero_width_rows() {
    let table = compile_mapping(&graph(&["A", "B"], vec![]));
    assert_eq!(table.max_links(), 0);
    assert_eq!(table.rows(), &[Vec::<String>::new(), Vec::new()]);
}

#[test]
fn rows_are_sorted_uppercase_symbols() {
    let g = graph(
        &["apple", "Mango", "zed"],
        vec![
            Link::one_way(1, 2),
            Link::one_way(1, 0),
            Link::one_way(1, 1),
        ],
    );
    let table = compile_mapping(&g);
    assert_eq!(table.symbols(), &["APPLE", "MANGO", "ZED"]);
    assert_eq!(table.rows()[1], row(&["APPLE", "MANGO", "ZED"]));
    for r in table.rows() {
        assert_eq!(r.len(), table.max_links());
        for token in r {
            assert_eq!(token, &token.to_uppercase());
        }
    }
}

#[test]
fn width_is_true_maximum_out_degree() {
    let g = graph(
        &["A", "B", "C", "D"],
        vec![
            Link::one_way(0, 1),
            Link::bidirectional(2, 0),
            Link::bidirectional(3, 0),
            Link::one_way(1, 3),
        ],
    );
    let table = compile_mapping(&g);
    // A reaches B, C and D.
    assert_eq!(table.max_links(), 3);
    assert_eq!(table.face_count(), 4);
    assert_eq!(table.rows()[0], row(&["B", "C", "D"]));
    assert_eq!(table.rows()[3], row(&["A", INVALID_FACE, INVALID_FACE]));
}

#[test]
fn bidirectional_partners_appear_once() {
    // Parallel edges between one pair are undefined input; the row still lists B once.
    let g = graph(
        &["A", "B"],
        vec![Link::bidirectional(0, 1), Link::one_way(0, 1), Link::bidirectional(1, 0)],
    );
    let table = compile_mapping(&g);
    assert_eq!(table.rows()[0], row(&["B"]));
    assert_eq!(table.rows()[1], row(&["A"]));
}

#[test]
fn adjacency_reproduces_graph_transitions() {
    let g = graph(
        &["A", "B", "C", "D"],
        vec![
            Link::one_way(0, 1),
            Link::one_way(1, 2),
            Link::one_way(2, 0),
            Link::bidirectional(3, 3),
            Link::bidirectional(1, 3),
        ],
    );
    let table = compile_mapping(&g);
    assert_eq!(table.transitions(), g.transitions());
}
