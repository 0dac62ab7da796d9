use super::*;

fn abc() -> Vec<Face> {
    vec![Face::new("A"), Face::new("B"), Face::new("C")]
}

#[test]
fn new_rejects_duplicate_symbols() {
    let err = FaceGraph::new(vec![Face::new("smile"), Face::new("SMILE")], vec![]).unwrap_err();
    assert!(err.to_string().contains("share header symbol"));
}

#[test]
fn new_rejects_out_of_range_links() {
    assert!(FaceGraph::new(abc(), vec![Link::one_way(0, 3)]).is_err());
    assert!(FaceGraph::new(abc(), vec![Link::one_way(7, 0)]).is_err());
}

#[test]
fn new_rejects_invalid_names() {
    assert!(FaceGraph::new(vec![Face::new("has space")], vec![]).is_err());
}

#[test]
fn transitions_expand_bidirectional_links() {
    let g = FaceGraph::new(abc(), vec![Link::bidirectional(0, 1), Link::one_way(0, 2)]).unwrap();
    let t: Vec<_> = g.transitions().into_iter().collect();
    assert_eq!(
        t,
        vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "C".to_string()),
            ("B".to_string(), "A".to_string()),
        ]
    );
}

#[test]
fn face_index_uses_exact_names() {
    let g = FaceGraph::new(vec![Face::new("Blink"), Face::new("smile")], vec![]).unwrap();
    assert_eq!(g.face_index("smile"), Some(FaceIndex(1)));
    assert_eq!(g.face_index("SMILE"), None);
}

#[test]
fn link_serializes_flag_like_the_diagram() {
    let json = serde_json::to_value(Link::bidirectional(0, 1)).unwrap();
    assert_eq!(json["isBiDirectional"], serde_json::Value::Bool(true));

    let parsed: Link = serde_json::from_str(r#"{"from":2,"to":1}"#).unwrap();
    assert_eq!(parsed, Link::one_way(2, 1));
}
