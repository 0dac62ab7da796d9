use super::*;

#[test]
fn group_files_pairs_layers() {
    let set = ImageSet::group_files(
        "faces/",
        [
            "smile_1.png",
            "smile_0.png",
            "blink_0.BMP",
            "blink_1.bmp",
            "README.md",
            "cover.png",
            "smile_7.png",
        ],
    )
    .unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(
        set.get("smile").unwrap(),
        &["faces/smile_0.png".to_string(), "faces/smile_1.png".to_string()]
    );
    assert_eq!(set.names().collect::<Vec<_>>(), vec!["blink", "smile"]);
}

#[test]
fn group_files_keeps_underscores_in_names() {
    let set = ImageSet::group_files("", ["big_grin_0.png", "big_grin_1.png"]).unwrap();
    assert!(set.contains("big_grin"));
    assert_eq!(set.get("big_grin").unwrap()[0], "big_grin_0.png");
}

#[test]
fn group_files_rejects_missing_layer() {
    let err = ImageSet::group_files("faces", ["smile_0.png"]).unwrap_err();
    assert!(err.to_string().contains("smile"));
}

#[test]
fn group_files_rejects_duplicate_layer() {
    assert!(ImageSet::group_files("faces", ["a_0.png", "a_0.gif", "a_1.png"]).is_err());
}

#[test]
fn extend_overrides_existing_faces() {
    let mut base = ImageSet::new();
    base.insert("a", ["x0".to_string(), "x1".to_string()]);
    let mut over = ImageSet::new();
    over.insert("a", ["y0".to_string(), "y1".to_string()]);
    base.extend(over);
    assert_eq!(base.get("a").unwrap()[1], "y1");
}

#[test]
fn validate_source_rules() {
    validate_source("faces/a_0.png", "src").unwrap();
    validate_source("data:image/png;base64,AAAA", "src").unwrap();
    assert!(validate_source("", "src").is_err());
    assert!(validate_source("/etc/passwd", "src").is_err());
    assert!(validate_source("faces/../../x.png", "src").is_err());
    assert!(validate_source("faces\\..\\x.png", "src").is_err());
}
