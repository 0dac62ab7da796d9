use std::path::PathBuf;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("facemap_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("faces")).unwrap();
    dir
}

fn write_png(path: &Path) {
    image::RgbaImage::from_pixel(32, 16, image::Rgba([0, 0, 0, 255]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

const GRAPH: &str = r#"{
  "cells": [
    { "id": "1", "name": "smile" },
    { "id": "2", "name": "blink" },
    { "id": "3", "name": "ghost" },
    { "type": "standard.Link", "source": { "id": "1" }, "target": { "id": "2" } },
    { "type": "standard.Link", "source": { "id": "2" }, "target": { "id": "1" } },
    { "type": "standard.Link", "source": { "id": "3" }, "target": { "id": "1" } }
  ]
}"#;

#[test]
fn defaults_apply() {
    let p = Project::from_reader(r#"{"graph":"g.json"}"#.as_bytes(), ".").unwrap();
    assert!(p.def().parallel_decode);
    assert!(p.def().faces.is_empty());
    assert!(p.mapping_out().is_none());
    assert!(p.pack_opts().parallel);
    p.validate().unwrap();
}

#[test]
fn validate_rejects_bad_faces_and_paths() {
    let bad_path = Project::from_reader(r#"{"graph":"../g.json"}"#.as_bytes(), ".").unwrap();
    assert!(bad_path.validate().is_err());

    let one_layer = Project::from_reader(
        r#"{"graph":"g.json","faces":[{"name":"a","images":["a.png"]}]}"#.as_bytes(),
        ".",
    )
    .unwrap();
    assert!(one_layer.validate().is_err());

    let bad_name = Project::from_reader(
        r#"{"graph":"g.json","faces":[{"name":"a b","images":["a.png","b.png"]}]}"#.as_bytes(),
        ".",
    )
    .unwrap();
    assert!(bad_name.validate().is_err());
}

#[test]
fn unknown_project_json_is_a_validation_error() {
    let err = Project::from_reader(r#"{"images_dir":"x"}"#.as_bytes(), ".").unwrap_err();
    assert!(matches!(err, FacemapError::Validation(_)));
}

#[test]
fn face_graph_imports_against_loaded_images() {
    let dir = scratch("face_graph_imports");
    for name in ["smile_0", "smile_1", "blink_0", "blink_1"] {
        write_png(&dir.join("faces").join(format!("{name}.png")));
    }
    std::fs::write(dir.join("graph.json"), GRAPH).unwrap();
    std::fs::write(
        dir.join("project.json"),
        r#"{ "graph": "graph.json", "images_dir": "faces", "mapping_out": "out/map.h" }"#,
    )
    .unwrap();

    let project = Project::from_path(dir.join("project.json")).unwrap();
    assert_eq!(project.root(), dir.as_path());
    assert_eq!(project.mapping_out(), Some(dir.join("out/map.h")));

    let graph = project.face_graph().unwrap();
    let names: Vec<_> = graph.faces().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["blink", "smile"]);
    assert_eq!(graph.links().len(), 1);
    assert!(graph.links()[0].is_bidirectional);
    assert_eq!(
        graph.faces()[1].images,
        vec!["faces/smile_0.png".to_string(), "faces/smile_1.png".to_string()]
    );
}

#[test]
fn explicit_faces_override_grouped_ones() {
    let dir = scratch("explicit_faces_override");
    for name in ["smile_0", "smile_1", "alt"] {
        write_png(&dir.join("faces").join(format!("{name}.png")));
    }
    let def = ProjectDef {
        graph: "graph.json".to_string(),
        images_dir: Some("faces".to_string()),
        faces: vec![FaceSource {
            name: "smile".to_string(),
            images: vec!["faces/alt.png".to_string(), "faces/smile_1.png".to_string()],
        }],
        mapping_out: None,
        bitmap_out: None,
        parallel_decode: false,
    };
    let project = Project::from_def(def, &dir);
    let set = project.image_set().unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("smile").unwrap()[0], "faces/alt.png");
    assert!(!project.pack_opts().parallel);
}

#[test]
fn missing_graph_file_fails() {
    let dir = scratch("missing_graph_file");
    let project = Project::from_def(
        ProjectDef {
            graph: "nope.json".to_string(),
            images_dir: None,
            faces: vec![],
            mapping_out: None,
            bitmap_out: None,
            parallel_decode: true,
        },
        &dir,
    );
    assert!(project.face_graph().is_err());
}
