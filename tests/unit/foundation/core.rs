use std::cmp::Ordering;

use super::*;

#[test]
fn packed_layer_size_matches_raster() {
    assert_eq!(BYTES_PER_LAYER, 64);
    assert_eq!(LAYERS_PER_FACE, 2);
}

#[test]
fn face_names_uppercase_into_symbols() {
    assert_eq!(validate_face_name("smile").unwrap(), "SMILE");
    assert_eq!(validate_face_name("_blink2").unwrap(), "_BLINK2");
}

#[test]
fn face_names_reject_non_identifiers() {
    assert!(validate_face_name("").is_err());
    assert!(validate_face_name("   ").is_err());
    assert!(validate_face_name("2fast").is_err());
    assert!(validate_face_name("big smile").is_err());
    assert!(validate_face_name("héllo").is_err());
}

#[test]
fn face_names_reject_reserved_symbols() {
    assert!(validate_face_name("invalid_face").is_err());
    assert!(validate_face_name("Number_Faces").is_err());
}

#[test]
fn face_name_order_ignores_case() {
    assert_eq!(cmp_face_names("apple", "Banana"), Ordering::Less);
    assert_eq!(cmp_face_names("Zed", "alpha"), Ordering::Greater);
    assert_eq!(cmp_face_names("A", "a"), Ordering::Less);
    assert_eq!(cmp_face_names("same", "same"), Ordering::Equal);
}
