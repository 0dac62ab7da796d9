use std::io::Cursor;

use base64::Engine as _;

use super::*;

fn png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_layer_thresholds_png() {
    let grid = decode_layer(&png(32, 16, [0, 0, 0, 255])).unwrap();
    assert_eq!(grid.count_set(), 512);

    let grid = decode_layer(&png(32, 16, [255, 255, 255, 255])).unwrap();
    assert_eq!(grid.count_set(), 0);
}

#[test]
fn decode_layer_rejects_wrong_size() {
    let err = decode_layer(&png(8, 8, [0, 0, 0, 255])).unwrap_err();
    assert!(err.to_string().contains("32x16"));
}

#[test]
fn decode_layer_rejects_garbage() {
    let err = decode_layer(b"not an image").unwrap_err();
    assert!(matches!(err, FacemapError::Decode(_)));
}

#[test]
fn data_uri_sources_decode() {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png(32, 16, [0, 0, 0, 255]));
    let uri = format!("data:image/png;base64,{b64}");
    let grid = load_layer(Path::new("."), &uri).unwrap();
    assert_eq!(grid.count_set(), 512);
}

#[test]
fn data_uri_must_be_base64() {
    assert!(decode_data_uri("data:image/png,rawbytes").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn missing_file_is_a_decode_error() {
    let err = load_layer(Path::new("target"), "no/such/face_0.png").unwrap_err();
    assert!(matches!(err, FacemapError::Decode(_)));
}

#[test]
fn layer_errors_name_the_source() {
    let b64 = base64::engine::general_purpose::STANDARD.encode(b"junk");
    let err = load_layer(Path::new("."), &format!("data:image/png;base64,{b64}")).unwrap_err();
    assert!(err.to_string().contains("data:image/png;base64"));
}
