use markboard::record::ShapeRecord;
use serde_json::Value;

use super::*;

fn dataset() -> Vec<ImageAnnotations> {
    vec![ImageAnnotations {
        id: 7,
        image_name: "cat.jpg".to_owned(),
        image_url: "blob:cat".to_owned(),
        shapes: vec![ShapeRecord {
            id: 3,
            label: "cat".to_owned(),
            tag: "polygon".to_owned(),
            color: "red".to_owned(),
            point_list: vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)],
            resolution: Size::new(64.0, 48.0),
        }],
    }]
}

#[test]
fn strips_id_and_color() {
    let json: Value = serde_json::from_str(&to_plain_json(&dataset()).unwrap()).unwrap();
    let shape = &json[0]["shapes"][0];
    assert!(shape.get("id").is_none());
    assert!(shape.get("color").is_none());
    assert_eq!(shape["label"], "cat");
    assert_eq!(shape["type"], "polygon");
    assert_eq!(shape["pointList"].as_array().map(Vec::len), Some(3));
    assert_eq!(shape["resolution"]["width"], 64.0);
}

#[test]
fn keeps_only_image_name() {
    let json: Value = serde_json::from_str(&to_plain_json(&dataset()).unwrap()).unwrap();
    let image = json[0].as_object().unwrap();
    let mut keys: Vec<&str> = image.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["imageName", "shapes"]);
    assert_eq!(json[0]["imageName"], "cat.jpg");
}

#[test]
fn empty_dataset_is_empty_array() {
    assert_eq!(to_plain_json(&[]).unwrap(), "[]");
}
