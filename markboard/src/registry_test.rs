use super::*;

#[test]
fn default_registers_builtins() {
    let reg = ShapeRegistry::new();
    for kind in ShapeKind::ALL {
        assert_eq!(reg.resolve(kind.tag()), Ok(kind));
    }
    assert_eq!(reg.tags(), vec!["circle", "ellipse", "polygon", "polyline", "rect"]);
}

#[test]
fn resolve_unknown_tag_fails() {
    let reg = ShapeRegistry::new();
    assert_eq!(reg.resolve("point"), Err(BoardError::UnsupportedShapeType("point".to_owned())));
}

#[test]
fn register_alias() {
    let mut reg = ShapeRegistry::new();
    reg.register("bbox", ShapeKind::Rect).expect("register");
    assert!(reg.contains("bbox"));
    assert_eq!(reg.resolve("bbox"), Ok(ShapeKind::Rect));
}

#[test]
fn register_replaces_existing_entry() {
    let mut reg = ShapeRegistry::new();
    reg.register("rect", ShapeKind::Ellipse).expect("register");
    assert_eq!(reg.resolve("rect"), Ok(ShapeKind::Ellipse));
}

#[test]
fn register_rejects_blank_tag() {
    let mut reg = ShapeRegistry::new();
    assert_eq!(reg.register("", ShapeKind::Rect), Err(BoardError::EmptyShapeTag));
    assert_eq!(reg.register("  ", ShapeKind::Rect), Err(BoardError::EmptyShapeTag));
}

#[test]
fn empty_registry_resolves_nothing() {
    let reg = ShapeRegistry::empty();
    assert!(reg.tags().is_empty());
    assert!(reg.resolve("rect").is_err());
}

#[test]
fn registries_are_independent() {
    let mut a = ShapeRegistry::new();
    let b = ShapeRegistry::new();
    a.register("region", ShapeKind::Polygon).expect("register");
    assert!(!b.contains("region"));
}
