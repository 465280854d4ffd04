use super::*;

fn layer_at(x: i32, y: i32) -> Object {
    Object::Layer(Layer::new(Bounds::from_xywh(x, y, 10, 10), Color::BLACK))
}

#[test]
fn origin_sums_ancestor_layers() {
    let mut s = Scene::new(Bounds::from_xywh(0, 0, 100, 100), Color::BLACK);
    let a = s.push(s.root(), layer_at(10, 20)).unwrap();
    let b = s.push(a, layer_at(-3, 4)).unwrap();
    let r = s.push(
        b,
        Object::Rectangle(Rectangle::new(Bounds::from_xywh(1, 1, 1, 1), Color::WHITE)),
    ).unwrap();

    assert_eq!(s.origin_of(s.parent(r)), (7, 24));
    assert_eq!(s.origin_of(s.parent(a)), (0, 0));
    assert_eq!(s.origin_of(None), (0, 0));
}

#[test]
fn push_keeps_paint_order() {
    let mut s = Scene::new(Bounds::from_xywh(0, 0, 100, 100), Color::BLACK);
    let root = s.root();
    let a = s.push(root, layer_at(0, 0)).unwrap();
    let b = s.push(root, layer_at(5, 5)).unwrap();
    assert_eq!(s.layer(root).map(|l| l.children.clone()), Some(vec![a, b]));
    assert_eq!(s.len(), 3);
}

#[test]
fn handles_from_another_scene_are_rejected() {
    let mut s1 = Scene::new(Bounds::from_xywh(0, 0, 10, 10), Color::BLACK);
    let s2 = Scene::new(Bounds::from_xywh(0, 0, 10, 10), Color::BLACK);
    let id = s1.push(s1.root(), layer_at(0, 0)).unwrap();
    assert!(s1.object(id).is_ok());
    assert!(matches!(s2.object(id), Err(TileError::Scene(_))));
}

#[test]
fn bounding_box_dispatches_per_kind() {
    let line = Object::Line(Line::new(4, 9, 1, 2, Color::WHITE));
    assert_eq!(line.bounding_box(), Bounds::new(1, 2, 5, 10));
    assert_eq!(layer_at(3, 3).bounding_box(), Bounds::new(3, 3, 13, 13));
}

#[test]
fn push_under_non_layer_fails_without_orphans() {
    let mut s = Scene::new(Bounds::from_xywh(0, 0, 100, 100), Color::BLACK);
    let r = s
        .push(
            s.root(),
            Object::Rectangle(Rectangle::new(Bounds::from_xywh(1, 1, 1, 1), Color::WHITE)),
        )
        .unwrap();
    let before = s.len();

    let err = s.push(r, layer_at(0, 0)).unwrap_err();
    assert!(matches!(err, TileError::Scene(_)));
    assert_eq!(s.len(), before);
    assert_eq!(s.layer(s.root()).map(|l| l.children.len()), Some(1));
}

#[test]
fn push_under_foreign_layer_fails() {
    let mut s1 = Scene::new(Bounds::from_xywh(0, 0, 10, 10), Color::BLACK);
    let s2 = Scene::new(Bounds::from_xywh(0, 0, 10, 10), Color::BLACK);
    assert!(s1.push(s2.root(), layer_at(0, 0)).is_err());
    assert_eq!(s1.len(), 1);
}

#[test]
fn origin_saturates_instead_of_wrapping() {
    let mut s = Scene::new(Bounds::from_xywh(0, 0, 10, 10), Color::BLACK);
    let mut parent = s.root();
    for _ in 0..200 {
        parent = s.push(parent, layer_at(crate::COORD_LIMIT, crate::COORD_LIMIT)).unwrap();
    }
    assert_eq!(s.origin_of(Some(parent)), (i32::MAX, i32::MAX));
}
