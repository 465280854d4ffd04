use std::collections::BTreeSet;

use super::*;
use crate::foundation::core::TILE_SIZE;

fn pixels(b: Bounds) -> BTreeSet<(i32, i32)> {
    let mut out = BTreeSet::new();
    for y in b.y1..b.y2 {
        for x in b.x1..b.x2 {
            out.insert((x, y));
        }
    }
    out
}

fn damage_of(old: Bounds, new: Bounds) -> (BTreeSet<(i32, i32)>, usize) {
    let mut out = BTreeSet::new();
    let mut calls = 0;
    move_damage(old, new, |b| {
        calls += 1;
        out.extend(pixels(b));
    });
    (out, calls)
}

#[test]
fn damage_covers_symmetric_difference_exactly() {
    let coords = [-3, 0, 2, 5, 7];
    let sizes = [0, 1, 3, 6];
    let old = Bounds::from_xywh(1, 1, 4, 4);
    let old_px = pixels(old);

    for &x in &coords {
        for &y in &coords {
            for &w in &sizes {
                for &h in &sizes {
                    let new = Bounds::from_xywh(x, y, w, h);
                    let new_px = pixels(new);
                    let xor: BTreeSet<_> = old_px.symmetric_difference(&new_px).copied().collect();
                    let (damage, _) = damage_of(old, new);
                    assert!(
                        xor.is_subset(&damage),
                        "damage misses pixels for move {old:?} -> {new:?}"
                    );
                    if old.overlaps(new) {
                        assert_eq!(damage, xor, "overlapping move {old:?} -> {new:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn disjoint_move_reports_both_boxes() {
    let old = Bounds::from_xywh(0, 0, 4, 4);
    let new = Bounds::from_xywh(20, 20, 4, 4);
    let (damage, calls) = damage_of(old, new);
    assert_eq!(calls, 2);
    assert_eq!(damage.len(), 32);
}

#[test]
fn nudge_skips_the_interior() {
    let old = Bounds::from_xywh(0, 0, 40, 40);
    let new = Bounds::from_xywh(1, 0, 40, 40);
    let (damage, _) = damage_of(old, new);
    assert_eq!(damage.len(), 80);
    assert!(!damage.contains(&(20, 20)));
}

#[test]
fn paint_clips_to_tile() {
    let r = Rectangle::new(Bounds::from_xywh(-4, 6, 100, 100), Color::WHITE);
    let mut t = Tile::default();
    r.paint(&mut t, 0, 0);
    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            let expect = if y >= 6 { Color::WHITE } else { Color::TRANSPARENT };
            assert_eq!(t.get(x, y), expect, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn paint_uses_tile_offset() {
    let r = Rectangle::new(Bounds::from_xywh(10, 10, 2, 2), Color::WHITE);
    let mut t = Tile::default();
    r.paint(&mut t, 8, 8);
    assert_eq!(t.get(2, 2), Color::WHITE);
    assert_eq!(t.get(3, 3), Color::WHITE);
    assert_eq!(t.get(4, 4), Color::TRANSPARENT);
    assert_eq!(t.get(1, 2), Color::TRANSPARENT);
}

#[test]
fn translucent_paint_blends() {
    let top = Color::rgba(0, 128, 0, 128);
    let r = Rectangle::new(Bounds::from_xywh(0, 0, 1, 1), top);
    let mut t = Tile::default();
    t.fill(Color::rgb(255, 0, 0));
    r.paint(&mut t, 0, 0);
    assert_eq!(t.get(0, 0), blend(Color::rgb(255, 0, 0), top));
    assert_eq!(t.get(1, 0), Color::rgb(255, 0, 0));
}

#[test]
fn empty_rectangle_paints_nothing() {
    let r = Rectangle::new(Bounds::from_xywh(2, 2, 0, 5), Color::WHITE);
    let mut t = Tile::default();
    r.paint(&mut t, 0, 0);
    assert!(t.pixels().iter().all(|p| *p == Color::TRANSPARENT));
}
