use std::collections::BTreeMap;

use super::*;
use crate::foundation::core::COORD_LIMIT;

const BG: Color = Color::rgb(10, 20, 30);

/// Paint `line` over every tile of a `size x size` area and collect the changed pixels.
fn rasterize(line: &Line, size: i32) -> BTreeMap<(i32, i32), Color> {
    let mut out = BTreeMap::new();
    for ty in (-TILE_SIZE..size).step_by(TILE_SIZE as usize) {
        for tx in (-TILE_SIZE..size).step_by(TILE_SIZE as usize) {
            let mut t = Tile::default();
            t.fill(BG);
            line.paint(&mut t, tx, ty);
            for y in 0..TILE_SIZE {
                for x in 0..TILE_SIZE {
                    if t.get(x, y) != BG {
                        out.insert((tx + x, ty + y), t.get(x, y));
                    }
                }
            }
        }
    }
    out
}

#[test]
fn endpoints_are_normalized_left_to_right() {
    let l = Line::new(10, 2, 3, 7, Color::WHITE);
    assert_eq!((l.x1, l.y1, l.x2, l.y2), (3, 7, 10, 2));
}

#[test]
fn bounding_box_is_exclusive_and_sorted() {
    let l = Line::new(3, 7, 10, 2, Color::WHITE);
    assert_eq!(l.bounding_box(), Bounds::new(3, 2, 11, 8));
}

#[test]
fn degenerate_line_is_a_single_pixel() {
    let l = Line::new(5, 5, 5, 5, Color::WHITE);
    let px = rasterize(&l, 16);
    assert_eq!(px.len(), 1);
    assert_eq!(px.get(&(5, 5)), Some(&Color::WHITE));
}

#[test]
fn horizontal_line_spans_tiles() {
    let l = Line::new(2, 9, 20, 9, Color::WHITE);
    let px = rasterize(&l, 32);
    assert_eq!(px.len(), 19);
    assert!((2..=20).all(|x| px.get(&(x, 9)) == Some(&Color::WHITE)));
}

#[test]
fn vertical_translucent_line_blends() {
    let c = Color::rgba(0, 100, 0, 100);
    let l = Line::new(4, 12, 4, -3, c);
    let px = rasterize(&l, 16);
    assert_eq!(px.len(), 16);
    assert_eq!(px.get(&(4, 0)), Some(&blend(BG, c)));
}

#[test]
fn diagonal_stays_inside_bounding_box() {
    let lines = [
        Line::new(-5, 3, 40, 17, Color::WHITE),
        Line::new(1, 30, 29, 2, Color::rgba(90, 0, 0, 90)),
        Line::new(7, -4, 12, 35, Color::WHITE),
        Line::new(20, 1, 3, 25, Color::WHITE),
        Line::new(0, 0, 31, 31, Color::WHITE),
    ];
    for l in lines {
        let bb = l.bounding_box();
        for &(x, y) in rasterize(&l, 48).keys() {
            assert!(
                x >= bb.x1 && x < bb.x2 && y >= bb.y1 && y < bb.y2,
                "pixel ({x}, {y}) outside {bb:?} for {l:?}"
            );
        }
    }
}

#[test]
fn tiled_walk_matches_single_walk() {
    // Reference: walk the whole line once from its start, no tiles involved.
    let l = Line::new(1, 2, 29, 13, Color::WHITE);
    let mut reference = BTreeMap::new();
    let inc = (i64::from(l.y2 - l.y1) << 16) / i64::from(l.x2 - l.x1);
    for x in l.x1..=l.x2 {
        let q = i64::from(x - l.x1) * inc;
        let y = l.y1 + (q >> 16) as i32;
        let frac = (q >> 8) as u8;
        for (py, w) in [(y, 255 - frac), (y + 1, frac)] {
            if w != 0 {
                reference.insert((x, py), blend(BG, apply_alpha(l.color, w)));
            }
        }
    }
    reference.retain(|_, c| *c != BG);

    assert_eq!(rasterize(&l, 32), reference);
}

#[test]
fn steep_line_paints_one_pair_per_row() {
    let l = Line::new(3, 0, 6, 20, Color::WHITE);
    let px = rasterize(&l, 32);
    for y in 0..=20 {
        let n = px.keys().filter(|(_, py)| *py == y).count();
        assert!((1..=2).contains(&n), "row {y} has {n} pixels");
    }
}

#[test]
fn zero_weight_pixels_leave_translucent_backdrop_alone() {
    let backdrop = Color::rgba(0, 0, 100, 100);
    let mut t = Tile::default();
    t.fill(backdrop);
    Line::new(0, 0, 7, 3, Color::WHITE).paint(&mut t, 0, 0);

    // The walk starts exactly on row 0, so its partner pixel below gets weight 0.
    assert_eq!(t.get(0, 1), backdrop);
    assert_eq!(t.get(0, 0).a, 255);
}

#[test]
fn extreme_endpoints_are_clamped() {
    let l = Line::new(i32::MIN, 0, i32::MAX, 3, Color::WHITE);
    assert_eq!((l.x1, l.x2), (-COORD_LIMIT, COORD_LIMIT));
    assert_eq!(l.bounding_box(), Bounds::new(-COORD_LIMIT, 0, COORD_LIMIT + 1, 4));
}

#[test]
fn far_tile_origins_do_not_overflow() {
    let lines = [
        Line::new(-2_000_000_000, 0, 2_000_000_000, 5, Color::WHITE),
        Line::new(0, i32::MIN, 3, i32::MAX, Color::WHITE),
        Line::new(-4, 2, 40, 2, Color::WHITE),
        Line::new(6, -9, 6, 40, Color::WHITE),
    ];
    for l in lines {
        for (tx, ty) in [(i32::MIN, 0), (i32::MAX - 3, 0), (0, i32::MIN), (0, i32::MAX)] {
            let mut t = Tile::default();
            t.fill(BG);
            l.paint(&mut t, tx, ty);
            assert!(t.pixels().iter().all(|p| *p == BG), "{l:?} at ({tx}, {ty})");
        }
    }
}

#[test]
fn long_shallow_line_paints_near_origin() {
    let l = Line::new(-2_000_000_000, 0, 2_000_000_000, 5, Color::WHITE);
    assert!(!rasterize(&l, 16).is_empty());
}
