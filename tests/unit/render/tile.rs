use super::*;

#[test]
fn tile_indexing_is_row_major() {
    let mut t = Tile::default();
    t.set(3, 1, Color::WHITE);
    assert_eq!(t.pixels()[(TILE_SIZE + 3) as usize], Color::WHITE);
    assert_eq!(t.get(3, 1), Color::WHITE);
    assert_eq!(t.row(1)[3], Color::WHITE);
    assert_eq!(t.row(0)[3], Color::TRANSPARENT);
}

#[test]
fn pool_reuses_returned_tiles() {
    let mut p = TilePool::new(TilePoolOpts::default());
    let a = p.get();
    let b = p.get();
    p.put(b);
    p.put(a);
    let _c = p.get();
    let _d = p.get();

    let st = p.stats();
    assert_eq!(st.allocated, 2);
    assert_eq!(st.outstanding, 2);
    assert_eq!(st.retained, 0);
}

#[test]
fn pool_hands_out_previous_contents() {
    let mut p = TilePool::new(TilePoolOpts::default());
    let mut a = p.get();
    a.fill(Color::WHITE);
    p.put(a);
    let b = p.get();
    assert_eq!(b.get(0, 0), Color::WHITE);
}

#[test]
fn pool_honors_retention_cap() {
    let mut p = TilePool::new(TilePoolOpts { max_retained: 1 });
    let a = p.get();
    let b = p.get();
    p.put(a);
    p.put(b);

    let st = p.stats();
    assert_eq!(st.retained, 1);
    assert_eq!(st.dropped_on_put, 1);
    assert_eq!(st.outstanding, 0);
}
